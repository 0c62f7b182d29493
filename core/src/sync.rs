// SPDX-FileCopyrightText: 2026 Gala Developers
//
// SPDX-License-Identifier: Apache-2.0

//! Per-event read-through cache kept fresh by change notifications.
//!
//! Selecting an event subscribes to its tasks, guests and budget items and
//! loads the event with all child collections. Any notification on any of
//! the three subscriptions re-reads the event, tasks, guests and budget
//! items; vendors are only read until a full load of the selection has
//! committed. Mutators only write to the store and rely on the notification
//! round trip to refresh the snapshot.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError, Weak};

use tokio::sync::watch;
use tokio::task::JoinHandle;

use crate::budget::{BudgetItem, BudgetItemDraft, BudgetItemPatch};
use crate::data::{EventData, Primary};
use crate::error::Result;
use crate::feed::{Subscription, SubscriptionId};
use crate::guest::{Guest, GuestDraft, GuestPatch};
use crate::store::Store;
use crate::task::{Task, TaskDraft, TaskPatch};
use crate::types::{Collection, Id};

/// Collections whose changes trigger a refresh.
pub const WATCHED: [Collection; 3] = [
    Collection::Tasks,
    Collection::Guests,
    Collection::BudgetItems,
];

/// Observable state of an [`EventSync`].
#[derive(Debug, Clone, PartialEq, serde::Serialize)]
pub struct SyncState {
    /// The last committed snapshot.
    pub data: EventData,
    /// True until the first load for a selected event settles.
    ///
    /// Starts out true and stays so while no event is selected.
    pub loading: bool,
    /// Message of the last failure. Only a later failure replaces it.
    pub error: Option<String>,
}

impl Default for SyncState {
    fn default() -> Self {
        Self {
            data: EventData::default(),
            loading: true,
            error: None,
        }
    }
}

#[derive(Debug)]
struct Listener {
    subscription: SubscriptionId,
    task: JoinHandle<()>,
}

#[derive(Debug, Default)]
struct Control {
    event_id: Option<Id>,
    /// Bumped on every selection; results of older selections are dropped.
    generation: u64,
    next_request: u64,
    /// Last request whose data was committed.
    committed_request: u64,
    /// Set once a full load of the current selection has committed.
    primed: bool,
    listeners: Vec<Listener>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Scope {
    /// Event, tasks, guests, budget items and vendors.
    Initial,
    /// Everything but vendors.
    Refresh,
}

#[derive(Debug)]
enum Loaded {
    Full(EventData),
    Primary(Primary),
}

#[derive(Debug)]
struct Inner {
    store: Store,
    state: watch::Sender<SyncState>,
    control: Mutex<Control>,
}

impl Inner {
    fn lock(&self) -> MutexGuard<'_, Control> {
        self.control.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn release(&self, control: &mut Control) {
        for listener in control.listeners.drain(..) {
            self.store.feed().unsubscribe(listener.subscription);
            listener.task.abort();
        }
    }

    fn spawn_listener(
        self: &Arc<Self>,
        mut subscription: Subscription,
        generation: u64,
    ) -> Listener {
        let id = subscription.id();
        let weak: Weak<Inner> = Arc::downgrade(self);
        let task = tokio::spawn(async move {
            while let Some(change) = subscription.recv().await {
                let Some(inner) = weak.upgrade() else {
                    break;
                };
                tracing::debug!(
                    collection = %change.collection,
                    kind = ?change.kind,
                    event_id = %change.event_id,
                    "change received, refreshing"
                );
                let event_id = change.event_id;
                tokio::spawn(async move {
                    if let Err(e) = inner.load(event_id, generation, Scope::Refresh).await {
                        tracing::warn!(err = %e, "refresh failed, keeping previous snapshot");
                    }
                });
            }
        });
        Listener {
            subscription: id,
            task,
        }
    }

    /// Reads and commits a snapshot unless a newer one already landed.
    ///
    /// Until a full load of the selection has committed, refreshes read
    /// vendors too, so a committed snapshot never mixes two events.
    async fn load(&self, event_id: Id, generation: u64, scope: Scope) -> Result<()> {
        let (request, scope) = {
            let mut control = self.lock();
            if control.generation != generation {
                return Ok(());
            }
            control.next_request += 1;
            let scope = if control.primed { scope } else { Scope::Initial };
            (control.next_request, scope)
        };

        let result = match scope {
            Scope::Initial => EventData::fetch(&self.store, &event_id)
                .await
                .map(Loaded::Full),
            Scope::Refresh => Primary::fetch(&self.store, &event_id)
                .await
                .map(Loaded::Primary),
        };

        let mut control = self.lock();
        if control.generation != generation {
            tracing::debug!(%event_id, request, "dropping result of a previous selection");
            return result.map(drop);
        }

        match result {
            Ok(_) if request <= control.committed_request => {
                tracing::debug!(%event_id, request, "dropping result overtaken by a newer load");
                Ok(())
            }
            Ok(loaded) => {
                tracing::debug!(%event_id, request, "committing snapshot");
                control.committed_request = request;
                self.state.send_modify(|s| {
                    s.loading = false;
                    match loaded {
                        Loaded::Full(data) => s.data = data,
                        Loaded::Primary(primary) => s.data.apply(primary),
                    }
                });
                if scope == Scope::Initial {
                    control.primed = true;
                }
                Ok(())
            }
            Err(e) => {
                self.state.send_modify(|s| {
                    s.loading = false;
                    s.error = Some(e.to_string());
                });
                Err(e)
            }
        }
    }

    fn record<T>(&self, result: Result<T>) -> Result<T> {
        if let Err(e) = &result {
            tracing::warn!(err = %e, "mutation failed");
            self.state.send_modify(|s| s.error = Some(e.to_string()));
        }
        result
    }
}

/// Keeps the data of one selected event in sync with the store.
///
/// Dropping it releases every subscription.
#[derive(Debug)]
pub struct EventSync {
    inner: Arc<Inner>,
}

impl EventSync {
    /// Creates a sync with no event selected.
    pub fn new(store: Store) -> Self {
        let (state, _) = watch::channel(SyncState::default());
        Self {
            inner: Arc::new(Inner {
                store,
                state,
                control: Mutex::new(Control::default()),
            }),
        }
    }

    /// The selected event, if any.
    pub fn event_id(&self) -> Option<Id> {
        self.inner.lock().event_id.clone()
    }

    /// A copy of the current state.
    pub fn snapshot(&self) -> SyncState {
        self.inner.state.borrow().clone()
    }

    /// A receiver that sees every committed state.
    pub fn watch(&self) -> watch::Receiver<SyncState> {
        self.inner.state.subscribe()
    }

    /// Selects an event.
    ///
    /// Subscriptions of the previous selection are released first. With
    /// `None` nothing is read or subscribed and the snapshot is left as is.
    /// With `Some(id)` the three watched collections are subscribed and the
    /// initial load runs; its error is recorded and returned.
    #[tracing::instrument(skip(self))]
    pub async fn set_event_id(&self, event_id: Option<Id>) -> Result<()> {
        let generation = {
            let mut control = self.inner.lock();
            self.inner.release(&mut control);
            control.generation += 1;
            control.primed = false;
            control.event_id.clone_from(&event_id);

            if let Some(event_id) = &event_id {
                self.inner.state.send_modify(|s| s.loading = true);
                for collection in WATCHED {
                    let subscription = self.inner.store.subscribe(collection, event_id);
                    let listener = self.inner.spawn_listener(subscription, control.generation);
                    control.listeners.push(listener);
                }
            }
            control.generation
        };

        match event_id {
            Some(event_id) => self.inner.load(event_id, generation, Scope::Initial).await,
            None => Ok(()),
        }
    }

    /// Re-reads the selected event as a notification would.
    pub async fn refresh(&self) -> Result<()> {
        let (event_id, generation) = {
            let control = self.inner.lock();
            (control.event_id.clone(), control.generation)
        };
        match event_id {
            Some(event_id) => self.inner.load(event_id, generation, Scope::Refresh).await,
            None => Ok(()),
        }
    }

    /// Releases every subscription and drops results still in flight.
    pub fn close(&self) {
        let mut control = self.inner.lock();
        self.inner.release(&mut control);
        control.generation += 1;
        control.primed = false;
        control.event_id = None;
    }

    /// Creates a task.
    pub async fn create_task(&self, draft: TaskDraft) -> Result<Task> {
        let result = self.inner.store.create_task(&draft).await;
        self.inner.record(result)
    }

    /// Patches a task.
    pub async fn update_task(&self, id: &Id, patch: TaskPatch) -> Result<Task> {
        let result = self.inner.store.update_task(id, &patch).await;
        self.inner.record(result)
    }

    /// Creates a guest.
    pub async fn create_guest(&self, draft: GuestDraft) -> Result<Guest> {
        let result = self.inner.store.create_guest(&draft).await;
        self.inner.record(result)
    }

    /// Patches a guest.
    pub async fn update_guest(&self, id: &Id, patch: GuestPatch) -> Result<Guest> {
        let result = self.inner.store.update_guest(id, &patch).await;
        self.inner.record(result)
    }

    /// Creates a budget item.
    pub async fn create_budget_item(&self, draft: BudgetItemDraft) -> Result<BudgetItem> {
        let result = self.inner.store.create_budget_item(&draft).await;
        self.inner.record(result)
    }

    /// Patches a budget item.
    pub async fn update_budget_item(
        &self,
        id: &Id,
        patch: BudgetItemPatch,
    ) -> Result<BudgetItem> {
        let result = self.inner.store.update_budget_item(id, &patch).await;
        self.inner.record(result)
    }
}

impl Drop for EventSync {
    fn drop(&mut self) {
        self.close();
    }
}
