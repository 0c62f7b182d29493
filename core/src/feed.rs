// SPDX-FileCopyrightText: 2026 Gala Developers
//
// SPDX-License-Identifier: Apache-2.0

//! In-process change notifications backed by a `tokio::sync::broadcast` channel.
//!
//! A [`Change`] only says that something in a collection of an event changed;
//! it carries no diff. Receivers are expected to re-read what they need.

use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError, Weak};

use tokio::sync::broadcast::{self, error::RecvError};

use crate::types::{Collection, Id};

/// Default buffer capacity for the broadcast channel.
const DEFAULT_CAPACITY: usize = 1024;

/// What happened to a row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ChangeKind {
    /// A row was inserted.
    Insert,
    /// A row was updated.
    Update,
    /// A row was deleted.
    Delete,
    /// The receiver fell behind and missed notifications.
    Lagged,
}

/// A row of `collection` belonging to `event_id` changed.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize)]
pub struct Change {
    /// The collection that changed.
    pub collection: Collection,
    /// The event the changed row belongs to.
    pub event_id: Id,
    /// What happened.
    pub kind: ChangeKind,
}

impl Change {
    /// Creates a change notification.
    pub fn new(collection: Collection, event_id: Id, kind: ChangeKind) -> Self {
        Self {
            collection,
            event_id,
            kind,
        }
    }
}

/// Handle of an active subscription.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SubscriptionId(u64);

#[derive(Debug, Default)]
struct Registry {
    next_id: u64,
    active: HashMap<SubscriptionId, (Collection, Id)>,
}

/// Fan-out hub for [`Change`]s with a registry of active subscriptions.
///
/// Shared as `Arc<ChangeFeed>` by the store handle and its subscribers.
#[derive(Debug)]
pub struct ChangeFeed {
    sender: broadcast::Sender<Change>,
    registry: Mutex<Registry>,
}

impl ChangeFeed {
    /// Creates a feed with a specific channel capacity.
    ///
    /// When the buffer is full, slow receivers miss the oldest messages and
    /// observe a [`ChangeKind::Lagged`] change instead.
    pub fn new(capacity: usize) -> Self {
        let (sender, _) = broadcast::channel(capacity);
        Self {
            sender,
            registry: Mutex::new(Registry::default()),
        }
    }

    /// Publishes a change to all current subscribers.
    ///
    /// Without subscribers the change is dropped.
    pub fn notify(&self, change: Change) {
        tracing::trace!(
            collection = %change.collection,
            event_id = %change.event_id,
            kind = ?change.kind,
            "publishing change"
        );
        // Ignore the SendError, it only means there are zero receivers.
        let _ = self.sender.send(change);
    }

    /// Subscribes to changes of `collection` filtered on `event_id`.
    pub fn subscribe(self: &Arc<Self>, collection: Collection, event_id: &Id) -> Subscription {
        let receiver = self.sender.subscribe();
        let id = {
            let mut registry = self.registry();
            registry.next_id += 1;
            let id = SubscriptionId(registry.next_id);
            registry.active.insert(id, (collection, event_id.clone()));
            id
        };
        tracing::debug!(?id, %collection, %event_id, "subscribed");

        Subscription {
            id,
            collection,
            event_id: event_id.clone(),
            receiver,
            feed: Arc::downgrade(self),
        }
    }

    /// Releases a subscription. Releasing twice is a no-op.
    pub fn unsubscribe(&self, id: SubscriptionId) {
        if let Some((collection, event_id)) = self.registry().active.remove(&id) {
            tracing::debug!(?id, %collection, %event_id, "unsubscribed");
        }
    }

    /// Number of active subscriptions filtered on `event_id`.
    pub fn active_subscriptions(&self, event_id: &Id) -> usize {
        self.registry()
            .active
            .values()
            .filter(|(_, id)| id == event_id)
            .count()
    }

    /// Number of active subscriptions in total.
    pub fn total_subscriptions(&self) -> usize {
        self.registry().active.len()
    }

    fn registry(&self) -> MutexGuard<'_, Registry> {
        self.registry.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl Default for ChangeFeed {
    fn default() -> Self {
        Self::new(DEFAULT_CAPACITY)
    }
}

/// Receiving end of a subscription; unsubscribes when dropped.
#[derive(Debug)]
pub struct Subscription {
    id: SubscriptionId,
    collection: Collection,
    event_id: Id,
    receiver: broadcast::Receiver<Change>,
    feed: Weak<ChangeFeed>,
}

impl Subscription {
    /// The handle to pass to [`ChangeFeed::unsubscribe`].
    pub fn id(&self) -> SubscriptionId {
        self.id
    }

    /// The watched collection.
    pub fn collection(&self) -> Collection {
        self.collection
    }

    /// The event the subscription is filtered on.
    pub fn event_id(&self) -> &Id {
        &self.event_id
    }

    /// Waits for the next matching change.
    ///
    /// Returns `None` once the feed is gone.
    pub async fn recv(&mut self) -> Option<Change> {
        loop {
            match self.receiver.recv().await {
                Ok(change)
                    if change.collection == self.collection && change.event_id == self.event_id =>
                {
                    return Some(change);
                }
                Ok(_) => {}
                Err(RecvError::Lagged(skipped)) => {
                    tracing::warn!(
                        skipped,
                        collection = %self.collection,
                        "change receiver lagged"
                    );
                    return Some(Change::new(
                        self.collection,
                        self.event_id.clone(),
                        ChangeKind::Lagged,
                    ));
                }
                Err(RecvError::Closed) => return None,
            }
        }
    }
}

impl Drop for Subscription {
    fn drop(&mut self) {
        if let Some(feed) = self.feed.upgrade() {
            feed.unsubscribe(self.id);
        }
    }
}
