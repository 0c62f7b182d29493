// SPDX-FileCopyrightText: 2026 Gala Developers
//
// SPDX-License-Identifier: Apache-2.0

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use crate::error::{Error, Result};
use crate::event::{Event, EventDraft, EventPatch};
use crate::store::{Auth, Principal, Store};
use crate::types::Id;

/// Observable state of an [`EventContext`].
#[derive(Debug, Clone, Default, PartialEq, Eq, serde::Serialize)]
pub struct ContextState {
    /// The event the session is focused on.
    pub current_event: Option<Event>,
    /// True while an operation is in flight.
    pub loading: bool,
    /// Message of the last failure. Only a later failure replaces it.
    pub error: Option<String>,
}

/// Holds the current event of a session and brokers its creation and updates.
///
/// Clones share the same state. Overlapping calls are not serialized: the
/// call that resolves last wins the current event slot.
#[derive(Debug, Clone)]
pub struct EventContext {
    store: Store,
    auth: Arc<dyn Auth>,
    state: Arc<Mutex<ContextState>>,
}

impl EventContext {
    /// Creates a context with no current event.
    pub fn new(store: Store, auth: Arc<dyn Auth>) -> Self {
        Self {
            store,
            auth,
            state: Arc::new(Mutex::new(ContextState::default())),
        }
    }

    /// A copy of the whole state.
    pub fn state(&self) -> ContextState {
        self.lock().clone()
    }

    /// The event the session is focused on.
    pub fn current_event(&self) -> Option<Event> {
        self.lock().current_event.clone()
    }

    /// True while an operation is in flight.
    pub fn loading(&self) -> bool {
        self.lock().loading
    }

    /// Message of the last failure.
    pub fn error(&self) -> Option<String> {
        self.lock().error.clone()
    }

    /// Replaces the current event locally, without touching the store.
    pub fn set_current_event(&self, event: Option<Event>) {
        self.lock().current_event = event;
    }

    /// Creates an event owned by the signed-in user and makes it current.
    #[tracing::instrument(skip(self, draft), fields(title = %draft.title))]
    pub async fn create_event(&self, draft: EventDraft) -> Result<Event> {
        self.begin();
        let result = async {
            let principal = self.principal().await?;
            self.store.create_event(&principal.id, &draft).await
        }
        .await;
        self.finish(result)
    }

    /// Patches an event and makes the result current.
    ///
    /// The result replaces the current event even when `id` names a
    /// different event than the current one.
    #[tracing::instrument(skip(self, patch))]
    pub async fn update_event(&self, id: &Id, patch: EventPatch) -> Result<Event> {
        self.begin();
        let result = self.store.update_event(id, &patch).await;
        self.finish(result)
    }

    /// Fetches an event and makes it current.
    #[tracing::instrument(skip(self))]
    pub async fn select_event(&self, id: &Id) -> Result<Event> {
        self.begin();
        let result = self.store.get_event(id).await;
        self.finish(result)
    }

    /// Lists the events of the signed-in user.
    pub async fn list_events(&self) -> Result<Vec<Event>> {
        let result = async {
            let principal = self.principal().await?;
            self.store.list_events(&principal.id).await
        }
        .await;
        if let Err(e) = &result {
            self.lock().error = Some(e.to_string());
        }
        result
    }

    async fn principal(&self) -> Result<Principal> {
        self.auth
            .current_principal()
            .await?
            .ok_or(Error::Unauthenticated)
    }

    fn begin(&self) {
        self.lock().loading = true;
    }

    fn finish(&self, result: Result<Event>) -> Result<Event> {
        let mut state = self.lock();
        state.loading = false;
        match &result {
            Ok(event) => state.current_event = Some(event.clone()),
            Err(e) => {
                tracing::warn!(err = %e, "event operation failed");
                state.error = Some(e.to_string());
            }
        }
        result
    }

    fn lock(&self) -> MutexGuard<'_, ContextState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }
}
