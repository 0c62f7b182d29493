// SPDX-FileCopyrightText: 2026 Gala Developers
//
// SPDX-License-Identifier: Apache-2.0

use std::fmt::Debug;
use std::sync::Arc;

use async_trait::async_trait;

use crate::budget::{BudgetItem, BudgetItemDraft, BudgetItemPatch};
use crate::error::Result;
use crate::event::{Event, EventDraft, EventPatch};
use crate::feed::{Change, ChangeFeed, ChangeKind, Subscription};
use crate::guest::{Guest, GuestDraft, GuestPatch};
use crate::task::{Task, TaskDraft, TaskPatch};
use crate::types::{Collection, Id};
use crate::vendor::{Vendor, VendorDraft};

/// Storage for the five collections of the planner.
///
/// Identity and creation time of every record are assigned here. Updates
/// return [`Error::NotFound`](crate::Error::NotFound) for a missing id.
#[async_trait]
pub trait Backend: Debug + Send + Sync {
    /// Fetches one event.
    async fn get_event(&self, id: &Id) -> Result<Event>;

    /// Lists the events owned by `owner`, oldest first.
    async fn list_events(&self, owner: &Id) -> Result<Vec<Event>>;

    /// Inserts an event owned by `owner`.
    async fn insert_event(&self, owner: &Id, draft: &EventDraft) -> Result<Event>;

    /// Patches an event.
    async fn update_event(&self, id: &Id, patch: &EventPatch) -> Result<Event>;

    /// Lists the tasks of an event.
    async fn list_tasks(&self, event_id: &Id) -> Result<Vec<Task>>;

    /// Inserts a task.
    async fn insert_task(&self, draft: &TaskDraft) -> Result<Task>;

    /// Patches a task.
    async fn update_task(&self, id: &Id, patch: &TaskPatch) -> Result<Task>;

    /// Lists the guests of an event.
    async fn list_guests(&self, event_id: &Id) -> Result<Vec<Guest>>;

    /// Inserts a guest.
    async fn insert_guest(&self, draft: &GuestDraft) -> Result<Guest>;

    /// Patches a guest.
    async fn update_guest(&self, id: &Id, patch: &GuestPatch) -> Result<Guest>;

    /// Lists the budget items of an event.
    async fn list_budget_items(&self, event_id: &Id) -> Result<Vec<BudgetItem>>;

    /// Inserts a budget item.
    async fn insert_budget_item(&self, draft: &BudgetItemDraft) -> Result<BudgetItem>;

    /// Patches a budget item.
    async fn update_budget_item(&self, id: &Id, patch: &BudgetItemPatch) -> Result<BudgetItem>;

    /// Lists the vendors of an event.
    async fn list_vendors(&self, event_id: &Id) -> Result<Vec<Vendor>>;

    /// Inserts a vendor.
    async fn insert_vendor(&self, draft: &VendorDraft) -> Result<Vendor>;

    /// Releases held resources.
    async fn close(&self) -> Result<()> {
        Ok(())
    }
}

/// An authenticated user.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize)]
pub struct Principal {
    /// Stable user id, the owner of created events.
    pub id: Id,

    /// Email address, if known.
    pub email: Option<String>,
}

impl Principal {
    /// Creates a principal without an email address.
    pub fn new(id: impl Into<Id>) -> Self {
        Self {
            id: id.into(),
            email: None,
        }
    }
}

/// Source of the current authenticated principal.
#[async_trait]
pub trait Auth: Debug + Send + Sync {
    /// Resolves the signed-in user, if any.
    async fn current_principal(&self) -> Result<Option<Principal>>;
}

/// A principal fixed at construction, e.g. from configuration.
#[derive(Debug, Clone, Default)]
pub struct StaticAuth(Option<Principal>);

impl StaticAuth {
    /// Always resolves to `principal`.
    pub fn new(principal: Principal) -> Self {
        Self(Some(principal))
    }

    /// Never resolves a principal.
    pub fn anonymous() -> Self {
        Self(None)
    }
}

#[async_trait]
impl Auth for StaticAuth {
    async fn current_principal(&self) -> Result<Option<Principal>> {
        Ok(self.0.clone())
    }
}

/// Shared handle to a backend and its change feed.
///
/// Drafts and patches are validated before they reach the backend, and every
/// successful write is announced on the feed.
#[derive(Debug, Clone)]
pub struct Store {
    backend: Arc<dyn Backend>,
    feed: Arc<ChangeFeed>,
}

impl Store {
    /// Wraps a backend with a fresh change feed.
    pub fn new(backend: Arc<dyn Backend>) -> Self {
        Self::with_feed(backend, Arc::new(ChangeFeed::default()))
    }

    /// Wraps a backend with an existing change feed.
    pub fn with_feed(backend: Arc<dyn Backend>, feed: Arc<ChangeFeed>) -> Self {
        Self { backend, feed }
    }

    /// The change feed of this store.
    pub fn feed(&self) -> &Arc<ChangeFeed> {
        &self.feed
    }

    /// Subscribes to changes of `collection` filtered on `event_id`.
    pub fn subscribe(&self, collection: Collection, event_id: &Id) -> Subscription {
        self.feed.subscribe(collection, event_id)
    }

    fn announce(&self, collection: Collection, event_id: &Id, kind: ChangeKind) {
        self.feed
            .notify(Change::new(collection, event_id.clone(), kind));
    }

    /// Fetches one event.
    pub async fn get_event(&self, id: &Id) -> Result<Event> {
        self.backend.get_event(id).await
    }

    /// Lists the events owned by `owner`.
    pub async fn list_events(&self, owner: &Id) -> Result<Vec<Event>> {
        self.backend.list_events(owner).await
    }

    /// Creates an event owned by `owner`.
    pub async fn create_event(&self, owner: &Id, draft: &EventDraft) -> Result<Event> {
        draft.validate()?;
        let event = self.backend.insert_event(owner, draft).await?;
        self.announce(Collection::Events, &event.id, ChangeKind::Insert);
        Ok(event)
    }

    /// Patches an event.
    pub async fn update_event(&self, id: &Id, patch: &EventPatch) -> Result<Event> {
        patch.validate()?;
        let event = self.backend.update_event(id, patch).await?;
        self.announce(Collection::Events, &event.id, ChangeKind::Update);
        Ok(event)
    }

    /// Lists the tasks of an event.
    pub async fn list_tasks(&self, event_id: &Id) -> Result<Vec<Task>> {
        self.backend.list_tasks(event_id).await
    }

    /// Creates a task.
    pub async fn create_task(&self, draft: &TaskDraft) -> Result<Task> {
        draft.validate()?;
        let task = self.backend.insert_task(draft).await?;
        self.announce(Collection::Tasks, &task.event_id, ChangeKind::Insert);
        Ok(task)
    }

    /// Patches a task.
    pub async fn update_task(&self, id: &Id, patch: &TaskPatch) -> Result<Task> {
        patch.validate()?;
        let task = self.backend.update_task(id, patch).await?;
        self.announce(Collection::Tasks, &task.event_id, ChangeKind::Update);
        Ok(task)
    }

    /// Lists the guests of an event.
    pub async fn list_guests(&self, event_id: &Id) -> Result<Vec<Guest>> {
        self.backend.list_guests(event_id).await
    }

    /// Creates a guest.
    pub async fn create_guest(&self, draft: &GuestDraft) -> Result<Guest> {
        draft.validate()?;
        let guest = self.backend.insert_guest(draft).await?;
        self.announce(Collection::Guests, &guest.event_id, ChangeKind::Insert);
        Ok(guest)
    }

    /// Patches a guest.
    pub async fn update_guest(&self, id: &Id, patch: &GuestPatch) -> Result<Guest> {
        patch.validate()?;
        let guest = self.backend.update_guest(id, patch).await?;
        self.announce(Collection::Guests, &guest.event_id, ChangeKind::Update);
        Ok(guest)
    }

    /// Lists the budget items of an event.
    pub async fn list_budget_items(&self, event_id: &Id) -> Result<Vec<BudgetItem>> {
        self.backend.list_budget_items(event_id).await
    }

    /// Creates a budget item.
    pub async fn create_budget_item(&self, draft: &BudgetItemDraft) -> Result<BudgetItem> {
        draft.validate()?;
        let item = self.backend.insert_budget_item(draft).await?;
        self.announce(Collection::BudgetItems, &item.event_id, ChangeKind::Insert);
        Ok(item)
    }

    /// Patches a budget item.
    pub async fn update_budget_item(
        &self,
        id: &Id,
        patch: &BudgetItemPatch,
    ) -> Result<BudgetItem> {
        patch.validate()?;
        let item = self.backend.update_budget_item(id, patch).await?;
        self.announce(Collection::BudgetItems, &item.event_id, ChangeKind::Update);
        Ok(item)
    }

    /// Lists the vendors of an event.
    pub async fn list_vendors(&self, event_id: &Id) -> Result<Vec<Vendor>> {
        self.backend.list_vendors(event_id).await
    }

    /// Adds a vendor.
    pub async fn create_vendor(&self, draft: &VendorDraft) -> Result<Vendor> {
        draft.validate()?;
        let vendor = self.backend.insert_vendor(draft).await?;
        self.announce(Collection::Vendors, &vendor.event_id, ChangeKind::Insert);
        Ok(vendor)
    }

    /// Releases the resources of the backend.
    pub async fn close(&self) -> Result<()> {
        self.backend.close().await
    }
}
