// SPDX-FileCopyrightText: 2026 Gala Developers
//
// SPDX-License-Identifier: Apache-2.0

use std::sync::{Mutex, MutexGuard, PoisonError};

use async_trait::async_trait;
use jiff::Timestamp;

use crate::budget::{BudgetItem, BudgetItemDraft, BudgetItemPatch};
use crate::error::{Error, Result};
use crate::event::{Event, EventDraft, EventPatch};
use crate::guest::{Guest, GuestDraft, GuestPatch};
use crate::store::Backend;
use crate::task::{Task, TaskDraft, TaskPatch};
use crate::types::{Collection, Id};
use crate::vendor::{Vendor, VendorDraft};

#[derive(Debug, Default)]
struct Tables {
    events: Vec<Event>,
    tasks: Vec<Task>,
    guests: Vec<Guest>,
    budget_items: Vec<BudgetItem>,
    vendors: Vec<Vendor>,
}

/// In-process backend; nothing outlives the process.
#[derive(Debug, Default)]
pub struct MemoryBackend {
    tables: Mutex<Tables>,
}

impl MemoryBackend {
    /// Creates an empty backend.
    pub fn new() -> Self {
        Self::default()
    }

    fn tables(&self) -> MutexGuard<'_, Tables> {
        self.tables.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

fn find_mut<'a, T>(
    rows: &'a mut [T],
    collection: Collection,
    id: &Id,
    key: impl Fn(&T) -> &Id,
) -> Result<&'a mut T> {
    rows.iter_mut()
        .find(|row| key(row) == id)
        .ok_or_else(|| Error::not_found(collection, id))
}

#[async_trait]
impl Backend for MemoryBackend {
    async fn get_event(&self, id: &Id) -> Result<Event> {
        self.tables()
            .events
            .iter()
            .find(|e| &e.id == id)
            .cloned()
            .ok_or_else(|| Error::not_found(Collection::Events, id))
    }

    async fn list_events(&self, owner: &Id) -> Result<Vec<Event>> {
        Ok(self
            .tables()
            .events
            .iter()
            .filter(|e| &e.user_id == owner)
            .cloned()
            .collect())
    }

    async fn insert_event(&self, owner: &Id, draft: &EventDraft) -> Result<Event> {
        let event = Event {
            id: Id::generate(),
            title: draft.title.clone(),
            date: draft.date,
            location: draft.location.clone(),
            description: draft.description.clone(),
            theme: draft.theme.clone(),
            kind: draft.kind.clone(),
            user_id: owner.clone(),
            created_at: Timestamp::now(),
        };
        self.tables().events.push(event.clone());
        Ok(event)
    }

    async fn update_event(&self, id: &Id, patch: &EventPatch) -> Result<Event> {
        let mut tables = self.tables();
        let event = find_mut(&mut tables.events, Collection::Events, id, |e| &e.id)?;
        Ok(patch.apply_to(event).clone())
    }

    async fn list_tasks(&self, event_id: &Id) -> Result<Vec<Task>> {
        Ok(self
            .tables()
            .tasks
            .iter()
            .filter(|t| &t.event_id == event_id)
            .cloned()
            .collect())
    }

    async fn insert_task(&self, draft: &TaskDraft) -> Result<Task> {
        let task = Task {
            id: Id::generate(),
            event_id: draft.event_id.clone(),
            title: draft.title.clone(),
            description: draft.description.clone(),
            status: draft.status,
            priority: draft.priority,
            assignee: draft.assignee.clone(),
            due_date: draft.due_date,
            created_at: Timestamp::now(),
        };
        self.tables().tasks.push(task.clone());
        Ok(task)
    }

    async fn update_task(&self, id: &Id, patch: &TaskPatch) -> Result<Task> {
        let mut tables = self.tables();
        let task = find_mut(&mut tables.tasks, Collection::Tasks, id, |t| &t.id)?;
        Ok(patch.apply_to(task).clone())
    }

    async fn list_guests(&self, event_id: &Id) -> Result<Vec<Guest>> {
        Ok(self
            .tables()
            .guests
            .iter()
            .filter(|g| &g.event_id == event_id)
            .cloned()
            .collect())
    }

    async fn insert_guest(&self, draft: &GuestDraft) -> Result<Guest> {
        let guest = Guest {
            id: Id::generate(),
            event_id: draft.event_id.clone(),
            name: draft.name.clone(),
            email: draft.email.clone(),
            category: draft.category.clone(),
            rsvp: draft.rsvp,
            table_number: draft.table_number,
            created_at: Timestamp::now(),
        };
        self.tables().guests.push(guest.clone());
        Ok(guest)
    }

    async fn update_guest(&self, id: &Id, patch: &GuestPatch) -> Result<Guest> {
        let mut tables = self.tables();
        let guest = find_mut(&mut tables.guests, Collection::Guests, id, |g| &g.id)?;
        Ok(patch.apply_to(guest).clone())
    }

    async fn list_budget_items(&self, event_id: &Id) -> Result<Vec<BudgetItem>> {
        Ok(self
            .tables()
            .budget_items
            .iter()
            .filter(|b| &b.event_id == event_id)
            .cloned()
            .collect())
    }

    async fn insert_budget_item(&self, draft: &BudgetItemDraft) -> Result<BudgetItem> {
        let item = BudgetItem {
            id: Id::generate(),
            event_id: draft.event_id.clone(),
            description: draft.description.clone(),
            amount: draft.amount,
            kind: draft.kind,
            category: draft.category.clone(),
            status: draft.status,
            date: draft.date,
            created_at: Timestamp::now(),
        };
        self.tables().budget_items.push(item.clone());
        Ok(item)
    }

    async fn update_budget_item(&self, id: &Id, patch: &BudgetItemPatch) -> Result<BudgetItem> {
        let mut tables = self.tables();
        let item = find_mut(&mut tables.budget_items, Collection::BudgetItems, id, |b| {
            &b.id
        })?;
        Ok(patch.apply_to(item).clone())
    }

    async fn list_vendors(&self, event_id: &Id) -> Result<Vec<Vendor>> {
        Ok(self
            .tables()
            .vendors
            .iter()
            .filter(|v| &v.event_id == event_id)
            .cloned()
            .collect())
    }

    async fn insert_vendor(&self, draft: &VendorDraft) -> Result<Vendor> {
        let vendor = Vendor {
            id: Id::generate(),
            event_id: draft.event_id.clone(),
            name: draft.name.clone(),
            category: draft.category.clone(),
            rating: draft.rating,
            reviews: draft.reviews,
            description: draft.description.clone(),
            price: draft.price,
            created_at: Timestamp::now(),
        };
        self.tables().vendors.push(vendor.clone());
        Ok(vendor)
    }
}
