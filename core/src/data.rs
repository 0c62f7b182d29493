// SPDX-FileCopyrightText: 2026 Gala Developers
//
// SPDX-License-Identifier: Apache-2.0

use crate::budget::BudgetItem;
use crate::error::Result;
use crate::event::Event;
use crate::guest::Guest;
use crate::store::Store;
use crate::task::Task;
use crate::types::Id;
use crate::vendor::Vendor;

/// An event together with its child collections.
#[derive(Debug, Clone, Default, PartialEq, serde::Serialize)]
pub struct EventData {
    /// The event itself, once loaded.
    pub event: Option<Event>,
    /// Tasks of the event.
    pub tasks: Vec<Task>,
    /// Guests of the event.
    pub guests: Vec<Guest>,
    /// Budget items of the event.
    pub budget_items: Vec<BudgetItem>,
    /// Vendors of the event.
    pub vendors: Vec<Vendor>,
}

/// The collections re-read on every change notification.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct Primary {
    pub event: Event,
    pub tasks: Vec<Task>,
    pub guests: Vec<Guest>,
    pub budget_items: Vec<BudgetItem>,
}

impl EventData {
    /// Reads the event and all four child collections. Fails if any read fails.
    pub async fn fetch(store: &Store, event_id: &Id) -> Result<Self> {
        let (primary, vendors) = tokio::try_join!(
            Primary::fetch(store, event_id),
            store.list_vendors(event_id)
        )?;
        let mut data = Self {
            vendors,
            ..Default::default()
        };
        data.apply(primary);
        Ok(data)
    }

    pub(crate) fn apply(&mut self, primary: Primary) {
        self.event = Some(primary.event);
        self.tasks = primary.tasks;
        self.guests = primary.guests;
        self.budget_items = primary.budget_items;
    }
}

impl Primary {
    /// Reads the event, tasks, guests and budget items: four read calls.
    pub async fn fetch(store: &Store, event_id: &Id) -> Result<Self> {
        let (event, tasks, guests, budget_items) = tokio::try_join!(
            store.get_event(event_id),
            store.list_tasks(event_id),
            store.list_guests(event_id),
            store.list_budget_items(event_id),
        )?;
        Ok(Self {
            event,
            tasks,
            guests,
            budget_items,
        })
    }
}
