// SPDX-FileCopyrightText: 2026 Gala Developers
//
// SPDX-License-Identifier: Apache-2.0

//! A backend wrapper that counts reads and can fail or slow them down.

use std::collections::{HashMap, HashSet};
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Mutex, PoisonError};
use std::time::Duration;

use async_trait::async_trait;
use gala_core::{
    Backend, BudgetItem, BudgetItemDraft, BudgetItemPatch, Error, Event, EventDraft, EventPatch,
    Guest, GuestDraft, GuestPatch, Id, MemoryBackend, Result, Task, TaskDraft, TaskPatch, Vendor,
    VendorDraft,
};

/// Wraps a [`MemoryBackend`] and records every read call.
#[derive(Debug, Default)]
pub struct CountingBackend {
    inner: MemoryBackend,
    reads: AtomicUsize,
    vendor_reads: AtomicUsize,
    fail_reads: AtomicBool,
    delays: Mutex<HashMap<Id, Duration>>,
    failing_vendors: Mutex<HashSet<Id>>,
}

#[allow(dead_code)]
impl CountingBackend {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of read calls since creation or the last reset.
    pub fn reads(&self) -> usize {
        self.reads.load(Ordering::SeqCst)
    }

    /// Number of vendor list calls since creation or the last reset.
    pub fn vendor_reads(&self) -> usize {
        self.vendor_reads.load(Ordering::SeqCst)
    }

    pub fn reset(&self) {
        self.reads.store(0, Ordering::SeqCst);
        self.vendor_reads.store(0, Ordering::SeqCst);
    }

    /// Makes every following read fail with a remote error.
    pub fn fail_reads(&self, fail: bool) {
        self.fail_reads.store(fail, Ordering::SeqCst);
    }

    /// Delays the response of every read scoped to `event_id`.
    ///
    /// The data is read before the delay, so a delayed response is stale.
    pub fn delay_reads(&self, event_id: &Id, delay: Duration) {
        self.delays
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(event_id.clone(), delay);
    }

    /// Removes every delay set by [`Self::delay_reads`].
    pub fn clear_delays(&self) {
        self.delays
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clear();
    }

    /// Makes vendor reads of `event_id` fail after any delay.
    pub fn fail_vendor_reads(&self, event_id: &Id) {
        self.failing_vendors
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(event_id.clone());
    }

    /// The wrapped backend, for writes that must not go through a store.
    pub fn inner(&self) -> &MemoryBackend {
        &self.inner
    }

    async fn read(&self, event_id: &Id) -> Result<()> {
        self.reads.fetch_add(1, Ordering::SeqCst);
        let delay = self
            .delays
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .get(event_id)
            .copied();
        if let Some(delay) = delay {
            tokio::time::sleep(delay).await;
        }
        if self.fail_reads.load(Ordering::SeqCst) {
            return Err(Error::Remote("connection reset".to_string()));
        }
        Ok(())
    }
}

#[async_trait]
impl Backend for CountingBackend {
    async fn get_event(&self, id: &Id) -> Result<Event> {
        let result = self.inner.get_event(id).await;
        self.read(id).await?;
        result
    }

    async fn list_events(&self, owner: &Id) -> Result<Vec<Event>> {
        self.inner.list_events(owner).await
    }

    async fn insert_event(&self, owner: &Id, draft: &EventDraft) -> Result<Event> {
        self.inner.insert_event(owner, draft).await
    }

    async fn update_event(&self, id: &Id, patch: &EventPatch) -> Result<Event> {
        self.inner.update_event(id, patch).await
    }

    async fn list_tasks(&self, event_id: &Id) -> Result<Vec<Task>> {
        let result = self.inner.list_tasks(event_id).await;
        self.read(event_id).await?;
        result
    }

    async fn insert_task(&self, draft: &TaskDraft) -> Result<Task> {
        self.inner.insert_task(draft).await
    }

    async fn update_task(&self, id: &Id, patch: &TaskPatch) -> Result<Task> {
        self.inner.update_task(id, patch).await
    }

    async fn list_guests(&self, event_id: &Id) -> Result<Vec<Guest>> {
        let result = self.inner.list_guests(event_id).await;
        self.read(event_id).await?;
        result
    }

    async fn insert_guest(&self, draft: &GuestDraft) -> Result<Guest> {
        self.inner.insert_guest(draft).await
    }

    async fn update_guest(&self, id: &Id, patch: &GuestPatch) -> Result<Guest> {
        self.inner.update_guest(id, patch).await
    }

    async fn list_budget_items(&self, event_id: &Id) -> Result<Vec<BudgetItem>> {
        let result = self.inner.list_budget_items(event_id).await;
        self.read(event_id).await?;
        result
    }

    async fn insert_budget_item(&self, draft: &BudgetItemDraft) -> Result<BudgetItem> {
        self.inner.insert_budget_item(draft).await
    }

    async fn update_budget_item(&self, id: &Id, patch: &BudgetItemPatch) -> Result<BudgetItem> {
        self.inner.update_budget_item(id, patch).await
    }

    async fn list_vendors(&self, event_id: &Id) -> Result<Vec<Vendor>> {
        self.vendor_reads.fetch_add(1, Ordering::SeqCst);
        let result = self.inner.list_vendors(event_id).await;
        self.read(event_id).await?;
        let failing = self
            .failing_vendors
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .contains(event_id);
        if failing {
            return Err(Error::Remote("vendors unavailable".to_string()));
        }
        result
    }

    async fn insert_vendor(&self, draft: &VendorDraft) -> Result<Vendor> {
        self.inner.insert_vendor(draft).await
    }
}
