// SPDX-FileCopyrightText: 2026 Gala Developers
//
// SPDX-License-Identifier: Apache-2.0

//! Test data factories for integration tests.

use std::path::Path;
use std::time::Duration;

use gala_core::{
    BudgetItemDraft, Config, Event, EventDraft, GuestDraft, Id, Money, Store, StoreKind,
    SyncState, TaskDraft, TransactionType,
};
use jiff::civil::date;
use tokio::sync::watch;

/// Owner of the events created by the fixtures.
pub const TEST_USER: &str = "user-1";

/// Creates a test configuration.
///
/// # Example
///
/// ```ignore
/// let config = test_config(StoreKind::Memory, None, Some("user-1"));
/// ```
#[must_use]
pub fn test_config(store: StoreKind, state_dir: Option<&Path>, user: Option<&str>) -> Config {
    Config {
        store,
        state_dir: state_dir.map(Path::to_path_buf),
        user: user.map(str::to_string),
        postgrest: None,
    }
}

/// Creates an event draft with a fixed date.
#[must_use]
pub fn test_event_draft(title: &str) -> EventDraft {
    let mut draft = EventDraft::new(title, date(2026, 11, 20));
    draft.location = "Main Hall".to_string();
    draft
}

/// Creates a task draft for the given event.
#[must_use]
pub fn test_task_draft(event_id: &Id, title: &str) -> TaskDraft {
    let mut draft = TaskDraft::new(event_id.clone(), title);
    draft.description = format!("{title} description");
    draft.assignee = Some("Ada".to_string());
    draft.due_date = Some(date(2026, 11, 1));
    draft
}

/// Creates a guest draft for the given event.
#[must_use]
pub fn test_guest_draft(event_id: &Id, name: &str) -> GuestDraft {
    let mut draft = GuestDraft::new(event_id.clone(), name);
    draft.email = format!("{}@example.com", name.to_lowercase());
    draft.category = "VIP".to_string();
    draft
}

/// Creates a budget item draft for the given event.
#[must_use]
pub fn test_budget_draft(
    event_id: &Id,
    kind: TransactionType,
    category: &str,
    major: i64,
) -> BudgetItemDraft {
    let mut draft =
        BudgetItemDraft::new(event_id.clone(), kind, category, Money::from_major(major));
    draft.category = category.to_string();
    draft
}

/// Creates an event owned by [`TEST_USER`] through the store.
pub async fn seed_event(store: &Store, title: &str) -> Event {
    store
        .create_event(&Id::new(TEST_USER), &test_event_draft(title))
        .await
        .expect("Failed to seed event")
}

/// Waits until the next state is committed, failing the test after a while.
pub async fn wait_for_commit(rx: &mut watch::Receiver<SyncState>) -> SyncState {
    tokio::time::timeout(Duration::from_secs(5), rx.changed())
        .await
        .expect("Timed out waiting for a commit")
        .expect("Sync dropped");
    rx.borrow_and_update().clone()
}
