// SPDX-FileCopyrightText: 2026 Gala Developers
//
// SPDX-License-Identifier: Apache-2.0

//! Tests for the store and its change announcements.

use std::sync::Arc;
use std::time::Duration;

use gala_core::{
    Backend, ChangeKind, Collection, Error, Event, EventData, GuestPatch, MemoryBackend, Money,
    RsvpStatus, SqliteBackend, Store, TransactionType, VendorDraft,
};

use crate::common::{
    seed_event, setup_temp_dirs, test_budget_draft, test_guest_draft, test_task_draft,
};

async fn exercise_backend(backend: Arc<dyn Backend>) -> Event {
    let store = Store::new(backend);
    let event = seed_event(&store, "Backend").await;

    let task = store
        .create_task(&test_task_draft(&event.id, "Hire DJ"))
        .await
        .unwrap();
    let guest = store
        .create_guest(&test_guest_draft(&event.id, "Linus"))
        .await
        .unwrap();
    let item = store
        .create_budget_item(&test_budget_draft(
            &event.id,
            TransactionType::Payment,
            "Music",
            800,
        ))
        .await
        .unwrap();
    let vendor = store
        .create_vendor(&VendorDraft::new(event.id.clone(), "Beats", "Music"))
        .await
        .unwrap();

    let data = EventData::fetch(&store, &event.id).await.unwrap();
    assert_eq!(data.event.as_ref(), Some(&event));
    assert_eq!(data.tasks, vec![task]);
    assert_eq!(data.guests, vec![guest]);
    assert_eq!(data.budget_items, vec![item]);
    assert_eq!(data.vendors, vec![vendor]);
    event
}

#[tokio::test]
async fn memory_backend_round_trips_event_data() {
    exercise_backend(Arc::new(MemoryBackend::new())).await;
}

#[tokio::test]
async fn sqlite_backend_round_trips_event_data() {
    let dirs = setup_temp_dirs().await.unwrap();
    let path = dirs.state_dir.join("gala.db");
    let backend = SqliteBackend::open(Some(&path)).await.unwrap();
    exercise_backend(Arc::new(backend)).await;
    assert!(path.exists());
}

#[tokio::test]
async fn writes_announce_changes() {
    let store = Store::new(Arc::new(MemoryBackend::new()));
    let event = seed_event(&store, "Announce").await;
    let mut guests = store.subscribe(Collection::Guests, &event.id);

    let guest = store
        .create_guest(&test_guest_draft(&event.id, "Ada"))
        .await
        .unwrap();
    let change = guests.recv().await.unwrap();
    assert_eq!(change.collection, Collection::Guests);
    assert_eq!(change.event_id, event.id);
    assert_eq!(change.kind, ChangeKind::Insert);

    let patch = GuestPatch {
        rsvp: Some(RsvpStatus::Confirmed),
        ..Default::default()
    };
    store.update_guest(&guest.id, &patch).await.unwrap();
    let change = guests.recv().await.unwrap();
    assert_eq!(change.kind, ChangeKind::Update);
}

#[tokio::test]
async fn failed_writes_announce_nothing() {
    let store = Store::new(Arc::new(MemoryBackend::new()));
    let event = seed_event(&store, "Quiet").await;
    let mut items = store.subscribe(Collection::BudgetItems, &event.id);

    let mut draft = test_budget_draft(&event.id, TransactionType::Payment, "Venue", 1);
    draft.amount = Money::from_minor(-100);
    let err = store.create_budget_item(&draft).await.unwrap_err();
    assert!(matches!(err, Error::Invalid(_)));

    let received = tokio::time::timeout(Duration::from_millis(50), items.recv()).await;
    assert!(received.is_err());
}

#[tokio::test]
async fn blank_titles_are_rejected() {
    let store = Store::new(Arc::new(MemoryBackend::new()));
    let event = seed_event(&store, "Strict").await;

    let err = store
        .create_task(&test_task_draft(&event.id, "   "))
        .await
        .unwrap_err();
    assert!(matches!(err, Error::Invalid(_)));
    assert!(store.list_tasks(&event.id).await.unwrap().is_empty());
}
