// SPDX-FileCopyrightText: 2026 Gala Developers
//
// SPDX-License-Identifier: Apache-2.0

//! Tests for the per-event sync.

use std::sync::Arc;
use std::time::Duration;

use gala_core::{
    Backend, BudgetSummary, Change, ChangeKind, Collection, Error, EventSync, Id, Money, Store,
    TaskPatch, TaskStatus, TransactionType, VendorDraft,
};

use crate::common::{
    CountingBackend, seed_event, test_budget_draft, test_guest_draft, test_task_draft,
    wait_for_commit,
};

fn counting_store() -> (Arc<CountingBackend>, Store) {
    let backend = Arc::new(CountingBackend::new());
    let store = Store::new(backend.clone());
    (backend, store)
}

#[tokio::test]
async fn no_reads_without_event_id() {
    let (backend, store) = counting_store();
    let sync = EventSync::new(store.clone());

    sync.set_event_id(None).await.unwrap();

    assert_eq!(backend.reads(), 0);
    assert_eq!(store.feed().total_subscriptions(), 0);
    let state = sync.snapshot();
    assert!(state.loading);
    assert!(state.data.event.is_none());
    assert!(state.data.tasks.is_empty());
    assert!(state.data.guests.is_empty());
    assert!(state.data.budget_items.is_empty());
    assert!(state.data.vendors.is_empty());
}

#[tokio::test]
async fn initial_load_reads_every_collection() {
    let (backend, store) = counting_store();
    let event = seed_event(&store, "Summit").await;
    store
        .create_task(&test_task_draft(&event.id, "Book venue"))
        .await
        .unwrap();
    store
        .create_vendor(&VendorDraft::new(event.id.clone(), "Bloom", "Florist"))
        .await
        .unwrap();

    let sync = EventSync::new(store.clone());
    sync.set_event_id(Some(event.id.clone())).await.unwrap();

    assert_eq!(backend.reads(), 5);
    assert_eq!(backend.vendor_reads(), 1);
    let state = sync.snapshot();
    assert!(!state.loading);
    assert!(state.error.is_none());
    assert_eq!(state.data.event, Some(event));
    assert_eq!(state.data.tasks.len(), 1);
    assert_eq!(state.data.vendors.len(), 1);
    assert_eq!(sync.event_id(), state.data.event.map(|e| e.id));
}

#[tokio::test]
async fn one_notification_triggers_exactly_four_reads() {
    let (backend, store) = counting_store();
    let event = seed_event(&store, "Summit").await;
    let sync = EventSync::new(store.clone());
    sync.set_event_id(Some(event.id.clone())).await.unwrap();

    backend.reset();
    let mut rx = sync.watch();
    rx.borrow_and_update();
    store.feed().notify(Change::new(
        Collection::Guests,
        event.id.clone(),
        ChangeKind::Insert,
    ));
    wait_for_commit(&mut rx).await;

    assert_eq!(backend.reads(), 4);
    assert_eq!(backend.vendor_reads(), 0);
}

#[tokio::test]
async fn notifications_for_other_events_are_ignored() {
    let (backend, store) = counting_store();
    let event = seed_event(&store, "Summit").await;
    let sync = EventSync::new(store.clone());
    sync.set_event_id(Some(event.id.clone())).await.unwrap();

    backend.reset();
    store.feed().notify(Change::new(
        Collection::Tasks,
        Id::new("someone-else"),
        ChangeKind::Insert,
    ));
    store.feed().notify(Change::new(
        Collection::Vendors,
        event.id.clone(),
        ChangeKind::Insert,
    ));
    tokio::time::sleep(Duration::from_millis(50)).await;

    assert_eq!(backend.reads(), 0);
}

#[tokio::test]
async fn changing_event_moves_subscriptions() {
    let (_, store) = counting_store();
    let a = seed_event(&store, "A").await;
    let b = seed_event(&store, "B").await;
    let sync = EventSync::new(store.clone());

    sync.set_event_id(Some(a.id.clone())).await.unwrap();
    assert_eq!(store.feed().active_subscriptions(&a.id), 3);

    sync.set_event_id(Some(b.id.clone())).await.unwrap();
    assert_eq!(store.feed().active_subscriptions(&a.id), 0);
    assert_eq!(store.feed().active_subscriptions(&b.id), 3);

    sync.set_event_id(None).await.unwrap();
    assert_eq!(store.feed().total_subscriptions(), 0);
}

#[tokio::test]
async fn dropping_sync_releases_subscriptions() {
    let (_, store) = counting_store();
    let event = seed_event(&store, "Summit").await;
    let sync = EventSync::new(store.clone());
    sync.set_event_id(Some(event.id.clone())).await.unwrap();
    assert_eq!(store.feed().active_subscriptions(&event.id), 3);

    drop(sync);
    assert_eq!(store.feed().total_subscriptions(), 0);
}

#[tokio::test]
async fn stale_initial_load_does_not_overwrite_newer_selection() {
    let (backend, store) = counting_store();
    let slow = seed_event(&store, "Slow").await;
    let fast = seed_event(&store, "Fast").await;
    backend.delay_reads(&slow.id, Duration::from_millis(200));
    let sync = EventSync::new(store.clone());

    let (first, second) = tokio::join!(sync.set_event_id(Some(slow.id.clone())), async {
        tokio::time::sleep(Duration::from_millis(20)).await;
        sync.set_event_id(Some(fast.id.clone())).await
    });
    first.unwrap();
    second.unwrap();

    let state = sync.snapshot();
    assert_eq!(state.data.event.map(|e| e.id), Some(fast.id.clone()));
    assert_eq!(sync.event_id(), Some(fast.id));
    assert_eq!(store.feed().active_subscriptions(&slow.id), 0);
}

#[tokio::test]
async fn vendors_are_not_refreshed_by_notifications() {
    let (backend, store) = counting_store();
    let event = seed_event(&store, "Summit").await;
    let sync = EventSync::new(store.clone());
    sync.set_event_id(Some(event.id.clone())).await.unwrap();
    assert!(sync.snapshot().data.vendors.is_empty());

    backend
        .inner()
        .insert_vendor(&VendorDraft::new(event.id.clone(), "Bloom", "Florist"))
        .await
        .unwrap();
    let mut rx = sync.watch();
    rx.borrow_and_update();
    let task = sync
        .create_task(test_task_draft(&event.id, "Order flowers"))
        .await
        .unwrap();
    let state = wait_for_commit(&mut rx).await;

    assert_eq!(state.data.tasks, vec![task]);
    assert!(state.data.vendors.is_empty());
}

#[tokio::test]
async fn failed_refresh_keeps_previous_snapshot() {
    let (backend, store) = counting_store();
    let event = seed_event(&store, "Summit").await;
    store
        .create_guest(&test_guest_draft(&event.id, "Grace"))
        .await
        .unwrap();
    let sync = EventSync::new(store.clone());
    sync.set_event_id(Some(event.id.clone())).await.unwrap();
    let before = sync.snapshot();

    backend.fail_reads(true);
    let mut rx = sync.watch();
    rx.borrow_and_update();
    store.feed().notify(Change::new(
        Collection::Tasks,
        event.id.clone(),
        ChangeKind::Update,
    ));
    let after = wait_for_commit(&mut rx).await;

    assert_eq!(after.data, before.data);
    assert!(after.error.is_some());
    assert!(!after.loading);
}

#[tokio::test]
async fn error_is_kept_after_a_later_success() {
    let (backend, store) = counting_store();
    let event = seed_event(&store, "Summit").await;
    let sync = EventSync::new(store.clone());
    sync.set_event_id(Some(event.id.clone())).await.unwrap();

    backend.fail_reads(true);
    sync.refresh().await.unwrap_err();
    let error = sync.snapshot().error;
    assert!(error.is_some());

    backend.fail_reads(false);
    sync.refresh().await.unwrap();
    assert_eq!(sync.snapshot().error, error);
}

#[tokio::test]
async fn failed_initial_load_records_error() {
    let (_, store) = counting_store();
    let event = seed_event(&store, "Summit").await;
    let sync = EventSync::new(store.clone());
    sync.set_event_id(Some(event.id.clone())).await.unwrap();

    let err = sync
        .set_event_id(Some(Id::new("missing")))
        .await
        .unwrap_err();

    assert!(matches!(err, Error::NotFound { .. }));
    let state = sync.snapshot();
    assert!(!state.loading);
    assert!(state.error.is_some());
    assert_eq!(state.data.event, Some(event));
}

#[tokio::test]
async fn mutators_return_records_and_refresh_through_the_feed() {
    let (_, store) = counting_store();
    let event = seed_event(&store, "Summit").await;
    let sync = EventSync::new(store.clone());
    sync.set_event_id(Some(event.id.clone())).await.unwrap();

    let draft = test_task_draft(&event.id, "Print badges");
    let task = sync.create_task(draft.clone()).await.unwrap();
    assert!(!task.id.is_empty());
    assert_eq!(task.title, draft.title);
    assert_eq!(task.description, draft.description);
    assert_eq!(task.assignee, draft.assignee);
    assert_eq!(task.due_date, draft.due_date);
    assert_eq!(task.status, TaskStatus::Todo);

    let guest = sync
        .create_guest(test_guest_draft(&event.id, "Grace"))
        .await
        .unwrap();
    assert!(!guest.id.is_empty());
    assert_eq!(guest.name, "Grace");
    assert_eq!(guest.email, "grace@example.com");

    let item = sync
        .create_budget_item(test_budget_draft(
            &event.id,
            TransactionType::Deposit,
            "Sponsorship",
            1000,
        ))
        .await
        .unwrap();
    assert!(!item.id.is_empty());
    assert_eq!(item.amount, Money::from_major(1000));

    let mut rx = sync.watch();
    let patch = TaskPatch {
        status: Some(TaskStatus::Completed),
        ..Default::default()
    };
    let updated = sync.update_task(&task.id, patch).await.unwrap();
    assert_eq!(updated.status, TaskStatus::Completed);

    let state = tokio::time::timeout(Duration::from_secs(5), async {
        loop {
            let state = rx.borrow_and_update().clone();
            let done = state.data.tasks.iter().any(|t| t.status == TaskStatus::Completed)
                && state.data.guests.len() == 1
                && state.data.budget_items.len() == 1;
            if done {
                break state;
            }
            rx.changed().await.unwrap();
        }
    })
    .await
    .unwrap();
    assert_eq!(state.data.tasks, vec![updated]);
}

#[tokio::test]
async fn failed_mutation_records_error_without_touching_data() {
    let (_, store) = counting_store();
    let event = seed_event(&store, "Summit").await;
    let sync = EventSync::new(store.clone());
    sync.set_event_id(Some(event.id.clone())).await.unwrap();
    let before = sync.snapshot();

    let err = sync
        .update_task(&Id::new("missing"), TaskPatch::default())
        .await
        .unwrap_err();

    assert!(matches!(err, Error::NotFound { .. }));
    let after = sync.snapshot();
    assert_eq!(after.data, before.data);
    assert!(after.error.is_some());
}

#[tokio::test]
async fn budget_summary_from_synced_items() {
    let (_, store) = counting_store();
    let event = seed_event(&store, "Summit").await;
    for (kind, category, amount) in [
        (TransactionType::Deposit, "Sponsorship", 10_000),
        (TransactionType::Deposit, "Tickets", 5_000),
        (TransactionType::Payment, "Venue", 5_000),
        (TransactionType::Payment, "Catering", 2_500),
        (TransactionType::Payment, "Catering", 500),
    ] {
        store
            .create_budget_item(&test_budget_draft(&event.id, kind, category, amount))
            .await
            .unwrap();
    }
    let sync = EventSync::new(store.clone());
    sync.set_event_id(Some(event.id.clone())).await.unwrap();

    let summary = BudgetSummary::from_items(&sync.snapshot().data.budget_items);
    assert_eq!(summary.total, Money::from_major(15_000));
    assert_eq!(summary.spent, Money::from_major(8_000));
    assert_eq!(summary.by_category["Venue"], Money::from_major(5_000));
    assert_eq!(summary.by_category["Catering"], Money::from_major(3_000));
}

#[tokio::test]
async fn older_refresh_does_not_overwrite_newer_one() {
    let (backend, store) = counting_store();
    let event = seed_event(&store, "Summit").await;
    let sync = EventSync::new(store.clone());
    sync.set_event_id(Some(event.id.clone())).await.unwrap();

    backend.delay_reads(&event.id, Duration::from_millis(200));
    let (older, newer) = tokio::join!(sync.refresh(), async {
        tokio::time::sleep(Duration::from_millis(20)).await;
        backend.clear_delays();
        backend
            .inner()
            .insert_task(&test_task_draft(&event.id, "Book venue"))
            .await
            .unwrap();
        sync.refresh().await
    });
    older.unwrap();
    newer.unwrap();

    let state = sync.snapshot();
    assert_eq!(state.data.tasks.len(), 1);
    assert!(state.error.is_none());
}

#[tokio::test]
async fn overtaken_failure_is_still_recorded() {
    let (backend, store) = counting_store();
    let event = seed_event(&store, "Summit").await;
    let sync = EventSync::new(store.clone());
    sync.set_event_id(Some(event.id.clone())).await.unwrap();

    backend.delay_reads(&event.id, Duration::from_millis(200));
    let (older, newer) = tokio::join!(sync.refresh(), async {
        tokio::time::sleep(Duration::from_millis(20)).await;
        backend.clear_delays();
        backend
            .inner()
            .insert_task(&test_task_draft(&event.id, "Book venue"))
            .await
            .unwrap();
        let result = sync.refresh().await;
        backend.fail_reads(true);
        result
    });
    newer.unwrap();

    assert!(matches!(older, Err(Error::Remote(_))));
    let state = sync.snapshot();
    assert!(state.error.is_some());
    assert_eq!(state.data.tasks.len(), 1);
}

#[tokio::test]
async fn early_refresh_reads_vendors_of_the_new_event() {
    let (backend, store) = counting_store();
    let a = seed_event(&store, "A").await;
    let b = seed_event(&store, "B").await;
    for (event, name) in [(&a, "A-Florist"), (&b, "B-Catering")] {
        store
            .create_vendor(&VendorDraft::new(event.id.clone(), name, "Florist"))
            .await
            .unwrap();
    }
    let sync = EventSync::new(store.clone());
    sync.set_event_id(Some(a.id.clone())).await.unwrap();

    backend.delay_reads(&b.id, Duration::from_millis(200));
    let (selected, ()) = tokio::join!(sync.set_event_id(Some(b.id.clone())), async {
        tokio::time::sleep(Duration::from_millis(20)).await;
        store
            .feed()
            .notify(Change::new(Collection::Tasks, b.id.clone(), ChangeKind::Insert));
    });
    selected.unwrap();
    // the notification's load finishes after the selection returns
    tokio::time::sleep(Duration::from_millis(300)).await;

    let state = sync.snapshot();
    assert!(state.error.is_none());
    assert_eq!(state.data.event.map(|e| e.id), Some(b.id));
    let names: Vec<_> = state.data.vendors.iter().map(|v| v.name.as_str()).collect();
    assert_eq!(names, ["B-Catering"]);
}

#[tokio::test]
async fn failed_selection_with_early_refresh_keeps_one_event() {
    let (backend, store) = counting_store();
    let a = seed_event(&store, "A").await;
    let b = seed_event(&store, "B").await;
    store
        .create_vendor(&VendorDraft::new(a.id.clone(), "A-Florist", "Florist"))
        .await
        .unwrap();
    store
        .create_task(&test_task_draft(&b.id, "Book venue"))
        .await
        .unwrap();
    let sync = EventSync::new(store.clone());
    sync.set_event_id(Some(a.id.clone())).await.unwrap();

    backend.delay_reads(&b.id, Duration::from_millis(200));
    backend.fail_vendor_reads(&b.id);
    let (selected, ()) = tokio::join!(sync.set_event_id(Some(b.id.clone())), async {
        tokio::time::sleep(Duration::from_millis(20)).await;
        store
            .feed()
            .notify(Change::new(Collection::Tasks, b.id.clone(), ChangeKind::Insert));
    });
    tokio::time::sleep(Duration::from_millis(300)).await;

    assert!(matches!(selected, Err(Error::Remote(_))));
    let state = sync.snapshot();
    assert!(state.error.is_some());
    assert_eq!(state.data.event.map(|e| e.id), Some(a.id.clone()));
    assert!(state.data.tasks.is_empty());
    assert!(state.data.vendors.iter().all(|v| v.event_id == a.id));
    assert_eq!(state.data.vendors.len(), 1);
}
