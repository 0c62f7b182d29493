// SPDX-FileCopyrightText: 2026 Gala Developers
//
// SPDX-License-Identifier: Apache-2.0

//! Tests for opening and closing a [`Gala`] instance.

use gala_core::{
    DB_FILENAME, Error, Gala, GuestDraft, RsvpStatus, StoreKind, Template, TransactionType,
};
use jiff::civil::date;

use crate::common::{setup_temp_dirs, test_budget_draft, test_config};

#[tokio::test]
async fn memory_gala_runs_a_planning_workflow() {
    let config = test_config(StoreKind::Memory, None, Some("planner"));
    let gala = Gala::new(config).await.unwrap();

    let template = Template::find("wedding").unwrap();
    let event = gala
        .context()
        .create_event(template.to_draft(date(2026, 6, 12)))
        .await
        .unwrap();
    assert_eq!(event.kind, "wedding");

    let sync = gala.sync();
    sync.set_event_id(Some(event.id.clone())).await.unwrap();

    let mut confirmed = GuestDraft::new(event.id.clone(), "Marie");
    confirmed.rsvp = RsvpStatus::Confirmed;
    sync.create_guest(confirmed).await.unwrap();
    sync.create_guest(GuestDraft::new(event.id.clone(), "Pierre"))
        .await
        .unwrap();
    sync.create_budget_item(test_budget_draft(
        &event.id,
        TransactionType::Deposit,
        "Family",
        20_000,
    ))
    .await
    .unwrap();
    sync.create_budget_item(test_budget_draft(
        &event.id,
        TransactionType::Payment,
        "Venue",
        8_000,
    ))
    .await
    .unwrap();

    let analytics = gala.analytics(&event.id).await.unwrap();
    assert_eq!(analytics.guests.total, 2);
    assert_eq!(analytics.guests.confirmed, 1);
    assert!((analytics.confirmation_rate - 0.5).abs() < 1e-9);
    assert!((analytics.budget_utilization - 0.4).abs() < 1e-9);

    drop(sync);
    gala.close().await.unwrap();
}

#[tokio::test]
async fn sqlite_gala_creates_database_in_state_dir() {
    let dirs = setup_temp_dirs().await.unwrap();
    let state_dir = dirs.state_dir.join("nested");
    let config = test_config(StoreKind::Sqlite, Some(&state_dir), Some("planner"));

    let gala = Gala::new(config).await.unwrap();
    assert!(state_dir.join(DB_FILENAME).exists());
    gala.close().await.unwrap();
}

#[tokio::test]
async fn postgrest_store_requires_its_table() {
    let config = test_config(StoreKind::Postgrest, None, None);
    let err = Gala::new(config).await.unwrap_err();
    assert!(matches!(err, Error::Config(_)));
}

#[tokio::test]
async fn memory_gala_without_user_is_anonymous() {
    let config = test_config(StoreKind::Memory, None, None);
    let gala = Gala::new(config).await.unwrap();
    let err = gala
        .context()
        .create_event(Template::find("birthday").unwrap().to_draft(date(2026, 1, 1)))
        .await
        .unwrap_err();
    assert_eq!(err, Error::Unauthenticated);
}
