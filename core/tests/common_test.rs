// SPDX-FileCopyrightText: 2026 Gala Developers
//
// SPDX-License-Identifier: Apache-2.0

//! Integration test for the common module.
//!
//! Verifies that common test utilities work correctly.

mod common;

use std::sync::Arc;

use common::{CountingBackend, seed_event, setup_temp_dirs, test_config};
use gala_core::{Id, Store, StoreKind};

#[tokio::test]
async fn common_module_temp_dirs_work() {
    let dirs = setup_temp_dirs().await.unwrap();
    assert!(dirs.state_dir.exists());
}

#[tokio::test]
async fn common_module_fixtures_work() {
    let config = test_config(StoreKind::Memory, None, Some("user-1"));
    assert_eq!(config.store, StoreKind::Memory);
    assert_eq!(config.user.as_deref(), Some("user-1"));
}

#[tokio::test]
async fn counting_backend_counts_scoped_reads() {
    let backend = Arc::new(CountingBackend::new());
    let store = Store::new(backend.clone());
    let event = seed_event(&store, "Counting").await;
    assert_eq!(backend.reads(), 0);

    store.get_event(&event.id).await.unwrap();
    store.list_vendors(&event.id).await.unwrap();
    assert_eq!(backend.reads(), 2);
    assert_eq!(backend.vendor_reads(), 1);

    backend.fail_reads(true);
    assert!(store.list_tasks(&Id::new("x")).await.is_err());
}
