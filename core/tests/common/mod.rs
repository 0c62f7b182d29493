// SPDX-FileCopyrightText: 2026 Gala Developers
//
// SPDX-License-Identifier: Apache-2.0

//! Common test utilities for integration tests.
//!
//! This module provides shared test infrastructure including:
//! - Test data factories (fixtures)
//! - A backend wrapper that counts reads and injects failures or delays
//! - Temporary directory management with auto-cleanup

mod counting;
mod fixtures;
mod temp_dir;

#[allow(unused_imports)]
pub use counting::CountingBackend;
#[allow(unused_imports)]
pub use fixtures::{
    seed_event, test_budget_draft, test_config, test_event_draft, test_guest_draft,
    test_task_draft, wait_for_commit,
};
#[allow(unused_imports)]
pub use temp_dir::{TempDirs, setup_temp_dirs};
