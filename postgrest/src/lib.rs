// SPDX-FileCopyrightText: 2026 Gala Developers
//
// SPDX-License-Identifier: Apache-2.0

//! Client for hosted `PostgREST` backends (the REST surface Supabase exposes).
//!
//! Only the operations the planner needs are covered: equality-filtered
//! selects, single-row inserts and patches returning the stored row, and the
//! `auth/v1/user` lookup for the current principal.

#![warn(
    trivial_casts,
    trivial_numeric_casts,
    missing_copy_implementations,
    missing_debug_implementations,
    missing_docs,
    unsafe_code,
    unstable_features,
    unused_import_braces,
    unused_qualifications,
    clippy::dbg_macro,
    clippy::indexing_slicing,
    clippy::pedantic
)]
#![allow(clippy::missing_errors_doc)]

mod client;
mod config;
mod error;
mod http;
mod types;

pub use crate::client::PostgrestClient;
pub use crate::config::PostgrestConfig;
pub use crate::error::PostgrestError;
pub use crate::types::AuthUser;
