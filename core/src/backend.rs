// SPDX-FileCopyrightText: 2026 Gala Developers
//
// SPDX-License-Identifier: Apache-2.0

//! Implementations of [`Backend`](crate::Backend).

mod memory;
mod postgrest;
mod sqlite;

pub use crate::backend::memory::MemoryBackend;
pub use crate::backend::postgrest::{PostgrestAuth, PostgrestBackend};
pub use crate::backend::sqlite::{DB_FILENAME, SqliteBackend};
