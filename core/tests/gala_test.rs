// SPDX-FileCopyrightText: 2026 Gala Developers
//
// SPDX-License-Identifier: Apache-2.0

//! Integration tests for the event context, the per-event sync and the store.

mod common;
mod gala;
