// SPDX-FileCopyrightText: 2026 Gala Developers
//
// SPDX-License-Identifier: Apache-2.0

mod context;
mod lifecycle;
mod postgrest;
mod store;
mod sync;
