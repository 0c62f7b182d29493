// SPDX-FileCopyrightText: 2026 Gala Developers
//
// SPDX-License-Identifier: Apache-2.0

//! Core of the Gala event planner: the domain model, the store seam with its
//! backends, the event context and the per-event data sync.

mod analytics;
mod backend;
mod budget;
mod config;
mod context;
mod data;
mod error;
mod event;
mod feed;
mod gala;
mod guest;
mod store;
mod sync;
mod task;
mod template;
mod types;
mod vendor;

pub use crate::analytics::{EventAnalytics, TOP_VENDORS};
pub use crate::backend::{
    DB_FILENAME, MemoryBackend, PostgrestAuth, PostgrestBackend, SqliteBackend,
};
pub use crate::budget::{
    BudgetItem, BudgetItemDraft, BudgetItemPatch, BudgetSummary, TransactionStatus,
    TransactionType,
};
pub use crate::config::{APP_NAME, Config, StoreKind};
pub use crate::context::{ContextState, EventContext};
pub use crate::data::EventData;
pub use crate::error::{Error, Result};
pub use crate::event::{DEFAULT_KIND, DEFAULT_THEME, Event, EventDraft, EventPatch};
pub use crate::feed::{Change, ChangeFeed, ChangeKind, Subscription, SubscriptionId};
pub use crate::gala::Gala;
pub use crate::guest::{Guest, GuestDraft, GuestPatch, GuestSummary, RsvpStatus};
pub use crate::store::{Auth, Backend, Principal, StaticAuth, Store};
pub use crate::sync::{EventSync, SyncState, WATCHED};
pub use crate::task::{Task, TaskBoard, TaskDraft, TaskPatch, TaskPriority, TaskStatus, timeline};
pub use crate::template::{TEMPLATES, Template};
pub use crate::types::{Collection, Id, Money};
pub use crate::vendor::{
    MAX_RATING, PriceTier, Vendor, VendorDraft, top_rated_vendors, vendors_in_category,
};

pub use gala_postgrest::PostgrestConfig;
