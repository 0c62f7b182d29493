// SPDX-FileCopyrightText: 2026 Gala Developers
//
// SPDX-License-Identifier: Apache-2.0

use async_trait::async_trait;
use gala_postgrest::{PostgrestClient, PostgrestConfig, PostgrestError};
use jiff::Timestamp;
use jiff::civil::Date;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use crate::budget::{
    BudgetItem, BudgetItemDraft, BudgetItemPatch, TransactionStatus, TransactionType,
};
use crate::error::{Error, Result};
use crate::event::{Event, EventDraft, EventPatch};
use crate::guest::{Guest, GuestDraft, GuestPatch};
use crate::store::{Auth, Backend, Principal};
use crate::task::{Task, TaskDraft, TaskPatch};
use crate::types::{Collection, Id, Money, major_units};
use crate::vendor::{Vendor, VendorDraft};

/// Backend on a hosted `PostgREST` server.
#[derive(Debug, Clone)]
pub struct PostgrestBackend {
    client: PostgrestClient,
}

#[derive(Debug, Serialize)]
struct NewEvent<'a> {
    #[serde(flatten)]
    draft: &'a EventDraft,
    user_id: &'a Id,
}

/// A budget item as stored remotely, where `amount` is in major units.
#[derive(Debug, Deserialize)]
struct BudgetItemRow {
    id: Id,
    event_id: Id,
    description: String,
    #[serde(with = "major_units")]
    amount: Money,
    #[serde(rename = "type")]
    kind: TransactionType,
    #[serde(default)]
    category: String,
    status: TransactionStatus,
    #[serde(default)]
    date: Option<Date>,
    created_at: Timestamp,
}

impl From<BudgetItemRow> for BudgetItem {
    fn from(row: BudgetItemRow) -> Self {
        Self {
            id: row.id,
            event_id: row.event_id,
            description: row.description,
            amount: row.amount,
            kind: row.kind,
            category: row.category,
            status: row.status,
            date: row.date,
            created_at: row.created_at,
        }
    }
}

#[derive(Debug, Serialize)]
struct NewBudgetItem<'a> {
    event_id: &'a Id,
    description: &'a str,
    #[serde(with = "major_units")]
    amount: Money,
    #[serde(rename = "type")]
    kind: TransactionType,
    category: &'a str,
    status: TransactionStatus,
    date: Option<Date>,
}

impl<'a> From<&'a BudgetItemDraft> for NewBudgetItem<'a> {
    fn from(draft: &'a BudgetItemDraft) -> Self {
        Self {
            event_id: &draft.event_id,
            description: &draft.description,
            amount: draft.amount,
            kind: draft.kind,
            category: &draft.category,
            status: draft.status,
            date: draft.date,
        }
    }
}

#[derive(Debug, Serialize)]
struct BudgetItemChanges<'a> {
    #[serde(skip_serializing_if = "Option::is_none")]
    description: Option<&'a str>,
    #[serde(with = "major_units::option", skip_serializing_if = "Option::is_none")]
    amount: Option<Money>,
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    kind: Option<TransactionType>,
    #[serde(skip_serializing_if = "Option::is_none")]
    category: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    status: Option<TransactionStatus>,
    #[serde(skip_serializing_if = "Option::is_none")]
    date: Option<Option<Date>>,
}

impl<'a> From<&'a BudgetItemPatch> for BudgetItemChanges<'a> {
    fn from(patch: &'a BudgetItemPatch) -> Self {
        Self {
            description: patch.description.as_deref(),
            amount: patch.amount,
            kind: patch.kind,
            category: patch.category.as_deref(),
            status: patch.status,
            date: patch.date,
        }
    }
}

impl PostgrestBackend {
    /// Creates a backend for the configured server.
    pub fn new(config: PostgrestConfig) -> Result<Self> {
        let client = PostgrestClient::new(config).map_err(|e| Error::Config(e.to_string()))?;
        Ok(Self { client })
    }

    /// Creates a backend sharing an existing client.
    pub fn with_client(client: PostgrestClient) -> Self {
        Self { client }
    }

    async fn list<T: DeserializeOwned>(
        &self,
        collection: Collection,
        event_id: &Id,
    ) -> Result<Vec<T>> {
        self.client
            .select_eq(collection.table_name(), "event_id", event_id)
            .await
            .map_err(remote)
    }

    async fn get<T: DeserializeOwned>(&self, collection: Collection, id: &Id) -> Result<T> {
        self.client
            .select_one(collection.table_name(), id)
            .await
            .map_err(|e| not_found_or_remote(e, collection, id))
    }

    async fn insert<B, T>(&self, collection: Collection, body: &B) -> Result<T>
    where
        B: Serialize + Sync + ?Sized,
        T: DeserializeOwned,
    {
        self.client
            .insert_one(collection.table_name(), body)
            .await
            .map_err(remote)
    }

    async fn update<B, T>(&self, collection: Collection, id: &Id, body: &B) -> Result<T>
    where
        B: Serialize + Sync + ?Sized,
        T: DeserializeOwned,
    {
        self.client
            .update_one(collection.table_name(), id, body)
            .await
            .map_err(|e| not_found_or_remote(e, collection, id))
    }
}

fn remote(e: PostgrestError) -> Error {
    Error::Remote(e.to_string())
}

fn not_found_or_remote(e: PostgrestError, collection: Collection, id: &Id) -> Error {
    match e {
        PostgrestError::NotFound(_) => Error::not_found(collection, id),
        e => remote(e),
    }
}

#[async_trait]
impl Backend for PostgrestBackend {
    async fn get_event(&self, id: &Id) -> Result<Event> {
        self.get(Collection::Events, id).await
    }

    async fn list_events(&self, owner: &Id) -> Result<Vec<Event>> {
        self.client
            .select_eq(Collection::Events.table_name(), "user_id", owner)
            .await
            .map_err(remote)
    }

    async fn insert_event(&self, owner: &Id, draft: &EventDraft) -> Result<Event> {
        let body = NewEvent {
            draft,
            user_id: owner,
        };
        self.insert(Collection::Events, &body).await
    }

    async fn update_event(&self, id: &Id, patch: &EventPatch) -> Result<Event> {
        if patch.is_empty() {
            return self.get_event(id).await;
        }
        self.update(Collection::Events, id, patch).await
    }

    async fn list_tasks(&self, event_id: &Id) -> Result<Vec<Task>> {
        self.list(Collection::Tasks, event_id).await
    }

    async fn insert_task(&self, draft: &TaskDraft) -> Result<Task> {
        self.insert(Collection::Tasks, draft).await
    }

    async fn update_task(&self, id: &Id, patch: &TaskPatch) -> Result<Task> {
        if patch.is_empty() {
            return self.get(Collection::Tasks, id).await;
        }
        self.update(Collection::Tasks, id, patch).await
    }

    async fn list_guests(&self, event_id: &Id) -> Result<Vec<Guest>> {
        self.list(Collection::Guests, event_id).await
    }

    async fn insert_guest(&self, draft: &GuestDraft) -> Result<Guest> {
        self.insert(Collection::Guests, draft).await
    }

    async fn update_guest(&self, id: &Id, patch: &GuestPatch) -> Result<Guest> {
        if patch.is_empty() {
            return self.get(Collection::Guests, id).await;
        }
        self.update(Collection::Guests, id, patch).await
    }

    async fn list_budget_items(&self, event_id: &Id) -> Result<Vec<BudgetItem>> {
        let rows: Vec<BudgetItemRow> = self.list(Collection::BudgetItems, event_id).await?;
        Ok(rows.into_iter().map(BudgetItem::from).collect())
    }

    async fn insert_budget_item(&self, draft: &BudgetItemDraft) -> Result<BudgetItem> {
        let body = NewBudgetItem::from(draft);
        let row: BudgetItemRow = self.insert(Collection::BudgetItems, &body).await?;
        Ok(row.into())
    }

    async fn update_budget_item(&self, id: &Id, patch: &BudgetItemPatch) -> Result<BudgetItem> {
        let row: BudgetItemRow = if patch.is_empty() {
            self.get(Collection::BudgetItems, id).await?
        } else {
            let body = BudgetItemChanges::from(patch);
            self.update(Collection::BudgetItems, id, &body).await?
        };
        Ok(row.into())
    }

    async fn list_vendors(&self, event_id: &Id) -> Result<Vec<Vendor>> {
        self.list(Collection::Vendors, event_id).await
    }

    async fn insert_vendor(&self, draft: &VendorDraft) -> Result<Vendor> {
        self.insert(Collection::Vendors, draft).await
    }
}

/// Resolves the principal from the `auth/v1/user` endpoint.
#[derive(Debug, Clone)]
pub struct PostgrestAuth {
    client: PostgrestClient,
}

impl PostgrestAuth {
    /// Creates an auth source sharing the client of a backend.
    pub fn new(client: PostgrestClient) -> Self {
        Self { client }
    }
}

impl From<&PostgrestBackend> for PostgrestAuth {
    fn from(backend: &PostgrestBackend) -> Self {
        Self::new(backend.client.clone())
    }
}

#[async_trait]
impl Auth for PostgrestAuth {
    async fn current_principal(&self) -> Result<Option<Principal>> {
        let user = self.client.auth_user().await.map_err(remote)?;
        Ok(user.map(|u| Principal {
            id: Id::new(u.id),
            email: u.email,
        }))
    }
}
