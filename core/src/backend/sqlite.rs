// SPDX-FileCopyrightText: 2026 Gala Developers
//
// SPDX-License-Identifier: Apache-2.0

use std::path::Path;
use std::sync::atomic::{AtomicU64, Ordering};

use async_trait::async_trait;
use jiff::Timestamp;
use jiff::civil::Date;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePool, SqlitePoolOptions};

use crate::budget::{BudgetItem, BudgetItemDraft, BudgetItemPatch};
use crate::error::{Error, Result};
use crate::event::{Event, EventDraft, EventPatch};
use crate::guest::{Guest, GuestDraft, GuestPatch};
use crate::store::Backend;
use crate::task::{Task, TaskDraft, TaskPatch};
use crate::types::{Collection, Id, Money};
use crate::vendor::{Vendor, VendorDraft};

/// File name of the database inside the state directory.
pub const DB_FILENAME: &str = "gala.db";

/// Keeps in-memory databases of one process apart.
static IN_MEMORY_DB_COUNTER: AtomicU64 = AtomicU64::new(0);

/// Backend on a local SQLite database.
#[derive(Debug, Clone)]
pub struct SqliteBackend {
    pool: SqlitePool,
}

impl SqliteBackend {
    /// Opens a sqlite database connection and applies pending migrations.
    /// If `filename` is `None`, it opens an in-memory database.
    pub async fn open(filename: Option<&Path>) -> Result<Self> {
        let options = if let Some(filename) = filename {
            tracing::info!(path = %filename.display(), "connecting to SQLite database");
            let filename = filename
                .to_str()
                .ok_or_else(|| Error::Config("Invalid path encoding".to_string()))?;
            SqliteConnectOptions::new()
                .filename(filename)
                .create_if_missing(true)
        } else {
            tracing::info!("connecting to in-memory SQLite database");
            let db_id = IN_MEMORY_DB_COUNTER.fetch_add(1, Ordering::SeqCst);
            SqliteConnectOptions::new()
                .filename(format!("file:gala_memdb_{db_id}:?mode=memory&cache=shared"))
                .in_memory(true)
        };

        let pool = SqlitePoolOptions::new()
            .connect_with(options)
            .await
            .map_err(|e| Error::Remote(format!("Failed to connect to SQLite database: {e}")))?;

        sqlx::migrate!("src/backend/migrations") // relative path from the crate root
            .run(&pool)
            .await
            .map_err(|e| Error::Remote(format!("Failed to run migrations: {e}")))?;

        Ok(Self { pool })
    }

    /// The underlying connection pool.
    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }

    async fn get_task(&self, id: &Id) -> Result<Task> {
        const SQL: &str = "\
SELECT id, event_id, title, description, status, priority, assignee, due_date, created_at
FROM tasks
WHERE id = ?;
";
        let row: Option<TaskRow> = sqlx::query_as(SQL)
            .bind(id.as_str())
            .fetch_optional(&self.pool)
            .await?;
        row.ok_or_else(|| Error::not_found(Collection::Tasks, id))?
            .try_into()
    }

    async fn get_guest(&self, id: &Id) -> Result<Guest> {
        const SQL: &str = "\
SELECT id, event_id, name, email, category, rsvp, table_number, created_at
FROM guests
WHERE id = ?;
";
        let row: Option<GuestRow> = sqlx::query_as(SQL)
            .bind(id.as_str())
            .fetch_optional(&self.pool)
            .await?;
        row.ok_or_else(|| Error::not_found(Collection::Guests, id))?
            .try_into()
    }

    async fn get_budget_item(&self, id: &Id) -> Result<BudgetItem> {
        const SQL: &str = "\
SELECT id, event_id, description, amount, type, category, status, date, created_at
FROM budget_items
WHERE id = ?;
";
        let row: Option<BudgetItemRow> = sqlx::query_as(SQL)
            .bind(id.as_str())
            .fetch_optional(&self.pool)
            .await?;
        row.ok_or_else(|| Error::not_found(Collection::BudgetItems, id))?
            .try_into()
    }

    async fn write_event(&self, e: &Event) -> Result<()> {
        const SQL: &str = "\
INSERT INTO events (id, title, date, location, description, theme, type, user_id, created_at)
VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?)
ON CONFLICT(id) DO UPDATE SET
    title       = excluded.title,
    date        = excluded.date,
    location    = excluded.location,
    description = excluded.description,
    theme       = excluded.theme,
    type        = excluded.type;
";
        sqlx::query(SQL)
            .bind(e.id.as_str())
            .bind(&e.title)
            .bind(e.date.to_string())
            .bind(&e.location)
            .bind(&e.description)
            .bind(&e.theme)
            .bind(&e.kind)
            .bind(e.user_id.as_str())
            .bind(e.created_at.to_string())
            .execute(&self.pool)
            .await?;
        Ok(())
    }

    async fn write_task(&self, t: &Task) -> Result<()> {
        const SQL: &str = "\
INSERT INTO tasks (id, event_id, title, description, status, priority, assignee, due_date, created_at)
VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?)
ON CONFLICT(id) DO UPDATE SET
    title       = excluded.title,
    description = excluded.description,
    status      = excluded.status,
    priority    = excluded.priority,
    assignee    = excluded.assignee,
    due_date    = excluded.due_date;
";
        sqlx::query(SQL)
            .bind(t.id.as_str())
            .bind(t.event_id.as_str())
            .bind(&t.title)
            .bind(&t.description)
            .bind(t.status.as_ref())
            .bind(t.priority.as_ref())
            .bind(t.assignee.as_deref())
            .bind(t.due_date.map(|d| d.to_string()))
            .bind(t.created_at.to_string())
            .execute(&self.pool)
            .await?;
        Ok(())
    }

    async fn write_guest(&self, g: &Guest) -> Result<()> {
        const SQL: &str = "\
INSERT INTO guests (id, event_id, name, email, category, rsvp, table_number, created_at)
VALUES (?, ?, ?, ?, ?, ?, ?, ?)
ON CONFLICT(id) DO UPDATE SET
    name         = excluded.name,
    email        = excluded.email,
    category     = excluded.category,
    rsvp         = excluded.rsvp,
    table_number = excluded.table_number;
";
        sqlx::query(SQL)
            .bind(g.id.as_str())
            .bind(g.event_id.as_str())
            .bind(&g.name)
            .bind(&g.email)
            .bind(&g.category)
            .bind(g.rsvp.as_ref())
            .bind(g.table_number.map(i64::from))
            .bind(g.created_at.to_string())
            .execute(&self.pool)
            .await?;
        Ok(())
    }

    async fn write_budget_item(&self, b: &BudgetItem) -> Result<()> {
        const SQL: &str = "\
INSERT INTO budget_items (id, event_id, description, amount, type, category, status, date, created_at)
VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?)
ON CONFLICT(id) DO UPDATE SET
    description = excluded.description,
    amount      = excluded.amount,
    type        = excluded.type,
    category    = excluded.category,
    status      = excluded.status,
    date        = excluded.date;
";
        sqlx::query(SQL)
            .bind(b.id.as_str())
            .bind(b.event_id.as_str())
            .bind(&b.description)
            .bind(b.amount.minor())
            .bind(b.kind.as_ref())
            .bind(&b.category)
            .bind(b.status.as_ref())
            .bind(b.date.map(|d| d.to_string()))
            .bind(b.created_at.to_string())
            .execute(&self.pool)
            .await?;
        Ok(())
    }
}

#[async_trait]
impl Backend for SqliteBackend {
    async fn get_event(&self, id: &Id) -> Result<Event> {
        const SQL: &str = "\
SELECT id, title, date, location, description, theme, type, user_id, created_at
FROM events
WHERE id = ?;
";
        let row: Option<EventRow> = sqlx::query_as(SQL)
            .bind(id.as_str())
            .fetch_optional(&self.pool)
            .await?;
        row.ok_or_else(|| Error::not_found(Collection::Events, id))?
            .try_into()
    }

    async fn list_events(&self, owner: &Id) -> Result<Vec<Event>> {
        const SQL: &str = "\
SELECT id, title, date, location, description, theme, type, user_id, created_at
FROM events
WHERE user_id = ?
ORDER BY rowid;
";
        let rows: Vec<EventRow> = sqlx::query_as(SQL)
            .bind(owner.as_str())
            .fetch_all(&self.pool)
            .await?;
        rows.into_iter().map(TryInto::try_into).collect()
    }

    async fn insert_event(&self, owner: &Id, draft: &EventDraft) -> Result<Event> {
        let event = Event {
            id: Id::generate(),
            title: draft.title.clone(),
            date: draft.date,
            location: draft.location.clone(),
            description: draft.description.clone(),
            theme: draft.theme.clone(),
            kind: draft.kind.clone(),
            user_id: owner.clone(),
            created_at: Timestamp::now(),
        };
        self.write_event(&event).await?;
        Ok(event)
    }

    async fn update_event(&self, id: &Id, patch: &EventPatch) -> Result<Event> {
        let mut event = self.get_event(id).await?;
        if patch.is_empty() {
            return Ok(event);
        }
        patch.apply_to(&mut event);
        self.write_event(&event).await?;
        Ok(event)
    }

    async fn list_tasks(&self, event_id: &Id) -> Result<Vec<Task>> {
        const SQL: &str = "\
SELECT id, event_id, title, description, status, priority, assignee, due_date, created_at
FROM tasks
WHERE event_id = ?
ORDER BY rowid;
";
        let rows: Vec<TaskRow> = sqlx::query_as(SQL)
            .bind(event_id.as_str())
            .fetch_all(&self.pool)
            .await?;
        rows.into_iter().map(TryInto::try_into).collect()
    }

    async fn insert_task(&self, draft: &TaskDraft) -> Result<Task> {
        let task = Task {
            id: Id::generate(),
            event_id: draft.event_id.clone(),
            title: draft.title.clone(),
            description: draft.description.clone(),
            status: draft.status,
            priority: draft.priority,
            assignee: draft.assignee.clone(),
            due_date: draft.due_date,
            created_at: Timestamp::now(),
        };
        self.write_task(&task).await?;
        Ok(task)
    }

    async fn update_task(&self, id: &Id, patch: &TaskPatch) -> Result<Task> {
        let mut task = self.get_task(id).await?;
        if patch.is_empty() {
            return Ok(task);
        }
        patch.apply_to(&mut task);
        self.write_task(&task).await?;
        Ok(task)
    }

    async fn list_guests(&self, event_id: &Id) -> Result<Vec<Guest>> {
        const SQL: &str = "\
SELECT id, event_id, name, email, category, rsvp, table_number, created_at
FROM guests
WHERE event_id = ?
ORDER BY rowid;
";
        let rows: Vec<GuestRow> = sqlx::query_as(SQL)
            .bind(event_id.as_str())
            .fetch_all(&self.pool)
            .await?;
        rows.into_iter().map(TryInto::try_into).collect()
    }

    async fn insert_guest(&self, draft: &GuestDraft) -> Result<Guest> {
        let guest = Guest {
            id: Id::generate(),
            event_id: draft.event_id.clone(),
            name: draft.name.clone(),
            email: draft.email.clone(),
            category: draft.category.clone(),
            rsvp: draft.rsvp,
            table_number: draft.table_number,
            created_at: Timestamp::now(),
        };
        self.write_guest(&guest).await?;
        Ok(guest)
    }

    async fn update_guest(&self, id: &Id, patch: &GuestPatch) -> Result<Guest> {
        let mut guest = self.get_guest(id).await?;
        if patch.is_empty() {
            return Ok(guest);
        }
        patch.apply_to(&mut guest);
        self.write_guest(&guest).await?;
        Ok(guest)
    }

    async fn list_budget_items(&self, event_id: &Id) -> Result<Vec<BudgetItem>> {
        const SQL: &str = "\
SELECT id, event_id, description, amount, type, category, status, date, created_at
FROM budget_items
WHERE event_id = ?
ORDER BY rowid;
";
        let rows: Vec<BudgetItemRow> = sqlx::query_as(SQL)
            .bind(event_id.as_str())
            .fetch_all(&self.pool)
            .await?;
        rows.into_iter().map(TryInto::try_into).collect()
    }

    async fn insert_budget_item(&self, draft: &BudgetItemDraft) -> Result<BudgetItem> {
        let item = BudgetItem {
            id: Id::generate(),
            event_id: draft.event_id.clone(),
            description: draft.description.clone(),
            amount: draft.amount,
            kind: draft.kind,
            category: draft.category.clone(),
            status: draft.status,
            date: draft.date,
            created_at: Timestamp::now(),
        };
        self.write_budget_item(&item).await?;
        Ok(item)
    }

    async fn update_budget_item(&self, id: &Id, patch: &BudgetItemPatch) -> Result<BudgetItem> {
        let mut item = self.get_budget_item(id).await?;
        if patch.is_empty() {
            return Ok(item);
        }
        patch.apply_to(&mut item);
        self.write_budget_item(&item).await?;
        Ok(item)
    }

    async fn list_vendors(&self, event_id: &Id) -> Result<Vec<Vendor>> {
        const SQL: &str = "\
SELECT id, event_id, name, category, rating, reviews, description, price, created_at
FROM vendors
WHERE event_id = ?
ORDER BY rowid;
";
        let rows: Vec<VendorRow> = sqlx::query_as(SQL)
            .bind(event_id.as_str())
            .fetch_all(&self.pool)
            .await?;
        rows.into_iter().map(TryInto::try_into).collect()
    }

    async fn insert_vendor(&self, draft: &VendorDraft) -> Result<Vendor> {
        const SQL: &str = "\
INSERT INTO vendors (id, event_id, name, category, rating, reviews, description, price, created_at)
VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?);
";
        let vendor = Vendor {
            id: Id::generate(),
            event_id: draft.event_id.clone(),
            name: draft.name.clone(),
            category: draft.category.clone(),
            rating: draft.rating,
            reviews: draft.reviews,
            description: draft.description.clone(),
            price: draft.price,
            created_at: Timestamp::now(),
        };
        sqlx::query(SQL)
            .bind(vendor.id.as_str())
            .bind(vendor.event_id.as_str())
            .bind(&vendor.name)
            .bind(&vendor.category)
            .bind(vendor.rating)
            .bind(i64::from(vendor.reviews))
            .bind(&vendor.description)
            .bind(vendor.price.as_ref())
            .bind(vendor.created_at.to_string())
            .execute(&self.pool)
            .await?;
        Ok(vendor)
    }

    async fn close(&self) -> Result<()> {
        tracing::debug!("closing database connection");
        self.pool.close().await;
        Ok(())
    }
}

#[derive(Debug, Clone, sqlx::FromRow)]
struct EventRow {
    id: String,
    title: String,
    date: String,
    location: String,
    description: String,
    theme: String,
    #[sqlx(rename = "type")]
    kind: String,
    user_id: String,
    created_at: String,
}

impl TryFrom<EventRow> for Event {
    type Error = Error;

    fn try_from(row: EventRow) -> Result<Self> {
        Ok(Self {
            date: parse_date(&row.date)?,
            created_at: parse_timestamp(&row.created_at)?,
            id: row.id.into(),
            title: row.title,
            location: row.location,
            description: row.description,
            theme: row.theme,
            kind: row.kind,
            user_id: row.user_id.into(),
        })
    }
}

#[derive(Debug, Clone, sqlx::FromRow)]
struct TaskRow {
    id: String,
    event_id: String,
    title: String,
    description: String,
    status: String,
    priority: String,
    assignee: Option<String>,
    due_date: Option<String>,
    created_at: String,
}

impl TryFrom<TaskRow> for Task {
    type Error = Error;

    fn try_from(row: TaskRow) -> Result<Self> {
        Ok(Self {
            status: row.status.parse().map_err(Error::Remote)?,
            priority: row.priority.parse().map_err(Error::Remote)?,
            due_date: row.due_date.as_deref().map(parse_date).transpose()?,
            created_at: parse_timestamp(&row.created_at)?,
            id: row.id.into(),
            event_id: row.event_id.into(),
            title: row.title,
            description: row.description,
            assignee: row.assignee,
        })
    }
}

#[derive(Debug, Clone, sqlx::FromRow)]
struct GuestRow {
    id: String,
    event_id: String,
    name: String,
    email: String,
    category: String,
    rsvp: String,
    table_number: Option<i64>,
    created_at: String,
}

impl TryFrom<GuestRow> for Guest {
    type Error = Error;

    fn try_from(row: GuestRow) -> Result<Self> {
        let table_number = row
            .table_number
            .map(u32::try_from)
            .transpose()
            .map_err(|e| Error::Remote(format!("Invalid table number: {e}")))?;
        Ok(Self {
            rsvp: row.rsvp.parse().map_err(Error::Remote)?,
            table_number,
            created_at: parse_timestamp(&row.created_at)?,
            id: row.id.into(),
            event_id: row.event_id.into(),
            name: row.name,
            email: row.email,
            category: row.category,
        })
    }
}

#[derive(Debug, Clone, sqlx::FromRow)]
struct BudgetItemRow {
    id: String,
    event_id: String,
    description: String,
    amount: i64,
    #[sqlx(rename = "type")]
    kind: String,
    category: String,
    status: String,
    date: Option<String>,
    created_at: String,
}

impl TryFrom<BudgetItemRow> for BudgetItem {
    type Error = Error;

    fn try_from(row: BudgetItemRow) -> Result<Self> {
        Ok(Self {
            amount: Money::from_minor(row.amount),
            kind: row.kind.parse().map_err(Error::Remote)?,
            status: row.status.parse().map_err(Error::Remote)?,
            date: row.date.as_deref().map(parse_date).transpose()?,
            created_at: parse_timestamp(&row.created_at)?,
            id: row.id.into(),
            event_id: row.event_id.into(),
            description: row.description,
            category: row.category,
        })
    }
}

#[derive(Debug, Clone, sqlx::FromRow)]
struct VendorRow {
    id: String,
    event_id: String,
    name: String,
    category: String,
    rating: f64,
    reviews: i64,
    description: String,
    price: String,
    created_at: String,
}

impl TryFrom<VendorRow> for Vendor {
    type Error = Error;

    fn try_from(row: VendorRow) -> Result<Self> {
        Ok(Self {
            reviews: u32::try_from(row.reviews)
                .map_err(|e| Error::Remote(format!("Invalid review count: {e}")))?,
            price: row.price.parse().map_err(Error::Remote)?,
            created_at: parse_timestamp(&row.created_at)?,
            id: row.id.into(),
            event_id: row.event_id.into(),
            name: row.name,
            category: row.category,
            rating: row.rating,
            description: row.description,
        })
    }
}

fn parse_date(s: &str) -> Result<Date> {
    s.parse()
        .map_err(|e| Error::Remote(format!("Invalid date {s:?}: {e}")))
}

fn parse_timestamp(s: &str) -> Result<Timestamp> {
    s.parse()
        .map_err(|e| Error::Remote(format!("Invalid timestamp {s:?}: {e}")))
}
