// SPDX-FileCopyrightText: 2026 Gala Developers
//
// SPDX-License-Identifier: Apache-2.0

use jiff::Timestamp;
use jiff::civil::Date;

use crate::error::{Error, Result};
use crate::types::Id;

/// Default theme of a new event.
pub const DEFAULT_THEME: &str = "modern";

/// Default type of a new event.
pub const DEFAULT_KIND: &str = "corporate";

/// The top-level planning unit, such as a wedding or a conference.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Event {
    /// Identity assigned by the store.
    pub id: Id,

    /// The title of the event.
    pub title: String,

    /// The day the event takes place.
    pub date: Date,

    /// Where the event takes place.
    #[serde(default)]
    pub location: String,

    /// Free-form description.
    #[serde(default)]
    pub description: String,

    /// Visual theme, e.g. `modern` or `classic`.
    pub theme: String,

    /// The kind of event, e.g. `corporate` or `wedding`.
    #[serde(rename = "type")]
    pub kind: String,

    /// The user that owns the event.
    pub user_id: Id,

    /// When the store created the record.
    pub created_at: Timestamp,
}

/// Fields of a new event.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize)]
pub struct EventDraft {
    /// The title of the event.
    pub title: String,

    /// The day the event takes place.
    pub date: Date,

    /// Where the event takes place.
    pub location: String,

    /// Free-form description.
    pub description: String,

    /// Visual theme.
    pub theme: String,

    /// The kind of event.
    #[serde(rename = "type")]
    pub kind: String,
}

impl EventDraft {
    /// Creates a draft with the default theme and type.
    pub fn new(title: impl Into<String>, date: Date) -> Self {
        Self {
            title: title.into(),
            date,
            location: String::new(),
            description: String::new(),
            theme: DEFAULT_THEME.to_string(),
            kind: DEFAULT_KIND.to_string(),
        }
    }

    /// Checks the draft before it is sent to the store.
    pub fn validate(&self) -> Result<()> {
        if self.title.trim().is_empty() {
            return Err(Error::Invalid("event title must not be empty".to_string()));
        }
        Ok(())
    }
}

/// Patch for an event, allowing partial updates.
#[derive(Debug, Default, Clone, PartialEq, Eq, serde::Serialize)]
pub struct EventPatch {
    /// The title of the event, if set.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,

    /// The date of the event, if set.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub date: Option<Date>,

    /// The location of the event, if set.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,

    /// The description of the event, if set.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    /// The theme of the event, if set.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub theme: Option<String>,

    /// The kind of the event, if set.
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub kind: Option<String>,
}

impl EventPatch {
    /// Is this patch empty, meaning no fields are set
    pub fn is_empty(&self) -> bool {
        self.title.is_none()
            && self.date.is_none()
            && self.location.is_none()
            && self.description.is_none()
            && self.theme.is_none()
            && self.kind.is_none()
    }

    /// Applies the patch to an event, modifying it in place.
    pub fn apply_to<'a>(&self, e: &'a mut Event) -> &'a mut Event {
        if let Some(title) = &self.title {
            e.title.clone_from(title);
        }
        if let Some(date) = self.date {
            e.date = date;
        }
        if let Some(location) = &self.location {
            e.location.clone_from(location);
        }
        if let Some(description) = &self.description {
            e.description.clone_from(description);
        }
        if let Some(theme) = &self.theme {
            e.theme.clone_from(theme);
        }
        if let Some(kind) = &self.kind {
            e.kind.clone_from(kind);
        }
        e
    }

    /// Checks the patch before it is sent to the store.
    pub fn validate(&self) -> Result<()> {
        if self.title.as_deref().is_some_and(|t| t.trim().is_empty()) {
            return Err(Error::Invalid("event title must not be empty".to_string()));
        }
        Ok(())
    }
}
