// SPDX-FileCopyrightText: 2026 Gala Developers
//
// SPDX-License-Identifier: Apache-2.0

use std::collections::BTreeMap;
use std::fmt::Display;
use std::str::FromStr;

use jiff::Timestamp;

use crate::error::{Error, Result};
use crate::types::Id;

/// A person invited to an event.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Guest {
    /// Identity assigned by the store.
    pub id: Id,

    /// The event the guest is invited to.
    pub event_id: Id,

    /// Full name.
    pub name: String,

    /// Contact address.
    #[serde(default)]
    pub email: String,

    /// Grouping such as `VIP`, `Family` or `Staff`.
    #[serde(default)]
    pub category: String,

    /// Reply to the invitation.
    pub rsvp: RsvpStatus,

    /// Assigned table, if seated.
    #[serde(default)]
    pub table_number: Option<u32>,

    /// When the store created the record.
    pub created_at: Timestamp,
}

/// Fields of a new guest.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize)]
pub struct GuestDraft {
    /// The event the guest is invited to.
    pub event_id: Id,

    /// Full name.
    pub name: String,

    /// Contact address.
    pub email: String,

    /// Grouping.
    pub category: String,

    /// Initial reply.
    pub rsvp: RsvpStatus,

    /// Assigned table, if seated.
    pub table_number: Option<u32>,
}

impl GuestDraft {
    /// Creates a pending draft with no category.
    pub fn new(event_id: Id, name: impl Into<String>) -> Self {
        Self {
            event_id,
            name: name.into(),
            email: String::new(),
            category: String::new(),
            rsvp: RsvpStatus::default(),
            table_number: None,
        }
    }

    /// Checks the draft before it is sent to the store.
    pub fn validate(&self) -> Result<()> {
        if self.event_id.is_empty() {
            return Err(Error::Invalid("guest requires an event id".to_string()));
        }
        if self.name.trim().is_empty() {
            return Err(Error::Invalid("guest name must not be empty".to_string()));
        }
        Ok(())
    }
}

/// Patch for a guest, allowing partial updates.
#[derive(Debug, Default, Clone, PartialEq, Eq, serde::Serialize)]
pub struct GuestPatch {
    /// The name, if set.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    /// The email, if set.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,

    /// The category, if set.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,

    /// The reply, if set.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rsvp: Option<RsvpStatus>,

    /// The table, `Some(None)` to unseat.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub table_number: Option<Option<u32>>,
}

impl GuestPatch {
    /// Is this patch empty, meaning no fields are set
    pub fn is_empty(&self) -> bool {
        self.name.is_none()
            && self.email.is_none()
            && self.category.is_none()
            && self.rsvp.is_none()
            && self.table_number.is_none()
    }

    /// Applies the patch to a guest, modifying it in place.
    pub fn apply_to<'a>(&self, g: &'a mut Guest) -> &'a mut Guest {
        if let Some(name) = &self.name {
            g.name.clone_from(name);
        }
        if let Some(email) = &self.email {
            g.email.clone_from(email);
        }
        if let Some(category) = &self.category {
            g.category.clone_from(category);
        }
        if let Some(rsvp) = self.rsvp {
            g.rsvp = rsvp;
        }
        if let Some(table_number) = self.table_number {
            g.table_number = table_number;
        }
        g
    }

    /// Checks the patch before it is sent to the store.
    pub fn validate(&self) -> Result<()> {
        if self.name.as_deref().is_some_and(|n| n.trim().is_empty()) {
            return Err(Error::Invalid("guest name must not be empty".to_string()));
        }
        Ok(())
    }
}

/// Reply of a guest to the invitation.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
#[cfg_attr(feature = "clap", derive(clap::ValueEnum))]
pub enum RsvpStatus {
    /// No reply yet.
    #[default]
    Pending,
    /// Attending.
    Confirmed,
    /// Not attending.
    Declined,
}

const RSVP_PENDING: &str = "pending";
const RSVP_CONFIRMED: &str = "confirmed";
const RSVP_DECLINED: &str = "declined";

impl AsRef<str> for RsvpStatus {
    fn as_ref(&self) -> &str {
        match self {
            RsvpStatus::Pending => RSVP_PENDING,
            RsvpStatus::Confirmed => RSVP_CONFIRMED,
            RsvpStatus::Declined => RSVP_DECLINED,
        }
    }
}

impl Display for RsvpStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_ref())
    }
}

impl FromStr for RsvpStatus {
    type Err = String;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            RSVP_PENDING => Ok(RsvpStatus::Pending),
            RSVP_CONFIRMED => Ok(RsvpStatus::Confirmed),
            RSVP_DECLINED => Ok(RsvpStatus::Declined),
            _ => Err(format!("Invalid RSVP status: {value}")),
        }
    }
}

/// Head counts over a guest list.
#[derive(Debug, Clone, Default, PartialEq, Eq, serde::Serialize)]
pub struct GuestSummary {
    /// Number of guests.
    pub total: usize,
    /// Guests without a reply.
    pub pending: usize,
    /// Guests attending.
    pub confirmed: usize,
    /// Guests not attending.
    pub declined: usize,
    /// Guests with a table assigned.
    pub seated: usize,
    /// Guests per category.
    pub by_category: BTreeMap<String, usize>,
}

impl GuestSummary {
    /// Counts the guests.
    pub fn from_guests(guests: &[Guest]) -> Self {
        let mut summary = Self {
            total: guests.len(),
            ..Default::default()
        };
        for guest in guests {
            match guest.rsvp {
                RsvpStatus::Pending => summary.pending += 1,
                RsvpStatus::Confirmed => summary.confirmed += 1,
                RsvpStatus::Declined => summary.declined += 1,
            }
            if guest.table_number.is_some() {
                summary.seated += 1;
            }
            *summary
                .by_category
                .entry(guest.category.clone())
                .or_default() += 1;
        }
        summary
    }

    /// Share of guests that replied, zero without guests.
    #[expect(clippy::cast_precision_loss)]
    pub fn response_rate(&self) -> f64 {
        match self.total {
            0 => 0.0,
            total => (self.confirmed + self.declined) as f64 / total as f64,
        }
    }

    /// Share of guests that confirmed, zero without guests.
    #[expect(clippy::cast_precision_loss)]
    pub fn confirmation_rate(&self) -> f64 {
        match self.total {
            0 => 0.0,
            total => self.confirmed as f64 / total as f64,
        }
    }
}
