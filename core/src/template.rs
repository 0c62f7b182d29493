// SPDX-FileCopyrightText: 2026 Gala Developers
//
// SPDX-License-Identifier: Apache-2.0

use jiff::civil::Date;

use crate::event::{DEFAULT_THEME, EventDraft};

/// A ready-made starting point for a new event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize)]
pub struct Template {
    /// Display name, also used as the title of the created event.
    pub name: &'static str,

    /// Event type of the created event.
    pub kind: &'static str,

    /// Broad grouping, `Business` or `Social`.
    pub category: &'static str,

    /// What the template is for.
    pub description: &'static str,

    /// Expected number of attendees.
    pub attendees: u32,

    /// Typical duration.
    pub duration: &'static str,

    /// Typical venue.
    pub location: &'static str,
}

/// Built-in templates.
pub const TEMPLATES: [Template; 3] = [
    Template {
        name: "Corporate Conference",
        kind: "corporate",
        category: "Business",
        description: "Professional conference with keynotes, breakout sessions and networking",
        attendees: 100,
        duration: "8 hours",
        location: "Conference Center",
    },
    Template {
        name: "Wedding Reception",
        kind: "wedding",
        category: "Social",
        description: "Elegant reception with dinner, dancing and celebration",
        attendees: 150,
        duration: "6 hours",
        location: "Banquet Hall",
    },
    Template {
        name: "Birthday Party",
        kind: "birthday",
        category: "Social",
        description: "Fun celebration with games, food and entertainment",
        attendees: 30,
        duration: "4 hours",
        location: "Private Venue",
    },
];

impl Template {
    /// Looks up a built-in template by name or type, ignoring case.
    pub fn find(name: &str) -> Option<&'static Template> {
        TEMPLATES
            .iter()
            .find(|t| t.name.eq_ignore_ascii_case(name) || t.kind.eq_ignore_ascii_case(name))
    }

    /// Turns the template into a draft for an event on `date`.
    pub fn to_draft(&self, date: Date) -> EventDraft {
        EventDraft {
            title: self.name.to_string(),
            date,
            location: self.location.to_string(),
            description: self.description.to_string(),
            theme: DEFAULT_THEME.to_string(),
            kind: self.kind.to_string(),
        }
    }
}
