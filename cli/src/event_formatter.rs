// SPDX-FileCopyrightText: 2026 Gala Developers
//
// SPDX-License-Identifier: Apache-2.0

use std::borrow::Cow;

use colored::Color;
use gala_core::Event;
use jiff::civil::Date;

use crate::table::{Formatter, TableColumn};
use crate::util::format_date;

pub type EventFormatter = Formatter<EventColumn>;

#[derive(Debug, Clone)]
pub enum EventColumn {
    Id,
    Title,
    Date(EventColumnDate),
    Kind,
    Location,
}

impl EventColumn {
    pub fn date(today: Date) -> Self {
        Self::Date(EventColumnDate { today })
    }

    pub fn columns(today: Date, verbose: bool) -> Vec<Self> {
        let mut columns = vec![Self::Id, Self::date(today), Self::Title];
        if verbose {
            columns.push(Self::Kind);
            columns.push(Self::Location);
        }
        columns
    }
}

impl TableColumn<Event> for EventColumn {
    fn name(&self) -> Cow<'_, str> {
        match self {
            Self::Id => "ID",
            Self::Title => "Title",
            Self::Date(_) => "Date",
            Self::Kind => "Type",
            Self::Location => "Location",
        }
        .into()
    }

    fn format<'a>(&self, data: &'a Event) -> Cow<'a, str> {
        match self {
            Self::Id => data.id.as_str().into(),
            Self::Title => data.title.as_str().into(),
            Self::Date(_) => format_date(Some(data.date)).into(),
            Self::Kind => data.kind.as_str().into(),
            Self::Location => data.location.as_str().into(),
        }
    }

    fn color(&self, data: &Event) -> Option<Color> {
        match self {
            Self::Date(a) => a.color(data),
            _ => None,
        }
    }
}

#[derive(Debug, Clone)]
pub struct EventColumnDate {
    today: Date,
}

impl EventColumnDate {
    fn color(&self, event: &Event) -> Option<Color> {
        if event.date < self.today {
            Some(Color::BrightBlack)
        } else if event.date == self.today {
            Some(Color::Yellow)
        } else {
            None
        }
    }
}

/// Picks the event to show by default: the next upcoming one, else the latest.
pub fn pick_default(events: &[Event], today: Date) -> Option<&Event> {
    events
        .iter()
        .filter(|e| e.date >= today)
        .min_by_key(|e| e.date)
        .or_else(|| events.iter().max_by_key(|e| e.date))
}
