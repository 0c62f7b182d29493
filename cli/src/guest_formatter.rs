// SPDX-FileCopyrightText: 2026 Gala Developers
//
// SPDX-License-Identifier: Apache-2.0

use std::borrow::Cow;

use colored::Color;
use gala_core::{Guest, RsvpStatus};

use crate::table::{Formatter, PaddingDirection, TableColumn};

pub type GuestFormatter = Formatter<GuestColumn>;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GuestColumn {
    Id,
    Name,
    Email,
    Category,
    Rsvp,
    Table,
}

impl GuestColumn {
    pub fn columns(verbose: bool) -> Vec<Self> {
        if verbose {
            vec![
                Self::Id,
                Self::Rsvp,
                Self::Table,
                Self::Category,
                Self::Email,
                Self::Name,
            ]
        } else {
            vec![Self::Id, Self::Rsvp, Self::Table, Self::Name]
        }
    }
}

impl TableColumn<Guest> for GuestColumn {
    fn name(&self) -> Cow<'_, str> {
        match self {
            Self::Id => "ID",
            Self::Name => "Name",
            Self::Email => "Email",
            Self::Category => "Category",
            Self::Rsvp => "RSVP",
            Self::Table => "Table",
        }
        .into()
    }

    fn format<'a>(&self, data: &'a Guest) -> Cow<'a, str> {
        match self {
            Self::Id => data.id.as_str().into(),
            Self::Name => data.name.as_str().into(),
            Self::Email => data.email.as_str().into(),
            Self::Category => data.category.as_str().into(),
            Self::Rsvp => data.rsvp.as_ref().into(),
            Self::Table => data
                .table_number
                .map(|n| n.to_string())
                .unwrap_or_default()
                .into(),
        }
    }

    fn padding_direction(&self) -> PaddingDirection {
        match self {
            Self::Table => PaddingDirection::Right,
            _ => PaddingDirection::Left,
        }
    }

    fn color(&self, data: &Guest) -> Option<Color> {
        match self {
            Self::Rsvp => match data.rsvp {
                RsvpStatus::Confirmed => Some(Color::Green),
                RsvpStatus::Declined => Some(Color::Red),
                RsvpStatus::Pending => Some(Color::Yellow),
            },
            _ => None,
        }
    }
}
