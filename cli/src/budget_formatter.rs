// SPDX-FileCopyrightText: 2026 Gala Developers
//
// SPDX-License-Identifier: Apache-2.0

use std::borrow::Cow;

use colored::Color;
use gala_core::{BudgetItem, TransactionStatus, TransactionType};

use crate::table::{Formatter, PaddingDirection, TableColumn};
use crate::util::{format_date, format_money};

pub type BudgetFormatter = Formatter<BudgetColumn>;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BudgetColumn {
    Id,
    Date,
    Kind,
    Category,
    Amount,
    Status,
    Description,
}

impl BudgetColumn {
    pub fn columns(verbose: bool) -> Vec<Self> {
        let mut columns = vec![Self::Id, Self::Kind, Self::Category, Self::Amount];
        if verbose {
            columns.push(Self::Status);
            columns.push(Self::Date);
        }
        columns.push(Self::Description);
        columns
    }
}

impl TableColumn<BudgetItem> for BudgetColumn {
    fn name(&self) -> Cow<'_, str> {
        match self {
            Self::Id => "ID",
            Self::Date => "Date",
            Self::Kind => "Type",
            Self::Category => "Category",
            Self::Amount => "Amount",
            Self::Status => "Status",
            Self::Description => "Description",
        }
        .into()
    }

    fn format<'a>(&self, data: &'a BudgetItem) -> Cow<'a, str> {
        match self {
            Self::Id => data.id.as_str().into(),
            Self::Date => format_date(data.date).into(),
            Self::Kind => data.kind.as_ref().into(),
            Self::Category => data.category.as_str().into(),
            Self::Amount => format_money(data.amount).into(),
            Self::Status => data.status.as_ref().into(),
            Self::Description => data.description.as_str().into(),
        }
    }

    fn padding_direction(&self) -> PaddingDirection {
        match self {
            Self::Amount => PaddingDirection::Right,
            _ => PaddingDirection::Left,
        }
    }

    fn color(&self, data: &BudgetItem) -> Option<Color> {
        match self {
            Self::Amount => match data.kind {
                TransactionType::Deposit | TransactionType::Refund => Some(Color::Green),
                TransactionType::Payment => None,
            },
            Self::Status if data.status == TransactionStatus::Failed => Some(Color::Red),
            _ => None,
        }
    }
}
