// SPDX-FileCopyrightText: 2026 Gala Developers
//
// SPDX-License-Identifier: Apache-2.0

use std::collections::BTreeMap;
use std::fmt::Display;
use std::str::FromStr;

use jiff::Timestamp;
use jiff::civil::Date;

use crate::error::{Error, Result};
use crate::types::{Id, Money};

/// A money movement recorded against an event budget.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct BudgetItem {
    /// Identity assigned by the store.
    pub id: Id,

    /// The event the item belongs to.
    pub event_id: Id,

    /// What the money is for.
    pub description: String,

    /// Non-negative amount.
    pub amount: Money,

    /// Direction of the movement.
    #[serde(rename = "type")]
    pub kind: TransactionType,

    /// Spending category such as `Venue` or `Catering`.
    #[serde(default)]
    pub category: String,

    /// Settlement state.
    pub status: TransactionStatus,

    /// When the movement happened, if known.
    #[serde(default)]
    pub date: Option<Date>,

    /// When the store created the record.
    pub created_at: Timestamp,
}

/// Fields of a new budget item.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize)]
pub struct BudgetItemDraft {
    /// The event the item belongs to.
    pub event_id: Id,

    /// What the money is for.
    pub description: String,

    /// Non-negative amount.
    pub amount: Money,

    /// Direction of the movement.
    #[serde(rename = "type")]
    pub kind: TransactionType,

    /// Spending category.
    pub category: String,

    /// Settlement state.
    pub status: TransactionStatus,

    /// When the movement happened, if known.
    pub date: Option<Date>,
}

impl BudgetItemDraft {
    /// Creates a pending draft.
    pub fn new(
        event_id: Id,
        kind: TransactionType,
        description: impl Into<String>,
        amount: Money,
    ) -> Self {
        Self {
            event_id,
            description: description.into(),
            amount,
            kind,
            category: String::new(),
            status: TransactionStatus::default(),
            date: None,
        }
    }

    /// Checks the draft before it is sent to the store.
    pub fn validate(&self) -> Result<()> {
        if self.event_id.is_empty() {
            return Err(Error::Invalid("budget item requires an event id".to_string()));
        }
        check_amount(self.amount)
    }
}

/// Patch for a budget item, allowing partial updates.
#[derive(Debug, Default, Clone, PartialEq, Eq, serde::Serialize)]
pub struct BudgetItemPatch {
    /// The description, if set.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    /// The amount, if set.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub amount: Option<Money>,

    /// The transaction type, if set.
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub kind: Option<TransactionType>,

    /// The category, if set.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,

    /// The status, if set.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<TransactionStatus>,

    /// The date, `Some(None)` to clear it.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub date: Option<Option<Date>>,
}

impl BudgetItemPatch {
    /// Is this patch empty, meaning no fields are set
    pub fn is_empty(&self) -> bool {
        self.description.is_none()
            && self.amount.is_none()
            && self.kind.is_none()
            && self.category.is_none()
            && self.status.is_none()
            && self.date.is_none()
    }

    /// Applies the patch to a budget item, modifying it in place.
    pub fn apply_to<'a>(&self, b: &'a mut BudgetItem) -> &'a mut BudgetItem {
        if let Some(description) = &self.description {
            b.description.clone_from(description);
        }
        if let Some(amount) = self.amount {
            b.amount = amount;
        }
        if let Some(kind) = self.kind {
            b.kind = kind;
        }
        if let Some(category) = &self.category {
            b.category.clone_from(category);
        }
        if let Some(status) = self.status {
            b.status = status;
        }
        if let Some(date) = self.date {
            b.date = date;
        }
        b
    }

    /// Checks the patch before it is sent to the store.
    pub fn validate(&self) -> Result<()> {
        match self.amount {
            Some(amount) => check_amount(amount),
            None => Ok(()),
        }
    }
}

fn check_amount(amount: Money) -> Result<()> {
    if amount.is_negative() {
        return Err(Error::Invalid(format!(
            "budget amount must not be negative: {amount}"
        )));
    }
    if amount > Money::MAX {
        return Err(Error::Invalid(format!(
            "budget amount must not exceed {}: {amount}",
            Money::MAX
        )));
    }
    Ok(())
}

/// Direction of a budget movement.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
#[cfg_attr(feature = "clap", derive(clap::ValueEnum))]
pub enum TransactionType {
    /// Money added to the budget.
    Deposit,
    /// Money spent.
    Payment,
    /// Money returned after a payment.
    Refund,
}

const TYPE_DEPOSIT: &str = "deposit";
const TYPE_PAYMENT: &str = "payment";
const TYPE_REFUND: &str = "refund";

impl AsRef<str> for TransactionType {
    fn as_ref(&self) -> &str {
        match self {
            TransactionType::Deposit => TYPE_DEPOSIT,
            TransactionType::Payment => TYPE_PAYMENT,
            TransactionType::Refund => TYPE_REFUND,
        }
    }
}

impl Display for TransactionType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_ref())
    }
}

impl FromStr for TransactionType {
    type Err = String;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            TYPE_DEPOSIT => Ok(TransactionType::Deposit),
            TYPE_PAYMENT => Ok(TransactionType::Payment),
            TYPE_REFUND => Ok(TransactionType::Refund),
            _ => Err(format!("Invalid transaction type: {value}")),
        }
    }
}

/// Settlement state of a budget movement.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
#[cfg_attr(feature = "clap", derive(clap::ValueEnum))]
pub enum TransactionStatus {
    /// Not settled yet.
    #[default]
    Pending,
    /// Settled.
    Completed,
    /// Did not go through.
    Failed,
}

const TX_PENDING: &str = "pending";
const TX_COMPLETED: &str = "completed";
const TX_FAILED: &str = "failed";

impl AsRef<str> for TransactionStatus {
    fn as_ref(&self) -> &str {
        match self {
            TransactionStatus::Pending => TX_PENDING,
            TransactionStatus::Completed => TX_COMPLETED,
            TransactionStatus::Failed => TX_FAILED,
        }
    }
}

impl Display for TransactionStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_ref())
    }
}

impl FromStr for TransactionStatus {
    type Err = String;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            TX_PENDING => Ok(TransactionStatus::Pending),
            TX_COMPLETED => Ok(TransactionStatus::Completed),
            TX_FAILED => Ok(TransactionStatus::Failed),
            _ => Err(format!("Invalid transaction status: {value}")),
        }
    }
}

/// Totals over the budget items of an event.
///
/// Items of every status are counted. Refunds reduce `spent` but are not
/// netted out of the per-category figures, which sum payments only.
#[derive(Debug, Clone, Default, PartialEq, Eq, serde::Serialize)]
pub struct BudgetSummary {
    /// Sum of deposits.
    pub total: Money,
    /// Sum of payments minus sum of refunds.
    pub spent: Money,
    /// Sum of payments per category.
    pub by_category: BTreeMap<String, Money>,
}

impl BudgetSummary {
    /// Aggregates the items.
    pub fn from_items(items: &[BudgetItem]) -> Self {
        let mut summary = Self::default();
        let mut refunds = Money::ZERO;
        for item in items {
            match item.kind {
                TransactionType::Deposit => summary.total += item.amount,
                TransactionType::Payment => {
                    summary.spent += item.amount;
                    *summary
                        .by_category
                        .entry(item.category.clone())
                        .or_default() += item.amount;
                }
                TransactionType::Refund => refunds += item.amount,
            }
        }
        summary.spent = summary.spent - refunds;
        summary
    }

    /// What is left of the budget; negative when overspent.
    pub fn remaining(&self) -> Money {
        self.total - self.spent
    }

    /// Share of the budget spent, zero when nothing was deposited.
    pub fn utilization(&self) -> f64 {
        if self.total == Money::ZERO {
            0.0
        } else {
            self.spent.as_f64() / self.total.as_f64()
        }
    }
}
