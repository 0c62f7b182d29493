// SPDX-FileCopyrightText: 2026 Gala Developers
//
// SPDX-License-Identifier: Apache-2.0

use std::fmt::{self, Display};
use std::iter::Sum;
use std::ops::{Add, AddAssign, Deref, Sub};
use std::str::FromStr;

/// Opaque record identity assigned by the store.
#[derive(
    Debug,
    Default,
    Clone,
    PartialEq,
    Eq,
    Hash,
    PartialOrd,
    Ord,
    serde::Serialize,
    serde::Deserialize,
)]
#[serde(transparent)]
pub struct Id(String);

impl Id {
    /// Wraps an existing identity.
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Generates a fresh random identity.
    pub fn generate() -> Self {
        Self(uuid::Uuid::new_v4().to_string())
    }

    /// Returns the identity as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Returns true if the identity is empty.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl Deref for Id {
    type Target = str;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl AsRef<str> for Id {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl Display for Id {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<String> for Id {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl From<&str> for Id {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

/// An amount of money in minor units (cents).
///
/// Record amounts are never negative, but derived figures such as the
/// remaining budget can be.
#[derive(
    Debug,
    Clone,
    Copy,
    Default,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    serde::Serialize,
    serde::Deserialize,
)]
#[serde(transparent)]
pub struct Money(i64);

impl Money {
    /// No money.
    pub const ZERO: Money = Money(0);

    /// The largest amount accepted from input: 999,999,999,999.99.
    pub const MAX: Money = Money(99_999_999_999_999);

    /// Creates an amount from minor units.
    pub const fn from_minor(minor: i64) -> Self {
        Self(minor)
    }

    /// Creates an amount from whole major units.
    pub const fn from_major(major: i64) -> Self {
        Self(major.saturating_mul(100))
    }

    /// Creates an amount from decimal major units, rounded to the nearest
    /// minor unit. `None` when not finite or larger than [`Money::MAX`].
    #[expect(clippy::cast_possible_truncation, clippy::cast_precision_loss)]
    pub fn from_major_f64(major: f64) -> Option<Self> {
        let minor = (major * 100.0).round();
        if !minor.is_finite() || minor.abs() > Money::MAX.0 as f64 {
            return None;
        }
        Some(Self(minor as i64))
    }

    /// The amount in minor units.
    pub const fn minor(self) -> i64 {
        self.0
    }

    /// Returns true if the amount is below zero.
    pub const fn is_negative(self) -> bool {
        self.0 < 0
    }

    /// The amount as a floating point number of major units, for ratios.
    #[expect(clippy::cast_precision_loss)]
    pub fn as_f64(self) -> f64 {
        self.0 as f64 / 100.0
    }
}

impl Add for Money {
    type Output = Money;

    fn add(self, rhs: Self) -> Self::Output {
        Money(self.0.saturating_add(rhs.0))
    }
}

impl AddAssign for Money {
    fn add_assign(&mut self, rhs: Self) {
        self.0 = self.0.saturating_add(rhs.0);
    }
}

impl Sub for Money {
    type Output = Money;

    fn sub(self, rhs: Self) -> Self::Output {
        Money(self.0.saturating_sub(rhs.0))
    }
}

impl Sum for Money {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Money::ZERO, Add::add)
    }
}

impl<'a> Sum<&'a Money> for Money {
    fn sum<I: Iterator<Item = &'a Money>>(iter: I) -> Self {
        iter.copied().sum()
    }
}

impl Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sign = if self.0 < 0 { "-" } else { "" };
        let abs = self.0.unsigned_abs();
        write!(f, "{sign}{}.{:02}", abs / 100, abs % 100)
    }
}

impl FromStr for Money {
    type Err = String;

    /// Parses a non-negative amount such as `15000`, `49.9` or `49.95`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim().trim_start_matches('$');
        let (major, minor) = match s.split_once('.') {
            Some((major, minor)) => (major, minor),
            None => (s, ""),
        };

        let invalid = || format!("Invalid amount: {s}");
        if major.is_empty() || !major.bytes().all(|b| b.is_ascii_digit()) {
            return Err(invalid());
        }
        if minor.len() > 2 || !minor.bytes().all(|b| b.is_ascii_digit()) {
            return Err(invalid());
        }

        let major: i64 = major.parse().map_err(|_| invalid())?;
        let minor: i64 = match minor.len() {
            0 => 0,
            1 => minor.parse::<i64>().map_err(|_| invalid())? * 10,
            _ => minor.parse().map_err(|_| invalid())?,
        };
        major
            .checked_mul(100)
            .and_then(|a| a.checked_add(minor))
            .map(Money)
            .filter(|amount| *amount <= Money::MAX)
            .ok_or_else(invalid)
    }
}

/// Serde adapter for amounts stored as decimal major units, such as `49.95`.
pub(crate) mod major_units {
    use serde::{Deserialize, Deserializer, Serializer, de};

    use super::Money;

    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Amount {
        Number(f64),
        Text(String),
    }

    pub fn serialize<S: Serializer>(amount: &Money, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_f64(amount.as_f64())
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Money, D::Error> {
        match Amount::deserialize(deserializer)? {
            Amount::Number(major) => Money::from_major_f64(major)
                .ok_or_else(|| de::Error::custom(format!("amount out of range: {major}"))),
            Amount::Text(text) => text.parse().map_err(de::Error::custom),
        }
    }

    pub mod option {
        use serde::Serializer;

        use super::Money;

        pub fn serialize<S: Serializer>(
            amount: &Option<Money>,
            serializer: S,
        ) -> Result<S::Ok, S::Error> {
            match amount {
                Some(amount) => super::serialize(amount, serializer),
                None => serializer.serialize_none(),
            }
        }
    }
}

/// The named collections of the store.
///
/// Serializes as its table name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, serde::Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Collection {
    /// Events, the top-level planning unit.
    Events,
    /// Tasks of an event.
    Tasks,
    /// Guests of an event.
    Guests,
    /// Budget transactions of an event.
    BudgetItems,
    /// Vendors booked for an event.
    Vendors,
}

impl Collection {
    /// All collections.
    pub const ALL: [Collection; 5] = [
        Collection::Events,
        Collection::Tasks,
        Collection::Guests,
        Collection::BudgetItems,
        Collection::Vendors,
    ];

    /// The table name in the store.
    pub const fn table_name(self) -> &'static str {
        match self {
            Collection::Events => "events",
            Collection::Tasks => "tasks",
            Collection::Guests => "guests",
            Collection::BudgetItems => "budget_items",
            Collection::Vendors => "vendors",
        }
    }
}

impl Display for Collection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.table_name())
    }
}
