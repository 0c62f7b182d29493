// SPDX-FileCopyrightText: 2026 Gala Developers
//
// SPDX-License-Identifier: Apache-2.0

use std::fmt::Display;
use std::str::FromStr;

use jiff::Timestamp;

use crate::error::{Error, Result};
use crate::types::Id;

/// Highest vendor rating.
pub const MAX_RATING: f64 = 5.0;

/// A supplier booked for an event.
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Vendor {
    /// Identity assigned by the store.
    pub id: Id,

    /// The event the vendor is booked for.
    pub event_id: Id,

    /// Business name.
    pub name: String,

    /// Service category such as `Catering` or `Photography`.
    #[serde(default)]
    pub category: String,

    /// Average rating in `[0, 5]`.
    pub rating: f64,

    /// Number of reviews behind the rating.
    #[serde(default)]
    pub reviews: u32,

    /// Free-form description.
    #[serde(default)]
    pub description: String,

    /// Price tier, `$` to `$$$$`.
    pub price: PriceTier,

    /// When the store created the record.
    pub created_at: Timestamp,
}

/// Fields of a new vendor.
#[derive(Debug, Clone, PartialEq, serde::Serialize)]
pub struct VendorDraft {
    /// The event the vendor is booked for.
    pub event_id: Id,

    /// Business name.
    pub name: String,

    /// Service category.
    pub category: String,

    /// Average rating in `[0, 5]`.
    pub rating: f64,

    /// Number of reviews behind the rating.
    pub reviews: u32,

    /// Free-form description.
    pub description: String,

    /// Price tier.
    pub price: PriceTier,
}

impl VendorDraft {
    /// Creates an unrated draft in the `$$` tier.
    pub fn new(event_id: Id, name: impl Into<String>, category: impl Into<String>) -> Self {
        Self {
            event_id,
            name: name.into(),
            category: category.into(),
            rating: 0.0,
            reviews: 0,
            description: String::new(),
            price: PriceTier::default(),
        }
    }

    /// Checks the draft before it is sent to the store.
    pub fn validate(&self) -> Result<()> {
        if self.event_id.is_empty() {
            return Err(Error::Invalid("vendor requires an event id".to_string()));
        }
        if self.name.trim().is_empty() {
            return Err(Error::Invalid("vendor name must not be empty".to_string()));
        }
        if !(0.0..=MAX_RATING).contains(&self.rating) {
            return Err(Error::Invalid(format!(
                "vendor rating must be between 0 and {MAX_RATING}: {}",
                self.rating
            )));
        }
        Ok(())
    }
}

/// Price tier of a vendor.
#[derive(
    Debug,
    Default,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    PartialOrd,
    Ord,
    serde::Serialize,
    serde::Deserialize,
)]
#[cfg_attr(feature = "clap", derive(clap::ValueEnum))]
pub enum PriceTier {
    /// `$`
    #[serde(rename = "$")]
    #[cfg_attr(feature = "clap", value(name = "$"))]
    Budget,
    /// `$$`
    #[default]
    #[serde(rename = "$$")]
    #[cfg_attr(feature = "clap", value(name = "$$"))]
    Moderate,
    /// `$$$`
    #[serde(rename = "$$$")]
    #[cfg_attr(feature = "clap", value(name = "$$$"))]
    Upscale,
    /// `$$$$`
    #[serde(rename = "$$$$")]
    #[cfg_attr(feature = "clap", value(name = "$$$$"))]
    Luxury,
}

impl AsRef<str> for PriceTier {
    fn as_ref(&self) -> &str {
        match self {
            PriceTier::Budget => "$",
            PriceTier::Moderate => "$$",
            PriceTier::Upscale => "$$$",
            PriceTier::Luxury => "$$$$",
        }
    }
}

impl Display for PriceTier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_ref())
    }
}

impl FromStr for PriceTier {
    type Err = String;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "$" => Ok(PriceTier::Budget),
            "$$" => Ok(PriceTier::Moderate),
            "$$$" => Ok(PriceTier::Upscale),
            "$$$$" => Ok(PriceTier::Luxury),
            _ => Err(format!("Invalid price tier: {value}")),
        }
    }
}

/// Vendors of the given category, compared case-insensitively.
pub fn vendors_in_category<'a>(vendors: &'a [Vendor], category: &str) -> Vec<&'a Vendor> {
    vendors
        .iter()
        .filter(|v| v.category.eq_ignore_ascii_case(category))
        .collect()
}

/// Up to `n` vendors, best rated first; more reviews break ties.
pub fn top_rated_vendors(vendors: &[Vendor], n: usize) -> Vec<&Vendor> {
    let mut ranked: Vec<&Vendor> = vendors.iter().collect();
    ranked.sort_by(|a, b| {
        b.rating
            .total_cmp(&a.rating)
            .then_with(|| b.reviews.cmp(&a.reviews))
    });
    ranked.truncate(n);
    ranked
}

#[cfg(test)]
mod tests {
    use super::*;

    fn vendor(name: &str, category: &str, rating: f64, reviews: u32) -> Vendor {
        Vendor {
            id: Id::generate(),
            event_id: Id::new("ev-1"),
            name: name.to_string(),
            category: category.to_string(),
            rating,
            reviews,
            description: String::new(),
            price: PriceTier::Moderate,
            created_at: Timestamp::UNIX_EPOCH,
        }
    }

    #[test]
    fn price_tier_uses_dollar_signs() {
        assert_eq!(PriceTier::Luxury.to_string(), "$$$$");
        assert_eq!("$".parse(), Ok(PriceTier::Budget));
        let json = serde_json::to_string(&PriceTier::Moderate).unwrap();
        assert_eq!(json, r#""$$""#);
    }

    #[test]
    fn filter_by_category_ignores_case() {
        let vendors = vec![
            vendor("Feast", "Catering", 4.5, 10),
            vendor("Snap", "Photography", 4.9, 3),
        ];
        let found = vendors_in_category(&vendors, "catering");
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].name, "Feast");
    }

    #[test]
    fn top_rated_breaks_ties_by_reviews() {
        let vendors = vec![
            vendor("A", "Catering", 4.5, 10),
            vendor("B", "Catering", 4.8, 2),
            vendor("C", "Catering", 4.5, 40),
        ];
        let names: Vec<&str> = top_rated_vendors(&vendors, 2)
            .iter()
            .map(|v| v.name.as_str())
            .collect();
        assert_eq!(names, ["B", "C"]);
    }

    #[test]
    fn draft_rejects_out_of_range_rating() {
        let mut draft = VendorDraft::new(Id::new("ev-1"), "Feast", "Catering");
        draft.rating = 5.5;
        assert!(matches!(draft.validate(), Err(Error::Invalid(_))));
        draft.rating = f64::NAN;
        assert!(draft.validate().is_err());
    }
}
