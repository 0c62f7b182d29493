// SPDX-FileCopyrightText: 2026 Gala Developers
//
// SPDX-License-Identifier: Apache-2.0

use std::borrow::Cow;

use gala_core::Vendor;

use crate::table::{Formatter, TableColumn};
use crate::util::format_rating;

pub type VendorFormatter = Formatter<VendorColumn>;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VendorColumn {
    Id,
    Name,
    Category,
    Rating,
    Reviews,
    Price,
    Description,
}

impl VendorColumn {
    pub fn columns(verbose: bool) -> Vec<Self> {
        let mut columns = vec![Self::Id, Self::Category, Self::Price, Self::Rating];
        if verbose {
            columns.push(Self::Reviews);
            columns.push(Self::Name);
            columns.push(Self::Description);
        } else {
            columns.push(Self::Name);
        }
        columns
    }
}

impl TableColumn<Vendor> for VendorColumn {
    fn name(&self) -> Cow<'_, str> {
        match self {
            Self::Id => "ID",
            Self::Name => "Name",
            Self::Category => "Category",
            Self::Rating => "Rating",
            Self::Reviews => "Reviews",
            Self::Price => "Price",
            Self::Description => "Description",
        }
        .into()
    }

    fn format<'a>(&self, data: &'a Vendor) -> Cow<'a, str> {
        match self {
            Self::Id => data.id.as_str().into(),
            Self::Name => data.name.as_str().into(),
            Self::Category => data.category.as_str().into(),
            Self::Rating => format_rating(data.rating).into(),
            Self::Reviews => data.reviews.to_string().into(),
            Self::Price => data.price.as_ref().into(),
            Self::Description => data.description.as_str().into(),
        }
    }
}
