// SPDX-FileCopyrightText: 2026 Gala Developers
//
// SPDX-License-Identifier: Apache-2.0

use std::error::Error;

use clap::{ArgMatches, Command, arg, value_parser};
use colored::Colorize;
use gala_core::{
    Gala, Id, PriceTier, Vendor, VendorDraft, top_rated_vendors, vendors_in_category,
};

use crate::arg::{CommonArgs, RecordArgs};
use crate::util::OutputFormat;
use crate::vendor_formatter::{VendorColumn, VendorFormatter};

const ARGS: RecordArgs = RecordArgs::new("vendor");

#[derive(Debug, Clone)]
pub struct CmdVendorAdd {
    pub event: Id,
    pub name: String,
    pub category: String,
    pub rating: Option<f64>,
    pub reviews: Option<u32>,
    pub price: Option<PriceTier>,
    pub description: Option<String>,

    pub output_format: OutputFormat,
}

impl CmdVendorAdd {
    pub const NAME: &str = "add";

    pub fn command() -> Command {
        Command::new(Self::NAME)
            .alias("new")
            .about("Book a vendor for an event")
            .arg(CommonArgs::event())
            .arg(arg!(name: <NAME> "Business name of the vendor"))
            .arg(ARGS.category().required(true))
            .arg(
                arg!(--rating <RATING> "Average rating from 0 to 5")
                    .value_parser(value_parser!(f64)),
            )
            .arg(arg!(--reviews <REVIEWS> "Number of reviews").value_parser(value_parser!(u32)))
            .arg(
                arg!(--price <PRICE> "Price tier of the vendor")
                    .value_parser(value_parser!(PriceTier)),
            )
            .arg(ARGS.description())
            .arg(CommonArgs::output_format())
    }

    pub fn from(matches: &ArgMatches) -> Result<Self, Box<dyn Error>> {
        Ok(Self {
            event: CommonArgs::get_event(matches),
            name: matches
                .get_one::<String>("name")
                .cloned()
                .ok_or("Name is required for new vendor")?,
            category: RecordArgs::get_category(matches)
                .ok_or("Category is required for new vendor")?,
            rating: matches.get_one("rating").copied(),
            reviews: matches.get_one("reviews").copied(),
            price: matches.get_one("price").copied(),
            description: RecordArgs::get_description(matches),

            output_format: CommonArgs::get_output_format(matches),
        })
    }

    pub async fn run(self, gala: &Gala) -> Result<(), Box<dyn Error>> {
        tracing::debug!(?self, "adding vendor...");
        let mut draft = VendorDraft::new(self.event, self.name, self.category);
        if let Some(rating) = self.rating {
            draft.rating = rating;
        }
        if let Some(reviews) = self.reviews {
            draft.reviews = reviews;
        }
        if let Some(price) = self.price {
            draft.price = price;
        }
        if let Some(description) = self.description {
            draft.description = description;
        }

        let vendor = gala.store().create_vendor(&draft).await?;
        print_vendors(&[vendor], self.output_format, true);
        Ok(())
    }
}

#[derive(Debug, Clone)]
pub struct CmdVendorList {
    pub event: Id,
    pub category: Option<String>,
    pub top: Option<usize>,

    pub output_format: OutputFormat,
    pub verbose: bool,
}

impl CmdVendorList {
    pub const NAME: &str = "list";

    pub fn command() -> Command {
        Command::new(Self::NAME)
            .about("List the vendors of an event")
            .arg(CommonArgs::event())
            .arg(ARGS.category())
            .arg(arg!(--top <N> "Only the N best rated vendors").value_parser(value_parser!(usize)))
            .arg(CommonArgs::output_format())
            .arg(CommonArgs::verbose())
    }

    pub fn from(matches: &ArgMatches) -> Self {
        Self {
            event: CommonArgs::get_event(matches),
            category: RecordArgs::get_category(matches),
            top: matches.get_one("top").copied(),

            output_format: CommonArgs::get_output_format(matches),
            verbose: CommonArgs::get_verbose(matches),
        }
    }

    pub async fn run(self, gala: &Gala) -> Result<(), Box<dyn Error>> {
        tracing::debug!(?self, "listing vendors...");
        let vendors = gala.store().list_vendors(&self.event).await?;
        let vendors = self.select(vendors);
        if vendors.is_empty() && self.output_format == OutputFormat::Table {
            println!("{}", "No vendors found".italic());
            return Ok(());
        }
        print_vendors(&vendors, self.output_format, self.verbose);
        Ok(())
    }

    /// Applies the category filter, then ranks when `--top` is given.
    fn select(&self, vendors: Vec<Vendor>) -> Vec<Vendor> {
        let filtered = match &self.category {
            Some(category) => vendors_in_category(&vendors, category)
                .into_iter()
                .cloned()
                .collect(),
            None => vendors,
        };
        match self.top {
            Some(n) => top_rated_vendors(&filtered, n).into_iter().cloned().collect(),
            None => filtered,
        }
    }
}

fn print_vendors(vendors: &[Vendor], output_format: OutputFormat, verbose: bool) {
    let formatter =
        VendorFormatter::new(VendorColumn::columns(verbose)).with_output_format(output_format);
    println!("{}", formatter.format(vendors));
}
