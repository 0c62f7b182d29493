// SPDX-FileCopyrightText: 2026 Gala Developers
//
// SPDX-License-Identifier: Apache-2.0

use std::error::Error;

use clap::{ArgMatches, Command, arg, value_parser};
use colored::Colorize;
use gala_core::{
    BudgetItem, BudgetItemDraft, BudgetItemPatch, BudgetSummary, Gala, Id, Money,
    TransactionStatus, TransactionType,
};
use jiff::civil::Date;

use crate::arg::{CommonArgs, RecordArgs, clearable_date, get_clearable_date};
use crate::budget_formatter::{BudgetColumn, BudgetFormatter};
use crate::util::{OutputFormat, format_money, format_percent, progress_bar};

const ARGS: RecordArgs = RecordArgs::new("budget item");

fn arg_type() -> clap::Arg {
    arg!(--"type" <TYPE> "Direction of the money movement")
        .value_parser(value_parser!(TransactionType))
}

fn arg_status() -> clap::Arg {
    arg!(--status <STATUS> "Settlement state of the budget item")
        .value_parser(value_parser!(TransactionStatus))
}

#[derive(Debug, Clone)]
pub struct CmdBudgetAdd {
    pub event: Id,
    pub description: String,
    pub amount: Money,
    pub kind: TransactionType,
    pub category: Option<String>,
    pub status: Option<TransactionStatus>,
    pub date: Option<Date>,

    pub output_format: OutputFormat,
}

impl CmdBudgetAdd {
    pub const NAME: &str = "add";

    pub fn command() -> Command {
        Command::new(Self::NAME)
            .alias("new")
            .about("Record a deposit, payment or refund")
            .arg(CommonArgs::event())
            .arg(arg!(description: <DESCRIPTION> "What the money is for"))
            .arg(
                arg!(amount: <AMOUNT> "Amount, e.g. 1500 or 1500.50")
                    .value_parser(value_parser!(Money)),
            )
            .arg(arg_type().default_value("payment"))
            .arg(ARGS.category())
            .arg(arg_status())
            .arg(ARGS.date("date", "Date"))
            .arg(CommonArgs::output_format())
    }

    pub fn from(matches: &ArgMatches) -> Result<Self, Box<dyn Error>> {
        Ok(Self {
            event: CommonArgs::get_event(matches),
            description: matches
                .get_one::<String>("description")
                .cloned()
                .ok_or("Description is required")?,
            amount: matches
                .get_one::<Money>("amount")
                .copied()
                .ok_or("Amount is required")?,
            kind: matches
                .get_one("type")
                .copied()
                .unwrap_or(TransactionType::Payment),
            category: RecordArgs::get_category(matches),
            status: matches.get_one("status").copied(),
            date: RecordArgs::get_date(matches, "date"),

            output_format: CommonArgs::get_output_format(matches),
        })
    }

    pub async fn run(self, gala: &Gala) -> Result<(), Box<dyn Error>> {
        tracing::debug!(?self, "adding budget item...");
        let mut draft = BudgetItemDraft::new(self.event, self.kind, self.description, self.amount);
        draft.category = self.category.unwrap_or_default();
        draft.status = self.status.unwrap_or_default();
        draft.date = self.date;

        let item = gala.sync().create_budget_item(draft).await?;
        print_items(&[item], self.output_format, true);
        Ok(())
    }
}

#[derive(Debug, Clone)]
pub struct CmdBudgetEdit {
    pub id: Id,
    pub patch: BudgetItemPatch,

    pub output_format: OutputFormat,
}

impl CmdBudgetEdit {
    pub const NAME: &str = "edit";

    pub fn command() -> Command {
        Command::new(Self::NAME)
            .about("Edit a budget item")
            .arg(ARGS.id())
            .arg(ARGS.description())
            .arg(
                arg!(--amount <AMOUNT> "Amount of the budget item")
                    .value_parser(value_parser!(Money)),
            )
            .arg(arg_type())
            .arg(ARGS.category())
            .arg(arg_status())
            .arg(clearable_date("date", "Date of the budget item"))
            .arg(CommonArgs::output_format())
    }

    pub fn from(matches: &ArgMatches) -> Result<Self, Box<dyn Error>> {
        Ok(Self {
            id: RecordArgs::get_id(matches),
            patch: BudgetItemPatch {
                description: RecordArgs::get_description(matches),
                amount: matches.get_one("amount").copied(),
                kind: matches.get_one("type").copied(),
                category: RecordArgs::get_category(matches),
                status: matches.get_one("status").copied(),
                date: get_clearable_date(matches, "date")?,
            },

            output_format: CommonArgs::get_output_format(matches),
        })
    }

    pub async fn run(self, gala: &Gala) -> Result<(), Box<dyn Error>> {
        tracing::debug!(?self, "editing budget item...");
        if self.patch.is_empty() {
            return Err("Nothing to update, pass at least one field".into());
        }
        let item = gala.sync().update_budget_item(&self.id, self.patch).await?;
        print_items(&[item], self.output_format, true);
        Ok(())
    }
}

#[derive(Debug, Clone)]
pub struct CmdBudgetList {
    pub event: Id,
    pub kind: Option<TransactionType>,

    pub output_format: OutputFormat,
    pub verbose: bool,
}

impl CmdBudgetList {
    pub const NAME: &str = "list";

    pub fn command() -> Command {
        Command::new(Self::NAME)
            .about("List the budget items of an event with totals")
            .arg(CommonArgs::event())
            .arg(arg_type())
            .arg(CommonArgs::output_format())
            .arg(CommonArgs::verbose())
    }

    pub fn from(matches: &ArgMatches) -> Self {
        Self {
            event: CommonArgs::get_event(matches),
            kind: matches.get_one("type").copied(),

            output_format: CommonArgs::get_output_format(matches),
            verbose: CommonArgs::get_verbose(matches),
        }
    }

    pub async fn run(self, gala: &Gala) -> Result<(), Box<dyn Error>> {
        tracing::debug!(?self, "listing budget items...");
        let items = gala.store().list_budget_items(&self.event).await?;
        let summary = BudgetSummary::from_items(&items);
        let items: Vec<BudgetItem> = items
            .into_iter()
            .filter(|i| self.kind.is_none_or(|kind| i.kind == kind))
            .collect();

        if self.output_format == OutputFormat::Json {
            print_items(&items, self.output_format, self.verbose);
            return Ok(());
        }

        println!("{}", format_summary(&summary));
        for (category, amount) in &summary.by_category {
            println!("  {category:<16} {}", format_money(*amount));
        }
        println!();
        if items.is_empty() {
            println!("{}", "No budget items found".italic());
        } else {
            print_items(&items, self.output_format, self.verbose);
        }
        Ok(())
    }
}

pub fn format_summary(summary: &BudgetSummary) -> String {
    format!(
        "Spent {} of {} {} {} (remaining {})",
        format_money(summary.spent),
        format_money(summary.total),
        progress_bar(summary.utilization(), 20),
        format_percent(summary.utilization()),
        format_money(summary.remaining()),
    )
}

fn print_items(items: &[BudgetItem], output_format: OutputFormat, verbose: bool) {
    let formatter =
        BudgetFormatter::new(BudgetColumn::columns(verbose)).with_output_format(output_format);
    println!("{}", formatter.format(items));
}
