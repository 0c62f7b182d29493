// SPDX-FileCopyrightText: 2026 Gala Developers
//
// SPDX-License-Identifier: Apache-2.0

use std::error::Error;

use clap::{ArgMatches, Command, arg, value_parser};
use colored::Colorize;
use gala_core::{Gala, Guest, GuestDraft, GuestPatch, GuestSummary, Id, RsvpStatus};

use crate::arg::{CommonArgs, RecordArgs, get_clearable};
use crate::guest_formatter::{GuestColumn, GuestFormatter};
use crate::util::{OutputFormat, format_percent};

const ARGS: RecordArgs = RecordArgs::new("guest");

fn arg_rsvp() -> clap::Arg {
    arg!(--rsvp <RSVP> "RSVP status of the guest").value_parser(value_parser!(RsvpStatus))
}

#[derive(Debug, Clone)]
pub struct CmdGuestNew {
    pub event: Id,
    pub name: String,
    pub email: Option<String>,
    pub category: Option<String>,
    pub rsvp: Option<RsvpStatus>,
    pub table: Option<u32>,

    pub output_format: OutputFormat,
}

impl CmdGuestNew {
    pub const NAME: &str = "new";

    pub fn command() -> Command {
        Command::new(Self::NAME)
            .alias("add")
            .about("Invite a guest to an event")
            .arg(CommonArgs::event())
            .arg(arg!(name: <NAME> "Full name of the guest"))
            .arg(arg!(--email <EMAIL> "Contact address of the guest"))
            .arg(ARGS.category())
            .arg(arg_rsvp())
            .arg(arg!(--table <TABLE> "Table number of the guest").value_parser(value_parser!(u32)))
            .arg(CommonArgs::output_format())
    }

    pub fn from(matches: &ArgMatches) -> Result<Self, Box<dyn Error>> {
        Ok(Self {
            event: CommonArgs::get_event(matches),
            name: matches
                .get_one::<String>("name")
                .cloned()
                .ok_or("Name is required for new guest")?,
            email: matches.get_one("email").cloned(),
            category: RecordArgs::get_category(matches),
            rsvp: matches.get_one("rsvp").copied(),
            table: matches.get_one("table").copied(),

            output_format: CommonArgs::get_output_format(matches),
        })
    }

    pub async fn run(self, gala: &Gala) -> Result<(), Box<dyn Error>> {
        tracing::debug!(?self, "adding guest...");
        let mut draft = GuestDraft::new(self.event, self.name);
        draft.email = self.email.unwrap_or_default();
        if let Some(category) = self.category {
            draft.category = category;
        }
        draft.rsvp = self.rsvp.unwrap_or_default();
        draft.table_number = self.table;

        let guest = gala.sync().create_guest(draft).await?;
        print_guests(&[guest], self.output_format, true);
        Ok(())
    }
}

#[derive(Debug, Clone)]
pub struct CmdGuestEdit {
    pub id: Id,
    pub patch: GuestPatch,

    pub output_format: OutputFormat,
}

impl CmdGuestEdit {
    pub const NAME: &str = "edit";

    pub fn command() -> Command {
        Command::new(Self::NAME)
            .about("Edit a guest")
            .arg(ARGS.id())
            .arg(arg!(-n --name <NAME> "Full name of the guest"))
            .arg(arg!(--email <EMAIL> "Contact address of the guest"))
            .arg(ARGS.category())
            .arg(arg_rsvp())
            .arg(arg!(--table <TABLE> "Table number of the guest, empty to unseat"))
            .arg(CommonArgs::output_format())
    }

    pub fn from(matches: &ArgMatches) -> Result<Self, Box<dyn Error>> {
        let table_number = match get_clearable(matches, "table") {
            Some(Some(s)) => Some(Some(
                s.parse::<u32>()
                    .map_err(|e| format!("Invalid table number '{s}': {e}"))?,
            )),
            Some(None) => Some(None),
            None => None,
        };

        Ok(Self {
            id: RecordArgs::get_id(matches),
            patch: GuestPatch {
                name: matches.get_one("name").cloned(),
                email: matches.get_one("email").cloned(),
                category: RecordArgs::get_category(matches),
                rsvp: matches.get_one("rsvp").copied(),
                table_number,
            },

            output_format: CommonArgs::get_output_format(matches),
        })
    }

    pub async fn run(self, gala: &Gala) -> Result<(), Box<dyn Error>> {
        tracing::debug!(?self, "editing guest...");
        if self.patch.is_empty() {
            return Err("Nothing to update, pass at least one field".into());
        }
        let guest = gala.sync().update_guest(&self.id, self.patch).await?;
        print_guests(&[guest], self.output_format, true);
        Ok(())
    }
}

#[derive(Debug, Clone)]
pub struct CmdGuestList {
    pub event: Id,
    pub rsvp: Option<RsvpStatus>,
    pub category: Option<String>,

    pub output_format: OutputFormat,
    pub verbose: bool,
}

impl CmdGuestList {
    pub const NAME: &str = "list";

    pub fn command() -> Command {
        Command::new(Self::NAME)
            .about("List the guests of an event")
            .arg(CommonArgs::event())
            .arg(arg_rsvp())
            .arg(ARGS.category())
            .arg(CommonArgs::output_format())
            .arg(CommonArgs::verbose())
    }

    pub fn from(matches: &ArgMatches) -> Self {
        Self {
            event: CommonArgs::get_event(matches),
            rsvp: matches.get_one("rsvp").copied(),
            category: RecordArgs::get_category(matches),

            output_format: CommonArgs::get_output_format(matches),
            verbose: CommonArgs::get_verbose(matches),
        }
    }

    pub async fn run(self, gala: &Gala) -> Result<(), Box<dyn Error>> {
        tracing::debug!(?self, "listing guests...");
        let guests = gala.store().list_guests(&self.event).await?;
        let summary = GuestSummary::from_guests(&guests);
        let guests: Vec<Guest> = guests
            .into_iter()
            .filter(|g| self.rsvp.is_none_or(|rsvp| g.rsvp == rsvp))
            .filter(|g| {
                self.category
                    .as_deref()
                    .is_none_or(|c| g.category.eq_ignore_ascii_case(c))
            })
            .collect();

        if self.output_format == OutputFormat::Table {
            if guests.is_empty() {
                println!("{}", "No guests found".italic());
                return Ok(());
            }
            println!("{}", format_summary(&summary).italic());
        }
        print_guests(&guests, self.output_format, self.verbose);
        Ok(())
    }
}

pub fn format_summary(summary: &GuestSummary) -> String {
    format!(
        "{} guests: {} confirmed, {} declined, {} pending, {} seated (response {}, confirmed {})",
        summary.total,
        summary.confirmed,
        summary.declined,
        summary.pending,
        summary.seated,
        format_percent(summary.response_rate()),
        format_percent(summary.confirmation_rate()),
    )
}

fn print_guests(guests: &[Guest], output_format: OutputFormat, verbose: bool) {
    let formatter =
        GuestFormatter::new(GuestColumn::columns(verbose)).with_output_format(output_format);
    println!("{}", formatter.format(guests));
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> ArgMatches {
        Command::new("test")
            .subcommand_required(true)
            .subcommand(CmdGuestNew::command())
            .subcommand(CmdGuestEdit::command())
            .subcommand(CmdGuestList::command())
            .try_get_matches_from(std::iter::once("test").chain(args.iter().copied()))
            .unwrap()
    }

    #[test]
    fn test_parse_guest_new() {
        let matches = parse(&[
            "new",
            "-e",
            "evt-1",
            "Grace Hopper",
            "--email",
            "grace@example.com",
            "--category",
            "VIP",
            "--rsvp",
            "confirmed",
            "--table",
            "4",
        ]);
        let parsed = CmdGuestNew::from(matches.subcommand_matches("new").unwrap()).unwrap();
        assert_eq!(parsed.event, Id::new("evt-1"));
        assert_eq!(parsed.name, "Grace Hopper");
        assert_eq!(parsed.email, Some("grace@example.com".to_string()));
        assert_eq!(parsed.category, Some("VIP".to_string()));
        assert_eq!(parsed.rsvp, Some(RsvpStatus::Confirmed));
        assert_eq!(parsed.table, Some(4));
    }

    #[test]
    fn test_parse_guest_edit_table() {
        let matches = parse(&["edit", "g-1", "--table", ""]);
        let parsed = CmdGuestEdit::from(matches.subcommand_matches("edit").unwrap()).unwrap();
        assert_eq!(parsed.patch.table_number, Some(None));

        let matches = parse(&["edit", "g-1", "--table", "7", "--rsvp", "declined"]);
        let parsed = CmdGuestEdit::from(matches.subcommand_matches("edit").unwrap()).unwrap();
        assert_eq!(parsed.patch.table_number, Some(Some(7)));
        assert_eq!(parsed.patch.rsvp, Some(RsvpStatus::Declined));

        let matches = parse(&["edit", "g-1", "--table", "window"]);
        assert!(CmdGuestEdit::from(matches.subcommand_matches("edit").unwrap()).is_err());
    }

    #[test]
    fn test_parse_guest_list_filters() {
        let matches = parse(&["list", "-e", "evt-1", "--rsvp", "pending", "--category", "Family"]);
        let parsed = CmdGuestList::from(matches.subcommand_matches("list").unwrap());
        assert_eq!(parsed.rsvp, Some(RsvpStatus::Pending));
        assert_eq!(parsed.category, Some("Family".to_string()));
    }

    #[test]
    fn test_format_summary() {
        let summary = GuestSummary {
            total: 4,
            pending: 1,
            confirmed: 2,
            declined: 1,
            seated: 2,
            ..Default::default()
        };
        assert_eq!(
            format_summary(&summary),
            "4 guests: 2 confirmed, 1 declined, 1 pending, 2 seated (response 75%, confirmed 50%)"
        );
    }
}
