// SPDX-FileCopyrightText: 2026 Gala Developers
//
// SPDX-License-Identifier: Apache-2.0

use std::error::Error;

use clap::{ArgMatches, Command, arg};
use colored::Colorize;
use gala_core::{Event, EventDraft, EventPatch, Gala, Id};
use jiff::{Zoned, civil::Date};

use crate::arg::{CommonArgs, RecordArgs};
use crate::config::Config;
use crate::event_formatter::{EventColumn, EventFormatter, pick_default};
use crate::util::OutputFormat;

const ARGS: RecordArgs = RecordArgs::new("event");

#[derive(Debug, Clone)]
pub struct CmdEventNew {
    pub title: String,
    pub date: Date,
    pub location: Option<String>,
    pub description: Option<String>,
    pub theme: Option<String>,
    pub kind: Option<String>,

    pub output_format: OutputFormat,
    pub verbose: bool,
}

impl CmdEventNew {
    pub const NAME: &str = "new";

    pub fn command() -> Command {
        Command::new(Self::NAME)
            .alias("add")
            .about("Create a new event")
            .arg(arg!(title: <TITLE> "Title of the event"))
            .arg(ARGS.date("date", "Date").required(true))
            .arg(arg!(--location <LOCATION> "Where the event takes place"))
            .arg(ARGS.description())
            .arg(arg!(--theme <THEME> "Visual theme of the event"))
            .arg(arg!(--"type" <TYPE> "Type of the event, e.g. corporate or wedding"))
            .arg(CommonArgs::output_format())
            .arg(CommonArgs::verbose())
    }

    pub fn from(matches: &ArgMatches) -> Result<Self, Box<dyn Error>> {
        Ok(Self {
            title: matches
                .get_one::<String>("title")
                .cloned()
                .ok_or("Title is required for new event")?,
            date: RecordArgs::get_date(matches, "date").ok_or("Date is required for new event")?,
            location: matches.get_one("location").cloned(),
            description: RecordArgs::get_description(matches),
            theme: matches.get_one("theme").cloned(),
            kind: matches.get_one("type").cloned(),

            output_format: CommonArgs::get_output_format(matches),
            verbose: CommonArgs::get_verbose(matches),
        })
    }

    pub async fn run(self, gala: &Gala) -> Result<(), Box<dyn Error>> {
        tracing::debug!(?self, "creating event...");
        let mut draft = EventDraft::new(self.title, self.date);
        if let Some(location) = self.location {
            draft.location = location;
        }
        if let Some(description) = self.description {
            draft.description = description;
        }
        if let Some(theme) = self.theme {
            draft.theme = theme;
        }
        if let Some(kind) = self.kind {
            draft.kind = kind;
        }

        let event = gala.context().create_event(draft).await?;
        print_events(&[event], self.output_format, self.verbose);
        Ok(())
    }
}

#[derive(Debug, Clone)]
pub struct CmdEventEdit {
    pub id: Id,
    pub patch: EventPatch,

    pub output_format: OutputFormat,
    pub verbose: bool,
}

impl CmdEventEdit {
    pub const NAME: &str = "edit";

    pub fn command() -> Command {
        Command::new(Self::NAME)
            .about("Edit an event")
            .arg(ARGS.id())
            .arg(arg!(-t --title <TITLE> "Title of the event"))
            .arg(ARGS.date("date", "Date"))
            .arg(arg!(--location <LOCATION> "Where the event takes place"))
            .arg(ARGS.description())
            .arg(arg!(--theme <THEME> "Visual theme of the event"))
            .arg(arg!(--"type" <TYPE> "Type of the event"))
            .arg(CommonArgs::output_format())
            .arg(CommonArgs::verbose())
    }

    pub fn from(matches: &ArgMatches) -> Self {
        Self {
            id: RecordArgs::get_id(matches),
            patch: EventPatch {
                title: matches.get_one("title").cloned(),
                date: RecordArgs::get_date(matches, "date"),
                location: matches.get_one("location").cloned(),
                description: RecordArgs::get_description(matches),
                theme: matches.get_one("theme").cloned(),
                kind: matches.get_one("type").cloned(),
            },

            output_format: CommonArgs::get_output_format(matches),
            verbose: CommonArgs::get_verbose(matches),
        }
    }

    pub async fn run(self, gala: &Gala) -> Result<(), Box<dyn Error>> {
        tracing::debug!(?self, "editing event...");
        if self.patch.is_empty() {
            return Err("Nothing to update, pass at least one field".into());
        }
        let event = gala.context().update_event(&self.id, self.patch).await?;
        print_events(&[event], self.output_format, self.verbose);
        Ok(())
    }
}

#[derive(Debug, Clone, Copy)]
pub struct CmdEventList {
    pub output_format: OutputFormat,
    pub verbose: bool,
}

impl CmdEventList {
    pub const NAME: &str = "list";

    pub fn command() -> Command {
        Command::new(Self::NAME)
            .about("List your events")
            .arg(CommonArgs::output_format())
            .arg(CommonArgs::verbose())
    }

    pub fn from(matches: &ArgMatches) -> Self {
        Self {
            output_format: CommonArgs::get_output_format(matches),
            verbose: CommonArgs::get_verbose(matches),
        }
    }

    pub async fn run(self, gala: &Gala) -> Result<(), Box<dyn Error>> {
        tracing::debug!(?self, "listing events...");
        let mut events = gala.context().list_events().await?;
        if events.is_empty() && self.output_format == OutputFormat::Table {
            println!("{}", "No events found".italic());
            return Ok(());
        }

        events.sort_by(|a, b| a.date.cmp(&b.date).then_with(|| a.title.cmp(&b.title)));
        print_events(&events, self.output_format, self.verbose);
        Ok(())
    }
}

#[derive(Debug, Clone)]
pub struct CmdEventShow {
    pub id: Id,
    pub output_format: OutputFormat,
}

impl CmdEventShow {
    pub const NAME: &str = "show";

    pub fn command() -> Command {
        Command::new(Self::NAME)
            .about("Show the details of an event")
            .arg(ARGS.id())
            .arg(CommonArgs::output_format())
    }

    pub fn from(matches: &ArgMatches) -> Self {
        Self {
            id: RecordArgs::get_id(matches),
            output_format: CommonArgs::get_output_format(matches),
        }
    }

    pub async fn run(self, gala: &Gala) -> Result<(), Box<dyn Error>> {
        tracing::debug!(?self, "showing event...");
        let event = gala.context().select_event(&self.id).await?;
        match self.output_format {
            OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&event)?),
            OutputFormat::Table => {
                println!("{}", event.title.bold());
                for (key, value) in [
                    ("ID", event.id.to_string()),
                    ("Date", event.date.to_string()),
                    ("Location", event.location.clone()),
                    ("Type", event.kind.clone()),
                    ("Theme", event.theme.clone()),
                    ("Description", event.description.clone()),
                ] {
                    if !value.is_empty() {
                        println!("{:<12}{value}", format!("{key}:"));
                    }
                }
            }
        }
        Ok(())
    }
}

/// Finds the event a per-event command should show.
///
/// The explicit id wins, then the configured default, then the next
/// upcoming event of the signed-in user.
pub async fn resolve_event(
    gala: &Gala,
    config: &Config,
    explicit: Option<Id>,
) -> Result<Option<Event>, Box<dyn Error>> {
    let id = explicit.or_else(|| config.event.as_deref().map(Id::new));
    if let Some(id) = id {
        return Ok(Some(gala.context().select_event(&id).await?));
    }

    let events = gala.context().list_events().await?;
    let event = pick_default(&events, today()).cloned();
    if let Some(event) = &event {
        gala.context().set_current_event(Some(event.clone()));
    }
    Ok(event)
}

pub fn today() -> Date {
    Zoned::now().date()
}

fn print_events(events: &[Event], output_format: OutputFormat, verbose: bool) {
    let formatter = EventFormatter::new(EventColumn::columns(today(), verbose))
        .with_output_format(output_format);
    println!("{}", formatter.format(events));
}
