// SPDX-FileCopyrightText: 2026 Gala Developers
//
// SPDX-License-Identifier: Apache-2.0

use std::error::Error;

use clap::{Arg, ArgMatches, arg, value_parser};
use gala_core::Id;
use jiff::civil::Date;

use crate::util::OutputFormat;

#[derive(Debug, Clone, Copy)]
pub struct CommonArgs;

impl CommonArgs {
    pub fn verbose() -> Arg {
        arg!(-v --verbose "Show more detailed information")
    }

    pub fn get_verbose(matches: &ArgMatches) -> bool {
        matches.get_flag("verbose")
    }

    pub fn output_format() -> Arg {
        arg!(--"output-format" <FORMAT> "Output format")
            .value_parser(value_parser!(OutputFormat))
            .default_value("table")
    }

    pub fn get_output_format(matches: &ArgMatches) -> OutputFormat {
        matches
            .get_one("output-format")
            .copied()
            .unwrap_or(OutputFormat::Table)
    }

    /// The event a collection command works on.
    pub fn event() -> Arg {
        arg!(-e --event <EVENT> "The id of the event").required(true)
    }

    pub fn get_event(matches: &ArgMatches) -> Id {
        Self::get_event_opt(matches).unwrap_or_default()
    }

    /// The event to show, optional where a default can be picked.
    pub fn event_opt() -> Arg {
        arg!(-e --event <EVENT> "The id of the event, defaults to the next upcoming one")
    }

    pub fn get_event_opt(matches: &ArgMatches) -> Option<Id> {
        matches.get_one::<String>("event").map(|a| Id::new(a.as_str()))
    }
}

/// Arguments shared by commands that take a record id.
#[derive(Debug, Clone, Copy)]
pub struct RecordArgs {
    kind: &'static str,
}

impl RecordArgs {
    pub const fn new(kind: &'static str) -> Self {
        Self { kind }
    }

    pub fn id(self) -> Arg {
        arg!(id: <ID>).help(format!("The id of the {}", self.kind))
    }

    pub fn get_id(matches: &ArgMatches) -> Id {
        matches
            .get_one::<String>("id")
            .map(|a| Id::new(a.as_str()))
            .unwrap_or_default()
    }

    pub fn description(self) -> Arg {
        arg!(--description <DESCRIPTION>).help(format!("Description of the {}", self.kind))
    }

    pub fn get_description(matches: &ArgMatches) -> Option<String> {
        matches.get_one("description").cloned()
    }

    pub fn category(self) -> Arg {
        arg!(--category <CATEGORY>).help(format!("Category of the {}", self.kind))
    }

    pub fn get_category(matches: &ArgMatches) -> Option<String> {
        matches.get_one("category").cloned()
    }

    pub fn date(self, name: &'static str, help: &'static str) -> Arg {
        Arg::new(name)
            .long(name)
            .value_name("YYYY-MM-DD")
            .help(format!("{help} of the {}", self.kind))
            .value_parser(value_parser!(Date))
    }

    pub fn get_date(matches: &ArgMatches, name: &str) -> Option<Date> {
        matches.get_one(name).copied()
    }
}

/// A date flag on edit commands, where an empty value clears the date.
pub fn clearable_date(name: &'static str, help: &'static str) -> Arg {
    Arg::new(name)
        .long(name)
        .value_name("YYYY-MM-DD")
        .help(format!("{help}, empty to clear"))
}

pub fn get_clearable_date(
    matches: &ArgMatches,
    name: &str,
) -> Result<Option<Option<Date>>, Box<dyn Error>> {
    match get_clearable(matches, name) {
        Some(Some(s)) => Ok(Some(Some(
            s.parse().map_err(|e| format!("Invalid {name} date '{s}': {e}"))?,
        ))),
        Some(None) => Ok(Some(None)),
        None => Ok(None),
    }
}

/// Reads an optional string flag where an empty value means "clear".
pub fn get_clearable(matches: &ArgMatches, name: &str) -> Option<Option<String>> {
    matches
        .get_one::<String>(name)
        .map(|a| (!a.is_empty()).then(|| a.clone()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Command;
    use jiff::civil::date;

    fn command() -> Command {
        let args = RecordArgs::new("task");
        Command::new("test")
            .arg(CommonArgs::event())
            .arg(CommonArgs::output_format())
            .arg(args.date("due", "Due date"))
            .arg(arg!(--assignee <ASSIGNEE>))
    }

    #[test]
    fn test_parse_common_args() {
        let matches = command()
            .try_get_matches_from(["test", "-e", "evt-1", "--output-format", "json"])
            .unwrap();
        assert_eq!(CommonArgs::get_event(&matches), Id::new("evt-1"));
        assert_eq!(CommonArgs::get_output_format(&matches), OutputFormat::Json);
        assert_eq!(RecordArgs::get_date(&matches, "due"), None);
    }

    #[test]
    fn test_event_is_required() {
        assert!(command().try_get_matches_from(["test"]).is_err());
    }

    #[test]
    fn test_parse_date() {
        let matches = command()
            .try_get_matches_from(["test", "-e", "x", "--due", "2026-05-01"])
            .unwrap();
        assert_eq!(RecordArgs::get_date(&matches, "due"), Some(date(2026, 5, 1)));

        let err = command().try_get_matches_from(["test", "-e", "x", "--due", "tomorrow"]);
        assert!(err.is_err());
    }

    #[test]
    fn test_clearable() {
        let matches = command()
            .try_get_matches_from(["test", "-e", "x", "--assignee", ""])
            .unwrap();
        assert_eq!(get_clearable(&matches, "assignee"), Some(None));

        let matches = command()
            .try_get_matches_from(["test", "-e", "x", "--assignee", "Ada"])
            .unwrap();
        assert_eq!(get_clearable(&matches, "assignee"), Some(Some("Ada".to_string())));

        let matches = command().try_get_matches_from(["test", "-e", "x"]).unwrap();
        assert_eq!(get_clearable(&matches, "assignee"), None);
    }

    #[test]
    fn test_clearable_date() {
        let command = || Command::new("test").arg(clearable_date("due", "Due date"));

        let matches = command().try_get_matches_from(["test", "--due", "2026-02-03"]).unwrap();
        assert_eq!(
            get_clearable_date(&matches, "due").unwrap(),
            Some(Some(date(2026, 2, 3)))
        );

        let matches = command().try_get_matches_from(["test", "--due", ""]).unwrap();
        assert_eq!(get_clearable_date(&matches, "due").unwrap(), Some(None));

        let matches = command().try_get_matches_from(["test", "--due", "soon"]).unwrap();
        assert!(get_clearable_date(&matches, "due").is_err());
    }
}
