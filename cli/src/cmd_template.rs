// SPDX-FileCopyrightText: 2026 Gala Developers
//
// SPDX-License-Identifier: Apache-2.0

use std::{borrow::Cow, error::Error};

use clap::{ArgMatches, Command, arg};
use gala_core::{Gala, TEMPLATES, Template};
use jiff::civil::Date;

use crate::arg::{CommonArgs, RecordArgs};
use crate::cmd_event::today;
use crate::event_formatter::{EventColumn, EventFormatter};
use crate::table::{Formatter, PaddingDirection, TableColumn};
use crate::util::OutputFormat;

#[derive(Debug, Clone, Copy)]
pub struct CmdTemplateList {
    pub output_format: OutputFormat,
}

impl CmdTemplateList {
    pub const NAME: &str = "list";

    pub fn command() -> Command {
        Command::new(Self::NAME)
            .about("List the built-in event templates")
            .arg(CommonArgs::output_format())
    }

    pub fn from(matches: &ArgMatches) -> Self {
        Self {
            output_format: CommonArgs::get_output_format(matches),
        }
    }

    pub fn run(self) -> Result<(), Box<dyn Error>> {
        tracing::debug!(?self, "listing templates...");
        let columns = vec![
            TemplateColumn::Kind,
            TemplateColumn::Category,
            TemplateColumn::Attendees,
            TemplateColumn::Duration,
            TemplateColumn::Name,
        ];
        let formatter = Formatter::new(columns).with_output_format(self.output_format);
        println!("{}", formatter.format(&TEMPLATES[..]));
        Ok(())
    }
}

#[derive(Debug, Clone)]
pub struct CmdTemplateApply {
    pub name: String,
    pub date: Date,
    pub title: Option<String>,
    pub output_format: OutputFormat,
}

impl CmdTemplateApply {
    pub const NAME: &str = "apply";

    pub fn command() -> Command {
        Command::new(Self::NAME)
            .alias("use")
            .about("Create an event from a template")
            .arg(arg!(name: <TEMPLATE> "Name or type of the template"))
            .arg(
                RecordArgs::new("event")
                    .date("date", "Date")
                    .required(true),
            )
            .arg(arg!(-t --title <TITLE> "Title of the event, defaults to the template name"))
            .arg(CommonArgs::output_format())
    }

    pub fn from(matches: &ArgMatches) -> Result<Self, Box<dyn Error>> {
        Ok(Self {
            name: matches
                .get_one::<String>("name")
                .cloned()
                .ok_or("Template name is required")?,
            date: RecordArgs::get_date(matches, "date").ok_or("Date is required")?,
            title: matches.get_one("title").cloned(),
            output_format: CommonArgs::get_output_format(matches),
        })
    }

    pub async fn run(self, gala: &Gala) -> Result<(), Box<dyn Error>> {
        tracing::debug!(?self, "applying template...");
        let template = Template::find(&self.name)
            .ok_or_else(|| format!("No template named '{}'", self.name))?;
        let mut draft = template.to_draft(self.date);
        if let Some(title) = self.title {
            draft.title = title;
        }

        let event = gala.context().create_event(draft).await?;
        let formatter = EventFormatter::new(EventColumn::columns(today(), true))
            .with_output_format(self.output_format);
        println!("{}", formatter.format(&[event]));
        Ok(())
    }
}

#[derive(Debug, Clone, Copy)]
enum TemplateColumn {
    Name,
    Kind,
    Category,
    Attendees,
    Duration,
}

impl TableColumn<Template> for TemplateColumn {
    fn name(&self) -> Cow<'_, str> {
        match self {
            Self::Name => "Name",
            Self::Kind => "Type",
            Self::Category => "Category",
            Self::Attendees => "Attendees",
            Self::Duration => "Duration",
        }
        .into()
    }

    fn format<'a>(&self, data: &'a Template) -> Cow<'a, str> {
        match self {
            Self::Name => data.name.into(),
            Self::Kind => data.kind.into(),
            Self::Category => data.category.into(),
            Self::Attendees => data.attendees.to_string().into(),
            Self::Duration => data.duration.into(),
        }
    }

    fn padding_direction(&self) -> PaddingDirection {
        match self {
            Self::Attendees => PaddingDirection::Right,
            _ => PaddingDirection::Left,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use jiff::civil::date;

    #[test]
    fn test_parse_template_apply() {
        let cmd = Command::new("test")
            .subcommand_required(true)
            .subcommand(CmdTemplateApply::command());

        let matches = cmd
            .try_get_matches_from(["test", "apply", "wedding", "--date", "2026-06-12"])
            .unwrap();
        let sub_matches = matches.subcommand_matches("apply").unwrap();
        let parsed = CmdTemplateApply::from(sub_matches).unwrap();
        assert_eq!(parsed.name, "wedding");
        assert_eq!(parsed.date, date(2026, 6, 12));
        assert_eq!(parsed.title, None);
    }

    #[test]
    fn test_parse_template_list() {
        let cmd = Command::new("test")
            .subcommand_required(true)
            .subcommand(CmdTemplateList::command());

        let matches = cmd
            .try_get_matches_from(["test", "list", "--output-format", "json"])
            .unwrap();
        let sub_matches = matches.subcommand_matches("list").unwrap();
        assert_eq!(
            CmdTemplateList::from(sub_matches).output_format,
            OutputFormat::Json
        );
    }
}
