// SPDX-FileCopyrightText: 2026 Gala Developers
//
// SPDX-License-Identifier: Apache-2.0

use std::error::Error;
use std::fmt;

use clap::{ArgMatches, Command};
use colored::Colorize;
use gala_core::{EventAnalytics, EventData, Gala, Id, TaskBoard, TaskStatus, timeline};
use jiff::civil::Date;

use crate::arg::CommonArgs;
use crate::cmd_budget;
use crate::cmd_event::{resolve_event, today};
use crate::cmd_guest;
use crate::config::Config;
use crate::task_formatter::format_status;
use crate::util::{
    OutputFormat, format_date, format_money, format_percent, format_rating, progress_bar,
};

/// Number of upcoming milestones on the dashboard.
const MILESTONES: usize = 5;

#[derive(Debug, Clone)]
pub struct CmdDashboard {
    pub event: Option<Id>,
    pub output_format: OutputFormat,
}

impl CmdDashboard {
    pub const NAME: &str = "dashboard";

    pub fn command() -> Command {
        Command::new(Self::NAME)
            .about("Show the dashboard of an event: tasks, guests, budget and vendors")
            .arg(CommonArgs::event_opt())
            .arg(CommonArgs::output_format())
    }

    pub fn from(matches: &ArgMatches) -> Self {
        Self {
            event: CommonArgs::get_event_opt(matches),
            output_format: CommonArgs::get_output_format(matches),
        }
    }

    /// Show the dashboard of the selected event.
    pub async fn run(self, gala: &Gala, config: &Config) -> Result<(), Box<dyn Error>> {
        tracing::debug!(?self, "generating dashboard...");
        let Some(event) = resolve_event(gala, config, self.event).await? else {
            println!("{}", "No events yet, create one with `gala event new`".italic());
            return Ok(());
        };

        let data = gala.event_data(&event.id).await?;
        let analytics = EventAnalytics::compute(&data);
        print_dashboard(&data, &analytics, self.output_format)
    }
}

/// Prints one rendering of the dashboard.
pub fn print_dashboard(
    data: &EventData,
    analytics: &EventAnalytics,
    output_format: OutputFormat,
) -> Result<(), Box<dyn Error>> {
    match output_format {
        OutputFormat::Json => {
            let json = serde_json::json!({ "data": data, "analytics": analytics });
            println!("{}", serde_json::to_string_pretty(&json)?);
        }
        OutputFormat::Table => print!("{}", Dashboard::new(data, analytics, today())),
    }
    Ok(())
}

/// Plain-text rendering of an event snapshot.
#[derive(Debug)]
pub struct Dashboard<'a> {
    data: &'a EventData,
    analytics: &'a EventAnalytics,
    today: Date,
}

impl<'a> Dashboard<'a> {
    pub fn new(data: &'a EventData, analytics: &'a EventAnalytics, today: Date) -> Self {
        Self {
            data,
            analytics,
            today,
        }
    }

    fn fmt_header(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let Some(event) = &self.data.event else {
            return writeln!(f, "{}", "Loading...".italic());
        };

        writeln!(f, "🎉 {}", event.title.bold())?;
        let days = (event.date - self.today).get_days();
        let when = match days {
            0 => "today".yellow().to_string(),
            1 => "tomorrow".to_string(),
            d if d > 0 => format!("in {d} days"),
            _ => "past".bright_black().to_string(),
        };
        write!(f, "   {} ({when})", event.date)?;
        if !event.location.is_empty() {
            write!(f, " at {}", event.location)?;
        }
        writeln!(f, ", {}", event.kind)
    }

    fn fmt_tasks(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let a = self.analytics;
        writeln!(f, "✅ {}", "Tasks".bold())?;
        if a.tasks_total == 0 {
            return writeln!(f, "   {}", "No tasks yet".italic());
        }

        let board = TaskBoard::from_tasks(&self.data.tasks);
        writeln!(
            f,
            "   {} {} ({}/{} done)",
            progress_bar(a.task_completion, 20),
            format_percent(a.task_completion),
            a.tasks_completed,
            a.tasks_total,
        )?;
        writeln!(
            f,
            "   {} to do, {} in progress, {} completed",
            board.todo.len(),
            board.in_progress.len(),
            board.completed.len(),
        )
    }

    fn fmt_guests(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "💌 {}", "Guests".bold())?;
        match self.analytics.guests.total {
            0 => writeln!(f, "   {}", "No guests yet".italic()),
            _ => writeln!(f, "   {}", cmd_guest::format_summary(&self.analytics.guests)),
        }
    }

    fn fmt_budget(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let budget = &self.analytics.budget;
        writeln!(f, "💰 {}", "Budget".bold())?;
        if self.data.budget_items.is_empty() {
            return writeln!(f, "   {}", "No budget items yet".italic());
        }

        let summary = cmd_budget::format_summary(budget);
        match self.analytics.budget_remaining.is_negative() {
            true => writeln!(f, "   {}", summary.red())?,
            false => writeln!(f, "   {summary}")?,
        }
        for (category, amount) in &budget.by_category {
            writeln!(f, "   {category:<16}{:>12}", format_money(*amount))?;
        }
        Ok(())
    }

    fn fmt_vendors(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "🤝 {}", "Top vendors".bold())?;
        if self.analytics.top_vendors.is_empty() {
            return writeln!(f, "   {}", "No vendors yet".italic());
        }
        for (name, rating) in &self.analytics.top_vendors {
            writeln!(f, "   {} {name}", format_rating(*rating))?;
        }
        Ok(())
    }

    fn fmt_milestones(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "📌 {}", "Upcoming milestones".bold())?;
        let milestones: Vec<_> = timeline(&self.data.tasks)
            .into_iter()
            .filter(|t| t.status != TaskStatus::Completed)
            .take(MILESTONES)
            .collect();
        if milestones.is_empty() {
            return writeln!(f, "   {}", "Nothing due".italic());
        }

        for task in milestones {
            let due = format_date(task.due_date);
            let due = match task.due_date {
                Some(d) if d < self.today => due.red().to_string(),
                _ => due,
            };
            writeln!(f, "   {due} {} {}", format_status(task.status), task.title)?;
        }
        Ok(())
    }
}

impl fmt::Display for Dashboard<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.fmt_header(f)?;
        for section in [
            Self::fmt_tasks,
            Self::fmt_guests,
            Self::fmt_budget,
            Self::fmt_vendors,
            Self::fmt_milestones,
        ] {
            writeln!(f)?;
            section(self, f)?;
        }
        Ok(())
    }
}
