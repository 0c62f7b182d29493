// SPDX-FileCopyrightText: 2026 Gala Developers
//
// SPDX-License-Identifier: Apache-2.0

use std::error::Error;

use clap::{ArgMatches, Command, arg, value_parser};
use colored::Colorize;
use gala_core::{Gala, Id, Task, TaskBoard, TaskDraft, TaskPatch, TaskPriority, TaskStatus};
use jiff::civil::Date;

use crate::arg::{CommonArgs, RecordArgs, clearable_date, get_clearable, get_clearable_date};
use crate::task_formatter::{TaskColumn, TaskFormatter};
use crate::util::{OutputFormat, format_date, format_percent, progress_bar};

const ARGS: RecordArgs = RecordArgs::new("task");

fn arg_status() -> clap::Arg {
    arg!(--status <STATUS> "Status of the task").value_parser(value_parser!(TaskStatus))
}

fn arg_priority() -> clap::Arg {
    arg!(-p --priority <PRIORITY> "Priority of the task").value_parser(value_parser!(TaskPriority))
}

#[derive(Debug, Clone)]
pub struct CmdTaskNew {
    pub event: Id,
    pub title: String,
    pub description: Option<String>,
    pub status: Option<TaskStatus>,
    pub priority: Option<TaskPriority>,
    pub assignee: Option<String>,
    pub due: Option<Date>,

    pub output_format: OutputFormat,
}

impl CmdTaskNew {
    pub const NAME: &str = "new";

    pub fn command() -> Command {
        Command::new(Self::NAME)
            .alias("add")
            .about("Add a task to an event")
            .arg(CommonArgs::event())
            .arg(arg!(title: <TITLE> "Title of the task"))
            .arg(ARGS.description())
            .arg(arg_status())
            .arg(arg_priority())
            .arg(arg!(--assignee <ASSIGNEE> "Who is responsible for the task"))
            .arg(ARGS.date("due", "Due date"))
            .arg(CommonArgs::output_format())
    }

    pub fn from(matches: &ArgMatches) -> Result<Self, Box<dyn Error>> {
        Ok(Self {
            event: CommonArgs::get_event(matches),
            title: matches
                .get_one::<String>("title")
                .cloned()
                .ok_or("Title is required for new task")?,
            description: RecordArgs::get_description(matches),
            status: matches.get_one("status").copied(),
            priority: matches.get_one("priority").copied(),
            assignee: matches.get_one("assignee").cloned(),
            due: RecordArgs::get_date(matches, "due"),

            output_format: CommonArgs::get_output_format(matches),
        })
    }

    pub async fn run(self, gala: &Gala) -> Result<(), Box<dyn Error>> {
        tracing::debug!(?self, "adding task...");
        let mut draft = TaskDraft::new(self.event, self.title);
        draft.description = self.description.unwrap_or_default();
        draft.status = self.status.unwrap_or_default();
        draft.priority = self.priority.unwrap_or_default();
        draft.assignee = self.assignee;
        draft.due_date = self.due;

        let task = gala.sync().create_task(draft).await?;
        print_tasks(&[task], self.output_format, true);
        Ok(())
    }
}

#[derive(Debug, Clone)]
pub struct CmdTaskEdit {
    pub id: Id,
    pub patch: TaskPatch,

    pub output_format: OutputFormat,
}

impl CmdTaskEdit {
    pub const NAME: &str = "edit";

    pub fn command() -> Command {
        Command::new(Self::NAME)
            .about("Edit a task")
            .arg(ARGS.id())
            .arg(arg!(-t --title <TITLE> "Title of the task"))
            .arg(ARGS.description())
            .arg(arg_status())
            .arg(arg_priority())
            .arg(arg!(--assignee <ASSIGNEE> "Who is responsible, empty to clear"))
            .arg(clearable_date("due", "Due date of the task"))
            .arg(CommonArgs::output_format())
    }

    pub fn from(matches: &ArgMatches) -> Result<Self, Box<dyn Error>> {
        Ok(Self {
            id: RecordArgs::get_id(matches),
            patch: TaskPatch {
                title: matches.get_one("title").cloned(),
                description: RecordArgs::get_description(matches),
                status: matches.get_one("status").copied(),
                priority: matches.get_one("priority").copied(),
                assignee: get_clearable(matches, "assignee"),
                due_date: get_clearable_date(matches, "due")?,
            },

            output_format: CommonArgs::get_output_format(matches),
        })
    }

    pub async fn run(self, gala: &Gala) -> Result<(), Box<dyn Error>> {
        tracing::debug!(?self, "editing task...");
        if self.patch.is_empty() {
            return Err("Nothing to update, pass at least one field".into());
        }
        let task = gala.sync().update_task(&self.id, self.patch).await?;
        print_tasks(&[task], self.output_format, true);
        Ok(())
    }
}

/// Moves tasks to a status, as a shortcut for `edit --status`.
#[derive(Debug, Clone)]
pub struct CmdTaskDone {
    pub ids: Vec<Id>,
    pub status: TaskStatus,
}

impl CmdTaskDone {
    pub const NAME: &str = "done";
    pub const NAME_START: &str = "start";

    pub fn command() -> Command {
        Command::new(Self::NAME)
            .about("Mark tasks as completed")
            .arg(arg!(id: <ID> "The ids of the tasks").num_args(1..))
    }

    pub fn command_start() -> Command {
        Command::new(Self::NAME_START)
            .about("Mark tasks as in progress")
            .arg(arg!(id: <ID> "The ids of the tasks").num_args(1..))
    }

    pub fn from(matches: &ArgMatches, status: TaskStatus) -> Self {
        let ids = matches
            .get_many::<String>("id")
            .map(|ids| ids.map(|a| Id::new(a.as_str())).collect())
            .unwrap_or_default();
        Self { ids, status }
    }

    pub async fn run(self, gala: &Gala) -> Result<(), Box<dyn Error>> {
        tracing::debug!(?self, "moving tasks...");
        let sync = gala.sync();
        let mut tasks = Vec::with_capacity(self.ids.len());
        for id in &self.ids {
            let patch = TaskPatch {
                status: Some(self.status),
                ..Default::default()
            };
            tasks.push(sync.update_task(id, patch).await?);
        }
        print_tasks(&tasks, OutputFormat::Table, false);
        Ok(())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TaskView {
    List,
    Board,
    Timeline,
}

#[derive(Debug, Clone)]
pub struct CmdTaskList {
    pub event: Id,
    pub status: Option<TaskStatus>,
    pub view: TaskView,

    pub output_format: OutputFormat,
    pub verbose: bool,
}

impl CmdTaskList {
    pub const NAME: &str = "list";

    pub fn command() -> Command {
        Command::new(Self::NAME)
            .about("List the tasks of an event")
            .arg(CommonArgs::event())
            .arg(arg_status())
            .arg(arg!(--board "Group tasks into board columns").conflicts_with("timeline"))
            .arg(arg!(--timeline "Show tasks with a due date in chronological order"))
            .arg(CommonArgs::output_format())
            .arg(CommonArgs::verbose())
    }

    pub fn from(matches: &ArgMatches) -> Self {
        let view = if matches.get_flag("board") {
            TaskView::Board
        } else if matches.get_flag("timeline") {
            TaskView::Timeline
        } else {
            TaskView::List
        };
        Self {
            event: CommonArgs::get_event(matches),
            status: matches.get_one("status").copied(),
            view,

            output_format: CommonArgs::get_output_format(matches),
            verbose: CommonArgs::get_verbose(matches),
        }
    }

    pub async fn run(self, gala: &Gala) -> Result<(), Box<dyn Error>> {
        tracing::debug!(?self, "listing tasks...");
        let mut tasks = gala.store().list_tasks(&self.event).await?;
        if let Some(status) = self.status {
            tasks.retain(|t| t.status == status);
        }

        match self.view {
            TaskView::List => {
                if tasks.is_empty() && self.output_format == OutputFormat::Table {
                    println!("{}", "No tasks found".italic());
                    return Ok(());
                }
                print_tasks(&tasks, self.output_format, self.verbose);
            }
            TaskView::Board => print_board(&TaskBoard::from_tasks(&tasks), self.output_format)?,
            TaskView::Timeline => {
                let timeline: Vec<Task> =
                    gala_core::timeline(&tasks).into_iter().cloned().collect();
                print_tasks(&timeline, self.output_format, self.verbose);
            }
        }
        Ok(())
    }
}

fn print_tasks(tasks: &[Task], output_format: OutputFormat, verbose: bool) {
    let formatter =
        TaskFormatter::new(TaskColumn::columns(verbose)).with_output_format(output_format);
    println!("{}", formatter.format(tasks));
}

fn print_board(board: &TaskBoard, output_format: OutputFormat) -> Result<(), Box<dyn Error>> {
    if output_format == OutputFormat::Json {
        println!("{}", serde_json::to_string_pretty(board)?);
        return Ok(());
    }

    println!(
        "{} {} {}",
        "Progress".bold(),
        progress_bar(board.progress(), 20),
        format_percent(board.progress())
    );
    for (title, tasks) in [
        ("To Do", &board.todo),
        ("In Progress", &board.in_progress),
        ("Completed", &board.completed),
    ] {
        println!();
        println!(" {} {} ({})", "►".green(), title.italic(), tasks.len());
        for task in tasks {
            let due = format_date(task.due_date);
            match due.is_empty() {
                true => println!("   {} {}", task.id, task.title),
                false => println!("   {} {} (due {due})", task.id, task.title),
            }
        }
    }
    Ok(())
}
