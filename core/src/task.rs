// SPDX-FileCopyrightText: 2026 Gala Developers
//
// SPDX-License-Identifier: Apache-2.0

use std::fmt::Display;
use std::str::FromStr;

use jiff::Timestamp;
use jiff::civil::Date;

use crate::error::{Error, Result};
use crate::types::Id;

/// A unit of work belonging to one event.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Task {
    /// Identity assigned by the store.
    pub id: Id,

    /// The event the task belongs to.
    pub event_id: Id,

    /// Short title.
    pub title: String,

    /// Free-form description.
    #[serde(default)]
    pub description: String,

    /// Board column of the task.
    pub status: TaskStatus,

    /// How urgent the task is.
    pub priority: TaskPriority,

    /// Who is responsible, if anyone.
    #[serde(default)]
    pub assignee: Option<String>,

    /// When the task is due, if ever.
    #[serde(default)]
    pub due_date: Option<Date>,

    /// When the store created the record.
    pub created_at: Timestamp,
}

/// Fields of a new task.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize)]
pub struct TaskDraft {
    /// The event the task belongs to.
    pub event_id: Id,

    /// Short title.
    pub title: String,

    /// Free-form description.
    pub description: String,

    /// Initial board column.
    pub status: TaskStatus,

    /// How urgent the task is.
    pub priority: TaskPriority,

    /// Who is responsible, if anyone.
    pub assignee: Option<String>,

    /// When the task is due, if ever.
    pub due_date: Option<Date>,
}

impl TaskDraft {
    /// Creates a draft in the `todo` column with medium priority.
    pub fn new(event_id: Id, title: impl Into<String>) -> Self {
        Self {
            event_id,
            title: title.into(),
            description: String::new(),
            status: TaskStatus::default(),
            priority: TaskPriority::default(),
            assignee: None,
            due_date: None,
        }
    }

    /// Checks the draft before it is sent to the store.
    pub fn validate(&self) -> Result<()> {
        if self.event_id.is_empty() {
            return Err(Error::Invalid("task requires an event id".to_string()));
        }
        if self.title.trim().is_empty() {
            return Err(Error::Invalid("task title must not be empty".to_string()));
        }
        Ok(())
    }
}

/// Patch for a task, allowing partial updates.
#[derive(Debug, Default, Clone, PartialEq, Eq, serde::Serialize)]
pub struct TaskPatch {
    /// The title, if set.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,

    /// The description, if set.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    /// The status, if set.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<TaskStatus>,

    /// The priority, if set.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub priority: Option<TaskPriority>,

    /// The assignee, `Some(None)` to clear it.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub assignee: Option<Option<String>>,

    /// The due date, `Some(None)` to clear it.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub due_date: Option<Option<Date>>,
}

impl TaskPatch {
    /// Is this patch empty, meaning no fields are set
    pub fn is_empty(&self) -> bool {
        self.title.is_none()
            && self.description.is_none()
            && self.status.is_none()
            && self.priority.is_none()
            && self.assignee.is_none()
            && self.due_date.is_none()
    }

    /// Applies the patch to a task, modifying it in place.
    pub fn apply_to<'a>(&self, t: &'a mut Task) -> &'a mut Task {
        if let Some(title) = &self.title {
            t.title.clone_from(title);
        }
        if let Some(description) = &self.description {
            t.description.clone_from(description);
        }
        if let Some(status) = self.status {
            t.status = status;
        }
        if let Some(priority) = self.priority {
            t.priority = priority;
        }
        if let Some(assignee) = &self.assignee {
            t.assignee.clone_from(assignee);
        }
        if let Some(due_date) = self.due_date {
            t.due_date = due_date;
        }
        t
    }

    /// Checks the patch before it is sent to the store.
    pub fn validate(&self) -> Result<()> {
        if self.title.as_deref().is_some_and(|t| t.trim().is_empty()) {
            return Err(Error::Invalid("task title must not be empty".to_string()));
        }
        Ok(())
    }
}

/// The board column of a task.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
#[cfg_attr(feature = "clap", derive(clap::ValueEnum))]
pub enum TaskStatus {
    /// Not started.
    #[default]
    Todo,
    /// Being worked on.
    #[cfg_attr(feature = "clap", value(name = "in_progress", alias = "in-progress"))]
    InProgress,
    /// Done.
    Completed,
}

const STATUS_TODO: &str = "todo";
const STATUS_IN_PROGRESS: &str = "in_progress";
const STATUS_COMPLETED: &str = "completed";

impl AsRef<str> for TaskStatus {
    fn as_ref(&self) -> &str {
        match self {
            TaskStatus::Todo => STATUS_TODO,
            TaskStatus::InProgress => STATUS_IN_PROGRESS,
            TaskStatus::Completed => STATUS_COMPLETED,
        }
    }
}

impl Display for TaskStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_ref())
    }
}

impl FromStr for TaskStatus {
    type Err = String;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            STATUS_TODO => Ok(TaskStatus::Todo),
            STATUS_IN_PROGRESS => Ok(TaskStatus::InProgress),
            STATUS_COMPLETED => Ok(TaskStatus::Completed),
            _ => Err(format!("Invalid task status: {value}")),
        }
    }
}

/// How urgent a task is.
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
#[serde(rename_all = "snake_case")]
#[cfg_attr(feature = "clap", derive(clap::ValueEnum))]
pub enum TaskPriority {
    /// Needs attention first.
    High,
    /// The usual priority.
    #[default]
    Medium,
    /// Can wait.
    Low,
}

const PRIORITY_HIGH: &str = "high";
const PRIORITY_MEDIUM: &str = "medium";
const PRIORITY_LOW: &str = "low";

impl AsRef<str> for TaskPriority {
    fn as_ref(&self) -> &str {
        match self {
            TaskPriority::High => PRIORITY_HIGH,
            TaskPriority::Medium => PRIORITY_MEDIUM,
            TaskPriority::Low => PRIORITY_LOW,
        }
    }
}

impl Display for TaskPriority {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_ref())
    }
}

impl FromStr for TaskPriority {
    type Err = String;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            PRIORITY_HIGH => Ok(TaskPriority::High),
            PRIORITY_MEDIUM => Ok(TaskPriority::Medium),
            PRIORITY_LOW => Ok(TaskPriority::Low),
            _ => Err(format!("Invalid task priority: {value}")),
        }
    }
}

/// Tasks grouped into board columns.
#[derive(Debug, Clone, Default, PartialEq, Eq, serde::Serialize)]
pub struct TaskBoard {
    /// Tasks not started.
    pub todo: Vec<Task>,
    /// Tasks being worked on.
    pub in_progress: Vec<Task>,
    /// Tasks done.
    pub completed: Vec<Task>,
}

impl TaskBoard {
    /// Groups tasks by status, keeping their order within each column.
    pub fn from_tasks(tasks: &[Task]) -> Self {
        let mut board = Self::default();
        for task in tasks {
            let column = match task.status {
                TaskStatus::Todo => &mut board.todo,
                TaskStatus::InProgress => &mut board.in_progress,
                TaskStatus::Completed => &mut board.completed,
            };
            column.push(task.clone());
        }
        board
    }

    /// Number of tasks on the board.
    pub fn total(&self) -> usize {
        self.todo.len() + self.in_progress.len() + self.completed.len()
    }

    /// Share of completed tasks in `[0, 1]`, zero for an empty board.
    #[expect(clippy::cast_precision_loss)]
    pub fn progress(&self) -> f64 {
        match self.total() {
            0 => 0.0,
            total => self.completed.len() as f64 / total as f64,
        }
    }
}

/// Tasks with a due date, in chronological order.
///
/// Ties keep the order of the input.
pub fn timeline(tasks: &[Task]) -> Vec<&Task> {
    let mut milestones: Vec<&Task> = tasks.iter().filter(|t| t.due_date.is_some()).collect();
    milestones.sort_by_key(|t| t.due_date);
    milestones
}
