// SPDX-FileCopyrightText: 2026 Gala Developers
//
// SPDX-License-Identifier: Apache-2.0

use std::borrow::Cow;

use colored::Color;
use gala_core::{Task, TaskPriority, TaskStatus};

use crate::table::{Formatter, TableColumn};
use crate::util::format_date;

pub type TaskFormatter = Formatter<TaskColumn>;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TaskColumn {
    Id,
    Status,
    Priority,
    Title,
    Assignee,
    Due,
}

impl TaskColumn {
    pub fn columns(verbose: bool) -> Vec<Self> {
        if verbose {
            vec![
                Self::Id,
                Self::Status,
                Self::Priority,
                Self::Due,
                Self::Assignee,
                Self::Title,
            ]
        } else {
            vec![Self::Id, Self::Status, Self::Priority, Self::Due, Self::Title]
        }
    }
}

impl TableColumn<Task> for TaskColumn {
    fn name(&self) -> Cow<'_, str> {
        match self {
            Self::Id => "ID",
            Self::Status => "Status",
            Self::Priority => "Priority",
            Self::Title => "Title",
            Self::Assignee => "Assignee",
            Self::Due => "Due",
        }
        .into()
    }

    fn format<'a>(&self, data: &'a Task) -> Cow<'a, str> {
        match self {
            Self::Id => data.id.as_str().into(),
            Self::Status => format_status(data.status).into(),
            Self::Priority => data.priority.as_ref().into(),
            Self::Title => data.title.as_str().into(),
            Self::Assignee => data.assignee.as_deref().unwrap_or("").into(),
            Self::Due => format_date(data.due_date).into(),
        }
    }

    fn color(&self, data: &Task) -> Option<Color> {
        match self {
            Self::Priority => match data.priority {
                TaskPriority::High => Some(Color::Red),
                TaskPriority::Medium => Some(Color::Yellow),
                TaskPriority::Low => None,
            },
            Self::Status if data.status == TaskStatus::Completed => Some(Color::Green),
            _ => None,
        }
    }
}

pub fn format_status(status: TaskStatus) -> &'static str {
    match status {
        TaskStatus::Todo => "[ ]",
        TaskStatus::InProgress => "[~]",
        TaskStatus::Completed => "[x]",
    }
}
