// SPDX-FileCopyrightText: 2026 Gala Developers
//
// SPDX-License-Identifier: Apache-2.0

//! Command-line interface of the Gala event planner.

mod arg;
mod budget_formatter;
mod cli;
mod cmd_budget;
mod cmd_dashboard;
mod cmd_event;
mod cmd_generate_completion;
mod cmd_guest;
mod cmd_task;
mod cmd_template;
mod cmd_vendor;
mod cmd_watch;
mod config;
mod event_formatter;
mod guest_formatter;
mod table;
mod task_formatter;
mod util;
mod vendor_formatter;

pub use crate::cli::{Cli, Commands, run};
