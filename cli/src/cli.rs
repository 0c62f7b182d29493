// SPDX-FileCopyrightText: 2026 Gala Developers
//
// SPDX-License-Identifier: Apache-2.0

use std::{error::Error, ffi::OsString, path::PathBuf};

use clap::{ArgMatches, Command, ValueHint, arg, builder::styling, crate_version, value_parser};
use colored::Colorize;
use futures::{FutureExt, future::BoxFuture};
use gala_core::{APP_NAME, Gala, TaskStatus};
use tracing_subscriber::EnvFilter;

use crate::cmd_budget::{CmdBudgetAdd, CmdBudgetEdit, CmdBudgetList};
use crate::cmd_dashboard::CmdDashboard;
use crate::cmd_event::{CmdEventEdit, CmdEventList, CmdEventNew, CmdEventShow};
use crate::cmd_generate_completion::CmdGenerateCompletion;
use crate::cmd_guest::{CmdGuestEdit, CmdGuestList, CmdGuestNew};
use crate::cmd_task::{CmdTaskDone, CmdTaskEdit, CmdTaskList, CmdTaskNew};
use crate::cmd_template::{CmdTemplateApply, CmdTemplateList};
use crate::cmd_vendor::{CmdVendorAdd, CmdVendorList};
use crate::cmd_watch::CmdWatch;
use crate::config::{Config, parse_config};
use crate::util::OutputFormat;

/// Run the Gala command-line interface.
pub async fn run() -> Result<(), Box<dyn Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    match Cli::parse() {
        Ok(cli) => {
            if let Err(e) = cli.run().await {
                println!("{} {}", "Error:".red(), e);
            }
        }
        Err(e) => println!("{} {}", "Error:".red(), e),
    };
    Ok(())
}

/// Command-line interface
#[derive(Debug)]
pub struct Cli {
    /// Path to the configuration file
    pub config: Option<PathBuf>,

    /// The command to execute
    pub command: Commands,
}

impl Cli {
    /// Create the command-line interface
    pub fn command() -> Command {
        const STYLES: styling::Styles = styling::Styles::styled()
            .header(styling::AnsiColor::Green.on_default().bold())
            .usage(styling::AnsiColor::Green.on_default().bold())
            .literal(styling::AnsiColor::Blue.on_default().bold())
            .placeholder(styling::AnsiColor::Cyan.on_default());

        Command::new(APP_NAME)
            .about("Plan events: tasks, guests, budget and vendors at a glance.")
            .author("Gala Developers")
            .version(crate_version!())
            .styles(STYLES)
            .subcommand_required(false) // allow default to dashboard
            .arg_required_else_help(false)
            .arg(
                arg!(-c --config [CONFIG] "Path to the configuration file")
                    .long_help(
                        "\
Path to the configuration file. Defaults to $XDG_CONFIG_HOME/gala/config.toml on Linux and MacOS, \
%LOCALAPPDATA%/gala/config.toml on Windows.",
                    )
                    .value_parser(value_parser!(PathBuf))
                    .value_hint(ValueHint::FilePath),
            )
            .subcommand(CmdDashboard::command())
            .subcommand(CmdWatch::command())
            .subcommand(
                Command::new("event")
                    .alias("e")
                    .about("Manage your events")
                    .arg_required_else_help(true)
                    .subcommand_required(true)
                    .subcommand(CmdEventNew::command())
                    .subcommand(CmdEventEdit::command())
                    .subcommand(CmdEventList::command())
                    .subcommand(CmdEventShow::command()),
            )
            .subcommand(
                Command::new("template")
                    .about("Start an event from a built-in template")
                    .arg_required_else_help(true)
                    .subcommand_required(true)
                    .subcommand(CmdTemplateList::command())
                    .subcommand(CmdTemplateApply::command()),
            )
            .subcommand(
                Command::new("task")
                    .alias("t")
                    .about("Manage the tasks of an event")
                    .arg_required_else_help(true)
                    .subcommand_required(true)
                    .subcommand(CmdTaskNew::command())
                    .subcommand(CmdTaskEdit::command())
                    .subcommand(CmdTaskDone::command())
                    .subcommand(CmdTaskDone::command_start())
                    .subcommand(CmdTaskList::command()),
            )
            .subcommand(
                Command::new("guest")
                    .alias("g")
                    .about("Manage the guest list of an event")
                    .arg_required_else_help(true)
                    .subcommand_required(true)
                    .subcommand(CmdGuestNew::command())
                    .subcommand(CmdGuestEdit::command())
                    .subcommand(CmdGuestList::command()),
            )
            .subcommand(
                Command::new("budget")
                    .alias("b")
                    .about("Track the budget of an event")
                    .arg_required_else_help(true)
                    .subcommand_required(true)
                    .subcommand(CmdBudgetAdd::command())
                    .subcommand(CmdBudgetEdit::command())
                    .subcommand(CmdBudgetList::command()),
            )
            .subcommand(
                Command::new("vendor")
                    .alias("v")
                    .about("Manage the vendors of an event")
                    .arg_required_else_help(true)
                    .subcommand_required(true)
                    .subcommand(CmdVendorAdd::command())
                    .subcommand(CmdVendorList::command()),
            )
            .subcommand(CmdGenerateCompletion::command())
    }

    /// Parse the command-line arguments
    pub fn parse() -> Result<Self, Box<dyn Error>> {
        let commands = Self::command();
        let matches = commands.get_matches();
        Self::from(matches)
    }

    /// Parse the specified arguments
    pub fn try_parse_from<I, T>(args: I) -> Result<Self, Box<dyn Error>>
    where
        I: IntoIterator<Item = T>,
        T: Into<OsString> + Clone,
    {
        let commands = Self::command();
        let matches = commands.try_get_matches_from(args)?;
        Self::from(matches)
    }

    /// Create a CLI instance from the `ArgMatches`
    pub fn from(matches: ArgMatches) -> Result<Self, Box<dyn Error>> {
        use Commands::*;
        let command = match matches.subcommand() {
            Some((CmdDashboard::NAME, matches)) => Dashboard(CmdDashboard::from(matches)),
            Some((CmdWatch::NAME, matches)) => Watch(CmdWatch::from(matches)),
            Some(("event", matches)) => match matches.subcommand() {
                Some((CmdEventNew::NAME, matches)) => EventNew(CmdEventNew::from(matches)?),
                Some((CmdEventEdit::NAME, matches)) => EventEdit(CmdEventEdit::from(matches)),
                Some((CmdEventList::NAME, matches)) => EventList(CmdEventList::from(matches)),
                Some((CmdEventShow::NAME, matches)) => EventShow(CmdEventShow::from(matches)),
                _ => return Err("Unknown event command".into()),
            },
            Some(("template", matches)) => match matches.subcommand() {
                Some((CmdTemplateList::NAME, matches)) => {
                    TemplateList(CmdTemplateList::from(matches))
                }
                Some((CmdTemplateApply::NAME, matches)) => {
                    TemplateApply(CmdTemplateApply::from(matches)?)
                }
                _ => return Err("Unknown template command".into()),
            },
            Some(("task", matches)) => match matches.subcommand() {
                Some((CmdTaskNew::NAME, matches)) => TaskNew(CmdTaskNew::from(matches)?),
                Some((CmdTaskEdit::NAME, matches)) => TaskEdit(CmdTaskEdit::from(matches)?),
                Some((CmdTaskDone::NAME, matches)) => {
                    TaskDone(CmdTaskDone::from(matches, TaskStatus::Completed))
                }
                Some((CmdTaskDone::NAME_START, matches)) => {
                    TaskDone(CmdTaskDone::from(matches, TaskStatus::InProgress))
                }
                Some((CmdTaskList::NAME, matches)) => TaskList(CmdTaskList::from(matches)),
                _ => return Err("Unknown task command".into()),
            },
            Some(("guest", matches)) => match matches.subcommand() {
                Some((CmdGuestNew::NAME, matches)) => GuestNew(CmdGuestNew::from(matches)?),
                Some((CmdGuestEdit::NAME, matches)) => GuestEdit(CmdGuestEdit::from(matches)?),
                Some((CmdGuestList::NAME, matches)) => GuestList(CmdGuestList::from(matches)),
                _ => return Err("Unknown guest command".into()),
            },
            Some(("budget", matches)) => match matches.subcommand() {
                Some((CmdBudgetAdd::NAME, matches)) => BudgetAdd(CmdBudgetAdd::from(matches)?),
                Some((CmdBudgetEdit::NAME, matches)) => BudgetEdit(CmdBudgetEdit::from(matches)?),
                Some((CmdBudgetList::NAME, matches)) => BudgetList(CmdBudgetList::from(matches)),
                _ => return Err("Unknown budget command".into()),
            },
            Some(("vendor", matches)) => match matches.subcommand() {
                Some((CmdVendorAdd::NAME, matches)) => VendorAdd(CmdVendorAdd::from(matches)?),
                Some((CmdVendorList::NAME, matches)) => VendorList(CmdVendorList::from(matches)),
                _ => return Err("Unknown vendor command".into()),
            },
            Some((CmdGenerateCompletion::NAME, matches)) => {
                GenerateCompletion(CmdGenerateCompletion::from(matches)?)
            }
            None => Dashboard(CmdDashboard {
                event: None,
                output_format: OutputFormat::Table,
            }),
            Some((name, _)) => return Err(format!("Unknown command: {name}").into()),
        };

        let config = matches.get_one("config").cloned();
        Ok(Cli { config, command })
    }

    /// Run the command
    pub async fn run(self) -> Result<(), Box<dyn Error>> {
        self.command.run(self.config).await
    }
}

/// The commands available in the CLI
#[derive(Debug, Clone)]
pub enum Commands {
    /// Show the dashboard of an event
    Dashboard(CmdDashboard),

    /// Keep the dashboard of an event in sync
    Watch(CmdWatch),

    /// Create an event
    EventNew(CmdEventNew),

    /// Edit an event
    EventEdit(CmdEventEdit),

    /// List events
    EventList(CmdEventList),

    /// Show an event
    EventShow(CmdEventShow),

    /// List templates
    TemplateList(CmdTemplateList),

    /// Create an event from a template
    TemplateApply(CmdTemplateApply),

    /// Add a task
    TaskNew(CmdTaskNew),

    /// Edit a task
    TaskEdit(CmdTaskEdit),

    /// Move tasks to another column
    TaskDone(CmdTaskDone),

    /// List tasks
    TaskList(CmdTaskList),

    /// Invite a guest
    GuestNew(CmdGuestNew),

    /// Edit a guest
    GuestEdit(CmdGuestEdit),

    /// List guests
    GuestList(CmdGuestList),

    /// Record a budget movement
    BudgetAdd(CmdBudgetAdd),

    /// Edit a budget movement
    BudgetEdit(CmdBudgetEdit),

    /// List budget movements
    BudgetList(CmdBudgetList),

    /// Book a vendor
    VendorAdd(CmdVendorAdd),

    /// List vendors
    VendorList(CmdVendorList),

    /// Generate shell completion
    GenerateCompletion(CmdGenerateCompletion),
}

impl Commands {
    /// Run the command with the given configuration
    #[rustfmt::skip]
    pub async fn run(self, config: Option<PathBuf>) -> Result<(), Box<dyn Error>> {
        use Commands::*;
        match self {
            Dashboard(a)     => Self::run_with(config, |x, c| a.run(x, c).boxed()).await,
            Watch(a)         => Self::run_with(config, |x, c| a.run(x, c).boxed()).await,
            EventNew(a)      => Self::run_with(config, |x, _| a.run(x).boxed()).await,
            EventEdit(a)     => Self::run_with(config, |x, _| a.run(x).boxed()).await,
            EventList(a)     => Self::run_with(config, |x, _| a.run(x).boxed()).await,
            EventShow(a)     => Self::run_with(config, |x, _| a.run(x).boxed()).await,
            TemplateList(a)  => a.run(),
            TemplateApply(a) => Self::run_with(config, |x, _| a.run(x).boxed()).await,
            TaskNew(a)       => Self::run_with(config, |x, _| a.run(x).boxed()).await,
            TaskEdit(a)      => Self::run_with(config, |x, _| a.run(x).boxed()).await,
            TaskDone(a)      => Self::run_with(config, |x, _| a.run(x).boxed()).await,
            TaskList(a)      => Self::run_with(config, |x, _| a.run(x).boxed()).await,
            GuestNew(a)      => Self::run_with(config, |x, _| a.run(x).boxed()).await,
            GuestEdit(a)     => Self::run_with(config, |x, _| a.run(x).boxed()).await,
            GuestList(a)     => Self::run_with(config, |x, _| a.run(x).boxed()).await,
            BudgetAdd(a)     => Self::run_with(config, |x, _| a.run(x).boxed()).await,
            BudgetEdit(a)    => Self::run_with(config, |x, _| a.run(x).boxed()).await,
            BudgetList(a)    => Self::run_with(config, |x, _| a.run(x).boxed()).await,
            VendorAdd(a)     => Self::run_with(config, |x, _| a.run(x).boxed()).await,
            VendorList(a)    => Self::run_with(config, |x, _| a.run(x).boxed()).await,
            GenerateCompletion(a) => a.run(),
        }
    }

    async fn run_with<F>(config: Option<PathBuf>, f: F) -> Result<(), Box<dyn Error>>
    where
        F: for<'a> FnOnce(&'a Gala, &'a Config) -> BoxFuture<'a, Result<(), Box<dyn Error>>>,
    {
        tracing::debug!("parsing configuration...");
        let (core_config, config) = parse_config(config).await?;
        let gala = Gala::new(core_config).await?;

        let result = f(&gala, &config).await;

        gala.close().await?;
        result
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cmd_generate_completion::Shell;
    use crate::cmd_task::TaskView;
    use gala_core::{Id, Money, TransactionType};

    #[test]
    fn test_parse_config() {
        let cli = Cli::try_parse_from(vec!["test", "-c", "/tmp/config.toml"]).unwrap();
        assert_eq!(cli.config, Some(PathBuf::from("/tmp/config.toml")));
        assert!(matches!(cli.command, Commands::Dashboard(_)));
    }

    #[test]
    fn test_parse_default_dashboard() {
        let cli = Cli::try_parse_from(vec!["test"]).unwrap();
        match cli.command {
            Commands::Dashboard(cmd) => {
                assert_eq!(cmd.event, None);
                assert_eq!(cmd.output_format, OutputFormat::Table);
            }
            _ => panic!("Expected Dashboard command"),
        }
    }

    #[test]
    fn test_parse_dashboard() {
        let args = vec!["test", "dashboard", "-e", "evt-1", "--output-format", "json"];
        let cli = Cli::try_parse_from(args).unwrap();
        match cli.command {
            Commands::Dashboard(cmd) => {
                assert_eq!(cmd.event, Some(Id::new("evt-1")));
                assert_eq!(cmd.output_format, OutputFormat::Json);
            }
            _ => panic!("Expected Dashboard command"),
        }
    }

    #[test]
    fn test_parse_watch() {
        let cli = Cli::try_parse_from(vec!["test", "watch", "-e", "evt-1"]).unwrap();
        assert!(matches!(cli.command, Commands::Watch(_)));
    }

    #[test]
    fn test_parse_event_commands() {
        let args = vec!["test", "event", "new", "Launch", "--date", "2026-12-01"];
        let cli = Cli::try_parse_from(args).unwrap();
        assert!(matches!(cli.command, Commands::EventNew(_)));

        let cli = Cli::try_parse_from(vec!["test", "e", "list"]).unwrap();
        assert!(matches!(cli.command, Commands::EventList(_)));

        let cli = Cli::try_parse_from(vec!["test", "event", "show", "evt-1"]).unwrap();
        assert!(matches!(cli.command, Commands::EventShow(_)));

        let args = vec!["test", "event", "edit", "evt-1", "-t", "Renamed"];
        let cli = Cli::try_parse_from(args).unwrap();
        assert!(matches!(cli.command, Commands::EventEdit(_)));
    }

    #[test]
    fn test_parse_event_requires_subcommand() {
        assert!(Cli::try_parse_from(vec!["test", "event"]).is_err());
    }

    #[test]
    fn test_parse_template_commands() {
        let cli = Cli::try_parse_from(vec!["test", "template", "list"]).unwrap();
        assert!(matches!(cli.command, Commands::TemplateList(_)));

        let args = vec!["test", "template", "apply", "wedding", "--date", "2027-06-12"];
        let cli = Cli::try_parse_from(args).unwrap();
        assert!(matches!(cli.command, Commands::TemplateApply(_)));
    }

    #[test]
    fn test_parse_task_done_and_start() {
        let cli = Cli::try_parse_from(vec!["test", "task", "done", "t-1", "t-2"]).unwrap();
        match cli.command {
            Commands::TaskDone(cmd) => {
                assert_eq!(cmd.ids, vec![Id::new("t-1"), Id::new("t-2")]);
                assert_eq!(cmd.status, TaskStatus::Completed);
            }
            _ => panic!("Expected TaskDone command"),
        }

        let cli = Cli::try_parse_from(vec!["test", "t", "start", "t-1"]).unwrap();
        match cli.command {
            Commands::TaskDone(cmd) => assert_eq!(cmd.status, TaskStatus::InProgress),
            _ => panic!("Expected TaskDone command"),
        }
    }

    #[test]
    fn test_parse_task_list_board() {
        let args = vec!["test", "task", "list", "-e", "evt-1", "--board"];
        let cli = Cli::try_parse_from(args).unwrap();
        match cli.command {
            Commands::TaskList(cmd) => assert_eq!(cmd.view, TaskView::Board),
            _ => panic!("Expected TaskList command"),
        }
    }

    #[test]
    fn test_parse_guest_new() {
        let args = vec!["test", "g", "new", "-e", "evt-1", "Ada Lovelace"];
        let cli = Cli::try_parse_from(args).unwrap();
        match cli.command {
            Commands::GuestNew(cmd) => assert_eq!(cmd.name, "Ada Lovelace"),
            _ => panic!("Expected GuestNew command"),
        }
    }

    #[test]
    fn test_parse_budget_add() {
        let args = vec![
            "test", "budget", "add", "-e", "evt-1", "Initial budget", "15000", "--type", "deposit",
        ];
        let cli = Cli::try_parse_from(args).unwrap();
        match cli.command {
            Commands::BudgetAdd(cmd) => {
                assert_eq!(cmd.amount, Money::from_major(15000));
                assert_eq!(cmd.kind, TransactionType::Deposit);
            }
            _ => panic!("Expected BudgetAdd command"),
        }
    }

    #[test]
    fn test_parse_vendor_list() {
        let args = vec!["test", "vendor", "list", "-e", "evt-1", "--top", "3"];
        let cli = Cli::try_parse_from(args).unwrap();
        match cli.command {
            Commands::VendorList(cmd) => assert_eq!(cmd.top, Some(3)),
            _ => panic!("Expected VendorList command"),
        }
    }

    #[test]
    fn test_parse_generate_completions() {
        let args = vec!["test", "generate-completion", "zsh"];
        let cli = Cli::try_parse_from(args).unwrap();
        match cli.command {
            Commands::GenerateCompletion(cmd) => assert_eq!(cmd.shell, Shell::Zsh),
            _ => panic!("Expected GenerateCompletion command"),
        }
    }
}
