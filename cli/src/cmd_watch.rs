// SPDX-FileCopyrightText: 2026 Gala Developers
//
// SPDX-License-Identifier: Apache-2.0

use std::error::Error;
use std::io::{IsTerminal, Write, stdout};
use std::time::Duration;

use clap::{ArgMatches, Command, arg, value_parser};
use colored::Colorize;
use gala_core::{EventAnalytics, EventSync, Gala, Id, SyncState};
use tokio::time::{Instant, Interval, interval_at};

use crate::arg::CommonArgs;
use crate::cmd_dashboard::Dashboard;
use crate::cmd_event::{resolve_event, today};
use crate::config::Config;
use crate::util::OutputFormat;

#[derive(Debug, Clone)]
pub struct CmdWatch {
    pub event: Option<Id>,
    pub interval: Option<Duration>,
    pub output_format: OutputFormat,
}

impl CmdWatch {
    pub const NAME: &str = "watch";

    pub fn command() -> Command {
        Command::new(Self::NAME)
            .about("Keep the dashboard of an event on screen and redraw it on every change")
            .arg(CommonArgs::event_opt())
            .arg(
                arg!(--interval <SECONDS> "Also re-read the event every SECONDS seconds")
                    .value_parser(value_parser!(u64).range(1..)),
            )
            .arg(CommonArgs::output_format())
    }

    pub fn from(matches: &ArgMatches) -> Self {
        Self {
            event: CommonArgs::get_event_opt(matches),
            interval: matches
                .get_one::<u64>("interval")
                .map(|s| Duration::from_secs(*s)),
            output_format: CommonArgs::get_output_format(matches),
        }
    }

    pub async fn run(self, gala: &Gala, config: &Config) -> Result<(), Box<dyn Error>> {
        tracing::debug!(?self, "watching event...");
        let Some(event) = resolve_event(gala, config, self.event.clone()).await? else {
            println!("{}", "No events yet, create one with `gala event new`".italic());
            return Ok(());
        };

        let sync = gala.sync();
        let shutdown = async {
            if let Err(e) = tokio::signal::ctrl_c().await {
                tracing::warn!(error = %e, "cannot listen for Ctrl-C");
            }
        };
        let result = self.follow(&sync, &event.id, shutdown).await;
        sync.close();
        result
    }

    /// Renders every committed state of the event until `shutdown` completes.
    async fn follow(
        &self,
        sync: &EventSync,
        event_id: &Id,
        shutdown: impl Future<Output = ()>,
    ) -> Result<(), Box<dyn Error>> {
        let mut rx = sync.watch();
        if let Err(e) = sync.set_event_id(Some(event_id.clone())).await {
            tracing::warn!(event = %event_id, error = %e, "initial load failed");
        }

        let mut ticker = self.interval.map(|p| interval_at(Instant::now() + p, p));
        tokio::pin!(shutdown);
        loop {
            tokio::select! {
                changed = rx.changed() => {
                    if changed.is_err() {
                        break;
                    }
                    let state = rx.borrow_and_update().clone();
                    self.render(&state)?;
                }
                () = tick(&mut ticker) => {
                    tracing::debug!(event = %event_id, "polling event...");
                    if let Err(e) = sync.refresh().await {
                        tracing::warn!(event = %event_id, error = %e, "refresh failed");
                    }
                }
                () = &mut shutdown => break,
            }
        }
        Ok(())
    }

    fn render(&self, state: &SyncState) -> Result<(), Box<dyn Error>> {
        match self.output_format {
            OutputFormat::Json => println!("{}", serde_json::to_string(state)?),
            OutputFormat::Table => {
                let mut out = stdout().lock();
                if out.is_terminal() {
                    // clear screen, cursor home
                    write!(out, "\x1b[2J\x1b[H")?;
                }
                let analytics = EventAnalytics::compute(&state.data);
                write!(out, "{}", Dashboard::new(&state.data, &analytics, today()))?;
                if let Some(error) = &state.error {
                    writeln!(out)?;
                    writeln!(out, "{} {error}", "Error:".red())?;
                }
                out.flush()?;
            }
        }
        Ok(())
    }
}

/// Waits for the next poll, or forever without one.
async fn tick(ticker: &mut Option<Interval>) {
    match ticker {
        Some(ticker) => {
            ticker.tick().await;
        }
        None => std::future::pending().await,
    }
}
