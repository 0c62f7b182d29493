// SPDX-FileCopyrightText: 2026 Gala Developers
//
// SPDX-License-Identifier: Apache-2.0

use std::path::{Path, PathBuf};

use gala_postgrest::PostgrestConfig;

use crate::error::{Error, Result};

/// The name of the Gala application.
pub const APP_NAME: &str = "gala";

/// Where records are kept.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StoreKind {
    /// In-process maps, lost on exit.
    Memory,
    /// A SQLite database in the state directory.
    #[default]
    Sqlite,
    /// A hosted `PostgREST` server.
    Postgrest,
}

/// Configuration for the Gala application.
#[derive(Debug, Clone, Default, serde::Deserialize)]
pub struct Config {
    /// Where records are kept.
    #[serde(default)]
    pub store: StoreKind,

    /// Directory for storing application state, such as the SQLite database.
    #[serde(default)]
    pub state_dir: Option<PathBuf>,

    /// Id of the signed-in user for the local stores.
    #[serde(default)]
    pub user: Option<String>,

    /// Server settings, required by the `postgrest` store.
    #[serde(default)]
    pub postgrest: Option<PostgrestConfig>,
}

impl Config {
    /// Normalize the configuration.
    pub fn normalize(&mut self) -> Result<()> {
        match &self.state_dir {
            Some(a) => {
                self.state_dir = Some(expand_path(a).map_err(|e| {
                    Error::Config(format!("Failed to expand state directory path: {e}"))
                })?);
            }

            None => match get_state_dir() {
                Ok(a) => self.state_dir = Some(a.join(APP_NAME)),
                Err(e) => tracing::warn!(err = %e, "failed to get state directory"),
            },
        }

        if self.store == StoreKind::Postgrest && self.postgrest.is_none() {
            return Err(Error::Config(
                "store \"postgrest\" requires a [core.postgrest] table".to_string(),
            ));
        }

        if self.user.as_deref().is_some_and(str::is_empty) {
            self.user = None;
        }

        Ok(())
    }
}

/// Handle tilde (~) and environment variables in the path
fn expand_path(path: &Path) -> Result<PathBuf> {
    if path.is_absolute() {
        return Ok(path.to_owned());
    }

    let path = path
        .to_str()
        .ok_or_else(|| Error::Config("Invalid path".to_string()))?;

    // Handle tilde and home directory
    let home_prefixes: &[&str] = if cfg!(unix) {
        &["~/", "$HOME/", "${HOME}/"]
    } else {
        &[r"~\", "~/", r"%UserProfile%\", r"%UserProfile%/"]
    };
    for prefix in home_prefixes {
        if let Some(stripped) = path.strip_prefix(prefix) {
            return Ok(get_home_dir()?.join(stripped));
        }
    }

    // Handle state directories
    let state_prefixes: &[&str] = if cfg!(unix) {
        &["$XDG_STATE_HOME/", "${XDG_STATE_HOME}/"]
    } else {
        &[r"%LOCALAPPDATA%\", "%LOCALAPPDATA%/"]
    };
    for prefix in state_prefixes {
        if let Some(stripped) = path.strip_prefix(prefix) {
            return Ok(get_state_dir()?.join(stripped));
        }
    }

    Ok(path.into())
}

fn get_home_dir() -> Result<PathBuf> {
    dirs::home_dir()
        .ok_or_else(|| Error::Config("User-specific home directory not found".to_string()))
}

fn get_state_dir() -> Result<PathBuf> {
    #[cfg(unix)]
    let state_dir = xdg::BaseDirectories::new().get_state_home();
    #[cfg(windows)]
    let state_dir = dirs::data_local_dir();
    state_dir.ok_or_else(|| Error::Config("User-specific state directory not found".to_string()))
}
