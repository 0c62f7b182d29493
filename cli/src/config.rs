// SPDX-FileCopyrightText: 2026 Gala Developers
//
// SPDX-License-Identifier: Apache-2.0

use std::{error::Error, path::PathBuf, str::FromStr};

use tokio::fs;

use gala_core::{APP_NAME, Config as CoreConfig};

const GALA_CONFIG_ENV: &str = "GALA_CONFIG";
const GALA_DEV_ENV: &str = "GALA_DEV";

const GALA_DEV_VALID_TRUE: &[&str] = &["1", "true", "yes"];
const GALA_DEV_VALID_FALSE: &[&str] = &["0", "false", "no"];

#[tracing::instrument]
pub async fn parse_config(path: Option<PathBuf>) -> Result<(CoreConfig, Config), Box<dyn Error>> {
    let path = if let Some(path) = path {
        path
    } else if let Ok(env_path) = std::env::var(GALA_CONFIG_ENV) {
        PathBuf::from(env_path)
    } else {
        if let Some(true) = is_dev_mode() {
            return Err(format!(
                "Development environment detected ({GALA_DEV_ENV} is set): config must be explicitly specified via --config or {GALA_CONFIG_ENV} environment variable",
            ).into());
        }
        let config = get_config_dir()?.join(format!("{APP_NAME}/config.toml"));
        if !config.exists() {
            return Err(format!("No config found at: {}", config.display()).into());
        }
        config
    };

    fs::read_to_string(&path)
        .await
        .map_err(|e| format!("Failed to read config file at {}: {}", path.display(), e))?
        .parse::<ConfigRaw>()
        .map(|a| (a.core, a.cli))
}

/// Command-line settings, read from the `[cli]` table.
#[derive(Debug, Clone, Default, serde::Deserialize)]
pub struct Config {
    /// Event shown by `dashboard` and `watch` when none is given.
    #[serde(default)]
    pub event: Option<String>,
}

#[derive(Debug, serde::Deserialize)]
struct ConfigRaw {
    core: CoreConfig,

    #[serde(default)]
    cli: Config,
}

impl FromStr for ConfigRaw {
    type Err = Box<dyn Error>;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(toml::from_str(s)?)
    }
}

fn get_config_dir() -> Result<PathBuf, Box<dyn Error>> {
    #[cfg(unix)]
    let config_dir = xdg::BaseDirectories::new().get_config_home();
    #[cfg(windows)]
    let config_dir = dirs::config_dir();
    config_dir.ok_or_else(|| "User-specific home directory not found".into())
}

fn is_dev_mode() -> Option<bool> {
    let val = std::env::var(GALA_DEV_ENV).ok()?;
    let lower = val.to_lowercase();
    if GALA_DEV_VALID_TRUE.contains(&lower.as_str()) {
        Some(true)
    } else if GALA_DEV_VALID_FALSE.contains(&lower.as_str()) {
        Some(false)
    } else {
        tracing::warn!(
            "Unrecognized value for {}: '{}'. Expected one of: true: {}, false: {}. Treating as unset.",
            GALA_DEV_ENV,
            val,
            GALA_DEV_VALID_TRUE.join(", "),
            GALA_DEV_VALID_FALSE.join(", "),
        );
        None
    }
}
