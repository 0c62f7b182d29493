// SPDX-FileCopyrightText: 2026 Gala Developers
//
// SPDX-License-Identifier: Apache-2.0

//! Temporary directory management for integration tests.

use std::path::PathBuf;

use tempfile::TempDir;
use tokio::fs;

/// Temporary directories used for testing, removed when dropped.
#[derive(Debug)]
pub struct TempDirs {
    _base: TempDir,
    /// State directory for database files.
    pub state_dir: PathBuf,
}

/// Creates a fresh state directory.
///
/// # Errors
///
/// Returns an error if directory creation fails.
pub async fn setup_temp_dirs() -> Result<TempDirs, Box<dyn std::error::Error>> {
    let base = tempfile::tempdir()?;
    let state_dir = base.path().join("state");
    fs::create_dir_all(&state_dir).await?;
    Ok(TempDirs {
        _base: base,
        state_dir,
    })
}
