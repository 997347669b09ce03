//! Runtime configuration for the `duke` binary.
//!
//! # Responsibility
//! - Resolve database path, log directory and log level from flags/env with
//!   platform defaults.
//!
//! # Invariants
//! - Resolved paths are absolute.

use anyhow::{Context, Result};
use std::path::{Path, PathBuf};

const APP_DIR_NAME: &str = "duke";
const FALLBACK_DIR_NAME: &str = ".duke";
const DB_FILE_NAME: &str = "duke.sqlite3";
const LOG_DIR_NAME: &str = "logs";

/// Fully resolved settings for one CLI invocation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    pub db_path: PathBuf,
    pub log_dir: PathBuf,
    pub log_level: String,
}

impl AppConfig {
    /// Resolves settings; explicit values win over defaults.
    pub fn resolve(
        db_path: Option<PathBuf>,
        log_dir: Option<PathBuf>,
        log_level: Option<String>,
    ) -> Result<Self> {
        let cwd = std::env::current_dir().context("failed to read current directory")?;
        let base_dir = default_base_dir(dirs::data_dir(), &cwd);

        Ok(Self {
            db_path: absolutize(db_path.unwrap_or_else(|| base_dir.join(DB_FILE_NAME)), &cwd),
            log_dir: absolutize(log_dir.unwrap_or_else(|| base_dir.join(LOG_DIR_NAME)), &cwd),
            log_level: log_level
                .unwrap_or_else(|| duke_core::default_log_level().to_string()),
        })
    }
}

fn default_base_dir(data_dir: Option<PathBuf>, cwd: &Path) -> PathBuf {
    match data_dir {
        Some(dir) => dir.join(APP_DIR_NAME),
        None => cwd.join(FALLBACK_DIR_NAME),
    }
}

fn absolutize(path: PathBuf, cwd: &Path) -> PathBuf {
    if path.is_absolute() {
        path
    } else {
        cwd.join(path)
    }
}
