// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Plan configuration management.
//!
//! Configuration is stored in `.resplan/config.toml` and includes:
//! - `workspace`: Optional path to store the database in a different location
//! - `default_rate`: Blended hourly rate for new estimates

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use crate::error::{Error, Result};
use rp_core::estimate::DEFAULT_BLENDED_RATE;

const WORK_DIR_NAME: &str = ".resplan";
const CONFIG_FILE_NAME: &str = "config.toml";
const DB_FILE_NAME: &str = "resplan.db";
const GITIGNORE_FILE_NAME: &str = ".gitignore";

/// Plan configuration stored in `.resplan/config.toml`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Optional path for the database (relative to project root or absolute).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub workspace: Option<String>,
    /// Blended hourly rate given to estimates created without `--rate`.
    #[serde(default = "default_rate")]
    pub default_rate: f64,
}

fn default_rate() -> f64 {
    DEFAULT_BLENDED_RATE
}

impl Default for Config {
    fn default() -> Self {
        Config {
            workspace: None,
            default_rate: DEFAULT_BLENDED_RATE,
        }
    }
}

impl Config {
    /// Creates a config whose database lives in `workspace`.
    pub fn with_workspace(workspace: String) -> Self {
        Config {
            workspace: Some(workspace),
            ..Config::default()
        }
    }

    /// Loads configuration from the given `.resplan/` directory.
    pub fn load(work_dir: &Path) -> Result<Self> {
        let config_path = work_dir.join(CONFIG_FILE_NAME);
        let content = fs::read_to_string(&config_path)
            .map_err(|e| Error::Config(format!("failed to read config: {}", e)))?;
        let config: Config = toml::from_str(&content)
            .map_err(|e| Error::Config(format!("failed to parse config: {}", e)))?;
        if !config.default_rate.is_finite() || config.default_rate < 0.0 {
            return Err(Error::Config(format!(
                "default_rate must be a non-negative number, got {}",
                config.default_rate
            )));
        }
        Ok(config)
    }

    /// Saves configuration to the given `.resplan/` directory.
    pub fn save(&self, work_dir: &Path) -> Result<()> {
        let config_path = work_dir.join(CONFIG_FILE_NAME);
        let content = toml::to_string_pretty(self)
            .map_err(|e| Error::Config(format!("failed to serialize config: {}", e)))?;
        fs::write(&config_path, content)?;
        Ok(())
    }
}

/// Find the .resplan directory by walking up from the current directory
pub fn find_work_dir() -> Result<PathBuf> {
    let mut current = std::env::current_dir()?;
    loop {
        let work_dir = current.join(WORK_DIR_NAME);
        if work_dir.is_dir() {
            return Ok(work_dir);
        }
        if !current.pop() {
            return Err(Error::NotInitialized);
        }
    }
}

/// Get the database path from config
pub fn get_db_path(work_dir: &Path, config: &Config) -> PathBuf {
    match &config.workspace {
        Some(workspace) => {
            let workspace_path = Path::new(workspace);
            if workspace_path.is_absolute() {
                workspace_path.join(DB_FILE_NAME)
            } else {
                // Relative to the project root
                work_dir
                    .parent()
                    .unwrap_or(work_dir)
                    .join(workspace)
                    .join(DB_FILE_NAME)
            }
        }
        None => work_dir.join(DB_FILE_NAME),
    }
}

/// Initialize a new .resplan directory at the given path.
///
/// When `workspace` is given it must already exist; the database is kept
/// there instead of inside `.resplan/`.
pub fn init_work_dir(path: &Path, workspace: Option<&str>) -> Result<PathBuf> {
    let work_dir = path.join(WORK_DIR_NAME);

    if work_dir.exists() {
        return Err(Error::AlreadyInitialized(work_dir.display().to_string()));
    }

    let config = match workspace {
        Some(ws) => {
            let ws_path = Path::new(ws);
            let resolved = if ws_path.is_absolute() {
                ws_path.to_path_buf()
            } else {
                path.join(ws)
            };
            if !resolved.is_dir() {
                return Err(Error::WorkspaceNotFound(ws.to_string()));
            }
            Config::with_workspace(ws.to_string())
        }
        None => Config::default(),
    };

    fs::create_dir_all(&work_dir)?;
    config.save(&work_dir)?;

    Ok(work_dir)
}

/// Write a .gitignore file to the work directory that keeps the database out of git.
pub fn write_gitignore(work_dir: &Path) -> Result<()> {
    let gitignore_path = work_dir.join(GITIGNORE_FILE_NAME);
    fs::write(
        &gitignore_path,
        "# Database\nresplan.db\nresplan.db-wal\nresplan.db-shm\n",
    )?;
    Ok(())
}

#[cfg(test)]
#[path = "config_tests.rs"]
mod tests;
