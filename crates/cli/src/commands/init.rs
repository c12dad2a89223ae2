// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

use std::path::PathBuf;

use rp_core::Database;

use crate::config::{get_db_path, init_work_dir, write_gitignore, Config};
use crate::error::Result;

pub fn run(path: Option<String>, workspace: Option<String>) -> Result<()> {
    let target_path = match path {
        Some(p) => PathBuf::from(p),
        None => std::env::current_dir()?,
    };

    let work_dir = init_work_dir(&target_path, workspace.as_deref())?;
    let config = Config::load(&work_dir)?;
    let db_path = get_db_path(&work_dir, &config);
    Database::open(&db_path)?;
    write_gitignore(&work_dir)?;

    tracing::info!(work_dir = %work_dir.display(), "initialized plan");
    println!("Initialized resource plan at {}", work_dir.display());
    if let Some(ws) = workspace {
        println!("Workspace: {}", ws);
    }
    Ok(())
}

#[cfg(test)]
#[path = "init_tests.rs"]
mod tests;
