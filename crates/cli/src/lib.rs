// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! rplan - A monthly resource allocation planner library.
//!
//! This crate provides the `resplan` CLI on top of [`rp_core`], which holds
//! the allocation engine and its SQLite store.
//!
//! # Main Components
//!
//! - [`Cli`] / [`Command`] - clap definitions for every subcommand
//! - [`Config`] - Plan configuration (workspace location, default rate)
//! - [`Error`] - Error types for all operations
//!
//! # Initialization
//!
//! ```rust,ignore
//! use rplan::{find_work_dir, get_db_path, init_work_dir, Config};
//! use rp_core::Database;
//!
//! let work_dir = init_work_dir(Path::new("."), None)?;
//! let config = Config::load(&work_dir)?;
//! let db = Database::open(&get_db_path(&work_dir, &config))?;
//! ```

mod cli;
pub mod colors;
mod commands;
mod display;
pub mod help;

pub mod config;
pub mod error;

pub use cli::{
    AllocCommand, Cli, Command, DeptCommand, EstimateCommand, ExpertiseCommand, HolidayCommand,
    MonthArgs, MonthCommand, OutputArgs, OutputFormat, PersonCommand, ProjectCommand,
    WeeklyCommand,
};
pub use config::{find_work_dir, get_db_path, init_work_dir, Config};
pub use error::{Error, Result};

/// Run a parsed command.
pub fn run(command: Command) -> Result<()> {
    match command {
        Command::Init { path, workspace } => commands::init::run(path, workspace),
        Command::Expertise { command } => commands::roster::run_expertise(command),
        Command::Person { command } => commands::roster::run_person(command),
        Command::Dept { command } => commands::roster::run_dept(command),
        Command::Project { command } => commands::project::run(command),
        Command::Month { command } => commands::calendar::run_month(command),
        Command::Holiday { command } => commands::calendar::run_holiday(command),
        Command::Hours { month } => commands::calendar::run_hours(month.month),
        Command::Alloc { command } => commands::alloc::run(command),
        Command::Report { month, output } => commands::report::run(month.month, output.output),
        Command::Estimate { command } => commands::estimate::run(command),
        Command::Weekly { command } => commands::weekly::run(command),
    }
}

#[cfg(test)]
#[path = "lib_tests.rs"]
mod tests;
