// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Shared argument structs for CLI commands.
//!
//! These structs are used with `#[command(flatten)]` by commands that work
//! on a selected month or support structured output.

use clap::Args;

use super::OutputFormat;

/// Month selection.
#[derive(Args, Clone, Debug, Default)]
pub struct MonthArgs {
    /// Month id, YYYY-MM, or name (default: current or first active month)
    #[arg(long, short)]
    pub month: Option<String>,
}

/// Output format selection.
#[derive(Args, Clone, Debug, Default)]
pub struct OutputArgs {
    /// Output format (text, json)
    #[arg(long = "output", short = 'o', value_enum, default_value = "text")]
    pub output: OutputFormat,
}
