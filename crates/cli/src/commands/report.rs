// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

use chrono::NaiveDate;
use rp_core::{Database, MonthReport};

use super::{open_db, resolve_month, today};
use crate::cli::OutputFormat;
use crate::display::format_report;
use crate::error::Result;

pub fn run(month: Option<String>, format: OutputFormat) -> Result<()> {
    let (db, _, _) = open_db()?;
    println!("{}", run_impl(&db, month.as_deref(), format, today())?);
    Ok(())
}

/// Build and render the report. With no month available every project is
/// listed and hours are zero.
pub(crate) fn run_impl(
    db: &Database,
    month: Option<&str>,
    format: OutputFormat,
    today: NaiveDate,
) -> Result<String> {
    let month = resolve_month(db, month, today)?;
    let snapshot = db.snapshot(month)?;
    let report = MonthReport::build(&snapshot);

    match format {
        OutputFormat::Text => Ok(format_report(&report)),
        OutputFormat::Json => Ok(serde_json::to_string_pretty(&report)?),
    }
}

#[cfg(test)]
#[path = "report_tests.rs"]
mod tests;
