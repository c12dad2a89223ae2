// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

pub mod alloc;
pub mod calendar;
pub mod estimate;
pub mod init;
pub mod project;
pub mod report;
pub mod roster;
pub mod weekly;
#[cfg(test)]
#[path = "mod_tests.rs"]
pub mod testing;

use std::path::PathBuf;

use chrono::NaiveDate;
use rp_core::calendar::{parse_month, select_default_month};
use rp_core::{AllocationMonth, Database};

use crate::config::{find_work_dir, get_db_path, Config};
use crate::error::{Error, Result};

/// Helper to open the database from the current context.
pub fn open_db() -> Result<(Database, Config, PathBuf)> {
    let work_dir = find_work_dir()?;
    let config = Config::load(&work_dir)?;
    let db_path = get_db_path(&work_dir, &config);
    let db = Database::open(&db_path)?;
    Ok((db, config, work_dir))
}

/// Today's date in local time.
pub fn today() -> NaiveDate {
    chrono::Local::now().date_naive()
}

/// Resolve a `--month` argument, or pick the default month when absent.
///
/// A month reference may be a month id, a `YYYY-MM` date, or a month's name.
/// Without a reference the active month containing `today` wins, then the
/// earliest active month. Returns `None` only when no active month exists.
pub fn resolve_month(
    db: &Database,
    reference: Option<&str>,
    today: NaiveDate,
) -> Result<Option<AllocationMonth>> {
    let Some(reference) = reference else {
        let months = db.list_months(true)?;
        return Ok(select_default_month(&months, today).cloned());
    };

    if let Ok(id) = reference.trim().parse::<i64>() {
        return Ok(Some(db.get_month(id)?));
    }

    let months = db.list_months(false)?;
    if let Some(month) = months
        .iter()
        .find(|m| m.name.eq_ignore_ascii_case(reference.trim()))
    {
        return Ok(Some(month.clone()));
    }

    match parse_month(reference) {
        Some(date) => match db.find_month_by_date(date)? {
            Some(month) => Ok(Some(month)),
            None => Err(Error::InvalidArguments(format!(
                "no planning month for {}\n  hint: add it with 'resplan month add {}'",
                date.format("%Y-%m"),
                date.format("%Y-%m")
            ))),
        },
        None => Err(rp_core::Error::InvalidMonth(reference.to_string()).into()),
    }
}

/// Like [`resolve_month`], but fails when no month can be selected.
pub fn require_month(
    db: &Database,
    reference: Option<&str>,
    today: NaiveDate,
) -> Result<AllocationMonth> {
    resolve_month(db, reference, today)?.ok_or(Error::NoMonthSelected)
}
