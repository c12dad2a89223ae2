// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Month, holiday, and working-hours commands.

use chrono::{Datelike, NaiveDate};
use rp_core::calendar::{available_hours, holidays_in_month, team_hours, work_days_in_month};
use rp_core::Database;

use super::{open_db, require_month, today};
use crate::cli::{HolidayCommand, MonthCommand};
use crate::display::{format_month_line, format_number};
use crate::error::Result;

pub fn run_month(command: MonthCommand) -> Result<()> {
    let (db, _, _) = open_db()?;
    month_impl(&db, command)
}

pub(crate) fn month_impl(db: &Database, command: MonthCommand) -> Result<()> {
    match command {
        MonthCommand::Add { month, name } => {
            let month = db.create_month(month, name.as_deref())?;
            println!("Added month {}", format_month_line(&month));
        }
        MonthCommand::List { all } => {
            for month in db.list_months(!all)? {
                println!("{}", format_month_line(&month));
            }
        }
        MonthCommand::Activate { id } => {
            db.set_month_active(id, true)?;
            println!("Activated month {}", id);
        }
        MonthCommand::Deactivate { id } => {
            db.set_month_active(id, false)?;
            println!("Deactivated month {}", id);
        }
    }
    Ok(())
}

pub fn run_holiday(command: HolidayCommand) -> Result<()> {
    let (db, _, _) = open_db()?;
    holiday_impl(&db, command)
}

pub(crate) fn holiday_impl(db: &Database, command: HolidayCommand) -> Result<()> {
    match command {
        HolidayCommand::Add { name, date } => {
            let holiday = db.create_holiday(&name, date)?;
            println!("Added holiday [{}] {} {}", holiday.id, holiday.date, holiday.name);
        }
        HolidayCommand::List => {
            for holiday in db.list_holidays()? {
                println!("[{}] {} {}", holiday.id, holiday.date, holiday.name);
            }
        }
        HolidayCommand::Rm { id } => {
            db.delete_holiday(id)?;
            println!("Removed holiday {}", id);
        }
    }
    Ok(())
}

pub fn run_hours(month: Option<String>) -> Result<()> {
    let (db, _, _) = open_db()?;
    println!("{}", hours_impl(&db, month.as_deref(), today())?);
    Ok(())
}

/// Describe the working hours of the selected month.
pub(crate) fn hours_impl(db: &Database, month: Option<&str>, today: NaiveDate) -> Result<String> {
    let month = require_month(db, month, today)?;
    let holidays = db.list_holidays()?;
    let headcount = db.list_people()?.len();

    let work_days = work_days_in_month(month.month.year(), month.month.month());
    let in_month = holidays_in_month(month.month, &holidays);
    let hours = available_hours(Some(&month), &holidays);

    let mut lines = vec![
        month.name.clone(),
        format!("  Work days: {}", work_days),
        format!("  Holidays: {}", in_month.len()),
    ];
    for holiday in &in_month {
        lines.push(format!("    {} {}", holiday.date, holiday.name));
    }
    lines.push(format!("  Available: {}h per person", hours));
    lines.push(format!(
        "  Team: {}h for {} people",
        format_number(team_hours(hours, headcount)),
        headcount
    ));
    Ok(lines.join("\n"))
}

#[cfg(test)]
#[path = "calendar_tests.rs"]
mod tests;
