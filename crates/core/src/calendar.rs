// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Planning periods, holidays, and the working-hours calculator.
//!
//! Available hours for a month are derived from the number of Monday–Friday
//! days in that calendar month minus the holidays recorded for it, at a fixed
//! [`HOURS_PER_DAY`]. A missing month yields zero hours so that displays
//! degrade to showing nothing rather than failing.

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};

/// Working hours in one business day.
pub const HOURS_PER_DAY: u32 = 8;

/// A named, dated planning period used as the aggregation bucket for allocations.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AllocationMonth {
    pub id: i64,
    /// Display name (e.g. "November 2025").
    pub name: String,
    /// First day of the month.
    pub month: NaiveDate,
    pub is_active: bool,
}

impl AllocationMonth {
    /// Creates an active month named after its date.
    ///
    /// The date is normalized to the first of its month.
    pub fn new(id: i64, month: NaiveDate) -> Self {
        let month = first_of_month(month);
        AllocationMonth {
            id,
            name: month_display_name(month),
            month,
            is_active: true,
        }
    }

    /// Returns true if `date` falls inside this month.
    pub fn contains(&self, date: NaiveDate) -> bool {
        date.year() == self.month.year() && date.month() == self.month.month()
    }
}

/// A non-working calendar date.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Holiday {
    pub id: i64,
    pub name: String,
    pub date: NaiveDate,
}

/// Returns the first day of the month containing `date`.
pub fn first_of_month(date: NaiveDate) -> NaiveDate {
    NaiveDate::from_ymd_opt(date.year(), date.month(), 1).unwrap_or(date)
}

/// Returns the display name for a month, e.g. "November 2025".
pub fn month_display_name(date: NaiveDate) -> String {
    date.format("%B %Y").to_string()
}

/// Number of calendar days in the given month, or 0 for an invalid month.
pub fn days_in_month(year: i32, month: u32) -> u32 {
    let (next_year, next_month) = if month == 12 {
        (year + 1, 1)
    } else {
        (year, month + 1)
    };
    NaiveDate::from_ymd_opt(next_year, next_month, 1)
        .filter(|_| (1..=12).contains(&month))
        .and_then(|d| d.pred_opt())
        .map(|d| d.day())
        .unwrap_or(0)
}

/// Counts the Monday–Friday days in the given month.
pub fn work_days_in_month(year: i32, month: u32) -> u32 {
    let count = (1..=days_in_month(year, month))
        .filter_map(|day| NaiveDate::from_ymd_opt(year, month, day))
        .filter(|date| date.weekday().number_from_monday() <= 5)
        .count();
    u32::try_from(count).unwrap_or(u32::MAX)
}

/// Returns the holidays that fall in the same year and month as `month`.
pub fn holidays_in_month<'a>(month: NaiveDate, holidays: &'a [Holiday]) -> Vec<&'a Holiday> {
    holidays
        .iter()
        .filter(|h| h.date.year() == month.year() && h.date.month() == month.month())
        .collect()
}

/// Working hours available to one full-time person in `month`.
///
/// Every holiday in the month is subtracted, whatever its weekday. If the
/// holidays outnumber the work days the result is clamped at zero.
pub fn available_hours(month: Option<&AllocationMonth>, holidays: &[Holiday]) -> u32 {
    let Some(month) = month else {
        return 0;
    };
    let date = month.month;
    let work_days = work_days_in_month(date.year(), date.month());
    let holiday_count =
        u32::try_from(holidays_in_month(date, holidays).len()).unwrap_or(u32::MAX);

    if holiday_count > work_days {
        tracing::warn!(
            month = %month.name,
            work_days,
            holiday_count,
            "more holidays than work days, clamping available hours to zero"
        );
    }

    work_days.saturating_sub(holiday_count) * HOURS_PER_DAY
}

/// Combined hours for a team of `headcount` people.
pub fn team_hours(available_hours: u32, headcount: usize) -> f64 {
    f64::from(available_hours) * headcount as f64
}

/// Parses a calendar date in `YYYY-MM-DD` form.
pub fn parse_date(value: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(value.trim(), "%Y-%m-%d").ok()
}

/// Parses a month reference into the first day of that month.
///
/// Accepts `YYYY-MM`, `YYYY-MM-DD`, or an English month name with year
/// (`November 2025`, `Nov 2025`). Returns `None` for anything else.
pub fn parse_month(value: &str) -> Option<NaiveDate> {
    let value = value.trim();
    if value.is_empty() {
        return None;
    }
    if let Some(date) = parse_date(value) {
        return Some(first_of_month(date));
    }
    if let Ok(date) = NaiveDate::parse_from_str(&format!("{value}-01"), "%Y-%m-%d") {
        return Some(date);
    }
    NaiveDate::parse_from_str(&format!("01 {value}"), "%d %B %Y").ok()
}

/// Picks the month to show when none is requested.
///
/// Prefers the active month containing `today`, then the earliest active
/// month.
pub fn select_default_month(months: &[AllocationMonth], today: NaiveDate) -> Option<&AllocationMonth> {
    let mut active: Vec<&AllocationMonth> = months.iter().filter(|m| m.is_active).collect();
    active.sort_by_key(|m| m.month);
    active
        .iter()
        .find(|m| m.contains(today))
        .or_else(|| active.first())
        .copied()
}

#[cfg(test)]
#[path = "calendar_tests.rs"]
mod tests;
