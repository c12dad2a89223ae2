// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Weekly project status reports.
//!
//! Each project has at most one report per week, keyed by the Monday that
//! starts the week. Any date inside the week addresses the same report.

use chrono::{DateTime, Datelike, Duration, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

/// A project's status write-up for one week.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeeklyReport {
    pub id: i64,
    pub project_id: i64,
    /// Monday of the reported week.
    pub week_starting: NaiveDate,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub accomplishments: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub challenges: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub goals: Option<String>,
    pub updated_at: DateTime<Utc>,
}

/// Sections to write into a weekly report.
///
/// `None` leaves the stored section as it is; on a new report it stays empty.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct WeeklyReportUpdate {
    pub accomplishments: Option<String>,
    pub challenges: Option<String>,
    pub goals: Option<String>,
}

impl WeeklyReportUpdate {
    /// Returns true if no section is being written.
    pub fn is_empty(&self) -> bool {
        self.accomplishments.is_none() && self.challenges.is_none() && self.goals.is_none()
    }
}

/// The Monday on or before `date`.
pub fn week_starting(date: NaiveDate) -> NaiveDate {
    date - Duration::days(i64::from(date.weekday().num_days_from_monday()))
}

#[cfg(test)]
#[path = "weekly_tests.rs"]
mod tests;
