// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Project-scope filter: which projects are active in a given month.
//!
//! Rules, evaluated in order against the first day of the selected month:
//!
//! 1. A project with an actual completion date is out of scope.
//! 2. With a target date, it is in scope iff the target is on or after the
//!    first day of the month.
//! 3. With only a start date, it is in scope iff the start is on or before
//!    the first day of the month.
//! 4. With neither date it is out of scope.

use chrono::NaiveDate;
use serde::Serialize;
use std::fmt;

use crate::calendar::{first_of_month, AllocationMonth};
use crate::roster::Project;

/// Why a project was kept or dropped for a month.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ScopeReason {
    /// Completed projects never appear.
    Completed,
    /// Target date is on or after the month start.
    TargetAhead,
    /// Target date passed before the month started.
    TargetPassed,
    /// No target date; started on or before the month start.
    Started,
    /// No target date; starts after the month start.
    NotStarted,
    /// Neither a start nor a target date.
    Undated,
}

impl ScopeReason {
    /// Returns true if the project is in scope for the month.
    pub fn is_in_scope(&self) -> bool {
        matches!(self, ScopeReason::TargetAhead | ScopeReason::Started)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ScopeReason::Completed => "completed",
            ScopeReason::TargetAhead => "target ahead",
            ScopeReason::TargetPassed => "target passed",
            ScopeReason::Started => "started",
            ScopeReason::NotStarted => "not started",
            ScopeReason::Undated => "undated",
        }
    }
}

impl fmt::Display for ScopeReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Classifies a project against the month starting at `month_start`.
pub fn classify(project: &Project, month_start: NaiveDate) -> ScopeReason {
    let month_start = first_of_month(month_start);
    if project.is_completed() {
        return ScopeReason::Completed;
    }
    match (project.target_date, project.start_date) {
        (Some(target), _) if target >= month_start => ScopeReason::TargetAhead,
        (Some(_), _) => ScopeReason::TargetPassed,
        (None, Some(start)) if start <= month_start => ScopeReason::Started,
        (None, Some(_)) => ScopeReason::NotStarted,
        (None, None) => ScopeReason::Undated,
    }
}

/// Returns true if `project` is active during `month`.
pub fn is_in_scope(project: &Project, month: &AllocationMonth) -> bool {
    classify(project, month.month).is_in_scope()
}

/// Filters `projects` down to those active in `month`, preserving order.
///
/// With no month selected every project passes.
pub fn projects_in_scope<'a>(
    projects: &'a [Project],
    month: Option<&AllocationMonth>,
) -> Vec<&'a Project> {
    match month {
        None => projects.iter().collect(),
        Some(month) => projects
            .iter()
            .filter(|p| is_in_scope(p, month))
            .collect(),
    }
}

#[cfg(test)]
#[path = "scope_tests.rs"]
mod tests;
