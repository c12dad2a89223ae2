// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Organisation types: expertise, people, departments, and projects.

use std::fmt;
use std::str::FromStr;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::error::Error;

/// A single-valued skill or role classification (e.g. "QA", "Data").
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Expertise {
    pub id: i64,
    pub name: String,
}

/// A member of staff who can be allocated to projects.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Person {
    pub id: i64,
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    /// The person's expertise. Every person has exactly one.
    pub expertise_id: i64,
}

/// A unit of work owned by a department.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Project {
    pub id: i64,
    pub name: String,
    pub department_id: i64,
    /// Display order within the department.
    pub sort_order: i64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub start_date: Option<NaiveDate>,
    /// Due date.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub target_date: Option<NaiveDate>,
    /// Set once the project is finished.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub actual_completion_date: Option<NaiveDate>,
    /// Person acting as project manager.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub project_manager_id: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Health as reported by the project manager.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<ProjectStatus>,
}

/// Reported health of a project.
///
/// Informational only: scope is decided by dates, so a `Complete` status
/// without a completion date keeps the project in scope.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ProjectStatus {
    NewRequest,
    Green,
    Yellow,
    Red,
    BusinessHold,
    Complete,
}

impl ProjectStatus {
    pub const ALL: [ProjectStatus; 6] = [
        ProjectStatus::NewRequest,
        ProjectStatus::Green,
        ProjectStatus::Yellow,
        ProjectStatus::Red,
        ProjectStatus::BusinessHold,
        ProjectStatus::Complete,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ProjectStatus::NewRequest => "New Request",
            ProjectStatus::Green => "Green",
            ProjectStatus::Yellow => "Yellow",
            ProjectStatus::Red => "Red",
            ProjectStatus::BusinessHold => "Business Hold",
            ProjectStatus::Complete => "Complete",
        }
    }
}

impl fmt::Display for ProjectStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for ProjectStatus {
    type Err = Error;

    /// Accepts the display label in any case, with spaces, dashes, or
    /// underscores between words ("Business Hold", "business-hold").
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let key: String = s
            .chars()
            .filter(|c| !matches!(c, ' ' | '-' | '_'))
            .flat_map(char::to_lowercase)
            .collect();
        ProjectStatus::ALL
            .into_iter()
            .find(|status| status.as_str().replace(' ', "").to_lowercase() == key)
            .ok_or_else(|| {
                Error::InvalidInput(format!(
                    "invalid project status: '{s}'\n  hint: use one of: new-request, green, yellow, red, business-hold, complete"
                ))
            })
    }
}

impl Project {
    /// Creates a project with no dates and no manager.
    pub fn new(id: i64, name: impl Into<String>, department_id: i64) -> Self {
        Project {
            id,
            name: name.into(),
            department_id,
            sort_order: 0,
            start_date: None,
            target_date: None,
            actual_completion_date: None,
            project_manager_id: None,
            description: None,
            status: None,
        }
    }

    /// Sets the start date (builder pattern).
    pub fn with_start(mut self, date: NaiveDate) -> Self {
        self.start_date = Some(date);
        self
    }

    /// Sets the target date (builder pattern).
    pub fn with_target(mut self, date: NaiveDate) -> Self {
        self.target_date = Some(date);
        self
    }

    /// Sets the actual completion date (builder pattern).
    pub fn with_completion(mut self, date: NaiveDate) -> Self {
        self.actual_completion_date = Some(date);
        self
    }

    /// Returns true once an actual completion date is recorded.
    pub fn is_completed(&self) -> bool {
        self.actual_completion_date.is_some()
    }
}

/// A department and its projects in display order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Department {
    pub id: i64,
    pub name: String,
    pub sort_order: i64,
    #[serde(default)]
    pub projects: Vec<Project>,
}

impl Department {
    /// Creates a department with no projects.
    pub fn new(id: i64, name: impl Into<String>, sort_order: i64) -> Self {
        Department {
            id,
            name: name.into(),
            sort_order,
            projects: Vec::new(),
        }
    }
}

#[cfg(test)]
#[path = "roster_tests.rs"]
mod tests;
