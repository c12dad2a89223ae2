// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Error types for rp-core operations.

use thiserror::Error;

/// All possible errors that can occur in rp-core operations.
#[derive(Debug, Error)]
pub enum Error {
    #[error("person not found: {0}")]
    PersonNotFound(i64),

    #[error("project not found: {0}")]
    ProjectNotFound(i64),

    #[error("allocation month not found: {0}")]
    MonthNotFound(i64),

    #[error("department not found: {0}")]
    DepartmentNotFound(i64),

    #[error("expertise not found: {0}")]
    ExpertiseNotFound(String),

    #[error("no estimate for project {0}\n  hint: create one with 'resplan estimate create {0}'")]
    EstimateNotFound(i64),

    #[error("user story not found: {0}")]
    StoryNotFound(i64),

    #[error("expertise '{name}' is still assigned to {people} people\n  hint: move them to another expertise with 'resplan person edit <id> expertise <name>'")]
    ExpertiseInUse { name: String, people: usize },

    #[error("no weekly report for project {project_id} in the week of {week}")]
    WeeklyReportNotFound { project_id: i64, week: String },

    #[error("holiday not found: {0}")]
    HolidayNotFound(i64),

    #[error("invalid percentage: {0}\n  hint: allocations must be between 0 and 100")]
    InvalidPercentage(f64),

    #[error("invalid date: '{0}'\n  hint: use YYYY-MM-DD")]
    InvalidDate(String),

    #[error("invalid month: '{0}'\n  hint: use YYYY-MM or a name like 'November 2025'")]
    InvalidMonth(String),

    #[error("invalid blended rate: {0}\n  hint: rates must be zero or positive")]
    InvalidRate(f64),

    #[error("invalid hours: {0}\n  hint: hours must be zero or positive")]
    InvalidHours(f64),

    #[error("allocation is for month {actual}, but month {expected} is loaded")]
    MonthMismatch { expected: i64, actual: i64 },

    #[error("{kind} already exists: {name}")]
    Duplicate { kind: &'static str, name: String },

    #[error("{0}")]
    InvalidInput(String),

    #[error("database error: {0}")]
    Database(#[from] rusqlite::Error),

    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("corrupted data: {0}")]
    CorruptedData(String),
}

/// A specialized Result type for rp-core operations.
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
#[path = "error_tests.rs"]
mod tests;
