// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! rp-core: Allocation engine for the resplan resource planner
//!
//! This crate provides the data model, the working-hours calendar, project
//! scope rules, the allocation matrix, estimates, weekly status reports, and
//! the SQLite store used by the resplan CLI.

pub mod allocation;
pub mod calendar;
pub mod db;
pub mod error;
pub mod estimate;
pub mod report;
pub mod roster;
pub mod scope;
pub mod weekly;

pub use allocation::{
    apply_batch, Allocation, AllocationSet, AllocationStatus, AllocationStore, AllocationUpsert,
    BatchOutcome, UpsertOutcome,
};
pub use calendar::{AllocationMonth, Holiday};
pub use db::Database;
pub use error::{Error, Result};
pub use estimate::{Estimate, EstimateItem, MoveDirection, UserStory};
pub use report::{MonthReport, Snapshot};
pub use roster::{Department, Expertise, Person, Project, ProjectStatus};
pub use scope::ScopeReason;
pub use weekly::{WeeklyReport, WeeklyReportUpdate};
