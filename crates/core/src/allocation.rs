// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Allocations, their aggregation, and the upsert protocol.
//!
//! An [`Allocation`] commits a percentage of one person's time to one project
//! in one month. The (person, project, month) triple is a merge key: writing
//! to it replaces the previous percentage, and writing zero removes the
//! record. [`AllocationSet`] answers the per-month aggregation queries and
//! doubles as an in-memory [`AllocationStore`].

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

use crate::calendar::AllocationMonth;
use crate::error::{Error, Result};

/// A percentage of one person's time committed to one project in one month.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Allocation {
    pub id: i64,
    pub person_id: i64,
    pub project_id: i64,
    pub month_id: i64,
    pub percentage: f64,
}

/// A request to set the allocation for a (person, project, month) key.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AllocationUpsert {
    pub person_id: i64,
    pub project_id: i64,
    pub month_id: i64,
    pub percentage: f64,
}

impl AllocationUpsert {
    pub fn new(person_id: i64, project_id: i64, month_id: i64, percentage: f64) -> Self {
        AllocationUpsert {
            person_id,
            project_id,
            month_id,
            percentage,
        }
    }

    /// Rejects percentages outside `0..=100` and non-finite values.
    pub fn validate(&self) -> Result<()> {
        if !self.percentage.is_finite() || !(0.0..=100.0).contains(&self.percentage) {
            return Err(Error::InvalidPercentage(self.percentage));
        }
        Ok(())
    }

    /// Returns true if this request removes the allocation.
    pub fn is_removal(&self) -> bool {
        self.percentage == 0.0
    }
}

/// What an upsert did to the stored record.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "snake_case", tag = "outcome")]
pub enum UpsertOutcome {
    /// No record existed; one was created.
    Created,
    /// An existing record was overwritten.
    Updated { previous: f64 },
    /// A zero percentage removed an existing record.
    Removed { previous: f64 },
    /// A zero percentage was written to a key with no record.
    Unchanged,
}

impl fmt::Display for UpsertOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            UpsertOutcome::Created => write!(f, "created"),
            UpsertOutcome::Updated { previous } => write!(f, "updated (was {previous}%)"),
            UpsertOutcome::Removed { previous } => write!(f, "removed (was {previous}%)"),
            UpsertOutcome::Unchanged => write!(f, "unchanged"),
        }
    }
}

/// Something that can apply allocation upserts.
///
/// Writes are last-write-wins per key with no version check. Each call
/// either applies completely or fails without effect.
pub trait AllocationStore {
    fn upsert_allocation(&mut self, request: &AllocationUpsert) -> Result<UpsertOutcome>;
}

/// Result of applying several upserts one after another.
#[derive(Debug, Default)]
pub struct BatchOutcome {
    pub applied: Vec<(AllocationUpsert, UpsertOutcome)>,
    pub failed: Vec<(AllocationUpsert, Error)>,
}

impl BatchOutcome {
    pub fn is_complete(&self) -> bool {
        self.failed.is_empty()
    }
}

/// Applies `requests` in order.
///
/// There is no transaction spanning the batch: requests that succeed stay
/// applied even when a later one fails.
pub fn apply_batch<S>(store: &mut S, requests: &[AllocationUpsert]) -> BatchOutcome
where
    S: AllocationStore + ?Sized,
{
    let mut outcome = BatchOutcome::default();
    for request in requests {
        match store.upsert_allocation(request) {
            Ok(result) => outcome.applied.push((*request, result)),
            Err(e) => {
                tracing::debug!(?request, error = %e, "allocation upsert failed");
                outcome.failed.push((*request, e));
            }
        }
    }
    outcome
}

/// Classification of a person's total allocation for a month.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AllocationStatus {
    /// Total below 100%.
    Under,
    /// Total exactly 100%.
    Full,
    /// Total above 100%.
    Over,
}

impl AllocationStatus {
    /// Classifies a percentage total. Exactly 100 is its own class.
    pub fn classify(total: f64) -> Self {
        if total > 100.0 {
            AllocationStatus::Over
        } else if total == 100.0 {
            AllocationStatus::Full
        } else {
            AllocationStatus::Under
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            AllocationStatus::Under => "under-allocated",
            AllocationStatus::Full => "fully allocated",
            AllocationStatus::Over => "over-allocated",
        }
    }
}

impl fmt::Display for AllocationStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Converts a percentage of one person's month into hours.
pub fn percentage_to_hours(percentage: f64, available_hours: u32) -> f64 {
    percentage / 100.0 * f64::from(available_hours)
}

/// The allocations of a single month, keyed by (person, project).
#[derive(Debug, Clone)]
pub struct AllocationSet {
    month_id: i64,
    entries: BTreeMap<(i64, i64), Allocation>,
    next_id: i64,
}

impl AllocationSet {
    /// Creates an empty set for `month_id`.
    pub fn empty(month_id: i64) -> Self {
        AllocationSet {
            month_id,
            entries: BTreeMap::new(),
            next_id: 1,
        }
    }

    /// Builds a set from stored allocations of `month_id`.
    ///
    /// A later record for the same key replaces an earlier one. Records for
    /// other months are rejected.
    pub fn new(month_id: i64, allocations: Vec<Allocation>) -> Result<Self> {
        let mut set = AllocationSet::empty(month_id);
        for allocation in allocations {
            if allocation.month_id != month_id {
                return Err(Error::MonthMismatch {
                    expected: month_id,
                    actual: allocation.month_id,
                });
            }
            set.next_id = set.next_id.max(allocation.id.saturating_add(1));
            set.entries
                .insert((allocation.person_id, allocation.project_id), allocation);
        }
        Ok(set)
    }

    pub fn month_id(&self) -> i64 {
        self.month_id
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterates allocations ordered by person, then project.
    pub fn iter(&self) -> impl Iterator<Item = &Allocation> {
        self.entries.values()
    }

    /// Percentage for a (person, project) pair, or 0 when none is stored.
    pub fn allocation_for(&self, person_id: i64, project_id: i64) -> f64 {
        self.entries
            .get(&(person_id, project_id))
            .map(|a| a.percentage)
            .unwrap_or(0.0)
    }

    /// Sum of a person's percentages across all projects this month.
    pub fn total_for(&self, person_id: i64) -> f64 {
        self.entries
            .range((person_id, i64::MIN)..=(person_id, i64::MAX))
            .map(|(_, a)| a.percentage)
            .sum()
    }

    /// Sum of all percentages allocated to a project this month.
    pub fn project_percentage(&self, project_id: i64) -> f64 {
        self.entries
            .values()
            .filter(|a| a.project_id == project_id)
            .map(|a| a.percentage)
            .sum()
    }

    /// Hours allocated to a project this month.
    ///
    /// Percentage points are treated as fungible across people: the summed
    /// percentage is scaled by a single per-person `available_hours`.
    pub fn total_hours_for(&self, project_id: i64, available_hours: u32) -> f64 {
        percentage_to_hours(self.project_percentage(project_id), available_hours)
    }

    /// Hours one person spends on one project this month.
    pub fn hours_for(&self, person_id: i64, project_id: i64, available_hours: u32) -> f64 {
        percentage_to_hours(self.allocation_for(person_id, project_id), available_hours)
    }

    /// Hours a person is allocated across all projects this month.
    pub fn person_hours(&self, person_id: i64, available_hours: u32) -> f64 {
        percentage_to_hours(self.total_for(person_id), available_hours)
    }

    pub fn status_for(&self, person_id: i64) -> AllocationStatus {
        AllocationStatus::classify(self.total_for(person_id))
    }
}

impl AllocationStore for AllocationSet {
    fn upsert_allocation(&mut self, request: &AllocationUpsert) -> Result<UpsertOutcome> {
        request.validate()?;
        if request.month_id != self.month_id {
            return Err(Error::MonthMismatch {
                expected: self.month_id,
                actual: request.month_id,
            });
        }

        let key = (request.person_id, request.project_id);
        if request.is_removal() {
            return Ok(match self.entries.remove(&key) {
                Some(previous) => UpsertOutcome::Removed {
                    previous: previous.percentage,
                },
                None => UpsertOutcome::Unchanged,
            });
        }

        if let Some(existing) = self.entries.get_mut(&key) {
            let previous = existing.percentage;
            existing.percentage = request.percentage;
            return Ok(UpsertOutcome::Updated { previous });
        }

        let id = self.next_id;
        self.next_id = self.next_id.saturating_add(1);
        self.entries.insert(
            key,
            Allocation {
                id,
                person_id: request.person_id,
                project_id: request.project_id,
                month_id: request.month_id,
                percentage: request.percentage,
            },
        );
        Ok(UpsertOutcome::Created)
    }
}

/// A person's total for one month.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MonthlyTotal {
    pub month: AllocationMonth,
    pub total: f64,
    pub status: AllocationStatus,
}

/// Totals one person's allocations per month, ordered by month date.
///
/// Only months with at least one allocation appear. Allocations whose month
/// is not in `months` are skipped.
pub fn monthly_totals(allocations: &[Allocation], months: &[AllocationMonth]) -> Vec<MonthlyTotal> {
    let mut totals: BTreeMap<i64, f64> = BTreeMap::new();
    for allocation in allocations {
        *totals.entry(allocation.month_id).or_insert(0.0) += allocation.percentage;
    }

    let mut result: Vec<MonthlyTotal> = months
        .iter()
        .filter_map(|month| {
            totals.get(&month.id).map(|&total| MonthlyTotal {
                month: month.clone(),
                total,
                status: AllocationStatus::classify(total),
            })
        })
        .collect();
    result.sort_by_key(|t| t.month.month);
    result
}

#[cfg(test)]
#[path = "allocation_tests.rs"]
mod tests;
