// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Monthly allocation report.
//!
//! A [`Snapshot`] is everything loaded from the store for one selected month.
//! [`MonthReport::build`] turns it into the figures a display needs: capacity,
//! hours per in-scope project, and per-person totals grouped by expertise.

use chrono::NaiveDate;
use serde::Serialize;
use std::collections::BTreeMap;

use crate::allocation::{AllocationSet, AllocationStatus};
use crate::calendar::{available_hours, team_hours, AllocationMonth, Holiday};
use crate::roster::{Department, Expertise, Person};
use crate::scope::projects_in_scope;

/// Inputs for one month's report, as loaded from the store.
#[derive(Debug, Clone)]
pub struct Snapshot {
    pub month: Option<AllocationMonth>,
    pub departments: Vec<Department>,
    pub expertises: Vec<Expertise>,
    pub people: Vec<Person>,
    pub holidays: Vec<Holiday>,
    pub allocations: AllocationSet,
    /// Estimated total hours keyed by project id, for projects with an estimate.
    pub estimate_hours: BTreeMap<i64, f64>,
}

impl Snapshot {
    /// Working hours per person for the snapshot's month.
    pub fn available_hours(&self) -> u32 {
        available_hours(self.month.as_ref(), &self.holidays)
    }

    pub fn person(&self, id: i64) -> Option<&Person> {
        self.people.iter().find(|p| p.id == id)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProjectReport {
    pub id: i64,
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub project_manager: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub start_date: Option<NaiveDate>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub target_date: Option<NaiveDate>,
    pub allocated_percentage: f64,
    pub allocated_hours: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub estimated_hours: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DepartmentReport {
    pub id: i64,
    pub name: String,
    /// Projects in scope for the month; empty when none are.
    pub projects: Vec<ProjectReport>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PersonReport {
    pub id: i64,
    pub name: String,
    pub total_percentage: f64,
    pub allocated_hours: f64,
    pub status: AllocationStatus,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ExpertiseReport {
    pub id: i64,
    pub name: String,
    pub people: Vec<PersonReport>,
}

/// Number of people in each allocation status.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct StatusCounts {
    pub under: usize,
    pub full: usize,
    pub over: usize,
}

impl StatusCounts {
    fn record(&mut self, status: AllocationStatus) {
        match status {
            AllocationStatus::Under => self.under += 1,
            AllocationStatus::Full => self.full += 1,
            AllocationStatus::Over => self.over += 1,
        }
    }
}

/// Allocation figures for one month.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MonthReport {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub month: Option<String>,
    pub available_hours: u32,
    pub team_hours: f64,
    /// Sum of all estimate totals, whether or not the project is in scope.
    pub estimated_hours: f64,
    pub departments: Vec<DepartmentReport>,
    pub expertises: Vec<ExpertiseReport>,
    pub status_counts: StatusCounts,
}

impl MonthReport {
    pub fn build(snapshot: &Snapshot) -> Self {
        let available = snapshot.available_hours();
        let allocations = &snapshot.allocations;

        let departments = snapshot
            .departments
            .iter()
            .map(|dept| DepartmentReport {
                id: dept.id,
                name: dept.name.clone(),
                projects: projects_in_scope(&dept.projects, snapshot.month.as_ref())
                    .into_iter()
                    .map(|project| ProjectReport {
                        id: project.id,
                        name: project.name.clone(),
                        project_manager: project
                            .project_manager_id
                            .and_then(|id| snapshot.person(id))
                            .map(|p| p.name.clone()),
                        start_date: project.start_date,
                        target_date: project.target_date,
                        allocated_percentage: allocations.project_percentage(project.id),
                        allocated_hours: allocations.total_hours_for(project.id, available),
                        estimated_hours: snapshot.estimate_hours.get(&project.id).copied(),
                    })
                    .collect(),
            })
            .collect();

        let mut status_counts = StatusCounts::default();
        let expertises = snapshot
            .expertises
            .iter()
            .map(|expertise| ExpertiseReport {
                id: expertise.id,
                name: expertise.name.clone(),
                people: snapshot
                    .people
                    .iter()
                    .filter(|p| p.expertise_id == expertise.id)
                    .map(|person| {
                        let status = allocations.status_for(person.id);
                        status_counts.record(status);
                        PersonReport {
                            id: person.id,
                            name: person.name.clone(),
                            total_percentage: allocations.total_for(person.id),
                            allocated_hours: allocations.person_hours(person.id, available),
                            status,
                        }
                    })
                    .collect(),
            })
            .collect();

        MonthReport {
            month: snapshot.month.as_ref().map(|m| m.name.clone()),
            available_hours: available,
            team_hours: team_hours(available, snapshot.people.len()),
            estimated_hours: snapshot.estimate_hours.values().sum(),
            departments,
            expertises,
            status_counts,
        }
    }
}

#[cfg(test)]
#[path = "report_tests.rs"]
mod tests;
