// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Project estimates broken down by user story and discipline.

use serde::{Deserialize, Serialize};

/// Disciplines every new user story is estimated against.
pub const STANDARD_DISCIPLINES: [&str; 8] = [
    "Requirements",
    "Design",
    "UX",
    "Development",
    "Database",
    "Unit Testing",
    "QA",
    "PM",
];

/// Hours given to each standard discipline when a story is added.
pub const DEFAULT_ITEM_HOURS: f64 = 8.0;

/// Blended hourly rate for estimates created without one.
pub const DEFAULT_BLENDED_RATE: f64 = 100.0;

/// Hours for one discipline on one user story.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EstimateItem {
    pub id: i64,
    pub story_id: i64,
    pub discipline: String,
    pub hours: f64,
}

/// A unit of scope within an estimate.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserStory {
    pub id: i64,
    pub estimate_id: i64,
    pub name: String,
    pub sort_order: i64,
    #[serde(default)]
    pub items: Vec<EstimateItem>,
}

impl UserStory {
    /// Total hours across all disciplines.
    pub fn hours(&self) -> f64 {
        self.items.iter().map(|i| i.hours).sum()
    }

    /// Hours recorded for `discipline`, or 0.
    pub fn discipline_hours(&self, discipline: &str) -> f64 {
        self.items
            .iter()
            .find(|i| i.discipline == discipline)
            .map(|i| i.hours)
            .unwrap_or(0.0)
    }
}

/// Cost and hours projection for a project.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Estimate {
    pub id: i64,
    pub project_id: i64,
    pub blended_rate: f64,
    /// Stories in display order.
    #[serde(default)]
    pub stories: Vec<UserStory>,
}

impl Estimate {
    pub fn total_hours(&self) -> f64 {
        self.stories.iter().map(UserStory::hours).sum()
    }

    /// Total hours priced at the blended rate.
    pub fn total_cost(&self) -> f64 {
        self.total_hours() * self.blended_rate
    }

    pub fn discipline_hours(&self, discipline: &str) -> f64 {
        self.stories
            .iter()
            .map(|s| s.discipline_hours(discipline))
            .sum()
    }

    pub fn discipline_cost(&self, discipline: &str) -> f64 {
        self.discipline_hours(discipline) * self.blended_rate
    }

    /// Discipline columns: the standard set, then custom labels in first-seen order.
    pub fn discipline_labels(&self) -> Vec<String> {
        let mut labels: Vec<String> = STANDARD_DISCIPLINES.iter().map(|d| d.to_string()).collect();
        for story in &self.stories {
            for item in &story.items {
                if !labels.contains(&item.discipline) {
                    labels.push(item.discipline.clone());
                }
            }
        }
        labels
    }
}

/// Direction to move a story in the display order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MoveDirection {
    Up,
    Down,
}

impl std::str::FromStr for MoveDirection {
    type Err = crate::error::Error;

    fn from_str(s: &str) -> crate::error::Result<Self> {
        match s.to_lowercase().as_str() {
            "up" => Ok(MoveDirection::Up),
            "down" => Ok(MoveDirection::Down),
            _ => Err(crate::error::Error::InvalidInput(format!(
                "invalid direction: '{s}'\n  hint: use 'up' or 'down'"
            ))),
        }
    }
}

/// Index of the neighbour a story at `index` swaps with, if any.
pub fn swap_target(index: usize, len: usize, direction: MoveDirection) -> Option<usize> {
    match direction {
        MoveDirection::Up => index.checked_sub(1),
        MoveDirection::Down => Some(index + 1).filter(|&i| i < len),
    }
}

#[cfg(test)]
#[path = "estimate_tests.rs"]
mod tests;
