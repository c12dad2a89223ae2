// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Weekly project report commands.

use chrono::NaiveDate;
use rp_core::weekly::week_starting;
use rp_core::{Database, WeeklyReportUpdate};

use super::{open_db, today};
use crate::cli::{OutputFormat, WeeklyCommand};
use crate::display::format_weekly_report;
use crate::error::{Error, Result};

pub fn run(command: WeeklyCommand) -> Result<()> {
    let (db, _, _) = open_db()?;
    println!("{}", run_impl(&db, command, today())?);
    Ok(())
}

/// Internal implementation that accepts db and date for testing.
pub(crate) fn run_impl(db: &Database, command: WeeklyCommand, today: NaiveDate) -> Result<String> {
    match command {
        WeeklyCommand::Set {
            project,
            week,
            accomplishments,
            challenges,
            goals,
        } => {
            let update = WeeklyReportUpdate {
                accomplishments,
                challenges,
                goals,
            };
            if update.is_empty() {
                return Err(Error::InvalidArguments(
                    "nothing to write\n  hint: pass --accomplishments, --challenges, or --goals"
                        .to_string(),
                ));
            }
            let report = db.upsert_weekly_report(project, week.unwrap_or(today), &update)?;
            Ok(format!(
                "Saved weekly report for project {} (week of {})",
                report.project_id, report.week_starting
            ))
        }
        WeeklyCommand::Show {
            project,
            week,
            output,
        } => {
            let report = db.get_weekly_report(project, week.unwrap_or(today))?;
            match output.output {
                OutputFormat::Text => {
                    let name = db.get_project(project)?.name;
                    Ok(format_weekly_report(&report, &name))
                }
                OutputFormat::Json => Ok(serde_json::to_string_pretty(&report)?),
            }
        }
        WeeklyCommand::List { project } => {
            let reports = db.weekly_reports_for_project(project)?;
            if reports.is_empty() {
                return Ok(format!("No weekly reports for project {}", project));
            }
            let name = db.get_project(project)?.name;
            Ok(reports
                .iter()
                .map(|r| format_weekly_report(r, &name))
                .collect::<Vec<_>>()
                .join("\n\n"))
        }
        WeeklyCommand::Week { date } => {
            let week = week_starting(date.unwrap_or(today));
            let reports = db.weekly_reports_for_week(week)?;
            if reports.is_empty() {
                return Ok(format!("No weekly reports for the week of {}", week));
            }
            let projects = db.list_projects()?;
            let mut blocks = Vec::with_capacity(reports.len());
            for report in &reports {
                let name = projects
                    .iter()
                    .find(|p| p.id == report.project_id)
                    .map(|p| p.name.as_str())
                    .unwrap_or("?");
                blocks.push(format_weekly_report(report, name));
            }
            Ok(blocks.join("\n\n"))
        }
    }
}

#[cfg(test)]
#[path = "weekly_tests.rs"]
mod tests;
