// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

use chrono::NaiveDate;
use rp_core::calendar::available_hours;
use rp_core::{apply_batch, Allocation, AllocationStatus, AllocationUpsert, Database};
use serde::Serialize;

use super::{open_db, require_month, today};
use crate::cli::{AllocCommand, OutputFormat};
use crate::display::{format_allocation_grid, format_number};
use crate::error::{Error, Result};

pub fn run(command: AllocCommand) -> Result<()> {
    let (mut db, _, _) = open_db()?;
    match command {
        AllocCommand::Set { triples, month } => {
            set_impl(&mut db, &triples, month.month.as_deref(), today())
        }
        AllocCommand::Show { month, output } => {
            println!(
                "{}",
                show_impl(&db, month.month.as_deref(), output.output, today())?
            );
            Ok(())
        }
    }
}

/// Parse `PERSON PROJECT PERCENT` triples into upsert requests for `month_id`.
pub(crate) fn parse_triples(args: &[String], month_id: i64) -> Result<Vec<AllocationUpsert>> {
    if args.is_empty() || args.len() % 3 != 0 {
        return Err(Error::InvalidArguments(format!(
            "expected PERSON PROJECT PERCENT triples, got {} values",
            args.len()
        )));
    }

    args.chunks(3)
        .map(|chunk| {
            let person = parse_id(&chunk[0], "person")?;
            let project = parse_id(&chunk[1], "project")?;
            let percentage: f64 = chunk[2].trim().trim_end_matches('%').parse().map_err(|_| {
                Error::InvalidArguments(format!("invalid percentage '{}'", chunk[2]))
            })?;
            Ok(AllocationUpsert::new(person, project, month_id, percentage))
        })
        .collect()
}

fn parse_id(value: &str, what: &str) -> Result<i64> {
    value
        .trim()
        .parse()
        .map_err(|_| Error::InvalidArguments(format!("invalid {what} id '{value}'")))
}

/// Apply every triple; keys that fail are reported and the rest still apply.
pub(crate) fn set_impl(
    db: &mut Database,
    triples: &[String],
    month: Option<&str>,
    today: NaiveDate,
) -> Result<()> {
    let month = require_month(db, month, today)?;
    let requests = parse_triples(triples, month.id)?;
    let outcome = apply_batch(db, &requests);

    for (request, result) in &outcome.applied {
        println!(
            "{}: person {} on project {} at {}%: {}",
            month.name,
            request.person_id,
            request.project_id,
            format_number(request.percentage),
            result
        );
    }
    for (request, err) in &outcome.failed {
        eprintln!(
            "error: person {} on project {}: {}",
            request.person_id, request.project_id, err
        );
    }

    if !outcome.is_complete() {
        return Err(Error::PartialBulkFailure {
            succeeded: outcome.applied.len(),
            failed: outcome.failed.len(),
        });
    }
    Ok(())
}

#[derive(Serialize)]
struct PersonTotal {
    person_id: i64,
    name: String,
    total_percentage: f64,
    status: AllocationStatus,
}

#[derive(Serialize)]
struct AllocationGrid<'a> {
    month: &'a str,
    available_hours: u32,
    allocations: Vec<&'a Allocation>,
    people: Vec<PersonTotal>,
}

pub(crate) fn show_impl(
    db: &Database,
    month: Option<&str>,
    format: OutputFormat,
    today: NaiveDate,
) -> Result<String> {
    let month = require_month(db, month, today)?;
    let set = db.load_allocation_set(month.id)?;
    let people = db.list_people()?;
    let hours = available_hours(Some(&month), &db.list_holidays()?);

    match format {
        OutputFormat::Text => Ok(format_allocation_grid(
            &month,
            &set,
            &people,
            &db.list_projects()?,
            hours,
        )),
        OutputFormat::Json => {
            let grid = AllocationGrid {
                month: &month.name,
                available_hours: hours,
                allocations: set.iter().collect(),
                people: people
                    .iter()
                    .map(|p| PersonTotal {
                        person_id: p.id,
                        name: p.name.clone(),
                        total_percentage: set.total_for(p.id),
                        status: set.status_for(p.id),
                    })
                    .collect(),
            };
            Ok(serde_json::to_string_pretty(&grid)?)
        }
    }
}

#[cfg(test)]
#[path = "alloc_tests.rs"]
mod tests;
