// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

use chrono::NaiveDate;
use rp_core::calendar::parse_date;
use rp_core::scope::projects_in_scope;
use rp_core::{Database, Person, Project, ProjectStatus};

use super::{open_db, resolve_month, today};
use crate::cli::ProjectCommand;
use crate::display::format_project_line;
use crate::error::{Error, Result};

const EDITABLE: &str = "name, description, status, start, target, completed, pm, sort";

pub fn run(command: ProjectCommand) -> Result<()> {
    let (db, _, _) = open_db()?;
    run_impl(&db, command, today())
}

/// Internal implementation that accepts db and date for testing.
pub(crate) fn run_impl(db: &Database, command: ProjectCommand, today: NaiveDate) -> Result<()> {
    match command {
        ProjectCommand::Add {
            name,
            dept,
            start,
            target,
            pm,
            sort,
            description,
            status,
        } => {
            let project = Project {
                id: 0,
                name,
                department_id: dept,
                sort_order: sort,
                start_date: start,
                target_date: target,
                actual_completion_date: None,
                project_manager_id: pm,
                description: description.filter(|d| !d.trim().is_empty()),
                status,
            };
            let project = db.create_project(&project)?;
            println!("Added project [{}] {}", project.id, project.name);
        }
        ProjectCommand::Edit { id, attr, value } => edit(db, id, &attr, &value)?,
        ProjectCommand::List { month } => {
            let month = match month {
                Some(reference) => resolve_month(db, Some(&reference), today)?,
                None => None,
            };
            let people = db.list_people()?;
            if let Some(m) = &month {
                println!("Projects in scope for {}", m.name);
            }
            for dept in db.departments_with_projects()? {
                println!("{}", dept.name);
                for project in projects_in_scope(&dept.projects, month.as_ref()) {
                    println!(
                        "{}",
                        format_project_line(project, manager_name(&people, project))
                    );
                }
            }
        }
    }
    Ok(())
}

fn manager_name<'a>(people: &'a [Person], project: &Project) -> Option<&'a str> {
    let id = project.project_manager_id?;
    people.iter().find(|p| p.id == id).map(|p| p.name.as_str())
}

/// Parse an optional attribute value, where `none` clears it.
fn optional<T>(value: &str, parse: impl Fn(&str) -> Result<T>) -> Result<Option<T>> {
    if value.eq_ignore_ascii_case("none") {
        Ok(None)
    } else {
        parse(value).map(Some)
    }
}

fn text_value(value: &str) -> Result<String> {
    Ok(value.trim().to_string())
}

fn status_value(value: &str) -> Result<ProjectStatus> {
    Ok(value.parse()?)
}

fn date_value(value: &str) -> Result<NaiveDate> {
    parse_date(value).ok_or_else(|| rp_core::Error::InvalidDate(value.to_string()).into())
}

fn id_value(value: &str) -> Result<i64> {
    value
        .trim()
        .parse()
        .map_err(|_| Error::InvalidArguments(format!("expected a number, got '{value}'")))
}

pub(crate) fn edit(db: &Database, id: i64, attr: &str, value: &str) -> Result<()> {
    let mut project = db.get_project(id)?;

    match attr.to_lowercase().as_str() {
        "name" => {
            let name = value.trim();
            if name.is_empty() {
                return Err(Error::InvalidArguments("name cannot be empty".to_string()));
            }
            project.name = name.to_string();
        }
        "description" => project.description = optional(value, text_value)?,
        "status" => project.status = optional(value, status_value)?,
        "start" => project.start_date = optional(value, date_value)?,
        "target" => project.target_date = optional(value, date_value)?,
        "completed" => project.actual_completion_date = optional(value, date_value)?,
        "pm" => project.project_manager_id = optional(value, id_value)?,
        "sort" => project.sort_order = id_value(value)?,
        _ => {
            return Err(Error::UnknownAttribute {
                attr: attr.to_string(),
                valid: EDITABLE,
            })
        }
    }

    db.update_project(&project)?;
    println!(
        "Updated {} of [{}] {} to: {}",
        attr.to_lowercase(),
        project.id,
        project.name,
        value
    );
    Ok(())
}

#[cfg(test)]
#[path = "project_tests.rs"]
mod tests;
