// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

use rp_core::allocation::MonthlyTotal;
use rp_core::report::{DepartmentReport, MonthReport, ProjectReport};
use rp_core::{AllocationMonth, AllocationSet, Estimate, Person, Project, WeeklyReport};

use crate::colors;

/// Format a number with at most one decimal place, dropping a trailing `.0`.
pub fn format_number(value: f64) -> String {
    let rounded = (value * 10.0).round() / 10.0;
    if rounded.fract() == 0.0 {
        format!("{rounded:.0}")
    } else {
        format!("{rounded:.1}")
    }
}

/// Format a person's allocation total.
///
/// Rounding never carries a total across 100, so the number always agrees
/// with the under/full/over label printed next to it.
pub fn format_total(total: f64) -> String {
    let rounded = (total * 10.0).round() / 10.0;
    if total < 100.0 && rounded >= 100.0 {
        "99.9".to_string()
    } else if total > 100.0 && rounded <= 100.0 {
        "100.1".to_string()
    } else {
        format_number(total)
    }
}

/// Format a single month line for list output
pub fn format_month_line(month: &AllocationMonth) -> String {
    let state = if month.is_active { "" } else { " (inactive)" };
    format!(
        "[{}] {} {}{}",
        month.id,
        month.month.format("%Y-%m"),
        month.name,
        state
    )
}

/// Format a single project line for list output
pub fn format_project_line(project: &Project, manager: Option<&str>) -> String {
    let mut line = format!("  [{}] {}", project.id, project.name);
    if let Some(start) = project.start_date {
        line.push_str(&format!(" start {start}"));
    }
    if let Some(target) = project.target_date {
        line.push_str(&format!(" target {target}"));
    }
    if let Some(done) = project.actual_completion_date {
        line.push_str(&format!(" completed {done}"));
    }
    if let Some(status) = project.status {
        line.push_str(&format!(" [{status}]"));
    }
    if let Some(pm) = manager {
        line.push_str(&format!(" (PM {pm})"));
    }
    line
}

fn format_project_report(project: &ProjectReport) -> String {
    let mut line = format!(
        "  [{}] {}: {}% ({}h)",
        project.id,
        project.name,
        format_number(project.allocated_percentage),
        format_number(project.allocated_hours)
    );
    if let Some(est) = project.estimated_hours {
        line.push_str(&format!(", estimate {}h", format_number(est)));
    }
    if let Some(pm) = &project.project_manager {
        line.push_str(&format!(", PM {pm}"));
    }
    line
}

fn section(name: &str) -> String {
    if colors::should_colorize() {
        colors::header(name)
    } else {
        name.to_string()
    }
}

fn format_department(dept: &DepartmentReport, output: &mut Vec<String>) {
    output.push(section(&dept.name));
    if dept.projects.is_empty() {
        output.push("  (no projects in scope)".to_string());
    }
    for project in &dept.projects {
        output.push(format_project_report(project));
    }
}

/// Format the monthly report for the report command
pub fn format_report(report: &MonthReport) -> String {
    let mut output = Vec::new();

    match &report.month {
        Some(name) => output.push(format!(
            "{}: {}h available per person, {}h team capacity",
            name,
            report.available_hours,
            format_number(report.team_hours)
        )),
        None => output.push("No month selected".to_string()),
    }
    output.push(format!(
        "Estimated: {}h across all estimates",
        format_number(report.estimated_hours)
    ));

    output.push(String::new());
    for dept in &report.departments {
        format_department(dept, &mut output);
    }

    for expertise in &report.expertises {
        output.push(String::new());
        output.push(section(&expertise.name));
        for person in &expertise.people {
            output.push(format!(
                "  [{}] {}: {}% ({}h) {}",
                person.id,
                person.name,
                format_total(person.total_percentage),
                format_number(person.allocated_hours),
                colors::status(person.status)
            ));
        }
    }

    let counts = report.status_counts;
    output.push(String::new());
    output.push(format!(
        "People: {} under-allocated, {} fully allocated, {} over-allocated",
        counts.under, counts.full, counts.over
    ));

    output.join("\n")
}

/// Format the allocation grid: one block per person with their projects.
pub fn format_allocation_grid(
    month: &AllocationMonth,
    set: &AllocationSet,
    people: &[Person],
    projects: &[Project],
    available_hours: u32,
) -> String {
    let mut output = vec![format!("{} ({}h available)", month.name, available_hours)];

    for person in people {
        let rows: Vec<_> = set.iter().filter(|a| a.person_id == person.id).collect();
        if rows.is_empty() {
            continue;
        }
        output.push(format!(
            "{}: {}% {}",
            person.name,
            format_total(set.total_for(person.id)),
            colors::status(set.status_for(person.id))
        ));
        for alloc in rows {
            let name = projects
                .iter()
                .find(|p| p.id == alloc.project_id)
                .map(|p| p.name.as_str())
                .unwrap_or("?");
            output.push(format!(
                "  {} [{}]: {}% ({}h)",
                name,
                alloc.project_id,
                format_number(alloc.percentage),
                format_number(set.hours_for(person.id, alloc.project_id, available_hours))
            ));
        }
    }

    if output.len() == 1 {
        output.push("No allocations".to_string());
    }
    output.join("\n")
}

/// Format a person's allocation totals across months
pub fn format_person_totals(person: &Person, totals: &[MonthlyTotal]) -> String {
    let mut output = vec![format!("[{}] {}", person.id, person.name)];
    if let Some(email) = &person.email {
        output.push(format!("Email: {email}"));
    }
    if totals.is_empty() {
        output.push("No allocations".to_string());
    }
    for total in totals {
        output.push(format!(
            "  {}: {}% {}",
            total.month.name,
            format_total(total.total),
            colors::status(total.status)
        ));
    }
    output.join("\n")
}

/// Format an estimate with per-story and per-discipline breakdowns
pub fn format_estimate(estimate: &Estimate, project_name: &str) -> String {
    let mut output = vec![format!(
        "Estimate for {} [{}]: {}h, ${} at ${}/h",
        project_name,
        estimate.project_id,
        format_number(estimate.total_hours()),
        format_number(estimate.total_cost()),
        format_number(estimate.blended_rate)
    )];

    for story in &estimate.stories {
        output.push(format!(
            "  [{}] {}: {}h",
            story.id,
            story.name,
            format_number(story.hours())
        ));
    }

    let disciplines: Vec<String> = estimate
        .discipline_labels()
        .into_iter()
        .filter_map(|label| {
            let hours = estimate.discipline_hours(&label);
            (hours > 0.0).then(|| format!("{label} {}h", format_number(hours)))
        })
        .collect();
    if !disciplines.is_empty() {
        output.push(format!("Disciplines: {}", disciplines.join(", ")));
    }

    output.join("\n")
}

/// Format one weekly report with its three sections.
pub fn format_weekly_report(report: &WeeklyReport, project_name: &str) -> String {
    let mut output = vec![format!(
        "{} [{}] week of {}",
        project_name, report.project_id, report.week_starting
    )];
    let sections = [
        ("Accomplishments", &report.accomplishments),
        ("Challenges", &report.challenges),
        ("Goals", &report.goals),
    ];
    for (title, text) in sections {
        output.push(format!("{title}:"));
        match text {
            Some(text) => output.extend(text.lines().map(|line| format!("  {line}"))),
            None => output.push("  (none)".to_string()),
        }
    }
    output.join("\n")
}

#[cfg(test)]
#[path = "display_tests.rs"]
mod tests;
