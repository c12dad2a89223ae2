// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Help text generation with colorization support.

use crate::colors;
use clap::builder::styling::Styles;

/// Generate clap Styles for help output.
pub fn styles() -> Styles {
    if !colors::should_colorize() {
        return Styles::plain();
    }

    use anstyle::{Ansi256Color, Color, Style};

    let header = Style::new().fg_color(Some(Color::Ansi256(Ansi256Color(colors::codes::HEADER))));
    let literal = Style::new().fg_color(Some(Color::Ansi256(Ansi256Color(colors::codes::LITERAL))));
    let context = Style::new().fg_color(Some(Color::Ansi256(Ansi256Color(colors::codes::CONTEXT))));

    Styles::styled()
        .header(header)
        .usage(header)
        .literal(literal)
        .placeholder(context)
        .valid(context)
}

/// Main help template with colorized Options header.
pub fn template() -> String {
    format!(
        "{{about-with-newline}}
{{usage-heading}} {{usage}}

{{before-help}}{}
{{options}}{{after-help}}",
        colors::header("Options:")
    )
}

/// Commands list shown before options in main help.
pub fn commands() -> String {
    format!(
        "\
{header_planning}
  {alloc}       Set or show allocations for a month
  {hours}       Show available working hours
  {report}      Show the monthly allocation report
  {estimate}    Manage project estimates
  {weekly}      Write or read weekly project reports

{header_roster}
  {expertise}   Manage expertise categories
  {person}      Manage people
  {dept}        Manage departments
  {project}     Manage projects

{header_calendar}
  {month}       Manage planning months
  {holiday}     Manage holidays

{header_setup}
  {init}        Initialize a resource plan
",
        header_planning = colors::header("Planning:"),
        header_roster = colors::header("Roster:"),
        header_calendar = colors::header("Calendar:"),
        header_setup = colors::header("Setup:"),
        alloc = colors::literal("alloc"),
        hours = colors::literal("hours"),
        report = colors::literal("report"),
        estimate = colors::literal("estimate"),
        weekly = colors::literal("weekly"),
        expertise = colors::literal("expertise"),
        person = colors::literal("person"),
        dept = colors::literal("dept"),
        project = colors::literal("project"),
        month = colors::literal("month"),
        holiday = colors::literal("holiday"),
        init = colors::literal("init"),
    )
}

/// Quickstart help shown after options in main help.
pub fn quickstart() -> String {
    colors::examples(
        "\
Get started:
  resplan init                           Initialize a plan
  resplan month add 2025-11              Open November 2025 for planning
  resplan alloc set 1 4 60               Put person 1 on project 4 at 60%
  resplan report                         Show the current month",
    )
}

#[cfg(test)]
#[path = "help_tests.rs"]
mod tests;
