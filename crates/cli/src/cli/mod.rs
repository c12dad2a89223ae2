// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

mod args;

use crate::colors;
use crate::help;
use chrono::NaiveDate;
use clap::{Parser, Subcommand, ValueEnum};
use rp_core::ProjectStatus;

pub use args::{MonthArgs, OutputArgs};

/// Parse a string that must not be empty or whitespace-only.
fn non_empty_string(s: &str) -> Result<String, String> {
    if s.trim().is_empty() {
        Err("cannot be empty".to_string())
    } else {
        Ok(s.trim().to_string())
    }
}

/// Parse a `YYYY-MM-DD` date argument.
fn date_arg(s: &str) -> Result<NaiveDate, String> {
    rp_core::calendar::parse_date(s).ok_or_else(|| format!("invalid date '{s}', use YYYY-MM-DD"))
}

/// Parse a month argument into the first of that month.
fn month_arg(s: &str) -> Result<NaiveDate, String> {
    rp_core::calendar::parse_month(s)
        .ok_or_else(|| format!("invalid month '{s}', use YYYY-MM or 'November 2025'"))
}

/// Parse a project status argument.
fn status_arg(s: &str) -> Result<ProjectStatus, String> {
    s.parse().map_err(|e: rp_core::Error| e.to_string())
}

/// Output format for commands supporting structured output.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

#[derive(Parser)]
#[command(name = "resplan")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Monthly resource allocation planner")]
#[command(
    long_about = "Monthly resource allocation planner.\n\n\
    Assign people to projects by percentage, see available hours per month, \
    and track project estimates."
)]
#[command(help_template = help::template())]
#[command(before_help = help::commands())]
#[command(after_help = help::quickstart())]
#[command(styles = help::styles())]
pub struct Cli {
    /// Run as if resplan was started in <path>
    #[arg(short = 'C', long = "directory", global = true, value_name = "path")]
    pub directory: Option<String>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    // ─────────────────────────────────────────────────────────────────────────
    // Planning
    // ─────────────────────────────────────────────────────────────────────────
    /// Set or show allocations for a month
    Alloc {
        #[command(subcommand)]
        command: AllocCommand,
    },

    /// Show available working hours for a month
    #[command(after_help = colors::examples("\
Examples:
  resplan hours                  Hours for the current month
  resplan hours -m 2025-11       Hours for November 2025"))]
    Hours {
        #[command(flatten)]
        month: MonthArgs,
    },

    /// Show the monthly allocation report
    Report {
        #[command(flatten)]
        month: MonthArgs,

        #[command(flatten)]
        output: OutputArgs,
    },

    /// Manage project estimates
    Estimate {
        #[command(subcommand)]
        command: EstimateCommand,
    },

    /// Write or read weekly project reports
    Weekly {
        #[command(subcommand)]
        command: WeeklyCommand,
    },

    // ─────────────────────────────────────────────────────────────────────────
    // Roster
    // ─────────────────────────────────────────────────────────────────────────
    /// Manage expertise categories
    Expertise {
        #[command(subcommand)]
        command: ExpertiseCommand,
    },

    /// Manage people
    Person {
        #[command(subcommand)]
        command: PersonCommand,
    },

    /// Manage departments
    Dept {
        #[command(subcommand)]
        command: DeptCommand,
    },

    /// Manage projects
    Project {
        #[command(subcommand)]
        command: ProjectCommand,
    },

    // ─────────────────────────────────────────────────────────────────────────
    // Calendar
    // ─────────────────────────────────────────────────────────────────────────
    /// Manage planning months
    Month {
        #[command(subcommand)]
        command: MonthCommand,
    },

    /// Manage holidays
    Holiday {
        #[command(subcommand)]
        command: HolidayCommand,
    },

    // ─────────────────────────────────────────────────────────────────────────
    // Setup
    // ─────────────────────────────────────────────────────────────────────────
    /// Initialize a resource plan in the current directory
    Init {
        /// Directory to initialize (default: current directory)
        #[arg(long)]
        path: Option<String>,

        /// Keep the database in this existing directory instead of .resplan/
        #[arg(long)]
        workspace: Option<String>,
    },
}

#[derive(Subcommand, Debug)]
pub enum AllocCommand {
    /// Set one or more allocations (a percentage of 0 removes one)
    #[command(after_help = colors::examples("\
Examples:
  resplan alloc set 1 4 60                 Person 1 on project 4 at 60%
  resplan alloc set 1 4 60 1 7 40          Two allocations at once
  resplan alloc set 2 4 0 -m 2025-12       Remove an allocation in December"))]
    Set {
        /// PERSON PROJECT PERCENT triples
        #[arg(
            required = true,
            num_args = 3..,
            allow_negative_numbers = true,
            value_name = "PERSON PROJECT PERCENT"
        )]
        triples: Vec<String>,

        #[command(flatten)]
        month: MonthArgs,
    },

    /// Show the allocation grid for a month
    Show {
        #[command(flatten)]
        month: MonthArgs,

        #[command(flatten)]
        output: OutputArgs,
    },
}

#[derive(Subcommand, Debug)]
pub enum ExpertiseCommand {
    /// Add an expertise category
    Add {
        #[arg(value_parser = non_empty_string)]
        name: String,
    },
    /// List expertise categories
    List,
    /// Rename an expertise category
    Rename {
        id: i64,

        #[arg(value_parser = non_empty_string)]
        name: String,
    },
    /// Remove an expertise category no one holds
    Rm { id: i64 },
}

#[derive(Subcommand, Debug)]
pub enum PersonCommand {
    /// Add a person
    Add {
        #[arg(value_parser = non_empty_string)]
        name: String,

        /// Expertise name (e.g. "Software")
        #[arg(long, short)]
        expertise: String,

        #[arg(long)]
        email: Option<String>,
    },
    /// List people
    List,
    /// Show a person's allocations across months
    Show { id: i64 },
    /// Edit a person attribute
    #[command(after_help = colors::examples("\
Attributes:
  name, email, expertise

Examples:
  resplan person edit 3 email travis@example.com   Set an email
  resplan person edit 3 email none                 Clear the email
  resplan person edit 3 expertise QA               Change expertise"))]
    Edit {
        id: i64,
        attr: String,
        value: String,
    },
}

#[derive(Subcommand, Debug)]
pub enum DeptCommand {
    /// Add a department
    Add {
        #[arg(value_parser = non_empty_string)]
        name: String,

        /// Display order
        #[arg(long, default_value_t = 0)]
        sort: i64,
    },
    /// List departments
    List,
}

#[derive(Subcommand, Debug)]
pub enum ProjectCommand {
    /// Add a project to a department
    Add {
        #[arg(value_parser = non_empty_string)]
        name: String,

        /// Department id
        #[arg(long)]
        dept: i64,

        /// Start date (YYYY-MM-DD)
        #[arg(long, value_parser = date_arg)]
        start: Option<NaiveDate>,

        /// Target date (YYYY-MM-DD)
        #[arg(long, value_parser = date_arg)]
        target: Option<NaiveDate>,

        /// Project manager (person id)
        #[arg(long)]
        pm: Option<i64>,

        /// Display order within the department
        #[arg(long, default_value_t = 0)]
        sort: i64,

        #[arg(long)]
        description: Option<String>,

        /// Health: new-request, green, yellow, red, business-hold, complete
        #[arg(long, value_parser = status_arg)]
        status: Option<ProjectStatus>,
    },

    /// Edit a project attribute
    #[command(after_help = colors::examples("\
Attributes:
  name, description, status, start, target, completed, pm, sort

Examples:
  resplan project edit 4 target 2026-03-31    Move the target date
  resplan project edit 4 completed 2025-10-15 Mark completed
  resplan project edit 4 status yellow        Report the project at risk
  resplan project edit 4 pm none              Clear the project manager"))]
    Edit {
        id: i64,
        attr: String,
        value: String,
    },

    /// List projects by department
    List {
        /// Only projects in scope for this month
        #[arg(long, short)]
        month: Option<String>,
    },
}

#[derive(Subcommand, Debug)]
pub enum MonthCommand {
    /// Open a month for planning
    Add {
        /// Month (YYYY-MM)
        #[arg(value_parser = month_arg)]
        month: NaiveDate,

        /// Display name (default: "November 2025" style)
        #[arg(long)]
        name: Option<String>,
    },
    /// List active months
    List {
        /// Include inactive months
        #[arg(long)]
        all: bool,
    },
    /// Offer a month for planning again
    Activate { id: i64 },
    /// Hide a month from planning
    Deactivate { id: i64 },
}

#[derive(Subcommand, Debug)]
pub enum HolidayCommand {
    /// Add a holiday
    Add {
        #[arg(value_parser = non_empty_string)]
        name: String,

        /// Date (YYYY-MM-DD)
        #[arg(value_parser = date_arg)]
        date: NaiveDate,
    },
    /// List holidays
    List,
    /// Remove a holiday
    Rm { id: i64 },
}

#[derive(Subcommand, Debug)]
pub enum EstimateCommand {
    /// Create an estimate for a project
    Create {
        /// Project id
        project: i64,

        /// Blended hourly rate (default from config)
        #[arg(long)]
        rate: Option<f64>,
    },
    /// Show a project's estimate
    Show {
        project: i64,

        #[command(flatten)]
        output: OutputArgs,
    },
    /// Change the blended hourly rate
    Rate { project: i64, rate: f64 },
    /// Add a user story with default discipline hours
    Story {
        project: i64,

        #[arg(value_parser = non_empty_string)]
        name: String,
    },
    /// Set hours for one discipline on a story
    Item {
        story: i64,

        #[arg(value_parser = non_empty_string)]
        discipline: String,

        hours: f64,
    },
    /// Move a story up or down
    Move {
        story: i64,

        /// up or down
        direction: String,
    },
    /// Remove a user story and its items
    Rm { story: i64 },
}

#[derive(Subcommand, Debug)]
pub enum WeeklyCommand {
    /// Write a project's report for a week (sections not given are kept)
    #[command(after_help = colors::examples("\
Examples:
  resplan weekly set 4 --goals \"Start signup\"             This week
  resplan weekly set 4 --week 2025-11-19 --challenges \"\"   Clear a section"))]
    Set {
        project: i64,

        /// Any date in the week (default: today)
        #[arg(long, value_parser = date_arg)]
        week: Option<NaiveDate>,

        #[arg(long)]
        accomplishments: Option<String>,

        #[arg(long)]
        challenges: Option<String>,

        #[arg(long)]
        goals: Option<String>,
    },
    /// Show a project's report for a week
    Show {
        project: i64,

        /// Any date in the week (default: today)
        #[arg(long, value_parser = date_arg)]
        week: Option<NaiveDate>,

        #[command(flatten)]
        output: OutputArgs,
    },
    /// List a project's reports, newest first
    List { project: i64 },
    /// Show every project's report for a week
    Week {
        /// Any date in the week (default: today)
        #[arg(value_parser = date_arg)]
        date: Option<NaiveDate>,
    },
}
