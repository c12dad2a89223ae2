// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! SQLite-backed store for the resource planner.
//!
//! The [`Database`] struct provides data access for the roster, planning
//! months, holidays, allocations, estimates, and weekly reports. It also implements
//! [`AllocationStore`], checking references inside a transaction so an upsert
//! either applies completely or not at all.

use chrono::{DateTime, NaiveDate, Utc};
use rusqlite::{params, Connection, OptionalExtension, Row};
use std::collections::BTreeMap;
use std::path::Path;

use crate::allocation::{Allocation, AllocationSet, AllocationStore, AllocationUpsert, UpsertOutcome};
use crate::calendar::{first_of_month, month_display_name, AllocationMonth, Holiday};
use crate::error::{Error, Result};
use crate::estimate::{
    swap_target, Estimate, EstimateItem, MoveDirection, UserStory, DEFAULT_ITEM_HOURS,
    STANDARD_DISCIPLINES,
};
use crate::report::Snapshot;
use crate::roster::{Department, Expertise, Person, Project, ProjectStatus};
use crate::weekly::{week_starting, WeeklyReport, WeeklyReportUpdate};

/// SQL schema for the resource planner database.
pub const SCHEMA: &str = r#"
CREATE TABLE IF NOT EXISTS expertises (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    name TEXT NOT NULL UNIQUE
);

CREATE TABLE IF NOT EXISTS people (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    name TEXT NOT NULL,
    email TEXT,
    expertise_id INTEGER NOT NULL,
    FOREIGN KEY (expertise_id) REFERENCES expertises(id)
);

CREATE TABLE IF NOT EXISTS departments (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    name TEXT NOT NULL UNIQUE,
    sort_order INTEGER NOT NULL DEFAULT 0
);

CREATE TABLE IF NOT EXISTS projects (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    name TEXT NOT NULL,
    department_id INTEGER NOT NULL,
    sort_order INTEGER NOT NULL DEFAULT 0,
    start_date TEXT,
    target_date TEXT,
    actual_completion_date TEXT,
    project_manager_id INTEGER,
    description TEXT,
    status TEXT,
    FOREIGN KEY (department_id) REFERENCES departments(id),
    FOREIGN KEY (project_manager_id) REFERENCES people(id)
);

-- One row per planning period; month is always the first of the month
CREATE TABLE IF NOT EXISTS allocation_months (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    name TEXT NOT NULL,
    month TEXT NOT NULL UNIQUE,
    is_active INTEGER NOT NULL DEFAULT 1
);

CREATE TABLE IF NOT EXISTS holidays (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    name TEXT NOT NULL,
    date TEXT NOT NULL
);

-- Zero percentages are deleted, never stored
CREATE TABLE IF NOT EXISTS allocations (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    person_id INTEGER NOT NULL,
    project_id INTEGER NOT NULL,
    month_id INTEGER NOT NULL,
    percentage REAL NOT NULL CHECK (percentage > 0 AND percentage <= 100),
    updated_at TEXT NOT NULL,
    UNIQUE (person_id, project_id, month_id),
    FOREIGN KEY (person_id) REFERENCES people(id),
    FOREIGN KEY (project_id) REFERENCES projects(id),
    FOREIGN KEY (month_id) REFERENCES allocation_months(id)
);

CREATE TABLE IF NOT EXISTS estimates (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    project_id INTEGER NOT NULL UNIQUE,
    blended_rate REAL NOT NULL,
    FOREIGN KEY (project_id) REFERENCES projects(id)
);

CREATE TABLE IF NOT EXISTS user_stories (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    estimate_id INTEGER NOT NULL,
    name TEXT NOT NULL,
    sort_order INTEGER NOT NULL DEFAULT 0,
    FOREIGN KEY (estimate_id) REFERENCES estimates(id)
);

CREATE TABLE IF NOT EXISTS estimate_items (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    story_id INTEGER NOT NULL,
    discipline TEXT NOT NULL,
    hours REAL NOT NULL,
    UNIQUE (story_id, discipline),
    FOREIGN KEY (story_id) REFERENCES user_stories(id)
);

-- One report per project per week; week_starting is always a Monday
CREATE TABLE IF NOT EXISTS weekly_reports (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    project_id INTEGER NOT NULL,
    week_starting TEXT NOT NULL,
    accomplishments TEXT,
    challenges TEXT,
    goals TEXT,
    updated_at TEXT NOT NULL,
    UNIQUE (project_id, week_starting),
    FOREIGN KEY (project_id) REFERENCES projects(id)
);

-- Indexes
CREATE INDEX IF NOT EXISTS idx_people_expertise ON people(expertise_id);
CREATE INDEX IF NOT EXISTS idx_projects_department ON projects(department_id);
CREATE INDEX IF NOT EXISTS idx_allocations_month ON allocations(month_id);
CREATE INDEX IF NOT EXISTS idx_allocations_person ON allocations(person_id);
CREATE INDEX IF NOT EXISTS idx_holidays_date ON holidays(date);
CREATE INDEX IF NOT EXISTS idx_stories_estimate ON user_stories(estimate_id);
CREATE INDEX IF NOT EXISTS idx_weekly_reports_week ON weekly_reports(week_starting);
"#;

const PROJECT_COLUMNS: &str = "id, name, department_id, sort_order, start_date, target_date,
     actual_completion_date, project_manager_id, description, status";

const WEEKLY_COLUMNS: &str =
    "id, project_id, week_starting, accomplishments, challenges, goals, updated_at";

/// Parse a stored `YYYY-MM-DD` date, returning a rusqlite error on failure.
fn parse_date_col(value: &str, column: &str) -> std::result::Result<NaiveDate, rusqlite::Error> {
    NaiveDate::parse_from_str(value, "%Y-%m-%d")
        .map_err(|_| conversion_error(column, format!("invalid date '{value}'")))
}

/// Parse an optional stored date.
fn parse_date_opt(
    value: Option<String>,
    column: &str,
) -> std::result::Result<Option<NaiveDate>, rusqlite::Error> {
    value.map(|s| parse_date_col(&s, column)).transpose()
}

fn conversion_error(column: &str, message: String) -> rusqlite::Error {
    rusqlite::Error::FromSqlConversionFailure(
        0,
        rusqlite::types::Type::Text,
        Box::new(Error::CorruptedData(format!("{message} in column '{column}'"))),
    )
}

fn parse_status_opt(
    value: Option<String>,
) -> std::result::Result<Option<ProjectStatus>, rusqlite::Error> {
    value
        .map(|s| {
            s.parse::<ProjectStatus>()
                .map_err(|_| conversion_error("status", format!("invalid status '{s}'")))
        })
        .transpose()
}

fn format_date(date: NaiveDate) -> String {
    date.format("%Y-%m-%d").to_string()
}

fn is_constraint_violation(e: &rusqlite::Error) -> bool {
    matches!(
        e,
        rusqlite::Error::SqliteFailure(err, _)
            if err.code == rusqlite::ErrorCode::ConstraintViolation
    )
}

fn project_from_row(row: &Row<'_>) -> std::result::Result<Project, rusqlite::Error> {
    Ok(Project {
        id: row.get(0)?,
        name: row.get(1)?,
        department_id: row.get(2)?,
        sort_order: row.get(3)?,
        start_date: parse_date_opt(row.get(4)?, "start_date")?,
        target_date: parse_date_opt(row.get(5)?, "target_date")?,
        actual_completion_date: parse_date_opt(row.get(6)?, "actual_completion_date")?,
        project_manager_id: row.get(7)?,
        description: row.get(8)?,
        status: parse_status_opt(row.get(9)?)?,
    })
}

/// Empty sections read back as absent.
fn section(value: Option<String>) -> Option<String> {
    value.filter(|s| !s.trim().is_empty())
}

fn weekly_from_row(row: &Row<'_>) -> std::result::Result<WeeklyReport, rusqlite::Error> {
    let week: String = row.get(2)?;
    let updated: String = row.get(6)?;
    let updated_at = DateTime::parse_from_rfc3339(&updated)
        .map_err(|_| conversion_error("updated_at", format!("invalid timestamp '{updated}'")))?
        .with_timezone(&Utc);
    Ok(WeeklyReport {
        id: row.get(0)?,
        project_id: row.get(1)?,
        week_starting: parse_date_col(&week, "week_starting")?,
        accomplishments: section(row.get(3)?),
        challenges: section(row.get(4)?),
        goals: section(row.get(5)?),
        updated_at,
    })
}

fn month_from_row(row: &Row<'_>) -> std::result::Result<AllocationMonth, rusqlite::Error> {
    let month_str: String = row.get(2)?;
    Ok(AllocationMonth {
        id: row.get(0)?,
        name: row.get(1)?,
        month: parse_date_col(&month_str, "month")?,
        is_active: row.get(3)?,
    })
}

fn allocation_from_row(row: &Row<'_>) -> std::result::Result<Allocation, rusqlite::Error> {
    Ok(Allocation {
        id: row.get(0)?,
        person_id: row.get(1)?,
        project_id: row.get(2)?,
        month_id: row.get(3)?,
        percentage: row.get(4)?,
    })
}

/// Returns true if a row with `id` exists in `table`.
fn row_exists(conn: &Connection, table: &str, id: i64) -> Result<bool> {
    let sql = format!("SELECT COUNT(*) FROM {table} WHERE id = ?1");
    let count: i64 = conn.query_row(&sql, params![id], |row| row.get(0))?;
    Ok(count > 0)
}

/// Create the schema on a database connection.
///
/// Every statement is idempotent, so this runs on each open.
pub fn run_migrations(conn: &Connection) -> Result<()> {
    conn.execute_batch(SCHEMA)?;
    migrate_add_project_details(conn)?;
    Ok(())
}

/// Migration: Add description and status columns to existing project tables.
fn migrate_add_project_details(conn: &Connection) -> Result<()> {
    for column in ["description", "status"] {
        let has_column: bool = conn.query_row(
            "SELECT COUNT(*) > 0 FROM pragma_table_info('projects') WHERE name = ?1",
            params![column],
            |row| row.get(0),
        )?;
        if !has_column {
            conn.execute(&format!("ALTER TABLE projects ADD COLUMN {column} TEXT"), [])?;
        }
    }
    Ok(())
}

/// SQLite database connection with resource planner operations.
pub struct Database {
    /// The underlying SQLite connection.
    pub conn: Connection,
}

impl Database {
    /// Open a database connection at the given path, creating and migrating if needed.
    pub fn open(path: &Path) -> Result<Self> {
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() && !parent.exists() {
                std::fs::create_dir_all(parent).map_err(|e| {
                    Error::InvalidInput(format!("cannot create {}: {e}", parent.display()))
                })?;
            }
        }

        let conn = Connection::open(path)?;

        // Enable foreign keys and WAL mode for concurrency
        conn.execute_batch(
            "PRAGMA foreign_keys = ON;
             PRAGMA journal_mode = WAL;
             PRAGMA busy_timeout = 5000;",
        )?;

        let db = Database { conn };
        run_migrations(&db.conn)?;
        tracing::debug!(path = %path.display(), "opened database");
        Ok(db)
    }

    /// Open an in-memory database (for testing).
    pub fn open_in_memory() -> Result<Self> {
        let conn = Connection::open_in_memory()?;
        conn.execute_batch("PRAGMA foreign_keys = ON;")?;
        let db = Database { conn };
        run_migrations(&db.conn)?;
        Ok(db)
    }

    // ─────────────────────────────────────────────────────────────────────
    // Expertise and people
    // ─────────────────────────────────────────────────────────────────────

    /// Create a new expertise category.
    pub fn create_expertise(&self, name: &str) -> Result<Expertise> {
        self.conn
            .execute("INSERT INTO expertises (name) VALUES (?1)", params![name])
            .map_err(|e| {
                if is_constraint_violation(&e) {
                    Error::Duplicate {
                        kind: "expertise",
                        name: name.to_string(),
                    }
                } else {
                    Error::Database(e)
                }
            })?;
        Ok(Expertise {
            id: self.conn.last_insert_rowid(),
            name: name.to_string(),
        })
    }

    /// Look up an expertise by name (case-insensitive).
    pub fn get_expertise_by_name(&self, name: &str) -> Result<Expertise> {
        let expertise = self
            .conn
            .query_row(
                "SELECT id, name FROM expertises WHERE name = ?1 COLLATE NOCASE",
                params![name],
                |row| {
                    Ok(Expertise {
                        id: row.get(0)?,
                        name: row.get(1)?,
                    })
                },
            )
            .optional()?;
        expertise.ok_or_else(|| Error::ExpertiseNotFound(name.to_string()))
    }

    /// Get an expertise by ID.
    pub fn get_expertise(&self, id: i64) -> Result<Expertise> {
        let expertise = self
            .conn
            .query_row(
                "SELECT id, name FROM expertises WHERE id = ?1",
                params![id],
                |row| {
                    Ok(Expertise {
                        id: row.get(0)?,
                        name: row.get(1)?,
                    })
                },
            )
            .optional()?;
        expertise.ok_or_else(|| Error::ExpertiseNotFound(id.to_string()))
    }

    /// Rename an expertise category.
    pub fn update_expertise(&self, id: i64, name: &str) -> Result<Expertise> {
        let affected = self
            .conn
            .execute(
                "UPDATE expertises SET name = ?1 WHERE id = ?2",
                params![name, id],
            )
            .map_err(|e| {
                if is_constraint_violation(&e) {
                    Error::Duplicate {
                        kind: "expertise",
                        name: name.to_string(),
                    }
                } else {
                    Error::Database(e)
                }
            })?;
        if affected == 0 {
            return Err(Error::ExpertiseNotFound(id.to_string()));
        }
        Ok(Expertise {
            id,
            name: name.to_string(),
        })
    }

    /// Delete an expertise category that no person holds.
    pub fn delete_expertise(&self, id: i64) -> Result<()> {
        let expertise = self.get_expertise(id)?;
        let people: i64 = self.conn.query_row(
            "SELECT COUNT(*) FROM people WHERE expertise_id = ?1",
            params![id],
            |row| row.get(0),
        )?;
        if people > 0 {
            return Err(Error::ExpertiseInUse {
                name: expertise.name,
                people: people as usize,
            });
        }
        self.conn
            .execute("DELETE FROM expertises WHERE id = ?1", params![id])?;
        Ok(())
    }

    /// List all expertise categories, ordered by id.
    pub fn list_expertises(&self) -> Result<Vec<Expertise>> {
        let mut stmt = self
            .conn
            .prepare("SELECT id, name FROM expertises ORDER BY id")?;
        let expertises = stmt
            .query_map([], |row| {
                Ok(Expertise {
                    id: row.get(0)?,
                    name: row.get(1)?,
                })
            })?
            .collect::<std::result::Result<Vec<_>, _>>()?;
        Ok(expertises)
    }

    /// Create a new person with the given expertise.
    pub fn create_person(
        &self,
        name: &str,
        email: Option<&str>,
        expertise_id: i64,
    ) -> Result<Person> {
        if !row_exists(&self.conn, "expertises", expertise_id)? {
            return Err(Error::ExpertiseNotFound(expertise_id.to_string()));
        }
        self.conn.execute(
            "INSERT INTO people (name, email, expertise_id) VALUES (?1, ?2, ?3)",
            params![name, email, expertise_id],
        )?;
        Ok(Person {
            id: self.conn.last_insert_rowid(),
            name: name.to_string(),
            email: email.map(String::from),
            expertise_id,
        })
    }

    /// Get a person by ID.
    pub fn get_person(&self, id: i64) -> Result<Person> {
        let person = self
            .conn
            .query_row(
                "SELECT id, name, email, expertise_id FROM people WHERE id = ?1",
                params![id],
                |row| {
                    Ok(Person {
                        id: row.get(0)?,
                        name: row.get(1)?,
                        email: row.get(2)?,
                        expertise_id: row.get(3)?,
                    })
                },
            )
            .optional()?;
        person.ok_or(Error::PersonNotFound(id))
    }

    /// Overwrite a person's name, email, and expertise.
    pub fn update_person(&self, person: &Person) -> Result<()> {
        if !row_exists(&self.conn, "expertises", person.expertise_id)? {
            return Err(Error::ExpertiseNotFound(person.expertise_id.to_string()));
        }
        let affected = self.conn.execute(
            "UPDATE people SET name = ?1, email = ?2, expertise_id = ?3 WHERE id = ?4",
            params![person.name, person.email, person.expertise_id, person.id],
        )?;
        if affected == 0 {
            return Err(Error::PersonNotFound(person.id));
        }
        Ok(())
    }

    /// List all people, ordered by id.
    pub fn list_people(&self) -> Result<Vec<Person>> {
        let mut stmt = self
            .conn
            .prepare("SELECT id, name, email, expertise_id FROM people ORDER BY id")?;
        let people = stmt
            .query_map([], |row| {
                Ok(Person {
                    id: row.get(0)?,
                    name: row.get(1)?,
                    email: row.get(2)?,
                    expertise_id: row.get(3)?,
                })
            })?
            .collect::<std::result::Result<Vec<_>, _>>()?;
        Ok(people)
    }

    // ─────────────────────────────────────────────────────────────────────
    // Departments and projects
    // ─────────────────────────────────────────────────────────────────────

    /// Create a new department.
    pub fn create_department(&self, name: &str, sort_order: i64) -> Result<Department> {
        self.conn
            .execute(
                "INSERT INTO departments (name, sort_order) VALUES (?1, ?2)",
                params![name, sort_order],
            )
            .map_err(|e| {
                if is_constraint_violation(&e) {
                    Error::Duplicate {
                        kind: "department",
                        name: name.to_string(),
                    }
                } else {
                    Error::Database(e)
                }
            })?;
        Ok(Department::new(self.conn.last_insert_rowid(), name, sort_order))
    }

    /// List departments by sort order, without their projects.
    pub fn list_departments(&self) -> Result<Vec<Department>> {
        let mut stmt = self
            .conn
            .prepare("SELECT id, name, sort_order FROM departments ORDER BY sort_order, id")?;
        let departments = stmt
            .query_map([], |row| {
                Ok(Department {
                    id: row.get(0)?,
                    name: row.get(1)?,
                    sort_order: row.get(2)?,
                    projects: Vec::new(),
                })
            })?
            .collect::<std::result::Result<Vec<_>, _>>()?;
        Ok(departments)
    }

    /// List departments by sort order, each with its projects in display order.
    pub fn departments_with_projects(&self) -> Result<Vec<Department>> {
        let mut departments = self.list_departments()?;
        let projects = self.list_projects()?;
        for dept in &mut departments {
            dept.projects = projects
                .iter()
                .filter(|p| p.department_id == dept.id)
                .cloned()
                .collect();
        }
        Ok(departments)
    }

    /// Create a new project. The `id` field of `project` is ignored.
    pub fn create_project(&self, project: &Project) -> Result<Project> {
        self.check_project_refs(project)?;
        self.conn.execute(
            "INSERT INTO projects (name, department_id, sort_order, start_date, target_date,
             actual_completion_date, project_manager_id, description, status)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9)",
            params![
                project.name,
                project.department_id,
                project.sort_order,
                project.start_date.map(format_date),
                project.target_date.map(format_date),
                project.actual_completion_date.map(format_date),
                project.project_manager_id,
                project.description,
                project.status.map(|s| s.as_str()),
            ],
        )?;
        Ok(Project {
            id: self.conn.last_insert_rowid(),
            ..project.clone()
        })
    }

    /// Get a project by ID.
    pub fn get_project(&self, id: i64) -> Result<Project> {
        let sql = format!("SELECT {PROJECT_COLUMNS} FROM projects WHERE id = ?1");
        let project = self
            .conn
            .query_row(&sql, params![id], project_from_row)
            .optional()?;
        project.ok_or(Error::ProjectNotFound(id))
    }

    /// List all projects ordered by department, then display order.
    pub fn list_projects(&self) -> Result<Vec<Project>> {
        let sql = format!(
            "SELECT {PROJECT_COLUMNS} FROM projects ORDER BY department_id, sort_order, id"
        );
        let mut stmt = self.conn.prepare(&sql)?;
        let projects = stmt
            .query_map([], project_from_row)?
            .collect::<std::result::Result<Vec<_>, _>>()?;
        Ok(projects)
    }

    /// Overwrite every field of an existing project.
    pub fn update_project(&self, project: &Project) -> Result<()> {
        self.check_project_refs(project)?;
        let affected = self.conn.execute(
            "UPDATE projects SET name = ?1, department_id = ?2, sort_order = ?3,
             start_date = ?4, target_date = ?5, actual_completion_date = ?6,
             project_manager_id = ?7, description = ?8, status = ?9
             WHERE id = ?10",
            params![
                project.name,
                project.department_id,
                project.sort_order,
                project.start_date.map(format_date),
                project.target_date.map(format_date),
                project.actual_completion_date.map(format_date),
                project.project_manager_id,
                project.description,
                project.status.map(|s| s.as_str()),
                project.id,
            ],
        )?;

        if affected == 0 {
            return Err(Error::ProjectNotFound(project.id));
        }
        Ok(())
    }

    fn check_project_refs(&self, project: &Project) -> Result<()> {
        if !row_exists(&self.conn, "departments", project.department_id)? {
            return Err(Error::DepartmentNotFound(project.department_id));
        }
        if let Some(pm) = project.project_manager_id {
            if !row_exists(&self.conn, "people", pm)? {
                return Err(Error::PersonNotFound(pm));
            }
        }
        Ok(())
    }

    // ─────────────────────────────────────────────────────────────────────
    // Months and holidays
    // ─────────────────────────────────────────────────────────────────────

    /// Create an active allocation month.
    ///
    /// The date is normalized to the first of the month; the name defaults to
    /// the month's display name.
    pub fn create_month(&self, date: NaiveDate, name: Option<&str>) -> Result<AllocationMonth> {
        let month = first_of_month(date);
        let name = name
            .map(String::from)
            .unwrap_or_else(|| month_display_name(month));

        if self.find_month_by_date(month)?.is_some() {
            return Err(Error::Duplicate {
                kind: "month",
                name: format_date(month),
            });
        }

        self.conn.execute(
            "INSERT INTO allocation_months (name, month, is_active) VALUES (?1, ?2, 1)",
            params![name, format_date(month)],
        )?;
        Ok(AllocationMonth {
            id: self.conn.last_insert_rowid(),
            name,
            month,
            is_active: true,
        })
    }

    /// Get a month by ID.
    pub fn get_month(&self, id: i64) -> Result<AllocationMonth> {
        let month = self
            .conn
            .query_row(
                "SELECT id, name, month, is_active FROM allocation_months WHERE id = ?1",
                params![id],
                month_from_row,
            )
            .optional()?;
        month.ok_or(Error::MonthNotFound(id))
    }

    /// Find the month record starting on the first of `date`'s month.
    pub fn find_month_by_date(&self, date: NaiveDate) -> Result<Option<AllocationMonth>> {
        let month = self
            .conn
            .query_row(
                "SELECT id, name, month, is_active FROM allocation_months WHERE month = ?1",
                params![format_date(first_of_month(date))],
                month_from_row,
            )
            .optional()?;
        Ok(month)
    }

    /// List months ordered by date.
    pub fn list_months(&self, active_only: bool) -> Result<Vec<AllocationMonth>> {
        let sql = if active_only {
            "SELECT id, name, month, is_active FROM allocation_months
             WHERE is_active = 1 ORDER BY month"
        } else {
            "SELECT id, name, month, is_active FROM allocation_months ORDER BY month"
        };
        let mut stmt = self.conn.prepare(sql)?;
        let months = stmt
            .query_map([], month_from_row)?
            .collect::<std::result::Result<Vec<_>, _>>()?;
        Ok(months)
    }

    /// Toggle whether a month is offered for planning.
    pub fn set_month_active(&self, id: i64, active: bool) -> Result<()> {
        let affected = self.conn.execute(
            "UPDATE allocation_months SET is_active = ?1 WHERE id = ?2",
            params![active, id],
        )?;

        if affected == 0 {
            return Err(Error::MonthNotFound(id));
        }
        Ok(())
    }

    /// Record a holiday.
    pub fn create_holiday(&self, name: &str, date: NaiveDate) -> Result<Holiday> {
        self.conn.execute(
            "INSERT INTO holidays (name, date) VALUES (?1, ?2)",
            params![name, format_date(date)],
        )?;
        Ok(Holiday {
            id: self.conn.last_insert_rowid(),
            name: name.to_string(),
            date,
        })
    }

    /// List holidays ordered by date.
    pub fn list_holidays(&self) -> Result<Vec<Holiday>> {
        let mut stmt = self
            .conn
            .prepare("SELECT id, name, date FROM holidays ORDER BY date, id")?;
        let holidays = stmt
            .query_map([], |row| {
                let date_str: String = row.get(2)?;
                Ok(Holiday {
                    id: row.get(0)?,
                    name: row.get(1)?,
                    date: parse_date_col(&date_str, "date")?,
                })
            })?
            .collect::<std::result::Result<Vec<_>, _>>()?;
        Ok(holidays)
    }

    /// Remove a holiday.
    pub fn delete_holiday(&self, id: i64) -> Result<()> {
        let affected = self
            .conn
            .execute("DELETE FROM holidays WHERE id = ?1", params![id])?;
        if affected == 0 {
            return Err(Error::HolidayNotFound(id));
        }
        Ok(())
    }

    // ─────────────────────────────────────────────────────────────────────
    // Allocations
    // ─────────────────────────────────────────────────────────────────────

    /// Get all allocations for one month.
    pub fn allocations_for_month(&self, month_id: i64) -> Result<Vec<Allocation>> {
        let mut stmt = self.conn.prepare(
            "SELECT id, person_id, project_id, month_id, percentage
             FROM allocations WHERE month_id = ?1 ORDER BY person_id, project_id",
        )?;
        let allocations = stmt
            .query_map(params![month_id], allocation_from_row)?
            .collect::<std::result::Result<Vec<_>, _>>()?;
        Ok(allocations)
    }

    /// Get all allocations for one person across every month.
    pub fn allocations_for_person(&self, person_id: i64) -> Result<Vec<Allocation>> {
        let mut stmt = self.conn.prepare(
            "SELECT id, person_id, project_id, month_id, percentage
             FROM allocations WHERE person_id = ?1 ORDER BY month_id, project_id",
        )?;
        let allocations = stmt
            .query_map(params![person_id], allocation_from_row)?
            .collect::<std::result::Result<Vec<_>, _>>()?;
        Ok(allocations)
    }

    /// Load one month's allocations into an [`AllocationSet`].
    pub fn load_allocation_set(&self, month_id: i64) -> Result<AllocationSet> {
        AllocationSet::new(month_id, self.allocations_for_month(month_id)?)
    }

    // ─────────────────────────────────────────────────────────────────────
    // Estimates
    // ─────────────────────────────────────────────────────────────────────

    /// Create an estimate for a project, or return the existing one.
    pub fn create_estimate(&self, project_id: i64, blended_rate: f64) -> Result<Estimate> {
        validate_rate(blended_rate)?;
        if !row_exists(&self.conn, "projects", project_id)? {
            return Err(Error::ProjectNotFound(project_id));
        }
        self.conn.execute(
            "INSERT OR IGNORE INTO estimates (project_id, blended_rate) VALUES (?1, ?2)",
            params![project_id, blended_rate],
        )?;
        self.get_estimate(project_id)
    }

    /// Load a project's estimate with its stories and items in display order.
    pub fn get_estimate(&self, project_id: i64) -> Result<Estimate> {
        let header = self
            .conn
            .query_row(
                "SELECT id, blended_rate FROM estimates WHERE project_id = ?1",
                params![project_id],
                |row| Ok((row.get::<_, i64>(0)?, row.get::<_, f64>(1)?)),
            )
            .optional()?;
        let Some((id, blended_rate)) = header else {
            return Err(Error::EstimateNotFound(project_id));
        };

        let mut stmt = self.conn.prepare(
            "SELECT id, estimate_id, name, sort_order FROM user_stories
             WHERE estimate_id = ?1 ORDER BY sort_order, id",
        )?;
        let mut stories = stmt
            .query_map(params![id], |row| {
                Ok(UserStory {
                    id: row.get(0)?,
                    estimate_id: row.get(1)?,
                    name: row.get(2)?,
                    sort_order: row.get(3)?,
                    items: Vec::new(),
                })
            })?
            .collect::<std::result::Result<Vec<_>, _>>()?;

        let mut item_stmt = self.conn.prepare(
            "SELECT id, story_id, discipline, hours FROM estimate_items
             WHERE story_id = ?1 ORDER BY id",
        )?;
        for story in &mut stories {
            story.items = item_stmt
                .query_map(params![story.id], |row| {
                    Ok(EstimateItem {
                        id: row.get(0)?,
                        story_id: row.get(1)?,
                        discipline: row.get(2)?,
                        hours: row.get(3)?,
                    })
                })?
                .collect::<std::result::Result<Vec<_>, _>>()?;
        }

        Ok(Estimate {
            id,
            project_id,
            blended_rate,
            stories,
        })
    }

    /// Change a project's blended hourly rate.
    pub fn set_blended_rate(&self, project_id: i64, blended_rate: f64) -> Result<()> {
        validate_rate(blended_rate)?;
        let affected = self.conn.execute(
            "UPDATE estimates SET blended_rate = ?1 WHERE project_id = ?2",
            params![blended_rate, project_id],
        )?;
        if affected == 0 {
            return Err(Error::EstimateNotFound(project_id));
        }
        Ok(())
    }

    /// Append a user story with default hours for every standard discipline.
    pub fn add_story(&mut self, project_id: i64, name: &str) -> Result<UserStory> {
        let estimate_id: i64 = self
            .conn
            .query_row(
                "SELECT id FROM estimates WHERE project_id = ?1",
                params![project_id],
                |row| row.get(0),
            )
            .optional()?
            .ok_or(Error::EstimateNotFound(project_id))?;

        let tx = self.conn.transaction()?;
        let sort_order: i64 = tx.query_row(
            "SELECT COALESCE(MAX(sort_order), -1) + 1 FROM user_stories WHERE estimate_id = ?1",
            params![estimate_id],
            |row| row.get(0),
        )?;
        tx.execute(
            "INSERT INTO user_stories (estimate_id, name, sort_order) VALUES (?1, ?2, ?3)",
            params![estimate_id, name, sort_order],
        )?;
        let story_id = tx.last_insert_rowid();

        let mut items = Vec::with_capacity(STANDARD_DISCIPLINES.len());
        for discipline in STANDARD_DISCIPLINES {
            tx.execute(
                "INSERT INTO estimate_items (story_id, discipline, hours) VALUES (?1, ?2, ?3)",
                params![story_id, discipline, DEFAULT_ITEM_HOURS],
            )?;
            items.push(EstimateItem {
                id: tx.last_insert_rowid(),
                story_id,
                discipline: discipline.to_string(),
                hours: DEFAULT_ITEM_HOURS,
            });
        }
        tx.commit()?;

        Ok(UserStory {
            id: story_id,
            estimate_id,
            name: name.to_string(),
            sort_order,
            items,
        })
    }

    /// Set the hours for one discipline on a story, creating the item if needed.
    pub fn upsert_estimate_item(
        &self,
        story_id: i64,
        discipline: &str,
        hours: f64,
    ) -> Result<EstimateItem> {
        if !hours.is_finite() || hours < 0.0 {
            return Err(Error::InvalidHours(hours));
        }
        if !row_exists(&self.conn, "user_stories", story_id)? {
            return Err(Error::StoryNotFound(story_id));
        }
        self.conn.execute(
            "INSERT INTO estimate_items (story_id, discipline, hours) VALUES (?1, ?2, ?3)
             ON CONFLICT (story_id, discipline) DO UPDATE SET hours = excluded.hours",
            params![story_id, discipline, hours],
        )?;
        let id: i64 = self.conn.query_row(
            "SELECT id FROM estimate_items WHERE story_id = ?1 AND discipline = ?2",
            params![story_id, discipline],
            |row| row.get(0),
        )?;
        Ok(EstimateItem {
            id,
            story_id,
            discipline: discipline.to_string(),
            hours,
        })
    }

    /// Swap a story with its neighbour. Returns false at either end of the list.
    pub fn move_story(&mut self, story_id: i64, direction: MoveDirection) -> Result<bool> {
        let estimate_id: i64 = self
            .conn
            .query_row(
                "SELECT estimate_id FROM user_stories WHERE id = ?1",
                params![story_id],
                |row| row.get(0),
            )
            .optional()?
            .ok_or(Error::StoryNotFound(story_id))?;

        let tx = self.conn.transaction()?;
        let mut ids: Vec<i64> = {
            let mut stmt = tx.prepare(
                "SELECT id FROM user_stories WHERE estimate_id = ?1 ORDER BY sort_order, id",
            )?;
            let ids = stmt
                .query_map(params![estimate_id], |row| row.get(0))?
                .collect::<std::result::Result<Vec<i64>, _>>()?;
            ids
        };

        let index = ids
            .iter()
            .position(|&id| id == story_id)
            .ok_or(Error::StoryNotFound(story_id))?;
        let Some(target) = swap_target(index, ids.len(), direction) else {
            return Ok(false);
        };
        ids.swap(index, target);

        for (order, id) in ids.iter().enumerate() {
            tx.execute(
                "UPDATE user_stories SET sort_order = ?1 WHERE id = ?2",
                params![order as i64, id],
            )?;
        }
        tx.commit()?;
        Ok(true)
    }

    /// Delete a user story together with its estimate items.
    pub fn delete_story(&mut self, story_id: i64) -> Result<()> {
        let tx = self.conn.transaction()?;
        tx.execute(
            "DELETE FROM estimate_items WHERE story_id = ?1",
            params![story_id],
        )?;
        let affected = tx.execute("DELETE FROM user_stories WHERE id = ?1", params![story_id])?;
        if affected == 0 {
            return Err(Error::StoryNotFound(story_id));
        }
        tx.commit()?;
        tracing::debug!(story = story_id, "user story deleted");
        Ok(())
    }

    /// Total estimated hours for every project that has an estimate.
    pub fn estimate_hours_by_project(&self) -> Result<BTreeMap<i64, f64>> {
        let mut stmt = self.conn.prepare(
            "SELECT e.project_id, COALESCE(SUM(i.hours), 0.0)
             FROM estimates e
             LEFT JOIN user_stories s ON s.estimate_id = e.id
             LEFT JOIN estimate_items i ON i.story_id = s.id
             GROUP BY e.project_id",
        )?;
        let totals = stmt
            .query_map([], |row| Ok((row.get::<_, i64>(0)?, row.get::<_, f64>(1)?)))?
            .collect::<std::result::Result<BTreeMap<_, _>, _>>()?;
        Ok(totals)
    }

    // ─────────────────────────────────────────────────────────────────────
    // Weekly reports
    // ─────────────────────────────────────────────────────────────────────

    /// Write the report for the week containing `date`, creating it if needed.
    ///
    /// Sections left as `None` in `update` keep their stored text.
    pub fn upsert_weekly_report(
        &self,
        project_id: i64,
        date: NaiveDate,
        update: &WeeklyReportUpdate,
    ) -> Result<WeeklyReport> {
        if !row_exists(&self.conn, "projects", project_id)? {
            return Err(Error::ProjectNotFound(project_id));
        }
        let week = week_starting(date);
        self.conn.execute(
            "INSERT INTO weekly_reports
             (project_id, week_starting, accomplishments, challenges, goals, updated_at)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6)
             ON CONFLICT (project_id, week_starting) DO UPDATE SET
                 accomplishments = COALESCE(excluded.accomplishments, weekly_reports.accomplishments),
                 challenges = COALESCE(excluded.challenges, weekly_reports.challenges),
                 goals = COALESCE(excluded.goals, weekly_reports.goals),
                 updated_at = excluded.updated_at",
            params![
                project_id,
                format_date(week),
                update.accomplishments,
                update.challenges,
                update.goals,
                Utc::now().to_rfc3339(),
            ],
        )?;
        tracing::debug!(project = project_id, week = %week, "weekly report saved");
        self.get_weekly_report(project_id, week)
    }

    /// Get the report for the week containing `date`.
    pub fn get_weekly_report(&self, project_id: i64, date: NaiveDate) -> Result<WeeklyReport> {
        let week = week_starting(date);
        let sql = format!(
            "SELECT {WEEKLY_COLUMNS} FROM weekly_reports
             WHERE project_id = ?1 AND week_starting = ?2"
        );
        let report = self
            .conn
            .query_row(&sql, params![project_id, format_date(week)], weekly_from_row)
            .optional()?;
        report.ok_or_else(|| Error::WeeklyReportNotFound {
            project_id,
            week: format_date(week),
        })
    }

    /// A project's reports, newest week first.
    pub fn weekly_reports_for_project(&self, project_id: i64) -> Result<Vec<WeeklyReport>> {
        if !row_exists(&self.conn, "projects", project_id)? {
            return Err(Error::ProjectNotFound(project_id));
        }
        let sql = format!(
            "SELECT {WEEKLY_COLUMNS} FROM weekly_reports
             WHERE project_id = ?1 ORDER BY week_starting DESC"
        );
        let mut stmt = self.conn.prepare(&sql)?;
        let reports = stmt
            .query_map(params![project_id], weekly_from_row)?
            .collect::<std::result::Result<Vec<_>, _>>()?;
        Ok(reports)
    }

    /// Every project's report for the week containing `date`, by project id.
    pub fn weekly_reports_for_week(&self, date: NaiveDate) -> Result<Vec<WeeklyReport>> {
        let sql = format!(
            "SELECT {WEEKLY_COLUMNS} FROM weekly_reports
             WHERE week_starting = ?1 ORDER BY project_id"
        );
        let mut stmt = self.conn.prepare(&sql)?;
        let reports = stmt
            .query_map(params![format_date(week_starting(date))], weekly_from_row)?
            .collect::<std::result::Result<Vec<_>, _>>()?;
        Ok(reports)
    }

    // ─────────────────────────────────────────────────────────────────────
    // Snapshots
    // ─────────────────────────────────────────────────────────────────────

    /// Load everything needed to report on `month`.
    pub fn snapshot(&self, month: Option<AllocationMonth>) -> Result<Snapshot> {
        let allocations = match &month {
            Some(m) => self.load_allocation_set(m.id)?,
            None => AllocationSet::empty(0),
        };
        Ok(Snapshot {
            month,
            departments: self.departments_with_projects()?,
            expertises: self.list_expertises()?,
            people: self.list_people()?,
            holidays: self.list_holidays()?,
            allocations,
            estimate_hours: self.estimate_hours_by_project()?,
        })
    }
}

fn validate_rate(rate: f64) -> Result<()> {
    if !rate.is_finite() || rate < 0.0 {
        return Err(Error::InvalidRate(rate));
    }
    Ok(())
}

impl AllocationStore for Database {
    fn upsert_allocation(&mut self, request: &AllocationUpsert) -> Result<UpsertOutcome> {
        request.validate()?;

        let tx = self.conn.transaction()?;
        if !row_exists(&tx, "people", request.person_id)? {
            return Err(Error::PersonNotFound(request.person_id));
        }
        if !row_exists(&tx, "projects", request.project_id)? {
            return Err(Error::ProjectNotFound(request.project_id));
        }
        if !row_exists(&tx, "allocation_months", request.month_id)? {
            return Err(Error::MonthNotFound(request.month_id));
        }

        let previous: Option<f64> = tx
            .query_row(
                "SELECT percentage FROM allocations
                 WHERE person_id = ?1 AND project_id = ?2 AND month_id = ?3",
                params![request.person_id, request.project_id, request.month_id],
                |row| row.get(0),
            )
            .optional()?;

        let outcome = if request.is_removal() {
            match previous {
                Some(previous) => {
                    tx.execute(
                        "DELETE FROM allocations
                         WHERE person_id = ?1 AND project_id = ?2 AND month_id = ?3",
                        params![request.person_id, request.project_id, request.month_id],
                    )?;
                    UpsertOutcome::Removed { previous }
                }
                None => UpsertOutcome::Unchanged,
            }
        } else {
            tx.execute(
                "INSERT INTO allocations (person_id, project_id, month_id, percentage, updated_at)
                 VALUES (?1, ?2, ?3, ?4, ?5)
                 ON CONFLICT (person_id, project_id, month_id)
                 DO UPDATE SET percentage = excluded.percentage, updated_at = excluded.updated_at",
                params![
                    request.person_id,
                    request.project_id,
                    request.month_id,
                    request.percentage,
                    Utc::now().to_rfc3339(),
                ],
            )?;
            match previous {
                Some(previous) => UpsertOutcome::Updated { previous },
                None => UpsertOutcome::Created,
            }
        };
        tx.commit()?;

        tracing::debug!(
            person = request.person_id,
            project = request.project_id,
            month = request.month_id,
            percentage = request.percentage,
            %outcome,
            "allocation upserted"
        );
        Ok(outcome)
    }
}

#[cfg(test)]
#[path = "db_tests.rs"]
mod tests;
