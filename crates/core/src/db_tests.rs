// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

#![allow(clippy::unwrap_used)]

use super::*;
use crate::allocation::{apply_batch, AllocationStatus};
use crate::report::MonthReport;

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

struct Fixture {
    db: Database,
    david: i64,
    travis: i64,
    overhead: i64,
    engage: i64,
    november: i64,
}

fn fixture() -> Fixture {
    let db = Database::open_in_memory().unwrap();
    let software = db.create_expertise("Software").unwrap();
    let pm = db.create_expertise("Project Management").unwrap();
    let david = db.create_person("David", None, software.id).unwrap();
    let travis = db
        .create_person("Travis", Some("travis@example.com"), pm.id)
        .unwrap();
    let corporate = db.create_department("Corporate", 1).unwrap();
    let wellness = db.create_department("Wellness", 2).unwrap();
    let overhead = db
        .create_project(&Project::new(0, "Overhead", corporate.id).with_start(date(2025, 1, 1)))
        .unwrap();
    let engage = db
        .create_project(&Project::new(0, "Engage360", wellness.id).with_target(date(2026, 3, 1)))
        .unwrap();
    let november = db.create_month(date(2025, 11, 1), None).unwrap();

    Fixture {
        db,
        david: david.id,
        travis: travis.id,
        overhead: overhead.id,
        engage: engage.id,
        november: november.id,
    }
}

#[test]
fn expertise_round_trip() {
    let db = Database::open_in_memory().unwrap();
    db.create_expertise("QA").unwrap();
    db.create_expertise("Data").unwrap();

    let names: Vec<String> = db
        .list_expertises()
        .unwrap()
        .into_iter()
        .map(|e| e.name)
        .collect();
    assert_eq!(names, vec!["QA", "Data"]);
    assert_eq!(db.get_expertise_by_name("qa").unwrap().name, "QA");
}

#[test]
fn duplicate_expertise_rejected() {
    let db = Database::open_in_memory().unwrap();
    db.create_expertise("QA").unwrap();
    let err = db.create_expertise("QA").unwrap_err();
    assert!(matches!(err, Error::Duplicate { kind: "expertise", .. }));
}

#[test]
fn unknown_expertise_name() {
    let db = Database::open_in_memory().unwrap();
    let err = db.get_expertise_by_name("Astrology").unwrap_err();
    assert!(matches!(err, Error::ExpertiseNotFound(_)));
}

#[test]
fn person_requires_existing_expertise() {
    let db = Database::open_in_memory().unwrap();
    let err = db.create_person("Nobody", None, 42).unwrap_err();
    assert!(matches!(err, Error::ExpertiseNotFound(_)));
}

#[test]
fn person_round_trip() {
    let f = fixture();
    let travis = f.db.get_person(f.travis).unwrap();
    assert_eq!(travis.name, "Travis");
    assert_eq!(travis.email.as_deref(), Some("travis@example.com"));
    assert_eq!(f.db.list_people().unwrap().len(), 2);
    assert!(matches!(
        f.db.get_person(999).unwrap_err(),
        Error::PersonNotFound(999)
    ));
}

#[test]
fn project_dates_round_trip() {
    let f = fixture();
    let project = f.db.get_project(f.overhead).unwrap();
    assert_eq!(project.name, "Overhead");
    assert_eq!(project.start_date, Some(date(2025, 1, 1)));
    assert_eq!(project.target_date, None);
}

#[test]
fn project_requires_department() {
    let db = Database::open_in_memory().unwrap();
    let err = db.create_project(&Project::new(0, "Orphan", 9)).unwrap_err();
    assert!(matches!(err, Error::DepartmentNotFound(9)));
}

#[test]
fn update_project_fields() {
    let f = fixture();
    let mut project = f.db.get_project(f.engage).unwrap();
    project.actual_completion_date = Some(date(2025, 10, 15));
    project.project_manager_id = Some(f.travis);
    f.db.update_project(&project).unwrap();

    let reloaded = f.db.get_project(f.engage).unwrap();
    assert!(reloaded.is_completed());
    assert_eq!(reloaded.project_manager_id, Some(f.travis));
}

#[test]
fn update_project_rejects_unknown_manager() {
    let f = fixture();
    let mut project = f.db.get_project(f.engage).unwrap();
    project.project_manager_id = Some(77);
    assert!(matches!(
        f.db.update_project(&project).unwrap_err(),
        Error::PersonNotFound(77)
    ));
}

#[test]
fn update_missing_project() {
    let f = fixture();
    let mut project = f.db.get_project(f.engage).unwrap();
    project.id = 500;
    assert!(matches!(
        f.db.update_project(&project).unwrap_err(),
        Error::ProjectNotFound(500)
    ));
}

#[test]
fn departments_ordered_with_projects() {
    let f = fixture();
    f.db.create_department("Benefits", 0).unwrap();
    let depts = f.db.departments_with_projects().unwrap();

    let names: Vec<&str> = depts.iter().map(|d| d.name.as_str()).collect();
    assert_eq!(names, vec!["Benefits", "Corporate", "Wellness"]);
    assert!(depts[0].projects.is_empty());
    assert_eq!(depts[1].projects[0].name, "Overhead");
    assert_eq!(depts[2].projects[0].name, "Engage360");
}

#[test]
fn month_normalized_and_named() {
    let db = Database::open_in_memory().unwrap();
    let month = db.create_month(date(2025, 12, 17), None).unwrap();
    assert_eq!(month.month, date(2025, 12, 1));
    assert_eq!(month.name, "December 2025");
    assert!(month.is_active);

    let found = db.find_month_by_date(date(2025, 12, 31)).unwrap().unwrap();
    assert_eq!(found.id, month.id);
}

#[test]
fn duplicate_month_rejected() {
    let f = fixture();
    let err = f.db.create_month(date(2025, 11, 20), None).unwrap_err();
    assert!(matches!(err, Error::Duplicate { kind: "month", .. }));
}

#[test]
fn months_listed_by_date_and_filtered() {
    let f = fixture();
    let october = f.db.create_month(date(2025, 10, 1), Some("Oct")).unwrap();
    f.db.set_month_active(f.november, false).unwrap();

    let all = f.db.list_months(false).unwrap();
    assert_eq!(all[0].id, october.id);
    assert_eq!(all[1].id, f.november);

    let active = f.db.list_months(true).unwrap();
    assert_eq!(active.len(), 1);
    assert_eq!(active[0].name, "Oct");
}

#[test]
fn set_active_on_missing_month() {
    let db = Database::open_in_memory().unwrap();
    assert!(matches!(
        db.set_month_active(3, true).unwrap_err(),
        Error::MonthNotFound(3)
    ));
}

#[test]
fn holidays_ordered_and_deletable() {
    let db = Database::open_in_memory().unwrap();
    let friday = db.create_holiday("Day after", date(2025, 11, 28)).unwrap();
    db.create_holiday("Thanksgiving", date(2025, 11, 27)).unwrap();

    let holidays = db.list_holidays().unwrap();
    assert_eq!(holidays[0].name, "Thanksgiving");

    db.delete_holiday(friday.id).unwrap();
    assert_eq!(db.list_holidays().unwrap().len(), 1);
    assert!(matches!(
        db.delete_holiday(friday.id).unwrap_err(),
        Error::HolidayNotFound(_)
    ));
}

#[test]
fn upsert_creates_updates_and_removes() {
    let mut f = fixture();
    let (david, overhead, november) = (f.david, f.overhead, f.november);
    let key = |pct| AllocationUpsert::new(david, overhead, november, pct);

    let created = f.db.upsert_allocation(&key(60.0)).unwrap();
    assert_eq!(created, UpsertOutcome::Created);

    let updated = f.db.upsert_allocation(&key(40.0)).unwrap();
    assert_eq!(updated, UpsertOutcome::Updated { previous: 60.0 });
    assert_eq!(f.db.allocations_for_month(f.november).unwrap().len(), 1);

    let removed = f.db.upsert_allocation(&key(0.0)).unwrap();
    assert_eq!(removed, UpsertOutcome::Removed { previous: 40.0 });
    assert!(f.db.allocations_for_month(f.november).unwrap().is_empty());

    let unchanged = f.db.upsert_allocation(&key(0.0)).unwrap();
    assert_eq!(unchanged, UpsertOutcome::Unchanged);
}

#[test]
fn upsert_validates_references() {
    let mut f = fixture();

    let err = f
        .db
        .upsert_allocation(&AllocationUpsert::new(99, f.overhead, f.november, 10.0))
        .unwrap_err();
    assert!(matches!(err, Error::PersonNotFound(99)));

    let err = f
        .db
        .upsert_allocation(&AllocationUpsert::new(f.david, 99, f.november, 10.0))
        .unwrap_err();
    assert!(matches!(err, Error::ProjectNotFound(99)));

    let err = f
        .db
        .upsert_allocation(&AllocationUpsert::new(f.david, f.overhead, 99, 10.0))
        .unwrap_err();
    assert!(matches!(err, Error::MonthNotFound(99)));

    assert!(f.db.allocations_for_month(f.november).unwrap().is_empty());
}

#[test]
fn upsert_rejects_out_of_range() {
    let mut f = fixture();
    let err = f
        .db
        .upsert_allocation(&AllocationUpsert::new(f.david, f.overhead, f.november, 120.0))
        .unwrap_err();
    assert!(matches!(err, Error::InvalidPercentage(_)));
}

#[test]
fn store_and_set_agree() {
    let mut f = fixture();
    let requests = [
        AllocationUpsert::new(f.david, f.overhead, f.november, 60.0),
        AllocationUpsert::new(f.david, f.engage, f.november, 55.0),
        AllocationUpsert::new(f.travis, f.overhead, f.november, 30.0),
        AllocationUpsert::new(f.travis, f.overhead, f.november, 0.0),
    ];

    let mut set = AllocationSet::empty(f.november);
    let db_outcome = apply_batch(&mut f.db, &requests);
    let set_outcome = apply_batch(&mut set, &requests);
    assert!(db_outcome.is_complete());
    assert_eq!(
        db_outcome
            .applied
            .iter()
            .map(|(_, o)| *o)
            .collect::<Vec<_>>(),
        set_outcome
            .applied
            .iter()
            .map(|(_, o)| *o)
            .collect::<Vec<_>>()
    );

    let loaded = f.db.load_allocation_set(f.november).unwrap();
    assert_eq!(loaded.total_for(f.david), 115.0);
    assert_eq!(loaded.status_for(f.david), AllocationStatus::Over);
    assert_eq!(loaded.total_for(f.travis), set.total_for(f.travis));
}

#[test]
fn allocations_for_person_span_months() {
    let mut f = fixture();
    let december = f.db.create_month(date(2025, 12, 1), None).unwrap();
    f.db
        .upsert_allocation(&AllocationUpsert::new(f.david, f.overhead, f.november, 50.0))
        .unwrap();
    f.db
        .upsert_allocation(&AllocationUpsert::new(f.david, f.overhead, december.id, 80.0))
        .unwrap();

    let rows = f.db.allocations_for_person(f.david).unwrap();
    assert_eq!(rows.len(), 2);
    assert!(f.db.allocations_for_person(f.travis).unwrap().is_empty());
}

#[test]
fn estimate_create_is_idempotent() {
    let f = fixture();
    let first = f.db.create_estimate(f.engage, 100.0).unwrap();
    let second = f.db.create_estimate(f.engage, 150.0).unwrap();
    assert_eq!(first.id, second.id);
    assert_eq!(second.blended_rate, 100.0);
}

#[test]
fn estimate_requires_project() {
    let db = Database::open_in_memory().unwrap();
    assert!(matches!(
        db.create_estimate(5, 100.0).unwrap_err(),
        Error::ProjectNotFound(5)
    ));
}

#[test]
fn missing_estimate() {
    let f = fixture();
    assert!(matches!(
        f.db.get_estimate(f.engage).unwrap_err(),
        Error::EstimateNotFound(_)
    ));
    assert!(matches!(
        f.db.set_blended_rate(f.engage, 90.0).unwrap_err(),
        Error::EstimateNotFound(_)
    ));
}

#[test]
fn invalid_rate_rejected() {
    let f = fixture();
    assert!(matches!(
        f.db.create_estimate(f.engage, -1.0).unwrap_err(),
        Error::InvalidRate(_)
    ));
}

#[test]
fn new_story_gets_default_items() {
    let mut f = fixture();
    f.db.create_estimate(f.engage, 100.0).unwrap();
    let story = f.db.add_story(f.engage, "Login").unwrap();

    assert_eq!(story.items.len(), STANDARD_DISCIPLINES.len());
    assert_eq!(story.hours(), 64.0);

    let estimate = f.db.get_estimate(f.engage).unwrap();
    assert_eq!(estimate.total_hours(), 64.0);
    assert_eq!(estimate.total_cost(), 6400.0);
}

#[test]
fn item_upsert_replaces_hours() {
    let mut f = fixture();
    f.db.create_estimate(f.engage, 100.0).unwrap();
    let story = f.db.add_story(f.engage, "Login").unwrap();

    f.db.upsert_estimate_item(story.id, "QA", 20.0).unwrap();
    f.db
        .upsert_estimate_item(story.id, "Security Review", 4.0)
        .unwrap();

    let estimate = f.db.get_estimate(f.engage).unwrap();
    assert_eq!(estimate.discipline_hours("QA"), 20.0);
    assert_eq!(estimate.stories[0].items.len(), 9);
    assert_eq!(estimate.total_hours(), 64.0 + 12.0 + 4.0);
}

#[test]
fn item_upsert_validation() {
    let mut f = fixture();
    f.db.create_estimate(f.engage, 100.0).unwrap();
    let story = f.db.add_story(f.engage, "Login").unwrap();

    assert!(matches!(
        f.db.upsert_estimate_item(story.id, "QA", -2.0).unwrap_err(),
        Error::InvalidHours(_)
    ));
    assert!(matches!(
        f.db.upsert_estimate_item(404, "QA", 2.0).unwrap_err(),
        Error::StoryNotFound(404)
    ));
}

#[test]
fn stories_reorder() {
    let mut f = fixture();
    f.db.create_estimate(f.engage, 100.0).unwrap();
    let a = f.db.add_story(f.engage, "A").unwrap();
    let b = f.db.add_story(f.engage, "B").unwrap();
    let c = f.db.add_story(f.engage, "C").unwrap();

    assert!(f.db.move_story(c.id, MoveDirection::Up).unwrap());
    assert!(!f.db.move_story(a.id, MoveDirection::Up).unwrap());
    assert!(!f.db.move_story(b.id, MoveDirection::Down).unwrap());

    let names: Vec<String> = f
        .db
        .get_estimate(f.engage)
        .unwrap()
        .stories
        .into_iter()
        .map(|s| s.name)
        .collect();
    assert_eq!(names, vec!["A", "C", "B"]);
}

#[test]
fn estimate_hours_include_empty_estimates() {
    let mut f = fixture();
    f.db.create_estimate(f.engage, 100.0).unwrap();
    f.db.create_estimate(f.overhead, 100.0).unwrap();
    f.db.add_story(f.engage, "Login").unwrap();

    let totals = f.db.estimate_hours_by_project().unwrap();
    assert_eq!(totals.get(&f.engage), Some(&64.0));
    assert_eq!(totals.get(&f.overhead), Some(&0.0));
}

#[test]
fn snapshot_feeds_report() {
    let mut f = fixture();
    f.db.create_holiday("Thanksgiving", date(2025, 11, 27)).unwrap();
    f.db.create_holiday("Thanksgiving", date(2025, 11, 28)).unwrap();
    f.db
        .upsert_allocation(&AllocationUpsert::new(f.david, f.engage, f.november, 100.0))
        .unwrap();

    let month = f.db.get_month(f.november).unwrap();
    let report = MonthReport::build(&f.db.snapshot(Some(month)).unwrap());
    assert_eq!(report.available_hours, 144);
    assert_eq!(report.team_hours, 288.0);
    assert_eq!(report.departments[1].projects[0].allocated_hours, 144.0);
    assert_eq!(report.status_counts.full, 1);
}

#[test]
fn open_creates_file_and_parent() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("nested").join("resplan.db");
    {
        let db = Database::open(&path).unwrap();
        db.create_expertise("QA").unwrap();
    }
    let db = Database::open(&path).unwrap();
    assert_eq!(db.list_expertises().unwrap().len(), 1);
}

#[test]
fn migration_adds_project_details_to_old_tables() {
    let conn = Connection::open_in_memory().unwrap();
    conn.execute_batch(
        "CREATE TABLE projects (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            name TEXT NOT NULL,
            department_id INTEGER NOT NULL,
            sort_order INTEGER NOT NULL DEFAULT 0,
            start_date TEXT,
            target_date TEXT,
            actual_completion_date TEXT,
            project_manager_id INTEGER
        );
        INSERT INTO projects (name, department_id) VALUES ('Legacy', 1);",
    )
    .unwrap();
    run_migrations(&conn).unwrap();
    run_migrations(&conn).unwrap();

    let db = Database { conn };
    let project = db.get_project(1).unwrap();
    assert_eq!(project.name, "Legacy");
    assert_eq!(project.description, None);
    assert_eq!(project.status, None);
}

#[test]
fn project_description_and_status_round_trip() {
    let f = fixture();
    let mut project = f.db.get_project(f.engage).unwrap();
    project.description = Some("Member wellness portal".to_string());
    project.status = Some(ProjectStatus::BusinessHold);
    f.db.update_project(&project).unwrap();

    let reloaded = f.db.get_project(f.engage).unwrap();
    assert_eq!(reloaded.description.as_deref(), Some("Member wellness portal"));
    assert_eq!(reloaded.status, Some(ProjectStatus::BusinessHold));
}

#[test]
fn update_person_fields() {
    let f = fixture();
    let qa = f.db.create_expertise("QA").unwrap();
    let mut david = f.db.get_person(f.david).unwrap();
    david.name = "David R".to_string();
    david.email = Some("david@example.com".to_string());
    david.expertise_id = qa.id;
    f.db.update_person(&david).unwrap();

    assert_eq!(f.db.get_person(f.david).unwrap(), david);
}

#[test]
fn update_person_checks_references() {
    let f = fixture();
    let mut david = f.db.get_person(f.david).unwrap();
    david.expertise_id = 42;
    assert!(matches!(
        f.db.update_person(&david).unwrap_err(),
        Error::ExpertiseNotFound(_)
    ));

    let mut ghost = f.db.get_person(f.david).unwrap();
    ghost.id = 999;
    assert!(matches!(
        f.db.update_person(&ghost).unwrap_err(),
        Error::PersonNotFound(999)
    ));
}

#[test]
fn rename_expertise() {
    let db = Database::open_in_memory().unwrap();
    let qa = db.create_expertise("QA").unwrap();
    db.create_expertise("Data").unwrap();

    assert_eq!(db.update_expertise(qa.id, "Quality").unwrap().name, "Quality");
    assert_eq!(db.get_expertise(qa.id).unwrap().name, "Quality");
    assert!(matches!(
        db.update_expertise(qa.id, "Data").unwrap_err(),
        Error::Duplicate { kind: "expertise", .. }
    ));
    assert!(matches!(
        db.update_expertise(99, "Ops").unwrap_err(),
        Error::ExpertiseNotFound(_)
    ));
}

#[test]
fn delete_expertise_only_when_unused() {
    let f = fixture();
    let software = f.db.get_expertise_by_name("Software").unwrap();
    assert!(matches!(
        f.db.delete_expertise(software.id).unwrap_err(),
        Error::ExpertiseInUse { people: 1, .. }
    ));

    let qa = f.db.create_expertise("QA").unwrap();
    f.db.delete_expertise(qa.id).unwrap();
    assert!(matches!(
        f.db.get_expertise(qa.id).unwrap_err(),
        Error::ExpertiseNotFound(_)
    ));
}

#[test]
fn delete_story_removes_items() {
    let mut f = fixture();
    f.db.create_estimate(f.engage, 100.0).unwrap();
    let login = f.db.add_story(f.engage, "Login").unwrap();
    f.db.add_story(f.engage, "Signup").unwrap();

    f.db.delete_story(login.id).unwrap();

    let estimate = f.db.get_estimate(f.engage).unwrap();
    assert_eq!(estimate.stories.len(), 1);
    assert_eq!(estimate.stories[0].name, "Signup");
    assert_eq!(estimate.total_hours(), 64.0);
    let orphans: i64 = f
        .db
        .conn
        .query_row(
            "SELECT COUNT(*) FROM estimate_items WHERE story_id = ?1",
            params![login.id],
            |row| row.get(0),
        )
        .unwrap();
    assert_eq!(orphans, 0);
    assert!(matches!(
        f.db.delete_story(login.id).unwrap_err(),
        Error::StoryNotFound(_)
    ));
}

#[test]
fn weekly_report_keyed_by_monday() {
    let f = fixture();
    let update = WeeklyReportUpdate {
        accomplishments: Some("Finished login".to_string()),
        ..WeeklyReportUpdate::default()
    };
    // Sunday belongs to the week starting the previous Monday.
    let report = f
        .db
        .upsert_weekly_report(f.engage, date(2025, 11, 23), &update)
        .unwrap();
    assert_eq!(report.week_starting, date(2025, 11, 17));

    let again = f
        .db
        .get_weekly_report(f.engage, date(2025, 11, 19))
        .unwrap();
    assert_eq!(again.id, report.id);
    assert_eq!(again.accomplishments.as_deref(), Some("Finished login"));
}

#[test]
fn weekly_report_upsert_keeps_untouched_sections() {
    let f = fixture();
    let first = WeeklyReportUpdate {
        accomplishments: Some("Finished login".to_string()),
        challenges: Some("Vendor API".to_string()),
        goals: None,
    };
    let created = f
        .db
        .upsert_weekly_report(f.engage, date(2025, 11, 17), &first)
        .unwrap();

    let second = WeeklyReportUpdate {
        goals: Some("Start signup".to_string()),
        challenges: Some(String::new()),
        ..WeeklyReportUpdate::default()
    };
    let updated = f
        .db
        .upsert_weekly_report(f.engage, date(2025, 11, 20), &second)
        .unwrap();

    assert_eq!(updated.id, created.id);
    assert_eq!(updated.accomplishments.as_deref(), Some("Finished login"));
    assert_eq!(updated.challenges, None);
    assert_eq!(updated.goals.as_deref(), Some("Start signup"));
}

#[test]
fn weekly_reports_listing() {
    let f = fixture();
    let update = WeeklyReportUpdate {
        goals: Some("Plan".to_string()),
        ..WeeklyReportUpdate::default()
    };
    f.db.upsert_weekly_report(f.engage, date(2025, 11, 3), &update)
        .unwrap();
    f.db.upsert_weekly_report(f.engage, date(2025, 11, 17), &update)
        .unwrap();
    f.db.upsert_weekly_report(f.overhead, date(2025, 11, 18), &update)
        .unwrap();

    let weeks: Vec<NaiveDate> = f
        .db
        .weekly_reports_for_project(f.engage)
        .unwrap()
        .into_iter()
        .map(|r| r.week_starting)
        .collect();
    assert_eq!(weeks, vec![date(2025, 11, 17), date(2025, 11, 3)]);

    let projects: Vec<i64> = f
        .db
        .weekly_reports_for_week(date(2025, 11, 21))
        .unwrap()
        .into_iter()
        .map(|r| r.project_id)
        .collect();
    assert_eq!(projects, vec![f.overhead, f.engage]);
}

#[test]
fn weekly_report_errors() {
    let f = fixture();
    assert!(matches!(
        f.db
            .upsert_weekly_report(404, date(2025, 11, 17), &WeeklyReportUpdate::default())
            .unwrap_err(),
        Error::ProjectNotFound(404)
    ));
    assert!(matches!(
        f.db.get_weekly_report(f.engage, date(2025, 11, 17)).unwrap_err(),
        Error::WeeklyReportNotFound { .. }
    ));
    assert!(matches!(
        f.db.weekly_reports_for_project(404).unwrap_err(),
        Error::ProjectNotFound(404)
    ));
}
