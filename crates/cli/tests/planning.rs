// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

#![allow(clippy::unwrap_used)]
#![allow(clippy::expect_used)]

mod common;
use common::*;

#[test]
fn hours_for_thanksgiving_month() {
    let temp = seeded_temp();
    resplan()
        .args(["hours", "-m", "2025-11"])
        .current_dir(temp.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("Available: 144h per person"))
        .stdout(predicate::str::contains("Team: 432h for 3 people"));
}

#[test]
fn over_allocation_shows_in_report() {
    let temp = seeded_temp();
    ok(
        &temp,
        &["alloc", "set", "1", "1", "60", "1", "2", "55", "-m", "2025-11"],
    );

    let out = ok(&temp, &["report", "-m", "2025-11", "-o", "json"]);
    let report: serde_json::Value = serde_json::from_str(&out).unwrap();
    let david = &report["expertises"][0]["people"][0];
    assert_eq!(david["total_percentage"], 115.0);
    assert_eq!(david["status"], "over");
    assert_eq!(report["departments"][0]["projects"][0]["allocated_hours"], 0.6 * 144.0);
}

#[test]
fn zero_percent_removes_allocation() {
    let temp = seeded_temp();
    ok(&temp, &["alloc", "set", "2", "2", "60", "-m", "2025-11"]);
    resplan()
        .args(["alloc", "set", "2", "2", "0", "-m", "2025-11"])
        .current_dir(temp.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("removed (was 60%)"));

    resplan()
        .args(["alloc", "show", "-m", "2025-11"])
        .current_dir(temp.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("No allocations"));
}

#[test]
fn partial_batch_reports_failures() {
    let temp = seeded_temp();
    resplan()
        .args(["alloc", "set", "1", "1", "50", "99", "1", "50", "-m", "2025-11"])
        .current_dir(temp.path())
        .assert()
        .failure()
        .stderr(predicate::str::contains("person not found: 99"))
        .stderr(predicate::str::contains("1 applied, 1 failed"));

    let out = ok(&temp, &["alloc", "show", "-m", "2025-11", "-o", "json"]);
    let grid: serde_json::Value = serde_json::from_str(&out).unwrap();
    assert_eq!(grid["allocations"].as_array().unwrap().len(), 1);
}

#[test]
fn out_of_range_percentage_rejected() {
    let temp = seeded_temp();
    resplan()
        .args(["alloc", "set", "1", "1", "120", "-m", "2025-11"])
        .current_dir(temp.path())
        .assert()
        .failure()
        .stderr(predicate::str::contains("between 0 and 100"));
}

#[test]
fn completed_project_leaves_scope() {
    let temp = seeded_temp();
    ok(&temp, &["project", "edit", "2", "completed", "2025-10-15"]);

    let out = ok(&temp, &["project", "list", "-m", "2025-11"]);
    assert!(out.contains("Overhead"));
    assert!(!out.contains("Engage360"));

    let all = ok(&temp, &["project", "list"]);
    assert!(all.contains("Engage360"));
}

#[test]
fn unknown_project_attribute() {
    let temp = seeded_temp();
    resplan()
        .args(["project", "edit", "1", "budget", "5"])
        .current_dir(temp.path())
        .assert()
        .failure()
        .stderr(predicate::str::contains("unknown attribute 'budget'"));
}

#[test]
fn person_show_lists_monthly_totals() {
    let temp = seeded_temp();
    ok(&temp, &["month", "add", "2025-12"]);
    ok(&temp, &["alloc", "set", "3", "1", "100", "-m", "2025-11"]);
    ok(&temp, &["alloc", "set", "3", "1", "40", "-m", "2025-12"]);

    let out = ok(&temp, &["person", "show", "3"]);
    assert!(out.contains("November 2025: 100% fully allocated"));
    assert!(out.contains("December 2025: 40% under-allocated"));
}

#[test]
fn estimate_workflow() {
    let temp = seeded_temp();
    ok(&temp, &["estimate", "create", "2", "--rate", "150"]);
    ok(&temp, &["estimate", "story", "2", "Login"]);
    ok(&temp, &["estimate", "item", "1", "QA", "20"]);

    resplan()
        .args(["estimate", "show", "2"])
        .current_dir(temp.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("76h, $11400 at $150/h"));

    let report = ok(&temp, &["report", "-m", "2025-11"]);
    assert!(report.contains("estimate 76h"));
}

#[test]
fn negative_percentage_reaches_validation() {
    let temp = seeded_temp();
    resplan()
        .args(["alloc", "set", "1", "1", "-5", "-m", "2025-11"])
        .current_dir(temp.path())
        .assert()
        .failure()
        .stderr(predicate::str::contains("between 0 and 100"))
        .stderr(predicate::str::contains("unexpected argument").not());
}

#[test]
fn weekly_report_for_a_sunday() {
    let temp = seeded_temp();
    ok(
        &temp,
        &["weekly", "set", "2", "--week", "2025-11-23", "--goals", "Start signup"],
    );
    ok(
        &temp,
        &["weekly", "set", "2", "--week", "2025-11-18", "--challenges", "QA access"],
    );

    let out = ok(&temp, &["weekly", "show", "2", "--week", "2025-11-17"]);
    assert!(out.contains("Engage360 [2] week of 2025-11-17"));
    assert!(out.contains("  Start signup"));
    assert!(out.contains("  QA access"));

    let week = ok(&temp, &["weekly", "week", "2025-11-20"]);
    assert!(week.contains("Engage360"));
}

#[test]
fn roster_edits() {
    let temp = seeded_temp();
    ok(&temp, &["expertise", "rename", "1", "Engineering"]);
    ok(&temp, &["person", "edit", "3", "expertise", "Engineering"]);
    ok(&temp, &["person", "edit", "3", "email", "travis@example.com"]);

    let people = ok(&temp, &["person", "list"]);
    assert!(people.contains("[3] Travis (Engineering) <travis@example.com>"));

    ok(&temp, &["expertise", "rm", "2"]);
    resplan()
        .args(["expertise", "rm", "1"])
        .current_dir(temp.path())
        .assert()
        .failure()
        .stderr(predicate::str::contains("still assigned to 3 people"));
}

#[test]
fn remove_estimate_story() {
    let temp = seeded_temp();
    ok(&temp, &["estimate", "create", "2", "--rate", "150"]);
    ok(&temp, &["estimate", "story", "2", "Login"]);
    ok(&temp, &["estimate", "rm", "1"]);

    resplan()
        .args(["estimate", "show", "2"])
        .current_dir(temp.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("Login").not());
}

#[test]
fn project_status_in_list() {
    let temp = seeded_temp();
    ok(&temp, &["project", "edit", "2", "status", "yellow"]);
    let out = ok(&temp, &["project", "list"]);
    assert!(out.contains("Engage360 target 2026-03-01 [Yellow]"));
}
