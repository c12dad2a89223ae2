// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

#![allow(clippy::unwrap_used)]
#![allow(clippy::expect_used)]

use super::*;
use crate::commands::testing::{date, TestContext};
use rp_core::{AllocationStore, AllocationUpsert};

#[test]
fn test_report_json_figures() {
    let (mut ctx, seed) = TestContext::seeded();
    for (person, project, pct) in [
        (seed.david, seed.overhead, 60.0),
        (seed.david, seed.engage, 55.0),
        (seed.george, seed.engage, 100.0),
    ] {
        ctx.db
            .upsert_allocation(&AllocationUpsert::new(person, project, seed.november, pct))
            .unwrap();
    }

    let json = run_impl(&ctx.db, None, OutputFormat::Json, date(2025, 11, 10)).unwrap();
    let value: serde_json::Value = serde_json::from_str(&json).unwrap();

    assert_eq!(value["month"], "November 2025");
    assert_eq!(value["available_hours"], 144);
    assert_eq!(value["team_hours"], 432.0);
    assert_eq!(value["departments"][1]["projects"][0]["allocated_percentage"], 155.0);
    assert_eq!(value["status_counts"]["over"], 1);
    assert_eq!(value["status_counts"]["full"], 1);
    assert_eq!(value["status_counts"]["under"], 1);
}

#[test]
fn test_report_text_without_months() {
    let ctx = TestContext::new();
    ctx.db.create_department("Corporate", 0).unwrap();
    let text = run_impl(&ctx.db, None, OutputFormat::Text, date(2025, 11, 10)).unwrap();
    assert!(text.starts_with("No month selected"));
}

#[test]
fn test_report_excludes_out_of_scope_projects() {
    let (ctx, seed) = TestContext::seeded();
    let mut project = ctx.db.get_project(seed.engage).unwrap();
    project.target_date = Some(date(2025, 10, 31));
    ctx.db.update_project(&project).unwrap();

    let json = run_impl(&ctx.db, Some("2025-11"), OutputFormat::Json, date(2025, 1, 1)).unwrap();
    let value: serde_json::Value = serde_json::from_str(&json).unwrap();
    assert!(value["departments"][1]["projects"]
        .as_array()
        .unwrap()
        .is_empty());
}
