// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

// Allow unused items: test helpers are shared across multiple test binaries,
// and not every test file uses every helper.
#![allow(dead_code)]
#![allow(unused_imports)]

use assert_cmd::cargo::cargo_bin_cmd;
use assert_cmd::Command;

pub use predicates::prelude::*;
pub use tempfile::TempDir;

pub fn resplan() -> Command {
    let mut cmd = cargo_bin_cmd!("resplan");
    cmd.env("NO_COLOR", "1").env_remove("RESPLAN_LOG");
    cmd
}

/// Helper to create an initialized temp directory
pub fn init_temp() -> TempDir {
    let temp = TempDir::new().unwrap();
    resplan()
        .arg("init")
        .current_dir(temp.path())
        .assert()
        .success();
    temp
}

/// Run a command in `temp` and assert it succeeds.
pub fn ok(temp: &TempDir, args: &[&str]) -> String {
    let output = resplan()
        .args(args)
        .current_dir(temp.path())
        .assert()
        .success()
        .get_output()
        .stdout
        .clone();
    String::from_utf8_lossy(&output).into_owned()
}

/// Helper to create a plan with Software and PM people, two projects,
/// and November 2025 with two Thanksgiving holidays.
///
/// Ids: people David=1, George=2, Travis=3; projects Overhead=1, Engage360=2;
/// month November 2025=1.
pub fn seeded_temp() -> TempDir {
    let temp = init_temp();
    ok(&temp, &["expertise", "add", "Software"]);
    ok(&temp, &["expertise", "add", "Project Management"]);
    ok(&temp, &["person", "add", "David", "--expertise", "Software"]);
    ok(&temp, &["person", "add", "George", "--expertise", "Software"]);
    ok(&temp, &["person", "add", "Travis", "--expertise", "Project Management"]);
    ok(&temp, &["dept", "add", "Corporate", "--sort", "1"]);
    ok(&temp, &["dept", "add", "Wellness", "--sort", "2"]);
    ok(&temp, &["project", "add", "Overhead", "--dept", "1", "--start", "2025-01-01"]);
    ok(&temp, &["project", "add", "Engage360", "--dept", "2", "--target", "2026-03-01"]);
    ok(&temp, &["month", "add", "2025-11"]);
    ok(&temp, &["holiday", "add", "Thanksgiving", "2025-11-27"]);
    ok(&temp, &["holiday", "add", "Day after Thanksgiving", "2025-11-28"]);
    temp
}
