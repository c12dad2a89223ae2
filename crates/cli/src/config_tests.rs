// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

#![allow(clippy::unwrap_used)]
#![allow(clippy::expect_used)]

use super::*;
use tempfile::TempDir;

#[test]
fn test_init_and_load_config() {
    let temp = TempDir::new().unwrap();
    let work_dir = init_work_dir(temp.path(), None).unwrap();

    let config = Config::load(&work_dir).unwrap();
    assert!(config.workspace.is_none());
    assert_eq!(config.default_rate, 100.0);
}

#[test]
fn test_init_twice_fails() {
    let temp = TempDir::new().unwrap();
    init_work_dir(temp.path(), None).unwrap();
    let err = init_work_dir(temp.path(), None).unwrap_err();
    assert!(matches!(err, Error::AlreadyInitialized(_)));
}

#[test]
fn test_init_with_missing_workspace_fails() {
    let temp = TempDir::new().unwrap();
    let err = init_work_dir(temp.path(), Some("shared")).unwrap_err();
    assert!(matches!(err, Error::WorkspaceNotFound(_)));
    assert!(!temp.path().join(".resplan").exists());
}

#[test]
fn test_db_path_default() {
    let work_dir = PathBuf::from("/project/.resplan");
    let db_path = get_db_path(&work_dir, &Config::default());
    assert_eq!(db_path, PathBuf::from("/project/.resplan/resplan.db"));
}

#[test]
fn test_db_path_relative_workspace() {
    let work_dir = PathBuf::from("/project/.resplan");
    let config = Config::with_workspace("shared".to_string());
    let db_path = get_db_path(&work_dir, &config);
    assert_eq!(db_path, PathBuf::from("/project/shared/resplan.db"));
}

#[test]
fn test_db_path_absolute_workspace() {
    let work_dir = PathBuf::from("/project/.resplan");
    let config = Config::with_workspace("/srv/plans".to_string());
    let db_path = get_db_path(&work_dir, &config);
    assert_eq!(db_path, PathBuf::from("/srv/plans/resplan.db"));
}

#[test]
fn test_config_deserialization_defaults_rate() {
    let config: Config = toml::from_str("workspace = \"shared\"\n").unwrap();
    assert_eq!(config.workspace.as_deref(), Some("shared"));
    assert_eq!(config.default_rate, 100.0);
}

#[test]
fn test_config_rejects_negative_rate() {
    let temp = TempDir::new().unwrap();
    fs::write(temp.path().join("config.toml"), "default_rate = -5.0\n").unwrap();
    let err = Config::load(temp.path()).unwrap_err();
    assert!(matches!(err, Error::Config(_)));
}

#[test]
fn test_config_round_trip() {
    let temp = TempDir::new().unwrap();
    let config = Config {
        workspace: None,
        default_rate: 135.5,
    };
    config.save(temp.path()).unwrap();
    assert_eq!(Config::load(temp.path()).unwrap().default_rate, 135.5);
}
