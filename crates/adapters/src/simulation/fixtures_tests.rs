// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;
use aas_core::JobStatus;
use yare::parameterized;

#[parameterized(
    jwst_running = { "jwst", FixtureKind::Running, "jwst-running.json" },
    eso_success = { "eso", FixtureKind::Success, "eso-success.json" },
    alma_failed = { "alma", FixtureKind::Failed, "alma-failed.json" },
    unknown_app = { "vlass", FixtureKind::Running, "vlass-running.json" },
)]
fn fixture_names(app: &str, kind: FixtureKind, expected: &str) {
    assert_eq!(fixture_name(&AppId::new(app), kind), expected);
}

#[test]
fn every_builtin_fixture_parses() {
    for name in BuiltinFixtures::names() {
        BuiltinFixtures.load(name).unwrap_or_else(|e| panic!("{name}: {e}"));
    }
}

#[parameterized(
    jwst_running = { "jwst-running.json", JobStatus::Running },
    jwst_success = { "jwst-success.json", JobStatus::Succeeded },
    jwst_failed = { "jwst-failed.json", JobStatus::Failed },
    eso_failed = { "eso-failed.json", JobStatus::Failed },
    alma_success = { "alma-success.json", JobStatus::Succeeded },
)]
fn builtin_fixture_status(name: &str, status: JobStatus) {
    assert_eq!(BuiltinFixtures.load(name).unwrap().status, Some(status));
}

#[test]
fn alma_has_no_failure_fixture() {
    assert_eq!(
        BuiltinFixtures.load("alma-failed.json"),
        Err(FixtureError::Missing("alma-failed.json".to_string()))
    );
    assert_eq!(BuiltinFixtures.load_optional("alma-failed.json"), Ok(None));
}

#[test]
fn builtin_success_fixtures_are_public() {
    for app in ["jwst", "eso", "alma"] {
        let name = fixture_name(&AppId::new(app), FixtureKind::Success);
        assert_eq!(BuiltinFixtures.load(&name).unwrap().public, Some(true), "{name}");
    }
}

#[test]
fn memory_fixtures_load_and_miss() {
    let fixtures = MemoryFixtures::new().with("x-running.json", r#"{"status":"Running"}"#);

    assert_eq!(fixtures.load("x-running.json").unwrap().status, Some(JobStatus::Running));
    assert!(matches!(fixtures.load("x-success.json"), Err(FixtureError::Missing(_))));

    fixtures.remove("x-running.json");
    assert!(matches!(fixtures.load("x-running.json"), Err(FixtureError::Missing(_))));
}

#[test]
fn memory_fixture_invalid_json_is_invalid_not_missing() {
    let fixtures = MemoryFixtures::new().with("x-success.json", "{ nope");
    assert!(matches!(fixtures.load("x-success.json"), Err(FixtureError::Invalid { ref name, .. }) if name == "x-success.json"));
    assert!(fixtures.load_optional("x-success.json").is_err());
}

#[test]
fn dir_fixtures_read_from_disk() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(dir.path().join("jwst-running.json"), r#"{"status":"Running","public":true}"#)
        .unwrap();
    let fixtures = DirFixtures::new(dir.path());

    let running = fixtures.load("jwst-running.json").unwrap();
    assert_eq!(running.public, Some(true));
    assert_eq!(fixtures.load("jwst-success.json"), Err(FixtureError::Missing("jwst-success.json".into())));
}

#[test]
fn dir_fixture_that_is_a_directory_is_io_error() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::create_dir(dir.path().join("eso-running.json")).unwrap();

    let err = DirFixtures::new(dir.path()).load("eso-running.json").unwrap_err();
    assert!(matches!(err, FixtureError::Io { .. }), "{err:?}");
}
