// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;
use crate::{Clock, FakeClock};
use yare::parameterized;

fn now() -> DateTime<Utc> {
    FakeClock::new().utc_now()
}

#[parameterized(
    queued = { JobStatus::Queued, false },
    running = { JobStatus::Running, false },
    succeeded = { JobStatus::Succeeded, true },
    failed = { JobStatus::Failed, true },
)]
fn status_terminality(status: JobStatus, terminal: bool) {
    assert_eq!(status.is_terminal(), terminal);
}

#[test]
fn status_serializes_with_wire_names() {
    assert_eq!(serde_json::to_string(&JobStatus::Succeeded).unwrap(), "\"Succeeded\"");
    let parsed: JobStatus = serde_json::from_str("\"Running\"").unwrap();
    assert_eq!(parsed, JobStatus::Running);
    assert_eq!(JobStatus::Failed.to_string(), "failed");
}

#[test]
fn normalize_empty_fixture_applies_every_default() {
    let now = now();
    let snapshot = PartialSnapshot::default().normalize(&JobId::new("jwst-1"), &AppId::new("jwst"), now);

    assert_eq!(snapshot.job_id, "jwst-1");
    assert_eq!(snapshot.app, "jwst");
    assert_eq!(snapshot.status, JobStatus::Running);
    assert_eq!(snapshot.started_at, now - Duration::seconds(90));
    assert_eq!(snapshot.updated_at, now);
    assert_eq!(snapshot.completed_at, None);
    assert_eq!(snapshot.logs, DEFAULT_LOGS);
    assert!(snapshot.artifacts.is_empty());
    assert!(!snapshot.public);
    assert_eq!(snapshot.summary, None);
    assert_eq!(snapshot.report, None);
}

#[test]
fn normalize_keeps_present_fields_and_overrides_job_id() {
    let raw: PartialSnapshot = serde_json::from_str(
        r#"{
            "jobId": "fixture-id",
            "status": "Succeeded",
            "startedAt": "2024-05-01T10:00:00Z",
            "completedAt": "2024-05-01T10:05:00Z",
            "logs": "done",
            "artifacts": [{"name": "mosaic.fits", "type": "fits", "size": 1024, "url": "https://x/m.fits"}],
            "public": true,
            "summary": "Mosaic ready"
        }"#,
    )
    .unwrap();

    let snapshot = raw.normalize(&JobId::new("jwst-9"), &AppId::new("jwst"), now());

    assert_eq!(snapshot.job_id, "jwst-9");
    assert_eq!(snapshot.status, JobStatus::Succeeded);
    assert_eq!(snapshot.started_at.to_rfc3339(), "2024-05-01T10:00:00+00:00");
    assert!(snapshot.completed_at.is_some());
    assert_eq!(snapshot.logs, "done");
    assert_eq!(snapshot.artifacts.len(), 1);
    assert_eq!(snapshot.artifacts[0].kind.as_deref(), Some("fits"));
    assert!(snapshot.public);
}

#[test]
fn normalize_drops_completed_at_on_running_status() {
    let raw = PartialSnapshot {
        status: Some(JobStatus::Running),
        completed_at: Some(now()),
        ..Default::default()
    };
    let snapshot = raw.normalize(&JobId::new("a"), &AppId::new("eso"), now());
    assert_eq!(snapshot.completed_at, None);
}

#[test]
fn normalize_treats_empty_logs_as_missing() {
    let raw = PartialSnapshot { logs: Some(String::new()), ..Default::default() };
    let snapshot = raw.normalize(&JobId::new("a"), &AppId::new("eso"), now());
    assert_eq!(snapshot.logs, DEFAULT_LOGS);
}

#[test]
fn snapshot_wire_format_is_camel_case() {
    let snapshot = JobSnapshot::builder().completed_at(now()).status(JobStatus::Succeeded).build();
    let json = serde_json::to_value(&snapshot).unwrap();
    assert!(json.get("jobId").is_some());
    assert!(json.get("startedAt").is_some());
    assert!(json.get("completedAt").is_some());
    assert!(json.get("error").is_none());
}

#[test]
fn effective_summary_falls_back_to_report() {
    let snapshot = JobSnapshot::builder()
        .report(Some(serde_json::json!({ "summary": "3 moment maps" })))
        .build();
    assert_eq!(snapshot.effective_summary().as_deref(), Some("3 moment maps"));

    let snapshot = JobSnapshot::builder()
        .summary("own summary")
        .report(Some(serde_json::json!({ "summary": "ignored" })))
        .build();
    assert_eq!(snapshot.effective_summary().as_deref(), Some("own summary"));

    assert_eq!(JobSnapshot::builder().build().effective_summary(), None);
}

#[test]
fn runtime_never_negative() {
    let snapshot = JobSnapshot::builder()
        .started_at(now())
        .updated_at(now() - Duration::seconds(5))
        .build();
    assert_eq!(snapshot.runtime(), Duration::zero());
}

#[test]
fn submit_failed_carries_message() {
    let snapshot = JobSnapshot::submit_failed(AppId::new("alma"), "HTTP 503", now());
    assert_eq!(snapshot.status, JobStatus::Failed);
    assert!(snapshot.job_id.is_empty());
    assert_eq!(snapshot.error.as_deref(), Some("HTTP 503"));
}

#[test]
fn queued_placeholder_has_no_elapsed_time() {
    let now = now();
    let snapshot = JobSnapshot::queued(JobId::new("eso-1"), AppId::new("eso"), now);
    assert_eq!(snapshot.status, JobStatus::Queued);
    assert_eq!(snapshot.started_at, now);
    assert_eq!(snapshot.runtime(), Duration::zero());
}

#[test]
fn provisional_snapshot_has_no_job_id_yet() {
    let snapshot = JobSnapshot::provisional(AppId::new("eso"), now());
    assert_eq!(snapshot.status, JobStatus::Queued);
    assert!(snapshot.job_id.is_empty());
}
