// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;
use aas_adapters::ServiceError;
use aas_core::test_support::{history_entry, snapshot};
use aas_core::{AppId, Artifact, JobId, JobStatus};
use aas_engine::ClientError;
use serial_test::serial;

fn plain() {
    std::env::set_var("NO_COLOR", "1");
}

fn jwst() -> AppId {
    AppId::new("jwst")
}

#[test]
#[serial]
fn busy_events_are_silent() {
    plain();
    assert_eq!(event_line(&JobEvent::Busy { app: jwst(), busy: true }), None);
}

#[test]
#[serial]
fn queued_uses_app_label() {
    plain();
    let event = JobEvent::Queued { app: jwst(), snapshot: snapshot("", JobStatus::Queued) };
    assert_eq!(event_line(&event).unwrap(), "Submitting JWST NIRCam job...");
}

#[test]
#[serial]
fn progress_shows_runtime_and_last_log_line() {
    plain();
    let mut running = snapshot("jwst-1", JobStatus::Running);
    running.logs = "Bootstrapping...\nStage 1: ramp fitting 14/40\n\n".into();

    let line = event_line(&JobEvent::Progress { app: jwst(), snapshot: running }).unwrap();

    assert_eq!(line, "running 1m 30s Stage 1: ramp fitting 14/40");
}

#[test]
#[serial]
fn terminal_line_includes_report_summary() {
    plain();
    let mut done = snapshot("jwst-1", JobStatus::Succeeded);
    done.report = Some(serde_json::json!({ "summary": "mosaic ready" }));

    let line = event_line(&JobEvent::Succeeded { app: jwst(), snapshot: done }).unwrap();

    assert_eq!(line, "Job jwst-1 succeeded after 1m 30s: mosaic ready");
}

#[test]
#[serial]
fn errors_are_described() {
    plain();
    let timeout = JobEvent::PollTimedOut {
        app: jwst(),
        job_id: JobId::new("jwst-1"),
        error: ClientError::PollTimeout { job_id: JobId::new("jwst-1"), polls: 600 },
    };
    assert_eq!(
        event_line(&timeout).unwrap(),
        "Polling stopped: polling timed out for job jwst-1 after 600 polls"
    );
}

#[test]
#[serial]
fn artifact_rows_format_sizes() {
    plain();
    let mut done = snapshot("jwst-1", JobStatus::Succeeded);
    done.artifacts = vec![
        Artifact { name: "a.fits".into(), kind: Some("fits".into()), size: Some(1536), url: "https://x/a".into() },
        Artifact { name: "b.png".into(), kind: None, size: None, url: "https://x/b".into() },
    ];

    assert_eq!(
        artifact_lines(&done),
        vec!["  a.fits  fits  1.5 KB  https://x/a", "  b.png  -  -  https://x/b"]
    );
}

#[test]
fn json_event_carries_kind_and_error() {
    let event = JobEvent::PollFailed {
        app: jwst(),
        job_id: JobId::new("jwst-1"),
        error: ServiceError::Transport("HTTP 502".into()).into(),
    };

    let value = event_json(&event);

    assert_eq!(value["event"], "poll_failed");
    assert_eq!(value["jobId"], "jwst-1");
    assert_eq!(value["error"]["kind"], "transport");
    assert!(value["snapshot"].is_null());
}

#[test]
#[serial]
fn history_line_columns() {
    plain();
    let entry = history_entry("eso-3", JobStatus::Failed);
    assert_eq!(history_line(&entry), "2023-11-14 22:14:50  JWST NIRCam  eso-3  failed");
}
