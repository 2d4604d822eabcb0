// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use crate::color;
use aas_core::{format_bytes, format_runtime, AppInfo, JobSnapshot, RecentJobHistoryEntry};
use aas_engine::JobEvent;
use clap::ValueEnum;
use serde_json::json;

#[cfg(test)]
#[path = "output_tests.rs"]
mod tests;

#[derive(Clone, Copy, Debug, Default, PartialEq, ValueEnum)]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

/// Last non-empty log line, used as a one-line progress hint.
fn last_log_line(snapshot: &JobSnapshot) -> &str {
    snapshot.logs.lines().rev().map(str::trim).find(|l| !l.is_empty()).unwrap_or("")
}

/// One line per event; `None` for events not shown in text mode.
pub fn event_line(event: &JobEvent) -> Option<String> {
    match event {
        JobEvent::Busy { .. } => None,
        JobEvent::Queued { app, .. } => Some(format!("Submitting {} job...", app.label())),
        JobEvent::Submitted { snapshot, .. } => Some(format!(
            "Job {} accepted ({})",
            color::header(snapshot.job_id.as_str()),
            color::status(snapshot.status)
        )),
        JobEvent::Progress { snapshot, .. } => Some(format!(
            "{} {} {}",
            color::status(snapshot.status),
            color::muted(&format_runtime(snapshot.runtime())),
            last_log_line(snapshot)
        )),
        JobEvent::Succeeded { snapshot, .. } | JobEvent::Failed { snapshot, .. } => {
            let mut line = format!(
                "Job {} {} after {}",
                snapshot.job_id,
                color::status(snapshot.status),
                format_runtime(snapshot.runtime())
            );
            if let Some(summary) = snapshot.effective_summary() {
                line.push_str(&format!(": {}", summary));
            }
            Some(line)
        }
        JobEvent::SubmitFailed { error, .. } => Some(format!("Submission failed: {}", error)),
        JobEvent::PollTimedOut { error, .. } | JobEvent::PollFailed { error, .. } => {
            Some(format!("Polling stopped: {}", error))
        }
    }
}

/// Artifact rows for a finished job: `name  type  size  url`.
pub fn artifact_lines(snapshot: &JobSnapshot) -> Vec<String> {
    snapshot
        .artifacts
        .iter()
        .map(|a| {
            format!(
                "  {}  {}  {}  {}",
                a.name,
                a.kind.as_deref().unwrap_or("-"),
                format_bytes(a.size),
                color::muted(&a.url)
            )
        })
        .collect()
}

pub fn event_json(event: &JobEvent) -> serde_json::Value {
    json!({
        "event": event.kind().to_string(),
        "app": event.app().as_str(),
        "jobId": event.job_id().map(|id| id.as_str()),
        "snapshot": event.snapshot(),
        "error": event.error().map(|e| json!({ "kind": e.kind().to_string(), "message": e.to_string() })),
    })
}

pub fn print_event(event: &JobEvent, format: OutputFormat) -> anyhow::Result<()> {
    match format {
        OutputFormat::Text => {
            if let Some(line) = event_line(event) {
                println!("{}", line);
            }
            if let JobEvent::Succeeded { snapshot, .. } = event {
                for line in artifact_lines(snapshot) {
                    println!("{}", line);
                }
            }
        }
        OutputFormat::Json => println!("{}", serde_json::to_string(&event_json(event))?),
    }
    Ok(())
}

pub fn history_line(entry: &RecentJobHistoryEntry) -> String {
    format!(
        "{}  {}  {}  {}  {}",
        entry.updated_at.format("%Y-%m-%d %H:%M:%S"),
        entry.app.label(),
        entry.job_id,
        color::status(entry.status),
        entry.summary.as_deref().unwrap_or("")
    )
    .trim_end()
    .to_string()
}

pub fn print_history(entries: &[RecentJobHistoryEntry], format: OutputFormat) -> anyhow::Result<()> {
    match format {
        OutputFormat::Text if entries.is_empty() => println!("No recent jobs"),
        OutputFormat::Text => {
            for entry in entries {
                println!("{}", history_line(entry));
            }
        }
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(entries)?),
    }
    Ok(())
}

pub fn print_apps(apps: &[AppInfo], format: OutputFormat) -> anyhow::Result<()> {
    match format {
        OutputFormat::Text => {
            for app in apps {
                println!("{:<6} {:<14} {}", app.id, app.label, color::muted(&format!("/jobs/{}", app.endpoint)));
            }
        }
        OutputFormat::Json => {
            let list: Vec<_> = apps
                .iter()
                .map(|a| json!({ "id": a.id, "label": a.label, "endpoint": a.endpoint }))
                .collect();
            println!("{}", serde_json::to_string_pretty(&list)?);
        }
    }
    Ok(())
}

pub fn print_results(results: &[JobSnapshot], format: OutputFormat) -> anyhow::Result<()> {
    match format {
        OutputFormat::Text if results.is_empty() => println!("No public results published yet."),
        OutputFormat::Text => {
            for result in results {
                let summary = result.effective_summary().unwrap_or_default();
                println!("{}  {}", color::header(result.app.label()), summary);
                for line in artifact_lines(result) {
                    println!("{}", line);
                }
            }
        }
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(results)?),
    }
    Ok(())
}
