// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Formatting helpers shared by snapshot consumers.

use crate::job::JobStatus;
use chrono::Duration;

/// Format a runtime as `42s`, `3m 5s`, or `1h 2m`.
pub fn format_runtime(elapsed: Duration) -> String {
    let secs = elapsed.num_seconds().max(0);
    if secs < 60 {
        return format!("{secs}s");
    }
    let mins = secs / 60;
    if mins < 60 {
        return format!("{}m {}s", mins, secs % 60);
    }
    format!("{}h {}m", mins / 60, mins % 60)
}

/// Format a byte count with one decimal in the largest fitting unit (up to GB).
pub fn format_bytes(bytes: Option<u64>) -> String {
    const UNITS: [&str; 4] = ["B", "KB", "MB", "GB"];
    let Some(bytes) = bytes.filter(|b| *b > 0) else {
        return "-".to_string();
    };
    let mut value = bytes as f64;
    let mut unit = 0;
    while value >= 1024.0 && unit < UNITS.len() - 1 {
        value /= 1024.0;
        unit += 1;
    }
    format!("{:.1} {}", value, UNITS[unit])
}

/// Coarse visual class for a status: `success`, `failed`, or `running`.
pub fn status_class(status: JobStatus) -> &'static str {
    match status {
        JobStatus::Succeeded => "success",
        JobStatus::Failed => "failed",
        JobStatus::Queued | JobStatus::Running => "running",
    }
}

#[cfg(test)]
#[path = "display_tests.rs"]
mod tests;
