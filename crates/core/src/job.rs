// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Job identifier, status, and point-in-time snapshots.

use crate::app::AppId;
use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

crate::define_id! {
    /// Opaque identifier assigned to a job at submission.
    ///
    /// Assigned by the remote service (or the simulation engine) and never
    /// changed afterwards.
    pub struct JobId;
}

/// Form fields sent with a submission.
pub type Payload = BTreeMap<String, String>;

/// Log text used when a snapshot arrives without any.
pub const DEFAULT_LOGS: &str = "Bootstrapping pipeline...\nPulling calibration reference files...";

/// How far before "now" a snapshot without `startedAt` is assumed to have started.
const DEFAULT_ELAPSED_SECS: i64 = 90;

/// Lifecycle status reported by the service.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum JobStatus {
    Queued,
    Running,
    Succeeded,
    Failed,
}

impl JobStatus {
    /// `Succeeded` and `Failed` are terminal; no transition follows them.
    pub fn is_terminal(&self) -> bool {
        matches!(self, JobStatus::Succeeded | JobStatus::Failed)
    }
}

crate::simple_display! {
    JobStatus {
        Queued => "queued",
        Running => "running",
        Succeeded => "succeeded",
        Failed => "failed",
    }
}

/// A file produced by a finished job.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Artifact {
    pub name: String,
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub kind: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub size: Option<u64>,
    #[serde(default)]
    pub url: String,
}

/// State of a remote job at one observation instant.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct JobSnapshot {
    pub job_id: JobId,
    pub app: AppId,
    pub status: JobStatus,
    pub started_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    /// Set only once the status is terminal
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub completed_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub logs: String,
    #[serde(default)]
    pub artifacts: Vec<Artifact>,
    /// Whether the result may appear in the public results feed
    #[serde(default)]
    pub public: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub summary: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub report: Option<serde_json::Value>,
    /// Error text for snapshots synthesized from a failed submission
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl JobSnapshot {
    /// Placeholder shown for a job the service has accepted but not reported on.
    pub fn queued(job_id: JobId, app: AppId, now: DateTime<Utc>) -> Self {
        PartialSnapshot { status: Some(JobStatus::Queued), started_at: Some(now), ..Default::default() }
            .normalize(&job_id, &app, now)
    }

    /// Queued placeholder shown while a submission is in flight.
    ///
    /// The service has not assigned an id yet, so `job_id` is empty.
    pub fn provisional(app: AppId, now: DateTime<Utc>) -> Self {
        Self::queued(JobId::new(""), app, now)
    }

    /// Synthetic `Failed` snapshot for a submission that never produced a job.
    pub fn submit_failed(app: AppId, message: impl Into<String>, now: DateTime<Utc>) -> Self {
        let message = message.into();
        let mut snapshot = PartialSnapshot {
            status: Some(JobStatus::Failed),
            started_at: Some(now),
            logs: Some(message.clone()),
            ..Default::default()
        }
        .normalize(&JobId::new(""), &app, now);
        snapshot.error = Some(message);
        snapshot
    }

    pub fn is_terminal(&self) -> bool {
        self.status.is_terminal()
    }

    /// The summary line, falling back to `report.summary`.
    pub fn effective_summary(&self) -> Option<String> {
        self.summary.clone().or_else(|| {
            self.report
                .as_ref()
                .and_then(|r| r.get("summary"))
                .and_then(|s| s.as_str())
                .filter(|s| !s.is_empty())
                .map(str::to_string)
        })
    }

    /// Elapsed time between start and last update, clamped at zero.
    pub fn runtime(&self) -> Duration {
        (self.updated_at - self.started_at).max(Duration::zero())
    }
}

/// A snapshot as found in fixtures or service responses, where every field may be missing.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PartialSnapshot {
    #[serde(default)]
    pub job_id: Option<JobId>,
    #[serde(default)]
    pub status: Option<JobStatus>,
    #[serde(default)]
    pub started_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub completed_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub logs: Option<String>,
    #[serde(default)]
    pub artifacts: Option<Vec<Artifact>>,
    #[serde(default)]
    pub public: Option<bool>,
    #[serde(default)]
    pub summary: Option<String>,
    #[serde(default)]
    pub report: Option<serde_json::Value>,
    #[serde(default)]
    pub error: Option<String>,
}

impl PartialSnapshot {
    /// Fill in missing fields and stamp the snapshot with `job_id` and `app`.
    ///
    /// Missing status is `Running`; missing start is 90 seconds before `now`;
    /// missing or empty logs become [`DEFAULT_LOGS`]. A `completedAt` on a
    /// non-terminal status is dropped.
    pub fn normalize(self, job_id: &JobId, app: &AppId, now: DateTime<Utc>) -> JobSnapshot {
        let status = self.status.unwrap_or(JobStatus::Running);
        JobSnapshot {
            job_id: job_id.clone(),
            app: app.clone(),
            status,
            started_at: self
                .started_at
                .unwrap_or_else(|| now - Duration::seconds(DEFAULT_ELAPSED_SECS)),
            updated_at: self.updated_at.unwrap_or(now),
            completed_at: self.completed_at.filter(|_| status.is_terminal()),
            logs: self.logs.filter(|l| !l.is_empty()).unwrap_or_else(|| DEFAULT_LOGS.to_string()),
            artifacts: self.artifacts.unwrap_or_default(),
            public: self.public.unwrap_or(false),
            summary: self.summary.filter(|s| !s.is_empty()),
            report: self.report.filter(|r| !r.is_null()),
            error: self.error.filter(|e| !e.is_empty()),
        }
    }
}

/// Snapshot builder for tests: a running `jwst` job that started at the
/// fake epoch and was last updated 90 seconds later.
#[cfg(any(test, feature = "test-support"))]
pub struct JobSnapshotBuilder {
    snapshot: JobSnapshot,
}

#[cfg(any(test, feature = "test-support"))]
impl JobSnapshotBuilder {
    pub fn job_id(mut self, id: impl Into<JobId>) -> Self {
        self.snapshot.job_id = id.into();
        self
    }

    pub fn app(mut self, app: impl Into<AppId>) -> Self {
        self.snapshot.app = app.into();
        self
    }

    pub fn status(mut self, status: JobStatus) -> Self {
        self.snapshot.status = status;
        self
    }

    pub fn started_at(mut self, at: DateTime<Utc>) -> Self {
        self.snapshot.started_at = at;
        self
    }

    pub fn updated_at(mut self, at: DateTime<Utc>) -> Self {
        self.snapshot.updated_at = at;
        self
    }

    pub fn completed_at(mut self, at: DateTime<Utc>) -> Self {
        self.snapshot.completed_at = Some(at);
        self
    }

    pub fn logs(mut self, logs: impl Into<String>) -> Self {
        self.snapshot.logs = logs.into();
        self
    }

    pub fn artifacts(mut self, artifacts: Vec<Artifact>) -> Self {
        self.snapshot.artifacts = artifacts;
        self
    }

    pub fn public(mut self, public: bool) -> Self {
        self.snapshot.public = public;
        self
    }

    pub fn summary(mut self, summary: impl Into<String>) -> Self {
        self.snapshot.summary = Some(summary.into());
        self
    }

    pub fn report(mut self, report: Option<serde_json::Value>) -> Self {
        self.snapshot.report = report;
        self
    }

    pub fn error(mut self, error: impl Into<String>) -> Self {
        self.snapshot.error = Some(error.into());
        self
    }

    pub fn build(self) -> JobSnapshot {
        self.snapshot
    }
}

#[cfg(any(test, feature = "test-support"))]
impl JobSnapshot {
    pub fn builder() -> JobSnapshotBuilder {
        let started_at = DateTime::from_timestamp_millis(1_700_000_000_000).unwrap_or_default();
        JobSnapshotBuilder {
            snapshot: JobSnapshot {
                job_id: JobId::new("jwst-1"),
                app: AppId::new("jwst"),
                status: JobStatus::Running,
                started_at,
                updated_at: started_at + Duration::seconds(DEFAULT_ELAPSED_SECS),
                completed_at: None,
                logs: DEFAULT_LOGS.to_string(),
                artifacts: Vec::new(),
                public: false,
                summary: None,
                report: None,
                error: None,
            },
        }
    }
}

#[cfg(test)]
#[path = "job_tests.rs"]
mod tests;
