// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Recent-jobs history: a small, most-recent-first list of terminal jobs.

use crate::app::AppId;
use crate::job::{Artifact, JobId, JobSnapshot, JobStatus};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Number of entries kept.
pub const HISTORY_CAPACITY: usize = 12;

/// Summary of a job that reached a terminal state.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecentJobHistoryEntry {
    pub job_id: JobId,
    pub app: AppId,
    pub status: JobStatus,
    pub updated_at: DateTime<Utc>,
    #[serde(default)]
    pub artifacts: Vec<Artifact>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub report: Option<serde_json::Value>,
    #[serde(default)]
    pub public: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub summary: Option<String>,
}

impl RecentJobHistoryEntry {
    pub fn from_snapshot(snapshot: &JobSnapshot) -> Self {
        Self {
            job_id: snapshot.job_id.clone(),
            app: snapshot.app.clone(),
            status: snapshot.status,
            updated_at: snapshot.updated_at,
            artifacts: snapshot.artifacts.clone(),
            report: snapshot.report.clone(),
            public: snapshot.public,
            summary: snapshot.effective_summary(),
        }
    }
}

/// Bounded, deduplicated history ordered most recent first.
#[derive(Debug, Clone, PartialEq)]
pub struct RecentJobHistory {
    entries: Vec<RecentJobHistoryEntry>,
    capacity: usize,
}

impl Default for RecentJobHistory {
    fn default() -> Self {
        Self::new()
    }
}

impl RecentJobHistory {
    pub fn new() -> Self {
        Self::with_capacity(HISTORY_CAPACITY)
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self { entries: Vec::new(), capacity }
    }

    /// Rebuild from persisted entries (most recent first), re-applying the
    /// dedup and trim rules in case the stored list violates them.
    pub fn from_entries(entries: Vec<RecentJobHistoryEntry>) -> Self {
        let mut history = Self::new();
        for entry in entries.into_iter().rev() {
            history.record(entry);
        }
        history
    }

    /// Insert at the front. An existing entry for the same job is removed
    /// first; the oldest entries beyond capacity are evicted.
    pub fn record(&mut self, entry: RecentJobHistoryEntry) {
        self.entries.retain(|e| e.job_id != entry.job_id);
        self.entries.insert(0, entry);
        self.entries.truncate(self.capacity);
    }

    pub fn entries(&self) -> &[RecentJobHistoryEntry] {
        &self.entries
    }

    pub fn get(&self, job_id: &JobId) -> Option<&RecentJobHistoryEntry> {
        self.entries.iter().find(|e| &e.job_id == job_id)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
#[path = "history_tests.rs"]
mod tests;
