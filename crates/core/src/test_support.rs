// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Shared test helpers for use across crates.
//!
//! Gated behind `#[cfg(any(test, feature = "test-support"))]`.

use crate::history::RecentJobHistoryEntry;
use crate::job::{JobSnapshot, JobStatus};

// ── Proptest strategies ─────────────────────────────────────────────────

pub mod strategies {
    use crate::job::JobStatus;
    use proptest::prelude::*;

    pub fn arb_job_status() -> impl Strategy<Value = JobStatus> {
        prop_oneof![
            Just(JobStatus::Queued),
            Just(JobStatus::Running),
            Just(JobStatus::Succeeded),
            Just(JobStatus::Failed),
        ]
    }

    /// Sequences of job ids drawn from a small pool so repeats are common.
    pub fn arb_job_ids() -> impl Strategy<Value = Vec<String>> {
        prop::collection::vec((0u8..20).prop_map(|n| format!("job-{n}")), 0..40)
    }
}

// ── Factory functions ───────────────────────────────────────────────────

pub fn snapshot(job_id: &str, status: JobStatus) -> JobSnapshot {
    JobSnapshot::builder().job_id(job_id).status(status).build()
}

pub fn history_entry(job_id: &str, status: JobStatus) -> RecentJobHistoryEntry {
    RecentJobHistoryEntry::from_snapshot(&snapshot(job_id, status))
}
