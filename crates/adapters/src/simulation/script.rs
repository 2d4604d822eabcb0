// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Scripted progression of one simulated job.

use aas_core::{AppId, JobSnapshot, Payload};
use chrono::{DateTime, Utc};

/// Polls answered with the running entry before the terminal entry is served.
pub const RUNNING_POLLS: u32 = 2;

/// Where a script is in its progression.
#[derive(Debug, Clone, PartialEq)]
pub enum ScriptStage {
    Running {
        polls_remaining: u32,
        /// Entry served once the running polls are spent; `None` keeps the job running
        terminal: Option<JobSnapshot>,
    },
    Terminal {
        snapshot: JobSnapshot,
    },
}

/// Script for one simulated job: a running entry and an optional terminal entry.
#[derive(Debug, Clone)]
pub struct SimulationScript {
    app: AppId,
    payload: Payload,
    poll_count: u32,
    running: JobSnapshot,
    stage: ScriptStage,
}

impl SimulationScript {
    pub fn new(
        app: AppId,
        payload: Payload,
        running: JobSnapshot,
        terminal: Option<JobSnapshot>,
    ) -> Self {
        Self {
            app,
            payload,
            poll_count: 0,
            running,
            stage: ScriptStage::Running { polls_remaining: RUNNING_POLLS, terminal },
        }
    }

    pub fn app(&self) -> &AppId {
        &self.app
    }

    pub fn payload(&self) -> &Payload {
        &self.payload
    }

    pub fn poll_count(&self) -> u32 {
        self.poll_count
    }

    pub fn stage(&self) -> &ScriptStage {
        &self.stage
    }

    /// Snapshot answered before any poll.
    pub fn initial(&self) -> &JobSnapshot {
        &self.running
    }

    /// Answer one poll at `now`.
    ///
    /// `updated_at` is stamped on every answer; `completed_at` is stamped
    /// once, when the terminal entry is first served, and only if that entry
    /// has a terminal status.
    pub fn advance(&mut self, now: DateTime<Utc>) -> JobSnapshot {
        self.poll_count += 1;

        let promote = match &mut self.stage {
            ScriptStage::Running { polls_remaining, .. } if *polls_remaining > 0 => {
                *polls_remaining -= 1;
                None
            }
            ScriptStage::Running { terminal, .. } => terminal.take(),
            ScriptStage::Terminal { .. } => None,
        };
        if let Some(mut snapshot) = promote {
            if snapshot.is_terminal() && snapshot.completed_at.is_none() {
                snapshot.completed_at = Some(now);
            }
            self.stage = ScriptStage::Terminal { snapshot };
        }

        let entry = match &mut self.stage {
            ScriptStage::Running { .. } => &mut self.running,
            ScriptStage::Terminal { snapshot } => snapshot,
        };
        entry.updated_at = now;
        entry.clone()
    }
}

#[cfg(test)]
#[path = "script_tests.rs"]
mod tests;
