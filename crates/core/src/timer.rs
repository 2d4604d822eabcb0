// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Timer identifier type for tracking scheduled timers.
//!
//! TimerId uniquely identifies a timer instance in the scheduler. Poll
//! sessions key their repeating timer by job so that replacing or cancelling
//! a session always addresses the same timer.

use crate::job::JobId;

crate::define_id! {
    /// Unique identifier for a timer instance.
    pub struct TimerId;
}

impl TimerId {
    /// Repeating status-poll timer for one job.
    pub fn job_poll(job_id: &JobId) -> Self {
        TimerKind::JobPoll { job_id: job_id.as_str() }.to_timer_id()
    }

    /// Parse this timer ID into a typed `TimerKind`.
    pub fn kind(&self) -> Option<TimerKind<'_>> {
        TimerKind::parse(self.as_str())
    }

    /// Extract the JobId if this timer drives a job.
    pub fn job_id(&self) -> Option<JobId> {
        match self.kind()? {
            TimerKind::JobPoll { job_id } => Some(JobId::new(job_id)),
        }
    }
}

/// Parsed representation of a timer ID for type-safe routing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TimerKind<'a> {
    JobPoll { job_id: &'a str },
}

impl<'a> TimerKind<'a> {
    /// Parse a timer ID string into a typed `TimerKind`.
    ///
    /// Returns `None` for unrecognized timer ID formats.
    pub fn parse(id: &'a str) -> Option<TimerKind<'a>> {
        let job_id = id.strip_prefix("job-poll:")?;
        if job_id.is_empty() {
            return None;
        }
        Some(TimerKind::JobPoll { job_id })
    }

    /// Format this `TimerKind` back into a canonical `TimerId`.
    pub fn to_timer_id(&self) -> TimerId {
        match self {
            TimerKind::JobPoll { job_id } => TimerId::new(format!("job-poll:{job_id}")),
        }
    }
}

#[cfg(test)]
#[path = "timer_tests.rs"]
mod tests;
