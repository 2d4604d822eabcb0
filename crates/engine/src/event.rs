// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Notifications delivered to the job consumer.

use crate::error::ClientError;
use aas_core::{AppId, JobId, JobSnapshot};
use tokio::sync::mpsc;

/// Everything a consumer learns about a job's lifecycle.
#[derive(Debug, Clone, PartialEq)]
pub enum JobEvent {
    /// A submission for `app` started (`true`) or settled (`false`)
    Busy { app: AppId, busy: bool },
    /// Provisional snapshot shown before the service answers the submit.
    /// Its `job_id` is empty; [`JobEvent::job_id`] returns `None`.
    Queued { app: AppId, snapshot: JobSnapshot },
    /// The service accepted the job
    Submitted { app: AppId, snapshot: JobSnapshot },
    Progress { app: AppId, snapshot: JobSnapshot },
    Succeeded { app: AppId, snapshot: JobSnapshot },
    Failed { app: AppId, snapshot: JobSnapshot },
    /// The submission never produced a job
    SubmitFailed { app: AppId, snapshot: JobSnapshot, error: ClientError },
    PollTimedOut { app: AppId, job_id: JobId, error: ClientError },
    PollFailed { app: AppId, job_id: JobId, error: ClientError },
}

/// Classification of a [`JobEvent`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum JobEventKind {
    Busy,
    Queued,
    Submitted,
    Progress,
    Succeeded,
    Failed,
    SubmitFailed,
    PollTimedOut,
    PollFailed,
}

aas_core::simple_display! {
    JobEventKind {
        Busy => "busy",
        Queued => "queued",
        Submitted => "submitted",
        Progress => "progress",
        Succeeded => "succeeded",
        Failed => "failed",
        SubmitFailed => "submit_failed",
        PollTimedOut => "poll_timed_out",
        PollFailed => "poll_failed",
    }
}

impl JobEvent {
    pub fn kind(&self) -> JobEventKind {
        match self {
            JobEvent::Busy { .. } => JobEventKind::Busy,
            JobEvent::Queued { .. } => JobEventKind::Queued,
            JobEvent::Submitted { .. } => JobEventKind::Submitted,
            JobEvent::Progress { .. } => JobEventKind::Progress,
            JobEvent::Succeeded { .. } => JobEventKind::Succeeded,
            JobEvent::Failed { .. } => JobEventKind::Failed,
            JobEvent::SubmitFailed { .. } => JobEventKind::SubmitFailed,
            JobEvent::PollTimedOut { .. } => JobEventKind::PollTimedOut,
            JobEvent::PollFailed { .. } => JobEventKind::PollFailed,
        }
    }

    pub fn app(&self) -> &AppId {
        match self {
            JobEvent::Busy { app, .. }
            | JobEvent::Queued { app, .. }
            | JobEvent::Submitted { app, .. }
            | JobEvent::Progress { app, .. }
            | JobEvent::Succeeded { app, .. }
            | JobEvent::Failed { app, .. }
            | JobEvent::SubmitFailed { app, .. }
            | JobEvent::PollTimedOut { app, .. }
            | JobEvent::PollFailed { app, .. } => app,
        }
    }

    /// Job the event is about; `None` before the service assigned one.
    pub fn job_id(&self) -> Option<&JobId> {
        match self {
            JobEvent::Busy { .. } | JobEvent::Queued { .. } | JobEvent::SubmitFailed { .. } => None,
            JobEvent::Submitted { snapshot, .. }
            | JobEvent::Progress { snapshot, .. }
            | JobEvent::Succeeded { snapshot, .. }
            | JobEvent::Failed { snapshot, .. } => Some(&snapshot.job_id),
            JobEvent::PollTimedOut { job_id, .. } | JobEvent::PollFailed { job_id, .. } => {
                Some(job_id)
            }
        }
    }

    pub fn snapshot(&self) -> Option<&JobSnapshot> {
        match self {
            JobEvent::Queued { snapshot, .. }
            | JobEvent::Submitted { snapshot, .. }
            | JobEvent::Progress { snapshot, .. }
            | JobEvent::Succeeded { snapshot, .. }
            | JobEvent::Failed { snapshot, .. }
            | JobEvent::SubmitFailed { snapshot, .. } => Some(snapshot),
            JobEvent::Busy { .. } | JobEvent::PollTimedOut { .. } | JobEvent::PollFailed { .. } => {
                None
            }
        }
    }

    pub fn error(&self) -> Option<&ClientError> {
        match self {
            JobEvent::SubmitFailed { error, .. }
            | JobEvent::PollTimedOut { error, .. }
            | JobEvent::PollFailed { error, .. } => Some(error),
            _ => None,
        }
    }

    /// True for the last event a job produces.
    pub fn is_settled(&self) -> bool {
        matches!(
            self.kind(),
            JobEventKind::Succeeded
                | JobEventKind::Failed
                | JobEventKind::SubmitFailed
                | JobEventKind::PollTimedOut
                | JobEventKind::PollFailed
        )
    }
}

/// Receives every [`JobEvent`], in order.
pub trait JobConsumer: Send + Sync + 'static {
    fn deliver(&self, event: JobEvent);
}

impl JobConsumer for mpsc::UnboundedSender<JobEvent> {
    fn deliver(&self, event: JobEvent) {
        // Receiver gone means nobody is listening any more
        let _ = self.send(event);
    }
}

#[cfg(any(test, feature = "test-support"))]
mod recording {
    use super::{JobConsumer, JobEvent, JobEventKind};
    use parking_lot::Mutex;
    use std::sync::Arc;

    /// Consumer that keeps every event for inspection.
    #[derive(Clone, Default)]
    pub struct RecordingConsumer {
        events: Arc<Mutex<Vec<JobEvent>>>,
    }

    impl RecordingConsumer {
        pub fn new() -> Self {
            Self::default()
        }

        pub fn events(&self) -> Vec<JobEvent> {
            self.events.lock().clone()
        }

        pub fn kinds(&self) -> Vec<JobEventKind> {
            self.events.lock().iter().map(JobEvent::kind).collect()
        }

        /// Drain recorded events.
        pub fn take(&self) -> Vec<JobEvent> {
            std::mem::take(&mut *self.events.lock())
        }

        pub fn last(&self) -> Option<JobEvent> {
            self.events.lock().last().cloned()
        }
    }

    impl JobConsumer for RecordingConsumer {
        fn deliver(&self, event: JobEvent) {
            self.events.lock().push(event);
        }
    }
}

#[cfg(any(test, feature = "test-support"))]
pub use recording::RecordingConsumer;

#[cfg(test)]
#[path = "event_tests.rs"]
mod tests;
