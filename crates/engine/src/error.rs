// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Client error types

use aas_adapters::{FixtureError, ServiceError};
use aas_core::JobId;
use thiserror::Error;

/// Errors surfaced to job consumers
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ClientError {
    #[error(transparent)]
    Service(#[from] ServiceError),
    /// Polling ran past the configured duration without a terminal state
    #[error("polling timed out for job {job_id} after {polls} polls")]
    PollTimeout { job_id: JobId, polls: u32 },
}

/// Coarse classification of a [`ClientError`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    Transport,
    PollTimeout,
    FixtureMissing,
    Fixture,
}

aas_core::simple_display! {
    ErrorKind {
        Transport => "transport",
        PollTimeout => "poll_timeout",
        FixtureMissing => "fixture_missing",
        Fixture => "fixture",
    }
}

impl ClientError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            ClientError::Service(ServiceError::Transport(_)) => ErrorKind::Transport,
            ClientError::Service(ServiceError::Fixture(FixtureError::Missing(_))) => {
                ErrorKind::FixtureMissing
            }
            ClientError::Service(ServiceError::Fixture(_)) => ErrorKind::Fixture,
            ClientError::PollTimeout { .. } => ErrorKind::PollTimeout,
        }
    }
}

#[cfg(test)]
#[path = "error_tests.rs"]
mod tests;
