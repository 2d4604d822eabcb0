// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Remote job service abstraction
//!
//! The remote service is an opaque box reachable through two operations:
//! submitting a job and fetching its current status. The live implementation
//! talks HTTP; the simulation implementation replays scripted snapshots.

mod http;

pub use http::HttpJobService;

#[cfg(any(test, feature = "test-support"))]
mod fake;
#[cfg(any(test, feature = "test-support"))]
pub use fake::{FakeJobService, FetchGate, ServiceCall};

use crate::simulation::FixtureError;
use aas_core::{AppId, JobId, JobSnapshot, Payload};
use async_trait::async_trait;
use thiserror::Error;

/// Errors from service operations
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ServiceError {
    /// Network failure or non-2xx answer from the live service
    #[error("transport error: {0}")]
    Transport(String),
    #[error(transparent)]
    Fixture(#[from] FixtureError),
}

impl ServiceError {
    /// True when a required simulation fixture was absent.
    pub fn is_fixture_missing(&self) -> bool {
        matches!(self, ServiceError::Fixture(FixtureError::Missing(_)))
    }
}

/// Accepted submission.
#[derive(Debug, Clone, PartialEq)]
pub struct Submission {
    pub job_id: JobId,
    /// First snapshot to show, when the service provides one
    pub initial_status: Option<JobSnapshot>,
}

/// Capability set of a remote job service.
#[async_trait]
pub trait RemoteJobService: Send + Sync + 'static {
    /// Short name used in logs (`live`, `simulation`)
    fn name(&self) -> &'static str;

    /// Submit a job and return its assigned id.
    async fn submit(&self, app: &AppId, payload: &Payload) -> Result<Submission, ServiceError>;

    /// Fetch the current snapshot of a job.
    async fn fetch_status(&self, app: &AppId, job_id: &JobId) -> Result<JobSnapshot, ServiceError>;
}
