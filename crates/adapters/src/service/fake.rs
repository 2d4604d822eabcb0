// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Fake job service for testing

use super::{RemoteJobService, ServiceError, Submission};
use aas_core::{AppId, JobId, JobSnapshot, JobStatus, Payload};
use async_trait::async_trait;
use parking_lot::Mutex;
use std::collections::{HashMap, VecDeque};
use std::sync::Arc;
use tokio::sync::Semaphore;

/// Recorded service call
#[derive(Debug, Clone, PartialEq)]
pub enum ServiceCall {
    Submit { app: AppId, payload: Payload },
    FetchStatus { app: AppId, job_id: JobId },
}

/// Holds `fetch_status` calls until released.
///
/// Lets tests observe the client while a fetch is in flight.
#[derive(Clone)]
pub struct FetchGate {
    permits: Arc<Semaphore>,
}

impl Default for FetchGate {
    /// A closed gate: every fetch waits for [`FetchGate::release`].
    fn default() -> Self {
        Self { permits: Arc::new(Semaphore::new(0)) }
    }
}

impl FetchGate {
    /// Allow `n` held fetches to complete.
    pub fn release(&self, n: usize) {
        self.permits.add_permits(n);
    }

    async fn pass(&self) {
        // The semaphore is never closed, so acquire cannot fail
        if let Ok(permit) = self.permits.acquire().await {
            permit.forget();
        }
    }
}

#[derive(Default)]
struct FakeState {
    id_prefix: Option<String>,
    next_id: u64,
    submit_error: Option<ServiceError>,
    fetch_errors: HashMap<JobId, ServiceError>,
    initial_status: Option<JobSnapshot>,
    statuses: HashMap<JobId, VecDeque<JobSnapshot>>,
    calls: Vec<ServiceCall>,
    gate: Option<FetchGate>,
}

/// Fake job service.
///
/// Submissions are assigned `fake-1`, `fake-2`, ... unless another id
/// prefix is set. Each job answers the
/// snapshots queued for it in order and keeps repeating the last one; a job
/// with nothing queued reports `Running`.
#[derive(Clone, Default)]
pub struct FakeJobService {
    inner: Arc<Mutex<FakeState>>,
}

impl FakeJobService {
    pub fn new() -> Self {
        Self::default()
    }

    /// Assign job ids as `<prefix>-<n>`.
    pub fn with_id_prefix(self, prefix: impl Into<String>) -> Self {
        self.inner.lock().id_prefix = Some(prefix.into());
        self
    }

    /// Make every following submit fail with `error`.
    pub fn fail_submit(&self, error: ServiceError) {
        self.inner.lock().submit_error = Some(error);
    }

    /// Make fetches for `job_id` fail with `error`.
    pub fn fail_fetch(&self, job_id: &str, error: ServiceError) {
        self.inner.lock().fetch_errors.insert(JobId::new(job_id), error);
    }

    /// Initial snapshot returned with the next submissions.
    pub fn set_initial_status(&self, snapshot: JobSnapshot) {
        self.inner.lock().initial_status = Some(snapshot);
    }

    /// Queue snapshots to answer for `job_id`, in order.
    pub fn push_statuses(&self, job_id: &str, snapshots: impl IntoIterator<Item = JobSnapshot>) {
        self.inner.lock().statuses.entry(JobId::new(job_id)).or_default().extend(snapshots);
    }

    /// Hold every fetch until the returned gate releases it.
    pub fn gate_fetches(&self) -> FetchGate {
        let gate = FetchGate::default();
        self.inner.lock().gate = Some(gate.clone());
        gate
    }

    pub fn calls(&self) -> Vec<ServiceCall> {
        self.inner.lock().calls.clone()
    }

    pub fn fetch_count(&self, job_id: &str) -> usize {
        self.inner
            .lock()
            .calls
            .iter()
            .filter(|c| matches!(c, ServiceCall::FetchStatus { job_id: id, .. } if id == job_id))
            .count()
    }
}

#[async_trait]
impl RemoteJobService for FakeJobService {
    fn name(&self) -> &'static str {
        "fake"
    }

    async fn submit(&self, app: &AppId, payload: &Payload) -> Result<Submission, ServiceError> {
        let mut inner = self.inner.lock();
        inner.calls.push(ServiceCall::Submit { app: app.clone(), payload: payload.clone() });
        if let Some(ref err) = inner.submit_error {
            return Err(err.clone());
        }
        inner.next_id += 1;
        let prefix = inner.id_prefix.as_deref().unwrap_or("fake");
        let job_id = JobId::new(format!("{}-{}", prefix, inner.next_id));
        let initial_status = inner.initial_status.clone().map(|mut s| {
            s.job_id = job_id.clone();
            s.app = app.clone();
            s
        });
        Ok(Submission { job_id, initial_status })
    }

    async fn fetch_status(&self, app: &AppId, job_id: &JobId) -> Result<JobSnapshot, ServiceError> {
        let gate = {
            let mut inner = self.inner.lock();
            inner.calls.push(ServiceCall::FetchStatus { app: app.clone(), job_id: job_id.clone() });
            inner.gate.clone()
        };
        if let Some(gate) = gate {
            gate.pass().await;
        }

        let mut inner = self.inner.lock();
        if let Some(err) = inner.fetch_errors.get(job_id) {
            return Err(err.clone());
        }
        let queued = inner.statuses.entry(job_id.clone()).or_default();
        let next = if queued.len() > 1 { queued.pop_front() } else { queued.front().cloned() };
        Ok(next.unwrap_or_else(|| {
            JobSnapshot::builder()
                .job_id(job_id.clone())
                .app(app.clone())
                .status(JobStatus::Running)
                .build()
        }))
    }
}

#[cfg(test)]
#[path = "fake_tests.rs"]
mod tests;
