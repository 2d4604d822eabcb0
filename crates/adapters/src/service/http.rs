// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Live job service over HTTP.
//!
//! `POST {base}/jobs/{endpoint}` submits a JSON payload and answers
//! `{"jobId": ...}`; `GET {base}/jobs/{jobId}` answers a (possibly partial)
//! snapshot. Any non-2xx answer is a transport error.

use super::{RemoteJobService, ServiceError, Submission};
use aas_core::{AppId, Clock, JobId, JobSnapshot, PartialSnapshot, Payload};
use async_trait::async_trait;
use serde::Deserialize;
use std::time::Duration;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct SubmitResponse {
    job_id: JobId,
    #[serde(default)]
    initial_status: Option<PartialSnapshot>,
}

/// Job service backed by the remote HTTP API.
///
/// Fields missing from an answer are defaulted against `clock`.
#[derive(Clone)]
pub struct HttpJobService<C: Clock> {
    client: reqwest::Client,
    base_url: String,
    clock: C,
}

impl<C: Clock> HttpJobService<C> {
    /// Build a client whose requests time out after `timeout` (connect + body).
    pub fn new(base_url: impl Into<String>, timeout: Duration, clock: C) -> Result<Self, ServiceError> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| ServiceError::Transport(format!("client setup failed: {}", e)))?;
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Ok(Self { client, base_url, clock })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn submit_url(&self, app: &AppId) -> String {
        format!("{}/jobs/{}", self.base_url, app.endpoint())
    }

    pub fn status_url(&self, job_id: &JobId) -> String {
        format!("{}/jobs/{}", self.base_url, job_id)
    }
}

/// Map a non-2xx status to a transport error.
fn check_status(response: reqwest::Response) -> Result<reqwest::Response, ServiceError> {
    let status = response.status();
    if status.is_success() {
        Ok(response)
    } else {
        Err(ServiceError::Transport(format!("HTTP {}", status.as_u16())))
    }
}

fn request_failed(e: reqwest::Error) -> ServiceError {
    ServiceError::Transport(format!("request failed: {}", e))
}

fn invalid_body(e: reqwest::Error) -> ServiceError {
    ServiceError::Transport(format!("invalid response body: {}", e))
}

#[async_trait]
impl<C: Clock> RemoteJobService for HttpJobService<C> {
    fn name(&self) -> &'static str {
        "live"
    }

    async fn submit(&self, app: &AppId, payload: &Payload) -> Result<Submission, ServiceError> {
        let url = self.submit_url(app);
        tracing::debug!(%app, %url, "submitting job");
        let response = self.client.post(&url).json(payload).send().await.map_err(request_failed)?;
        let body: SubmitResponse = check_status(response)?.json().await.map_err(invalid_body)?;
        let now = self.clock.utc_now();
        let initial_status = body.initial_status.map(|raw| raw.normalize(&body.job_id, app, now));
        Ok(Submission { job_id: body.job_id, initial_status })
    }

    async fn fetch_status(&self, app: &AppId, job_id: &JobId) -> Result<JobSnapshot, ServiceError> {
        let url = self.status_url(job_id);
        let response = self.client.get(&url).send().await.map_err(request_failed)?;
        let raw: PartialSnapshot = check_status(response)?.json().await.map_err(invalid_body)?;
        Ok(raw.normalize(job_id, app, self.clock.utc_now()))
    }
}

#[cfg(test)]
#[path = "http_tests.rs"]
mod tests;
