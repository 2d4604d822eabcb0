// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Offline substitute for the remote job service.
//!
//! Each submission loads the app's fixtures, picks an outcome, and keeps a
//! [`SimulationScript`] keyed by job id. Polls then replay that script: two
//! running answers followed by the chosen terminal entry.

mod fixtures;
mod script;

pub use fixtures::{
    fixture_name, BuiltinFixtures, DirFixtures, FixtureError, FixtureKind, FixtureSource,
    MemoryFixtures,
};
pub use script::{ScriptStage, SimulationScript, RUNNING_POLLS};

use crate::service::{RemoteJobService, ServiceError, Submission};
use aas_core::{AppId, Clock, JobId, JobSnapshot, Payload, PartialSnapshot};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use parking_lot::Mutex;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

/// Probability that a simulated job succeeds.
pub const DEFAULT_SUCCESS_PROBABILITY: f64 = 0.8;

/// Scripted job service backed by fixtures.
pub struct SimulationService<C: Clock> {
    fixtures: Arc<dyn FixtureSource>,
    clock: C,
    success_probability: f64,
    scripts: Mutex<HashMap<JobId, SimulationScript>>,
    rng: Mutex<StdRng>,
    seq: AtomicU64,
}

impl<C: Clock> SimulationService<C> {
    pub fn new(fixtures: Arc<dyn FixtureSource>, clock: C) -> Self {
        Self {
            fixtures,
            clock,
            success_probability: DEFAULT_SUCCESS_PROBABILITY,
            scripts: Mutex::new(HashMap::new()),
            rng: Mutex::new(StdRng::seed_from_u64(rand::random())),
            seq: AtomicU64::new(0),
        }
    }

    /// Make outcome draws reproducible.
    pub fn with_seed(self, seed: u64) -> Self {
        *self.rng.lock() = StdRng::seed_from_u64(seed);
        self
    }

    /// Probability of choosing the success entry, clamped to `[0, 1]`.
    pub fn with_success_probability(mut self, p: f64) -> Self {
        self.success_probability = if p.is_nan() { DEFAULT_SUCCESS_PROBABILITY } else { p.clamp(0.0, 1.0) };
        self
    }

    pub fn success_probability(&self) -> f64 {
        self.success_probability
    }

    /// Drop every script.
    pub fn reset(&self) {
        self.scripts.lock().clear();
    }

    pub fn script_count(&self) -> usize {
        self.scripts.lock().len()
    }

    pub fn has_script(&self, job_id: &JobId) -> bool {
        self.scripts.lock().contains_key(job_id)
    }

    fn load(&self, app: &AppId, kind: FixtureKind) -> Result<PartialSnapshot, FixtureError> {
        self.fixtures.load(&fixture_name(app, kind))
    }

    fn load_optional(
        &self,
        app: &AppId,
        kind: FixtureKind,
    ) -> Result<Option<PartialSnapshot>, FixtureError> {
        self.fixtures.load_optional(&fixture_name(app, kind))
    }

    fn next_job_id(&self, app: &AppId) -> JobId {
        let seq = self.seq.fetch_add(1, Ordering::Relaxed) + 1;
        JobId::new(format!("{}-{}-{}", app, self.clock.epoch_ms(), seq))
    }

    /// Pick the terminal entry: success with the configured probability,
    /// falling back to whichever fixture exists.
    fn choose_outcome(
        &self,
        success: Option<PartialSnapshot>,
        failed: Option<PartialSnapshot>,
    ) -> Option<PartialSnapshot> {
        if success.is_none() || failed.is_none() {
            return success.or(failed);
        }
        if self.rng.lock().random_bool(self.success_probability) {
            success
        } else {
            failed
        }
    }
}

fn stamp(raw: PartialSnapshot, job_id: &JobId, app: &AppId, now: DateTime<Utc>) -> JobSnapshot {
    let mut snapshot = raw.normalize(job_id, app, now);
    snapshot.completed_at = None;
    snapshot
}

#[async_trait]
impl<C: Clock> RemoteJobService for SimulationService<C> {
    fn name(&self) -> &'static str {
        "simulation"
    }

    async fn submit(&self, app: &AppId, payload: &Payload) -> Result<Submission, ServiceError> {
        let running = self.load(app, FixtureKind::Running)?;
        let success = self.load_optional(app, FixtureKind::Success)?;
        let failed = self.load_optional(app, FixtureKind::Failed)?;

        let job_id = self.next_job_id(app);
        let now = self.clock.utc_now();
        let terminal = self.choose_outcome(success, failed).map(|raw| stamp(raw, &job_id, app, now));
        let running = stamp(running, &job_id, app, now);

        let outcome = terminal.as_ref().map(|s| s.status.to_string());
        tracing::info!(
            %app,
            job_id = %job_id,
            outcome = %outcome.as_deref().unwrap_or("none"),
            "simulated job submitted"
        );

        let script = SimulationScript::new(app.clone(), payload.clone(), running, terminal);
        let initial_status = Some(script.initial().clone());
        self.scripts.lock().insert(job_id.clone(), script);
        Ok(Submission { job_id, initial_status })
    }

    async fn fetch_status(&self, app: &AppId, job_id: &JobId) -> Result<JobSnapshot, ServiceError> {
        let now = self.clock.utc_now();
        if let Some(script) = self.scripts.lock().get_mut(job_id) {
            let snapshot = script.advance(now);
            tracing::debug!(job_id = %job_id, poll = script.poll_count(), status = %snapshot.status, "simulated poll");
            return Ok(snapshot);
        }

        tracing::warn!(%app, job_id = %job_id, "no simulation script for job, serving success fixture");
        let raw = self.load(app, FixtureKind::Success)?;
        Ok(raw.normalize(job_id, app, now))
    }
}

#[cfg(test)]
#[path = "mod_tests.rs"]
mod tests;
