// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Public results feed.

use crate::simulation::{fixture_name, FixtureKind, FixtureSource};
use aas_core::{AppId, JobId, JobSnapshot, APPS};
use chrono::{DateTime, Utc};
use parking_lot::Mutex;
use std::sync::Arc;

/// Receives terminal snapshots that are marked public.
pub trait ResultsPublisher: Send + Sync + 'static {
    fn publish(&self, app: &AppId, snapshot: &JobSnapshot);
}

/// Publisher that drops everything.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopPublisher;

impl ResultsPublisher for NoopPublisher {
    fn publish(&self, _app: &AppId, _snapshot: &JobSnapshot) {}
}

/// In-memory feed of public results, most recent first.
#[derive(Clone, Default)]
pub struct PublicResultsFeed {
    results: Arc<Mutex<Vec<JobSnapshot>>>,
}

impl PublicResultsFeed {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn results(&self) -> Vec<JobSnapshot> {
        self.results.lock().clone()
    }

    pub fn len(&self) -> usize {
        self.results.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.results.lock().is_empty()
    }

    /// Append each catalog app's success fixture when it is public.
    ///
    /// Apps whose fixture is missing or unreadable are skipped. Returns the
    /// number of results added.
    pub fn seed_from_fixtures(&self, fixtures: &dyn FixtureSource, now: DateTime<Utc>) -> usize {
        let mut added = 0;
        for info in APPS {
            let app = AppId::new(info.id);
            let name = fixture_name(&app, FixtureKind::Success);
            let raw = match fixtures.load(&name) {
                Ok(raw) => raw,
                Err(e) => {
                    tracing::warn!(%app, error = %e, "no result manifest for app");
                    continue;
                }
            };
            if raw.public != Some(true) {
                continue;
            }
            let job_id = JobId::new(format!("{}-result", app));
            self.results.lock().push(raw.normalize(&job_id, &app, now));
            added += 1;
        }
        added
    }
}

impl ResultsPublisher for PublicResultsFeed {
    fn publish(&self, app: &AppId, snapshot: &JobSnapshot) {
        if !snapshot.public {
            return;
        }
        tracing::info!(%app, job_id = %snapshot.job_id, "published result");
        self.results.lock().insert(0, snapshot.clone());
    }
}

#[cfg(test)]
#[path = "publish_tests.rs"]
mod tests;
