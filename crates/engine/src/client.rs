// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Job lifecycle client
//!
//! Submits jobs to the live or simulated service, polls them to a terminal
//! state, and reports every step to the [`JobConsumer`]. Terminal results
//! are recorded in the recent-jobs history and, when public, published.

use crate::config::Config;
use crate::env;
use crate::error::ClientError;
use crate::event::{JobConsumer, JobEvent};
use crate::poller::{JobPoller, PollConfig, PollObserver};
use crate::scheduler::Scheduler;
use aas_adapters::{RemoteJobService, ResultsPublisher, ServiceError};
use aas_core::{
    AppId, Clock, JobId, JobSnapshot, JobStatus, Payload, RecentJobHistory, RecentJobHistoryEntry,
};
use aas_storage::HistoryStore;
use parking_lot::Mutex;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tokio_util::sync::CancellationToken;

/// Upper bound on how long the driver loop sleeps between timer checks.
pub const DEFAULT_TIMER_CHECK: Duration = Duration::from_secs(1);

/// Runtime settings for [`JobLifecycleClient`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ClientConfig {
    pub poll: PollConfig,
    /// Route new submissions to the simulation service
    pub simulation_enabled: bool,
    pub timer_check: Duration,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self { poll: PollConfig::default(), simulation_enabled: true, timer_check: DEFAULT_TIMER_CHECK }
    }
}

impl ClientConfig {
    pub fn from_config(config: &Config) -> Self {
        Self {
            poll: config.poll_config(),
            simulation_enabled: config.simulation_enabled,
            timer_check: env::timer_check_ms().unwrap_or(DEFAULT_TIMER_CHECK),
        }
    }
}

/// Collaborators injected into the client.
pub struct ClientDeps {
    pub live: Arc<dyn RemoteJobService>,
    pub simulation: Arc<dyn RemoteJobService>,
    pub consumer: Arc<dyn JobConsumer>,
    pub publisher: Arc<dyn ResultsPublisher>,
    pub history_store: Arc<dyn HistoryStore>,
}

/// In-memory history backed by a store; every record is saved through.
struct HistoryRecorder {
    history: Mutex<RecentJobHistory>,
    store: Arc<dyn HistoryStore>,
}

impl HistoryRecorder {
    fn load(store: Arc<dyn HistoryStore>) -> Self {
        let history = match store.load_all() {
            Ok(entries) => RecentJobHistory::from_entries(entries),
            Err(e) => {
                tracing::warn!(error = %e, "failed to load job history, starting empty");
                RecentJobHistory::new()
            }
        };
        Self { history: Mutex::new(history), store }
    }

    fn record(&self, snapshot: &JobSnapshot) {
        let mut history = self.history.lock();
        history.record(RecentJobHistoryEntry::from_snapshot(snapshot));
        // Synchronous write under the delivery lock; the file holds at most
        // HISTORY_CAPACITY entries. Move to spawn_blocking if it grows.
        if let Err(e) = self.store.save_all(history.entries()) {
            tracing::warn!(job_id = %snapshot.job_id, error = %e, "failed to save job history");
        }
    }

    fn entries(&self) -> Vec<RecentJobHistoryEntry> {
        self.history.lock().entries().to_vec()
    }
}

/// Routes poll outcomes for one job to the consumer.
struct SessionObserver {
    app: AppId,
    consumer: Arc<dyn JobConsumer>,
    publisher: Arc<dyn ResultsPublisher>,
    history: Arc<HistoryRecorder>,
}

impl PollObserver for SessionObserver {
    fn on_snapshot(&self, snapshot: JobSnapshot) {
        let app = self.app.clone();
        match snapshot.status {
            JobStatus::Queued | JobStatus::Running => {
                self.consumer.deliver(JobEvent::Progress { app, snapshot });
            }
            JobStatus::Succeeded | JobStatus::Failed => {
                self.history.record(&snapshot);
                if snapshot.public {
                    self.publisher.publish(&app, &snapshot);
                }
                let event = if snapshot.status == JobStatus::Succeeded {
                    JobEvent::Succeeded { app, snapshot }
                } else {
                    JobEvent::Failed { app, snapshot }
                };
                self.consumer.deliver(event);
            }
        }
    }

    fn on_timeout(&self, job_id: &JobId, polls: u32) {
        self.consumer.deliver(JobEvent::PollTimedOut {
            app: self.app.clone(),
            job_id: job_id.clone(),
            error: ClientError::PollTimeout { job_id: job_id.clone(), polls },
        });
    }

    fn on_error(&self, job_id: &JobId, error: ServiceError) {
        self.consumer.deliver(JobEvent::PollFailed {
            app: self.app.clone(),
            job_id: job_id.clone(),
            error: error.into(),
        });
    }
}

/// Emits `Busy { busy: true }` on creation and `Busy { busy: false }` on drop.
struct BusyGuard {
    app: AppId,
    consumer: Arc<dyn JobConsumer>,
}

impl BusyGuard {
    fn new(app: AppId, consumer: Arc<dyn JobConsumer>) -> Self {
        consumer.deliver(JobEvent::Busy { app: app.clone(), busy: true });
        Self { app, consumer }
    }
}

impl Drop for BusyGuard {
    fn drop(&mut self) {
        self.consumer.deliver(JobEvent::Busy { app: self.app.clone(), busy: false });
    }
}

/// Entry point for submitting and following jobs.
pub struct JobLifecycleClient<C: Clock> {
    config: ClientConfig,
    clock: C,
    scheduler: Arc<Mutex<Scheduler>>,
    poller: Arc<JobPoller<C>>,
    simulation_enabled: AtomicBool,
    live: Arc<dyn RemoteJobService>,
    simulation: Arc<dyn RemoteJobService>,
    consumer: Arc<dyn JobConsumer>,
    publisher: Arc<dyn ResultsPublisher>,
    history: Arc<HistoryRecorder>,
}

impl<C: Clock> JobLifecycleClient<C> {
    /// Build a client; the stored history is loaded immediately.
    pub fn new(config: ClientConfig, deps: ClientDeps, clock: C) -> Self {
        let scheduler = Arc::new(Mutex::new(Scheduler::new()));
        let poller = Arc::new(JobPoller::new(config.poll, clock.clone(), Arc::clone(&scheduler)));
        Self {
            config,
            clock,
            scheduler,
            poller,
            simulation_enabled: AtomicBool::new(config.simulation_enabled),
            live: deps.live,
            simulation: deps.simulation,
            consumer: deps.consumer,
            publisher: deps.publisher,
            history: Arc::new(HistoryRecorder::load(deps.history_store)),
        }
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    /// Choose the service for future submissions. Jobs already being polled
    /// keep the service they were submitted to.
    pub fn set_simulation_enabled(&self, enabled: bool) {
        self.simulation_enabled.store(enabled, Ordering::SeqCst);
        tracing::info!(simulation = enabled, "service mode changed");
    }

    pub fn simulation_enabled(&self) -> bool {
        self.simulation_enabled.load(Ordering::SeqCst)
    }

    fn active_service(&self) -> Arc<dyn RemoteJobService> {
        if self.simulation_enabled() {
            Arc::clone(&self.simulation)
        } else {
            Arc::clone(&self.live)
        }
    }

    /// Submit a job and start polling it.
    ///
    /// Every outcome, including failure, is also reported to the consumer.
    pub async fn submit_job(&self, app: &AppId, payload: &Payload) -> Result<JobId, ClientError> {
        let _busy = BusyGuard::new(app.clone(), Arc::clone(&self.consumer));
        self.consumer.deliver(JobEvent::Queued {
            app: app.clone(),
            snapshot: JobSnapshot::provisional(app.clone(), self.clock.utc_now()),
        });

        let service = self.active_service();
        tracing::info!(%app, service = service.name(), fields = payload.len(), "submitting job");

        let submission = match service.submit(app, payload).await {
            Ok(submission) => submission,
            Err(e) => {
                tracing::warn!(%app, error = %e, "submission failed");
                let snapshot = JobSnapshot::submit_failed(app.clone(), e.to_string(), self.clock.utc_now());
                let error = ClientError::from(e);
                self.consumer.deliver(JobEvent::SubmitFailed {
                    app: app.clone(),
                    snapshot,
                    error: error.clone(),
                });
                return Err(error);
            }
        };

        let job_id = submission.job_id;
        let snapshot = submission
            .initial_status
            .unwrap_or_else(|| JobSnapshot::queued(job_id.clone(), app.clone(), self.clock.utc_now()));
        tracing::info!(%app, job_id = %job_id, status = %snapshot.status, "job submitted");

        let observer = Arc::new(SessionObserver {
            app: app.clone(),
            consumer: Arc::clone(&self.consumer),
            publisher: Arc::clone(&self.publisher),
            history: Arc::clone(&self.history),
        });
        let terminal = snapshot.is_terminal();
        self.consumer.deliver(JobEvent::Submitted { app: app.clone(), snapshot: snapshot.clone() });
        if terminal {
            observer.on_snapshot(snapshot);
        } else {
            self.poller.start(app.clone(), job_id.clone(), service, observer);
        }
        Ok(job_id)
    }

    /// Stop following `job_id`. Returns true if it was being polled.
    pub fn cancel(&self, job_id: &JobId) -> bool {
        self.poller.cancel(job_id)
    }

    pub fn is_polling(&self, job_id: &JobId) -> bool {
        self.poller.is_polling(job_id)
    }

    pub fn active_jobs(&self) -> Vec<JobId> {
        self.poller.active_jobs()
    }

    /// Recent terminal jobs, most recent first.
    pub fn recent_jobs(&self) -> Vec<RecentJobHistoryEntry> {
        self.history.entries()
    }

    fn due_jobs(&self) -> Vec<JobId> {
        let fired = self.scheduler.lock().fired_timers(self.clock.now());
        fired.iter().filter_map(|id| id.job_id()).collect()
    }

    /// Run every due poll to completion, in deadline order.
    ///
    /// Returns the number of polls run.
    pub async fn tick(&self) -> usize {
        let due = self.due_jobs();
        for job_id in &due {
            self.poller.tick(job_id).await;
        }
        due.len()
    }

    fn next_wait(&self) -> Duration {
        let timer_check = self.config.timer_check;
        match self.scheduler.lock().next_deadline() {
            Some(deadline) => deadline.saturating_duration_since(self.clock.now()).min(timer_check),
            None => timer_check,
        }
    }

    /// Drive polling until `cancel` fires, then stop every session.
    ///
    /// Each due poll runs as its own task so a slow fetch never delays the
    /// others.
    pub async fn run(self: Arc<Self>, cancel: CancellationToken) {
        tracing::debug!("client driver started");
        loop {
            let wait = self.next_wait();
            tokio::select! {
                _ = cancel.cancelled() => break,
                _ = tokio::time::sleep(wait) => {}
            }
            for job_id in self.due_jobs() {
                let poller = Arc::clone(&self.poller);
                tokio::spawn(async move { poller.tick(&job_id).await });
            }
        }
        self.shutdown();
        tracing::debug!("client driver stopped");
    }

    /// Cancel every poll session.
    pub fn shutdown(&self) {
        self.poller.cancel_all();
    }
}

#[cfg(test)]
#[path = "client_tests.rs"]
mod tests;
