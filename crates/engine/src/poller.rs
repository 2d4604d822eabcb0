// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Per-job status polling.
//!
//! Each polled job owns one [`PollSession`] and one repeating timer in the
//! shared [`Scheduler`]. A fired timer becomes one [`JobPoller::tick`]:
//! count the poll, fetch with no lock held, then deliver the answer under the
//! delivery lock. Terminal answers, timeouts, fetch errors, and `cancel` all
//! end the session through [`JobPoller::teardown`].
//!
//! Lock order: delivery, then sessions, then scheduler.

use crate::scheduler::Scheduler;
use aas_adapters::{RemoteJobService, ServiceError};
use aas_core::{AppId, Clock, JobId, JobSnapshot, TimerId};
use parking_lot::{Mutex, ReentrantMutex};
use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};

/// Default time between polls.
pub const DEFAULT_POLL_INTERVAL: Duration = Duration::from_millis(2000);
/// Default time a job may be polled before giving up.
pub const DEFAULT_MAX_POLL_DURATION: Duration = Duration::from_secs(20 * 60);

/// Polling cadence and budget.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PollConfig {
    pub interval: Duration,
    pub max_duration: Duration,
}

impl Default for PollConfig {
    fn default() -> Self {
        Self { interval: DEFAULT_POLL_INTERVAL, max_duration: DEFAULT_MAX_POLL_DURATION }
    }
}

impl PollConfig {
    pub fn new(interval: Duration, max_duration: Duration) -> Self {
        Self { interval, max_duration }
    }

    /// Fetches allowed per session: `floor(max_duration / interval)`.
    pub fn max_polls(&self) -> u32 {
        let interval = self.interval.as_millis();
        if interval == 0 {
            return 0;
        }
        u32::try_from(self.max_duration.as_millis() / interval).unwrap_or(u32::MAX)
    }
}

/// Receives the outcome of each poll for one session.
pub trait PollObserver: Send + Sync + 'static {
    fn on_snapshot(&self, snapshot: JobSnapshot);
    /// The session ran out of polls after `polls` fetches.
    fn on_timeout(&self, job_id: &JobId, polls: u32);
    fn on_error(&self, job_id: &JobId, error: ServiceError);
}

struct PollSession {
    app: AppId,
    generation: u64,
    poll_count: u32,
    /// Highest poll whose answer was delivered
    last_delivered: u32,
    started_at: Instant,
    service: Arc<dyn RemoteJobService>,
    observer: Arc<dyn PollObserver>,
}

/// Snapshot of session fields needed to run one fetch without holding locks.
struct PollTicket {
    app: AppId,
    generation: u64,
    poll: u32,
    service: Arc<dyn RemoteJobService>,
}

/// Registry of active poll sessions.
pub struct JobPoller<C: Clock> {
    config: PollConfig,
    clock: C,
    scheduler: Arc<Mutex<Scheduler>>,
    sessions: Mutex<HashMap<JobId, PollSession>>,
    delivery: ReentrantMutex<()>,
    next_generation: AtomicU64,
}

impl<C: Clock> JobPoller<C> {
    pub fn new(config: PollConfig, clock: C, scheduler: Arc<Mutex<Scheduler>>) -> Self {
        Self {
            config,
            clock,
            scheduler,
            sessions: Mutex::new(HashMap::new()),
            delivery: ReentrantMutex::new(()),
            next_generation: AtomicU64::new(1),
        }
    }

    pub fn config(&self) -> &PollConfig {
        &self.config
    }

    /// Begin polling `job_id`, replacing any session already polling it.
    pub fn start(
        &self,
        app: AppId,
        job_id: JobId,
        service: Arc<dyn RemoteJobService>,
        observer: Arc<dyn PollObserver>,
    ) {
        let _delivery = self.delivery.lock();
        let mut sessions = self.sessions.lock();
        if self.teardown(&mut sessions, &job_id).is_some() {
            tracing::debug!(job_id = %job_id, "replaced existing poll session");
        }

        let generation = self.next_generation.fetch_add(1, Ordering::Relaxed);
        let now = self.clock.now();
        tracing::info!(
            %app,
            job_id = %job_id,
            service = service.name(),
            max_polls = self.config.max_polls(),
            "polling started"
        );
        sessions.insert(
            job_id.clone(),
            PollSession {
                app,
                generation,
                poll_count: 0,
                last_delivered: 0,
                started_at: now,
                service,
                observer,
            },
        );
        self.scheduler.lock().set_interval(TimerId::job_poll(&job_id), self.config.interval, now);
    }

    /// Stop polling `job_id`. No callback for it fires after this returns.
    ///
    /// Returns true if a session was active.
    pub fn cancel(&self, job_id: &JobId) -> bool {
        let _delivery = self.delivery.lock();
        let mut sessions = self.sessions.lock();
        let cancelled = self.teardown(&mut sessions, job_id).is_some();
        if cancelled {
            tracing::info!(job_id = %job_id, "polling cancelled");
        }
        cancelled
    }

    /// Stop every session.
    pub fn cancel_all(&self) {
        let _delivery = self.delivery.lock();
        let mut sessions = self.sessions.lock();
        let job_ids: Vec<JobId> = sessions.keys().cloned().collect();
        for job_id in &job_ids {
            self.teardown(&mut sessions, job_id);
        }
        if !job_ids.is_empty() {
            tracing::info!(count = job_ids.len(), "cancelled all poll sessions");
        }
    }

    pub fn is_polling(&self, job_id: &JobId) -> bool {
        self.sessions.lock().contains_key(job_id)
    }

    pub fn active_jobs(&self) -> Vec<JobId> {
        let mut jobs: Vec<JobId> = self.sessions.lock().keys().cloned().collect();
        jobs.sort();
        jobs
    }

    /// Polls counted so far for an active session.
    pub fn poll_count(&self, job_id: &JobId) -> Option<u32> {
        self.sessions.lock().get(job_id).map(|s| s.poll_count)
    }

    /// Time since the session for `job_id` started.
    pub fn elapsed(&self, job_id: &JobId) -> Option<Duration> {
        let started_at = self.sessions.lock().get(job_id)?.started_at;
        Some(self.clock.now().saturating_duration_since(started_at))
    }

    /// Run one poll cycle for `job_id`.
    pub async fn tick(&self, job_id: &JobId) {
        let Some(ticket) = self.begin_poll(job_id) else {
            return;
        };
        tracing::debug!(app = %ticket.app, job_id = %job_id, poll = ticket.poll, "polling job");
        let result = ticket.service.fetch_status(&ticket.app, job_id).await;
        self.resolve(job_id, ticket, result);
    }

    /// Count the poll; end the session if the budget is spent.
    fn begin_poll(&self, job_id: &JobId) -> Option<PollTicket> {
        let _delivery = self.delivery.lock();
        let mut sessions = self.sessions.lock();
        let max_polls = self.config.max_polls();
        let session = sessions.get_mut(job_id)?;
        session.poll_count += 1;

        if session.poll_count > max_polls {
            let app = session.app.clone();
            let observer = Arc::clone(&session.observer);
            self.teardown(&mut sessions, job_id);
            drop(sessions);
            tracing::info!(%app, job_id = %job_id, polls = max_polls, "polling timed out");
            observer.on_timeout(job_id, max_polls);
            return None;
        }

        Some(PollTicket {
            app: session.app.clone(),
            generation: session.generation,
            poll: session.poll_count,
            service: Arc::clone(&session.service),
        })
    }

    /// Deliver a fetch result unless its session was replaced, cancelled, or
    /// already answered by a later poll.
    fn resolve(&self, job_id: &JobId, ticket: PollTicket, result: Result<JobSnapshot, ServiceError>) {
        let _delivery = self.delivery.lock();
        let observer = {
            let mut sessions = self.sessions.lock();
            let Some(session) = sessions.get_mut(job_id) else {
                tracing::debug!(job_id = %job_id, poll = ticket.poll, "discarding poll result for ended session");
                return;
            };
            if session.generation != ticket.generation || ticket.poll <= session.last_delivered {
                tracing::debug!(job_id = %job_id, poll = ticket.poll, "discarding stale poll result");
                return;
            }
            session.last_delivered = ticket.poll;
            let observer = Arc::clone(&session.observer);
            let finished = result.as_ref().map(JobSnapshot::is_terminal).unwrap_or(true);
            if finished {
                self.teardown(&mut sessions, job_id);
            }
            observer
        };

        match result {
            Ok(snapshot) => {
                if snapshot.is_terminal() {
                    tracing::info!(
                        app = %ticket.app,
                        job_id = %job_id,
                        status = %snapshot.status,
                        poll = ticket.poll,
                        "job reached terminal state"
                    );
                }
                observer.on_snapshot(snapshot);
            }
            Err(error) => {
                tracing::warn!(app = %ticket.app, job_id = %job_id, poll = ticket.poll, error = %error, "status fetch failed");
                observer.on_error(job_id, error);
            }
        }
    }

    /// Shared stop path: remove the session and its timer.
    fn teardown(
        &self,
        sessions: &mut HashMap<JobId, PollSession>,
        job_id: &JobId,
    ) -> Option<PollSession> {
        let session = sessions.remove(job_id)?;
        self.scheduler.lock().cancel_timer(TimerId::job_poll(job_id).as_str());
        Some(session)
    }
}

#[cfg(test)]
#[path = "poller_tests.rs"]
mod tests;
