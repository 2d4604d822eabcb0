// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;
use aas_adapters::FakeJobService;
use aas_core::test_support::snapshot;
use aas_core::{FakeClock, JobStatus};
use proptest::prelude::*;
use yare::parameterized;

const INTERVAL: Duration = Duration::from_secs(2);

#[derive(Debug, Clone, PartialEq)]
enum Observed {
    Snapshot(JobStatus),
    Timeout(u32),
    Error(ServiceError),
}

#[derive(Default)]
struct TestObserver {
    seen: Mutex<Vec<Observed>>,
}

impl TestObserver {
    fn seen(&self) -> Vec<Observed> {
        self.seen.lock().clone()
    }
}

impl PollObserver for TestObserver {
    fn on_snapshot(&self, snapshot: JobSnapshot) {
        self.seen.lock().push(Observed::Snapshot(snapshot.status));
    }

    fn on_timeout(&self, _job_id: &JobId, polls: u32) {
        self.seen.lock().push(Observed::Timeout(polls));
    }

    fn on_error(&self, _job_id: &JobId, error: ServiceError) {
        self.seen.lock().push(Observed::Error(error));
    }
}

struct Ctx {
    clock: FakeClock,
    scheduler: Arc<Mutex<Scheduler>>,
    poller: Arc<JobPoller<FakeClock>>,
    service: FakeJobService,
}

fn ctx(max_duration: Duration) -> Ctx {
    let clock = FakeClock::new();
    let scheduler = Arc::new(Mutex::new(Scheduler::new()));
    let poller = Arc::new(JobPoller::new(
        PollConfig::new(INTERVAL, max_duration),
        clock.clone(),
        Arc::clone(&scheduler),
    ));
    Ctx { clock, scheduler, poller, service: FakeJobService::new() }
}

impl Ctx {
    fn start(&self, job: &str) -> Arc<TestObserver> {
        let observer = Arc::new(TestObserver::default());
        self.poller.start(
            AppId::new("jwst"),
            JobId::new(job),
            Arc::new(self.service.clone()),
            observer.clone(),
        );
        observer
    }

    /// Advance one interval and run every fired poll.
    async fn step(&self) {
        self.clock.advance(INTERVAL);
        let fired = self.scheduler.lock().fired_timers(self.clock.now());
        for id in fired {
            if let Some(job_id) = id.job_id() {
                self.poller.tick(&job_id).await;
            }
        }
    }
}

fn statuses(list: &[JobStatus]) -> Vec<JobSnapshot> {
    list.iter().map(|s| snapshot("jwst-1", *s)).collect()
}

#[parameterized(
    default = { 2000, 20 * 60 * 1000, 600 },
    uneven = { 3000, 10_000, 3 },
    shorter_than_interval = { 5000, 4000, 0 },
    zero_interval = { 0, 1000, 0 },
)]
fn max_polls(interval_ms: u64, max_ms: u64, expected: u32) {
    let config = PollConfig::new(Duration::from_millis(interval_ms), Duration::from_millis(max_ms));
    assert_eq!(config.max_polls(), expected);
}

#[tokio::test]
async fn start_arms_repeating_timer() {
    let ctx = ctx(Duration::from_secs(60));
    ctx.start("jwst-1");

    assert!(ctx.poller.is_polling(&JobId::new("jwst-1")));
    assert!(ctx.scheduler.lock().is_scheduled("job-poll:jwst-1"));
    assert_eq!(ctx.poller.poll_count(&JobId::new("jwst-1")), Some(0));
}

#[tokio::test]
async fn delivers_until_terminal_then_stops() {
    let ctx = ctx(Duration::from_secs(60));
    ctx.service.push_statuses(
        "jwst-1",
        statuses(&[JobStatus::Queued, JobStatus::Running, JobStatus::Succeeded]),
    );
    let observer = ctx.start("jwst-1");

    for _ in 0..5 {
        ctx.step().await;
    }

    assert_eq!(
        observer.seen(),
        vec![
            Observed::Snapshot(JobStatus::Queued),
            Observed::Snapshot(JobStatus::Running),
            Observed::Snapshot(JobStatus::Succeeded),
        ]
    );
    assert!(!ctx.poller.is_polling(&JobId::new("jwst-1")));
    assert!(!ctx.scheduler.lock().has_timers());
    assert_eq!(ctx.service.fetch_count("jwst-1"), 3);
}

#[tokio::test]
async fn times_out_after_max_polls() {
    let ctx = ctx(Duration::from_secs(6));
    let observer = ctx.start("jwst-1");

    for _ in 0..6 {
        ctx.step().await;
    }

    let seen = observer.seen();
    assert_eq!(seen.len(), 4);
    assert_eq!(seen[3], Observed::Timeout(3));
    assert!(seen[..3].iter().all(|o| *o == Observed::Snapshot(JobStatus::Running)));
    assert_eq!(ctx.service.fetch_count("jwst-1"), 3);
    assert!(!ctx.poller.is_polling(&JobId::new("jwst-1")));
}

#[tokio::test]
async fn fetch_error_stops_without_retry() {
    let ctx = ctx(Duration::from_secs(60));
    ctx.service.fail_fetch("jwst-1", ServiceError::Transport("HTTP 502".into()));
    let observer = ctx.start("jwst-1");

    ctx.step().await;
    ctx.step().await;

    assert_eq!(observer.seen(), vec![Observed::Error(ServiceError::Transport("HTTP 502".into()))]);
    assert_eq!(ctx.service.fetch_count("jwst-1"), 1);
}

#[tokio::test]
async fn restart_replaces_session() {
    let ctx = ctx(Duration::from_secs(60));
    let first = ctx.start("jwst-1");
    ctx.step().await;
    let second = ctx.start("jwst-1");

    ctx.step().await;

    assert_eq!(first.seen().len(), 1);
    assert_eq!(second.seen().len(), 1);
    assert_eq!(ctx.poller.active_jobs(), vec![JobId::new("jwst-1")]);
    assert_eq!(ctx.poller.poll_count(&JobId::new("jwst-1")), Some(1));
}

#[tokio::test]
async fn cancel_is_idempotent_and_silences_job() {
    let ctx = ctx(Duration::from_secs(60));
    let observer = ctx.start("jwst-1");
    let job_id = JobId::new("jwst-1");

    assert!(ctx.poller.cancel(&job_id));
    assert!(!ctx.poller.cancel(&job_id));
    ctx.step().await;
    ctx.poller.tick(&job_id).await;

    assert!(observer.seen().is_empty());
    assert!(!ctx.scheduler.lock().has_timers());
}

#[tokio::test]
async fn cancel_during_fetch_discards_result() {
    let ctx = ctx(Duration::from_secs(60));
    let gate = ctx.service.gate_fetches();
    let observer = ctx.start("jwst-1");
    let job_id = JobId::new("jwst-1");

    let poller = Arc::clone(&ctx.poller);
    let tick_job = job_id.clone();
    let tick = tokio::spawn(async move { poller.tick(&tick_job).await });
    while ctx.service.fetch_count("jwst-1") == 0 {
        tokio::task::yield_now().await;
    }

    ctx.poller.cancel(&job_id);
    gate.release(1);
    tick.await.unwrap();

    assert!(observer.seen().is_empty());
}

#[tokio::test]
async fn replaced_session_discards_old_fetch() {
    let ctx = ctx(Duration::from_secs(60));
    let gate = ctx.service.gate_fetches();
    let old = ctx.start("jwst-1");
    let job_id = JobId::new("jwst-1");

    let poller = Arc::clone(&ctx.poller);
    let tick_job = job_id.clone();
    let tick = tokio::spawn(async move { poller.tick(&tick_job).await });
    while ctx.service.fetch_count("jwst-1") == 0 {
        tokio::task::yield_now().await;
    }

    let new = ctx.start("jwst-1");
    gate.release(1);
    tick.await.unwrap();

    assert!(old.seen().is_empty());
    assert!(new.seen().is_empty());
    assert!(ctx.poller.is_polling(&job_id));
}

#[tokio::test]
async fn out_of_order_result_is_discarded() {
    let ctx = ctx(Duration::from_secs(60));
    let observer = ctx.start("jwst-1");
    let job_id = JobId::new("jwst-1");

    let first = ctx.poller.begin_poll(&job_id).unwrap();
    let second = ctx.poller.begin_poll(&job_id).unwrap();
    ctx.poller.resolve(&job_id, second, Ok(snapshot("jwst-1", JobStatus::Running)));
    ctx.poller.resolve(&job_id, first, Ok(snapshot("jwst-1", JobStatus::Queued)));

    assert_eq!(observer.seen(), vec![Observed::Snapshot(JobStatus::Running)]);
}

struct CancellingObserver {
    poller: Arc<JobPoller<FakeClock>>,
    inner: TestObserver,
}

impl PollObserver for CancellingObserver {
    fn on_snapshot(&self, snapshot: JobSnapshot) {
        self.poller.cancel(&snapshot.job_id);
        self.inner.on_snapshot(snapshot);
    }

    fn on_timeout(&self, job_id: &JobId, polls: u32) {
        self.inner.on_timeout(job_id, polls);
    }

    fn on_error(&self, job_id: &JobId, error: ServiceError) {
        self.inner.on_error(job_id, error);
    }
}

#[tokio::test]
async fn cancel_from_inside_callback() {
    let ctx = ctx(Duration::from_secs(60));
    let observer = Arc::new(CancellingObserver {
        poller: Arc::clone(&ctx.poller),
        inner: TestObserver::default(),
    });
    ctx.poller.start(
        AppId::new("jwst"),
        JobId::new("jwst-1"),
        Arc::new(ctx.service.clone()),
        observer.clone(),
    );

    ctx.step().await;
    ctx.step().await;

    assert_eq!(observer.inner.seen(), vec![Observed::Snapshot(JobStatus::Running)]);
    assert!(!ctx.poller.is_polling(&JobId::new("jwst-1")));
}

#[tokio::test]
async fn sessions_are_isolated() {
    let ctx = ctx(Duration::from_secs(60));
    ctx.service.fail_fetch("eso-1", ServiceError::Transport("HTTP 500".into()));
    let eso = ctx.start("eso-1");
    let jwst = ctx.start("jwst-1");

    ctx.step().await;
    ctx.step().await;

    assert_eq!(eso.seen().len(), 1);
    assert_eq!(jwst.seen().len(), 2);
    assert_eq!(ctx.poller.active_jobs(), vec![JobId::new("jwst-1")]);
}

#[tokio::test]
async fn cancel_all_clears_every_session() {
    let ctx = ctx(Duration::from_secs(60));
    ctx.start("jwst-1");
    ctx.start("eso-1");

    ctx.poller.cancel_all();

    assert!(ctx.poller.active_jobs().is_empty());
    assert!(!ctx.scheduler.lock().has_timers());
}

proptest! {
    #[test]
    fn nothing_delivered_after_terminal(
        list in prop::collection::vec(aas_core::test_support::strategies::arb_job_status(), 1..8),
        extra_steps in 0usize..5,
    ) {
        let rt = tokio::runtime::Builder::new_current_thread().enable_all().build().unwrap();
        rt.block_on(async {
            let ctx = ctx(Duration::from_secs(60));
            ctx.service.push_statuses("jwst-1", statuses(&list));
            let observer = ctx.start("jwst-1");

            for _ in 0..(list.len() + extra_steps) {
                ctx.step().await;
            }

            let seen = observer.seen();
            let terminal_at = seen.iter().position(|o| matches!(
                o,
                Observed::Snapshot(JobStatus::Succeeded) | Observed::Snapshot(JobStatus::Failed)
            ));
            if let Some(i) = terminal_at {
                prop_assert_eq!(i, seen.len() - 1);
                prop_assert!(!ctx.poller.is_polling(&JobId::new("jwst-1")));
            }
            Ok(())
        })?;
    }
}
