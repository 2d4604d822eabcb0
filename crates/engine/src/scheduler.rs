// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Timer scheduler
//!
//! Holds one-shot and repeating timers keyed by [`TimerId`]. Nothing runs on
//! its own: the owner asks for [`Scheduler::fired_timers`] and acts on the
//! returned ids.

use aas_core::TimerId;
use std::collections::HashMap;
use std::time::{Duration, Instant};

#[derive(Debug, Clone)]
struct Timer {
    deadline: Instant,
    /// Re-arm period for repeating timers
    period: Option<Duration>,
}

/// Manages timers
#[derive(Debug, Default)]
pub struct Scheduler {
    timers: HashMap<TimerId, Timer>,
}

impl Scheduler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Arm a one-shot timer, replacing any timer with the same id.
    pub fn set_timer(&mut self, id: TimerId, duration: Duration, now: Instant) {
        self.timers.insert(id, Timer { deadline: now + duration, period: None });
    }

    /// Arm a repeating timer whose first deadline is one `period` from `now`.
    pub fn set_interval(&mut self, id: TimerId, period: Duration, now: Instant) {
        self.timers.insert(id, Timer { deadline: now + period, period: Some(period) });
    }

    /// Returns true if a timer was removed.
    pub fn cancel_timer(&mut self, id: &str) -> bool {
        self.timers.remove(id).is_some()
    }

    pub fn is_scheduled(&self, id: &str) -> bool {
        self.timers.contains_key(id)
    }

    /// Collect due timers, ordered by deadline.
    ///
    /// One-shot timers are removed. Repeating timers re-arm one period after
    /// their deadline; a timer that fell more than a period behind re-arms
    /// from `now` so missed ticks collapse into one.
    pub fn fired_timers(&mut self, now: Instant) -> Vec<TimerId> {
        let mut due: Vec<(Instant, TimerId)> = self
            .timers
            .iter()
            .filter(|(_, t)| t.deadline <= now)
            .map(|(id, t)| (t.deadline, id.clone()))
            .collect();
        due.sort();

        for (deadline, id) in &due {
            let Some(timer) = self.timers.get_mut(id.as_str()) else { continue };
            match timer.period {
                Some(period) if !period.is_zero() => {
                    let next = *deadline + period;
                    timer.deadline = if next <= now { now + period } else { next };
                }
                _ => {
                    self.timers.remove(id.as_str());
                }
            }
        }

        due.into_iter().map(|(_, id)| id).collect()
    }

    pub fn has_timers(&self) -> bool {
        !self.timers.is_empty()
    }

    /// Earliest pending deadline
    pub fn next_deadline(&self) -> Option<Instant> {
        self.timers.values().map(|t| t.deadline).min()
    }
}

#[cfg(test)]
#[path = "scheduler_tests.rs"]
mod tests;
