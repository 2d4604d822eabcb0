// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

//! aas-core: Core types for the Astro Automation Studio job client

pub mod macros;

pub mod app;
pub mod clock;
pub mod display;
pub mod history;
pub mod id;
pub mod job;
pub mod timer;

#[cfg(any(test, feature = "test-support"))]
pub mod test_support;

pub use app::{AppId, AppInfo, APPS};
pub use clock::{Clock, FakeClock, SystemClock};
pub use display::{format_bytes, format_runtime, status_class};
pub use history::{RecentJobHistory, RecentJobHistoryEntry, HISTORY_CAPACITY};
#[cfg(any(test, feature = "test-support"))]
pub use job::JobSnapshotBuilder;
pub use job::{Artifact, JobId, JobSnapshot, JobStatus, PartialSnapshot, Payload, DEFAULT_LOGS};
pub use timer::{TimerId, TimerKind};
