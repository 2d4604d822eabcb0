// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

//! aas-engine: Job lifecycle client, poll scheduling, and configuration

mod client;
mod config;
pub mod env;
mod error;
mod event;
mod poller;
mod scheduler;

pub use client::{ClientConfig, ClientDeps, JobLifecycleClient, DEFAULT_TIMER_CHECK};
pub use config::{Config, ConfigError, DEFAULT_API_BASE_URL};
pub use error::{ClientError, ErrorKind};
#[cfg(any(test, feature = "test-support"))]
pub use event::RecordingConsumer;
pub use event::{JobConsumer, JobEvent, JobEventKind};
pub use poller::{
    JobPoller, PollConfig, PollObserver, DEFAULT_MAX_POLL_DURATION, DEFAULT_POLL_INTERVAL,
};
pub use scheduler::Scheduler;
