// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

//! aas-adapters: Remote job services (live HTTP and offline simulation)
//! and the public-results publisher.

pub mod publish;
pub mod service;
pub mod simulation;

pub use publish::{NoopPublisher, PublicResultsFeed, ResultsPublisher};
pub use service::{HttpJobService, RemoteJobService, ServiceError, Submission};
#[cfg(any(test, feature = "test-support"))]
pub use service::{FakeJobService, FetchGate, ServiceCall};
pub use simulation::{
    fixture_name, BuiltinFixtures, DirFixtures, FixtureError, FixtureKind, FixtureSource,
    MemoryFixtures, SimulationService, DEFAULT_SUCCESS_PROBABILITY, RUNNING_POLLS,
};
