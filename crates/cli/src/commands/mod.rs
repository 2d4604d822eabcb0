// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! CLI command implementations

pub mod apps;
pub mod history;
pub mod results;
pub mod submit;

use aas_adapters::{BuiltinFixtures, DirFixtures, FixtureSource};
use aas_engine::Config;
use std::sync::Arc;

/// Fixture documents for simulation: `fixtures_dir` when configured,
/// otherwise the set compiled into the binary.
pub(crate) fn fixture_source(config: &Config) -> Arc<dyn FixtureSource> {
    match &config.fixtures_dir {
        Some(dir) => Arc::new(DirFixtures::new(dir)),
        None => Arc::new(BuiltinFixtures),
    }
}
