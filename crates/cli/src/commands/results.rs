// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Public results feed, seeded from each app's published success manifest

use super::fixture_source;
use crate::output::{print_results, OutputFormat};
use aas_adapters::PublicResultsFeed;
use aas_core::{Clock, SystemClock};
use aas_engine::Config;
use anyhow::Result;

pub fn handle(config: &Config, format: OutputFormat) -> Result<()> {
    let feed = PublicResultsFeed::new();
    let fixtures = fixture_source(config);
    let added = feed.seed_from_fixtures(fixtures.as_ref(), SystemClock.utc_now());
    tracing::debug!(added, "seeded public results");
    print_results(&feed.results(), format)
}
