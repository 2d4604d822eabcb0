// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Recent-jobs listing

use crate::output::{print_history, OutputFormat};
use aas_engine::Config;
use aas_storage::{HistoryStore, JsonHistoryStore};
use anyhow::Result;
use clap::Args;

#[derive(Args)]
pub struct HistoryArgs {
    /// Show at most this many entries
    #[arg(short = 'n', long)]
    pub limit: Option<usize>,
}

pub fn handle(args: HistoryArgs, config: &Config, format: OutputFormat) -> Result<()> {
    let store = JsonHistoryStore::new(config.history_path()?);
    let mut entries = store.load_all()?;
    if let Some(limit) = args.limit {
        entries.truncate(limit);
    }
    print_history(&entries, format)
}
