// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

//! aas - Astro Automation Studio job client

mod color;
mod commands;
mod exit_error;
mod output;

use aas_engine::Config;
use anyhow::Result;
use clap::{Parser, Subcommand};
use commands::{apps, history, results, submit};
use exit_error::ExitError;
use output::OutputFormat;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

/// Environment variable holding the log filter directive.
const LOG_ENV: &str = "AAS_LOG";

#[derive(Parser)]
#[command(
    name = "aas",
    version,
    about = "Submit and follow Astro Automation Studio pipeline jobs",
    styles = color::styles()
)]
struct Cli {
    /// Config file (default: $XDG_CONFIG_HOME/aas/config.toml)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Output format
    #[arg(short = 'o', long = "output", value_enum, default_value_t, global = true)]
    output: OutputFormat,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Submit a job and follow it until it finishes
    Submit(submit::SubmitArgs),
    /// Show recently finished jobs
    History(history::HistoryArgs),
    /// List the pipeline apps
    Apps,
    /// Show the public results feed
    Results,
}

fn init_logging() {
    let filter = EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new("warn"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}

async fn run(cli: Cli) -> Result<()> {
    let format = cli.output;
    if let Commands::Apps = cli.command {
        return apps::handle(format);
    }

    let config = Config::resolve(cli.config.as_deref())?;
    match cli.command {
        Commands::Submit(args) => submit::handle(args, &config, format).await,
        Commands::History(args) => history::handle(args, &config, format),
        Commands::Results => results::handle(&config, format),
        Commands::Apps => apps::handle(format),
    }
}

#[tokio::main]
async fn main() {
    init_logging();
    let cli = Cli::parse();

    if let Err(e) = run(cli).await {
        if let Some(exit) = e.downcast_ref::<ExitError>() {
            if !exit.message.is_empty() {
                eprintln!("Error: {}", exit.message);
            }
            std::process::exit(exit.code);
        }
        eprintln!("Error: {:#}", e);
        std::process::exit(exit_error::EXIT_CLIENT_ERROR);
    }
}
