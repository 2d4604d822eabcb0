// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Submit a job and follow it until it settles

use super::fixture_source;
use crate::exit_error::{ExitError, EXIT_CLIENT_ERROR, EXIT_INTERRUPTED, EXIT_JOB_FAILED};
use crate::output::{print_event, OutputFormat};
use aas_adapters::{HttpJobService, PublicResultsFeed, SimulationService};
use aas_core::{AppId, Payload, SystemClock};
use aas_engine::{ClientConfig, ClientDeps, Config, JobEvent, JobLifecycleClient};
use aas_storage::JsonHistoryStore;
use anyhow::{anyhow, Result};
use clap::Args;
use std::sync::Arc;
use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;

#[cfg(test)]
#[path = "submit_tests.rs"]
mod tests;

#[derive(Args)]
pub struct SubmitArgs {
    /// App to run (jwst, eso, alma)
    pub app: String,

    /// Job parameter (can be repeated: --param key=value)
    #[arg(short = 'p', long = "param", value_parser = parse_key_value)]
    pub params: Vec<(String, String)>,

    /// Submit to the remote service
    #[arg(long, conflicts_with = "simulate")]
    pub live: bool,

    /// Submit to the offline simulation
    #[arg(long)]
    pub simulate: bool,
}

impl SubmitArgs {
    /// Explicit mode override, if a flag was given.
    fn simulation_override(&self) -> Option<bool> {
        match (self.live, self.simulate) {
            (true, _) => Some(false),
            (_, true) => Some(true),
            _ => None,
        }
    }
}

/// Parse a key=value string for job parameters.
pub(crate) fn parse_key_value(s: &str) -> Result<(String, String), String> {
    let pos =
        s.find('=').ok_or_else(|| format!("invalid param format '{}': must be key=value", s))?;
    let key = s[..pos].trim();
    if key.is_empty() {
        return Err(format!("invalid param format '{}': key is empty", s));
    }
    Ok((key.to_string(), s[pos + 1..].to_string()))
}

/// Map the final event of a job to the command's result.
pub(crate) fn settlement(event: &JobEvent) -> Result<()> {
    match event {
        JobEvent::Succeeded { .. } => Ok(()),
        JobEvent::Failed { snapshot, .. } => {
            let detail = snapshot.error.as_deref().or(snapshot.summary.as_deref());
            let message = match detail {
                Some(detail) => format!("job {} failed: {}", snapshot.job_id, detail),
                None => format!("job {} failed", snapshot.job_id),
            };
            Err(ExitError::new(EXIT_JOB_FAILED, message).into())
        }
        other => {
            let message = other.error().map(|e| e.to_string()).unwrap_or_else(|| other.kind().to_string());
            Err(ExitError::new(EXIT_CLIENT_ERROR, message).into())
        }
    }
}

pub async fn handle(args: SubmitArgs, config: &Config, format: OutputFormat) -> Result<()> {
    let clock = SystemClock;
    let live = HttpJobService::new(config.api_base_url.as_str(), config.request_timeout(), clock)?;
    let simulation = SimulationService::new(fixture_source(config), clock.clone())
        .with_success_probability(config.success_probability);
    let feed = PublicResultsFeed::new();
    let (tx, mut rx) = mpsc::unbounded_channel();

    let deps = ClientDeps {
        live: Arc::new(live),
        simulation: Arc::new(simulation),
        consumer: Arc::new(tx),
        publisher: Arc::new(feed.clone()),
        history_store: Arc::new(JsonHistoryStore::new(config.history_path()?)),
    };
    let client = Arc::new(JobLifecycleClient::new(ClientConfig::from_config(config), deps, clock));
    if let Some(enabled) = args.simulation_override() {
        client.set_simulation_enabled(enabled);
    }

    let cancel = CancellationToken::new();
    let driver = tokio::spawn(Arc::clone(&client).run(cancel.clone()));

    let app = AppId::new(args.app);
    let payload: Payload = args.params.into_iter().collect();
    let follow = async {
        if let Err(e) = client.submit_job(&app, &payload).await {
            tracing::debug!(%app, error = %e, "submit returned an error");
        }
        while let Some(event) = rx.recv().await {
            print_event(&event, format)?;
            if event.is_settled() {
                return settlement(&event);
            }
        }
        Err(anyhow!("event stream closed before the job settled"))
    };

    let result = tokio::select! {
        result = follow => result,
        _ = tokio::signal::ctrl_c() => Err(ExitError::new(EXIT_INTERRUPTED, "interrupted").into()),
    };

    cancel.cancel();
    if let Err(e) = driver.await {
        tracing::warn!(error = %e, "client driver did not stop cleanly");
    }

    if result.is_ok() && format == OutputFormat::Text && !feed.is_empty() {
        println!("Result published to the public feed");
    }
    result
}
