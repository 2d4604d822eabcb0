// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Client configuration
//!
//! Resolved once at process start: defaults, then an optional TOML file,
//! then `AAS_*` environment overrides.

use crate::env;
use crate::poller::PollConfig;
use aas_adapters::DEFAULT_SUCCESS_PROBABILITY;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;
use thiserror::Error;

/// Placeholder for the live API; must be configured before live submissions.
pub const DEFAULT_API_BASE_URL: &str = "https://REPLACE_ME.api";

/// Errors from loading configuration
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("cannot read config {}: {source}", .path.display())]
    Io { path: PathBuf, source: std::io::Error },
    #[error("invalid config {}: {source}", .path.display())]
    Parse { path: PathBuf, source: toml::de::Error },
    #[error("invalid value for {name}: {value:?}")]
    Env { name: &'static str, value: String },
    #[error("invalid config: {0}")]
    Invalid(String),
    #[error("cannot determine state directory (set AAS_STATE_DIR or HOME)")]
    NoStateDir,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    pub poll_interval_ms: u64,
    pub max_poll_minutes: u64,
    pub simulation_enabled: bool,
    pub api_base_url: String,
    pub success_probability: f64,
    pub request_timeout_ms: u64,
    /// Defaults to `<state dir>/history.json`
    pub history_path: Option<PathBuf>,
    /// Fixture directory for simulation; built-in fixtures when unset
    pub fixtures_dir: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            poll_interval_ms: 2000,
            max_poll_minutes: 20,
            simulation_enabled: true,
            api_base_url: DEFAULT_API_BASE_URL.to_string(),
            success_probability: DEFAULT_SUCCESS_PROBABILITY,
            request_timeout_ms: 30_000,
            history_path: None,
            fixtures_dir: None,
        }
    }
}

impl Config {
    /// Load, apply environment overrides, and validate.
    ///
    /// An explicit `path` must exist; the default config file is optional.
    pub fn resolve(path: Option<&Path>) -> Result<Self, ConfigError> {
        let mut config = match path {
            Some(path) => Self::from_file(path)?,
            None => match env::config_path().filter(|p| p.exists()) {
                Some(path) => Self::from_file(&path)?,
                None => Self::default(),
            },
        };
        config.apply_env()?;
        config.validate()?;
        Ok(config)
    }

    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path)
            .map_err(|source| ConfigError::Io { path: path.to_path_buf(), source })?;
        toml::from_str(&text).map_err(|source| ConfigError::Parse { path: path.to_path_buf(), source })
    }

    /// Override fields from `AAS_*` variables.
    pub fn apply_env(&mut self) -> Result<(), ConfigError> {
        if let Some(v) = env::var(env::POLL_INTERVAL_MS) {
            self.poll_interval_ms = parse_env(env::POLL_INTERVAL_MS, v)?;
        }
        if let Some(v) = env::var(env::MAX_POLL_MINUTES) {
            self.max_poll_minutes = parse_env(env::MAX_POLL_MINUTES, v)?;
        }
        if let Some(v) = env::var(env::SIMULATION) {
            self.simulation_enabled = parse_flag(env::SIMULATION, v)?;
        }
        if let Some(v) = env::var(env::API_BASE_URL) {
            self.api_base_url = v;
        }
        if let Some(v) = env::var(env::SUCCESS_PROBABILITY) {
            self.success_probability = parse_env(env::SUCCESS_PROBABILITY, v)?;
        }
        if let Some(v) = env::var(env::HISTORY_PATH) {
            self.history_path = Some(PathBuf::from(v));
        }
        if let Some(v) = env::var(env::FIXTURES_DIR) {
            self.fixtures_dir = Some(PathBuf::from(v));
        }
        Ok(())
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.poll_interval_ms == 0 {
            return Err(ConfigError::Invalid("poll_interval_ms must be greater than 0".into()));
        }
        if !(0.0..=1.0).contains(&self.success_probability) {
            return Err(ConfigError::Invalid(format!(
                "success_probability must be within [0, 1], got {}",
                self.success_probability
            )));
        }
        Ok(())
    }

    pub fn poll_config(&self) -> PollConfig {
        PollConfig::new(
            Duration::from_millis(self.poll_interval_ms),
            Duration::from_secs(self.max_poll_minutes.saturating_mul(60)),
        )
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_millis(self.request_timeout_ms)
    }

    pub fn history_path(&self) -> Result<PathBuf, ConfigError> {
        match &self.history_path {
            Some(path) => Ok(path.clone()),
            None => Ok(env::state_dir()?.join("history.json")),
        }
    }
}

fn parse_env<T: std::str::FromStr>(name: &'static str, value: String) -> Result<T, ConfigError> {
    value.trim().parse().map_err(|_| ConfigError::Env { name, value })
}

fn parse_flag(name: &'static str, value: String) -> Result<bool, ConfigError> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" => Ok(false),
        _ => Err(ConfigError::Env { name, value }),
    }
}

#[cfg(test)]
#[path = "config_tests.rs"]
mod tests;
