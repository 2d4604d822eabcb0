// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Centralized environment variable access.

use crate::config::ConfigError;
use std::path::PathBuf;
use std::time::Duration;

pub const POLL_INTERVAL_MS: &str = "AAS_POLL_INTERVAL_MS";
pub const MAX_POLL_MINUTES: &str = "AAS_MAX_POLL_MINUTES";
pub const SIMULATION: &str = "AAS_SIMULATION";
pub const API_BASE_URL: &str = "AAS_API_BASE_URL";
pub const SUCCESS_PROBABILITY: &str = "AAS_SUCCESS_PROBABILITY";
pub const HISTORY_PATH: &str = "AAS_HISTORY_PATH";
pub const FIXTURES_DIR: &str = "AAS_FIXTURES_DIR";

/// Non-empty value of an environment variable
pub fn var(name: &str) -> Option<String> {
    std::env::var(name).ok().filter(|s| !s.is_empty())
}

/// Resolve state directory: AAS_STATE_DIR > XDG_STATE_HOME/aas > ~/.local/state/aas
pub fn state_dir() -> Result<PathBuf, ConfigError> {
    if let Some(dir) = var("AAS_STATE_DIR") {
        return Ok(PathBuf::from(dir));
    }
    if let Some(xdg) = var("XDG_STATE_HOME") {
        return Ok(PathBuf::from(xdg).join("aas"));
    }
    let home = dirs::home_dir().ok_or(ConfigError::NoStateDir)?;
    Ok(home.join(".local/state/aas"))
}

/// Default config file: `$XDG_CONFIG_HOME/aas/config.toml` (or the platform equivalent)
pub fn config_path() -> Option<PathBuf> {
    if let Some(xdg) = var("XDG_CONFIG_HOME") {
        return Some(PathBuf::from(xdg).join("aas/config.toml"));
    }
    dirs::config_dir().map(|d| d.join("aas/config.toml"))
}

/// Timer check interval override
pub fn timer_check_ms() -> Option<Duration> {
    var("AAS_TIMER_CHECK_MS").and_then(|s| s.parse::<u64>().ok()).map(Duration::from_millis)
}
