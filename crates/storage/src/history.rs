// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Recent-jobs history persistence.
//!
//! The JSON store writes the whole list on every save: serialize to a
//! `.tmp` sibling, then rename over the real file. A file that cannot be
//! parsed is moved aside to `.bak` and treated as empty.

use aas_core::RecentJobHistoryEntry;
use parking_lot::Mutex;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use thiserror::Error;

/// Current history file schema version
pub const CURRENT_HISTORY_VERSION: u32 = 1;

/// Errors from history persistence
#[derive(Debug, Error)]
pub enum HistoryError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Serialization error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("unsupported history version {0}")]
    Version(u32),
}

/// On-disk form of the history.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HistoryFile {
    #[serde(rename = "v")]
    pub version: u32,
    /// Most recent first
    pub entries: Vec<RecentJobHistoryEntry>,
}

/// Load and save the recent-jobs list as a whole.
pub trait HistoryStore: Send + Sync + 'static {
    /// Stored entries, most recent first. Empty when nothing was saved yet.
    fn load_all(&self) -> Result<Vec<RecentJobHistoryEntry>, HistoryError>;

    fn save_all(&self, entries: &[RecentJobHistoryEntry]) -> Result<(), HistoryError>;
}

/// History kept in a JSON file.
#[derive(Debug, Clone)]
pub struct JsonHistoryStore {
    path: PathBuf,
}

impl JsonHistoryStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn move_aside(&self) {
        let bak = self.path.with_extension("bak");
        if let Err(e) = std::fs::rename(&self.path, &bak) {
            tracing::warn!(path = %self.path.display(), error = %e, "failed to move corrupt history aside");
        }
    }
}

impl HistoryStore for JsonHistoryStore {
    fn load_all(&self) -> Result<Vec<RecentJobHistoryEntry>, HistoryError> {
        let bytes = match std::fs::read(&self.path) {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => return Err(e.into()),
        };

        let file: HistoryFile = match serde_json::from_slice(&bytes) {
            Ok(file) => file,
            Err(e) => {
                tracing::warn!(path = %self.path.display(), error = %e, "corrupt history file, starting empty");
                self.move_aside();
                return Ok(Vec::new());
            }
        };
        if file.version > CURRENT_HISTORY_VERSION {
            return Err(HistoryError::Version(file.version));
        }
        Ok(file.entries)
    }

    fn save_all(&self, entries: &[RecentJobHistoryEntry]) -> Result<(), HistoryError> {
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let file = HistoryFile { version: CURRENT_HISTORY_VERSION, entries: entries.to_vec() };
        let json = serde_json::to_vec_pretty(&file)?;
        let tmp_path = self.path.with_extension("json.tmp");
        std::fs::write(&tmp_path, json)?;
        std::fs::rename(&tmp_path, &self.path)?;
        tracing::debug!(path = %self.path.display(), entries = entries.len(), "saved history");
        Ok(())
    }
}

/// History kept in memory; clones share the same list.
#[derive(Debug, Clone, Default)]
pub struct MemoryHistoryStore {
    entries: Arc<Mutex<Vec<RecentJobHistoryEntry>>>,
}

impl MemoryHistoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_entries(entries: Vec<RecentJobHistoryEntry>) -> Self {
        Self { entries: Arc::new(Mutex::new(entries)) }
    }

    pub fn entries(&self) -> Vec<RecentJobHistoryEntry> {
        self.entries.lock().clone()
    }
}

impl HistoryStore for MemoryHistoryStore {
    fn load_all(&self) -> Result<Vec<RecentJobHistoryEntry>, HistoryError> {
        Ok(self.entries.lock().clone())
    }

    fn save_all(&self, entries: &[RecentJobHistoryEntry]) -> Result<(), HistoryError> {
        *self.entries.lock() = entries.to_vec();
        Ok(())
    }
}

#[cfg(test)]
#[path = "history_tests.rs"]
mod tests;
