// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Named snapshot fixtures that drive the simulation.

use aas_core::{AppId, PartialSnapshot};
use parking_lot::Mutex;
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use thiserror::Error;

/// Errors from loading a fixture
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FixtureError {
    #[error("missing fixture {0}")]
    Missing(String),
    #[error("invalid fixture {name}: {message}")]
    Invalid { name: String, message: String },
    #[error("cannot read fixture {name}: {message}")]
    Io { name: String, message: String },
}

/// Which phase of a job a fixture describes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FixtureKind {
    Running,
    Success,
    Failed,
}

aas_core::simple_display! {
    FixtureKind {
        Running => "running",
        Success => "success",
        Failed => "failed",
    }
}

/// File name of an app's fixture: `<app>-<kind>.json`.
pub fn fixture_name(app: &AppId, kind: FixtureKind) -> String {
    format!("{}-{}.json", app, kind)
}

/// A source of named partial-snapshot documents.
pub trait FixtureSource: Send + Sync + 'static {
    fn load(&self, name: &str) -> Result<PartialSnapshot, FixtureError>;

    /// Load `name`, treating a missing document as `None`.
    fn load_optional(&self, name: &str) -> Result<Option<PartialSnapshot>, FixtureError> {
        match self.load(name) {
            Ok(snapshot) => Ok(Some(snapshot)),
            Err(FixtureError::Missing(_)) => Ok(None),
            Err(e) => Err(e),
        }
    }
}

fn parse(name: &str, text: &str) -> Result<PartialSnapshot, FixtureError> {
    serde_json::from_str(text)
        .map_err(|e| FixtureError::Invalid { name: name.to_string(), message: e.to_string() })
}

/// Fixtures read from `<root>/<name>` on every load.
#[derive(Debug, Clone)]
pub struct DirFixtures {
    root: PathBuf,
}

impl DirFixtures {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }
}

impl FixtureSource for DirFixtures {
    fn load(&self, name: &str) -> Result<PartialSnapshot, FixtureError> {
        let path = self.root.join(name);
        match std::fs::read_to_string(&path) {
            Ok(text) => parse(name, &text),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                Err(FixtureError::Missing(name.to_string()))
            }
            Err(e) => Err(FixtureError::Io { name: name.to_string(), message: e.to_string() }),
        }
    }
}

/// In-memory fixtures keyed by name.
#[derive(Clone, Default)]
pub struct MemoryFixtures {
    docs: Arc<Mutex<HashMap<String, String>>>,
}

impl MemoryFixtures {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add (or replace) a raw JSON document.
    pub fn with(self, name: impl Into<String>, json: impl Into<String>) -> Self {
        self.insert(name, json);
        self
    }

    pub fn insert(&self, name: impl Into<String>, json: impl Into<String>) {
        self.docs.lock().insert(name.into(), json.into());
    }

    pub fn remove(&self, name: &str) {
        self.docs.lock().remove(name);
    }
}

impl FixtureSource for MemoryFixtures {
    fn load(&self, name: &str) -> Result<PartialSnapshot, FixtureError> {
        let docs = self.docs.lock();
        let text = docs.get(name).ok_or_else(|| FixtureError::Missing(name.to_string()))?;
        parse(name, text)
    }
}

const BUILTIN: &[(&str, &str)] = &[
    ("jwst-running.json", include_str!("../../fixtures/jwst-running.json")),
    ("jwst-success.json", include_str!("../../fixtures/jwst-success.json")),
    ("jwst-failed.json", include_str!("../../fixtures/jwst-failed.json")),
    ("eso-running.json", include_str!("../../fixtures/eso-running.json")),
    ("eso-success.json", include_str!("../../fixtures/eso-success.json")),
    ("eso-failed.json", include_str!("../../fixtures/eso-failed.json")),
    ("alma-running.json", include_str!("../../fixtures/alma-running.json")),
    ("alma-success.json", include_str!("../../fixtures/alma-success.json")),
];

/// Fixtures compiled into the binary for the catalog apps.
#[derive(Debug, Clone, Copy, Default)]
pub struct BuiltinFixtures;

impl BuiltinFixtures {
    pub fn names() -> impl Iterator<Item = &'static str> {
        BUILTIN.iter().map(|(name, _)| *name)
    }
}

impl FixtureSource for BuiltinFixtures {
    fn load(&self, name: &str) -> Result<PartialSnapshot, FixtureError> {
        let (_, text) = BUILTIN
            .iter()
            .find(|(n, _)| *n == name)
            .ok_or_else(|| FixtureError::Missing(name.to_string()))?;
        parse(name, text)
    }
}

#[cfg(test)]
#[path = "fixtures_tests.rs"]
mod tests;
