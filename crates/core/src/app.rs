// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Pipeline apps that accept jobs.

crate::define_id! {
    /// Identifier of the pipeline a job belongs to (e.g. `jwst`).
    pub struct AppId;
}

/// Static description of a known pipeline app.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AppInfo {
    pub id: &'static str,
    pub label: &'static str,
    /// Path segment under `/jobs/` used for submission
    pub endpoint: &'static str,
}

pub const APPS: &[AppInfo] = &[
    AppInfo { id: "jwst", label: "JWST NIRCam", endpoint: "jwst-nircam" },
    AppInfo { id: "eso", label: "ESO VLT", endpoint: "eso-vlt-params" },
    AppInfo { id: "alma", label: "ALMA Moments", endpoint: "alma-moments" },
];

impl AppId {
    /// Catalog entry, if this is a known app.
    pub fn info(&self) -> Option<&'static AppInfo> {
        APPS.iter().find(|a| a.id == self.as_str())
    }

    /// Human-readable label; unknown apps show their id.
    pub fn label(&self) -> &str {
        self.info().map(|a| a.label).unwrap_or(self.as_str())
    }

    /// Submission endpoint; unknown apps submit to their own id.
    pub fn endpoint(&self) -> &str {
        self.info().map(|a| a.endpoint).unwrap_or(self.as_str())
    }
}

#[cfg(test)]
#[path = "app_tests.rs"]
mod tests;
