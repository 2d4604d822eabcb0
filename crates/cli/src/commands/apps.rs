// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use crate::output::{print_apps, OutputFormat};
use aas_core::APPS;
use anyhow::Result;

pub fn handle(format: OutputFormat) -> Result<()> {
    print_apps(APPS, format)
}
