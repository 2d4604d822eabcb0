// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;
use yare::parameterized;

#[parameterized(
    jwst = { "jwst", "JWST NIRCam", "jwst-nircam" },
    eso = { "eso", "ESO VLT", "eso-vlt-params" },
    alma = { "alma", "ALMA Moments", "alma-moments" },
    unknown = { "hubble", "hubble", "hubble" },
)]
fn catalog_lookup(id: &str, label: &str, endpoint: &str) {
    let app = AppId::new(id);
    assert_eq!(app.label(), label);
    assert_eq!(app.endpoint(), endpoint);
}

#[test]
fn unknown_app_has_no_info() {
    assert!(AppId::new("hubble").info().is_none());
    assert!(AppId::new("eso").info().is_some());
}
