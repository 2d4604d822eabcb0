// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;

#[test]
fn system_clock_wall_time_is_recent() {
    // 2020-01-01
    assert!(SystemClock.epoch_ms() > 1_577_836_800_000);
    assert!(SystemClock.utc_now().timestamp_millis() > 1_577_836_800_000);
}

#[test]
fn fake_clock_starts_at_fixed_epoch() {
    let clock = FakeClock::new();
    assert_eq!(clock.epoch_ms(), FAKE_EPOCH_MS);
    assert_eq!(clock.utc_now().to_rfc3339(), "2023-11-14T22:13:20+00:00");
}

#[test]
fn advance_moves_both_clocks_for_every_clone() {
    let clock = FakeClock::new();
    let shared = clock.clone();
    let start = clock.now();

    shared.advance(Duration::from_millis(2500));

    assert_eq!(clock.now() - start, Duration::from_millis(2500));
    assert_eq!(clock.epoch_ms(), FAKE_EPOCH_MS + 2500);
}

#[test]
fn set_epoch_leaves_deadlines_alone() {
    let clock = FakeClock::new();
    let start = clock.now();

    clock.set_epoch_ms(1_700_000_123_456);

    assert_eq!(clock.now(), start);
    assert_eq!(clock.utc_now().timestamp_millis(), 1_700_000_123_456);
}
