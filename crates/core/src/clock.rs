// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Clock abstraction for testable duration telemetry

use std::time::{Duration, Instant, SystemTime, UNIX_EPOCH};

/// A clock that provides the current time.
///
/// The executor stamps each run with `now()` for duration measurement and
/// `epoch_ms()` for the telemetry event's start timestamp.
pub trait Clock: Clone + Send + Sync + 'static {
    fn now(&self) -> Instant;
    fn epoch_ms(&self) -> u64;

    /// Milliseconds elapsed since `since`, measured on this clock.
    fn elapsed_since(&self, since: Instant) -> Duration {
        self.now().saturating_duration_since(since)
    }
}

/// Real system clock
#[derive(Clone, Copy, Debug, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> Instant {
        Instant::now()
    }

    fn epoch_ms(&self) -> u64 {
        SystemTime::now().duration_since(UNIX_EPOCH).unwrap_or_default().as_millis() as u64
    }
}

#[cfg(any(test, feature = "test-support"))]
#[cfg_attr(coverage_nightly, coverage(off))]
mod fake {
    use super::Clock;
    use parking_lot::Mutex;
    use std::sync::Arc;
    use std::time::{Duration, Instant};

    struct FakeClockState {
        now: Instant,
        epoch_ms: u64,
    }

    /// Controllable clock for testing.
    ///
    /// `advance` moves the instant and the epoch in lockstep so measured
    /// durations and start stamps stay consistent with each other.
    #[derive(Clone)]
    pub struct FakeClock {
        inner: Arc<Mutex<FakeClockState>>,
    }

    impl FakeClock {
        pub fn new() -> Self {
            Self {
                inner: Arc::new(Mutex::new(FakeClockState {
                    now: Instant::now(),
                    epoch_ms: 1_000_000,
                })),
            }
        }

        /// Advance both the instant and the epoch by `duration`.
        pub fn advance(&self, duration: Duration) {
            let mut state = self.inner.lock();
            state.now += duration;
            state.epoch_ms += duration.as_millis() as u64;
        }

        pub fn set_epoch_ms(&self, ms: u64) {
            self.inner.lock().epoch_ms = ms;
        }
    }

    impl Default for FakeClock {
        fn default() -> Self {
            Self::new()
        }
    }

    impl Clock for FakeClock {
        fn now(&self) -> Instant {
            self.inner.lock().now
        }

        fn epoch_ms(&self) -> u64 {
            self.inner.lock().epoch_ms
        }
    }
}

#[cfg(any(test, feature = "test-support"))]
pub use fake::FakeClock;

#[cfg(test)]
#[path = "clock_tests.rs"]
mod tests;
