//! Deterministic clock for tests
//!
//! # Examples
//!
//! ```
//! use std::time::Duration;
//!
//! use spgate_common::testing::MockClock;
//! use spgate_common::time::Clock;
//!
//! let mock = MockClock::new();
//! let start = mock.now();
//! mock.advance(Duration::from_secs(5));
//! assert_eq!(mock.now().duration_since(start), Duration::from_secs(5));
//! ```

use std::sync::{Arc, Mutex};
use std::time::{Duration, Instant};

use chrono::{DateTime, Utc};

use crate::time::Clock;

/// Mock clock for deterministic testing
///
/// Starts at the real time of construction and only moves when told to.
/// Clones share the same elapsed time, so a clone handed to a component under
/// test can be advanced from the test body.
#[derive(Debug, Clone)]
pub struct MockClock {
    start: Instant,
    base_utc: DateTime<Utc>,
    elapsed: Arc<Mutex<Duration>>,
}

impl MockClock {
    /// Create a new mock clock anchored at the current real time.
    pub fn new() -> Self {
        Self::at(Utc::now())
    }

    /// Create a mock clock whose wall-clock reading starts at `base_utc`.
    pub fn at(base_utc: DateTime<Utc>) -> Self {
        Self { start: Instant::now(), base_utc, elapsed: Arc::new(Mutex::new(Duration::ZERO)) }
    }

    /// Simulate `duration` passing.
    pub fn advance(&self, duration: Duration) {
        *self.lock() += duration;
    }

    /// Total simulated time since construction.
    #[must_use]
    pub fn elapsed(&self) -> Duration {
        *self.lock()
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, Duration> {
        // A poisoned lock only happens after a panicking test thread; keep the value.
        self.elapsed.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

impl Default for MockClock {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock for MockClock {
    fn now(&self) -> Instant {
        self.start + self.elapsed()
    }

    fn utc_now(&self) -> DateTime<Utc> {
        let elapsed = chrono::Duration::from_std(self.elapsed()).unwrap_or(chrono::Duration::zero());
        self.base_utc + elapsed
    }
}
