//! Time source abstraction
//!
//! Token expiry is judged against a monotonic [`Instant`], while request
//! timestamps need wall-clock UTC. Both come from a [`Clock`] so tests can
//! move time forward without sleeping.

use std::time::Instant;

use chrono::{DateTime, Utc};

/// Source of monotonic and wall-clock time.
pub trait Clock: Send + Sync {
    /// Monotonic timestamp used for expiry arithmetic.
    fn now(&self) -> Instant;

    /// Wall-clock time in UTC, used for request timestamp headers.
    fn utc_now(&self) -> DateTime<Utc>;
}

/// Real system clock implementation.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> Instant {
        Instant::now()
    }

    fn utc_now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}
