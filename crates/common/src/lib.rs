//! Modular common utilities shared across spgate crates.
//!
//! # Feature Tiers
//!
//! Enable cargo features to opt into the tiers you need:
//! - `runtime`: clock abstraction and request timestamp formatting
//! - `platform`: access token types, the exchanger contract and the
//!   single-flight token cache
//! - `test-utils`: deterministic clocks for downstream tests

#![forbid(unsafe_code)]
#![warn(rust_2018_idioms)]
#![warn(clippy::all, clippy::perf, clippy::complexity, clippy::suspicious)]

// Runtime tier
// --------------------------------------------------------------------
#[cfg(feature = "runtime")]
pub mod time;

// Platform tier
// -------------------------------------------------------------------
#[cfg(feature = "platform")]
pub mod auth;

// Testing utilities
// ---------------------------------------------------------------
#[cfg(any(feature = "test-utils", all(test, feature = "runtime")))]
pub mod testing;

// Re-export commonly used types and traits for convenience
// ------------------------
#[cfg(feature = "platform")]
pub use auth::{
    AccessToken, TokenCache, TokenError, TokenErrorKind, TokenExchanger, TokenGrant,
    DEFAULT_REFRESH_BUFFER,
};
#[cfg(any(feature = "test-utils", all(test, feature = "runtime")))]
pub use testing::MockClock;
#[cfg(feature = "runtime")]
pub use time::{format_amz_date, Clock, SystemClock};
