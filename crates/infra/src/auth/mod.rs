//! Access token acquisition
//!
//! [`LwaTokenExchanger`] performs the refresh-token grant against the token
//! endpoint. [`CachedTokenProvider`] puts it behind the single-flight
//! [`TokenCache`](spgate_common::auth::TokenCache) and exposes it through the
//! [`AccessTokenProvider`] seam the request pipeline depends on.

pub mod lwa;
pub mod provider;

pub use lwa::LwaTokenExchanger;
pub use provider::{AccessTokenProvider, CachedTokenProvider};
