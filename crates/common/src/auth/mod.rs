//! Access token acquisition and caching
//!
//! Short-lived access tokens are minted from a long-lived refresh credential
//! by a [`TokenExchanger`] and held by a [`TokenCache`] until they come
//! within the refresh buffer of expiring.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────┐
//! │   TokenCache    │  Owns the current AccessToken, single-flights refreshes
//! └────────┬────────┘
//!          │
//!          └──► TokenExchanger   (refresh-token grant against the token endpoint)
//! ```
//!
//! # Usage Example
//!
//! ```no_run
//! use std::sync::Arc;
//!
//! use spgate_common::auth::{TokenCache, TokenExchanger};
//!
//! async fn example<E: TokenExchanger + 'static>(exchanger: E) {
//!     let cache = Arc::new(TokenCache::new(exchanger));
//!
//!     // Concurrent callers share one exchange while no valid token is cached
//!     let token = cache.get_valid_token().await.expect("token");
//!
//!     // After the server rejects it, drop exactly that token
//!     cache.invalidate(token.value()).await;
//! }
//! ```
//!
//! # Module Organization
//!
//! - **[`types`]**: `AccessToken`, `TokenGrant`, `TokenError`
//! - **[`traits`]**: the `TokenExchanger` contract
//! - **[`token_cache`]**: expiry-buffered cache with single-flight refresh

pub mod token_cache;
pub mod traits;
pub mod types;

// Re-export commonly used types
pub use token_cache::{TokenCache, DEFAULT_REFRESH_BUFFER};
pub use traits::TokenExchanger;
pub use types::{AccessToken, TokenError, TokenErrorKind, TokenGrant};
