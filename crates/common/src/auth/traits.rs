//! Traits for token exchange
//!
//! Abstracts the network call that turns a refresh credential into an access
//! token so the cache can be exercised without a token endpoint.

use async_trait::async_trait;

use super::types::{TokenError, TokenGrant};

/// Performs one refresh-token grant.
///
/// Implementations own the refresh credential and client identity; the
/// cache never sees them.
#[async_trait]
pub trait TokenExchanger: Send + Sync {
    /// Exchange the refresh credential for a fresh access token.
    ///
    /// # Errors
    /// Returns [`TokenError`] when the endpoint rejects the credential, the
    /// response cannot be decoded, or the endpoint is unreachable
    /// ([`TokenErrorKind::Network`](super::TokenErrorKind::Network)).
    async fn exchange(&self) -> Result<TokenGrant, TokenError>;
}
