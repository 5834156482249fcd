//! Access token provider seam
//!
//! The request pipeline only needs "a token, please" and "that token was
//! rejected". [`CachedTokenProvider`] answers both from a shared
//! [`TokenCache`].

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use spgate_common::auth::{TokenCache, TokenExchanger};
use spgate_common::Clock;
use spgate_domain::{Result, SpApiError};
use tracing::debug;

use crate::errors::InfraError;

/// Trait for providing access tokens
///
/// This trait allows dependency injection and testing with mock providers.
#[async_trait]
pub trait AccessTokenProvider: Send + Sync {
    /// A token that is valid for at least the refresh buffer.
    async fn access_token(&self) -> Result<String>;

    /// Drop `rejected` if it is still the current token.
    async fn invalidate(&self, rejected: &str);

    /// Mint a new token regardless of the cached one.
    async fn force_refresh(&self) -> Result<String>;
}

/// [`AccessTokenProvider`] backed by a single-flight [`TokenCache`].
pub struct CachedTokenProvider<E: TokenExchanger + 'static> {
    cache: Arc<TokenCache<E>>,
}

impl<E: TokenExchanger + 'static> CachedTokenProvider<E> {
    pub fn new(exchanger: E) -> Self {
        Self { cache: Arc::new(TokenCache::new(exchanger)) }
    }

    pub fn with_clock(exchanger: E, refresh_buffer: Duration, clock: Arc<dyn Clock>) -> Self {
        Self { cache: Arc::new(TokenCache::with_clock(exchanger, refresh_buffer, clock)) }
    }

    /// Number of token exchanges performed so far.
    pub fn exchange_count(&self) -> u64 {
        self.cache.exchange_count()
    }

    pub fn cache(&self) -> &Arc<TokenCache<E>> {
        &self.cache
    }
}

impl<E: TokenExchanger + 'static> Clone for CachedTokenProvider<E> {
    fn clone(&self) -> Self {
        Self { cache: Arc::clone(&self.cache) }
    }
}

#[async_trait]
impl<E: TokenExchanger + 'static> AccessTokenProvider for CachedTokenProvider<E> {
    async fn access_token(&self) -> Result<String> {
        let token = self
            .cache
            .get_valid_token()
            .await
            .map_err(|err| SpApiError::from(InfraError::from(err)))?;
        Ok(token.value().to_string())
    }

    async fn invalidate(&self, rejected: &str) {
        if self.cache.invalidate(rejected).await {
            debug!("Access token rejected by the API, cache cleared");
        } else {
            debug!("Rejected token was already replaced");
        }
    }

    async fn force_refresh(&self) -> Result<String> {
        let token =
            self.cache.refresh().await.map_err(|err| SpApiError::from(InfraError::from(err)))?;
        Ok(token.value().to_string())
    }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicU64, Ordering};

    use spgate_common::auth::{TokenError, TokenErrorKind, TokenGrant};
    use spgate_domain::AuthFailureKind;

    use super::*;

    struct Sequence {
        calls: AtomicU64,
        fail: bool,
    }

    #[async_trait]
    impl TokenExchanger for Sequence {
        async fn exchange(&self) -> std::result::Result<TokenGrant, TokenError> {
            let n = self.calls.fetch_add(1, Ordering::SeqCst) + 1;
            if self.fail {
                return Err(TokenError::new(TokenErrorKind::InvalidGrant, "revoked")
                    .with_status(400));
            }
            Ok(TokenGrant {
                access_token: format!("token-{n}"),
                token_type: "bearer".into(),
                expires_in: 3600,
                refresh_token: None,
            })
        }
    }

    fn provider(fail: bool) -> CachedTokenProvider<Sequence> {
        CachedTokenProvider::new(Sequence { calls: AtomicU64::new(0), fail })
    }

    #[tokio::test]
    async fn reuses_cached_token() {
        let provider = provider(false);

        assert_eq!(provider.access_token().await.unwrap(), "token-1");
        assert_eq!(provider.access_token().await.unwrap(), "token-1");
        assert_eq!(provider.exchange_count(), 1);
    }

    #[tokio::test]
    async fn invalidating_current_token_forces_new_exchange() {
        let provider = provider(false);
        let first = provider.access_token().await.unwrap();

        provider.invalidate(&first).await;
        // A stale rejection must not discard the fresh token.
        provider.invalidate(&first).await;

        assert_eq!(provider.access_token().await.unwrap(), "token-2");
        assert_eq!(provider.exchange_count(), 2);
    }

    #[tokio::test]
    async fn force_refresh_always_exchanges() {
        let provider = provider(false);
        provider.access_token().await.unwrap();

        assert_eq!(provider.force_refresh().await.unwrap(), "token-2");
        assert_eq!(provider.access_token().await.unwrap(), "token-2");
    }

    #[tokio::test]
    async fn exchange_failure_becomes_auth_error() {
        let err = provider(true).access_token().await.unwrap_err();

        assert!(matches!(err, SpApiError::Auth { kind: AuthFailureKind::InvalidGrant, .. }));
    }
}
