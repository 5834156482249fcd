//! Token cache with single-flight refresh
//!
//! Owns the current access token:
//! - Serves the cached token while it is outside the expiry buffer
//! - Refreshes through a [`TokenExchanger`] once the buffer is reached
//! - Collapses concurrent refreshes into one in-flight exchange whose outcome
//!   (token or failure) is delivered to every waiter
//! - Drops a token the remote system rejected, without discarding a newer one

use std::panic::AssertUnwindSafe;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;

use futures::future::{BoxFuture, FutureExt, Shared};
use tokio::sync::Mutex;
use tracing::{debug, info, warn};

use super::traits::TokenExchanger;
use super::types::{AccessToken, TokenError, TokenErrorKind};
use crate::time::{Clock, SystemClock};

/// Refresh this long before the token's reported expiry.
pub const DEFAULT_REFRESH_BUFFER: Duration = Duration::from_secs(300);

type Flight = Shared<BoxFuture<'static, Result<AccessToken, TokenError>>>;

#[derive(Default)]
struct CacheState {
    token: Option<AccessToken>,
    in_flight: Option<Flight>,
}

/// Expiry-buffered access token cache.
///
/// Cheap to share behind an [`Arc`]; all methods take `&self`.
pub struct TokenCache<E: TokenExchanger + 'static> {
    exchanger: Arc<E>,
    clock: Arc<dyn Clock>,
    refresh_buffer: Duration,
    state: Arc<Mutex<CacheState>>,
    exchanges: Arc<AtomicU64>,
}

impl<E: TokenExchanger + 'static> TokenCache<E> {
    /// Create a cache with the default 5 minute buffer and the system clock.
    #[must_use]
    pub fn new(exchanger: E) -> Self {
        Self::with_clock(exchanger, DEFAULT_REFRESH_BUFFER, Arc::new(SystemClock))
    }

    /// Create a cache with an explicit buffer and clock.
    ///
    /// # Arguments
    /// * `exchanger` - Performs the refresh-token grant
    /// * `refresh_buffer` - Treat tokens as expired this long before expiry
    /// * `clock` - Time source (use `MockClock` in tests)
    #[must_use]
    pub fn with_clock(exchanger: E, refresh_buffer: Duration, clock: Arc<dyn Clock>) -> Self {
        Self {
            exchanger: Arc::new(exchanger),
            clock,
            refresh_buffer,
            state: Arc::new(Mutex::new(CacheState::default())),
            exchanges: Arc::new(AtomicU64::new(0)),
        }
    }

    /// Return a usable token, refreshing if none is cached or it is stale.
    ///
    /// Callers arriving while a refresh is in transit join it instead of
    /// starting their own.
    ///
    /// # Errors
    /// Returns the [`TokenError`] of the refresh cycle this call joined.
    pub async fn get_valid_token(&self) -> Result<AccessToken, TokenError> {
        self.acquire(false).await
    }

    /// Force a refresh even if the cached token is still usable.
    ///
    /// Joins a refresh that is already in transit rather than starting a
    /// second one.
    ///
    /// # Errors
    /// Returns the [`TokenError`] of the refresh cycle this call joined.
    pub async fn refresh(&self) -> Result<AccessToken, TokenError> {
        self.acquire(true).await
    }

    /// Drop the cached token if it is still the one that was rejected.
    ///
    /// Returns `true` if the cache was cleared. A token minted after the
    /// rejected one is kept, so concurrent 401s on one stale token cause a
    /// single refresh.
    pub async fn invalidate(&self, rejected: &str) -> bool {
        let mut state = self.state.lock().await;
        match state.token.as_ref() {
            Some(current) if current.value() == rejected => {
                state.token = None;
                info!("Cached access token invalidated after rejection");
                true
            }
            Some(_) => {
                debug!("Rejected token already superseded; keeping cached token");
                false
            }
            None => false,
        }
    }

    /// Drop whatever token is cached.
    pub async fn clear(&self) {
        self.state.lock().await.token = None;
    }

    /// Cached token without triggering a refresh, if it is still usable.
    pub async fn cached_token(&self) -> Option<AccessToken> {
        let now = self.clock.now();
        let state = self.state.lock().await;
        state.token.as_ref().filter(|token| token.is_usable_at(now, self.refresh_buffer)).cloned()
    }

    /// Number of exchange calls performed since construction.
    #[must_use]
    pub fn exchange_count(&self) -> u64 {
        self.exchanges.load(Ordering::SeqCst)
    }

    /// Configured expiry buffer.
    #[must_use]
    pub fn refresh_buffer(&self) -> Duration {
        self.refresh_buffer
    }

    async fn acquire(&self, force: bool) -> Result<AccessToken, TokenError> {
        let flight = {
            let mut state = self.state.lock().await;

            if force {
                state.token = None;
            } else if let Some(token) = state.token.as_ref() {
                if token.is_usable_at(self.clock.now(), self.refresh_buffer) {
                    return Ok(token.clone());
                }
                debug!("Cached access token inside refresh buffer");
            }

            match state.in_flight.as_ref() {
                Some(flight) => {
                    debug!("Joining in-flight token refresh");
                    flight.clone()
                }
                None => {
                    let flight = self.start_flight();
                    state.in_flight = Some(flight.clone());
                    flight
                }
            }
        };

        flight.await
    }

    /// Build the shared refresh future.
    ///
    /// The future itself publishes its outcome into the cache. If every
    /// caller awaiting it is cancelled it stays parked in `in_flight`, and the
    /// next caller resumes it instead of starting another exchange.
    ///
    /// A panicking exchanger is turned into a `TokenError`, so the flight is
    /// always cleared and the next call can start a fresh exchange.
    fn start_flight(&self) -> Flight {
        let exchanger = Arc::clone(&self.exchanger);
        let clock = Arc::clone(&self.clock);
        let state = Arc::clone(&self.state);
        let exchanges = Arc::clone(&self.exchanges);

        async move {
            let issued_at = clock.now();
            exchanges.fetch_add(1, Ordering::SeqCst);
            debug!("Exchanging refresh token for access token");

            let outcome = match AssertUnwindSafe(exchanger.exchange()).catch_unwind().await {
                Ok(result) => result.and_then(|grant| {
                    AccessToken::new(
                        grant.access_token,
                        issued_at,
                        Duration::from_secs(grant.expires_in),
                    )
                }),
                Err(_) => Err(TokenError::new(
                    TokenErrorKind::InvalidResponse,
                    "token exchange panicked",
                )),
            };

            let mut guard = state.lock().await;
            guard.in_flight = None;
            match &outcome {
                Ok(token) => {
                    guard.token = Some(token.clone());
                    info!(
                        lifetime_secs = token.expires_at().saturating_duration_since(issued_at).as_secs(),
                        "Access token refreshed"
                    );
                }
                Err(err) => {
                    warn!(kind = ?err.kind, status = ?err.status, "Access token refresh failed");
                }
            }

            outcome
        }
        .boxed()
        .shared()
    }
}
