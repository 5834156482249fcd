//! Access token types and structures
//!
//! Defines the token-endpoint response, the cached access token and the
//! error produced when a refresh cannot complete.

use std::fmt;
use std::time::{Duration, Instant};

use serde::Deserialize;
use thiserror::Error;

/// Successful refresh-token grant response (RFC 6749 §5.1).
#[derive(Clone, Deserialize)]
pub struct TokenGrant {
    pub access_token: String,
    #[serde(default = "default_token_type")]
    pub token_type: String,
    /// Lifetime of the access token in seconds
    pub expires_in: u64,
    /// Some endpoints rotate the refresh token; it is surfaced but never cached
    #[serde(default)]
    pub refresh_token: Option<String>,
}

fn default_token_type() -> String {
    "bearer".to_string()
}

impl fmt::Debug for TokenGrant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TokenGrant")
            .field("access_token", &"<redacted>")
            .field("token_type", &self.token_type)
            .field("expires_in", &self.expires_in)
            .field("refresh_token", &self.refresh_token.as_ref().map(|_| "<redacted>"))
            .finish()
    }
}

/// A short-lived access token owned by the token cache.
///
/// Replaced wholesale on every refresh, never patched.
#[derive(Clone, PartialEq, Eq)]
pub struct AccessToken {
    value: String,
    expires_at: Instant,
}

impl AccessToken {
    /// Build a token that expires `lifetime` after `issued_at`.
    ///
    /// # Errors
    /// `TokenErrorKind::InvalidResponse` if the expiry is not representable,
    /// which only happens for an absurd `expires_in` from the token endpoint.
    pub fn new(
        value: impl Into<String>,
        issued_at: Instant,
        lifetime: Duration,
    ) -> Result<Self, TokenError> {
        let expires_at = issued_at.checked_add(lifetime).ok_or_else(|| {
            TokenError::new(
                TokenErrorKind::InvalidResponse,
                format!("token lifetime of {}s is out of range", lifetime.as_secs()),
            )
        })?;
        Ok(Self { value: value.into(), expires_at })
    }

    /// Raw token value for the request header.
    #[must_use]
    pub fn value(&self) -> &str {
        &self.value
    }

    /// Instant after which the remote system considers the token expired.
    #[must_use]
    pub fn expires_at(&self) -> Instant {
        self.expires_at
    }

    /// `true` while `now < expires_at - buffer`.
    #[must_use]
    pub fn is_usable_at(&self, now: Instant, buffer: Duration) -> bool {
        match self.expires_at.checked_sub(buffer) {
            Some(deadline) => now < deadline,
            None => false,
        }
    }

    /// Time left before the buffered deadline, zero once it has passed.
    #[must_use]
    pub fn remaining(&self, now: Instant, buffer: Duration) -> Duration {
        self.expires_at.checked_sub(buffer).map_or(Duration::ZERO, |deadline| {
            deadline.saturating_duration_since(now)
        })
    }
}

impl fmt::Debug for AccessToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AccessToken")
            .field("value", &"<redacted>")
            .field("expires_at", &self.expires_at)
            .finish()
    }
}

/// Why a refresh failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenErrorKind {
    /// Client id/secret not accepted (`invalid_client`)
    InvalidClient,
    /// Refresh token expired, revoked or malformed (`invalid_grant`)
    InvalidGrant,
    /// Any other non-success answer from the token endpoint
    Rejected,
    /// The token endpoint could not be reached
    Network,
    /// The endpoint answered 2xx with a body that is not a token grant
    InvalidResponse,
}

impl fmt::Display for TokenErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::InvalidClient => "invalid client credentials",
            Self::InvalidGrant => "invalid or revoked refresh token",
            Self::Rejected => "token exchange rejected",
            Self::Network => "token endpoint unreachable",
            Self::InvalidResponse => "unreadable token response",
        };
        f.write_str(label)
    }
}

/// Failure of a refresh cycle.
///
/// `Clone` so one single-flighted failure can be handed to every waiter.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("{kind}: {message}")]
pub struct TokenError {
    pub kind: TokenErrorKind,
    pub message: String,
    /// HTTP status of the token endpoint response, if one was received
    pub status: Option<u16>,
}

impl TokenError {
    pub fn new(kind: TokenErrorKind, message: impl Into<String>) -> Self {
        Self { kind, message: message.into(), status: None }
    }

    #[must_use]
    pub fn with_status(mut self, status: u16) -> Self {
        self.status = Some(status);
        self
    }

    pub fn network(message: impl Into<String>) -> Self {
        Self::new(TokenErrorKind::Network, message)
    }
}
