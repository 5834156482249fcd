//! Login-with-Amazon refresh-token grant

use std::fmt;

use async_trait::async_trait;
use reqwest::{Method, StatusCode};
use serde::Deserialize;
use spgate_common::auth::{TokenError, TokenErrorKind, TokenExchanger, TokenGrant};
use spgate_domain::{Credentials, SpApiError};
use tracing::{debug, instrument, warn};

use crate::http::HttpClient;

/// OAuth error body (RFC 6749 §5.2).
#[derive(Debug, Default, Deserialize)]
struct OAuthErrorBody {
    #[serde(default)]
    error: Option<String>,
    #[serde(default)]
    error_description: Option<String>,
}

/// Exchanges the long-lived refresh token for access tokens.
#[derive(Clone)]
pub struct LwaTokenExchanger {
    http: HttpClient,
    token_url: String,
    client_id: String,
    client_secret: String,
    refresh_token: String,
}

impl LwaTokenExchanger {
    pub fn new(http: HttpClient, token_url: impl Into<String>, credentials: &Credentials) -> Self {
        Self {
            http,
            token_url: token_url.into(),
            client_id: credentials.client_id.clone(),
            client_secret: credentials.client_secret.clone(),
            refresh_token: credentials.refresh_token.clone(),
        }
    }

    pub fn token_url(&self) -> &str {
        &self.token_url
    }
}

impl fmt::Debug for LwaTokenExchanger {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LwaTokenExchanger")
            .field("token_url", &self.token_url)
            .field("client_id", &self.client_id)
            .field("client_secret", &"<redacted>")
            .field("refresh_token", &"<redacted>")
            .finish()
    }
}

#[async_trait]
impl TokenExchanger for LwaTokenExchanger {
    #[instrument(skip(self), fields(token_url = %self.token_url))]
    async fn exchange(&self) -> Result<TokenGrant, TokenError> {
        let params = [
            ("grant_type", "refresh_token"),
            ("refresh_token", self.refresh_token.as_str()),
            ("client_id", self.client_id.as_str()),
            ("client_secret", self.client_secret.as_str()),
        ];

        let request = self.http.request(Method::POST, &self.token_url).form(&params);
        let response = self.http.send(request).await.map_err(|err| match err {
            SpApiError::Network(message) => TokenError::network(message),
            other => TokenError::network(other.to_string()),
        })?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            let error = classify_failure(status, &body);
            warn!(status = status.as_u16(), kind = ?error.kind, "Token exchange rejected");
            return Err(error);
        }

        let grant: TokenGrant = response.json().await.map_err(|err| {
            TokenError::new(TokenErrorKind::InvalidResponse, format!("unreadable token grant: {err}"))
                .with_status(status.as_u16())
        })?;

        if grant.access_token.is_empty() {
            return Err(TokenError::new(
                TokenErrorKind::InvalidResponse,
                "token grant has an empty access_token",
            )
            .with_status(status.as_u16()));
        }

        debug!(expires_in = grant.expires_in, "Token exchange succeeded");
        Ok(grant)
    }
}

/// Map a non-2xx token endpoint answer to a failure kind.
///
/// The OAuth error code wins when present; otherwise the status decides.
fn classify_failure(status: StatusCode, body: &str) -> TokenError {
    let parsed: OAuthErrorBody = serde_json::from_str(body).unwrap_or_default();
    let description = parsed.error_description.clone();

    let (kind, fallback) = match parsed.error.as_deref() {
        Some("invalid_client" | "unauthorized_client") => {
            (TokenErrorKind::InvalidClient, "client id or secret rejected")
        }
        Some("invalid_grant") => (TokenErrorKind::InvalidGrant, "refresh token expired or revoked"),
        _ => match status {
            StatusCode::BAD_REQUEST => {
                (TokenErrorKind::Rejected, "invalid client credentials or refresh token")
            }
            StatusCode::UNAUTHORIZED => {
                (TokenErrorKind::InvalidGrant, "expired or invalid refresh token")
            }
            _ => (TokenErrorKind::Rejected, "token endpoint returned an error"),
        },
    };

    let message = match (parsed.error, description) {
        (Some(code), Some(description)) => format!("{code}: {description}"),
        (Some(code), None) => code,
        (None, _) => fallback.to_string(),
    };

    TokenError::new(kind, message).with_status(status.as_u16())
}
