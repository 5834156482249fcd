//! Error types used throughout the client

use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::types::ProcessingStatus;

/// Why an access token could not be obtained.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AuthFailureKind {
    /// Client id or secret rejected by the token endpoint
    InvalidClient,
    /// Refresh token expired, revoked or malformed
    InvalidGrant,
    /// Token endpoint answered with some other failure
    Rejected,
    /// Token endpoint unreachable
    Network,
    /// Token endpoint answered 2xx with an unusable body
    InvalidResponse,
}

impl fmt::Display for AuthFailureKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::InvalidClient => "invalid_client",
            Self::InvalidGrant => "invalid_grant",
            Self::Rejected => "rejected",
            Self::Network => "network",
            Self::InvalidResponse => "invalid_response",
        };
        f.write_str(label)
    }
}

/// Coarse classification callers use to decide what to tell a user.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorCategory {
    /// Credentials are wrong or revoked
    Credentials,
    /// The platform throttled the call (429)
    RateLimited,
    /// Temporarily unavailable: 5xx, timeouts, refused connections
    Transient,
    /// The request itself was rejected (4xx)
    Client,
    /// A report job failed, was cancelled or never finished
    Report,
    /// A response or document could not be interpreted
    Data,
    /// The client was constructed with invalid settings
    Configuration,
}

/// Main error type for the platform client
#[derive(Error, Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", content = "detail")]
pub enum SpApiError {
    #[error("Authentication failed ({kind}): {message}")]
    Auth { kind: AuthFailureKind, message: String },

    #[error("API error {status}: {body}")]
    Api { status: u16, body: String },

    #[error("Report {report_id} ended with status {status}")]
    ReportFailed { report_id: String, status: ProcessingStatus },

    #[error("Report {report_id} not finished after {attempts} polls")]
    ReportTimeout { report_id: String, attempts: u32 },

    #[error("Parse error: {0}")]
    Parse(String),

    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    #[error("Network error: {0}")]
    Network(String),

    #[error("Configuration error: {0}")]
    Config(String),
}

impl SpApiError {
    /// Build an [`SpApiError::Auth`].
    pub fn auth(kind: AuthFailureKind, message: impl Into<String>) -> Self {
        Self::Auth { kind, message: message.into() }
    }

    /// Build an [`SpApiError::Api`].
    pub fn api(status: u16, body: impl Into<String>) -> Self {
        Self::Api { status, body: body.into() }
    }

    /// Get the category for this error
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::Auth { kind: AuthFailureKind::Network, .. } => ErrorCategory::Transient,
            Self::Auth { .. } => ErrorCategory::Credentials,
            Self::Api { status: 401 | 403, .. } => ErrorCategory::Credentials,
            Self::Api { status: 429, .. } => ErrorCategory::RateLimited,
            Self::Api { status: 500..=599, .. } => ErrorCategory::Transient,
            Self::Api { .. } => ErrorCategory::Client,
            Self::ReportFailed { .. } | Self::ReportTimeout { .. } => ErrorCategory::Report,
            Self::Parse(_) | Self::InvalidResponse(_) => ErrorCategory::Data,
            Self::Network(_) => ErrorCategory::Transient,
            Self::Config(_) => ErrorCategory::Configuration,
        }
    }

    /// HTTP status associated with the failure, if any.
    pub fn status_code(&self) -> Option<u16> {
        match self {
            Self::Api { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// Whether a caller could reasonably try again later.
    ///
    /// Advisory only; the client itself never retries beyond one
    /// re-authentication after a 401.
    pub fn is_retryable(&self) -> bool {
        matches!(
            self.category(),
            ErrorCategory::RateLimited | ErrorCategory::Transient
        ) || matches!(self, Self::ReportTimeout { .. })
    }
}

/// Result type alias for platform client operations
pub type Result<T> = std::result::Result<T, SpApiError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn categories_separate_credentials_from_outages() {
        assert_eq!(
            SpApiError::auth(AuthFailureKind::InvalidGrant, "revoked").category(),
            ErrorCategory::Credentials
        );
        assert_eq!(
            SpApiError::auth(AuthFailureKind::Network, "refused").category(),
            ErrorCategory::Transient
        );
        assert_eq!(SpApiError::api(401, "").category(), ErrorCategory::Credentials);
        assert_eq!(SpApiError::api(429, "").category(), ErrorCategory::RateLimited);
        assert_eq!(SpApiError::api(503, "").category(), ErrorCategory::Transient);
        assert_eq!(SpApiError::api(400, "").category(), ErrorCategory::Client);
        assert_eq!(
            SpApiError::ReportTimeout { report_id: "r1".into(), attempts: 60 }.category(),
            ErrorCategory::Report
        );
    }

    #[test]
    fn retryable_is_advisory_for_transient_failures() {
        assert!(SpApiError::api(429, "").is_retryable());
        assert!(SpApiError::Network("timed out".into()).is_retryable());
        assert!(SpApiError::ReportTimeout { report_id: "r1".into(), attempts: 3 }.is_retryable());
        assert!(!SpApiError::api(404, "").is_retryable());
        assert!(!SpApiError::ReportFailed {
            report_id: "r1".into(),
            status: ProcessingStatus::Failed
        }
        .is_retryable());
    }

    #[test]
    fn status_code_only_for_api_errors() {
        assert_eq!(SpApiError::api(403, "denied").status_code(), Some(403));
        assert_eq!(SpApiError::Parse("bad".into()).status_code(), None);
    }

    #[test]
    fn display_keeps_status_and_body() {
        let err = SpApiError::api(400, r#"{"errors":[]}"#);
        assert_eq!(err.to_string(), r#"API error 400: {"errors":[]}"#);
    }
}
