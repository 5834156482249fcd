//! Conversions from external infrastructure errors into domain errors.

use reqwest::Error as HttpError;
use spgate_common::auth::{TokenError, TokenErrorKind};
use spgate_domain::{AuthFailureKind, SpApiError};

/// Error newtype that keeps conversions on the infrastructure side and can be
/// converted back into the domain error.
#[derive(Debug)]
pub struct InfraError(pub SpApiError);

impl From<InfraError> for SpApiError {
    fn from(value: InfraError) -> Self {
        value.0
    }
}

impl From<SpApiError> for InfraError {
    fn from(value: SpApiError) -> Self {
        InfraError(value)
    }
}

/// Extension trait to make the conversion logic explicit in tests and within
/// this module.
trait IntoSpApiError {
    fn into_sp_api(self) -> SpApiError;
}

/* -------------------------------------------------------------------------- */
/* reqwest::Error → SpApiError */
/* -------------------------------------------------------------------------- */

impl IntoSpApiError for HttpError {
    fn into_sp_api(self) -> SpApiError {
        if self.is_timeout() {
            return SpApiError::Network("HTTP request timed out".into());
        }

        if self.is_connect() {
            return SpApiError::Network("HTTP connection failure".into());
        }

        if self.is_decode() {
            return SpApiError::InvalidResponse(format!("failed to decode response body: {self}"));
        }

        if self.is_builder() {
            return SpApiError::Config(format!("invalid HTTP request: {self}"));
        }

        if let Some(status) = self.status() {
            return SpApiError::api(status.as_u16(), self.to_string());
        }

        SpApiError::Network(self.to_string())
    }
}

impl From<HttpError> for InfraError {
    fn from(value: HttpError) -> Self {
        InfraError(value.into_sp_api())
    }
}

/* -------------------------------------------------------------------------- */
/* TokenError → SpApiError */
/* -------------------------------------------------------------------------- */

impl IntoSpApiError for TokenError {
    fn into_sp_api(self) -> SpApiError {
        let kind = match self.kind {
            TokenErrorKind::InvalidClient => AuthFailureKind::InvalidClient,
            TokenErrorKind::InvalidGrant => AuthFailureKind::InvalidGrant,
            TokenErrorKind::Rejected => AuthFailureKind::Rejected,
            TokenErrorKind::Network => AuthFailureKind::Network,
            TokenErrorKind::InvalidResponse => AuthFailureKind::InvalidResponse,
        };

        let message = match self.status {
            Some(status) => format!("{} (HTTP {status})", self.message),
            None => self.message,
        };

        SpApiError::Auth { kind, message }
    }
}

impl From<TokenError> for InfraError {
    fn from(value: TokenError) -> Self {
        InfraError(value.into_sp_api())
    }
}

/* -------------------------------------------------------------------------- */
/* std::io::Error → SpApiError (document decompression) */
/* -------------------------------------------------------------------------- */

impl IntoSpApiError for std::io::Error {
    fn into_sp_api(self) -> SpApiError {
        SpApiError::Parse(format!("failed to decompress document: {self}"))
    }
}

impl From<std::io::Error> for InfraError {
    fn from(value: std::io::Error) -> Self {
        InfraError(value.into_sp_api())
    }
}

/* -------------------------------------------------------------------------- */
/* Tests */
/* -------------------------------------------------------------------------- */
