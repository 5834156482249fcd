//! Credentials and endpoint resolution
//!
//! Region × environment is a closed pair. Every combination resolves through
//! a fixed table, so an unknown region or environment is rejected when the
//! value is parsed, never when a request is sent.

use std::fmt;

use serde::{Deserialize, Serialize};
use tracing::warn;
use url::Url;

use crate::errors::{Result, SpApiError};
use crate::impl_domain_status_conversions;

/// Login-with-Amazon token endpoint shared by all regions.
pub const LWA_TOKEN_URL: &str = "https://api.amazon.com/auth/o2/token";

const CLIENT_ID_PREFIX: &str = "amzn1.application-oa2-client.";

/// Selling-partner API region.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Region {
    #[serde(rename = "na")]
    NorthAmerica,
    #[serde(rename = "eu")]
    Europe,
    #[serde(rename = "fe")]
    FarEast,
}

impl_domain_status_conversions!(Region {
    NorthAmerica => "na",
    Europe => "eu",
    FarEast => "fe",
});

/// Sandbox or live endpoints.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Environment {
    Sandbox,
    #[default]
    Production,
}

impl_domain_status_conversions!(Environment {
    Sandbox => "sandbox",
    Production => "production",
});

impl Region {
    /// Base URL of the API host for this region in `environment`.
    pub fn base_url(self, environment: Environment) -> &'static str {
        match (self, environment) {
            (Self::NorthAmerica, Environment::Production) => {
                "https://sellingpartnerapi-na.amazon.com"
            }
            (Self::Europe, Environment::Production) => "https://sellingpartnerapi-eu.amazon.com",
            (Self::FarEast, Environment::Production) => "https://sellingpartnerapi-fe.amazon.com",
            (Self::NorthAmerica, Environment::Sandbox) => {
                "https://sandbox.sellingpartnerapi-na.amazon.com"
            }
            (Self::Europe, Environment::Sandbox) => {
                "https://sandbox.sellingpartnerapi-eu.amazon.com"
            }
            (Self::FarEast, Environment::Sandbox) => {
                "https://sandbox.sellingpartnerapi-fe.amazon.com"
            }
        }
    }
}

/// Resolved hosts for one client instance.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Endpoints {
    api_base: String,
    token_url: String,
}

impl Endpoints {
    /// Look up the fixed hosts for a region and environment.
    pub fn for_target(region: Region, environment: Environment) -> Self {
        Self {
            api_base: region.base_url(environment).to_string(),
            token_url: LWA_TOKEN_URL.to_string(),
        }
    }

    /// Replace the API host, e.g. with a proxy or a local mock server.
    ///
    /// # Errors
    /// Returns `SpApiError::Config` if `base` is not an absolute http(s) URL.
    pub fn with_api_base(mut self, base: &str) -> Result<Self> {
        self.api_base = normalize_url(base, "API endpoint")?;
        Ok(self)
    }

    /// Replace the token endpoint.
    ///
    /// # Errors
    /// Returns `SpApiError::Config` if `url` is not an absolute http(s) URL.
    pub fn with_token_url(mut self, url: &str) -> Result<Self> {
        self.token_url = normalize_url(url, "token endpoint")?;
        Ok(self)
    }

    /// API base URL without a trailing slash.
    pub fn api_base(&self) -> &str {
        &self.api_base
    }

    /// Token endpoint URL.
    pub fn token_url(&self) -> &str {
        &self.token_url
    }
}

fn normalize_url(raw: &str, what: &str) -> Result<String> {
    let parsed = Url::parse(raw.trim())
        .map_err(|e| SpApiError::Config(format!("Invalid {what} URL '{raw}': {e}")))?;

    if !matches!(parsed.scheme(), "http" | "https") {
        return Err(SpApiError::Config(format!("{what} URL must be http(s): {raw}")));
    }

    Ok(parsed.as_str().trim_end_matches('/').to_string())
}

/// Application credentials for one selling-partner authorization.
///
/// Immutable once constructed. The secrets never appear in `Debug` output.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Credentials {
    pub client_id: String,
    pub client_secret: String,
    pub refresh_token: String,
    pub region: Region,
    #[serde(default)]
    pub environment: Environment,
}

impl Credentials {
    /// Build and validate credentials.
    ///
    /// # Errors
    /// Returns `SpApiError::Config` if any secret is blank.
    pub fn new(
        client_id: impl Into<String>,
        client_secret: impl Into<String>,
        refresh_token: impl Into<String>,
        region: Region,
        environment: Environment,
    ) -> Result<Self> {
        let credentials = Self {
            client_id: client_id.into(),
            client_secret: client_secret.into(),
            refresh_token: refresh_token.into(),
            region,
            environment,
        };
        credentials.validate()?;
        Ok(credentials)
    }

    /// Check that every secret is present.
    ///
    /// A client id without the usual application prefix is accepted with a
    /// warning; the token endpoint is the authority on its validity.
    ///
    /// # Errors
    /// Returns `SpApiError::Config` naming the first blank field.
    pub fn validate(&self) -> Result<()> {
        for (field, value) in [
            ("client_id", &self.client_id),
            ("client_secret", &self.client_secret),
            ("refresh_token", &self.refresh_token),
        ] {
            if value.trim().is_empty() {
                return Err(SpApiError::Config(format!("{field} must not be empty")));
            }
        }

        if !self.client_id.starts_with(CLIENT_ID_PREFIX) {
            warn!(
                expected_prefix = CLIENT_ID_PREFIX,
                "Client id does not look like an LWA application id"
            );
        }

        Ok(())
    }

    /// Endpoints from the fixed region × environment table.
    pub fn endpoints(&self) -> Endpoints {
        Endpoints::for_target(self.region, self.environment)
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("client_id", &self.client_id)
            .field("client_secret", &"<redacted>")
            .field("refresh_token", &"<redacted>")
            .field("region", &self.region)
            .field("environment", &self.environment)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Credentials {
        Credentials::new(
            "amzn1.application-oa2-client.abc",
            "secret-value",
            "Atzr|refresh-value",
            Region::Europe,
            Environment::Production,
        )
        .unwrap()
    }

    #[test]
    fn endpoint_table_covers_every_target() {
        assert_eq!(
            Region::NorthAmerica.base_url(Environment::Production),
            "https://sellingpartnerapi-na.amazon.com"
        );
        assert_eq!(
            Region::FarEast.base_url(Environment::Sandbox),
            "https://sandbox.sellingpartnerapi-fe.amazon.com"
        );

        let endpoints = sample().endpoints();
        assert_eq!(endpoints.api_base(), "https://sellingpartnerapi-eu.amazon.com");
        assert_eq!(endpoints.token_url(), LWA_TOKEN_URL);
    }

    #[test]
    fn unknown_region_or_environment_is_rejected() {
        assert_eq!("EU".parse::<Region>().unwrap(), Region::Europe);
        assert!("us".parse::<Region>().is_err());
        assert_eq!("sandbox".parse::<Environment>().unwrap(), Environment::Sandbox);
        assert!("staging".parse::<Environment>().is_err());
    }

    #[test]
    fn blank_secret_is_a_config_error() {
        let err = Credentials::new("id", "  ", "token", Region::NorthAmerica, Environment::Sandbox)
            .unwrap_err();
        assert!(matches!(err, SpApiError::Config(msg) if msg.contains("client_secret")));
    }

    #[test]
    fn debug_redacts_secrets() {
        let rendered = format!("{:?}", sample());
        assert!(rendered.contains("amzn1.application-oa2-client.abc"));
        assert!(!rendered.contains("secret-value"));
        assert!(!rendered.contains("refresh-value"));
    }

    #[test]
    fn overrides_are_validated_and_normalized() {
        let endpoints = sample()
            .endpoints()
            .with_api_base("http://127.0.0.1:8080/")
            .unwrap()
            .with_token_url("http://127.0.0.1:8080/auth/o2/token")
            .unwrap();
        assert_eq!(endpoints.api_base(), "http://127.0.0.1:8080");
        assert_eq!(endpoints.token_url(), "http://127.0.0.1:8080/auth/o2/token");

        assert!(sample().endpoints().with_api_base("not a url").is_err());
        assert!(sample().endpoints().with_api_base("ftp://host").is_err());
    }

    #[test]
    fn deserializes_with_default_environment() {
        let creds: Credentials = serde_json::from_str(
            r#"{"client_id":"a","client_secret":"b","refresh_token":"c","region":"fe"}"#,
        )
        .unwrap();
        assert_eq!(creds.region, Region::FarEast);
        assert_eq!(creds.environment, Environment::Production);
    }
}
