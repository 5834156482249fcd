//! Authenticated request pipeline

use std::sync::Arc;

use reqwest::header::{HeaderMap, CONTENT_TYPE};
use reqwest::Method;
use serde::de::DeserializeOwned;
use serde_json::Value;
use spgate_common::{format_amz_date, Clock, SystemClock};
use spgate_domain::{Endpoints, Result, SpApiError};
use tracing::{debug, instrument, warn};

use crate::auth::AccessTokenProvider;
use crate::errors::InfraError;
use crate::http::HttpClient;

pub const ACCESS_TOKEN_HEADER: &str = "x-amz-access-token";
pub const DATE_HEADER: &str = "x-amz-date";
pub const RATE_LIMIT_HEADER: &str = "x-amzn-RateLimit-Limit";

/// One platform call, relative to the API base URL.
#[derive(Debug, Clone, PartialEq)]
pub struct ApiRequest {
    pub method: Method,
    pub path: String,
    pub query: Vec<(String, String)>,
    pub body: Option<Value>,
}

impl ApiRequest {
    pub fn get(path: impl Into<String>) -> Self {
        Self { method: Method::GET, path: path.into(), query: Vec::new(), body: None }
    }

    pub fn post(path: impl Into<String>, body: Value) -> Self {
        Self { method: Method::POST, path: path.into(), query: Vec::new(), body: Some(body) }
    }

    #[must_use]
    pub fn query(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.query.push((name.into(), value.into()));
        self
    }

    #[must_use]
    pub fn query_pairs(mut self, pairs: impl IntoIterator<Item = (String, String)>) -> Self {
        self.query.extend(pairs);
        self
    }
}

/// Request quota advertised by the platform, in requests per second.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RateLimitInfo {
    pub limit: f64,
}

impl RateLimitInfo {
    pub fn from_headers(headers: &HeaderMap) -> Option<Self> {
        let raw = headers.get(RATE_LIMIT_HEADER)?.to_str().ok()?;
        let limit = raw.trim().parse::<f64>().ok()?;
        limit.is_finite().then_some(Self { limit })
    }
}

/// Status and body of a completed call; any status is representable.
#[derive(Debug, Clone, PartialEq)]
pub struct ApiResponse {
    pub status: u16,
    pub body: String,
    pub rate_limit: Option<RateLimitInfo>,
}

impl ApiResponse {
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }

    /// Non-2xx responses become [`SpApiError::Api`].
    pub fn error_for_status(self) -> Result<Self> {
        if self.is_success() {
            Ok(self)
        } else {
            Err(SpApiError::api(self.status, self.body))
        }
    }

    pub fn json<T: DeserializeOwned>(&self) -> Result<T> {
        serde_json::from_str(&self.body).map_err(|err| {
            SpApiError::InvalidResponse(format!("unexpected response body: {err}"))
        })
    }
}

/// Sends platform calls with a valid access token attached.
///
/// Each call makes at most two attempts. The second happens only after a 401,
/// once the rejected token has been invalidated; every other status, and a
/// 401 on the second attempt, is handed back as-is.
#[derive(Clone)]
pub struct SpApiClient {
    http: HttpClient,
    endpoints: Endpoints,
    tokens: Arc<dyn AccessTokenProvider>,
    clock: Arc<dyn Clock>,
}

impl SpApiClient {
    pub fn new(http: HttpClient, endpoints: Endpoints, tokens: Arc<dyn AccessTokenProvider>) -> Self {
        Self { http, endpoints, tokens, clock: Arc::new(SystemClock) }
    }

    /// Use `clock` for the request timestamp header.
    #[must_use]
    pub fn with_clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.clock = clock;
        self
    }

    pub fn endpoints(&self) -> &Endpoints {
        &self.endpoints
    }

    pub fn http(&self) -> &HttpClient {
        &self.http
    }

    pub fn tokens(&self) -> &Arc<dyn AccessTokenProvider> {
        &self.tokens
    }

    /// Send `request`, re-authenticating once on 401.
    ///
    /// # Errors
    /// Token acquisition failures and transport failures. HTTP statuses are
    /// never errors here; see [`SpApiClient::execute`].
    #[instrument(skip(self, request), fields(method = %request.method, path = %request.path))]
    pub async fn send(&self, request: &ApiRequest) -> Result<ApiResponse> {
        let token = self.tokens.access_token().await?;
        let response = self.dispatch(request, &token).await?;

        if response.status != 401 {
            return Ok(response);
        }

        warn!("Access token rejected, refreshing and retrying once");
        self.tokens.invalidate(&token).await;

        let token = self.tokens.access_token().await?;
        let response = self.dispatch(request, &token).await?;
        if response.status == 401 {
            warn!("Request still unauthorized after token refresh");
        }
        Ok(response)
    }

    /// Send `request` and decode a 2xx JSON body.
    ///
    /// # Errors
    /// Everything [`SpApiClient::send`] returns, plus `SpApiError::Api` for
    /// non-2xx statuses and `SpApiError::InvalidResponse` for bodies that do
    /// not decode into `T`.
    pub async fn execute<T: DeserializeOwned>(&self, request: &ApiRequest) -> Result<T> {
        self.send(request).await?.error_for_status()?.json()
    }

    async fn dispatch(&self, request: &ApiRequest, token: &str) -> Result<ApiResponse> {
        let url = format!("{}{}", self.endpoints.api_base(), request.path);

        let mut builder = self
            .http
            .request(request.method.clone(), &url)
            .header(ACCESS_TOKEN_HEADER, token)
            .header(DATE_HEADER, format_amz_date(self.clock.utc_now()))
            .header(CONTENT_TYPE, "application/json");
        if !request.query.is_empty() {
            builder = builder.query(&request.query);
        }
        if let Some(body) = &request.body {
            builder = builder.json(body);
        }

        let response = self.http.send(builder).await?;
        let status = response.status().as_u16();
        let rate_limit = RateLimitInfo::from_headers(response.headers());
        if let Some(info) = rate_limit {
            debug!(limit = info.limit, "Rate limit advertised");
        }

        let body = response.text().await.map_err(|err| SpApiError::from(InfraError::from(err)))?;
        debug!(status, bytes = body.len(), "API call completed");

        Ok(ApiResponse { status, body, rate_limit })
    }
}
