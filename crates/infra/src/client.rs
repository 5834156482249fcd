//! Top-level client assembled from configuration

use std::sync::Arc;

use spgate_common::{Clock, SystemClock};
use spgate_core::{CredentialProvider, DelimitedTextParser, ReportOrchestrator, ReportsApi};
use spgate_domain::{
    CreateReportSpec, InventoryQuery, InventorySummary, MarketplaceId, MarketplaceParticipation,
    Order, OrdersQuery, Result, Row, SpApiConfig,
};
use tracing::{info, warn};

use crate::api::SpApiClient;
use crate::auth::{AccessTokenProvider, CachedTokenProvider, LwaTokenExchanger};
use crate::http::HttpClient;

/// One seller account's platform client.
///
/// Owns the token cache, the request pipeline and the report orchestrator.
/// Clones are cheap and share the token cache.
#[derive(Clone)]
pub struct SpApi {
    client: SpApiClient,
    tokens: CachedTokenProvider<LwaTokenExchanger>,
    reports: Arc<ReportOrchestrator>,
}

impl SpApi {
    /// Validate `config` and wire every component.
    ///
    /// # Errors
    /// `SpApiError::Config` for blank credentials, malformed override URLs or
    /// an HTTP client that cannot be built.
    pub fn from_config(config: &SpApiConfig) -> Result<Self> {
        Self::from_config_with_clock(config, Arc::new(SystemClock))
    }

    /// Like [`SpApi::from_config`], reading time from `clock`.
    pub fn from_config_with_clock(config: &SpApiConfig, clock: Arc<dyn Clock>) -> Result<Self> {
        let endpoints = config.resolve_endpoints()?;
        let http = HttpClient::builder()
            .timeout(config.http.timeout())
            .user_agent(config.http.user_agent.clone())
            .build()?;

        let exchanger = LwaTokenExchanger::new(http.clone(), endpoints.token_url(), &config.credentials);
        let tokens =
            CachedTokenProvider::with_clock(exchanger, config.token.refresh_buffer(), Arc::clone(&clock));
        let provider: Arc<dyn AccessTokenProvider> = Arc::new(tokens.clone());

        let client = SpApiClient::new(http, endpoints, provider).with_clock(clock);
        let api: Arc<dyn ReportsApi> = Arc::new(client.clone());
        let reports = Arc::new(ReportOrchestrator::new(api, config.polling));

        info!(
            region = %config.credentials.region,
            environment = %config.credentials.environment,
            api_base = client.endpoints().api_base(),
            "Platform client ready"
        );

        Ok(Self { client, tokens, reports })
    }

    /// Build a client for `account`, taking its credentials from `provider`
    /// and every other setting from `settings`.
    ///
    /// # Errors
    /// The provider's failure, or any [`SpApi::from_config`] error.
    pub async fn for_account(
        provider: &dyn CredentialProvider,
        account: &str,
        settings: &SpApiConfig,
    ) -> Result<Self> {
        let credentials = provider.credentials(account).await?;
        let config = SpApiConfig { credentials, ..settings.clone() };
        Self::from_config(&config)
    }

    /// Read documents with `parser` instead of the comma default.
    #[must_use]
    pub fn with_parser(mut self, parser: DelimitedTextParser) -> Self {
        let api: Arc<dyn ReportsApi> = Arc::new(self.client.clone());
        self.reports = Arc::new(ReportOrchestrator::new(api, self.reports.policy()).with_parser(parser));
        self
    }

    pub fn client(&self) -> &SpApiClient {
        &self.client
    }

    pub fn reports(&self) -> &ReportOrchestrator {
        &self.reports
    }

    /// Token exchanges performed so far.
    pub fn token_exchanges(&self) -> u64 {
        self.tokens.exchange_count()
    }

    /// Perform one token exchange; `false` when the credentials are refused.
    pub async fn validate_credentials(&self) -> bool {
        match self.tokens.force_refresh().await {
            Ok(_) => true,
            Err(err) => {
                warn!(error = %err, "Credential validation failed");
                false
            }
        }
    }

    pub async fn test_connection(&self) -> bool {
        self.client.test_connection().await
    }

    pub async fn marketplace_participations(&self) -> Result<Vec<MarketplaceParticipation>> {
        self.client.marketplace_participations().await
    }

    /// Create a report, wait for it with the configured polling budget and
    /// return its parsed rows.
    pub async fn run_full_cycle(
        &self,
        report_type: &str,
        marketplace_ids: &[MarketplaceId],
    ) -> Result<Vec<Row>> {
        self.reports.run_full_cycle(report_type, marketplace_ids).await
    }

    pub async fn run_report(&self, spec: &CreateReportSpec) -> Result<Vec<Row>> {
        self.reports.run_cycle(spec).await
    }

    pub async fn inventory_summaries(&self, query: &InventoryQuery) -> Result<Vec<InventorySummary>> {
        self.client.inventory_summaries(query).await
    }

    pub async fn orders(&self, query: &OrdersQuery) -> Result<Vec<Order>> {
        self.client.orders(query).await
    }
}
