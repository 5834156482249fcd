//! Seller account endpoints

use serde::Deserialize;
use spgate_domain::{MarketplaceParticipation, Result};
use tracing::{info, instrument, warn};

use super::client::{ApiRequest, SpApiClient};

pub const MARKETPLACE_PARTICIPATIONS_PATH: &str = "/sellers/v1/marketplaceParticipations";

#[derive(Debug, Deserialize)]
struct ParticipationsEnvelope {
    #[serde(default)]
    payload: Vec<MarketplaceParticipation>,
}

impl SpApiClient {
    /// Marketplaces the authorized seller participates in.
    #[instrument(skip(self))]
    pub async fn marketplace_participations(&self) -> Result<Vec<MarketplaceParticipation>> {
        let request = ApiRequest::get(MARKETPLACE_PARTICIPATIONS_PATH);
        let envelope: ParticipationsEnvelope = self.execute(&request).await?;
        Ok(envelope.payload)
    }

    /// Whether one authenticated call succeeds end to end.
    pub async fn test_connection(&self) -> bool {
        match self.marketplace_participations().await {
            Ok(participations) => {
                info!(marketplaces = participations.len(), "Connection test succeeded");
                true
            }
            Err(err) => {
                warn!(error = %err, category = ?err.category(), "Connection test failed");
                false
            }
        }
    }
}
