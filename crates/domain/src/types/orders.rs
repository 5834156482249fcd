//! Orders listing

use serde::{Deserialize, Serialize};

use super::marketplace::MarketplaceId;

/// Monetary amount as the platform sends it (decimal string).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct Money {
    pub currency_code: String,
    pub amount: String,
}

/// One order header.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct Order {
    pub amazon_order_id: String,
    #[serde(default)]
    pub purchase_date: String,
    #[serde(default)]
    pub last_update_date: String,
    #[serde(default)]
    pub order_status: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fulfillment_channel: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sales_channel: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ship_service_level: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub order_total: Option<Money>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub number_of_items_shipped: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub number_of_items_unshipped: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub marketplace_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub order_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_business_order: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_prime: Option<bool>,
}

/// Filter for an orders listing.
///
/// Timestamps are passed through verbatim as ISO-8601 strings; the sandbox
/// also accepts magic values such as `TEST_CASE_200` in `created_after`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OrdersQuery {
    pub marketplace_ids: Vec<MarketplaceId>,
    pub created_after: Option<String>,
    pub created_before: Option<String>,
    pub last_updated_after: Option<String>,
    pub last_updated_before: Option<String>,
    pub order_statuses: Vec<String>,
    pub fulfillment_channels: Vec<String>,
    pub max_results_per_page: Option<u32>,
}

impl OrdersQuery {
    /// Orders created after `created_after` in the given marketplaces.
    pub fn created_after(
        marketplace_ids: Vec<MarketplaceId>,
        created_after: impl Into<String>,
    ) -> Self {
        Self { marketplace_ids, created_after: Some(created_after.into()), ..Self::default() }
    }

    /// Query parameters, excluding the cursor.
    pub fn to_query_pairs(&self) -> Vec<(String, String)> {
        let mut pairs = vec![("MarketplaceIds".to_string(), join(&self.marketplace_ids))];

        let optional = [
            ("CreatedAfter", &self.created_after),
            ("CreatedBefore", &self.created_before),
            ("LastUpdatedAfter", &self.last_updated_after),
            ("LastUpdatedBefore", &self.last_updated_before),
        ];
        for (name, value) in optional {
            if let Some(value) = value {
                pairs.push((name.to_string(), value.clone()));
            }
        }

        if !self.order_statuses.is_empty() {
            pairs.push(("OrderStatuses".to_string(), self.order_statuses.join(",")));
        }
        if !self.fulfillment_channels.is_empty() {
            pairs.push(("FulfillmentChannels".to_string(), self.fulfillment_channels.join(",")));
        }
        if let Some(max) = self.max_results_per_page {
            pairs.push(("MaxResultsPerPage".to_string(), max.to_string()));
        }

        pairs
    }
}

fn join(ids: &[MarketplaceId]) -> String {
    ids.iter().map(MarketplaceId::as_str).collect::<Vec<_>>().join(",")
}
