//! FBA inventory summaries

use serde::{Deserialize, Serialize};

use super::marketplace::MarketplaceId;

/// Inventory position of one seller SKU.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InventorySummary {
    #[serde(default)]
    pub asin: String,
    #[serde(default)]
    pub fn_sku: String,
    #[serde(default)]
    pub seller_sku: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub condition: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub product_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub total_quantity: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub inventory_details: Option<InventoryDetails>,
}

/// Quantity breakdown, present when details were requested.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InventoryDetails {
    #[serde(default)]
    pub fulfillable_quantity: i64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub inbound_working_quantity: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub inbound_shipped_quantity: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub inbound_receiving_quantity: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reserved_quantity: Option<ReservedQuantity>,
    /// A bare number in older payloads, a breakdown object in newer ones
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub researching_quantity: Option<serde_json::Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub unfulfillable_quantity: Option<UnfulfillableQuantity>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReservedQuantity {
    #[serde(default)]
    pub total_reserved_quantity: i64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pending_customer_order_quantity: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pending_transshipment_quantity: Option<i64>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UnfulfillableQuantity {
    #[serde(default)]
    pub total_unfulfillable_quantity: i64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub customer_damaged_quantity: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub warehouse_damaged_quantity: Option<i64>,
}

/// Filter for an inventory summaries listing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InventoryQuery {
    pub marketplace_id: MarketplaceId,
    pub seller_skus: Vec<String>,
    pub details: bool,
}

impl InventoryQuery {
    /// All SKUs in one marketplace, with quantity details.
    pub fn new(marketplace_id: MarketplaceId) -> Self {
        Self { marketplace_id, seller_skus: Vec::new(), details: true }
    }

    #[must_use]
    pub fn with_seller_skus(mut self, skus: Vec<String>) -> Self {
        self.seller_skus = skus;
        self
    }
}
