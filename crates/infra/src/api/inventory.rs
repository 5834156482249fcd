//! FBA inventory summaries

use futures::Stream;
use serde::Deserialize;
use spgate_core::{collect_all, item_stream};
use spgate_domain::{InventoryQuery, InventorySummary, Page, Result};
use tracing::instrument;

use super::client::{ApiRequest, SpApiClient};

pub const INVENTORY_SUMMARIES_PATH: &str = "/fba/inventory/v1/summaries";

#[derive(Debug, Deserialize)]
struct InventoryEnvelope {
    #[serde(default)]
    pagination: Option<Pagination>,
    #[serde(default)]
    payload: InventoryPayload,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct Pagination {
    #[serde(default)]
    next_token: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct InventoryPayload {
    #[serde(default)]
    inventory_summaries: Vec<InventorySummary>,
    #[serde(default)]
    next_token: Option<String>,
}

impl InventoryEnvelope {
    fn into_page(self) -> Page<InventorySummary> {
        let cursor = self
            .pagination
            .and_then(|pagination| pagination.next_token)
            .or(self.payload.next_token);
        Page::new(self.payload.inventory_summaries, cursor)
    }
}

fn summaries_request(query: &InventoryQuery, cursor: Option<String>) -> ApiRequest {
    let marketplace = query.marketplace_id.as_str();
    let mut request = ApiRequest::get(INVENTORY_SUMMARIES_PATH)
        .query("granularityType", "Marketplace")
        .query("granularityId", marketplace)
        .query("marketplaceIds", marketplace)
        .query("details", query.details.to_string());

    if !query.seller_skus.is_empty() {
        request = request.query("sellerSkus", query.seller_skus.join(","));
    }
    if let Some(cursor) = cursor {
        request = request.query("nextToken", cursor);
    }
    request
}

impl SpApiClient {
    /// Fetch one page of inventory summaries.
    pub async fn inventory_page(
        &self,
        query: &InventoryQuery,
        cursor: Option<String>,
    ) -> Result<Page<InventorySummary>> {
        let envelope: InventoryEnvelope = self.execute(&summaries_request(query, cursor)).await?;
        Ok(envelope.into_page())
    }

    /// Every inventory summary of the marketplace, across all pages.
    #[instrument(skip(self, query), fields(marketplace = %query.marketplace_id))]
    pub async fn inventory_summaries(&self, query: &InventoryQuery) -> Result<Vec<InventorySummary>> {
        collect_all(|cursor| self.inventory_page(query, cursor)).await
    }

    /// Inventory summaries, fetching the next page only when needed.
    pub fn inventory_stream<'a>(
        &'a self,
        query: &'a InventoryQuery,
    ) -> impl Stream<Item = Result<InventorySummary>> + 'a {
        item_stream(move |cursor| self.inventory_page(query, cursor))
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;
    use spgate_domain::MarketplaceId;

    use super::*;

    #[test]
    fn cursor_is_read_from_pagination_block() {
        let envelope: InventoryEnvelope = serde_json::from_value(json!({
            "pagination": {"nextToken": "n2"},
            "payload": {"inventorySummaries": [{"sellerSku": "SKU-1"}]}
        }))
        .unwrap();

        let page = envelope.into_page();
        assert_eq!(page.items.len(), 1);
        assert_eq!(page.next_cursor.as_deref(), Some("n2"));
    }

    #[test]
    fn cursor_falls_back_to_payload() {
        let envelope: InventoryEnvelope = serde_json::from_value(json!({
            "payload": {"inventorySummaries": [], "nextToken": "n3"}
        }))
        .unwrap();

        assert_eq!(envelope.into_page().next_cursor.as_deref(), Some("n3"));
    }

    #[test]
    fn request_carries_marketplace_granularity() {
        let query = InventoryQuery::new(MarketplaceId::new("A1PA6795UKMFR9").unwrap())
            .with_seller_skus(vec!["SKU-1".into(), "SKU-2".into()]);

        let request = summaries_request(&query, Some("next".into()));

        let pairs: Vec<(&str, &str)> =
            request.query.iter().map(|(k, v)| (k.as_str(), v.as_str())).collect();
        assert_eq!(
            pairs,
            vec![
                ("granularityType", "Marketplace"),
                ("granularityId", "A1PA6795UKMFR9"),
                ("marketplaceIds", "A1PA6795UKMFR9"),
                ("details", "true"),
                ("sellerSkus", "SKU-1,SKU-2"),
                ("nextToken", "next"),
            ]
        );
    }
}
