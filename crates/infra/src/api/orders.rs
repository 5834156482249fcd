//! Order listing

use futures::Stream;
use serde::Deserialize;
use spgate_core::{collect_all, item_stream};
use spgate_domain::{Order, OrdersQuery, Page, Result};
use tracing::instrument;

use super::client::{ApiRequest, SpApiClient};

pub const ORDERS_PATH: &str = "/orders/v0/orders";

#[derive(Debug, Deserialize)]
struct OrdersEnvelope {
    #[serde(default)]
    payload: OrdersPayload,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "PascalCase")]
struct OrdersPayload {
    #[serde(default)]
    orders: Vec<Order>,
    #[serde(default)]
    next_token: Option<String>,
}

fn orders_request(query: &OrdersQuery, cursor: Option<String>) -> ApiRequest {
    let request = ApiRequest::get(ORDERS_PATH).query_pairs(query.to_query_pairs());
    match cursor {
        Some(cursor) => request.query("NextToken", cursor),
        None => request,
    }
}

impl SpApiClient {
    /// Fetch one page of orders.
    pub async fn orders_page(&self, query: &OrdersQuery, cursor: Option<String>) -> Result<Page<Order>> {
        let envelope: OrdersEnvelope = self.execute(&orders_request(query, cursor)).await?;
        Ok(Page::new(envelope.payload.orders, envelope.payload.next_token))
    }

    /// Every order matching `query`, across all pages.
    #[instrument(skip(self, query), fields(marketplaces = query.marketplace_ids.len()))]
    pub async fn orders(&self, query: &OrdersQuery) -> Result<Vec<Order>> {
        collect_all(|cursor| self.orders_page(query, cursor)).await
    }

    pub fn orders_stream<'a>(
        &'a self,
        query: &'a OrdersQuery,
    ) -> impl Stream<Item = Result<Order>> + 'a {
        item_stream(move |cursor| self.orders_page(query, cursor))
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;
    use spgate_domain::MarketplaceId;

    use super::*;

    #[test]
    fn envelope_reads_pascal_case_payload() {
        let envelope: OrdersEnvelope = serde_json::from_value(json!({
            "payload": {
                "Orders": [{"AmazonOrderId": "902-1", "OrderStatus": "Shipped"}],
                "NextToken": "t2"
            }
        }))
        .unwrap();

        assert_eq!(envelope.payload.orders[0].amazon_order_id, "902-1");
        assert_eq!(envelope.payload.next_token.as_deref(), Some("t2"));
    }

    #[test]
    fn cursor_is_appended_to_query() {
        let query = OrdersQuery::created_after(
            vec![MarketplaceId::new("ATVPDKIKX0DER").unwrap()],
            "TEST_CASE_200",
        );

        let first = orders_request(&query, None);
        let next = orders_request(&query, Some("t2".into()));

        assert!(!first.query.iter().any(|(name, _)| name == "NextToken"));
        assert_eq!(next.query.last(), Some(&("NextToken".to_string(), "t2".to_string())));
        assert!(next.query.contains(&("CreatedAfter".to_string(), "TEST_CASE_200".to_string())));
    }
}
