//! Paginated listings walked across several pages.

#[allow(dead_code)]
mod support;

use futures::{pin_mut, StreamExt};
use serde_json::json;
use spgate_domain::{InventoryQuery, MarketplaceId, OrdersQuery, SpApiError};
use support::{client, mount_token_endpoint, MARKETPLACE};
use wiremock::matchers::{method, path, query_param, query_param_is_missing};
use wiremock::{Mock, MockServer, ResponseTemplate};

const SUMMARIES: &str = "/fba/inventory/v1/summaries";
const ORDERS: &str = "/orders/v0/orders";

fn inventory_query() -> InventoryQuery {
    InventoryQuery::new(MarketplaceId::new(MARKETPLACE).unwrap())
}

async fn mount_inventory_pages(server: &MockServer, second_page_calls: u64) {
    Mock::given(method("GET"))
        .and(path(SUMMARIES))
        .and(query_param("granularityType", "Marketplace"))
        .and(query_param("granularityId", MARKETPLACE))
        .and(query_param("details", "true"))
        .and(query_param_is_missing("nextToken"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "pagination": {"nextToken": "page-2"},
            "payload": {"inventorySummaries": [
                {"sellerSku": "SKU-1", "totalQuantity": 4},
                {"sellerSku": "SKU-2", "totalQuantity": 0}
            ]}
        })))
        .expect(1)
        .mount(server)
        .await;
    Mock::given(method("GET"))
        .and(path(SUMMARIES))
        .and(query_param("nextToken", "page-2"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "payload": {"inventorySummaries": [{"sellerSku": "SKU-3", "totalQuantity": 9}]}
        })))
        .expect(second_page_calls)
        .mount(server)
        .await;
}

#[tokio::test]
async fn inventory_summaries_span_pages() {
    let server = MockServer::start().await;
    mount_token_endpoint(&server, 1).await;
    mount_inventory_pages(&server, 1).await;

    let summaries = client(&server).inventory_summaries(&inventory_query()).await.unwrap();

    let skus: Vec<&str> = summaries.iter().map(|summary| summary.seller_sku.as_str()).collect();
    assert_eq!(skus, vec!["SKU-1", "SKU-2", "SKU-3"]);
}

#[tokio::test]
async fn inventory_stream_fetches_lazily() {
    let server = MockServer::start().await;
    mount_token_endpoint(&server, 1).await;
    mount_inventory_pages(&server, 0).await;

    let api = client(&server);
    let query = inventory_query();
    let stream = api.client().inventory_stream(&query);
    pin_mut!(stream);

    let first = stream.next().await.unwrap().unwrap();
    let second = stream.next().await.unwrap().unwrap();

    assert_eq!(first.seller_sku, "SKU-1");
    assert_eq!(second.seller_sku, "SKU-2");
}

#[tokio::test]
async fn orders_follow_next_token() {
    let server = MockServer::start().await;
    mount_token_endpoint(&server, 1).await;
    Mock::given(method("GET"))
        .and(path(ORDERS))
        .and(query_param("MarketplaceIds", MARKETPLACE))
        .and(query_param("CreatedAfter", "TEST_CASE_200"))
        .and(query_param_is_missing("NextToken"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "payload": {
                "Orders": [{"AmazonOrderId": "902-3159896-1390916", "OrderStatus": "Pending"}],
                "NextToken": "orders-2"
            }
        })))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path(ORDERS))
        .and(query_param("NextToken", "orders-2"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "payload": {"Orders": [{"AmazonOrderId": "902-0000000-0000001", "OrderStatus": "Shipped"}]}
        })))
        .expect(1)
        .mount(&server)
        .await;

    let query = OrdersQuery::created_after(
        vec![MarketplaceId::new(MARKETPLACE).unwrap()],
        "TEST_CASE_200",
    );
    let orders = client(&server).orders(&query).await.unwrap();

    assert_eq!(orders.len(), 2);
    assert_eq!(orders[0].amazon_order_id, "902-3159896-1390916");
    assert_eq!(orders[1].order_status, "Shipped");
}

#[tokio::test]
async fn failing_page_aborts_the_walk() {
    let server = MockServer::start().await;
    mount_token_endpoint(&server, 1).await;
    Mock::given(method("GET"))
        .and(path(SUMMARIES))
        .and(query_param_is_missing("nextToken"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "pagination": {"nextToken": "page-2"},
            "payload": {"inventorySummaries": [{"sellerSku": "SKU-1"}]}
        })))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path(SUMMARIES))
        .and(query_param("nextToken", "page-2"))
        .respond_with(ResponseTemplate::new(500).set_body_string("InternalFailure"))
        .expect(1)
        .mount(&server)
        .await;

    let err = client(&server).inventory_summaries(&inventory_query()).await.unwrap_err();

    assert_eq!(err, SpApiError::api(500, "InternalFailure"));
}
