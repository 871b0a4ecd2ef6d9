//! Integration tests for the Storefront-backed catalog service.
//!
//! These tests run [`StorefrontService`] against a mock Storefront GraphQL
//! endpoint and check variables sent, response decoding and error mapping.

use serde_json::{json, Value};
use storefront::models::{LineItemInput, ProductQuery, SortOption};
use storefront::services::{CatalogApi, StorefrontService, PRODUCT_NOT_FOUND};
use storefront::{ApiVersion, HostUrl, ShopDomain, StorefrontConfig, StorefrontError};
use wiremock::matchers::{body_partial_json, body_string_contains, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

const GRAPHQL_PATH: &str = "/api/2025-10/graphql.json";

fn service_for(server: &MockServer) -> StorefrontService {
    let config = StorefrontConfig::builder()
        .shop(ShopDomain::new("test-shop").unwrap())
        .api_version(ApiVersion::V2025_10)
        .api_host(HostUrl::new(server.uri()).unwrap())
        .build()
        .unwrap();
    StorefrontService::new(&config)
}

fn product_node(handle: &str) -> Value {
    json!({
        "id": format!("gid://shopify/Product/{handle}"),
        "handle": handle,
        "title": handle.to_uppercase(),
        "priceRange": { "minVariantPrice": { "amount": "10.0", "currencyCode": "USD" } },
        "images": { "edges": [] }
    })
}

fn products_body(handles: &[&str], has_next_page: bool) -> Value {
    let edges: Vec<Value> = handles
        .iter()
        .map(|h| json!({ "cursor": format!("cursor-{h}"), "node": product_node(h) }))
        .collect();
    json!({
        "data": {
            "products": {
                "edges": edges,
                "pageInfo": { "hasNextPage": has_next_page }
            }
        }
    })
}

fn cart_body(mutation: &str, total_quantity: u32) -> Value {
    json!({
        "data": {
            mutation: {
                "cart": {
                    "id": "gid://shopify/Cart/abc",
                    "checkoutUrl": "https://test-shop.myshopify.com/cart/c/abc",
                    "totalQuantity": total_quantity,
                    "lines": { "edges": [{ "node": {
                        "id": "gid://shopify/CartLine/1",
                        "quantity": total_quantity,
                        "merchandise": { "id": "gid://shopify/ProductVariant/1", "title": "M" }
                    }}]}
                },
                "userErrors": []
            }
        }
    })
}

// ============================================================================
// Product Tests
// ============================================================================

#[tokio::test]
async fn test_product_by_handle_decodes_product() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path(GRAPHQL_PATH))
        .and(body_partial_json(json!({ "variables": { "handle": "classic-tee" } })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "data": { "product": {
                "id": "gid://shopify/Product/1",
                "handle": "classic-tee",
                "title": "Classic Tee",
                "description": "Soft cotton.",
                "updatedAt": "2025-06-01T00:00:00Z",
                "options": [{ "id": "o1", "name": "Size", "optionValues": [{ "name": "M" }] }],
                "variants": { "edges": [{ "node": {
                    "id": "gid://shopify/ProductVariant/1",
                    "title": "M",
                    "availableForSale": true,
                    "selectedOptions": [{ "name": "Size", "value": "M" }],
                    "price": { "amount": "25.0", "currencyCode": "USD" }
                }}]},
                "images": { "edges": [{ "node": { "url": "https://cdn.shopify.com/tee.png", "altText": "Tee" } }] }
            }}
        })))
        .expect(1)
        .mount(&mock_server)
        .await;

    let product = service_for(&mock_server)
        .product_by_handle("classic-tee")
        .await
        .unwrap();

    assert_eq!(product.title, "Classic Tee");
    assert_eq!(product.variants[0].price.amount, "25.0");
    assert_eq!(product.primary_image().alt, "Tee");
    assert_eq!(product.path(), "/product?handle=classic-tee");
}

#[tokio::test]
async fn test_unknown_handle_is_api_error() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path(GRAPHQL_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "data": { "product": null }
        })))
        .mount(&mock_server)
        .await;

    let error = service_for(&mock_server)
        .product_by_handle("missing")
        .await
        .unwrap_err();

    assert_eq!(error, StorefrontError::api(PRODUCT_NOT_FOUND));
}

#[tokio::test]
async fn test_graphql_errors_become_api_error_message() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path(GRAPHQL_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "errors": [{ "message": "Throttled" }]
        })))
        .mount(&mock_server)
        .await;

    let error = service_for(&mock_server)
        .product_by_handle("classic-tee")
        .await
        .unwrap_err();

    assert_eq!(error.to_string(), "Throttled");
    assert!(!error.is_network());
}

#[tokio::test]
async fn test_server_error_is_api_error_without_retry() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path(GRAPHQL_PATH))
        .respond_with(ResponseTemplate::new(500).set_body_string("upstream failure"))
        .expect(1)
        .mount(&mock_server)
        .await;

    let error = service_for(&mock_server)
        .products(&ProductQuery::default(), None, 20)
        .await
        .unwrap_err();

    assert_eq!(error, StorefrontError::api("Request failed (500)"));
}

#[tokio::test]
async fn test_rejected_token_shows_plain_message() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path(GRAPHQL_PATH))
        .respond_with(
            ResponseTemplate::new(401)
                .insert_header("x-request-id", "req-401")
                .set_body_json(json!({ "errors": "Unauthorized" })),
        )
        .mount(&mock_server)
        .await;

    let error = service_for(&mock_server)
        .product_by_handle("classic-tee")
        .await
        .unwrap_err();

    assert_eq!(error.to_string(), "Unauthorized");
    assert!(!error.to_string().contains("req-401"));
}

#[tokio::test]
async fn test_unreachable_backend_is_network_error() {
    // Non-pooled server: a pooled one keeps listening after drop.
    let mock_server = MockServer::builder().start().await;
    let service = service_for(&mock_server);
    drop(mock_server);

    let error = service
        .product_by_handle("classic-tee")
        .await
        .unwrap_err();

    assert!(error.is_network());
    assert!(error.to_string().starts_with("Network error"));
}

#[tokio::test]
async fn test_blank_handle_is_rejected_locally() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&mock_server)
        .await;

    let error = service_for(&mock_server)
        .product_by_handle("  ")
        .await
        .unwrap_err();

    assert!(matches!(error, StorefrontError::Validation(_)));
}

// ============================================================================
// Catalog Pagination Tests
// ============================================================================

#[tokio::test]
async fn test_products_sends_query_sort_and_page_size() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path(GRAPHQL_PATH))
        .and(body_partial_json(json!({
            "variables": {
                "first": 2,
                "after": null,
                "query": "tee",
                "sortKey": "PRICE",
                "reverse": true
            }
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(products_body(&["a", "b"], true)))
        .expect(1)
        .mount(&mock_server)
        .await;

    let query = ProductQuery::search("tee").sorted_by(SortOption::PriceDescending);
    let page = service_for(&mock_server)
        .products(&query, None, 2)
        .await
        .unwrap();

    assert_eq!(page.products.len(), 2);
    assert_eq!(page.cursor.as_deref(), Some("cursor-b"));
    assert!(page.has_next_page);
}

#[tokio::test]
async fn test_blank_search_sends_null_query() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path(GRAPHQL_PATH))
        .and(body_partial_json(json!({ "variables": { "query": null } })))
        .respond_with(ResponseTemplate::new(200).set_body_json(products_body(&[], false)))
        .expect(1)
        .mount(&mock_server)
        .await;

    let page = service_for(&mock_server)
        .products(&ProductQuery::search(""), None, 20)
        .await
        .unwrap();

    assert!(page.products.is_empty());
    assert_eq!(page.cursor, None);
}

#[tokio::test]
async fn test_cursor_of_page_feeds_next_page() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path(GRAPHQL_PATH))
        .and(body_partial_json(json!({ "variables": { "after": null } })))
        .respond_with(ResponseTemplate::new(200).set_body_json(products_body(&["a", "b"], true)))
        .expect(1)
        .mount(&mock_server)
        .await;

    Mock::given(method("POST"))
        .and(path(GRAPHQL_PATH))
        .and(body_partial_json(json!({ "variables": { "after": "cursor-b" } })))
        .respond_with(ResponseTemplate::new(200).set_body_json(products_body(&["c", "d"], false)))
        .expect(1)
        .mount(&mock_server)
        .await;

    let service = service_for(&mock_server);
    let query = ProductQuery::default();

    let first = service.products(&query, None, 2).await.unwrap();
    let second = service
        .products(&query, first.cursor.as_deref(), 2)
        .await
        .unwrap();

    let handles: Vec<&str> = first
        .products
        .iter()
        .chain(&second.products)
        .map(|p| p.handle.as_str())
        .collect();
    assert_eq!(handles, vec!["a", "b", "c", "d"]);
    assert!(!second.has_next_page);
}

// ============================================================================
// Cart Tests
// ============================================================================

#[tokio::test]
async fn test_first_line_item_creates_cart() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path(GRAPHQL_PATH))
        .and(body_string_contains("cartCreate"))
        .and(body_partial_json(json!({
            "variables": { "lines": [{ "merchandiseId": "gid://shopify/ProductVariant/1", "quantity": 2 }] }
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(cart_body("cartCreate", 2)))
        .expect(1)
        .mount(&mock_server)
        .await;

    let line = LineItemInput::new("gid://shopify/ProductVariant/1", 2).unwrap();
    let cart = service_for(&mock_server)
        .add_line_item(None, &line)
        .await
        .unwrap();

    assert_eq!(cart.id, "gid://shopify/Cart/abc");
    assert_eq!(cart.total_quantity, 2);
    assert_eq!(cart.lines.len(), 1);
}

#[tokio::test]
async fn test_existing_cart_gets_lines_added() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path(GRAPHQL_PATH))
        .and(body_string_contains("cartLinesAdd"))
        .and(body_partial_json(json!({ "variables": { "cartId": "gid://shopify/Cart/abc" } })))
        .respond_with(ResponseTemplate::new(200).set_body_json(cart_body("cartLinesAdd", 3)))
        .expect(1)
        .mount(&mock_server)
        .await;

    let line = LineItemInput::new("gid://shopify/ProductVariant/1", 1).unwrap();
    let cart = service_for(&mock_server)
        .add_line_item(Some("gid://shopify/Cart/abc"), &line)
        .await
        .unwrap();

    assert_eq!(cart.total_quantity, 3);
}

#[tokio::test]
async fn test_cart_user_errors_become_api_error() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path(GRAPHQL_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "data": { "cartCreate": {
                "cart": null,
                "userErrors": [{
                    "field": ["input", "lines", "0", "merchandiseId"],
                    "message": "The merchandise with id gid://shopify/ProductVariant/9 does not exist.",
                    "code": "INVALID"
                }]
            }}
        })))
        .mount(&mock_server)
        .await;

    let line = LineItemInput::new("gid://shopify/ProductVariant/9", 1).unwrap();
    let error = service_for(&mock_server)
        .add_line_item(None, &line)
        .await
        .unwrap_err();

    assert!(matches!(error, StorefrontError::Api { .. }));
    assert!(error.to_string().contains("does not exist"));
}
