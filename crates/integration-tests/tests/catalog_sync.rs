//! Integration tests for collection and product listing fetches.

use serde_json::json;
use wiremock::matchers::{method, path};
use wiremock::{Mock, ResponseTemplate};

use shopsync_client::{Notice, SyncError};
use shopsync_integration_tests::{TestShop, products_body};

/// Connect the shop with an initial collection listing.
async fn connect(shop: &TestShop, collections: &[(i64, &str)]) {
    shop.mount_shop_ok().await;
    shop.mount_collections(collections).await;
    shop.orchestrator
        .verify_connection()
        .await
        .expect("connection should verify");
}

async fn mount_products(shop: &TestShop, body: serde_json::Value) {
    Mock::given(method("GET"))
        .and(path(TestShop::api_path("products.json")))
        .respond_with(ResponseTemplate::new(200).set_body_json(body))
        .mount(&shop.server)
        .await;
}

// ============================================================================
// Listing Replacement
// ============================================================================

#[tokio::test]
async fn test_refetch_replaces_collection_listing_wholesale() {
    let shop = TestShop::start().await;
    connect(&shop, &[(101, "Summer Sale"), (102, "Clearance")]).await;
    assert_eq!(shop.orchestrator.state().collections.len(), 2);

    // The shop changed out from under us
    shop.server.reset().await;
    shop.mount_collections(&[(103, "Winter Drop")]).await;

    shop.orchestrator
        .fetch_collections()
        .await
        .expect("refetch should succeed");

    let state = shop.orchestrator.state();
    let titles: Vec<_> = state.collections.iter().map(|c| c.title.as_str()).collect();
    assert_eq!(titles, ["Winter Drop"]);
}

#[tokio::test]
async fn test_fetch_products_publishes_listing() {
    let shop = TestShop::start().await;
    connect(&shop, &[(101, "Summer Sale")]).await;
    mount_products(
        &shop,
        products_body(&[(201, "Mug", &["10.00"]), (202, "Shirt", &["5.00", "15.00"])]),
    )
    .await;

    shop.orchestrator
        .fetch_products()
        .await
        .expect("product fetch should succeed");

    let state = shop.orchestrator.state();
    assert!(!state.loading_products);
    assert_eq!(state.products.len(), 2);
    assert_eq!(state.products[0].price_range().as_deref(), Some("$10.00"));
    assert_eq!(
        state.products[1].price_range().as_deref(),
        Some("$5.00 - $15.00")
    );
}

// ============================================================================
// Empty Listings
// ============================================================================

#[tokio::test]
async fn test_empty_collection_listing_is_a_notice_not_an_error() {
    let shop = TestShop::start().await;
    connect(&shop, &[]).await;

    let state = shop.orchestrator.state();
    assert!(state.is_connected);
    assert_eq!(state.last_error, None);
    assert_eq!(state.notice, Some(Notice::NoCollections));
}

#[tokio::test]
async fn test_empty_product_listing_is_a_notice_not_an_error() {
    let shop = TestShop::start().await;
    connect(&shop, &[(101, "Summer Sale")]).await;
    mount_products(&shop, products_body(&[])).await;

    shop.orchestrator
        .fetch_products()
        .await
        .expect("product fetch should succeed");

    let state = shop.orchestrator.state();
    assert_eq!(state.last_error, None);
    assert_eq!(state.notice, Some(Notice::NoProducts));
}

// ============================================================================
// Decode Failures
// ============================================================================

#[tokio::test]
async fn test_decode_failure_preserves_previous_listing() {
    let shop = TestShop::start().await;
    connect(&shop, &[(101, "Summer Sale")]).await;

    shop.server.reset().await;
    // Entries without an id cannot decode
    shop.mount_collections_body(json!({"custom_collections": [{"title": "broken"}]}))
        .await;

    let err = shop.orchestrator.fetch_collections().await.unwrap_err();
    assert!(matches!(err, SyncError::Parse(_)));

    let state = shop.orchestrator.state();
    // A parse failure is not a connectivity problem
    assert!(state.is_connected);
    assert!(!state.loading_collections);
    assert_eq!(state.collections.len(), 1);
    assert_eq!(state.collections[0].title, "Summer Sale");
}

// ============================================================================
// Severing Failures
// ============================================================================

#[tokio::test]
async fn test_auth_failure_mid_session_severs_the_connection() {
    let shop = TestShop::start().await;
    connect(&shop, &[(101, "Summer Sale")]).await;

    // The token was revoked after we connected
    shop.server.reset().await;
    shop.mount_collections_status(401).await;

    let err = shop.orchestrator.fetch_collections().await.unwrap_err();
    assert_eq!(err, SyncError::Auth);
    assert!(!shop.orchestrator.state().is_connected);

    // Once severed, further fetches short-circuit locally
    let err = shop.orchestrator.fetch_products().await.unwrap_err();
    assert_eq!(err, SyncError::NotConnected);
}

#[tokio::test]
async fn test_unexpected_status_does_not_sever_the_connection() {
    let shop = TestShop::start().await;
    connect(&shop, &[(101, "Summer Sale")]).await;

    shop.server.reset().await;
    shop.mount_collections_status(500).await;

    let err = shop.orchestrator.fetch_collections().await.unwrap_err();
    assert_eq!(err, SyncError::UnexpectedStatus(500));

    let state = shop.orchestrator.state();
    assert!(state.is_connected);
    assert_eq!(state.last_error, Some(SyncError::UnexpectedStatus(500)));
}
