//! Integration tests for connection verification.
//!
//! Each test stands up a `wiremock` Admin API and drives the real
//! orchestrator against it.

use wiremock::matchers::{method, path};
use wiremock::{Mock, ResponseTemplate};

use shopsync_client::{CredentialStore, Credentials, SyncError, SyncOrchestrator};
use shopsync_integration_tests::TestShop;

// ============================================================================
// Happy Path
// ============================================================================

#[tokio::test]
async fn test_verify_connection_marks_connected_and_fetches_collections() {
    let shop = TestShop::start().await;
    shop.mount_shop_ok().await;
    shop.mount_collections(&[(101, "Summer Sale"), (102, "Clearance")])
        .await;

    shop.orchestrator
        .verify_connection()
        .await
        .expect("verification should succeed");

    let state = shop.orchestrator.state();
    assert!(state.is_connected);
    assert!(!state.verifying);
    assert!(!state.loading_collections);
    assert_eq!(state.last_error, None);
    assert_eq!(state.notice, None);

    let titles: Vec<_> = state.collections.iter().map(|c| c.title.as_str()).collect();
    assert_eq!(titles, ["Summer Sale", "Clearance"]);
}

#[tokio::test]
async fn test_verify_connection_publishes_loading_transitions() {
    let shop = TestShop::start().await;
    shop.mount_shop_ok().await;
    shop.mount_collections(&[(101, "Summer Sale")]).await;

    let mut rx = shop.orchestrator.subscribe();
    let orchestrator = shop.orchestrator.clone();
    let task = tokio::spawn(async move { orchestrator.verify_connection().await });

    // The probe publishes its in-flight flag before touching the network,
    // and the collections fetch does the same once connected
    rx.wait_for(|s| s.verifying)
        .await
        .expect("verifying flag should be published");
    rx.wait_for(|s| s.is_connected && !s.verifying)
        .await
        .expect("connected snapshot should be published");
    let state = rx
        .wait_for(|s| !s.loading_collections && !s.collections.is_empty())
        .await
        .expect("settled snapshot should be published")
        .clone();

    assert_eq!(state.collections.len(), 1);
    task.await.expect("task").expect("verification should succeed");
}

// ============================================================================
// Status Mapping
// ============================================================================

async fn verify_failure(status: u16) -> SyncError {
    let shop = TestShop::start().await;
    shop.mount_shop_status(status).await;

    let err = shop
        .orchestrator
        .verify_connection()
        .await
        .expect_err("verification should fail");

    let state = shop.orchestrator.state();
    assert!(!state.is_connected);
    assert!(!state.verifying);
    assert_eq!(state.last_error, Some(err.clone()));
    err
}

#[tokio::test]
async fn test_verify_maps_401_to_auth() {
    assert_eq!(verify_failure(401).await, SyncError::Auth);
}

#[tokio::test]
async fn test_verify_maps_402_to_billing() {
    assert_eq!(verify_failure(402).await, SyncError::Billing);
}

#[tokio::test]
async fn test_verify_maps_403_to_permission() {
    assert_eq!(verify_failure(403).await, SyncError::Permission);
}

#[tokio::test]
async fn test_verify_maps_404_to_shop_not_found() {
    assert_eq!(verify_failure(404).await, SyncError::NotFound);
}

#[tokio::test]
async fn test_verify_maps_unknown_status_verbatim() {
    assert_eq!(verify_failure(500).await, SyncError::UnexpectedStatus(500));
}

// ============================================================================
// Transport Failures
// ============================================================================

#[tokio::test]
async fn test_transport_failure_surfaces_as_connection_error() {
    // Nothing listens on this port
    let dir = tempfile::tempdir().expect("temp dir");
    let store = CredentialStore::new(dir.path().join("credentials.json"));
    store
        .save(&Credentials::new("http://127.0.0.1:9", "shpat_test_token"))
        .expect("save credentials");

    let config = shopsync_client::ClientConfig {
        api_version: shopsync_integration_tests::API_VERSION.to_string(),
        credentials_path: dir.path().join("credentials.json"),
    };
    let orchestrator = SyncOrchestrator::new(&config, store);

    let err = orchestrator
        .verify_connection()
        .await
        .expect_err("verification should fail");
    assert!(matches!(err, SyncError::Connection(_)));
    assert!(!orchestrator.state().is_connected);
}

// ============================================================================
// Disconnected Preconditions
// ============================================================================

#[tokio::test]
async fn test_fetches_without_connection_issue_no_requests() {
    let shop = TestShop::start().await;

    let err = shop.orchestrator.fetch_collections().await.unwrap_err();
    assert_eq!(err, SyncError::NotConnected);

    let err = shop.orchestrator.fetch_products().await.unwrap_err();
    assert_eq!(err, SyncError::NotConnected);

    let requests = shop
        .server
        .received_requests()
        .await
        .expect("request recording enabled");
    assert!(requests.is_empty(), "no request should reach the server");
}

// ============================================================================
// Token Handling
// ============================================================================

#[tokio::test]
async fn test_probe_sends_access_token_header() {
    let shop = TestShop::start().await;
    // mount_shop_ok matches on the token header; a missing or wrong
    // header would fall through to this catch-all and fail verification
    shop.mount_shop_ok().await;
    Mock::given(method("GET"))
        .and(path(TestShop::api_path("shop.json")))
        .respond_with(ResponseTemplate::new(401))
        .mount(&shop.server)
        .await;
    shop.mount_collections(&[]).await;

    shop.orchestrator
        .verify_connection()
        .await
        .expect("token header should match the first mock");
}
