//! Integration test support for ShopSync.
//!
//! Tests run the real orchestrator against a `wiremock` server standing
//! in for the Admin API - no live shop or credentials required.
//!
//! # Running Tests
//!
//! ```bash
//! cargo test -p shopsync-integration-tests
//! ```

use serde_json::json;
use tempfile::TempDir;
use wiremock::matchers::{header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use shopsync_client::{ClientConfig, CredentialStore, Credentials, SyncOrchestrator};

/// API version every test fixture pins.
pub const API_VERSION: &str = "2024-01";

/// Access token the fixture stores and the mock server expects.
pub const TEST_TOKEN: &str = "shpat_test_token";

/// A mock shop plus an orchestrator pointed at it.
pub struct TestShop {
    /// The mock Admin API server.
    pub server: MockServer,
    /// Orchestrator wired to the mock server through a temp credential
    /// store.
    pub orchestrator: SyncOrchestrator,
    // Keeps the credentials file alive for the test's duration.
    _credentials_dir: TempDir,
}

impl TestShop {
    /// Start a mock shop with no mounted endpoints.
    pub async fn start() -> Self {
        let server = MockServer::start().await;

        let credentials_dir = tempfile::tempdir().expect("failed to create temp dir");
        let credentials_path = credentials_dir.path().join("credentials.json");
        let store = CredentialStore::new(credentials_path.clone());
        store
            .save(&Credentials::new(server.uri(), TEST_TOKEN))
            .expect("failed to store test credentials");

        let config = ClientConfig {
            api_version: API_VERSION.to_string(),
            credentials_path,
        };
        let orchestrator = SyncOrchestrator::new(&config, store);

        Self {
            server,
            orchestrator,
            _credentials_dir: credentials_dir,
        }
    }

    /// Full request path for an endpoint under the versioned base.
    #[must_use]
    pub fn api_path(endpoint: &str) -> String {
        format!("/admin/api/{API_VERSION}/{endpoint}")
    }

    /// Mount a successful shop probe.
    pub async fn mount_shop_ok(&self) {
        Mock::given(method("GET"))
            .and(path(Self::api_path("shop.json")))
            .and(header("X-Shopify-Access-Token", TEST_TOKEN))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"shop": {"id": 1}})))
            .mount(&self.server)
            .await;
    }

    /// Mount a shop probe answering with the given status.
    pub async fn mount_shop_status(&self, status: u16) {
        Mock::given(method("GET"))
            .and(path(Self::api_path("shop.json")))
            .respond_with(ResponseTemplate::new(status))
            .mount(&self.server)
            .await;
    }

    /// Mount a collections listing with the given raw JSON body.
    pub async fn mount_collections_body(&self, body: serde_json::Value) {
        Mock::given(method("GET"))
            .and(path(Self::api_path("custom_collections.json")))
            .respond_with(ResponseTemplate::new(200).set_body_json(body))
            .mount(&self.server)
            .await;
    }

    /// Mount a collections listing built from (id, title) pairs.
    pub async fn mount_collections(&self, entries: &[(i64, &str)]) {
        self.mount_collections_body(collections_body(entries)).await;
    }

    /// Mount a collections listing answering with the given status.
    pub async fn mount_collections_status(&self, status: u16) {
        Mock::given(method("GET"))
            .and(path(Self::api_path("custom_collections.json")))
            .respond_with(ResponseTemplate::new(status))
            .mount(&self.server)
            .await;
    }
}

/// Build a collections envelope from (id, title) pairs.
#[must_use]
pub fn collections_body(entries: &[(i64, &str)]) -> serde_json::Value {
    let collections: Vec<_> = entries
        .iter()
        .map(|(id, title)| {
            json!({
                "id": id,
                "title": title,
                "handle": title.to_lowercase().replace(' ', "-"),
                "published_scope": "web",
                "updated_at": "2024-01-02T09:00:00Z",
                "image": null
            })
        })
        .collect();
    json!({ "custom_collections": collections })
}

/// Build a products envelope from (id, title, prices) triples.
#[must_use]
pub fn products_body(entries: &[(i64, &str, &[&str])]) -> serde_json::Value {
    let products: Vec<_> = entries
        .iter()
        .map(|(id, title, prices)| {
            let variants: Vec<_> = prices
                .iter()
                .enumerate()
                .map(|(i, price)| {
                    json!({
                        "id": id * 10 + i64::try_from(i).expect("variant index"),
                        "title": format!("Variant {i}"),
                        "price": price,
                        "sku": null,
                        "position": i + 1,
                        "inventory_quantity": 5
                    })
                })
                .collect();
            json!({
                "id": id,
                "title": title,
                "handle": title.to_lowercase().replace(' ', "-"),
                "vendor": "Acme",
                "product_type": "Widget",
                "status": "active",
                "published_at": "2024-01-01T00:00:00Z",
                "updated_at": "2024-01-02T09:00:00Z",
                "variants": variants,
                "images": []
            })
        })
        .collect();
    json!({ "products": products })
}

/// Build a collects envelope linking products to one collection.
#[must_use]
pub fn collects_body(collection_id: i64, product_ids: &[i64]) -> serde_json::Value {
    let collects: Vec<_> = product_ids
        .iter()
        .enumerate()
        .map(|(i, product_id)| {
            json!({
                "id": i + 1,
                "product_id": product_id,
                "collection_id": collection_id
            })
        })
        .collect();
    json!({ "collects": collects })
}
