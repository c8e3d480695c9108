//! Admin REST API client.
//!
//! One-shot authenticated requests against the versioned Admin API base
//! path. Every call is a single request for a single page - pagination,
//! retry, and rate-limit handling are deliberately absent.

use std::sync::Arc;

use secrecy::{ExposeSecret, SecretString};
use tracing::{debug, instrument};

use shopsync_core::{
    Collect, Collection, CollectionId, Product, ProductId, decode_collections, decode_collects,
    decode_products,
};

use crate::credentials::Credentials;
use crate::error::SyncError;

const ACCESS_TOKEN_HEADER: &str = "X-Shopify-Access-Token";

/// Client for the Admin REST API.
///
/// Cheaply cloneable handle; all clones share the same connection pool.
#[derive(Clone)]
pub struct AdminClient {
    inner: Arc<AdminClientInner>,
}

struct AdminClientInner {
    http: reqwest::Client,
    base_url: String,
    access_token: SecretString,
}

impl AdminClient {
    /// Create a new Admin API client for the given credentials.
    #[must_use]
    pub fn new(credentials: &Credentials, api_version: &str) -> Self {
        Self {
            inner: Arc::new(AdminClientInner {
                http: reqwest::Client::new(),
                base_url: credentials.base_url(api_version),
                access_token: credentials.access_token.clone(),
            }),
        }
    }

    /// Issue a GET request and return the body bytes of a 2xx response.
    ///
    /// Transport failures map to `Connection`; 401/402/403/404 map to
    /// their specific kinds; any other non-2xx maps to
    /// `UnexpectedStatus` with the code retained.
    async fn get(&self, path: &str, query: &[(&str, String)]) -> Result<Vec<u8>, SyncError> {
        let url = format!("{}/{path}", self.inner.base_url);

        let response = self
            .inner
            .http
            .get(&url)
            .query(query)
            .header(
                ACCESS_TOKEN_HEADER,
                self.inner.access_token.expose_secret(),
            )
            .header("Content-Type", "application/json")
            .send()
            .await?;

        let status = response.status().as_u16();
        if let Some(err) = SyncError::from_status(status) {
            debug!(status, url = %url, "admin API returned non-success status");
            return Err(err);
        }

        let body = response.bytes().await?;
        Ok(body.to_vec())
    }

    /// Probe the shop endpoint to verify credentials and connectivity.
    ///
    /// The response body is discarded - only the status matters.
    ///
    /// # Errors
    ///
    /// Returns the mapped status or transport error on failure.
    #[instrument(skip(self))]
    pub async fn probe_shop(&self) -> Result<(), SyncError> {
        self.get("shop.json", &[]).await.map(|_| ())
    }

    /// Fetch the custom collection listing (one page).
    ///
    /// # Errors
    ///
    /// Returns the mapped status/transport error, or `Parse` when the
    /// body does not decode.
    #[instrument(skip(self))]
    pub async fn list_collections(&self) -> Result<Vec<Collection>, SyncError> {
        let body = self.get("custom_collections.json", &[]).await?;
        Ok(decode_collections(&body)?)
    }

    /// Fetch the product listing (one page).
    ///
    /// # Errors
    ///
    /// Returns the mapped status/transport error, or `Parse` when the
    /// body does not decode.
    #[instrument(skip(self))]
    pub async fn list_products(&self) -> Result<Vec<Product>, SyncError> {
        let body = self.get("products.json", &[]).await?;
        Ok(decode_products(&body)?)
    }

    /// Fetch the collect records linking products to one collection.
    ///
    /// # Errors
    ///
    /// Returns the mapped status/transport error, or `Parse` when the
    /// body does not decode.
    #[instrument(skip(self), fields(collection_id = %collection_id))]
    pub async fn list_collects(
        &self,
        collection_id: CollectionId,
    ) -> Result<Vec<Collect>, SyncError> {
        let body = self
            .get(
                "collects.json",
                &[("collection_id", collection_id.to_string())],
            )
            .await?;
        Ok(decode_collects(&body)?)
    }

    /// Fetch products constrained to an explicit ID set (comma-joined).
    ///
    /// # Errors
    ///
    /// Returns the mapped status/transport error, or `Parse` when the
    /// body does not decode.
    #[instrument(skip(self, ids), fields(id_count = ids.len()))]
    pub async fn products_by_ids(&self, ids: &[ProductId]) -> Result<Vec<Product>, SyncError> {
        let joined = ids
            .iter()
            .map(ToString::to_string)
            .collect::<Vec<_>>()
            .join(",");

        let body = self.get("products.json", &[("ids", joined)]).await?;
        Ok(decode_products(&body)?)
    }
}

impl std::fmt::Debug for AdminClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AdminClient")
            .field("base_url", &self.inner.base_url)
            .field("access_token", &"[REDACTED]")
            .finish()
    }
}
