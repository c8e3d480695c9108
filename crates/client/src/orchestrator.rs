//! Sync orchestrator - connect/fetch sequencing and state publication.
//!
//! The orchestrator owns a `tokio::sync::watch` channel holding the
//! current [`SyncState`]. All mutation goes through `send_modify`, so
//! every publication is an atomic snapshot replacement: observers never
//! see a half-applied list, and no locking discipline leaks to callers.
//!
//! Operations are plain `async fn`s - the two-phase membership fetch is
//! a single awaitable sequence rather than nested callbacks. Overlapping
//! membership fetches are resolved by a generation counter: a newer call
//! supersedes any prior in-flight call for the slot, and a stale
//! completion is discarded instead of clobbering the newer result.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, PoisonError, RwLock};

use tokio::sync::watch;
use tracing::{info, instrument, warn};

use shopsync_core::{Collection, Product, ProductId};

use crate::admin::AdminClient;
use crate::config::ClientConfig;
use crate::credentials::{CredentialStore, Credentials};
use crate::error::SyncError;
use crate::state::{Notice, SyncState};

/// Drives authentication, fetch sequencing, and state publication.
///
/// Cheaply cloneable handle; all clones share the same published state.
#[derive(Clone)]
pub struct SyncOrchestrator {
    inner: Arc<OrchestratorInner>,
}

struct OrchestratorInner {
    api_version: String,
    store: CredentialStore,
    /// Credentials and the client built from them, swapped together on save.
    slot: RwLock<ClientSlot>,
    state: watch::Sender<SyncState>,
    /// Generation counter for the collection-products slot.
    membership_generation: AtomicU64,
}

struct ClientSlot {
    credentials: Credentials,
    client: AdminClient,
}

impl SyncOrchestrator {
    /// Create an orchestrator, loading credentials once from the store.
    ///
    /// An absent or unreadable credentials file is the valid
    /// unauthenticated state; operations then fail remotely rather than
    /// locally.
    #[must_use]
    pub fn new(config: &ClientConfig, store: CredentialStore) -> Self {
        let credentials = match store.load() {
            Ok(Some(credentials)) => credentials,
            Ok(None) => Credentials::empty(),
            Err(e) => {
                warn!(error = %e, path = %store.path().display(), "failed to load credentials");
                Credentials::empty()
            }
        };
        let client = AdminClient::new(&credentials, &config.api_version);
        let (state, _) = watch::channel(SyncState::default());

        Self {
            inner: Arc::new(OrchestratorInner {
                api_version: config.api_version.clone(),
                store,
                slot: RwLock::new(ClientSlot {
                    credentials,
                    client,
                }),
                state,
                membership_generation: AtomicU64::new(0),
            }),
        }
    }

    /// Subscribe to state snapshots.
    ///
    /// The receiver yields the current snapshot immediately and a new one
    /// after every publication.
    #[must_use]
    pub fn subscribe(&self) -> watch::Receiver<SyncState> {
        self.inner.state.subscribe()
    }

    /// Clone the current state snapshot.
    #[must_use]
    pub fn state(&self) -> SyncState {
        self.inner.state.borrow().clone()
    }

    /// The current in-memory credentials.
    #[must_use]
    pub fn credentials(&self) -> Credentials {
        self.read_slot(|slot| slot.credentials.clone())
    }

    /// Verify connectivity with a lightweight shop probe.
    ///
    /// On success the connection is marked live and a collections fetch
    /// runs as a continuation of the same sequence. On any failure the
    /// connection stays (or becomes) down.
    ///
    /// # Errors
    ///
    /// Returns the probe failure, or the continuation's failure.
    #[instrument(skip(self))]
    pub async fn verify_connection(&self) -> Result<(), SyncError> {
        self.publish(|s| {
            s.last_error = None;
            s.notice = None;
            s.verifying = true;
        });

        match self.client().probe_shop().await {
            Ok(()) => {
                info!("connected to shop");
                self.publish(|s| {
                    s.verifying = false;
                    s.is_connected = true;
                });
                self.fetch_collections().await
            }
            Err(err) => {
                warn!(error = %err, "shop probe failed");
                self.publish(|s| {
                    s.verifying = false;
                    s.is_connected = false;
                    s.last_error = Some(err.clone());
                });
                Err(err)
            }
        }
    }

    /// Fetch the collection listing and replace the published list.
    ///
    /// Requires a live connection. On decode failure the previously held
    /// list is left untouched; an empty result publishes an advisory
    /// notice, not an error.
    ///
    /// # Errors
    ///
    /// Returns `NotConnected` without a network call when disconnected,
    /// otherwise the fetch failure.
    #[instrument(skip(self))]
    pub async fn fetch_collections(&self) -> Result<(), SyncError> {
        self.require_connected()?;
        self.publish(|s| {
            s.last_error = None;
            s.notice = None;
            s.loading_collections = true;
        });

        match self.client().list_collections().await {
            Ok(collections) => {
                info!(count = collections.len(), "fetched collections");
                self.publish(|s| {
                    s.loading_collections = false;
                    s.notice = collections.is_empty().then_some(Notice::NoCollections);
                    s.collections = collections;
                });
                Ok(())
            }
            Err(err) => {
                self.fail(err, |s| s.loading_collections = false)
            }
        }
    }

    /// Fetch the product listing and replace the published list.
    ///
    /// Same contract shape as [`Self::fetch_collections`].
    ///
    /// # Errors
    ///
    /// Returns `NotConnected` without a network call when disconnected,
    /// otherwise the fetch failure.
    #[instrument(skip(self))]
    pub async fn fetch_products(&self) -> Result<(), SyncError> {
        self.require_connected()?;
        self.publish(|s| {
            s.last_error = None;
            s.notice = None;
            s.loading_products = true;
        });

        match self.client().list_products().await {
            Ok(products) => {
                info!(count = products.len(), "fetched products");
                self.publish(|s| {
                    s.loading_products = false;
                    s.notice = products.is_empty().then_some(Notice::NoProducts);
                    s.products = products;
                });
                Ok(())
            }
            Err(err) => {
                self.fail(err, |s| s.loading_products = false)
            }
        }
    }

    /// Fetch the products belonging to one collection.
    ///
    /// Two phases: collect records are fetched first, their distinct
    /// product IDs (order of first appearance) feed a single batched
    /// product lookup. Zero collects short-circuits to an empty result
    /// without the second request.
    ///
    /// The targeted collection is recorded as `selected_collection`
    /// before the fetch starts. A newer call to this operation
    /// supersedes this one: a superseded completion is discarded and
    /// never overwrites the newer call's result.
    ///
    /// # Errors
    ///
    /// Returns `NotConnected` without a network call when disconnected,
    /// otherwise the failure of either phase.
    #[instrument(skip(self, collection), fields(collection_id = %collection.id))]
    pub async fn fetch_products_for_collection(
        &self,
        collection: Collection,
    ) -> Result<(), SyncError> {
        self.require_connected()?;

        // The generation is claimed inside the start publish itself, so
        // generation order always matches selected_collection publish
        // order: a superseded call's start can never land after its
        // superseder's.
        let mut generation = 0;
        self.inner.state.send_modify(|s| {
            generation = self
                .inner
                .membership_generation
                .fetch_add(1, Ordering::SeqCst)
                + 1;
            s.last_error = None;
            s.notice = None;
            s.selected_collection = Some(collection.clone());
            s.loading_collection_products = true;
        });

        let result = self.load_membership(&collection).await;

        let mut superseded = false;
        self.inner.state.send_modify(|s| {
            if self.inner.membership_generation.load(Ordering::SeqCst) != generation {
                superseded = true;
                return;
            }
            s.loading_collection_products = false;
            match &result {
                Ok(products) => {
                    s.notice = products.is_empty().then_some(Notice::NoCollectionProducts);
                    s.collection_products = products.clone();
                }
                Err(err) => {
                    if err.severs_connection() {
                        s.is_connected = false;
                    }
                    s.last_error = Some(err.clone());
                }
            }
        });

        if superseded {
            info!("membership fetch superseded by a newer call");
        }
        result.map(|_| ())
    }

    /// Persist new credentials and swap the in-memory client.
    ///
    /// The in-memory pair is swapped before the write, so it stays
    /// usable for the session even when persistence fails.
    ///
    /// # Errors
    ///
    /// Returns `Persistence` when the file write fails.
    #[instrument(skip(self, credentials), fields(shop_domain = %credentials.shop_domain))]
    pub fn save_credentials(&self, credentials: Credentials) -> Result<(), SyncError> {
        let client = AdminClient::new(&credentials, &self.inner.api_version);
        {
            let mut slot = self
                .inner
                .slot
                .write()
                .unwrap_or_else(PoisonError::into_inner);
            slot.credentials = credentials.clone();
            slot.client = client;
        }

        self.inner.store.save(&credentials).map_err(|e| {
            let err = SyncError::Persistence(e.to_string());
            warn!(error = %err, "credential save failed; in-memory credentials remain active");
            self.publish(|s| s.last_error = Some(err.clone()));
            err
        })
    }

    /// Phase one and two of the membership fetch.
    async fn load_membership(&self, collection: &Collection) -> Result<Vec<Product>, SyncError> {
        let client = self.client();
        let collects = client.list_collects(collection.id).await?;

        // Distinct product IDs, order of first appearance
        let mut ids: Vec<ProductId> = Vec::with_capacity(collects.len());
        for collect in collects {
            if !ids.contains(&collect.product_id) {
                ids.push(collect.product_id);
            }
        }

        if ids.is_empty() {
            return Ok(Vec::new());
        }
        client.products_by_ids(&ids).await
    }

    /// Fail the current operation: clear its loading flag, record the
    /// error, and sever the connection when the kind warrants it.
    fn fail(
        &self,
        err: SyncError,
        clear_loading: impl FnOnce(&mut SyncState),
    ) -> Result<(), SyncError> {
        warn!(error = %err, "sync operation failed");
        self.publish(|s| {
            clear_loading(s);
            if err.severs_connection() {
                s.is_connected = false;
            }
            s.last_error = Some(err.clone());
        });
        Err(err)
    }

    /// Precondition: a listing fetch needs a live connection and makes
    /// no network call without one.
    fn require_connected(&self) -> Result<(), SyncError> {
        if self.inner.state.borrow().is_connected {
            Ok(())
        } else {
            let err = SyncError::NotConnected;
            self.publish(|s| {
                s.notice = None;
                s.last_error = Some(err.clone());
            });
            Err(err)
        }
    }

    fn publish(&self, f: impl FnOnce(&mut SyncState)) {
        self.inner.state.send_modify(f);
    }

    fn client(&self) -> AdminClient {
        self.read_slot(|slot| slot.client.clone())
    }

    fn read_slot<T>(&self, f: impl FnOnce(&ClientSlot) -> T) -> T {
        let slot = self
            .inner
            .slot
            .read()
            .unwrap_or_else(PoisonError::into_inner);
        f(&slot)
    }
}

impl std::fmt::Debug for SyncOrchestrator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SyncOrchestrator")
            .field("api_version", &self.inner.api_version)
            .finish_non_exhaustive()
    }
}
