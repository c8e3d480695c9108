//! ShopSync Client - Admin API access and catalog synchronization.
//!
//! # Architecture
//!
//! - [`credentials`] - shop endpoint + access token pair and its
//!   file-backed store (explicitly constructed, no ambient singletons)
//! - [`admin`] - one-shot REST calls against the versioned Admin API
//! - [`error`] - the tagged error taxonomy shared by all operations
//! - [`orchestrator`] - drives connect/fetch sequencing and publishes
//!   consistent state snapshots to observers
//!
//! # Example
//!
//! ```rust,ignore
//! use shopsync_client::{ClientConfig, CredentialStore, SyncOrchestrator};
//!
//! let config = ClientConfig::from_env()?;
//! let store = CredentialStore::new(config.credentials_path.clone());
//! let orchestrator = SyncOrchestrator::new(&config, store);
//!
//! let mut updates = orchestrator.subscribe();
//! orchestrator.verify_connection().await?;
//! println!("{} collections", orchestrator.state().collections.len());
//! ```

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod admin;
pub mod config;
pub mod credentials;
pub mod error;
pub mod orchestrator;
pub mod state;

pub use admin::AdminClient;
pub use config::{ClientConfig, ConfigError};
pub use credentials::{CredentialStore, Credentials};
pub use error::SyncError;
pub use orchestrator::SyncOrchestrator;
pub use state::{Notice, SyncState};
