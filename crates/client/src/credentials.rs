//! Shop credentials and their file-backed store.
//!
//! Credentials are a shop domain + access token pair, persisted as a
//! single JSON file and rewritten wholesale on save. The store is an
//! explicitly constructed service handed to the orchestrator - there is
//! no process-wide singleton.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Serialize};

/// Shop endpoint + access token pair.
///
/// Implements `Debug` manually to redact the token.
#[derive(Clone)]
pub struct Credentials {
    /// Shop domain (e.g. your-store.myshopify.com).
    pub shop_domain: String,
    /// Admin API access token.
    pub access_token: SecretString,
}

impl Credentials {
    /// Create a new credential pair.
    #[must_use]
    pub fn new(shop_domain: impl Into<String>, access_token: impl Into<String>) -> Self {
        Self {
            shop_domain: shop_domain.into(),
            access_token: SecretString::from(access_token.into()),
        }
    }

    /// Empty credentials - the valid unauthenticated state. Requests
    /// issued with these simply fail remotely.
    #[must_use]
    pub fn empty() -> Self {
        Self::new("", "")
    }

    /// Base URL of the versioned Admin API for this shop.
    ///
    /// A domain already carrying a scheme is used verbatim, which lets
    /// tests point the client at a local mock server.
    #[must_use]
    pub fn base_url(&self, api_version: &str) -> String {
        if self.shop_domain.contains("://") {
            format!("{}/admin/api/{api_version}", self.shop_domain)
        } else {
            format!("https://{}/admin/api/{api_version}", self.shop_domain)
        }
    }
}

impl std::fmt::Debug for Credentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credentials")
            .field("shop_domain", &self.shop_domain)
            .field("access_token", &"[REDACTED]")
            .finish()
    }
}

/// On-disk representation of a credential pair.
#[derive(Serialize, Deserialize)]
struct StoredCredentials {
    shop_domain: String,
    access_token: String,
}

/// File-backed credential store.
///
/// Loaded once at startup; `save` rewrites the whole file. Absence of
/// the file is the valid unauthenticated state, not an error.
#[derive(Debug, Clone)]
pub struct CredentialStore {
    path: PathBuf,
}

impl CredentialStore {
    /// Create a store backed by the given file path.
    #[must_use]
    pub const fn new(path: PathBuf) -> Self {
        Self { path }
    }

    /// Default credentials file under the platform config directory
    /// (`<config_dir>/shopsync/credentials.json`).
    #[must_use]
    pub fn default_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("shopsync")
            .join("credentials.json")
    }

    /// The file path this store reads and writes.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Load credentials from disk.
    ///
    /// Returns `Ok(None)` when the file does not exist.
    ///
    /// # Errors
    ///
    /// Returns an I/O error for unreadable files and an
    /// `InvalidData`-kinded error for unparseable contents.
    pub fn load(&self) -> io::Result<Option<Credentials>> {
        let bytes = match fs::read(&self.path) {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(e),
        };

        let stored: StoredCredentials = serde_json::from_slice(&bytes)
            .map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))?;

        Ok(Some(Credentials::new(
            stored.shop_domain,
            stored.access_token,
        )))
    }

    /// Persist credentials, replacing any previous file.
    ///
    /// The parent directory is created on demand.
    ///
    /// # Errors
    ///
    /// Returns an I/O error when the directory cannot be created or the
    /// file cannot be written.
    pub fn save(&self, credentials: &Credentials) -> io::Result<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }

        let stored = StoredCredentials {
            shop_domain: credentials.shop_domain.clone(),
            access_token: credentials.access_token.expose_secret().to_string(),
        };
        let json = serde_json::to_vec_pretty(&stored)
            .map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))?;

        fs::write(&self.path, json)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_base_url_default_scheme() {
        let credentials = Credentials::new("my-store.myshopify.com", "shpat_token");
        assert_eq!(
            credentials.base_url("2024-01"),
            "https://my-store.myshopify.com/admin/api/2024-01"
        );
    }

    #[test]
    fn test_base_url_explicit_scheme_used_verbatim() {
        let credentials = Credentials::new("http://127.0.0.1:8080", "shpat_token");
        assert_eq!(
            credentials.base_url("2024-01"),
            "http://127.0.0.1:8080/admin/api/2024-01"
        );
    }

    #[test]
    fn test_debug_redacts_token() {
        let credentials = Credentials::new("my-store.myshopify.com", "shpat_super_secret");
        let debug_output = format!("{credentials:?}");

        assert!(debug_output.contains("my-store.myshopify.com"));
        assert!(debug_output.contains("[REDACTED]"));
        assert!(!debug_output.contains("shpat_super_secret"));
    }

    #[test]
    fn test_store_roundtrip() {
        let dir = tempfile::tempdir().unwrap();
        let store = CredentialStore::new(dir.path().join("nested").join("credentials.json"));

        assert!(store.load().unwrap().is_none());

        let credentials = Credentials::new("my-store.myshopify.com", "shpat_token");
        store.save(&credentials).unwrap();

        let loaded = store.load().unwrap().unwrap();
        assert_eq!(loaded.shop_domain, "my-store.myshopify.com");
        assert_eq!(loaded.access_token.expose_secret(), "shpat_token");
    }

    #[test]
    fn test_save_replaces_wholesale() {
        let dir = tempfile::tempdir().unwrap();
        let store = CredentialStore::new(dir.path().join("credentials.json"));

        store
            .save(&Credentials::new("first.myshopify.com", "one"))
            .unwrap();
        store
            .save(&Credentials::new("second.myshopify.com", "two"))
            .unwrap();

        let loaded = store.load().unwrap().unwrap();
        assert_eq!(loaded.shop_domain, "second.myshopify.com");
        assert_eq!(loaded.access_token.expose_secret(), "two");
    }

    #[test]
    fn test_load_corrupt_file_is_invalid_data() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("credentials.json");
        fs::write(&path, b"not json").unwrap();

        let err = CredentialStore::new(path).load().unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::InvalidData);
    }
}
