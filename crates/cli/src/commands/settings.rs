//! Credential management commands.

#![allow(clippy::print_stdout)]

use thiserror::Error;

use shopsync_client::{ClientConfig, ConfigError, CredentialStore, Credentials};

/// Errors that can occur during settings commands.
#[derive(Debug, Error)]
pub enum SettingsError {
    /// Configuration loading failed.
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// Reading or writing the credentials file failed.
    #[error("Credential store error: {0}")]
    Store(#[from] std::io::Error),
}

/// Show the stored shop domain. The token is never printed.
pub fn show() -> Result<(), SettingsError> {
    let config = ClientConfig::from_env()?;
    let store = CredentialStore::new(config.credentials_path);

    match store.load()? {
        Some(credentials) => {
            println!("Shop domain:  {}", credentials.shop_domain);
            println!("Access token: [REDACTED]");
            println!("Stored at:    {}", store.path().display());
        }
        None => println!("No credentials stored ({})", store.path().display()),
    }
    Ok(())
}

/// Replace the stored credentials wholesale.
pub fn set(domain: &str, token: &str) -> Result<(), SettingsError> {
    let config = ClientConfig::from_env()?;
    let store = CredentialStore::new(config.credentials_path);

    store.save(&Credentials::new(domain, token))?;
    println!("Credentials saved to {}", store.path().display());
    Ok(())
}
