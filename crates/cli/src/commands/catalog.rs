//! Catalog commands: connect, listings, and CSV export.

#![allow(clippy::print_stdout)]

use std::path::Path;

use thiserror::Error;

use shopsync_client::{ClientConfig, ConfigError, CredentialStore, SyncError, SyncOrchestrator};
use shopsync_core::export::{collections_to_csv, products_to_csv};
use shopsync_core::{Collection, CollectionId, Product};

/// Errors that can occur during catalog commands.
#[derive(Debug, Error)]
pub enum CatalogError {
    /// Configuration loading failed.
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// A sync operation failed.
    #[error(transparent)]
    Sync(#[from] SyncError),

    /// Writing an export file failed.
    #[error("Failed to write export file: {0}")]
    Export(std::io::Error),

    /// The requested collection is not in the fetched listing.
    #[error("Collection {0} not found")]
    UnknownCollection(CollectionId),
}

/// Build an orchestrator from the environment and connect it.
async fn connect_orchestrator() -> Result<SyncOrchestrator, CatalogError> {
    let config = ClientConfig::from_env()?;
    let store = CredentialStore::new(config.credentials_path.clone());
    let orchestrator = SyncOrchestrator::new(&config, store);

    orchestrator.verify_connection().await?;
    Ok(orchestrator)
}

/// Verify connectivity and report the collection count.
pub async fn connect() -> Result<(), CatalogError> {
    let orchestrator = connect_orchestrator().await?;
    let state = orchestrator.state();

    println!("Connected.");
    match state.notice {
        Some(notice) => println!("{notice}"),
        None => println!("{} collections available", state.collections.len()),
    }
    Ok(())
}

/// List collections, optionally exporting them to CSV.
pub async fn collections(export: Option<&Path>) -> Result<(), CatalogError> {
    let orchestrator = connect_orchestrator().await?;
    let state = orchestrator.state();

    print_collections(&state.collections, state.notice.map(|n| n.to_string()));

    if let Some(path) = export {
        write_export(path, &collections_to_csv(&state.collections))?;
        println!("Exported {} collections to {}", state.collections.len(), path.display());
    }
    Ok(())
}

/// List products, optionally exporting them to CSV.
pub async fn products(export: Option<&Path>) -> Result<(), CatalogError> {
    let orchestrator = connect_orchestrator().await?;
    orchestrator.fetch_products().await?;
    let state = orchestrator.state();

    print_products(&state.products, state.notice.map(|n| n.to_string()));

    if let Some(path) = export {
        write_export(path, &products_to_csv(&state.products))?;
        println!("Exported {} products to {}", state.products.len(), path.display());
    }
    Ok(())
}

/// List the products belonging to one collection.
pub async fn collection_products(
    collection_id: i64,
    export: Option<&Path>,
) -> Result<(), CatalogError> {
    let id = CollectionId::new(collection_id);
    let orchestrator = connect_orchestrator().await?;

    let collection = orchestrator
        .state()
        .collections
        .iter()
        .find(|c| c.id == id)
        .cloned()
        .ok_or(CatalogError::UnknownCollection(id))?;

    println!("Collection: {} ({})", collection.title, collection.id);
    orchestrator
        .fetch_products_for_collection(collection)
        .await?;
    let state = orchestrator.state();

    print_products(
        &state.collection_products,
        state.notice.map(|n| n.to_string()),
    );

    if let Some(path) = export {
        write_export(path, &products_to_csv(&state.collection_products))?;
        println!(
            "Exported {} products to {}",
            state.collection_products.len(),
            path.display()
        );
    }
    Ok(())
}

fn print_collections(collections: &[Collection], notice: Option<String>) {
    if let Some(notice) = notice {
        println!("{notice}");
        return;
    }

    println!("{:<14} {:<40} {:<24} {:<16}", "ID", "TITLE", "HANDLE", "SCOPE");
    for collection in collections {
        println!(
            "{:<14} {:<40} {:<24} {:<16}",
            collection.id, collection.title, collection.handle, collection.published_scope
        );
    }
}

fn print_products(products: &[Product], notice: Option<String>) {
    if let Some(notice) = notice {
        println!("{notice}");
        return;
    }

    println!(
        "{:<14} {:<40} {:<20} {:<10} {:>8}  {}",
        "ID", "TITLE", "VENDOR", "STATUS", "VARIANTS", "PRICE RANGE"
    );
    for product in products {
        println!(
            "{:<14} {:<40} {:<20} {:<10} {:>8}  {}",
            product.id,
            product.title,
            product.vendor,
            product.status,
            product.variants.len(),
            product.price_range().unwrap_or_default()
        );
    }
}

fn write_export(path: &Path, contents: &str) -> Result<(), CatalogError> {
    std::fs::write(path, contents).map_err(CatalogError::Export)
}
