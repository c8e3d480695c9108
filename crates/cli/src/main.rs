//! ShopSync CLI - catalog browsing and CSV export.
//!
//! # Usage
//!
//! ```bash
//! # Verify connectivity and list collections
//! shopsync connect
//!
//! # List collections, optionally exporting to CSV
//! shopsync collections --export collections.csv
//!
//! # List products
//! shopsync products --export products.csv
//!
//! # List the products belonging to one collection
//! shopsync collection-products 841564295
//!
//! # Manage stored credentials
//! shopsync settings show
//! shopsync settings set --domain my-store.myshopify.com --token shpat_...
//! ```
//!
//! # Commands
//!
//! - `connect` - verify connectivity and fetch the collection listing
//! - `collections` - list collections, optional CSV export
//! - `products` - list products, optional CSV export
//! - `collection-products` - two-phase fetch for one collection
//! - `settings` - show or replace stored credentials

#![cfg_attr(not(test), forbid(unsafe_code))]

use std::path::PathBuf;

use clap::{Parser, Subcommand};

mod commands;

#[derive(Parser)]
#[command(name = "shopsync")]
#[command(author, version, about = "Catalog sync and export for Shopify shops")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Verify connectivity and fetch the collection listing
    Connect,
    /// List collections
    Collections {
        /// Write the listing to a CSV file
        #[arg(long, value_name = "PATH")]
        export: Option<PathBuf>,
    },
    /// List products
    Products {
        /// Write the listing to a CSV file
        #[arg(long, value_name = "PATH")]
        export: Option<PathBuf>,
    },
    /// List the products belonging to one collection
    CollectionProducts {
        /// Collection ID
        collection_id: i64,

        /// Write the listing to a CSV file
        #[arg(long, value_name = "PATH")]
        export: Option<PathBuf>,
    },
    /// Manage stored credentials
    Settings {
        #[command(subcommand)]
        action: SettingsAction,
    },
}

#[derive(Subcommand)]
enum SettingsAction {
    /// Show the stored shop domain (the token stays redacted)
    Show,
    /// Replace the stored credentials
    Set {
        /// Shop domain (e.g. my-store.myshopify.com)
        #[arg(short, long)]
        domain: String,

        /// Admin API access token
        #[arg(short, long)]
        token: String,
    },
}

#[tokio::main]
async fn main() {
    // Initialize tracing
    tracing_subscriber::fmt::init();

    let cli = Cli::parse();

    let result: Result<(), Box<dyn std::error::Error>> = run(cli).await;

    if let Err(e) = result {
        tracing::error!("Command failed: {e}");
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    match cli.command {
        Commands::Connect => commands::catalog::connect().await?,
        Commands::Collections { export } => {
            commands::catalog::collections(export.as_deref()).await?;
        }
        Commands::Products { export } => {
            commands::catalog::products(export.as_deref()).await?;
        }
        Commands::CollectionProducts {
            collection_id,
            export,
        } => {
            commands::catalog::collection_products(collection_id, export.as_deref()).await?;
        }
        Commands::Settings { action } => match action {
            SettingsAction::Show => commands::settings::show()?,
            SettingsAction::Set { domain, token } => commands::settings::set(&domain, &token)?,
        },
    }
    Ok(())
}
