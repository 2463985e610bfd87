//! Shopcart CLI - drive a cart from the command line.
//!
//! # Usage
//!
//! ```bash
//! # Add one unit of product 1 to the cart
//! shopcart add 1
//!
//! # Set product 1's quantity to 3
//! shopcart set 1 3
//!
//! # Remove product 1 from the cart
//! shopcart remove 1
//!
//! # Show the cart
//! shopcart show
//! ```
//!
//! The cart is persisted under `SHOPCART_DATA_DIR` between invocations, so
//! each command restores the previous state, applies one mutation, and exits.

#![cfg_attr(not(test), forbid(unsafe_code))]

use std::sync::Arc;

use clap::{Parser, Subcommand};

use shopcart_core::ProductId;
use shopcart_store::{CartStore, HttpCatalogClient, JsonFileStore, Notifier, StoreConfig};

mod commands;

#[derive(Parser)]
#[command(name = "shopcart")]
#[command(author, version, about = "Shopcart CLI")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Add one unit of a product to the cart
    Add {
        /// Catalog product ID
        product_id: i64,
    },
    /// Remove a product from the cart
    Remove {
        /// Catalog product ID
        product_id: i64,
    },
    /// Set a product's quantity
    Set {
        /// Catalog product ID
        product_id: i64,
        /// New quantity (non-positive values are ignored)
        amount: i64,
    },
    /// Show the cart contents and subtotal
    Show,
}

/// Notifier that writes user-facing errors to stderr.
struct StderrNotifier;

impl Notifier for StderrNotifier {
    #[allow(clippy::print_stderr)] // user-facing CLI output
    fn error(&self, message: &str) {
        eprintln!("shopcart: {message}");
    }
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
    let config = StoreConfig::from_env()?;

    let catalog = Arc::new(HttpCatalogClient::new(&config)?);
    let storage = Arc::new(JsonFileStore::new(&config.data_dir));
    let notifier = Arc::new(StderrNotifier);

    let mut store = CartStore::restore(catalog, storage, notifier).await;

    match cli.command {
        Commands::Add { product_id } => {
            store.add_product(ProductId::new(product_id)).await;
        }
        Commands::Remove { product_id } => {
            store.remove_product(ProductId::new(product_id)).await;
        }
        Commands::Set { product_id, amount } => {
            store
                .update_product_amount(ProductId::new(product_id), amount)
                .await;
        }
        Commands::Show => {}
    }

    commands::cart::show(store.cart());
    Ok(())
}
