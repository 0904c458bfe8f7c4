//! RocketShoes CLI - drive the persistent cart from a terminal.
//!
//! # Usage
//!
//! ```bash
//! # Print the cart
//! rocketshoes show
//!
//! # Add one unit of product 3
//! rocketshoes add 3
//!
//! # Set product 3 to 2 units
//! rocketshoes set 3 2
//!
//! # Remove product 3
//! rocketshoes remove 3
//!
//! # Use another config file
//! rocketshoes --config ./rocketshoes.toml show
//! ```
//!
//! Every command prints the resulting cart as JSON on stdout. Failures of
//! the cart operation itself are printed to stderr and leave the exit code
//! at 0; only startup faults (config, database, client) exit non-zero.

#![cfg_attr(not(test), forbid(unsafe_code))]

use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;

use clap::{Parser, Subcommand};
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

use rocketshoes_api::HttpLookupClient;
use rocketshoes_cart::{CartDeps, CartStore};
use rocketshoes_core::{ProductId, UpdateProductAmount};
use rocketshoes_db::{Database, DbConfig};

mod config;
mod error;
mod notify;

use config::CartConfig;
use error::CliResult;
use notify::TerminalNotifier;

#[derive(Parser)]
#[command(name = "rocketshoes")]
#[command(author, version, about = "RocketShoes shopping cart")]
struct Cli {
    /// Path to a TOML config file
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print the current cart
    Show,
    /// Add one unit of a product
    Add {
        /// Product id
        product_id: ProductId,
    },
    /// Remove a product from the cart
    Remove {
        /// Product id
        product_id: ProductId,
    },
    /// Set the quantity of a product already in the cart
    Set {
        /// Product id
        product_id: ProductId,

        /// New quantity (values <= 0 are ignored)
        #[arg(allow_negative_numbers = true)]
        amount: i64,
    },
}

#[tokio::main]
async fn main() -> ExitCode {
    init_tracing();

    let cli = Cli::parse();

    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!(error = %e, "rocketshoes failed");
            eprintln!("error: {}", e);
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: Cli) -> CliResult<()> {
    let config = CartConfig::load(cli.config)?;

    let db_path = config.database_path()?;
    if let Some(parent) = db_path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    let db = Database::new(DbConfig::new(&db_path)).await?;
    info!(?db_path, "Database connected and migrations applied");

    let client = Arc::new(HttpLookupClient::new(config.client_config())?);

    let deps = CartDeps::new(
        client.clone(),
        client,
        Arc::new(db.key_values()),
        Arc::new(TerminalNotifier),
    )
    .storage_key(config.storage.cart_key.clone());
    let store = CartStore::open(deps).await;

    match cli.command {
        Commands::Show => {}
        Commands::Add { product_id } => store.add_product(product_id).await,
        Commands::Remove { product_id } => store.remove_product(product_id).await,
        Commands::Set { product_id, amount } => {
            store
                .update_product_amount(UpdateProductAmount { product_id, amount })
                .await
        }
    }

    let cart = store.cart();
    println!("{}", serde_json::to_string_pretty(&cart)?);
    info!(
        items = cart.len(),
        units = cart.total_quantity(),
        "Cart state"
    );

    db.close().await;
    Ok(())
}

/// Initializes the tracing subscriber for structured logging.
///
/// ## Log Levels
/// - `RUST_LOG=debug` - Show debug messages
/// - `RUST_LOG=rocketshoes_cart=trace` - Trace the cart store only
///
/// Logs go to stderr so stdout carries only the cart JSON.
fn init_tracing() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,rocketshoes=debug,sqlx=warn"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_set_with_negative_amount() {
        let cli = Cli::try_parse_from(["rocketshoes", "set", "4", "-1"]).unwrap();
        assert!(matches!(
            cli.command,
            Commands::Set {
                product_id: 4,
                amount: -1
            }
        ));
    }

    #[test]
    fn test_parse_global_config_flag() {
        let cli =
            Cli::try_parse_from(["rocketshoes", "add", "7", "--config", "/tmp/rs.toml"]).unwrap();
        assert_eq!(cli.config, Some(PathBuf::from("/tmp/rs.toml")));
        assert!(matches!(cli.command, Commands::Add { product_id: 7 }));
    }
}
