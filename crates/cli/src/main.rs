//! Lattice Cart CLI
//!
//! Runs a single cart operation against the storefront catalog, persisting the
//! cart to a local JSON store between invocations.

use std::{io, process::ExitCode, sync::Arc};

use thiserror::Error;
use tracing::info;
use tracing_subscriber::util::TryInitError;

use lattice_cart::{
    catalog::{CatalogError, HttpCatalog},
    manager::CartManager,
    notifications::ChannelNotifier,
    storage::JsonFileStore,
};

use crate::config::CliConfig;

mod commands;
mod config;
mod observability;

#[derive(Debug, Error)]
enum CliError {
    #[error("failed to initialise logging")]
    Logging(#[from] TryInitError),

    #[error("failed to build catalog client")]
    Catalog(#[from] CatalogError),

    #[error("failed to write output")]
    Output(#[from] io::Error),
}

/// Exit status when the operation was rejected and a notification raised.
const REJECTED: u8 = 2;

#[tokio::main]
pub async fn main() -> ExitCode {
    let config = CliConfig::load().unwrap_or_else(|e| e.exit());

    match run(config).await {
        Ok(true) => ExitCode::SUCCESS,
        Ok(false) => ExitCode::from(REJECTED),
        Err(error) => {
            #[expect(
                clippy::print_stderr,
                reason = "logging may not be initialised, must use eprintln for startup errors"
            )]
            {
                eprintln!("{error}");
            }

            ExitCode::FAILURE
        }
    }
}

/// Run the configured command; `Ok(false)` means the cart rejected it.
async fn run(config: CliConfig) -> Result<bool, CliError> {
    observability::init_subscriber(&config.logging)?;

    let catalog = HttpCatalog::new(config.catalog.http_config())?;
    let store = JsonFileStore::new(config.storage.storage_path);
    let (notifier, mut notifications) = ChannelNotifier::channel();

    info!(api_url = %config.catalog.api_url, path = %store.path().display(), "opening cart");

    let manager = CartManager::load(
        Arc::new(catalog),
        Arc::new(store),
        Arc::new(notifier),
        config.storage.storage_key,
    )
    .await;

    commands::run(&manager, config.command).await;

    let notifications = commands::drain(&mut notifications);

    commands::write_cart(io::stdout().lock(), &manager.cart(), &notifications)?;

    Ok(notifications.is_empty())
}
