//! CLI configuration

use std::{path::PathBuf, time::Duration};

use clap::{Args, Parser, Subcommand, ValueEnum};

use lattice_cart::{catalog::HttpCatalogConfig, products::ProductId, storage::DEFAULT_CART_KEY};

/// Lattice Cart command-line configuration
#[derive(Debug, Parser)]
#[command(name = "lattice-cart", about = "Storefront cart", long_about = None)]
pub(crate) struct CliConfig {
    /// Catalog API settings.
    #[command(flatten)]
    pub catalog: CatalogConfig,

    /// Local storage settings.
    #[command(flatten)]
    pub storage: StorageConfig,

    /// Logging output settings.
    #[command(flatten)]
    pub logging: LoggingConfig,

    /// Operation to run against the cart.
    #[command(subcommand)]
    pub command: Command,
}

impl CliConfig {
    /// Load configuration from environment and CLI arguments
    ///
    /// # Errors
    ///
    /// Returns an error if configuration cannot be parsed
    pub fn load() -> Result<Self, clap::Error> {
        // Load .env file if present (ignore if missing)
        _ = dotenvy::dotenv();

        Self::try_parse()
    }
}

/// Catalog API settings.
#[derive(Debug, Args)]
pub(crate) struct CatalogConfig {
    /// Catalog API base URL
    #[arg(long, env = "CART_API_URL", default_value = "http://localhost:3333")]
    pub api_url: String,

    /// Per-request timeout in seconds; requests wait indefinitely when unset
    #[arg(long, env = "CART_REQUEST_TIMEOUT_SECONDS")]
    pub request_timeout_seconds: Option<u64>,
}

impl CatalogConfig {
    pub fn http_config(&self) -> HttpCatalogConfig {
        HttpCatalogConfig {
            base_url: self.api_url.clone(),
            timeout: self.request_timeout_seconds.map(Duration::from_secs),
        }
    }
}

/// Local storage settings.
#[derive(Debug, Args)]
pub(crate) struct StorageConfig {
    /// File holding the persisted key-value store
    #[arg(
        long,
        env = "CART_STORAGE_PATH",
        default_value = ".lattice-cart/storage.json"
    )]
    pub storage_path: PathBuf,

    /// Key the cart snapshot is stored under
    #[arg(long, env = "CART_STORAGE_KEY", default_value = DEFAULT_CART_KEY)]
    pub storage_key: String,
}

/// Log output format.
#[derive(Clone, Copy, Debug, ValueEnum)]
pub(crate) enum LogFormat {
    /// Compact, human-readable logs.
    Compact,

    /// Structured JSON logs.
    Json,
}

/// Logging settings.
#[derive(Debug, Args)]
pub(crate) struct LoggingConfig {
    /// Log level (trace, debug, info, warn, error)
    #[arg(short, long, env = "RUST_LOG", default_value = "warn")]
    pub log_level: String,

    /// Log format (compact, json)
    #[arg(long, env = "LOG_FORMAT", value_enum, default_value_t = LogFormat::Compact)]
    pub log_format: LogFormat,
}

/// Cart operations.
#[derive(Debug, Clone, Subcommand)]
pub(crate) enum Command {
    /// Print the current cart
    Show,

    /// Add one unit of a product
    Add {
        /// Catalog product id
        product: ProductId,
    },

    /// Remove a product from the cart
    Remove {
        /// Catalog product id
        product: ProductId,
    },

    /// Set the quantity of a product already in the cart
    Update {
        /// Catalog product id
        product: ProductId,

        /// New quantity; zero or below is ignored
        #[arg(allow_negative_numbers = true)]
        amount: i64,
    },
}
