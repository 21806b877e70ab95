//! Catalog

use async_trait::async_trait;
use mockall::automock;
use thiserror::Error;

use crate::products::{Product, ProductId, Stock};

mod http;

pub use http::{HttpCatalog, HttpCatalogConfig};

/// Errors that can occur when querying the catalog.
#[derive(Debug, Error)]
pub enum CatalogError {
    /// An HTTP transport or decoding error occurred.
    #[error("http error: {0}")]
    Http(#[from] reqwest::Error),

    /// The catalog has no record for the product.
    #[error("product {0} not found in catalog")]
    NotFound(ProductId),

    /// The catalog returned a non-2xx response.
    #[error("unexpected response from catalog: {0}")]
    UnexpectedResponse(String),
}

/// Read-only access to product details and live stock levels.
#[automock]
#[async_trait]
pub trait CatalogService: Send + Sync {
    /// Fetch the stock currently available for a product.
    async fn stock(&self, id: ProductId) -> Result<Stock, CatalogError>;

    /// Fetch the full catalog record for a product.
    async fn product(&self, id: ProductId) -> Result<Product, CatalogError>;
}
