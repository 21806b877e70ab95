//! HTTP catalog client.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde::de::DeserializeOwned;
use tracing::debug;

use crate::{
    catalog::{CatalogError, CatalogService},
    products::{Product, ProductId, Stock},
};

/// Configuration for connecting to the storefront catalog API.
#[derive(Debug, Clone)]
pub struct HttpCatalogConfig {
    /// Catalog base URL, e.g. `"http://localhost:3333"`.
    pub base_url: String,

    /// Optional limit on each request; requests wait indefinitely when unset.
    pub timeout: Option<Duration>,
}

/// HTTP client for the catalog's `/stock` and `/products` resources.
#[derive(Debug, Clone)]
pub struct HttpCatalog {
    base_url: String,
    http: Client,
}

impl HttpCatalog {
    /// Create a new client from the given configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the underlying HTTP client cannot be built.
    pub fn new(config: HttpCatalogConfig) -> Result<Self, CatalogError> {
        let mut builder = Client::builder();

        if let Some(timeout) = config.timeout {
            builder = builder.timeout(timeout);
        }

        Ok(Self {
            base_url: config.base_url.trim_end_matches('/').to_string(),
            http: builder.build()?,
        })
    }

    fn url(&self, resource: &str, id: ProductId) -> String {
        format!("{}/{resource}/{id}", self.base_url)
    }

    async fn get<T: DeserializeOwned>(
        &self,
        resource: &str,
        id: ProductId,
    ) -> Result<T, CatalogError> {
        let url = self.url(resource, id);

        debug!(%url, "querying catalog");

        let response = self.http.get(&url).send().await?;

        let status = response.status();

        if status == StatusCode::NOT_FOUND {
            return Err(CatalogError::NotFound(id));
        }

        if !status.is_success() {
            let text = response.text().await.unwrap_or_default();

            return Err(CatalogError::UnexpectedResponse(format!(
                "{resource} request failed with status {status}: {text}"
            )));
        }

        Ok(response.json().await?)
    }
}

#[async_trait]
impl CatalogService for HttpCatalog {
    async fn stock(&self, id: ProductId) -> Result<Stock, CatalogError> {
        self.get("stock", id).await
    }

    async fn product(&self, id: ProductId) -> Result<Product, CatalogError> {
        self.get("products", id).await
    }
}
