//! HTTP catalog client.
//!
//! REST client for the catalog backend: `GET {base}/products/{id}` for
//! metadata and `GET {base}/stock/{id}` for stock levels, both JSON. Product
//! metadata is cached via `moka` (5-minute TTL); stock is never cached
//! because mutations validate against it and must see current data.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use moka::future::Cache;
use secrecy::{ExposeSecret, SecretString};
use tracing::debug;

use shopcart_core::{Product, ProductId, StockLevel};

use crate::config::StoreConfig;
use crate::error::CatalogError;
use crate::ports::CatalogService;

/// Client for the catalog backend.
///
/// Cheaply cloneable via `Arc`.
#[derive(Clone)]
pub struct HttpCatalogClient {
    inner: Arc<HttpCatalogClientInner>,
}

struct HttpCatalogClientInner {
    client: reqwest::Client,
    base_url: String,
    token: Option<SecretString>,
    products: Cache<ProductId, Product>,
}

impl HttpCatalogClient {
    /// Create a new catalog client.
    ///
    /// # Errors
    ///
    /// Returns an error if the underlying HTTP client cannot be built.
    pub fn new(config: &StoreConfig) -> Result<Self, reqwest::Error> {
        let client = reqwest::Client::builder()
            .timeout(config.http_timeout)
            .build()?;

        let products = Cache::builder()
            .max_capacity(1000)
            .time_to_live(Duration::from_secs(300)) // 5 minutes
            .build();

        Ok(Self {
            inner: Arc::new(HttpCatalogClientInner {
                client,
                base_url: config.catalog_url.trim_end_matches('/').to_string(),
                token: config.catalog_token.clone(),
                products,
            }),
        })
    }

    /// Execute a GET against the catalog and decode the JSON body.
    async fn fetch_json<T: serde::de::DeserializeOwned>(
        &self,
        path: &str,
        id: ProductId,
    ) -> Result<T, CatalogError> {
        let url = format!("{}/{path}", self.inner.base_url);
        let mut request = self.inner.client.get(&url);
        if let Some(token) = &self.inner.token {
            request = request.bearer_auth(token.expose_secret());
        }

        let response = request.send().await?;
        let status = response.status();

        if status == reqwest::StatusCode::NOT_FOUND {
            return Err(CatalogError::NotFound(id));
        }

        // Read the body as text first for better error diagnostics
        let response_text = response.text().await?;

        if !status.is_success() {
            tracing::error!(
                status = %status,
                body = %response_text.chars().take(500).collect::<String>(),
                "catalog returned non-success status"
            );
            return Err(CatalogError::Status(status.as_u16()));
        }

        serde_json::from_str(&response_text).map_err(|e| {
            tracing::error!(
                error = %e,
                body = %response_text.chars().take(500).collect::<String>(),
                "failed to parse catalog response"
            );
            CatalogError::Parse(e)
        })
    }
}

#[async_trait]
impl CatalogService for HttpCatalogClient {
    async fn get_product(&self, id: ProductId) -> Result<Product, CatalogError> {
        if let Some(product) = self.inner.products.get(&id).await {
            debug!(%id, "product cache hit");
            return Ok(product);
        }

        let product: Product = self.fetch_json(&format!("products/{id}"), id).await?;
        self.inner.products.insert(id, product.clone()).await;
        Ok(product)
    }

    async fn get_stock(&self, id: ProductId) -> Result<StockLevel, CatalogError> {
        // Deliberately uncached: see module docs.
        self.fetch_json(&format!("stock/{id}"), id).await
    }
}
