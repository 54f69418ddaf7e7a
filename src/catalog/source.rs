//! Catalog Source Module
//!
//! The network seam between the catalog cache and the remote product
//! catalog. The cache only sees the [`CatalogSource`] trait, which keeps the
//! deduplication logic testable against a scripted source.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::StatusCode;

use crate::catalog::Product;
use crate::error::{Result, StoreError};

// == Catalog Source Trait ==
/// Read-only access to the remote product catalog.
#[async_trait]
pub trait CatalogSource: Send + Sync + 'static {
    /// Fetches the complete product listing.
    async fn fetch_all(&self) -> Result<Vec<Product>>;

    /// Fetches a single product by id.
    ///
    /// An upstream absence status maps to [`StoreError::NotFound`]; every
    /// other failure (transport, non-success status, malformed payload) maps
    /// to [`StoreError::FetchFailure`].
    async fn fetch_by_id(&self, id: u32) -> Result<Product>;
}

// == HTTP Catalog Source ==
/// [`CatalogSource`] backed by the remote catalog's REST endpoints.
#[derive(Debug, Clone)]
pub struct HttpCatalogSource {
    client: reqwest::Client,
    base_url: String,
}

impl HttpCatalogSource {
    /// Creates a source for the given catalog root URL with a per-request
    /// network timeout.
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| StoreError::Internal(format!("failed to build HTTP client: {e}")))?;

        Ok(Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        })
    }

    async fn get_json<T: serde::de::DeserializeOwned>(&self, url: String) -> Result<T> {
        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|e| StoreError::FetchFailure(format!("request to {url} failed: {e}")))?;

        match response.status() {
            StatusCode::NOT_FOUND => Err(StoreError::NotFound(format!(
                "catalog has no resource at {url}"
            ))),
            status if !status.is_success() => Err(StoreError::FetchFailure(format!(
                "catalog responded with status {status} for {url}"
            ))),
            _ => response
                .json::<T>()
                .await
                .map_err(|e| StoreError::FetchFailure(format!("malformed catalog payload: {e}"))),
        }
    }
}

#[async_trait]
impl CatalogSource for HttpCatalogSource {
    async fn fetch_all(&self) -> Result<Vec<Product>> {
        self.get_json(format!("{}/products", self.base_url)).await
    }

    async fn fetch_by_id(&self, id: u32) -> Result<Product> {
        self.get_json(format!("{}/products/{id}", self.base_url))
            .await
    }
}

// == Unit Tests ==
#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_base_url_trailing_slash_is_trimmed() {
        let source =
            HttpCatalogSource::new("https://example.com/", Duration::from_secs(5)).unwrap();
        assert_eq!(source.base_url, "https://example.com");
    }

    #[tokio::test]
    async fn test_unreachable_host_is_fetch_failure() {
        // Reserved TEST-NET-1 address; connection refused or timed out either way.
        let source =
            HttpCatalogSource::new("http://192.0.2.1:9", Duration::from_millis(200)).unwrap();

        let result = source.fetch_all().await;
        assert!(matches!(result, Err(StoreError::FetchFailure(_))));
    }
}
