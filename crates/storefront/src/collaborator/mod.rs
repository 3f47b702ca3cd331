//! Client for the external recommendation/search collaborator.
//!
//! # Endpoints
//!
//! ```text
//! GET /recommendations?user_id=<id>&limit=<n>  -> {products, is_personalized, user_id}
//! GET /products                                -> [product]
//! GET /products/{id}                           -> product
//! GET /search?category=&brand=&min_price=&max_price=&keywords= -> [product]
//! ```
//!
//! Product listings and details are cached in memory via `moka`;
//! recommendations and search results are always fetched fresh. There is no
//! retry: a failed request surfaces as [`CollaboratorError`] and the caller
//! decides what to show.

mod cache;
mod sequence;
mod types;

use std::sync::Arc;
use std::time::Duration;

use moka::future::Cache;
use serde::de::DeserializeOwned;
use thiserror::Error;
use tracing::{debug, instrument};
use url::Url;

use shopfront_core::{Product, ProductId, UserId};

use crate::config::CollaboratorConfig;

use cache::{CacheKey, CacheValue};
use types::ApiRecommendations;

pub use sequence::{SequencedSlot, Ticket};
pub use types::{ApiProduct, Recommendations, SearchQuery};

/// Errors that can occur when calling the collaborator.
#[derive(Debug, Error)]
pub enum CollaboratorError {
    /// HTTP request failed.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Non-success status code.
    #[error("HTTP {status}: {body}")]
    Status { status: u16, body: String },

    /// JSON parsing failed.
    #[error("JSON parse error: {0}")]
    Parse(#[from] serde_json::Error),

    /// Resource not found.
    #[error("Not found: {0}")]
    NotFound(String),

    /// Request URL could not be built.
    #[error("Invalid URL: {0}")]
    Url(#[from] url::ParseError),
}

/// Client for the recommendation/search collaborator.
#[derive(Clone)]
pub struct CollaboratorClient {
    inner: Arc<CollaboratorClientInner>,
}

struct CollaboratorClientInner {
    client: reqwest::Client,
    base_url: Url,
    cache: Cache<CacheKey, CacheValue>,
}

impl CollaboratorClient {
    /// Create a new collaborator client.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be built.
    pub fn new(config: &CollaboratorConfig) -> Result<Self, CollaboratorError> {
        let client = reqwest::Client::builder()
            .timeout(config.timeout)
            .build()?;

        let cache = Cache::builder()
            .max_capacity(1000)
            .time_to_live(config.cache_ttl)
            .build();

        Ok(Self {
            inner: Arc::new(CollaboratorClientInner {
                client,
                base_url: config.base_url.clone(),
                cache,
            }),
        })
    }

    #[must_use]
    pub fn base_url(&self) -> &Url {
        &self.inner.base_url
    }

    /// Build `<base>/<path>?<params>`.
    fn endpoint(&self, path: &str, params: &[(&str, String)]) -> Result<Url, CollaboratorError> {
        let mut base = self.inner.base_url.clone();
        if !base.path().ends_with('/') {
            let with_slash = format!("{}/", base.path());
            base.set_path(&with_slash);
        }
        let mut url = base.join(path.trim_start_matches('/'))?;
        if !params.is_empty() {
            url.query_pairs_mut()
                .extend_pairs(params.iter().map(|(k, v)| (*k, v.as_str())));
        }
        Ok(url)
    }

    /// GET a URL and decode the JSON body.
    async fn get_json<T: DeserializeOwned>(&self, url: Url) -> Result<T, CollaboratorError> {
        debug!(%url, "Collaborator request");
        let response = self.inner.client.get(url.clone()).send().await?;
        let status = response.status();

        if status == reqwest::StatusCode::NOT_FOUND {
            return Err(CollaboratorError::NotFound(url.path().to_string()));
        }

        let body = response.text().await?;

        if !status.is_success() {
            tracing::error!(
                status = %status,
                body = %body.chars().take(500).collect::<String>(),
                "Collaborator returned non-success status"
            );
            return Err(CollaboratorError::Status {
                status: status.as_u16(),
                body: body.chars().take(200).collect(),
            });
        }

        serde_json::from_str(&body).map_err(|e| {
            tracing::error!(
                error = %e,
                body = %body.chars().take(500).collect::<String>(),
                "Failed to parse collaborator response"
            );
            CollaboratorError::Parse(e)
        })
    }

    /// Recommendations for `user_id` (or anonymous ones).
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the response does not parse.
    #[instrument(skip(self))]
    pub async fn get_recommendations(
        &self,
        user_id: Option<&UserId>,
        limit: u32,
    ) -> Result<Recommendations, CollaboratorError> {
        let mut params = Vec::with_capacity(2);
        if let Some(user_id) = user_id {
            params.push(("user_id", user_id.to_string()));
        }
        params.push(("limit", limit.to_string()));

        let url = self.endpoint("recommendations", &params)?;
        let data: ApiRecommendations = self.get_json(url).await?;
        Ok(data.into())
    }

    /// All products known to the collaborator.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the response does not parse.
    #[instrument(skip(self))]
    pub async fn get_products(&self) -> Result<Vec<Product>, CollaboratorError> {
        if let Some(CacheValue::Products(products)) =
            self.inner.cache.get(&CacheKey::Products).await
        {
            debug!("Cache hit for products");
            return Ok(products);
        }

        let url = self.endpoint("products", &[])?;
        let data: Vec<ApiProduct> = self.get_json(url).await?;
        let products: Vec<Product> = data.into_iter().map(Product::from).collect();

        self.inner
            .cache
            .insert(CacheKey::Products, CacheValue::Products(products.clone()))
            .await;

        Ok(products)
    }

    /// One product by id.
    ///
    /// # Errors
    ///
    /// Returns `CollaboratorError::NotFound` for unknown ids, or an error if
    /// the request fails.
    #[instrument(skip(self), fields(product_id = %id))]
    pub async fn get_product(&self, id: ProductId) -> Result<Product, CollaboratorError> {
        let cache_key = CacheKey::Product(id);

        if let Some(CacheValue::Product(product)) = self.inner.cache.get(&cache_key).await {
            debug!("Cache hit for product");
            return Ok(*product);
        }

        let url = self.endpoint(&format!("products/{id}"), &[])?;
        let data: ApiProduct = self.get_json(url).await?;
        let product = Product::from(data);

        self.inner
            .cache
            .insert(cache_key, CacheValue::Product(Box::new(product.clone())))
            .await;

        Ok(product)
    }

    /// Server-side product search.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the response does not parse.
    #[instrument(skip(self))]
    pub async fn search(&self, query: &SearchQuery) -> Result<Vec<Product>, CollaboratorError> {
        let url = self.endpoint("search", &query.params())?;
        let data: Vec<ApiProduct> = self.get_json(url).await?;
        Ok(data.into_iter().map(Product::from).collect())
    }

    /// Drop every cached product response.
    pub fn invalidate_cache(&self) {
        self.inner.cache.invalidate_all();
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn client(base: &str) -> CollaboratorClient {
        CollaboratorClient::new(&CollaboratorConfig {
            base_url: Url::parse(base).unwrap(),
            timeout: Duration::from_secs(1),
            cache_ttl: Duration::from_secs(60),
        })
        .unwrap()
    }

    #[test]
    fn test_endpoint_joins_paths() {
        let c = client("http://localhost:8000");
        assert_eq!(
            c.endpoint("products/3", &[]).unwrap().as_str(),
            "http://localhost:8000/products/3"
        );

        let c = client("http://api.example.com/v1");
        assert_eq!(
            c.endpoint("recommendations", &[("user_id", "u 1".to_string()), ("limit", "5".to_string())])
                .unwrap()
                .as_str(),
            "http://api.example.com/v1/recommendations?user_id=u+1&limit=5"
        );
    }

    #[test]
    fn test_search_endpoint_omits_unset_params() {
        let c = client("http://localhost:8000/");
        let query = SearchQuery {
            keywords: Some("lamp".to_string()),
            ..SearchQuery::default()
        };
        assert_eq!(
            c.endpoint("search", &query.params()).unwrap().as_str(),
            "http://localhost:8000/search?keywords=lamp"
        );
    }

    #[tokio::test]
    async fn test_unreachable_collaborator_is_an_error() {
        // Port 9 (discard) on localhost is not expected to serve HTTP.
        let c = client("http://127.0.0.1:9");
        assert!(c.get_products().await.is_err());
    }

    #[test]
    fn test_error_display() {
        let err = CollaboratorError::Status {
            status: 503,
            body: "down".to_string(),
        };
        assert_eq!(err.to_string(), "HTTP 503: down");
    }
}
