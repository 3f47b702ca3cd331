//! Wire types for the recommendation/search collaborator.
//!
//! The collaborator's product shape is looser than [`Product`]: most fields
//! are optional and the image may arrive as `image` or `image_url`. Everything
//! is converted into [`Product`] at the boundary.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use shopfront_core::{Product, ProductId, UserId};

/// Product as returned by the collaborator.
#[derive(Debug, Clone, Deserialize)]
pub struct ApiProduct {
    pub id: ProductId,
    pub name: String,
    pub price: Decimal,
    #[serde(default, alias = "originalPrice")]
    pub original_price: Option<Decimal>,
    #[serde(default, alias = "image_url")]
    pub image: Option<String>,
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub brand: Option<String>,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default)]
    pub color: Option<String>,
    #[serde(default)]
    pub rating: Option<f64>,
    #[serde(default, alias = "isNew")]
    pub is_new: Option<bool>,
    #[serde(default)]
    pub discount: Option<Decimal>,
}

impl From<ApiProduct> for Product {
    fn from(api: ApiProduct) -> Self {
        Self {
            id: api.id,
            name: api.name,
            price: api.price,
            original_price: api.original_price,
            image: api.image.unwrap_or_default(),
            category: api.category.unwrap_or_else(|| "uncategorized".to_string()),
            description: api.description,
            brand: api.brand,
            tags: api.tags,
            color: api.color,
            rating: api.rating,
            is_new: api.is_new,
            discount: api.discount,
        }
    }
}

/// Raw `/recommendations` response.
#[derive(Debug, Deserialize)]
pub(super) struct ApiRecommendations {
    pub products: Vec<ApiProduct>,
    #[serde(default)]
    pub is_personalized: bool,
    #[serde(default)]
    pub user_id: Option<String>,
}

/// Recommendations for the current (or anonymous) user.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Recommendations {
    pub products: Vec<Product>,
    pub is_personalized: bool,
    pub user_id: Option<UserId>,
}

impl From<ApiRecommendations> for Recommendations {
    fn from(api: ApiRecommendations) -> Self {
        Self {
            products: api.products.into_iter().map(Product::from).collect(),
            is_personalized: api.is_personalized,
            user_id: api.user_id.map(UserId::new),
        }
    }
}

/// Parameters of a collaborator `/search` request. Unset fields are omitted
/// from the query string.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct SearchQuery {
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default)]
    pub brand: Option<String>,
    #[serde(default)]
    pub min_price: Option<Decimal>,
    #[serde(default)]
    pub max_price: Option<Decimal>,
    #[serde(default)]
    pub keywords: Option<String>,
}

impl SearchQuery {
    /// Non-blank `(name, value)` query parameters in wire order.
    #[must_use]
    pub fn params(&self) -> Vec<(&'static str, String)> {
        let text = |name, value: &Option<String>| {
            value
                .as_deref()
                .map(str::trim)
                .filter(|v| !v.is_empty())
                .map(|v| (name, v.to_string()))
        };
        let number = |name, value: &Option<Decimal>| value.map(|v| (name, v.normalize().to_string()));

        [
            text("category", &self.category),
            text("brand", &self.brand),
            number("min_price", &self.min_price),
            number("max_price", &self.max_price),
            text("keywords", &self.keywords),
        ]
        .into_iter()
        .flatten()
        .collect()
    }
}
