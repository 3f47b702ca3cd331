//! Product route handlers backed by the local catalog.

use axum::{
    Json,
    extract::{Path, Query, State},
};
use serde::{Deserialize, Serialize};
use tracing::instrument;

use shopfront_core::{Product, ProductId};

use crate::catalog::SearchFilter;
use crate::error::{AppError, Result};
use crate::state::AppState;

/// Query parameters for the product listing.
#[derive(Debug, Default, Deserialize)]
pub struct ProductsQuery {
    /// Free-text query; blank matches everything.
    #[serde(default)]
    pub q: String,
    /// Exact category; blank means all categories.
    pub category: Option<String>,
}

/// Filtered product listing.
#[derive(Debug, Serialize)]
pub struct ProductListing {
    pub products: Vec<Product>,
    pub categories: Vec<String>,
    pub total: usize,
}

/// Filter the catalog.
#[instrument(skip(state))]
pub async fn index(
    State(state): State<AppState>,
    Query(query): Query<ProductsQuery>,
) -> Json<ProductListing> {
    let catalog = state.catalog();
    let filter = SearchFilter::new(&query.q, query.category.as_deref());
    let products: Vec<Product> = catalog.search(&filter).into_iter().cloned().collect();

    Json(ProductListing {
        total: products.len(),
        products,
        categories: catalog.categories().into_iter().map(String::from).collect(),
    })
}

/// Product detail.
///
/// # Errors
///
/// Returns `AppError::NotFound` if the product is not in the catalog.
#[instrument(skip(state))]
pub async fn show(State(state): State<AppState>, Path(id): Path<ProductId>) -> Result<Json<Product>> {
    state
        .catalog()
        .get(id)
        .cloned()
        .map(Json)
        .ok_or_else(|| AppError::NotFound(format!("product {id}")))
}
