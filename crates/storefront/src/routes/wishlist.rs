//! Wishlist route handlers.

use axum::{
    Json,
    extract::{Path, State},
};
use serde::{Deserialize, Serialize};
use tracing::instrument;

use shopfront_core::{Product, ProductId};

use crate::error::{AppError, Result};
use crate::state::AppState;

/// Add to wishlist request body.
#[derive(Debug, Deserialize)]
pub struct AddToWishlistRequest {
    pub product_id: ProductId,
}

/// Membership of one product.
#[derive(Debug, Serialize)]
pub struct WishlistStatus {
    pub product_id: ProductId,
    pub in_wishlist: bool,
}

/// List saved products.
#[instrument(skip(state))]
pub async fn show(State(state): State<AppState>) -> Json<Vec<Product>> {
    let storefront = state.storefront().lock().await;
    Json(storefront.shop().state().wishlist.clone())
}

/// Save a catalog product. Saving twice keeps one entry.
///
/// # Errors
///
/// Returns `AppError::NotFound` if the product is not in the catalog.
#[instrument(skip(state))]
pub async fn add(
    State(state): State<AppState>,
    Json(body): Json<AddToWishlistRequest>,
) -> Result<Json<Vec<Product>>> {
    let product = state
        .catalog()
        .get(body.product_id)
        .cloned()
        .ok_or_else(|| AppError::NotFound(format!("product {}", body.product_id)))?;

    let mut storefront = state.storefront().lock().await;
    storefront.shop_mut().add_to_wishlist(product);
    Ok(Json(storefront.shop().state().wishlist.clone()))
}

/// Whether a product is saved.
#[instrument(skip(state))]
pub async fn contains(
    State(state): State<AppState>,
    Path(id): Path<ProductId>,
) -> Json<WishlistStatus> {
    let storefront = state.storefront().lock().await;
    Json(WishlistStatus {
        product_id: id,
        in_wishlist: storefront.shop().is_in_wishlist(id),
    })
}

/// Unsave a product.
#[instrument(skip(state))]
pub async fn remove(
    State(state): State<AppState>,
    Path(id): Path<ProductId>,
) -> Json<Vec<Product>> {
    let mut storefront = state.storefront().lock().await;
    storefront.shop_mut().remove_from_wishlist(id);
    Json(storefront.shop().state().wishlist.clone())
}
