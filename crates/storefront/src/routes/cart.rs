//! Cart route handlers.
//!
//! Every handler answers with the full cart so clients never need a second
//! round trip after a mutation.

use axum::{
    Json,
    extract::{Path, State},
};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::instrument;

use shopfront_core::{CartItem, ProductId, ShopState, format_price};

use crate::error::{AppError, Result};
use crate::state::AppState;

/// Cart display data.
#[derive(Debug, Serialize)]
pub struct CartView {
    pub items: Vec<CartItem>,
    pub total: Decimal,
    pub total_display: String,
    pub item_count: u64,
}

impl From<&ShopState> for CartView {
    fn from(state: &ShopState) -> Self {
        let total = state.cart_total();
        Self {
            items: state.cart.clone(),
            total,
            total_display: format_price(total),
            item_count: state.cart_items_count(),
        }
    }
}

/// Add to cart request body.
#[derive(Debug, Deserialize)]
pub struct AddToCartRequest {
    pub product_id: ProductId,
}

/// Update quantity request body.
#[derive(Debug, Deserialize)]
pub struct UpdateQuantityRequest {
    pub quantity: i64,
}

/// Show the cart.
#[instrument(skip(state))]
pub async fn show(State(state): State<AppState>) -> Json<CartView> {
    let storefront = state.storefront().lock().await;
    Json(CartView::from(storefront.shop().state()))
}

/// Add one unit of a catalog product.
///
/// # Errors
///
/// Returns `AppError::NotFound` if the product is not in the catalog.
#[instrument(skip(state))]
pub async fn add(
    State(state): State<AppState>,
    Json(body): Json<AddToCartRequest>,
) -> Result<Json<CartView>> {
    let product = state
        .catalog()
        .get(body.product_id)
        .cloned()
        .ok_or_else(|| AppError::NotFound(format!("product {}", body.product_id)))?;

    let mut storefront = state.storefront().lock().await;
    storefront.shop_mut().add_to_cart(product);
    Ok(Json(CartView::from(storefront.shop().state())))
}

/// Set a line's quantity. Unknown ids leave the cart unchanged.
#[instrument(skip(state))]
pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<ProductId>,
    Json(body): Json<UpdateQuantityRequest>,
) -> Json<CartView> {
    let mut storefront = state.storefront().lock().await;
    storefront.shop_mut().update_quantity(id, body.quantity);
    Json(CartView::from(storefront.shop().state()))
}

/// Remove a line.
#[instrument(skip(state))]
pub async fn remove(State(state): State<AppState>, Path(id): Path<ProductId>) -> Json<CartView> {
    let mut storefront = state.storefront().lock().await;
    storefront.shop_mut().remove_from_cart(id);
    Json(CartView::from(storefront.shop().state()))
}

/// Empty the cart.
#[instrument(skip(state))]
pub async fn clear(State(state): State<AppState>) -> Json<CartView> {
    let mut storefront = state.storefront().lock().await;
    storefront.shop_mut().clear_cart();
    Json(CartView::from(storefront.shop().state()))
}
