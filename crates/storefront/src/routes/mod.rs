//! HTTP route handlers for storefront.
//!
//! # Route Structure
//!
//! ```text
//! GET    /health                 - Health check
//!
//! # Auth
//! GET    /api/auth/me            - Current identity (or null)
//! POST   /api/auth/login         - Log in
//! POST   /api/auth/register      - Register
//! POST   /api/auth/logout        - Log out
//!
//! # Cart
//! GET    /api/cart               - Cart lines and totals
//! DELETE /api/cart               - Empty the cart
//! POST   /api/cart/items         - Add one unit of a product
//! PATCH  /api/cart/items/{id}    - Set a line's quantity (<= 0 removes)
//! DELETE /api/cart/items/{id}    - Remove a line
//!
//! # Wishlist
//! GET    /api/wishlist           - Saved products
//! POST   /api/wishlist           - Save a product
//! GET    /api/wishlist/{id}      - Whether a product is saved
//! DELETE /api/wishlist/{id}      - Unsave a product
//!
//! # Catalog
//! GET    /api/products           - Filter the local catalog (?q=&category=)
//! GET    /api/products/{id}      - Product detail
//!
//! # Assistant
//! POST   /api/chat               - Scripted chat reply
//!
//! # Collaborator
//! GET    /api/recommendations    - Recommendations for the current identity
//! GET    /api/search             - Server-side product search
//! ```

pub mod auth;
pub mod cart;
pub mod chat;
pub mod collaborator;
pub mod products;
pub mod wishlist;

use axum::{
    Json, Router,
    routing::{get, patch, post},
};
use serde_json::{Value, json};

use crate::middleware::request_id_middleware;
use crate::state::AppState;

/// Create the auth routes router.
pub fn auth_routes() -> Router<AppState> {
    Router::new()
        .route("/me", get(auth::me))
        .route("/login", post(auth::login))
        .route("/register", post(auth::register))
        .route("/logout", post(auth::logout))
}

/// Create the cart routes router.
pub fn cart_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(cart::show).delete(cart::clear))
        .route("/items", post(cart::add))
        .route("/items/{id}", patch(cart::update).delete(cart::remove))
}

/// Create the wishlist routes router.
pub fn wishlist_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(wishlist::show).post(wishlist::add))
        .route("/{id}", get(wishlist::contains).delete(wishlist::remove))
}

/// Create the product routes router.
pub fn product_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(products::index))
        .route("/{id}", get(products::show))
}

/// Create all API routes.
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .nest("/auth", auth_routes())
        .nest("/cart", cart_routes())
        .nest("/wishlist", wishlist_routes())
        .nest("/products", product_routes())
        .route("/chat", post(chat::send))
        .route("/recommendations", get(collaborator::recommendations))
        .route("/search", get(collaborator::search))
}

/// Create all routes for the storefront.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/health", get(health))
        .nest("/api", api_routes())
}

/// Build the application router with state and per-request middleware.
///
/// Tracing, CORS and Sentry layers are added by the binary.
pub fn app(state: AppState) -> Router {
    routes()
        .layer(axum::middleware::from_fn(request_id_middleware))
        .with_state(state)
}

/// Health check endpoint.
async fn health() -> Json<Value> {
    Json(json!({ "status": "ok" }))
}
