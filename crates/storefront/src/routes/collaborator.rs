//! Recommendation and search handlers proxied to the collaborator.
//!
//! Concurrent requests of the same kind race; only the most recently started
//! one is answered with data; older ones that finish later get
//! `AppError::Superseded`.

use axum::{
    Json,
    extract::{Query, State},
};
use serde::Deserialize;
use tracing::instrument;

use shopfront_core::Product;

use crate::collaborator::{Recommendations, SearchQuery};
use crate::error::{AppError, Result};
use crate::state::AppState;

/// Default number of recommendations.
pub const DEFAULT_LIMIT: u32 = 8;

/// Upper bound on requested recommendations.
pub const MAX_LIMIT: u32 = 50;

/// Query parameters for recommendations.
#[derive(Debug, Deserialize)]
pub struct RecommendationsQuery {
    pub limit: Option<u32>,
}

/// Recommendations for the signed-in identity, or anonymous ones.
///
/// # Errors
///
/// Returns `AppError::BadRequest` for a zero limit, `AppError::Collaborator`
/// if the fetch fails, and `AppError::Superseded` if a newer request started.
#[instrument(skip(state))]
pub async fn recommendations(
    State(state): State<AppState>,
    Query(query): Query<RecommendationsQuery>,
) -> Result<Json<Recommendations>> {
    let limit = query.limit.unwrap_or(DEFAULT_LIMIT);
    if limit == 0 {
        return Err(AppError::BadRequest("limit must be at least 1".to_string()));
    }
    let limit = limit.min(MAX_LIMIT);

    let user_id = state
        .storefront()
        .lock()
        .await
        .identity()
        .map(|identity| identity.id.clone());

    let slot = state.recommendations();
    let ticket = slot.begin();
    let result = state
        .collaborator()
        .get_recommendations(user_id.as_ref(), limit)
        .await?;

    if slot.complete(ticket, result.clone()) {
        Ok(Json(result))
    } else {
        Err(AppError::Superseded)
    }
}

/// Server-side search.
///
/// # Errors
///
/// Returns `AppError::Collaborator` if the fetch fails and
/// `AppError::Superseded` if a newer search started.
#[instrument(skip(state))]
pub async fn search(
    State(state): State<AppState>,
    Query(query): Query<SearchQuery>,
) -> Result<Json<Vec<Product>>> {
    if let (Some(min), Some(max)) = (query.min_price, query.max_price)
        && min > max
    {
        return Err(AppError::BadRequest(
            "min_price must not exceed max_price".to_string(),
        ));
    }

    let slot = state.search_results();
    let ticket = slot.begin();
    let products = state.collaborator().search(&query).await?;

    if slot.complete(ticket, products.clone()) {
        Ok(Json(products))
    } else {
        Err(AppError::Superseded)
    }
}
