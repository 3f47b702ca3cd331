//! Authentication route handlers.
//!
//! Login and register switch the shop state to the new identity before
//! responding; logout unloads it.

use axum::{Json, extract::State};
use serde::{Deserialize, Serialize};
use tracing::instrument;

use shopfront_core::Identity;

use crate::error::{Result, clear_sentry_user, set_sentry_user};
use crate::state::AppState;

/// Login request body.
#[derive(Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

/// Register request body.
#[derive(Deserialize)]
pub struct RegisterRequest {
    pub email: String,
    pub password: String,
    #[serde(default)]
    pub display_name: Option<String>,
}

/// Current session, `identity` is `null` when signed out.
#[derive(Debug, Serialize)]
pub struct SessionResponse {
    pub identity: Option<Identity>,
}

/// Get the signed-in identity.
#[instrument(skip(state))]
pub async fn me(State(state): State<AppState>) -> Json<SessionResponse> {
    let storefront = state.storefront().lock().await;
    Json(SessionResponse {
        identity: storefront.identity().cloned(),
    })
}

/// Handle login.
///
/// # Errors
///
/// Returns `AppError::Auth` for malformed emails or bad credentials.
#[instrument(skip(state, body), fields(email = %body.email))]
pub async fn login(
    State(state): State<AppState>,
    Json(body): Json<LoginRequest>,
) -> Result<Json<SessionResponse>> {
    let identity = state
        .storefront()
        .lock()
        .await
        .login(&body.email, &body.password)?;

    set_sentry_user(&identity.id, Some(identity.email.as_str()));
    Ok(Json(SessionResponse {
        identity: Some(identity),
    }))
}

/// Handle registration.
///
/// # Errors
///
/// Returns `AppError::Auth` for malformed emails or taken accounts.
#[instrument(skip(state, body), fields(email = %body.email))]
pub async fn register(
    State(state): State<AppState>,
    Json(body): Json<RegisterRequest>,
) -> Result<Json<SessionResponse>> {
    let identity = state.storefront().lock().await.register(
        &body.email,
        &body.password,
        body.display_name,
    )?;

    set_sentry_user(&identity.id, Some(identity.email.as_str()));
    Ok(Json(SessionResponse {
        identity: Some(identity),
    }))
}

/// Handle logout.
#[instrument(skip(state))]
pub async fn logout(State(state): State<AppState>) -> Json<SessionResponse> {
    state.storefront().lock().await.logout();
    clear_sentry_user();
    Json(SessionResponse { identity: None })
}
