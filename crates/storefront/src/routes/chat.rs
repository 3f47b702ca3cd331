//! Chat assistant route handler.

use axum::{Json, extract::State};
use serde::{Deserialize, Serialize};
use tracing::instrument;

use crate::error::{AppError, Result};
use crate::state::AppState;

/// Chat request body.
#[derive(Debug, Deserialize)]
pub struct ChatRequest {
    pub message: String,
}

/// Chat response body.
#[derive(Debug, Serialize)]
pub struct ChatResponse {
    pub reply: String,
}

/// Answer a chat message after the configured typing delay.
///
/// # Errors
///
/// Returns `AppError::BadRequest` for blank messages.
#[instrument(skip(state, body))]
pub async fn send(
    State(state): State<AppState>,
    Json(body): Json<ChatRequest>,
) -> Result<Json<ChatResponse>> {
    if body.message.trim().is_empty() {
        return Err(AppError::BadRequest("message must not be empty".to_string()));
    }

    let reply = state.chat().reply(&body.message);

    let delay = state.config().chat_delay;
    if !delay.is_zero() {
        tokio::time::sleep(delay).await;
    }

    Ok(Json(ChatResponse { reply }))
}
