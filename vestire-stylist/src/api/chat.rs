//! Style chat API
//!
//! POST /api/chat answers one message of a conversation with stylist advice.
//! The client keeps the history and sends it back with every message.

use axum::{extract::rejection::JsonRejection, routing::post, Json, Router};
use rand::rngs::StdRng;
use rand::SeedableRng;
use serde::{Deserialize, Serialize};

use super::parse_mood;
use crate::error::{ApiError, ApiResult};
use crate::services::{self, ChatMessage};
use crate::AppState;

/// POST /api/chat request
#[derive(Debug, Deserialize)]
pub struct ChatRequest {
    #[serde(default)]
    pub message: String,
    #[serde(default)]
    pub mood: Option<String>,
    /// Earlier turns, oldest first
    #[serde(default)]
    pub history: Vec<ChatMessage>,
}

/// POST /api/chat response
#[derive(Debug, Serialize)]
pub struct ChatResponse {
    pub message: String,
}

/// POST /api/chat
pub async fn chat(
    payload: Result<Json<ChatRequest>, JsonRejection>,
) -> ApiResult<Json<ChatResponse>> {
    let Json(request) = payload?;
    if request.message.trim().is_empty() {
        return Err(ApiError::BadRequest("Message is required".to_string()));
    }
    let mood = parse_mood(request.mood.as_deref())?;

    tracing::debug!(history = request.history.len(), mood = ?mood, "Chat message received");

    let mut rng = StdRng::from_entropy();
    let message = services::advise(&request.message, mood, &request.history, &mut rng);

    Ok(Json(ChatResponse { message }))
}

/// Build chat routes
pub fn chat_routes() -> Router<AppState> {
    Router::new().route("/api/chat", post(chat))
}
