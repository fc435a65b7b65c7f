//! Intent inspection API
//!
//! POST /api/intent shows how a request would be read without touching any
//! closet data.

use axum::{extract::rejection::JsonRejection, routing::post, Json, Router};
use serde::{Deserialize, Serialize};
use vestire_common::StyleIntent;

use super::parse_mood;
use crate::{error::ApiResult, services, AppState};

/// POST /api/intent request
#[derive(Debug, Deserialize)]
pub struct IntentRequest {
    #[serde(default)]
    pub text: String,
    /// Explicit mood; overrides any mood found in the text
    #[serde(default)]
    pub mood: Option<String>,
}

/// POST /api/intent response
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct IntentResponse {
    #[serde(flatten)]
    pub intent: StyleIntent,
    /// Occasion that would accompany a generator request
    pub request_occasion: Option<&'static str>,
}

/// POST /api/intent
pub async fn extract_intent(
    payload: Result<Json<IntentRequest>, JsonRejection>,
) -> ApiResult<Json<IntentResponse>> {
    let Json(request) = payload?;
    let mood = parse_mood(request.mood.as_deref())?;

    let intent = services::extract_intent(&request.text, mood);
    tracing::debug!(?intent, "Extracted style intent");

    Ok(Json(IntentResponse {
        request_occasion: services::detect_request_occasion(&request.text),
        intent,
    }))
}

/// Build intent routes
pub fn intent_routes() -> Router<AppState> {
    Router::new().route("/api/intent", post(extract_intent))
}
