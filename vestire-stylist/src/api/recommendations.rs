//! Recommendation API handler
//!
//! POST /api/recommendations runs the full pipeline over the closet and saved
//! outfits supplied in the request body.

use axum::{
    extract::{rejection::JsonRejection, State},
    routing::post,
    Json, Router,
};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;
use vestire_common::{ClothingItem, Outfit, ScoredOutfit, Season};

use super::parse_mood;
use crate::error::{ApiError, ApiResult};
use crate::services::{self, RecommendationSource};
use crate::AppState;

/// POST /api/recommendations request
#[derive(Debug, Deserialize)]
pub struct RecommendationRequest {
    /// The user's closet
    pub items: Vec<ClothingItem>,
    /// Previously saved outfits
    #[serde(default)]
    pub outfits: Vec<Outfit>,
    /// Free-text style request
    #[serde(default)]
    pub query: Option<String>,
    #[serde(default)]
    pub mood: Option<String>,
    /// Named occasion, e.g. "wedding"
    #[serde(default)]
    pub occasion: Option<String>,
    /// Target season; "any" means no preference
    #[serde(default)]
    pub season: Option<Season>,
    /// Free-form preferences object forwarded to the generator
    #[serde(default)]
    pub preferences: Option<Value>,
}

/// POST /api/recommendations response
#[derive(Debug, Serialize)]
pub struct RecommendationResponse {
    pub success: bool,
    pub source: RecommendationSource,
    pub recommendations: Vec<Outfit>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub scored: Vec<ScoredOutfit>,
}

/// POST /api/recommendations
pub async fn recommend(
    State(state): State<AppState>,
    payload: Result<Json<RecommendationRequest>, JsonRejection>,
) -> ApiResult<Json<RecommendationResponse>> {
    let Json(request) = payload?;
    let mood = parse_mood(request.mood.as_deref())?;
    let query = request.query.as_deref().unwrap_or_default();

    tracing::info!(
        items = request.items.len(),
        outfits = request.outfits.len(),
        mood = ?mood,
        occasion = ?request.occasion,
        query = %query,
        "Recommendation requested"
    );

    let mut intent = services::extract_intent(query, mood);
    services::apply_request_hints(&mut intent, request.occasion.as_deref(), request.season);
    intent.preferences = preferences_map(request.preferences)?;
    let recommendation = state
        .orchestrator
        .recommend(&intent, &request.outfits, &request.items, mood)
        .await?;

    Ok(Json(RecommendationResponse {
        success: true,
        source: recommendation.source,
        recommendations: recommendation.outfits,
        scored: recommendation.scored,
    }))
}

/// Flatten a preferences object into display strings
fn preferences_map(preferences: Option<Value>) -> ApiResult<BTreeMap<String, String>> {
    match preferences {
        None | Some(Value::Null) => Ok(BTreeMap::new()),
        Some(Value::Object(map)) => Ok(map
            .into_iter()
            .map(|(key, value)| match value {
                Value::String(text) => (key, text),
                other => (key, other.to_string()),
            })
            .collect()),
        Some(_) => Err(ApiError::BadRequest(
            "preferences must be a JSON object".to_string(),
        )),
    }
}

/// Build recommendation routes
pub fn recommendation_routes() -> Router<AppState> {
    Router::new().route("/api/recommendations", post(recommend))
}
