//! Closet API handlers
//!
//! POST /api/closet/classify, POST /api/closet/apply-to-all

use axum::{extract::rejection::JsonRejection, routing::post, Json, Router};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use vestire_common::models::apply_category_and_season;
use vestire_common::{ClassifiedCloset, ClothingItem};

use crate::{error::ApiResult, services, AppState};

/// POST /api/closet/classify request
#[derive(Debug, Deserialize)]
pub struct ClassifyRequest {
    pub items: Vec<ClothingItem>,
}

/// POST /api/closet/classify response
#[derive(Debug, Serialize)]
pub struct ClassifyResponse {
    pub buckets: ClassifiedCloset,
    /// Ids of items that matched no bucket
    pub unclassified: Vec<String>,
}

/// POST /api/closet/apply-to-all request
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApplyToAllRequest {
    pub items: Vec<ClothingItem>,
    /// Index of the item whose category and season are copied
    #[serde(default)]
    pub template_index: usize,
}

/// POST /api/closet/apply-to-all response
#[derive(Debug, Serialize)]
pub struct ApplyToAllResponse {
    pub items: Vec<ClothingItem>,
}

/// POST /api/closet/classify
pub async fn classify_closet(
    payload: Result<Json<ClassifyRequest>, JsonRejection>,
) -> ApiResult<Json<ClassifyResponse>> {
    let Json(request) = payload?;
    let buckets = services::classify(&request.items);

    let classified: HashSet<&str> =
        buckets.flatten().into_iter().map(|i| i.id.as_str()).collect();
    let unclassified = request
        .items
        .iter()
        .filter(|item| !classified.contains(item.id.as_str()))
        .map(|item| item.id.clone())
        .collect();

    Ok(Json(ClassifyResponse {
        buckets,
        unclassified,
    }))
}

/// POST /api/closet/apply-to-all
///
/// Batch upload helper: every item takes the template's category and season.
pub async fn apply_to_all(
    payload: Result<Json<ApplyToAllRequest>, JsonRejection>,
) -> ApiResult<Json<ApplyToAllResponse>> {
    let Json(mut request) = payload?;
    apply_category_and_season(&mut request.items, request.template_index)?;

    tracing::debug!(
        items = request.items.len(),
        template_index = request.template_index,
        "Applied category and season to batch"
    );

    Ok(Json(ApplyToAllResponse {
        items: request.items,
    }))
}

/// Build closet routes
pub fn closet_routes() -> Router<AppState> {
    Router::new()
        .route("/api/closet/classify", post(classify_closet))
        .route("/api/closet/apply-to-all", post(apply_to_all))
}
