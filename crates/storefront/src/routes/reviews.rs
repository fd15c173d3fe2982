//! Product review route handlers.

use axum::{
    Json,
    extract::{Path, State},
};
use serde::Deserialize;
use serde_json::json;
use tracing::instrument;

use voltlane_core::Rating;

use crate::error::{AppError, Result};
use crate::reviews::NewReview;
use crate::state::AppState;

/// Review submission body.
#[derive(Debug, Deserialize)]
pub struct SubmitReviewRequest {
    pub user_name: String,
    pub rating: u8,
    pub comment: String,
}

/// List a product's reviews with the aggregated rating.
#[instrument(skip(state))]
pub async fn index(
    State(state): State<AppState>,
    Path(product_id): Path<String>,
) -> Json<serde_json::Value> {
    let reviews = state.reviews().by_product(&product_id);
    let summary = state.reviews().summary(&product_id);

    Json(json!({
        "success": true,
        "reviews": reviews,
        "average": summary.average,
        "count": summary.count,
    }))
}

/// Submit a review for a product.
///
/// The rating range is validated before the review is stored; submitted
/// reviews always start unverified.
#[instrument(skip(state, request), fields(product_id = %product_id))]
pub async fn create(
    State(state): State<AppState>,
    Path(product_id): Path<String>,
    Json(request): Json<SubmitReviewRequest>,
) -> Result<Json<serde_json::Value>> {
    let rating =
        Rating::new(request.rating).map_err(|e| AppError::Validation(e.to_string()))?;

    let user_name = request.user_name.trim();
    if user_name.is_empty() {
        return Err(AppError::Validation("Name is required".to_string()));
    }

    let review = state.reviews().add(NewReview {
        product_id,
        user_name: user_name.to_string(),
        rating,
        comment: request.comment.trim().to_string(),
    });

    Ok(Json(json!({ "success": true, "review": review })))
}
