use axum::{
    extract::{Query, State},
    http::StatusCode,
    Extension, Json,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

use crate::{
    error::{AppError, AppResult},
    middleware::request_id::RequestId,
    models::Recommendation,
    routes::AppState,
    services::recommendations,
};

/// Upper bound on `top_n` accepted from clients
pub const MAX_TOP_N: usize = 50;

const NO_RECOMMENDATIONS: &str = "No recommendations found.";

#[derive(Debug, Deserialize)]
pub struct RecommendationQuery {
    pub title: String,
    pub top_n: Option<usize>,
}

#[derive(Debug, Serialize)]
pub struct RecommendationResponse {
    pub title: String,
    pub found: bool,
    pub recommendations: Vec<Recommendation>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl RecommendationResponse {
    fn found(title: String, recommendations: Vec<Recommendation>) -> Self {
        let message = recommendations
            .is_empty()
            .then(|| NO_RECOMMENDATIONS.to_string());
        Self {
            title,
            found: true,
            recommendations,
            message,
        }
    }

    fn not_found(title: String) -> Self {
        let message = format!("'{}' is not in the catalog. {}", title, NO_RECOMMENDATIONS);
        Self {
            title,
            found: false,
            recommendations: Vec::new(),
            message: Some(message),
        }
    }
}

/// Handler for recommendations endpoint
///
/// An unknown title answers 404 with an empty recommendation list.
pub async fn recommend(
    State(state): State<Arc<AppState>>,
    Extension(request_id): Extension<RequestId>,
    Query(query): Query<RecommendationQuery>,
) -> AppResult<(StatusCode, Json<RecommendationResponse>)> {
    let top_n = query.top_n.unwrap_or(state.default_top_n);
    if top_n > MAX_TOP_N {
        return Err(AppError::InvalidInput(format!(
            "top_n must be at most {}",
            MAX_TOP_N
        )));
    }

    tracing::info!(
        request_id = %request_id,
        title = %query.title,
        top_n,
        "Processing recommendation request"
    );

    match recommendations::get_recommendations(
        &state.recommender,
        &state.posters,
        &query.title,
        top_n,
    )
    .await
    {
        Ok(recommendations) => Ok((
            StatusCode::OK,
            Json(RecommendationResponse::found(query.title, recommendations)),
        )),
        Err(AppError::NotFound(_)) => Ok((
            StatusCode::NOT_FOUND,
            Json(RecommendationResponse::not_found(query.title)),
        )),
        Err(e) => Err(e),
    }
}
