use axum::{extract::State, Json};
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::sync::Arc;

use crate::{
    models::Movie,
    routes::AppState,
    services::similarity::SimilarityMethod,
};

const PREVIEW_ROWS: usize = 5;

#[derive(Debug, Serialize)]
pub struct CatalogSummary {
    pub count: usize,
    pub method: SimilarityMethod,
    pub loaded_at: DateTime<Utc>,
    pub preview: Vec<Movie>,
}

/// Handler listing every selectable title in catalog order
pub async fn list_titles(State(state): State<Arc<AppState>>) -> Json<Vec<String>> {
    let titles = state
        .recommender
        .catalog()
        .titles()
        .map(str::to_string)
        .collect();
    Json(titles)
}

/// Handler describing the loaded catalog
pub async fn catalog_summary(State(state): State<Arc<AppState>>) -> Json<CatalogSummary> {
    let catalog = state.recommender.catalog();

    Json(CatalogSummary {
        count: catalog.len(),
        method: state.recommender.method(),
        loaded_at: catalog.loaded_at(),
        preview: catalog.preview(PREVIEW_ROWS).to_vec(),
    })
}
