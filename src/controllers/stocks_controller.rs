use axum::{
    extract::{rejection::QueryRejection, Query, State},
    Json,
};
use serde::Deserialize;

use crate::{error::ApiResult, models::StockView, services::stocks_service, AppState};

#[derive(Deserialize)]
pub struct RecommendationsQuery {
    pub user_id: i64,
}

#[derive(Deserialize)]
pub struct SearchQuery {
    pub query: Option<String>,
}

// GET /recommendations?user_id=
pub async fn get_recommendations(
    State(state): State<AppState>,
    query: Result<Query<RecommendationsQuery>, QueryRejection>,
) -> ApiResult<Json<Vec<StockView>>> {
    let Query(q) = query?;
    let stocks = stocks_service::recommendations(&state, q.user_id).await?;
    Ok(Json(stocks))
}

// GET /search?query=
pub async fn get_search(
    State(state): State<AppState>,
    query: Result<Query<SearchQuery>, QueryRejection>,
) -> ApiResult<Json<Vec<StockView>>> {
    let Query(q) = query?;
    let stocks = stocks_service::search(&state, q.query.as_deref().unwrap_or("")).await?;
    Ok(Json(stocks))
}
