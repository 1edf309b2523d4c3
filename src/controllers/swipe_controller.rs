use axum::{
    extract::{rejection::JsonRejection, State},
    Json,
};
use serde::Deserialize;
use serde_json::{json, Value};

use crate::{error::ApiResult, services::swipe_service, AppState};

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SwipeRequest {
    pub user_id: i64,
    pub stock_id: i64,
    // validated in the service so bad values get a readable message
    pub swipe_type: String,
}

// POST /swipe
pub async fn post_swipe(
    State(state): State<AppState>,
    payload: Result<Json<SwipeRequest>, JsonRejection>,
) -> ApiResult<Json<Value>> {
    let Json(req) = payload?;

    swipe_service::record_swipe(&state, req.user_id, req.stock_id, &req.swipe_type).await?;

    Ok(Json(json!({ "message": "Swipe recorded successfully" })))
}
