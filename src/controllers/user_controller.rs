use axum::{
    extract::{
        rejection::{JsonRejection, PathRejection},
        Path, State,
    },
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use serde::{Deserialize, Serialize};
use serde_json::json;

use crate::{error::ApiResult, services::user_service, AppState};

#[derive(Deserialize)]
pub struct CreateUserRequest {
    pub email: String,
    pub password: String,
}

#[derive(Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateUserResponse {
    pub message: String,
    pub user_id: i64,
}

#[derive(Deserialize)]
pub struct InterestsRequest {
    pub interests: Vec<String>,
}

#[derive(Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InterestsResponse {
    pub user_id: i64,
    pub interests: Vec<String>,
}

// POST /
pub async fn create_user(
    State(state): State<AppState>,
    payload: Result<Json<CreateUserRequest>, JsonRejection>,
) -> ApiResult<impl IntoResponse> {
    let Json(req) = payload?;

    let user_id = user_service::create_user(&state, &req.email, &req.password).await?;

    Ok((
        StatusCode::CREATED,
        Json(CreateUserResponse {
            message: "User created successfully".to_string(),
            user_id,
        }),
    ))
}

// POST /:user_id/interests
pub async fn create_interests(
    State(state): State<AppState>,
    path: Result<Path<i64>, PathRejection>,
    payload: Result<Json<InterestsRequest>, JsonRejection>,
) -> ApiResult<impl IntoResponse> {
    let Path(user_id) = path?;
    let Json(req) = payload?;

    user_service::add_interests(&state, user_id, &req.interests).await?;

    Ok(Json(json!({ "message": "Interests added successfully" })))
}

// PUT /:user_id/interests
pub async fn update_interests(
    State(state): State<AppState>,
    path: Result<Path<i64>, PathRejection>,
    payload: Result<Json<InterestsRequest>, JsonRejection>,
) -> ApiResult<impl IntoResponse> {
    let Path(user_id) = path?;
    let Json(req) = payload?;

    user_service::replace_interests(&state, user_id, &req.interests).await?;

    Ok(Json(json!({ "message": "Interests updated successfully" })))
}

// GET /:user_id/interests
pub async fn get_interests(
    State(state): State<AppState>,
    path: Result<Path<i64>, PathRejection>,
) -> ApiResult<impl IntoResponse> {
    let Path(user_id) = path?;

    let interests = user_service::get_interests(&state, user_id).await?;

    Ok(Json(InterestsResponse {
        user_id,
        interests: interests.into_iter().collect(),
    }))
}

// DELETE /:user_id/interests
pub async fn clear_interests(
    State(state): State<AppState>,
    path: Result<Path<i64>, PathRejection>,
) -> ApiResult<impl IntoResponse> {
    let Path(user_id) = path?;

    user_service::clear_interests(&state, user_id).await?;

    Ok(Json(json!({ "message": "Interests cleared successfully" })))
}
