use axum::{
    extract::State,
    http::{header, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;

use crate::{error::ApiError, AppState};

pub async fn not_found() -> impl IntoResponse {
    ApiError::NotFound("Not found".into())
}

// axum answers a known path with the wrong method with a bare 405
pub async fn json_method_not_allowed(res: Response) -> Response {
    if res.status() != StatusCode::METHOD_NOT_ALLOWED {
        return res;
    }

    let allow = res.headers().get(header::ALLOW).cloned();
    let mut out = ApiError::MethodNotAllowed("Method not allowed".into()).into_response();
    if let Some(allow) = allow {
        out.headers_mut().insert(header::ALLOW, allow);
    }
    out
}

pub async fn health() -> impl IntoResponse {
    (StatusCode::OK, "ok")
}

pub async fn health_db(State(state): State<AppState>) -> impl IntoResponse {
    let backend = state.store.backend_name();
    match state.store.ping().await {
        Ok(()) => (StatusCode::OK, Json(json!({ "store": backend, "status": "ok" }))).into_response(),
        Err(e) => (
            StatusCode::SERVICE_UNAVAILABLE,
            Json(json!({ "store": backend, "message": e.to_string() })),
        )
            .into_response(),
    }
}
