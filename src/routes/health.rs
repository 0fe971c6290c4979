use axum::{http::StatusCode, response::IntoResponse, Json};
use serde_json::json;

use crate::dto::MessageResponse;

#[utoipa::path(
    get,
    path = "/",
    responses((status = 200, description = "Service banner", body = MessageResponse)),
    tag = "health"
)]
#[axum::debug_handler]
pub async fn root() -> impl IntoResponse {
    Json(MessageResponse::new("Welcome to MCQ Test Application API"))
}

#[utoipa::path(
    get,
    path = "/health",
    responses((status = 200, description = "Service is up")),
    tag = "health"
)]
#[axum::debug_handler]
pub async fn health() -> impl IntoResponse {
    let body = json!({
        "status": "ok",
    });
    (StatusCode::OK, Json(body))
}
