use axum::{extract::State, response::IntoResponse, Json};
use validator::Validate;

use crate::dto::auth_dto::{LoginQuery, LoginRequest, TokenResponse};
use crate::error::Result;
use crate::extract::{ApiJson, ApiQuery};
use crate::AppState;

#[utoipa::path(
    post,
    path = "/admin/login",
    params(LoginQuery),
    request_body(content = LoginRequest, description = "Credentials, or pass them as query parameters"),
    responses(
        (status = 200, description = "Admin authenticated", body = TokenResponse),
        (status = 400, description = "Missing credentials"),
        (status = 401, description = "Incorrect username or password"),
    ),
    tag = "auth"
)]
#[axum::debug_handler]
pub async fn admin_login(
    State(state): State<AppState>,
    ApiQuery(query): ApiQuery<LoginQuery>,
    body: Option<ApiJson<LoginRequest>>,
) -> Result<impl IntoResponse> {
    let creds = LoginRequest::from_body_or_query(body.map(|ApiJson(b)| b), query)?;
    creds.validate()?;
    let token = state
        .auth_service
        .login_admin(&creds.username, &creds.password)
        .await?;
    Ok(Json(TokenResponse::bearer(token)))
}

#[utoipa::path(
    post,
    path = "/teacher/login",
    params(LoginQuery),
    request_body(content = LoginRequest, description = "Credentials, or pass them as query parameters"),
    responses(
        (status = 200, description = "Teacher authenticated", body = TokenResponse),
        (status = 400, description = "Missing credentials"),
        (status = 401, description = "Incorrect username or password"),
    ),
    tag = "auth"
)]
#[axum::debug_handler]
pub async fn teacher_login(
    State(state): State<AppState>,
    ApiQuery(query): ApiQuery<LoginQuery>,
    body: Option<ApiJson<LoginRequest>>,
) -> Result<impl IntoResponse> {
    let creds = LoginRequest::from_body_or_query(body.map(|ApiJson(b)| b), query)?;
    creds.validate()?;
    let token = state
        .auth_service
        .login_teacher(&creds.username, &creds.password)
        .await?;
    Ok(Json(TokenResponse::bearer(token)))
}
