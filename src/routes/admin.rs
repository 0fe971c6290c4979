use axum::{
    extract::State,
    response::IntoResponse,
    Json,
};
use validator::Validate;

use crate::dto::admin_dto::{
    CreateNamedPayload, CreateTeacherPayload, CreateTestPayload, NamedResponse,
    PerformanceResponse, TeacherResponse, TestResponse, ToppersResponse, UpdateTestStatusPayload,
    UpdateTestStatusQuery,
};
use crate::dto::MessageResponse;
use crate::error::Result;
use crate::extract::{ApiJson, ApiPath, ApiQuery};
use crate::AppState;

#[utoipa::path(
    get,
    path = "/admin/classes",
    responses(
        (status = 200, description = "All classes", body = [NamedResponse]),
        (status = 401, description = "Not authenticated"),
        (status = 403, description = "Not an admin"),
    ),
    security(("bearer_auth" = [])),
    tag = "admin"
)]
#[axum::debug_handler]
pub async fn list_classes(State(state): State<AppState>) -> Result<impl IntoResponse> {
    let classes = state.admin_service.list_classes().await?;
    let body: Vec<NamedResponse> = classes
        .into_iter()
        .map(|c| NamedResponse { id: c.id, name: c.name })
        .collect();
    Ok(Json(body))
}

#[utoipa::path(
    post,
    path = "/admin/classes",
    request_body = CreateNamedPayload,
    responses(
        (status = 200, description = "Class created", body = NamedResponse),
        (status = 400, description = "Invalid payload"),
    ),
    security(("bearer_auth" = [])),
    tag = "admin"
)]
#[axum::debug_handler]
pub async fn create_class(
    State(state): State<AppState>,
    ApiJson(payload): ApiJson<CreateNamedPayload>,
) -> Result<impl IntoResponse> {
    payload.validate()?;
    let class = state.admin_service.create_class(&payload.name).await?;
    Ok(Json(NamedResponse {
        id: class.id,
        name: class.name,
    }))
}

#[utoipa::path(
    get,
    path = "/admin/subjects",
    responses((status = 200, description = "All subjects", body = [NamedResponse])),
    security(("bearer_auth" = [])),
    tag = "admin"
)]
#[axum::debug_handler]
pub async fn list_subjects(State(state): State<AppState>) -> Result<impl IntoResponse> {
    let subjects = state.admin_service.list_subjects().await?;
    let body: Vec<NamedResponse> = subjects
        .into_iter()
        .map(|s| NamedResponse { id: s.id, name: s.name })
        .collect();
    Ok(Json(body))
}

#[utoipa::path(
    post,
    path = "/admin/subjects",
    request_body = CreateNamedPayload,
    responses(
        (status = 200, description = "Subject created", body = NamedResponse),
        (status = 400, description = "Invalid payload"),
    ),
    security(("bearer_auth" = [])),
    tag = "admin"
)]
#[axum::debug_handler]
pub async fn create_subject(
    State(state): State<AppState>,
    ApiJson(payload): ApiJson<CreateNamedPayload>,
) -> Result<impl IntoResponse> {
    payload.validate()?;
    let subject = state.admin_service.create_subject(&payload.name).await?;
    Ok(Json(NamedResponse {
        id: subject.id,
        name: subject.name,
    }))
}

#[utoipa::path(
    get,
    path = "/admin/teachers",
    responses((status = 200, description = "Teachers with their assignments", body = [TeacherResponse])),
    security(("bearer_auth" = [])),
    tag = "admin"
)]
#[axum::debug_handler]
pub async fn list_teachers(State(state): State<AppState>) -> Result<impl IntoResponse> {
    let teachers = state.admin_service.list_teachers().await?;
    let body: Vec<TeacherResponse> = teachers.into_iter().map(TeacherResponse::from).collect();
    Ok(Json(body))
}

#[utoipa::path(
    post,
    path = "/admin/teachers",
    request_body = CreateTeacherPayload,
    responses(
        (status = 200, description = "Teacher created", body = TeacherResponse),
        (status = 400, description = "Username already registered or invalid payload"),
    ),
    security(("bearer_auth" = [])),
    tag = "admin"
)]
#[axum::debug_handler]
pub async fn create_teacher(
    State(state): State<AppState>,
    ApiJson(payload): ApiJson<CreateTeacherPayload>,
) -> Result<impl IntoResponse> {
    payload.validate()?;
    let created = state.admin_service.create_teacher(payload).await?;
    Ok(Json(TeacherResponse::from(created)))
}

#[utoipa::path(
    post,
    path = "/admin/tests",
    request_body = CreateTestPayload,
    responses(
        (status = 200, description = "Test created", body = TestResponse),
        (status = 404, description = "Class or subject not found"),
    ),
    security(("bearer_auth" = [])),
    tag = "admin"
)]
#[axum::debug_handler]
pub async fn create_test(
    State(state): State<AppState>,
    ApiJson(payload): ApiJson<CreateTestPayload>,
) -> Result<impl IntoResponse> {
    let test = state.test_service.create_test(payload).await?;
    Ok(Json(TestResponse::from(test)))
}

#[utoipa::path(
    patch,
    path = "/admin/tests/{test_id}",
    params(("test_id" = i32, Path, description = "Test id"), UpdateTestStatusQuery),
    request_body(content = UpdateTestStatusPayload, description = "New status, or pass `is_active` as a query parameter"),
    responses(
        (status = 200, description = "Status updated", body = MessageResponse),
        (status = 400, description = "Missing is_active"),
        (status = 404, description = "Test not found"),
    ),
    security(("bearer_auth" = [])),
    tag = "admin"
)]
#[axum::debug_handler]
pub async fn update_test_status(
    State(state): State<AppState>,
    ApiPath(test_id): ApiPath<i32>,
    ApiQuery(query): ApiQuery<UpdateTestStatusQuery>,
    body: Option<ApiJson<UpdateTestStatusPayload>>,
) -> Result<impl IntoResponse> {
    let payload = UpdateTestStatusPayload::from_body_or_query(body.map(|ApiJson(b)| b), query)?;
    state
        .test_service
        .set_active(test_id, payload.is_active)
        .await?;
    Ok(Json(MessageResponse::new("Test status updated successfully")))
}

#[utoipa::path(
    get,
    path = "/admin/performance",
    responses((status = 200, description = "Per-class statistics", body = [PerformanceResponse])),
    security(("bearer_auth" = [])),
    tag = "admin"
)]
#[axum::debug_handler]
pub async fn performance(State(state): State<AppState>) -> Result<impl IntoResponse> {
    Ok(Json(state.admin_service.class_performance().await?))
}

#[utoipa::path(
    get,
    path = "/admin/toppers/{class_id}",
    params(("class_id" = i32, Path, description = "Class id")),
    responses(
        (status = 200, description = "Top three students of the class", body = ToppersResponse),
        (status = 404, description = "Class not found"),
    ),
    security(("bearer_auth" = [])),
    tag = "admin"
)]
#[axum::debug_handler]
pub async fn toppers(
    State(state): State<AppState>,
    ApiPath(class_id): ApiPath<i32>,
) -> Result<impl IntoResponse> {
    Ok(Json(state.admin_service.class_toppers(class_id).await?))
}
