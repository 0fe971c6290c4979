use axum::{
    extract::State,
    response::IntoResponse,
    Extension, Json,
};
use validator::Validate;

use crate::dto::admin_dto::TestResponse;
use crate::dto::teacher_dto::{CreateQuestionPayload, QuestionResponse};
use crate::error::Result;
use crate::extract::{ApiJson, ApiPath};
use crate::middleware::auth::Claims;
use crate::AppState;

#[utoipa::path(
    get,
    path = "/teacher/tests",
    responses(
        (status = 200, description = "Active tests in the teacher's classes and subjects", body = [TestResponse]),
        (status = 403, description = "Not a teacher"),
    ),
    security(("bearer_auth" = [])),
    tag = "teacher"
)]
#[axum::debug_handler]
pub async fn list_tests(
    State(state): State<AppState>,
    Extension(claims): Extension<Claims>,
) -> Result<impl IntoResponse> {
    let tests = state.test_service.list_for_teacher(&claims.sub).await?;
    let body: Vec<TestResponse> = tests.into_iter().map(TestResponse::from).collect();
    Ok(Json(body))
}

#[utoipa::path(
    post,
    path = "/teacher/questions",
    request_body = CreateQuestionPayload,
    responses(
        (status = 200, description = "Question added", body = QuestionResponse),
        (status = 400, description = "Invalid media URL or options"),
        (status = 403, description = "Teacher not assigned to the test"),
        (status = 404, description = "Test not found or inactive"),
    ),
    security(("bearer_auth" = [])),
    tag = "teacher"
)]
#[axum::debug_handler]
pub async fn add_question(
    State(state): State<AppState>,
    Extension(claims): Extension<Claims>,
    ApiJson(payload): ApiJson<CreateQuestionPayload>,
) -> Result<impl IntoResponse> {
    payload.validate()?;
    let question = state
        .question_service
        .add_question(&claims.sub, payload)
        .await?;
    Ok(Json(QuestionResponse::from(question)))
}

#[utoipa::path(
    get,
    path = "/teacher/questions/{test_id}",
    params(("test_id" = i32, Path, description = "Test id")),
    responses(
        (status = 200, description = "Questions of the test with answer keys", body = [QuestionResponse]),
        (status = 403, description = "Teacher not assigned to the test"),
        (status = 404, description = "Test not found"),
    ),
    security(("bearer_auth" = [])),
    tag = "teacher"
)]
#[axum::debug_handler]
pub async fn list_questions(
    State(state): State<AppState>,
    Extension(claims): Extension<Claims>,
    ApiPath(test_id): ApiPath<i32>,
) -> Result<impl IntoResponse> {
    let questions = state
        .question_service
        .list_questions(&claims.sub, test_id)
        .await?;
    let body: Vec<QuestionResponse> = questions.into_iter().map(QuestionResponse::from).collect();
    Ok(Json(body))
}
