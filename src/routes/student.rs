use axum::{
    extract::State,
    response::IntoResponse,
    Json,
};
use validator::Validate;

use crate::dto::student_dto::{
    StartTestQuery, StartTestResponse, StudentTestStart, SubmitTestPayload, SubmitTestResponse,
    TestResultQuery, TestResultResponse,
};
use crate::error::Result;
use crate::extract::{ApiJson, ApiPath, ApiQuery};
use crate::AppState;

#[utoipa::path(
    post,
    path = "/student/start-test",
    params(StartTestQuery),
    request_body = StudentTestStart,
    responses(
        (status = 200, description = "Questions without answer keys", body = StartTestResponse),
        (status = 400, description = "You have already attempted this test"),
        (status = 404, description = "No active test or no questions"),
    ),
    tag = "student"
)]
#[axum::debug_handler]
pub async fn start_test(
    State(state): State<AppState>,
    ApiQuery(query): ApiQuery<StartTestQuery>,
    ApiJson(payload): ApiJson<StudentTestStart>,
) -> Result<impl IntoResponse> {
    payload.validate()?;
    let started = state
        .attempt_service
        .start_test(query.class_id, payload)
        .await?;
    Ok(Json(started))
}

#[utoipa::path(
    post,
    path = "/student/submit-test",
    request_body = SubmitTestPayload,
    responses(
        (status = 200, description = "Submission scored and stored", body = SubmitTestResponse),
        (status = 400, description = "You have already submitted this test"),
        (status = 404, description = "Test not found or inactive"),
    ),
    tag = "student"
)]
#[axum::debug_handler]
pub async fn submit_test(
    State(state): State<AppState>,
    ApiJson(payload): ApiJson<SubmitTestPayload>,
) -> Result<impl IntoResponse> {
    payload.validate()?;
    Ok(Json(state.attempt_service.submit_test(payload).await?))
}

#[utoipa::path(
    get,
    path = "/student/test-result/{test_id}",
    params(
        ("test_id" = i32, Path, description = "Test id"),
        TestResultQuery
    ),
    responses(
        (status = 200, description = "Stored result", body = TestResultResponse),
        (status = 404, description = "No test submission found"),
    ),
    tag = "student"
)]
#[axum::debug_handler]
pub async fn test_result(
    State(state): State<AppState>,
    ApiPath(test_id): ApiPath<i32>,
    ApiQuery(query): ApiQuery<TestResultQuery>,
) -> Result<impl IntoResponse> {
    let result = state
        .attempt_service
        .test_result(test_id, &query.roll_no, &query.section)
        .await?;
    Ok(Json(result))
}
