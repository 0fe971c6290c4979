use axum::{response::IntoResponse, Json};
use utoipa::openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme};
use utoipa::{Modify, OpenApi};

use crate::dto::admin_dto::{
    CreateNamedPayload, CreateTeacherPayload, CreateTestPayload, NamedResponse,
    PerformanceResponse, TeacherResponse, TestResponse, ToppersResponse, UpdateTestStatusPayload,
};
use crate::dto::auth_dto::{LoginRequest, TokenResponse};
use crate::dto::student_dto::{
    StartTestResponse, StudentQuestion, StudentTestStart, SubmitTestPayload, SubmitTestResponse,
    TestResultResponse,
};
use crate::dto::teacher_dto::{CreateQuestionPayload, QuestionResponse};
use crate::dto::MessageResponse;
use crate::models::question::QuestionType;
use crate::services::performance_service::TopPerformer;

#[derive(OpenApi)]
#[openapi(
    paths(
        super::health::root,
        super::health::health,
        super::auth::admin_login,
        super::auth::teacher_login,
        super::admin::list_classes,
        super::admin::create_class,
        super::admin::list_subjects,
        super::admin::create_subject,
        super::admin::list_teachers,
        super::admin::create_teacher,
        super::admin::create_test,
        super::admin::update_test_status,
        super::admin::performance,
        super::admin::toppers,
        super::teacher::list_tests,
        super::teacher::add_question,
        super::teacher::list_questions,
        super::student::start_test,
        super::student::submit_test,
        super::student::test_result,
    ),
    components(schemas(
        MessageResponse,
        LoginRequest,
        TokenResponse,
        CreateNamedPayload,
        NamedResponse,
        CreateTeacherPayload,
        TeacherResponse,
        CreateTestPayload,
        UpdateTestStatusPayload,
        TestResponse,
        PerformanceResponse,
        ToppersResponse,
        TopPerformer,
        QuestionType,
        CreateQuestionPayload,
        QuestionResponse,
        StudentTestStart,
        StudentQuestion,
        StartTestResponse,
        SubmitTestPayload,
        SubmitTestResponse,
        TestResultResponse,
    )),
    modifiers(&SecurityAddon),
    tags(
        (name = "health"),
        (name = "auth", description = "Admin and teacher login"),
        (name = "admin", description = "Catalog, tests and performance reports"),
        (name = "teacher", description = "Question authoring"),
        (name = "student", description = "Taking tests and reading results"),
    )
)]
pub struct ApiDoc;

struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "bearer_auth",
                SecurityScheme::Http(
                    HttpBuilder::new()
                        .scheme(HttpAuthScheme::Bearer)
                        .bearer_format("JWT")
                        .build(),
                ),
            );
        }
    }
}

#[axum::debug_handler]
pub async fn openapi_json() -> impl IntoResponse {
    Json(ApiDoc::openapi())
}
