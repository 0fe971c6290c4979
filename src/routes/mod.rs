pub mod admin;
pub mod auth;
pub mod docs;
pub mod health;
pub mod student;
pub mod teacher;

use axum::{
    middleware::from_fn_with_state,
    routing::{get, patch, post},
    Router,
};

use crate::middleware::auth::{require_admin, require_teacher};
use crate::AppState;

/// Every route of the service, with role guards applied. Outer layers such as
/// CORS and tracing are added by the caller.
pub fn build_router(state: AppState) -> Router {
    let public = Router::new()
        .route("/", get(health::root))
        .route("/health", get(health::health))
        .route("/api-docs/openapi.json", get(docs::openapi_json))
        .route("/admin/login", post(auth::admin_login))
        .route("/teacher/login", post(auth::teacher_login))
        .route("/student/start-test", post(student::start_test))
        .route("/student/submit-test", post(student::submit_test))
        .route("/student/test-result/:test_id", get(student::test_result));

    let admin = Router::new()
        .route(
            "/admin/classes",
            get(admin::list_classes).post(admin::create_class),
        )
        .route(
            "/admin/subjects",
            get(admin::list_subjects).post(admin::create_subject),
        )
        .route(
            "/admin/teachers",
            get(admin::list_teachers).post(admin::create_teacher),
        )
        .route("/admin/tests", post(admin::create_test))
        .route("/admin/tests/:test_id", patch(admin::update_test_status))
        .route("/admin/performance", get(admin::performance))
        .route("/admin/toppers/:class_id", get(admin::toppers))
        .route_layer(from_fn_with_state(state.clone(), require_admin));

    let teacher = Router::new()
        .route("/teacher/tests", get(teacher::list_tests))
        .route("/teacher/questions", post(teacher::add_question))
        .route("/teacher/questions/:test_id", get(teacher::list_questions))
        .route_layer(from_fn_with_state(state.clone(), require_teacher));

    Router::new()
        .merge(public)
        .merge(admin)
        .merge(teacher)
        .with_state(state)
}
