use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use validator::Validate;

use crate::models::question::{Question, QuestionType};
use crate::models::student_attempt::AnswerSheet;

#[derive(Debug, Clone, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct StartTestQuery {
    pub class_id: i32,
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
pub struct StudentTestStart {
    #[validate(length(min = 1, max = 32))]
    pub roll_no: String,
    #[validate(length(min = 1, max = 128))]
    pub student_name: String,
    #[validate(length(min = 1, max = 16))]
    pub section: String,
}

/// A question as served to a student. Carries no answer key.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct StudentQuestion {
    pub id: i32,
    pub question_text: String,
    pub question_type: QuestionType,
    pub media_url: Option<String>,
    pub options: Vec<String>,
}

impl From<Question> for StudentQuestion {
    fn from(q: Question) -> Self {
        Self {
            id: q.id,
            question_text: q.question_text,
            question_type: q.question_type,
            media_url: q.media_url,
            options: q.options,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct StartTestResponse {
    pub test_id: i32,
    pub questions: Vec<StudentQuestion>,
    pub duration_minutes: i32,
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
pub struct SubmitTestPayload {
    pub test_id: i32,
    #[validate(length(min = 1, max = 32))]
    pub roll_no: String,
    #[validate(length(min = 1, max = 128))]
    pub student_name: String,
    #[validate(length(min = 1, max = 16))]
    pub section: String,
    #[serde(default)]
    #[schema(value_type = Object)]
    pub answers: AnswerSheet,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct SubmitTestResponse {
    pub message: String,
    pub score: i32,
    pub total_questions: usize,
}

#[derive(Debug, Clone, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct TestResultQuery {
    pub roll_no: String,
    pub section: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct TestResultResponse {
    pub student_name: String,
    pub roll_no: String,
    pub section: String,
    pub score: i32,
    pub total_questions: i64,
    pub percentage: f64,
    pub completed_at: DateTime<Utc>,
}
