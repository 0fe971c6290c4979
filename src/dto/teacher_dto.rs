use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

use crate::models::question::{Question, QuestionType};

#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct CreateQuestionPayload {
    pub test_id: i32,
    #[validate(length(min = 1))]
    pub question_text: String,
    pub question_type: QuestionType,
    pub media_url: Option<String>,
    #[validate(length(min = 2, message = "A question needs at least two options"))]
    pub options: Vec<String>,
    #[validate(range(min = 0, message = "Correct option must be a non-negative index"))]
    pub correct_option: i32,
}

/// The author's view of a question, answer key included.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct QuestionResponse {
    pub id: i32,
    pub test_id: i32,
    pub question_text: String,
    pub question_type: QuestionType,
    pub media_url: Option<String>,
    pub options: Vec<String>,
    pub correct_option: i32,
}

impl From<Question> for QuestionResponse {
    fn from(q: Question) -> Self {
        Self {
            id: q.id,
            test_id: q.test_id,
            question_text: q.question_text,
            question_type: q.question_type,
            media_url: q.media_url,
            options: q.options,
            correct_option: q.correct_option,
        }
    }
}
