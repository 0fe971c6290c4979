use std::sync::Arc;

use crate::dto::teacher_dto::CreateQuestionPayload;
use crate::error::{Error, Result};
use crate::models::question::{NewQuestion, Question};
use crate::models::teacher::{Teacher, TeacherAssignments};
use crate::repositories::{AccountRepository, QuestionRepository, TestRepository};
use crate::utils::validation::validate_media_url;

#[derive(Clone)]
pub struct QuestionService {
    accounts: Arc<dyn AccountRepository>,
    tests: Arc<dyn TestRepository>,
    questions: Arc<dyn QuestionRepository>,
}

impl QuestionService {
    pub fn new(
        accounts: Arc<dyn AccountRepository>,
        tests: Arc<dyn TestRepository>,
        questions: Arc<dyn QuestionRepository>,
    ) -> Self {
        Self {
            accounts,
            tests,
            questions,
        }
    }

    async fn teacher_with_assignments(
        &self,
        username: &str,
    ) -> Result<(Teacher, TeacherAssignments)> {
        let teacher = self
            .accounts
            .find_teacher(username)
            .await?
            .ok_or_else(|| Error::NotFound("Teacher not found".to_string()))?;
        let assignments = self.accounts.teacher_assignments(teacher.id).await?;
        Ok((teacher, assignments))
    }

    pub async fn add_question(
        &self,
        username: &str,
        payload: CreateQuestionPayload,
    ) -> Result<Question> {
        let (teacher, assignments) = self.teacher_with_assignments(username).await?;

        let test = self
            .tests
            .find(payload.test_id)
            .await?
            .filter(|t| t.is_active)
            .ok_or_else(|| Error::NotFound("Test not found or inactive".to_string()))?;

        if !assignments.covers(test.class_id, test.subject_id) {
            tracing::warn!(teacher = %teacher.username, test_id = test.id, "question rejected: not assigned");
            return Err(Error::Forbidden(
                "Not authorized to add questions to this test".to_string(),
            ));
        }

        if let Some(url) = payload.media_url.as_deref() {
            if !validate_media_url(url, payload.question_type) {
                return Err(Error::BadRequest(format!(
                    "Invalid media URL for type {}",
                    payload.question_type
                )));
            }
        }

        let option_count = payload.options.len();
        if payload.correct_option < 0 || payload.correct_option as usize >= option_count {
            return Err(Error::BadRequest(format!(
                "Correct option must be an index between 0 and {}",
                option_count.saturating_sub(1)
            )));
        }

        let question = self
            .questions
            .create(NewQuestion {
                test_id: test.id,
                teacher_id: teacher.id,
                question_text: payload.question_text,
                question_type: payload.question_type,
                media_url: payload.media_url,
                options: payload.options,
                correct_option: payload.correct_option,
            })
            .await?;
        tracing::info!(question_id = question.id, test_id = test.id, teacher = %teacher.username, "question added");
        Ok(question)
    }

    pub async fn list_questions(&self, username: &str, test_id: i32) -> Result<Vec<Question>> {
        let (_, assignments) = self.teacher_with_assignments(username).await?;

        let test = self
            .tests
            .find(test_id)
            .await?
            .ok_or_else(|| Error::NotFound("Test not found".to_string()))?;

        if !assignments.covers(test.class_id, test.subject_id) {
            return Err(Error::Forbidden(
                "Not authorized to view questions for this test".to_string(),
            ));
        }

        self.questions.list_for_test(test.id).await
    }
}
