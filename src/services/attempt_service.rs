use std::sync::Arc;

use chrono::Utc;

use crate::dto::student_dto::{
    StartTestResponse, StudentQuestion, StudentTestStart, SubmitTestPayload, SubmitTestResponse,
    TestResultResponse,
};
use crate::error::{Error, Result};
use crate::models::student_attempt::NewAttempt;
use crate::repositories::{AttemptRepository, QuestionRepository, TestRepository};
use crate::services::grading_service::GradingService;

#[derive(Clone)]
pub struct AttemptService {
    tests: Arc<dyn TestRepository>,
    questions: Arc<dyn QuestionRepository>,
    attempts: Arc<dyn AttemptRepository>,
    duration_minutes: i32,
}

impl AttemptService {
    pub fn new(
        tests: Arc<dyn TestRepository>,
        questions: Arc<dyn QuestionRepository>,
        attempts: Arc<dyn AttemptRepository>,
        duration_minutes: i32,
    ) -> Self {
        Self {
            tests,
            questions,
            attempts,
            duration_minutes,
        }
    }

    /// One attempt per (test, roll number, section).
    async fn ensure_not_attempted(
        &self,
        test_id: i32,
        roll_no: &str,
        section: &str,
        message: &str,
    ) -> Result<()> {
        if self.attempts.exists(test_id, roll_no, section).await? {
            tracing::warn!(test_id, roll_no, section, "repeat attempt rejected");
            return Err(Error::AlreadyAttempted(message.to_string()));
        }
        Ok(())
    }

    pub async fn start_test(
        &self,
        class_id: i32,
        student: StudentTestStart,
    ) -> Result<StartTestResponse> {
        let test = self
            .tests
            .first_active_for_class(class_id)
            .await?
            .ok_or_else(|| Error::NotFound("No active test found for this class".to_string()))?;

        self.ensure_not_attempted(
            test.id,
            &student.roll_no,
            &student.section,
            "You have already attempted this test",
        )
        .await?;

        let questions = self.questions.list_for_test(test.id).await?;
        if questions.is_empty() {
            return Err(Error::NotFound("No questions found for this test".to_string()));
        }

        tracing::info!(
            test_id = test.id,
            roll_no = %student.roll_no,
            section = %student.section,
            questions = questions.len(),
            "test started"
        );

        Ok(StartTestResponse {
            test_id: test.id,
            questions: questions.into_iter().map(StudentQuestion::from).collect(),
            duration_minutes: self.duration_minutes,
        })
    }

    pub async fn submit_test(&self, submission: SubmitTestPayload) -> Result<SubmitTestResponse> {
        let test = self
            .tests
            .find(submission.test_id)
            .await?
            .filter(|t| t.is_active)
            .ok_or_else(|| Error::NotFound("Test not found or inactive".to_string()))?;

        self.ensure_not_attempted(
            test.id,
            &submission.roll_no,
            &submission.section,
            "You have already submitted this test",
        )
        .await?;

        let questions = self.questions.list_for_test(test.id).await?;
        let key = GradingService::answer_key(&questions);
        let score = GradingService::score(&submission.answers, &key);

        let attempt = self
            .attempts
            .create(NewAttempt {
                test_id: test.id,
                roll_no: submission.roll_no,
                student_name: submission.student_name,
                section: submission.section,
                answers: submission.answers,
                score,
                completed_at: Utc::now(),
            })
            .await?;

        tracing::info!(
            attempt_id = attempt.id,
            test_id = test.id,
            roll_no = %attempt.roll_no,
            score,
            total = questions.len(),
            "test submitted"
        );

        Ok(SubmitTestResponse {
            message: "Test submitted successfully".to_string(),
            score,
            total_questions: questions.len(),
        })
    }

    pub async fn test_result(
        &self,
        test_id: i32,
        roll_no: &str,
        section: &str,
    ) -> Result<TestResultResponse> {
        let attempt = self
            .attempts
            .find(test_id, roll_no, section)
            .await?
            .ok_or_else(|| Error::NotFound("No test submission found".to_string()))?;

        let total_questions = self.questions.count_for_test(test_id).await?;
        let percentage = if total_questions > 0 {
            f64::from(attempt.score) / total_questions as f64 * 100.0
        } else {
            0.0
        };

        Ok(TestResultResponse {
            student_name: attempt.student_name,
            roll_no: attempt.roll_no,
            section: attempt.section,
            score: attempt.score,
            total_questions,
            percentage,
            completed_at: attempt.completed_at,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::question::{Question, QuestionType};
    use crate::models::student_attempt::{AnswerSheet, StudentAttempt};
    use crate::models::test::Test;
    use crate::repositories::{
        MockAttemptRepository, MockQuestionRepository, MockTestRepository,
    };

    fn active_test(id: i32) -> Test {
        Test {
            id,
            class_id: 1,
            subject_id: 1,
            test_date: Utc::now(),
            is_active: true,
            created_at: Utc::now(),
        }
    }

    fn question(id: i32, correct_option: i32) -> Question {
        Question {
            id,
            test_id: 5,
            teacher_id: 1,
            question_text: format!("Question {}", id),
            question_type: QuestionType::Text,
            media_url: None,
            options: vec!["w".into(), "x".into(), "y".into(), "z".into()],
            correct_option,
        }
    }

    fn student() -> StudentTestStart {
        StudentTestStart {
            roll_no: "17".into(),
            student_name: "Priya".into(),
            section: "B".into(),
        }
    }

    fn questions_repo() -> MockQuestionRepository {
        let mut questions = MockQuestionRepository::new();
        questions
            .expect_list_for_test()
            .returning(|_| Ok(vec![question(1, 2), question(2, 3)]));
        questions
    }

    #[tokio::test]
    async fn start_serves_questions_without_answers() {
        let mut tests = MockTestRepository::new();
        tests
            .expect_first_active_for_class()
            .returning(|_| Ok(Some(active_test(5))));
        let mut attempts = MockAttemptRepository::new();
        attempts.expect_exists().returning(|_, _, _| Ok(false));

        let svc = AttemptService::new(
            Arc::new(tests),
            Arc::new(questions_repo()),
            Arc::new(attempts),
            45,
        );
        let started = svc.start_test(1, student()).await.unwrap();
        assert_eq!(started.test_id, 5);
        assert_eq!(started.duration_minutes, 45);
        assert_eq!(started.questions.len(), 2);

        let body = serde_json::to_value(&started).unwrap();
        assert!(body["questions"][0].get("correct_option").is_none());
    }

    #[tokio::test]
    async fn start_rejects_repeat_student() {
        let mut tests = MockTestRepository::new();
        tests
            .expect_first_active_for_class()
            .returning(|_| Ok(Some(active_test(5))));
        let mut attempts = MockAttemptRepository::new();
        attempts
            .expect_exists()
            .withf(|test_id, roll_no, section| *test_id == 5 && roll_no == "17" && section == "B")
            .returning(|_, _, _| Ok(true));
        let mut questions = MockQuestionRepository::new();
        questions.expect_list_for_test().never();

        let svc = AttemptService::new(
            Arc::new(tests),
            Arc::new(questions),
            Arc::new(attempts),
            60,
        );
        let err = svc.start_test(1, student()).await.unwrap_err();
        assert!(
            matches!(err, Error::AlreadyAttempted(msg) if msg == "You have already attempted this test")
        );
    }

    #[tokio::test]
    async fn start_without_questions_is_not_found() {
        let mut tests = MockTestRepository::new();
        tests
            .expect_first_active_for_class()
            .returning(|_| Ok(Some(active_test(5))));
        let mut attempts = MockAttemptRepository::new();
        attempts.expect_exists().returning(|_, _, _| Ok(false));
        let mut questions = MockQuestionRepository::new();
        questions.expect_list_for_test().returning(|_| Ok(Vec::new()));

        let svc = AttemptService::new(
            Arc::new(tests),
            Arc::new(questions),
            Arc::new(attempts),
            60,
        );
        let err = svc.start_test(1, student()).await.unwrap_err();
        assert!(matches!(err, Error::NotFound(msg) if msg == "No questions found for this test"));
    }

    #[tokio::test]
    async fn submit_scores_and_persists() {
        let mut tests = MockTestRepository::new();
        tests.expect_find().returning(|id| Ok(Some(active_test(id))));
        let mut attempts = MockAttemptRepository::new();
        attempts.expect_exists().returning(|_, _, _| Ok(false));
        attempts
            .expect_create()
            .withf(|a| a.score == 1 && a.roll_no == "17")
            .times(1)
            .returning(|a| {
                Ok(StudentAttempt {
                    id: 1,
                    test_id: a.test_id,
                    roll_no: a.roll_no,
                    student_name: a.student_name,
                    section: a.section,
                    answers: a.answers,
                    score: a.score,
                    completed_at: a.completed_at,
                })
            });

        let svc = AttemptService::new(
            Arc::new(tests),
            Arc::new(questions_repo()),
            Arc::new(attempts),
            60,
        );
        let mut answers = AnswerSheet::new();
        answers.insert("1".into(), 2);
        answers.insert("2".into(), 1);
        answers.insert("404".into(), 0);

        let resp = svc
            .submit_test(SubmitTestPayload {
                test_id: 5,
                roll_no: "17".into(),
                student_name: "Priya".into(),
                section: "B".into(),
                answers,
            })
            .await
            .unwrap();
        assert_eq!(resp.score, 1);
        assert_eq!(resp.total_questions, 2);
        assert_eq!(resp.message, "Test submitted successfully");
    }

    #[tokio::test]
    async fn submit_to_inactive_test_is_not_found() {
        let mut tests = MockTestRepository::new();
        tests.expect_find().returning(|id| {
            let mut test = active_test(id);
            test.is_active = false;
            Ok(Some(test))
        });

        let svc = AttemptService::new(
            Arc::new(tests),
            Arc::new(MockQuestionRepository::new()),
            Arc::new(MockAttemptRepository::new()),
            60,
        );
        let err = svc
            .submit_test(SubmitTestPayload {
                test_id: 5,
                roll_no: "17".into(),
                student_name: "Priya".into(),
                section: "B".into(),
                answers: AnswerSheet::new(),
            })
            .await
            .unwrap_err();
        assert!(matches!(err, Error::NotFound(msg) if msg == "Test not found or inactive"));
    }

    #[tokio::test]
    async fn result_reports_percentage() {
        let mut attempts = MockAttemptRepository::new();
        attempts.expect_find().returning(|test_id, roll_no, section| {
            Ok(Some(StudentAttempt {
                id: 9,
                test_id,
                roll_no: roll_no.to_string(),
                student_name: "Priya".into(),
                section: section.to_string(),
                answers: AnswerSheet::new(),
                score: 3,
                completed_at: Utc::now(),
            }))
        });
        let mut questions = MockQuestionRepository::new();
        questions.expect_count_for_test().returning(|_| Ok(4));

        let svc = AttemptService::new(
            Arc::new(MockTestRepository::new()),
            Arc::new(questions),
            Arc::new(attempts),
            60,
        );
        let result = svc.test_result(5, "17", "B").await.unwrap();
        assert_eq!(result.total_questions, 4);
        assert_eq!(result.percentage, 75.0);
    }

    #[tokio::test]
    async fn result_with_no_questions_is_zero_percent() {
        let mut attempts = MockAttemptRepository::new();
        attempts.expect_find().returning(|test_id, roll_no, section| {
            Ok(Some(StudentAttempt {
                id: 9,
                test_id,
                roll_no: roll_no.to_string(),
                student_name: "Priya".into(),
                section: section.to_string(),
                answers: AnswerSheet::new(),
                score: 0,
                completed_at: Utc::now(),
            }))
        });
        let mut questions = MockQuestionRepository::new();
        questions.expect_count_for_test().returning(|_| Ok(0));

        let svc = AttemptService::new(
            Arc::new(MockTestRepository::new()),
            Arc::new(questions),
            Arc::new(attempts),
            60,
        );
        assert_eq!(svc.test_result(5, "17", "B").await.unwrap().percentage, 0.0);
    }

    #[tokio::test]
    async fn missing_result_is_not_found() {
        let mut attempts = MockAttemptRepository::new();
        attempts.expect_find().returning(|_, _, _| Ok(None));

        let svc = AttemptService::new(
            Arc::new(MockTestRepository::new()),
            Arc::new(MockQuestionRepository::new()),
            Arc::new(attempts),
            60,
        );
        let err = svc.test_result(5, "17", "B").await.unwrap_err();
        assert!(matches!(err, Error::NotFound(msg) if msg == "No test submission found"));
    }
}
