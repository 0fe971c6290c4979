use async_trait::async_trait;
use sqlx::types::Json;
use sqlx::{FromRow, PgPool};

use crate::error::{Error, Result};
use crate::models::question::{NewQuestion, Question};
use crate::repositories::QuestionRepository;

#[derive(FromRow)]
struct QuestionRow {
    id: i32,
    test_id: i32,
    teacher_id: i32,
    question_text: String,
    question_type: String,
    media_url: Option<String>,
    options: Json<Vec<String>>,
    correct_option: i32,
}

impl TryFrom<QuestionRow> for Question {
    type Error = Error;

    fn try_from(row: QuestionRow) -> Result<Self> {
        let question_type = row.question_type.parse().map_err(|e| {
            Error::Internal(format!("question {} has a corrupt type: {}", row.id, e))
        })?;
        Ok(Question {
            id: row.id,
            test_id: row.test_id,
            teacher_id: row.teacher_id,
            question_text: row.question_text,
            question_type,
            media_url: row.media_url,
            options: row.options.0,
            correct_option: row.correct_option,
        })
    }
}

#[derive(Clone)]
pub struct PgQuestionRepository {
    pool: PgPool,
}

impl PgQuestionRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl QuestionRepository for PgQuestionRepository {
    async fn create(&self, question: NewQuestion) -> Result<Question> {
        let row = sqlx::query_as::<_, QuestionRow>(
            r#"
            INSERT INTO questions (
                test_id, teacher_id, question_text, question_type, media_url, options, correct_option
            ) VALUES ($1, $2, $3, $4, $5, $6, $7)
            RETURNING *
            "#,
        )
        .bind(question.test_id)
        .bind(question.teacher_id)
        .bind(&question.question_text)
        .bind(question.question_type.as_str())
        .bind(&question.media_url)
        .bind(Json(&question.options))
        .bind(question.correct_option)
        .fetch_one(&self.pool)
        .await?;
        row.try_into()
    }

    async fn list_for_test(&self, test_id: i32) -> Result<Vec<Question>> {
        let rows = sqlx::query_as::<_, QuestionRow>(
            r#"SELECT * FROM questions WHERE test_id = $1 ORDER BY id"#,
        )
        .bind(test_id)
        .fetch_all(&self.pool)
        .await?;
        rows.into_iter().map(Question::try_from).collect()
    }

    async fn count_for_test(&self, test_id: i32) -> Result<i64> {
        let count: i64 =
            sqlx::query_scalar(r#"SELECT COUNT(*) FROM questions WHERE test_id = $1"#)
                .bind(test_id)
                .fetch_one(&self.pool)
                .await?;
        Ok(count)
    }
}
