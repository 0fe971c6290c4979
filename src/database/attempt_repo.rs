use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::types::Json;
use sqlx::{FromRow, PgPool};

use crate::error::Result;
use crate::models::student_attempt::{AnswerSheet, NewAttempt, StudentAttempt};
use crate::repositories::AttemptRepository;

#[derive(FromRow)]
struct AttemptRow {
    id: i32,
    test_id: i32,
    roll_no: String,
    student_name: String,
    section: String,
    answers: Json<AnswerSheet>,
    score: i32,
    completed_at: DateTime<Utc>,
}

impl From<AttemptRow> for StudentAttempt {
    fn from(row: AttemptRow) -> Self {
        StudentAttempt {
            id: row.id,
            test_id: row.test_id,
            roll_no: row.roll_no,
            student_name: row.student_name,
            section: row.section,
            answers: row.answers.0,
            score: row.score,
            completed_at: row.completed_at,
        }
    }
}

#[derive(Clone)]
pub struct PgAttemptRepository {
    pool: PgPool,
}

impl PgAttemptRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl AttemptRepository for PgAttemptRepository {
    async fn exists(&self, test_id: i32, roll_no: &str, section: &str) -> Result<bool> {
        let found: bool = sqlx::query_scalar(
            r#"
            SELECT EXISTS (
                SELECT 1 FROM student_attempts
                WHERE test_id = $1 AND roll_no = $2 AND section = $3
            )
            "#,
        )
        .bind(test_id)
        .bind(roll_no)
        .bind(section)
        .fetch_one(&self.pool)
        .await?;
        Ok(found)
    }

    async fn create(&self, attempt: NewAttempt) -> Result<StudentAttempt> {
        let row = sqlx::query_as::<_, AttemptRow>(
            r#"
            INSERT INTO student_attempts (
                test_id, roll_no, student_name, section, answers, score, completed_at
            ) VALUES ($1, $2, $3, $4, $5, $6, $7)
            RETURNING *
            "#,
        )
        .bind(attempt.test_id)
        .bind(&attempt.roll_no)
        .bind(&attempt.student_name)
        .bind(&attempt.section)
        .bind(Json(&attempt.answers))
        .bind(attempt.score)
        .bind(attempt.completed_at)
        .fetch_one(&self.pool)
        .await?;
        Ok(row.into())
    }

    async fn find(
        &self,
        test_id: i32,
        roll_no: &str,
        section: &str,
    ) -> Result<Option<StudentAttempt>> {
        let row = sqlx::query_as::<_, AttemptRow>(
            r#"
            SELECT * FROM student_attempts
            WHERE test_id = $1 AND roll_no = $2 AND section = $3
            "#,
        )
        .bind(test_id)
        .bind(roll_no)
        .bind(section)
        .fetch_optional(&self.pool)
        .await?;
        Ok(row.map(Into::into))
    }

    async fn list_for_class(&self, class_id: i32) -> Result<Vec<StudentAttempt>> {
        let rows = sqlx::query_as::<_, AttemptRow>(
            r#"
            SELECT a.*
            FROM student_attempts a
            JOIN tests t ON t.id = a.test_id
            WHERE t.class_id = $1
            ORDER BY a.id
            "#,
        )
        .bind(class_id)
        .fetch_all(&self.pool)
        .await?;
        Ok(rows.into_iter().map(Into::into).collect())
    }
}
