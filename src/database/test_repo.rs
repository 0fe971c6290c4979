use async_trait::async_trait;
use sqlx::PgPool;

use crate::error::Result;
use crate::models::test::{NewTest, Test};
use crate::repositories::TestRepository;

#[derive(Clone)]
pub struct PgTestRepository {
    pool: PgPool,
}

impl PgTestRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl TestRepository for PgTestRepository {
    async fn create(&self, test: NewTest) -> Result<Test> {
        let row = sqlx::query_as::<_, Test>(
            r#"
            INSERT INTO tests (class_id, subject_id, test_date, is_active)
            VALUES ($1, $2, $3, TRUE)
            RETURNING id, class_id, subject_id, test_date, is_active, created_at
            "#,
        )
        .bind(test.class_id)
        .bind(test.subject_id)
        .bind(test.test_date)
        .fetch_one(&self.pool)
        .await?;
        Ok(row)
    }

    async fn find(&self, id: i32) -> Result<Option<Test>> {
        let row = sqlx::query_as::<_, Test>(
            r#"
            SELECT id, class_id, subject_id, test_date, is_active, created_at
            FROM tests WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(row)
    }

    async fn set_active(&self, id: i32, is_active: bool) -> Result<Option<Test>> {
        let row = sqlx::query_as::<_, Test>(
            r#"
            UPDATE tests SET is_active = $2
            WHERE id = $1
            RETURNING id, class_id, subject_id, test_date, is_active, created_at
            "#,
        )
        .bind(id)
        .bind(is_active)
        .fetch_optional(&self.pool)
        .await?;
        Ok(row)
    }

    async fn first_active_for_class(&self, class_id: i32) -> Result<Option<Test>> {
        let row = sqlx::query_as::<_, Test>(
            r#"
            SELECT id, class_id, subject_id, test_date, is_active, created_at
            FROM tests
            WHERE class_id = $1 AND is_active
            ORDER BY id
            LIMIT 1
            "#,
        )
        .bind(class_id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(row)
    }

    async fn list_active_for(&self, class_ids: &[i32], subject_ids: &[i32]) -> Result<Vec<Test>> {
        let rows = sqlx::query_as::<_, Test>(
            r#"
            SELECT id, class_id, subject_id, test_date, is_active, created_at
            FROM tests
            WHERE is_active
              AND class_id = ANY($1)
              AND subject_id = ANY($2)
            ORDER BY id
            "#,
        )
        .bind(class_ids.to_vec())
        .bind(subject_ids.to_vec())
        .fetch_all(&self.pool)
        .await?;
        Ok(rows)
    }
}
