use async_trait::async_trait;
use sqlx::PgPool;

use crate::error::Result;
use crate::models::class::Class;
use crate::models::subject::Subject;
use crate::repositories::CatalogRepository;

#[derive(Clone)]
pub struct PgCatalogRepository {
    pool: PgPool,
}

impl PgCatalogRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl CatalogRepository for PgCatalogRepository {
    async fn list_classes(&self) -> Result<Vec<Class>> {
        let rows = sqlx::query_as::<_, Class>(r#"SELECT id, name FROM classes ORDER BY id"#)
            .fetch_all(&self.pool)
            .await?;
        Ok(rows)
    }

    async fn create_class(&self, name: &str) -> Result<Class> {
        let row = sqlx::query_as::<_, Class>(
            r#"INSERT INTO classes (name) VALUES ($1) RETURNING id, name"#,
        )
        .bind(name)
        .fetch_one(&self.pool)
        .await?;
        Ok(row)
    }

    async fn find_class(&self, id: i32) -> Result<Option<Class>> {
        let row = sqlx::query_as::<_, Class>(r#"SELECT id, name FROM classes WHERE id = $1"#)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(row)
    }

    async fn list_subjects(&self) -> Result<Vec<Subject>> {
        let rows = sqlx::query_as::<_, Subject>(r#"SELECT id, name FROM subjects ORDER BY id"#)
            .fetch_all(&self.pool)
            .await?;
        Ok(rows)
    }

    async fn create_subject(&self, name: &str) -> Result<Subject> {
        let row = sqlx::query_as::<_, Subject>(
            r#"INSERT INTO subjects (name) VALUES ($1) RETURNING id, name"#,
        )
        .bind(name)
        .fetch_one(&self.pool)
        .await?;
        Ok(row)
    }

    async fn find_subject(&self, id: i32) -> Result<Option<Subject>> {
        let row = sqlx::query_as::<_, Subject>(r#"SELECT id, name FROM subjects WHERE id = $1"#)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(row)
    }
}
