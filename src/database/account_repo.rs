use async_trait::async_trait;
use sqlx::PgPool;

use crate::error::Result;
use crate::models::admin::Admin;
use crate::models::class::Class;
use crate::models::subject::Subject;
use crate::models::teacher::{Teacher, TeacherAssignments};
use crate::repositories::AccountRepository;

#[derive(Clone)]
pub struct PgAccountRepository {
    pool: PgPool,
}

impl PgAccountRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl AccountRepository for PgAccountRepository {
    async fn find_admin(&self, username: &str) -> Result<Option<Admin>> {
        let admin = sqlx::query_as::<_, Admin>(
            r#"SELECT id, username, password_hash FROM admins WHERE username = $1"#,
        )
        .bind(username)
        .fetch_optional(&self.pool)
        .await?;
        Ok(admin)
    }

    async fn create_admin(&self, username: &str, password_hash: &str) -> Result<Admin> {
        let admin = sqlx::query_as::<_, Admin>(
            r#"
            INSERT INTO admins (username, password_hash)
            VALUES ($1, $2)
            RETURNING id, username, password_hash
            "#,
        )
        .bind(username)
        .bind(password_hash)
        .fetch_one(&self.pool)
        .await?;
        Ok(admin)
    }

    async fn find_teacher(&self, username: &str) -> Result<Option<Teacher>> {
        let teacher = sqlx::query_as::<_, Teacher>(
            r#"SELECT id, username, password_hash FROM teachers WHERE username = $1"#,
        )
        .bind(username)
        .fetch_optional(&self.pool)
        .await?;
        Ok(teacher)
    }

    async fn create_teacher(
        &self,
        username: &str,
        password_hash: &str,
        class_ids: &[i32],
        subject_ids: &[i32],
    ) -> Result<Teacher> {
        let mut tx = self.pool.begin().await?;

        let teacher = sqlx::query_as::<_, Teacher>(
            r#"
            INSERT INTO teachers (username, password_hash)
            VALUES ($1, $2)
            RETURNING id, username, password_hash
            "#,
        )
        .bind(username)
        .bind(password_hash)
        .fetch_one(&mut *tx)
        .await?;

        sqlx::query(
            r#"
            INSERT INTO teacher_classes (teacher_id, class_id)
            SELECT $1, id FROM classes WHERE id = ANY($2)
            "#,
        )
        .bind(teacher.id)
        .bind(class_ids.to_vec())
        .execute(&mut *tx)
        .await?;

        sqlx::query(
            r#"
            INSERT INTO teacher_subjects (teacher_id, subject_id)
            SELECT $1, id FROM subjects WHERE id = ANY($2)
            "#,
        )
        .bind(teacher.id)
        .bind(subject_ids.to_vec())
        .execute(&mut *tx)
        .await?;

        tx.commit().await?;
        Ok(teacher)
    }

    async fn list_teachers(&self) -> Result<Vec<Teacher>> {
        let teachers = sqlx::query_as::<_, Teacher>(
            r#"SELECT id, username, password_hash FROM teachers ORDER BY id"#,
        )
        .fetch_all(&self.pool)
        .await?;
        Ok(teachers)
    }

    async fn teacher_assignments(&self, teacher_id: i32) -> Result<TeacherAssignments> {
        let classes = sqlx::query_as::<_, Class>(
            r#"
            SELECT c.id, c.name
            FROM classes c
            JOIN teacher_classes tc ON tc.class_id = c.id
            WHERE tc.teacher_id = $1
            ORDER BY c.id
            "#,
        )
        .bind(teacher_id)
        .fetch_all(&self.pool)
        .await?;

        let subjects = sqlx::query_as::<_, Subject>(
            r#"
            SELECT s.id, s.name
            FROM subjects s
            JOIN teacher_subjects ts ON ts.subject_id = s.id
            WHERE ts.teacher_id = $1
            ORDER BY s.id
            "#,
        )
        .bind(teacher_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(TeacherAssignments { classes, subjects })
    }
}
