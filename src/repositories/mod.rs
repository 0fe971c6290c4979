//! Storage seams. Services only talk to these traits; `database` provides the
//! PostgreSQL implementations and tests substitute mocks or in-memory stores.

use std::sync::Arc;

use async_trait::async_trait;
use sqlx::PgPool;

use crate::database::{
    account_repo::PgAccountRepository, attempt_repo::PgAttemptRepository,
    catalog_repo::PgCatalogRepository, question_repo::PgQuestionRepository,
    test_repo::PgTestRepository,
};
use crate::error::Result;
use crate::models::admin::Admin;
use crate::models::class::Class;
use crate::models::question::{NewQuestion, Question};
use crate::models::student_attempt::{NewAttempt, StudentAttempt};
use crate::models::subject::Subject;
use crate::models::teacher::{Teacher, TeacherAssignments};
use crate::models::test::{NewTest, Test};

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait AccountRepository: Send + Sync {
    async fn find_admin(&self, username: &str) -> Result<Option<Admin>>;
    async fn create_admin(&self, username: &str, password_hash: &str) -> Result<Admin>;
    async fn find_teacher(&self, username: &str) -> Result<Option<Teacher>>;
    /// Unknown class or subject ids are ignored.
    async fn create_teacher(
        &self,
        username: &str,
        password_hash: &str,
        class_ids: &[i32],
        subject_ids: &[i32],
    ) -> Result<Teacher>;
    async fn list_teachers(&self) -> Result<Vec<Teacher>>;
    async fn teacher_assignments(&self, teacher_id: i32) -> Result<TeacherAssignments>;
}

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CatalogRepository: Send + Sync {
    async fn list_classes(&self) -> Result<Vec<Class>>;
    async fn create_class(&self, name: &str) -> Result<Class>;
    async fn find_class(&self, id: i32) -> Result<Option<Class>>;
    async fn list_subjects(&self) -> Result<Vec<Subject>>;
    async fn create_subject(&self, name: &str) -> Result<Subject>;
    async fn find_subject(&self, id: i32) -> Result<Option<Subject>>;
}

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait TestRepository: Send + Sync {
    async fn create(&self, test: NewTest) -> Result<Test>;
    async fn find(&self, id: i32) -> Result<Option<Test>>;
    async fn set_active(&self, id: i32, is_active: bool) -> Result<Option<Test>>;
    /// Lowest-id active test of the class.
    async fn first_active_for_class(&self, class_id: i32) -> Result<Option<Test>>;
    async fn list_active_for(&self, class_ids: &[i32], subject_ids: &[i32]) -> Result<Vec<Test>>;
}

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait QuestionRepository: Send + Sync {
    async fn create(&self, question: NewQuestion) -> Result<Question>;
    async fn list_for_test(&self, test_id: i32) -> Result<Vec<Question>>;
    async fn count_for_test(&self, test_id: i32) -> Result<i64>;
}

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait AttemptRepository: Send + Sync {
    async fn exists(&self, test_id: i32, roll_no: &str, section: &str) -> Result<bool>;
    /// Fails with `Error::AlreadyAttempted` when the (test, roll_no, section) key is taken.
    async fn create(&self, attempt: NewAttempt) -> Result<StudentAttempt>;
    async fn find(&self, test_id: i32, roll_no: &str, section: &str)
        -> Result<Option<StudentAttempt>>;
    /// Attempts of every test in the class, in insertion order.
    async fn list_for_class(&self, class_id: i32) -> Result<Vec<StudentAttempt>>;
}

#[derive(Clone)]
pub struct Repositories {
    pub accounts: Arc<dyn AccountRepository>,
    pub catalog: Arc<dyn CatalogRepository>,
    pub tests: Arc<dyn TestRepository>,
    pub questions: Arc<dyn QuestionRepository>,
    pub attempts: Arc<dyn AttemptRepository>,
}

impl Repositories {
    pub fn postgres(pool: PgPool) -> Self {
        Self {
            accounts: Arc::new(PgAccountRepository::new(pool.clone())),
            catalog: Arc::new(PgCatalogRepository::new(pool.clone())),
            tests: Arc::new(PgTestRepository::new(pool.clone())),
            questions: Arc::new(PgQuestionRepository::new(pool.clone())),
            attempts: Arc::new(PgAttemptRepository::new(pool)),
        }
    }
}
