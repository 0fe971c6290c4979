use std::sync::Arc;

use crate::dto::admin_dto::CreateTestPayload;
use crate::error::{Error, Result};
use crate::models::test::{NewTest, Test};
use crate::repositories::{AccountRepository, CatalogRepository, TestRepository};

#[derive(Clone)]
pub struct TestService {
    tests: Arc<dyn TestRepository>,
    catalog: Arc<dyn CatalogRepository>,
    accounts: Arc<dyn AccountRepository>,
}

impl TestService {
    pub fn new(
        tests: Arc<dyn TestRepository>,
        catalog: Arc<dyn CatalogRepository>,
        accounts: Arc<dyn AccountRepository>,
    ) -> Self {
        Self {
            tests,
            catalog,
            accounts,
        }
    }

    pub async fn create_test(&self, payload: CreateTestPayload) -> Result<Test> {
        let class = self.catalog.find_class(payload.class_id).await?;
        let subject = self.catalog.find_subject(payload.subject_id).await?;
        if class.is_none() || subject.is_none() {
            return Err(Error::NotFound("Class or subject not found".to_string()));
        }

        let test = self
            .tests
            .create(NewTest {
                class_id: payload.class_id,
                subject_id: payload.subject_id,
                test_date: payload.test_date,
            })
            .await?;
        tracing::info!(
            test_id = test.id,
            class_id = test.class_id,
            subject_id = test.subject_id,
            "test created"
        );
        Ok(test)
    }

    pub async fn set_active(&self, test_id: i32, is_active: bool) -> Result<Test> {
        let test = self
            .tests
            .set_active(test_id, is_active)
            .await?
            .ok_or_else(|| Error::NotFound("Test not found".to_string()))?;
        tracing::info!(test_id, is_active, "test status updated");
        Ok(test)
    }

    /// Active tests in the teacher's classes and subjects.
    pub async fn list_for_teacher(&self, username: &str) -> Result<Vec<Test>> {
        let teacher = self
            .accounts
            .find_teacher(username)
            .await?
            .ok_or_else(|| Error::NotFound("Teacher not found".to_string()))?;
        let assignments = self.accounts.teacher_assignments(teacher.id).await?;
        if assignments.classes.is_empty() || assignments.subjects.is_empty() {
            return Ok(Vec::new());
        }
        self.tests
            .list_active_for(&assignments.class_ids(), &assignments.subject_ids())
            .await
    }
}
