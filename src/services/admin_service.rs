use std::sync::Arc;

use crate::dto::admin_dto::{CreateTeacherPayload, PerformanceResponse, ToppersResponse};
use crate::error::{Error, Result};
use crate::models::class::Class;
use crate::models::subject::Subject;
use crate::models::teacher::{Teacher, TeacherAssignments};
use crate::repositories::{AccountRepository, AttemptRepository, CatalogRepository};
use crate::services::performance_service::PerformanceService;
use crate::utils::crypto::hash_password;

#[derive(Clone)]
pub struct AdminService {
    accounts: Arc<dyn AccountRepository>,
    catalog: Arc<dyn CatalogRepository>,
    attempts: Arc<dyn AttemptRepository>,
}

impl AdminService {
    pub fn new(
        accounts: Arc<dyn AccountRepository>,
        catalog: Arc<dyn CatalogRepository>,
        attempts: Arc<dyn AttemptRepository>,
    ) -> Self {
        Self {
            accounts,
            catalog,
            attempts,
        }
    }

    pub async fn list_classes(&self) -> Result<Vec<Class>> {
        self.catalog.list_classes().await
    }

    pub async fn create_class(&self, name: &str) -> Result<Class> {
        let class = self.catalog.create_class(name.trim()).await?;
        tracing::info!(class_id = class.id, name = %class.name, "class created");
        Ok(class)
    }

    pub async fn list_subjects(&self) -> Result<Vec<Subject>> {
        self.catalog.list_subjects().await
    }

    pub async fn create_subject(&self, name: &str) -> Result<Subject> {
        let subject = self.catalog.create_subject(name.trim()).await?;
        tracing::info!(subject_id = subject.id, name = %subject.name, "subject created");
        Ok(subject)
    }

    pub async fn create_teacher(
        &self,
        payload: CreateTeacherPayload,
    ) -> Result<(Teacher, TeacherAssignments)> {
        if self.accounts.find_teacher(&payload.username).await?.is_some() {
            return Err(Error::BadRequest("Username already registered".to_string()));
        }

        let password_hash = hash_password(&payload.password)?;
        let teacher = self
            .accounts
            .create_teacher(
                &payload.username,
                &password_hash,
                &payload.class_ids,
                &payload.subject_ids,
            )
            .await?;
        let assignments = self.accounts.teacher_assignments(teacher.id).await?;

        tracing::info!(
            teacher_id = teacher.id,
            username = %teacher.username,
            classes = assignments.classes.len(),
            subjects = assignments.subjects.len(),
            "teacher created"
        );
        Ok((teacher, assignments))
    }

    pub async fn list_teachers(&self) -> Result<Vec<(Teacher, TeacherAssignments)>> {
        let teachers = self.accounts.list_teachers().await?;
        let mut out = Vec::with_capacity(teachers.len());
        for teacher in teachers {
            let assignments = self.accounts.teacher_assignments(teacher.id).await?;
            out.push((teacher, assignments));
        }
        Ok(out)
    }

    pub async fn class_performance(&self) -> Result<Vec<PerformanceResponse>> {
        let classes = self.catalog.list_classes().await?;
        let mut report = Vec::with_capacity(classes.len());
        for class in classes {
            let attempts = self.attempts.list_for_class(class.id).await?;
            let stats = PerformanceService::summarize(&attempts);
            report.push(PerformanceResponse::new(class.name, stats));
        }
        Ok(report)
    }

    pub async fn class_toppers(&self, class_id: i32) -> Result<ToppersResponse> {
        let class = self
            .catalog
            .find_class(class_id)
            .await?
            .ok_or_else(|| Error::NotFound("Class not found".to_string()))?;
        let attempts = self.attempts.list_for_class(class.id).await?;
        let stats = PerformanceService::summarize(&attempts);
        Ok(ToppersResponse {
            class_name: class.name,
            toppers: stats.top_performers,
        })
    }
}
