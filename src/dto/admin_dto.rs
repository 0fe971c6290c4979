use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use validator::Validate;

use crate::error::{Error, Result};
use crate::models::teacher::{Teacher, TeacherAssignments};
use crate::models::test::Test;
use crate::services::performance_service::{PerformanceStats, TopPerformer};

#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct CreateNamedPayload {
    #[validate(length(min = 1, max = 100))]
    pub name: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct NamedResponse {
    pub id: i32,
    pub name: String,
}

#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct CreateTeacherPayload {
    #[validate(length(min = 3, max = 64))]
    pub username: String,
    #[validate(length(min = 6))]
    pub password: String,
    #[serde(default)]
    pub class_ids: Vec<i32>,
    #[serde(default)]
    pub subject_ids: Vec<i32>,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct TeacherResponse {
    pub id: i32,
    pub username: String,
    pub classes: Vec<NamedResponse>,
    pub subjects: Vec<NamedResponse>,
}

impl From<(Teacher, TeacherAssignments)> for TeacherResponse {
    fn from((teacher, assignments): (Teacher, TeacherAssignments)) -> Self {
        Self {
            id: teacher.id,
            username: teacher.username,
            classes: assignments
                .classes
                .into_iter()
                .map(|c| NamedResponse { id: c.id, name: c.name })
                .collect(),
            subjects: assignments
                .subjects
                .into_iter()
                .map(|s| NamedResponse { id: s.id, name: s.name })
                .collect(),
        }
    }
}

#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct CreateTestPayload {
    pub class_id: i32,
    pub subject_id: i32,
    pub test_date: DateTime<Utc>,
}

#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct UpdateTestStatusPayload {
    pub is_active: bool,
}

/// `?is_active=` form of [`UpdateTestStatusPayload`].
#[derive(Debug, Clone, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct UpdateTestStatusQuery {
    pub is_active: Option<bool>,
}

impl UpdateTestStatusPayload {
    /// A JSON body wins over the query parameter.
    pub fn from_body_or_query(
        body: Option<UpdateTestStatusPayload>,
        query: UpdateTestStatusQuery,
    ) -> Result<Self> {
        match (body, query.is_active) {
            (Some(body), _) => Ok(body),
            (None, Some(is_active)) => Ok(Self { is_active }),
            (None, None) => Err(Error::BadRequest("is_active is required".to_string())),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct TestResponse {
    pub id: i32,
    pub class_id: i32,
    pub subject_id: i32,
    pub test_date: DateTime<Utc>,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
}

impl From<Test> for TestResponse {
    fn from(test: Test) -> Self {
        Self {
            id: test.id,
            class_id: test.class_id,
            subject_id: test.subject_id,
            test_date: test.test_date,
            is_active: test.is_active,
            created_at: test.created_at,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct PerformanceResponse {
    pub class_name: String,
    pub average_score: f64,
    pub total_students: usize,
    pub top_performers: Vec<TopPerformer>,
}

impl PerformanceResponse {
    pub fn new(class_name: String, stats: PerformanceStats) -> Self {
        Self {
            class_name,
            average_score: stats.average_score,
            total_students: stats.total_students,
            top_performers: stats.top_performers,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ToppersResponse {
    pub class_name: String,
    pub toppers: Vec<TopPerformer>,
}
