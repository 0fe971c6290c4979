use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use crate::models::class::Class;
use crate::models::subject::Subject;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Teacher {
    pub id: i32,
    pub username: String,
    #[serde(skip_serializing)]
    pub password_hash: String,
}

/// Classes and subjects a teacher may author questions for.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TeacherAssignments {
    pub classes: Vec<Class>,
    pub subjects: Vec<Subject>,
}

impl TeacherAssignments {
    pub fn class_ids(&self) -> Vec<i32> {
        self.classes.iter().map(|c| c.id).collect()
    }

    pub fn subject_ids(&self) -> Vec<i32> {
        self.subjects.iter().map(|s| s.id).collect()
    }

    /// A teacher covers a test only when assigned to both its class and its subject.
    pub fn covers(&self, class_id: i32, subject_id: i32) -> bool {
        self.classes.iter().any(|c| c.id == class_id)
            && self.subjects.iter().any(|s| s.id == subject_id)
    }
}
