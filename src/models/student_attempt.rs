use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Question id (decimal string) to chosen option index.
pub type AnswerSheet = HashMap<String, i32>;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StudentAttempt {
    pub id: i32,
    pub test_id: i32,
    pub roll_no: String,
    pub student_name: String,
    pub section: String,
    pub answers: AnswerSheet,
    pub score: i32,
    pub completed_at: DateTime<Utc>,
}

#[derive(Debug, Clone)]
pub struct NewAttempt {
    pub test_id: i32,
    pub roll_no: String,
    pub student_name: String,
    pub section: String,
    pub answers: AnswerSheet,
    pub score: i32,
    pub completed_at: DateTime<Utc>,
}
