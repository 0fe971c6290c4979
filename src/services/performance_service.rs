use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::models::student_attempt::StudentAttempt;

pub const TOP_PERFORMER_COUNT: usize = 3;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct TopPerformer {
    pub student_name: String,
    pub roll_no: String,
    pub score: i32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PerformanceStats {
    pub average_score: f64,
    pub total_students: usize,
    pub top_performers: Vec<TopPerformer>,
}

pub struct PerformanceService;

impl PerformanceService {
    pub fn summarize(attempts: &[StudentAttempt]) -> PerformanceStats {
        if attempts.is_empty() {
            return PerformanceStats {
                average_score: 0.0,
                total_students: 0,
                top_performers: Vec::new(),
            };
        }

        let total: i64 = attempts.iter().map(|a| i64::from(a.score)).sum();
        // banker's rounding: 1/8 -> 0.12, 5/8 -> 0.62
        let average =
            (Decimal::from(total) / Decimal::from(attempts.len() as u64)).round_dp(2);

        // sort_by is stable, so equal scores keep their input order
        let mut ranked: Vec<&StudentAttempt> = attempts.iter().collect();
        ranked.sort_by(|a, b| b.score.cmp(&a.score));

        let top_performers = ranked
            .into_iter()
            .take(TOP_PERFORMER_COUNT)
            .map(|a| TopPerformer {
                student_name: a.student_name.clone(),
                roll_no: a.roll_no.clone(),
                score: a.score,
            })
            .collect();

        PerformanceStats {
            average_score: average.to_f64().unwrap_or(0.0),
            total_students: attempts.len(),
            top_performers,
        }
    }
}
