use std::collections::HashMap;

use crate::models::question::Question;
use crate::models::student_attempt::AnswerSheet;

/// Question id (decimal string) to the index of its correct option.
pub type AnswerKey = HashMap<String, i32>;

pub struct GradingService;

impl GradingService {
    pub fn answer_key(questions: &[Question]) -> AnswerKey {
        questions
            .iter()
            .map(|q| (q.id.to_string(), q.correct_option))
            .collect()
    }

    /// One point per answer whose chosen option matches the key. Ids missing
    /// from the key score nothing.
    pub fn score(answers: &AnswerSheet, key: &AnswerKey) -> i32 {
        answers
            .iter()
            .filter(|&(question_id, chosen)| key.get(question_id) == Some(chosen))
            .count() as i32
    }
}
