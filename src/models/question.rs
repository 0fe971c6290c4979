use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum QuestionType {
    Text,
    Image,
    Video,
    Audio,
}

impl QuestionType {
    pub fn as_str(&self) -> &'static str {
        match self {
            QuestionType::Text => "text",
            QuestionType::Image => "image",
            QuestionType::Video => "video",
            QuestionType::Audio => "audio",
        }
    }
}

impl std::fmt::Display for QuestionType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for QuestionType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "text" => Ok(QuestionType::Text),
            "image" => Ok(QuestionType::Image),
            "video" => Ok(QuestionType::Video),
            "audio" => Ok(QuestionType::Audio),
            other => Err(format!("unknown question type '{}'", other)),
        }
    }
}

/// A stored question, answer key included. Never serialize this on a student route.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Question {
    pub id: i32,
    pub test_id: i32,
    pub teacher_id: i32,
    pub question_text: String,
    pub question_type: QuestionType,
    pub media_url: Option<String>,
    pub options: Vec<String>,
    pub correct_option: i32,
}

#[derive(Debug, Clone)]
pub struct NewQuestion {
    pub test_id: i32,
    pub teacher_id: i32,
    pub question_text: String,
    pub question_type: QuestionType,
    pub media_url: Option<String>,
    pub options: Vec<String>,
    pub correct_option: i32,
}
