use crate::models::question::QuestionType;

const IMAGE_EXTENSIONS: &[&str] = &[".jpg", ".jpeg", ".png", ".gif"];
const VIDEO_EXTENSIONS: &[&str] = &[".mp4", ".webm"];
const AUDIO_EXTENSIONS: &[&str] = &[".mp3", ".wav"];

/// Suffix check only; the URL is never fetched. Text questions accept no media.
pub fn validate_media_url(url: &str, question_type: QuestionType) -> bool {
    let allowed = match question_type {
        QuestionType::Image => IMAGE_EXTENSIONS,
        QuestionType::Video => VIDEO_EXTENSIONS,
        QuestionType::Audio => AUDIO_EXTENSIONS,
        QuestionType::Text => return false,
    };
    let url = url.to_ascii_lowercase();
    allowed.iter().any(|ext| url.ends_with(ext))
}
