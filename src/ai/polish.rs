use super::{AiError, ChatMessage, TextGenerator};
use serde::{Deserialize, Serialize};

pub const MAX_POLISH_CHARS: usize = 2000;

pub const POLISH_SYSTEM_PROMPT: &str = "You are a professional marketing copywriter for a small business. \
Rewrite the rough, informal text you are given as polished marketing copy. \
Keep the original meaning and key facts. Use concise, benefit-focused language \
that reads as professional but approachable and fits a website, menu or flyer. \
Respond with the polished text only.";

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct PolishRequest {
    #[serde(default)]
    pub text: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PolishedText {
    pub polished: String,
    pub original_length: usize,
    pub polished_length: usize,
}

#[derive(Debug, thiserror::Error)]
pub enum PolishError {
    #[error("Missing required field: text")]
    MissingText,
    #[error("Text too long. Maximum {MAX_POLISH_CHARS} characters.")]
    TooLong,
    #[error("Text cannot be empty")]
    Empty,
    #[error("Failed to process text with AI")]
    Generation(#[source] AiError),
}

impl PolishError {
    pub fn status_code(&self) -> u16 {
        match self {
            PolishError::MissingText | PolishError::TooLong | PolishError::Empty => 400,
            PolishError::Generation(_) => 500,
        }
    }
}

pub fn polish_messages(text: &str) -> Vec<ChatMessage> {
    vec![ChatMessage::system(POLISH_SYSTEM_PROMPT), ChatMessage::user(text)]
}

/// Checks the input before any upstream call, then returns the trimmed reply.
pub fn polish_text(
    generator: &dyn TextGenerator,
    request: &PolishRequest,
    max_tokens: u32,
) -> Result<PolishedText, PolishError> {
    let text = request.text.as_deref().ok_or(PolishError::MissingText)?;
    if text.is_empty() {
        return Err(PolishError::MissingText);
    }
    let original_length = text.chars().count();
    if original_length > MAX_POLISH_CHARS {
        return Err(PolishError::TooLong);
    }
    if text.trim().is_empty() {
        return Err(PolishError::Empty);
    }

    let reply = generator
        .generate_text(&polish_messages(text), max_tokens)
        .map_err(PolishError::Generation)?;
    let polished = reply.trim().to_string();
    Ok(PolishedText {
        polished_length: polished.chars().count(),
        polished,
        original_length,
    })
}
