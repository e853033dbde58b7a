pub mod client;
pub mod output_parse;
pub mod polish;
pub mod prompt;
pub mod types;

pub use client::HttpTextGenerator;
pub use output_parse::{extract_first_json_object, parse_generated_copy};
pub use polish::{polish_text, PolishError, PolishRequest, PolishedText, MAX_POLISH_CHARS};
pub use prompt::{build_copy_prompt, copy_messages, COPYWRITER_SYSTEM_PROMPT};
pub use types::{AiError, ChatMessage, GeneratedCopy, ServiceCopy};

/// Text-generation seam. The HTTP client implements it for production and
/// tests inject fakes.
pub trait TextGenerator: Send + Sync {
    fn generate_text(&self, messages: &[ChatMessage], max_tokens: u32) -> Result<String, AiError>;
}
