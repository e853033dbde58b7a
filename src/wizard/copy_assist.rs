use super::state::WizardState;
use crate::ai::{copy_messages, parse_generated_copy, AiError, GeneratedCopy, TextGenerator};
use serde::{Deserialize, Serialize};

pub const MIN_DESCRIPTION_CHARS: usize = 10;
pub const DEFAULT_MAX_TOKENS: u32 = 500;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CopyAssistRequest {
    #[serde(default)]
    pub business_description: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub industry: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub business_name: Option<String>,
}

impl CopyAssistRequest {
    pub fn from_state(state: &WizardState) -> Self {
        Self {
            business_description: state.description.clone(),
            industry: non_empty(&state.industry),
            business_name: non_empty(&state.business_name),
        }
    }
}

fn non_empty(value: &str) -> Option<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}

#[derive(Debug, thiserror::Error)]
pub enum CopyAssistError {
    #[error("Please provide a more detailed business description (at least 10 characters).")]
    DescriptionTooShort,
    #[error("AI not available. Configure a text generation endpoint for this site.")]
    Unavailable,
    #[error("Failed to parse AI response. Please try again.")]
    Parse { reason: String },
    #[error("Failed to generate content. Please try again.")]
    Generation(#[source] AiError),
}

impl CopyAssistError {
    pub fn status_code(&self) -> u16 {
        match self {
            CopyAssistError::DescriptionTooShort => 400,
            CopyAssistError::Unavailable => 503,
            CopyAssistError::Parse { .. } | CopyAssistError::Generation(_) => 500,
        }
    }

    /// Operator-facing detail for logs. The display text is what users see.
    pub fn detail(&self) -> String {
        match self {
            CopyAssistError::Parse { reason } => reason.clone(),
            CopyAssistError::Generation(err) => err.to_string(),
            other => other.to_string(),
        }
    }
}

pub fn description_is_sufficient(description: &str) -> bool {
    description.trim().chars().count() >= MIN_DESCRIPTION_CHARS
}

pub struct CopyAssistClient<'a> {
    generator: &'a dyn TextGenerator,
    max_tokens: u32,
}

impl<'a> CopyAssistClient<'a> {
    pub fn new(generator: &'a dyn TextGenerator) -> Self {
        Self {
            generator,
            max_tokens: DEFAULT_MAX_TOKENS,
        }
    }

    pub fn with_max_tokens(mut self, max_tokens: u32) -> Self {
        self.max_tokens = max_tokens;
        self
    }

    /// Short descriptions fail locally and never reach the generator.
    pub fn generate(&self, request: &CopyAssistRequest) -> Result<GeneratedCopy, CopyAssistError> {
        if !description_is_sufficient(&request.business_description) {
            return Err(CopyAssistError::DescriptionTooShort);
        }

        let messages = copy_messages(
            &request.business_description,
            request.industry.as_deref(),
            request.business_name.as_deref(),
        );
        let reply = self
            .generator
            .generate_text(&messages, self.max_tokens)
            .map_err(CopyAssistError::Generation)?;
        parse_generated_copy(&reply).map_err(|reason| CopyAssistError::Parse { reason })
    }
}

/// Only the tagline flows back into the form. An empty suggestion keeps the
/// current value.
pub fn merge_generated_copy(state: &WizardState, copy: &GeneratedCopy) -> WizardState {
    if copy.tagline.trim().is_empty() {
        return state.clone();
    }
    state.with_field(super::state::WizardField::Tagline, copy.tagline.trim())
}
