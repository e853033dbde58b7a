use super::state::WizardState;
use super::validation::{validate_submission, ValidationError};
use crate::shared::TenantId;
use crate::store::{
    ConfigStore, SetupRecordInput, StoreError, UpsertOutcome, DEFAULT_PRIMARY_COLOR,
    DEFAULT_SECONDARY_COLOR,
};

pub const PENDING_ROUTE: &str = "/setup/pending";

#[derive(Debug, thiserror::Error)]
pub enum SubmissionError {
    #[error(transparent)]
    Validation(#[from] ValidationError),
    #[error("Failed to save configuration. Make sure the database tables exist.")]
    Persistence(#[source] StoreError),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PendingRedirect {
    pub business_name: String,
    pub email: String,
    pub outcome: UpsertOutcome,
}

impl PendingRedirect {
    pub fn location(&self) -> String {
        format!(
            "{PENDING_ROUTE}?name={}&email={}",
            urlencoding::encode(&self.business_name),
            urlencoding::encode(&self.email)
        )
    }
}

pub(crate) fn optional(value: &str) -> Option<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}

pub(crate) fn color_or_default(value: &str, default: &str) -> String {
    optional(value).unwrap_or_else(|| default.to_string())
}

pub fn record_input_from_state(state: &WizardState) -> SetupRecordInput {
    SetupRecordInput {
        business_name: state.business_name.trim().to_string(),
        tagline: optional(&state.tagline),
        description: optional(&state.description),
        industry: optional(&state.industry),
        primary_color: color_or_default(&state.primary_color, DEFAULT_PRIMARY_COLOR),
        secondary_color: color_or_default(&state.secondary_color, DEFAULT_SECONDARY_COLOR),
        email: optional(&state.email),
        phone: optional(&state.phone),
        address: optional(&state.address),
        email_notifications_enabled: state.enable_email,
        product_schema: state.is_retail().then(|| state.product_schema_json()),
    }
}

/// Re-validates, then writes the whole state as a pending configuration.
/// Resubmitting overwrites the tenant's record and leaves it pending.
pub fn submit(
    store: &dyn ConfigStore,
    tenant_id: &TenantId,
    state: &WizardState,
) -> Result<PendingRedirect, SubmissionError> {
    validate_submission(state)?;
    let input = record_input_from_state(state);
    let outcome = store
        .upsert_setup(tenant_id, &input)
        .map_err(SubmissionError::Persistence)?;
    Ok(PendingRedirect {
        business_name: input.business_name,
        email: input.email.unwrap_or_default(),
        outcome,
    })
}
