use super::navigation::WizardStep;
use super::state::WizardState;

pub const MIN_BUSINESS_NAME_CHARS: usize = 2;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    #[error("Business name is required")]
    BusinessNameRequired,
}

/// The single business-name rule shared by step gating and submission.
pub fn validate_business_name(name: &str) -> Result<(), ValidationError> {
    if name.trim().chars().count() < MIN_BUSINESS_NAME_CHARS {
        return Err(ValidationError::BusinessNameRequired);
    }
    Ok(())
}

/// Only the first step is gated; the rest are optional.
pub fn can_advance(step: WizardStep, state: &WizardState) -> bool {
    match step {
        WizardStep::BusinessInfo => validate_business_name(&state.business_name).is_ok(),
        WizardStep::Contact
        | WizardStep::Branding
        | WizardStep::Email
        | WizardStep::ProductSchema => true,
    }
}

pub fn validate_submission(state: &WizardState) -> Result<(), ValidationError> {
    validate_business_name(&state.business_name)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn whitespace_does_not_count_toward_length() {
        assert!(validate_business_name("  A  ").is_err());
        assert!(validate_business_name(" AB ").is_ok());
    }

    #[test]
    fn multibyte_names_count_characters() {
        assert!(validate_business_name("é").is_err());
        assert!(validate_business_name("日本").is_ok());
    }
}
