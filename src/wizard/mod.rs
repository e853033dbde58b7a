pub mod copy_assist;
pub mod navigation;
pub mod session;
pub mod state;
pub mod submission;
pub mod validation;

pub use copy_assist::{
    merge_generated_copy, CopyAssistClient, CopyAssistError, CopyAssistRequest,
    MIN_DESCRIPTION_CHARS,
};
pub use navigation::{active_steps, NavError, NavOutcome, WizardNav, WizardStep, FIXED_STEPS};
pub use session::{SessionError, WizardSession};
pub use state::{
    color_preset_by_name, ColorPreset, ProductField, ProductFieldType, StateError, WizardField,
    WizardState, ALL_WIZARD_FIELDS, COLOR_PRESETS, INDUSTRIES, RETAIL_INDUSTRY,
};
pub use submission::{submit, PendingRedirect, SubmissionError, PENDING_ROUTE};
pub use validation::{can_advance, validate_business_name, validate_submission, ValidationError};
