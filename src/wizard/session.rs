use super::copy_assist::{merge_generated_copy, CopyAssistClient, CopyAssistError, CopyAssistRequest};
use super::navigation::{NavError, NavOutcome, WizardNav, WizardStep};
use super::state::{ColorPreset, ProductField, StateError, WizardField, WizardState};
use super::submission::{submit, PendingRedirect, SubmissionError};
use super::validation::can_advance;
use crate::ai::GeneratedCopy;
use crate::shared::TenantId;
use crate::store::ConfigStore;

#[derive(Debug, thiserror::Error)]
pub enum SessionError {
    #[error("another {operation} request is already in flight")]
    Busy { operation: &'static str },
    #[error(transparent)]
    Submission(#[from] SubmissionError),
}

/// Drives one pass through the wizard. Every state update re-clamps the
/// step cursor so it always points at an active step.
#[derive(Debug, Clone, Default)]
pub struct WizardSession {
    state: WizardState,
    nav: WizardNav,
    ai_error: Option<String>,
    submit_error: Option<String>,
    generating: bool,
    submitting: bool,
}

impl WizardSession {
    pub fn new() -> Self {
        Self::default()
    }

    /// Rebuilds a session from state carried by a form post.
    pub fn resume(state: WizardState, position: usize) -> Self {
        let nav = WizardNav::at_position(position, &state);
        Self {
            state,
            nav,
            ..Self::default()
        }
    }

    pub fn state(&self) -> &WizardState {
        &self.state
    }

    pub fn position(&self) -> usize {
        self.nav.position()
    }

    pub fn current_step(&self) -> WizardStep {
        self.nav.current_step(&self.state)
    }

    pub fn is_last_step(&self) -> bool {
        self.nav.is_last(&self.state)
    }

    pub fn can_advance(&self) -> bool {
        can_advance(self.current_step(), &self.state)
    }

    pub fn ai_error(&self) -> Option<&str> {
        self.ai_error.as_deref()
    }

    pub fn submit_error(&self) -> Option<&str> {
        self.submit_error.as_deref()
    }

    pub fn is_generating(&self) -> bool {
        self.generating
    }

    pub fn is_submitting(&self) -> bool {
        self.submitting
    }

    fn replace_state(&mut self, next: WizardState) {
        self.state = next;
        self.nav.reconcile(&self.state);
    }

    pub fn update_field(&mut self, field: WizardField, value: impl Into<String>) {
        let next = self.state.with_field(field, value);
        self.replace_state(next);
    }

    pub fn set_email_enabled(&mut self, enabled: bool) {
        let next = self.state.with_email_enabled(enabled);
        self.replace_state(next);
    }

    pub fn apply_color_preset(&mut self, preset: &ColorPreset) {
        let next = self.state.with_color_preset(preset);
        self.replace_state(next);
    }

    pub fn add_product_field(&mut self) {
        let next = self.state.with_product_field_added();
        self.replace_state(next);
    }

    pub fn update_product_field(
        &mut self,
        index: usize,
        field: ProductField,
    ) -> Result<(), StateError> {
        let next = self.state.with_product_field_updated(index, field)?;
        self.replace_state(next);
        Ok(())
    }

    pub fn remove_product_field(&mut self, index: usize) -> Result<(), StateError> {
        let next = self.state.with_product_field_removed(index)?;
        self.replace_state(next);
        Ok(())
    }

    pub fn next(&mut self) -> Result<NavOutcome, NavError> {
        self.nav.next(&self.state)
    }

    pub fn back(&mut self) -> Result<WizardStep, NavError> {
        self.nav.back(&self.state)
    }

    pub fn begin_generate(&mut self) -> Result<CopyAssistRequest, SessionError> {
        if self.generating {
            return Err(SessionError::Busy {
                operation: "generate",
            });
        }
        self.generating = true;
        self.ai_error = None;
        Ok(CopyAssistRequest::from_state(&self.state))
    }

    /// Failures land in the AI error slot and never block navigation.
    pub fn finish_generate(
        &mut self,
        result: Result<GeneratedCopy, CopyAssistError>,
    ) -> Option<GeneratedCopy> {
        self.generating = false;
        match result {
            Ok(copy) => {
                let next = merge_generated_copy(&self.state, &copy);
                self.replace_state(next);
                Some(copy)
            }
            Err(err) => {
                self.ai_error = Some(err.to_string());
                None
            }
        }
    }

    pub fn generate_with(
        &mut self,
        client: &CopyAssistClient<'_>,
    ) -> Result<Option<GeneratedCopy>, SessionError> {
        let request = self.begin_generate()?;
        Ok(self.finish_generate(client.generate(&request)))
    }

    /// Records an unavailable generator the same way as a failed call.
    pub fn report_generate_unavailable(&mut self) {
        self.generating = false;
        self.ai_error = Some(CopyAssistError::Unavailable.to_string());
    }

    pub fn begin_submit(&mut self) -> Result<(), SessionError> {
        if self.submitting {
            return Err(SessionError::Busy {
                operation: "submit",
            });
        }
        self.submitting = true;
        self.submit_error = None;
        Ok(())
    }

    pub fn finish_submit(
        &mut self,
        result: Result<PendingRedirect, SubmissionError>,
    ) -> Result<PendingRedirect, SessionError> {
        self.submitting = false;
        result.map_err(|err| {
            self.submit_error = Some(err.to_string());
            SessionError::Submission(err)
        })
    }

    pub fn submit_with(
        &mut self,
        store: &dyn ConfigStore,
        tenant_id: &TenantId,
    ) -> Result<PendingRedirect, SessionError> {
        self.begin_submit()?;
        let result = submit(store, tenant_id, &self.state);
        self.finish_submit(result)
    }
}
