use super::state::WizardState;
use super::validation::can_advance;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WizardStep {
    BusinessInfo,
    Contact,
    Branding,
    Email,
    ProductSchema,
}

pub const FIXED_STEPS: [WizardStep; 4] = [
    WizardStep::BusinessInfo,
    WizardStep::Contact,
    WizardStep::Branding,
    WizardStep::Email,
];

impl WizardStep {
    pub fn title(self) -> &'static str {
        match self {
            WizardStep::BusinessInfo => "Business Info",
            WizardStep::Contact => "Contact",
            WizardStep::Branding => "Branding",
            WizardStep::Email => "Email",
            WizardStep::ProductSchema => "Schema",
        }
    }

    fn as_str(self) -> &'static str {
        match self {
            WizardStep::BusinessInfo => "business_info",
            WizardStep::Contact => "contact",
            WizardStep::Branding => "branding",
            WizardStep::Email => "email",
            WizardStep::ProductSchema => "product_schema",
        }
    }
}

impl std::fmt::Display for WizardStep {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The fixed prefix, plus the product schema step for retail businesses.
pub fn active_steps(industry: &str) -> Vec<WizardStep> {
    let mut steps = FIXED_STEPS.to_vec();
    if industry.trim() == super::state::RETAIL_INDUSTRY {
        steps.push(WizardStep::ProductSchema);
    }
    steps
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NavOutcome {
    Moved(WizardStep),
    Submit,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NavError {
    StepIncomplete { step: WizardStep },
    AtFirstStep,
}

impl std::fmt::Display for NavError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            NavError::StepIncomplete { step } => {
                write!(f, "step `{step}` is incomplete")
            }
            NavError::AtFirstStep => f.write_str("already on the first step"),
        }
    }
}

impl std::error::Error for NavError {}

/// Cursor into the active step list. Stored as an index so it can be
/// re-clamped when the list shrinks.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct WizardNav {
    index: usize,
}

impl WizardNav {
    pub fn start() -> Self {
        Self { index: 0 }
    }

    /// `position` is 1-based as used by the form's `step` input.
    pub fn at_position(position: usize, state: &WizardState) -> Self {
        let mut nav = Self {
            index: position.saturating_sub(1),
        };
        nav.reconcile(state);
        nav
    }

    pub fn position(&self) -> usize {
        self.index + 1
    }

    pub fn current_step(&self, state: &WizardState) -> WizardStep {
        let steps = active_steps(&state.industry);
        steps[clamp_index(self.index, steps.len())]
    }

    pub fn is_first(&self) -> bool {
        self.index == 0
    }

    pub fn is_last(&self, state: &WizardState) -> bool {
        self.index + 1 >= active_steps(&state.industry).len()
    }

    pub fn next(&mut self, state: &WizardState) -> Result<NavOutcome, NavError> {
        self.reconcile(state);
        let step = self.current_step(state);
        if !can_advance(step, state) {
            return Err(NavError::StepIncomplete { step });
        }
        if self.is_last(state) {
            return Ok(NavOutcome::Submit);
        }
        self.index += 1;
        Ok(NavOutcome::Moved(self.current_step(state)))
    }

    pub fn back(&mut self, state: &WizardState) -> Result<WizardStep, NavError> {
        self.reconcile(state);
        if self.index == 0 {
            return Err(NavError::AtFirstStep);
        }
        self.index -= 1;
        Ok(self.current_step(state))
    }

    /// Clamps the cursor to the last active step. Returns true when it moved.
    pub fn reconcile(&mut self, state: &WizardState) -> bool {
        let previous = self.index;
        self.index = clamp_index(self.index, active_steps(&state.industry).len());
        previous != self.index
    }
}

fn clamp_index(index: usize, len: usize) -> usize {
    if len == 0 {
        return 0;
    }
    index.min(len - 1)
}
