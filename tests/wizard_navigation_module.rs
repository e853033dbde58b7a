use bizsite::wizard::{
    active_steps, NavError, NavOutcome, WizardField, WizardNav, WizardState, WizardStep,
};

fn named(name: &str) -> WizardState {
    WizardState::default().with_field(WizardField::BusinessName, name)
}

#[test]
fn wizard_navigation_module_step_count_depends_on_retail() {
    for industry in ["", "consulting", "agency", "restaurant", "healthcare", "technology", "other"] {
        assert_eq!(active_steps(industry).len(), 4, "industry {industry:?}");
    }
    let retail = active_steps("retail");
    assert_eq!(retail.len(), 5);
    assert_eq!(retail.last(), Some(&WizardStep::ProductSchema));
}

#[test]
fn wizard_navigation_module_blocks_next_without_business_name() {
    let state = named("A");
    let mut nav = WizardNav::start();
    assert_eq!(
        nav.next(&state),
        Err(NavError::StepIncomplete {
            step: WizardStep::BusinessInfo
        })
    );
    assert_eq!(nav.position(), 1, "rejected advance never moves the cursor");
}

#[test]
fn wizard_navigation_module_walks_to_submit() {
    let state = named("Crumb");
    let mut nav = WizardNav::start();
    assert_eq!(nav.next(&state), Ok(NavOutcome::Moved(WizardStep::Contact)));
    assert_eq!(nav.next(&state), Ok(NavOutcome::Moved(WizardStep::Branding)));
    assert_eq!(nav.next(&state), Ok(NavOutcome::Moved(WizardStep::Email)));
    assert_eq!(nav.next(&state), Ok(NavOutcome::Submit));
    assert_eq!(nav.position(), 4);
}

#[test]
fn wizard_navigation_module_later_steps_pass_with_empty_fields() {
    let state = named("Crumb");
    let mut nav = WizardNav::at_position(2, &state);
    assert!(state.email.is_empty());
    assert_eq!(nav.next(&state), Ok(NavOutcome::Moved(WizardStep::Branding)));
}

#[test]
fn wizard_navigation_module_back_stops_at_first_step() {
    let state = named("Crumb");
    let mut nav = WizardNav::at_position(2, &state);
    assert_eq!(nav.back(&state), Ok(WizardStep::BusinessInfo));
    assert_eq!(nav.back(&state), Err(NavError::AtFirstStep));
}

#[test]
fn wizard_navigation_module_reclamps_when_leaving_retail() {
    let retail = named("Crumb").with_field(WizardField::Industry, "retail");
    let mut nav = WizardNav::start();
    for _ in 0..4 {
        nav.next(&retail).expect("advance");
    }
    assert_eq!(nav.current_step(&retail), WizardStep::ProductSchema);

    let agency = retail.with_field(WizardField::Industry, "agency");
    assert!(nav.reconcile(&agency));
    assert_eq!(nav.position(), 4);
    assert_eq!(nav.current_step(&agency), WizardStep::Email);
    assert_eq!(nav.next(&agency), Ok(NavOutcome::Submit));
}
