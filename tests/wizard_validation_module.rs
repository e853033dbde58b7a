use bizsite::wizard::{
    can_advance, validate_business_name, validate_submission, ValidationError, WizardField,
    WizardState, WizardStep, FIXED_STEPS,
};

#[test]
fn wizard_validation_module_first_step_depends_only_on_business_name() {
    let short = WizardState::default()
        .with_field(WizardField::BusinessName, "A")
        .with_field(WizardField::Email, "owner@example.com")
        .with_field(WizardField::Description, "A long enough description");
    assert!(!can_advance(WizardStep::BusinessInfo, &short));

    let ok = WizardState::default().with_field(WizardField::BusinessName, "AB");
    assert!(can_advance(WizardStep::BusinessInfo, &ok));
}

#[test]
fn wizard_validation_module_later_steps_always_pass() {
    let empty = WizardState::default();
    for step in FIXED_STEPS.iter().skip(1) {
        assert!(can_advance(*step, &empty), "{step}");
    }
    assert!(can_advance(WizardStep::ProductSchema, &empty));
}

#[test]
fn wizard_validation_module_gate_and_submission_share_one_rule() {
    for name in ["", " ", "A", " A ", "AB", "Crumb Bakery"] {
        let state = WizardState::default().with_field(WizardField::BusinessName, name);
        assert_eq!(
            can_advance(WizardStep::BusinessInfo, &state),
            validate_submission(&state).is_ok(),
            "name {name:?}"
        );
    }
}

#[test]
fn wizard_validation_module_error_message_is_stable() {
    let err = validate_business_name("").expect_err("empty name");
    assert_eq!(err, ValidationError::BusinessNameRequired);
    assert_eq!(err.to_string(), "Business name is required");
}
