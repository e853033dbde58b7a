use bizsite::provisioning::{confirm_provisioning, ProvisionError, ProvisionOutcome};
use bizsite::shared::TenantId;
use bizsite::store::{ConfigStore, SetupStatus, SqliteConfigStore};
use bizsite::wizard::{submit, WizardField, WizardState};
use tempfile::tempdir;

#[test]
fn provisioning_module_requires_existing_configuration() {
    let temp = tempdir().expect("tempdir");
    let store = SqliteConfigStore::open(&temp.path().join("site.db")).expect("open");
    store.ensure_schema().expect("schema");

    let err = confirm_provisioning(&store, &TenantId::default()).expect_err("nothing saved");
    assert!(matches!(err, ProvisionError::NoConfiguration { .. }));
}

#[test]
fn provisioning_module_confirm_is_idempotent() {
    let temp = tempdir().expect("tempdir");
    let store = SqliteConfigStore::open(&temp.path().join("site.db")).expect("open");
    store.ensure_schema().expect("schema");
    let tenant = TenantId::default();
    let state = WizardState::default().with_field(WizardField::BusinessName, "Crumb");
    submit(&store, &tenant, &state).expect("submit");

    assert_eq!(
        confirm_provisioning(&store, &tenant).expect("confirm"),
        ProvisionOutcome::Activated
    );
    assert_eq!(
        confirm_provisioning(&store, &tenant).expect("confirm again"),
        ProvisionOutcome::AlreadyLive
    );
    assert_eq!(store.setup_status(&tenant).expect("status"), SetupStatus::Live);
}
