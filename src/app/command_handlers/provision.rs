use crate::app::command_support::{load_settings, open_store};
use crate::provisioning::{confirm_provisioning, ProvisionOutcome};
use crate::shared::TenantId;
use crate::store::{ConfigStore, SetupStatus};

pub fn cmd_provision(args: &[String]) -> Result<String, String> {
    let settings = load_settings()?;
    let store = open_store(&settings)?;
    run_provision(args, &store, &settings.tenant_id)
}

/// Executes `provision status|confirm` against an already opened store.
pub fn run_provision(
    args: &[String],
    store: &dyn ConfigStore,
    tenant_id: &TenantId,
) -> Result<String, String> {
    match args.first().map(String::as_str) {
        Some("status") => provision_status(store, tenant_id),
        Some("confirm") => {
            let outcome = confirm_provisioning(store, tenant_id).map_err(|e| e.to_string())?;
            let result = match outcome {
                ProvisionOutcome::Activated => "activated",
                ProvisionOutcome::AlreadyLive => "already_live",
            };
            Ok(format!("tenant={tenant_id}\nresult={result}"))
        }
        _ => Err("usage: provision <status|confirm>".to_string()),
    }
}

fn provision_status(store: &dyn ConfigStore, tenant_id: &TenantId) -> Result<String, String> {
    let record = store.load(tenant_id).map_err(|e| e.to_string())?;
    let status = SetupStatus::from_record(record.as_ref());
    let mut lines = vec![format!("tenant={tenant_id}"), format!("status={status}")];
    if let Some(record) = record {
        lines.push(format!("business_name={}", record.business_name));
        lines.push(format!(
            "email={}",
            record.email.as_deref().unwrap_or_default()
        ));
        lines.push(format!(
            "industry={}",
            record.industry.as_deref().unwrap_or_default()
        ));
        lines.push(format!("updated_at={}", record.updated_at));
    }
    Ok(lines.join("\n"))
}
