use crate::shared::TenantId;
use crate::store::{ConfigStore, SetupStatus, StoreError};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProvisionOutcome {
    Activated,
    AlreadyLive,
}

#[derive(Debug, thiserror::Error)]
pub enum ProvisionError {
    #[error("no site configuration exists for tenant `{tenant_id}`; complete setup first")]
    NoConfiguration { tenant_id: String },
    #[error(transparent)]
    Store(#[from] StoreError),
}

/// Moves a pending configuration to live. Confirming a live site is a no-op.
pub fn confirm_provisioning(
    store: &dyn ConfigStore,
    tenant_id: &TenantId,
) -> Result<ProvisionOutcome, ProvisionError> {
    match store.setup_status(tenant_id)? {
        SetupStatus::NotStarted => Err(ProvisionError::NoConfiguration {
            tenant_id: tenant_id.to_string(),
        }),
        SetupStatus::Live => Ok(ProvisionOutcome::AlreadyLive),
        SetupStatus::Pending => {
            if store.mark_setup_complete(tenant_id)? {
                Ok(ProvisionOutcome::Activated)
            } else {
                Err(ProvisionError::NoConfiguration {
                    tenant_id: tenant_id.to_string(),
                })
            }
        }
    }
}
