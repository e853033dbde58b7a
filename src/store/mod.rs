pub mod record;
pub mod repository;

pub use record::{
    ConfigurationRecord, ProfileUpdate, SetupRecordInput, SetupStatus, UpsertOutcome, DEFAULT_BUSINESS_NAME,
    DEFAULT_PRIMARY_COLOR, DEFAULT_SECONDARY_COLOR,
};
pub use repository::{SqliteConfigStore, StoreError};

use crate::shared::TenantId;

/// Persistence seam for site configuration. Handlers receive it explicitly
/// so tests can substitute a fake.
pub trait ConfigStore: Send + Sync {
    fn load(&self, tenant_id: &TenantId) -> Result<Option<ConfigurationRecord>, StoreError>;

    /// Writes every wizard-owned column and resets `setup_complete` to false
    /// as one atomic unit.
    fn upsert_setup(
        &self,
        tenant_id: &TenantId,
        input: &SetupRecordInput,
    ) -> Result<UpsertOutcome, StoreError>;

    /// Returns false when no record exists for the tenant.
    fn update_profile(&self, tenant_id: &TenantId, update: &ProfileUpdate)
        -> Result<bool, StoreError>;

    /// Returns false when no record exists for the tenant.
    fn mark_setup_complete(&self, tenant_id: &TenantId) -> Result<bool, StoreError>;

    fn setup_status(&self, tenant_id: &TenantId) -> Result<SetupStatus, StoreError> {
        let record = self.load(tenant_id)?;
        Ok(SetupStatus::from_record(record.as_ref()))
    }
}
