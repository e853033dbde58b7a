use crate::shared::TenantId;
use crate::store::{
    ConfigStore, ConfigurationRecord, ProfileUpdate, StoreError, DEFAULT_PRIMARY_COLOR,
    DEFAULT_SECONDARY_COLOR,
};
use crate::wizard::submission::{color_or_default, optional};
use crate::wizard::{validate_business_name, ValidationError};
use std::collections::HashMap;

/// Raw values of the admin configuration form, keyed like the wizard inputs.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProfileForm {
    pub business_name: String,
    pub tagline: String,
    pub description: String,
    pub primary_color: String,
    pub secondary_color: String,
    pub email: String,
    pub phone: String,
    pub address: String,
}

impl ProfileForm {
    pub fn from_record(record: &ConfigurationRecord) -> Self {
        Self {
            business_name: record.business_name.clone(),
            tagline: record.tagline.clone().unwrap_or_default(),
            description: record.description.clone().unwrap_or_default(),
            primary_color: record.primary_color.clone(),
            secondary_color: record.secondary_color.clone(),
            email: record.email.clone().unwrap_or_default(),
            phone: record.phone.clone().unwrap_or_default(),
            address: record.address.clone().unwrap_or_default(),
        }
    }

    pub fn from_form(form: &HashMap<String, String>) -> Self {
        let read = |key: &str| form.get(key).cloned().unwrap_or_default();
        Self {
            business_name: read("businessName"),
            tagline: read("tagline"),
            description: read("description"),
            primary_color: read("primaryColor"),
            secondary_color: read("secondaryColor"),
            email: read("email"),
            phone: read("phone"),
            address: read("address"),
        }
    }

    pub fn to_update(&self) -> ProfileUpdate {
        ProfileUpdate {
            business_name: self.business_name.trim().to_string(),
            tagline: optional(&self.tagline),
            description: optional(&self.description),
            primary_color: color_or_default(&self.primary_color, DEFAULT_PRIMARY_COLOR),
            secondary_color: color_or_default(&self.secondary_color, DEFAULT_SECONDARY_COLOR),
            email: optional(&self.email),
            phone: optional(&self.phone),
            address: optional(&self.address),
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ProfileError {
    #[error(transparent)]
    Validation(#[from] ValidationError),
    #[error("no site configuration exists for tenant `{tenant_id}`; complete setup first")]
    NoConfiguration { tenant_id: String },
    #[error("Failed to save configuration")]
    Store(#[source] StoreError),
}

/// Edits the profile of an existing configuration. The wizard owns record
/// creation, so a tenant without a record is an error.
pub fn update_site_profile(
    store: &dyn ConfigStore,
    tenant_id: &TenantId,
    form: &ProfileForm,
) -> Result<ProfileUpdate, ProfileError> {
    validate_business_name(&form.business_name)?;
    let update = form.to_update();
    if store
        .update_profile(tenant_id, &update)
        .map_err(ProfileError::Store)?
    {
        Ok(update)
    } else {
        Err(ProfileError::NoConfiguration {
            tenant_id: tenant_id.to_string(),
        })
    }
}
