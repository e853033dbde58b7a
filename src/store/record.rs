use crate::shared::TenantId;

pub const DEFAULT_BUSINESS_NAME: &str = "My Business";
pub const DEFAULT_PRIMARY_COLOR: &str = "#0ea5e9";
pub const DEFAULT_SECONDARY_COLOR: &str = "#1e293b";

/// Every column the setup wizard owns. Submission always writes all of them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SetupRecordInput {
    pub business_name: String,
    pub tagline: Option<String>,
    pub description: Option<String>,
    pub industry: Option<String>,
    pub primary_color: String,
    pub secondary_color: String,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub address: Option<String>,
    pub email_notifications_enabled: bool,
    pub product_schema: Option<String>,
}

/// Columns an administrator may edit after setup. Industry, the email
/// opt-in, the product schema and `setup_complete` are left untouched.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProfileUpdate {
    pub business_name: String,
    pub tagline: Option<String>,
    pub description: Option<String>,
    pub primary_color: String,
    pub secondary_color: String,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub address: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfigurationRecord {
    pub tenant_id: TenantId,
    pub business_name: String,
    pub tagline: Option<String>,
    pub description: Option<String>,
    pub industry: Option<String>,
    pub primary_color: String,
    pub secondary_color: String,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub address: Option<String>,
    pub email_notifications_enabled: bool,
    pub product_schema: Option<String>,
    pub setup_complete: bool,
    pub created_at: String,
    pub updated_at: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SetupStatus {
    NotStarted,
    Pending,
    Live,
}

impl SetupStatus {
    pub fn from_record(record: Option<&ConfigurationRecord>) -> Self {
        match record {
            None => SetupStatus::NotStarted,
            Some(record) if record.setup_complete => SetupStatus::Live,
            Some(_) => SetupStatus::Pending,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            SetupStatus::NotStarted => "not_started",
            SetupStatus::Pending => "pending",
            SetupStatus::Live => "live",
        }
    }
}

impl std::fmt::Display for SetupStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UpsertOutcome {
    Inserted,
    Updated,
}
