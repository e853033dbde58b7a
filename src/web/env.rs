use crate::ai::{HttpTextGenerator, TextGenerator};
use crate::config::Settings;
use crate::shared::{AppLog, TenantId};
use crate::store::{ConfigStore, SqliteConfigStore, StoreError};
use crate::wizard::copy_assist::DEFAULT_MAX_TOKENS;
use std::path::Path;
use std::sync::Arc;

/// Bindings every request handler receives.
#[derive(Clone)]
pub struct AppEnv {
    pub tenant_id: TenantId,
    pub store: Arc<dyn ConfigStore>,
    pub generator: Option<Arc<dyn TextGenerator>>,
    pub admin_email: String,
    pub ai_max_tokens: u32,
    pub log: AppLog,
}

impl AppEnv {
    pub fn new(tenant_id: TenantId, store: Arc<dyn ConfigStore>) -> Self {
        Self {
            tenant_id,
            store,
            generator: None,
            admin_email: "admin@example.com".to_string(),
            ai_max_tokens: DEFAULT_MAX_TOKENS,
            log: AppLog::disabled(),
        }
    }

    pub fn with_generator(mut self, generator: Arc<dyn TextGenerator>) -> Self {
        self.generator = Some(generator);
        self
    }

    pub fn with_admin_email(mut self, admin_email: impl Into<String>) -> Self {
        self.admin_email = admin_email.into();
        self
    }

    pub fn with_ai_max_tokens(mut self, max_tokens: u32) -> Self {
        self.ai_max_tokens = max_tokens;
        self
    }

    pub fn with_log(mut self, log: AppLog) -> Self {
        self.log = log;
        self
    }

    /// Opens the SQLite store, creates the table when missing and wires the
    /// optional text generator.
    pub fn from_settings(settings: &Settings, state_root: &Path) -> Result<Self, StoreError> {
        let store = SqliteConfigStore::open(&settings.resolve_database_path(state_root))?;
        store.ensure_schema()?;

        let mut env = Self::new(settings.tenant_id.clone(), Arc::new(store))
            .with_admin_email(settings.admin_email.clone())
            .with_log(AppLog::to_file(settings.resolve_log_path(state_root)));
        if let Some(ai) = &settings.ai {
            env = env
                .with_generator(Arc::new(HttpTextGenerator::from_settings(ai)))
                .with_ai_max_tokens(ai.max_tokens);
        }
        Ok(env)
    }
}

impl std::fmt::Debug for AppEnv {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppEnv")
            .field("tenant_id", &self.tenant_id)
            .field("generator", &self.generator.is_some())
            .field("admin_email", &self.admin_email)
            .field("ai_max_tokens", &self.ai_max_tokens)
            .finish()
    }
}
