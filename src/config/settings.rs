use super::{
    default_global_config_path, ConfigError, DEFAULT_DATABASE_FILE_NAME, DEFAULT_LOG_FILE_NAME,
};
use crate::shared::TenantId;
use serde::{Deserialize, Serialize};
use std::fs;
use std::net::SocketAddr;
use std::path::{Path, PathBuf};

pub const AI_API_BASE_ENV: &str = "BIZSITE_AI_API_BASE";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Settings {
    #[serde(default)]
    pub tenant_id: TenantId,
    #[serde(default = "default_bind_address")]
    pub bind_address: String,
    #[serde(default)]
    pub database_path: Option<PathBuf>,
    #[serde(default = "default_admin_email")]
    pub admin_email: String,
    #[serde(default)]
    pub log_path: Option<PathBuf>,
    #[serde(default)]
    pub ai: Option<AiSettings>,
}

/// Upstream text-generation endpoint used for copy assistance.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct AiSettings {
    pub api_base: String,
    #[serde(default = "default_ai_model")]
    pub model: String,
    #[serde(default = "default_api_token_env")]
    pub api_token_env: String,
    #[serde(default = "default_max_tokens")]
    pub max_tokens: u32,
}

fn default_bind_address() -> String {
    "127.0.0.1:8787".to_string()
}

fn default_admin_email() -> String {
    "admin@example.com".to_string()
}

fn default_ai_model() -> String {
    "@cf/meta/llama-3-8b-instruct".to_string()
}

fn default_api_token_env() -> String {
    "BIZSITE_AI_TOKEN".to_string()
}

fn default_max_tokens() -> u32 {
    500
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            tenant_id: TenantId::default(),
            bind_address: default_bind_address(),
            database_path: None,
            admin_email: default_admin_email(),
            log_path: None,
            ai: None,
        }
    }
}

impl Settings {
    pub fn from_path(path: &Path) -> Result<Self, ConfigError> {
        let raw = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.display().to_string(),
            source,
        })?;
        serde_yaml::from_str(&raw).map_err(|source| ConfigError::Parse {
            path: path.display().to_string(),
            source,
        })
    }

    /// Reads `path` when it exists and falls back to defaults otherwise.
    pub fn load_or_default(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            return Ok(Self::default());
        }
        Self::from_path(path)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        self.bind_address.parse::<SocketAddr>().map_err(|err| {
            ConfigError::Settings(format!(
                "`bind_address` `{}` is not a socket address: {err}",
                self.bind_address
            ))
        })?;

        if !self.admin_email.contains('@') {
            return Err(ConfigError::Settings(format!(
                "`admin_email` `{}` must be an email address",
                self.admin_email
            )));
        }

        if let Some(ai) = &self.ai {
            if ai.api_base.trim().is_empty() {
                return Err(ConfigError::Settings(
                    "`ai.api_base` must be non-empty".to_string(),
                ));
            }
            if ai.model.trim().is_empty() {
                return Err(ConfigError::Settings(
                    "`ai.model` must be non-empty".to_string(),
                ));
            }
            if ai.max_tokens == 0 {
                return Err(ConfigError::Settings(
                    "`ai.max_tokens` must be >= 1".to_string(),
                ));
            }
        }

        Ok(())
    }

    pub fn socket_addr(&self) -> Result<SocketAddr, ConfigError> {
        self.bind_address.parse::<SocketAddr>().map_err(|err| {
            ConfigError::Settings(format!("invalid `bind_address`: {err}"))
        })
    }

    pub fn resolve_database_path(&self, state_root: &Path) -> PathBuf {
        match &self.database_path {
            Some(path) if path.is_absolute() => path.clone(),
            Some(path) => state_root.join(path),
            None => state_root.join(DEFAULT_DATABASE_FILE_NAME),
        }
    }

    pub fn resolve_log_path(&self, state_root: &Path) -> PathBuf {
        match &self.log_path {
            Some(path) if path.is_absolute() => path.clone(),
            Some(path) => state_root.join(path),
            None => state_root.join(DEFAULT_LOG_FILE_NAME),
        }
    }
}

impl AiSettings {
    pub fn resolved_api_base(&self) -> String {
        std::env::var(AI_API_BASE_ENV)
            .ok()
            .filter(|v| !v.trim().is_empty())
            .unwrap_or_else(|| self.api_base.clone())
    }

    pub fn resolved_api_token(&self) -> Option<String> {
        std::env::var(&self.api_token_env)
            .ok()
            .filter(|v| !v.trim().is_empty())
    }
}

pub fn load_global_settings() -> Result<Settings, ConfigError> {
    let path = default_global_config_path()?;
    let settings = Settings::load_or_default(&path)?;
    settings.validate()?;
    Ok(settings)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn empty_yaml_uses_defaults() {
        let settings: Settings = serde_yaml::from_str("{}").expect("parse settings");
        assert_eq!(settings, Settings::default());
        assert_eq!(settings.tenant_id.as_str(), "default");
        settings.validate().expect("defaults validate");
    }

    #[test]
    fn ai_section_fills_model_and_token_defaults() {
        let settings: Settings = serde_yaml::from_str(
            r#"
ai:
  api_base: https://api.example.com/ai
"#,
        )
        .expect("parse settings");
        let ai = settings.ai.expect("ai settings");
        assert_eq!(ai.model, "@cf/meta/llama-3-8b-instruct");
        assert_eq!(ai.api_token_env, "BIZSITE_AI_TOKEN");
        assert_eq!(ai.max_tokens, 500);
    }

    #[test]
    fn validation_rejects_bad_bind_address() {
        let settings: Settings =
            serde_yaml::from_str("bind_address: not-an-address\n").expect("parse settings");
        let err = settings.validate().expect_err("validation should fail");
        assert!(err.to_string().contains("bind_address"));
    }

    #[test]
    fn validation_rejects_zero_max_tokens() {
        let settings: Settings = serde_yaml::from_str(
            r#"
ai:
  api_base: https://api.example.com/ai
  max_tokens: 0
"#,
        )
        .expect("parse settings");
        let err = settings.validate().expect_err("validation should fail");
        assert!(err.to_string().contains("max_tokens"));
    }

    #[test]
    fn unknown_fields_are_rejected() {
        let err = serde_yaml::from_str::<Settings>("workspace: /tmp\n").expect_err("unknown field");
        assert!(err.to_string().contains("unknown field"));
    }

    #[test]
    fn relative_database_path_resolves_under_state_root() {
        let temp = tempdir().expect("tempdir");
        let settings: Settings =
            serde_yaml::from_str("database_path: data/site.db\n").expect("parse settings");
        assert_eq!(
            settings.resolve_database_path(temp.path()),
            temp.path().join("data/site.db")
        );
        assert_eq!(
            Settings::default().resolve_database_path(temp.path()),
            temp.path().join("site.db")
        );
    }

    #[test]
    fn load_or_default_tolerates_missing_file() {
        let temp = tempdir().expect("tempdir");
        let settings =
            Settings::load_or_default(&temp.path().join("missing.yaml")).expect("defaults");
        assert_eq!(settings, Settings::default());
    }
}
