pub mod error;
pub mod paths;
pub mod settings;

pub use error::ConfigError;
pub use paths::{
    default_global_config_path, default_state_root, CONFIG_PATH_ENV, DEFAULT_DATABASE_FILE_NAME,
    DEFAULT_LOG_FILE_NAME, GLOBAL_SETTINGS_FILE_NAME, GLOBAL_STATE_DIR,
};
pub use settings::{load_global_settings, AiSettings, Settings, AI_API_BASE_ENV};
