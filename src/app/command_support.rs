use crate::config::{default_state_root, load_global_settings, Settings};
use crate::store::SqliteConfigStore;
use std::path::PathBuf;

pub fn load_settings() -> Result<Settings, String> {
    load_global_settings().map_err(|e| e.to_string())
}

pub fn state_root() -> Result<PathBuf, String> {
    default_state_root().map_err(|e| e.to_string())
}

pub fn open_store(settings: &Settings) -> Result<SqliteConfigStore, String> {
    let root = state_root()?;
    let store = SqliteConfigStore::open(&settings.resolve_database_path(&root))
        .map_err(|e| e.to_string())?;
    store.ensure_schema().map_err(|e| e.to_string())?;
    Ok(store)
}
