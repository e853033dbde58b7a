use super::record::{ConfigurationRecord, ProfileUpdate, SetupRecordInput, UpsertOutcome};
use super::ConfigStore;
use crate::shared::TenantId;
use rusqlite::{params, Connection, OptionalExtension, TransactionBehavior};
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("sqlite open failed at {path}: {source}")]
    Open {
        path: String,
        #[source]
        source: rusqlite::Error,
    },
    #[error("failed to create database parent {path}: {source}")]
    CreateParent {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("sqlite statement failed: {source}")]
    Sql {
        #[source]
        source: rusqlite::Error,
    },
    #[error("invalid tenant id `{value}` in database")]
    InvalidTenant { value: String },
}

fn sql_err(source: rusqlite::Error) -> StoreError {
    StoreError::Sql { source }
}

const RECORD_COLUMNS: &str = "
    tenant_id, business_name, tagline, description, industry,
    primary_color, secondary_color, email, phone, address,
    email_notifications_enabled, product_schema, setup_complete,
    created_at, updated_at
";

#[derive(Debug, Clone)]
pub struct SqliteConfigStore {
    db_path: PathBuf,
}

impl SqliteConfigStore {
    pub fn open(db_path: &Path) -> Result<Self, StoreError> {
        if let Some(parent) = db_path.parent() {
            fs::create_dir_all(parent).map_err(|source| StoreError::CreateParent {
                path: parent.display().to_string(),
                source,
            })?;
        }

        let store = Self {
            db_path: db_path.to_path_buf(),
        };
        let _ = store.connect()?;
        Ok(store)
    }

    pub fn db_path(&self) -> &Path {
        &self.db_path
    }

    pub fn ensure_schema(&self) -> Result<(), StoreError> {
        let connection = self.connect()?;
        connection
            .execute_batch(
                "
                CREATE TABLE IF NOT EXISTS site_config (
                    tenant_id TEXT PRIMARY KEY NOT NULL,
                    business_name TEXT NOT NULL DEFAULT 'My Business',
                    tagline TEXT,
                    description TEXT,
                    industry TEXT,
                    primary_color TEXT NOT NULL DEFAULT '#0ea5e9',
                    secondary_color TEXT NOT NULL DEFAULT '#1e293b',
                    email TEXT,
                    phone TEXT,
                    address TEXT,
                    email_notifications_enabled INTEGER NOT NULL DEFAULT 0,
                    product_schema TEXT,
                    setup_complete INTEGER NOT NULL DEFAULT 0,
                    created_at TEXT NOT NULL,
                    updated_at TEXT NOT NULL
                );
                ",
            )
            .map_err(sql_err)
    }

    pub fn count_records(&self) -> Result<u64, StoreError> {
        let connection = self.connect()?;
        let count: i64 = connection
            .query_row("SELECT COUNT(*) FROM site_config", [], |row| row.get(0))
            .map_err(sql_err)?;
        Ok(count as u64)
    }

    fn connect(&self) -> Result<Connection, StoreError> {
        let connection = Connection::open(&self.db_path).map_err(|source| StoreError::Open {
            path: self.db_path.display().to_string(),
            source,
        })?;
        connection
            .execute_batch("PRAGMA journal_mode=WAL; PRAGMA busy_timeout=5000;")
            .map_err(sql_err)?;
        Ok(connection)
    }
}

impl ConfigStore for SqliteConfigStore {
    fn load(&self, tenant_id: &TenantId) -> Result<Option<ConfigurationRecord>, StoreError> {
        let connection = self.connect()?;
        let row = connection
            .query_row(
                &format!("SELECT {RECORD_COLUMNS} FROM site_config WHERE tenant_id = ?1"),
                params![tenant_id.as_str()],
                |row| {
                    Ok((
                        row.get::<_, String>(0)?,
                        ConfigurationRecord {
                            tenant_id: tenant_id.clone(),
                            business_name: row.get(1)?,
                            tagline: row.get(2)?,
                            description: row.get(3)?,
                            industry: row.get(4)?,
                            primary_color: row.get(5)?,
                            secondary_color: row.get(6)?,
                            email: row.get(7)?,
                            phone: row.get(8)?,
                            address: row.get(9)?,
                            email_notifications_enabled: row.get(10)?,
                            product_schema: row.get(11)?,
                            setup_complete: row.get(12)?,
                            created_at: row.get(13)?,
                            updated_at: row.get(14)?,
                        },
                    ))
                },
            )
            .optional()
            .map_err(sql_err)?;

        let Some((raw_tenant, mut record)) = row else {
            return Ok(None);
        };
        record.tenant_id =
            TenantId::parse(&raw_tenant).map_err(|_| StoreError::InvalidTenant { value: raw_tenant })?;
        Ok(Some(record))
    }

    fn upsert_setup(
        &self,
        tenant_id: &TenantId,
        input: &SetupRecordInput,
    ) -> Result<UpsertOutcome, StoreError> {
        let mut connection = self.connect()?;
        let tx = connection
            .transaction_with_behavior(TransactionBehavior::Immediate)
            .map_err(sql_err)?;

        let exists = tx
            .query_row(
                "SELECT 1 FROM site_config WHERE tenant_id = ?1 LIMIT 1",
                params![tenant_id.as_str()],
                |row| row.get::<_, i64>(0),
            )
            .optional()
            .map_err(sql_err)?
            .is_some();

        let now = chrono::Utc::now().to_rfc3339();
        let outcome = if exists {
            tx.execute(
                "
                UPDATE site_config SET
                    business_name = ?2,
                    tagline = ?3,
                    description = ?4,
                    industry = ?5,
                    primary_color = ?6,
                    secondary_color = ?7,
                    email = ?8,
                    phone = ?9,
                    address = ?10,
                    email_notifications_enabled = ?11,
                    product_schema = ?12,
                    setup_complete = 0,
                    updated_at = ?13
                WHERE tenant_id = ?1
                ",
                params![
                    tenant_id.as_str(),
                    input.business_name,
                    input.tagline,
                    input.description,
                    input.industry,
                    input.primary_color,
                    input.secondary_color,
                    input.email,
                    input.phone,
                    input.address,
                    input.email_notifications_enabled,
                    input.product_schema,
                    now,
                ],
            )
            .map_err(sql_err)?;
            UpsertOutcome::Updated
        } else {
            tx.execute(
                "
                INSERT INTO site_config (
                    tenant_id, business_name, tagline, description, industry,
                    primary_color, secondary_color, email, phone, address,
                    email_notifications_enabled, product_schema, setup_complete,
                    created_at, updated_at
                ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12, 0, ?13, ?13)
                ",
                params![
                    tenant_id.as_str(),
                    input.business_name,
                    input.tagline,
                    input.description,
                    input.industry,
                    input.primary_color,
                    input.secondary_color,
                    input.email,
                    input.phone,
                    input.address,
                    input.email_notifications_enabled,
                    input.product_schema,
                    now,
                ],
            )
            .map_err(sql_err)?;
            UpsertOutcome::Inserted
        };

        tx.commit().map_err(sql_err)?;
        Ok(outcome)
    }

    fn update_profile(
        &self,
        tenant_id: &TenantId,
        update: &ProfileUpdate,
    ) -> Result<bool, StoreError> {
        let connection = self.connect()?;
        let changed = connection
            .execute(
                "
                UPDATE site_config SET
                    business_name = ?2,
                    tagline = ?3,
                    description = ?4,
                    primary_color = ?5,
                    secondary_color = ?6,
                    email = ?7,
                    phone = ?8,
                    address = ?9,
                    updated_at = ?10
                WHERE tenant_id = ?1
                ",
                params![
                    tenant_id.as_str(),
                    update.business_name,
                    update.tagline,
                    update.description,
                    update.primary_color,
                    update.secondary_color,
                    update.email,
                    update.phone,
                    update.address,
                    chrono::Utc::now().to_rfc3339(),
                ],
            )
            .map_err(sql_err)?;
        Ok(changed > 0)
    }

    fn mark_setup_complete(&self, tenant_id: &TenantId) -> Result<bool, StoreError> {
        let connection = self.connect()?;
        let changed = connection
            .execute(
                "
                UPDATE site_config
                SET setup_complete = 1, updated_at = ?2
                WHERE tenant_id = ?1
                ",
                params![tenant_id.as_str(), chrono::Utc::now().to_rfc3339()],
            )
            .map_err(sql_err)?;
        Ok(changed > 0)
    }
}
