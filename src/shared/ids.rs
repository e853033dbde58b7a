use serde::de::Error as _;
use serde::{Deserialize, Deserializer, Serialize};

pub fn validate_identifier_value(kind: &str, value: &str) -> Result<(), String> {
    if value.is_empty() {
        return Err(format!("{kind} must be non-empty"));
    }
    if value
        .chars()
        .all(|ch| ch.is_ascii_alphanumeric() || ch == '-' || ch == '_')
    {
        return Ok(());
    }
    Err(format!(
        "{kind} must use only ASCII letters, digits, '-' or '_'"
    ))
}

/// Identifies one business served by this deployment. Each tenant owns at
/// most one site configuration record.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(transparent)]
pub struct TenantId(String);

impl TenantId {
    pub fn parse(raw: &str) -> Result<Self, String> {
        validate_identifier_value("tenant id", raw)?;
        Ok(Self(raw.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Default for TenantId {
    fn default() -> Self {
        Self("default".to_string())
    }
}

impl std::fmt::Display for TenantId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        self.0.fmt(f)
    }
}

impl<'de> Deserialize<'de> for TenantId {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = String::deserialize(deserializer)?;
        TenantId::parse(&raw)
            .map_err(|err| D::Error::custom(format!("invalid tenant id `{raw}`: {err}")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tenant_id_accepts_slugs_and_rejects_spaces() {
        assert_eq!(TenantId::parse("acme-co_01").expect("valid").as_str(), "acme-co_01");
        assert!(TenantId::parse("acme co").is_err());
        assert!(TenantId::parse("").is_err());
    }

    #[test]
    fn tenant_id_deserialize_reports_invalid_value() {
        let err = serde_yaml::from_str::<TenantId>("\"bad/tenant\"").expect_err("invalid");
        assert!(err.to_string().contains("tenant id"));
    }
}
