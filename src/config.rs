//! Application-level configuration loading: ranking policy, audit log and storage backend.

use std::{env, fs, io::ErrorKind, path::PathBuf};

use serde::Deserialize;
use tracing::{info, warn};

use crate::state::group::TieBreak;

/// Default location on disk where the server looks for the JSON configuration.
const DEFAULT_CONFIG_PATH: &str = "config/app.json";
/// Environment variable that overrides [`DEFAULT_CONFIG_PATH`].
const CONFIG_PATH_ENV: &str = "MATCH_LADDER_CONFIG_PATH";
/// Sheet receiving one row per recorded match.
pub const DEFAULT_AUDIT_SHEET: &str = "MatchResults";

/// Which Persistence Gateway implementation the server connects to.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StorageBackend {
    /// Google Sheets, configured through `GOOGLE_*` environment variables.
    #[default]
    Sheets,
    /// Process-local sheets, lost on restart.
    Memory,
}

#[derive(Debug, Clone, PartialEq, Eq)]
/// Settings of the match audit log.
pub struct AuditConfig {
    /// Append a row per recorded match before updating scores.
    pub enabled: bool,
    /// Sheet receiving the audit rows.
    pub sheet: String,
}

impl Default for AuditConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            sheet: DEFAULT_AUDIT_SHEET.to_owned(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
/// Immutable runtime configuration shared across the application.
pub struct AppConfig {
    /// Ordering between players on the same score.
    pub tie_break: TieBreak,
    /// Match audit log settings.
    pub audit: AuditConfig,
    /// Backend the storage supervisor connects to.
    pub storage_backend: StorageBackend,
}

impl AppConfig {
    /// Load the application configuration from disk, falling back to built-in defaults.
    pub fn load() -> Self {
        let path = resolve_config_path();
        match fs::read_to_string(&path) {
            Ok(contents) => match Self::from_json(&contents) {
                Ok(app_config) => {
                    info!(
                        path = %path.display(),
                        tie_break = ?app_config.tie_break,
                        audit = app_config.audit.enabled,
                        backend = ?app_config.storage_backend,
                        "loaded configuration"
                    );
                    app_config
                }
                Err(err) => {
                    warn!(
                        path = %path.display(),
                        error = %err,
                        "failed to parse config; falling back to defaults"
                    );
                    Self::default()
                }
            },
            Err(err) if err.kind() == ErrorKind::NotFound => {
                info!(
                    path = %path.display(),
                    "config file not found; using built-in defaults"
                );
                Self::default()
            }
            Err(err) => {
                warn!(
                    path = %path.display(),
                    error = %err,
                    "failed to read config; falling back to defaults"
                );
                Self::default()
            }
        }
    }

    /// Parse a configuration document; omitted keys keep their defaults.
    pub fn from_json(contents: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str::<RawConfig>(contents).map(Into::into)
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
/// JSON representation of the configuration file located at [`DEFAULT_CONFIG_PATH`].
struct RawConfig {
    ranking: RawRanking,
    audit: RawAudit,
    storage: RawStorage,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
struct RawRanking {
    tie_break: Option<TieBreak>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
struct RawAudit {
    enabled: Option<bool>,
    sheet: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
struct RawStorage {
    backend: Option<StorageBackend>,
}

impl From<RawConfig> for AppConfig {
    fn from(value: RawConfig) -> Self {
        let defaults = AuditConfig::default();
        Self {
            tie_break: value.ranking.tie_break.unwrap_or_default(),
            audit: AuditConfig {
                enabled: value.audit.enabled.unwrap_or(defaults.enabled),
                sheet: value
                    .audit
                    .sheet
                    .filter(|sheet| !sheet.trim().is_empty())
                    .unwrap_or(defaults.sheet),
            },
            storage_backend: value.storage.backend.unwrap_or_default(),
        }
    }
}

/// Resolve the configuration path taking the environment override into account.
fn resolve_config_path() -> PathBuf {
    env::var_os(CONFIG_PATH_ENV)
        .map(PathBuf::from)
        .filter(|path| !path.as_os_str().is_empty())
        .unwrap_or_else(|| PathBuf::from(DEFAULT_CONFIG_PATH))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_document_yields_defaults() {
        assert_eq!(AppConfig::from_json("{}").unwrap(), AppConfig::default());
    }

    #[test]
    fn partial_document_overrides_selected_keys() {
        let config = AppConfig::from_json(
            r#"{
                "ranking": { "tie_break": "insertion" },
                "audit": { "enabled": false },
                "storage": { "backend": "memory" }
            }"#,
        )
        .unwrap();

        assert_eq!(config.tie_break, TieBreak::Insertion);
        assert!(!config.audit.enabled);
        assert_eq!(config.audit.sheet, DEFAULT_AUDIT_SHEET);
        assert_eq!(config.storage_backend, StorageBackend::Memory);
    }

    #[test]
    fn blank_audit_sheet_falls_back_to_default() {
        let config = AppConfig::from_json(r#"{ "audit": { "sheet": "  " } }"#).unwrap();
        assert_eq!(config.audit.sheet, DEFAULT_AUDIT_SHEET);
    }

    #[test]
    fn unknown_values_are_rejected() {
        assert!(AppConfig::from_json(r#"{ "ranking": { "tie_break": "random" } }"#).is_err());
        assert!(AppConfig::from_json(r#"{ "colors": [] }"#).is_err());
    }
}
