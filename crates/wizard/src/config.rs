//! Runtime configuration for the wizard binary.

use std::path::PathBuf;
use std::sync::Arc;

use thiserror::Error;

use crate::storage::{default_storage_path, KeyValueStore, MemoryStore, SqliteStore, StorageError};
use crate::sync::DEFAULT_ENDPOINT;

pub const ENDPOINT_VAR: &str = "ROSTER_ENDPOINT";
pub const STORAGE_PATH_VAR: &str = "ROSTER_STORAGE_PATH";
pub const LOG_JSON_VAR: &str = "ROSTER_LOG_JSON";

/// Where wizard snapshots are kept.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StorageConfig {
    Sqlite(PathBuf),
    Memory,
}

impl StorageConfig {
    pub async fn open(&self) -> Result<Arc<dyn KeyValueStore>, StorageError> {
        match self {
            StorageConfig::Sqlite(path) => Ok(Arc::new(SqliteStore::open(path).await?)),
            StorageConfig::Memory => Ok(Arc::new(MemoryStore::new())),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WizardConfig {
    pub endpoint: String,
    pub storage: StorageConfig,
    pub log_json: bool,
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("no storage path: {0:#}")]
    StoragePath(anyhow::Error),
    #[error("{var} must be a boolean, got `{value}`")]
    InvalidFlag { var: &'static str, value: String },
}

impl WizardConfig {
    pub fn new(endpoint: impl Into<String>, storage: StorageConfig) -> Self {
        Self {
            endpoint: endpoint.into(),
            storage,
            log_json: false,
        }
    }

    /// Load from the process environment, with defaults for unset variables.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|var| std::env::var(var).ok())
    }

    /// Load from an arbitrary variable lookup.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let endpoint = lookup(ENDPOINT_VAR).unwrap_or_else(|| DEFAULT_ENDPOINT.to_string());

        let path = match lookup(STORAGE_PATH_VAR) {
            Some(path) => PathBuf::from(path),
            None => default_storage_path().map_err(ConfigError::StoragePath)?,
        };

        let log_json = match lookup(LOG_JSON_VAR) {
            Some(value) => parse_flag(LOG_JSON_VAR, &value)?,
            None => false,
        };

        Ok(Self {
            endpoint,
            storage: StorageConfig::Sqlite(path),
            log_json,
        })
    }
}

fn parse_flag(var: &'static str, value: &str) -> Result<bool, ConfigError> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" | "" => Ok(false),
        _ => Err(ConfigError::InvalidFlag {
            var,
            value: value.to_string(),
        }),
    }
}
