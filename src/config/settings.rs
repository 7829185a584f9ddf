//! TOML-based configuration.
//!
//! Every key is optional; an empty file yields the defaults.
//!
//! Example configuration:
//! ```toml
//! [catalog]
//! field_order = "declared"
//! excluded_databases = "admin|config|local|system"
//! excluded_collections = "system\\..*|__sql_schemas"
//!
//! [logging]
//! level = "bsonrel=debug"
//! ```

use serde::{Deserialize, Serialize};
use std::env;
use std::fs;
use std::path::{Path, PathBuf};

use crate::catalog::{Exclusions, DEFAULT_EXCLUDED_COLLECTIONS, DEFAULT_EXCLUDED_DATABASES};
use crate::metadata::FieldOrder;

/// Environment variable naming the config file.
const CONFIG_ENV: &str = "BSONREL_CONFIG";

/// Config file looked up in the working directory.
const LOCAL_CONFIG: &str = "bsonrel.toml";

/// Error type for settings.
#[derive(Debug, thiserror::Error)]
pub enum SettingsError {
    #[error("Config file not found: {0}")]
    FileNotFound(PathBuf),

    #[error("Failed to read config file: {0}")]
    ReadError(#[from] std::io::Error),

    #[error("Failed to parse config file: {0}")]
    ParseError(#[from] toml::de::Error),

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),
}

/// Root configuration structure.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct Settings {
    pub catalog: CatalogSettings,
    pub logging: LoggingSettings,
}

/// Catalog building configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct CatalogSettings {
    /// Column order within each datasource.
    pub field_order: FieldOrder,

    /// Databases never listed, as a regex matched against the whole name.
    pub excluded_databases: String,

    /// Collections never listed, as a regex matched against the whole name.
    pub excluded_collections: String,
}

impl Default for CatalogSettings {
    fn default() -> Self {
        Self {
            field_order: FieldOrder::Alphabetical,
            excluded_databases: DEFAULT_EXCLUDED_DATABASES.to_string(),
            excluded_collections: DEFAULT_EXCLUDED_COLLECTIONS.to_string(),
        }
    }
}

impl CatalogSettings {
    /// Compile the exclusion expressions.
    pub fn exclusions(&self) -> Result<Exclusions, SettingsError> {
        Exclusions::new(&self.excluded_databases, &self.excluded_collections)
            .map_err(|e| SettingsError::InvalidConfig(format!("catalog exclusions: {e}")))
    }
}

/// Logging configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct LoggingSettings {
    /// Default filter directive; `RUST_LOG` takes precedence.
    pub level: String,
}

impl Default for LoggingSettings {
    fn default() -> Self {
        Self {
            level: "warn".to_string(),
        }
    }
}

impl Settings {
    /// Parse settings from TOML text.
    pub fn from_toml_str(content: &str) -> Result<Self, SettingsError> {
        let settings: Settings = toml::from_str(content)?;
        settings.validate()?;
        Ok(settings)
    }

    /// Load settings from a TOML file.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, SettingsError> {
        let path = path.as_ref();
        if !path.exists() {
            return Err(SettingsError::FileNotFound(path.to_path_buf()));
        }

        let content = fs::read_to_string(path)?;
        Self::from_toml_str(&content)
    }

    /// Load settings from the default config file locations.
    ///
    /// Searches in order:
    /// 1. Environment variable `BSONREL_CONFIG`
    /// 2. `./bsonrel.toml`
    pub fn load() -> Result<Self, SettingsError> {
        if let Ok(path) = env::var(CONFIG_ENV) {
            return Self::from_file(&path);
        }

        let local_config = PathBuf::from(LOCAL_CONFIG);
        if local_config.exists() {
            return Self::from_file(&local_config);
        }

        Ok(Settings::default())
    }

    /// Check values serde cannot: the exclusion regexes and the log level.
    pub fn validate(&self) -> Result<(), SettingsError> {
        self.catalog.exclusions()?;
        if self.logging.level.trim().is_empty() {
            return Err(SettingsError::InvalidConfig(
                "logging.level must not be empty".to_string(),
            ));
        }
        Ok(())
    }
}
