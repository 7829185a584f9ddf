//! Configuration for the catalog builders and the inspection binary.
//!
//! Handles the TOML settings file and how its values map onto catalog
//! filters and logging.

mod settings;

pub use settings::{CatalogSettings, LoggingSettings, Settings, SettingsError};
