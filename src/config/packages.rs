//! Default package catalog loading from config.toml
//!
//! The packages defined in config.toml seed the catalog on first run, when
//! the `packages` table is still empty.

use crate::entities::ServiceType;
use crate::errors::{Error, Result};
use serde::Deserialize;
use std::path::Path;

/// Configuration structure representing the entire config.toml file
#[derive(Debug, Deserialize, Default)]
pub struct Config {
    /// Packages to seed
    #[serde(default)]
    pub packages: Vec<PackageConfig>,
}

/// Configuration for a single package
#[derive(Debug, Deserialize, Clone)]
pub struct PackageConfig {
    /// Label shown to customers
    pub label: String,
    /// `"REGULER"` or `"EXPRESS"`
    pub service_type: ServiceType,
    /// Price per kilogram
    pub price: f64,
}

/// Loads the package configuration from a TOML file
///
/// # Errors
/// Returns an error if:
/// - The file cannot be read
/// - The TOML syntax is invalid
/// - Required fields are missing or a service type is unknown
pub fn load_config<P: AsRef<Path>>(path: P) -> Result<Config> {
    let path = path.as_ref();
    tracing::debug!("Loading package configuration from {:?}", path);

    let contents = std::fs::read_to_string(path).map_err(|e| Error::Config {
        message: format!("Failed to read config file {}: {e}", path.display()),
    })?;

    parse_config(&contents)
}

/// Parses package configuration from TOML text.
pub fn parse_config(contents: &str) -> Result<Config> {
    toml::from_str(contents).map_err(|e| Error::Config {
        message: format!("Failed to parse config.toml: {e}"),
    })
}

/// Loads the configuration if the file exists; a missing file means "no seed data".
pub fn load_optional_config<P: AsRef<Path>>(path: P) -> Result<Config> {
    if path.as_ref().exists() {
        load_config(path)
    } else {
        tracing::warn!(
            "No config file at {:?}, skipping package seeding",
            path.as_ref()
        );
        Ok(Config::default())
    }
}
