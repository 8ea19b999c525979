/// Database connection and schema creation
pub mod database;

/// Default package catalog loading from config.toml
pub mod packages;

/// Runtime settings read from environment variables
pub mod settings;
