//! Runtime settings loaded from environment variables.
//!
//! `.env` is loaded by `main` before these are read, so either source works.

use crate::errors::{Error, Result};
use std::net::SocketAddr;

/// Default listen address
pub const DEFAULT_BIND_ADDR: &str = "0.0.0.0:3000";

/// Default token lifetime
pub const DEFAULT_TOKEN_TTL_HOURS: i64 = 24;

/// Settings needed to start the service
#[derive(Debug, Clone)]
pub struct Settings {
    /// SeaORM connection URL
    pub database_url: String,
    /// Shared secret for signing session tokens
    pub jwt_secret: String,
    /// Listen address for the HTTP server
    pub bind_addr: SocketAddr,
    /// Session token lifetime in hours
    pub token_ttl_hours: i64,
    /// Path of the TOML file holding the default package catalog
    pub config_path: String,
    /// Initial admin account, seeded when absent
    pub initial_admin: Option<AdminSeed>,
}

/// Credentials for the admin account created on first start
#[derive(Debug, Clone)]
pub struct AdminSeed {
    pub username: String,
    pub password: String,
}

/// Reads all settings from the process environment.
///
/// # Errors
/// Returns an error if `JWT_SECRET` is missing or empty, or if `BIND_ADDR` /
/// `TOKEN_TTL_HOURS` cannot be parsed.
pub fn load_settings() -> Result<Settings> {
    let jwt_secret = std::env::var("JWT_SECRET")?;
    if jwt_secret.trim().is_empty() {
        return Err(Error::Config {
            message: "JWT_SECRET must not be empty".to_string(),
        });
    }

    let bind_addr = std::env::var("BIND_ADDR")
        .unwrap_or_else(|_| DEFAULT_BIND_ADDR.to_string())
        .parse::<SocketAddr>()
        .map_err(|e| Error::Config {
            message: format!("Invalid BIND_ADDR: {e}"),
        })?;

    let token_ttl_hours = match std::env::var("TOKEN_TTL_HOURS") {
        Ok(raw) => parse_ttl_hours(&raw)?,
        Err(_) => DEFAULT_TOKEN_TTL_HOURS,
    };

    let initial_admin = match (
        std::env::var("ADMIN_USERNAME"),
        std::env::var("ADMIN_PASSWORD"),
    ) {
        (Ok(username), Ok(password)) if !username.trim().is_empty() && !password.is_empty() => {
            Some(AdminSeed { username, password })
        }
        _ => None,
    };

    Ok(Settings {
        database_url: super::database::get_database_url(),
        jwt_secret,
        bind_addr,
        token_ttl_hours,
        config_path: std::env::var("CONFIG_PATH").unwrap_or_else(|_| "config.toml".to_string()),
        initial_admin,
    })
}

fn parse_ttl_hours(raw: &str) -> Result<i64> {
    match raw.trim().parse::<i64>() {
        Ok(hours) if hours > 0 => Ok(hours),
        _ => Err(Error::Config {
            message: format!("TOKEN_TTL_HOURS must be a positive integer, got {raw:?}"),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_ttl_hours() {
        assert_eq!(parse_ttl_hours("24").ok(), Some(24));
        assert_eq!(parse_ttl_hours(" 8 ").ok(), Some(8));
        assert!(parse_ttl_hours("0").is_err());
        assert!(parse_ttl_hours("-3").is_err());
        assert!(parse_ttl_hours("sehari").is_err());
    }
}
