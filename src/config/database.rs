//! Database configuration module.
//!
//! This module handles the `SQLite` connection and table creation using `SeaORM`.
//! Tables are generated from the entity definitions with
//! `Schema::create_table_from_entity`, so the schema always matches the Rust
//! structs without hand-written SQL. Creation is idempotent, which lets the
//! service start against an existing database file.

use crate::entities::{Admin, Order, Package, Tracking, User};
use crate::errors::Result;
use sea_orm::{ConnectionTrait, Database, DatabaseConnection, EntityName, EntityTrait, Schema};
use std::path::{Path, PathBuf};
use tracing::debug;

/// Default location of the database file when `DATABASE_URL` is unset.
pub const DEFAULT_DATABASE_URL: &str = "sqlite://data/laundry_hub.sqlite?mode=rwc";

/// Gets the database URL from the environment or returns the default `SQLite` path.
#[must_use]
pub fn get_database_url() -> String {
    std::env::var("DATABASE_URL").unwrap_or_else(|_| DEFAULT_DATABASE_URL.to_string())
}

/// Directory that must exist before `SQLite` can create the database file.
///
/// Returns `None` for in-memory databases, non-`SQLite` URLs and files in the
/// current directory.
#[must_use]
pub fn sqlite_parent_dir(database_url: &str) -> Option<PathBuf> {
    let path = database_url
        .strip_prefix("sqlite://")
        .or_else(|| database_url.strip_prefix("sqlite:"))?;
    let path = path.split('?').next().unwrap_or_default();
    if path.is_empty() || path.starts_with(":memory:") {
        return None;
    }

    Path::new(path)
        .parent()
        .filter(|p| !p.as_os_str().is_empty())
        .map(Path::to_path_buf)
}

/// Creates the directory holding the database file, if any.
pub fn ensure_database_dir(database_url: &str) -> Result<()> {
    if let Some(dir) = sqlite_parent_dir(database_url) {
        debug!("Ensuring database directory {:?}", dir);
        std::fs::create_dir_all(dir)?;
    }
    Ok(())
}

/// Opens a connection pool for the given URL.
pub async fn create_connection(database_url: &str) -> Result<DatabaseConnection> {
    Database::connect(database_url).await.map_err(Into::into)
}

async fn create_table<E>(db: &DatabaseConnection, schema: &Schema, entity: E) -> Result<()>
where
    E: EntityTrait,
{
    let builder = db.get_database_backend();
    debug!("Ensuring table {}", entity.table_name());

    let mut statement = schema.create_table_from_entity(entity);
    statement.if_not_exists();
    db.execute(builder.build(&statement)).await?;
    Ok(())
}

/// Creates every table that does not exist yet.
///
/// Referenced tables are created before the tables pointing at them.
pub async fn create_tables(db: &DatabaseConnection) -> Result<()> {
    let schema = Schema::new(db.get_database_backend());

    create_table(db, &schema, User).await?;
    create_table(db, &schema, Admin).await?;
    create_table(db, &schema, Package).await?;
    create_table(db, &schema, Order).await?;
    create_table(db, &schema, Tracking).await?;

    Ok(())
}
