//! Admin account business logic.

use crate::{
    auth::password::{hash_password, verify_password},
    entities::{Admin, admin},
    errors::{Error, Result},
};
use sea_orm::{Set, prelude::*};
use tracing::info;

/// Finds an admin by login name.
///
/// # Errors
/// Returns an error if the database query fails.
pub async fn get_admin_by_username(
    db: &DatabaseConnection,
    username: &str,
) -> Result<Option<admin::Model>> {
    Admin::find()
        .filter(admin::Column::Username.eq(username))
        .one(db)
        .await
        .map_err(Into::into)
}

/// Checks an admin's username and password.
///
/// # Errors
/// - [`Error::Validation`] if either field is blank
/// - [`Error::AdminNotFound`] if the username is unknown
/// - [`Error::WrongPassword`] if the password does not match
pub async fn authenticate_admin(
    db: &DatabaseConnection,
    username: &str,
    password: &str,
) -> Result<admin::Model> {
    let username = username.trim();
    if username.is_empty() || password.is_empty() {
        return Err(Error::validation("Username dan password wajib diisi"));
    }

    let admin = get_admin_by_username(db, username)
        .await?
        .ok_or(Error::AdminNotFound)?;

    if !verify_password(password, &admin.password_hash).await? {
        return Err(Error::WrongPassword);
    }

    Ok(admin)
}

/// Replaces an admin's password after checking the current one.
///
/// # Errors
/// Returns an error if a field is blank, the admin no longer exists, or the
/// current password is wrong.
pub async fn change_admin_password(
    db: &DatabaseConnection,
    admin_id: i64,
    current_password: &str,
    new_password: &str,
) -> Result<()> {
    if current_password.is_empty() || new_password.is_empty() {
        return Err(Error::validation("Semua field harus diisi"));
    }

    let admin = Admin::find_by_id(admin_id)
        .one(db)
        .await?
        .ok_or(Error::AdminNotFound)?;

    if !verify_password(current_password, &admin.password_hash).await? {
        return Err(Error::WrongCurrentPassword);
    }

    let mut active: admin::ActiveModel = admin.into();
    active.password_hash = Set(hash_password(new_password).await?);
    active.update(db).await?;

    info!("Admin {admin_id} changed their password");
    Ok(())
}

/// Creates the admin account if no admin with this username exists.
///
/// Returns `true` when a new account was created.
pub async fn ensure_admin(db: &DatabaseConnection, username: &str, password: &str) -> Result<bool> {
    let username = username.trim();
    if get_admin_by_username(db, username).await?.is_some() {
        return Ok(false);
    }

    let admin = admin::ActiveModel {
        username: Set(username.to_string()),
        password_hash: Set(hash_password(password).await?),
        ..Default::default()
    };
    admin.insert(db).await?;

    info!("Created admin account {username}");
    Ok(true)
}
