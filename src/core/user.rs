//! Customer account business logic.
//!
//! Registration, credential checks, profile edits and the password reset
//! flow. Password hashes never leave this module except through the entity,
//! which does not serialize them.

use std::collections::HashMap;

use crate::{
    auth::password::{hash_password, verify_password},
    entities::{Order, User, order, user},
    errors::{Error, Result},
};
use argon2::password_hash::rand_core::{OsRng, RngCore};
use chrono::{Duration, Utc};
use sea_orm::{QueryOrder, QuerySelect, Set, prelude::*};
use tracing::info;

/// How long a password reset token stays valid
pub const RESET_TOKEN_VALIDITY_MINUTES: i64 = 15;

/// Input for [`register_user`]
#[derive(Debug, Clone)]
pub struct NewUser {
    pub name: String,
    pub email: String,
    pub password: String,
}

/// Input for [`update_profile`]. Absent fields are left unchanged.
#[derive(Debug, Clone, Default)]
pub struct ProfileUpdate {
    pub name: Option<String>,
    pub email: Option<String>,
    pub old_password: Option<String>,
    pub new_password: Option<String>,
}

/// A customer together with how many orders they have placed
#[derive(Debug, Clone)]
pub struct CustomerSummary {
    pub user: user::Model,
    pub order_count: u64,
}

fn non_blank(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|v| !v.is_empty())
}

/// Finds a customer by primary key.
///
/// # Errors
/// Returns an error if the database query fails.
pub async fn get_user_by_id(db: &DatabaseConnection, user_id: i64) -> Result<Option<user::Model>> {
    User::find_by_id(user_id).one(db).await.map_err(Into::into)
}

/// Finds a customer by email address.
///
/// # Errors
/// Returns an error if the database query fails.
pub async fn get_user_by_email(db: &DatabaseConnection, email: &str) -> Result<Option<user::Model>> {
    User::find()
        .filter(user::Column::Email.eq(email))
        .one(db)
        .await
        .map_err(Into::into)
}

/// Registers a new customer.
///
/// # Errors
/// Returns an error if a field is blank, the email is already registered,
/// hashing fails, or the insert fails.
pub async fn register_user(db: &DatabaseConnection, new_user: NewUser) -> Result<user::Model> {
    let name = new_user.name.trim();
    let email = new_user.email.trim();
    if name.is_empty() || email.is_empty() || new_user.password.is_empty() {
        return Err(Error::validation("Nama, email, dan password wajib diisi"));
    }

    if get_user_by_email(db, email).await?.is_some() {
        return Err(Error::EmailTaken {
            email: email.to_string(),
        });
    }

    let user = user::ActiveModel {
        name: Set(name.to_string()),
        email: Set(email.to_string()),
        password_hash: Set(hash_password(&new_user.password).await?),
        reset_token: Set(None),
        reset_token_expires_at: Set(None),
        created_at: Set(Utc::now()),
        ..Default::default()
    };
    let created = user.insert(db).await?;

    info!("Registered user {} ({})", created.id, created.email);
    Ok(created)
}

/// Checks a customer's email and password.
///
/// # Errors
/// - [`Error::Validation`] if either field is blank
/// - [`Error::UserNotFound`] if no customer has this email
/// - [`Error::WrongPassword`] if the password does not match
pub async fn authenticate_user(
    db: &DatabaseConnection,
    email: &str,
    password: &str,
) -> Result<user::Model> {
    let email = email.trim();
    if email.is_empty() || password.is_empty() {
        return Err(Error::validation("Email dan password wajib diisi"));
    }

    let user = get_user_by_email(db, email)
        .await?
        .ok_or(Error::UserNotFound)?;

    if !verify_password(password, &user.password_hash).await? {
        return Err(Error::WrongPassword);
    }

    Ok(user)
}

/// Applies a profile update for the given customer.
///
/// Changing the password requires both the old and the new password.
///
/// # Errors
/// Returns an error if the customer does not exist, the new email belongs to
/// someone else, the password pair is incomplete, or the old password is wrong.
pub async fn update_profile(
    db: &DatabaseConnection,
    user_id: i64,
    update: ProfileUpdate,
) -> Result<user::Model> {
    let existing = get_user_by_id(db, user_id)
        .await?
        .ok_or(Error::UserNotFound)?;

    let name = non_blank(update.name.as_deref()).map(ToString::to_string);
    let email = non_blank(update.email.as_deref()).map(ToString::to_string);
    let old_password = update.old_password.filter(|p| !p.is_empty());
    let new_password = update.new_password.filter(|p| !p.is_empty());

    let mut active: user::ActiveModel = existing.clone().into();
    // Always set so the update statement is never empty
    active.name = Set(name.unwrap_or_else(|| existing.name.clone()));

    if let Some(email) = email {
        if email != existing.email {
            let taken = User::find()
                .filter(user::Column::Email.eq(email.as_str()))
                .filter(user::Column::Id.ne(user_id))
                .one(db)
                .await?;
            if taken.is_some() {
                return Err(Error::EmailTaken { email });
            }
            active.email = Set(email);
        }
    }

    match (old_password, new_password) {
        (None, None) => {}
        (Some(old), Some(new)) => {
            if !verify_password(&old, &existing.password_hash).await? {
                return Err(Error::WrongCurrentPassword);
            }
            active.password_hash = Set(hash_password(&new).await?);
            info!("User {user_id} changed their password");
        }
        _ => {
            return Err(Error::validation(
                "Password lama dan password baru wajib diisi",
            ));
        }
    }

    active.update(db).await.map_err(Into::into)
}

fn generate_reset_token() -> String {
    let mut bytes = [0u8; 32];
    OsRng.fill_bytes(&mut bytes);
    hex::encode(bytes)
}

/// Creates a password reset token for the customer with this email.
///
/// The token replaces any earlier one and expires after
/// [`RESET_TOKEN_VALIDITY_MINUTES`]. It is returned for out-of-band delivery
/// and must never be echoed back to the unauthenticated requester.
///
/// # Errors
/// Returns an error if the email is blank or not registered.
pub async fn request_password_reset(db: &DatabaseConnection, email: &str) -> Result<String> {
    let email = email.trim();
    if email.is_empty() {
        return Err(Error::validation("Email wajib diisi"));
    }

    let user = get_user_by_email(db, email)
        .await?
        .ok_or(Error::EmailNotRegistered)?;

    let token = generate_reset_token();
    let mut active: user::ActiveModel = user.into();
    active.reset_token = Set(Some(token.clone()));
    active.reset_token_expires_at =
        Set(Some(Utc::now() + Duration::minutes(RESET_TOKEN_VALIDITY_MINUTES)));
    active.update(db).await?;

    Ok(token)
}

/// Sets a new password using a reset token and clears the token.
///
/// # Errors
/// Returns [`Error::InvalidResetToken`] if the token is unknown or expired.
pub async fn reset_password(db: &DatabaseConnection, token: &str, new_password: &str) -> Result<()> {
    if token.trim().is_empty() || new_password.is_empty() {
        return Err(Error::validation("Token dan password wajib diisi"));
    }

    let user = User::find()
        .filter(user::Column::ResetToken.eq(token.trim()))
        .filter(user::Column::ResetTokenExpiresAt.gt(Utc::now()))
        .one(db)
        .await?
        .ok_or(Error::InvalidResetToken)?;

    let user_id = user.id;
    let mut active: user::ActiveModel = user.into();
    active.password_hash = Set(hash_password(new_password).await?);
    active.reset_token = Set(None);
    active.reset_token_expires_at = Set(None);
    active.update(db).await?;

    info!("User {user_id} reset their password");
    Ok(())
}

/// Lists all customers, newest first, with their order counts.
///
/// # Errors
/// Returns an error if a database query fails.
pub async fn list_customers(db: &DatabaseConnection) -> Result<Vec<CustomerSummary>> {
    let users = User::find()
        .order_by_desc(user::Column::CreatedAt)
        .order_by_desc(user::Column::Id)
        .all(db)
        .await?;

    let counts: HashMap<i64, i64> = Order::find()
        .select_only()
        .column(order::Column::UserId)
        .column_as(order::Column::Id.count(), "order_count")
        .group_by(order::Column::UserId)
        .into_tuple::<(i64, i64)>()
        .all(db)
        .await?
        .into_iter()
        .collect();

    Ok(users
        .into_iter()
        .map(|user| {
            let order_count = counts
                .get(&user.id)
                .copied()
                .and_then(|c| u64::try_from(c).ok())
                .unwrap_or(0);
            CustomerSummary { user, order_count }
        })
        .collect())
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    use super::*;
    use crate::entities::ServiceType;
    use crate::test_utils::*;

    fn new_user(email: &str) -> NewUser {
        NewUser {
            name: "John".to_string(),
            email: email.to_string(),
            password: "rahasia123".to_string(),
        }
    }

    #[tokio::test]
    async fn test_register_and_authenticate() -> Result<()> {
        let db = setup_test_db().await?;

        let user = register_user(&db, new_user(" john@example.com ")).await?;
        assert_eq!(user.email, "john@example.com");
        assert_ne!(user.password_hash, "rahasia123");

        let logged_in = authenticate_user(&db, "john@example.com", "rahasia123").await?;
        assert_eq!(logged_in.id, user.id);

        Ok(())
    }

    #[tokio::test]
    async fn test_register_rejects_duplicate_email() -> Result<()> {
        let db = setup_test_db().await?;
        register_user(&db, new_user("john@example.com")).await?;

        let result = register_user(&db, new_user("john@example.com")).await;
        assert!(matches!(result.unwrap_err(), Error::EmailTaken { .. }));

        Ok(())
    }

    #[tokio::test]
    async fn test_register_requires_all_fields() -> Result<()> {
        let db = setup_test_db().await?;
        let mut incomplete = new_user("john@example.com");
        incomplete.password = String::new();

        let result = register_user(&db, incomplete).await;
        assert!(matches!(result.unwrap_err(), Error::Validation { .. }));

        Ok(())
    }

    #[tokio::test]
    async fn test_authenticate_failures() -> Result<()> {
        let db = setup_test_db().await?;
        register_user(&db, new_user("john@example.com")).await?;

        let unknown = authenticate_user(&db, "jane@example.com", "rahasia123").await;
        assert!(matches!(unknown.unwrap_err(), Error::UserNotFound));

        let wrong = authenticate_user(&db, "john@example.com", "salah").await;
        assert!(matches!(wrong.unwrap_err(), Error::WrongPassword));

        let blank = authenticate_user(&db, "", "").await;
        assert!(matches!(blank.unwrap_err(), Error::Validation { .. }));

        Ok(())
    }

    #[tokio::test]
    async fn test_update_profile_name_and_email() -> Result<()> {
        let db = setup_test_db().await?;
        let user = register_user(&db, new_user("john@example.com")).await?;

        let updated = update_profile(
            &db,
            user.id,
            ProfileUpdate {
                name: Some("John Doe".to_string()),
                email: Some("johnd@example.com".to_string()),
                ..Default::default()
            },
        )
        .await?;

        assert_eq!(updated.name, "John Doe");
        assert_eq!(updated.email, "johnd@example.com");
        // Password untouched
        authenticate_user(&db, "johnd@example.com", "rahasia123").await?;

        Ok(())
    }

    #[tokio::test]
    async fn test_update_profile_email_conflict() -> Result<()> {
        let db = setup_test_db().await?;
        let john = register_user(&db, new_user("john@example.com")).await?;
        register_user(&db, new_user("jane@example.com")).await?;

        let result = update_profile(
            &db,
            john.id,
            ProfileUpdate {
                email: Some("jane@example.com".to_string()),
                ..Default::default()
            },
        )
        .await;
        assert!(matches!(result.unwrap_err(), Error::EmailTaken { .. }));

        Ok(())
    }

    #[tokio::test]
    async fn test_update_profile_password_change() -> Result<()> {
        let db = setup_test_db().await?;
        let user = register_user(&db, new_user("john@example.com")).await?;

        let wrong = update_profile(
            &db,
            user.id,
            ProfileUpdate {
                old_password: Some("salah".to_string()),
                new_password: Some("baru456".to_string()),
                ..Default::default()
            },
        )
        .await;
        assert!(matches!(wrong.unwrap_err(), Error::WrongCurrentPassword));

        let half = update_profile(
            &db,
            user.id,
            ProfileUpdate {
                new_password: Some("baru456".to_string()),
                ..Default::default()
            },
        )
        .await;
        assert!(matches!(half.unwrap_err(), Error::Validation { .. }));

        update_profile(
            &db,
            user.id,
            ProfileUpdate {
                old_password: Some("rahasia123".to_string()),
                new_password: Some("baru456".to_string()),
                ..Default::default()
            },
        )
        .await?;
        authenticate_user(&db, "john@example.com", "baru456").await?;

        Ok(())
    }

    #[tokio::test]
    async fn test_password_reset_flow() -> Result<()> {
        let db = setup_test_db().await?;
        register_user(&db, new_user("john@example.com")).await?;

        let token = request_password_reset(&db, "john@example.com").await?;
        assert_eq!(token.len(), 64);

        reset_password(&db, &token, "baru456").await?;
        authenticate_user(&db, "john@example.com", "baru456").await?;

        // Tokens are single-use
        let reused = reset_password(&db, &token, "lagi789").await;
        assert!(matches!(reused.unwrap_err(), Error::InvalidResetToken));

        Ok(())
    }

    #[tokio::test]
    async fn test_password_reset_rejects_expired_token() -> Result<()> {
        let db = setup_test_db().await?;
        let user = register_user(&db, new_user("john@example.com")).await?;
        let token = request_password_reset(&db, "john@example.com").await?;

        let mut active: user::ActiveModel = get_user_by_id(&db, user.id).await?.unwrap().into();
        active.reset_token_expires_at = Set(Some(Utc::now() - Duration::minutes(1)));
        active.update(&db).await?;

        let result = reset_password(&db, &token, "baru456").await;
        assert!(matches!(result.unwrap_err(), Error::InvalidResetToken));

        Ok(())
    }

    #[tokio::test]
    async fn test_password_reset_unknown_email() -> Result<()> {
        let db = setup_test_db().await?;
        let result = request_password_reset(&db, "nobody@example.com").await;
        assert!(matches!(result.unwrap_err(), Error::EmailNotRegistered));
        Ok(())
    }

    #[tokio::test]
    async fn test_list_customers_with_order_counts() -> Result<()> {
        let db = setup_test_db().await?;
        let john = create_test_user(&db, "john@example.com").await?;
        let jane = create_test_user(&db, "jane@example.com").await?;
        let reguler = create_test_package(&db, ServiceType::Reguler, 7000.0).await?;
        let express = create_test_package(&db, ServiceType::Express, 12000.0).await?;

        create_test_order(&db, john.id, reguler.id, 1.0).await?;
        create_test_order(&db, john.id, express.id, 2.0).await?;

        let customers = list_customers(&db).await?;
        assert_eq!(customers.len(), 2);

        // Newest first
        assert_eq!(customers[0].user.id, jane.id);
        assert_eq!(customers[0].order_count, 0);
        assert_eq!(customers[1].user.id, john.id);
        assert_eq!(customers[1].order_count, 2);

        Ok(())
    }
}
