//! Shared test utilities for the laundry service.
//!
//! This module provides common helper functions for setting up test databases
//! and creating test entities with sensible defaults.

use crate::{
    core::{admin, order::compute_total_price, package, user},
    entities::{self, OrderStatus, ServiceType},
    errors::{Error, Result},
};
use sea_orm::{ActiveModelTrait, DatabaseConnection, Set};

/// Password of every user created by [`create_test_user`]
pub const TEST_USER_PASSWORD: &str = "rahasia123";

/// Credentials of the admin created by [`create_test_admin`]
pub const TEST_ADMIN_USERNAME: &str = "admin";
pub const TEST_ADMIN_PASSWORD: &str = "admin123";

/// Creates an in-memory `SQLite` database with all tables initialized.
/// This is the standard setup for all integration tests.
pub async fn setup_test_db() -> Result<DatabaseConnection> {
    let db = sea_orm::Database::connect("sqlite::memory:").await?;
    crate::config::database::create_tables(&db).await?;
    Ok(db)
}

/// Registers a customer named "John" with [`TEST_USER_PASSWORD`].
pub async fn create_test_user(db: &DatabaseConnection, email: &str) -> Result<entities::UserModel> {
    user::register_user(
        db,
        user::NewUser {
            name: "John".to_string(),
            email: email.to_string(),
            password: TEST_USER_PASSWORD.to_string(),
        },
    )
    .await
}

/// Creates the test admin account.
pub async fn create_test_admin(db: &DatabaseConnection) -> Result<entities::AdminModel> {
    admin::ensure_admin(db, TEST_ADMIN_USERNAME, TEST_ADMIN_PASSWORD).await?;
    admin::get_admin_by_username(db, TEST_ADMIN_USERNAME)
        .await?
        .ok_or(Error::AdminNotFound)
}

/// Creates a package labelled after its service type.
pub async fn create_test_package(
    db: &DatabaseConnection,
    service_type: ServiceType,
    price: f64,
) -> Result<entities::PackageModel> {
    package::create_package(db, format!("Paket {service_type:?}"), service_type, price).await
}

/// Inserts an unpaid `CREATED` order priced from the given package.
///
/// Goes straight to the database, so the duplicate-order rule does not apply.
///
/// # Defaults
/// * `name`: "John"
/// * `phone`: "08123456789"
/// * `address`: "Jl. Merdeka 1"
pub async fn create_test_order(
    db: &DatabaseConnection,
    user_id: i64,
    package_id: i64,
    weight: f64,
) -> Result<entities::OrderModel> {
    let package = package::get_package_by_id(db, package_id)
        .await?
        .ok_or(Error::InvalidPackage { id: package_id })?;

    let order = entities::order::ActiveModel {
        name: Set("John".to_string()),
        phone: Set("08123456789".to_string()),
        address: Set("Jl. Merdeka 1".to_string()),
        service_type: Set(package.service_type),
        weight: Set(weight),
        total_price: Set(compute_total_price(weight, package.price)),
        is_paid: Set(false),
        status: Set(OrderStatus::Created),
        user_id: Set(user_id),
        created_at: Set(chrono::Utc::now()),
        ..Default::default()
    };
    order.insert(db).await.map_err(Into::into)
}

/// Sets up a complete test environment with a customer and a REGULER package.
/// Returns (db, user, package) for order-related tests.
pub async fn setup_with_user_and_package(
    price: f64,
) -> Result<(
    DatabaseConnection,
    entities::UserModel,
    entities::PackageModel,
)> {
    let db = setup_test_db().await?;
    let user = create_test_user(&db, "john@example.com").await?;
    let package = create_test_package(&db, ServiceType::Reguler, price).await?;
    Ok((db, user, package))
}
