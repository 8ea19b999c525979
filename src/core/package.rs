//! Package business logic - Handles the price list customers order from.
//!
//! Packages are created and deleted by admins and read by the order flows to
//! price orders. Orders copy price and service type, so deleting a package
//! never changes an existing order.

use crate::{
    config::packages::PackageConfig,
    entities::{Package, ServiceType, package},
    errors::{Error, Result},
};
use sea_orm::{PaginatorTrait, QueryOrder, Set, prelude::*};
use tracing::info;

/// Retrieves all packages, newest first.
///
/// # Errors
/// Returns an error if the database query fails.
pub async fn get_all_packages(db: &DatabaseConnection) -> Result<Vec<package::Model>> {
    Package::find()
        .order_by_desc(package::Column::CreatedAt)
        .order_by_desc(package::Column::Id)
        .all(db)
        .await
        .map_err(Into::into)
}

/// Retrieves a specific package by its unique ID.
///
/// # Errors
/// Returns an error if the database query fails.
pub async fn get_package_by_id<C>(db: &C, package_id: i64) -> Result<Option<package::Model>>
where
    C: ConnectionTrait,
{
    Package::find_by_id(package_id)
        .one(db)
        .await
        .map_err(Into::into)
}

fn validate_package(label: &str, price: f64) -> Result<()> {
    if label.trim().is_empty() {
        return Err(Error::validation("Label paket wajib diisi"));
    }

    if price < 0.0 || !price.is_finite() {
        return Err(Error::InvalidAmount { amount: price });
    }

    Ok(())
}

/// Creates a new package after validating its label and price.
///
/// # Errors
/// Returns an error if:
/// - The label is empty or whitespace-only
/// - The price is negative or not finite (NaN, infinity)
/// - The database insert operation fails
pub async fn create_package(
    db: &DatabaseConnection,
    label: String,
    service_type: ServiceType,
    price: f64,
) -> Result<package::Model> {
    validate_package(&label, price)?;

    let package = package::ActiveModel {
        label: Set(label.trim().to_string()),
        service_type: Set(service_type),
        price: Set(price),
        created_at: Set(chrono::Utc::now()),
        ..Default::default()
    };
    let created = package.insert(db).await?;

    info!(
        "Created package {} ({:?}, {} per kg)",
        created.label, created.service_type, created.price
    );
    Ok(created)
}

/// Removes a package from the catalog.
///
/// # Errors
/// Returns an error if the package does not exist or the delete fails.
pub async fn delete_package(db: &DatabaseConnection, package_id: i64) -> Result<package::Model> {
    let package = Package::find_by_id(package_id)
        .one(db)
        .await?
        .ok_or(Error::PackageNotFound { id: package_id })?;

    Package::delete_by_id(package_id).exec(db).await?;

    info!("Deleted package {} ({})", package.id, package.label);
    Ok(package)
}

/// Inserts the configured packages when the catalog is empty.
///
/// Returns the number of packages inserted.
pub async fn seed_default_packages(
    db: &DatabaseConnection,
    packages: &[PackageConfig],
) -> Result<usize> {
    let existing = Package::find().count(db).await?;
    if existing > 0 {
        info!("Found {existing} packages, skipping seed");
        return Ok(0);
    }

    for config in packages {
        create_package(db, config.label.clone(), config.service_type, config.price).await?;
    }

    info!("Seeded {} default packages", packages.len());
    Ok(packages.len())
}

/// Sets every zero-priced package to its service type's default rate.
///
/// Returns the packages that were repaired.
pub async fn repair_zero_prices(db: &DatabaseConnection) -> Result<Vec<package::Model>> {
    let broken = Package::find()
        .filter(package::Column::Price.eq(0.0))
        .all(db)
        .await?;

    let mut repaired = Vec::with_capacity(broken.len());
    for model in broken {
        let rate = model.service_type.default_rate();
        info!("Fixing price for {} -> {}", model.label, rate);

        let mut active: package::ActiveModel = model.into();
        active.price = Set(rate);
        repaired.push(active.update(db).await?);
    }

    Ok(repaired)
}
