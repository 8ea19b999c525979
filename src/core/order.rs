//! Order business logic - the order lifecycle.
//!
//! Customers create orders from a package and may edit or cancel them while
//! they are still `CREATED` and unpaid. Admins move orders through the status
//! states and mark them paid; every status change is recorded in the tracking
//! log within the same database transaction. Prices are always recomputed from
//! an explicitly chosen package as `weight * price`.

use crate::{
    auth::Identity,
    core::{package::get_package_by_id, tracking},
    entities::{Order, OrderStatus, User, order, tracking as tracking_entity, user},
    errors::{Error, Result},
};
use sea_orm::{QueryOrder, Set, TransactionTrait, prelude::*};
use tracing::info;

/// Input for [`create_order`]
#[derive(Debug, Clone)]
pub struct NewOrder {
    pub name: String,
    pub phone: String,
    pub address: String,
    pub package_id: i64,
    /// Kilograms, must be positive
    pub weight: f64,
}

/// Input for [`update_order`]. Absent fields keep their current value.
///
/// Changing the weight or the package requires `package_id`, so the new
/// price always comes from a package the caller chose.
#[derive(Debug, Clone, Default)]
pub struct OrderEdit {
    pub name: Option<String>,
    pub phone: Option<String>,
    pub address: Option<String>,
    pub weight: Option<f64>,
    pub package_id: Option<i64>,
}

/// Input for [`set_order_status`]
#[derive(Debug, Clone, Copy, Default)]
pub struct StatusUpdate {
    pub status: Option<OrderStatus>,
    pub is_paid: Option<bool>,
}

/// An order with its owner and tracking history, for the admin detail view
#[derive(Debug, Clone)]
pub struct OrderDetail {
    pub order: order::Model,
    pub customer: Option<user::Model>,
    pub tracking: Vec<tracking_entity::Model>,
}

/// Total price of `weight` kilograms at `price_per_kg`.
#[must_use]
pub fn compute_total_price(weight: f64, price_per_kg: f64) -> f64 {
    weight * price_per_kg
}

fn validate_weight(weight: f64) -> Result<()> {
    if weight <= 0.0 || !weight.is_finite() {
        return Err(Error::InvalidAmount { amount: weight });
    }
    Ok(())
}

fn ensure_can_access(actor: &Identity, order: &order::Model) -> Result<()> {
    if !actor.is_admin() && order.user_id != actor.id {
        return Err(Error::NotOrderOwner { id: order.id });
    }
    Ok(())
}

async fn find_order<C>(conn: &C, order_id: i64) -> Result<order::Model>
where
    C: ConnectionTrait,
{
    Order::find_by_id(order_id)
        .one(conn)
        .await?
        .ok_or(Error::OrderNotFound { id: order_id })
}

/// Places a new order for a customer.
///
/// The package's service type is copied onto the order and the total price is
/// `weight * package.price`. A customer may not hold two unpaid orders with the
/// same phone number and service type.
///
/// # Errors
/// Returns an error if:
/// - The caller is not a customer
/// - Name or phone is blank, or the weight is not a positive number
/// - The package does not exist
/// - A matching unpaid order already exists
/// - The database insert fails
pub async fn create_order(
    db: &DatabaseConnection,
    actor: &Identity,
    new_order: NewOrder,
) -> Result<order::Model> {
    if actor.is_admin() {
        return Err(Error::CustomerOnly);
    }

    let name = new_order.name.trim();
    let phone = new_order.phone.trim();
    if name.is_empty() || phone.is_empty() {
        return Err(Error::validation("Data wajib belum lengkap"));
    }
    validate_weight(new_order.weight)?;

    let package = get_package_by_id(db, new_order.package_id)
        .await?
        .ok_or(Error::InvalidPackage {
            id: new_order.package_id,
        })?;

    let existing = Order::find()
        .filter(order::Column::Phone.eq(phone))
        .filter(order::Column::ServiceType.eq(package.service_type))
        .filter(order::Column::IsPaid.eq(false))
        .filter(order::Column::UserId.eq(actor.id))
        .one(db)
        .await?;
    if let Some(existing) = existing {
        return Err(Error::DuplicateUnpaidOrder {
            existing_id: existing.id,
        });
    }

    let order = order::ActiveModel {
        name: Set(name.to_string()),
        phone: Set(phone.to_string()),
        address: Set(new_order.address.trim().to_string()),
        service_type: Set(package.service_type),
        weight: Set(new_order.weight),
        total_price: Set(compute_total_price(new_order.weight, package.price)),
        is_paid: Set(false),
        status: Set(OrderStatus::Created),
        user_id: Set(actor.id),
        created_at: Set(chrono::Utc::now()),
        ..Default::default()
    };
    let created = order.insert(db).await?;

    info!(
        "User {} created order {} ({:?}, {} kg, total {})",
        actor.id, created.id, created.service_type, created.weight, created.total_price
    );
    Ok(created)
}

/// Retrieves an order the caller is allowed to see: their own, or any for admins.
///
/// # Errors
/// Returns [`Error::OrderNotFound`] or [`Error::NotOrderOwner`].
pub async fn get_order_for(
    db: &DatabaseConnection,
    actor: &Identity,
    order_id: i64,
) -> Result<order::Model> {
    let order = find_order(db, order_id).await?;
    ensure_can_access(actor, &order)?;
    Ok(order)
}

/// Retrieves all orders of one customer, newest first.
///
/// # Errors
/// Returns an error if the database query fails.
pub async fn get_orders_for_user(
    db: &DatabaseConnection,
    user_id: i64,
) -> Result<Vec<order::Model>> {
    Order::find()
        .filter(order::Column::UserId.eq(user_id))
        .order_by_desc(order::Column::CreatedAt)
        .order_by_desc(order::Column::Id)
        .all(db)
        .await
        .map_err(Into::into)
}

/// Retrieves every order with its owner, newest first.
///
/// # Errors
/// Returns an error if the database query fails.
pub async fn get_all_orders(
    db: &DatabaseConnection,
) -> Result<Vec<(order::Model, Option<user::Model>)>> {
    Order::find()
        .find_also_related(User)
        .order_by_desc(order::Column::CreatedAt)
        .order_by_desc(order::Column::Id)
        .all(db)
        .await
        .map_err(Into::into)
}

/// Retrieves an order with its owner and tracking history.
///
/// # Errors
/// Returns [`Error::OrderNotFound`] if the order does not exist.
pub async fn get_order_detail(db: &DatabaseConnection, order_id: i64) -> Result<OrderDetail> {
    let order = find_order(db, order_id).await?;
    let customer = User::find_by_id(order.user_id).one(db).await?;
    let tracking = tracking::get_tracking_for_order(db, order_id).await?;

    Ok(OrderDetail {
        order,
        customer,
        tracking,
    })
}

/// Edits an order that has not been processed yet.
///
/// Rules, checked in this order:
/// 1. The order must exist.
/// 2. Its status must still be `CREATED`, for every caller.
/// 3. Customers may only edit their own, unpaid orders.
/// 4. A weight or package change needs an explicit `package_id`; the service
///    type and total price are then recomputed from that package.
///
/// # Errors
/// Returns the error of the first rule that fails, [`Error::InvalidPackage`]
/// for an unknown package, or a database error.
pub async fn update_order(
    db: &DatabaseConnection,
    actor: &Identity,
    order_id: i64,
    edit: OrderEdit,
) -> Result<order::Model> {
    let order = find_order(db, order_id).await?;

    if order.status != OrderStatus::Created {
        return Err(Error::OrderAlreadyProcessed { id: order_id });
    }

    if !actor.is_admin() {
        ensure_can_access(actor, &order)?;
        if order.is_paid {
            return Err(Error::OrderPaidLocked { id: order_id });
        }
    }

    if edit.weight.is_some() && edit.package_id.is_none() {
        return Err(Error::validation(
            "Paket wajib dipilih untuk menghitung ulang harga",
        ));
    }

    let pick = |value: Option<String>, current: &str| {
        value
            .map(|v| v.trim().to_string())
            .filter(|v| !v.is_empty())
            .unwrap_or_else(|| current.to_string())
    };

    let mut active: order::ActiveModel = order.clone().into();
    active.name = Set(pick(edit.name, &order.name));
    active.phone = Set(pick(edit.phone, &order.phone));
    active.address = Set(edit
        .address
        .map_or_else(|| order.address.clone(), |a| a.trim().to_string()));

    if let Some(package_id) = edit.package_id {
        let package = get_package_by_id(db, package_id)
            .await?
            .ok_or(Error::InvalidPackage { id: package_id })?;

        let weight = edit.weight.unwrap_or(order.weight);
        validate_weight(weight)?;

        active.weight = Set(weight);
        active.service_type = Set(package.service_type);
        active.total_price = Set(compute_total_price(weight, package.price));
    }

    let updated = active.update(db).await?;
    info!("Order {} updated by {:?}", order_id, actor);
    Ok(updated)
}

/// Deletes an unpaid order. Its tracking events are kept.
///
/// # Errors
/// Returns [`Error::OrderNotFound`], [`Error::OrderPaidUndeletable`] for paid
/// orders, [`Error::NotOrderOwner`] when a customer targets someone else's
/// order, or a database error.
pub async fn delete_order(db: &DatabaseConnection, actor: &Identity, order_id: i64) -> Result<()> {
    let order = find_order(db, order_id).await?;

    if order.is_paid {
        return Err(Error::OrderPaidUndeletable { id: order_id });
    }
    ensure_can_access(actor, &order)?;

    Order::delete_by_id(order_id).exec(db).await?;

    info!("Order {} deleted by {:?}", order_id, actor);
    Ok(())
}

/// Sets the status and/or payment flag of an order (admin action).
///
/// Setting `COMPLETED` always marks the order paid. When a status is given, a
/// tracking event with that status is appended in the same transaction.
///
/// # Errors
/// Returns a validation error when neither field is given,
/// [`Error::OrderNotFound`] for an unknown order, or a database error.
pub async fn set_order_status(
    db: &DatabaseConnection,
    order_id: i64,
    update: StatusUpdate,
) -> Result<order::Model> {
    if update.status.is_none() && update.is_paid.is_none() {
        return Err(Error::validation(
            "Status atau status pembayaran wajib diisi",
        ));
    }

    // Use a transaction to ensure atomicity
    let txn = db.begin().await?;

    let order = find_order(&txn, order_id).await?;
    let mut active: order::ActiveModel = order.into();

    if let Some(is_paid) = update.is_paid {
        active.is_paid = Set(is_paid);
    }
    if let Some(status) = update.status {
        active.status = Set(status);
        if status == OrderStatus::Completed {
            active.is_paid = Set(true);
        }
    }

    let updated = active.update(&txn).await?;

    if let Some(status) = update.status {
        tracking::append_tracking(&txn, order_id, status).await?;
    }

    // Commit the transaction
    txn.commit().await?;

    info!(
        "Order {} set to {:?} (paid: {})",
        order_id, updated.status, updated.is_paid
    );
    Ok(updated)
}
