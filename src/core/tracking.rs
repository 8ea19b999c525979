//! Tracking business logic - the append-only status history of an order.
//!
//! Events are written by admin actions, either alongside a status change (see
//! [`crate::core::order::set_order_status`]) or on their own, and read by
//! anyone who knows the order number.

use crate::{
    entities::{Order, OrderStatus, Tracking, order, tracking},
    errors::{Error, Result},
};
use sea_orm::{QueryOrder, Set, prelude::*};
use tracing::debug;

/// An order together with its status events, newest first
#[derive(Debug, Clone)]
pub struct TrackingHistory {
    pub order: order::Model,
    pub events: Vec<tracking::Model>,
}

/// Inserts a tracking event stamped with the current time.
///
/// Accepts a transaction so it can share one with the order update.
pub async fn append_tracking<C>(
    conn: &C,
    order_id: i64,
    status: OrderStatus,
) -> Result<tracking::Model>
where
    C: ConnectionTrait,
{
    let event = tracking::ActiveModel {
        order_id: Set(order_id),
        status: Set(status),
        timestamp: Set(chrono::Utc::now()),
        ..Default::default()
    };

    debug!("Appending tracking {:?} to order {}", status, order_id);
    event.insert(conn).await.map_err(Into::into)
}

/// Appends a tracking event to an existing order.
///
/// # Errors
/// Returns [`Error::OrderNotFound`] if the order does not exist.
pub async fn add_tracking(
    db: &DatabaseConnection,
    order_id: i64,
    status: OrderStatus,
) -> Result<tracking::Model> {
    if Order::find_by_id(order_id).one(db).await?.is_none() {
        return Err(Error::OrderNotFound { id: order_id });
    }

    append_tracking(db, order_id, status).await
}

/// Retrieves the tracking events of an order, newest first.
///
/// # Errors
/// Returns an error if the database query fails.
pub async fn get_tracking_for_order<C>(conn: &C, order_id: i64) -> Result<Vec<tracking::Model>>
where
    C: ConnectionTrait,
{
    Tracking::find()
        .filter(tracking::Column::OrderId.eq(order_id))
        .order_by_desc(tracking::Column::Timestamp)
        .order_by_desc(tracking::Column::Id)
        .all(conn)
        .await
        .map_err(Into::into)
}

/// Looks up an order and its tracking events by order number.
///
/// No ownership check: the order number is what customers track by.
///
/// # Errors
/// Returns [`Error::OrderNotFound`] if the order does not exist.
pub async fn get_tracking_history(
    db: &DatabaseConnection,
    order_id: i64,
) -> Result<TrackingHistory> {
    let order = Order::find_by_id(order_id)
        .one(db)
        .await?
        .ok_or(Error::OrderNotFound { id: order_id })?;

    let events = get_tracking_for_order(db, order_id).await?;
    Ok(TrackingHistory { order, events })
}
