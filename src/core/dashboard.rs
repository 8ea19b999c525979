//! Dashboard aggregates.
//!
//! Everything here is recomputed from the orders table on each call; nothing
//! is cached or stored.

use crate::{
    entities::{Order, OrderStatus, ServiceType, order},
    errors::Result,
};
use sea_orm::{PaginatorTrait, QueryOrder, QuerySelect, prelude::*};
use serde::Serialize;

/// How many non-completed orders the dashboard lists
pub const ACTIVE_ORDER_LIMIT: u64 = 10;

/// A row of the dashboard's active order list
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ActiveOrder {
    pub id: i64,
    pub name: String,
    pub service_type: ServiceType,
    pub total_price: f64,
    pub status: OrderStatus,
    pub created_at: DateTimeUtc,
}

impl From<order::Model> for ActiveOrder {
    fn from(order: order::Model) -> Self {
        Self {
            id: order.id,
            name: order.name,
            service_type: order.service_type,
            total_price: order.total_price,
            status: order.status,
            created_at: order.created_at,
        }
    }
}

/// Counts and revenue shown on the admin dashboard.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardSummary {
    /// Every order ever placed
    pub total_orders: u64,
    /// Orders between CONFIRMED and IRONING
    pub processing_orders: u64,
    /// Orders waiting for delivery
    pub ready_orders: u64,
    /// Sum of `total_price` over paid orders
    pub total_revenue: f64,
    /// Most recent orders that are not completed yet
    pub active_orders: Vec<ActiveOrder>,
}

/// Builds the dashboard summary.
///
/// # Errors
/// Returns an error if a database query fails.
pub async fn generate_dashboard(db: &DatabaseConnection) -> Result<DashboardSummary> {
    let total_orders = Order::find().count(db).await?;

    let processing_orders = Order::find()
        .filter(order::Column::Status.is_in(OrderStatus::IN_PROCESS))
        .count(db)
        .await?;

    let ready_orders = Order::find()
        .filter(order::Column::Status.eq(OrderStatus::Ready))
        .count(db)
        .await?;

    // SUM over no rows is NULL
    let total_revenue = Order::find()
        .select_only()
        .column_as(order::Column::TotalPrice.sum(), "total_revenue")
        .filter(order::Column::IsPaid.eq(true))
        .into_tuple::<Option<f64>>()
        .one(db)
        .await?
        .flatten()
        .unwrap_or(0.0);

    let active_orders = Order::find()
        .filter(order::Column::Status.ne(OrderStatus::Completed))
        .order_by_desc(order::Column::CreatedAt)
        .order_by_desc(order::Column::Id)
        .limit(ACTIVE_ORDER_LIMIT)
        .all(db)
        .await?
        .into_iter()
        .map(ActiveOrder::from)
        .collect();

    Ok(DashboardSummary {
        total_orders,
        processing_orders,
        ready_orders,
        total_revenue,
        active_orders,
    })
}
