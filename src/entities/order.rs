//! Order entity - A customer's laundry request.
//!
//! Holds a snapshot of the service type and the computed total price, the
//! payment flag, and the current lifecycle status.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

use super::package::ServiceType;

/// Lifecycle status of an order
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, EnumIter, DeriveActiveEnum, Serialize, Deserialize,
)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::N(16))")]
#[serde(rename_all = "UPPERCASE")]
pub enum OrderStatus {
    #[sea_orm(string_value = "CREATED")]
    Created,
    #[sea_orm(string_value = "CONFIRMED")]
    Confirmed,
    #[sea_orm(string_value = "PICKUP")]
    Pickup,
    #[sea_orm(string_value = "WASHING")]
    Washing,
    #[sea_orm(string_value = "DRYING")]
    Drying,
    #[sea_orm(string_value = "IRONING")]
    Ironing,
    #[sea_orm(string_value = "READY")]
    Ready,
    #[sea_orm(string_value = "COMPLETED")]
    Completed,
}

impl OrderStatus {
    /// Statuses counted as "being processed" on the dashboard.
    pub const IN_PROCESS: [Self; 5] = [
        Self::Confirmed,
        Self::Pickup,
        Self::Washing,
        Self::Drying,
        Self::Ironing,
    ];
}

/// Order database model
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "orders")]
#[serde(rename_all = "camelCase")]
pub struct Model {
    /// Unique identifier, also the customer's tracking number
    #[sea_orm(primary_key)]
    pub id: i64,
    /// Contact name for pickup/delivery
    pub name: String,
    /// Contact phone number
    pub phone: String,
    /// Pickup/delivery address, may be empty
    pub address: String,
    /// Service type copied from the package
    pub service_type: ServiceType,
    /// Weight in kilograms
    pub weight: f64,
    /// `weight * price` at the last recalculation
    pub total_price: f64,
    /// Whether the order has been paid
    pub is_paid: bool,
    /// Current lifecycle status
    pub status: OrderStatus,
    /// Owning customer
    pub user_id: i64,
    /// When the order was placed
    pub created_at: DateTimeUtc,
}

/// Defines relationships between Order and other entities
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    /// Each order belongs to one customer
    #[sea_orm(
        belongs_to = "super::user::Entity",
        from = "Column::UserId",
        to = "super::user::Column::Id"
    )]
    User,
}

impl Related<super::user::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::User.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
