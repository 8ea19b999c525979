//! Tracking entity - Append-only status events for an order.
//! Rows are only ever inserted; the newest row reflects the latest change.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

use super::order::OrderStatus;

/// Tracking database model
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "trackings")]
#[serde(rename_all = "camelCase")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    /// Order this event belongs to
    pub order_id: i64,
    /// Status recorded by the event
    pub status: OrderStatus,
    /// When the event was recorded
    pub timestamp: DateTimeUtc,
}

/// Tracking rows carry `order_id` as a plain column with no foreign key, so
/// history outlives the order it describes.
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
