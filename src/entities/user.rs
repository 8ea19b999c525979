//! User entity - A registered customer.
//!
//! Customers own orders. The password hash and any pending reset token are
//! never serialized.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Customer database model
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "users")]
#[serde(rename_all = "camelCase")]
pub struct Model {
    /// Unique identifier for the customer
    #[sea_orm(primary_key)]
    pub id: i64,
    /// Display name
    pub name: String,
    /// Login email, unique across customers
    #[sea_orm(unique)]
    pub email: String,
    /// Argon2id PHC string
    #[serde(skip_serializing, default)]
    pub password_hash: String,
    /// Pending password reset token, if one was requested
    #[serde(skip_serializing, default)]
    pub reset_token: Option<String>,
    /// When the pending reset token stops being accepted
    #[serde(skip_serializing, default)]
    pub reset_token_expires_at: Option<DateTimeUtc>,
    /// When the account was registered
    pub created_at: DateTimeUtc,
}

/// Defines relationships between User and other entities
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    /// One customer has many orders
    #[sea_orm(has_many = "super::order::Entity")]
    Orders,
}

impl Related<super::order::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Orders.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
