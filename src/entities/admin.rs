//! Admin entity - Back-office accounts, separate from customers.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Admin database model
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "admins")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    /// Login name, unique across admins
    #[sea_orm(unique)]
    pub username: String,
    /// Argon2id PHC string
    #[serde(skip_serializing, default)]
    pub password_hash: String,
}

/// `Admin` has no relationships with other entities
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
