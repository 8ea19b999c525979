//! Package entity - The price list customers order from.
//!
//! Each package has a label, a service type and a price per kilogram. Orders
//! copy the service type and price at (re)calculation time, so packages can be
//! removed without touching existing orders.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Turnaround tier of a package
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, EnumIter, DeriveActiveEnum, Serialize, Deserialize,
)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::N(16))")]
#[serde(rename_all = "UPPERCASE")]
pub enum ServiceType {
    /// Standard turnaround
    #[sea_orm(string_value = "REGULER")]
    Reguler,
    /// Fast turnaround
    #[sea_orm(string_value = "EXPRESS")]
    Express,
}

impl ServiceType {
    /// Per-kilogram rate used to repair packages stored with a zero price.
    #[must_use]
    pub const fn default_rate(self) -> f64 {
        match self {
            Self::Reguler => 7000.0,
            Self::Express => 12000.0,
        }
    }
}

/// Package database model
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "packages")]
#[serde(rename_all = "camelCase")]
pub struct Model {
    /// Unique identifier for the package
    #[sea_orm(primary_key)]
    pub id: i64,
    /// Name shown to customers (e.g., "Cuci Komplit (Reguler)")
    pub label: String,
    /// Service tier this package belongs to
    pub service_type: ServiceType,
    /// Price per kilogram, never negative
    pub price: f64,
    /// When the package was created
    pub created_at: DateTimeUtc,
}

/// `Package` has no relationships; orders keep a snapshot instead of a key
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
