//! Entity module - Contains all SeaORM entity definitions for the database.
//! These entities represent the database tables and their relationships.
//! Each entity has a Model struct for data and an Entity struct for operations.

pub mod admin;
pub mod order;
pub mod package;
pub mod tracking;
pub mod user;

// Re-export specific types to avoid conflicts
pub use admin::{Column as AdminColumn, Entity as Admin, Model as AdminModel};
pub use order::{Column as OrderColumn, Entity as Order, Model as OrderModel, OrderStatus};
pub use package::{Column as PackageColumn, Entity as Package, Model as PackageModel, ServiceType};
pub use tracking::{Column as TrackingColumn, Entity as Tracking, Model as TrackingModel};
pub use user::{Column as UserColumn, Entity as User, Model as UserModel};
