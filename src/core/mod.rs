//! Core business logic - framework-agnostic operations over the database.
//!
//! Every function takes a SeaORM connection and returns the crate `Result`;
//! the HTTP layer only parses requests and renders what these return.

/// Admin accounts: login, password change, seeding
pub mod admin;
/// Read-only aggregates for the admin dashboard
pub mod dashboard;
/// Order lifecycle: create, edit, delete, status and payment updates
pub mod order;
/// Package catalog: price list management and seeding
pub mod package;
/// Append-only tracking history
pub mod tracking;
/// Customer accounts: registration, login, profile, password reset
pub mod user;
