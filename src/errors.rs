//! Unified error type for the service.
//!
//! Domain failures carry structured fields so callers and tests can match on
//! them; the user-facing `Display` text is what the HTTP layer renders in the
//! `{"message": ...}` body.

use thiserror::Error;

/// All errors produced by the core, auth, config and api layers.
#[derive(Debug, Error)]
pub enum Error {
    /// Missing or malformed input
    #[error("{message}")]
    Validation {
        /// Human-readable reason
        message: String,
    },

    /// A weight or price that is negative, zero where forbidden, or not finite
    #[error("Nilai tidak valid: {amount}")]
    InvalidAmount {
        /// The rejected value
        amount: f64,
    },

    /// No usable identity on the request
    #[error("Unauthorized")]
    Unauthorized,

    /// Login with a password that does not match the stored hash
    #[error("Password salah")]
    WrongPassword,

    /// Password change with a wrong current password
    #[error("Password lama salah")]
    WrongCurrentPassword,

    /// Authenticated, but not an admin
    #[error("Admin only")]
    AdminOnly,

    /// Authenticated, but not a customer account
    #[error("Hanya pelanggan yang dapat melakukan aksi ini")]
    CustomerOnly,

    /// The caller neither owns the order nor is an admin
    #[error("Tidak punya akses ke order ini")]
    NotOrderOwner {
        /// Order being accessed
        id: i64,
    },

    /// The order has left the CREATED state
    #[error("Order sudah diproses, tidak bisa diubah")]
    OrderAlreadyProcessed {
        /// Order being edited
        id: i64,
    },

    /// Paid orders cannot be edited by customers
    #[error("Order sudah dibayar, tidak bisa diubah")]
    OrderPaidLocked {
        /// Order being edited
        id: i64,
    },

    /// Paid orders cannot be deleted by anyone
    #[error("Order sudah dibayar, tidak bisa dihapus. Silakan hubungi CS.")]
    OrderPaidUndeletable {
        /// Order being deleted
        id: i64,
    },

    #[error("Order tidak ditemukan")]
    OrderNotFound {
        /// Requested order id
        id: i64,
    },

    /// The referenced package does not exist (order create/edit)
    #[error("Paket tidak valid")]
    InvalidPackage {
        /// Requested package id
        id: i64,
    },

    #[error("Paket tidak ditemukan")]
    PackageNotFound {
        /// Requested package id
        id: i64,
    },

    #[error("User tidak ditemukan")]
    UserNotFound,

    #[error("Email tidak terdaftar")]
    EmailNotRegistered,

    #[error("Admin tidak ditemukan")]
    AdminNotFound,

    #[error("Email sudah terdaftar")]
    EmailTaken {
        /// The conflicting address
        email: String,
    },

    /// The customer already has an unpaid order for this service type
    #[error("Anda memiliki order belum dibayar dengan layanan ini")]
    DuplicateUnpaidOrder {
        /// Id of the existing unpaid order
        existing_id: i64,
    },

    #[error("Token tidak valid atau kadaluarsa")]
    InvalidResetToken,

    #[error("Configuration error: {message}")]
    Config {
        /// What went wrong while loading configuration
        message: String,
    },

    #[error("Password hashing error: {message}")]
    PasswordHash {
        /// Underlying argon2 error text
        message: String,
    },

    #[error("Database error: {0}")]
    Database(#[from] sea_orm::DbErr),

    #[error("Token error: {0}")]
    Token(#[from] jsonwebtoken::errors::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Environment variable error: {0}")]
    EnvVar(#[from] std::env::VarError),
}

impl Error {
    /// Shorthand for a [`Error::Validation`] with the given message.
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation {
            message: message.into(),
        }
    }

    /// Whether this error comes from infrastructure rather than the request.
    #[must_use]
    pub const fn is_internal(&self) -> bool {
        matches!(
            self,
            Self::Config { .. }
                | Self::PasswordHash { .. }
                | Self::Database(_)
                | Self::Token(_)
                | Self::Io(_)
                | Self::EnvVar(_)
        )
    }
}

// Convenience `Result` type
pub type Result<T> = std::result::Result<T, Error>;
