//! Credentials and identity.
//!
//! Passwords are stored as argon2id hashes; sessions are stateless HS256
//! tokens whose payload carries the caller's id and role. The role is trusted
//! for the lifetime of the token.

pub mod jwt;
pub mod password;

use serde::{Deserialize, Serialize};

pub use jwt::{Claims, TokenKeys};

/// Which account table an identity refers to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    /// A customer (`users` table)
    User,
    /// A back-office account (`admins` table)
    Admin,
}

/// The authenticated caller of a request
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Identity {
    /// Primary key in the table selected by `role`
    pub id: i64,
    pub role: Role,
}

impl Identity {
    /// Identity of a customer.
    #[must_use]
    pub const fn user(id: i64) -> Self {
        Self {
            id,
            role: Role::User,
        }
    }

    /// Identity of an admin.
    #[must_use]
    pub const fn admin(id: i64) -> Self {
        Self {
            id,
            role: Role::Admin,
        }
    }

    #[must_use]
    pub fn is_admin(&self) -> bool {
        self.role == Role::Admin
    }
}

impl From<&Claims> for Identity {
    fn from(claims: &Claims) -> Self {
        Self {
            id: claims.id,
            role: claims.role,
        }
    }
}
