//! Password hashing and verification using Argon2id
//!
//! Argon2 is deliberately slow, so both operations run on tokio's blocking
//! pool instead of the async worker threads.

use argon2::{
    Argon2,
    password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString, rand_core::OsRng},
};
use tokio::task;

use crate::errors::{Error, Result};

fn hash_error(e: impl ToString) -> Error {
    Error::PasswordHash {
        message: e.to_string(),
    }
}

fn hash_blocking(password: &str) -> Result<String> {
    let salt = SaltString::generate(&mut OsRng);

    Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map(|hash| hash.to_string())
        .map_err(hash_error)
}

fn verify_blocking(password: &str, hash: &str) -> Result<bool> {
    let parsed = PasswordHash::new(hash).map_err(hash_error)?;

    match Argon2::default().verify_password(password.as_bytes(), &parsed) {
        Ok(()) => Ok(true),
        Err(argon2::password_hash::Error::Password) => Ok(false),
        Err(e) => Err(hash_error(e)),
    }
}

/// Hashes a password with Argon2id and a random salt, returning a PHC string.
///
/// # Errors
/// Returns [`Error::PasswordHash`] if hashing fails or the blocking task dies.
pub async fn hash_password(password: &str) -> Result<String> {
    let password = password.to_owned();
    task::spawn_blocking(move || hash_blocking(&password))
        .await
        .map_err(hash_error)?
}

/// Verifies a password against a stored PHC string.
///
/// Returns `Ok(false)` on mismatch and an error only when the stored hash is
/// malformed.
pub async fn verify_password(password: &str, hash: &str) -> Result<bool> {
    let (password, hash) = (password.to_owned(), hash.to_owned());
    task::spawn_blocking(move || verify_blocking(&password, &hash))
        .await
        .map_err(hash_error)?
}
