//! Password hashing with bcrypt.
//!
//! Hashes are salted and use a fixed work factor of [`HASH_COST`]. Hashing is
//! deliberately slow, so request handlers go through [`spawn_hash_password`]
//! and [`spawn_verify_password`], which run the work on tokio's blocking pool.

use bcrypt::{hash, verify};

use crate::errors::AppError;

/// bcrypt work factor.
pub const HASH_COST: u32 = 10;

pub fn hash_password(password: &str) -> Result<String, AppError> {
    hash(password, HASH_COST)
        .map_err(|e| AppError::internal_error(format!("Failed to hash password: {}", e)))
}

/// Checks `password` against a stored hash.
///
/// An empty stored hash never matches.
pub fn verify_password(password: &str, hash: &str) -> Result<bool, AppError> {
    if hash.is_empty() {
        return Ok(false);
    }

    verify(password, hash)
        .map_err(|e| AppError::internal_error(format!("Failed to verify password: {}", e)))
}

pub async fn spawn_hash_password(password: String) -> Result<String, AppError> {
    tokio::task::spawn_blocking(move || hash_password(&password))
        .await
        .map_err(|e| AppError::internal_error(format!("Task join error: {}", e)))?
}

pub async fn spawn_verify_password(password: String, hash: String) -> Result<bool, AppError> {
    tokio::task::spawn_blocking(move || verify_password(&password, &hash))
        .await
        .map_err(|e| AppError::internal_error(format!("Task join error: {}", e)))?
}
