//! bcrypt runs on the blocking pool so it never stalls an actix worker.

use crate::domain::ApiError;
use actix_web::web;

/// Lowest cost bcrypt accepts; keeps hashing fast in tests.
#[cfg(test)]
pub const TEST_COST: u32 = 4;

pub async fn hash_password(password: String, cost: u32) -> Result<String, ApiError> {
    web::block(move || bcrypt::hash(password, cost))
        .await
        .map_err(|e| ApiError::Unexpected(format!("password hashing was cancelled: {}", e)))?
        .map_err(|e| {
            tracing::error!("Password hashing failed: {}", e);
            ApiError::Unexpected(format!("password hashing failed: {}", e))
        })
}

/// `Ok(false)` on mismatch; `Err` only when the stored hash is unusable.
pub async fn verify_password(password: String, hash: String) -> Result<bool, ApiError> {
    web::block(move || bcrypt::verify(password, &hash))
        .await
        .map_err(|e| ApiError::Unexpected(format!("password check was cancelled: {}", e)))?
        .map_err(|e| {
            tracing::error!("Stored password hash is invalid: {}", e);
            ApiError::Unexpected(format!("invalid password hash: {}", e))
        })
}
