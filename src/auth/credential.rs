//! Password hashing
//!
//! Argon2 with default parameters (the interactive-login cost class) and a
//! per-password random salt. Hashing and verification are CPU-bound, so
//! both are moved off the async executor with `spawn_blocking`.

use argon2::{
    Argon2,
    password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString, rand_core::OsRng},
};

use crate::utils::{AppError, AppResult};

/// Hash a password into a PHC-format string
pub async fn hash_password(password: &str) -> AppResult<String> {
    let password = password.to_string();
    tokio::task::spawn_blocking(move || {
        let salt = SaltString::generate(&mut OsRng);
        Argon2::default()
            .hash_password(password.as_bytes(), &salt)
            .map(|hash| hash.to_string())
    })
    .await
    .map_err(|e| AppError::internal(format!("Hashing task failed: {e}")))?
    .map_err(|e| AppError::internal(format!("Failed to hash password: {e}")))
}

/// Verify a password against a stored hash
///
/// A mismatch is not an error; only a malformed stored hash is.
pub async fn verify_password(password: &str, hash: &str) -> AppResult<bool> {
    let password = password.to_string();
    let hash = hash.to_string();
    tokio::task::spawn_blocking(move || {
        let parsed = PasswordHash::new(&hash)
            .map_err(|e| AppError::internal(format!("Malformed password hash: {e}")))?;
        Ok(Argon2::default()
            .verify_password(password.as_bytes(), &parsed)
            .is_ok())
    })
    .await
    .map_err(|e| AppError::internal(format!("Verification task failed: {e}")))?
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn hash_and_verify() {
        let hash = hash_password("hunter42").await.unwrap();
        assert!(verify_password("hunter42", &hash).await.unwrap());
        assert!(!verify_password("hunter43", &hash).await.unwrap());
    }

    #[tokio::test]
    async fn hashes_are_salted() {
        let a = hash_password("hunter42").await.unwrap();
        let b = hash_password("hunter42").await.unwrap();
        assert_ne!(a, b);
    }
}
