//! Salted Argon2id password hashing.
//!
//! Hashes are stored as PHC strings (`$argon2id$v=19$...`) so the salt and
//! parameters travel with the hash. Both operations are CPU bound and run on
//! the blocking pool.

use argon2::password_hash::rand_core::OsRng;
use argon2::password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString};
use argon2::Argon2;
use tracing::warn;

use crate::error::AppError;
use crate::errors::ErrorCode;

fn hash_blocking(plain: &str) -> Result<String, AppError> {
    let salt = SaltString::generate(&mut OsRng);
    Argon2::default()
        .hash_password(plain.as_bytes(), &salt)
        .map(|hash| hash.to_string())
        .map_err(|e| AppError::internal(format!("password hashing failed: {e}")))
}

fn verify_blocking(plain: &str, stored: &str) -> Result<bool, AppError> {
    let parsed = PasswordHash::new(stored).map_err(|e| {
        warn!(error = %e, "stored password hash is not a PHC string");
        AppError::Internal {
            code: ErrorCode::DataCorruption,
            detail: "Stored credentials are unreadable".to_string(),
        }
    })?;
    match Argon2::default().verify_password(plain.as_bytes(), &parsed) {
        Ok(()) => Ok(true),
        Err(argon2::password_hash::Error::Password) => Ok(false),
        Err(e) => Err(AppError::internal(format!(
            "password verification failed: {e}"
        ))),
    }
}

/// Hash `plain` with a fresh random salt.
pub async fn hash_password(plain: &str) -> Result<String, AppError> {
    let plain = plain.to_owned();
    tokio::task::spawn_blocking(move || hash_blocking(&plain))
        .await
        .map_err(|e| AppError::internal(format!("password hashing task failed: {e}")))?
}

/// `Ok(false)` on mismatch; errors only when `stored` cannot be parsed.
pub async fn verify_password(plain: &str, stored: &str) -> Result<bool, AppError> {
    let plain = plain.to_owned();
    let stored = stored.to_owned();
    tokio::task::spawn_blocking(move || verify_blocking(&plain, &stored))
        .await
        .map_err(|e| AppError::internal(format!("password verification task failed: {e}")))?
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_hash_then_verify() {
        let hash = hash_password("s3cret").await.unwrap();
        assert!(hash.starts_with("$argon2"));
        assert_ne!(hash, "s3cret");
        assert!(verify_password("s3cret", &hash).await.unwrap());
        assert!(!verify_password("S3cret", &hash).await.unwrap());
    }

    #[tokio::test]
    async fn test_same_password_gets_different_salts() {
        let a = hash_password("repeat").await.unwrap();
        let b = hash_password("repeat").await.unwrap();
        assert_ne!(a, b);
    }

    #[tokio::test]
    async fn test_empty_password_is_hashable() {
        let hash = hash_password("").await.unwrap();
        assert!(verify_password("", &hash).await.unwrap());
        assert!(!verify_password(" ", &hash).await.unwrap());
    }

    #[tokio::test]
    async fn test_plaintext_in_store_is_data_corruption() {
        let err = verify_password("pw", "pw").await.unwrap_err();
        assert_eq!(err.code(), ErrorCode::DataCorruption);
    }
}
