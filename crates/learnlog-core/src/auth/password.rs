//! Argon2id password hashing
//!
//! [`hash_password`] salts with [`OsRng`] and returns a PHC string;
//! [`verify_password`] is the only way a stored hash is ever compared.

use argon2::{
    password_hash::{
        rand_core::OsRng, PasswordHash as PhcHash, PasswordHasher, PasswordVerifier, SaltString,
    },
    Argon2,
};
use learnlog_core_types::Sensitive;

use crate::errors::{JournalError, Result};
use crate::model::PasswordHash;

/// Hash a plaintext password with a fresh random salt
///
/// # Errors
///
/// Returns `Internal` if the hasher rejects its input.
pub fn hash_password(password: Sensitive<&str>) -> Result<PasswordHash> {
    let salt = SaltString::generate(&mut OsRng);
    let hash = Argon2::default()
        .hash_password(password.expose().as_bytes(), &salt)
        .map_err(|e| JournalError::Internal {
            message: format!("failed to hash password: {}", e),
        })?;
    Ok(PasswordHash::from_phc(hash.to_string()))
}

/// Check a plaintext password against a stored hash
///
/// Returns `Ok(false)` on mismatch.
///
/// # Errors
///
/// Returns `Internal` if the stored hash is not a valid PHC string.
pub fn verify_password(password: Sensitive<&str>, stored: &PasswordHash) -> Result<bool> {
    let parsed = PhcHash::new(stored.as_phc()).map_err(|e| JournalError::Internal {
        message: format!("stored password hash is malformed: {}", e),
    })?;
    Ok(Argon2::default()
        .verify_password(password.expose().as_bytes(), &parsed)
        .is_ok())
}
