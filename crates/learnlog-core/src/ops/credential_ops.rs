//! Registration and login

use std::time::Instant;

use learnlog_core_types::Sensitive;

use super::elapsed_ms;
use crate::auth::{hash_password, verify_password};
use crate::errors::{JournalError, Result};
use crate::model::User;
use crate::repo::UserRepository;
use crate::rules::validation;
use crate::{log_op_end, log_op_error, log_op_start};

/// Register a new user
///
/// The email is normalised (trimmed, lowercased) before the uniqueness check,
/// and the password is hashed before anything is persisted.
///
/// # Errors
///
/// * `Validation` - malformed email or password shorter than 8 characters
/// * `DuplicateUser` - the email is already registered
/// * `StorageUnavailable` - backend failure
pub fn register<R: UserRepository>(
    repo: &mut R,
    email: &str,
    password: Sensitive<&str>,
) -> Result<User> {
    register_user(repo, email, password, None)
}

/// Register with a confirmation password that must match
///
/// # Errors
///
/// As [`register`], plus `Validation` if the two passwords differ.
pub fn register_with_confirmation<R: UserRepository>(
    repo: &mut R,
    email: &str,
    password: Sensitive<&str>,
    confirmation: Sensitive<&str>,
) -> Result<User> {
    register_user(repo, email, password, Some(confirmation))
}

fn register_user<R: UserRepository>(
    repo: &mut R,
    email: &str,
    password: Sensitive<&str>,
    confirmation: Option<Sensitive<&str>>,
) -> Result<User> {
    log_op_start!("register", email = email);
    let start = Instant::now();

    let result = register_impl(repo, email, password, confirmation).map_err(|e| {
        log_op_error!("register", e.clone(), duration_ms = elapsed_ms(start), email = email);
        e
    })?;

    log_op_end!(
        "register",
        duration_ms = elapsed_ms(start),
        user_id = result.id.get()
    );
    Ok(result)
}

fn register_impl<R: UserRepository>(
    repo: &mut R,
    email: &str,
    password: Sensitive<&str>,
    confirmation: Option<Sensitive<&str>>,
) -> Result<User> {
    let email = validation::normalize_email(email)?;
    validation::validate_new_password(
        password.expose(),
        confirmation.as_ref().map(|c| *c.expose()),
    )?;

    let hash = hash_password(password)?;
    repo.insert_user(&email, &hash)
}

/// Check credentials and return the user for session establishment
///
/// # Errors
///
/// * `Validation` - email or password missing
/// * `UserNotFound` - no user has that email
/// * `InvalidCredentials` - the password does not match
/// * `StorageUnavailable` - backend failure
pub fn authenticate<R: UserRepository>(
    repo: &R,
    email: &str,
    password: Sensitive<&str>,
) -> Result<User> {
    log_op_start!("authenticate", email = email);
    let start = Instant::now();

    let result = authenticate_impl(repo, email, password).map_err(|e| {
        log_op_error!("authenticate", e.clone(), duration_ms = elapsed_ms(start), email = email);
        e
    })?;

    log_op_end!(
        "authenticate",
        duration_ms = elapsed_ms(start),
        user_id = result.id.get()
    );
    Ok(result)
}

fn authenticate_impl<R: UserRepository>(
    repo: &R,
    email: &str,
    password: Sensitive<&str>,
) -> Result<User> {
    validation::validate_login(email, password.expose())?;
    let email = email.trim().to_lowercase();

    let user = repo
        .find_user_by_email(&email)?
        .ok_or(JournalError::UserNotFound { email })?;

    if !verify_password(password, &user.password_hash)? {
        return Err(JournalError::InvalidCredentials);
    }
    Ok(user)
}
