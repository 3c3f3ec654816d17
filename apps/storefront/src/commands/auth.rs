//! # Account Commands
//!
//! Sign-up, sign-in and the session user.
//!
//! ## Sign-In Flow
//! ```text
//! sign_in(email, password)
//!      │
//!      ├── normalize email (trim + lower-case)
//!      ├── accounts.find_by_email ── none ──┐
//!      ├── argon2 verify ─────────── fail ──┼──► AUTH_ERROR "Invalid email or password"
//!      ▼                                    │
//! session.sign_in(user) ◄── ok              │
//! ```
//!
//! Unknown email and wrong password produce the same error.

use argon2::password_hash::rand_core::OsRng;
use argon2::password_hash::SaltString;
use argon2::{Argon2, PasswordHash, PasswordHasher, PasswordVerifier};
use tracing::{debug, info};

use santos_core::validation::{password_strength, validate_email, validate_name, validate_new_password, PasswordStrength};
use santos_core::{User, ValidationError};

use crate::error::{ApiError, ApiResult};
use crate::state::{DbState, SessionState};

const INVALID_CREDENTIALS: &str = "Invalid email or password";

/// Hashes a password for storage with a fresh random salt.
pub fn hash_password(password: &str) -> ApiResult<String> {
    let salt = SaltString::generate(&mut OsRng);

    let hash = Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map_err(|e| ApiError::internal(format!("Failed to hash password: {}", e)))?;

    Ok(hash.to_string())
}

/// Checks a password against a stored hash. A malformed hash never matches.
pub fn verify_password(password: &str, hash: &str) -> bool {
    let parsed_hash = match PasswordHash::new(hash) {
        Ok(h) => h,
        Err(_) => return false,
    };

    Argon2::default()
        .verify_password(password.as_bytes(), &parsed_hash)
        .is_ok()
}

/// Live strength meter for the sign-up form.
pub fn check_password(password: &str) -> PasswordStrength {
    password_strength(password)
}

/// Creates an account and signs it in.
///
/// ## Errors
/// * `VALIDATION_ERROR` - missing name/email/password, malformed email,
///   weak password, or email already registered
pub async fn register(
    db: &DbState,
    session: &SessionState,
    name: &str,
    email: &str,
    password: &str,
) -> ApiResult<User> {
    debug!("register command");

    let name = validate_name(name)?;
    let email = validate_email(email)?;
    validate_new_password(password)?;

    let password_hash = hash_password(password)?;
    let account = db.get().accounts().insert(&name, &email, &password_hash).await?;

    let user = account.to_user();
    session.sign_in(user.clone());
    info!(user_id = %user.id, "Account registered");
    Ok(user)
}

pub async fn sign_in(db: &DbState, session: &SessionState, email: &str, password: &str) -> ApiResult<User> {
    debug!("sign_in command");

    let email = validate_email(email)?;
    if password.is_empty() {
        return Err(ValidationError::required("password").into());
    }

    let account = db
        .get()
        .accounts()
        .find_by_email(&email)
        .await?
        .filter(|account| verify_password(password, &account.password_hash))
        .ok_or_else(|| ApiError::auth(INVALID_CREDENTIALS))?;

    let user = account.to_user();
    session.sign_in(user.clone());
    info!(user_id = %user.id, "Signed in");
    Ok(user)
}

pub fn sign_out(session: &SessionState) {
    debug!("sign_out command");
    if let Some(user) = session.sign_out() {
        info!(user_id = %user.id, "Signed out");
    }
}

pub fn current_user(session: &SessionState) -> Option<User> {
    session.current()
}
