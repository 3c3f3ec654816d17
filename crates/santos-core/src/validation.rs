//! # Validation Module
//!
//! Checks for values the shopper types: account forms, search box,
//! quantity picker.
//!
//! ## Validation Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Validation Layers                                  │
//! │                                                                         │
//! │  Layer 1: Web front end                                                │
//! │  ├── "Email is required" style hints as the shopper types              │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 2: Storefront commands (Rust)                                   │
//! │  └── THIS MODULE: required fields, email shape, password strength      │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 3: Database (SQLite)                                            │
//! │  └── UNIQUE(email) on accounts                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Cart, wishlist and history mutations take trusted input from the
//! storefront itself and are not validated here.
//!
//! ## Usage
//! ```rust
//! use santos_core::validation::{password_strength, validate_email};
//!
//! validate_email("sophia@santos.studio").unwrap();
//!
//! let strength = password_strength("Amethyst#2024");
//! assert!(strength.is_valid);
//! ```

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::error::ValidationError;
use crate::{MAX_ITEM_QUANTITY, MAX_NAME_LEN, MAX_SEARCH_LEN, MIN_PASSWORD_LEN, PASSWORD_SPECIAL_CHARS};

/// Result type for validation operations.
pub type ValidationResult<T> = Result<T, ValidationError>;

// =============================================================================
// Account Fields
// =============================================================================

/// Validates a display name. Returns it trimmed.
pub fn validate_name(name: &str) -> ValidationResult<String> {
    let name = name.trim();

    if name.is_empty() {
        return Err(ValidationError::required("name"));
    }

    if name.chars().count() > MAX_NAME_LEN {
        return Err(ValidationError::TooLong {
            field: "name".to_string(),
            max: MAX_NAME_LEN,
        });
    }

    Ok(name.to_string())
}

/// Validates an email address and returns it trimmed and lower-cased.
///
/// ## Rules
/// - Required
/// - Exactly one `@`, with a non-empty local part
/// - Domain has a dot that is neither first nor last
/// - No whitespace
///
/// ```rust
/// use santos_core::validation::validate_email;
///
/// assert_eq!(validate_email(" Sophia@Santos.Studio ").unwrap(), "sophia@santos.studio");
/// assert!(validate_email("sophia@localhost").is_err());
/// ```
pub fn validate_email(email: &str) -> ValidationResult<String> {
    let email = email.trim();

    if email.is_empty() {
        return Err(ValidationError::required("email"));
    }

    let invalid = |reason: &str| ValidationError::InvalidFormat {
        field: "email".to_string(),
        reason: reason.to_string(),
    };

    if email.chars().any(char::is_whitespace) {
        return Err(invalid("must not contain spaces"));
    }

    let (local, domain) = email.split_once('@').ok_or_else(|| invalid("missing @"))?;
    if local.is_empty() || domain.contains('@') {
        return Err(invalid("must look like name@example.com"));
    }

    match domain.rfind('.') {
        Some(dot) if dot > 0 && dot < domain.len() - 1 => {}
        _ => return Err(invalid("domain must contain a dot")),
    }

    Ok(email.to_lowercase())
}

// =============================================================================
// Password Strength
// =============================================================================

/// Individual password requirements, as shown in the sign-up form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct PasswordRequirements {
    pub min_length: usize,
    pub has_min_length: bool,
    pub has_upper_case: bool,
    pub has_lower_case: bool,
    pub has_number: bool,
    pub has_special_char: bool,
}

/// Result of checking a password against the strength rules.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct PasswordStrength {
    pub is_valid: bool,
    pub requirements: PasswordRequirements,
}

impl PasswordStrength {
    /// Human-readable list of the requirements that are not met.
    pub fn missing(&self) -> Vec<String> {
        let r = &self.requirements;
        [
            (r.has_min_length, format!("at least {} characters", r.min_length)),
            (r.has_upper_case, "an upper-case letter".to_string()),
            (r.has_lower_case, "a lower-case letter".to_string()),
            (r.has_number, "a digit".to_string()),
            (r.has_special_char, "a special character".to_string()),
        ]
        .into_iter()
        .filter(|(met, _)| !met)
        .map(|(_, label)| label)
        .collect()
    }
}

/// Checks a password against the strength rules.
///
/// ## Rules
/// ```text
/// length >= 8
/// one of A-Z
/// one of a-z
/// one of 0-9
/// one of !@#$%^&*(),.?":{}|<>
/// ```
pub fn password_strength(password: &str) -> PasswordStrength {
    let requirements = PasswordRequirements {
        min_length: MIN_PASSWORD_LEN,
        has_min_length: password.chars().count() >= MIN_PASSWORD_LEN,
        has_upper_case: password.chars().any(|c| c.is_ascii_uppercase()),
        has_lower_case: password.chars().any(|c| c.is_ascii_lowercase()),
        has_number: password.chars().any(|c| c.is_ascii_digit()),
        has_special_char: password.chars().any(|c| PASSWORD_SPECIAL_CHARS.contains(c)),
    };

    PasswordStrength {
        is_valid: requirements.has_min_length
            && requirements.has_upper_case
            && requirements.has_lower_case
            && requirements.has_number
            && requirements.has_special_char,
        requirements,
    }
}

/// Validates a new password; the error lists every unmet requirement.
pub fn validate_new_password(password: &str) -> ValidationResult<()> {
    if password.is_empty() {
        return Err(ValidationError::required("password"));
    }

    let strength = password_strength(password);
    if strength.is_valid {
        Ok(())
    } else {
        Err(ValidationError::WeakPassword {
            missing: strength.missing(),
        })
    }
}

// =============================================================================
// Storefront Inputs
// =============================================================================

/// Validates a search query and returns it trimmed. Empty is allowed.
pub fn validate_search_query(query: &str) -> ValidationResult<String> {
    let query = query.trim();

    if query.chars().count() > MAX_SEARCH_LEN {
        return Err(ValidationError::TooLong {
            field: "query".to_string(),
            max: MAX_SEARCH_LEN,
        });
    }

    Ok(query.to_string())
}

/// A bag line holds between 1 and [`MAX_ITEM_QUANTITY`] items.
pub fn validate_quantity(quantity: u32) -> ValidationResult<()> {
    if quantity == 0 {
        return Err(ValidationError::MustBePositive {
            field: "quantity".to_string(),
        });
    }

    if quantity > MAX_ITEM_QUANTITY {
        return Err(ValidationError::TooLarge {
            field: "quantity".to_string(),
            max: MAX_ITEM_QUANTITY,
        });
    }

    Ok(())
}

// =============================================================================
// Unit Tests
// =============================================================================
