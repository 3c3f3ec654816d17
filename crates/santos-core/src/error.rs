//! # Error Types
//!
//! ```text
//! ValidationError   shopper input (forms, search box, quantity picker)
//! CoreError         an order that cannot be placed
//! ```
//!
//! Cart, wishlist and history mutations never fail, so nothing in those
//! modules returns these. Storage errors live in santos-db; the storefront
//! maps all of them to its `ApiError`.

use thiserror::Error;

/// Why an order could not be placed.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CoreError {
    /// ```text
    /// Review ─► Place order ─► cart.is_empty()? ─► "Your bag is empty"
    /// ```
    #[error("Your bag is empty")]
    EmptyCart,

    #[error("Checkout is at the {step} step; review the order before placing it")]
    CheckoutIncomplete { step: String },
}

/// A value the shopper typed was rejected. Messages are shown verbatim.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("{field} is required")]
    Required { field: String },

    #[error("{field} must be at most {max} characters")]
    TooLong { field: String, max: usize },

    #[error("{field} must be positive")]
    MustBePositive { field: String },

    #[error("{field} must be at most {max}")]
    TooLarge { field: String, max: u32 },

    /// Malformed email address.
    #[error("{field} has invalid format: {reason}")]
    InvalidFormat { field: String, reason: String },

    /// Lists every unmet strength requirement, in sign-up form order.
    #[error("Password is too weak: {}", .missing.join(", "))]
    WeakPassword { missing: Vec<String> },
}

impl ValidationError {
    pub fn required(field: impl Into<String>) -> Self {
        ValidationError::Required {
            field: field.into(),
        }
    }
}

pub type CoreResult<T> = Result<T, CoreError>;
