//! # Checkout
//!
//! The three-step checkout form and order placement.
//!
//! ## Flow
//! ```text
//! ┌──────────┐  advance  ┌──────────┐  advance  ┌──────────┐  place_order  ┌───────────┐
//! │ Shipping │ ────────► │ Payment  │ ────────► │  Review  │ ────────────► │ Confirmed │
//! └──────────┘ ◄──────── └──────────┘ ◄──────── └──────────┘               └───────────┘
//!                back                   back          │
//!                                                     └─ cart.clear()
//! ```
//!
//! Order placement is local: the confirmation is built from the cart
//! snapshot and the cart is emptied. There is no payment capture.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use ts_rs::TS;
use uuid::Uuid;

use crate::cart::{Cart, CartLine, CartSummary};
use crate::error::{CoreError, CoreResult};

// =============================================================================
// Steps
// =============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Default, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub enum CheckoutStep {
    #[default]
    Shipping,
    Payment,
    Review,
}

impl CheckoutStep {
    /// All steps in order, for the progress indicator.
    pub const ALL: [CheckoutStep; 3] = [
        CheckoutStep::Shipping,
        CheckoutStep::Payment,
        CheckoutStep::Review,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            CheckoutStep::Shipping => "Shipping",
            CheckoutStep::Payment => "Payment",
            CheckoutStep::Review => "Review",
        }
    }

    fn next(self) -> Option<Self> {
        match self {
            CheckoutStep::Shipping => Some(CheckoutStep::Payment),
            CheckoutStep::Payment => Some(CheckoutStep::Review),
            CheckoutStep::Review => None,
        }
    }

    fn previous(self) -> Option<Self> {
        match self {
            CheckoutStep::Shipping => None,
            CheckoutStep::Payment => Some(CheckoutStep::Shipping),
            CheckoutStep::Review => Some(CheckoutStep::Payment),
        }
    }
}

impl fmt::Display for CheckoutStep {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// What the "Continue" button did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Advance {
    /// Moved to this step.
    Moved(CheckoutStep),
    /// Already on review; the next action is placing the order.
    ReadyToPlace,
}

// =============================================================================
// Checkout
// =============================================================================

/// Position in the checkout form.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Checkout {
    step: CheckoutStep,
}

impl Checkout {
    pub fn new() -> Self {
        Checkout::default()
    }

    pub fn step(&self) -> CheckoutStep {
        self.step
    }

    pub fn advance(&mut self) -> Advance {
        match self.step.next() {
            Some(next) => {
                self.step = next;
                Advance::Moved(next)
            }
            None => Advance::ReadyToPlace,
        }
    }

    /// Goes back one step; stays put on the first step.
    pub fn back(&mut self) -> CheckoutStep {
        if let Some(previous) = self.step.previous() {
            self.step = previous;
        }
        self.step
    }

    /// Places the order from the review step and empties the cart.
    ///
    /// ## Errors
    /// - `CheckoutIncomplete` if the form is not on the review step
    /// - `EmptyCart` if there is nothing to buy
    ///
    /// The cart is untouched when an error is returned.
    pub fn place_order(&mut self, cart: &mut Cart, placed_at: DateTime<Utc>) -> CoreResult<OrderConfirmation> {
        if self.step != CheckoutStep::Review {
            return Err(CoreError::CheckoutIncomplete {
                step: self.step.to_string(),
            });
        }
        if cart.is_empty() {
            return Err(CoreError::EmptyCart);
        }

        let confirmation = OrderConfirmation {
            order_id: Uuid::new_v4().to_string(),
            lines: cart.lines().to_vec(),
            summary: cart.summary(),
            placed_at,
        };

        cart.clear();
        self.step = CheckoutStep::Shipping;
        Ok(confirmation)
    }
}

/// What the "Order Confirmed" screen shows.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct OrderConfirmation {
    pub order_id: String,
    pub lines: Vec<CartLine>,
    pub summary: CartSummary,
    #[ts(as = "String")]
    pub placed_at: DateTime<Utc>,
}

// =============================================================================
// Unit Tests
// =============================================================================
