//! # Checkout State
//!
//! Which step of the checkout form the shopper is on. Kept apart from the
//! storefront so moving between steps never contends with cart updates.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use santos_core::Checkout;

#[derive(Debug, Clone, Default)]
pub struct CheckoutState {
    checkout: Arc<Mutex<Checkout>>,
}

impl CheckoutState {
    pub fn new() -> Self {
        CheckoutState::default()
    }

    /// Executes a function with read access to the checkout.
    pub fn with_checkout<F, R>(&self, f: F) -> R
    where
        F: FnOnce(&Checkout) -> R,
    {
        f(&self.lock())
    }

    /// Executes a function with write access to the checkout.
    pub fn with_checkout_mut<F, R>(&self, f: F) -> R
    where
        F: FnOnce(&mut Checkout) -> R,
    {
        f(&mut self.lock())
    }

    fn lock(&self) -> MutexGuard<'_, Checkout> {
        self.checkout.lock().unwrap_or_else(PoisonError::into_inner)
    }
}
