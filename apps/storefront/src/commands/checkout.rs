//! # Checkout Commands
//!
//! The three-step checkout page.
//!
//! ## Order Placement
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  "Continue" on Review (checkout_advance) or "Place order" (place_order)│
//! │                    │                                                    │
//! │                    ▼                                                    │
//! │  1. Precheck: on Review step? bag not empty?  ──► CHECKOUT_ERROR       │
//! │  2. Simulated processing: sleep(checkout_delay), no locks held         │
//! │  3. Lock storefront + checkout, place order (checks again)             │
//! │  4. Cart cleared, step back to Shipping, confirmation returned         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use santos_core::{Advance, CartLine, CartSummary, CheckoutStep, CoreError, OrderConfirmation};

use crate::error::ApiResult;
use crate::state::{CheckoutState, ConfigState, StorefrontState};

/// Checkout page contents.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CheckoutResponse {
    pub step: CheckoutStep,
    pub steps: Vec<CheckoutStep>,
    pub lines: Vec<CartLine>,
    pub summary: CartSummary,
}

/// Result of pressing "Continue".
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "camelCase")]
pub enum CheckoutProgress {
    /// Moved to another form step.
    InProgress(CheckoutResponse),
    /// The order went through.
    Confirmed(OrderConfirmation),
}

fn snapshot(storefront: &StorefrontState, checkout: &CheckoutState) -> CheckoutResponse {
    let step = checkout.with_checkout(|c| c.step());
    storefront.with_storefront(|s| CheckoutResponse {
        step,
        steps: CheckoutStep::ALL.to_vec(),
        lines: s.cart().lines().to_vec(),
        summary: s.cart().summary(),
    })
}

pub fn checkout_summary(storefront: &StorefrontState, checkout: &CheckoutState) -> CheckoutResponse {
    debug!("checkout_summary command");
    snapshot(storefront, checkout)
}

/// Moves to the next step. On the review step this places the order.
pub async fn checkout_advance(
    config: &ConfigState,
    storefront: &StorefrontState,
    checkout: &CheckoutState,
) -> ApiResult<CheckoutProgress> {
    debug!("checkout_advance command");

    match checkout.with_checkout_mut(|c| c.advance()) {
        Advance::Moved(step) => {
            debug!(step = %step, "Checkout step changed");
            Ok(CheckoutProgress::InProgress(snapshot(storefront, checkout)))
        }
        Advance::ReadyToPlace => {
            let confirmation = place_order(config, storefront, checkout).await?;
            Ok(CheckoutProgress::Confirmed(confirmation))
        }
    }
}

/// Goes back one step; stays on the first step.
pub fn checkout_back(storefront: &StorefrontState, checkout: &CheckoutState) -> CheckoutResponse {
    debug!("checkout_back command");
    checkout.with_checkout_mut(|c| c.back());
    snapshot(storefront, checkout)
}

/// Places the order after the configured processing delay.
///
/// ## Errors
/// * `CHECKOUT_ERROR` - not on the review step, or the bag is empty
pub async fn place_order(
    config: &ConfigState,
    storefront: &StorefrontState,
    checkout: &CheckoutState,
) -> ApiResult<OrderConfirmation> {
    debug!("place_order command");

    let step = checkout.with_checkout(|c| c.step());
    if step != CheckoutStep::Review {
        return Err(CoreError::CheckoutIncomplete {
            step: step.to_string(),
        }
        .into());
    }
    if storefront.with_storefront(|s| s.cart().is_empty()) {
        return Err(CoreError::EmptyCart.into());
    }

    let delay = config.checkout_delay();
    if !delay.is_zero() {
        info!(delay_ms = config.checkout_delay_ms, "Processing order");
        tokio::time::sleep(delay).await;
    }

    let confirmation = storefront
        .with_storefront_mut(|s| checkout.with_checkout_mut(|c| s.place_order(c)))?;
    Ok(confirmation)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::cart::{add_to_cart, get_cart};
    use crate::commands::fixtures;
    use crate::error::ErrorCode;
    use santos_core::Money;
    use std::time::Duration;

    #[tokio::test]
    async fn test_steps_then_confirm() {
        let app = fixtures::app().await;
        add_to_cart(&app.db, &app.storefront, "3", Some(1), None, None)
            .await
            .unwrap();

        let summary = checkout_summary(&app.storefront, &app.checkout);
        assert_eq!(summary.step, CheckoutStep::Shipping);
        assert_eq!(summary.summary.total, Money::from_major(345));

        for expected in [CheckoutStep::Payment, CheckoutStep::Review] {
            match checkout_advance(&app.config, &app.storefront, &app.checkout).await.unwrap() {
                CheckoutProgress::InProgress(page) => assert_eq!(page.step, expected),
                other => panic!("expected a step change, got {:?}", other),
            }
        }

        let confirmed = checkout_advance(&app.config, &app.storefront, &app.checkout)
            .await
            .unwrap();
        let CheckoutProgress::Confirmed(order) = confirmed else {
            panic!("expected confirmation");
        };
        assert_eq!(order.lines.len(), 1);
        assert_eq!(order.summary.shipping, Money::from_major(25));

        assert_eq!(get_cart(&app.storefront).count, 0);
        assert_eq!(
            checkout_summary(&app.storefront, &app.checkout).step,
            CheckoutStep::Shipping
        );
    }

    #[tokio::test]
    async fn test_empty_bag_cannot_be_placed() {
        let app = fixtures::app().await;
        checkout_advance(&app.config, &app.storefront, &app.checkout).await.unwrap();
        checkout_advance(&app.config, &app.storefront, &app.checkout).await.unwrap();

        let err = place_order(&app.config, &app.storefront, &app.checkout)
            .await
            .unwrap_err();
        assert_eq!(err.code, ErrorCode::CheckoutError);
        assert_eq!(err.message, "Your bag is empty");
    }

    #[tokio::test]
    async fn test_must_reach_review() {
        let app = fixtures::app().await;
        add_to_cart(&app.db, &app.storefront, "1", None, None, None)
            .await
            .unwrap();

        let err = place_order(&app.config, &app.storefront, &app.checkout)
            .await
            .unwrap_err();
        assert_eq!(err.code, ErrorCode::CheckoutError);
        assert_eq!(get_cart(&app.storefront).count, 1);
    }

    #[tokio::test]
    async fn test_back() {
        let app = fixtures::app().await;
        checkout_advance(&app.config, &app.storefront, &app.checkout).await.unwrap();

        assert_eq!(checkout_back(&app.storefront, &app.checkout).step, CheckoutStep::Shipping);
        assert_eq!(checkout_back(&app.storefront, &app.checkout).step, CheckoutStep::Shipping);
    }

    #[tokio::test]
    async fn test_order_waits_for_processing_delay() {
        let mut app = fixtures::app().await;
        app.config.checkout_delay_ms = 50;
        add_to_cart(&app.db, &app.storefront, "6", None, None, None)
            .await
            .unwrap();
        checkout_advance(&app.config, &app.storefront, &app.checkout).await.unwrap();
        checkout_advance(&app.config, &app.storefront, &app.checkout).await.unwrap();

        let started = std::time::Instant::now();
        place_order(&app.config, &app.storefront, &app.checkout).await.unwrap();
        assert!(started.elapsed() >= Duration::from_millis(50));
    }
}
