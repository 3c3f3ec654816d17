//! # Cart Commands
//!
//! The bag drawer.
//!
//! ## Cart Lifecycle
//! ```text
//! ┌──────────┐  add_to_cart  ┌──────────┐  place_order  ┌──────────┐
//! │  Empty   │──────────────►│  In Bag  │──────────────►│  Empty   │
//! │  Bag     │               │          │ (checkout.rs) │  Bag     │
//! └──────────┘               └──────────┘               └──────────┘
//!                                 │ clear_cart               ▲
//!                                 └──────────────────────────┘
//! ```

use serde::{Deserialize, Serialize};
use tracing::debug;

use santos_core::validation::validate_quantity;
use santos_core::{Cart, CartLine, CartSummary};

use super::require_product;
use crate::error::ApiResult;
use crate::state::{DbState, StorefrontState};

/// Cart response including lines and totals.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CartResponse {
    pub lines: Vec<CartLine>,
    /// Badge count on the bag icon.
    pub count: u32,
    pub summary: CartSummary,
}

impl From<&Cart> for CartResponse {
    fn from(cart: &Cart) -> Self {
        CartResponse {
            lines: cart.lines().to_vec(),
            count: cart.count(),
            summary: cart.summary(),
        }
    }
}

pub fn get_cart(storefront: &StorefrontState) -> CartResponse {
    debug!("get_cart command");
    storefront.with_storefront(|s| CartResponse::from(s.cart()))
}

/// Adds a product to the bag.
///
/// ## Arguments
/// * `quantity` - defaults to 1; zero is rejected, as is anything that
///   takes the line above `MAX_ITEM_QUANTITY`
/// * `size`, `color` - omitted or empty picks the product's first option
pub async fn add_to_cart(
    db: &DbState,
    storefront: &StorefrontState,
    product_id: &str,
    quantity: Option<u32>,
    size: Option<&str>,
    color: Option<&str>,
) -> ApiResult<CartResponse> {
    let quantity = quantity.unwrap_or(1);
    debug!(product_id = %product_id, quantity, ?size, ?color, "add_to_cart command");

    validate_quantity(quantity)?;
    let product = require_product(db, product_id).await?;

    storefront.with_storefront_mut(|s| -> ApiResult<CartResponse> {
        let merged = s
            .cart()
            .quantity_of(&product, size, color)
            .saturating_add(quantity);
        validate_quantity(merged)?;

        s.add_to_cart(&product, quantity, size, color);
        Ok(CartResponse::from(s.cart()))
    })
}

pub fn clear_cart(storefront: &StorefrontState) -> CartResponse {
    debug!("clear_cart command");
    storefront.with_storefront_mut(|s| {
        s.clear_cart();
        CartResponse::from(s.cart())
    })
}
