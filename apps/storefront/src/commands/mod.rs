//! # Commands Module
//!
//! Every operation the web front end can invoke.
//!
//! ## Command Organization
//! ```text
//! commands/
//! ├── mod.rs       ◄─── You are here (shared lookups, test fixtures)
//! ├── catalog.rs   ◄─── list_products, get_product, search_products
//! ├── cart.rs      ◄─── get_cart, add_to_cart, clear_cart
//! ├── wishlist.rs  ◄─── get_wishlist, toggle_wishlist
//! ├── history.rs   ◄─── get_history, dismiss_history
//! ├── checkout.rs  ◄─── checkout_summary, advance, back, place_order
//! ├── auth.rs      ◄─── register, sign_in, sign_out, current_user
//! └── config.rs    ◄─── get_config
//! ```
//!
//! ## State Injection
//! Each command declares only the state it needs:
//! ```rust,ignore
//! // Only needs the catalog
//! async fn search_products(db: &DbState, ...)
//!
//! // Only needs the session state
//! fn get_cart(storefront: &StorefrontState)
//!
//! // Needs both
//! async fn add_to_cart(db: &DbState, storefront: &StorefrontState, ...)
//! ```
//!
//! The [`bridge`](crate::bridge) decodes invoke requests and routes them
//! here.

pub mod auth;
pub mod cart;
pub mod catalog;
pub mod checkout;
pub mod config;
pub mod history;
pub mod wishlist;

use santos_core::Product;

use crate::error::{ApiError, ApiResult};
use crate::state::DbState;

/// Loads an active product or fails with `NOT_FOUND`.
pub(crate) async fn require_product(db: &DbState, product_id: &str) -> ApiResult<Product> {
    db.get()
        .products()
        .get_by_id(product_id)
        .await?
        .ok_or_else(|| ApiError::not_found("Product", product_id))
}

#[cfg(test)]
pub(crate) mod fixtures {
    use crate::state::{AppState, ConfigState};

    /// In-memory app with the house catalog and no checkout delay.
    pub async fn app() -> AppState {
        AppState::ephemeral(ConfigState::for_tests()).await.unwrap()
    }
}
