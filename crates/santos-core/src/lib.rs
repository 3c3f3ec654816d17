//! # santos-core: Pure Storefront Logic
//!
//! This crate is the heart of the Santos storefront. It holds the shopper's
//! state as plain values with zero I/O dependencies.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                     Santos Storefront Architecture                      │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                    Web front end                                │   │
//! │  │    Shop ──► Product page ──► Bag ──► Checkout ──► Confirmed    │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │            Storefront commands + state (apps/storefront)        │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │               ★ santos-core (THIS CRATE) ★                      │   │
//! │  │                                                                 │   │
//! │  │   ┌─────────┐ ┌──────────┐ ┌─────────┐ ┌─────────┐ ┌────────┐  │   │
//! │  │   │  cart   │ │ wishlist │ │ history │ │ catalog │ │checkout│  │   │
//! │  │   └─────────┘ └──────────┘ └─────────┘ └─────────┘ └────────┘  │   │
//! │  │                                                                 │   │
//! │  │   NO I/O • NO DATABASE • NO NETWORK • PURE FUNCTIONS           │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │          santos-db (key-value store, SQLite catalog)            │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`types`] - Product, Review, User, catalog filter types
//! - [`money`] - Money type with integer arithmetic
//! - [`cart`] - Cart ledger, keyed by (product, size, color)
//! - [`wishlist`] - Saved product ids
//! - [`history`] - Recently-viewed queue and its visibility flag
//! - [`catalog`] - Filtering, sorting and search
//! - [`checkout`] - Checkout steps and order placement
//! - [`validation`] - Account and input validation
//! - [`error`] - Domain error types
//!
//! ## Example Usage
//!
//! ```rust
//! use santos_core::{Cart, Money, Product};
//!
//! let gown = Product {
//!     id: "1".into(),
//!     name: "Amethyst Silk Evening Gown".into(),
//!     price: Money::from_major(895),
//!     category: "Dresses".into(),
//!     image: String::new(),
//!     hover_image: String::new(),
//!     description: String::new(),
//!     sizes: vec!["XS".into(), "S".into()],
//!     colors: vec!["Amethyst".into(), "Midnight".into()],
//!     is_new: true,
//!     color_images: None,
//!     details: None,
//!     reviews: None,
//! };
//!
//! let mut cart = Cart::new();
//! cart.add(&gown, 2, Some("S"), Some("Amethyst"));
//! cart.add(&gown, 1, Some("S"), Some("Amethyst"));
//!
//! assert_eq!(cart.lines().len(), 1);
//! assert_eq!(cart.count(), 3);
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod cart;
pub mod catalog;
pub mod checkout;
pub mod error;
pub mod history;
pub mod money;
pub mod types;
pub mod validation;
pub mod wishlist;

// =============================================================================
// Re-exports for Convenience
// =============================================================================

pub use cart::{Cart, CartLine, CartSummary};
pub use checkout::{Advance, Checkout, CheckoutStep, OrderConfirmation};
pub use error::{CoreError, CoreResult, ValidationError};
pub use history::RecentlyViewed;
pub use money::Money;
pub use types::*;
pub use wishlist::Wishlist;

// =============================================================================
// Crate-Level Constants
// =============================================================================

/// Durable storage key holding the wishlist as a JSON array of ids.
///
/// Shared with the web front end's local storage; do not rename.
pub const WISHLIST_STORAGE_KEY: &str = "santos_wishlist";

/// Maximum entries in the recently-viewed queue.
pub const RECENTLY_VIEWED_LIMIT: usize = 5;

/// The history bar stays hidden until this many products were viewed.
pub const HISTORY_BAR_MIN_ENTRIES: usize = 2;

/// Products shown in the history bar.
pub const HISTORY_PREVIEW_LEN: usize = 3;

/// Orders strictly above this subtotal ship free.
pub const FREE_SHIPPING_THRESHOLD: Money = Money::from_major(500);

/// Shipping fee below the free-shipping threshold.
pub const FLAT_SHIPPING: Money = Money::from_major(25);

/// Category selector value that matches every product.
pub const ALL_CATEGORIES: &str = "All";

/// Upper end of the shop page price slider.
pub const DEFAULT_MAX_PRICE: Money = Money::from_major(2000);

pub const MIN_PASSWORD_LEN: usize = 8;

/// Characters that satisfy the "special character" password rule.
pub const PASSWORD_SPECIAL_CHARS: &str = "!@#$%^&*(),.?\":{}|<>";

pub const MAX_NAME_LEN: usize = 100;

pub const MAX_SEARCH_LEN: usize = 100;

/// Most of one product/size/color combination a single bag line can hold.
pub const MAX_ITEM_QUANTITY: u32 = 999;
