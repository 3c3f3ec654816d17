//! # Storefront State
//!
//! The shopper's session: cart, wishlist and recently-viewed history in one
//! container with an explicit mutation API.
//!
//! ## Mutations
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Storefront Operations                                │
//! │                                                                         │
//! │  Front end action        Mutator              Side effect               │
//! │  ────────────────        ───────              ───────────               │
//! │                                                                         │
//! │  Add to bag ───────────► add_to_cart() ────► (memory only)             │
//! │  Order placed ─────────► clear_cart() ─────► (memory only)             │
//! │  Heart icon ───────────► toggle_wishlist() ► store.set(santos_wishlist)│
//! │  Open product page ────► record_viewed() ──► bar shown again           │
//! │  Close history bar ────► dismiss_history()                             │
//! │                                                                         │
//! │  Startup: Storefront::load(store) reads santos_wishlist once           │
//! │           missing / unreadable / corrupt ──► empty wishlist + warn!    │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Only the wishlist is durable. A failed write is logged and the in-memory
//! wishlist stays authoritative for the session.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use chrono::Utc;
use tracing::{debug, info, warn};

use santos_core::{
    Cart, Checkout, CoreResult, OrderConfirmation, Product, RecentlyViewed, Wishlist,
    WISHLIST_STORAGE_KEY,
};
use santos_db::KeyValueStore;

// =============================================================================
// Storefront
// =============================================================================

/// Cart, wishlist and history for one shopper.
///
/// Every operation is synchronous and runs to completion. The only
/// storage access is the wishlist read in [`Storefront::load`] and the
/// write inside [`Storefront::toggle_wishlist`].
pub struct Storefront<S: KeyValueStore> {
    cart: Cart,
    wishlist: Wishlist,
    history: RecentlyViewed,
    store: S,
}

impl<S: KeyValueStore> Storefront<S> {
    /// Starts a session, restoring the saved wishlist from `store`.
    ///
    /// Never fails: any problem reading or decoding the stored value
    /// starts an empty wishlist.
    pub fn load(store: S) -> Self {
        let wishlist = restore_wishlist(&store);
        info!(saved = wishlist.len(), "Storefront session started");

        Storefront {
            cart: Cart::new(),
            wishlist,
            history: RecentlyViewed::new(),
            store,
        }
    }

    pub fn cart(&self) -> &Cart {
        &self.cart
    }

    /// Items in the bag (sum of quantities).
    pub fn cart_count(&self) -> u32 {
        self.cart.count()
    }

    pub fn wishlist(&self) -> &Wishlist {
        &self.wishlist
    }

    pub fn history(&self) -> &RecentlyViewed {
        &self.history
    }

    pub fn add_to_cart(&mut self, product: &Product, quantity: u32, size: Option<&str>, color: Option<&str>) {
        self.cart.add(product, quantity, size, color);
        debug!(
            product_id = %product.id,
            quantity,
            count = self.cart.count(),
            "Added to cart"
        );
    }

    pub fn clear_cart(&mut self) {
        self.cart.clear();
        debug!("Cart cleared");
    }

    /// Saves or forgets the product, then persists the full wishlist.
    ///
    /// Returns `true` when the product is saved after the call.
    pub fn toggle_wishlist(&mut self, product: &Product) -> bool {
        let saved = self.wishlist.toggle(product);
        debug!(product_id = %product.id, saved, "Wishlist toggled");
        self.persist_wishlist();
        saved
    }

    pub fn record_viewed(&mut self, product: &Product) {
        self.history.record(product);
        debug!(product_id = %product.id, entries = self.history.len(), "Recorded view");
    }

    pub fn dismiss_history(&mut self) {
        self.history.dismiss();
        debug!("History bar dismissed");
    }

    /// Places the order from the bag. See [`Checkout::place_order`].
    pub fn place_order(&mut self, checkout: &mut Checkout) -> CoreResult<OrderConfirmation> {
        let confirmation = checkout.place_order(&mut self.cart, Utc::now())?;
        info!(
            order_id = %confirmation.order_id,
            items = confirmation.summary.item_count,
            total = %confirmation.summary.total,
            "Order placed"
        );
        Ok(confirmation)
    }

    fn persist_wishlist(&self) {
        let json = match self.wishlist.to_json() {
            Ok(json) => json,
            Err(e) => {
                warn!(error = %e, "Could not encode wishlist; not saved");
                return;
            }
        };

        if let Err(e) = self.store.set(WISHLIST_STORAGE_KEY, &json) {
            warn!(error = %e, "Could not save wishlist; keeping it for this session only");
        }
    }
}

fn restore_wishlist<S: KeyValueStore>(store: &S) -> Wishlist {
    let stored = match store.get(WISHLIST_STORAGE_KEY) {
        Ok(Some(json)) => json,
        Ok(None) => return Wishlist::new(),
        Err(e) => {
            warn!(error = %e, "Could not read saved wishlist; starting empty");
            return Wishlist::new();
        }
    };

    Wishlist::from_json(&stored).unwrap_or_else(|e| {
        warn!(error = %e, "Saved wishlist is corrupt; starting empty");
        Wishlist::new()
    })
}

// =============================================================================
// Shared Handle
// =============================================================================

/// Store handle used by the running application.
pub type SharedStore = Arc<dyn KeyValueStore>;

/// Shared handle to the [`Storefront`] for command handlers.
///
/// ## Usage
/// ```rust,ignore
/// let count = storefront.with_storefront(|s| s.cart_count());
/// storefront.with_storefront_mut(|s| s.toggle_wishlist(&product));
/// ```
///
/// The lock is held only for the closure; never across an `.await`.
#[derive(Debug, Clone)]
pub struct StorefrontState {
    inner: Arc<Mutex<Storefront<SharedStore>>>,
}

impl StorefrontState {
    pub fn load(store: SharedStore) -> Self {
        StorefrontState {
            inner: Arc::new(Mutex::new(Storefront::load(store))),
        }
    }

    /// Executes a function with read access to the storefront.
    pub fn with_storefront<F, R>(&self, f: F) -> R
    where
        F: FnOnce(&Storefront<SharedStore>) -> R,
    {
        f(&self.lock())
    }

    /// Executes a function with write access to the storefront.
    pub fn with_storefront_mut<F, R>(&self, f: F) -> R
    where
        F: FnOnce(&mut Storefront<SharedStore>) -> R,
    {
        f(&mut self.lock())
    }

    fn lock(&self) -> MutexGuard<'_, Storefront<SharedStore>> {
        // Every mutator leaves the storefront consistent before it can panic.
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl<S: KeyValueStore> std::fmt::Debug for Storefront<S> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Storefront")
            .field("cart", &self.cart)
            .field("wishlist", &self.wishlist)
            .field("history", &self.history)
            .finish_non_exhaustive()
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use santos_core::{CheckoutStep, Money};
    use santos_db::{DbError, DbResult, FileStore, MemoryStore};

    fn product(id: &str) -> Product {
        Product {
            id: id.to_string(),
            name: format!("Product {}", id),
            price: Money::from_major(100),
            category: "Dresses".to_string(),
            image: String::new(),
            hover_image: String::new(),
            description: String::new(),
            sizes: vec!["XS".to_string(), "S".to_string()],
            colors: vec!["Amethyst".to_string(), "Midnight".to_string()],
            is_new: false,
            color_images: None,
            details: None,
            reviews: None,
        }
    }

    fn denied(reason: &str) -> DbError {
        DbError::Io(std::io::Error::new(std::io::ErrorKind::PermissionDenied, reason.to_string()))
    }

    /// A store whose writes always fail.
    struct ReadOnlyStore;

    impl KeyValueStore for ReadOnlyStore {
        fn get(&self, _key: &str) -> DbResult<Option<String>> {
            Ok(None)
        }
        fn set(&self, _key: &str, _value: &str) -> DbResult<()> {
            Err(denied("read-only"))
        }
        fn remove(&self, _key: &str) -> DbResult<()> {
            Err(denied("read-only"))
        }
    }

    /// A store whose reads always fail.
    struct UnreadableStore;

    impl KeyValueStore for UnreadableStore {
        fn get(&self, _key: &str) -> DbResult<Option<String>> {
            Err(denied("permission denied"))
        }
        fn set(&self, _key: &str, _value: &str) -> DbResult<()> {
            Ok(())
        }
        fn remove(&self, _key: &str) -> DbResult<()> {
            Ok(())
        }
    }

    #[test]
    fn test_cart_merge_scenario() {
        let mut storefront = Storefront::load(MemoryStore::new());
        storefront.add_to_cart(&product("1"), 2, Some("S"), Some("Amethyst"));
        storefront.add_to_cart(&product("1"), 1, Some("S"), Some("Amethyst"));

        assert_eq!(storefront.cart().lines().len(), 1);
        assert_eq!(storefront.cart().lines()[0].quantity, 3);
        assert_eq!(storefront.cart_count(), 3);
    }

    #[test]
    fn test_toggle_persists_and_reloads() {
        let store = Arc::new(MemoryStore::new());

        let mut storefront = Storefront::load(Arc::clone(&store));
        assert!(storefront.toggle_wishlist(&product("2")));
        assert_eq!(
            store.get(WISHLIST_STORAGE_KEY).unwrap().as_deref(),
            Some(r#"["2"]"#)
        );
        drop(storefront);

        let reloaded = Storefront::load(Arc::clone(&store));
        assert!(reloaded.wishlist().contains("2"));
    }

    #[test]
    fn test_toggle_twice_restores_and_persists_removal() {
        let store = Arc::new(MemoryStore::new());
        let mut storefront = Storefront::load(Arc::clone(&store));

        storefront.toggle_wishlist(&product("1"));
        storefront.toggle_wishlist(&product("3"));
        assert!(!storefront.toggle_wishlist(&product("1")));

        assert_eq!(storefront.wishlist().ids(), ["3"]);
        assert_eq!(
            store.get(WISHLIST_STORAGE_KEY).unwrap().as_deref(),
            Some(r#"["3"]"#)
        );
    }

    #[test]
    fn test_file_store_survives_restart() {
        let dir = tempfile::tempdir().unwrap();

        let mut storefront = Storefront::load(FileStore::open(dir.path()).unwrap());
        storefront.toggle_wishlist(&product("6"));
        storefront.toggle_wishlist(&product("2"));
        drop(storefront);

        let reloaded = Storefront::load(FileStore::open(dir.path()).unwrap());
        assert_eq!(reloaded.wishlist().ids(), ["6", "2"]);
    }

    #[test]
    fn test_corrupt_storage_starts_empty() {
        let store = MemoryStore::new();
        store.set(WISHLIST_STORAGE_KEY, "{not json").unwrap();
        assert!(Storefront::load(store).wishlist().is_empty());

        let store = MemoryStore::new();
        store.set(WISHLIST_STORAGE_KEY, r#"{"ids":["1"]}"#).unwrap();
        assert!(Storefront::load(store).wishlist().is_empty());

        assert!(Storefront::load(UnreadableStore).wishlist().is_empty());
    }

    #[test]
    fn test_failed_write_keeps_memory_state() {
        let mut storefront = Storefront::load(ReadOnlyStore);

        assert!(storefront.toggle_wishlist(&product("4")));
        assert!(storefront.wishlist().contains("4"));
    }

    #[test]
    fn test_history_scenarios() {
        let mut storefront = Storefront::load(MemoryStore::new());
        for id in ["1", "2", "3", "4", "5", "6"] {
            storefront.record_viewed(&product(id));
        }
        assert_eq!(storefront.history().ids(), ["6", "5", "4", "3", "2"]);

        storefront.dismiss_history();
        assert!(!storefront.history().is_visible());
        assert_eq!(storefront.history().len(), 5);

        storefront.record_viewed(&product("7"));
        assert!(storefront.history().is_visible());
        assert_eq!(storefront.history().ids()[0], "7");
    }

    #[test]
    fn test_place_order_clears_cart() {
        let mut storefront = Storefront::load(MemoryStore::new());
        storefront.add_to_cart(&product("1"), 6, None, None);

        let mut checkout = Checkout::new();
        checkout.advance();
        checkout.advance();
        assert_eq!(checkout.step(), CheckoutStep::Review);

        let confirmation = storefront.place_order(&mut checkout).unwrap();
        assert_eq!(confirmation.summary.subtotal, Money::from_major(600));
        assert_eq!(confirmation.summary.shipping, Money::zero());
        assert_eq!(storefront.cart_count(), 0);
    }

    #[test]
    fn test_shared_handle() {
        let state = StorefrontState::load(Arc::new(MemoryStore::new()));
        let handle = state.clone();

        handle.with_storefront_mut(|s| s.add_to_cart(&product("1"), 1, None, None));
        assert_eq!(state.with_storefront(|s| s.cart_count()), 1);
    }
}
