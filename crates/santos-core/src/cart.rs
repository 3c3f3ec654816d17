//! # Cart Ledger
//!
//! The shopping bag: one line per (product, size, color) combination.
//!
//! ## Add-to-Cart Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Cart::add(product, qty, size, color)                 │
//! │                                                                         │
//! │  size empty/None? ──► product.sizes[0]                                 │
//! │  color empty/None? ─► product.colors[0]                                │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  line with same (id, size, color)?                                     │
//! │      ├── yes ──► line.quantity += qty                                  │
//! │      └── no  ──► push new line                                         │
//! │                                                                         │
//! │  count = Σ quantity   (derived on read, never stored)                  │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Invariants
//! - At most one line per (product id, selected size, selected color)
//! - Adding never fails; there is no stock concept in the storefront

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::money::Money;
use crate::types::Product;
use crate::{FLAT_SHIPPING, FREE_SHIPPING_THRESHOLD};

// =============================================================================
// Cart Line
// =============================================================================

/// A product in the bag with the shopper's size, color and quantity.
///
/// Serializes flat, so the front end sees the product's own fields next to
/// `quantity`, `selectedSize` and `selectedColor`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct CartLine {
    #[serde(flatten)]
    pub product: Product,

    pub quantity: u32,

    pub selected_size: String,

    pub selected_color: String,
}

impl CartLine {
    /// True if this line is the (id, size, color) combination given.
    pub fn matches(&self, product_id: &str, size: &str, color: &str) -> bool {
        self.product.id == product_id && self.selected_size == size && self.selected_color == color
    }

    /// Unit price × quantity.
    pub fn line_total(&self) -> Money {
        self.product.price.times(self.quantity)
    }
}

// =============================================================================
// Cart
// =============================================================================

/// The session's shopping bag. Lives in memory only.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Cart {
    lines: Vec<CartLine>,
}

impl Cart {
    /// Creates an empty cart.
    pub fn new() -> Self {
        Cart::default()
    }

    /// Adds `quantity` of a product in the given size and color.
    ///
    /// An omitted or empty `size`/`color` resolves to the product's first
    /// declared one, even if the shopper had something else selected on the
    /// page. A product with no declared sizes resolves to an empty size
    /// string (same for colors).
    ///
    /// ## Example
    /// ```rust,ignore
    /// cart.add(&gown, 2, Some("S"), Some("Amethyst"));
    /// cart.add(&gown, 1, Some("S"), Some("Amethyst"));
    /// assert_eq!(cart.lines().len(), 1);
    /// assert_eq!(cart.count(), 3);
    /// ```
    pub fn add(&mut self, product: &Product, quantity: u32, size: Option<&str>, color: Option<&str>) {
        let size = resolve_choice(size, product.default_size());
        let color = resolve_choice(color, product.default_color());

        if let Some(line) = self
            .lines
            .iter_mut()
            .find(|line| line.matches(&product.id, &size, &color))
        {
            line.quantity = line.quantity.saturating_add(quantity);
            return;
        }

        self.lines.push(CartLine {
            product: product.clone(),
            quantity,
            selected_size: size,
            selected_color: color,
        });
    }

    /// Empties the bag. Called once an order is placed.
    pub fn clear(&mut self) {
        self.lines.clear();
    }

    /// Current lines, in the order they were first added.
    pub fn lines(&self) -> &[CartLine] {
        &self.lines
    }

    /// Total number of items (the badge on the bag icon).
    pub fn count(&self) -> u32 {
        self.lines
            .iter()
            .fold(0u32, |count, line| count.saturating_add(line.quantity))
    }

    /// Quantity already in the bag for this product and choice of size and
    /// color, resolved the same way [`Cart::add`] resolves them.
    pub fn quantity_of(&self, product: &Product, size: Option<&str>, color: Option<&str>) -> u32 {
        let size = resolve_choice(size, product.default_size());
        let color = resolve_choice(color, product.default_color());

        self.lines
            .iter()
            .find(|line| line.matches(&product.id, &size, &color))
            .map_or(0, |line| line.quantity)
    }

    pub fn subtotal(&self) -> Money {
        self.lines.iter().map(CartLine::line_total).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Subtotal, shipping and total in one snapshot.
    pub fn summary(&self) -> CartSummary {
        CartSummary::from(self)
    }
}

/// Picks the shopper's choice, or the declared default when the choice is
/// missing or blank.
fn resolve_choice(choice: Option<&str>, default: Option<&str>) -> String {
    match choice {
        Some(value) if !value.is_empty() => value.to_string(),
        _ => default.unwrap_or_default().to_string(),
    }
}

// =============================================================================
// Totals
// =============================================================================

/// Shipping fee for an order subtotal.
///
/// ```text
/// subtotal >  $500.00  →  Free
/// subtotal <= $500.00  →  $25.00
/// ```
pub fn shipping_for(subtotal: Money) -> Money {
    if subtotal > FREE_SHIPPING_THRESHOLD {
        Money::zero()
    } else {
        FLAT_SHIPPING
    }
}

/// Cart totals for the bag drawer and the checkout sidebar.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct CartSummary {
    /// Distinct (product, size, color) lines.
    pub line_count: usize,
    /// Sum of quantities.
    pub item_count: u32,
    pub subtotal: Money,
    pub shipping: Money,
    pub total: Money,
}

impl From<&Cart> for CartSummary {
    fn from(cart: &Cart) -> Self {
        let subtotal = cart.subtotal();
        let shipping = shipping_for(subtotal);
        CartSummary {
            line_count: cart.lines.len(),
            item_count: cart.count(),
            subtotal,
            shipping,
            total: subtotal + shipping,
        }
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn product(id: &str, price: i64, sizes: &[&str], colors: &[&str]) -> Product {
        Product {
            id: id.to_string(),
            name: format!("Product {}", id),
            price: Money::from_major(price),
            category: "Dresses".to_string(),
            image: String::new(),
            hover_image: String::new(),
            description: String::new(),
            sizes: sizes.iter().map(|s| s.to_string()).collect(),
            colors: colors.iter().map(|c| c.to_string()).collect(),
            is_new: false,
            color_images: None,
            details: None,
            reviews: None,
        }
    }

    fn gown() -> Product {
        product("1", 895, &["XS", "S", "M", "L"], &["Amethyst", "Midnight"])
    }

    #[test]
    fn test_same_combination_merges_quantity() {
        let mut cart = Cart::new();
        cart.add(&gown(), 2, Some("S"), Some("Amethyst"));
        cart.add(&gown(), 1, Some("S"), Some("Amethyst"));

        assert_eq!(cart.lines().len(), 1);
        assert_eq!(cart.lines()[0].quantity, 3);
        assert_eq!(cart.count(), 3);
    }

    #[test]
    fn test_repeated_single_adds_count_calls() {
        let mut cart = Cart::new();
        for _ in 0..7 {
            cart.add(&gown(), 1, Some("M"), Some("Midnight"));
        }

        assert_eq!(cart.lines().len(), 1);
        assert_eq!(cart.lines()[0].quantity, 7);
    }

    #[test]
    fn test_huge_quantities_saturate() {
        let mut cart = Cart::new();
        cart.add(&gown(), u32::MAX, None, None);
        cart.add(&gown(), 2, None, None);
        cart.add(&gown(), 5, Some("L"), None);

        assert_eq!(cart.lines()[0].quantity, u32::MAX);
        assert_eq!(cart.count(), u32::MAX);
    }

    #[test]
    fn test_quantity_of_resolves_defaults() {
        let mut cart = Cart::new();
        cart.add(&gown(), 3, Some("XS"), Some("Amethyst"));

        assert_eq!(cart.quantity_of(&gown(), None, Some("")), 3);
        assert_eq!(cart.quantity_of(&gown(), Some("M"), None), 0);
    }

    #[test]
    fn test_different_color_is_a_new_line() {
        let mut cart = Cart::new();
        cart.add(&gown(), 1, Some("S"), Some("Amethyst"));
        cart.add(&gown(), 1, Some("S"), Some("Midnight"));

        assert_eq!(cart.lines().len(), 2);
        assert_eq!(cart.count(), 2);
    }

    #[test]
    fn test_missing_or_empty_choice_uses_first_declared() {
        let mut cart = Cart::new();
        cart.add(&gown(), 1, None, None);
        cart.add(&gown(), 1, Some(""), Some(""));

        assert_eq!(cart.lines().len(), 1);
        let line = &cart.lines()[0];
        assert_eq!(line.selected_size, "XS");
        assert_eq!(line.selected_color, "Amethyst");
        assert_eq!(line.quantity, 2);
    }

    #[test]
    fn test_merge_leaves_other_fields_untouched() {
        let mut cart = Cart::new();
        let trench = product("2", 450, &["S", "M"], &["Lavender"]);
        cart.add(&gown(), 1, None, None);
        cart.add(&trench, 1, Some("M"), None);
        cart.add(&gown(), 4, None, None);

        let lines = cart.lines();
        assert_eq!(lines.len(), 2);
        assert_eq!(lines[0].product, gown());
        assert_eq!(lines[0].quantity, 5);
        assert_eq!(lines[1].quantity, 1);
    }

    #[test]
    fn test_count_tracks_arbitrary_sequences() {
        let mut cart = Cart::new();
        let sizes = ["XS", "S", "M", "L"];
        let colors = ["Amethyst", "Midnight"];
        let mut expected = 0;

        for step in 0u32..40 {
            let quantity = step % 3 + 1;
            let size = sizes[(step as usize) % sizes.len()];
            let color = colors[(step as usize / 3) % colors.len()];
            cart.add(&gown(), quantity, Some(size), Some(color));
            expected += quantity;

            let summed: u32 = cart.lines().iter().map(|l| l.quantity).sum();
            assert_eq!(cart.count(), summed);
            assert_eq!(cart.count(), expected);
        }
        assert!(cart.lines().len() <= sizes.len() * colors.len());
    }

    #[test]
    fn test_clear() {
        let mut cart = Cart::new();
        cart.add(&gown(), 2, None, None);
        assert!(!cart.is_empty());

        cart.clear();
        assert!(cart.is_empty());
        assert_eq!(cart.count(), 0);
    }

    #[test]
    fn test_summary_shipping_threshold() {
        let mut cart = Cart::new();
        let scarf = product("9", 500, &["One Size"], &["Silver"]);

        cart.add(&scarf, 1, None, None);
        let summary = cart.summary();
        assert_eq!(summary.subtotal, Money::from_major(500));
        assert_eq!(summary.shipping, Money::from_major(25));
        assert_eq!(summary.total, Money::from_major(525));

        cart.add(&gown(), 1, None, None);
        let summary = cart.summary();
        assert_eq!(summary.shipping, Money::zero());
        assert_eq!(summary.total, Money::from_major(1395));
        assert_eq!(summary.line_count, 2);
        assert_eq!(summary.item_count, 2);
    }

    #[test]
    fn test_shipping_is_free_just_over_threshold() {
        assert_eq!(shipping_for(Money::from_cents(50_001)), Money::zero());
        assert_eq!(shipping_for(Money::from_cents(50_000)), Money::from_major(25));
        assert_eq!(shipping_for(Money::zero()), Money::from_major(25));
    }

    #[test]
    fn test_line_serializes_flat() {
        let mut cart = Cart::new();
        cart.add(&gown(), 1, Some("S"), Some("Midnight"));

        let json = serde_json::to_value(&cart.lines()[0]).unwrap();
        assert_eq!(json["id"], "1");
        assert_eq!(json["selectedSize"], "S");
        assert_eq!(json["selectedColor"], "Midnight");
        assert_eq!(json["quantity"], 1);
    }
}
