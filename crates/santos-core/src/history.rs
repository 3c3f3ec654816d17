//! # Recently-Viewed Queue
//!
//! A session-only, most-recent-first list of product pages the shopper
//! opened, plus the flag that shows or hides the history bar.
//!
//! ## Visibility
//! ```text
//!            dismiss()
//!   ┌───────┐ ───────► ┌────────┐
//!   │ Shown │          │ Hidden │
//!   └───────┘ ◄─────── └────────┘
//!     ▲  initial        record(p)
//! ```
//!
//! Recording keeps working while hidden; the next record shows the bar
//! again.

use std::collections::VecDeque;

use crate::types::Product;
use crate::{HISTORY_BAR_MIN_ENTRIES, HISTORY_PREVIEW_LEN, RECENTLY_VIEWED_LIMIT};

#[derive(Debug, Clone, PartialEq)]
pub struct RecentlyViewed {
    entries: VecDeque<Product>,
    visible: bool,
}

impl Default for RecentlyViewed {
    fn default() -> Self {
        RecentlyViewed {
            entries: VecDeque::with_capacity(RECENTLY_VIEWED_LIMIT + 1),
            visible: true,
        }
    }
}

impl RecentlyViewed {
    pub fn new() -> Self {
        RecentlyViewed::default()
    }

    /// Moves (or inserts) the product to the front and re-shows the bar.
    ///
    /// The queue is capped at [`RECENTLY_VIEWED_LIMIT`]; the oldest entry
    /// falls off the end.
    pub fn record(&mut self, product: &Product) {
        self.entries.retain(|entry| entry.id != product.id);
        self.entries.push_front(product.clone());
        self.entries.truncate(RECENTLY_VIEWED_LIMIT);
        self.visible = true;
    }

    /// Hides the history bar. Entries are kept.
    pub fn dismiss(&mut self) {
        self.visible = false;
    }

    pub fn is_visible(&self) -> bool {
        self.visible
    }

    /// Viewed products, most recent first.
    pub fn entries(&self) -> impl ExactSizeIterator<Item = &Product> + '_ {
        self.entries.iter()
    }

    /// Viewed product ids, most recent first.
    pub fn ids(&self) -> Vec<&str> {
        self.entries.iter().map(|p| p.id.as_str()).collect()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Whether the history bar should render at all: it must not be
    /// dismissed and needs at least two viewed products.
    pub fn shows_bar(&self) -> bool {
        self.visible && self.entries.len() >= HISTORY_BAR_MIN_ENTRIES
    }

    /// The products the history bar displays.
    pub fn preview(&self) -> impl Iterator<Item = &Product> + '_ {
        self.entries.iter().take(HISTORY_PREVIEW_LEN)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::money::Money;

    fn product(id: &str) -> Product {
        Product {
            id: id.to_string(),
            name: format!("Product {}", id),
            price: Money::from_major(320),
            category: "Outerwear".to_string(),
            image: String::new(),
            hover_image: String::new(),
            description: String::new(),
            sizes: vec!["M".to_string()],
            colors: vec!["Plum".to_string()],
            is_new: false,
            color_images: None,
            details: None,
            reviews: None,
        }
    }

    #[test]
    fn test_starts_empty_and_visible() {
        let history = RecentlyViewed::new();
        assert!(history.is_empty());
        assert!(history.is_visible());
        assert!(!history.shows_bar());
    }

    #[test]
    fn test_six_views_evict_the_oldest() {
        let mut history = RecentlyViewed::new();
        for id in ["1", "2", "3", "4", "5", "6"] {
            history.record(&product(id));
        }

        assert_eq!(history.ids(), ["6", "5", "4", "3", "2"]);
    }

    #[test]
    fn test_never_exceeds_limit() {
        let mut history = RecentlyViewed::new();
        for n in 0..50 {
            history.record(&product(&n.to_string()));
            assert!(history.len() <= RECENTLY_VIEWED_LIMIT);
        }
        assert_eq!(history.len(), RECENTLY_VIEWED_LIMIT);
    }

    #[test]
    fn test_re_viewing_moves_to_front_without_duplicating() {
        let mut history = RecentlyViewed::new();
        for id in ["1", "2", "3"] {
            history.record(&product(id));
        }

        history.record(&product("3"));
        assert_eq!(history.ids(), ["3", "2", "1"]);

        history.record(&product("1"));
        assert_eq!(history.len(), 3);
        assert_eq!(history.ids(), ["1", "3", "2"]);
    }

    #[test]
    fn test_dismiss_then_record_shows_again() {
        let mut history = RecentlyViewed::new();
        history.record(&product("1"));
        history.dismiss();
        assert!(!history.is_visible());

        history.record(&product("7"));
        assert!(history.is_visible());
        assert_eq!(history.ids(), ["7", "1"]);
    }

    #[test]
    fn test_dismiss_keeps_entries() {
        let mut history = RecentlyViewed::new();
        history.record(&product("1"));
        history.record(&product("2"));
        history.dismiss();

        assert_eq!(history.len(), 2);
        assert!(!history.shows_bar());
    }

    #[test]
    fn test_bar_needs_two_entries_and_previews_three() {
        let mut history = RecentlyViewed::new();
        history.record(&product("1"));
        assert!(!history.shows_bar());

        for id in ["2", "3", "4"] {
            history.record(&product(id));
        }
        assert!(history.shows_bar());

        let preview: Vec<&str> = history.preview().map(|p| p.id.as_str()).collect();
        assert_eq!(preview, ["4", "3", "2"]);
    }
}
