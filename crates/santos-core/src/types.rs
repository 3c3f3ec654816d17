//! # Domain Types
//!
//! Reference data and shopper-facing types used throughout the storefront.
//!
//! ## Type Overview
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Domain Types                                    │
//! │                                                                         │
//! │  ┌─────────────────┐   ┌─────────────────┐   ┌─────────────────┐       │
//! │  │    Product      │   │ ProductDetails  │   │     Review      │       │
//! │  │  ─────────────  │   │  ─────────────  │   │  ─────────────  │       │
//! │  │  id             │   │  fabric         │   │  user_name      │       │
//! │  │  price (Money)  │──►│  model_stats    │   │  rating 1..=5   │       │
//! │  │  sizes, colors  │   │  styling_tips   │   │  verified       │       │
//! │  │  color_images   │   └─────────────────┘   └─────────────────┘       │
//! │  └─────────────────┘                                                    │
//! │                                                                         │
//! │  ┌─────────────────┐   ┌─────────────────┐   ┌─────────────────┐       │
//! │  │      User       │   │   SortOption    │   │  ProductFilter  │       │
//! │  │  id, name,      │   │  featured       │   │  category       │       │
//! │  │  email          │   │  price-asc/desc │   │  price range    │       │
//! │  └─────────────────┘   │  newest         │   │  sort           │       │
//! │                        └─────────────────┘   └─────────────────┘       │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Products are immutable reference data. Nothing in the cart, wishlist or
//! history modules ever mutates one; they clone what they keep.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::money::Money;
use crate::{ALL_CATEGORIES, DEFAULT_MAX_PRICE};

// =============================================================================
// Product
// =============================================================================

/// A garment or accessory in the house catalog.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct Product {
    /// Catalog identifier ("1", "2", ...).
    pub id: String,

    pub name: String,

    pub price: Money,

    /// Dresses, Outerwear, Tops, Accessories.
    pub category: String,

    /// Primary image reference.
    pub image: String,

    /// Image shown on hover in the product grid.
    pub hover_image: String,

    pub description: String,

    /// Available sizes in display order. The first one is the default
    /// selection when the shopper doesn't pick one.
    pub sizes: Vec<String>,

    /// Available colors in display order. The first one is the default.
    pub colors: Vec<String>,

    /// New arrival badge; drives the "newest" sort.
    #[serde(default)]
    pub is_new: bool,

    /// Color name to image reference.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[ts(optional)]
    pub color_images: Option<BTreeMap<String, String>>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[ts(optional)]
    pub details: Option<ProductDetails>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[ts(optional)]
    pub reviews: Option<Vec<Review>>,
}

impl Product {
    /// Size used when a cart addition doesn't name one.
    pub fn default_size(&self) -> Option<&str> {
        self.sizes.first().map(String::as_str)
    }

    /// Color used when a cart addition doesn't name one.
    pub fn default_color(&self) -> Option<&str> {
        self.colors.first().map(String::as_str)
    }

    /// Image to show for a selected color.
    ///
    /// Falls back to the primary image when the color has no dedicated shot
    /// (or the mapped reference is blank).
    pub fn image_for_color(&self, color: &str) -> &str {
        self.color_images
            .as_ref()
            .and_then(|images| images.get(color))
            .filter(|image| !image.is_empty())
            .map(String::as_str)
            .unwrap_or(&self.image)
    }

    /// Average review rating, `None` when there are no reviews.
    pub fn average_rating(&self) -> Option<f32> {
        let reviews = self.reviews.as_deref().filter(|r| !r.is_empty())?;
        let total: u32 = reviews.iter().map(|r| u32::from(r.rating)).sum();
        Some(total as f32 / reviews.len() as f32)
    }
}

/// Structured "details" tab on the product page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct ProductDetails {
    pub fabric: String,
    pub model_stats: String,
    pub styling_tips: String,
}

/// A customer review.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct Review {
    pub id: String,
    pub user_name: String,
    /// 1 to 5 stars.
    pub rating: u8,
    /// Display date, e.g. "October 12, 2023".
    pub date: String,
    pub title: String,
    pub text: String,
    pub verified: bool,
}

// =============================================================================
// User
// =============================================================================

/// The signed-in shopper.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct User {
    pub id: String,
    pub name: String,
    pub email: String,
}

// =============================================================================
// Catalog Browsing
// =============================================================================

/// Ordering options on the shop page.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, TS)]
#[serde(rename_all = "kebab-case")]
#[ts(export)]
pub enum SortOption {
    /// Catalog order, as curated.
    #[default]
    Featured,
    PriceAsc,
    PriceDesc,
    /// New arrivals first.
    Newest,
}

/// Shop page filter state. Missing fields take their defaults.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase", default)]
#[ts(export)]
pub struct ProductFilter {
    /// Category name, or "All".
    pub category: String,
    /// Inclusive lower price bound.
    pub min_price: Money,
    /// Inclusive upper price bound.
    pub max_price: Money,
    pub sort: SortOption,
}

impl Default for ProductFilter {
    /// Everything in the catalog, in featured order, up to $2000.
    fn default() -> Self {
        ProductFilter {
            category: ALL_CATEGORIES.to_string(),
            min_price: Money::zero(),
            max_price: DEFAULT_MAX_PRICE,
            sort: SortOption::Featured,
        }
    }
}

impl ProductFilter {
    /// True if the category selector is on "All".
    pub fn is_all_categories(&self) -> bool {
        self.category == ALL_CATEGORIES
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn trench() -> Product {
        Product {
            id: "2".to_string(),
            name: "Lavender Wool Trench".to_string(),
            price: Money::from_major(450),
            category: "Outerwear".to_string(),
            image: "trench.jpg".to_string(),
            hover_image: "trench-hover.jpg".to_string(),
            description: "Italian wool blend trench coat.".to_string(),
            sizes: vec!["S".to_string(), "M".to_string()],
            colors: vec!["Lavender".to_string(), "Camel".to_string()],
            is_new: true,
            color_images: Some(BTreeMap::from([(
                "Camel".to_string(),
                "trench-camel.jpg".to_string(),
            )])),
            details: None,
            reviews: None,
        }
    }

    #[test]
    fn test_defaults_are_first_declared() {
        let product = trench();
        assert_eq!(product.default_size(), Some("S"));
        assert_eq!(product.default_color(), Some("Lavender"));
    }

    #[test]
    fn test_image_for_color_falls_back_to_primary() {
        let product = trench();
        assert_eq!(product.image_for_color("Camel"), "trench-camel.jpg");
        assert_eq!(product.image_for_color("Lavender"), "trench.jpg");
    }

    #[test]
    fn test_average_rating() {
        let mut product = trench();
        assert_eq!(product.average_rating(), None);

        let review = |id: &str, rating: u8| Review {
            id: id.to_string(),
            user_name: "Isabella V.".to_string(),
            rating,
            date: "October 12, 2023".to_string(),
            title: "Lovely".to_string(),
            text: "Drapes perfectly.".to_string(),
            verified: true,
        };
        product.reviews = Some(vec![review("r1", 5), review("r2", 4)]);
        assert_eq!(product.average_rating(), Some(4.5));
    }

    #[test]
    fn test_product_json_uses_camel_case() {
        let json = serde_json::to_value(trench()).unwrap();
        assert_eq!(json["hoverImage"], "trench-hover.jpg");
        assert_eq!(json["isNew"], true);
        assert_eq!(json["price"], 45_000);
        assert!(json.get("details").is_none());
    }

    #[test]
    fn test_sort_option_wire_names() {
        let json = serde_json::to_string(&SortOption::PriceAsc).unwrap();
        assert_eq!(json, "\"price-asc\"");
        assert_eq!(SortOption::default(), SortOption::Featured);
    }

    #[test]
    fn test_default_filter_is_everything() {
        let filter = ProductFilter::default();
        assert!(filter.is_all_categories());
        assert_eq!(filter.max_price, Money::from_major(2000));
    }
}
