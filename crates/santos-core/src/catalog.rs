//! # Catalog Queries
//!
//! Pure filtering, sorting and search over the house catalog.
//!
//! ```text
//! Shop page:     filter(products, &ProductFilter) ──► category → price → sort
//! Search bar:    search(products, "silk")         ──► name or category contains
//! Wishlist page: saved(products, &wishlist)       ──► catalog order
//! ```
//!
//! Every function borrows the catalog and returns borrowed products; the
//! caller decides whether to clone.

use crate::types::{Product, ProductFilter, SortOption};
use crate::wishlist::Wishlist;

/// Applies the shop page filter.
///
/// Sorting is stable, so ties keep catalog order (which is what makes
/// `Featured` a no-op and `Newest` a simple partition).
pub fn filter<'a>(products: &'a [Product], filter: &ProductFilter) -> Vec<&'a Product> {
    let mut result: Vec<&Product> = products
        .iter()
        .filter(|p| filter.is_all_categories() || p.category == filter.category)
        .filter(|p| p.price >= filter.min_price && p.price <= filter.max_price)
        .collect();

    match filter.sort {
        SortOption::Featured => {}
        SortOption::PriceAsc => result.sort_by_key(|p| p.price),
        SortOption::PriceDesc => result.sort_by(|a, b| b.price.cmp(&a.price)),
        SortOption::Newest => result.sort_by_key(|p| !p.is_new),
    }

    result
}

/// Case-insensitive search on product name and category.
///
/// Surrounding whitespace is ignored. A blank query returns nothing rather
/// than the whole catalog.
pub fn search<'a>(products: &'a [Product], query: &str) -> Vec<&'a Product> {
    let query = query.trim().to_lowercase();
    if query.is_empty() {
        return Vec::new();
    }

    products
        .iter()
        .filter(|p| {
            p.name.to_lowercase().contains(&query) || p.category.to_lowercase().contains(&query)
        })
        .collect()
}

/// Saved products in catalog order. Ids that are no longer in the catalog
/// are skipped.
pub fn saved<'a>(products: &'a [Product], wishlist: &Wishlist) -> Vec<&'a Product> {
    products.iter().filter(|p| wishlist.contains(&p.id)).collect()
}

/// Distinct categories in catalog order, preceded by "All".
pub fn categories(products: &[Product]) -> Vec<String> {
    let mut categories = vec![crate::ALL_CATEGORIES.to_string()];
    for product in products {
        if !categories.contains(&product.category) {
            categories.push(product.category.clone());
        }
    }
    categories
}
