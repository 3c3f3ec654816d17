//! # Wishlist Commands
//!
//! The heart icon and the saved-items page. Every toggle is written to the
//! key-value store before the command returns.

use serde::{Deserialize, Serialize};
use tracing::debug;

use santos_core::{catalog, Product};

use super::require_product;
use crate::error::ApiResult;
use crate::state::{DbState, StorefrontState};

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WishlistResponse {
    /// Saved ids in the order they were saved.
    pub ids: Vec<String>,
    /// Saved products still in the catalog, in catalog order.
    pub products: Vec<Product>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ToggleResponse {
    pub product_id: String,
    /// Whether the product is saved after the toggle.
    pub saved: bool,
    pub ids: Vec<String>,
}

pub async fn get_wishlist(db: &DbState, storefront: &StorefrontState) -> ApiResult<WishlistResponse> {
    debug!("get_wishlist command");

    let products = db.get().products().list_active().await?;
    Ok(storefront.with_storefront(|s| WishlistResponse {
        ids: s.wishlist().ids().to_vec(),
        products: catalog::saved(&products, s.wishlist()).into_iter().cloned().collect(),
    }))
}

pub async fn toggle_wishlist(db: &DbState, storefront: &StorefrontState, product_id: &str) -> ApiResult<ToggleResponse> {
    debug!(product_id = %product_id, "toggle_wishlist command");

    let product = require_product(db, product_id).await?;
    Ok(storefront.with_storefront_mut(|s| ToggleResponse {
        saved: s.toggle_wishlist(&product),
        ids: s.wishlist().ids().to_vec(),
        product_id: product.id.clone(),
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::fixtures;
    use crate::error::ErrorCode;

    #[tokio::test]
    async fn test_toggle_and_list() {
        let app = fixtures::app().await;

        assert!(toggle_wishlist(&app.db, &app.storefront, "6").await.unwrap().saved);
        let toggled = toggle_wishlist(&app.db, &app.storefront, "2").await.unwrap();
        assert!(toggled.saved);
        assert_eq!(toggled.ids, ["6", "2"]);

        let wishlist = get_wishlist(&app.db, &app.storefront).await.unwrap();
        assert_eq!(wishlist.ids, ["6", "2"]);
        let product_ids: Vec<&str> = wishlist.products.iter().map(|p| p.id.as_str()).collect();
        assert_eq!(product_ids, ["2", "6"]);

        let toggled = toggle_wishlist(&app.db, &app.storefront, "6").await.unwrap();
        assert!(!toggled.saved);
        assert_eq!(toggled.ids, ["2"]);
    }

    #[tokio::test]
    async fn test_unknown_product_is_not_saved() {
        let app = fixtures::app().await;

        let err = toggle_wishlist(&app.db, &app.storefront, "404").await.unwrap_err();
        assert_eq!(err.code, ErrorCode::NotFound);
        assert!(get_wishlist(&app.db, &app.storefront).await.unwrap().ids.is_empty());
    }

    #[tokio::test]
    async fn test_withdrawn_products_drop_off_the_page() {
        let app = fixtures::app().await;
        toggle_wishlist(&app.db, &app.storefront, "5").await.unwrap();
        app.db.get().products().deactivate("5").await.unwrap();

        let wishlist = get_wishlist(&app.db, &app.storefront).await.unwrap();
        assert_eq!(wishlist.ids, ["5"]);
        assert!(wishlist.products.is_empty());
    }
}
