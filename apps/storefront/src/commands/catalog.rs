//! # Catalog Commands
//!
//! Shop page listing, product page and the search overlay.
//!
//! ```text
//! Shop page ─────► list_products(filter) ──► catalog::filter over list_active()
//! Product page ──► get_product(id) ───────► also records the view
//! Search bar ────► search_products(q) ────► catalog::search over list_active()
//! ```

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use tracing::debug;

use santos_core::validation::validate_search_query;
use santos_core::{catalog, Product, ProductFilter};

use super::require_product;
use crate::error::ApiResult;
use crate::state::{DbState, StorefrontState};

/// Default cap on search results.
pub const DEFAULT_SEARCH_LIMIT: u32 = 20;

/// The product page: the product plus the shopper's state for it.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductPage {
    pub product: Product,
    pub saved: bool,
    pub average_rating: Option<f32>,
    /// Image to show for each of the product's colors.
    pub images_by_color: BTreeMap<String, String>,
}

/// Lists the catalog through the shop page filter.
///
/// No filter means every product in featured order.
pub async fn list_products(db: &DbState, filter: Option<ProductFilter>) -> ApiResult<Vec<Product>> {
    let filter = filter.unwrap_or_default();
    debug!(category = %filter.category, sort = ?filter.sort, "list_products command");

    let products = db.get().products().list_active().await?;
    Ok(catalog::filter(&products, &filter).into_iter().cloned().collect())
}

/// Category selector values, starting with "All".
pub async fn list_categories(db: &DbState) -> ApiResult<Vec<String>> {
    debug!("list_categories command");
    let products = db.get().products().list_active().await?;
    Ok(catalog::categories(&products))
}

/// Opens a product page and records the view in the history bar.
pub async fn get_product(db: &DbState, storefront: &StorefrontState, product_id: &str) -> ApiResult<ProductPage> {
    debug!(product_id = %product_id, "get_product command");

    let product = require_product(db, product_id).await?;
    let saved = storefront.with_storefront_mut(|s| {
        s.record_viewed(&product);
        s.wishlist().contains(&product.id)
    });

    let images_by_color = product
        .colors
        .iter()
        .map(|color| (color.clone(), product.image_for_color(color).to_string()))
        .collect();

    Ok(ProductPage {
        average_rating: product.average_rating(),
        saved,
        images_by_color,
        product,
    })
}

/// Searches names and categories. A blank query returns nothing.
pub async fn search_products(db: &DbState, query: &str, limit: Option<u32>) -> ApiResult<Vec<Product>> {
    let query = validate_search_query(query)?;
    let limit = limit.unwrap_or(DEFAULT_SEARCH_LIMIT);
    debug!(query = %query, limit, "search_products command");

    let products = db.get().products().list_active().await?;
    Ok(catalog::search(&products, &query)
        .into_iter()
        .take(limit as usize)
        .cloned()
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::fixtures;
    use crate::error::ErrorCode;
    use santos_core::{Money, SortOption};

    fn ids(products: &[Product]) -> Vec<&str> {
        products.iter().map(|p| p.id.as_str()).collect()
    }

    #[tokio::test]
    async fn test_list_products_with_filter() {
        let app = fixtures::app().await;

        let all = list_products(&app.db, None).await.unwrap();
        assert_eq!(ids(&all), ["1", "2", "3", "4", "5", "6"]);

        let dresses = list_products(
            &app.db,
            Some(ProductFilter {
                category: "Dresses".into(),
                sort: SortOption::PriceAsc,
                ..ProductFilter::default()
            }),
        )
        .await
        .unwrap();
        assert_eq!(ids(&dresses), ["6", "1"]);

        let under_300 = list_products(
            &app.db,
            Some(ProductFilter {
                max_price: Money::from_major(300),
                ..ProductFilter::default()
            }),
        )
        .await
        .unwrap();
        assert_eq!(ids(&under_300), ["4"]);
    }

    #[tokio::test]
    async fn test_list_categories() {
        let app = fixtures::app().await;
        assert_eq!(
            list_categories(&app.db).await.unwrap(),
            ["All", "Dresses", "Outerwear", "Tops", "Accessories"]
        );
    }

    #[tokio::test]
    async fn test_get_product_records_view() {
        let app = fixtures::app().await;

        let page = get_product(&app.db, &app.storefront, "3").await.unwrap();
        assert_eq!(page.product.name, "Midnight Velvet Blazer");
        assert!(!page.saved);

        get_product(&app.db, &app.storefront, "1").await.unwrap();
        get_product(&app.db, &app.storefront, "3").await.unwrap();

        let history = app.storefront.with_storefront(|s| {
            s.history().ids().into_iter().map(String::from).collect::<Vec<_>>()
        });
        assert_eq!(history, ["3", "1"]);
    }

    #[tokio::test]
    async fn test_get_unknown_product() {
        let app = fixtures::app().await;
        let err = get_product(&app.db, &app.storefront, "99").await.unwrap_err();
        assert_eq!(err.code, ErrorCode::NotFound);
        assert!(app.storefront.with_storefront(|s| s.history().is_empty()));
    }

    fn scarf() -> Product {
        Product {
            id: "7".into(),
            name: "Écharpe en Soie".into(),
            price: Money::from_major(180),
            category: "Accessories".into(),
            image: "scarf.jpg".into(),
            hover_image: "scarf-hover.jpg".into(),
            description: "Hand-rolled silk twill.".into(),
            sizes: vec!["One Size".into()],
            colors: vec!["Ivoire".into(), "Lilas".into()],
            is_new: true,
            color_images: Some(BTreeMap::from([("Ivoire".to_string(), "scarf-ivoire.jpg".to_string())])),
            details: None,
            reviews: None,
        }
    }

    #[tokio::test]
    async fn test_search_folds_non_ascii_case() {
        let app = fixtures::app().await;
        app.db.get().products().upsert(&scarf(), 6).await.unwrap();

        assert_eq!(ids(&search_products(&app.db, "écharpe", None).await.unwrap()), ["7"]);
        assert_eq!(ids(&search_products(&app.db, "ÉCHARPE", None).await.unwrap()), ["7"]);
        assert_eq!(ids(&search_products(&app.db, "ACCESS", Some(1)).await.unwrap()), ["5"]);
    }

    #[tokio::test]
    async fn test_product_page_images_by_color() {
        let app = fixtures::app().await;
        app.db.get().products().upsert(&scarf(), 6).await.unwrap();

        let page = get_product(&app.db, &app.storefront, "7").await.unwrap();
        assert_eq!(page.images_by_color.len(), 2);
        assert_eq!(page.images_by_color["Ivoire"], "scarf-ivoire.jpg");
        assert_eq!(page.images_by_color["Lilas"], "scarf.jpg");
    }

    #[tokio::test]
    async fn test_search_products() {
        let app = fixtures::app().await;

        assert_eq!(ids(&search_products(&app.db, "chiffon", None).await.unwrap()), ["6"]);
        assert_eq!(ids(&search_products(&app.db, " DRESSES ", None).await.unwrap()), ["1", "6"]);
        assert!(search_products(&app.db, "", None).await.unwrap().is_empty());

        let err = search_products(&app.db, &"x".repeat(101), None).await.unwrap_err();
        assert_eq!(err.code, ErrorCode::ValidationError);
    }
}
