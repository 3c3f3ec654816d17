//! # Product Repository
//!
//! Reads and writes the house catalog.
//!
//! ## Row Mapping
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  products row                         santos_core::Product              │
//! │                                                                         │
//! │  price_cents   INTEGER   ──────────►  price: Money                      │
//! │  sizes         '["XS","S"]' ───────►  sizes: Vec<String>                │
//! │  colors        '["Lilac"]'  ───────►  colors: Vec<String>               │
//! │  color_images  JSON or NULL ───────►  Option<BTreeMap<..>>              │
//! │  details       JSON or NULL ───────►  Option<ProductDetails>            │
//! │  reviews       JSON or NULL ───────►  Option<Vec<Review>>               │
//! │  sort_order    INTEGER   ──────────►  position in list_active()         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Catalog order (`sort_order`, then id) is the "Featured" order on the
//! shop page, so every listing query uses it.

use chrono::Utc;
use serde::de::DeserializeOwned;
use sqlx::{FromRow, SqlitePool};
use tracing::debug;

use crate::error::DbResult;
use santos_core::{Money, Product};

const PRODUCT_COLUMNS: &str = "id, name, price_cents, category, image, hover_image, description, \
     sizes, colors, is_new, color_images, details, reviews";

/// A `products` row before its JSON columns are decoded.
#[derive(Debug, FromRow)]
struct ProductRow {
    id: String,
    name: String,
    price_cents: i64,
    category: String,
    image: String,
    hover_image: String,
    description: String,
    sizes: String,
    colors: String,
    is_new: bool,
    color_images: Option<String>,
    details: Option<String>,
    reviews: Option<String>,
}

impl ProductRow {
    fn into_product(self) -> DbResult<Product> {
        Ok(Product {
            id: self.id,
            name: self.name,
            price: Money::from_cents(self.price_cents),
            category: self.category,
            image: self.image,
            hover_image: self.hover_image,
            description: self.description,
            sizes: serde_json::from_str(&self.sizes)?,
            colors: serde_json::from_str(&self.colors)?,
            is_new: self.is_new,
            color_images: decode_optional(self.color_images)?,
            details: decode_optional(self.details)?,
            reviews: decode_optional(self.reviews)?,
        })
    }
}

fn decode_optional<T: DeserializeOwned>(column: Option<String>) -> DbResult<Option<T>> {
    column
        .map(|json| serde_json::from_str(&json))
        .transpose()
        .map_err(Into::into)
}

fn encode_optional<T: serde::Serialize>(value: Option<&T>) -> DbResult<Option<String>> {
    value
        .map(serde_json::to_string)
        .transpose()
        .map_err(Into::into)
}

/// Repository for catalog operations.
///
/// ## Usage
/// ```rust,ignore
/// let repo = db.products();
/// let all = repo.list_active().await?;
/// let gown = repo.get_by_id("1").await?;
/// ```
#[derive(Debug, Clone)]
pub struct ProductRepository {
    pool: SqlitePool,
}

impl ProductRepository {
    pub fn new(pool: SqlitePool) -> Self {
        ProductRepository { pool }
    }

    /// Every active product in catalog order.
    pub async fn list_active(&self) -> DbResult<Vec<Product>> {
        let sql = format!(
            "SELECT {} FROM products WHERE is_active = 1 ORDER BY sort_order, id",
            PRODUCT_COLUMNS
        );
        let rows: Vec<ProductRow> = sqlx::query_as(&sql).fetch_all(&self.pool).await?;

        rows.into_iter().map(ProductRow::into_product).collect()
    }

    /// Gets an active product by id.
    ///
    /// ## Returns
    /// * `Ok(Some(Product))` - Product found
    /// * `Ok(None)` - No such product, or it was withdrawn
    pub async fn get_by_id(&self, id: &str) -> DbResult<Option<Product>> {
        let sql = format!(
            "SELECT {} FROM products WHERE id = ?1 AND is_active = 1",
            PRODUCT_COLUMNS
        );
        let row: Option<ProductRow> = sqlx::query_as(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        row.map(ProductRow::into_product).transpose()
    }

    /// Inserts a product, or replaces it if the id already exists.
    ///
    /// `sort_order` is the product's position in catalog order.
    pub async fn upsert(&self, product: &Product, sort_order: i64) -> DbResult<()> {
        let now = Utc::now().to_rfc3339();

        sqlx::query(
            r#"
            INSERT INTO products (
                id, name, price_cents, category, image, hover_image, description,
                sizes, colors, is_new, color_images, details, reviews,
                sort_order, is_active, created_at, updated_at
            ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12, ?13, ?14, 1, ?15, ?15)
            ON CONFLICT(id) DO UPDATE SET
                name = excluded.name,
                price_cents = excluded.price_cents,
                category = excluded.category,
                image = excluded.image,
                hover_image = excluded.hover_image,
                description = excluded.description,
                sizes = excluded.sizes,
                colors = excluded.colors,
                is_new = excluded.is_new,
                color_images = excluded.color_images,
                details = excluded.details,
                reviews = excluded.reviews,
                sort_order = excluded.sort_order,
                is_active = 1,
                updated_at = excluded.updated_at
            "#,
        )
        .bind(&product.id)
        .bind(&product.name)
        .bind(product.price.cents())
        .bind(&product.category)
        .bind(&product.image)
        .bind(&product.hover_image)
        .bind(&product.description)
        .bind(serde_json::to_string(&product.sizes)?)
        .bind(serde_json::to_string(&product.colors)?)
        .bind(product.is_new)
        .bind(encode_optional(product.color_images.as_ref())?)
        .bind(encode_optional(product.details.as_ref())?)
        .bind(encode_optional(product.reviews.as_ref())?)
        .bind(sort_order)
        .bind(&now)
        .execute(&self.pool)
        .await?;

        debug!(id = %product.id, "Upserted product");
        Ok(())
    }

    /// Hides a product from every listing. Returns false if it was unknown.
    pub async fn deactivate(&self, id: &str) -> DbResult<bool> {
        let result = sqlx::query("UPDATE products SET is_active = 0, updated_at = ?2 WHERE id = ?1")
            .bind(id)
            .bind(Utc::now().to_rfc3339())
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }

    /// Counts active products.
    pub async fn count(&self) -> DbResult<i64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM products WHERE is_active = 1")
            .fetch_one(&self.pool)
            .await?;

        Ok(count)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pool::{Database, DbConfig};
    use santos_core::{ProductDetails, Review};
    use std::collections::BTreeMap;

    fn product(id: &str, name: &str, price: i64, category: &str) -> Product {
        Product {
            id: id.to_string(),
            name: name.to_string(),
            price: Money::from_major(price),
            category: category.to_string(),
            image: String::new(),
            hover_image: String::new(),
            description: String::new(),
            sizes: vec!["S".to_string(), "M".to_string()],
            colors: vec!["Lilac".to_string()],
            is_new: false,
            color_images: None,
            details: None,
            reviews: None,
        }
    }

    async fn repo() -> ProductRepository {
        Database::connect(DbConfig::in_memory()).await.unwrap().products()
    }

    #[tokio::test]
    async fn test_list_active_uses_sort_order() {
        let repo = repo().await;
        repo.upsert(&product("2", "Lavender Wool Trench", 450, "Outerwear"), 1).await.unwrap();
        repo.upsert(&product("1", "Amethyst Silk Evening Gown", 895, "Dresses"), 0).await.unwrap();
        repo.upsert(&product("6", "Lilac Chiffon Midi", 395, "Dresses"), 5).await.unwrap();

        let ids: Vec<String> = repo.list_active().await.unwrap().into_iter().map(|p| p.id).collect();
        assert_eq!(ids, ["1", "2", "6"]);
        assert_eq!(repo.count().await.unwrap(), 3);
    }

    #[tokio::test]
    async fn test_optional_fields_survive_storage() {
        let repo = repo().await;
        let mut gown = product("1", "Amethyst Silk Evening Gown", 895, "Dresses");
        gown.is_new = true;
        gown.color_images = Some(BTreeMap::from([(
            "Lilac".to_string(),
            "https://img.example/lilac.jpg".to_string(),
        )]));
        gown.details = Some(ProductDetails {
            fabric: "100% Mulberry Silk".to_string(),
            model_stats: "Height: 5'10\"".to_string(),
            styling_tips: "Minimal heels.".to_string(),
        });
        gown.reviews = Some(vec![Review {
            id: "r-1-1".to_string(),
            user_name: "Isabella V.".to_string(),
            rating: 5,
            date: "October 12, 2023".to_string(),
            title: "Absolutely stunning".to_string(),
            text: "Drapes perfectly.".to_string(),
            verified: true,
        }]);
        repo.upsert(&gown, 0).await.unwrap();

        let stored = repo.get_by_id("1").await.unwrap().unwrap();
        assert_eq!(stored, gown);

        let plain = product("2", "Lavender Wool Trench", 450, "Outerwear");
        repo.upsert(&plain, 1).await.unwrap();
        assert_eq!(repo.get_by_id("2").await.unwrap().unwrap(), plain);
    }

    #[tokio::test]
    async fn test_upsert_replaces_existing() {
        let repo = repo().await;
        repo.upsert(&product("3", "Midnight Velvet Blazer", 320, "Outerwear"), 2).await.unwrap();
        repo.upsert(&product("3", "Midnight Velvet Blazer", 340, "Outerwear"), 2).await.unwrap();

        let blazer = repo.get_by_id("3").await.unwrap().unwrap();
        assert_eq!(blazer.price, Money::from_major(340));
        assert_eq!(repo.count().await.unwrap(), 1);
    }

    #[tokio::test]
    async fn test_deactivated_products_are_hidden() {
        let repo = repo().await;
        repo.upsert(&product("4", "Violet Cashmere Sweater", 280, "Tops"), 3).await.unwrap();

        assert!(repo.deactivate("4").await.unwrap());
        assert!(!repo.deactivate("404").await.unwrap());

        assert!(repo.get_by_id("4").await.unwrap().is_none());
        assert!(repo.list_active().await.unwrap().is_empty());
        assert_eq!(repo.count().await.unwrap(), 0);
    }
}
