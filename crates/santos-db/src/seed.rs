//! # House Catalog
//!
//! The six products the storefront ships with, and the routine that
//! installs them. Used by the `seed` binary and by tests.

use std::collections::BTreeMap;

use tracing::info;

use crate::error::DbResult;
use crate::pool::Database;
use santos_core::{Money, Product, ProductDetails};

fn strings(values: &[&str]) -> Vec<String> {
    values.iter().map(|v| v.to_string()).collect()
}

fn details(fabric: &str, model_stats: &str, styling_tips: &str) -> Option<ProductDetails> {
    Some(ProductDetails {
        fabric: fabric.to_string(),
        model_stats: model_stats.to_string(),
        styling_tips: styling_tips.to_string(),
    })
}

/// The house catalog in featured order.
pub fn house_catalog() -> Vec<Product> {
    vec![
        Product {
            id: "1".into(),
            name: "Amethyst Silk Evening Gown".into(),
            price: Money::from_major(895),
            category: "Dresses".into(),
            image: String::new(),
            hover_image: String::new(),
            description: "A stunning floor-length gown crafted from 100% mulberry silk in our signature deep amethyst hue. Designed to catch the light with every movement.".into(),
            sizes: strings(&["XS", "S", "M", "L"]),
            colors: strings(&["Amethyst", "Midnight"]),
            is_new: true,
            color_images: None,
            details: details(
                "100% Mulberry Silk, 22mm weight",
                "Height: 5'10\" | Wearing Size S",
                "Pair with silver statement earrings and minimal heels.",
            ),
            reviews: Some(Vec::new()),
        },
        Product {
            id: "2".into(),
            name: "Lavender Wool Trench".into(),
            price: Money::from_major(450),
            category: "Outerwear".into(),
            image: String::new(),
            hover_image: String::new(),
            description: "Italian wool blend trench coat featuring a double-breasted closure and silk lining. A modern take on a classic silhouette.".into(),
            sizes: strings(&["S", "M", "L", "XL"]),
            colors: strings(&["Lavender", "Camel"]),
            is_new: true,
            color_images: Some(BTreeMap::new()),
            details: details(
                "80% Virgin Wool, 20% Cashmere",
                "Height: 5'9\" | Wearing Size M",
                "Layer over a monochrome outfit for effortless chic.",
            ),
            reviews: None,
        },
        Product {
            id: "3".into(),
            name: "Midnight Velvet Blazer".into(),
            price: Money::from_major(320),
            category: "Outerwear".into(),
            image: String::new(),
            hover_image: String::new(),
            description: "Structured velvet blazer perfect for evening events. Features gold-plated buttons and a tailored fit.".into(),
            sizes: strings(&["XS", "S", "M", "L"]),
            colors: strings(&["Midnight", "Plum"]),
            is_new: false,
            color_images: Some(BTreeMap::new()),
            details: details(
                "100% Cotton Velvet",
                "Height: 5'11\" | Wearing Size S",
                "Wear as a suit or separate with tailored trousers.",
            ),
            reviews: None,
        },
        Product {
            id: "4".into(),
            name: "Violet Cashmere Sweater".into(),
            price: Money::from_major(280),
            category: "Tops".into(),
            image: String::new(),
            hover_image: String::new(),
            description: String::new(),
            sizes: strings(&["S", "M", "L"]),
            colors: strings(&["Violet", "Cream"]),
            is_new: false,
            color_images: Some(BTreeMap::new()),
            details: details(
                "100% Mongolian Cashmere",
                "Height: 5'8\" | Wearing Size M",
                "Tuck into high-waisted silk trousers.",
            ),
            reviews: None,
        },
        Product {
            id: "5".into(),
            name: "Crystal Embellished Clutch".into(),
            price: Money::from_major(550),
            category: "Accessories".into(),
            image: "https://images.unsplash.com/photo-1584917865442-de89df76afd3?q=80&w=1935&auto=format&fit=crop".into(),
            hover_image: "https://images.unsplash.com/photo-1566150905458-1bf1fc113f0d?q=80&w=2071&auto=format&fit=crop".into(),
            description: "Hand-beaded clutch bag with amethyst crystals and a detachable gold chain.".into(),
            sizes: strings(&["One Size"]),
            colors: strings(&["Silver", "Gold"]),
            is_new: false,
            color_images: Some(BTreeMap::new()),
            details: details(
                "Satin lining, Swarovski Crystals",
                "N/A",
                "The perfect finish for any gala ensemble.",
            ),
            reviews: None,
        },
        Product {
            id: "6".into(),
            name: "Lilac Chiffon Midi".into(),
            price: Money::from_major(395),
            category: "Dresses".into(),
            image: "https://images.unsplash.com/photo-1572804013309-59a88b7e92f1?q=80&w=1946&auto=format&fit=crop".into(),
            hover_image: "https://images.unsplash.com/photo-1595777457583-95e059d581b8?q=80&w=1983&auto=format&fit=crop".into(),
            description: "Flowy chiffon midi dress with delicate floral embroidery. Romantic and effortless.".into(),
            sizes: strings(&["XS", "S", "M", "L"]),
            colors: strings(&["Lilac"]),
            is_new: true,
            color_images: Some(BTreeMap::from([(
                "Lilac".to_string(),
                "https://images.unsplash.com/photo-1572804013309-59a88b7e92f1?q=80&w=1946&auto=format&fit=crop".to_string(),
            )])),
            details: details(
                "100% Silk Chiffon",
                "Height: 5'9\" | Wearing Size S",
                "Wear with strappy sandals for a garden party.",
            ),
            reviews: None,
        },
    ]
}

/// Installs (or refreshes) the house catalog. Returns the number of
/// products written.
pub async fn install_house_catalog(db: &Database) -> DbResult<usize> {
    let catalog = house_catalog();
    let products = db.products();

    for (position, product) in catalog.iter().enumerate() {
        products.upsert(product, position as i64).await?;
    }

    info!(count = catalog.len(), "House catalog installed");
    Ok(catalog.len())
}
