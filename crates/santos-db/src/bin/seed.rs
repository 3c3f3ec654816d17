//! # Catalog Seeder
//!
//! Writes the house catalog into a storefront database file.
//!
//! ```bash
//! cargo run -p santos-db --bin seed -- ./data/santos.db
//! cargo run -p santos-db --bin seed -- ./data/santos.db --list
//! ```
//!
//! Products are upserted by id, so a second run refreshes rather than
//! duplicates.

use std::path::PathBuf;

use santos_db::seed::install_house_catalog;
use santos_db::{Database, DbConfig};
use tracing_subscriber::EnvFilter;

const USAGE: &str = "usage: seed [DB_PATH] [--list]\n\n  DB_PATH   database file (default: ./santos-data/santos.db)\n  --list    print the catalog after seeding";

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info,sqlx=warn")))
        .with_writer(std::io::stderr)
        .init();

    let mut db_path = PathBuf::from("./santos-data/santos.db");
    let mut list = false;

    for arg in std::env::args().skip(1) {
        match arg.as_str() {
            "--list" | "-l" => list = true,
            "--help" | "-h" => {
                println!("{}", USAGE);
                return Ok(());
            }
            flag if flag.starts_with('-') => {
                eprintln!("unknown option {}\n\n{}", flag, USAGE);
                std::process::exit(2);
            }
            path => db_path = PathBuf::from(path),
        }
    }

    let db = Database::connect(DbConfig::file(&db_path)).await?;
    let installed = install_house_catalog(&db).await?;
    println!("{} products written to {}", installed, db_path.display());

    if list {
        for product in db.products().list_active().await? {
            let badge = if product.is_new { " (new)" } else { "" };
            println!("  {:>2}  {:<30} {:<12} {}{}", product.id, product.name, product.category, product.price, badge);
        }
    }

    db.close().await;
    Ok(())
}
