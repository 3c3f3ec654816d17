//! # santos-db: Storage Layer for the Santos Storefront
//!
//! Everything the storefront keeps on disk.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Santos Storefront Data Flow                        │
//! │                                                                         │
//! │  Storefront command (toggle_wishlist, list_products, sign_in)          │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                    santos-db (THIS CRATE)                       │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────────┐   ┌───────────────┐   ┌──────────────┐     │   │
//! │  │   │ KeyValueStore │   │   Database    │   │  Migrations  │     │   │
//! │  │   │  (store.rs)   │   │   (pool.rs)   │   │  (embedded)  │     │   │
//! │  │   │               │   │               │   │              │     │   │
//! │  │   │ FileStore     │   │ ProductRepo   │   │ 001_catalog  │     │   │
//! │  │   │ MemoryStore   │   │ AccountRepo   │   │ 002_accounts │     │   │
//! │  │   └───────┬───────┘   └───────┬───────┘   └──────────────┘     │   │
//! │  └───────────┼───────────────────┼─────────────────────────────────┘   │
//! │              ▼                   ▼                                      │
//! │     santos_wishlist.json     santos.db (SQLite)                        │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Module Organization
//!
//! - [`store`] - Key-value store for the wishlist
//! - [`pool`] - Connection pool creation and configuration
//! - [`migrations`] - Embedded database migrations
//! - [`repository`] - Product and account repositories
//! - [`seed`] - The house catalog
//! - [`error`] - Storage error types
//!
//! ## Usage
//!
//! ```rust,ignore
//! use santos_db::{Database, DbConfig, FileStore, KeyValueStore};
//!
//! let db = Database::connect(DbConfig::file("santos.db")).await?;
//! let products = db.products().list_active().await?;
//!
//! let store = FileStore::open("./data")?;
//! let saved = store.get("santos_wishlist")?;
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod error;
pub mod migrations;
pub mod pool;
pub mod repository;
pub mod seed;
pub mod store;

// =============================================================================
// Re-exports
// =============================================================================

pub use error::{DbError, DbResult};
pub use migrations::MigrationStatus;
pub use pool::{Database, DbConfig, DbLocation};
pub use store::{FileStore, KeyValueStore, MemoryStore};

pub use repository::account::{Account, AccountRepository};
pub use repository::product::ProductRepository;
