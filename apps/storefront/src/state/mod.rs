//! # State Module
//!
//! Application state for the storefront, split into focused state types.
//! Each command takes only the handles it needs.
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    State Architecture                                   │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                         AppState                                │   │
//! │  │  built once by AppState::open(config) at startup                │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! │                              │                                          │
//! │     ┌───────────────┬────────┴──────┬───────────────┬──────────────┐   │
//! │     ▼               ▼               ▼               ▼              ▼   │
//! │  ┌────────┐  ┌──────────────┐  ┌───────────┐  ┌──────────┐  ┌────────┐ │
//! │  │DbState │  │StorefrontSt. │  │Checkout   │  │Session   │  │Config  │ │
//! │  │        │  │              │  │State      │  │State     │  │State   │ │
//! │  │SQLite  │  │Arc<Mutex<    │  │Arc<Mutex< │  │Arc<Mutex<│  │read    │ │
//! │  │pool    │  │ Storefront>> │  │ Checkout>>│  │ Option<  │  │only    │ │
//! │  │        │  │ cart         │  │           │  │  User>>> │  │        │ │
//! │  │        │  │ wishlist ──► santos_wishlist │  │          │  │        │ │
//! │  │        │  │ history      │  │           │  │          │  │        │ │
//! │  └────────┘  └──────────────┘  └───────────┘  └──────────┘  └────────┘ │
//! │                                                                         │
//! │  Locks are taken inside a closure and released before any .await.     │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

mod checkout;
mod config;
mod db;
mod session;
mod storefront;

use std::sync::Arc;

use tracing::info;

pub use checkout::CheckoutState;
pub use config::{ConfigError, ConfigState, DEFAULT_CHECKOUT_DELAY_MS};
pub use db::DbState;
pub use session::SessionState;
pub use storefront::{SharedStore, Storefront, StorefrontState};

use santos_db::seed::install_house_catalog;
use santos_db::{Database, DbConfig, DbResult, FileStore, MemoryStore};

/// Every state handle the commands draw from.
#[derive(Debug, Clone)]
pub struct AppState {
    pub db: DbState,
    pub storefront: StorefrontState,
    pub checkout: CheckoutState,
    pub session: SessionState,
    pub config: ConfigState,
}

impl AppState {
    /// Opens the on-disk wishlist store and catalog database.
    ///
    /// ## Startup Sequence
    /// 1. Open the data directory (created if missing)
    /// 2. Connect to SQLite and run migrations
    /// 3. Install the house catalog if the catalog is empty
    /// 4. Restore the saved wishlist
    pub async fn open(config: ConfigState) -> DbResult<Self> {
        let store = FileStore::open(&config.data_dir)?;
        info!(dir = %config.data_dir.display(), "Wishlist store opened");

        let db = Database::connect(DbConfig::file(&config.database_path)).await?;
        AppState::assemble(db, Arc::new(store), config).await
    }

    /// In-memory storage throughout. Nothing survives the process.
    pub async fn ephemeral(config: ConfigState) -> DbResult<Self> {
        let db = Database::connect(DbConfig::in_memory()).await?;
        AppState::assemble(db, Arc::new(MemoryStore::new()), config).await
    }

    async fn assemble(db: Database, store: SharedStore, config: ConfigState) -> DbResult<Self> {
        if db.products().count().await? == 0 {
            info!("Catalog is empty; installing the house catalog");
            install_house_catalog(&db).await?;
        }

        Ok(AppState {
            db: DbState::new(db),
            storefront: StorefrontState::load(store),
            checkout: CheckoutState::new(),
            session: SessionState::new(),
            config,
        })
    }
}
