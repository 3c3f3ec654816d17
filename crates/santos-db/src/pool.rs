//! # Database Handle
//!
//! Opens the SQLite database behind the catalog and accounts.
//!
//! ```text
//!   DbConfig::file("santos.db")        DbConfig::in_memory()
//!              │                                │
//!              └───────────► Database::connect ◄┘
//!                                  │
//!                     pool + pending migrations
//!                                  │
//!                  ┌───────────────┴───────────────┐
//!                  ▼                               ▼
//!            db.products()                   db.accounts()
//!       shop page, search, seed         register, sign in
//! ```
//!
//! File databases run in WAL mode, so catalog reads never queue behind an
//! account insert. An in-memory database lives on a single connection and
//! disappears with the pool.

use std::path::{Path, PathBuf};
use std::str::FromStr;
use std::time::Duration;

use sqlx::sqlite::{SqliteConnectOptions, SqliteJournalMode, SqlitePoolOptions, SqliteSynchronous};
use sqlx::SqlitePool;
use tracing::{debug, info};

use crate::error::{DbError, DbResult};
use crate::migrations::{self, MigrationStatus};
use crate::repository::account::AccountRepository;
use crate::repository::product::ProductRepository;

// =============================================================================
// Configuration
// =============================================================================

/// Where the database lives.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DbLocation {
    /// A database file, created on first use.
    File(PathBuf),
    /// A private in-memory database (tests, ephemeral sessions).
    Memory,
}

/// How to open the storefront database.
///
/// ```rust,ignore
/// let config = DbConfig::file(data_dir.join("santos.db")).pool_size(2);
/// let db = Database::connect(config).await?;
/// ```
#[derive(Debug, Clone)]
pub struct DbConfig {
    pub location: DbLocation,

    /// Connections in the pool. Forced to 1 for `Memory`.
    pub pool_size: u32,

    /// How long a query waits for a free connection.
    pub acquire_timeout: Duration,

    /// Apply pending migrations while connecting.
    pub migrate: bool,
}

impl DbConfig {
    pub fn file(path: impl Into<PathBuf>) -> Self {
        DbConfig {
            location: DbLocation::File(path.into()),
            pool_size: 4,
            acquire_timeout: Duration::from_secs(10),
            migrate: true,
        }
    }

    pub fn in_memory() -> Self {
        DbConfig {
            location: DbLocation::Memory,
            pool_size: 1,
            acquire_timeout: Duration::from_secs(5),
            migrate: true,
        }
    }

    pub fn pool_size(mut self, size: u32) -> Self {
        self.pool_size = size.max(1);
        self
    }

    pub fn migrate(mut self, migrate: bool) -> Self {
        self.migrate = migrate;
        self
    }

    fn connect_options(&self) -> DbResult<SqliteConnectOptions> {
        let options = match &self.location {
            DbLocation::File(path) => SqliteConnectOptions::new()
                .filename(path)
                .create_if_missing(true)
                .journal_mode(SqliteJournalMode::Wal)
                .synchronous(SqliteSynchronous::Normal),
            DbLocation::Memory => SqliteConnectOptions::from_str("sqlite::memory:")
                .map_err(|e| DbError::Connect(e.to_string()))?,
        };
        Ok(options.foreign_keys(true))
    }

    fn effective_pool_size(&self) -> u32 {
        match self.location {
            // Every in-memory connection would be a separate, empty database.
            DbLocation::Memory => 1,
            DbLocation::File(_) => self.pool_size,
        }
    }
}

// =============================================================================
// Database
// =============================================================================

/// Shared database handle. Clones share one pool.
#[derive(Debug, Clone)]
pub struct Database {
    pool: SqlitePool,
}

impl Database {
    /// Opens the pool and brings the schema up to date.
    pub async fn connect(config: DbConfig) -> DbResult<Self> {
        match &config.location {
            DbLocation::File(path) => {
                ensure_parent_dir(path)?;
                info!(path = %path.display(), "Opening storefront database");
            }
            DbLocation::Memory => debug!("Opening in-memory storefront database"),
        }

        let mut options = SqlitePoolOptions::new()
            .max_connections(config.effective_pool_size())
            .acquire_timeout(config.acquire_timeout);
        if config.location == DbLocation::Memory {
            // Recycling the only connection would drop the database with it.
            options = options.idle_timeout(None).max_lifetime(None);
        }

        let pool = options
            .connect_with(config.connect_options()?)
            .await
            .map_err(|e| DbError::Connect(e.to_string()))?;

        let db = Database { pool };
        if config.migrate {
            migrations::run_migrations(&db.pool).await?;
        }

        Ok(db)
    }

    /// Known and applied migration counts.
    pub async fn migration_status(&self) -> DbResult<MigrationStatus> {
        migrations::migration_status(&self.pool).await
    }

    pub fn products(&self) -> ProductRepository {
        ProductRepository::new(self.pool.clone())
    }

    pub fn accounts(&self) -> AccountRepository {
        AccountRepository::new(self.pool.clone())
    }

    /// True while the database answers queries.
    pub async fn ping(&self) -> bool {
        sqlx::query("SELECT 1").execute(&self.pool).await.is_ok()
    }

    /// Closes every connection. Later queries fail.
    pub async fn close(&self) {
        self.pool.close().await;
        info!("Storefront database closed");
    }
}

fn ensure_parent_dir(path: &Path) -> DbResult<()> {
    match path.parent() {
        Some(dir) if !dir.as_os_str().is_empty() => Ok(std::fs::create_dir_all(dir)?),
        _ => Ok(()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_in_memory_is_migrated() {
        let db = Database::connect(DbConfig::in_memory()).await.unwrap();
        assert!(db.ping().await);

        let status = db.migration_status().await.unwrap();
        assert_eq!(status.known, 2);
        assert!(status.is_current());
    }

    #[tokio::test]
    async fn test_file_database_survives_reconnect() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("santos.db");

        let db = Database::connect(DbConfig::file(&path)).await.unwrap();
        db.accounts().insert("Sophia", "sophia@santos.studio", "h").await.unwrap();
        db.close().await;
        assert!(!db.ping().await);

        let reopened = Database::connect(DbConfig::file(&path)).await.unwrap();
        assert!(reopened
            .accounts()
            .find_by_email("sophia@santos.studio")
            .await
            .unwrap()
            .is_some());
    }

    #[tokio::test]
    async fn test_skip_migrations() {
        let db = Database::connect(DbConfig::in_memory().migrate(false)).await.unwrap();
        assert!(db.products().count().await.is_err());
    }

    #[test]
    fn test_memory_pool_is_single_connection() {
        let config = DbConfig::in_memory().pool_size(8);
        assert_eq!(config.effective_pool_size(), 1);
        assert_eq!(DbConfig::file("santos.db").pool_size(0).effective_pool_size(), 1);
    }
}
