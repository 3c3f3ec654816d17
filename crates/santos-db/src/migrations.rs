//! # Schema Migrations
//!
//! ```text
//! migrations/
//! ├── 001_catalog.sql    products
//! └── 002_accounts.sql   accounts
//! ```
//!
//! Files are embedded at compile time and tracked in `_sqlx_migrations`.
//! An applied file is never edited; changes go in the next number.

use sqlx::SqlitePool;
use tracing::info;

use crate::error::DbResult;

static MIGRATOR: sqlx::migrate::Migrator = sqlx::migrate!("./migrations");

/// Migration counts for one database.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MigrationStatus {
    /// Migrations compiled into this build.
    pub known: usize,
    /// Migrations recorded as applied.
    pub applied: usize,
}

impl MigrationStatus {
    pub fn is_current(&self) -> bool {
        self.applied >= self.known
    }
}

pub(crate) async fn run_migrations(pool: &SqlitePool) -> DbResult<()> {
    MIGRATOR.run(pool).await?;
    info!(count = MIGRATOR.migrations.len(), "Schema up to date");
    Ok(())
}

pub(crate) async fn migration_status(pool: &SqlitePool) -> DbResult<MigrationStatus> {
    // The tracking table only exists once the migrator has run.
    let applied: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM _sqlx_migrations WHERE success = 1")
        .fetch_one(pool)
        .await
        .unwrap_or(0);

    Ok(MigrationStatus {
        known: MIGRATOR.migrations.len(),
        applied: usize::try_from(applied).unwrap_or(0),
    })
}
