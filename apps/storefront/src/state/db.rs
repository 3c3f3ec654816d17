//! # Catalog Database Handle
//!
//! Commands that read products or accounts take a `&DbState`. The pool is
//! shared and synchronized internally; no lock is taken here.

use santos_db::Database;

#[derive(Debug, Clone)]
pub struct DbState {
    db: Database,
}

impl DbState {
    pub fn new(db: Database) -> Self {
        DbState { db }
    }

    /// ```rust,ignore
    /// let gown = db.get().products().get_by_id("1").await?;
    /// ```
    pub fn get(&self) -> &Database {
        &self.db
    }
}
