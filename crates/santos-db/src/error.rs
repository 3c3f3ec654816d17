//! # Storage Errors
//!
//! ```text
//! sqlx::Error ─────────┐
//! MigrateError ────────┤
//! serde_json::Error ───┼──► DbError ──┬──► ApiError (commands)
//! io::Error ───────────┘              └──► warn! (wishlist save/restore)
//! ```

use thiserror::Error;

/// Failure in the key-value store or the SQLite database.
#[derive(Debug, Error)]
pub enum DbError {
    #[error("{entity} not found: {id}")]
    NotFound { entity: String, id: String },

    /// A UNIQUE column already holds the value (a registered email).
    #[error("{field} '{value}' is already taken")]
    Duplicate { field: String, value: String },

    #[error("Could not open database: {0}")]
    Connect(String),

    #[error("Schema migration failed: {0}")]
    Migrate(#[from] sqlx::migrate::MigrateError),

    /// Every pooled connection stayed busy past the acquire timeout.
    #[error("Timed out waiting for a database connection")]
    Busy,

    #[error("Query failed: {0}")]
    Query(String),

    /// A stored JSON value (wishlist, catalog column) failed to encode or
    /// decode.
    #[error("Stored JSON is unreadable: {0}")]
    Json(#[from] serde_json::Error),

    /// The file store could not read or write its directory.
    #[error("Storage I/O failed: {0}")]
    Io(#[from] std::io::Error),

    /// Store keys become file names, so only `[A-Za-z0-9_-]` is allowed.
    #[error("Invalid storage key '{0}'")]
    InvalidKey(String),
}

impl DbError {
    pub fn not_found(entity: impl Into<String>, id: impl Into<String>) -> Self {
        DbError::NotFound {
            entity: entity.into(),
            id: id.into(),
        }
    }

    pub fn duplicate(field: impl Into<String>, value: impl Into<String>) -> Self {
        DbError::Duplicate {
            field: field.into(),
            value: value.into(),
        }
    }
}

/// SQLite reports unique violations as `UNIQUE constraint failed: table.column`.
/// The column becomes the `Duplicate` field; the caller knows the value.
impl From<sqlx::Error> for DbError {
    fn from(err: sqlx::Error) -> Self {
        match err {
            sqlx::Error::RowNotFound => DbError::not_found("Row", ""),
            sqlx::Error::PoolTimedOut => DbError::Busy,
            sqlx::Error::PoolClosed => DbError::Connect("pool is closed".to_string()),
            sqlx::Error::Database(db_err) => match db_err.message().strip_prefix("UNIQUE constraint failed: ") {
                Some(column) => DbError::duplicate(column, ""),
                None => DbError::Query(db_err.message().to_string()),
            },
            other => DbError::Query(other.to_string()),
        }
    }
}

pub type DbResult<T> = Result<T, DbError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_messages() {
        assert_eq!(DbError::not_found("Account", "a1").to_string(), "Account not found: a1");
        assert_eq!(
            DbError::duplicate("email", "sophia@santos.studio").to_string(),
            "email 'sophia@santos.studio' is already taken"
        );
        assert_eq!(DbError::InvalidKey("../x".into()).to_string(), "Invalid storage key '../x'");
    }

    #[test]
    fn test_source_conversions() {
        let io = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "read-only");
        assert!(matches!(DbError::from(io), DbError::Io(_)));

        let json = serde_json::from_str::<Vec<String>>("{").unwrap_err();
        assert!(matches!(DbError::from(json), DbError::Json(_)));

        assert!(matches!(DbError::from(sqlx::Error::PoolTimedOut), DbError::Busy));
    }
}
