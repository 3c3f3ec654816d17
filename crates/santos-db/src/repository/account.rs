//! # Account Repository
//!
//! Shopper accounts for sign-up and sign-in. Stores the password hash only;
//! hashing and verification happen in the storefront's auth commands.

use chrono::{DateTime, Utc};
use sqlx::{FromRow, SqlitePool};
use tracing::{debug, info};
use uuid::Uuid;

use crate::error::{DbError, DbResult};
use santos_core::User;

/// A stored account, including its password hash.
#[derive(Debug, Clone, PartialEq, Eq, FromRow)]
pub struct Account {
    pub id: String,
    pub name: String,
    pub email: String,
    pub password_hash: String,
    pub created_at: DateTime<Utc>,
}

impl Account {
    /// The public view of the account, safe to hand to the front end.
    pub fn to_user(&self) -> User {
        User {
            id: self.id.clone(),
            name: self.name.clone(),
            email: self.email.clone(),
        }
    }
}

#[derive(Debug, Clone)]
pub struct AccountRepository {
    pool: SqlitePool,
}

impl AccountRepository {
    pub fn new(pool: SqlitePool) -> Self {
        AccountRepository { pool }
    }

    /// Creates an account. `email` must already be normalized.
    ///
    /// ## Errors
    /// * `DbError::Duplicate` - the email is already registered
    pub async fn insert(&self, name: &str, email: &str, password_hash: &str) -> DbResult<Account> {
        let account = Account {
            id: Uuid::new_v4().to_string(),
            name: name.to_string(),
            email: email.to_string(),
            password_hash: password_hash.to_string(),
            created_at: Utc::now(),
        };

        sqlx::query(
            "INSERT INTO accounts (id, name, email, password_hash, created_at) VALUES (?1, ?2, ?3, ?4, ?5)",
        )
        .bind(&account.id)
        .bind(&account.name)
        .bind(&account.email)
        .bind(&account.password_hash)
        .bind(account.created_at)
        .execute(&self.pool)
        .await
        .map_err(|err| match DbError::from(err) {
            DbError::Duplicate { .. } => DbError::duplicate("email", email),
            other => other,
        })?;

        info!(account_id = %account.id, "Account created");
        Ok(account)
    }

    /// Looks an account up by normalized email.
    pub async fn find_by_email(&self, email: &str) -> DbResult<Option<Account>> {
        debug!("Looking up account by email");

        let account = sqlx::query_as::<_, Account>(
            "SELECT id, name, email, password_hash, created_at FROM accounts WHERE email = ?1",
        )
        .bind(email)
        .fetch_optional(&self.pool)
        .await?;

        Ok(account)
    }

    pub async fn get_by_id(&self, id: &str) -> DbResult<Account> {
        sqlx::query_as::<_, Account>(
            "SELECT id, name, email, password_hash, created_at FROM accounts WHERE id = ?1",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?
        .ok_or_else(|| DbError::not_found("Account", id))
    }
}
