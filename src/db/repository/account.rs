//! Account repository

use chrono::Utc;
use serde::Serialize;
use surrealdb::Surreal;
use surrealdb::engine::local::Db;

use super::{BaseRepository, RepoError, RepoResult};
use crate::db::models::{Account, AccountCreate};

#[derive(Serialize)]
struct NewAccountRow {
    #[serde(flatten)]
    fields: AccountCreate,
    created_at: i64,
    updated_at: i64,
}

#[derive(Clone)]
pub struct AccountRepository {
    base: BaseRepository,
}

impl AccountRepository {
    pub fn new(db: Surreal<Db>) -> Self {
        Self {
            base: BaseRepository::new(db),
        }
    }

    /// Find account by username
    pub async fn find_by_username(&self, username: &str) -> RepoResult<Option<Account>> {
        let mut result = self
            .base
            .db()
            .query("SELECT * FROM account WHERE username = $username LIMIT 1")
            .bind(("username", username.to_string()))
            .await?;
        let accounts: Vec<Account> = result.take(0)?;
        Ok(accounts.into_iter().next())
    }

    /// Find account by (lowercased) email
    pub async fn find_by_email(&self, email: &str) -> RepoResult<Option<Account>> {
        let mut result = self
            .base
            .db()
            .query("SELECT * FROM account WHERE email = $email LIMIT 1")
            .bind(("email", email.to_string()))
            .await?;
        let accounts: Vec<Account> = result.take(0)?;
        Ok(accounts.into_iter().next())
    }

    /// Find account matching either key (signup pre-check)
    pub async fn find_by_username_or_email(
        &self,
        username: &str,
        email: &str,
    ) -> RepoResult<Option<Account>> {
        let mut result = self
            .base
            .db()
            .query("SELECT * FROM account WHERE username = $username OR email = $email LIMIT 1")
            .bind(("username", username.to_string()))
            .bind(("email", email.to_string()))
            .await?;
        let accounts: Vec<Account> = result.take(0)?;
        Ok(accounts.into_iter().next())
    }

    /// Create a new account
    ///
    /// The unique indexes on username and email reject a racing duplicate
    /// insert; the violation comes back as [`RepoError::Duplicate`].
    pub async fn create(&self, data: AccountCreate) -> RepoResult<Account> {
        let now = Utc::now().timestamp_millis();
        let created: Option<Account> = self
            .base
            .db()
            .create("account")
            .content(NewAccountRow {
                fields: data,
                created_at: now,
                updated_at: now,
            })
            .await?;
        created.ok_or_else(|| RepoError::Database("Failed to create account".to_string()))
    }
}
