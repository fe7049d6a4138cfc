//! Account service
//!
//! Signup and login orchestration. Both return the same payload shape: a
//! signed bearer token plus the account it names. Login answers every
//! rejection with one uniform error and levels its response time, so the
//! reply gives away nothing about which accounts exist.

use std::sync::Arc;

use surrealdb::Surreal;
use surrealdb::engine::local::Db;
use tokio::time::{Duration, Instant, sleep};

use crate::auth::{JwtService, hash_password, verify_password};
use crate::db::models::{Account, AccountCreate};
use crate::db::repository::AccountRepository;
use crate::services::validation::{SignupInput, validate_login, validate_signup};
use crate::utils::{AppError, AppResult};

/// Floor on login latency, covers both the lookup-miss and the
/// wrong-password paths
const LOGIN_MIN_ELAPSED_MS: u64 = 500;

#[derive(Clone)]
pub struct AccountService {
    accounts: AccountRepository,
    jwt: Arc<JwtService>,
}

impl AccountService {
    pub fn new(db: Surreal<Db>, jwt: Arc<JwtService>) -> Self {
        Self {
            accounts: AccountRepository::new(db),
            jwt,
        }
    }

    /// Register a new account and log it in
    ///
    /// The lookup ahead of the insert gives the common duplicate case a
    /// precise message; a racing insert that slips past it still fails on
    /// the unique index and surfaces as the same conflict.
    pub async fn signup(&self, input: SignupInput) -> AppResult<(String, Account)> {
        let input = validate_signup(input)?;

        if let Some(existing) = self
            .accounts
            .find_by_username_or_email(&input.username, &input.email)
            .await?
        {
            let message = if existing.username == input.username {
                "Username already registered"
            } else {
                "Email already registered"
            };
            return Err(AppError::already_exists(message));
        }

        let password_hash = hash_password(&input.password).await?;
        let account = self
            .accounts
            .create(AccountCreate {
                username: input.username,
                email: input.email,
                password_hash,
            })
            .await?;

        let token = self.issue_token(&account)?;
        tracing::info!(account = %account.id, "Account created");
        Ok((token, account))
    }

    /// Authenticate by username or email
    ///
    /// A key containing `@` is looked up as an email (lowercased, matching
    /// how signup stores it), anything else as a username.
    pub async fn login(&self, username_or_email: &str, password: &str) -> AppResult<(String, Account)> {
        let (key, password) = validate_login(username_or_email, password)?;
        let started = Instant::now();

        let found = if key.contains('@') {
            self.accounts.find_by_email(&key.to_lowercase()).await?
        } else {
            self.accounts.find_by_username(&key).await?
        };

        let verified = match &found {
            Some(account) => verify_password(&password, &account.password_hash).await?,
            None => false,
        };

        Self::level_timing(started).await;

        match found {
            Some(account) if verified => {
                let token = self.issue_token(&account)?;
                Ok((token, account))
            }
            _ => Err(AppError::invalid_credentials()),
        }
    }

    fn issue_token(&self, account: &Account) -> AppResult<String> {
        self.jwt
            .issue(account.id.to_string())
            .map_err(|e| AppError::internal(format!("Token generation failed: {e}")))
    }

    async fn level_timing(started: Instant) {
        let floor = Duration::from_millis(LOGIN_MIN_ELAPSED_MS);
        let elapsed = started.elapsed();
        if elapsed < floor {
            sleep(floor - elapsed).await;
        }
    }
}
