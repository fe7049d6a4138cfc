//! Repository module
//!
//! CRUD operations over the `account` and `employee` tables. Storage-layer
//! failures are translated here into a small error vocabulary; in
//! particular a unique-index violation is the authoritative uniqueness
//! signal (service pre-checks are a fast path only), and SCHEMAFULL field
//! assertions surface as validation errors rather than raw database text.

pub mod account;
pub mod employee;

pub use account::AccountRepository;
pub use employee::EmployeeRepository;

use surrealdb::engine::local::Db;
use surrealdb::{RecordId, Surreal};
use thiserror::Error;

/// Repository error types
#[derive(Debug, Error)]
pub enum RepoError {
    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Duplicate: {0}")]
    Duplicate(String),

    #[error("Invalid id: {0}")]
    InvalidId(String),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Database error: {0}")]
    Database(String),
}

impl From<surrealdb::Error> for RepoError {
    fn from(err: surrealdb::Error) -> Self {
        let raw = err.to_string();
        if raw.contains("already contains") {
            return RepoError::Duplicate(duplicate_message(&raw));
        }
        if raw.contains("must conform to") {
            tracing::warn!(target: "database", error = %raw, "Field assertion rejected a write");
            return RepoError::Validation(assertion_message(&raw));
        }
        RepoError::Database(raw)
    }
}

/// Result type for repository operations
pub type RepoResult<T> = Result<T, RepoError>;

/// Map a unique-index violation onto the field the index guards
fn duplicate_message(raw: &str) -> String {
    if raw.contains("account_username") {
        "Username already registered".to_string()
    } else {
        // account_email / employee_email
        "Email already registered".to_string()
    }
}

/// Map a SCHEMAFULL assertion failure onto a client-safe message
fn assertion_message(raw: &str) -> String {
    if raw.contains("`salary`") {
        "Salary must be at least 1000".to_string()
    } else {
        "Stored field constraint violated".to_string()
    }
}

/// Parse a client-supplied id into a record id for `table`
///
/// Accepts either the full `table:key` form or a bare key. Anything that
/// does not parse, or that names a different table, is rejected before any
/// query is attempted.
pub fn parse_record_id(table: &str, id: &str) -> RepoResult<RecordId> {
    let id = id.trim();
    if id.is_empty() {
        return Err(RepoError::InvalidId(id.to_string()));
    }
    let rid: RecordId = if id.contains(':') {
        id.parse()
            .map_err(|_| RepoError::InvalidId(id.to_string()))?
    } else {
        RecordId::from_table_key(table, id)
    };
    if rid.table() != table {
        return Err(RepoError::InvalidId(id.to_string()));
    }
    Ok(rid)
}

/// Base repository with database reference
#[derive(Clone)]
pub struct BaseRepository {
    db: Surreal<Db>,
}

impl BaseRepository {
    pub fn new(db: Surreal<Db>) -> Self {
        Self { db }
    }

    pub fn db(&self) -> &Surreal<Db> {
        &self.db
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn record_id_accepts_qualified_and_bare_keys() {
        assert!(parse_record_id("employee", "employee:abc123").is_ok());
        assert!(parse_record_id("employee", "abc123").is_ok());
    }

    #[test]
    fn record_id_rejects_garbage() {
        assert!(matches!(
            parse_record_id("employee", ""),
            Err(RepoError::InvalidId(_))
        ));
        assert!(matches!(
            parse_record_id("employee", "account:abc123"),
            Err(RepoError::InvalidId(_))
        ));
    }

    #[test]
    fn duplicate_messages_name_the_guarded_field() {
        assert_eq!(
            duplicate_message("Database index `account_username` already contains 'ann'"),
            "Username already registered"
        );
        assert_eq!(
            duplicate_message("Database index `employee_email` already contains 'a@x.com'"),
            "Email already registered"
        );
    }
}
