//! Account model

use serde::{Deserialize, Serialize};
use surrealdb::RecordId;

/// Account id type
pub type AccountId = RecordId;

/// Registered user identity, as stored in the `account` table.
///
/// The password hash is deserialized for login verification but never
/// serialized back out.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Account {
    pub id: AccountId,
    pub username: String,
    pub email: String,
    #[serde(skip_serializing)]
    pub password_hash: String,
    pub created_at: i64,
    pub updated_at: i64,
}

/// Create account payload (already validated and hashed)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AccountCreate {
    pub username: String,
    pub email: String,
    pub password_hash: String,
}
