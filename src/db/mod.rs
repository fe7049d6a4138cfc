//! Database module
//!
//! Embedded SurrealDB (RocksDB backend) plus the table schema. The DDL is
//! idempotent (`IF NOT EXISTS`) and applied on every startup; the unique
//! indexes and the salary assertion are the storage-layer backstop for the
//! invariants the validators enforce up front.

pub mod models;
pub mod repository;

use std::path::Path;

use surrealdb::Surreal;
use surrealdb::engine::local::{Db, RocksDb};

use crate::utils::AppError;

const NAMESPACE: &str = "ems";
const DATABASE: &str = "ems";

const SCHEMA_DDL: &str = r#"
DEFINE TABLE IF NOT EXISTS account SCHEMAFULL;
DEFINE FIELD IF NOT EXISTS username ON account TYPE string;
DEFINE FIELD IF NOT EXISTS email ON account TYPE string;
DEFINE FIELD IF NOT EXISTS password_hash ON account TYPE string;
DEFINE FIELD IF NOT EXISTS created_at ON account TYPE number;
DEFINE FIELD IF NOT EXISTS updated_at ON account TYPE number;
DEFINE INDEX IF NOT EXISTS account_username ON account FIELDS username UNIQUE;
DEFINE INDEX IF NOT EXISTS account_email ON account FIELDS email UNIQUE;

DEFINE TABLE IF NOT EXISTS employee SCHEMAFULL;
DEFINE FIELD IF NOT EXISTS first_name ON employee TYPE string;
DEFINE FIELD IF NOT EXISTS last_name ON employee TYPE string;
DEFINE FIELD IF NOT EXISTS email ON employee TYPE string;
DEFINE FIELD IF NOT EXISTS gender ON employee TYPE option<string>;
DEFINE FIELD IF NOT EXISTS designation ON employee TYPE string;
DEFINE FIELD IF NOT EXISTS salary ON employee TYPE number ASSERT $value >= 1000;
DEFINE FIELD IF NOT EXISTS date_of_joining ON employee TYPE string;
DEFINE FIELD IF NOT EXISTS department ON employee TYPE string;
DEFINE FIELD IF NOT EXISTS employee_photo ON employee TYPE option<string>;
DEFINE FIELD IF NOT EXISTS created_at ON employee TYPE number;
DEFINE FIELD IF NOT EXISTS updated_at ON employee TYPE number;
DEFINE INDEX IF NOT EXISTS employee_email ON employee FIELDS email UNIQUE;
"#;

/// Database service owning the embedded SurrealDB handle
#[derive(Clone)]
pub struct DbService {
    pub db: Surreal<Db>,
}

impl DbService {
    /// Open (or create) the database at `db_dir` and apply the schema
    pub async fn new(db_dir: &Path) -> Result<Self, AppError> {
        let db: Surreal<Db> = Surreal::new::<RocksDb>(db_dir)
            .await
            .map_err(|e| AppError::database(format!("Failed to open database: {e}")))?;

        db.use_ns(NAMESPACE)
            .use_db(DATABASE)
            .await
            .map_err(|e| AppError::database(format!("Failed to select namespace: {e}")))?;

        db.query(SCHEMA_DDL)
            .await
            .map_err(|e| AppError::database(format!("Failed to apply schema: {e}")))?
            .check()
            .map_err(|e| AppError::database(format!("Schema statement rejected: {e}")))?;

        tracing::info!("Database ready (embedded SurrealDB at {})", db_dir.display());

        Ok(Self { db })
    }
}
