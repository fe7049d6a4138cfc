//! Shared server state
//!
//! One instance holds everything the handlers need: the configuration,
//! the embedded database handle, and the token service. Cloning is cheap;
//! every clone refers to the same underlying resources.

use std::path::PathBuf;
use std::sync::Arc;

use surrealdb::Surreal;
use surrealdb::engine::local::Db;

use crate::auth::JwtService;
use crate::core::Config;
use crate::db::DbService;
use crate::utils::{AppError, AppResult};

#[derive(Clone)]
pub struct ServerState {
    pub config: Arc<Config>,
    pub db: Surreal<Db>,
    pub jwt: Arc<JwtService>,
}

impl ServerState {
    /// Create the data directory, open the database, and wire the services
    pub async fn initialize(config: Config) -> AppResult<Self> {
        tokio::fs::create_dir_all(&config.data_dir)
            .await
            .map_err(|e| AppError::internal(format!("Failed to create data directory: {e}")))?;

        let db_service = DbService::new(&config.db_dir()).await?;
        let jwt = Arc::new(JwtService::new(config.jwt.clone()));

        Ok(Self {
            config: Arc::new(config),
            db: db_service.db,
            jwt,
        })
    }

    pub fn photos_dir(&self) -> PathBuf {
        self.config.photos_dir()
    }
}
