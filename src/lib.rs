//! Employee management service
//!
//! GraphQL API for account signup/login and employee records, backed by an
//! embedded SurrealDB instance, plus a small REST side-channel for photo
//! uploads.

pub mod api;
pub mod auth;
pub mod core;
pub mod db;
pub mod graphql;
pub mod services;
pub mod utils;

pub use auth::CurrentAccount;
pub use core::{Config, Server, ServerState};
pub use utils::{AppError, AppResult};
