//! Unified error handling
//!
//! [`AppError`] is the client-facing error vocabulary. Every operation
//! failure caused by client input is one of the tagged variants below and is
//! carried across the resolver boundary as data; only unexpected storage or
//! connectivity failures fall through to the opaque `Database`/`Internal`
//! variants, whose details are logged and never echoed to clients.

use async_graphql::{ErrorExtensions, Value};
use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;
use tracing::error;

use crate::db::repository::RepoError;

/// Application error enumeration
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    // ========== Client input errors ==========
    #[error("Validation failed")]
    Validation(Vec<String>),

    #[error("{0}")]
    AlreadyExists(String),

    #[error("Invalid username/email or password")]
    InvalidCredentials,

    #[error("Invalid id: {0}")]
    InvalidId(String),

    #[error("{0}")]
    NotFound(String),

    #[error("{0}")]
    BadRequest(String),

    // ========== Authentication errors (upload side-channel) ==========
    #[error("Authentication required")]
    Unauthorized,

    #[error("Token expired")]
    TokenExpired,

    #[error("Invalid token")]
    InvalidToken,

    // ========== System errors ==========
    #[error("Database error: {0}")]
    Database(String),

    #[error("Internal server error: {0}")]
    Internal(String),
}

/// Result type for application operations
pub type AppResult<T> = Result<T, AppError>;

impl AppError {
    /// Stable machine-readable kind, used as the GraphQL `extensions.code`
    /// and the REST envelope `code`.
    pub fn code(&self) -> &'static str {
        match self {
            AppError::Validation(_) => "VALIDATION_FAILED",
            AppError::AlreadyExists(_) => "ALREADY_EXISTS",
            AppError::InvalidCredentials => "INVALID_CREDENTIALS",
            AppError::InvalidId(_) => "INVALID_ID",
            AppError::NotFound(_) => "NOT_FOUND",
            AppError::BadRequest(_) => "BAD_REQUEST",
            AppError::Unauthorized => "UNAUTHORIZED",
            AppError::TokenExpired => "TOKEN_EXPIRED",
            AppError::InvalidToken => "INVALID_TOKEN",
            AppError::Database(_) => "INTERNAL",
            AppError::Internal(_) => "INTERNAL",
        }
    }

    /// Single-message validation failure
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation(vec![message.into()])
    }

    /// Unified message for unknown account and wrong password, to prevent
    /// account enumeration during login.
    pub fn invalid_credentials() -> Self {
        Self::InvalidCredentials
    }

    pub fn already_exists(message: impl Into<String>) -> Self {
        Self::AlreadyExists(message.into())
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        Self::NotFound(message.into())
    }

    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::BadRequest(message.into())
    }

    pub fn database(message: impl Into<String>) -> Self {
        Self::Database(message.into())
    }

    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal(message.into())
    }
}

impl From<RepoError> for AppError {
    fn from(err: RepoError) -> Self {
        match err {
            RepoError::NotFound(msg) => AppError::NotFound(msg),
            RepoError::Duplicate(msg) => AppError::AlreadyExists(msg),
            RepoError::InvalidId(id) => AppError::InvalidId(id),
            RepoError::Validation(msg) => AppError::Validation(vec![msg]),
            RepoError::Database(msg) => AppError::Database(msg),
        }
    }
}

impl ErrorExtensions for AppError {
    fn extend(&self) -> async_graphql::Error {
        let code = self.code();
        async_graphql::Error::new(self.to_string()).extend_with(|_, e| {
            e.set("code", code);
            if let AppError::Validation(messages) = self {
                e.set(
                    "errors",
                    Value::List(messages.iter().cloned().map(Value::String).collect()),
                );
            }
        })
    }
}

/// REST error envelope (upload side-channel)
#[derive(Debug, Serialize)]
struct ErrorBody {
    code: &'static str,
    message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    errors: Option<Vec<String>>,
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let code = self.code();
        let status = match &self {
            AppError::Validation(_)
            | AppError::InvalidId(_)
            | AppError::BadRequest(_) => StatusCode::BAD_REQUEST,

            AppError::InvalidCredentials
            | AppError::Unauthorized
            | AppError::TokenExpired
            | AppError::InvalidToken => StatusCode::UNAUTHORIZED,

            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::AlreadyExists(_) => StatusCode::CONFLICT,

            AppError::Database(msg) => {
                error!(target: "database", error = %msg, "Database error occurred");
                StatusCode::INTERNAL_SERVER_ERROR
            }
            AppError::Internal(msg) => {
                error!(target: "internal", error = %msg, "Internal error occurred");
                StatusCode::INTERNAL_SERVER_ERROR
            }
        };

        let message = if status == StatusCode::INTERNAL_SERVER_ERROR {
            "Internal server error".to_string()
        } else {
            self.to_string()
        };
        let errors = match self {
            AppError::Validation(messages) => Some(messages),
            _ => None,
        };

        (status, Json(ErrorBody { code, message, errors })).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn repo_errors_map_into_the_public_taxonomy() {
        let err: AppError = RepoError::Duplicate("email taken".into()).into();
        assert!(matches!(err, AppError::AlreadyExists(_)));
        assert_eq!(err.code(), "ALREADY_EXISTS");

        let err: AppError = RepoError::Validation("Salary must be at least 1000".into()).into();
        match &err {
            AppError::Validation(messages) => assert_eq!(messages.len(), 1),
            other => panic!("expected Validation, got {other:?}"),
        }

        let err: AppError = RepoError::InvalidId("nope".into()).into();
        assert_eq!(err.code(), "INVALID_ID");
    }

    #[test]
    fn graphql_extension_carries_code_and_messages() {
        let err = AppError::Validation(vec![
            "Email must be valid".to_string(),
            "Password must be at least 6 characters".to_string(),
        ]);
        let extended = err.extend();
        let ext = extended.extensions.expect("extensions present");
        assert_eq!(ext.get("code"), Some(&Value::from("VALIDATION_FAILED")));
        match ext.get("errors") {
            Some(Value::List(list)) => assert_eq!(list.len(), 2),
            other => panic!("expected list extension, got {other:?}"),
        }
    }

    #[test]
    fn invalid_credentials_message_is_uniform() {
        assert_eq!(
            AppError::invalid_credentials().to_string(),
            "Invalid username/email or password"
        );
    }
}
