//! Server configuration
//!
//! Every setting can be supplied through the environment:
//!
//! | Variable | Default | Purpose |
//! |----------|---------|---------|
//! | DATA_DIR | ./data | Database files and uploaded photos |
//! | HTTP_PORT | 4000 | HTTP API port |
//! | ENVIRONMENT | development | development \| staging \| production |
//! | LOG_DIR | (unset) | Daily-rolling log files; stdout only when unset |
//! | JWT_SECRET | (dev fallback) | HS256 signing secret |
//! | JWT_EXPIRY_DAYS | 7 | Token lifetime |

use std::path::PathBuf;

use crate::auth::JwtConfig;

#[derive(Debug, Clone)]
pub struct Config {
    /// Root directory for the database and uploads
    pub data_dir: PathBuf,
    /// HTTP API port
    pub http_port: u16,
    /// Runtime environment name
    pub environment: String,
    /// Directory for daily-rolling log files; stdout only when unset
    pub log_dir: Option<String>,
    /// Token signing configuration
    pub jwt: JwtConfig,
}

impl Config {
    /// Load configuration from environment variables, with defaults for
    /// anything unset
    pub fn from_env() -> Self {
        Self {
            data_dir: std::env::var("DATA_DIR")
                .map(PathBuf::from)
                .unwrap_or_else(|_| PathBuf::from("./data")),
            http_port: std::env::var("HTTP_PORT")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(4000),
            environment: std::env::var("ENVIRONMENT").unwrap_or_else(|_| "development".into()),
            log_dir: std::env::var("LOG_DIR").ok(),
            jwt: JwtConfig::from_env(),
        }
    }

    /// Fixed-value configuration, used by tests so they stay independent
    /// of the process environment
    pub fn with_overrides(data_dir: impl Into<PathBuf>, http_port: u16) -> Self {
        Self {
            data_dir: data_dir.into(),
            http_port,
            environment: "test".into(),
            log_dir: None,
            jwt: JwtConfig {
                secret: "test-secret-key-0123456789abcdef-long-enough".into(),
                expiry_days: 7,
            },
        }
    }

    /// Database directory under the data root
    pub fn db_dir(&self) -> PathBuf {
        self.data_dir.join("db")
    }

    /// Uploaded photo directory under the data root
    pub fn photos_dir(&self) -> PathBuf {
        self.data_dir.join("uploads").join("photos")
    }

    pub fn is_production(&self) -> bool {
        self.environment == "production"
    }

    pub fn is_development(&self) -> bool {
        self.environment == "development"
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::from_env()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn overrides_pin_every_setting() {
        let config = Config::with_overrides("/tmp/ems-test", 0);
        assert_eq!(config.environment, "test");
        assert!(config.log_dir.is_none());
        assert_eq!(config.db_dir(), PathBuf::from("/tmp/ems-test/db"));
        assert_eq!(
            config.photos_dir(),
            PathBuf::from("/tmp/ems-test/uploads/photos")
        );
    }
}
