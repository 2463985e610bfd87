//! Store configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! ## Required
//! - `SHOPCART_CATALOG_URL` - Base URL of the catalog backend
//!
//! ## Optional
//! - `SHOPCART_CATALOG_TOKEN` - Bearer token for the catalog backend
//! - `SHOPCART_DATA_DIR` - Directory for the persisted cart (default: .shopcart)
//! - `SHOPCART_HTTP_TIMEOUT_SECS` - Catalog request timeout (default: 10)

use std::path::PathBuf;
use std::time::Duration;

use secrecy::SecretString;
use thiserror::Error;
use url::Url;

/// Configuration errors that can occur during loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Missing environment variable: {0}")]
    MissingEnvVar(String),
    #[error("Invalid environment variable {0}: {1}")]
    InvalidEnvVar(String, String),
}

/// Cart store configuration.
///
/// Implements `Debug` manually to redact the catalog token.
#[derive(Clone)]
pub struct StoreConfig {
    /// Base URL of the catalog backend (e.g., <http://localhost:3333>)
    pub catalog_url: String,
    /// Bearer token for the catalog backend, if it requires one
    pub catalog_token: Option<SecretString>,
    /// Directory the persisted cart blob lives in
    pub data_dir: PathBuf,
    /// Timeout for catalog HTTP requests
    pub http_timeout: Duration,
}

impl std::fmt::Debug for StoreConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StoreConfig")
            .field("catalog_url", &self.catalog_url)
            .field(
                "catalog_token",
                &self.catalog_token.as_ref().map(|_| "[REDACTED]"),
            )
            .field("data_dir", &self.data_dir)
            .field("http_timeout", &self.http_timeout)
            .finish()
    }
}

impl StoreConfig {
    /// Load configuration from environment variables.
    ///
    /// Calls `dotenvy::dotenv()` to load from `.env` file if present.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if required variables are missing or invalid.
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();

        let catalog_url = get_required_env("SHOPCART_CATALOG_URL")?;
        validate_catalog_url(&catalog_url, "SHOPCART_CATALOG_URL")?;

        let catalog_token = get_optional_env("SHOPCART_CATALOG_TOKEN").map(SecretString::from);
        let data_dir = PathBuf::from(get_env_or_default("SHOPCART_DATA_DIR", ".shopcart"));
        let http_timeout = get_env_or_default("SHOPCART_HTTP_TIMEOUT_SECS", "10")
            .parse::<u64>()
            .map(Duration::from_secs)
            .map_err(|e| {
                ConfigError::InvalidEnvVar("SHOPCART_HTTP_TIMEOUT_SECS".to_string(), e.to_string())
            })?;

        Ok(Self {
            catalog_url,
            catalog_token,
            data_dir,
            http_timeout,
        })
    }
}

// =============================================================================
// Helper Functions
// =============================================================================

/// Get a required environment variable.
fn get_required_env(key: &str) -> Result<String, ConfigError> {
    std::env::var(key).map_err(|_| ConfigError::MissingEnvVar(key.to_string()))
}

/// Get an optional environment variable.
fn get_optional_env(key: &str) -> Option<String> {
    std::env::var(key).ok()
}

/// Get an environment variable with a default value.
fn get_env_or_default(key: &str, default: &str) -> String {
    std::env::var(key).unwrap_or_else(|_| default.to_string())
}

/// Validate that a catalog URL parses and uses an HTTP scheme.
fn validate_catalog_url(value: &str, var_name: &str) -> Result<(), ConfigError> {
    let url = Url::parse(value)
        .map_err(|e| ConfigError::InvalidEnvVar(var_name.to_string(), e.to_string()))?;

    if url.scheme() != "http" && url.scheme() != "https" {
        return Err(ConfigError::InvalidEnvVar(
            var_name.to_string(),
            format!("unsupported scheme '{}'", url.scheme()),
        ));
    }
    Ok(())
}
