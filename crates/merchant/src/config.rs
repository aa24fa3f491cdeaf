//! Merchant configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! ## Required
//! - `MERCHANT_API_BASE_URL` - Base URL of the marketplace Product API
//! - `MERCHANT_API_TOKEN` - Bearer token for the Product API
//! - `ASSET_HOST_URL` - Upload endpoint of the asset host

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

/// Merchant pipeline configuration.
#[derive(Debug, Clone)]
pub struct MerchantConfig {
    /// Product API base URL; always ends with a slash so joins append.
    pub api_base_url: Url,
    /// Product API bearer token.
    pub api_token: SecretString,
    /// Asset host upload endpoint.
    pub asset_host_url: Url,
}

impl MerchantConfig {
    /// Load the configuration from the environment.
    ///
    /// # Errors
    ///
    /// Returns a [`ConfigError`] for missing or malformed variables.
    pub fn from_env() -> Result<Self, ConfigError> {
        Ok(Self {
            api_base_url: required_url("MERCHANT_API_BASE_URL")?,
            api_token: SecretString::from(required_env("MERCHANT_API_TOKEN")?),
            asset_host_url: required_url("ASSET_HOST_URL")?,
        })
    }
}

fn required_env(name: &str) -> Result<String, ConfigError> {
    std::env::var(name).map_err(|_| ConfigError::MissingEnvVar(name.to_string()))
}

fn required_url(name: &str) -> Result<Url, ConfigError> {
    let mut raw = required_env(name)?;
    // A trailing slash makes Url::join append instead of replacing the last
    // path segment.
    if !raw.ends_with('/') {
        raw.push('/');
    }
    Url::parse(&raw).map_err(|e| ConfigError::InvalidEnvVar(name.to_string(), e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    #[allow(unsafe_code)]
    fn test_required_url_normalizes_trailing_slash() {
        // SAFETY: tests run single-threaded over this variable.
        unsafe {
            std::env::set_var("TEST_MERCHANT_URL", "https://api.example.com/v1");
        }
        let url = required_url("TEST_MERCHANT_URL").unwrap();
        assert_eq!(url.as_str(), "https://api.example.com/v1/");
        assert_eq!(url.join("products").unwrap().path(), "/v1/products");
    }

    #[test]
    fn test_missing_env_var() {
        let err = required_env("MERCHANT_DOES_NOT_EXIST").unwrap_err();
        assert!(matches!(err, ConfigError::MissingEnvVar(_)));
    }
}
