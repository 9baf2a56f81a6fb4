//! Application configuration module
//!
//! Provides configuration for the session and route-access subsystem:
//! identity-provider base URL, routing anchors, and the names of the
//! persisted artifacts (storage keys, session cookie).

use thiserror::Error;

/// Default protected-area home page
const DEFAULT_PROTECTED_HOME: &str = "/dashboard";

/// Default login ceremony page
const DEFAULT_LOGIN_PATH: &str = "/auth/login";

/// Durable storage key for the access token
pub const ACCESS_TOKEN_KEY: &str = "access_token";

/// Durable storage key for the refresh token
pub const REFRESH_TOKEN_KEY: &str = "refresh_token";

/// Name of the cookie mirroring the access token for the edge guard
pub const SESSION_COOKIE: &str = "auth_token";

/// Subsystem configuration
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// Identity provider base URL (e.g. `https://id.example.com`)
    pub provider_url: String,
    /// Where authenticated users land
    pub protected_home: String,
    /// Where unauthenticated users are sent to log in
    pub login_path: String,
}

impl AppConfig {
    /// Create a new AppConfigBuilder
    pub fn builder() -> AppConfigBuilder {
        AppConfigBuilder::default()
    }

    /// Full URL for an identity-provider endpoint
    pub fn provider_endpoint(&self, path: &str) -> String {
        format!("{}{}", self.provider_url.trim_end_matches('/'), path)
    }
}

/// Builder for AppConfig
#[derive(Debug, Default)]
pub struct AppConfigBuilder {
    provider_url: Option<String>,
    protected_home: Option<String>,
    login_path: Option<String>,
}

impl AppConfigBuilder {
    /// Set the identity-provider base URL
    pub fn provider_url(mut self, url: impl Into<String>) -> Self {
        self.provider_url = Some(url.into());
        self
    }

    /// Set the protected-area home page
    pub fn protected_home(mut self, path: impl Into<String>) -> Self {
        self.protected_home = Some(path.into());
        self
    }

    /// Set the login ceremony page
    pub fn login_path(mut self, path: impl Into<String>) -> Self {
        self.login_path = Some(path.into());
        self
    }

    /// Build the configuration
    pub fn build(self) -> Result<AppConfig, ConfigError> {
        let provider_url = self
            .provider_url
            .ok_or(ConfigError::MissingValue("provider_url"))?;
        if url::Url::parse(&provider_url).is_err() {
            return Err(ConfigError::InvalidUrl(provider_url));
        }
        Ok(AppConfig {
            provider_url,
            protected_home: self
                .protected_home
                .unwrap_or_else(|| DEFAULT_PROTECTED_HOME.to_string()),
            login_path: self
                .login_path
                .unwrap_or_else(|| DEFAULT_LOGIN_PATH.to_string()),
        })
    }
}

/// Configuration errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid URL: {0}")]
    InvalidUrl(String),
    #[error("missing value: {0}")]
    MissingValue(&'static str),
}
