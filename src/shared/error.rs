//! Error Types
//!
//! This module defines the error taxonomy shared by the session store, the
//! route guards, and the ceremony orchestrator.
//!
//! # Error Categories
//!
//! - `MalformedToken` - token decode failure (treated as "not authenticated", never fatal)
//! - `ExpiredToken` - token decoded but past its expiry (same guard outcome as malformed)
//! - `IdentityProvider` - non-2xx or transport failure talking to the identity provider
//! - `MissingParameter` - a ceremony step mounted without a required query parameter
//!
//! Guards never propagate these errors; an ambiguous state always resolves
//! to the more restrictive outcome (treat as unauthenticated). The ceremony
//! orchestrator surfaces failures via toast AND returns them to the caller.
//!
//! # Thread Safety
//!
//! All error types are `Send + Sync` and can be safely shared across thread boundaries.
use thiserror::Error;

/// Errors produced by the session and route-access subsystem
#[derive(Debug, Error, Clone)]
pub enum AuthError {
    /// Token could not be decoded into claims
    #[error("malformed token: {message}")]
    MalformedToken {
        /// Human-readable decode failure description
        message: String,
    },

    /// Token decoded but its expiry is in the past
    #[error("expired token")]
    ExpiredToken,

    /// Identity provider returned a non-success status or the request failed in transport
    ///
    /// `status` is `None` for transport failures that never produced an HTTP response.
    #[error("identity provider failure: {}", .message.as_deref().unwrap_or("request failed"))]
    IdentityProvider {
        /// HTTP status code, when a response was received
        status: Option<u16>,
        /// Provider message, used verbatim in the failure toast when present
        message: Option<String>,
    },

    /// A ceremony step was reached without a required parameter
    #[error("missing required parameter: {name}")]
    MissingParameter {
        /// Name of the absent parameter
        name: &'static str,
    },
}

impl AuthError {
    /// Create a new malformed-token error
    pub fn malformed(message: impl Into<String>) -> Self {
        Self::MalformedToken {
            message: message.into(),
        }
    }

    /// Create a new identity-provider error
    pub fn provider(status: Option<u16>, message: Option<String>) -> Self {
        Self::IdentityProvider { status, message }
    }

    /// Create a new missing-parameter error
    pub fn missing(name: &'static str) -> Self {
        Self::MissingParameter { name }
    }

    /// Message suitable for a user-facing toast
    pub fn toast_message(&self) -> String {
        match self {
            Self::MalformedToken { .. } | Self::ExpiredToken => {
                "Your session is no longer valid. Please log in again.".to_string()
            }
            Self::IdentityProvider { message, .. } => message
                .clone()
                .unwrap_or_else(|| "Request failed. Please try again.".to_string()),
            Self::MissingParameter { name } => format!("Missing required information: {name}"),
        }
    }
}

impl From<reqwest::Error> for AuthError {
    fn from(err: reqwest::Error) -> Self {
        Self::IdentityProvider {
            status: err.status().map(|s| s.as_u16()),
            message: Some(format!("Network error: {err}")),
        }
    }
}
