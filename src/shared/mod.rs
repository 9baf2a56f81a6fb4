//! Shared Module
//!
//! Types used by both the client-side session subsystem and the edge
//! request-inspection layer: the error taxonomy, configuration, the token
//! codec, route classification, and the ceremony query-parameter contract.

/// Error taxonomy
pub mod error;

/// Application configuration
pub mod config;

/// Token codec (claims decoding and validity)
pub mod token;

/// Route classification table
pub mod routes;

/// Ceremony query parameters and email transport encoding
pub mod params;

/// Re-export commonly used types for convenience
pub use config::{AppConfig, AppConfigBuilder, ConfigError};
pub use error::AuthError;
pub use params::CeremonyPurpose;
pub use routes::RouteClass;
pub use token::Claims;
