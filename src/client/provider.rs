//! Identity Provider Client
//!
//! HTTP client for the identity-provider collaborator. The provider is
//! outside this subsystem; only its response contract is consumed here:
//! every call yields a status code and an optional message, with `200` and
//! `201` as the success statuses. Login and code confirmation additionally
//! carry tokens in the body.
//!
//! All response-shape interpretation happens in this module, behind a
//! tagged result: handlers upstream never sniff ad hoc properties.

use serde::Deserialize;
use serde_json::json;

use crate::shared::config::AppConfig;
use crate::shared::error::AuthError;
use crate::shared::params::CeremonyPurpose;

/// Body fields the provider may return; all optional
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProviderPayload {
    /// Human-readable outcome description
    pub message: Option<String>,
    /// Access token (login)
    pub access_token: Option<String>,
    /// Refresh token (login)
    pub refresh_token: Option<String>,
    /// Opaque reset token (code confirmation for a password reset)
    pub reset_token: Option<String>,
}

/// A provider call that came back with a success status
#[derive(Debug, Clone)]
pub struct ProviderSuccess {
    pub status: u16,
    pub payload: ProviderPayload,
}

/// Map a provider response onto the tagged result boundary
///
/// `200` and `201` are success; anything else is a failure whose message is
/// used verbatim in the failure toast when present.
fn interpret(status: u16, payload: ProviderPayload) -> Result<ProviderSuccess, AuthError> {
    match status {
        200 | 201 => Ok(ProviderSuccess { status, payload }),
        _ => Err(AuthError::provider(Some(status), payload.message)),
    }
}

/// Identity-provider HTTP client
#[derive(Debug, Clone)]
pub struct IdentityClient {
    http: reqwest::Client,
    config: AppConfig,
}

impl IdentityClient {
    pub fn new(config: AppConfig) -> Self {
        Self {
            http: reqwest::Client::new(),
            config,
        }
    }

    /// Authenticate with email and password
    pub async fn login(&self, email: &str, password: &str) -> Result<ProviderSuccess, AuthError> {
        self.post("/auth/login", json!({ "email": email, "password": password }))
            .await
    }

    /// Register a new account
    pub async fn signup(
        &self,
        name: &str,
        email: &str,
        password: &str,
    ) -> Result<ProviderSuccess, AuthError> {
        self.post(
            "/auth/signup",
            json!({ "name": name, "email": email, "password": password }),
        )
        .await
    }

    /// Request a password-reset code for an email
    pub async fn forgot_password(&self, email: &str) -> Result<ProviderSuccess, AuthError> {
        self.post("/auth/forgot-password", json!({ "email": email }))
            .await
    }

    /// Confirm a one-time code
    pub async fn verify_code(
        &self,
        email: &str,
        code: &str,
        purpose: CeremonyPurpose,
    ) -> Result<ProviderSuccess, AuthError> {
        self.post(
            "/auth/verify-code",
            json!({ "email": email, "code": code, "purpose": purpose.to_string() }),
        )
        .await
    }

    /// Ask for the one-time code to be sent again
    pub async fn resend_code(&self, email: &str) -> Result<ProviderSuccess, AuthError> {
        self.post("/auth/resend-code", json!({ "email": email }))
            .await
    }

    /// Set a new password using an opaque reset token
    pub async fn reset_password(
        &self,
        reset_token: &str,
        password: &str,
    ) -> Result<ProviderSuccess, AuthError> {
        self.post(
            "/auth/reset-password",
            json!({ "token": reset_token, "password": password }),
        )
        .await
    }

    async fn post(
        &self,
        path: &str,
        body: serde_json::Value,
    ) -> Result<ProviderSuccess, AuthError> {
        let url = self.config.provider_endpoint(path);
        let response = self.http.post(&url).json(&body).send().await.map_err(|e| {
            tracing::warn!("Identity provider unreachable at {url}: {e}");
            AuthError::from(e)
        })?;

        let status = response.status().as_u16();
        // Bodies are best-effort: a missing or non-JSON body is an empty payload.
        let payload = response.json::<ProviderPayload>().await.unwrap_or_default();
        interpret(status, payload)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_interpret_success_statuses() {
        assert!(interpret(200, ProviderPayload::default()).is_ok());
        assert!(interpret(201, ProviderPayload::default()).is_ok());
    }

    #[test]
    fn test_interpret_failure_uses_body_message() {
        let payload = ProviderPayload {
            message: Some("Invalid or expired code".to_string()),
            ..Default::default()
        };
        match interpret(400, payload) {
            Err(AuthError::IdentityProvider { status, message }) => {
                assert_eq!(status, Some(400));
                assert_eq!(message.as_deref(), Some("Invalid or expired code"));
            }
            other => panic!("Expected IdentityProvider error, got {other:?}"),
        }
    }

    #[test]
    fn test_interpret_failure_without_message() {
        match interpret(503, ProviderPayload::default()) {
            Err(AuthError::IdentityProvider { status, message }) => {
                assert_eq!(status, Some(503));
                assert_eq!(message, None);
            }
            other => panic!("Expected IdentityProvider error, got {other:?}"),
        }
    }

    #[test]
    fn test_payload_camel_case_fields() {
        let payload: ProviderPayload = serde_json::from_str(
            r#"{"accessToken":"a","refreshToken":"r","resetToken":"t","message":"ok"}"#,
        )
        .unwrap();
        assert_eq!(payload.access_token.as_deref(), Some("a"));
        assert_eq!(payload.refresh_token.as_deref(), Some("r"));
        assert_eq!(payload.reset_token.as_deref(), Some("t"));
    }
}
