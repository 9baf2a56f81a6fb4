//! Token Codec
//!
//! Decodes compact signed tokens (`header.payload.signature`) into a claims
//! record and checks expiry. The codec never verifies the signature: this
//! subsystem never holds the signing secret, and the claims are only used to
//! derive client-side display state. The edge and client guards both treat a
//! decode failure as "not authenticated", never as a crash.
//!
//! No network calls are made here.

use base64ct::{Base64UrlUnpadded, Encoding};
use serde::{Deserialize, Serialize};

use crate::shared::error::AuthError;

/// Claims decoded from a token payload
///
/// Derived by [`decode`], never hand-constructed by callers.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    /// Subject id
    pub sub: String,
    /// Email address
    pub email: String,
    /// Role (defaults to empty when the token carries none)
    #[serde(default)]
    pub role: String,
    /// Issued at (Unix seconds)
    #[serde(default)]
    pub iat: i64,
    /// Expiration time (Unix seconds)
    pub exp: i64,
    /// Issuer
    #[serde(default)]
    pub iss: Option<String>,
    /// Audience
    #[serde(default)]
    pub aud: Option<String>,
}

impl Claims {
    /// Whether the claims are expired at `now_ms` (Unix milliseconds)
    ///
    /// Zero leeway: a token expiring exactly now is already expired.
    /// `exp` comes from an unverified payload, so the scale-up to
    /// milliseconds saturates instead of overflowing.
    pub fn is_expired_at(&self, now_ms: i64) -> bool {
        self.exp.saturating_mul(1000) <= now_ms
    }

    /// Whether the claims are expired against the wall clock
    pub fn is_expired(&self) -> bool {
        self.is_expired_at(chrono::Utc::now().timestamp_millis())
    }
}

/// Decode a token into claims without verifying its signature
///
/// # Errors
///
/// Returns [`AuthError::MalformedToken`] if the token is not a dotted
/// compact serialization, the payload segment is not URL-safe base64, or
/// the payload JSON does not contain the required claims. A decode failure
/// is a normal outcome, not a crash.
pub fn decode(token: &str) -> Result<Claims, AuthError> {
    let mut segments = token.split('.');
    let _header = segments
        .next()
        .filter(|s| !s.is_empty())
        .ok_or_else(|| AuthError::malformed("empty token"))?;
    let payload = segments
        .next()
        .filter(|s| !s.is_empty())
        .ok_or_else(|| AuthError::malformed("token has no payload segment"))?;

    let bytes = Base64UrlUnpadded::decode_vec(payload)
        .map_err(|e| AuthError::malformed(format!("payload is not base64url: {e}")))?;

    serde_json::from_slice(&bytes)
        .map_err(|e| AuthError::malformed(format!("payload is not a claims object: {e}")))
}

/// Whether a token decodes and its expiry is in the future
///
/// `is_valid(t) == true` iff `decode(t)` succeeds and the expiry,
/// scaled to milliseconds, is strictly in the future. Zero leeway.
pub fn is_valid(token: &str) -> bool {
    match decode(token) {
        Ok(claims) => !claims.is_expired(),
        Err(_) => false,
    }
}

/// Decode a token and require it to be unexpired
///
/// # Errors
///
/// [`AuthError::MalformedToken`] if decoding fails,
/// [`AuthError::ExpiredToken`] if the claims are stale.
pub fn decode_valid(token: &str) -> Result<Claims, AuthError> {
    let claims = decode(token)?;
    if claims.is_expired() {
        return Err(AuthError::ExpiredToken);
    }
    Ok(claims)
}
