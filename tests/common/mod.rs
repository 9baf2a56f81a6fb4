//! Common test utilities
//!
//! Shared helpers for the integration suite: token minting, configuration,
//! and pre-wired session stores.

#![allow(dead_code)]

use std::sync::Arc;

use authgate::client::{MemoryCookieJar, MemoryStorage, SessionStore};
use authgate::shared::{AppConfig, Claims};
use base64ct::{Base64UrlUnpadded, Encoding};

/// Mint an unsigned test token for `email`, expiring `exp_offset_secs`
/// from now (negative for an already-expired token).
pub fn mint_token(email: &str, exp_offset_secs: i64) -> String {
    let now = chrono::Utc::now().timestamp();
    let claims = Claims {
        sub: format!("user-{email}"),
        email: email.to_string(),
        role: "user".to_string(),
        iat: now,
        exp: now + exp_offset_secs,
        iss: Some("authgate-tests".to_string()),
        aud: Some("app".to_string()),
    };
    let header = Base64UrlUnpadded::encode_string(br#"{"alg":"HS256","typ":"JWT"}"#);
    let payload =
        Base64UrlUnpadded::encode_string(&serde_json::to_vec(&claims).expect("claims encode"));
    format!("{header}.{payload}.sig")
}

/// Configuration pointing at `provider_url` with default routing anchors
pub fn test_config(provider_url: &str) -> AppConfig {
    AppConfig::builder()
        .provider_url(provider_url)
        .build()
        .expect("test config is valid")
}

/// A fresh session store with in-memory persistence collaborators
pub fn test_store() -> (Arc<SessionStore>, Arc<MemoryStorage>, Arc<MemoryCookieJar>) {
    let storage = Arc::new(MemoryStorage::new());
    let cookies = Arc::new(MemoryCookieJar::new());
    let store = Arc::new(SessionStore::new(storage.clone(), cookies.clone()));
    (store, storage, cookies)
}
