//! Durable Client Storage Collaborators
//!
//! The session store persists tokens through two injected collaborators: a
//! durable key/value store (the browser-profile analogue) and a cookie
//! mirror that exposes the access token to the edge guard. Both are traits
//! so the embedding shell supplies the real backing; in-memory
//! implementations back the tests.

use std::collections::HashMap;
use std::sync::RwLock;

use crate::shared::config::SESSION_COOKIE;

/// Durable key/value storage for tokens
///
/// Implementations must tolerate missing keys and repeated removal.
pub trait TokenStorage: Send + Sync {
    /// Read a value
    fn get(&self, key: &str) -> Option<String>;
    /// Write a value
    fn set(&self, key: &str, value: &str);
    /// Remove a value; removing an absent key is a no-op
    fn remove(&self, key: &str);
}

/// Write-side of the session cookie consumed by the edge guard
///
/// Receives fully formatted cookie strings (the `document.cookie`
/// analogue); clearing happens by writing an already-expired cookie.
pub trait CookieMirror: Send + Sync {
    /// Store a formatted cookie string
    fn write_cookie(&self, cookie: &str);
}

/// Format the session cookie carrying the access token
///
/// Attributes are fixed: `path=/`, `SameSite=Strict`.
pub fn session_cookie(token: &str) -> String {
    format!("{SESSION_COOKIE}={token}; path=/; SameSite=Strict")
}

/// Format the cookie string that clears the session cookie
pub fn expired_session_cookie() -> String {
    format!("{SESSION_COOKIE}=; path=/; expires=Thu, 01 Jan 1970 00:00:00 GMT; SameSite=Strict")
}

/// In-memory token storage (tests and headless embeddings)
#[derive(Debug, Default)]
pub struct MemoryStorage {
    values: RwLock<HashMap<String, String>>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }
}

impl TokenStorage for MemoryStorage {
    fn get(&self, key: &str) -> Option<String> {
        self.values.read().ok()?.get(key).cloned()
    }

    fn set(&self, key: &str, value: &str) {
        if let Ok(mut values) = self.values.write() {
            values.insert(key.to_string(), value.to_string());
        }
    }

    fn remove(&self, key: &str) {
        if let Ok(mut values) = self.values.write() {
            values.remove(key);
        }
    }
}

/// In-memory cookie jar (tests and headless embeddings)
///
/// Parses the same formatted strings a browser would and keeps the last
/// unexpired value per cookie name.
#[derive(Debug, Default)]
pub struct MemoryCookieJar {
    cookies: RwLock<HashMap<String, String>>,
}

impl MemoryCookieJar {
    pub fn new() -> Self {
        Self::default()
    }

    /// Current value of a cookie, if set and not cleared
    pub fn get(&self, name: &str) -> Option<String> {
        self.cookies.read().ok()?.get(name).cloned()
    }
}

impl CookieMirror for MemoryCookieJar {
    fn write_cookie(&self, cookie: &str) {
        let mut parts = cookie.split(';');
        let Some(pair) = parts.next() else {
            return;
        };
        let Some((name, value)) = pair.split_once('=') else {
            return;
        };
        let expired = parts.any(|attr| attr.trim_start().starts_with("expires="));

        if let Ok(mut cookies) = self.cookies.write() {
            if expired || value.is_empty() {
                cookies.remove(name.trim());
            } else {
                cookies.insert(name.trim().to_string(), value.to_string());
            }
        }
    }
}
