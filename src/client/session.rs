//! Session Store
//!
//! Process-wide authentication state. There is exactly one store per
//! application process; it is constructed explicitly at startup and shared
//! by `Arc`, never looked up ambiently. All auth-state mutations happen
//! here and are synchronous and atomic; with one writer timeline (the
//! active tab) overlapping logical flows resolve last-write-wins.
//!
//! The store persists tokens across reloads through an injected
//! [`TokenStorage`] and mirrors the access token into a same-site cookie
//! (via [`CookieMirror`]) so the edge guard can make its coarse
//! presence-only check.
//!
//! # Invariant
//!
//! `is_authenticated() == true` implies an access token is present and its
//! decoded claims were valid at last check. Rehydration that finds an
//! invalid or expired stored token leaves the session logged out, never
//! partially authenticated.

use std::sync::{Arc, RwLock};

use crate::client::storage::{expired_session_cookie, session_cookie, CookieMirror, TokenStorage};
use crate::shared::config::{ACCESS_TOKEN_KEY, REFRESH_TOKEN_KEY};
use crate::shared::error::AuthError;
use crate::shared::token;

/// User fields derived from claims for display purposes
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserProfile {
    pub id: String,
    pub email: String,
    pub role: String,
    pub display_name: String,
}

/// Shallow patch applied to the current user profile
#[derive(Debug, Clone, Default)]
pub struct ProfilePatch {
    pub email: Option<String>,
    pub role: Option<String>,
    pub display_name: Option<String>,
}

#[derive(Debug, Default)]
struct SessionState {
    is_authenticated: bool,
    user: Option<UserProfile>,
    access_token: Option<String>,
    refresh_token: Option<String>,
    loading: bool,
    last_error: Option<String>,
}

impl SessionState {
    fn is_logged_out(&self) -> bool {
        !self.is_authenticated
            && self.user.is_none()
            && self.access_token.is_none()
            && self.refresh_token.is_none()
    }
}

/// Process-wide authentication state and its only mutator
pub struct SessionStore {
    state: RwLock<SessionState>,
    storage: Arc<dyn TokenStorage>,
    cookies: Arc<dyn CookieMirror>,
}

impl SessionStore {
    /// Create a logged-out store with its persistence collaborators
    pub fn new(storage: Arc<dyn TokenStorage>, cookies: Arc<dyn CookieMirror>) -> Self {
        Self {
            state: RwLock::new(SessionState::default()),
            storage,
            cookies,
        }
    }

    /// Restore the session from durable storage at process start
    ///
    /// Populates the session only when the stored access token decodes and
    /// is still valid; any other outcome leaves the session logged out
    /// without surfacing an error to the user.
    pub fn rehydrate(&self) {
        let Some(access) = self.storage.get(ACCESS_TOKEN_KEY) else {
            return;
        };
        match token::decode_valid(&access) {
            Ok(claims) => {
                let refresh = self.storage.get(REFRESH_TOKEN_KEY);
                let mut state = self.write_state();
                state.user = Some(profile_from_claims(&claims, &claims.email));
                state.access_token = Some(access.clone());
                state.refresh_token = refresh;
                state.is_authenticated = true;
                drop(state);
                self.cookies.write_cookie(&session_cookie(&access));
                tracing::info!("Session rehydrated for {}", claims.email);
            }
            Err(e) => {
                tracing::info!("Stored token not usable, staying logged out: {e}");
            }
        }
    }

    /// Begin a login attempt: raises the loading flag, clears the last error
    pub fn login_start(&self) {
        let mut state = self.write_state();
        state.loading = true;
        state.last_error = None;
    }

    /// Record a successful login
    ///
    /// Decodes `access_token` into claims, populates the user (display name
    /// falls back to the local part of `email`), persists both tokens and
    /// mirrors the access token into the session cookie.
    ///
    /// # Errors
    ///
    /// An access token that does not decode to valid claims is a contract
    /// violation by the caller: the store stays unauthenticated, records
    /// the error so it is observable, and returns it.
    pub fn login_success(
        &self,
        access_token: &str,
        refresh_token: &str,
        email: &str,
    ) -> Result<(), AuthError> {
        let claims = match token::decode_valid(access_token) {
            Ok(claims) => claims,
            Err(e) => {
                tracing::warn!("login_success called with unusable token: {e}");
                let mut state = self.write_state();
                state.is_authenticated = false;
                state.loading = false;
                state.last_error = Some(e.to_string());
                return Err(e);
            }
        };

        let mut state = self.write_state();
        state.user = Some(profile_from_claims(&claims, email));
        state.access_token = Some(access_token.to_string());
        state.refresh_token = Some(refresh_token.to_string());
        state.is_authenticated = true;
        state.loading = false;
        state.last_error = None;
        drop(state);

        self.storage.set(ACCESS_TOKEN_KEY, access_token);
        self.storage.set(REFRESH_TOKEN_KEY, refresh_token);
        self.cookies.write_cookie(&session_cookie(access_token));

        tracing::info!("User logged in: {}", claims.email);
        Ok(())
    }

    /// Record a failed login attempt
    pub fn login_failure(&self, message: &str) {
        let mut state = self.write_state();
        state.is_authenticated = false;
        state.loading = false;
        state.last_error = Some(message.to_string());
    }

    /// Clear the session, durable tokens and the mirrored cookie
    ///
    /// Idempotent: calling on an already-logged-out session is a no-op.
    pub fn logout(&self) {
        {
            let mut state = self.write_state();
            if state.is_logged_out() {
                return;
            }
            *state = SessionState::default();
        }
        self.storage.remove(ACCESS_TOKEN_KEY);
        self.storage.remove(REFRESH_TOKEN_KEY);
        self.cookies.write_cookie(&expired_session_cookie());
        tracing::info!("User logged out");
    }

    /// Shallow-merge a patch into the current user
    ///
    /// Silently a no-op when not authenticated.
    pub fn update_profile(&self, patch: ProfilePatch) {
        let mut state = self.write_state();
        if !state.is_authenticated {
            return;
        }
        if let Some(user) = state.user.as_mut() {
            if let Some(email) = patch.email {
                user.email = email;
            }
            if let Some(role) = patch.role {
                user.role = role;
            }
            if let Some(display_name) = patch.display_name {
                user.display_name = display_name;
            }
        }
    }

    /// Whether the session is currently authenticated
    pub fn is_authenticated(&self) -> bool {
        self.read_state().is_authenticated
    }

    /// The current user, when authenticated
    pub fn current_user(&self) -> Option<UserProfile> {
        self.read_state().user.clone()
    }

    /// The current user's role, when authenticated
    pub fn role(&self) -> Option<String> {
        self.read_state().user.as_ref().map(|u| u.role.clone())
    }

    /// Whether a login attempt is in flight
    pub fn is_loading(&self) -> bool {
        self.read_state().loading
    }

    /// The most recent login error, if any
    pub fn last_error(&self) -> Option<String> {
        self.read_state().last_error.clone()
    }

    /// The current access token, when authenticated
    pub fn access_token(&self) -> Option<String> {
        self.read_state().access_token.clone()
    }

    fn read_state(&self) -> std::sync::RwLockReadGuard<'_, SessionState> {
        // A poisoned lock means a writer panicked mid-mutation; the state
        // itself is plain data, so continue with what is there.
        self.state.read().unwrap_or_else(|e| e.into_inner())
    }

    fn write_state(&self) -> std::sync::RwLockWriteGuard<'_, SessionState> {
        self.state.write().unwrap_or_else(|e| e.into_inner())
    }
}

/// Build a user profile from claims, falling back to the local part of
/// `email` for the display name
fn profile_from_claims(claims: &crate::shared::token::Claims, email: &str) -> UserProfile {
    let email = if claims.email.is_empty() {
        email.to_string()
    } else {
        claims.email.clone()
    };
    let display_name = email.split('@').next().unwrap_or(&email).to_string();
    UserProfile {
        id: claims.sub.clone(),
        email,
        role: claims.role.clone(),
        display_name,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::client::storage::{MemoryCookieJar, MemoryStorage};
    use crate::shared::config::SESSION_COOKIE;
    use crate::shared::token::test_tokens;

    fn store_with_jars() -> (SessionStore, Arc<MemoryStorage>, Arc<MemoryCookieJar>) {
        let storage = Arc::new(MemoryStorage::new());
        let cookies = Arc::new(MemoryCookieJar::new());
        let store = SessionStore::new(storage.clone(), cookies.clone());
        (store, storage, cookies)
    }

    #[test]
    fn test_login_success_populates_session() {
        let (store, storage, cookies) = store_with_jars();
        let access = test_tokens::mint("demo@example.com", 3600);

        store.login_start();
        assert!(store.is_loading());

        store
            .login_success(&access, "refresh-1", "demo@example.com")
            .unwrap();

        assert!(store.is_authenticated());
        assert!(!store.is_loading());
        let user = store.current_user().unwrap();
        assert_eq!(user.email, "demo@example.com");
        assert_eq!(user.display_name, "demo");
        assert_eq!(storage.get(ACCESS_TOKEN_KEY), Some(access.clone()));
        assert_eq!(storage.get(REFRESH_TOKEN_KEY), Some("refresh-1".to_string()));
        assert_eq!(cookies.get(SESSION_COOKIE), Some(access));
    }

    #[test]
    fn test_login_success_with_malformed_token_is_observable() {
        let (store, storage, _) = store_with_jars();

        let result = store.login_success("garbage", "refresh", "demo@example.com");

        assert!(result.is_err());
        assert!(!store.is_authenticated());
        assert!(store.last_error().is_some());
        assert_eq!(storage.get(ACCESS_TOKEN_KEY), None);
    }

    #[test]
    fn test_login_failure_records_error() {
        let (store, _, _) = store_with_jars();
        store.login_start();
        store.login_failure("Invalid credentials");

        assert!(!store.is_authenticated());
        assert!(!store.is_loading());
        assert_eq!(store.last_error(), Some("Invalid credentials".to_string()));
    }

    #[test]
    fn test_logout_clears_everything() {
        let (store, storage, cookies) = store_with_jars();
        let access = test_tokens::mint("demo@example.com", 3600);
        store.login_success(&access, "r", "demo@example.com").unwrap();

        store.logout();

        assert!(!store.is_authenticated());
        assert!(store.current_user().is_none());
        assert_eq!(storage.get(ACCESS_TOKEN_KEY), None);
        assert_eq!(storage.get(REFRESH_TOKEN_KEY), None);
        assert_eq!(cookies.get(SESSION_COOKIE), None);
    }

    #[test]
    fn test_logout_is_idempotent() {
        let (store, _, _) = store_with_jars();
        store.logout();
        store.logout();
        assert!(!store.is_authenticated());
    }

    #[test]
    fn test_rehydrate_with_valid_token() {
        let (store, storage, cookies) = store_with_jars();
        let access = test_tokens::mint("back@example.com", 3600);
        storage.set(ACCESS_TOKEN_KEY, &access);
        storage.set(REFRESH_TOKEN_KEY, "refresh-9");

        store.rehydrate();

        assert!(store.is_authenticated());
        assert_eq!(store.current_user().unwrap().email, "back@example.com");
        assert_eq!(cookies.get(SESSION_COOKIE), Some(access));
    }

    #[test]
    fn test_rehydrate_with_expired_token_stays_logged_out() {
        let (store, storage, _) = store_with_jars();
        storage.set(ACCESS_TOKEN_KEY, &test_tokens::mint("old@example.com", -60));

        store.rehydrate();

        assert!(!store.is_authenticated());
        assert!(store.last_error().is_none());
    }

    #[test]
    fn test_rehydrate_with_empty_storage() {
        let (store, _, _) = store_with_jars();
        store.rehydrate();
        assert!(!store.is_authenticated());
    }

    #[test]
    fn test_update_profile_merges_shallowly() {
        let (store, _, _) = store_with_jars();
        let access = test_tokens::mint("demo@example.com", 3600);
        store.login_success(&access, "r", "demo@example.com").unwrap();

        store.update_profile(ProfilePatch {
            display_name: Some("Demo User".to_string()),
            ..Default::default()
        });

        let user = store.current_user().unwrap();
        assert_eq!(user.display_name, "Demo User");
        assert_eq!(user.email, "demo@example.com");
    }

    #[test]
    fn test_update_profile_when_logged_out_is_a_no_op() {
        let (store, _, _) = store_with_jars();
        store.update_profile(ProfilePatch {
            display_name: Some("Ghost".to_string()),
            ..Default::default()
        });
        assert!(store.current_user().is_none());
    }

    #[test]
    fn test_duplicate_login_last_write_wins() {
        let (store, _, _) = store_with_jars();
        let first = test_tokens::mint("first@example.com", 3600);
        let second = test_tokens::mint("second@example.com", 3600);

        store.login_success(&first, "r1", "first@example.com").unwrap();
        store.login_success(&second, "r2", "second@example.com").unwrap();

        assert_eq!(store.current_user().unwrap().email, "second@example.com");
        assert_eq!(store.access_token(), Some(second));
    }
}
