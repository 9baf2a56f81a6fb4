//! Session lifecycle integration tests
//!
//! Exercises the session store across simulated process restarts and
//! against the edge guard that consumes its mirrored cookie.

mod common;

use authgate::client::{SessionStore, TokenStorage};
use authgate::edge::{decide, EdgeDecision};
use authgate::shared::config::{ACCESS_TOKEN_KEY, SESSION_COOKIE};
use common::{mint_token, test_config, test_store};
use pretty_assertions::assert_eq;

#[test]
fn rehydration_restores_a_valid_session_across_restart() {
    let (store, storage, cookies) = test_store();
    let access = mint_token("demo@example.com", 3600);
    store
        .login_success(&access, "refresh-1", "demo@example.com")
        .unwrap();

    // New store over the same durable storage, as after a reload.
    let restarted = SessionStore::new(storage.clone(), cookies.clone());
    restarted.rehydrate();

    assert!(restarted.is_authenticated());
    assert_eq!(
        restarted.current_user().unwrap().email,
        "demo@example.com".to_string()
    );
}

#[test]
fn rehydration_with_expired_token_stays_logged_out_and_does_not_error() {
    let (store, storage, _) = test_store();
    storage.set(ACCESS_TOKEN_KEY, &mint_token("old@example.com", -3600));

    store.rehydrate();

    assert!(!store.is_authenticated());
    assert_eq!(store.last_error(), None);
}

#[test]
fn rehydration_with_garbage_token_stays_logged_out() {
    let (store, storage, _) = test_store();
    storage.set(ACCESS_TOKEN_KEY, "not.a.token");

    store.rehydrate();

    assert!(!store.is_authenticated());
}

#[test]
fn logout_twice_is_a_no_op() {
    let (store, storage, cookies) = test_store();
    let access = mint_token("demo@example.com", 3600);
    store.login_success(&access, "r", "demo@example.com").unwrap();

    store.logout();
    store.logout();

    assert!(!store.is_authenticated());
    assert_eq!(storage.get(ACCESS_TOKEN_KEY), None);
    assert_eq!(cookies.get(SESSION_COOKIE), None);
}

#[test]
fn mirrored_cookie_opens_the_edge_guard() {
    let (store, _, cookies) = test_store();
    let config = test_config("http://127.0.0.1:9");

    // Anonymous: the edge guard bounces protected paths.
    assert!(matches!(
        decide("/dashboard", cookies.get(SESSION_COOKIE).is_some(), &config),
        EdgeDecision::Redirect { .. }
    ));

    let access = mint_token("demo@example.com", 3600);
    store.login_success(&access, "r", "demo@example.com").unwrap();

    // Logged in: the mirrored cookie now satisfies the presence check.
    assert_eq!(
        decide("/dashboard", cookies.get(SESSION_COOKIE).is_some(), &config),
        EdgeDecision::Allow
    );

    store.logout();
    assert!(matches!(
        decide("/dashboard", cookies.get(SESSION_COOKIE).is_some(), &config),
        EdgeDecision::Redirect { .. }
    ));
}

#[test]
fn duplicate_login_resolves_last_write_wins() {
    let (store, _, _) = test_store();
    let first = mint_token("first@example.com", 3600);
    let second = mint_token("second@example.com", 3600);

    store.login_success(&first, "r1", "first@example.com").unwrap();
    store.login_success(&second, "r2", "second@example.com").unwrap();

    let user = store.current_user().unwrap();
    assert_eq!(user.email, "second@example.com".to_string());
}
