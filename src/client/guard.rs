//! Client Route Guard
//!
//! Render-time gate wrapping a page or subtree. Unlike the edge guard,
//! which only sees cookie presence, this guard re-derives the access
//! decision from the live session store, covering cases the edge cannot
//! (store hydration right after login, a forged cookie). It is the
//! authoritative layer of the two.
//!
//! The guard is a small state machine: `Checking -> {Allow, Redirect}`.
//! Callers render a neutral loading indicator while `Checking` and must
//! not flash protected content before the decision settles. A settled
//! guard ignores further `resolve` calls, so exactly one redirect and one
//! notice are ever produced per mount.

use std::time::Duration;

use crate::client::nav::NavigationTarget;
use crate::client::notify::Notifier;
use crate::client::session::SessionStore;
use crate::shared::config::AppConfig;

/// What kind of page the guard wraps
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GuardMode {
    /// Always render
    Public,
    /// Render only for authenticated sessions
    Protected,
    /// Render only for unauthenticated sessions (ceremony pages)
    CeremonyOnly,
}

/// Guard decision state
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GuardState {
    /// Decision pending; render a neutral loading indicator
    Checking,
    /// Render the wrapped content
    Allow,
    /// Render nothing; the shell performs this navigation
    Redirect(NavigationTarget),
}

/// Render-time route guard state machine
#[derive(Debug)]
pub struct RouteGuard {
    mode: GuardMode,
    state: GuardState,
}

impl RouteGuard {
    /// Create a guard in the `Checking` state
    pub fn new(mode: GuardMode) -> Self {
        Self {
            mode,
            state: GuardState::Checking,
        }
    }

    /// Current decision
    pub fn state(&self) -> &GuardState {
        &self.state
    }

    /// Whether the decision is final
    pub fn is_settled(&self) -> bool {
        !matches!(self.state, GuardState::Checking)
    }

    /// Derive the decision from the live session
    ///
    /// Idempotent: once settled, repeated calls return the existing
    /// decision without another notice or redirect.
    pub fn resolve(
        &mut self,
        session: &SessionStore,
        current_path: &str,
        notifier: &dyn Notifier,
        config: &AppConfig,
    ) -> &GuardState {
        if self.is_settled() {
            return &self.state;
        }

        self.state = match self.mode {
            GuardMode::Public => GuardState::Allow,
            GuardMode::CeremonyOnly if session.is_authenticated() => {
                notifier.warning("You are already logged in");
                GuardState::Redirect(NavigationTarget::immediate(config.protected_home.clone()))
            }
            GuardMode::Protected if !session.is_authenticated() => {
                tracing::warn!("Unauthenticated access to {current_path}, redirecting to login");
                notifier.warning("Please log in to continue");
                GuardState::Redirect(NavigationTarget::with_query(
                    &config.login_path,
                    &[("from", current_path)],
                    Duration::ZERO,
                ))
            }
            _ => GuardState::Allow,
        };
        &self.state
    }
}
