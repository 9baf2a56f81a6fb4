//! Client Module
//!
//! The client-rendered side of the subsystem: the process-wide session
//! store and its persistence collaborators, the render-time route guard,
//! the ceremony orchestrator and the identity-provider HTTP client.
//!
//! # Wiring
//!
//! The embedding shell constructs everything once at process start:
//!
//! 1. Build an [`AppConfig`](crate::shared::AppConfig)
//! 2. Construct a [`SessionStore`](session::SessionStore) with the real
//!    storage and cookie collaborators and call `rehydrate()`
//! 3. Construct a [`CeremonyOrchestrator`](ceremony::CeremonyOrchestrator)
//!    sharing the store and the host's [`Notifier`](notify::Notifier)
//! 4. Wrap pages in a [`RouteGuard`](guard::RouteGuard) per mount

/// Durable storage and cookie-mirror collaborator traits
pub mod storage;

/// Process-wide session store
pub mod session;

/// Toast notification collaborator
pub mod notify;

/// Identity-provider HTTP client
pub mod provider;

/// Computed navigation targets
pub mod nav;

/// Render-time route guard
pub mod guard;

/// Auth ceremony orchestrator
pub mod ceremony;

/// Re-export commonly used types
pub use ceremony::{CeremonyContext, CeremonyOrchestrator};
pub use guard::{GuardMode, GuardState, RouteGuard};
pub use nav::NavigationTarget;
pub use notify::{Notifier, NullNotifier, RecordingNotifier};
pub use session::{ProfilePatch, SessionStore, UserProfile};
pub use storage::{CookieMirror, MemoryCookieJar, MemoryStorage, TokenStorage};
