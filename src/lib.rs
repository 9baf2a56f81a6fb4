//! Authgate - Session and Route-Access Subsystem
//!
//! Authgate implements the session and route-access core of a
//! client-rendered application together with its request-inspection (edge)
//! layer:
//!
//! - deriving authentication state from a signed token,
//! - deciding per request/navigation whether the requester may proceed,
//!   be redirected, or be bounced to a login ceremony,
//! - driving the multi-step identity ceremony (register → verify-code →
//!   reset/complete) with idempotent resumption from URL-encoded state.
//!
//! # Module Structure
//!
//! The library is organized into three main modules:
//!
//! - **`shared`** - Types used by both layers
//!   - Error taxonomy, configuration, token codec
//!   - Route classification, ceremony query-parameter contract
//!
//! - **`client`** - Client-rendered side
//!   - Session store with durable-storage and cookie-mirror collaborators
//!   - Render-time route guard state machine
//!   - Ceremony orchestrator and identity-provider HTTP client
//!
//! - **`edge`** - Request-inspection layer (feature = `edge`, default)
//!   - Per-request allow/redirect decision (presence-only cookie check)
//!   - Axum middleware adapter
//!
//! # Two-Tier Guarding
//!
//! The edge guard is a coarse pre-filter: it checks only that the session
//! cookie exists and never decodes it, so a forged cookie passes. The
//! client guard re-derives the decision from decoded, expiry-checked
//! claims in the live session store and is the authority. Both layers
//! resolve ambiguity to the restrictive outcome and never panic on bad
//! input.
//!
//! # Error Handling
//!
//! All fallible operations return `Result` with
//! [`AuthError`](shared::AuthError). Ceremony failures are surfaced twice
//! on purpose: as a toast through the host's
//! [`Notifier`](client::Notifier), and as the returned error so forms can
//! show inline state.

/// Types shared between the client and edge layers
pub mod shared;

/// Client-side session, guard and ceremony subsystem
pub mod client;

/// Edge request-inspection layer
#[cfg(feature = "edge")]
pub mod edge;
