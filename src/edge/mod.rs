//! Edge Module
//!
//! The request-inspection layer: a per-request, pre-render guard that
//! classifies the path, checks session-cookie presence, and allows or
//! redirects. Deliberately coarse and non-authoritative; the client route
//! guard re-validates with decoded claims.
//!
//! This module is only compiled when the `edge` feature is enabled.

/// Edge decision logic
pub mod guard;

/// Axum middleware adapter
pub mod middleware;

/// Re-export commonly used items
pub use guard::{decide, EdgeDecision};
pub use middleware::edge_guard;
