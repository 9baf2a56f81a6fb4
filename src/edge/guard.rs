//! Edge Route Guard
//!
//! Runs once per incoming request, before any page renders. The decision
//! is a coarse, fast pre-filter: the session cookie is checked for
//! presence only, never decoded or verified, so it completes synchronously
//! inside the request cycle. A stale or forged cookie can pass this layer;
//! the client route guard re-validates with real claims and is the
//! authority.

use crate::shared::config::AppConfig;
use crate::shared::params::build_query;
use crate::shared::routes::{classify, is_static_asset, RouteClass};

/// Outcome of the edge check for one request
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EdgeDecision {
    /// Let the request through
    Allow,
    /// Send a temporary redirect to `location`
    Redirect { location: String },
}

/// Decide whether a request may proceed
///
/// - static assets always pass;
/// - a requester with a session cookie on a ceremony path is sent to the
///   protected home;
/// - a requester without one on a protected path is sent to the login
///   ceremony, with the original path attached as `from` for the
///   post-login return;
/// - everything else passes.
pub fn decide(path: &str, cookie_present: bool, config: &AppConfig) -> EdgeDecision {
    if is_static_asset(path) {
        return EdgeDecision::Allow;
    }

    match classify(path) {
        RouteClass::Ceremony if cookie_present => {
            tracing::debug!("Authenticated request to ceremony path {path}, bouncing home");
            EdgeDecision::Redirect {
                location: config.protected_home.clone(),
            }
        }
        RouteClass::Protected if !cookie_present => {
            tracing::debug!("Anonymous request to protected path {path}, bouncing to login");
            EdgeDecision::Redirect {
                location: format!(
                    "{}?{}",
                    config.login_path,
                    build_query(&[("from", path)])
                ),
            }
        }
        _ => EdgeDecision::Allow,
    }
}

/// Extract a cookie value from a `Cookie` request header
pub fn cookie_value<'a>(header: &'a str, name: &str) -> Option<&'a str> {
    header.split(';').find_map(|pair| {
        let (key, value) = pair.split_once('=')?;
        if key.trim() == name && !value.is_empty() {
            Some(value)
        } else {
            None
        }
    })
}
