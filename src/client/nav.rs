//! Navigation Targets
//!
//! Guards and ceremony handlers never navigate themselves; they compute a
//! [`NavigationTarget`] and the host shell performs it. A target may carry
//! a delay so a toast can be seen before the page changes — the delay is
//! cosmetic and must never be relied on for sequencing.

use std::time::Duration;

use crate::shared::params::build_query;

/// A computed navigation, with an optional cosmetic delay
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NavigationTarget {
    /// Path plus query string, e.g. `/auth/login?from=%2Fdashboard`
    pub location: String,
    /// How long the shell should wait before navigating
    pub delay: Duration,
}

impl NavigationTarget {
    /// Navigate immediately
    pub fn immediate(location: impl Into<String>) -> Self {
        Self {
            location: location.into(),
            delay: Duration::ZERO,
        }
    }

    /// Navigate after `delay`
    pub fn delayed(location: impl Into<String>, delay: Duration) -> Self {
        Self {
            location: location.into(),
            delay,
        }
    }

    /// Build a target from a path and query pairs
    pub fn with_query(path: &str, pairs: &[(&str, &str)], delay: Duration) -> Self {
        let location = if pairs.is_empty() {
            path.to_string()
        } else {
            format!("{path}?{}", build_query(pairs))
        };
        Self { location, delay }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_immediate_has_no_delay() {
        let target = NavigationTarget::immediate("/dashboard");
        assert_eq!(target.location, "/dashboard");
        assert_eq!(target.delay, Duration::ZERO);
    }

    #[test]
    fn test_with_query_encodes_pairs() {
        let target =
            NavigationTarget::with_query("/auth/login", &[("from", "/dashboard")], Duration::ZERO);
        assert_eq!(target.location, "/auth/login?from=%2Fdashboard");
    }

    #[test]
    fn test_with_query_empty_pairs() {
        let target = NavigationTarget::with_query("/registration-complete", &[], Duration::ZERO);
        assert_eq!(target.location, "/registration-complete");
    }
}
