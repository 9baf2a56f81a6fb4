//! Route Classification
//!
//! Every path maps to exactly one of `{Public, Ceremony, Protected}`:
//!
//! - `Public` - accessible regardless of auth state
//! - `Ceremony` - auth-flow pages, accessible only to unauthenticated
//!   requesters (authenticated requesters are redirected away)
//! - `Protected` - accessible only to authenticated requesters
//!
//! `/auth/*` is always `Ceremony`, even for paths that also appear in the
//! public list. Static-asset paths bypass classification entirely and are
//! always allowed.

/// Classification of a request path
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RouteClass {
    /// Accessible regardless of auth state
    Public,
    /// Auth-ceremony page, unauthenticated requesters only
    Ceremony,
    /// Authenticated requesters only
    Protected,
}

/// Paths accessible regardless of auth state
const PUBLIC_PATHS: &[&str] = &[
    "/",
    "/auth/login",
    "/auth/register",
    "/auth/forgot-password",
    "/auth/reset-password",
    "/auth/otp-confirmation",
    "/registration-complete",
];

/// Prefixes always allowed without classification (build assets, API, images)
const ASSET_PREFIXES: &[&str] = &["/api/", "/_next/", "/images/", "/favicon"];

/// Image file extensions always allowed without classification
const IMAGE_EXTENSIONS: &[&str] = &[
    ".png", ".jpg", ".jpeg", ".gif", ".svg", ".webp", ".ico", ".bmp", ".avif",
];

/// Whether a path is a static asset that bypasses all route classification
pub fn is_static_asset(path: &str) -> bool {
    ASSET_PREFIXES.iter().any(|p| path.starts_with(p))
        || IMAGE_EXTENSIONS
            .iter()
            .any(|ext| path.to_ascii_lowercase().ends_with(ext))
}

/// Classify a request path
pub fn classify(path: &str) -> RouteClass {
    if is_static_asset(path) {
        return RouteClass::Public;
    }
    if path == "/auth" || path.starts_with("/auth/") {
        return RouteClass::Ceremony;
    }
    if PUBLIC_PATHS.contains(&path) {
        return RouteClass::Public;
    }
    RouteClass::Protected
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_root_is_public() {
        assert_eq!(classify("/"), RouteClass::Public);
    }

    #[test]
    fn test_auth_pages_are_ceremony() {
        assert_eq!(classify("/auth/login"), RouteClass::Ceremony);
        assert_eq!(classify("/auth/register"), RouteClass::Ceremony);
        assert_eq!(classify("/auth/forgot-password"), RouteClass::Ceremony);
        assert_eq!(classify("/auth/reset-password"), RouteClass::Ceremony);
        assert_eq!(classify("/auth/otp-confirmation"), RouteClass::Ceremony);
    }

    #[test]
    fn test_registration_complete_is_public() {
        assert_eq!(classify("/registration-complete"), RouteClass::Public);
    }

    #[test]
    fn test_everything_else_is_protected() {
        assert_eq!(classify("/dashboard"), RouteClass::Protected);
        assert_eq!(classify("/settings/profile"), RouteClass::Protected);
    }

    #[test]
    fn test_asset_prefixes_bypass() {
        assert!(is_static_asset("/api/health"));
        assert!(is_static_asset("/_next/static/chunk.js"));
        assert!(is_static_asset("/images/logo.png"));
        assert!(is_static_asset("/favicon.ico"));
    }

    #[test]
    fn test_image_extensions_bypass() {
        assert!(is_static_asset("/some/random/photo.JPG"));
        assert!(is_static_asset("/banner.webp"));
        assert!(!is_static_asset("/dashboard"));
    }

    #[test]
    fn test_assets_classify_public() {
        assert_eq!(classify("/images/logo.png"), RouteClass::Public);
        assert_eq!(classify("/api/anything"), RouteClass::Public);
    }
}
