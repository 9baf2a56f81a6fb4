/**
 * Edge Guard Middleware
 *
 * Axum adapter for the edge route guard. It runs for every in-bound
 * request before any handler, reads the session cookie from the request
 * headers, and either lets the request through or answers with a
 * temporary redirect. No suspension points before the decision: the guard
 * itself is synchronous.
 */
use std::sync::Arc;

use axum::{
    extract::{Request, State},
    http::header::COOKIE,
    middleware::Next,
    response::{IntoResponse, Redirect, Response},
};

use crate::edge::guard::{cookie_value, decide, EdgeDecision};
use crate::shared::config::{AppConfig, SESSION_COOKIE};

/// Edge guard middleware
///
/// Attach with `axum::middleware::from_fn_with_state`:
///
/// ```rust,no_run
/// use std::sync::Arc;
/// use axum::{middleware, routing::get, Router};
/// use authgate::edge::middleware::edge_guard;
/// use authgate::shared::AppConfig;
///
/// let config = Arc::new(
///     AppConfig::builder()
///         .provider_url("http://127.0.0.1:3000")
///         .build()
///         .unwrap(),
/// );
/// let app: Router = Router::new()
///     .route("/dashboard", get(|| async { "home" }))
///     .layer(middleware::from_fn_with_state(config, edge_guard));
/// ```
pub async fn edge_guard(
    State(config): State<Arc<AppConfig>>,
    request: Request,
    next: Next,
) -> Response {
    let path = request.uri().path().to_string();
    let cookie_present = request
        .headers()
        .get(COOKIE)
        .and_then(|h| h.to_str().ok())
        .and_then(|h| cookie_value(h, SESSION_COOKIE))
        .is_some();

    match decide(&path, cookie_present, &config) {
        EdgeDecision::Allow => next.run(request).await,
        EdgeDecision::Redirect { location } => {
            tracing::debug!("Edge redirect {path} -> {location}");
            Redirect::temporary(&location).into_response()
        }
    }
}
