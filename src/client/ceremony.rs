/**
 * Auth Ceremony Orchestrator
 *
 * This module drives the multi-step identity ceremony:
 * register → verify-code → reset/complete, plus plain login.
 *
 * # Ceremony Flow
 *
 * 1. A ceremony page mounts and rebuilds its state from query parameters
 *    (`CeremonyContext::from_query`)
 * 2. User actions delegate to one orchestrator handler per step
 * 3. Each handler awaits exactly one identity-provider call, translates
 *    the outcome into session mutations and toasts, and computes the next
 *    navigation target
 *
 * # Contract
 *
 * - Every handler raises the orchestrator's loading flag for its own
 *   duration and clears it on every exit path (success, failure, panic)
 * - Failures are toasted AND returned, so forms can additionally show
 *   inline validation state; nothing is swallowed silently
 * - Preventing overlapping invocations of the same step is the caller's
 *   job (disable the triggering control while `is_loading()`); the
 *   orchestrator holds no re-entrancy lock
 * - Post-success navigation delays exist only so a toast can be seen;
 *   they are not a sequencing mechanism
 */
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;

use crate::client::nav::NavigationTarget;
use crate::client::notify::Notifier;
use crate::client::provider::IdentityClient;
use crate::client::session::SessionStore;
use crate::shared::config::AppConfig;
use crate::shared::error::AuthError;
use crate::shared::params::{decode_email_param, encode_email_param, parse_query, CeremonyPurpose};

/// Delay before navigating away from a page that just showed a toast
pub const NAV_AFTER_TOAST: Duration = Duration::from_millis(1200);

/// Delay before returning to login after a completed password reset
pub const NAV_AFTER_RESET: Duration = Duration::from_secs(2);

/// Delay before bouncing a step that mounted without its required state
pub const NAV_RECOVERY: Duration = Duration::from_secs(2);

/// Per-flow ceremony state, rebuilt from query parameters on page mount
///
/// Never persisted and never stored server-side; navigating away drops it.
#[derive(Debug, Clone)]
pub struct CeremonyContext {
    pub purpose: CeremonyPurpose,
    pub email_plain: Option<String>,
    pub email_encoded: Option<String>,
    pub reset_token: Option<String>,
    /// Post-login return path (`from`), login step only
    pub return_path: Option<String>,
}

impl CeremonyContext {
    /// Rebuild ceremony state from a query string (without the leading `?`)
    ///
    /// An unknown or absent `purpose` defaults to `Login`. The `email`
    /// parameter travels encoded; decoding falls back to the raw value so a
    /// hand-edited URL degrades to a validation failure, not a crash.
    pub fn from_query(query: &str) -> Self {
        let params = parse_query(query);
        let email_encoded = params.get("email").cloned();
        let email_plain = email_encoded.as_deref().map(decode_email_param);
        let purpose = params
            .get("purpose")
            .and_then(|p| p.parse().ok())
            .unwrap_or(CeremonyPurpose::Login);
        Self {
            purpose,
            email_plain,
            email_encoded,
            reset_token: params.get("token").cloned(),
            return_path: params.get("from").cloned(),
        }
    }

    /// The email carried into this step, if any
    pub fn email(&self) -> Option<&str> {
        self.email_plain.as_deref()
    }

    /// The email, or the error a step raises when it mounted without one
    pub fn require_email(&self) -> Result<&str, AuthError> {
        self.email().ok_or_else(|| AuthError::missing("email"))
    }

    /// Where a step with no resolvable email sends the user
    ///
    /// The step renders a transient "redirecting" state and performs this
    /// delayed navigation back to the earlier, safe step, carrying an
    /// explanatory message.
    pub fn recovery_target(&self) -> NavigationTarget {
        let (path, message) = match self.purpose {
            CeremonyPurpose::PasswordReset => (
                "/auth/forgot-password",
                "We could not determine your email. Please request a new reset code.",
            ),
            CeremonyPurpose::Registration => (
                "/auth/register",
                "We could not determine your email. Please register again.",
            ),
            CeremonyPurpose::Login => ("/auth/login", "Please log in to continue."),
        };
        NavigationTarget::with_query(path, &[("message", message)], NAV_RECOVERY)
    }
}

/// Clears the loading flag on every exit path, panics included
struct LoadingGuard<'a>(&'a AtomicBool);

impl Drop for LoadingGuard<'_> {
    fn drop(&mut self) {
        self.0.store(false, Ordering::SeqCst);
    }
}

/// Controller exposing one handler per ceremony step
pub struct CeremonyOrchestrator {
    client: IdentityClient,
    session: Arc<SessionStore>,
    notifier: Arc<dyn Notifier>,
    config: AppConfig,
    loading: AtomicBool,
}

impl CeremonyOrchestrator {
    pub fn new(config: AppConfig, session: Arc<SessionStore>, notifier: Arc<dyn Notifier>) -> Self {
        Self {
            client: IdentityClient::new(config.clone()),
            session,
            notifier,
            config,
            loading: AtomicBool::new(false),
        }
    }

    /// Whether a handler is currently in flight
    ///
    /// Callers disable the triggering control while this is true.
    pub fn is_loading(&self) -> bool {
        self.loading.load(Ordering::SeqCst)
    }

    /// Log in and compute where to land afterwards
    ///
    /// On success the session records the tokens and the target is the
    /// `from` return path when present, the protected home otherwise. On
    /// failure the session records the error, a toast is shown and the
    /// error is returned for form-level handling.
    pub async fn login(
        &self,
        email: &str,
        password: &str,
        return_path: Option<&str>,
    ) -> Result<NavigationTarget, AuthError> {
        let _busy = self.begin();
        self.session.login_start();

        match self.client.login(email, password).await {
            Ok(success) => {
                let access = match success.payload.access_token {
                    Some(token) => token,
                    None => {
                        let e = AuthError::provider(
                            Some(success.status),
                            Some("Login response carried no access token".to_string()),
                        );
                        self.session.login_failure(&e.toast_message());
                        self.notifier.error(&e.toast_message());
                        return Err(e);
                    }
                };
                let refresh = success.payload.refresh_token.unwrap_or_default();

                if let Err(e) = self.session.login_success(&access, &refresh, email) {
                    self.notifier.error(&e.toast_message());
                    return Err(e);
                }

                self.notifier.success("Logged in successfully");
                let destination = return_path.unwrap_or(&self.config.protected_home);
                Ok(NavigationTarget::delayed(destination, NAV_AFTER_TOAST))
            }
            Err(e) => {
                let message = self.failure_message(&e, "Login failed. Please try again.");
                self.session.login_failure(&message);
                self.notifier.error(&message);
                Err(e)
            }
        }
    }

    /// Register a new account and move to code confirmation
    pub async fn register(
        &self,
        name: &str,
        email: &str,
        password: &str,
    ) -> Result<NavigationTarget, AuthError> {
        let _busy = self.begin();

        match self.client.signup(name, email, password).await {
            Ok(_) => {
                self.notifier
                    .success("Account created. We sent a confirmation code to your email.");
                Ok(confirm_code_target(email, CeremonyPurpose::Registration))
            }
            Err(e) => {
                self.toast_failure(&e, "Email already used or registration failed");
                Err(e)
            }
        }
    }

    /// Request a password-reset code and move to code confirmation
    pub async fn request_password_reset(&self, email: &str) -> Result<NavigationTarget, AuthError> {
        let _busy = self.begin();

        match self.client.forgot_password(email).await {
            Ok(_) => {
                self.notifier.success("A reset code has been sent to your email");
                Ok(confirm_code_target(email, CeremonyPurpose::PasswordReset))
            }
            Err(e) => {
                self.toast_failure(&e, "Could not request a password reset");
                Err(e)
            }
        }
    }

    /// Confirm a one-time code and branch on the ceremony purpose
    ///
    /// Password resets continue to the reset step carrying the (encoded)
    /// email and the opaque reset token; registrations land on the
    /// completion page; anything else returns to the protected home.
    pub async fn confirm_code(
        &self,
        code: &str,
        email: &str,
        purpose: CeremonyPurpose,
        email_encoded: Option<&str>,
    ) -> Result<NavigationTarget, AuthError> {
        let _busy = self.begin();

        match self.client.verify_code(email, code, purpose).await {
            Ok(success) => {
                self.notifier.success("Code confirmed");
                let encoded = email_encoded
                    .map(str::to_string)
                    .unwrap_or_else(|| encode_email_param(email));

                let target = match purpose {
                    CeremonyPurpose::PasswordReset => {
                        let token = success.payload.reset_token.unwrap_or_default();
                        let mut pairs = vec![("email", encoded.as_str())];
                        if !token.is_empty() {
                            pairs.push(("token", token.as_str()));
                        }
                        NavigationTarget::with_query(
                            "/auth/reset-password",
                            &pairs,
                            NAV_AFTER_TOAST,
                        )
                    }
                    CeremonyPurpose::Registration => {
                        NavigationTarget::delayed("/registration-complete", NAV_AFTER_TOAST)
                    }
                    CeremonyPurpose::Login => NavigationTarget::delayed(
                        self.config.protected_home.clone(),
                        NAV_AFTER_TOAST,
                    ),
                };
                Ok(target)
            }
            Err(e) => {
                self.toast_failure(&e, "Invalid or expired code");
                Err(e)
            }
        }
    }

    /// Ask for the one-time code to be sent again
    pub async fn resend_code(&self, email: &str) -> Result<(), AuthError> {
        let _busy = self.begin();

        match self.client.resend_code(email).await {
            Ok(_) => {
                self.notifier.success("A new code has been sent");
                Ok(())
            }
            Err(e) => {
                self.toast_failure(&e, "Could not resend the code");
                Err(e)
            }
        }
    }

    /// Set a new password and return to login after a short delay
    pub async fn reset_password(
        &self,
        new_password: &str,
        reset_token: &str,
    ) -> Result<NavigationTarget, AuthError> {
        let _busy = self.begin();

        match self.client.reset_password(reset_token, new_password).await {
            Ok(_) => {
                self.notifier
                    .success("Password updated. You can now log in.");
                Ok(NavigationTarget::delayed(
                    self.config.login_path.clone(),
                    NAV_AFTER_RESET,
                ))
            }
            Err(e) => {
                self.toast_failure(&e, "Password reset failed");
                Err(e)
            }
        }
    }

    fn begin(&self) -> LoadingGuard<'_> {
        self.loading.store(true, Ordering::SeqCst);
        LoadingGuard(&self.loading)
    }

    /// Provider message when it sent one, the step's fallback otherwise
    fn failure_message(&self, error: &AuthError, fallback: &str) -> String {
        match error {
            AuthError::IdentityProvider {
                message: Some(message),
                ..
            } => message.clone(),
            _ => fallback.to_string(),
        }
    }

    fn toast_failure(&self, error: &AuthError, fallback: &str) {
        let message = self.failure_message(error, fallback);
        tracing::warn!("Ceremony step failed: {error}");
        self.notifier.error(&message);
    }
}

/// Target for the code-confirmation step, email encoded for transport
fn confirm_code_target(email: &str, purpose: CeremonyPurpose) -> NavigationTarget {
    let encoded = encode_email_param(email);
    NavigationTarget::with_query(
        "/auth/otp-confirmation",
        &[("email", &encoded), ("purpose", &purpose.to_string())],
        NAV_AFTER_TOAST,
    )
}
