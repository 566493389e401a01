//! Login completion and logout.
//!
//! SYSTEM CONTEXT
//! ==============
//! The login page calls [`sign_in`]; the navigation bar calls [`sign_out`].
//! These are the only paths besides the HTTP client's failure handler that
//! change the stored token.
//!
//! DESIGN
//! ======
//! The pending redirect target is consumed on every successful login, even
//! when the `redirect` hint on the login URL wins, so an abandoned earlier
//! navigation cannot resurface on a later login.

#[cfg(test)]
#[path = "auth_test.rs"]
mod auth_test;

use crate::net::api;
use crate::net::http::{HttpClient, Transport};
use crate::routes::{HOME_PATH, LOGIN_PATH, is_safe_resume_target};
use crate::state::session::{SessionError, SessionStore};

/// Post-login destination: the login URL hint if safe, else the stored
/// pending target if safe, else home.
pub fn resolve_destination(hint: Option<&str>, pending: Option<&str>) -> String {
    hint.filter(|h| is_safe_resume_target(h))
        .or_else(|| pending.filter(|p| is_safe_resume_target(p)))
        .unwrap_or(HOME_PATH)
        .to_owned()
}

/// Establish the session for `token` and return where to navigate next.
///
/// # Errors
///
/// Returns [`SessionError`] if the token is empty or cannot be stored; the
/// pending redirect target is left in place so a retry can still use it.
pub fn complete_login(session: &SessionStore, token: &str, redirect_hint: Option<&str>) -> Result<String, SessionError> {
    session.establish(token)?;
    let pending = session.take_redirect();
    Ok(resolve_destination(redirect_hint, pending.as_deref()))
}

/// Result of a successful [`sign_in`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SignedIn {
    pub username: String,
    pub destination: String,
}

/// Exchange credentials, establish the session, and return the destination.
///
/// # Errors
///
/// Returns a user-facing message when the credentials are rejected, the
/// service is unreachable, or the token cannot be stored.
pub async fn sign_in<T: Transport>(
    client: &HttpClient<T>,
    username: &str,
    password: &str,
    redirect_hint: Option<&str>,
) -> Result<SignedIn, String> {
    let resp = api::login(client, username, password).await?;
    let destination = complete_login(client.session(), &resp.token, redirect_hint)
        .map_err(|e| format!("Could not save session: {e}"))?;
    leptos::logging::log!("signed in as {}", resp.username);
    Ok(SignedIn { username: resp.username, destination })
}

/// Revoke the token remotely (best effort) and end the local session.
///
/// The local session ends whatever the service answers. Returns the route
/// to navigate to.
pub async fn sign_out<T: Transport>(client: &HttpClient<T>) -> &'static str {
    if client.session().token().is_some() {
        if let Err(e) = api::logout(client).await {
            leptos::logging::warn!("remote logout failed: {e}");
        }
    }
    client.session().invalidate();
    LOGIN_PATH
}
