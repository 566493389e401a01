//! Auth state mirrored into the reactive UI.
//!
//! SYSTEM CONTEXT
//! ==============
//! Used by the navigation bar and pages for identity-dependent rendering.
//! Route access decisions never read this; they go through the session store.

#[cfg(test)]
#[path = "auth_test.rs"]
mod auth_test;

/// Authentication state tracking the signed-in flag and the last known user.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct AuthState {
    pub authenticated: bool,
    pub username: Option<String>,
}

impl AuthState {
    #[must_use]
    pub fn signed_in(username: impl Into<String>) -> Self {
        Self { authenticated: true, username: Some(username.into()) }
    }

    /// Apply a session flag change. Signing out also forgets the username.
    pub fn apply_session_flag(&mut self, authenticated: bool) {
        self.authenticated = authenticated;
        if !authenticated {
            self.username = None;
        }
    }

    /// Label for the navigation bar.
    pub fn display_name(&self) -> &str {
        match (&self.username, self.authenticated) {
            (Some(name), true) => name,
            (None, true) => "Signed in",
            (_, false) => "Guest",
        }
    }
}
