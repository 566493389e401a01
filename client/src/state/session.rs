//! Session store: the single source of truth for "is the user signed in".
//!
//! SYSTEM CONTEXT
//! ==============
//! Read by the navigation guard on every route transition and by the HTTP
//! client on every request. Mutated by the login completion hook
//! (`establish`), by logout and by the HTTP client's auth-failure handler
//! (`invalidate`).
//!
//! INVARIANTS
//! ==========
//! The authentication flag is `true` iff a non-empty token is stored.
//! `establish` and `invalidate` change the token and the flag in one
//! synchronous step; listeners run only after both have changed.
//!
//! DESIGN
//! ======
//! The store is `Rc`-shared and single-threaded. Nothing here awaits, so a
//! read-decide-write sequence cannot interleave with another.

#[cfg(test)]
#[path = "session_test.rs"]
mod session_test;

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use crate::util::storage::{KeyValueStore, REDIRECT_PATH_KEY, StorageError, TOKEN_KEY};

/// Errors returned when establishing a session.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SessionError {
    /// The remote service returned an empty token.
    #[error("session token is empty")]
    EmptyToken,

    /// The token could not be persisted.
    #[error(transparent)]
    Storage(#[from] StorageError),
}

type Listener = Rc<dyn Fn(bool)>;

struct SessionInner {
    storage: Rc<dyn KeyValueStore>,
    authenticated: Cell<bool>,
    listeners: RefCell<Vec<Listener>>,
}

/// Shared handle to the current session. Cloning shares the same state.
#[derive(Clone)]
pub struct SessionStore {
    inner: Rc<SessionInner>,
}

impl std::fmt::Debug for SessionStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SessionStore")
            .field("authenticated", &self.inner.authenticated.get())
            .finish_non_exhaustive()
    }
}

fn present(token: Option<String>) -> Option<String> {
    token.filter(|t| !t.trim().is_empty())
}

impl SessionStore {
    /// Build the store from durable storage at process start.
    ///
    /// The flag starts as "token present and non-empty"; an unreachable
    /// backend therefore starts unauthenticated.
    pub fn initialize(storage: Rc<dyn KeyValueStore>) -> Self {
        let authenticated = present(storage.get(TOKEN_KEY)).is_some();
        Self {
            inner: Rc::new(SessionInner {
                storage,
                authenticated: Cell::new(authenticated),
                listeners: RefCell::default(),
            }),
        }
    }

    pub fn is_authenticated(&self) -> bool {
        self.inner.authenticated.get()
    }

    /// Current token, if a non-empty one is stored.
    pub fn token(&self) -> Option<String> {
        present(self.inner.storage.get(TOKEN_KEY))
    }

    /// Update the in-memory flag only. Token persistence is handled by
    /// [`Self::establish`] and [`Self::invalidate`].
    pub fn set_authenticated(&self, value: bool) {
        let previous = self.inner.authenticated.replace(value);
        if previous != value {
            self.notify(value);
        }
    }

    /// Persist `token` and mark the session authenticated.
    ///
    /// # Errors
    ///
    /// Returns [`SessionError::EmptyToken`] for a blank token, or
    /// [`SessionError::Storage`] if the write fails. In both cases the session
    /// is left unauthenticated with no token stored.
    pub fn establish(&self, token: &str) -> Result<(), SessionError> {
        if token.trim().is_empty() {
            self.invalidate();
            return Err(SessionError::EmptyToken);
        }
        if let Err(e) = self.inner.storage.set(TOKEN_KEY, token) {
            self.invalidate();
            return Err(e.into());
        }
        self.set_authenticated(true);
        Ok(())
    }

    /// Delete the token and clear the flag.
    pub fn invalidate(&self) {
        self.inner.storage.remove(TOKEN_KEY);
        self.set_authenticated(false);
    }

    /// Record the destination an unauthenticated navigation was denied.
    /// Only the latest value is kept.
    pub fn remember_redirect(&self, full_path: &str) {
        if let Err(e) = self.inner.storage.set(REDIRECT_PATH_KEY, full_path) {
            leptos::logging::warn!("could not persist redirect path {full_path}: {e}");
        }
    }

    /// Read and clear the pending redirect target.
    pub fn take_redirect(&self) -> Option<String> {
        let target = self.inner.storage.get(REDIRECT_PATH_KEY);
        self.inner.storage.remove(REDIRECT_PATH_KEY);
        target.filter(|t| !t.is_empty())
    }

    /// Peek at the pending redirect target without consuming it.
    #[cfg(test)]
    pub fn pending_redirect(&self) -> Option<String> {
        self.inner.storage.get(REDIRECT_PATH_KEY).filter(|t| !t.is_empty())
    }

    /// Call `listener` with the new flag after every change.
    pub fn subscribe(&self, listener: impl Fn(bool) + 'static) {
        self.inner.listeners.borrow_mut().push(Rc::new(listener));
    }

    fn notify(&self, value: bool) {
        // Snapshot so a listener may subscribe without a double borrow.
        let listeners: Vec<Listener> = self.inner.listeners.borrow().clone();
        for listener in listeners {
            listener(value);
        }
    }
}
