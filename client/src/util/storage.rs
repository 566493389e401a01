//! Durable key-value storage for the session token and redirect path.
//!
//! SYSTEM CONTEXT
//! ==============
//! The session store is the only reader/writer of these keys. Pages and the
//! HTTP client never touch `localStorage` directly.
//!
//! TRADE-OFFS
//! ==========
//! Reads never fail: an unavailable or unreadable backend reads as "absent",
//! which resolves to the unauthenticated state. Writes report failure so the
//! login path can refuse to mark a session authenticated without a token.

#[cfg(test)]
#[path = "storage_test.rs"]
mod storage_test;

/// Key holding the opaque session token.
pub const TOKEN_KEY: &str = "token";

/// Key holding the one-shot post-login redirect path (path + query).
pub const REDIRECT_PATH_KEY: &str = "redirectPath";

/// Errors reported by storage writes.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum StorageError {
    /// No storage backend is reachable (private mode, SSR, disabled storage).
    #[error("storage unavailable")]
    Unavailable,

    /// The backend rejected the write (quota exceeded, security error).
    #[error("storage write failed: {0}")]
    WriteFailed(String),
}

/// Key-value persistence that survives page reloads.
pub trait KeyValueStore {
    /// Read `key`. Missing keys and backend failures both return `None`.
    fn get(&self, key: &str) -> Option<String>;

    /// Write `value` under `key`.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError`] when the backend is unreachable or rejects the write.
    fn set(&self, key: &str, value: &str) -> Result<(), StorageError>;

    /// Delete `key`. Deleting a missing key is a no-op.
    fn remove(&self, key: &str);
}

// =============================================================================
// BROWSER
// =============================================================================

/// `window.localStorage` backend. Without the `csr` feature every read is
/// `None` and every write reports [`StorageError::Unavailable`].
#[derive(Clone, Copy, Debug, Default)]
pub struct BrowserStorage;

#[cfg(feature = "csr")]
fn local_storage() -> Option<web_sys::Storage> {
    web_sys::window().and_then(|w| w.local_storage().ok().flatten())
}

impl KeyValueStore for BrowserStorage {
    fn get(&self, key: &str) -> Option<String> {
        #[cfg(feature = "csr")]
        {
            local_storage()?.get_item(key).ok().flatten()
        }
        #[cfg(not(feature = "csr"))]
        {
            let _ = key;
            None
        }
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        #[cfg(feature = "csr")]
        {
            let storage = local_storage().ok_or(StorageError::Unavailable)?;
            storage
                .set_item(key, value)
                .map_err(|e| StorageError::WriteFailed(format!("{e:?}")))
        }
        #[cfg(not(feature = "csr"))]
        {
            let _ = (key, value);
            Err(StorageError::Unavailable)
        }
    }

    fn remove(&self, key: &str) {
        #[cfg(feature = "csr")]
        {
            if let Some(storage) = local_storage() {
                let _ = storage.remove_item(key);
            }
        }
        #[cfg(not(feature = "csr"))]
        {
            let _ = key;
        }
    }
}
