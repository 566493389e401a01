//! Hard (full page) navigation, as opposed to client-side route transitions.
//!
//! A hard redirect reloads the app so no in-memory state survives a session
//! invalidation.

/// Capability to force a full navigation to `path`.
pub trait NavigationForcer {
    fn force(&self, path: &str);
}

/// Sets `window.location.href`. A no-op outside the browser build.
#[derive(Clone, Copy, Debug, Default)]
pub struct BrowserLocation;

impl NavigationForcer for BrowserLocation {
    fn force(&self, path: &str) {
        #[cfg(feature = "csr")]
        {
            if let Some(window) = web_sys::window() {
                if let Err(e) = window.location().set_href(path) {
                    leptos::logging::warn!("hard redirect to {path} failed: {e:?}");
                }
            }
        }
        #[cfg(not(feature = "csr"))]
        {
            let _ = path;
        }
    }
}
