//! Shared client-side state modules.
//!
//! DESIGN
//! ======
//! State is split by domain so individual pages can depend on small focused
//! models. `session` is the non-reactive source of truth; `auth` is the
//! reactive mirror the UI subscribes to.

pub mod auth;
pub mod customers;
pub mod report;
pub mod session;
