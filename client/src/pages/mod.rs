//! Page modules for route-level screens.
//!
//! ARCHITECTURE
//! ============
//! Each page owns route-scoped orchestration and delegates request and state
//! handling to `net` and `state`. Access control stays outside the pages, in
//! the `Gate` wrapping each route.

pub mod customers;
pub mod financial_report;
pub mod home;
pub mod login;
