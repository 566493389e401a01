//! # client
//!
//! Leptos CSR frontend for the Linguadesk language-school back office.
//!
//! The crate owns the client-side session: the token in durable storage, the
//! navigation guard that keeps signed-out users off protected routes, and the
//! HTTP client that attaches the credential and ends the session on a 401.
//! Browser capabilities sit behind the `csr` feature; without it the crate
//! builds and tests natively.

pub mod app;
pub mod auth;
pub mod components;
pub mod guard;
pub mod net;
pub mod pages;
pub mod routes;
pub mod state;
pub mod util;
