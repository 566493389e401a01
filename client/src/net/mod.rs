//! Networking modules for the REST service.
//!
//! SYSTEM CONTEXT
//! ==============
//! `http` wraps every request with credential injection and auth-failure
//! handling, `api` names the endpoints, and `types` defines the wire schema.

pub mod api;
pub mod http;
pub mod types;

#[cfg(test)]
pub(crate) mod test_support;
