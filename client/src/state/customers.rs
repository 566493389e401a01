//! Customer list state for the customers page.

#[cfg(test)]
#[path = "customers_test.rs"]
mod customers_test;

use crate::net::http::ApiError;
use crate::net::types::Customer;

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct CustomersState {
    pub items: Vec<Customer>,
    pub loading: bool,
    pub error: Option<String>,
}

/// User-facing message for a failed call, or `None` when the session was
/// rejected and a redirect to login is already underway.
pub fn failure_message(err: &ApiError) -> Option<String> {
    match err {
        ApiError::Unauthorized { .. } => None,
        ApiError::Transport(_) => Some("Server unreachable.".to_owned()),
        ApiError::Status { status: 404, .. } => Some("Record not found.".to_owned()),
        ApiError::Status { status: 400, body } => Some(format!("Rejected by server: {body}")),
        other => Some(other.to_string()),
    }
}

impl CustomersState {
    pub fn apply_load(&mut self, result: Result<Vec<Customer>, ApiError>) {
        self.loading = false;
        match result {
            Ok(mut items) => {
                items.sort_by(|a, b| a.full_name().cmp(&b.full_name()));
                self.items = items;
                self.error = None;
            }
            Err(e) => self.error = failure_message(&e),
        }
    }

    pub fn apply_created(&mut self, result: Result<Customer, ApiError>) {
        match result {
            Ok(customer) => {
                let at = self.items.partition_point(|c| c.full_name() <= customer.full_name());
                self.items.insert(at, customer);
                self.error = None;
            }
            Err(e) => self.error = failure_message(&e),
        }
    }

    /// Replace the stored record with the server's copy, keeping name order.
    pub fn apply_updated(&mut self, result: Result<Customer, ApiError>) {
        match result {
            Ok(customer) => {
                self.items.retain(|c| c.id != customer.id);
                let at = self.items.partition_point(|c| c.full_name() <= customer.full_name());
                self.items.insert(at, customer);
                self.error = None;
            }
            Err(e) => self.error = failure_message(&e),
        }
    }

    pub fn apply_deleted(&mut self, id: i64, result: Result<(), ApiError>) {
        match result {
            Ok(()) => {
                self.items.retain(|c| c.id != id);
                self.error = None;
            }
            Err(e) => self.error = failure_message(&e),
        }
    }
}
