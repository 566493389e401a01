//! REST endpoints of the remote service, typed over [`HttpClient`].
//!
//! ERROR HANDLING
//! ==============
//! Every call returns `Result<_, ApiError>`. A 401 on a credentialed call has
//! already signed the user out and redirected by the time the error arrives,
//! so pages only need to stop treating the response as data.

#[cfg(test)]
#[path = "api_test.rs"]
mod api_test;

use super::http::{ApiError, ApiRequest, HttpClient, Transport};
use super::types::{Customer, CustomerId, FinancialReport, LoginRequest, LoginResponse, NewCustomer};

pub const LOGIN_ENDPOINT: &str = "login/";
pub const LOGOUT_ENDPOINT: &str = "logout/";
pub const CUSTOMERS_ENDPOINT: &str = "customers/";
pub const FINANCIAL_REPORT_ENDPOINT: &str = "financial-report/";

fn financial_report_request(start_date: &str, end_date: &str) -> ApiRequest {
    ApiRequest::get(FINANCIAL_REPORT_ENDPOINT)
        .with_query("start_date", start_date)
        .with_query("end_date", end_date)
}

fn login_failed_message(err: &ApiError) -> String {
    match err {
        ApiError::Status { status: 400 | 401, .. } => {
            err.detail().unwrap_or_else(|| "Invalid username or password.".to_owned())
        }
        ApiError::Transport(_) => "Server unreachable. Try again.".to_owned(),
        other => format!("Sign-in failed: {other}"),
    }
}

/// Exchange credentials for a session token via `POST login/`.
///
/// Sent without a credential, so a 401 here is a plain bad-password reply.
///
/// # Errors
///
/// Returns a user-facing message on any failure.
pub async fn login<T: Transport>(client: &HttpClient<T>, username: &str, password: &str) -> Result<LoginResponse, String> {
    let body = LoginRequest { username: username.to_owned(), password: password.to_owned() };
    client
        .send_json(ApiRequest::post(LOGIN_ENDPOINT), &body)
        .await
        .map_err(|e| login_failed_message(&e))
}

/// Revoke the token server-side via `POST logout/`.
///
/// # Errors
///
/// Returns the underlying [`ApiError`].
pub async fn logout<T: Transport>(client: &HttpClient<T>) -> Result<(), ApiError> {
    client.send_checked(ApiRequest::post(LOGOUT_ENDPOINT)).await.map(|_| ())
}

/// List all customers via `GET customers/`.
///
/// # Errors
///
/// Returns the underlying [`ApiError`].
pub async fn fetch_customers<T: Transport>(client: &HttpClient<T>) -> Result<Vec<Customer>, ApiError> {
    client.get_json(ApiRequest::get(CUSTOMERS_ENDPOINT)).await
}

/// Create a customer via `POST customers/`.
///
/// # Errors
///
/// Returns the underlying [`ApiError`]; validation failures are `Status { status: 400, .. }`.
pub async fn create_customer<T: Transport>(client: &HttpClient<T>, customer: &NewCustomer) -> Result<Customer, ApiError> {
    client.send_json(ApiRequest::post(CUSTOMERS_ENDPOINT), customer).await
}

/// Replace a customer via `PUT customers/` (id travels in the body).
///
/// # Errors
///
/// Returns the underlying [`ApiError`].
pub async fn update_customer<T: Transport>(client: &HttpClient<T>, customer: &Customer) -> Result<Customer, ApiError> {
    client.send_json(ApiRequest::put(CUSTOMERS_ENDPOINT), customer).await
}

/// Delete a customer via `DELETE customers/` (id travels in the body).
///
/// # Errors
///
/// Returns the underlying [`ApiError`]; an unknown id is `Status { status: 404, .. }`.
pub async fn delete_customer<T: Transport>(client: &HttpClient<T>, id: i64) -> Result<(), ApiError> {
    let request = ApiRequest::delete(CUSTOMERS_ENDPOINT).with_json(&CustomerId { id })?;
    client.send_checked(request).await.map(|_| ())
}

/// Fetch the payments report for `[start_date, end_date]` (ISO dates).
///
/// # Errors
///
/// Returns the underlying [`ApiError`].
pub async fn fetch_financial_report<T: Transport>(
    client: &HttpClient<T>,
    start_date: &str,
    end_date: &str,
) -> Result<FinancialReport, ApiError> {
    client.get_json(financial_report_request(start_date, end_date)).await
}
