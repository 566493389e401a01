//! Wire DTOs for the remote authentication/data service.
//!
//! DESIGN
//! ======
//! Field names mirror the service's JSON so serde needs no renames. Money
//! arrives as JSON numbers and is kept as `f64`; the views only format it.

#[cfg(test)]
#[path = "types_test.rs"]
mod types_test;

use serde::{Deserialize, Serialize};

/// Credentials posted to `login/`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

/// Successful `login/` reply.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
pub struct LoginResponse {
    /// Opaque session token for the `Authorization: Token` header.
    pub token: String,
    pub user_id: i64,
    pub username: String,
}

/// A customer record.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Customer {
    pub id: i64,
    pub last_name: String,
    pub first_name: String,
    #[serde(default)]
    pub middle_name: Option<String>,
    pub phone_number: String,
    /// `true` for male, as stored by the service.
    pub gender: bool,
    /// ISO `YYYY-MM-DD`.
    pub birth_date: String,
}

impl Customer {
    /// "Last First Middle", skipping a missing middle name.
    pub fn full_name(&self) -> String {
        let mut name = format!("{} {}", self.last_name, self.first_name);
        if let Some(middle) = self.middle_name.as_deref().filter(|m| !m.is_empty()) {
            name.push(' ');
            name.push_str(middle);
        }
        name
    }
}

/// Payload for creating a customer.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct NewCustomer {
    pub last_name: String,
    pub first_name: String,
    pub middle_name: Option<String>,
    pub phone_number: String,
    pub gender: bool,
    pub birth_date: String,
}

/// Body for `DELETE customers/`; the service reads the id from the body.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub struct CustomerId {
    pub id: i64,
}

/// Paid total for one language.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct LanguageStat {
    pub language: String,
    pub amount: f64,
}

/// Paid total for one month (`"January 2024"`).
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct MonthlyStat {
    pub month: String,
    pub amount: f64,
}

/// One enrolment payment row.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct PaymentRow {
    /// `DD.MM.YYYY`, absent for unpaid enrolments.
    pub date: Option<String>,
    pub course: String,
    pub language: String,
    pub amount: f64,
    /// Whether the enrolment is paid.
    pub status: bool,
}

/// `financial-report/` reply for a date range.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct FinancialReport {
    pub total_payments: f64,
    /// Share of paid enrolments, 0..=100, two decimals.
    pub paid_percentage: f64,
    #[serde(default)]
    pub language_stats: Vec<LanguageStat>,
    #[serde(default)]
    pub monthly_stats: Vec<MonthlyStat>,
    #[serde(default)]
    pub detailed_data: Vec<PaymentRow>,
}
