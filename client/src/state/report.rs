//! Financial report state and date-range handling.

#[cfg(test)]
#[path = "report_test.rs"]
mod report_test;

use crate::net::http::ApiError;
use crate::net::types::FinancialReport;
use crate::state::customers::failure_message;

#[derive(Clone, Debug, Default, PartialEq)]
pub struct ReportState {
    pub report: Option<FinancialReport>,
    pub loading: bool,
    pub error: Option<String>,
}

impl ReportState {
    pub fn apply_load(&mut self, result: Result<FinancialReport, ApiError>) {
        self.loading = false;
        match result {
            Ok(report) => {
                self.report = Some(report);
                self.error = None;
            }
            Err(e) => {
                self.report = None;
                self.error = failure_message(&e);
            }
        }
    }
}

fn is_iso_date(value: &str) -> bool {
    let bytes = value.as_bytes();
    if bytes.len() != 10 || bytes[4] != b'-' || bytes[7] != b'-' {
        return false;
    }
    let digits_ok = bytes
        .iter()
        .enumerate()
        .all(|(i, b)| i == 4 || i == 7 || b.is_ascii_digit());
    if !digits_ok {
        return false;
    }
    let month: u32 = value[5..7].parse().unwrap_or(0);
    let day: u32 = value[8..10].parse().unwrap_or(0);
    (1..=12).contains(&month) && (1..=31).contains(&day)
}

/// Require two ISO dates with `start <= end`.
pub fn validate_date_range(start: &str, end: &str) -> Result<(String, String), &'static str> {
    let (start, end) = (start.trim(), end.trim());
    if start.is_empty() || end.is_empty() {
        return Err("Choose both a start and an end date.");
    }
    if !is_iso_date(start) || !is_iso_date(end) {
        return Err("Dates must be YYYY-MM-DD.");
    }
    // ISO dates order lexicographically.
    if start > end {
        return Err("Start date must not be after end date.");
    }
    Ok((start.to_owned(), end.to_owned()))
}

/// Shown in place of an amount the service sent as NaN or infinity.
pub const AMOUNT_PLACEHOLDER: &str = "-";

/// Money with two decimals and space-separated thousands.
pub fn format_amount(amount: f64) -> String {
    if !amount.is_finite() {
        return AMOUNT_PLACEHOLDER.to_owned();
    }
    let formatted = format!("{:.2}", amount.abs());
    let (whole, cents) = formatted.split_once('.').unwrap_or((formatted.as_str(), "00"));
    let mut grouped = String::new();
    for (i, ch) in whole.chars().enumerate() {
        if i > 0 && (whole.len() - i) % 3 == 0 {
            grouped.push(' ');
        }
        grouped.push(ch);
    }
    let sign = if amount < 0.0 { "-" } else { "" };
    format!("{sign}{grouped}.{cents}")
}
