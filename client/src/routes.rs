//! Static route table and navigation targets.
//!
//! The table is fixed at startup. Paths here must match the `<Route>`
//! entries registered in `app`.

#[cfg(test)]
#[path = "routes_test.rs"]
mod routes_test;

pub const LOGIN_PATH: &str = "/login";
pub const HOME_PATH: &str = "/";
pub const CUSTOMERS_PATH: &str = "/customers";
pub const FINANCIAL_REPORT_PATH: &str = "/financial-report";

/// Query parameter on the login route carrying the resumption target.
pub const REDIRECT_QUERY_PARAM: &str = "redirect";

/// A route path with its access requirement.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RouteDescriptor {
    pub path: &'static str,
    pub name: &'static str,
    pub requires_auth: bool,
}

pub const LOGIN_ROUTE: RouteDescriptor = RouteDescriptor { path: LOGIN_PATH, name: "Login", requires_auth: false };
pub const CUSTOMERS_ROUTE: RouteDescriptor =
    RouteDescriptor { path: CUSTOMERS_PATH, name: "Customers", requires_auth: true };
pub const FINANCIAL_REPORT_ROUTE: RouteDescriptor =
    RouteDescriptor { path: FINANCIAL_REPORT_PATH, name: "FinancialReport", requires_auth: true };
pub const HOME_ROUTE: RouteDescriptor = RouteDescriptor { path: HOME_PATH, name: "Home", requires_auth: true };

pub static ROUTES: &[RouteDescriptor] = &[LOGIN_ROUTE, CUSTOMERS_ROUTE, FINANCIAL_REPORT_ROUTE, HOME_ROUTE];

/// Look up the descriptor for `path`. A single trailing slash is ignored.
pub fn find_route(path: &str) -> Option<&'static RouteDescriptor> {
    let normalized = match path.strip_suffix('/') {
        Some(rest) if !rest.is_empty() => rest,
        _ => path,
    };
    ROUTES.iter().find(|r| r.path == normalized)
}

/// Where a navigation is headed: path plus raw query string (no `?`).
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct NavigationTarget {
    pub path: String,
    pub query: String,
}

impl NavigationTarget {
    pub fn new(path: impl Into<String>, query: impl Into<String>) -> Self {
        let query = query.into();
        let query = query.strip_prefix('?').map(str::to_owned).unwrap_or(query);
        Self { path: path.into(), query }
    }

    /// Split a full path such as `/financial-report?month=3`.
    pub fn parse(full_path: &str) -> Self {
        match full_path.split_once('?') {
            Some((path, query)) => Self::new(path, query),
            None => Self::new(full_path, ""),
        }
    }

    /// Path including the query string, as it would appear in the address bar.
    pub fn full_path(&self) -> String {
        if self.query.is_empty() {
            self.path.clone()
        } else {
            format!("{}?{}", self.path, self.query)
        }
    }

    pub fn route(&self) -> Option<&'static RouteDescriptor> {
        find_route(&self.path)
    }

    /// Value of query parameter `name`, percent-decoded.
    pub fn query_param(&self, name: &str) -> Option<String> {
        self.query
            .split('&')
            .filter_map(|pair| pair.split_once('=').or(Some((pair, ""))))
            .find(|(key, _)| *key == name)
            .map(|(_, value)| {
                let value = value.replace('+', " ");
                urlencoding::decode(&value).map_or(value.clone(), |v| v.into_owned())
            })
    }
}

/// Login route carrying `target` as the resumption hint.
pub fn login_with_redirect(target: &str) -> String {
    format!("{LOGIN_PATH}?{REDIRECT_QUERY_PARAM}={}", urlencoding::encode(target))
}

/// Whether `path` is an in-app destination safe to resume after login.
///
/// Rejects absolute and protocol-relative URLs, backslash tricks, and the
/// login route itself.
pub fn is_safe_resume_target(path: &str) -> bool {
    if !path.starts_with('/') || path.starts_with("//") || path.contains('\\') {
        return false;
    }
    let target = NavigationTarget::parse(path);
    find_route(&target.path).map_or(true, |r| r.path != LOGIN_PATH)
}
