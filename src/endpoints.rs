//! The API endpoints URIs.

/// The route for registering a new user.
pub const REGISTER: &str = "/api/auth/register";
/// The route for logging in a user.
pub const LOG_IN: &str = "/api/auth/login";
/// The route for fetching the current user's profile.
pub const ME: &str = "/api/auth/me";
/// The route for updating the current user's profile.
pub const PROFILE: &str = "/api/auth/profile";
/// The route for changing the current user's password.
pub const ACCOUNT_PASSWORD: &str = "/api/account/password";
/// The route for updating or deleting the current user's account.
pub const ACCOUNT: &str = "/api/account";
/// The route to access transactions.
pub const TRANSACTIONS: &str = "/api/transactions";
/// The route to access categories.
pub const CATEGORIES: &str = "/api/categories";
/// The route for the default income category names.
pub const INCOME_CATEGORIES: &str = "/api/categories/income";
/// The route for the default expense category names.
pub const EXPENSE_CATEGORIES: &str = "/api/categories/expense";
/// The route for the monthly report.
pub const MONTHLY_REPORT: &str = "/api/reports/monthly";
/// The route for the daily report.
pub const DAILY_REPORT: &str = "/api/reports/daily";
/// The route for the weekly report.
pub const WEEKLY_REPORT: &str = "/api/reports/weekly";
/// The route for the daily category analysis.
pub const DAILY_CATEGORY_REPORT: &str = "/api/reports/daily/categories";
/// The route for the weekly category analysis.
pub const WEEKLY_CATEGORY_REPORT: &str = "/api/reports/weekly/categories";
/// The route for the monthly category analysis.
pub const MONTHLY_CATEGORY_REPORT: &str = "/api/reports/monthly/categories";
/// The route for the income report.
pub const INCOME_REPORT: &str = "/api/reports/income";
/// The route for the expense report.
pub const EXPENSE_REPORT: &str = "/api/reports/expense";
/// The basic liveness check.
pub const HEALTH: &str = "/health";
/// The API liveness check.
pub const API_HEALTH: &str = "/api/health";

// These tests are here so that we know when we call `Uri::from_shared` it will not panic.
#[cfg(test)]
mod endpoints_tests {
    use axum::http::Uri;

    use crate::endpoints;

    fn assert_endpoint_is_valid_uri(uri: &str) {
        assert!(uri.parse::<Uri>().is_ok());
    }

    #[test]
    fn endpoints_are_valid_uris() {
        assert_endpoint_is_valid_uri(endpoints::REGISTER);
        assert_endpoint_is_valid_uri(endpoints::LOG_IN);
        assert_endpoint_is_valid_uri(endpoints::ME);
        assert_endpoint_is_valid_uri(endpoints::PROFILE);
        assert_endpoint_is_valid_uri(endpoints::ACCOUNT_PASSWORD);
        assert_endpoint_is_valid_uri(endpoints::ACCOUNT);
        assert_endpoint_is_valid_uri(endpoints::TRANSACTIONS);
        assert_endpoint_is_valid_uri(endpoints::CATEGORIES);
        assert_endpoint_is_valid_uri(endpoints::INCOME_CATEGORIES);
        assert_endpoint_is_valid_uri(endpoints::EXPENSE_CATEGORIES);
        assert_endpoint_is_valid_uri(endpoints::MONTHLY_REPORT);
        assert_endpoint_is_valid_uri(endpoints::DAILY_REPORT);
        assert_endpoint_is_valid_uri(endpoints::WEEKLY_REPORT);
        assert_endpoint_is_valid_uri(endpoints::DAILY_CATEGORY_REPORT);
        assert_endpoint_is_valid_uri(endpoints::WEEKLY_CATEGORY_REPORT);
        assert_endpoint_is_valid_uri(endpoints::MONTHLY_CATEGORY_REPORT);
        assert_endpoint_is_valid_uri(endpoints::INCOME_REPORT);
        assert_endpoint_is_valid_uri(endpoints::EXPENSE_REPORT);
        assert_endpoint_is_valid_uri(endpoints::HEALTH);
        assert_endpoint_is_valid_uri(endpoints::API_HEALTH);
    }
}
