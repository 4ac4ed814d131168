//! Defines the model for cached monthly report totals.

use crate::models::{DatabaseID, UserID};

/// Memoized income and expense totals for one user's calendar month.
///
/// The stored totals are refreshed from the underlying transactions whenever
/// the monthly report is requested, so a cached row never goes stale.
#[derive(Debug, Clone, PartialEq)]
pub struct MonthlyReport {
    /// The ID of the report row.
    pub id: DatabaseID,
    /// The user the totals belong to.
    pub user_id: UserID,
    /// The calendar year of the report.
    pub year: i32,
    /// The calendar month of the report, 1-12.
    pub month: u8,
    /// The summed amount of all income transactions in the month.
    pub total_income: f64,
    /// The summed amount of all expense transactions in the month.
    pub total_expense: f64,
}
