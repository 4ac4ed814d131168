//! Defines the monthly report store trait.

use crate::{
    Error,
    models::{MonthlyReport, UserID},
};

/// Caches per-month income and expense totals.
pub trait MonthlyReportStore {
    /// Insert or refresh the cached totals for the given user and month.
    fn upsert(
        &mut self,
        user_id: UserID,
        year: i32,
        month: u8,
        total_income: f64,
        total_expense: f64,
    ) -> Result<MonthlyReport, Error>;

    /// Get the cached totals for the given user and month.
    ///
    /// Returns [Error::NotFound] if no report has been cached yet.
    fn get(&self, user_id: UserID, year: i32, month: u8) -> Result<MonthlyReport, Error>;
}
