//! The monthly report endpoint.

use axum::{
    Extension, Json,
    extract::{Query, State},
};
use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

use crate::{
    AppState, Error,
    models::{TransactionType, UserID},
    stores::{
        CategoryStore, MonthlyReportStore, TransactionFilter, TransactionStore, UserStore,
    },
};

use super::{
    engine::{bucket_by_month, percentage_change, sum_amounts_of_type, trend},
    range::{month_from_number, month_of, previous_month, year_of},
};

/// Selects which month [get_monthly_report] reports on.
///
/// Both fields default to the current UTC year and month.
#[derive(Debug, Deserialize)]
pub struct MonthlyReportQuery {
    pub year: Option<i32>,
    pub month: Option<u8>,
}

/// One month of the year-long chart series in a [MonthlyReportResponse].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MonthlyChartPoint {
    /// The month number as a string, `"1"` through `"12"`.
    pub month: String,
    pub income: f64,
    pub expense: f64,
}

/// The response for the monthly report endpoint.
#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MonthlyReportResponse {
    pub total_income: f64,
    pub total_expense: f64,
    pub year: i32,
    pub month: u8,
    /// Income growth against the previous month, as a whole percentage.
    pub income_trend: i64,
    /// Expense growth against the previous month, as a whole percentage.
    pub expense_trend: i64,
    /// Monthly income and expense totals for the whole reported year.
    pub chart_data: Vec<MonthlyChartPoint>,
    /// Net balance change against the previous month, as a whole
    /// percentage.
    pub percentage_change: i64,
}

/// A handler for reporting a user's totals and trends for one calendar
/// month.
///
/// The computed totals are also written back to the monthly report cache, so
/// the cached row for the month is refreshed on every request.
///
/// # Errors
///
/// This function returns a [Error::InvalidDate] if the month number is not
/// in `1..=12`.
pub async fn get_monthly_report<U, C, T, R>(
    State(mut state): State<AppState<U, C, T, R>>,
    Extension(user_id): Extension<UserID>,
    Query(query): Query<MonthlyReportQuery>,
) -> Result<Json<MonthlyReportResponse>, Error>
where
    U: UserStore + Send + Sync,
    C: CategoryStore + Send + Sync,
    T: TransactionStore + Send + Sync,
    R: MonthlyReportStore + Send + Sync,
{
    let today = OffsetDateTime::now_utc().date();
    let year = query.year.unwrap_or(today.year());
    let month = match query.month {
        Some(month) => month_from_number(month)?,
        None => today.month(),
    };

    let transactions = state.transaction_store.get_by_filter(
        user_id,
        TransactionFilter {
            date_range: Some(month_of(year, month)),
            ..Default::default()
        },
    )?;
    let total_income = sum_amounts_of_type(&transactions, TransactionType::Income);
    let total_expense = sum_amounts_of_type(&transactions, TransactionType::Expense);

    let (previous_year, previous) = previous_month(year, month);
    let previous_transactions = state.transaction_store.get_by_filter(
        user_id,
        TransactionFilter {
            date_range: Some(month_of(previous_year, previous)),
            ..Default::default()
        },
    )?;
    let previous_income = sum_amounts_of_type(&previous_transactions, TransactionType::Income);
    let previous_expense = sum_amounts_of_type(&previous_transactions, TransactionType::Expense);

    let year_transactions = state.transaction_store.get_by_filter(
        user_id,
        TransactionFilter {
            date_range: Some(year_of(year)),
            ..Default::default()
        },
    )?;
    let chart_data = bucket_by_month(&year_transactions)
        .into_iter()
        .map(|bucket| MonthlyChartPoint {
            month: bucket.label,
            income: bucket.income,
            expense: bucket.expense,
        })
        .collect();

    state
        .monthly_report_store
        .upsert(user_id, year, month as u8, total_income, total_expense)?;

    Ok(Json(MonthlyReportResponse {
        total_income,
        total_expense,
        year,
        month: month as u8,
        income_trend: trend(total_income, previous_income),
        expense_trend: trend(total_expense, previous_expense),
        chart_data,
        percentage_change: percentage_change(
            total_income,
            total_expense,
            previous_income,
            previous_expense,
        ),
    }))
}
