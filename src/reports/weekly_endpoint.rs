//! The weekly report endpoint.

use axum::{
    Extension, Json,
    extract::{Query, State},
};
use serde::{Deserialize, Serialize};
use time::{Date, OffsetDateTime};

use crate::{
    AppState, Error,
    models::{TransactionType, UserID},
    stores::{
        CategoryStore, MonthlyReportStore, SortOrder, TransactionFilter, TransactionStore,
        UserStore,
    },
};

use super::{
    charts::{Chart, ReportTransaction},
    engine::{bucket_by_weekday, sum_amounts_of_type},
    range::week_of,
};

/// Selects which week [get_weekly_report] reports on.
#[derive(Debug, Deserialize)]
pub struct WeeklyReportQuery {
    /// Any day inside the week to report on, defaulting to the current UTC
    /// day. The report always covers the Sunday-started week containing it.
    pub date: Option<Date>,
}

/// The response for the weekly report endpoint.
#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WeeklyReportResponse {
    /// The Sunday the reported week starts on.
    pub start_date: Date,
    /// The Saturday the reported week ends on.
    pub end_date: Date,
    pub total_income: f64,
    pub total_expense: f64,
    /// Income minus expense for the week.
    pub balance: f64,
    /// Per-weekday income and expense series, Sunday first.
    pub chart: Chart,
    /// The week's transactions, newest first.
    pub transactions: Vec<ReportTransaction>,
}

/// A handler for reporting a user's totals and per-weekday activity for one
/// week.
pub async fn get_weekly_report<U, C, T, R>(
    State(state): State<AppState<U, C, T, R>>,
    Extension(user_id): Extension<UserID>,
    Query(query): Query<WeeklyReportQuery>,
) -> Result<Json<WeeklyReportResponse>, Error>
where
    U: UserStore + Send + Sync,
    C: CategoryStore + Send + Sync,
    T: TransactionStore + Send + Sync,
    R: MonthlyReportStore + Send + Sync,
{
    let date = query
        .date
        .unwrap_or_else(|| OffsetDateTime::now_utc().date());
    let week = week_of(date);

    let transactions = state.transaction_store.get_by_filter(
        user_id,
        TransactionFilter {
            date_range: Some(week.clone()),
            sort_date: Some(SortOrder::Descending),
            ..Default::default()
        },
    )?;

    let total_income = sum_amounts_of_type(&transactions, TransactionType::Income);
    let total_expense = sum_amounts_of_type(&transactions, TransactionType::Expense);
    let chart = Chart::from_buckets(&bucket_by_weekday(&transactions));

    Ok(Json(WeeklyReportResponse {
        start_date: *week.start(),
        end_date: *week.end(),
        total_income,
        total_expense,
        balance: total_income - total_expense,
        chart,
        transactions: transactions.iter().map(ReportTransaction::from).collect(),
    }))
}
