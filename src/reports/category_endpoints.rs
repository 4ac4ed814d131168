//! The daily, weekly and monthly category analysis endpoints.
//!
//! Each endpoint ranks the user's categories by the amount recorded against
//! them inside a calendar window and reports the top five per transaction
//! type.

use std::collections::HashMap;
use std::ops::RangeInclusive;

use axum::{
    Extension, Json,
    extract::{Query, State},
};
use serde::{Deserialize, Serialize};
use time::{Date, OffsetDateTime};

use crate::{
    AppState, Error,
    models::UserID,
    stores::{
        CategoryStore, MonthlyReportStore, TransactionFilter, TransactionStore, UserStore,
    },
};

use super::{
    engine::{CategoryAnalysis, CategoryAnalysisReport, analyze_categories},
    range::{day_of, month_from_number, month_of, week_of_year},
};

/// Selects which day [get_daily_category_report] analyzes.
#[derive(Debug, Deserialize)]
pub struct DailyCategoryReportQuery {
    /// The day to analyze, defaulting to the current UTC day.
    pub date: Option<Date>,
}

/// The response for the daily category analysis endpoint.
#[derive(Debug, Serialize, Deserialize)]
pub struct DailyCategoryReportResponse {
    pub date: Date,
    pub income: Vec<CategoryAnalysis>,
    pub expense: Vec<CategoryAnalysis>,
}

/// A handler for ranking a user's categories over one day.
pub async fn get_daily_category_report<U, C, T, R>(
    State(state): State<AppState<U, C, T, R>>,
    Extension(user_id): Extension<UserID>,
    Query(query): Query<DailyCategoryReportQuery>,
) -> Result<Json<DailyCategoryReportResponse>, Error>
where
    U: UserStore + Send + Sync,
    C: CategoryStore + Send + Sync,
    T: TransactionStore + Send + Sync,
    R: MonthlyReportStore + Send + Sync,
{
    let date = query
        .date
        .unwrap_or_else(|| OffsetDateTime::now_utc().date());

    let report = category_report(
        &state.category_store,
        &state.transaction_store,
        user_id,
        day_of(date),
    )?;

    Ok(Json(DailyCategoryReportResponse {
        date,
        income: report.income,
        expense: report.expense,
    }))
}

/// Selects which week [get_weekly_category_report] analyzes.
#[derive(Debug, Deserialize)]
pub struct WeeklyCategoryReportQuery {
    /// The year to analyze, defaulting to the current UTC year.
    pub year: Option<i32>,
    /// The week of the year to analyze, where week 1 starts on January 1.
    /// Defaults to week 1.
    pub week: Option<u32>,
}

/// The response for the weekly category analysis endpoint.
#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WeeklyCategoryReportResponse {
    pub week: u32,
    pub start_date: Date,
    pub end_date: Date,
    pub income: Vec<CategoryAnalysis>,
    pub expense: Vec<CategoryAnalysis>,
}

/// A handler for ranking a user's categories over one week of the year.
pub async fn get_weekly_category_report<U, C, T, R>(
    State(state): State<AppState<U, C, T, R>>,
    Extension(user_id): Extension<UserID>,
    Query(query): Query<WeeklyCategoryReportQuery>,
) -> Result<Json<WeeklyCategoryReportResponse>, Error>
where
    U: UserStore + Send + Sync,
    C: CategoryStore + Send + Sync,
    T: TransactionStore + Send + Sync,
    R: MonthlyReportStore + Send + Sync,
{
    let year = query
        .year
        .unwrap_or_else(|| OffsetDateTime::now_utc().year());
    let week = query.week.unwrap_or(1);
    let window = week_of_year(year, week);

    let report = category_report(
        &state.category_store,
        &state.transaction_store,
        user_id,
        window.clone(),
    )?;

    Ok(Json(WeeklyCategoryReportResponse {
        week,
        start_date: *window.start(),
        end_date: *window.end(),
        income: report.income,
        expense: report.expense,
    }))
}

/// Selects which month [get_monthly_category_report] analyzes.
#[derive(Debug, Deserialize)]
pub struct MonthlyCategoryReportQuery {
    /// The year to analyze, defaulting to the current UTC year.
    pub year: Option<i32>,
    /// The month to analyze, defaulting to the current UTC month.
    pub month: Option<u8>,
}

/// The response for the monthly category analysis endpoint.
#[derive(Debug, Serialize, Deserialize)]
pub struct MonthlyCategoryReportResponse {
    pub year: i32,
    pub month: u8,
    pub income: Vec<CategoryAnalysis>,
    pub expense: Vec<CategoryAnalysis>,
}

/// A handler for ranking a user's categories over one calendar month.
///
/// # Errors
///
/// This function returns a [Error::InvalidDate] if the month number is not
/// in `1..=12`.
pub async fn get_monthly_category_report<U, C, T, R>(
    State(state): State<AppState<U, C, T, R>>,
    Extension(user_id): Extension<UserID>,
    Query(query): Query<MonthlyCategoryReportQuery>,
) -> Result<Json<MonthlyCategoryReportResponse>, Error>
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

    let report = category_report(
        &state.category_store,
        &state.transaction_store,
        user_id,
        month_of(year, month),
    )?;

    Ok(Json(MonthlyCategoryReportResponse {
        year,
        month: month as u8,
        income: report.income,
        expense: report.expense,
    }))
}

fn category_report<C, T>(
    category_store: &C,
    transaction_store: &T,
    user_id: UserID,
    window: RangeInclusive<Date>,
) -> Result<CategoryAnalysisReport, Error>
where
    C: CategoryStore,
    T: TransactionStore,
{
    let transactions = transaction_store.get_by_filter(
        user_id,
        TransactionFilter {
            date_range: Some(window),
            ..Default::default()
        },
    )?;
    let categories: HashMap<_, _> = category_store
        .get_by_user(user_id)?
        .into_iter()
        .map(|category| (category.id(), category))
        .collect();

    Ok(analyze_categories(&transactions, &categories))
}
