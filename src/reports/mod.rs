//! Computes the report payloads served by the API: totals, per-category
//! summaries and rankings, trends against the previous period, and chart
//! series over daily, weekly, monthly and yearly windows.
//!
//! The number crunching lives in pure functions ([sum_amounts],
//! [analyze_categories], the `bucket_by_*` family) that the endpoint
//! handlers feed with transactions fetched through the stores.

mod category_endpoints;
mod charts;
mod daily_endpoint;
mod engine;
mod income_expense_endpoints;
mod monthly_endpoint;
mod range;
mod weekly_endpoint;

pub use category_endpoints::{
    DailyCategoryReportResponse, MonthlyCategoryReportResponse, WeeklyCategoryReportResponse,
    get_daily_category_report, get_monthly_category_report, get_weekly_category_report,
};
pub use charts::{Chart, Dataset, ReportTransaction};
pub use daily_endpoint::{DailyReportResponse, get_daily_report};
pub use engine::{
    ANALYSIS_LIMIT, Bucket, CategoryAnalysis, CategoryAnalysisReport, analyze_categories,
    bucket_by_hour, bucket_by_month, bucket_by_weekday, percentage_change, percentage_of,
    sum_amounts, sum_amounts_of_type, summarize_by_category_name, summarize_by_type, trend,
};
pub use income_expense_endpoints::{
    CategorizedTransaction, TypeReportResponse, get_expense_report, get_income_report,
};
pub use monthly_endpoint::{MonthlyChartPoint, MonthlyReportResponse, get_monthly_report};
pub use weekly_endpoint::{WeeklyReportResponse, get_weekly_report};
