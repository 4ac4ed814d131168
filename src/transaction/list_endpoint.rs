//! Defines the endpoint for listing a user's transactions.

use std::collections::{BTreeMap, HashMap};

use axum::{
    Extension, Json,
    extract::{Query, State},
};
use serde::{Deserialize, Serialize};
use time::Date;

use crate::{
    AppState, Error,
    models::{TransactionType, UserID},
    reports::{sum_amounts, summarize_by_type},
    stores::{
        CategoryStore, MonthlyReportStore, SortOrder, TransactionFilter, TransactionStore,
        UserStore,
    },
};

use super::create_endpoint::TransactionResponse;

/// Narrows down which transactions [get_transactions] lists.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TransactionListQuery {
    /// Include only transactions of this type.
    #[serde(rename = "type")]
    pub transaction_type: Option<TransactionType>,
    /// The first day to include. Only applied when `end_date` is also set.
    pub start_date: Option<Date>,
    /// The last day to include. Only applied when `start_date` is also set.
    pub end_date: Option<Date>,
}

/// The response for the transaction listing endpoint.
#[derive(Debug, Serialize, Deserialize)]
pub struct TransactionListResponse {
    /// The sum of all listed transaction amounts.
    pub total: f64,
    /// The matching transactions, newest first, each with its category.
    pub transactions: Vec<TransactionResponse>,
    /// Totals per transaction type over the listed transactions.
    pub summary: BTreeMap<String, f64>,
}

/// A handler for listing a user's transactions, newest first.
///
/// The date range only applies when both `startDate` and `endDate` are
/// given; a lone bound is ignored.
pub async fn get_transactions<U, C, T, R>(
    State(state): State<AppState<U, C, T, R>>,
    Extension(user_id): Extension<UserID>,
    Query(query): Query<TransactionListQuery>,
) -> Result<Json<TransactionListResponse>, Error>
where
    U: UserStore + Send + Sync,
    C: CategoryStore + Send + Sync,
    T: TransactionStore + Send + Sync,
    R: MonthlyReportStore + Send + Sync,
{
    let date_range = match (query.start_date, query.end_date) {
        (Some(start_date), Some(end_date)) => Some(start_date..=end_date),
        _ => None,
    };

    let transactions = state.transaction_store.get_by_filter(
        user_id,
        TransactionFilter {
            transaction_type: query.transaction_type,
            date_range,
            category_id: None,
            sort_date: Some(SortOrder::Descending),
        },
    )?;

    let categories: HashMap<_, _> = state
        .category_store
        .get_by_user(user_id)?
        .into_iter()
        .map(|category| (category.id(), category))
        .collect();

    let total = sum_amounts(&transactions);
    let summary = summarize_by_type(&transactions);

    let transactions = transactions
        .into_iter()
        .map(|transaction| {
            let category = categories
                .get(&transaction.category_id())
                .ok_or(Error::NotFound)?;

            Ok(TransactionResponse::new(transaction, category))
        })
        .collect::<Result<Vec<_>, Error>>()?;

    Ok(Json(TransactionListResponse {
        total,
        transactions,
        summary,
    }))
}
