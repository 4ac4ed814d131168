//! The income and expense report endpoints.
//!
//! Both serve the same shape: the total, the matching transactions newest
//! first, and a per-category summary. The expense report is the income
//! report with the other transaction type.

use std::collections::{BTreeMap, HashMap};

use axum::{
    Extension, Json,
    extract::{Query, State},
};
use serde::{Deserialize, Serialize};
use time::Date;

use crate::{
    AppState, Error,
    models::{Transaction, TransactionType, UserID},
    stores::{
        CategoryStore, MonthlyReportStore, SortOrder, TransactionFilter, TransactionStore,
        UserStore,
    },
};

use super::engine::{sum_amounts, summarize_by_category_name};

/// Narrows down which transactions [get_income_report] and
/// [get_expense_report] cover.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TypeReportQuery {
    /// Include only transactions recorded against the category with this
    /// name.
    pub category: Option<String>,
    /// The first day to include. Only applied when `end_date` is also set.
    pub start_date: Option<Date>,
    /// The last day to include. Only applied when `start_date` is also set.
    pub end_date: Option<Date>,
}

/// The name of a transaction's category, embedded in a
/// [CategorizedTransaction].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EmbeddedCategoryName {
    pub name: String,
}

/// A transaction bundled with the name of its category.
#[derive(Debug, Serialize, Deserialize)]
pub struct CategorizedTransaction {
    #[serde(flatten)]
    pub transaction: Transaction,
    pub category: EmbeddedCategoryName,
}

/// The response for the income and expense report endpoints.
#[derive(Debug, Default, Serialize, Deserialize)]
pub struct TypeReportResponse {
    /// The sum of all matching transaction amounts.
    pub total: f64,
    /// The matching transactions, newest first.
    pub transactions: Vec<CategorizedTransaction>,
    /// Totals per category name over the matching transactions.
    pub summary: BTreeMap<String, f64>,
}

/// A handler for reporting a user's income transactions, optionally narrowed
/// by category name and date range.
///
/// Filtering by a category name the user does not have yields an empty
/// report rather than an error.
pub async fn get_income_report<U, C, T, R>(
    State(state): State<AppState<U, C, T, R>>,
    Extension(user_id): Extension<UserID>,
    Query(query): Query<TypeReportQuery>,
) -> Result<Json<TypeReportResponse>, Error>
where
    U: UserStore + Send + Sync,
    C: CategoryStore + Send + Sync,
    T: TransactionStore + Send + Sync,
    R: MonthlyReportStore + Send + Sync,
{
    type_report(&state, user_id, query, TransactionType::Income).map(Json)
}

/// A handler for reporting a user's expense transactions, optionally
/// narrowed by category name and date range.
///
/// Filtering by a category name the user does not have yields an empty
/// report rather than an error.
pub async fn get_expense_report<U, C, T, R>(
    State(state): State<AppState<U, C, T, R>>,
    Extension(user_id): Extension<UserID>,
    Query(query): Query<TypeReportQuery>,
) -> Result<Json<TypeReportResponse>, Error>
where
    U: UserStore + Send + Sync,
    C: CategoryStore + Send + Sync,
    T: TransactionStore + Send + Sync,
    R: MonthlyReportStore + Send + Sync,
{
    type_report(&state, user_id, query, TransactionType::Expense).map(Json)
}

fn type_report<U, C, T, R>(
    state: &AppState<U, C, T, R>,
    user_id: UserID,
    query: TypeReportQuery,
    transaction_type: TransactionType,
) -> Result<TypeReportResponse, Error>
where
    U: UserStore + Send + Sync,
    C: CategoryStore + Send + Sync,
    T: TransactionStore + Send + Sync,
    R: MonthlyReportStore + Send + Sync,
{
    let categories: HashMap<_, _> = state
        .category_store
        .get_by_user(user_id)?
        .into_iter()
        .map(|category| (category.id(), category))
        .collect();

    let category_id = match &query.category {
        Some(name) => {
            let category = categories.values().find(|category| {
                category.name().as_ref() == name.as_str()
                    && category.category_type() == transaction_type
            });

            match category {
                Some(category) => Some(category.id()),
                // An unknown category matches nothing.
                None => return Ok(TypeReportResponse::default()),
            }
        }
        None => None,
    };

    let date_range = match (query.start_date, query.end_date) {
        (Some(start_date), Some(end_date)) => Some(start_date..=end_date),
        _ => None,
    };

    let transactions = state.transaction_store.get_by_filter(
        user_id,
        TransactionFilter {
            transaction_type: Some(transaction_type),
            date_range,
            category_id,
            sort_date: Some(SortOrder::Descending),
        },
    )?;

    let total = sum_amounts(&transactions);
    let summary = summarize_by_category_name(&transactions, &categories);

    let transactions = transactions
        .into_iter()
        .map(|transaction| {
            let name = categories
                .get(&transaction.category_id())
                .map(|category| category.name().to_string())
                .ok_or(Error::NotFound)?;

            Ok(CategorizedTransaction {
                transaction,
                category: EmbeddedCategoryName { name },
            })
        })
        .collect::<Result<Vec<_>, Error>>()?;

    Ok(TypeReportResponse {
        total,
        transactions,
        summary,
    })
}
