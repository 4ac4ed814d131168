//! Defines the endpoint for recording a new transaction.

use axum::{Extension, Json, extract::State, http::StatusCode};
use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

use crate::{
    AppState, Error,
    models::{Category, DatabaseID, Transaction, TransactionType, UserID},
    stores::{CategoryStore, MonthlyReportStore, TransactionStore, UserStore},
};

/// The request body for creating a transaction.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateTransactionForm {
    /// Whether the transaction is an income or an expense.
    #[serde(rename = "type")]
    pub transaction_type: TransactionType,
    /// The amount of money spent or earned. Must be positive.
    pub amount: f64,
    /// When the transaction happened, as an RFC 3339 date-time.
    #[serde(with = "time::serde::rfc3339")]
    pub date: OffsetDateTime,
    /// A short name for the transaction.
    pub name: String,
    /// Optional text detailing the transaction.
    #[serde(default)]
    pub description: Option<String>,
    /// The category to record the transaction against.
    pub category_id: DatabaseID,
}

/// The category fields embedded in a transaction response.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EmbeddedCategory {
    /// The name of the category.
    pub name: String,
    /// The type of the category.
    #[serde(rename = "type")]
    pub category_type: TransactionType,
}

/// A stored transaction along with its denormalized category.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TransactionResponse {
    /// The stored transaction.
    #[serde(flatten)]
    pub transaction: Transaction,
    /// The name and type of the transaction's category.
    pub category: EmbeddedCategory,
}

impl TransactionResponse {
    /// Pair a stored transaction with its category's name and type.
    pub fn new(transaction: Transaction, category: &Category) -> Self {
        Self {
            transaction,
            category: EmbeddedCategory {
                name: category.name().to_string(),
                category_type: category.category_type(),
            },
        }
    }
}

/// Handler for recording a new transaction.
///
/// `date` may carry any UTC offset; it is normalized to UTC before storage.
///
/// # Errors
///
/// This function will return an error in a few situations.
/// - The category does not exist or belongs to another user.
/// - The category's type differs from the transaction's type.
/// - The amount is not positive, or the name is empty.
pub async fn create_transaction<U, C, T, R>(
    State(mut state): State<AppState<U, C, T, R>>,
    Extension(user_id): Extension<UserID>,
    Json(form): Json<CreateTransactionForm>,
) -> Result<(StatusCode, Json<TransactionResponse>), Error>
where
    U: UserStore + Send + Sync,
    C: CategoryStore + Send + Sync,
    T: TransactionStore + Send + Sync,
    R: MonthlyReportStore + Send + Sync,
{
    let category = state.category_store.get(form.category_id)?;

    // A category owned by another user reads the same as one that does not
    // exist, so users cannot probe each other's category IDs.
    if category.user_id() != user_id {
        return Err(Error::NotFound);
    }

    if category.category_type() != form.transaction_type {
        return Err(Error::CategoryTypeMismatch);
    }

    let builder = Transaction::build(
        form.transaction_type,
        form.amount,
        form.date,
        form.name,
        form.category_id,
        user_id,
    )?
    .description(form.description);

    let transaction = state.transaction_store.create(builder)?;

    Ok((
        StatusCode::CREATED,
        Json(TransactionResponse::new(transaction, &category)),
    ))
}
