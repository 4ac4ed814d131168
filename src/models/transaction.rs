//! This file defines the type `Transaction`, the core record of the
//! bookkeeping part of the application, along with its type enum and builder.

use rusqlite::types::{FromSql, FromSqlError, FromSqlResult, ToSql, ToSqlOutput, ValueRef};
use serde::{Deserialize, Serialize};
use time::{OffsetDateTime, UtcOffset};

use crate::{
    Error,
    models::{DatabaseID, UserID},
};

/// Whether money was earned or spent.
///
/// Every transaction and category is exactly one of the two types, so any set
/// of transactions partitions cleanly into income and expenses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TransactionType {
    /// Money coming into the business.
    Income,
    /// Money going out of the business.
    Expense,
}

impl TransactionType {
    /// The wire and storage representation of the type.
    pub fn as_str(&self) -> &'static str {
        match self {
            TransactionType::Income => "INCOME",
            TransactionType::Expense => "EXPENSE",
        }
    }
}

impl ToSql for TransactionType {
    fn to_sql(&self) -> rusqlite::Result<ToSqlOutput<'_>> {
        Ok(self.as_str().into())
    }
}

impl FromSql for TransactionType {
    fn column_result(value: ValueRef<'_>) -> FromSqlResult<Self> {
        match value.as_str()? {
            "INCOME" => Ok(TransactionType::Income),
            "EXPENSE" => Ok(TransactionType::Expense),
            other => Err(FromSqlError::Other(
                format!("unknown transaction type {other:?}").into(),
            )),
        }
    }
}

/// An expense or income, i.e. an event where money was either spent or earned.
///
/// To create a new `Transaction`, use [Transaction::build] and pass the result
/// to a [TransactionStore](crate::stores::TransactionStore).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Transaction {
    id: DatabaseID,
    #[serde(rename = "type")]
    transaction_type: TransactionType,
    amount: f64,
    #[serde(with = "time::serde::rfc3339")]
    date: OffsetDateTime,
    name: String,
    description: Option<String>,
    category_id: DatabaseID,
    user_id: UserID,
    #[serde(with = "time::serde::rfc3339")]
    created_at: OffsetDateTime,
}

impl Transaction {
    /// Start building a new transaction.
    ///
    /// Shortcut for [TransactionBuilder::new] for discoverability.
    ///
    /// # Errors
    ///
    /// This function will return an error if `amount` is not positive or
    /// `name` is empty.
    pub fn build(
        transaction_type: TransactionType,
        amount: f64,
        date: OffsetDateTime,
        name: impl Into<String>,
        category_id: DatabaseID,
        user_id: UserID,
    ) -> Result<TransactionBuilder, Error> {
        TransactionBuilder::new(transaction_type, amount, date, name, category_id, user_id)
    }

    /// Create a transaction from its stored parts, without validation.
    ///
    /// This is intended for store implementations mapping database rows; the
    /// row is assumed to have been validated when it was inserted.
    #[allow(clippy::too_many_arguments)]
    pub fn new_unchecked(
        id: DatabaseID,
        transaction_type: TransactionType,
        amount: f64,
        date: OffsetDateTime,
        name: String,
        description: Option<String>,
        category_id: DatabaseID,
        user_id: UserID,
        created_at: OffsetDateTime,
    ) -> Self {
        Self {
            id,
            transaction_type,
            amount,
            date,
            name,
            description,
            category_id,
            user_id,
            created_at,
        }
    }

    /// The ID of the transaction.
    pub fn id(&self) -> DatabaseID {
        self.id
    }

    /// Whether this transaction is an income or an expense.
    pub fn transaction_type(&self) -> TransactionType {
        self.transaction_type
    }

    /// The amount of money spent or earned in this transaction.
    pub fn amount(&self) -> f64 {
        self.amount
    }

    /// When the transaction happened. Always in UTC.
    pub fn date(&self) -> OffsetDateTime {
        self.date
    }

    /// A short name for the transaction.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Optional text detailing the transaction.
    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    /// The category this transaction was recorded against.
    pub fn category_id(&self) -> DatabaseID {
        self.category_id
    }

    /// The ID of the user that created this transaction.
    pub fn user_id(&self) -> UserID {
        self.user_id
    }

    /// When the transaction was recorded, as opposed to when it happened.
    pub fn created_at(&self) -> OffsetDateTime {
        self.created_at
    }
}

/// Builder for creating a new [Transaction].
///
/// Finalized by a [TransactionStore](crate::stores::TransactionStore), which
/// assigns the ID and the ingestion timestamp.
#[derive(Debug, Clone, PartialEq)]
pub struct TransactionBuilder {
    pub(crate) transaction_type: TransactionType,
    pub(crate) amount: f64,
    pub(crate) date: OffsetDateTime,
    pub(crate) name: String,
    pub(crate) description: Option<String>,
    pub(crate) category_id: DatabaseID,
    pub(crate) user_id: UserID,
}

impl TransactionBuilder {
    /// Create a new transaction builder.
    ///
    /// `date` is normalized to UTC so that stored date strings compare
    /// consistently.
    ///
    /// # Errors
    ///
    /// This function will return an error if `amount` is not positive or
    /// `name` is empty.
    pub fn new(
        transaction_type: TransactionType,
        amount: f64,
        date: OffsetDateTime,
        name: impl Into<String>,
        category_id: DatabaseID,
        user_id: UserID,
    ) -> Result<Self, Error> {
        if amount <= 0.0 {
            return Err(Error::InvalidAmount);
        }

        let name = name.into();
        if name.trim().is_empty() {
            return Err(Error::EmptyName);
        }

        Ok(Self {
            transaction_type,
            amount,
            date: date.to_offset(UtcOffset::UTC),
            name,
            description: None,
            category_id,
            user_id,
        })
    }

    /// Set the description for the transaction.
    pub fn description(mut self, description: Option<String>) -> Self {
        self.description = description;
        self
    }
}

#[cfg(test)]
mod transaction_type_tests {
    use crate::models::TransactionType;

    #[test]
    fn serializes_to_screaming_snake_case() {
        assert_eq!(
            serde_json::to_string(&TransactionType::Income).unwrap(),
            "\"INCOME\""
        );
        assert_eq!(
            serde_json::to_string(&TransactionType::Expense).unwrap(),
            "\"EXPENSE\""
        );
    }

    #[test]
    fn deserializes_from_wire_format() {
        let parsed: TransactionType = serde_json::from_str("\"EXPENSE\"").unwrap();

        assert_eq!(parsed, TransactionType::Expense);
    }
}
