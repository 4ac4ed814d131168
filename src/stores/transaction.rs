//! Defines the transaction store trait.

use std::ops::RangeInclusive;

use time::Date;

use crate::{
    Error,
    models::{DatabaseID, Transaction, TransactionBuilder, TransactionType, UserID},
};

/// Handles the creation and retrieval of transactions.
pub trait TransactionStore {
    /// Create a new transaction in the store.
    ///
    /// The store assigns the ID and the `created_at` timestamp.
    ///
    /// Returns [Error::NotFound] if the builder's category does not exist.
    fn create(&mut self, builder: TransactionBuilder) -> Result<Transaction, Error>;

    /// Retrieve the transactions of `user_id` selected by `filter`.
    fn get_by_filter(
        &self,
        user_id: UserID,
        filter: TransactionFilter,
    ) -> Result<Vec<Transaction>, Error>;
}

/// Selects which transactions [TransactionStore::get_by_filter] fetches.
///
/// The default filter selects all of a user's transactions in storage order.
#[derive(Debug, Clone, Default)]
pub struct TransactionFilter {
    /// Include only transactions of this type.
    pub transaction_type: Option<TransactionType>,
    /// Include transactions whose date falls within `date_range` (whole
    /// days, inclusive on both ends, in UTC).
    pub date_range: Option<RangeInclusive<Date>>,
    /// Include only transactions recorded against this category.
    pub category_id: Option<DatabaseID>,
    /// Orders transactions by date in the order `sort_date`. None returns
    /// transactions in the order they are stored.
    pub sort_date: Option<SortOrder>,
}

/// The order to sort transactions in a [TransactionFilter].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortOrder {
    /// Sort in order of increasing value.
    Ascending,
    /// Sort in order of decreasing value.
    Descending,
}
