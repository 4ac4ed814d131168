//! The transaction endpoints: recording new income and expenses, and listing
//! them with per-type summaries.

mod create_endpoint;
mod list_endpoint;

pub use create_endpoint::{CreateTransactionForm, TransactionResponse, create_transaction};
pub use list_endpoint::{TransactionListQuery, TransactionListResponse, get_transactions};
