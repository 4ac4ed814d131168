//! This module defines the domain data types.

pub use category::{Category, CategoryName};
pub use monthly_report::MonthlyReport;
pub use password::{PasswordHash, ValidatedPassword};
pub use transaction::{Transaction, TransactionBuilder, TransactionType};
pub use user::{User, UserID, UserProfile};

mod category;
mod monthly_report;
mod password;
mod transaction;
mod user;

/// Alias for the integer type used for mapping to database IDs.
pub type DatabaseID = i64;
