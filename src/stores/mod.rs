//! Contains traits and implementations for objects that store the domain [models](crate::models).

mod category;
mod monthly_report;
mod transaction;
mod user;

pub mod sqlite;

pub use category::CategoryStore;
pub use monthly_report::MonthlyReportStore;
pub use transaction::{SortOrder, TransactionFilter, TransactionStore};
pub use user::{NewUser, UserStore, UserUpdate};
