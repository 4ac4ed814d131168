//! Contains the SQLite backed store implementations, along with a convenience
//! type alias and function for an [AppState] that uses the SQLite backend.

mod category;
mod monthly_report;
mod transaction;
mod user;

pub use category::SQLiteCategoryStore;
pub use monthly_report::SQLiteMonthlyReportStore;
pub use transaction::SQLiteTransactionStore;
pub use user::SQLiteUserStore;

use std::sync::{Arc, Mutex};

use rusqlite::Connection;

use crate::{AppState, Error, db::initialize};

/// An alias for an [AppState] that uses SQLite for the backend.
pub type SQLAppState =
    AppState<SQLiteUserStore, SQLiteCategoryStore, SQLiteTransactionStore, SQLiteMonthlyReportStore>;

/// Creates an [AppState] instance that uses SQLite for the backend.
///
/// This function will modify the database by adding the tables for the domain
/// models to the database.
pub fn create_app_state(db_connection: Connection, jwt_secret: &str) -> Result<SQLAppState, Error> {
    initialize(&db_connection)?;

    let connection = Arc::new(Mutex::new(db_connection));

    Ok(AppState::new(
        jwt_secret,
        connection.clone(),
        SQLiteUserStore::new(connection.clone()),
        SQLiteCategoryStore::new(connection.clone()),
        SQLiteTransactionStore::new(connection.clone()),
        SQLiteMonthlyReportStore::new(connection),
    ))
}
