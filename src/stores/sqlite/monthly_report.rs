//! Implements a SQLite backed monthly report cache.
use std::sync::{Arc, Mutex};

use rusqlite::{Connection, Row};

use crate::{
    Error,
    db::{CreateTable, MapRow},
    models::{MonthlyReport, UserID},
    stores::MonthlyReportStore,
};

/// Caches per-month totals in a SQLite database.
#[derive(Debug, Clone)]
pub struct SQLiteMonthlyReportStore {
    connection: Arc<Mutex<Connection>>,
}

impl SQLiteMonthlyReportStore {
    /// Create a new monthly report store with a SQLite database.
    pub fn new(connection: Arc<Mutex<Connection>>) -> Self {
        Self { connection }
    }
}

impl MonthlyReportStore for SQLiteMonthlyReportStore {
    /// Insert the totals for the given user and month, replacing any
    /// previously cached totals.
    ///
    /// # Errors
    /// This function will return [Error::NotFound] if the user does not
    /// exist, or [Error::SqlError] if there is some other SQL error.
    fn upsert(
        &mut self,
        user_id: UserID,
        year: i32,
        month: u8,
        total_income: f64,
        total_expense: f64,
    ) -> Result<MonthlyReport, Error> {
        self.connection
            .lock()
            .unwrap()
            .prepare(
                "INSERT INTO monthly_report (user_id, year, month, total_income, total_expense)
                 VALUES (?1, ?2, ?3, ?4, ?5)
                 ON CONFLICT(user_id, year, month) DO UPDATE SET
                    total_income = excluded.total_income,
                    total_expense = excluded.total_expense
                 RETURNING id, user_id, year, month, total_income, total_expense",
            )?
            .query_row(
                (user_id.as_i64(), year, month, total_income, total_expense),
                Self::map_row,
            )
            .map_err(|error| error.into())
    }

    /// Get the cached totals for the given user and month.
    ///
    /// # Errors
    /// This function will return [Error::NotFound] if no report has been
    /// cached for the month, or [Error::SqlError] if there is some other SQL
    /// error.
    fn get(&self, user_id: UserID, year: i32, month: u8) -> Result<MonthlyReport, Error> {
        self.connection
            .lock()
            .unwrap()
            .prepare(
                "SELECT id, user_id, year, month, total_income, total_expense
                 FROM monthly_report
                 WHERE user_id = ?1 AND year = ?2 AND month = ?3",
            )?
            .query_row((user_id.as_i64(), year, month), Self::map_row)
            .map_err(|error| error.into())
    }
}

impl CreateTable for SQLiteMonthlyReportStore {
    fn create_table(connection: &Connection) -> Result<(), rusqlite::Error> {
        connection.execute(
            "CREATE TABLE IF NOT EXISTS monthly_report (
                id INTEGER PRIMARY KEY,
                user_id INTEGER NOT NULL,
                year INTEGER NOT NULL,
                month INTEGER NOT NULL,
                total_income REAL NOT NULL,
                total_expense REAL NOT NULL,
                UNIQUE(user_id, year, month),
                FOREIGN KEY(user_id) REFERENCES user(id) ON UPDATE CASCADE ON DELETE CASCADE
            );",
            (),
        )?;

        Ok(())
    }
}

impl MapRow for SQLiteMonthlyReportStore {
    type ReturnType = MonthlyReport;

    fn map_row_with_offset(row: &Row, offset: usize) -> Result<Self::ReturnType, rusqlite::Error> {
        Ok(MonthlyReport {
            id: row.get(offset)?,
            user_id: UserID::new(row.get(offset + 1)?),
            year: row.get(offset + 2)?,
            month: row.get(offset + 3)?,
            total_income: row.get(offset + 4)?,
            total_expense: row.get(offset + 5)?,
        })
    }
}
