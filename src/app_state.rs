//! Implements a struct that holds the state of the REST server.

use std::{
    marker::{Send, Sync},
    sync::{Arc, Mutex},
};

use jsonwebtoken::{DecodingKey, EncodingKey};
use rusqlite::Connection;
use time::Duration;

use crate::{
    auth::DEFAULT_TOKEN_DURATION,
    stores::{CategoryStore, MonthlyReportStore, TransactionStore, UserStore},
};

/// The state of the REST server.
#[derive(Clone)]
pub struct AppState<U, C, T, R>
where
    U: UserStore + Send + Sync,
    C: CategoryStore + Send + Sync,
    T: TransactionStore + Send + Sync,
    R: MonthlyReportStore + Send + Sync,
{
    /// The key used for signing bearer tokens.
    pub encoding_key: EncodingKey,
    /// The key used for verifying bearer tokens.
    pub decoding_key: DecodingKey,
    /// The duration for which bearer tokens are valid.
    pub token_duration: Duration,
    /// The database connection
    pub db_connection: Arc<Mutex<Connection>>,
    /// The store for managing [users](crate::models::User).
    pub user_store: U,
    /// The store for managing transaction [categories](crate::models::Category).
    pub category_store: C,
    /// The store for managing user [transactions](crate::models::Transaction).
    pub transaction_store: T,
    /// The store for cached [monthly reports](crate::models::MonthlyReport).
    pub monthly_report_store: R,
}

impl<U, C, T, R> AppState<U, C, T, R>
where
    U: UserStore + Send + Sync,
    C: CategoryStore + Send + Sync,
    T: TransactionStore + Send + Sync,
    R: MonthlyReportStore + Send + Sync,
{
    /// Create a new [AppState].
    ///
    /// `jwt_secret` is the secret that bearer tokens are signed with.
    pub fn new(
        jwt_secret: &str,
        db_connection: Arc<Mutex<Connection>>,
        user_store: U,
        category_store: C,
        transaction_store: T,
        monthly_report_store: R,
    ) -> Self {
        Self {
            encoding_key: EncodingKey::from_secret(jwt_secret.as_bytes()),
            decoding_key: DecodingKey::from_secret(jwt_secret.as_bytes()),
            token_duration: DEFAULT_TOKEN_DURATION,
            db_connection,
            user_store,
            category_store,
            transaction_store,
            monthly_report_store,
        }
    }
}
