//! Kasku is a bookkeeping API for small businesses.
//!
//! This library provides a JSON REST API for recording income and expense
//! transactions against user-scoped categories, and for producing aggregated
//! reports: daily, weekly and monthly summaries, chart-ready time series and
//! top-category breakdowns.

#![warn(missing_docs)]

use std::{net::SocketAddr, time::Duration};

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use axum_server::Handle;
use serde::{Deserialize, Serialize};
use tokio::signal;

mod account;
mod app_state;
mod auth;
mod category;
mod db;
pub mod endpoints;
mod logging;
pub mod models;
mod reports;
mod routing;
pub mod stores;
mod transaction;

pub use app_state::AppState;
pub use auth::DEFAULT_TOKEN_DURATION;
pub use category::{
    DEFAULT_EXPENSE_CATEGORIES, DEFAULT_INCOME_CATEGORIES, ensure_default_categories,
};
pub use db::initialize as initialize_db;
pub use logging::logging_middleware;
pub use routing::build_router;
pub use stores::sqlite::{SQLAppState, create_app_state};

/// An async task that waits for either the ctrl+c or terminate signal, whichever comes first, and
/// then signals the server to shut down gracefully.
///
/// `handle` is a handle to an Axum `Server`.
pub async fn graceful_shutdown(handle: Handle<SocketAddr>) {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            tracing::debug!("Received ctrl+c signal.");
            handle.graceful_shutdown(Some(Duration::from_secs(1)));
        },
        _ = terminate => {
            tracing::debug!("Received terminate signal.");
            handle.graceful_shutdown(Some(Duration::from_secs(1)));
        },
    }
}

/// The errors that may occur in the application.
#[derive(Debug, thiserror::Error, PartialEq)]
pub enum Error {
    /// The email address is already attached to another user.
    #[error("email is already registered")]
    DuplicateEmail,

    /// A string could not be parsed as an email address.
    #[error("{0} is not a valid email address")]
    InvalidEmail(String),

    /// The password does not meet the minimum length requirement.
    #[error("password must be at least {0} characters long")]
    PasswordTooShort(usize),

    /// The email and password combination did not match a user.
    ///
    /// The same error is returned for an unknown email and for a wrong
    /// password so that clients cannot probe which emails are registered.
    #[error("invalid email or password")]
    InvalidCredentials,

    /// The current password given when changing passwords was wrong.
    #[error("current password is incorrect")]
    WrongPassword,

    /// The request had no `Authorization: Bearer` header.
    #[error("authorization header is missing or malformed")]
    MissingToken,

    /// The bearer token could not be decoded or has expired.
    #[error("invalid token")]
    InvalidToken,

    /// Signing a new auth token failed.
    ///
    /// The underlying cause should only appear in the server logs.
    #[error("could not create auth token")]
    TokenCreation,

    /// An unexpected error occurred with the underlying hashing library.
    #[error("hashing failed: {0}")]
    HashingError(String),

    /// The requested resource was not found.
    ///
    /// For HTTP request handlers, the client should check that the parameters
    /// (e.g., ID) are correct and that the resource has been created.
    ///
    /// Internally, this error may occur when a query returns no rows.
    #[error("the requested resource could not be found")]
    NotFound,

    /// A transaction referenced a category with the opposite type.
    #[error("category type does not match transaction type")]
    CategoryTypeMismatch,

    /// A transaction amount was zero or negative.
    #[error("amount must be greater than zero")]
    InvalidAmount,

    /// An empty string was used where a name is required.
    #[error("name cannot be empty")]
    EmptyName,

    /// A date string could not be parsed.
    #[error("could not parse date {0:?}")]
    InvalidDate(String),

    /// An unhandled/unexpected SQL error.
    #[error("an unexpected SQL error occurred: {0}")]
    SqlError(rusqlite::Error),
}

impl From<rusqlite::Error> for Error {
    fn from(value: rusqlite::Error) -> Self {
        match value {
            // Code 2067 occurs when a UNIQUE constraint failed.
            rusqlite::Error::SqliteFailure(sql_error, Some(ref desc))
                if sql_error.extended_code == 2067 && desc.contains("user.email") =>
            {
                Error::DuplicateEmail
            }
            // Code 787 occurs when a FOREIGN KEY constraint failed, e.g. a
            // transaction referencing a category that does not exist.
            rusqlite::Error::SqliteFailure(sql_error, _) if sql_error.extended_code == 787 => {
                Error::NotFound
            }
            rusqlite::Error::QueryReturnedNoRows => Error::NotFound,
            error => {
                tracing::error!("an unhandled SQL error occurred: {}", error);
                Error::SqlError(error)
            }
        }
    }
}

impl Error {
    fn status_code(&self) -> StatusCode {
        match self {
            Error::DuplicateEmail
            | Error::InvalidEmail(_)
            | Error::PasswordTooShort(_)
            | Error::WrongPassword
            | Error::CategoryTypeMismatch
            | Error::InvalidAmount
            | Error::EmptyName
            | Error::InvalidDate(_) => StatusCode::BAD_REQUEST,
            Error::InvalidCredentials | Error::MissingToken | Error::InvalidToken => {
                StatusCode::UNAUTHORIZED
            }
            Error::NotFound => StatusCode::NOT_FOUND,
            Error::TokenCreation | Error::HashingError(_) | Error::SqlError(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }
}

impl IntoResponse for Error {
    fn into_response(self) -> Response {
        let status = self.status_code();

        // Internal errors are not intended to be shown to the client.
        let message = if status == StatusCode::INTERNAL_SERVER_ERROR {
            tracing::error!("an unexpected error occurred: {}", self);
            "Server error".to_owned()
        } else {
            self.to_string()
        };

        (status, Json(ErrorBody::new(status, message))).into_response()
    }
}

/// The JSON body returned for every error response.
#[derive(Debug, Serialize, Deserialize, PartialEq)]
pub struct ErrorBody {
    /// Always the string `"error"`.
    pub status: String,
    /// A human readable description of what went wrong.
    pub message: String,
    /// The HTTP status code, repeated in the body.
    pub code: u16,
}

impl ErrorBody {
    /// Create an error body for `status` with the given `message`.
    pub fn new(status: StatusCode, message: impl Into<String>) -> Self {
        Self {
            status: "error".to_owned(),
            message: message.into(),
            code: status.as_u16(),
        }
    }
}

/// The JSON body returned by endpoints that confirm an action without
/// returning a resource, such as password changes and account deletion.
#[derive(Debug, Serialize, Deserialize, PartialEq)]
pub struct SuccessBody {
    /// Always the string `"success"`.
    pub status: String,
    /// A human readable confirmation.
    pub message: String,
}

impl SuccessBody {
    /// Create a success body with the given `message`.
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            status: "success".to_owned(),
            message: message.into(),
        }
    }
}
