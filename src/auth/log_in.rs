//! The log-in endpoint, which exchanges an email and password for a bearer
//! token.

use std::str::FromStr;

use axum::{Json, extract::State};
use email_address::EmailAddress;
use serde::{Deserialize, Serialize};

use crate::{
    AppState, Error,
    auth::{AuthResponse, encode_token},
    stores::{CategoryStore, MonthlyReportStore, TransactionStore, UserStore},
};

/// The credentials sent by the client when logging in.
///
/// The email is taken as a plain string. A string that does not parse as an
/// email address cannot match a registered user, so it is rejected with the
/// same error as a wrong password.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Credentials {
    /// The email the user registered with.
    pub email: String,
    /// The user's plaintext password.
    pub password: String,
}

/// Handler for log-in requests.
///
/// On success, responds with a fresh auth token and the user's profile.
///
/// # Errors
///
/// Returns [Error::InvalidCredentials] if the email is unknown or the
/// password is wrong. The two cases share one error message so that clients
/// cannot probe which emails are registered.
pub async fn log_in<U, C, T, R>(
    State(state): State<AppState<U, C, T, R>>,
    Json(credentials): Json<Credentials>,
) -> Result<Json<AuthResponse>, Error>
where
    U: UserStore + Send + Sync,
    C: CategoryStore + Send + Sync,
    T: TransactionStore + Send + Sync,
    R: MonthlyReportStore + Send + Sync,
{
    let email =
        EmailAddress::from_str(&credentials.email).map_err(|_| Error::InvalidCredentials)?;

    let user = state
        .user_store
        .get_by_email(&email)
        .map_err(|error| match error {
            Error::NotFound => Error::InvalidCredentials,
            error => error,
        })?;

    if !user.password_hash().verify(&credentials.password)? {
        return Err(Error::InvalidCredentials);
    }

    let token = encode_token(
        user.id(),
        user.email(),
        &state.encoding_key,
        state.token_duration,
    )?;

    Ok(Json(AuthResponse {
        token,
        user: user.profile(),
    }))
}
