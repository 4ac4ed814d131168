//! Defines the endpoint for changing the authenticated user's password.

use axum::{Extension, Json, extract::State};
use serde::{Deserialize, Serialize};

use crate::{
    AppState, Error, SuccessBody,
    models::{PasswordHash, UserID, ValidatedPassword},
    stores::{CategoryStore, MonthlyReportStore, TransactionStore, UserStore},
};

/// The request body for changing a password.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChangePasswordForm {
    /// The user's current password.
    pub old_password: String,
    /// The password to replace it with.
    pub new_password: String,
}

/// A handler for changing the authenticated user's password.
///
/// # Errors
///
/// This function will return an error in a few situations.
/// - The current password is wrong.
/// - The new password is too short.
pub async fn change_password<U, C, T, R>(
    State(mut state): State<AppState<U, C, T, R>>,
    Extension(user_id): Extension<UserID>,
    Json(form): Json<ChangePasswordForm>,
) -> Result<Json<SuccessBody>, Error>
where
    U: UserStore + Send + Sync,
    C: CategoryStore + Send + Sync,
    T: TransactionStore + Send + Sync,
    R: MonthlyReportStore + Send + Sync,
{
    let user = state.user_store.get(user_id)?;

    if !user.password_hash().verify(&form.old_password)? {
        return Err(Error::WrongPassword);
    }

    let new_password = ValidatedPassword::new(&form.new_password)?;
    let password_hash = PasswordHash::new(new_password, PasswordHash::DEFAULT_COST)?;

    state.user_store.set_password_hash(user_id, password_hash)?;

    Ok(Json(SuccessBody::new("Password berhasil diubah")))
}
