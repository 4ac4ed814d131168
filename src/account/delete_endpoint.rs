//! Defines the endpoint for deleting the authenticated user's account.

use axum::{Extension, Json, extract::State};

use crate::{
    AppState, Error, SuccessBody,
    models::UserID,
    stores::{CategoryStore, MonthlyReportStore, TransactionStore, UserStore},
};

/// A handler for deleting the authenticated user's account.
///
/// The user's categories, transactions and cached reports are removed along
/// with the user row in a single transaction, so a failed delete leaves
/// everything in place.
pub async fn delete_account<U, C, T, R>(
    State(mut state): State<AppState<U, C, T, R>>,
    Extension(user_id): Extension<UserID>,
) -> Result<Json<SuccessBody>, Error>
where
    U: UserStore + Send + Sync,
    C: CategoryStore + Send + Sync,
    T: TransactionStore + Send + Sync,
    R: MonthlyReportStore + Send + Sync,
{
    state.user_store.delete(user_id)?;

    Ok(Json(SuccessBody::new("Akun berhasil dihapus")))
}
