//! Authentication middleware that validates bearer tokens on protected routes.

use axum::{
    RequestPartsExt,
    extract::{FromRef, Request, State},
    middleware::Next,
    response::{IntoResponse, Response},
};
use axum_extra::{
    TypedHeader,
    headers::{Authorization, authorization::Bearer},
};
use jsonwebtoken::DecodingKey;

use crate::{
    AppState, Error,
    auth::decode_token,
    models::UserID,
    stores::{CategoryStore, MonthlyReportStore, TransactionStore, UserStore},
};

/// The state needed for the auth middleware
#[derive(Clone)]
pub struct AuthState {
    /// The key used for verifying bearer tokens.
    pub decoding_key: DecodingKey,
}

impl<U, C, T, R> FromRef<AppState<U, C, T, R>> for AuthState
where
    U: UserStore + Send + Sync,
    C: CategoryStore + Send + Sync,
    T: TransactionStore + Send + Sync,
    R: MonthlyReportStore + Send + Sync,
{
    fn from_ref(state: &AppState<U, C, T, R>) -> Self {
        Self {
            decoding_key: state.decoding_key.clone(),
        }
    }
}

/// Middleware function that checks for a valid bearer token in the
/// `Authorization` header.
///
/// The user ID is placed into the request and then the request executed
/// normally if the token is valid, otherwise a 401 error response is
/// returned.
///
/// **Note**: Route handlers can use the function argument
/// `Extension(user_id): Extension<UserID>` to receive the user ID.
pub async fn auth_guard(State(state): State<AuthState>, request: Request, next: Next) -> Response {
    let (mut parts, body) = request.into_parts();

    let bearer = match parts.extract::<TypedHeader<Authorization<Bearer>>>().await {
        Ok(TypedHeader(Authorization(bearer))) => bearer,
        Err(_) => return Error::MissingToken.into_response(),
    };

    let claims = match decode_token(bearer.token(), &state.decoding_key) {
        Ok(claims) => claims,
        Err(error) => return error.into_response(),
    };

    parts.extensions.insert(UserID::new(claims.sub));
    let request = Request::from_parts(parts, body);

    next.run(request).await
}
