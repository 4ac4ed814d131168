//! Defines the endpoint for fetching the authenticated user's profile.

use axum::{Extension, Json, extract::State};

use crate::{
    AppState, Error,
    models::{UserID, UserProfile},
    stores::{CategoryStore, MonthlyReportStore, TransactionStore, UserStore},
};

/// A handler for fetching the profile of the authenticated user.
pub async fn get_me<U, C, T, R>(
    State(state): State<AppState<U, C, T, R>>,
    Extension(user_id): Extension<UserID>,
) -> Result<Json<UserProfile>, Error>
where
    U: UserStore + Send + Sync,
    C: CategoryStore + Send + Sync,
    T: TransactionStore + Send + Sync,
    R: MonthlyReportStore + Send + Sync,
{
    let user = state.user_store.get(user_id)?;

    Ok(Json(user.profile()))
}

#[cfg(test)]
mod get_me_tests {
    use axum::{Router, http::StatusCode, middleware, routing::get};
    use axum_test::TestServer;
    use rusqlite::Connection;

    use crate::{
        auth::{auth_guard, encode_token},
        endpoints,
        models::{PasswordHash, UserProfile},
        stores::{NewUser, UserStore, sqlite::create_app_state},
    };

    use super::get_me;

    fn get_test_server() -> (TestServer, String) {
        let db_connection =
            Connection::open_in_memory().expect("Could not open database connection");
        let mut state = create_app_state(db_connection, "a secret that is long enough for tests")
            .expect("Could not create app state");

        let user = state
            .user_store
            .create(NewUser {
                email: "warung@example.com".parse().expect("Invalid email"),
                password_hash: PasswordHash::new_unchecked("a password hash".to_string()),
                name: Some("Budi".to_owned()),
                business_name: Some("Toko Maju".to_owned()),
                business_owner: Some("Budi Santoso".to_owned()),
                phone_number: Some("+628123456789".to_owned()),
            })
            .expect("Could not create test user");

        let token = encode_token(
            user.id(),
            user.email(),
            &state.encoding_key,
            state.token_duration,
        )
        .expect("Could not create auth token");

        let app = Router::new()
            .route(endpoints::ME, get(get_me))
            .route_layer(middleware::from_fn_with_state(state.clone(), auth_guard))
            .with_state(state);
        let server = TestServer::try_new(app).expect("Could not create test server");

        (server, token)
    }

    #[tokio::test]
    async fn me_returns_the_users_profile() {
        let (server, token) = get_test_server();

        let response = server
            .get(endpoints::ME)
            .authorization_bearer(&token)
            .await;

        response.assert_status_ok();
        let profile = response.json::<UserProfile>();

        assert_eq!(profile.email, "warung@example.com");
        assert_eq!(profile.name.as_deref(), Some("Budi"));
        assert_eq!(profile.business_name.as_deref(), Some("Toko Maju"));
        assert_eq!(profile.business_owner.as_deref(), Some("Budi Santoso"));
        assert_eq!(profile.phone_number.as_deref(), Some("+628123456789"));
    }

    #[tokio::test]
    async fn me_requires_authentication() {
        let (server, _) = get_test_server();

        let response = server.get(endpoints::ME).await;

        response.assert_status(StatusCode::UNAUTHORIZED);
    }
}
