//! Defines the endpoint for editing the authenticated user's profile
//! details.
//!
//! This endpoint only touches display details. Changing the email address
//! goes through the account edit endpoint, and passwords have their own
//! endpoint.

use axum::{Extension, Json, extract::State};
use serde::{Deserialize, Serialize};

use crate::{
    AppState, Error,
    models::{UserID, UserProfile},
    stores::{CategoryStore, MonthlyReportStore, TransactionStore, UserStore, UserUpdate},
};

/// The request body for editing profile details.
///
/// Omitted fields are left unchanged.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EditProfileForm {
    /// A new display name.
    #[serde(default)]
    pub name: Option<String>,
    /// A new business name.
    #[serde(default)]
    pub business_name: Option<String>,
    /// A new business owner name.
    #[serde(default)]
    pub business_owner: Option<String>,
    /// A new phone number.
    #[serde(default)]
    pub phone_number: Option<String>,
}

/// A handler for editing the authenticated user's profile details.
pub async fn edit_profile<U, C, T, R>(
    State(mut state): State<AppState<U, C, T, R>>,
    Extension(user_id): Extension<UserID>,
    Json(form): Json<EditProfileForm>,
) -> Result<Json<UserProfile>, Error>
where
    U: UserStore + Send + Sync,
    C: CategoryStore + Send + Sync,
    T: TransactionStore + Send + Sync,
    R: MonthlyReportStore + Send + Sync,
{
    let user = state.user_store.update(
        user_id,
        UserUpdate {
            email: None,
            name: form.name,
            business_name: form.business_name,
            business_owner: form.business_owner,
            phone_number: form.phone_number,
        },
    )?;

    Ok(Json(user.profile()))
}

#[cfg(test)]
mod edit_profile_tests {
    use axum::{Router, http::StatusCode, middleware, routing::put};
    use axum_test::TestServer;
    use rusqlite::Connection;

    use crate::{
        auth::{auth_guard, encode_token},
        endpoints,
        models::{PasswordHash, UserProfile},
        stores::{NewUser, UserStore, sqlite::create_app_state},
    };

    use super::{EditProfileForm, edit_profile};

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
                business_owner: None,
                phone_number: None,
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
            .route(endpoints::PROFILE, put(edit_profile))
            .route_layer(middleware::from_fn_with_state(state.clone(), auth_guard))
            .with_state(state);
        let server = TestServer::try_new(app).expect("Could not create test server");

        (server, token)
    }

    #[tokio::test]
    async fn edit_updates_the_given_fields() {
        let (server, token) = get_test_server();

        let response = server
            .put(endpoints::PROFILE)
            .authorization_bearer(&token)
            .json(&EditProfileForm {
                name: Some("Budi Revisi".to_owned()),
                phone_number: Some("+628111111111".to_owned()),
                ..Default::default()
            })
            .await;

        response.assert_status_ok();
        let profile = response.json::<UserProfile>();

        assert_eq!(profile.name.as_deref(), Some("Budi Revisi"));
        assert_eq!(profile.phone_number.as_deref(), Some("+628111111111"));
    }

    #[tokio::test]
    async fn omitted_fields_are_left_unchanged() {
        let (server, token) = get_test_server();

        let response = server
            .put(endpoints::PROFILE)
            .authorization_bearer(&token)
            .json(&EditProfileForm {
                business_owner: Some("Budi Santoso".to_owned()),
                ..Default::default()
            })
            .await;

        response.assert_status_ok();
        let profile = response.json::<UserProfile>();

        assert_eq!(profile.business_owner.as_deref(), Some("Budi Santoso"));
        assert_eq!(profile.name.as_deref(), Some("Budi"));
        assert_eq!(profile.business_name.as_deref(), Some("Toko Maju"));
        assert_eq!(profile.email, "warung@example.com");
    }

    #[tokio::test]
    async fn edit_requires_authentication() {
        let (server, _) = get_test_server();

        let response = server
            .put(endpoints::PROFILE)
            .json(&EditProfileForm::default())
            .await;

        response.assert_status(StatusCode::UNAUTHORIZED);
    }
}
