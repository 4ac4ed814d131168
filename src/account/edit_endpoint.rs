//! Defines the endpoint for editing the authenticated user's account,
//! including the email address used to log in.

use std::str::FromStr;

use axum::{Extension, Json, extract::State};
use email_address::EmailAddress;
use serde::{Deserialize, Serialize};

use crate::{
    AppState, Error,
    models::{UserID, UserProfile},
    stores::{CategoryStore, MonthlyReportStore, TransactionStore, UserStore, UserUpdate},
};

/// The request body for editing an account.
///
/// Omitted fields are left unchanged.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EditAccountForm {
    /// A new email address for logging in. Must not belong to another user.
    #[serde(default)]
    pub email: Option<String>,
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

/// A handler for editing the authenticated user's account.
///
/// # Errors
///
/// This function will return an error in a few situations.
/// - The new email address is not valid.
/// - The new email address is already registered to another user.
pub async fn edit_account<U, C, T, R>(
    State(mut state): State<AppState<U, C, T, R>>,
    Extension(user_id): Extension<UserID>,
    Json(form): Json<EditAccountForm>,
) -> Result<Json<UserProfile>, Error>
where
    U: UserStore + Send + Sync,
    C: CategoryStore + Send + Sync,
    T: TransactionStore + Send + Sync,
    R: MonthlyReportStore + Send + Sync,
{
    let email = match form.email {
        Some(email) => {
            Some(EmailAddress::from_str(&email).map_err(|_| Error::InvalidEmail(email.clone()))?)
        }
        None => None,
    };

    let user = state.user_store.update(
        user_id,
        UserUpdate {
            email,
            name: form.name,
            business_name: form.business_name,
            business_owner: form.business_owner,
            phone_number: form.phone_number,
        },
    )?;

    Ok(Json(user.profile()))
}

#[cfg(test)]
mod edit_account_tests {
    use axum::{Router, http::StatusCode, middleware, routing::put};
    use axum_test::TestServer;
    use rusqlite::Connection;

    use crate::{
        ErrorBody,
        auth::{auth_guard, encode_token},
        endpoints,
        models::{PasswordHash, UserID, UserProfile},
        stores::{
            NewUser, UserStore,
            sqlite::{SQLAppState, create_app_state},
        },
    };

    use super::{EditAccountForm, edit_account};

    fn get_test_fixture() -> (SQLAppState, TestServer, String, UserID) {
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
                business_name: None,
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
            .route(endpoints::ACCOUNT, put(edit_account))
            .route_layer(middleware::from_fn_with_state(state.clone(), auth_guard))
            .with_state(state.clone());
        let server = TestServer::try_new(app).expect("Could not create test server");

        (state, server, token, user.id())
    }

    #[tokio::test]
    async fn edit_can_change_the_email_address() {
        let (state, server, token, _) = get_test_fixture();

        let response = server
            .put(endpoints::ACCOUNT)
            .authorization_bearer(&token)
            .json(&EditAccountForm {
                email: Some("toko.baru@example.com".to_owned()),
                ..Default::default()
            })
            .await;

        response.assert_status_ok();
        let profile = response.json::<UserProfile>();
        assert_eq!(profile.email, "toko.baru@example.com");
        // Details not included in the form survive.
        assert_eq!(profile.name.as_deref(), Some("Budi"));

        let email = "toko.baru@example.com".parse().expect("Invalid email");
        assert!(state.user_store.get_by_email(&email).is_ok());
    }

    #[tokio::test]
    async fn anothers_email_address_is_rejected() {
        let (mut state, server, token, _) = get_test_fixture();

        state
            .user_store
            .create(NewUser {
                email: "taken@example.com".parse().expect("Invalid email"),
                password_hash: PasswordHash::new_unchecked("a password hash".to_string()),
                name: None,
                business_name: None,
                business_owner: None,
                phone_number: None,
            })
            .expect("Could not create second user");

        let response = server
            .put(endpoints::ACCOUNT)
            .authorization_bearer(&token)
            .json(&EditAccountForm {
                email: Some("taken@example.com".to_owned()),
                ..Default::default()
            })
            .await;

        response.assert_status(StatusCode::BAD_REQUEST);
        let body = response.json::<ErrorBody>();
        assert_eq!(body.message, "email is already registered");
    }

    #[tokio::test]
    async fn malformed_email_address_is_rejected() {
        let (_, server, token, _) = get_test_fixture();

        let response = server
            .put(endpoints::ACCOUNT)
            .authorization_bearer(&token)
            .json(&EditAccountForm {
                email: Some("not an email".to_owned()),
                ..Default::default()
            })
            .await;

        response.assert_status(StatusCode::BAD_REQUEST);
        let body = response.json::<ErrorBody>();
        assert!(body.message.contains("not a valid email address"));
    }

    #[tokio::test]
    async fn edit_requires_authentication() {
        let (_, server, _, _) = get_test_fixture();

        let response = server
            .put(endpoints::ACCOUNT)
            .json(&EditAccountForm::default())
            .await;

        response.assert_status(StatusCode::UNAUTHORIZED);
    }
}
