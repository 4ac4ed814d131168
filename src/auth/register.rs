//! The registration endpoint for creating a new user account.

use std::str::FromStr;

use axum::{Json, extract::State, http::StatusCode};
use email_address::EmailAddress;
use serde::{Deserialize, Serialize};

use crate::{
    AppState, Error,
    auth::{AuthResponse, encode_token},
    category::ensure_default_categories,
    models::{PasswordHash, ValidatedPassword},
    stores::{CategoryStore, MonthlyReportStore, NewUser, TransactionStore, UserStore},
};

/// The registration details sent by the client.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegisterForm {
    /// The email address to register with. Must not belong to another user.
    pub email: String,
    /// The plaintext password.
    pub password: String,
    /// The display name of the user.
    #[serde(default)]
    pub name: Option<String>,
    /// The name of the user's business.
    #[serde(default)]
    pub business_name: Option<String>,
    /// The name of the business owner.
    #[serde(default)]
    pub business_owner: Option<String>,
    /// The user's phone number.
    #[serde(default)]
    pub phone_number: Option<String>,
}

/// Handler for registering a new user.
///
/// Creates the user, seeds their default categories, and responds with `201
/// Created`, a fresh auth token and the new user's profile.
///
/// # Errors
///
/// This function will return an error in a few situations.
/// - The email does not parse as an email address.
/// - The email is already registered.
/// - The password is shorter than the minimum length.
pub async fn register<U, C, T, R>(
    State(mut state): State<AppState<U, C, T, R>>,
    Json(form): Json<RegisterForm>,
) -> Result<(StatusCode, Json<AuthResponse>), Error>
where
    U: UserStore + Send + Sync,
    C: CategoryStore + Send + Sync,
    T: TransactionStore + Send + Sync,
    R: MonthlyReportStore + Send + Sync,
{
    let email =
        EmailAddress::from_str(&form.email).map_err(|_| Error::InvalidEmail(form.email.clone()))?;
    let validated_password = ValidatedPassword::new(&form.password)?;
    let password_hash = PasswordHash::new(validated_password, PasswordHash::DEFAULT_COST)?;

    let user = state.user_store.create(NewUser {
        email,
        password_hash,
        name: form.name,
        business_name: form.business_name,
        business_owner: form.business_owner,
        phone_number: form.phone_number,
    })?;

    ensure_default_categories(&mut state.category_store, user.id())?;

    let token = encode_token(
        user.id(),
        user.email(),
        &state.encoding_key,
        state.token_duration,
    )?;

    Ok((
        StatusCode::CREATED,
        Json(AuthResponse {
            token,
            user: user.profile(),
        }),
    ))
}

#[cfg(test)]
mod register_tests {
    use axum::{Router, http::StatusCode, routing::post};
    use axum_test::TestServer;
    use rusqlite::Connection;

    use crate::{
        ErrorBody,
        auth::{AuthResponse, register},
        category::{DEFAULT_EXPENSE_CATEGORIES, DEFAULT_INCOME_CATEGORIES},
        endpoints,
        models::{TransactionType, UserID},
        stores::{
            CategoryStore,
            sqlite::{SQLAppState, create_app_state},
        },
    };

    use super::RegisterForm;

    const TEST_SECRET: &str = "a secret that is long enough for tests";

    fn get_test_server() -> (SQLAppState, TestServer) {
        let db_connection =
            Connection::open_in_memory().expect("Could not open database connection");
        let state =
            create_app_state(db_connection, TEST_SECRET).expect("Could not create app state");

        let app = Router::new()
            .route(endpoints::REGISTER, post(register))
            .with_state(state.clone());

        let server = TestServer::try_new(app).expect("Could not create test server");

        (state, server)
    }

    fn new_register_form(email: &str, password: &str) -> RegisterForm {
        RegisterForm {
            email: email.to_string(),
            password: password.to_string(),
            name: Some("Budi".to_string()),
            business_name: Some("Toko Maju".to_string()),
            business_owner: Some("Budi Santoso".to_string()),
            phone_number: Some("+628123456789".to_string()),
        }
    }

    #[tokio::test]
    async fn register_creates_user_and_returns_created() {
        let (_, server) = get_test_server();

        let response = server
            .post(endpoints::REGISTER)
            .json(&new_register_form("toko@example.com", "hunter22"))
            .await;

        response.assert_status(StatusCode::CREATED);
        let auth_response = response.json::<AuthResponse>();
        assert!(!auth_response.token.is_empty());
        assert_eq!(auth_response.user.email, "toko@example.com");
        assert_eq!(auth_response.user.business_name, Some("Toko Maju".to_string()));
        assert_eq!(auth_response.user.phone_number, Some("+628123456789".to_string()));
    }

    #[tokio::test]
    async fn register_seeds_default_categories() {
        let (state, server) = get_test_server();

        let response = server
            .post(endpoints::REGISTER)
            .json(&new_register_form("toko@example.com", "hunter22"))
            .await;

        response.assert_status(StatusCode::CREATED);
        let auth_response = response.json::<AuthResponse>();

        let categories = state
            .category_store
            .get_by_user(UserID::new(auth_response.user.id))
            .expect("Could not fetch categories");

        assert_eq!(categories.len(), 10);

        for name in DEFAULT_INCOME_CATEGORIES {
            assert!(
                categories.iter().any(|category| {
                    category.name().as_ref() == name
                        && category.category_type() == TransactionType::Income
                }),
                "missing default income category {name:?}"
            );
        }

        for name in DEFAULT_EXPENSE_CATEGORIES {
            assert!(
                categories.iter().any(|category| {
                    category.name().as_ref() == name
                        && category.category_type() == TransactionType::Expense
                }),
                "missing default expense category {name:?}"
            );
        }
    }

    #[tokio::test]
    async fn register_fails_with_duplicate_email() {
        let (_, server) = get_test_server();

        server
            .post(endpoints::REGISTER)
            .json(&new_register_form("toko@example.com", "hunter22"))
            .await
            .assert_status(StatusCode::CREATED);

        let response = server
            .post(endpoints::REGISTER)
            .json(&new_register_form("toko@example.com", "hunter22"))
            .await;

        response.assert_status(StatusCode::BAD_REQUEST);
        let body = response.json::<ErrorBody>();
        assert_eq!(body.message, "email is already registered");
    }

    #[tokio::test]
    async fn register_fails_with_short_password() {
        let (_, server) = get_test_server();

        let response = server
            .post(endpoints::REGISTER)
            .json(&new_register_form("toko@example.com", "12345"))
            .await;

        response.assert_status(StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn register_fails_with_invalid_email() {
        let (_, server) = get_test_server();

        let response = server
            .post(endpoints::REGISTER)
            .json(&new_register_form("not an email", "hunter22"))
            .await;

        response.assert_status(StatusCode::BAD_REQUEST);
        let body = response.json::<ErrorBody>();
        assert!(body.message.contains("not a valid email address"));
    }
}
