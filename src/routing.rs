//! Application router configuration with protected and unprotected route definitions.

use axum::{
    Json, Router, middleware,
    response::{IntoResponse, Response},
    routing::{get, post, put},
};
use serde_json::{Value, json};
use tower_http::cors::CorsLayer;

use crate::{
    AppState, Error,
    account::{change_password, delete_account, edit_account, edit_profile, get_me},
    auth::{auth_guard, log_in, register},
    category::{get_categories, get_default_expense_categories, get_default_income_categories},
    endpoints,
    logging::logging_middleware,
    reports::{
        get_daily_category_report, get_daily_report, get_expense_report, get_income_report,
        get_monthly_category_report, get_monthly_report, get_weekly_category_report,
        get_weekly_report,
    },
    stores::{CategoryStore, MonthlyReportStore, TransactionStore, UserStore},
    transaction::{create_transaction, get_transactions},
};

/// Return a router with all the app's routes.
pub fn build_router<U, C, T, R>(state: AppState<U, C, T, R>) -> Router
where
    U: UserStore + Clone + Send + Sync + 'static,
    C: CategoryStore + Clone + Send + Sync + 'static,
    T: TransactionStore + Clone + Send + Sync + 'static,
    R: MonthlyReportStore + Clone + Send + Sync + 'static,
{
    let unprotected_routes = Router::new()
        .route(endpoints::HEALTH, get(get_health))
        .route(endpoints::API_HEALTH, get(get_api_health))
        .route(endpoints::REGISTER, post(register))
        .route(endpoints::LOG_IN, post(log_in));

    let protected_routes = Router::new()
        .route(endpoints::ME, get(get_me))
        .route(endpoints::PROFILE, put(edit_profile))
        .route(
            endpoints::ACCOUNT,
            put(edit_account).delete(delete_account),
        )
        .route(endpoints::ACCOUNT_PASSWORD, put(change_password))
        .route(
            endpoints::TRANSACTIONS,
            get(get_transactions).post(create_transaction),
        )
        .route(endpoints::CATEGORIES, get(get_categories))
        .route(
            endpoints::INCOME_CATEGORIES,
            get(get_default_income_categories),
        )
        .route(
            endpoints::EXPENSE_CATEGORIES,
            get(get_default_expense_categories),
        )
        .route(endpoints::MONTHLY_REPORT, get(get_monthly_report))
        .route(endpoints::DAILY_REPORT, get(get_daily_report))
        .route(endpoints::WEEKLY_REPORT, get(get_weekly_report))
        .route(
            endpoints::DAILY_CATEGORY_REPORT,
            get(get_daily_category_report),
        )
        .route(
            endpoints::WEEKLY_CATEGORY_REPORT,
            get(get_weekly_category_report),
        )
        .route(
            endpoints::MONTHLY_CATEGORY_REPORT,
            get(get_monthly_category_report),
        )
        .route(endpoints::INCOME_REPORT, get(get_income_report))
        .route(endpoints::EXPENSE_REPORT, get(get_expense_report))
        .layer(middleware::from_fn_with_state(state.clone(), auth_guard));

    protected_routes
        .merge(unprotected_routes)
        .fallback(get_404_not_found)
        .layer(middleware::from_fn(logging_middleware))
        .layer(CorsLayer::permissive())
        .with_state(state)
}

/// A handler for the bare liveness probe.
async fn get_health() -> Json<Value> {
    Json(json!({ "status": "ok" }))
}

/// A handler for the API liveness probe.
async fn get_api_health() -> Json<Value> {
    Json(json!({ "status": "ok", "message": "Server is running" }))
}

/// The handler for paths that match no route. Responds with the same JSON
/// error body the rest of the API uses.
async fn get_404_not_found() -> Response {
    Error::NotFound.into_response()
}

#[cfg(test)]
mod routing_tests {
    use axum::http::StatusCode;
    use axum_test::TestServer;
    use rusqlite::Connection;
    use serde_json::json;

    use crate::{
        ErrorBody,
        auth::AuthResponse,
        category::CategoryListResponse,
        endpoints,
        stores::sqlite::create_app_state,
        transaction::TransactionListResponse,
    };

    use super::build_router;

    fn get_test_server() -> TestServer {
        let db_connection =
            Connection::open_in_memory().expect("Could not open database connection");
        let state = create_app_state(db_connection, "a secret that is long enough for tests")
            .expect("Could not create app state");

        TestServer::try_new(build_router(state)).expect("Could not create test server")
    }

    #[tokio::test]
    async fn health_route_reports_ok() {
        let server = get_test_server();

        let response = server.get(endpoints::HEALTH).await;

        response.assert_status_ok();
        response.assert_json(&json!({ "status": "ok" }));
    }

    #[tokio::test]
    async fn api_health_route_reports_running() {
        let server = get_test_server();

        let response = server.get(endpoints::API_HEALTH).await;

        response.assert_status_ok();
        response.assert_json(&json!({ "status": "ok", "message": "Server is running" }));
    }

    #[tokio::test]
    async fn unknown_route_gets_a_json_not_found() {
        let server = get_test_server();

        let response = server.get("/api/does-not-exist").await;

        response.assert_status(StatusCode::NOT_FOUND);
        let body = response.json::<ErrorBody>();
        assert_eq!(body.status, "error");
        assert_eq!(body.code, 404);
    }

    #[tokio::test]
    async fn protected_routes_reject_missing_tokens() {
        let server = get_test_server();

        for uri in [
            endpoints::ME,
            endpoints::TRANSACTIONS,
            endpoints::CATEGORIES,
            endpoints::MONTHLY_REPORT,
            endpoints::INCOME_REPORT,
        ] {
            let response = server.get(uri).await;

            response.assert_status(StatusCode::UNAUTHORIZED);
        }
    }

    #[tokio::test]
    async fn registered_user_can_record_and_list_transactions() {
        let server = get_test_server();

        let response = server
            .post(endpoints::REGISTER)
            .json(&json!({
                "email": "warung@example.com",
                "password": "hunter22",
                "businessName": "Toko Maju",
            }))
            .await;
        response.assert_status(StatusCode::CREATED);
        let auth = response.json::<AuthResponse>();

        // Registration seeds the default categories; pick an income one.
        let response = server
            .get(endpoints::CATEGORIES)
            .authorization_bearer(&auth.token)
            .add_query_param("type", "INCOME")
            .await;
        response.assert_status_ok();
        let categories = response.json::<CategoryListResponse>();
        let category_id = categories.categories[0].id;

        let response = server
            .post(endpoints::TRANSACTIONS)
            .authorization_bearer(&auth.token)
            .json(&json!({
                "type": "INCOME",
                "amount": 150_000.0,
                "date": "2024-06-05T09:00:00Z",
                "name": "Penjualan pagi",
                "categoryId": category_id,
            }))
            .await;
        response.assert_status(StatusCode::CREATED);

        let response = server
            .get(endpoints::TRANSACTIONS)
            .authorization_bearer(&auth.token)
            .await;
        response.assert_status_ok();
        let listing = response.json::<TransactionListResponse>();

        assert_eq!(listing.total, 150_000.0);
        assert_eq!(listing.transactions.len(), 1);
    }

    #[tokio::test]
    async fn registered_user_can_log_in() {
        let server = get_test_server();

        server
            .post(endpoints::REGISTER)
            .json(&json!({
                "email": "warung@example.com",
                "password": "hunter22",
            }))
            .await
            .assert_status(StatusCode::CREATED);

        let response = server
            .post(endpoints::LOG_IN)
            .json(&json!({
                "email": "warung@example.com",
                "password": "hunter22",
            }))
            .await;

        response.assert_status_ok();
        let auth = response.json::<AuthResponse>();

        server
            .get(endpoints::ME)
            .authorization_bearer(&auth.token)
            .await
            .assert_status_ok();
    }
}
