//! The daily report endpoint.

use axum::{
    Extension, Json,
    extract::{Query, State},
};
use serde::{Deserialize, Serialize};
use time::{Date, OffsetDateTime};

use crate::{
    AppState, Error,
    models::{TransactionType, UserID},
    stores::{
        CategoryStore, MonthlyReportStore, SortOrder, TransactionFilter, TransactionStore,
        UserStore,
    },
};

use super::{
    charts::{Chart, ReportTransaction},
    engine::{bucket_by_hour, sum_amounts_of_type},
    range::day_of,
};

/// Selects which day [get_daily_report] reports on.
#[derive(Debug, Deserialize)]
pub struct DailyReportQuery {
    /// The day to report on, defaulting to the current UTC day.
    pub date: Option<Date>,
}

/// The response for the daily report endpoint.
#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DailyReportResponse {
    pub date: Date,
    pub total_income: f64,
    pub total_expense: f64,
    /// Income minus expense for the day.
    pub balance: f64,
    /// Hourly income and expense series, `0:00` through `23:00`.
    pub chart: Chart,
    /// The day's transactions in chronological order.
    pub transactions: Vec<ReportTransaction>,
}

/// A handler for reporting a user's totals and hourly activity for one day.
pub async fn get_daily_report<U, C, T, R>(
    State(state): State<AppState<U, C, T, R>>,
    Extension(user_id): Extension<UserID>,
    Query(query): Query<DailyReportQuery>,
) -> Result<Json<DailyReportResponse>, Error>
where
    U: UserStore + Send + Sync,
    C: CategoryStore + Send + Sync,
    T: TransactionStore + Send + Sync,
    R: MonthlyReportStore + Send + Sync,
{
    let date = query
        .date
        .unwrap_or_else(|| OffsetDateTime::now_utc().date());

    let transactions = state.transaction_store.get_by_filter(
        user_id,
        TransactionFilter {
            date_range: Some(day_of(date)),
            sort_date: Some(SortOrder::Ascending),
            ..Default::default()
        },
    )?;

    let total_income = sum_amounts_of_type(&transactions, TransactionType::Income);
    let total_expense = sum_amounts_of_type(&transactions, TransactionType::Expense);
    let chart = Chart::from_buckets(&bucket_by_hour(&transactions));

    Ok(Json(DailyReportResponse {
        date,
        total_income,
        total_expense,
        balance: total_income - total_expense,
        chart,
        transactions: transactions.iter().map(ReportTransaction::from).collect(),
    }))
}

#[cfg(test)]
mod daily_report_tests {
    use axum::{Router, http::StatusCode, middleware, routing::get};
    use axum_test::TestServer;
    use rusqlite::Connection;
    use time::{OffsetDateTime, macros::datetime};

    use crate::{
        auth::{auth_guard, encode_token},
        endpoints,
        models::{CategoryName, DatabaseID, PasswordHash, Transaction, TransactionType, UserID},
        stores::{
            CategoryStore, NewUser, TransactionStore, UserStore,
            sqlite::{SQLAppState, create_app_state},
        },
    };

    use super::{DailyReportResponse, get_daily_report};

    struct Fixture {
        state: SQLAppState,
        server: TestServer,
        token: String,
        user_id: UserID,
        income_category: DatabaseID,
        expense_category: DatabaseID,
    }

    fn get_test_fixture() -> Fixture {
        let db_connection =
            Connection::open_in_memory().expect("Could not open database connection");
        let mut state = create_app_state(db_connection, "a secret that is long enough for tests")
            .expect("Could not create app state");

        let user = state
            .user_store
            .create(NewUser {
                email: "warung@example.com".parse().expect("Invalid email"),
                password_hash: PasswordHash::new_unchecked("a password hash".to_string()),
                name: None,
                business_name: None,
                business_owner: None,
                phone_number: None,
            })
            .expect("Could not create test user");

        let income_category = state
            .category_store
            .create(
                CategoryName::new_unchecked("Penjualan Produk"),
                TransactionType::Income,
                None,
                user.id(),
            )
            .expect("Could not create income category");
        let expense_category = state
            .category_store
            .create(
                CategoryName::new_unchecked("Operasional"),
                TransactionType::Expense,
                None,
                user.id(),
            )
            .expect("Could not create expense category");

        let token = encode_token(
            user.id(),
            user.email(),
            &state.encoding_key,
            state.token_duration,
        )
        .expect("Could not create auth token");

        let app = Router::new()
            .route(endpoints::DAILY_REPORT, get(get_daily_report))
            .route_layer(middleware::from_fn_with_state(state.clone(), auth_guard))
            .with_state(state.clone());
        let server = TestServer::try_new(app).expect("Could not create test server");

        Fixture {
            state,
            server,
            token,
            user_id: user.id(),
            income_category: income_category.id(),
            expense_category: expense_category.id(),
        }
    }

    fn seed_transaction(
        fixture: &mut Fixture,
        transaction_type: TransactionType,
        amount: f64,
        name: &str,
        date: OffsetDateTime,
    ) {
        let category_id = match transaction_type {
            TransactionType::Income => fixture.income_category,
            TransactionType::Expense => fixture.expense_category,
        };

        let builder = Transaction::build(
            transaction_type,
            amount,
            date,
            name.to_owned(),
            category_id,
            fixture.user_id,
        )
        .expect("Could not build transaction");

        fixture
            .state
            .transaction_store
            .create(builder)
            .expect("Could not create transaction");
    }

    #[tokio::test]
    async fn report_covers_only_the_requested_day() {
        let mut fixture = get_test_fixture();
        // Seeded out of chronological order on purpose.
        seed_transaction(
            &mut fixture,
            TransactionType::Income,
            500_000.0,
            "Penjualan siang",
            datetime!(2024-06-05 14:30 UTC),
        );
        seed_transaction(
            &mut fixture,
            TransactionType::Expense,
            120_000.0,
            "Belanja pagi",
            datetime!(2024-06-05 09:00 UTC),
        );
        seed_transaction(
            &mut fixture,
            TransactionType::Income,
            80_000.0,
            "Penjualan malam",
            datetime!(2024-06-05 20:15 UTC),
        );
        seed_transaction(
            &mut fixture,
            TransactionType::Income,
            999_999.0,
            "Hari lain",
            datetime!(2024-06-06 10:00 UTC),
        );

        let response = fixture
            .server
            .get(endpoints::DAILY_REPORT)
            .authorization_bearer(&fixture.token)
            .add_query_param("date", "2024-06-05")
            .await;

        response.assert_status_ok();
        let report = response.json::<DailyReportResponse>();

        assert_eq!(report.total_income, 580_000.0);
        assert_eq!(report.total_expense, 120_000.0);
        assert_eq!(report.balance, 460_000.0);

        let names: Vec<&str> = report
            .transactions
            .iter()
            .map(|transaction| transaction.name.as_str())
            .collect();
        assert_eq!(names, ["Belanja pagi", "Penjualan siang", "Penjualan malam"]);
    }

    #[tokio::test]
    async fn chart_buckets_transactions_by_hour() {
        let mut fixture = get_test_fixture();
        seed_transaction(
            &mut fixture,
            TransactionType::Income,
            500_000.0,
            "Penjualan siang",
            datetime!(2024-06-05 14:30 UTC),
        );
        seed_transaction(
            &mut fixture,
            TransactionType::Expense,
            120_000.0,
            "Belanja pagi",
            datetime!(2024-06-05 09:00 UTC),
        );

        let response = fixture
            .server
            .get(endpoints::DAILY_REPORT)
            .authorization_bearer(&fixture.token)
            .add_query_param("date", "2024-06-05")
            .await;

        response.assert_status_ok();
        let report = response.json::<DailyReportResponse>();

        assert_eq!(report.chart.labels.len(), 24);
        assert_eq!(report.chart.labels[0], "0:00");
        assert_eq!(report.chart.datasets[0].label, "Pemasukan");
        assert_eq!(report.chart.datasets[0].data[14], 500_000.0);
        assert_eq!(report.chart.datasets[1].label, "Pengeluaran");
        assert_eq!(report.chart.datasets[1].data[9], 120_000.0);
    }

    #[tokio::test]
    async fn report_for_an_empty_day_is_all_zeroes() {
        let fixture = get_test_fixture();

        let response = fixture
            .server
            .get(endpoints::DAILY_REPORT)
            .authorization_bearer(&fixture.token)
            .add_query_param("date", "2024-01-01")
            .await;

        response.assert_status_ok();
        let report = response.json::<DailyReportResponse>();

        assert_eq!(report.total_income, 0.0);
        assert_eq!(report.total_expense, 0.0);
        assert_eq!(report.balance, 0.0);
        assert!(report.transactions.is_empty());
        assert!(
            report
                .chart
                .datasets
                .iter()
                .all(|dataset| dataset.data.iter().all(|amount| *amount == 0.0))
        );
    }

    #[tokio::test]
    async fn report_requires_authentication() {
        let fixture = get_test_fixture();

        let response = fixture.server.get(endpoints::DAILY_REPORT).await;

        response.assert_status(StatusCode::UNAUTHORIZED);
    }
}
