//! Fetch, aggregate, present and group against a mock backend.
#![cfg(feature = "async")]

use finance_dashboard::aggregate::ChartMode;
use finance_dashboard::client::FinanceClient;
use finance_dashboard::dashboard::Dashboard;
use finance_dashboard::fetch::{FetchStatus, fetch_all};
use finance_dashboard::models::NaiveDate;
use finance_dashboard::presenter::{BarState, Headline};
use finance_dashboard::session::Session;
use serde_json::{Value, json};
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

fn incomes() -> Value {
    json!([
        {"id": 1, "date": "2024-08-19", "income_category": "Salary",
         "description": "August", "total": 100.0, "tax": 5.0},
        {"id": 2, "date": "2024-03-15", "income_category": "Investment",
         "description": null, "total": 30.0, "tax": null}
    ])
}

fn expenses() -> Value {
    json!([
        {"id": 10, "date": "2024-08-18", "expense_category": "Groceries",
         "description": null, "total": 40.0, "tax": 2.0},
        {"id": 11, "date": "2023-03-01", "expense_category": "Bill & Utility",
         "description": "power", "total": 60.0, "tax": 0.0},
        {"id": 12, "date": "2024-08-20", "expense_category": "Transport",
         "description": "receipt only", "total": null, "tax": null}
    ])
}

async fn backend() -> MockServer {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/income/get_incomes"))
        .respond_with(ResponseTemplate::new(200).set_body_json(incomes()))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/expense/get_expenses"))
        .respond_with(ResponseTemplate::new(200).set_body_json(expenses()))
        .mount(&server)
        .await;
    server
}

async fn dashboard_for(server: &MockServer, session: &Session, reference: NaiveDate) -> Dashboard {
    let client = FinanceClient::builder()
        .base_url(server.uri())
        .build()
        .unwrap();
    let mut dashboard = Dashboard::new(ChartMode::Weekly, reference);
    dashboard.apply(fetch_all(&client, session).await);
    dashboard
}

#[tokio::test]
async fn weekly_dashboard_from_backend() {
    let server = backend().await;
    let dashboard = dashboard_for(&server, &Session::with_token("t"), date(2024, 8, 19)).await;

    assert_eq!(dashboard.income_status(), FetchStatus::Loaded);
    assert_eq!(dashboard.expense_status(), FetchStatus::Loaded);
    assert_eq!(dashboard.presenter().selected_index(), 0);
    assert_eq!(
        dashboard.headline(),
        Headline {
            expense: 0.0,
            balance: 100.0,
            tax: 5.0,
            income: 100.0,
        }
    );

    let bars = dashboard.bars();
    assert_eq!(bars.len(), 7);
    assert_eq!(bars[0].state, BarState::Selected);
    // Tuesday holds the null-total expense: present, but zero.
    assert_eq!(bars[1].state, BarState::HasData);
    assert!((bars[0].height - 80.0).abs() < 1e-9);
}

#[tokio::test]
async fn sunday_reference_picks_up_previous_week() {
    let server = backend().await;
    let dashboard = dashboard_for(&server, &Session::with_token("t"), date(2024, 8, 18)).await;

    assert_eq!(dashboard.presenter().selected_index(), 6);
    let headline = dashboard.headline();
    assert!((headline.expense - 40.0).abs() < f64::EPSILON);
    assert!((headline.tax - 2.0).abs() < f64::EPSILON);
    assert!((headline.balance + 40.0).abs() < f64::EPSILON);
}

#[tokio::test]
async fn monthly_view_merges_years() {
    let server = backend().await;
    let mut dashboard = dashboard_for(&server, &Session::with_token("t"), date(2024, 3, 10)).await;
    dashboard.set_mode(ChartMode::Monthly);

    let march = &dashboard.chart().buckets[2];
    assert!(march.has_data);
    assert!((march.income_total - 30.0).abs() < f64::EPSILON);
    assert!((march.expense_total - 60.0).abs() < f64::EPSILON);
    assert_eq!(dashboard.presenter().title(), "Mar");
}

#[tokio::test]
async fn ledger_covers_full_lists() {
    let server = backend().await;
    let dashboard = dashboard_for(&server, &Session::with_token("t"), date(2024, 8, 19)).await;
    let ledger = dashboard.ledger();

    assert!((ledger.total_income - 130.0).abs() < f64::EPSILON);
    assert!((ledger.total_expense - 100.0).abs() < f64::EPSILON);
    let keys: Vec<_> = ledger.expenses.iter().map(|g| g.date_key.as_str()).collect();
    assert_eq!(keys, ["2024-08-20", "2024-08-18", "2023-03-01"]);
}

#[tokio::test]
async fn anonymous_session_yields_zero_dashboard() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .expect(0)
        .mount(&server)
        .await;

    let dashboard = dashboard_for(&server, &Session::anonymous(), date(2024, 8, 19)).await;
    assert_eq!(dashboard.income_status(), FetchStatus::NoCredential);
    assert_eq!(dashboard.expense_status(), FetchStatus::NoCredential);
    assert_eq!(dashboard.headline(), Headline::default());
    assert!(dashboard.bars().iter().all(|bar| (bar.height - 5.0).abs() < 1e-9));
}

#[tokio::test]
async fn one_failed_list_does_not_hide_the_other() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/income/get_incomes"))
        .respond_with(ResponseTemplate::new(200).set_body_json(incomes()))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/expense/get_expenses"))
        .respond_with(ResponseTemplate::new(503))
        .mount(&server)
        .await;

    let dashboard = dashboard_for(&server, &Session::with_token("t"), date(2024, 8, 19)).await;
    assert_eq!(dashboard.income_status(), FetchStatus::Loaded);
    assert_eq!(dashboard.expense_status(), FetchStatus::Failed);
    assert_eq!(dashboard.income().len(), 2);
    assert!(dashboard.expenses().is_empty());
}

#[cfg(feature = "blocking")]
#[test]
fn blocking_fetch_all_joins_both_lists() {
    use finance_dashboard::client::FinanceBlockingClient;
    use finance_dashboard::fetch::fetch_all_blocking;

    let runtime = tokio::runtime::Runtime::new().unwrap();
    let server = runtime.block_on(backend());
    let client = FinanceBlockingClient::builder()
        .base_url(server.uri())
        .build()
        .unwrap();

    let fetched = fetch_all_blocking(&client, &Session::with_token("t"));
    assert_eq!(fetched.income.status(), FetchStatus::Loaded);
    assert_eq!(fetched.income.records().len(), 2);
    assert_eq!(fetched.expenses.records().len(), 3);
}
