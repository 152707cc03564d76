//! HTTP behaviour of the async client against a mock backend.
#![cfg(feature = "async")]

use finance_dashboard::client::FinanceClient;
use finance_dashboard::error::FinanceError;
use finance_dashboard::models::{
    ChangeEmail, ChangeName, ChangePassword, Credentials, ExpenseCategory, ExpenseId,
    IncomeCategory, IncomeId, NaiveDate, NewExpense, NewIncome, NewReceipt, ReceiptId, SignUp,
    UserId,
};
use finance_dashboard::session::{InMemoryTokenStore, Session, TokenStore};
use secrecy::ExposeSecret as _;
use serde_json::json;
use wiremock::matchers::{body_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn client_for(server: &MockServer) -> FinanceClient {
    FinanceClient::builder()
        .base_url(server.uri())
        .build()
        .unwrap()
}

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

#[tokio::test]
async fn incomes_send_bearer_token() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/income/get_incomes"))
        .and(header("Authorization", "Bearer secret-token"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            {"id": 1, "date": "2024-08-19", "income_category": "Salary",
             "description": null, "total": 100.0, "tax": 5.0, "user_id": 7}
        ])))
        .expect(1)
        .mount(&server)
        .await;

    let incomes = client_for(&server)
        .incomes(&Session::with_token("secret-token"))
        .await
        .unwrap();
    assert_eq!(incomes.len(), 1);
    assert_eq!(incomes[0].id, IncomeId::new(1));
    assert_eq!(incomes[0].tax, Some(5.0));
}

#[tokio::test]
async fn missing_token_sends_nothing() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .expect(0)
        .mount(&server)
        .await;

    let client = client_for(&server);
    let session = Session::anonymous();
    assert!(matches!(
        client.incomes(&session).await,
        Err(FinanceError::MissingToken)
    ));
    assert!(matches!(
        client.expenses(&session).await,
        Err(FinanceError::MissingToken)
    ));
}

#[tokio::test]
async fn api_error_detail_is_unwrapped() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/expense/get_expenses"))
        .respond_with(
            ResponseTemplate::new(401)
                .set_body_json(json!({"detail": "Could not validate credentials"})),
        )
        .mount(&server)
        .await;

    let err = client_for(&server)
        .expenses(&Session::with_token("expired"))
        .await
        .unwrap_err();
    match err {
        FinanceError::Api { status, message } => {
            assert_eq!(status, 401);
            assert_eq!(message, "Could not validate credentials");
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[tokio::test]
async fn plain_text_error_body_is_kept() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/receipt/get_receipts"))
        .respond_with(ResponseTemplate::new(500).set_body_string("Internal Server Error"))
        .mount(&server)
        .await;

    let err = client_for(&server)
        .receipts(&Session::with_token("t"))
        .await
        .unwrap_err();
    assert!(matches!(
        err,
        FinanceError::Api { status: 500, ref message } if message == "Internal Server Error"
    ));
}

#[tokio::test]
async fn malformed_body_is_serialization_error() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/income/get_incomes"))
        .respond_with(ResponseTemplate::new(200).set_body_string("{not json"))
        .mount(&server)
        .await;

    let err = client_for(&server)
        .incomes(&Session::with_token("t"))
        .await
        .unwrap_err();
    assert!(matches!(err, FinanceError::Serialization(_)));
}

#[tokio::test]
async fn login_then_session_round_trip() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/auth/login"))
        .and(body_json(json!({"email": "a@b.c", "password": "hunter2"})))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({"access_token": "jwt-abc", "token_type": "bearer"})),
        )
        .expect(1)
        .mount(&server)
        .await;

    let token = client_for(&server)
        .login(&Credentials::new("a@b.c", "hunter2"))
        .await
        .unwrap();
    assert_eq!(token.token_type, "bearer");

    let store = InMemoryTokenStore::new();
    let mut session = Session::anonymous();
    session.log_in(&store, token.access_token).unwrap();
    assert!(session.is_authenticated());
    assert_eq!(
        store.load().unwrap().unwrap().expose_secret(),
        "jwt-abc"
    );

    session.log_out(&store).unwrap();
    assert!(!session.is_authenticated());
    assert!(store.load().unwrap().is_none());
}

#[tokio::test]
async fn signup_returns_user() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/auth/signup"))
        .and(body_json(
            json!({"email": "new@b.c", "name": "New User", "password": "pw"}),
        ))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({"id": 9, "email": "new@b.c", "name": "New User"})),
        )
        .mount(&server)
        .await;

    let user = client_for(&server)
        .signup(&SignUp::new("new@b.c", "New User", "pw"))
        .await
        .unwrap();
    assert_eq!(user.name, "New User");
}

#[tokio::test]
async fn add_income_posts_payload() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/income/add_income"))
        .and(header("Authorization", "Bearer t"))
        .and(body_json(json!({
            "date": "2024-08-19",
            "income_category": "Freelance",
            "total": 250.0
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "id": 42, "date": "2024-08-19", "income_category": "Freelance",
            "description": null, "total": 250.0, "tax": null
        })))
        .expect(1)
        .mount(&server)
        .await;

    let created = client_for(&server)
        .add_income(
            &Session::with_token("t"),
            &NewIncome::new(date(2024, 8, 19), IncomeCategory::Freelance, 250.0),
        )
        .await
        .unwrap();
    assert_eq!(created.id, IncomeId::new(42));
}

#[tokio::test]
async fn invalid_expense_is_rejected_locally() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    let err = client_for(&server)
        .add_expense(
            &Session::with_token("t"),
            &NewExpense::new(date(2024, 8, 19), ExpenseCategory::Transport, 0.0),
        )
        .await
        .unwrap_err();
    assert!(matches!(err, FinanceError::Validation(_)));
}

#[tokio::test]
async fn delete_expense_hits_id_path() {
    let server = MockServer::start().await;
    Mock::given(method("DELETE"))
        .and(path("/expense/delete_expense/17"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({"detail": "Expense record and its receipt deleted"})),
        )
        .expect(1)
        .mount(&server)
        .await;

    let detail = client_for(&server)
        .delete_expense(&Session::with_token("t"), ExpenseId::new(17))
        .await
        .unwrap();
    assert!(detail.detail.contains("deleted"));
}

#[tokio::test]
async fn delete_missing_income_is_404() {
    let server = MockServer::start().await;
    Mock::given(method("DELETE"))
        .and(path("/income/delete_income/5"))
        .respond_with(
            ResponseTemplate::new(404).set_body_json(json!({"detail": "Income record not found"})),
        )
        .mount(&server)
        .await;

    let err = client_for(&server)
        .delete_income(&Session::with_token("t"), IncomeId::new(5))
        .await
        .unwrap_err();
    assert!(matches!(err, FinanceError::Api { status: 404, .. }));
}

#[tokio::test]
async fn fetch_user_reads_current_account() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/auth/fetch_user"))
        .and(header("Authorization", "Bearer t"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({"id": 3, "email": "a@b.c", "name": "Sam"})),
        )
        .expect(1)
        .mount(&server)
        .await;

    let user = client_for(&server)
        .fetch_user(&Session::with_token("t"))
        .await
        .unwrap();
    assert_eq!(user.id, UserId::new(3));
    assert_eq!(user.email, "a@b.c");
}

#[tokio::test]
async fn account_settings_post_new_values() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/auth/change_password"))
        .and(header("Authorization", "Bearer t"))
        .and(body_json(json!({"new_password": "n3w-pass"})))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({"id": 3, "email": "a@b.c", "name": "Sam"})),
        )
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/auth/change_email"))
        .and(body_json(json!({"new_email": "sam@new.c"})))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({"id": 3, "email": "sam@new.c", "name": "Sam"})),
        )
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/auth/change_name"))
        .and(body_json(json!({"new_name": "Samira"})))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({"id": 3, "email": "sam@new.c", "name": "Samira"})),
        )
        .expect(1)
        .mount(&server)
        .await;

    let client = client_for(&server);
    let session = Session::with_token("t");
    let user = client
        .change_password(&session, &ChangePassword::new("n3w-pass"))
        .await
        .unwrap();
    assert_eq!(user.name, "Sam");

    let change = ChangeEmail {
        new_email: "sam@new.c".to_owned(),
    };
    let user = client.change_email(&session, &change).await.unwrap();
    assert_eq!(user.email, "sam@new.c");

    let change = ChangeName {
        new_name: "Samira".to_owned(),
    };
    let user = client.change_name(&session, &change).await.unwrap();
    assert_eq!(user.name, "Samira");
}

#[tokio::test]
async fn settings_need_a_token() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    let change = ChangeName {
        new_name: "Samira".to_owned(),
    };
    let err = client_for(&server)
        .change_name(&Session::anonymous(), &change)
        .await
        .unwrap_err();
    assert!(matches!(err, FinanceError::MissingToken));
}

#[tokio::test]
async fn add_receipt_links_expense() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/receipt/add_receipt"))
        .and(header("Authorization", "Bearer t"))
        .and(body_json(json!({
            "expense_id": 17,
            "date_uploaded": "2024-08-18",
            "vendor_name": "Corner Shop",
            "total_amount": 9.5
        })))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!({
            "id": 4, "expense_id": 17, "receipt_image": null,
            "date_uploaded": "2024-08-18", "vendor_name": "Corner Shop",
            "total_amount": 9.5
        })))
        .expect(1)
        .mount(&server)
        .await;

    let receipt = NewReceipt {
        expense_id: Some(ExpenseId::new(17)),
        date_uploaded: Some(date(2024, 8, 18)),
        vendor_name: Some("Corner Shop".to_owned()),
        total_amount: Some(9.5),
        ..NewReceipt::default()
    };
    let created = client_for(&server)
        .add_receipt(&Session::with_token("t"), &receipt)
        .await
        .unwrap();
    assert_eq!(created.id, ReceiptId::new(4));
    assert_eq!(created.expense_id, Some(ExpenseId::new(17)));
}

#[tokio::test]
async fn delete_receipt_hits_id_path() {
    let server = MockServer::start().await;
    Mock::given(method("DELETE"))
        .and(path("/receipt/delete_receipt/4"))
        .and(header("Authorization", "Bearer t"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({"detail": "Receipt deleted successfully"})),
        )
        .expect(1)
        .mount(&server)
        .await;

    let detail = client_for(&server)
        .delete_receipt(&Session::with_token("t"), ReceiptId::new(4))
        .await
        .unwrap();
    assert_eq!(detail.detail, "Receipt deleted successfully");
}

#[tokio::test]
async fn delete_missing_receipt_is_404() {
    let server = MockServer::start().await;
    Mock::given(method("DELETE"))
        .and(path("/receipt/delete_receipt/99"))
        .respond_with(
            ResponseTemplate::new(404).set_body_json(json!({"detail": "Receipt record not found"})),
        )
        .mount(&server)
        .await;

    let err = client_for(&server)
        .delete_receipt(&Session::with_token("t"), ReceiptId::new(99))
        .await
        .unwrap_err();
    match err {
        FinanceError::Api { status, message } => {
            assert_eq!(status, 404);
            assert_eq!(message, "Receipt record not found");
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[tokio::test]
async fn tax_forms_returns_raw_bytes() {
    let server = MockServer::start().await;
    let pdf = b"%PDF-1.7 fake".to_vec();
    Mock::given(method("GET"))
        .and(path("/form/generate_tax_forms"))
        .respond_with(
            ResponseTemplate::new(200)
                .insert_header("content-type", "application/pdf")
                .set_body_bytes(pdf.clone()),
        )
        .mount(&server)
        .await;

    let bytes = client_for(&server)
        .tax_forms(&Session::with_token("t"))
        .await
        .unwrap();
    assert_eq!(bytes, pdf);
}
