use std::sync::Arc;

use axum::{
    Router,
    body::Body,
    http::{Method, Request, StatusCode},
};
use http_body_util::BodyExt;
use sea_orm::Database;
use serde_json::{Value, json};
use tower::ServiceExt;

use engine::Engine;
use migration::MigratorTrait;
use server::{ServerState, router};

async fn app() -> Router {
    let db = Database::connect("sqlite::memory:").await.unwrap();
    migration::Migrator::up(&db, None).await.unwrap();
    let engine = Engine::builder().database(db).build().await.unwrap();
    router(ServerState {
        engine: Arc::new(engine),
    })
}

async fn call(app: &Router, method: Method, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
    let builder = Request::builder().method(method).uri(uri);
    let request = match body {
        Some(body) => builder
            .header("content-type", "application/json")
            .body(Body::from(serde_json::to_vec(&body).unwrap()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };
    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let value = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };
    (status, value)
}

async fn open(app: &Router, name: &str, balance: i64) -> i64 {
    let (status, body) = call(
        app,
        Method::POST,
        "/api/accounts",
        Some(json!({ "name": name, "type": "bank", "balance": balance })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    body["id"].as_i64().unwrap()
}

async fn balance_of(app: &Router, account_id: i64) -> i64 {
    let (_, body) = call(app, Method::GET, "/api/accounts", None).await;
    body.as_array()
        .unwrap()
        .iter()
        .find(|account| account["id"].as_i64() == Some(account_id))
        .and_then(|account| account["balance"].as_i64())
        .unwrap()
}

#[tokio::test]
async fn transaction_lifecycle_over_http() {
    let app = app().await;
    let cash = open(&app, "Cash", 1_000).await;

    let (status, created) = call(
        &app,
        Method::POST,
        "/api/transactions",
        Some(json!({
            "type": "expense",
            "amount": -250,
            "account_id": cash,
            "category": "Food",
            "date": "2024-03-01T12:00:00+01:00",
        })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(created["amount"], 250);
    assert_eq!(balance_of(&app, cash).await, 750);
    let id = created["id"].as_i64().unwrap();

    let (status, updated) = call(
        &app,
        Method::PUT,
        &format!("/api/transactions/{id}"),
        Some(json!({
            "type": "income",
            "amount": 250,
            "account_id": cash,
            "date": "2024-03-01T12:00:00Z",
        })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(updated["type"], "income");
    assert_eq!(balance_of(&app, cash).await, 1_250);

    let (status, _) = call(&app, Method::DELETE, &format!("/api/transactions/{id}"), None).await;
    assert_eq!(status, StatusCode::NO_CONTENT);
    assert_eq!(balance_of(&app, cash).await, 1_000);

    let (status, body) = call(&app, Method::GET, &format!("/api/transactions/{id}"), None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert!(body["error"].is_string());
}

#[tokio::test]
async fn transfer_and_validation_errors() {
    let app = app().await;
    let checking = open(&app, "Checking", 500).await;
    let savings = open(&app, "Savings", 0).await;

    let (status, transfer) = call(
        &app,
        Method::POST,
        "/api/transfers",
        Some(json!({
            "from_account_id": checking,
            "to_account_id": savings,
            "amount": 200,
            "date": "2024-03-02T00:00:00Z",
        })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(transfer["category"], "Transfer");
    assert_eq!(balance_of(&app, checking).await, 300);
    assert_eq!(balance_of(&app, savings).await, 200);

    let (status, _) = call(
        &app,
        Method::POST,
        "/api/transfers",
        Some(json!({
            "from_account_id": checking,
            "to_account_id": checking,
            "amount": 200,
            "date": "2024-03-02T00:00:00Z",
        })),
    )
    .await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);

    let (status, _) = call(
        &app,
        Method::POST,
        "/api/accounts",
        Some(json!({ "name": "Savings", "type": "bank" })),
    )
    .await;
    assert_eq!(status, StatusCode::CONFLICT);
}

#[tokio::test]
async fn list_falls_back_to_default_paging() {
    let app = app().await;
    let cash = open(&app, "Cash", 0).await;
    for day in 1..=3 {
        call(
            &app,
            Method::POST,
            "/api/transactions",
            Some(json!({
                "type": "income",
                "amount": 10,
                "account_id": cash,
                "date": format!("2024-03-0{day}T00:00:00Z"),
            })),
        )
        .await;
    }

    let (status, page) = call(&app, Method::GET, "/api/transactions?page=x&limit=-1", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(page["page"], 1);
    assert_eq!(page["limit"], 25);
    assert_eq!(page["total_items"], 3);

    let (_, page) = call(&app, Method::GET, "/api/transactions?page=2&limit=2", None).await;
    assert_eq!(page["data"].as_array().unwrap().len(), 1);
    assert_eq!(page["total_pages"], 2);

    let (status, page) = call(
        &app,
        Method::GET,
        "/api/transactions?page=9223372036854775807&limit=25",
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert!(page["data"].as_array().unwrap().is_empty());
    assert_eq!(page["total_items"], 3);
}

#[tokio::test]
async fn recurring_rules_and_summary() {
    let app = app().await;
    let cash = open(&app, "Cash", 10_000).await;

    let (status, rule) = call(
        &app,
        Method::POST,
        "/api/recurring",
        Some(json!({
            "type": "expense",
            "amount": 1_000,
            "account_id": cash,
            "category": "Rent",
            "frequency": "monthly",
            "start_date": "2024-01-01T00:00:00Z",
        })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(rule["interval"], 1);

    // The rule started in the past, so a manual run catches up one period.
    let (status, run) = call(&app, Method::POST, "/api/recurring/run", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(run["processed"], 1);
    assert_eq!(balance_of(&app, cash).await, 9_000);

    let (_, rules) = call(&app, Method::GET, "/api/recurring", None).await;
    assert_eq!(rules[0]["next_due_date"], "2024-02-01T00:00:00Z");

    let (status, summary) = call(
        &app,
        Method::GET,
        "/api/summary?start=2024-01-01&end=2024-01-31",
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(summary["total_expense"], 1_000);
    assert_eq!(summary["net_balance"], 9_000);

    let (_, categories) = call(
        &app,
        Method::GET,
        &format!("/api/summary/categories?start=2024-01-01&end=2024-01-31&account_id={cash}"),
        None,
    )
    .await;
    assert_eq!(categories, json!([{ "category": "Rent", "total_amount": 1_000 }]));

    let id = rule["id"].as_i64().unwrap();
    let (status, _) = call(&app, Method::DELETE, &format!("/api/recurring/{id}"), None).await;
    assert_eq!(status, StatusCode::NO_CONTENT);
    let (status, _) = call(&app, Method::DELETE, &format!("/api/recurring/{id}"), None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}
