use axum::{
    Router,
    body::Body,
    http::{Method, Request, StatusCode},
};
use http_body_util::BodyExt;
use serde_json::{Value, json};
use tower::ServiceExt;

use server::{
    ServerState, router,
    types::{
        analytics::Analytics,
        expense::ExpenseView,
        settlement::{BalancesView, SettlementView},
    },
};

fn app() -> Router {
    router(ServerState::default())
}

async fn send(
    app: &Router,
    method: Method,
    uri: &str,
    body: Option<Value>,
) -> (StatusCode, Vec<u8>) {
    let builder = Request::builder().method(method).uri(uri);
    let request = match body {
        Some(body) => builder
            .header("content-type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };

    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    (status, bytes.to_vec())
}

async fn add(app: &Router, body: Value) -> ExpenseView {
    let (status, bytes) = send(app, Method::POST, "/api/expenses", Some(body)).await;
    assert_eq!(status, StatusCode::CREATED, "{}", String::from_utf8_lossy(&bytes));
    serde_json::from_slice(&bytes).unwrap()
}

fn error_message(bytes: &[u8]) -> String {
    let value: Value = serde_json::from_slice(bytes).unwrap();
    value["error"].as_str().unwrap().to_string()
}

#[tokio::test]
async fn health_check() {
    let app = app();
    let (status, bytes) = send(&app, Method::GET, "/", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(bytes, b"server is running");
}

#[tokio::test]
async fn create_applies_defaults() {
    let app = app();
    let view = add(
        &app,
        json!({"amount": 30, "description": " Snacks ", "paid_by": "A", "shared_with": ["A", "B"]}),
    )
    .await;

    assert_eq!(view.description, "Snacks");
    assert_eq!(view.split_type, "equal");
    assert_eq!(view.category, "Other");
    assert!(!view.is_recurring);
    assert_eq!(view.recurring_type, "none");
}

#[tokio::test]
async fn invalid_expense_is_rejected_with_reason() {
    let app = app();
    let (status, bytes) = send(
        &app,
        Method::POST,
        "/api/expenses",
        Some(json!({
            "amount": 100,
            "description": "Hotel",
            "paid_by": "A",
            "shared_with": ["A", "B"],
            "split_type": "percentage",
            "split_values": [50, 49]
        })),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(error_message(&bytes), "percentage split must total 100%");

    let (_, bytes) = send(&app, Method::GET, "/api/expenses", None).await;
    let list: Vec<ExpenseView> = serde_json::from_slice(&bytes).unwrap();
    assert!(list.is_empty());
}

#[tokio::test]
async fn missing_amount_is_a_validation_error() {
    let app = app();
    let (status, bytes) = send(
        &app,
        Method::POST,
        "/api/expenses",
        Some(json!({"description": "Hotel", "paid_by": "A", "shared_with": ["A"]})),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(error_message(&bytes), "amount must be greater than zero");
}

#[tokio::test]
async fn balances_and_settlements_follow_the_ledger() {
    let app = app();
    add(
        &app,
        json!({
            "amount": 300,
            "description": "Dinner",
            "paid_by": "A",
            "shared_with": ["A", "B", "C"]
        }),
    )
    .await;

    let (status, bytes) = send(&app, Method::GET, "/api/settlements/balances", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        String::from_utf8(bytes.clone()).unwrap(),
        r#"{"A":200.0,"B":-100.0,"C":-100.0}"#
    );
    let balances: BalancesView = serde_json::from_slice(&bytes).unwrap();
    assert_eq!(balances.get("B"), Some(-100.0));

    let (status, bytes) = send(&app, Method::GET, "/api/settlements", None).await;
    assert_eq!(status, StatusCode::OK);
    let settlements: Vec<SettlementView> = serde_json::from_slice(&bytes).unwrap();
    assert_eq!(
        settlements,
        vec![
            SettlementView {
                from: "B".to_string(),
                to: "A".to_string(),
                amount: 100.0,
            },
            SettlementView {
                from: "C".to_string(),
                to: "A".to_string(),
                amount: 100.0,
            },
        ]
    );

    let (_, bytes) = send(&app, Method::GET, "/api/settlements/people", None).await;
    let people: Vec<String> = serde_json::from_slice(&bytes).unwrap();
    assert_eq!(people, vec!["A", "B", "C"]);
}

#[tokio::test]
async fn update_and_delete_round_trip() {
    let app = app();
    let created = add(
        &app,
        json!({"amount": 10, "description": "Coffee", "paid_by": "A", "shared_with": ["B"]}),
    )
    .await;
    let uri = format!("/api/expenses/{}", created.id);

    let (status, bytes) = send(
        &app,
        Method::PUT,
        &uri,
        Some(json!({
            "amount": 12,
            "description": "Coffee",
            "paid_by": "A",
            "shared_with": ["B"],
            "category": "Food",
            "is_recurring": true,
            "recurring_type": "weekly",
            "recurring_interval": 1,
            "recurring_end_date": "2026-06-30"
        })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    let updated: ExpenseView = serde_json::from_slice(&bytes).unwrap();
    assert_eq!(updated.id, created.id);
    assert_eq!(updated.amount, 12.0);
    assert_eq!(updated.category, "Food");
    assert_eq!(updated.recurring_end_date.as_deref(), Some("2026-06-30"));

    let (status, _) = send(&app, Method::DELETE, &uri, None).await;
    assert_eq!(status, StatusCode::NO_CONTENT);

    let (status, bytes) = send(&app, Method::DELETE, &uri, None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(error_message(&bytes), "expense not found");
}

#[tokio::test]
async fn malformed_id_is_a_bad_request() {
    let app = app();
    let (status, _) = send(&app, Method::DELETE, "/api/expenses/not-a-uuid", None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn analytics_uses_camel_case_sections() {
    let app = app();
    add(
        &app,
        json!({
            "amount": 80,
            "description": "Flight",
            "paid_by": "A",
            "shared_with": ["A", "B"],
            "category": "Travel"
        }),
    )
    .await;
    add(
        &app,
        json!({
            "amount": 20,
            "description": "Lunch",
            "paid_by": "B",
            "shared_with": ["A", "B"],
            "category": "Food"
        }),
    )
    .await;

    let (status, bytes) = send(&app, Method::GET, "/api/analytics", None).await;
    assert_eq!(status, StatusCode::OK);

    let raw: Value = serde_json::from_slice(&bytes).unwrap();
    assert!(raw.get("categorySummary").is_some());
    assert!(raw.get("topTransactions").is_some());

    let analytics: Analytics = serde_json::from_slice(&bytes).unwrap();
    assert_eq!(analytics.monthly.len(), 1);
    assert_eq!(analytics.monthly[0].total, 100.0);
    let categories: Vec<_> = analytics
        .category_summary
        .iter()
        .map(|c| c.category.as_str())
        .collect();
    assert_eq!(categories, vec!["Travel", "Food"]);
    assert_eq!(analytics.top_transactions[0].description, "Flight");
}

#[tokio::test]
async fn malformed_body_is_a_json_error() {
    let app = app();
    let body = json!({
        "amount": "abc",
        "description": "Dinner",
        "paid_by": "A",
        "shared_with": ["A", "B"]
    });
    let (status, bytes) = send(&app, Method::POST, "/api/expenses", Some(body)).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(!error_message(&bytes).is_empty());

    let request = Request::builder()
        .method(Method::POST)
        .uri("/api/expenses")
        .header("content-type", "application/json")
        .body(Body::from("{not json"))
        .unwrap();
    let response = app.clone().oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    assert!(!error_message(&bytes).is_empty());
}

#[tokio::test]
async fn cross_origin_requests_are_allowed() {
    let app = app();
    let request = Request::builder()
        .method(Method::GET)
        .uri("/api/expenses")
        .header("origin", "http://localhost:5173")
        .body(Body::empty())
        .unwrap();
    let response = app.clone().oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        response.headers().get("access-control-allow-origin").unwrap(),
        "*"
    );

    let preflight = Request::builder()
        .method(Method::OPTIONS)
        .uri("/api/expenses")
        .header("origin", "http://localhost:5173")
        .header("access-control-request-method", "POST")
        .body(Body::empty())
        .unwrap();
    let response = app.oneshot(preflight).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert!(response.headers().contains_key("access-control-allow-methods"));
}

#[tokio::test]
async fn loosely_rounded_percentages_still_settle() {
    let app = app();
    add(
        &app,
        json!({
            "amount": 100.0,
            "description": "Cabin",
            "paid_by": "A",
            "shared_with": ["A", "B"],
            "split_type": "percentage",
            "split_values": [0.0, 99.6]
        }),
    )
    .await;

    let (status, bytes) = send(&app, Method::GET, "/api/settlements", None).await;
    assert_eq!(status, StatusCode::OK, "{}", String::from_utf8_lossy(&bytes));
    let settlements: Vec<SettlementView> = serde_json::from_slice(&bytes).unwrap();
    assert_eq!(settlements.len(), 1);
    assert_eq!(settlements[0].from, "B");
    assert_eq!(settlements[0].to, "A");
    assert_eq!(settlements[0].amount, 99.6);
}
