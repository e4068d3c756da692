//! Testes de rota: Router completo sobre o banco em memória.

use std::str::FromStr;
use std::sync::Arc;

use axum::{
    body::{to_bytes, Body},
    http::{header, Method, Request, StatusCode},
    Router,
};
use rust_decimal::Decimal;
use serde_json::{json, Value};
use tower::ServiceExt;

use orcamentos::config::{AppConfig, AppState};
use orcamentos::db::MemoryDocumentStore;

fn router() -> Router {
    let state = AppState::with_store(AppConfig::default(), Arc::new(MemoryDocumentStore::new()));
    orcamentos::app(state)
}

async fn send(app: &Router, method: Method, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
    send_with_language(app, method, uri, body, None).await
}

async fn send_with_language(
    app: &Router,
    method: Method,
    uri: &str,
    body: Option<Value>,
    language: Option<&str>,
) -> (StatusCode, Value) {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(language) = language {
        builder = builder.header(header::ACCEPT_LANGUAGE, language);
    }
    let request = match body {
        Some(body) => builder
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };

    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let value = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };
    (status, value)
}

// Valores em dinheiro saem como texto decimal exato
fn money(value: &Value) -> Decimal {
    Decimal::from_str(value.as_str().expect("decimal serializado como texto")).unwrap()
}

fn dec(s: &str) -> Decimal {
    Decimal::from_str(s).unwrap()
}

// Cria os dois itens e o produto de 264
async fn seed_product(app: &Router) -> Value {
    let (status, mdf) = send(app, Method::POST, "/api/materials", Some(json!({
        "name": "Chapa MDF", "unit": "square-meter", "unitPrice": 50
    }))).await;
    assert_eq!(status, StatusCode::CREATED);

    let (_, labor) = send(app, Method::POST, "/api/materials", Some(json!({
        "name": "Mão de obra", "unit": "hora", "unitPrice": 25
    }))).await;

    let (status, saved) = send(app, Method::POST, "/api/products", Some(json!({
        "name": "Armário",
        "costRows": [
            { "costItemId": mdf["id"], "quantity": 2 },
            { "costItemId": labor["id"], "duration": { "hours": 4, "minutes": 0 } }
        ],
        "fixedCostPercent": 10,
        "profitMarginPercent": 20
    }))).await;
    assert_eq!(status, StatusCode::CREATED);
    saved["product"].clone()
}

#[tokio::test]
async fn health_check_answers_ok() {
    let app = router();
    let response = app
        .oneshot(Request::builder().uri("/api/health").body(Body::empty()).unwrap())
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn product_creation_returns_cached_price() {
    let app = router();
    let product = seed_product(&app).await;

    assert_eq!(money(&product["finalSalePrice"]), dec("264"));
    assert_eq!(money(&product["totalProductCost"]), dec("220"));

    let (status, listed) = send(&app, Method::GET, "/api/products", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(listed.as_array().map(Vec::len), Some(1));
}

#[tokio::test]
async fn pricing_preview_does_not_save() {
    let app = router();
    let (_, item) = send(&app, Method::POST, "/api/materials", Some(json!({
        "name": "Cola", "unit": "liter", "unitPrice": 12.5
    }))).await;

    let (status, pricing) = send(&app, Method::POST, "/api/products/pricing", Some(json!({
        "costRows": [{ "costItemId": item["id"], "quantity": 2 }],
        "fixedCostPercent": 0,
        "profitMarginPercent": 100
    }))).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(money(&pricing["finalSalePrice"]), dec("50"));

    let (_, listed) = send(&app, Method::GET, "/api/products", None).await;
    assert_eq!(listed, json!([]));
}

#[tokio::test]
async fn negative_price_is_a_translated_validation_error() {
    let app = router();
    let (status, body) = send_with_language(&app, Method::POST, "/api/materials", Some(json!({
        "name": "Chapa", "unit": "unit", "unitPrice": -1
    })), Some("pt-BR,pt;q=0.9")).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "Um ou mais campos são inválidos.");
    assert_eq!(body["details"]["unit_price"][0], "O valor não pode ser negativo.");
}

#[tokio::test]
async fn unknown_ids_are_not_found() {
    let app = router();
    let missing = uuid::Uuid::new_v4();

    let (status, body) = send(&app, Method::GET, &format!("/api/products/{missing}"), None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["details"]["entity"], "product");

    let (status, _) = send(&app, Method::DELETE, &format!("/api/materials/{missing}"), None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn customer_accepts_empty_email_and_legacy_cnpj() {
    let app = router();
    let (status, customer) = send(&app, Method::POST, "/api/customers", Some(json!({
        "name": "Marcenaria Souza",
        "email": "",
        "cnpj": "12.345.678/0001-99"
    }))).await;

    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(customer["taxId"], "12.345.678/0001-99");
    assert!(customer["email"].is_null());

    let (status, _) = send(&app, Method::POST, "/api/customers", Some(json!({
        "name": "Sem email válido",
        "email": "não-é-email"
    }))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn budget_lifecycle_over_http() {
    let app = router();
    let product = seed_product(&app).await;
    let (_, customer) = send(&app, Method::POST, "/api/customers", Some(json!({
        "name": "Maria da Silva"
    }))).await;

    let (status, preview) = send(&app, Method::POST, "/api/budgets/preview", Some(json!({
        "items": [{ "productId": product["id"], "quantity": "3" }],
        "shippingCost": 20,
        "discount": 12
    }))).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(money(&preview["itemsTotal"]), dec("792"));
    assert_eq!(money(&preview["total"]), dec("800"));
    assert_eq!(money(&preview["items"][0]["subtotal"]), dec("792"));

    let (status, body) = send(&app, Method::POST, "/api/budgets", Some(json!({
        "items": [{ "productId": product["id"], "quantity": 1 }]
    }))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "Please select a customer.");

    let (status, budget) = send(&app, Method::POST, "/api/budgets", Some(json!({
        "customerId": customer["id"],
        "items": [{ "productId": product["id"], "quantity": 1 }]
    }))).await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(budget["status"], "Pending");

    let id = budget["id"].as_str().unwrap();
    let (status, updated) = send(&app, Method::PATCH, &format!("/api/budgets/{id}/status"), Some(json!({
        "status": "Recusado"
    }))).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(updated["status"], "Rejected");

    let (status, _) = send(&app, Method::PATCH, &format!("/api/budgets/{id}/status"), Some(json!({
        "status": "Approved"
    }))).await;
    assert_eq!(status, StatusCode::CONFLICT);

    let (status, summary) = send(&app, Method::GET, "/api/dashboard/summary", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(summary["rejectedCount"], 1);
    assert_eq!(money(&summary["totalValue"]), dec("264"));
}

#[tokio::test]
async fn cents_survive_the_round_trip() {
    let app = router();
    let (status, item) = send(&app, Method::POST, "/api/materials", Some(json!({
        "name": "Verniz importado", "unit": "liter", "unitPrice": "12345678901234567.89"
    }))).await;
    assert_eq!(status, StatusCode::CREATED);

    let id = item["id"].as_str().unwrap();
    let (_, loaded) = send(&app, Method::GET, &format!("/api/materials/{id}"), None).await;
    assert_eq!(money(&loaded["unitPrice"]), dec("12345678901234567.89"));
}

#[tokio::test]
async fn duration_with_too_many_minutes_is_rejected() {
    let app = router();
    let (_, labor) = send(&app, Method::POST, "/api/materials", Some(json!({
        "name": "Pintor", "unit": "hour", "unitPrice": 60
    }))).await;

    let (status, body) = send(&app, Method::POST, "/api/products", Some(json!({
        "name": "Pintura",
        "costRows": [{ "costItemId": labor["id"], "duration": { "hours": 1, "minutes": 90 } }],
        "fixedCostPercent": 0,
        "profitMarginPercent": 0
    }))).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["details"]["cost_rows[0].duration.minutes"].is_array());
}

#[tokio::test]
async fn status_example_is_accepted() {
    let app = router();
    let product = seed_product(&app).await;
    let (_, customer) = send(&app, Method::POST, "/api/customers", Some(json!({ "name": "Ana" }))).await;
    let (_, budget) = send(&app, Method::POST, "/api/budgets", Some(json!({
        "customerId": customer["id"],
        "items": [{ "productId": product["id"] }]
    }))).await;

    let id = budget["id"].as_str().unwrap();
    let (status, updated) = send(&app, Method::PATCH, &format!("/api/budgets/{id}/status"), Some(json!({
        "status": "Approved"
    }))).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(updated["status"], "Approved");
}
