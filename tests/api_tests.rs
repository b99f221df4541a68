use axum::{
    body::{to_bytes, Body},
    http::{header, Request, StatusCode},
    Router,
};
use serde_json::{json, Value};
use tower::ServiceExt;

use stand_automovel::config::EnvironmentConfig;
use stand_automovel::repositories::MemoryStore;
use stand_automovel::{create_router, AppState};

// Función helper para crear la app de test sobre almacenamiento en memoria
fn create_test_app() -> Router {
    create_router(AppState::in_memory(
        MemoryStore::new(),
        EnvironmentConfig::default(),
    ))
}

async fn send(app: &Router, method: &str, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
    let builder = Request::builder().method(method).uri(uri);
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
    let json = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };
    (status, json)
}

async fn create_client(app: &Router) -> i64 {
    let (status, body) = send(
        app,
        "POST",
        "/clients",
        Some(json!({ "name": "Maria Costa", "email": "maria@example.com", "phone": 912345678 })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    body["client"]["id"].as_i64().unwrap()
}

async fn create_vehicle(app: &Router, status: &str) -> i64 {
    let (code, body) = send(
        app,
        "POST",
        "/vehicles",
        Some(json!({
            "type": "carro",
            "brand": "Toyota",
            "model": "Corolla",
            "year": 2020,
            "motor": "1.8 Hybrid",
            "status": status
        })),
    )
    .await;
    assert_eq!(code, StatusCode::CREATED);
    body["vehicle"]["id"].as_i64().unwrap()
}

#[tokio::test]
async fn test_health_check() {
    let app = create_test_app();
    let (status, body) = send(&app, "GET", "/health", None).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "ok");
}

#[tokio::test]
async fn test_create_sale_and_vehicle_becomes_sold() {
    let app = create_test_app();
    let client_id = create_client(&app).await;
    let vehicle_id = create_vehicle(&app, "available").await;

    let (status, body) = send(
        &app,
        "POST",
        "/sales",
        Some(json!({ "client_id": client_id, "vehicle_id": vehicle_id, "price": 25000.00 })),
    )
    .await;

    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["message"], "Sale created successfully!");
    assert_eq!(body["sale"]["id"], 1);
    assert_eq!(body["sale"]["client_id"], client_id);
    assert_eq!(body["sale"]["vehicle_id"], vehicle_id);
    assert_eq!(body["sale"]["price"].as_f64(), Some(25000.0));
    assert!(body["sale"]["sale_date"].is_string());

    let (status, vehicle) = send(&app, "GET", &format!("/vehicles/{}", vehicle_id), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(vehicle["status"], "sold");
}

#[tokio::test]
async fn test_repeated_sale_returns_conflict_with_vehicle_id() {
    let app = create_test_app();
    let client_id = create_client(&app).await;
    let vehicle_id = create_vehicle(&app, "available").await;
    let sale = json!({ "client_id": client_id, "vehicle_id": vehicle_id, "price": 25000.00 });

    let (status, _) = send(&app, "POST", "/sales", Some(sale.clone())).await;
    assert_eq!(status, StatusCode::CREATED);

    let (status, body) = send(&app, "POST", "/sales", Some(sale)).await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["message"], "Vehicle is already sold");
    assert_eq!(body["vehicle_id"], vehicle_id);

    let (_, sales) = send(&app, "GET", "/sales", None).await;
    assert_eq!(sales.as_array().unwrap().len(), 1);
}

#[tokio::test]
async fn test_sale_with_unknown_client_keeps_vehicle_available() {
    let app = create_test_app();
    let vehicle_id = create_vehicle(&app, "available").await;

    let (status, body) = send(
        &app,
        "POST",
        "/sales",
        Some(json!({ "client_id": 999, "vehicle_id": vehicle_id, "price": 1000.00 })),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["code"], "CLIENT_NOT_FOUND");

    let (_, vehicle) = send(&app, "GET", &format!("/vehicles/{}", vehicle_id), None).await;
    assert_eq!(vehicle["status"], "available");
}

#[tokio::test]
async fn test_malformed_sale_body_is_bad_request() {
    let app = create_test_app();

    let (status, body) = send(
        &app,
        "POST",
        "/sales",
        Some(json!({ "client_id": 1, "price": 1000.00 })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["message"], "Could not parse request data.");

    let (status, _) = send(
        &app,
        "POST",
        "/sales",
        Some(json!({ "client_id": 1, "vehicle_id": 1, "price": 0 })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_price_outside_column_range_is_validation_error() {
    let app = create_test_app();
    let client_id = create_client(&app).await;
    let vehicle_id = create_vehicle(&app, "available").await;

    for price in [json!(0.001), json!(25000.005), json!(100000000000_i64)] {
        let (status, body) = send(
            &app,
            "POST",
            "/sales",
            Some(json!({ "client_id": client_id, "vehicle_id": vehicle_id, "price": price })),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST, "price {}", price);
        assert_eq!(body["code"], "VALIDATION_ERROR");
    }

    let (_, vehicle) = send(&app, "GET", &format!("/vehicles/{}", vehicle_id), None).await;
    assert_eq!(vehicle["status"], "available");
}

#[tokio::test]
async fn test_client_supplied_sale_date_is_ignored() {
    let app = create_test_app();
    let client_id = create_client(&app).await;
    let vehicle_id = create_vehicle(&app, "available").await;

    let before = chrono::Utc::now();
    let (status, body) = send(
        &app,
        "POST",
        "/sales",
        Some(json!({
            "client_id": client_id,
            "vehicle_id": vehicle_id,
            "price": 18000.00,
            "sale_date": "2000-01-01T00:00:00Z"
        })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);

    let sale_date = chrono::DateTime::parse_from_rfc3339(body["sale"]["sale_date"].as_str().unwrap())
        .unwrap()
        .with_timezone(&chrono::Utc);
    assert!(sale_date >= before);
    assert!(sale_date <= chrono::Utc::now());
}

#[tokio::test]
async fn test_sales_are_listed_most_recent_first_with_details() {
    let app = create_test_app();
    let client_id = create_client(&app).await;
    let first = create_vehicle(&app, "available").await;
    let second = create_vehicle(&app, "available").await;

    for vehicle_id in [first, second] {
        let (status, _) = send(
            &app,
            "POST",
            "/sales",
            Some(json!({ "client_id": client_id, "vehicle_id": vehicle_id, "price": 9999.99 })),
        )
        .await;
        assert_eq!(status, StatusCode::CREATED);
    }

    let (status, sales) = send(&app, "GET", "/sales", None).await;
    assert_eq!(status, StatusCode::OK);
    let sales = sales.as_array().unwrap();
    assert_eq!(sales[0]["vehicle"]["id"], second);
    assert_eq!(sales[1]["vehicle"]["id"], first);
    assert_eq!(sales[0]["client"]["name"], "Maria Costa");
    assert_eq!(sales[0]["vehicle"]["type"], "carro");

    let (status, sale) = send(&app, "GET", "/sales/1", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(sale["vehicle"]["id"], first);
    assert_eq!(sale["vehicle"]["status"], "sold");
}

#[tokio::test]
async fn test_unknown_and_unparsable_sale_ids() {
    let app = create_test_app();

    let (status, _) = send(&app, "GET", "/sales/42", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, body) = send(&app, "GET", "/sales/abc", None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["message"], "Could not parse sale id.");
}

#[tokio::test]
async fn test_vehicle_crud() {
    let app = create_test_app();
    let id = create_vehicle(&app, "available").await;

    let (status, body) = send(
        &app,
        "PUT",
        &format!("/vehicles/{}", id),
        Some(json!({
            "type": "carro",
            "brand": "Toyota",
            "model": "Yaris",
            "year": 2022,
            "motor": "1.5",
            "status": "available"
        })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["vehicle"]["model"], "Yaris");

    let (_, vehicles) = send(&app, "GET", "/vehicles", None).await;
    assert_eq!(vehicles.as_array().unwrap().len(), 1);

    let (status, _) = send(&app, "DELETE", &format!("/vehicles/{}", id), None).await;
    assert_eq!(status, StatusCode::OK);

    let (status, _) = send(&app, "GET", &format!("/vehicles/{}", id), None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_vehicle_with_unknown_status_is_rejected() {
    let app = create_test_app();

    let (status, _) = send(
        &app,
        "POST",
        "/vehicles",
        Some(json!({
            "type": "mota",
            "brand": "Honda",
            "model": "CB500",
            "year": 2019,
            "motor": "500cc",
            "status": "reserved"
        })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_client_crud_and_validation() {
    let app = create_test_app();
    let id = create_client(&app).await;

    let (status, body) = send(
        &app,
        "PUT",
        &format!("/clients/{}", id),
        Some(json!({ "name": "Maria C. Costa", "email": "mcosta@example.com", "phone": 913000000 })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["client"]["email"], "mcosta@example.com");

    let (status, body) = send(
        &app,
        "POST",
        "/clients",
        Some(json!({ "name": "Sem Email", "email": "not-an-email", "phone": 1 })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], "VALIDATION_ERROR");

    let (status, _) = send(&app, "DELETE", &format!("/clients/{}", id), None).await;
    assert_eq!(status, StatusCode::OK);
    let (status, _) = send(&app, "DELETE", &format!("/clients/{}", id), None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_sold_vehicle_and_buyer_cannot_be_deleted() {
    let app = create_test_app();
    let client_id = create_client(&app).await;
    let vehicle_id = create_vehicle(&app, "available").await;
    let (status, _) = send(
        &app,
        "POST",
        "/sales",
        Some(json!({ "client_id": client_id, "vehicle_id": vehicle_id, "price": 15000 })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);

    let (status, _) = send(&app, "DELETE", &format!("/vehicles/{}", vehicle_id), None).await;
    assert_eq!(status, StatusCode::CONFLICT);
    let (status, _) = send(&app, "DELETE", &format!("/clients/{}", client_id), None).await;
    assert_eq!(status, StatusCode::CONFLICT);
}
