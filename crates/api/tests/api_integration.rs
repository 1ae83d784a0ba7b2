//! Integration tests for the API server.

use std::sync::OnceLock;

use axum::body::Body;
use axum::http::{Request, StatusCode};
use metrics_exporter_prometheus::PrometheusHandle;
use session_store::InMemorySessionStore;
use tower::ServiceExt;

static METRICS_HANDLE: OnceLock<PrometheusHandle> = OnceLock::new();

fn get_metrics_handle() -> PrometheusHandle {
    METRICS_HANDLE
        .get_or_init(|| {
            let builder = metrics_exporter_prometheus::PrometheusBuilder::new();
            builder
                .install_recorder()
                .expect("failed to install Prometheus recorder")
        })
        .clone()
}

fn setup() -> axum::Router {
    let state = api::create_state(
        api::catalog::seed_catalog(),
        InMemorySessionStore::new(),
        "http://localhost:3000",
    );
    api::create_app(state, get_metrics_handle())
}

async fn body_json(response: axum::response::Response) -> serde_json::Value {
    let body = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    serde_json::from_slice(&body).unwrap()
}

fn create_request(body: serde_json::Value) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri("/checkout_sessions")
        .header("content-type", "application/json")
        .body(Body::from(serde_json::to_string(&body).unwrap()))
        .unwrap()
}

#[tokio::test]
async fn test_health_check() {
    let app = setup();

    let response = app
        .oneshot(
            Request::builder()
                .uri("/health")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["status"], "ok");
}

#[tokio::test]
async fn test_discovery_document() {
    let app = setup();

    let response = app
        .oneshot(
            Request::builder()
                .uri("/.well-known/discovery.json")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["protocol_version"], "1.0");
    assert_eq!(json["service_endpoint"], "http://localhost:3000");
    let capabilities = json["capabilities"].as_array().unwrap();
    assert!(!capabilities.is_empty());
    assert!(capabilities[0]["name"].as_str().is_some());
    assert!(capabilities[0]["version"].as_str().is_some());
}

#[tokio::test]
async fn test_list_products_filters_unavailable() {
    let app = setup();

    let response = app
        .oneshot(
            Request::builder()
                .uri("/products")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    let products = json["products"].as_array().unwrap();
    assert_eq!(json["count"], products.len() as i64);
    assert!(products.iter().all(|p| p["available"] == true));
    // The seed catalog's unavailable item must not be listed.
    assert!(products.iter().all(|p| p["id"] != "seasonal-blend"));
    // Prices cross the wire as decimal strings.
    assert!(products[0]["unit_price"]["amount"].as_str().is_some());
}

#[tokio::test]
async fn test_create_checkout_session() {
    let app = setup();

    let response = app
        .oneshot(create_request(serde_json::json!({
            "line_items": [{"product_id": "latte", "quantity": 2}]
        })))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::CREATED);
    let json = body_json(response).await;
    assert_eq!(json["status"], "incomplete");
    assert_eq!(json["total"]["amount"], "1100");
    assert_eq!(json["total"]["currency"], "USD");
    assert_eq!(json["line_items"][0]["product_id"], "latte");
    assert_eq!(json["line_items"][0]["title"], "Latte");
    assert_eq!(json["line_items"][0]["quantity"], 2);
    assert!(json["id"].as_str().is_some());
    assert!(json["expires_at"].as_str().is_some());
    assert!(!json["payment_capabilities"].as_array().unwrap().is_empty());
}

#[tokio::test]
async fn test_create_and_get_session() {
    let app = setup();

    let create_response = app
        .clone()
        .oneshot(create_request(serde_json::json!({
            "line_items": [
                {"product_id": "latte", "quantity": 1},
                {"product_id": "muffin", "quantity": 3}
            ]
        })))
        .await
        .unwrap();
    let created = body_json(create_response).await;
    let session_id = created["id"].as_str().unwrap();

    let get_response = app
        .oneshot(
            Request::builder()
                .uri(format!("/checkout_sessions/{session_id}"))
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(get_response.status(), StatusCode::OK);
    let fetched = body_json(get_response).await;
    assert_eq!(fetched, created);
}

#[tokio::test]
async fn test_create_with_unknown_product() {
    let app = setup();

    let response = app
        .oneshot(create_request(serde_json::json!({
            "line_items": [{"product_id": "ghost", "quantity": 1}]
        })))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let json = body_json(response).await;
    assert!(json["error"].as_str().unwrap().contains("ghost"));
}

#[tokio::test]
async fn test_create_with_unavailable_product() {
    let app = setup();

    let response = app
        .oneshot(create_request(serde_json::json!({
            "line_items": [{"product_id": "seasonal-blend", "quantity": 1}]
        })))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let json = body_json(response).await;
    assert!(json["error"].as_str().unwrap().contains("seasonal-blend"));
}

#[tokio::test]
async fn test_create_with_empty_cart() {
    let app = setup();

    let response = app
        .oneshot(create_request(serde_json::json!({ "line_items": [] })))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_create_with_zero_quantity_is_malformed() {
    let app = setup();

    let response = app
        .oneshot(create_request(serde_json::json!({
            "line_items": [{"product_id": "latte", "quantity": 0}]
        })))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
}

#[tokio::test]
async fn test_complete_session_and_reject_repeat() {
    let app = setup();

    let create_response = app
        .clone()
        .oneshot(create_request(serde_json::json!({
            "line_items": [{"product_id": "espresso", "quantity": 1}]
        })))
        .await
        .unwrap();
    let created = body_json(create_response).await;
    let session_id = created["id"].as_str().unwrap();

    let complete_response = app
        .clone()
        .oneshot(
            Request::builder()
                .method("POST")
                .uri(format!("/checkout_sessions/{session_id}/complete"))
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(complete_response.status(), StatusCode::OK);
    let completed = body_json(complete_response).await;
    assert_eq!(completed["status"], "complete");
    assert_eq!(completed["total"], created["total"]);

    let repeat_response = app
        .oneshot(
            Request::builder()
                .method("POST")
                .uri(format!("/checkout_sessions/{session_id}/complete"))
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(repeat_response.status(), StatusCode::CONFLICT);
    let json = body_json(repeat_response).await;
    assert!(json["error"].as_str().unwrap().contains(session_id));
}

#[tokio::test]
async fn test_get_unknown_session() {
    let app = setup();

    let response = app
        .oneshot(
            Request::builder()
                .uri("/checkout_sessions/cs_unknown")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_complete_unknown_session() {
    let app = setup();

    let response = app
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/checkout_sessions/cs_unknown/complete")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_metrics_endpoint() {
    let app = setup();

    let response = app
        .oneshot(
            Request::builder()
                .uri("/metrics")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
}
