//! Integration tests for the orders HTTP surface.

use std::sync::OnceLock;

use axum::body::Body;
use axum::http::{Request, StatusCode};
use metrics_exporter_prometheus::PrometheusHandle;
use orders::store::MemoryOrderStore;
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
    let state = orders::create_state(MemoryOrderStore::new());
    orders::create_app(state, get_metrics_handle())
}

async fn body_json(response: axum::response::Response) -> serde_json::Value {
    let body = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    serde_json::from_slice(&body).unwrap()
}

fn create_order_request(user_id: i64) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri("/v1/order")
        .header("content-type", "application/json")
        .body(Body::from(
            serde_json::to_string(&serde_json::json!({
                "user_id": user_id,
                "price_cents": 25999,
                "items": [
                    {"item_id": 1, "quantity": 2},
                    {"item_id": 3, "quantity": 1}
                ]
            }))
            .unwrap(),
        ))
        .unwrap()
}

#[tokio::test]
async fn healthcheck_reports_available() {
    let app = setup();

    let response = app
        .oneshot(
            Request::builder()
                .uri("/v1/healthcheck")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn create_order_returns_created_with_id() {
    let app = setup();

    let response = app.oneshot(create_order_request(7)).await.unwrap();

    assert_eq!(response.status(), StatusCode::CREATED);
    let json = body_json(response).await;
    assert_eq!(json["order"]["id"], 1);
}

#[tokio::test]
async fn create_order_without_items_is_bad_request() {
    let app = setup();

    let response = app
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/v1/order")
                .header("content-type", "application/json")
                .body(Body::from(
                    r#"{"user_id": 7, "price_cents": 0, "items": []}"#,
                ))
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn created_order_is_retrievable() {
    let app = setup();

    app.clone().oneshot(create_order_request(7)).await.unwrap();

    let response = app
        .oneshot(
            Request::builder()
                .uri("/v1/order/1")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["order"]["user_id"], 7);
    assert_eq!(json["order"]["status"], "created");
    assert_eq!(json["order"]["items"].as_array().unwrap().len(), 2);
}

#[tokio::test]
async fn unknown_order_is_not_found() {
    let app = setup();

    let response = app
        .oneshot(
            Request::builder()
                .uri("/v1/order/42")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn non_numeric_order_id_is_not_found() {
    let app = setup();

    let response = app
        .oneshot(
            Request::builder()
                .uri("/v1/order/abc")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn orders_by_user_lists_only_that_user() {
    let app = setup();

    app.clone().oneshot(create_order_request(7)).await.unwrap();
    app.clone().oneshot(create_order_request(8)).await.unwrap();

    let response = app
        .oneshot(
            Request::builder()
                .uri("/v1/orders/user/7")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    let orders = json["orders"].as_array().unwrap();
    assert_eq!(orders.len(), 1);
    assert_eq!(orders[0]["user_id"], 7);
}

#[tokio::test]
async fn user_without_orders_is_not_found() {
    let app = setup();

    let response = app
        .oneshot(
            Request::builder()
                .uri("/v1/orders/user/9")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}
