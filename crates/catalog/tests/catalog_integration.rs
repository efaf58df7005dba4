//! Integration tests for the catalog HTTP surface.

use std::sync::OnceLock;

use axum::body::Body;
use axum::http::{Request, StatusCode};
use catalog::model::NewProduct;
use catalog::store::{MemoryProductStore, ProductStore};
use metrics_exporter_prometheus::PrometheusHandle;
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

async fn setup() -> (axum::Router, MemoryProductStore) {
    let store = MemoryProductStore::new();
    let state = catalog::create_state(store.clone());
    let app = catalog::create_app(state, get_metrics_handle());
    (app, store)
}

async fn seed_product(store: &MemoryProductStore, quantity: u32) -> i64 {
    let category = store.put_category("peripherals").await.unwrap();
    let product = store
        .put_product(NewProduct {
            name: "Keyboard".to_string(),
            description: String::new(),
            price_cents: 12999,
            quantity,
            image_url: String::new(),
            attributes: serde_json::json!({}),
            category_id: category.id,
        })
        .await
        .unwrap();
    product.id.as_i64()
}

async fn body_json(response: axum::response::Response) -> serde_json::Value {
    let body = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    serde_json::from_slice(&body).unwrap()
}

#[tokio::test]
async fn healthcheck_reports_available() {
    let (app, _) = setup().await;

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
    let json = body_json(response).await;
    assert_eq!(json["status"], "available");
}

#[tokio::test]
async fn empty_catalog_is_not_found() {
    let (app, _) = setup().await;

    let response = app
        .oneshot(
            Request::builder()
                .uri("/v1/catalog")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn catalog_lists_categories() {
    let (app, store) = setup().await;
    seed_product(&store, 3).await;

    let response = app
        .oneshot(
            Request::builder()
                .uri("/v1/catalog")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["categories"][0]["name"], "peripherals");
}

#[tokio::test]
async fn product_is_served_with_quantity() {
    let (app, store) = setup().await;
    let id = seed_product(&store, 7).await;

    let response = app
        .oneshot(
            Request::builder()
                .uri(format!("/v1/product/{id}"))
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["product"]["quantity"], 7);
    assert_eq!(json["product"]["price_cents"], 12999);
}

#[tokio::test]
async fn unknown_product_is_not_found() {
    let (app, _) = setup().await;

    let response = app
        .oneshot(
            Request::builder()
                .uri("/v1/product/99")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn decrease_reduces_stock() {
    let (app, store) = setup().await;
    let id = seed_product(&store, 10).await;

    let response = app
        .oneshot(
            Request::builder()
                .method("POST")
                .uri(format!("/v1/product/{id}/decrease/4"))
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        store.quantity(catalog::model::ProductId::new(id)).await.unwrap(),
        6
    );
}

#[tokio::test]
async fn decrease_beyond_stock_is_bad_request() {
    let (app, store) = setup().await;
    let id = seed_product(&store, 2).await;

    let response = app
        .oneshot(
            Request::builder()
                .method("POST")
                .uri(format!("/v1/product/{id}/decrease/5"))
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(
        store.quantity(catalog::model::ProductId::new(id)).await.unwrap(),
        2
    );
}

#[tokio::test]
async fn decrease_unknown_product_is_not_found() {
    let (app, _) = setup().await;

    let response = app
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/v1/product/42/decrease/1")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn zero_amount_decrease_is_bad_request() {
    let (app, store) = setup().await;
    let id = seed_product(&store, 2).await;

    let response = app
        .oneshot(
            Request::builder()
                .method("POST")
                .uri(format!("/v1/product/{id}/decrease/0"))
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn non_numeric_product_id_is_not_found() {
    let (app, _) = setup().await;

    let response = app
        .clone()
        .oneshot(
            Request::builder()
                .uri("/v1/product/abc")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    let response = app
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/v1/product/abc/decrease/1")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn non_numeric_amount_is_bad_request() {
    let (app, store) = setup().await;
    let id = seed_product(&store, 5).await;

    let response = app
        .oneshot(
            Request::builder()
                .method("POST")
                .uri(format!("/v1/product/{id}/decrease/abc"))
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(
        store.quantity(catalog::model::ProductId::new(id)).await.unwrap(),
        5
    );
}

#[tokio::test]
async fn increase_restocks() {
    let (app, store) = setup().await;
    let id = seed_product(&store, 2).await;

    let response = app
        .oneshot(
            Request::builder()
                .method("POST")
                .uri(format!("/v1/product/{id}/increase/3"))
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        store.quantity(catalog::model::ProductId::new(id)).await.unwrap(),
        5
    );
}

#[tokio::test]
async fn put_category_and_product_return_created() {
    let (app, _) = setup().await;

    let response = app
        .clone()
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/v1/category")
                .header("content-type", "application/json")
                .body(Body::from(r#"{"name": "audio"}"#))
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::CREATED);
    let json = body_json(response).await;
    let category_id = json["category"]["id"].as_i64().unwrap();

    let response = app
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/v1/product")
                .header("content-type", "application/json")
                .body(Body::from(
                    serde_json::to_string(&serde_json::json!({
                        "name": "Headphones",
                        "price_cents": 19999,
                        "quantity": 4,
                        "category_id": category_id
                    }))
                    .unwrap(),
                ))
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::CREATED);
    let json = body_json(response).await;
    assert_eq!(json["product"]["name"], "Headphones");
}

#[tokio::test]
async fn metrics_endpoint_renders() {
    let (app, _) = setup().await;

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
