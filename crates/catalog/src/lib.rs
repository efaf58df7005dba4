//! Catalog service: product browse surface and the stock quantity ledger.
//!
//! Holds the authoritative per-product quantity counter. Decreases go
//! through an optimistic conditional update so concurrent writers never
//! silently lose updates; the losing writer gets an edit conflict and
//! the caller decides whether to retry.

pub mod config;
pub mod error;
pub mod ledger;
pub mod model;
pub mod routes;
pub mod service;
pub mod store;

use std::sync::Arc;

use axum::Router;
use axum::routing::{get, post};
use metrics_exporter_prometheus::PrometheusHandle;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use ledger::StockLedger;
use routes::catalog::AppState;
use service::CatalogService;
use store::ProductStore;

/// Creates the Axum application router with all routes and shared state.
pub fn create_app<S: ProductStore + Clone + 'static>(
    state: Arc<AppState<S>>,
    metrics_handle: PrometheusHandle,
) -> Router {
    let metrics_router = Router::new()
        .route("/metrics", get(routes::metrics::get))
        .with_state(metrics_handle);

    Router::new()
        .route("/v1/healthcheck", get(routes::health::check))
        .route("/v1/catalog", get(routes::catalog::categories::<S>))
        .route(
            "/v1/category/{id}",
            get(routes::catalog::products_by_category::<S>),
        )
        .route("/v1/product/{id}", get(routes::catalog::product::<S>))
        .route(
            "/v1/product/{id}/decrease/{amount}",
            post(routes::catalog::decrease_quantity::<S>),
        )
        .route(
            "/v1/product/{id}/increase/{amount}",
            post(routes::catalog::increase_quantity::<S>),
        )
        .route("/v1/category", post(routes::catalog::put_category::<S>))
        .route("/v1/product", post(routes::catalog::put_product::<S>))
        .with_state(state)
        .merge(metrics_router)
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .layer(TraceLayer::new_for_http())
}

/// Creates the application state over the given store.
pub fn create_state<S: ProductStore + Clone>(store: S) -> Arc<AppState<S>> {
    Arc::new(AppState {
        service: CatalogService::new(store.clone()),
        ledger: StockLedger::new(store),
    })
}
