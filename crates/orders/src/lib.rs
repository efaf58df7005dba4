//! Orders service: order records for the storefront.

pub mod config;
pub mod error;
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

use routes::orders::AppState;
use service::OrdersService;
use store::OrderStore;

/// Creates the Axum application router with all routes and shared state.
pub fn create_app<S: OrderStore + Clone + 'static>(
    state: Arc<AppState<S>>,
    metrics_handle: PrometheusHandle,
) -> Router {
    let metrics_router = Router::new()
        .route("/metrics", get(routes::metrics::get))
        .with_state(metrics_handle);

    Router::new()
        .route("/v1/healthcheck", get(routes::health::check))
        .route("/v1/order", post(routes::orders::create::<S>))
        .route("/v1/order/{id}", get(routes::orders::get::<S>))
        .route("/v1/orders/user/{id}", get(routes::orders::by_user::<S>))
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
pub fn create_state<S: OrderStore + Clone>(store: S) -> Arc<AppState<S>> {
    Arc::new(AppState {
        service: OrdersService::new(store),
    })
}
