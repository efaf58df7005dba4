//! Web storefront: carts, checkout, and passthrough browsing.
//!
//! Fronts the catalog and orders services over HTTP gateways that
//! resolve their targets through the service registry. Checkout runs
//! the stock reservation coordinator: per-product decrements applied in
//! order, compensated on the first failure, order placed only once the
//! whole cart is reserved.

pub mod cart;
pub mod config;
pub mod error;
pub mod gateway;
pub mod routes;
pub mod stock;

use std::sync::Arc;

use axum::Router;
use axum::routing::{delete, get, post};
use metrics_exporter_prometheus::PrometheusHandle;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use cart::CartStore;
use gateway::{CatalogApi, OrdersApi};
use routes::AppState;
use stock::{StockClient, StockCoordinator};

/// Creates the Axum application router with all routes and shared state.
pub fn create_app<C, O>(state: Arc<AppState<C, O>>, metrics_handle: PrometheusHandle) -> Router
where
    C: CatalogApi + StockClient + 'static,
    O: OrdersApi + 'static,
{
    let metrics_router = Router::new()
        .route("/metrics", get(routes::metrics::get))
        .with_state(metrics_handle);

    Router::new()
        .route("/v1/healthcheck", get(routes::health::check))
        .route("/v1/catalog", get(routes::catalog::categories::<C, O>))
        .route(
            "/v1/category/{id}",
            get(routes::catalog::products_by_category::<C, O>),
        )
        .route("/v1/product/{id}", get(routes::catalog::product::<C, O>))
        .route("/v1/cart/{user_id}", get(routes::cart::get::<C, O>))
        .route(
            "/v1/cart/{user_id}/items",
            post(routes::cart::add_item::<C, O>),
        )
        .route(
            "/v1/cart/{user_id}/items/{product_id}",
            delete(routes::cart::remove_item::<C, O>),
        )
        .route(
            "/v1/checkout/{user_id}",
            post(routes::checkout::checkout::<C, O>),
        )
        .route("/v1/order/{id}", get(routes::orders::order::<C, O>))
        .route(
            "/v1/orders/user/{id}",
            get(routes::orders::orders_by_user::<C, O>),
        )
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

/// Creates the application state over the given gateways.
pub fn create_state<C, O>(catalog: C, orders: O) -> Arc<AppState<C, O>>
where
    C: CatalogApi + StockClient + Clone,
    O: OrdersApi,
{
    Arc::new(AppState {
        coordinator: StockCoordinator::new(catalog.clone()),
        catalog,
        orders,
        carts: CartStore::new(),
    })
}
