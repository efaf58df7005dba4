//! Web server entry point.

use std::sync::Arc;

use commons::discovery::{InMemoryRegistry, Registry};
use tokio::signal;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use web::config::Config;
use web::gateway::{CatalogGateway, OrdersGateway};

/// Waits for a shutdown signal (SIGINT or SIGTERM).
async fn shutdown_signal() {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("failed to install SIGINT handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("failed to install SIGTERM handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {
            tracing::info!("received SIGINT, starting graceful shutdown");
        }
        () = terminate => {
            tracing::info!("received SIGTERM, starting graceful shutdown");
        }
    }
}

/// Seeds the registry with the statically configured instances of a
/// service.
async fn seed_service(registry: &InMemoryRegistry, service: &str, addrs: &[String]) {
    for (index, addr) in addrs.iter().enumerate() {
        let instance_id = format!("{service}-{index}");
        registry
            .register(&instance_id, service, addr)
            .await
            .expect("failed to seed registry");
    }
}

#[tokio::main]
async fn main() {
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = Config::from_env();

    // Static topology from configuration; instances never expire.
    let registry = Arc::new(InMemoryRegistry::without_ttl());
    seed_service(&registry, "catalog", &config.catalog_addrs).await;
    seed_service(&registry, "orders", &config.orders_addrs).await;

    let catalog = CatalogGateway::new(registry.clone(), config.gateway_timeout)
        .expect("failed to build catalog gateway");
    let orders = OrdersGateway::new(registry.clone(), config.gateway_timeout)
        .expect("failed to build orders gateway");

    let prometheus_builder = metrics_exporter_prometheus::PrometheusBuilder::new();
    let metrics_handle = prometheus_builder
        .install_recorder()
        .expect("failed to install Prometheus recorder");

    let state = web::create_state(catalog, orders);
    let app = web::create_app(state, metrics_handle);

    let addr = config.addr();
    tracing::info!(%addr, "starting web server");

    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .expect("failed to bind address");
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .expect("server error");

    tracing::info!("server shut down gracefully");
}
