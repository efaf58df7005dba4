//! HTTP gateways to the catalog and orders services.
//!
//! Every outbound call resolves the target service's address anew
//! through the registry, so consecutive calls may land on different
//! instances. Requests carry the client-level timeout; a timeout
//! surfaces as a transport error like any other network failure.

mod catalog;
mod orders;

pub use catalog::CatalogGateway;
pub use orders::OrdersGateway;

use async_trait::async_trait;
use axum::http::StatusCode;
use commons::resolver::ResolveError;
use thiserror::Error;

use ::catalog::model::{Category, CategoryId, Product, ProductId};
use ::orders::model::{Order, OrderId, OrderLine, UserId};

/// Errors returned by gateway calls.
///
/// The first three variants mirror the catalog service's status codes
/// for quantity operations; the reservation coordinator branches on
/// them.
#[derive(Debug, Error)]
pub enum GatewayError {
    /// The remote resource does not exist (HTTP 404).
    #[error("not found")]
    NotFound,

    /// The available quantity is insufficient (HTTP 400 on decrease).
    #[error("not enough quantity")]
    NotEnough,

    /// The remote detected a lost-update race (HTTP 409).
    #[error("edit conflict")]
    EditConflict,

    /// No healthy instance of the target service is known.
    #[error(transparent)]
    ServiceUnavailable(#[from] ResolveError),

    /// The remote answered with a status the contract does not cover.
    #[error("unexpected status: {0}")]
    UnexpectedStatus(StatusCode),

    /// A network-layer failure, including timeouts.
    #[error("transport error: {0}")]
    Transport(#[from] reqwest::Error),
}

/// Browse surface of the catalog service.
#[async_trait]
pub trait CatalogApi: Send + Sync {
    async fn catalog(&self) -> Result<Vec<Category>, GatewayError>;
    async fn products_by_category(&self, id: CategoryId) -> Result<Vec<Product>, GatewayError>;
    async fn product(&self, id: ProductId) -> Result<Product, GatewayError>;
}

/// Surface of the orders service.
#[async_trait]
pub trait OrdersApi: Send + Sync {
    async fn create_order(
        &self,
        user_id: UserId,
        price_cents: i64,
        items: Vec<OrderLine>,
    ) -> Result<OrderId, GatewayError>;
    async fn order(&self, id: OrderId) -> Result<Order, GatewayError>;
    async fn orders_by_user(&self, id: UserId) -> Result<Vec<Order>, GatewayError>;
}
