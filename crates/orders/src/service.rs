//! Order operations over the store.

use thiserror::Error;

use crate::model::{Order, OrderId, OrderLine, UserId};
use crate::store::{OrderStore, StoreError};

/// Errors returned by order operations.
#[derive(Debug, Error)]
pub enum OrdersError {
    /// The requested record does not exist.
    #[error("not found")]
    NotFound,

    /// The order payload is invalid and nothing was recorded.
    #[error("order not created")]
    NotCreated,

    /// A storage error occurred.
    #[error("store error: {0}")]
    Store(StoreError),
}

impl From<StoreError> for OrdersError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::NotFound => OrdersError::NotFound,
            StoreError::NotCreated => OrdersError::NotCreated,
            other => OrdersError::Store(other),
        }
    }
}

/// Result type for order operations.
pub type Result<T> = std::result::Result<T, OrdersError>;

/// Service layer of the orders crate.
#[derive(Clone)]
pub struct OrdersService<S> {
    store: S,
}

impl<S: OrderStore> OrdersService<S> {
    /// Creates a new orders service over the given store.
    pub fn new(store: S) -> Self {
        Self { store }
    }

    #[tracing::instrument(skip(self, items))]
    pub async fn create_order(
        &self,
        user_id: UserId,
        price_cents: i64,
        items: Vec<OrderLine>,
    ) -> Result<OrderId> {
        let id = self.store.create_order(user_id, price_cents, items).await?;
        metrics::counter!("orders_created_total").increment(1);
        tracing::info!(order_id = %id, %user_id, price_cents, "order recorded");
        Ok(id)
    }

    pub async fn order(&self, order_id: OrderId) -> Result<Order> {
        Ok(self.store.order(order_id).await?)
    }

    pub async fn orders_by_user(&self, user_id: UserId) -> Result<Vec<Order>> {
        Ok(self.store.orders_by_user(user_id).await?)
    }
}
