//! Order persistence contract and backends.

mod memory;
mod postgres;

pub use memory::MemoryOrderStore;
pub use postgres::PostgresOrderStore;

use async_trait::async_trait;
use thiserror::Error;

use crate::model::{Order, OrderId, OrderLine, UserId};

/// Errors returned by order store operations.
#[derive(Debug, Error)]
pub enum StoreError {
    /// The requested record does not exist.
    #[error("record not found")]
    NotFound,

    /// The order payload is invalid and nothing was recorded.
    #[error("order not created")]
    NotCreated,

    /// A database error occurred.
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),
}

/// Result type for store operations.
pub type Result<T> = std::result::Result<T, StoreError>;

/// Persistence contract for order records.
#[async_trait]
pub trait OrderStore: Send + Sync {
    /// Records a new order and returns its assigned ID.
    ///
    /// The order row and its lines are recorded atomically. An empty
    /// line list or any line with a zero quantity fails with
    /// `NotCreated`, leaving nothing behind.
    async fn create_order(
        &self,
        user_id: UserId,
        price_cents: i64,
        items: Vec<OrderLine>,
    ) -> Result<OrderId>;

    /// Loads an order by ID.
    async fn order(&self, order_id: OrderId) -> Result<Order>;

    /// Returns a user's orders, newest first. Fails with `NotFound`
    /// when the user has none.
    async fn orders_by_user(&self, user_id: UserId) -> Result<Vec<Order>>;
}
