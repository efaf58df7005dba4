use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::RwLock;

use crate::model::{Order, OrderId, OrderLine, STATUS_NEW, UserId};
use crate::store::{OrderStore, Result, StoreError};

#[derive(Default)]
struct Inner {
    orders: HashMap<OrderId, Order>,
    next_order_id: i64,
}

/// In-memory order store for tests and database-free configurations.
#[derive(Clone, Default)]
pub struct MemoryOrderStore {
    inner: Arc<RwLock<Inner>>,
}

impl MemoryOrderStore {
    /// Creates a new empty in-memory store.
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl OrderStore for MemoryOrderStore {
    async fn create_order(
        &self,
        user_id: UserId,
        price_cents: i64,
        items: Vec<OrderLine>,
    ) -> Result<OrderId> {
        if items.is_empty() || items.iter().any(|line| line.quantity < 1) {
            return Err(StoreError::NotCreated);
        }

        let mut inner = self.inner.write().await;
        inner.next_order_id += 1;
        let id = OrderId::new(inner.next_order_id);

        let order = Order {
            id,
            user_id,
            price_cents,
            status: STATUS_NEW.to_string(),
            items,
            created_at: Utc::now(),
        };
        inner.orders.insert(id, order);

        Ok(id)
    }

    async fn order(&self, order_id: OrderId) -> Result<Order> {
        let inner = self.inner.read().await;
        inner
            .orders
            .get(&order_id)
            .cloned()
            .ok_or(StoreError::NotFound)
    }

    async fn orders_by_user(&self, user_id: UserId) -> Result<Vec<Order>> {
        let inner = self.inner.read().await;
        let mut orders: Vec<Order> = inner
            .orders
            .values()
            .filter(|order| order.user_id == user_id)
            .cloned()
            .collect();

        if orders.is_empty() {
            return Err(StoreError::NotFound);
        }

        // IDs tie-break equal timestamps so ordering stays deterministic.
        orders.sort_by(|a, b| (b.created_at, b.id).cmp(&(a.created_at, a.id)));
        Ok(orders)
    }
}
