//! The stock reservation coordinator.
//!
//! Makes a set of per-product decrements behave as a single
//! all-or-nothing operation across network calls that share no
//! transaction. Items are reserved strictly in order; the first
//! failure stops forward progress, every item reserved so far is
//! compensated with an increase, and the original failure is returned
//! naming the product that caused it.
//!
//! Compensation is best effort. A failed increase is logged and
//! counted but never aborts the remaining compensations and never
//! reaches the caller: the caller already holds the reservation
//! failure, and skipping the remaining compensations would leave more
//! inventory under-restored, not less. Inventory left over-decremented
//! by a failed compensation is reconciled out of band.

use catalog::model::ProductId;
use thiserror::Error;

use crate::gateway::GatewayError;

/// One line of a reservation attempt.
///
/// Transient: built per checkout attempt and discarded when the
/// attempt returns.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReservationItem {
    pub product_id: ProductId,
    pub amount: u32,
}

/// The narrow seam the coordinator needs from the catalog service.
#[async_trait::async_trait]
pub trait StockClient: Send + Sync {
    async fn decrease_quantity(&self, id: ProductId, amount: u32) -> Result<(), GatewayError>;
    async fn increase_quantity(&self, id: ProductId, amount: u32) -> Result<(), GatewayError>;
}

/// Errors returned by a reservation attempt.
#[derive(Debug, Error)]
pub enum ReserveError {
    /// A reservation step failed; `product_id` names the failing
    /// product and `source` carries the originating error.
    #[error("failed to reserve product {product_id}: {source}")]
    Reservation {
        product_id: ProductId,
        #[source]
        source: GatewayError,
    },
}

/// Coordinates multi-item reservations over a [`StockClient`].
#[derive(Clone)]
pub struct StockCoordinator<C> {
    client: C,
}

impl<C: StockClient> StockCoordinator<C> {
    /// Creates a coordinator over the given client.
    pub fn new(client: C) -> Self {
        Self { client }
    }

    /// Attempts to reserve every item, in order.
    ///
    /// An empty list returns immediately with an empty reserved set
    /// and performs zero network calls. On the first failing item no
    /// further decrement is attempted, everything reserved so far is
    /// rolled back, and the error identifies the failing product.
    ///
    /// On success the accumulated reserved set is returned; the caller
    /// keeps it only as long as it may still need to roll the
    /// reservation back itself.
    #[tracing::instrument(skip(self, items), fields(item_count = items.len()))]
    pub async fn try_reserve(
        &self,
        items: &[ReservationItem],
    ) -> Result<Vec<ReservationItem>, ReserveError> {
        if items.is_empty() {
            return Ok(Vec::new());
        }

        metrics::counter!("stock_reservations_total").increment(1);
        let start = std::time::Instant::now();

        let mut reserved: Vec<ReservationItem> = Vec::with_capacity(items.len());

        for item in items {
            match self
                .client
                .decrease_quantity(item.product_id, item.amount)
                .await
            {
                Ok(()) => reserved.push(item.clone()),
                Err(source) => {
                    tracing::warn!(
                        product_id = %item.product_id,
                        amount = item.amount,
                        error = %source,
                        "reservation failed, rolling back"
                    );
                    metrics::counter!("stock_reservations_failed").increment(1);

                    self.rollback(&reserved).await;

                    // The attempt's duration includes the compensations.
                    metrics::histogram!("stock_reserve_duration_seconds")
                        .record(start.elapsed().as_secs_f64());

                    return Err(ReserveError::Reservation {
                        product_id: item.product_id,
                        source,
                    });
                }
            }
        }

        metrics::histogram!("stock_reserve_duration_seconds")
            .record(start.elapsed().as_secs_f64());

        Ok(reserved)
    }

    /// Compensates previously reserved items with matching increases.
    ///
    /// Best effort: a failed compensation is logged and counted, then
    /// the remaining items are still compensated.
    #[tracing::instrument(skip(self, reserved), fields(item_count = reserved.len()))]
    pub async fn rollback(&self, reserved: &[ReservationItem]) {
        for item in reserved {
            match self
                .client
                .increase_quantity(item.product_id, item.amount)
                .await
            {
                Ok(()) => {
                    tracing::info!(
                        product_id = %item.product_id,
                        amount = item.amount,
                        "rolled back reserved stock"
                    );
                }
                Err(error) => {
                    metrics::counter!("stock_rollback_failures_total").increment(1);
                    tracing::error!(
                        product_id = %item.product_id,
                        amount = item.amount,
                        %error,
                        "failed to roll back reserved stock"
                    );
                }
            }
        }
    }
}
