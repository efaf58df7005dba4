//! The stock quantity ledger.
//!
//! The ledger owns every mutation of a product's available quantity.
//! Decreases are optimistic: the current quantity is read, checked
//! against the requested amount, and written back through the store's
//! conditional update. A writer that lost the race between read and
//! write gets `EditConflict` and decides for itself whether to retry;
//! the ledger never retries internally.

use thiserror::Error;

use crate::model::ProductId;
use crate::store::{ProductStore, StoreError};

/// Errors returned by ledger operations.
///
/// `NotFound`, `NotEnough` and `EditConflict` are distinct outcomes the
/// reservation coordinator branches on, not generic failures.
#[derive(Debug, Error)]
pub enum LedgerError {
    /// The product does not exist.
    #[error("product {0} not found")]
    NotFound(ProductId),

    /// The available quantity is smaller than the requested amount.
    #[error("not enough quantity for product {product_id}: requested {requested}, available {available}")]
    NotEnough {
        product_id: ProductId,
        requested: u32,
        available: u32,
    },

    /// Another writer changed the quantity between read and write.
    #[error("edit conflict on product {0}")]
    EditConflict(ProductId),

    /// The amount must be a positive integer.
    #[error("invalid amount: {0}")]
    InvalidAmount(u32),

    /// A storage error occurred.
    #[error("store error: {0}")]
    Store(#[from] StoreError),
}

/// Result type for ledger operations.
pub type Result<T> = std::result::Result<T, LedgerError>;

/// Conflict-aware quantity counter over a [`ProductStore`].
#[derive(Clone)]
pub struct StockLedger<S> {
    store: S,
}

impl<S: ProductStore> StockLedger<S> {
    /// Creates a ledger over the given store.
    pub fn new(store: S) -> Self {
        Self { store }
    }

    /// Decreases a product's quantity by `amount`.
    ///
    /// Fails with `NotFound` for an unknown product, `NotEnough` when
    /// the available quantity is insufficient, and `EditConflict` when
    /// the conditional write observes a concurrent change. On any
    /// failure the stored quantity is unchanged.
    #[tracing::instrument(skip(self))]
    pub async fn decrease(&self, product_id: ProductId, amount: u32) -> Result<()> {
        if amount < 1 {
            return Err(LedgerError::InvalidAmount(amount));
        }

        let available = match self.store.quantity(product_id).await {
            Ok(quantity) => quantity,
            Err(StoreError::NotFound) => return Err(LedgerError::NotFound(product_id)),
            Err(e) => return Err(LedgerError::Store(e)),
        };

        if available < amount {
            return Err(LedgerError::NotEnough {
                product_id,
                requested: amount,
                available,
            });
        }

        match self
            .store
            .update_quantity(product_id, available, available - amount)
            .await
        {
            Ok(()) => {
                metrics::counter!("ledger_decreases_total").increment(1);
                Ok(())
            }
            Err(StoreError::Conflict) => {
                metrics::counter!("ledger_edit_conflicts_total").increment(1);
                tracing::debug!(%product_id, amount, "lost update race detected");
                Err(LedgerError::EditConflict(product_id))
            }
            Err(StoreError::NotFound) => Err(LedgerError::NotFound(product_id)),
            Err(e) => Err(LedgerError::Store(e)),
        }
    }

    /// Increases a product's quantity by `amount`.
    ///
    /// Used both for restocking and for saga compensation. The write is
    /// unconditional: increase has no precondition that a concurrent
    /// writer could invalidate.
    #[tracing::instrument(skip(self))]
    pub async fn increase(&self, product_id: ProductId, amount: u32) -> Result<()> {
        if amount < 1 {
            return Err(LedgerError::InvalidAmount(amount));
        }

        match self.store.add_quantity(product_id, amount).await {
            Ok(()) => {
                metrics::counter!("ledger_increases_total").increment(1);
                Ok(())
            }
            Err(StoreError::NotFound) => Err(LedgerError::NotFound(product_id)),
            Err(e) => Err(LedgerError::Store(e)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::NewProduct;
    use crate::store::MemoryProductStore;

    async fn ledger_with_product(quantity: u32) -> (StockLedger<MemoryProductStore>, ProductId) {
        let store = MemoryProductStore::new();
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
        (StockLedger::new(store), product.id)
    }

    #[tokio::test]
    async fn decrease_subtracts_exactly_once() {
        let (ledger, id) = ledger_with_product(10).await;
        ledger.decrease(id, 4).await.unwrap();
        assert_eq!(ledger.store.quantity(id).await.unwrap(), 6);
    }

    #[tokio::test]
    async fn decrease_more_than_available_fails_and_leaves_value() {
        let (ledger, id) = ledger_with_product(3).await;

        let result = ledger.decrease(id, 5).await;
        assert!(matches!(
            result,
            Err(LedgerError::NotEnough {
                requested: 5,
                available: 3,
                ..
            })
        ));
        assert_eq!(ledger.store.quantity(id).await.unwrap(), 3);
    }

    #[tokio::test]
    async fn decrease_unknown_product_not_found() {
        let (ledger, _) = ledger_with_product(3).await;
        let unknown = ProductId::new(99);

        let result = ledger.decrease(unknown, 1).await;
        assert!(matches!(result, Err(LedgerError::NotFound(id)) if id == unknown));
    }

    #[tokio::test]
    async fn zero_amount_is_rejected() {
        let (ledger, id) = ledger_with_product(3).await;
        assert!(matches!(
            ledger.decrease(id, 0).await,
            Err(LedgerError::InvalidAmount(0))
        ));
        assert!(matches!(
            ledger.increase(id, 0).await,
            Err(LedgerError::InvalidAmount(0))
        ));
    }

    #[tokio::test]
    async fn increase_unknown_product_not_found() {
        let (ledger, _) = ledger_with_product(3).await;
        let result = ledger.increase(ProductId::new(99), 1).await;
        assert!(matches!(result, Err(LedgerError::NotFound(_))));
    }

    #[tokio::test]
    async fn increase_then_decrease_round_trips() {
        let (ledger, id) = ledger_with_product(5).await;
        ledger.increase(id, 3).await.unwrap();
        ledger.decrease(id, 3).await.unwrap();
        assert_eq!(ledger.store.quantity(id).await.unwrap(), 5);
    }

    #[tokio::test]
    async fn racing_writers_on_same_observation_produce_one_winner() {
        let (ledger, id) = ledger_with_product(10).await;

        // Both writers observed 10; only the first conditional write
        // can match it.
        ledger.store.update_quantity(id, 10, 8).await.unwrap();
        let loser = ledger.store.update_quantity(id, 10, 5).await;

        assert!(matches!(loser, Err(StoreError::Conflict)));
        assert_eq!(ledger.store.quantity(id).await.unwrap(), 8);
    }

    #[tokio::test]
    async fn concurrent_decreases_never_lose_updates() {
        let (ledger, id) = ledger_with_product(50).await;

        let mut handles = Vec::new();
        for _ in 0..50 {
            let ledger = ledger.clone();
            handles.push(tokio::spawn(async move { ledger.decrease(id, 1).await }));
        }

        let mut successes: u32 = 0;
        for handle in handles {
            match handle.await.unwrap() {
                Ok(()) => successes += 1,
                Err(LedgerError::EditConflict(_)) => {}
                Err(e) => panic!("unexpected error: {e}"),
            }
        }

        // Every successful decrease is reflected exactly once: the sum
        // of successes and the remaining stock conserves the initial
        // quantity.
        let remaining = ledger.store.quantity(id).await.unwrap();
        assert_eq!(successes + remaining, 50);
    }
}
