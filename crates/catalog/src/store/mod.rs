//! Product persistence contract and backends.
//!
//! The conditional `update_quantity` operation is part of the contract
//! itself: every backend must implement the same compare-and-swap
//! semantics so the ledger's conflict detection works identically over
//! an in-memory map and a relational store.

mod memory;
mod postgres;

pub use memory::MemoryProductStore;
pub use postgres::PostgresProductStore;

use async_trait::async_trait;
use thiserror::Error;

use crate::model::{Category, CategoryId, NewProduct, Product, ProductId};

/// Errors returned by product store operations.
#[derive(Debug, Error)]
pub enum StoreError {
    /// The requested record does not exist.
    #[error("record not found")]
    NotFound,

    /// The stored quantity no longer matches the observed quantity a
    /// conditional update was predicated on.
    #[error("edit conflict")]
    Conflict,

    /// A database error occurred.
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),
}

/// Result type for store operations.
pub type Result<T> = std::result::Result<T, StoreError>;

/// Persistence contract for categories, products and the stock counter.
#[async_trait]
pub trait ProductStore: Send + Sync {
    /// Returns all categories sorted by name. Fails with `NotFound`
    /// when no category exists.
    async fn categories(&self) -> Result<Vec<Category>>;

    /// Returns the products of a category sorted by ID. Fails with
    /// `NotFound` when the category holds no products.
    async fn products_by_category(&self, category_id: CategoryId) -> Result<Vec<Product>>;

    /// Returns a product by ID.
    async fn product(&self, product_id: ProductId) -> Result<Product>;

    /// Returns the current available quantity of a product.
    async fn quantity(&self, product_id: ProductId) -> Result<u32>;

    /// Conditionally replaces a product's quantity.
    ///
    /// The write succeeds only if the stored quantity still equals
    /// `observed` at write time; a mismatch means another writer got
    /// there first and fails with `Conflict`, leaving the stored value
    /// untouched.
    async fn update_quantity(&self, product_id: ProductId, observed: u32, new: u32) -> Result<()>;

    /// Unconditionally adds `amount` to a product's quantity.
    async fn add_quantity(&self, product_id: ProductId, amount: u32) -> Result<()>;

    /// Inserts a category and returns it with its assigned ID.
    async fn put_category(&self, name: &str) -> Result<Category>;

    /// Inserts a product and returns it with its assigned ID.
    async fn put_product(&self, new_product: NewProduct) -> Result<Product>;
}
