//! Browse and insert operations over the product store.

use thiserror::Error;

use crate::model::{Category, CategoryId, NewProduct, Product, ProductId};
use crate::store::{ProductStore, StoreError};

/// Errors returned by catalog browse operations.
#[derive(Debug, Error)]
pub enum CatalogError {
    /// The requested record does not exist.
    #[error("not found")]
    NotFound,

    /// A storage error occurred.
    #[error("store error: {0}")]
    Store(StoreError),
}

impl From<StoreError> for CatalogError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::NotFound => CatalogError::NotFound,
            other => CatalogError::Store(other),
        }
    }
}

/// Result type for catalog operations.
pub type Result<T> = std::result::Result<T, CatalogError>;

/// Read and insert surface of the catalog.
///
/// Quantity mutations are deliberately absent here; they go through
/// the [`crate::ledger::StockLedger`] only.
#[derive(Clone)]
pub struct CatalogService<S> {
    store: S,
}

impl<S: ProductStore> CatalogService<S> {
    /// Creates a new catalog service over the given store.
    pub fn new(store: S) -> Self {
        Self { store }
    }

    pub async fn categories(&self) -> Result<Vec<Category>> {
        Ok(self.store.categories().await?)
    }

    pub async fn products_by_category(&self, category_id: CategoryId) -> Result<Vec<Product>> {
        Ok(self.store.products_by_category(category_id).await?)
    }

    pub async fn product(&self, product_id: ProductId) -> Result<Product> {
        Ok(self.store.product(product_id).await?)
    }

    pub async fn put_category(&self, name: &str) -> Result<Category> {
        Ok(self.store.put_category(name).await?)
    }

    pub async fn put_product(&self, new_product: NewProduct) -> Result<Product> {
        Ok(self.store.put_product(new_product).await?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::MemoryProductStore;

    #[tokio::test]
    async fn browse_maps_missing_records_to_not_found() {
        let service = CatalogService::new(MemoryProductStore::new());

        assert!(matches!(
            service.categories().await,
            Err(CatalogError::NotFound)
        ));
        assert!(matches!(
            service.product(ProductId::new(1)).await,
            Err(CatalogError::NotFound)
        ));
    }

    #[tokio::test]
    async fn inserted_product_is_browsable() {
        let service = CatalogService::new(MemoryProductStore::new());
        let category = service.put_category("audio").await.unwrap();

        let product = service
            .put_product(NewProduct {
                name: "Headphones".to_string(),
                description: String::new(),
                price_cents: 19999,
                quantity: 4,
                image_url: String::new(),
                attributes: serde_json::json!({}),
                category_id: category.id,
            })
            .await
            .unwrap();

        let found = service.product(product.id).await.unwrap();
        assert_eq!(found.name, "Headphones");

        let in_category = service.products_by_category(category.id).await.unwrap();
        assert_eq!(in_category.len(), 1);
    }
}
