use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::model::{Category, CategoryId, NewProduct, Product, ProductId};
use crate::store::{ProductStore, Result, StoreError};

#[derive(Default)]
struct Inner {
    categories: HashMap<CategoryId, Category>,
    products: HashMap<ProductId, Product>,
    next_category_id: i64,
    next_product_id: i64,
}

/// In-memory product store.
///
/// Backs tests and configurations without a database, with the same
/// conditional-update semantics as the PostgreSQL backend: the
/// observed quantity is re-checked under the write lock, so writers
/// interleaving between read and write genuinely observe `Conflict`.
#[derive(Clone, Default)]
pub struct MemoryProductStore {
    inner: Arc<RwLock<Inner>>,
}

impl MemoryProductStore {
    /// Creates a new empty in-memory store.
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl ProductStore for MemoryProductStore {
    async fn categories(&self) -> Result<Vec<Category>> {
        let inner = self.inner.read().await;
        let mut categories: Vec<Category> = inner.categories.values().cloned().collect();
        if categories.is_empty() {
            return Err(StoreError::NotFound);
        }
        categories.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(categories)
    }

    async fn products_by_category(&self, category_id: CategoryId) -> Result<Vec<Product>> {
        let inner = self.inner.read().await;
        let mut products: Vec<Product> = inner
            .products
            .values()
            .filter(|p| p.category_id == category_id)
            .cloned()
            .collect();
        if products.is_empty() {
            return Err(StoreError::NotFound);
        }
        products.sort_by_key(|p| p.id);
        Ok(products)
    }

    async fn product(&self, product_id: ProductId) -> Result<Product> {
        let inner = self.inner.read().await;
        inner
            .products
            .get(&product_id)
            .cloned()
            .ok_or(StoreError::NotFound)
    }

    async fn quantity(&self, product_id: ProductId) -> Result<u32> {
        let inner = self.inner.read().await;
        inner
            .products
            .get(&product_id)
            .map(|p| p.quantity)
            .ok_or(StoreError::NotFound)
    }

    async fn update_quantity(&self, product_id: ProductId, observed: u32, new: u32) -> Result<()> {
        let mut inner = self.inner.write().await;
        let product = inner
            .products
            .get_mut(&product_id)
            .ok_or(StoreError::NotFound)?;

        // The re-check under the write lock is the compare-and-swap.
        if product.quantity != observed {
            return Err(StoreError::Conflict);
        }

        product.quantity = new;
        Ok(())
    }

    async fn add_quantity(&self, product_id: ProductId, amount: u32) -> Result<()> {
        let mut inner = self.inner.write().await;
        let product = inner
            .products
            .get_mut(&product_id)
            .ok_or(StoreError::NotFound)?;

        product.quantity = product.quantity.saturating_add(amount);
        Ok(())
    }

    async fn put_category(&self, name: &str) -> Result<Category> {
        let mut inner = self.inner.write().await;
        inner.next_category_id += 1;
        let category = Category {
            id: CategoryId::new(inner.next_category_id),
            name: name.to_string(),
        };
        inner.categories.insert(category.id, category.clone());
        Ok(category)
    }

    async fn put_product(&self, new_product: NewProduct) -> Result<Product> {
        let mut inner = self.inner.write().await;
        inner.next_product_id += 1;
        let product = Product {
            id: ProductId::new(inner.next_product_id),
            name: new_product.name,
            description: new_product.description,
            price_cents: new_product.price_cents,
            quantity: new_product.quantity,
            image_url: new_product.image_url,
            attributes: new_product.attributes,
            category_id: new_product.category_id,
        };
        inner.products.insert(product.id, product.clone());
        Ok(product)
    }
}
