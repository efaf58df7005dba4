//! In-memory shopping carts.
//!
//! Session and cookie handling is an upstream concern; handlers
//! receive the user ID explicitly and carts are keyed by it.

use std::collections::HashMap;
use std::sync::Arc;

use catalog::model::ProductId;
use orders::model::UserId;
use serde::{Deserialize, Serialize};
use tokio::sync::RwLock;

/// One product in a cart.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CartItem {
    pub product_id: ProductId,
    pub name: String,
    pub quantity: u32,
}

/// A user's cart.
#[derive(Debug, Clone, Default)]
pub struct Cart {
    pub items: HashMap<ProductId, CartItem>,
}

impl Cart {
    /// Returns the cart's items sorted by product ID.
    pub fn sorted_items(&self) -> Vec<CartItem> {
        let mut items: Vec<CartItem> = self.items.values().cloned().collect();
        items.sort_by_key(|item| item.product_id);
        items
    }
}

/// Shared store of all users' carts.
#[derive(Clone, Default)]
pub struct CartStore {
    carts: Arc<RwLock<HashMap<UserId, Cart>>>,
}

impl CartStore {
    /// Creates a new empty cart store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds an item to a user's cart, merging quantities when the
    /// product is already present.
    pub async fn add(&self, user_id: UserId, item: CartItem) {
        let mut carts = self.carts.write().await;
        let cart = carts.entry(user_id).or_default();

        cart.items
            .entry(item.product_id)
            .and_modify(|existing| existing.quantity += item.quantity)
            .or_insert(item);
    }

    /// Removes a product from a user's cart. Returns `false` when the
    /// product was not in the cart.
    pub async fn remove(&self, user_id: UserId, product_id: ProductId) -> bool {
        let mut carts = self.carts.write().await;
        carts
            .get_mut(&user_id)
            .is_some_and(|cart| cart.items.remove(&product_id).is_some())
    }

    /// Returns a snapshot of a user's cart; unknown users get an empty
    /// cart.
    pub async fn get(&self, user_id: UserId) -> Cart {
        let carts = self.carts.read().await;
        carts.get(&user_id).cloned().unwrap_or_default()
    }

    /// Empties a user's cart.
    pub async fn clear(&self, user_id: UserId) {
        let mut carts = self.carts.write().await;
        carts.remove(&user_id);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn item(id: i64, quantity: u32) -> CartItem {
        CartItem {
            product_id: ProductId::new(id),
            name: format!("product-{id}"),
            quantity,
        }
    }

    #[tokio::test]
    async fn unknown_user_has_empty_cart() {
        let store = CartStore::new();
        let cart = store.get(UserId::new(1)).await;
        assert!(cart.items.is_empty());
    }

    #[tokio::test]
    async fn add_merges_quantities_for_same_product() {
        let store = CartStore::new();
        let user = UserId::new(1);

        store.add(user, item(5, 2)).await;
        store.add(user, item(5, 3)).await;

        let cart = store.get(user).await;
        assert_eq!(cart.items[&ProductId::new(5)].quantity, 5);
    }

    #[tokio::test]
    async fn carts_are_isolated_per_user() {
        let store = CartStore::new();
        store.add(UserId::new(1), item(5, 1)).await;

        let other = store.get(UserId::new(2)).await;
        assert!(other.items.is_empty());
    }

    #[tokio::test]
    async fn remove_reports_missing_product() {
        let store = CartStore::new();
        let user = UserId::new(1);
        store.add(user, item(5, 1)).await;

        assert!(store.remove(user, ProductId::new(5)).await);
        assert!(!store.remove(user, ProductId::new(5)).await);
    }

    #[tokio::test]
    async fn clear_empties_the_cart() {
        let store = CartStore::new();
        let user = UserId::new(1);
        store.add(user, item(5, 1)).await;

        store.clear(user).await;
        assert!(store.get(user).await.items.is_empty());
    }

    #[tokio::test]
    async fn sorted_items_orders_by_product_id() {
        let store = CartStore::new();
        let user = UserId::new(1);
        store.add(user, item(9, 1)).await;
        store.add(user, item(3, 1)).await;
        store.add(user, item(6, 1)).await;

        let cart = store.get(user).await;
        let ids: Vec<i64> = cart
            .sorted_items()
            .iter()
            .map(|i| i.product_id.as_i64())
            .collect();
        assert_eq!(ids, vec![3, 6, 9]);
    }
}
