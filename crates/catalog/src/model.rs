//! Catalog domain types.

use serde::{Deserialize, Serialize};

/// Unique identifier for a category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CategoryId(i64);

impl CategoryId {
    pub fn new(id: i64) -> Self {
        Self(id)
    }

    pub fn as_i64(&self) -> i64 {
        self.0
    }
}

impl std::fmt::Display for CategoryId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Unique identifier for a product.
///
/// Wraps the stable integer handle so product IDs cannot be mixed up
/// with other integer identifiers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ProductId(i64);

impl ProductId {
    pub fn new(id: i64) -> Self {
        Self(id)
    }

    pub fn as_i64(&self) -> i64 {
        self.0
    }
}

impl std::fmt::Display for ProductId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A product category.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Category {
    pub id: CategoryId,
    pub name: String,
}

/// A product with its currently available quantity.
///
/// `quantity` is the authoritative stock counter; it is only ever
/// mutated through the ledger's conditional operations.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    pub id: ProductId,
    pub name: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub description: String,
    pub price_cents: i64,
    pub quantity: u32,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub image_url: String,
    pub attributes: serde_json::Value,
    pub category_id: CategoryId,
}

/// Payload for inserting a product, before an ID has been assigned.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewProduct {
    pub name: String,
    #[serde(default)]
    pub description: String,
    pub price_cents: i64,
    pub quantity: u32,
    #[serde(default)]
    pub image_url: String,
    #[serde(default = "default_attributes")]
    pub attributes: serde_json::Value,
    pub category_id: CategoryId,
}

fn default_attributes() -> serde_json::Value {
    serde_json::Value::Object(serde_json::Map::new())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn product_id_serializes_transparently() {
        let id = ProductId::new(42);
        let json = serde_json::to_string(&id).unwrap();
        assert_eq!(json, "42");

        let back: ProductId = serde_json::from_str("42").unwrap();
        assert_eq!(back, id);
    }

    #[test]
    fn product_round_trips_through_json() {
        let product = Product {
            id: ProductId::new(1),
            name: "Keyboard".to_string(),
            description: "Mechanical".to_string(),
            price_cents: 12999,
            quantity: 5,
            image_url: String::new(),
            attributes: serde_json::json!({"layout": "ansi"}),
            category_id: CategoryId::new(2),
        };

        let json = serde_json::to_value(&product).unwrap();
        assert_eq!(json["price_cents"], 12999);
        assert!(json.get("image_url").is_none());

        let back: Product = serde_json::from_value(json).unwrap();
        assert_eq!(back, product);
    }

    #[test]
    fn new_product_defaults_optional_fields() {
        let payload = serde_json::json!({
            "name": "Mouse",
            "price_cents": 4999,
            "quantity": 10,
            "category_id": 1
        });

        let new_product: NewProduct = serde_json::from_value(payload).unwrap();
        assert!(new_product.description.is_empty());
        assert!(new_product.attributes.is_object());
    }
}
