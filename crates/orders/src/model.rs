//! Order domain types.
//!
//! Order lines reference catalog items by raw integer ID rather than
//! the catalog's own types; the services stay decoupled at the wire.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Status assigned to a freshly created order.
pub const STATUS_NEW: &str = "created";

/// Unique identifier for an order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct OrderId(i64);

impl OrderId {
    pub fn new(id: i64) -> Self {
        Self(id)
    }

    pub fn as_i64(&self) -> i64 {
        self.0
    }
}

impl std::fmt::Display for OrderId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Unique identifier for a user.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UserId(i64);

impl UserId {
    pub fn new(id: i64) -> Self {
        Self(id)
    }

    pub fn as_i64(&self) -> i64 {
        self.0
    }
}

impl std::fmt::Display for UserId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A single line of an order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderLine {
    pub item_id: i64,
    pub quantity: u32,
}

/// A recorded order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Order {
    pub id: OrderId,
    pub user_id: UserId,
    pub price_cents: i64,
    pub status: String,
    pub items: Vec<OrderLine>,
    pub created_at: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn order_round_trips_through_json() {
        let order = Order {
            id: OrderId::new(1),
            user_id: UserId::new(7),
            price_cents: 25999,
            status: STATUS_NEW.to_string(),
            items: vec![OrderLine {
                item_id: 3,
                quantity: 2,
            }],
            created_at: Utc::now(),
        };

        let json = serde_json::to_value(&order).unwrap();
        assert_eq!(json["user_id"], 7);
        assert_eq!(json["items"][0]["item_id"], 3);

        let back: Order = serde_json::from_value(json).unwrap();
        assert_eq!(back, order);
    }
}
