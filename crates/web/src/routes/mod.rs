pub mod cart;
pub mod catalog;
pub mod checkout;
pub mod health;
pub mod metrics;
pub mod orders;

use crate::cart::CartStore;
use crate::error::ApiError;
use crate::stock::StockCoordinator;

/// Shared application state accessible from all handlers.
pub struct AppState<C, O> {
    pub catalog: C,
    pub orders: O,
    pub coordinator: StockCoordinator<C>,
    pub carts: CartStore,
}

// Path ids arrive as raw strings: a non-numeric id means the resource
// cannot exist and maps to 404, not to axum's default 400 rejection.
pub(crate) fn parse_id(raw: &str, kind: &str) -> Result<i64, ApiError> {
    match raw.parse::<i64>() {
        Ok(id) if id >= 1 => Ok(id),
        _ => Err(ApiError::NotFound(format!("{kind} {raw} not found"))),
    }
}
