//! Checkout: turn a cart into an order behind a stock reservation.

use std::sync::Arc;

use axum::Json;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use orders::model::{OrderId, OrderLine, UserId};
use serde::Serialize;

use crate::error::ApiError;
use crate::gateway::{CatalogApi, OrdersApi};
use crate::routes::{AppState, parse_id};
use crate::stock::{ReservationItem, StockClient};

#[derive(Serialize)]
pub struct CreatedOrder {
    pub id: OrderId,
}

#[derive(Serialize)]
pub struct CheckoutResponse {
    pub order: CreatedOrder,
}

/// POST /v1/checkout/:user_id — reserve stock for the cart, then place
/// the order.
///
/// Each cart line is priced from the catalog before anything is
/// reserved, so a pricing failure costs no compensation. Items are
/// reserved sorted by product ID; when order creation fails after a
/// successful reservation, the reservation is rolled back before the
/// error is returned.
#[tracing::instrument(skip(state))]
pub async fn checkout<C, O>(
    State(state): State<Arc<AppState<C, O>>>,
    Path(user_id): Path<String>,
) -> Result<(StatusCode, Json<CheckoutResponse>), ApiError>
where
    C: CatalogApi + StockClient,
    O: OrdersApi,
{
    let user_id = UserId::new(parse_id(&user_id, "user")?);

    let cart = state.carts.get(user_id).await;
    if cart.items.is_empty() {
        return Err(ApiError::BadRequest("cart is empty".to_string()));
    }

    let mut total_cents: i64 = 0;
    let mut reservation = Vec::with_capacity(cart.items.len());
    let mut lines = Vec::with_capacity(cart.items.len());

    for item in cart.sorted_items() {
        let product = state.catalog.product(item.product_id).await?;
        total_cents += product.price_cents * i64::from(item.quantity);

        reservation.push(ReservationItem {
            product_id: item.product_id,
            amount: item.quantity,
        });
        lines.push(OrderLine {
            item_id: item.product_id.as_i64(),
            quantity: item.quantity,
        });
    }

    let reserved = state.coordinator.try_reserve(&reservation).await?;

    let order_id = match state
        .orders
        .create_order(user_id, total_cents, lines)
        .await
    {
        Ok(id) => id,
        Err(err) => {
            tracing::error!(error = %err, "order creation failed, releasing reserved stock");
            state.coordinator.rollback(&reserved).await;
            return Err(err.into());
        }
    };

    state.carts.clear(user_id).await;
    tracing::info!(order_id = %order_id, user_id = %user_id, "checkout completed");

    Ok((
        StatusCode::CREATED,
        Json(CheckoutResponse {
            order: CreatedOrder { id: order_id },
        }),
    ))
}
