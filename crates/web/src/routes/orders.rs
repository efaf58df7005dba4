//! Order lookup passthrough to the orders service.

use std::sync::Arc;

use axum::Json;
use axum::extract::{Path, State};
use orders::model::{Order, OrderId, UserId};
use serde::Serialize;

use crate::error::ApiError;
use crate::gateway::OrdersApi;
use crate::routes::{AppState, parse_id};

#[derive(Serialize)]
pub struct OrderResponse {
    pub order: Order,
}

#[derive(Serialize)]
pub struct OrdersResponse {
    pub orders: Vec<Order>,
}

/// GET /v1/order/:id — load an order by ID.
#[tracing::instrument(skip(state))]
pub async fn order<C, O: OrdersApi>(
    State(state): State<Arc<AppState<C, O>>>,
    Path(id): Path<String>,
) -> Result<Json<OrderResponse>, ApiError> {
    let id = parse_id(&id, "order")?;

    let order = state.orders.order(OrderId::new(id)).await?;
    Ok(Json(OrderResponse { order }))
}

/// GET /v1/orders/user/:id — list a user's orders, newest first.
#[tracing::instrument(skip(state))]
pub async fn orders_by_user<C, O: OrdersApi>(
    State(state): State<Arc<AppState<C, O>>>,
    Path(id): Path<String>,
) -> Result<Json<OrdersResponse>, ApiError> {
    let id = parse_id(&id, "user")?;

    let orders = state.orders.orders_by_user(UserId::new(id)).await?;
    Ok(Json(OrdersResponse { orders }))
}
