//! Order record endpoints.

use std::sync::Arc;

use axum::Json;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use serde::{Deserialize, Serialize};

use crate::error::ApiError;
use crate::model::{Order, OrderId, OrderLine, UserId};
use crate::service::OrdersService;
use crate::store::OrderStore;

/// Shared application state accessible from all handlers.
pub struct AppState<S> {
    pub service: OrdersService<S>,
}

// -- Request types --

#[derive(Deserialize)]
pub struct CreateOrderRequest {
    pub user_id: i64,
    pub price_cents: i64,
    pub items: Vec<OrderLine>,
}

// -- Response envelopes --

#[derive(Serialize)]
pub struct CreatedOrder {
    pub id: OrderId,
}

#[derive(Serialize)]
pub struct CreatedOrderResponse {
    pub order: CreatedOrder,
}

#[derive(Serialize)]
pub struct OrderResponse {
    pub order: Order,
}

#[derive(Serialize)]
pub struct OrdersResponse {
    pub orders: Vec<Order>,
}

// Path ids arrive as raw strings: a non-numeric id means the resource
// cannot exist and maps to 404, not to axum's default 400 rejection.
fn parse_id(raw: &str, kind: &str) -> Result<i64, ApiError> {
    match raw.parse::<i64>() {
        Ok(id) if id >= 1 => Ok(id),
        _ => Err(ApiError::NotFound(format!("{kind} {raw} not found"))),
    }
}

// -- Handlers --

/// POST /v1/order — record a new order.
#[tracing::instrument(skip(state, req))]
pub async fn create<S: OrderStore>(
    State(state): State<Arc<AppState<S>>>,
    Json(req): Json<CreateOrderRequest>,
) -> Result<(StatusCode, Json<CreatedOrderResponse>), ApiError> {
    let id = state
        .service
        .create_order(UserId::new(req.user_id), req.price_cents, req.items)
        .await?;

    Ok((
        StatusCode::CREATED,
        Json(CreatedOrderResponse {
            order: CreatedOrder { id },
        }),
    ))
}

/// GET /v1/order/:id — load an order by ID.
#[tracing::instrument(skip(state))]
pub async fn get<S: OrderStore>(
    State(state): State<Arc<AppState<S>>>,
    Path(id): Path<String>,
) -> Result<Json<OrderResponse>, ApiError> {
    let id = parse_id(&id, "order")?;

    let order = state.service.order(OrderId::new(id)).await?;
    Ok(Json(OrderResponse { order }))
}

/// GET /v1/orders/user/:id — list a user's orders, newest first.
#[tracing::instrument(skip(state))]
pub async fn by_user<S: OrderStore>(
    State(state): State<Arc<AppState<S>>>,
    Path(id): Path<String>,
) -> Result<Json<OrdersResponse>, ApiError> {
    let id = parse_id(&id, "user")?;

    let orders = state.service.orders_by_user(UserId::new(id)).await?;
    Ok(Json(OrdersResponse { orders }))
}
