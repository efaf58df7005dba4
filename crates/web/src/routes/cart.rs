//! Cart endpoints.

use std::sync::Arc;

use axum::Json;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use catalog::model::ProductId;
use orders::model::UserId;
use serde::{Deserialize, Serialize};

use crate::cart::CartItem;
use crate::error::ApiError;
use crate::routes::{AppState, parse_id};

#[derive(Debug, Deserialize)]
pub struct AddItemRequest {
    pub product_id: i64,
    pub name: String,
    pub quantity: u32,
}

#[derive(Serialize)]
pub struct CartResponse {
    pub items: Vec<CartItem>,
}

/// GET /v1/cart/:user_id — the user's cart, items sorted by product ID.
#[tracing::instrument(skip(state))]
pub async fn get<C, O>(
    State(state): State<Arc<AppState<C, O>>>,
    Path(user_id): Path<String>,
) -> Result<Json<CartResponse>, ApiError> {
    let user_id = parse_id(&user_id, "user")?;

    let cart = state.carts.get(UserId::new(user_id)).await;
    Ok(Json(CartResponse {
        items: cart.sorted_items(),
    }))
}

/// POST /v1/cart/:user_id/items — add a product to the cart.
#[tracing::instrument(skip(state, req))]
pub async fn add_item<C, O>(
    State(state): State<Arc<AppState<C, O>>>,
    Path(user_id): Path<String>,
    Json(req): Json<AddItemRequest>,
) -> Result<(StatusCode, Json<CartResponse>), ApiError> {
    let user_id = parse_id(&user_id, "user")?;
    if req.product_id < 1 {
        return Err(ApiError::NotFound(format!(
            "product {} not found",
            req.product_id
        )));
    }
    if req.quantity < 1 {
        return Err(ApiError::BadRequest(
            "quantity must be at least 1".to_string(),
        ));
    }

    let user_id = UserId::new(user_id);
    state
        .carts
        .add(
            user_id,
            CartItem {
                product_id: ProductId::new(req.product_id),
                name: req.name,
                quantity: req.quantity,
            },
        )
        .await;

    let cart = state.carts.get(user_id).await;
    Ok((
        StatusCode::CREATED,
        Json(CartResponse {
            items: cart.sorted_items(),
        }),
    ))
}

/// DELETE /v1/cart/:user_id/items/:product_id — remove a product.
#[tracing::instrument(skip(state))]
pub async fn remove_item<C, O>(
    State(state): State<Arc<AppState<C, O>>>,
    Path((user_id, product_id)): Path<(String, String)>,
) -> Result<Json<CartResponse>, ApiError> {
    let user_id = parse_id(&user_id, "user")?;
    let product_id = parse_id(&product_id, "product")?;

    let user_id = UserId::new(user_id);
    let removed = state.carts.remove(user_id, ProductId::new(product_id)).await;
    if !removed {
        return Err(ApiError::NotFound(format!(
            "product {product_id} not in cart"
        )));
    }

    let cart = state.carts.get(user_id).await;
    Ok(Json(CartResponse {
        items: cart.sorted_items(),
    }))
}
