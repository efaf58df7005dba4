use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use axum::http::StatusCode;
use commons::discovery::Registry;
use commons::resolver;
use orders::model::{Order, OrderId, OrderLine, UserId};
use serde::{Deserialize, Serialize};

use crate::gateway::{GatewayError, OrdersApi};

const SERVICE_NAME: &str = "orders";

/// HTTP client for the orders service.
#[derive(Clone)]
pub struct OrdersGateway<R> {
    registry: Arc<R>,
    client: reqwest::Client,
}

#[derive(Serialize)]
struct CreateOrderRequest {
    user_id: i64,
    price_cents: i64,
    items: Vec<OrderLine>,
}

#[derive(Deserialize)]
struct CreatedOrder {
    id: OrderId,
}

#[derive(Deserialize)]
struct CreatedOrderResponse {
    order: CreatedOrder,
}

#[derive(Deserialize)]
struct OrderResponse {
    order: Order,
}

#[derive(Deserialize)]
struct OrdersResponse {
    orders: Vec<Order>,
}

impl<R: Registry> OrdersGateway<R> {
    /// Creates a gateway whose requests time out after `timeout`.
    pub fn new(registry: Arc<R>, timeout: Duration) -> Result<Self, GatewayError> {
        let client = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self { registry, client })
    }

    async fn base_url(&self) -> Result<String, GatewayError> {
        let addr = resolver::resolve(self.registry.as_ref(), SERVICE_NAME).await?;
        Ok(format!("http://{addr}/v1"))
    }
}

#[async_trait]
impl<R: Registry> OrdersApi for OrdersGateway<R> {
    async fn create_order(
        &self,
        user_id: UserId,
        price_cents: i64,
        items: Vec<OrderLine>,
    ) -> Result<OrderId, GatewayError> {
        let url = format!("{}/order", self.base_url().await?);
        tracing::debug!(%url, "POST create order");

        let response = self
            .client
            .post(&url)
            .json(&CreateOrderRequest {
                user_id: user_id.as_i64(),
                price_cents,
                items,
            })
            .send()
            .await?;

        match response.status() {
            StatusCode::CREATED => Ok(response.json::<CreatedOrderResponse>().await?.order.id),
            StatusCode::NOT_FOUND => Err(GatewayError::NotFound),
            status => Err(GatewayError::UnexpectedStatus(status)),
        }
    }

    async fn order(&self, id: OrderId) -> Result<Order, GatewayError> {
        let url = format!("{}/order/{id}", self.base_url().await?);
        tracing::debug!(%url, "GET order");

        let response = self.client.get(&url).send().await?;
        match response.status() {
            StatusCode::OK => Ok(response.json::<OrderResponse>().await?.order),
            StatusCode::NOT_FOUND => Err(GatewayError::NotFound),
            status => Err(GatewayError::UnexpectedStatus(status)),
        }
    }

    async fn orders_by_user(&self, id: UserId) -> Result<Vec<Order>, GatewayError> {
        let url = format!("{}/orders/user/{id}", self.base_url().await?);
        tracing::debug!(%url, "GET orders by user");

        let response = self.client.get(&url).send().await?;
        match response.status() {
            StatusCode::OK => Ok(response.json::<OrdersResponse>().await?.orders),
            StatusCode::NOT_FOUND => Err(GatewayError::NotFound),
            status => Err(GatewayError::UnexpectedStatus(status)),
        }
    }
}
