use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use axum::http::StatusCode;
use catalog::model::{Category, CategoryId, Product, ProductId};
use commons::discovery::Registry;
use commons::resolver;
use serde::Deserialize;

use crate::gateway::{CatalogApi, GatewayError};
use crate::stock::StockClient;

const SERVICE_NAME: &str = "catalog";

/// HTTP client for the catalog service.
#[derive(Clone)]
pub struct CatalogGateway<R> {
    registry: Arc<R>,
    client: reqwest::Client,
}

#[derive(Deserialize)]
struct CategoriesResponse {
    categories: Vec<Category>,
}

#[derive(Deserialize)]
struct ProductsResponse {
    products: Vec<Product>,
}

#[derive(Deserialize)]
struct ProductResponse {
    product: Product,
}

impl<R: Registry> CatalogGateway<R> {
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
impl<R: Registry> CatalogApi for CatalogGateway<R> {
    async fn catalog(&self) -> Result<Vec<Category>, GatewayError> {
        let url = format!("{}/catalog", self.base_url().await?);
        tracing::debug!(%url, "GET catalog");

        let response = self.client.get(&url).send().await?;
        match response.status() {
            StatusCode::OK => Ok(response.json::<CategoriesResponse>().await?.categories),
            StatusCode::NOT_FOUND => Err(GatewayError::NotFound),
            status => Err(GatewayError::UnexpectedStatus(status)),
        }
    }

    async fn products_by_category(&self, id: CategoryId) -> Result<Vec<Product>, GatewayError> {
        let url = format!("{}/category/{id}", self.base_url().await?);
        tracing::debug!(%url, "GET products by category");

        let response = self.client.get(&url).send().await?;
        match response.status() {
            StatusCode::OK => Ok(response.json::<ProductsResponse>().await?.products),
            StatusCode::NOT_FOUND => Err(GatewayError::NotFound),
            status => Err(GatewayError::UnexpectedStatus(status)),
        }
    }

    async fn product(&self, id: ProductId) -> Result<Product, GatewayError> {
        let url = format!("{}/product/{id}", self.base_url().await?);
        tracing::debug!(%url, "GET product");

        let response = self.client.get(&url).send().await?;
        match response.status() {
            StatusCode::OK => Ok(response.json::<ProductResponse>().await?.product),
            StatusCode::NOT_FOUND => Err(GatewayError::NotFound),
            status => Err(GatewayError::UnexpectedStatus(status)),
        }
    }
}

#[async_trait]
impl<R: Registry> StockClient for CatalogGateway<R> {
    async fn decrease_quantity(&self, id: ProductId, amount: u32) -> Result<(), GatewayError> {
        let url = format!("{}/product/{id}/decrease/{amount}", self.base_url().await?);
        tracing::debug!(%url, "POST decrease quantity");

        let response = self.client.post(&url).send().await?;
        match response.status() {
            StatusCode::OK => Ok(()),
            StatusCode::NOT_FOUND => Err(GatewayError::NotFound),
            StatusCode::BAD_REQUEST => Err(GatewayError::NotEnough),
            StatusCode::CONFLICT => Err(GatewayError::EditConflict),
            status => Err(GatewayError::UnexpectedStatus(status)),
        }
    }

    async fn increase_quantity(&self, id: ProductId, amount: u32) -> Result<(), GatewayError> {
        let url = format!("{}/product/{id}/increase/{amount}", self.base_url().await?);
        tracing::debug!(%url, "POST increase quantity");

        let response = self.client.post(&url).send().await?;
        match response.status() {
            StatusCode::OK => Ok(()),
            StatusCode::NOT_FOUND => Err(GatewayError::NotFound),
            status => Err(GatewayError::UnexpectedStatus(status)),
        }
    }
}
