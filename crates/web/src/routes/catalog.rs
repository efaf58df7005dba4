//! Browse passthrough to the catalog service.

use std::sync::Arc;

use axum::Json;
use axum::extract::{Path, State};
use catalog::model::{Category, CategoryId, Product, ProductId};
use serde::Serialize;

use crate::error::ApiError;
use crate::gateway::CatalogApi;
use crate::routes::{AppState, parse_id};

#[derive(Serialize)]
pub struct CategoriesResponse {
    pub categories: Vec<Category>,
}

#[derive(Serialize)]
pub struct ProductsResponse {
    pub products: Vec<Product>,
}

#[derive(Serialize)]
pub struct ProductResponse {
    pub product: Product,
}

/// GET /v1/catalog — list all categories.
#[tracing::instrument(skip(state))]
pub async fn categories<C: CatalogApi, O>(
    State(state): State<Arc<AppState<C, O>>>,
) -> Result<Json<CategoriesResponse>, ApiError> {
    let categories = state.catalog.catalog().await?;
    Ok(Json(CategoriesResponse { categories }))
}

/// GET /v1/category/:id — list the products of a category.
#[tracing::instrument(skip(state))]
pub async fn products_by_category<C: CatalogApi, O>(
    State(state): State<Arc<AppState<C, O>>>,
    Path(id): Path<String>,
) -> Result<Json<ProductsResponse>, ApiError> {
    let id = parse_id(&id, "category")?;

    let products = state
        .catalog
        .products_by_category(CategoryId::new(id))
        .await?;
    Ok(Json(ProductsResponse { products }))
}

/// GET /v1/product/:id — load a product by ID.
#[tracing::instrument(skip(state))]
pub async fn product<C: CatalogApi, O>(
    State(state): State<Arc<AppState<C, O>>>,
    Path(id): Path<String>,
) -> Result<Json<ProductResponse>, ApiError> {
    let id = parse_id(&id, "product")?;

    let product = state.catalog.product(ProductId::new(id)).await?;
    Ok(Json(ProductResponse { product }))
}
