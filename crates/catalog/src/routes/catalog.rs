//! Catalog browse and quantity endpoints.

use std::sync::Arc;

use axum::Json;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use serde::{Deserialize, Serialize};

use crate::error::ApiError;
use crate::ledger::StockLedger;
use crate::model::{Category, CategoryId, NewProduct, Product, ProductId};
use crate::service::CatalogService;
use crate::store::ProductStore;

/// Shared application state accessible from all handlers.
pub struct AppState<S> {
    pub service: CatalogService<S>,
    pub ledger: StockLedger<S>,
}

// -- Request types --

#[derive(Deserialize)]
pub struct PutCategoryRequest {
    pub name: String,
}

// -- Response envelopes --

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

#[derive(Serialize)]
pub struct CategoryResponse {
    pub category: Category,
}

// Path ids arrive as raw strings: a non-numeric id means the resource
// cannot exist and maps to 404, not to axum's default 400 rejection.
fn parse_id(raw: &str, kind: &str) -> Result<i64, ApiError> {
    match raw.parse::<i64>() {
        Ok(id) if id >= 1 => Ok(id),
        _ => Err(ApiError::NotFound(format!("{kind} {raw} not found"))),
    }
}

fn parse_amount(raw: &str) -> Result<u32, ApiError> {
    raw.parse::<u32>()
        .map_err(|_| ApiError::BadRequest(format!("invalid amount: {raw}")))
}

// -- Handlers --

/// GET /v1/catalog — list all categories.
#[tracing::instrument(skip(state))]
pub async fn categories<S: ProductStore>(
    State(state): State<Arc<AppState<S>>>,
) -> Result<Json<CategoriesResponse>, ApiError> {
    let categories = state.service.categories().await?;
    Ok(Json(CategoriesResponse { categories }))
}

/// GET /v1/category/:id — list the products of a category.
#[tracing::instrument(skip(state))]
pub async fn products_by_category<S: ProductStore>(
    State(state): State<Arc<AppState<S>>>,
    Path(id): Path<String>,
) -> Result<Json<ProductsResponse>, ApiError> {
    let id = parse_id(&id, "category")?;

    let products = state
        .service
        .products_by_category(CategoryId::new(id))
        .await?;
    Ok(Json(ProductsResponse { products }))
}

/// GET /v1/product/:id — load a product by ID.
#[tracing::instrument(skip(state))]
pub async fn product<S: ProductStore>(
    State(state): State<Arc<AppState<S>>>,
    Path(id): Path<String>,
) -> Result<Json<ProductResponse>, ApiError> {
    let id = parse_id(&id, "product")?;

    let product = state.service.product(ProductId::new(id)).await?;
    Ok(Json(ProductResponse { product }))
}

/// POST /v1/product/:id/decrease/:amount — reserve stock.
#[tracing::instrument(skip(state))]
pub async fn decrease_quantity<S: ProductStore>(
    State(state): State<Arc<AppState<S>>>,
    Path((id, amount)): Path<(String, String)>,
) -> Result<StatusCode, ApiError> {
    let id = parse_id(&id, "product")?;
    let amount = parse_amount(&amount)?;

    state.ledger.decrease(ProductId::new(id), amount).await?;
    Ok(StatusCode::OK)
}

/// POST /v1/product/:id/increase/:amount — restock or compensate.
#[tracing::instrument(skip(state))]
pub async fn increase_quantity<S: ProductStore>(
    State(state): State<Arc<AppState<S>>>,
    Path((id, amount)): Path<(String, String)>,
) -> Result<StatusCode, ApiError> {
    let id = parse_id(&id, "product")?;
    let amount = parse_amount(&amount)?;

    state.ledger.increase(ProductId::new(id), amount).await?;
    Ok(StatusCode::OK)
}

/// POST /v1/category — insert a category.
#[tracing::instrument(skip(state, req))]
pub async fn put_category<S: ProductStore>(
    State(state): State<Arc<AppState<S>>>,
    Json(req): Json<PutCategoryRequest>,
) -> Result<(StatusCode, Json<CategoryResponse>), ApiError> {
    let category = state.service.put_category(&req.name).await?;
    Ok((StatusCode::CREATED, Json(CategoryResponse { category })))
}

/// POST /v1/product — insert a product.
#[tracing::instrument(skip(state, req))]
pub async fn put_product<S: ProductStore>(
    State(state): State<Arc<AppState<S>>>,
    Json(req): Json<NewProduct>,
) -> Result<(StatusCode, Json<ProductResponse>), ApiError> {
    let product = state.service.put_product(req).await?;
    Ok((StatusCode::CREATED, Json(ProductResponse { product })))
}
