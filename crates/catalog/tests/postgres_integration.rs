//! Integration tests for the PostgreSQL product store.
//!
//! These tests require a live database and are ignored by default.
//! Run them with `DATABASE_URL` pointing at a disposable database:
//!
//! ```text
//! DATABASE_URL=postgres://... cargo test -p catalog -- --ignored
//! ```

use catalog::model::NewProduct;
use catalog::store::{PostgresProductStore, ProductStore, StoreError};

async fn connect() -> PostgresProductStore {
    let url = std::env::var("DATABASE_URL").expect("DATABASE_URL must be set for postgres tests");
    let pool = sqlx::postgres::PgPoolOptions::new()
        .max_connections(5)
        .connect(&url)
        .await
        .expect("failed to connect to database");

    let store = PostgresProductStore::new(pool);
    store.run_migrations().await.expect("migrations failed");
    store
}

async fn seed_product(store: &PostgresProductStore, quantity: u32) -> catalog::model::ProductId {
    let category = store.put_category("pg-test").await.unwrap();
    let product = store
        .put_product(NewProduct {
            name: "PG Widget".to_string(),
            description: String::new(),
            price_cents: 1000,
            quantity,
            image_url: String::new(),
            attributes: serde_json::json!({}),
            category_id: category.id,
        })
        .await
        .unwrap();
    product.id
}

#[tokio::test]
#[ignore]
async fn conditional_update_matches_observed_value() {
    let store = connect().await;
    let id = seed_product(&store, 10).await;

    store.update_quantity(id, 10, 6).await.unwrap();
    assert_eq!(store.quantity(id).await.unwrap(), 6);
}

#[tokio::test]
#[ignore]
async fn conditional_update_conflicts_on_stale_observation() {
    let store = connect().await;
    let id = seed_product(&store, 10).await;

    store.update_quantity(id, 10, 6).await.unwrap();

    let result = store.update_quantity(id, 10, 3).await;
    assert!(matches!(result, Err(StoreError::Conflict)));
    assert_eq!(store.quantity(id).await.unwrap(), 6);
}

#[tokio::test]
#[ignore]
async fn add_quantity_is_unconditional() {
    let store = connect().await;
    let id = seed_product(&store, 1).await;

    store.add_quantity(id, 4).await.unwrap();
    assert_eq!(store.quantity(id).await.unwrap(), 5);
}

#[tokio::test]
#[ignore]
async fn add_quantity_saturates_at_the_u32_ceiling() {
    let store = connect().await;
    let id = seed_product(&store, u32::MAX - 1).await;

    store.add_quantity(id, 5).await.unwrap();
    assert_eq!(store.quantity(id).await.unwrap(), u32::MAX);
}

#[tokio::test]
#[ignore]
async fn unknown_product_is_not_found() {
    let store = connect().await;

    let result = store.quantity(catalog::model::ProductId::new(-1)).await;
    assert!(matches!(result, Err(StoreError::NotFound)));
}
