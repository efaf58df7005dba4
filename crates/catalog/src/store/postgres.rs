use async_trait::async_trait;
use sqlx::{PgPool, Row, postgres::PgRow};

use crate::model::{Category, CategoryId, NewProduct, Product, ProductId};
use crate::store::{ProductStore, Result, StoreError};

/// PostgreSQL-backed product store.
///
/// The conditional quantity update is expressed as an `UPDATE ... WHERE
/// id = $1 AND quantity = $2`; zero affected rows means another writer
/// changed the value between read and write.
#[derive(Clone)]
pub struct PostgresProductStore {
    pool: PgPool,
}

impl PostgresProductStore {
    /// Creates a new PostgreSQL product store.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Gets a reference to the underlying connection pool.
    pub fn pool(&self) -> &PgPool {
        &self.pool
    }

    /// Runs the database migrations.
    pub async fn run_migrations(&self) -> std::result::Result<(), sqlx::migrate::MigrateError> {
        sqlx::migrate!("./migrations").run(&self.pool).await
    }

    fn row_to_product(row: PgRow) -> Result<Product> {
        Ok(Product {
            id: ProductId::new(row.try_get("id")?),
            name: row.try_get("name")?,
            description: row.try_get("description")?,
            price_cents: row.try_get("price_cents")?,
            quantity: row.try_get::<i64, _>("quantity")? as u32,
            image_url: row.try_get("image_url")?,
            attributes: row.try_get("attributes")?,
            category_id: CategoryId::new(row.try_get("category_id")?),
        })
    }
}

#[async_trait]
impl ProductStore for PostgresProductStore {
    async fn categories(&self) -> Result<Vec<Category>> {
        let rows = sqlx::query("SELECT id, name FROM categories ORDER BY name")
            .fetch_all(&self.pool)
            .await?;

        if rows.is_empty() {
            return Err(StoreError::NotFound);
        }

        rows.into_iter()
            .map(|row| {
                Ok(Category {
                    id: CategoryId::new(row.try_get("id")?),
                    name: row.try_get("name")?,
                })
            })
            .collect()
    }

    async fn products_by_category(&self, category_id: CategoryId) -> Result<Vec<Product>> {
        let rows = sqlx::query(
            r#"
            SELECT id, name, description, price_cents, quantity, image_url, attributes, category_id
            FROM products
            WHERE category_id = $1
            ORDER BY id
            "#,
        )
        .bind(category_id.as_i64())
        .fetch_all(&self.pool)
        .await?;

        if rows.is_empty() {
            return Err(StoreError::NotFound);
        }

        rows.into_iter().map(Self::row_to_product).collect()
    }

    async fn product(&self, product_id: ProductId) -> Result<Product> {
        let row = sqlx::query(
            r#"
            SELECT id, name, description, price_cents, quantity, image_url, attributes, category_id
            FROM products
            WHERE id = $1
            "#,
        )
        .bind(product_id.as_i64())
        .fetch_optional(&self.pool)
        .await?
        .ok_or(StoreError::NotFound)?;

        Self::row_to_product(row)
    }

    async fn quantity(&self, product_id: ProductId) -> Result<u32> {
        let quantity: Option<i64> =
            sqlx::query_scalar("SELECT quantity FROM products WHERE id = $1")
                .bind(product_id.as_i64())
                .fetch_optional(&self.pool)
                .await?;

        quantity.map(|q| q as u32).ok_or(StoreError::NotFound)
    }

    async fn update_quantity(&self, product_id: ProductId, observed: u32, new: u32) -> Result<()> {
        let result = sqlx::query(
            r#"
            UPDATE products
            SET quantity = $3
            WHERE id = $1 AND quantity = $2
            "#,
        )
        .bind(product_id.as_i64())
        .bind(i64::from(observed))
        .bind(i64::from(new))
        .execute(&self.pool)
        .await?;

        if result.rows_affected() == 0 {
            // Either the row vanished or the observed value is stale.
            let exists: Option<i64> = sqlx::query_scalar("SELECT id FROM products WHERE id = $1")
                .bind(product_id.as_i64())
                .fetch_optional(&self.pool)
                .await?;

            return match exists {
                Some(_) => Err(StoreError::Conflict),
                None => Err(StoreError::NotFound),
            };
        }

        Ok(())
    }

    async fn add_quantity(&self, product_id: ProductId, amount: u32) -> Result<()> {
        // Saturates at the u32 ceiling, matching the in-memory backend.
        let result = sqlx::query(
            r#"
            UPDATE products
            SET quantity = LEAST(quantity + $2, 4294967295)
            WHERE id = $1
            "#,
        )
        .bind(product_id.as_i64())
        .bind(i64::from(amount))
        .execute(&self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Err(StoreError::NotFound);
        }

        Ok(())
    }

    async fn put_category(&self, name: &str) -> Result<Category> {
        let id: i64 = sqlx::query_scalar(
            r#"
            INSERT INTO categories (name)
            VALUES ($1)
            RETURNING id
            "#,
        )
        .bind(name)
        .fetch_one(&self.pool)
        .await?;

        Ok(Category {
            id: CategoryId::new(id),
            name: name.to_string(),
        })
    }

    async fn put_product(&self, new_product: NewProduct) -> Result<Product> {
        let id: i64 = sqlx::query_scalar(
            r#"
            INSERT INTO products (name, description, price_cents, quantity, image_url, attributes, category_id)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            RETURNING id
            "#,
        )
        .bind(&new_product.name)
        .bind(&new_product.description)
        .bind(new_product.price_cents)
        .bind(i64::from(new_product.quantity))
        .bind(&new_product.image_url)
        .bind(&new_product.attributes)
        .bind(new_product.category_id.as_i64())
        .fetch_one(&self.pool)
        .await?;

        Ok(Product {
            id: ProductId::new(id),
            name: new_product.name,
            description: new_product.description,
            price_cents: new_product.price_cents,
            quantity: new_product.quantity,
            image_url: new_product.image_url,
            attributes: new_product.attributes,
            category_id: new_product.category_id,
        })
    }
}
