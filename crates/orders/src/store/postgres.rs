use async_trait::async_trait;
use sqlx::{PgPool, Row};

use crate::model::{Order, OrderId, OrderLine, STATUS_NEW, UserId};
use crate::store::{OrderStore, Result, StoreError};

/// PostgreSQL-backed order store.
///
/// Order creation inserts the order row and its lines inside one
/// transaction; a failed line insert rolls the whole order back.
#[derive(Clone)]
pub struct PostgresOrderStore {
    pool: PgPool,
}

impl PostgresOrderStore {
    /// Creates a new PostgreSQL order store.
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

    async fn lines_for_order(&self, order_id: i64) -> Result<Vec<OrderLine>> {
        let rows = sqlx::query(
            "SELECT item_id, quantity FROM order_items WHERE order_id = $1 ORDER BY item_id",
        )
        .bind(order_id)
        .fetch_all(&self.pool)
        .await?;

        rows.into_iter()
            .map(|row| {
                Ok(OrderLine {
                    item_id: row.try_get("item_id")?,
                    quantity: row.try_get::<i64, _>("quantity")? as u32,
                })
            })
            .collect()
    }
}

#[async_trait]
impl OrderStore for PostgresOrderStore {
    async fn create_order(
        &self,
        user_id: UserId,
        price_cents: i64,
        items: Vec<OrderLine>,
    ) -> Result<OrderId> {
        if items.is_empty() || items.iter().any(|line| line.quantity < 1) {
            return Err(StoreError::NotCreated);
        }

        let mut tx = self.pool.begin().await?;

        let id: i64 = sqlx::query_scalar(
            r#"
            INSERT INTO orders (user_id, price_cents, status)
            VALUES ($1, $2, $3)
            RETURNING id
            "#,
        )
        .bind(user_id.as_i64())
        .bind(price_cents)
        .bind(STATUS_NEW)
        .fetch_one(&mut *tx)
        .await?;

        for line in &items {
            sqlx::query(
                r#"
                INSERT INTO order_items (order_id, item_id, quantity)
                VALUES ($1, $2, $3)
                "#,
            )
            .bind(id)
            .bind(line.item_id)
            .bind(i64::from(line.quantity))
            .execute(&mut *tx)
            .await?;
        }

        tx.commit().await?;

        Ok(OrderId::new(id))
    }

    async fn order(&self, order_id: OrderId) -> Result<Order> {
        if order_id.as_i64() < 1 {
            return Err(StoreError::NotFound);
        }

        let row = sqlx::query(
            "SELECT id, user_id, price_cents, status, created_at FROM orders WHERE id = $1",
        )
        .bind(order_id.as_i64())
        .fetch_optional(&self.pool)
        .await?
        .ok_or(StoreError::NotFound)?;

        let id: i64 = row.try_get("id")?;
        let items = self.lines_for_order(id).await?;

        Ok(Order {
            id: OrderId::new(id),
            user_id: UserId::new(row.try_get("user_id")?),
            price_cents: row.try_get("price_cents")?,
            status: row.try_get("status")?,
            items,
            created_at: row.try_get("created_at")?,
        })
    }

    async fn orders_by_user(&self, user_id: UserId) -> Result<Vec<Order>> {
        if user_id.as_i64() < 1 {
            return Err(StoreError::NotFound);
        }

        let rows = sqlx::query(
            r#"
            SELECT id, user_id, price_cents, status, created_at
            FROM orders
            WHERE user_id = $1
            ORDER BY created_at DESC, id DESC
            "#,
        )
        .bind(user_id.as_i64())
        .fetch_all(&self.pool)
        .await?;

        if rows.is_empty() {
            return Err(StoreError::NotFound);
        }

        let mut orders = Vec::with_capacity(rows.len());
        for row in rows {
            let id: i64 = row.try_get("id")?;
            let items = self.lines_for_order(id).await?;
            orders.push(Order {
                id: OrderId::new(id),
                user_id: UserId::new(row.try_get("user_id")?),
                price_cents: row.try_get("price_cents")?,
                status: row.try_get("status")?,
                items,
                created_at: row.try_get("created_at")?,
            });
        }

        Ok(orders)
    }
}
