// src/db/stock_repo.rs

use async_trait::async_trait;
use rust_decimal::Decimal;
use sqlx::PgPool;
use uuid::Uuid;

use crate::{
    common::error::AppError,
    common::pagination::offset,
    models::catalog::{
        ConsumableStock, ConsumableStockRow, NewConsumableStock, NewStockMovement, StockMovement,
    },
};

const STOCK_ROW_SELECT: &str = r#"
    SELECT cs.id, cs.product_id, p.name AS product_name, p.sku AS product_sku,
           p.reorder_level, cs.location, cs.quantity, cs.unit_cost, cs.updated_at
    FROM consumable_stocks cs
    JOIN products p ON p.id = cs.product_id
"#;

#[async_trait]
pub trait StockRepository: Send + Sync {
    async fn insert(&self, new: &NewConsumableStock) -> Result<ConsumableStock, AppError>;
    async fn find_by_id(&self, id: Uuid) -> Result<Option<ConsumableStock>, AppError>;
    async fn set_quantity(
        &self,
        id: Uuid,
        quantity: i32,
    ) -> Result<Option<ConsumableStock>, AppError>;
    async fn list(
        &self,
        page: i64,
        limit: i64,
    ) -> Result<(Vec<ConsumableStockRow>, i64), AppError>;
    // Saldos no nível de reposição ou abaixo dele (limite inclusivo).
    async fn low_stock(&self) -> Result<Vec<ConsumableStockRow>, AppError>;
    async fn consumable_value(&self) -> Result<Decimal, AppError>;
    // Livro-razão de movimentações: somente append, como os eventos de ativo.
    async fn record_movement(&self, new: &NewStockMovement) -> Result<StockMovement, AppError>;
}

#[derive(Clone)]
pub struct PgStockRepository {
    pool: PgPool,
}

impl PgStockRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl StockRepository for PgStockRepository {
    async fn insert(&self, new: &NewConsumableStock) -> Result<ConsumableStock, AppError> {
        sqlx::query_as::<_, ConsumableStock>(
            r#"
            INSERT INTO consumable_stocks (product_id, location, quantity, unit_cost)
            VALUES ($1, $2, $3, $4)
            RETURNING *
            "#,
        )
        .bind(new.product_id)
        .bind(&new.location)
        .bind(new.quantity)
        .bind(new.unit_cost)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| {
            if let Some(db_err) = e.as_database_error() {
                if db_err.is_foreign_key_violation() {
                    return AppError::ProductNotFound;
                }
            }
            e.into()
        })
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<ConsumableStock>, AppError> {
        let maybe_stock =
            sqlx::query_as::<_, ConsumableStock>("SELECT * FROM consumable_stocks WHERE id = $1")
                .bind(id)
                .fetch_optional(&self.pool)
                .await?;
        Ok(maybe_stock)
    }

    async fn set_quantity(
        &self,
        id: Uuid,
        quantity: i32,
    ) -> Result<Option<ConsumableStock>, AppError> {
        let maybe_stock = sqlx::query_as::<_, ConsumableStock>(
            r#"
            UPDATE consumable_stocks
            SET quantity = $2, updated_at = NOW()
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(quantity)
        .fetch_optional(&self.pool)
        .await?;
        Ok(maybe_stock)
    }

    async fn list(
        &self,
        page: i64,
        limit: i64,
    ) -> Result<(Vec<ConsumableStockRow>, i64), AppError> {
        let sql = format!(
            "{STOCK_ROW_SELECT} ORDER BY p.name ASC LIMIT $1 OFFSET $2"
        );
        let items = sqlx::query_as::<_, ConsumableStockRow>(&sql)
            .bind(limit)
            .bind(offset(page, limit))
            .fetch_all(&self.pool)
            .await?;

        let total: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM consumable_stocks")
            .fetch_one(&self.pool)
            .await?;

        Ok((items, total))
    }

    async fn low_stock(&self) -> Result<Vec<ConsumableStockRow>, AppError> {
        let sql = format!(
            "{STOCK_ROW_SELECT} WHERE cs.quantity <= p.reorder_level ORDER BY cs.quantity ASC"
        );
        let rows = sqlx::query_as::<_, ConsumableStockRow>(&sql)
            .fetch_all(&self.pool)
            .await?;
        Ok(rows)
    }

    async fn consumable_value(&self) -> Result<Decimal, AppError> {
        let total: Decimal = sqlx::query_scalar(
            "SELECT COALESCE(SUM(quantity * unit_cost), 0) FROM consumable_stocks",
        )
        .fetch_one(&self.pool)
        .await?;
        Ok(total)
    }

    async fn record_movement(&self, new: &NewStockMovement) -> Result<StockMovement, AppError> {
        let movement = sqlx::query_as::<_, StockMovement>(
            r#"
            INSERT INTO stock_movements
                (product_id, kind, quantity, previous_quantity, new_quantity, note, performed_by)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            RETURNING *
            "#,
        )
        .bind(new.product_id)
        .bind(new.kind)
        .bind(new.quantity)
        .bind(new.previous_quantity)
        .bind(new.new_quantity)
        .bind(&new.note)
        .bind(new.performed_by)
        .fetch_one(&self.pool)
        .await?;
        Ok(movement)
    }
}
