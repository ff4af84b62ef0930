// src/db/product_repo.rs

use async_trait::async_trait;
use sqlx::{PgPool, Postgres, QueryBuilder};
use uuid::Uuid;

use crate::{
    common::error::AppError,
    common::pagination::offset,
    models::catalog::{CreateProductPayload, Product, ProductKind},
};

#[async_trait]
pub trait ProductRepository: Send + Sync {
    async fn insert(&self, new: &CreateProductPayload) -> Result<Product, AppError>;
    async fn find_by_id(&self, id: Uuid) -> Result<Option<Product>, AppError>;
    async fn list(
        &self,
        kind: Option<ProductKind>,
        q: Option<&str>,
        page: i64,
        limit: i64,
    ) -> Result<(Vec<Product>, i64), AppError>;
}

#[derive(Clone)]
pub struct PgProductRepository {
    pool: PgPool,
}

impl PgProductRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

fn push_filters(qb: &mut QueryBuilder<'_, Postgres>, kind: Option<ProductKind>, q: Option<&str>) {
    if let Some(kind) = kind {
        qb.push(" AND kind = ").push_bind(kind);
    }
    if let Some(q) = q {
        let like = format!("%{}%", q);
        qb.push(" AND (sku ILIKE ")
            .push_bind(like.clone())
            .push(" OR name ILIKE ")
            .push_bind(like)
            .push(")");
    }
}

#[async_trait]
impl ProductRepository for PgProductRepository {
    async fn insert(&self, new: &CreateProductPayload) -> Result<Product, AppError> {
        sqlx::query_as::<_, Product>(
            r#"
            INSERT INTO products (sku, name, kind, default_cost, reorder_level, category, description)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            RETURNING *
            "#,
        )
        .bind(&new.sku)
        .bind(&new.name)
        .bind(new.kind)
        .bind(new.default_cost)
        .bind(new.reorder_level)
        .bind(&new.category)
        .bind(&new.description)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| {
            if let Some(db_err) = e.as_database_error() {
                if db_err.is_unique_violation() {
                    return AppError::SkuAlreadyExists;
                }
            }
            e.into()
        })
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Product>, AppError> {
        let maybe_product = sqlx::query_as::<_, Product>("SELECT * FROM products WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(maybe_product)
    }

    async fn list(
        &self,
        kind: Option<ProductKind>,
        q: Option<&str>,
        page: i64,
        limit: i64,
    ) -> Result<(Vec<Product>, i64), AppError> {
        let mut qb = QueryBuilder::new("SELECT * FROM products WHERE TRUE");
        push_filters(&mut qb, kind, q);
        qb.push(" ORDER BY created_at DESC LIMIT ")
            .push_bind(limit)
            .push(" OFFSET ")
            .push_bind(offset(page, limit));
        let items = qb.build_query_as::<Product>().fetch_all(&self.pool).await?;

        let mut count_qb = QueryBuilder::new("SELECT COUNT(*) FROM products WHERE TRUE");
        push_filters(&mut count_qb, kind, q);
        let total: i64 = count_qb
            .build_query_scalar()
            .fetch_one(&self.pool)
            .await?;

        Ok((items, total))
    }
}
