// src/db/ticket_repo.rs

use async_trait::async_trait;
use rust_decimal::Decimal;
use sqlx::{PgPool, Postgres, QueryBuilder};
use uuid::Uuid;

use crate::{
    common::error::AppError,
    common::pagination::offset,
    models::ticket::{NewServiceTicket, ServiceTicket, TicketFilter},
};

#[async_trait]
pub trait TicketRepository: Send + Sync {
    async fn insert(&self, new: &NewServiceTicket) -> Result<ServiceTicket, AppError>;
    async fn find_by_id(&self, id: Uuid) -> Result<Option<ServiceTicket>, AppError>;
    async fn list(
        &self,
        filter: &TicketFilter,
        page: i64,
        limit: i64,
    ) -> Result<(Vec<ServiceTicket>, i64), AppError>;
    async fn close(
        &self,
        id: Uuid,
        resolution: Option<&str>,
        cost: Option<Decimal>,
    ) -> Result<Option<ServiceTicket>, AppError>;
}

#[derive(Clone)]
pub struct PgTicketRepository {
    pool: PgPool,
}

impl PgTicketRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

fn push_filters(qb: &mut QueryBuilder<'_, Postgres>, filter: &TicketFilter) {
    if let Some(asset_id) = filter.asset_id {
        qb.push(" AND asset_id = ").push_bind(asset_id);
    }
    match filter.open {
        Some(true) => {
            qb.push(" AND closed_at IS NULL");
        }
        Some(false) => {
            qb.push(" AND closed_at IS NOT NULL");
        }
        None => {}
    }
}

#[async_trait]
impl TicketRepository for PgTicketRepository {
    async fn insert(&self, new: &NewServiceTicket) -> Result<ServiceTicket, AppError> {
        sqlx::query_as::<_, ServiceTicket>(
            r#"
            INSERT INTO service_tickets (asset_id, issue, vendor)
            VALUES ($1, $2, $3)
            RETURNING *
            "#,
        )
        .bind(new.asset_id)
        .bind(&new.issue)
        .bind(&new.vendor)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| {
            if let Some(db_err) = e.as_database_error() {
                if db_err.is_foreign_key_violation() {
                    return AppError::AssetNotFound;
                }
            }
            e.into()
        })
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<ServiceTicket>, AppError> {
        let maybe_ticket =
            sqlx::query_as::<_, ServiceTicket>("SELECT * FROM service_tickets WHERE id = $1")
                .bind(id)
                .fetch_optional(&self.pool)
                .await?;
        Ok(maybe_ticket)
    }

    async fn list(
        &self,
        filter: &TicketFilter,
        page: i64,
        limit: i64,
    ) -> Result<(Vec<ServiceTicket>, i64), AppError> {
        let mut qb = QueryBuilder::new("SELECT * FROM service_tickets WHERE TRUE");
        push_filters(&mut qb, filter);
        qb.push(" ORDER BY opened_at DESC LIMIT ")
            .push_bind(limit)
            .push(" OFFSET ")
            .push_bind(offset(page, limit));
        let items = qb
            .build_query_as::<ServiceTicket>()
            .fetch_all(&self.pool)
            .await?;

        let mut count_qb = QueryBuilder::new("SELECT COUNT(*) FROM service_tickets WHERE TRUE");
        push_filters(&mut count_qb, filter);
        let total: i64 = count_qb
            .build_query_scalar()
            .fetch_one(&self.pool)
            .await?;

        Ok((items, total))
    }

    async fn close(
        &self,
        id: Uuid,
        resolution: Option<&str>,
        cost: Option<Decimal>,
    ) -> Result<Option<ServiceTicket>, AppError> {
        let maybe_ticket = sqlx::query_as::<_, ServiceTicket>(
            r#"
            UPDATE service_tickets
            SET closed_at = NOW(), resolution = $2, cost = $3
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(resolution)
        .bind(cost)
        .fetch_optional(&self.pool)
        .await?;
        Ok(maybe_ticket)
    }
}
