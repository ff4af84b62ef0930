// src/db/event_repo.rs

use async_trait::async_trait;
use sqlx::types::Json;
use sqlx::{PgPool, Postgres, QueryBuilder};
use uuid::Uuid;

use crate::{
    common::error::AppError,
    common::pagination::offset,
    models::asset::{AssetEvent, EventFilter, NewAssetEvent},
};

// Trilha de auditoria: somente INSERT e leitura. Nenhum UPDATE ou DELETE
// existe aqui; eventos são imutáveis depois de gravados.
#[async_trait]
pub trait AssetEventRepository: Send + Sync {
    async fn append(&self, new: &NewAssetEvent) -> Result<AssetEvent, AppError>;
    async fn find_by_id(&self, id: Uuid) -> Result<Option<AssetEvent>, AppError>;
    async fn list(
        &self,
        filter: &EventFilter,
        page: i64,
        limit: i64,
    ) -> Result<(Vec<AssetEvent>, i64), AppError>;
    // Histórico completo de um ativo, mais recente primeiro.
    async fn for_asset(&self, asset_id: Uuid) -> Result<Vec<AssetEvent>, AppError>;
}

#[derive(Clone)]
pub struct PgAssetEventRepository {
    pool: PgPool,
}

impl PgAssetEventRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

fn push_filters(qb: &mut QueryBuilder<'_, Postgres>, filter: &EventFilter) {
    if let Some(asset_id) = filter.asset_id {
        qb.push(" AND asset_id = ").push_bind(asset_id);
    }
    if let Some(created_by) = filter.created_by {
        qb.push(" AND created_by = ").push_bind(created_by);
    }
    if let Some(action) = filter.action {
        qb.push(" AND action = ").push_bind(action);
    }
    // Limites inclusivos nas duas pontas.
    if let Some(from) = filter.from {
        qb.push(" AND created_at >= ").push_bind(from);
    }
    if let Some(to) = filter.to {
        qb.push(" AND created_at <= ").push_bind(to);
    }
    // A busca textual olha o snapshot desnormalizado, não o ativo vivo.
    if let Some(q) = &filter.q {
        let like = format!("%{}%", q);
        qb.push(" AND (asset_tag ILIKE ")
            .push_bind(like.clone())
            .push(" OR asset_name ILIKE ")
            .push_bind(like.clone())
            .push(" OR asset_type ILIKE ")
            .push_bind(like)
            .push(")");
    }
}

#[async_trait]
impl AssetEventRepository for PgAssetEventRepository {
    async fn append(&self, new: &NewAssetEvent) -> Result<AssetEvent, AppError> {
        let event = sqlx::query_as::<_, AssetEvent>(
            r#"
            INSERT INTO asset_events
                (asset_id, asset_tag, asset_name, asset_type, asset_status,
                 action, created_by, meta)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            RETURNING *
            "#,
        )
        .bind(new.asset_id)
        .bind(&new.asset_tag)
        .bind(&new.asset_name)
        .bind(&new.asset_type)
        .bind(new.asset_status)
        .bind(new.action)
        .bind(new.created_by)
        .bind(new.meta.as_ref().map(Json))
        .fetch_one(&self.pool)
        .await?;
        Ok(event)
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<AssetEvent>, AppError> {
        let maybe_event =
            sqlx::query_as::<_, AssetEvent>("SELECT * FROM asset_events WHERE id = $1")
                .bind(id)
                .fetch_optional(&self.pool)
                .await?;
        Ok(maybe_event)
    }

    async fn list(
        &self,
        filter: &EventFilter,
        page: i64,
        limit: i64,
    ) -> Result<(Vec<AssetEvent>, i64), AppError> {
        let mut qb = QueryBuilder::new("SELECT * FROM asset_events WHERE TRUE");
        push_filters(&mut qb, filter);
        qb.push(" ORDER BY created_at DESC LIMIT ")
            .push_bind(limit)
            .push(" OFFSET ")
            .push_bind(offset(page, limit));
        let items = qb
            .build_query_as::<AssetEvent>()
            .fetch_all(&self.pool)
            .await?;

        let mut count_qb = QueryBuilder::new("SELECT COUNT(*) FROM asset_events WHERE TRUE");
        push_filters(&mut count_qb, filter);
        let total: i64 = count_qb
            .build_query_scalar()
            .fetch_one(&self.pool)
            .await?;

        Ok((items, total))
    }

    async fn for_asset(&self, asset_id: Uuid) -> Result<Vec<AssetEvent>, AppError> {
        let events = sqlx::query_as::<_, AssetEvent>(
            "SELECT * FROM asset_events WHERE asset_id = $1 ORDER BY created_at DESC",
        )
        .bind(asset_id)
        .fetch_all(&self.pool)
        .await?;
        Ok(events)
    }
}
