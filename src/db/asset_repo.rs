// src/db/asset_repo.rs

use async_trait::async_trait;
use sqlx::{PgPool, Postgres, QueryBuilder};
use uuid::Uuid;

use crate::{
    common::error::AppError,
    common::pagination::offset,
    models::asset::{Asset, AssetFilter, AssetStatus, NewAsset, UpdateAssetPayload},
    models::report::StatusBreakdownRow,
};

// Fachada de armazenamento dos ativos. O trait permite trocar o Postgres
// por uma implementação em memória nos testes de serviço.
#[async_trait]
pub trait AssetRepository: Send + Sync {
    async fn insert(&self, new: &NewAsset) -> Result<Asset, AppError>;
    async fn find_by_id(&self, id: Uuid) -> Result<Option<Asset>, AppError>;
    async fn update(&self, id: Uuid, changes: &UpdateAssetPayload)
        -> Result<Option<Asset>, AppError>;
    async fn set_owner(&self, id: Uuid, owner_id: Option<Uuid>)
        -> Result<Option<Asset>, AppError>;
    async fn set_status(&self, id: Uuid, status: AssetStatus)
        -> Result<Option<Asset>, AppError>;
    async fn delete(&self, id: Uuid) -> Result<bool, AppError>;
    async fn list(
        &self,
        filter: &AssetFilter,
        page: i64,
        limit: i64,
    ) -> Result<(Vec<Asset>, i64), AppError>;
    async fn status_breakdown(&self) -> Result<Vec<StatusBreakdownRow>, AppError>;
}

#[derive(Clone)]
pub struct PgAssetRepository {
    pool: PgPool,
}

impl PgAssetRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

// Converte violações de restrição em erros de domínio; o resto vira
// DatabaseError genérico.
fn map_constraint(e: sqlx::Error) -> AppError {
    if let Some(db_err) = e.as_database_error() {
        if db_err.is_unique_violation() {
            return AppError::TagAlreadyExists;
        }
        if db_err.is_foreign_key_violation() {
            return AppError::InvalidOwner;
        }
    }
    e.into()
}

// Cláusulas compartilhadas entre a consulta de itens e a de contagem.
fn push_filters(qb: &mut QueryBuilder<'_, Postgres>, filter: &AssetFilter) {
    if let Some(status) = filter.status {
        qb.push(" AND status = ").push_bind(status);
    }
    if let Some(owner_id) = filter.owner_id {
        qb.push(" AND owner_id = ").push_bind(owner_id);
    }
    if let Some(q) = &filter.q {
        let like = format!("%{}%", q);
        qb.push(" AND (tag ILIKE ")
            .push_bind(like.clone())
            .push(" OR name ILIKE ")
            .push_bind(like.clone())
            .push(" OR type ILIKE ")
            .push_bind(like)
            .push(")");
    }
}

#[async_trait]
impl AssetRepository for PgAssetRepository {
    async fn insert(&self, new: &NewAsset) -> Result<Asset, AppError> {
        sqlx::query_as::<_, Asset>(
            r#"
            INSERT INTO assets (tag, name, type, status, owner_id, purchase_cost)
            VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING *
            "#,
        )
        .bind(&new.tag)
        .bind(&new.name)
        .bind(&new.asset_type)
        .bind(new.status)
        .bind(new.owner_id)
        .bind(new.purchase_cost)
        .fetch_one(&self.pool)
        .await
        .map_err(map_constraint)
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Asset>, AppError> {
        let maybe_asset = sqlx::query_as::<_, Asset>("SELECT * FROM assets WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(maybe_asset)
    }

    // Atualização parcial: COALESCE mantém o valor atual para campos
    // ausentes; o par ($7, $8) implementa o tri-estado do responsável
    // (ausente / null explícito / valor).
    async fn update(
        &self,
        id: Uuid,
        changes: &UpdateAssetPayload,
    ) -> Result<Option<Asset>, AppError> {
        sqlx::query_as::<_, Asset>(
            r#"
            UPDATE assets SET
                tag = COALESCE($2, tag),
                name = COALESCE($3, name),
                type = COALESCE($4, type),
                status = COALESCE($5, status),
                purchase_cost = COALESCE($6, purchase_cost),
                owner_id = CASE WHEN $7 THEN $8 ELSE owner_id END,
                updated_at = NOW()
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(&changes.tag)
        .bind(&changes.name)
        .bind(&changes.asset_type)
        .bind(changes.status)
        .bind(changes.purchase_cost)
        .bind(changes.owner_id.is_some())
        .bind(changes.owner_id.flatten())
        .fetch_optional(&self.pool)
        .await
        .map_err(map_constraint)
    }

    async fn set_owner(
        &self,
        id: Uuid,
        owner_id: Option<Uuid>,
    ) -> Result<Option<Asset>, AppError> {
        sqlx::query_as::<_, Asset>(
            "UPDATE assets SET owner_id = $2, updated_at = NOW() WHERE id = $1 RETURNING *",
        )
        .bind(id)
        .bind(owner_id)
        .fetch_optional(&self.pool)
        .await
        .map_err(map_constraint)
    }

    async fn set_status(
        &self,
        id: Uuid,
        status: AssetStatus,
    ) -> Result<Option<Asset>, AppError> {
        let maybe_asset = sqlx::query_as::<_, Asset>(
            "UPDATE assets SET status = $2, updated_at = NOW() WHERE id = $1 RETURNING *",
        )
        .bind(id)
        .bind(status)
        .fetch_optional(&self.pool)
        .await?;
        Ok(maybe_asset)
    }

    async fn delete(&self, id: Uuid) -> Result<bool, AppError> {
        let result = sqlx::query("DELETE FROM assets WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    async fn list(
        &self,
        filter: &AssetFilter,
        page: i64,
        limit: i64,
    ) -> Result<(Vec<Asset>, i64), AppError> {
        let mut qb = QueryBuilder::new("SELECT * FROM assets WHERE TRUE");
        push_filters(&mut qb, filter);
        qb.push(" ORDER BY created_at DESC LIMIT ")
            .push_bind(limit)
            .push(" OFFSET ")
            .push_bind(offset(page, limit));
        let items = qb.build_query_as::<Asset>().fetch_all(&self.pool).await?;

        let mut count_qb = QueryBuilder::new("SELECT COUNT(*) FROM assets WHERE TRUE");
        push_filters(&mut count_qb, filter);
        let total: i64 = count_qb
            .build_query_scalar()
            .fetch_one(&self.pool)
            .await?;

        Ok((items, total))
    }

    async fn status_breakdown(&self) -> Result<Vec<StatusBreakdownRow>, AppError> {
        let rows = sqlx::query_as::<_, StatusBreakdownRow>(
            r#"
            SELECT status, COUNT(*) AS count, COALESCE(SUM(purchase_cost), 0) AS total_cost
            FROM assets
            GROUP BY status
            "#,
        )
        .fetch_all(&self.pool)
        .await?;
        Ok(rows)
    }
}
