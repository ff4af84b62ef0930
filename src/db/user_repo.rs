// src/db/user_repo.rs

use async_trait::async_trait;
use sqlx::{PgPool, Postgres, QueryBuilder};
use uuid::Uuid;

use crate::{
    common::error::AppError,
    common::pagination::offset,
    models::auth::{Role, UpdateUserPayload, User},
};

// O repositório de usuários, responsável por todas as interações com a
// tabela 'users'.
#[async_trait]
pub trait UserRepository: Send + Sync {
    async fn insert(
        &self,
        email: &str,
        name: Option<&str>,
        password_hash: &str,
    ) -> Result<User, AppError>;
    async fn find_by_email(&self, email: &str) -> Result<Option<User>, AppError>;
    async fn find_by_id(&self, id: Uuid) -> Result<Option<User>, AppError>;
    async fn list(
        &self,
        q: Option<&str>,
        page: i64,
        limit: i64,
    ) -> Result<(Vec<User>, i64), AppError>;
    async fn update(
        &self,
        id: Uuid,
        changes: &UpdateUserPayload,
    ) -> Result<Option<User>, AppError>;
    async fn set_role(&self, id: Uuid, role: Role) -> Result<Option<User>, AppError>;
}

#[derive(Clone)]
pub struct PgUserRepository {
    pool: PgPool,
}

impl PgUserRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

fn map_unique(e: sqlx::Error) -> AppError {
    // Converte erro de violação de chave única em um erro mais amigável
    if let Some(db_err) = e.as_database_error() {
        if db_err.is_unique_violation() {
            return AppError::EmailAlreadyExists;
        }
    }
    e.into()
}

fn push_filters(qb: &mut QueryBuilder<'_, Postgres>, q: Option<&str>) {
    if let Some(q) = q {
        let like = format!("%{}%", q);
        qb.push(" AND (email ILIKE ")
            .push_bind(like.clone())
            .push(" OR name ILIKE ")
            .push_bind(like)
            .push(")");
    }
}

#[async_trait]
impl UserRepository for PgUserRepository {
    // Cria um novo usuário; o papel nasce USER pelo default da coluna.
    async fn insert(
        &self,
        email: &str,
        name: Option<&str>,
        password_hash: &str,
    ) -> Result<User, AppError> {
        sqlx::query_as::<_, User>(
            r#"
            INSERT INTO users (email, name, password_hash)
            VALUES ($1, $2, $3)
            RETURNING *
            "#,
        )
        .bind(email)
        .bind(name)
        .bind(password_hash)
        .fetch_one(&self.pool)
        .await
        .map_err(map_unique)
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<User>, AppError> {
        let maybe_user = sqlx::query_as::<_, User>("SELECT * FROM users WHERE email = $1")
            .bind(email)
            .fetch_optional(&self.pool)
            .await?;
        Ok(maybe_user)
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<User>, AppError> {
        let maybe_user = sqlx::query_as::<_, User>("SELECT * FROM users WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(maybe_user)
    }

    async fn list(
        &self,
        q: Option<&str>,
        page: i64,
        limit: i64,
    ) -> Result<(Vec<User>, i64), AppError> {
        let mut qb = QueryBuilder::new("SELECT * FROM users WHERE TRUE");
        push_filters(&mut qb, q);
        qb.push(" ORDER BY created_at DESC LIMIT ")
            .push_bind(limit)
            .push(" OFFSET ")
            .push_bind(offset(page, limit));
        let items = qb.build_query_as::<User>().fetch_all(&self.pool).await?;

        let mut count_qb = QueryBuilder::new("SELECT COUNT(*) FROM users WHERE TRUE");
        push_filters(&mut count_qb, q);
        let total: i64 = count_qb
            .build_query_scalar()
            .fetch_one(&self.pool)
            .await?;

        Ok((items, total))
    }

    // `name` tri-estado via o par ($2, $3); `email` ausente mantém o atual.
    async fn update(
        &self,
        id: Uuid,
        changes: &UpdateUserPayload,
    ) -> Result<Option<User>, AppError> {
        sqlx::query_as::<_, User>(
            r#"
            UPDATE users SET
                name = CASE WHEN $2 THEN $3 ELSE name END,
                email = COALESCE($4, email),
                updated_at = NOW()
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(changes.name.is_some())
        .bind(changes.name.clone().flatten())
        .bind(&changes.email)
        .fetch_optional(&self.pool)
        .await
        .map_err(map_unique)
    }

    async fn set_role(&self, id: Uuid, role: Role) -> Result<Option<User>, AppError> {
        let maybe_user = sqlx::query_as::<_, User>(
            "UPDATE users SET role = $2, updated_at = NOW() WHERE id = $1 RETURNING *",
        )
        .bind(id)
        .bind(role)
        .fetch_optional(&self.pool)
        .await?;
        Ok(maybe_user)
    }
}
