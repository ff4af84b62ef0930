// src/handlers/users.rs
// Administração de usuários: todas as rotas exigem papel ADMIN.

use axum::{
    extract::{Path, Query, State},
    Json,
};
use uuid::Uuid;
use validator::Validate;

use crate::{
    common::{error::AppError, pagination::Page},
    config::AppState,
    middleware::rbac::RequireAdmin,
    models::auth::{ListUsersQuery, SetRolePayload, UpdateUserPayload, User},
};

pub async fn list_users(
    State(app_state): State<AppState>,
    RequireAdmin(_admin): RequireAdmin,
    Query(query): Query<ListUsersQuery>,
) -> Result<Json<Page<User>>, AppError> {
    query.validate().map_err(AppError::ValidationError)?;

    let page = app_state.user_service.list(query).await?;
    Ok(Json(page))
}

pub async fn get_user(
    State(app_state): State<AppState>,
    RequireAdmin(_admin): RequireAdmin,
    Path(id): Path<Uuid>,
) -> Result<Json<User>, AppError> {
    let user = app_state.user_service.get(id).await?;
    Ok(Json(user))
}

pub async fn update_user(
    State(app_state): State<AppState>,
    RequireAdmin(_admin): RequireAdmin,
    Path(id): Path<Uuid>,
    Json(payload): Json<UpdateUserPayload>,
) -> Result<Json<User>, AppError> {
    payload.validate().map_err(AppError::ValidationError)?;

    let user = app_state.user_service.update(id, payload).await?;
    Ok(Json(user))
}

pub async fn set_user_role(
    State(app_state): State<AppState>,
    RequireAdmin(_admin): RequireAdmin,
    Path(id): Path<Uuid>,
    Json(payload): Json<SetRolePayload>,
) -> Result<Json<User>, AppError> {
    let user = app_state.user_service.set_role(id, payload.role).await?;
    Ok(Json(user))
}
