// src/handlers/consumables.rs

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use uuid::Uuid;
use validator::Validate;

use crate::{
    common::{error::AppError, pagination::Page},
    config::AppState,
    middleware::auth::AuthenticatedUser,
    models::catalog::{
        AdjustStockPayload, ConsumableStock, ConsumableStockRow, CreateStockPayload,
        ListStockQuery,
    },
};

pub async fn create_stock(
    State(app_state): State<AppState>,
    AuthenticatedUser(auth): AuthenticatedUser,
    Json(payload): Json<CreateStockPayload>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate().map_err(AppError::ValidationError)?;

    let stock = app_state
        .catalog_service
        .create_stock(auth.id, payload)
        .await?;
    Ok((StatusCode::CREATED, Json(stock)))
}

pub async fn list_stock(
    State(app_state): State<AppState>,
    AuthenticatedUser(_auth): AuthenticatedUser,
    Query(query): Query<ListStockQuery>,
) -> Result<Json<Page<ConsumableStockRow>>, AppError> {
    query.validate().map_err(AppError::ValidationError)?;

    let page = app_state.catalog_service.list_stock(query).await?;
    Ok(Json(page))
}

// Entrada, saída ou correção de saldo; cada ajuste gera uma linha no
// livro-razão de movimentações.
pub async fn adjust_stock(
    State(app_state): State<AppState>,
    AuthenticatedUser(auth): AuthenticatedUser,
    Path(id): Path<Uuid>,
    Json(payload): Json<AdjustStockPayload>,
) -> Result<Json<ConsumableStock>, AppError> {
    payload.validate().map_err(AppError::ValidationError)?;

    let stock = app_state
        .catalog_service
        .adjust_stock(auth.id, id, payload)
        .await?;
    Ok(Json(stock))
}
