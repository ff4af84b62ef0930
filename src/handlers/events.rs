// src/handlers/events.rs

use axum::{
    extract::{Path, Query, State},
    Json,
};
use uuid::Uuid;
use validator::Validate;

use crate::{
    common::{error::AppError, pagination::Page},
    config::AppState,
    middleware::auth::AuthenticatedUser,
    models::asset::{AssetEvent, AssetEventsQuery, ListEventsQuery},
};

pub async fn list_events(
    State(app_state): State<AppState>,
    AuthenticatedUser(_auth): AuthenticatedUser,
    Query(query): Query<ListEventsQuery>,
) -> Result<Json<Page<AssetEvent>>, AppError> {
    query.validate().map_err(AppError::ValidationError)?;

    let page = app_state.event_service.list(query).await?;
    Ok(Json(page))
}

pub async fn get_event(
    State(app_state): State<AppState>,
    AuthenticatedUser(_auth): AuthenticatedUser,
    Path(id): Path<Uuid>,
) -> Result<Json<AssetEvent>, AppError> {
    let event = app_state.event_service.get(id).await?;
    Ok(Json(event))
}

// Atalho: histórico paginado de um único ativo.
pub async fn list_asset_events(
    State(app_state): State<AppState>,
    AuthenticatedUser(_auth): AuthenticatedUser,
    Path(asset_id): Path<Uuid>,
    Query(query): Query<AssetEventsQuery>,
) -> Result<Json<Page<AssetEvent>>, AppError> {
    query.validate().map_err(AppError::ValidationError)?;

    let page = app_state.event_service.for_asset(asset_id, query).await?;
    Ok(Json(page))
}
