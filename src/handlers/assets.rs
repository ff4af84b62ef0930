// src/handlers/assets.rs

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use serde_json::json;
use uuid::Uuid;
use validator::Validate;

use crate::{
    common::{error::AppError, pagination::Page},
    config::AppState,
    middleware::auth::AuthenticatedUser,
    models::asset::{
        Asset, AssetDetail, AssignAssetPayload, CreateAssetPayload, ListAssetsQuery,
        SetAssetStatusPayload, UpdateAssetPayload,
    },
};

pub async fn list_assets(
    State(app_state): State<AppState>,
    AuthenticatedUser(_auth): AuthenticatedUser,
    Query(query): Query<ListAssetsQuery>,
) -> Result<Json<Page<Asset>>, AppError> {
    query.validate().map_err(AppError::ValidationError)?;

    let page = app_state.asset_service.list(query).await?;
    Ok(Json(page))
}

// Detalhe com o histórico completo de eventos.
pub async fn get_asset(
    State(app_state): State<AppState>,
    AuthenticatedUser(_auth): AuthenticatedUser,
    Path(id): Path<Uuid>,
) -> Result<Json<AssetDetail>, AppError> {
    let detail = app_state.asset_service.get(id).await?;
    Ok(Json(detail))
}

pub async fn create_asset(
    State(app_state): State<AppState>,
    AuthenticatedUser(auth): AuthenticatedUser,
    Json(payload): Json<CreateAssetPayload>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate().map_err(AppError::ValidationError)?;

    let asset = app_state.asset_service.create(auth.id, payload).await?;
    Ok((StatusCode::CREATED, Json(asset)))
}

pub async fn update_asset(
    State(app_state): State<AppState>,
    AuthenticatedUser(auth): AuthenticatedUser,
    Path(id): Path<Uuid>,
    Json(payload): Json<UpdateAssetPayload>,
) -> Result<Json<Asset>, AppError> {
    payload.validate().map_err(AppError::ValidationError)?;

    let asset = app_state.asset_service.update(auth.id, id, payload).await?;
    Ok(Json(asset))
}

// Atribui (ownerId presente) ou desatribui (ownerId nulo) o responsável.
pub async fn assign_asset(
    State(app_state): State<AppState>,
    AuthenticatedUser(auth): AuthenticatedUser,
    Path(id): Path<Uuid>,
    Json(payload): Json<AssignAssetPayload>,
) -> Result<Json<Asset>, AppError> {
    let asset = app_state
        .asset_service
        .assign_owner(auth.id, id, payload.owner_id)
        .await?;
    Ok(Json(asset))
}

pub async fn set_asset_status(
    State(app_state): State<AppState>,
    AuthenticatedUser(auth): AuthenticatedUser,
    Path(id): Path<Uuid>,
    Json(payload): Json<SetAssetStatusPayload>,
) -> Result<Json<Asset>, AppError> {
    let asset = app_state
        .asset_service
        .set_status(auth.id, id, payload.status)
        .await?;
    Ok(Json(asset))
}

pub async fn delete_asset(
    State(app_state): State<AppState>,
    AuthenticatedUser(auth): AuthenticatedUser,
    Path(id): Path<Uuid>,
) -> Result<Json<serde_json::Value>, AppError> {
    app_state.asset_service.delete(auth.id, id).await?;
    Ok(Json(json!({ "ok": true })))
}
