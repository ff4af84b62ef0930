// src/handlers/products.rs

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
    models::catalog::{CreateProductPayload, ListProductsQuery, Product},
};

pub async fn create_product(
    State(app_state): State<AppState>,
    AuthenticatedUser(_auth): AuthenticatedUser,
    Json(payload): Json<CreateProductPayload>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate().map_err(AppError::ValidationError)?;

    let product = app_state.catalog_service.create_product(payload).await?;
    Ok((StatusCode::CREATED, Json(product)))
}

pub async fn list_products(
    State(app_state): State<AppState>,
    AuthenticatedUser(_auth): AuthenticatedUser,
    Query(query): Query<ListProductsQuery>,
) -> Result<Json<Page<Product>>, AppError> {
    query.validate().map_err(AppError::ValidationError)?;

    let page = app_state.catalog_service.list_products(query).await?;
    Ok(Json(page))
}

pub async fn get_product(
    State(app_state): State<AppState>,
    AuthenticatedUser(_auth): AuthenticatedUser,
    Path(id): Path<Uuid>,
) -> Result<Json<Product>, AppError> {
    let product = app_state.catalog_service.get_product(id).await?;
    Ok(Json(product))
}
