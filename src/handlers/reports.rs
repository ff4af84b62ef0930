// src/handlers/reports.rs
// Agregações para os cards e tabelas do dashboard.

use axum::{extract::State, Json};

use crate::{
    common::error::AppError,
    config::AppState,
    middleware::auth::AuthenticatedUser,
    models::catalog::ConsumableStockRow,
    models::report::{AssetValueReport, InventorySummary, StatusCounts},
};

#[utoipa::path(
    get,
    path = "/api/reports/status-counts",
    tag = "Reports",
    responses(
        (status = 200, description = "Contagem de ativos por status (as cinco chaves sempre presentes)", body = StatusCounts),
        (status = 401, description = "Não autenticado")
    ),
    security(("api_jwt" = []))
)]
pub async fn get_status_counts(
    State(app_state): State<AppState>,
    AuthenticatedUser(_auth): AuthenticatedUser,
) -> Result<Json<StatusCounts>, AppError> {
    let counts = app_state.report_service.status_counts().await?;
    Ok(Json(counts))
}

#[utoipa::path(
    get,
    path = "/api/reports/asset-value",
    tag = "Reports",
    responses(
        (status = 200, description = "Valor total dos ativos ponderado pelo status", body = AssetValueReport),
        (status = 401, description = "Não autenticado")
    ),
    security(("api_jwt" = []))
)]
pub async fn get_asset_value(
    State(app_state): State<AppState>,
    AuthenticatedUser(_auth): AuthenticatedUser,
) -> Result<Json<AssetValueReport>, AppError> {
    let report = app_state.report_service.total_asset_value().await?;
    Ok(Json(report))
}

#[utoipa::path(
    get,
    path = "/api/reports/low-stock",
    tag = "Reports",
    responses(
        (status = 200, description = "Consumíveis no nível de reposição ou abaixo", body = Vec<ConsumableStockRow>),
        (status = 401, description = "Não autenticado")
    ),
    security(("api_jwt" = []))
)]
pub async fn get_low_stock(
    State(app_state): State<AppState>,
    AuthenticatedUser(_auth): AuthenticatedUser,
) -> Result<Json<Vec<ConsumableStockRow>>, AppError> {
    let rows = app_state.report_service.low_stock().await?;
    Ok(Json(rows))
}

#[utoipa::path(
    get,
    path = "/api/reports/summary",
    tag = "Reports",
    responses(
        (status = 200, description = "Resumo do inventário para os cards do dashboard", body = InventorySummary),
        (status = 401, description = "Não autenticado")
    ),
    security(("api_jwt" = []))
)]
pub async fn get_summary(
    State(app_state): State<AppState>,
    AuthenticatedUser(_auth): AuthenticatedUser,
) -> Result<Json<InventorySummary>, AppError> {
    let summary = app_state.report_service.summary().await?;
    Ok(Json(summary))
}
