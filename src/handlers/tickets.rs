// src/handlers/tickets.rs

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
    models::ticket::{CloseTicketPayload, ListTicketsQuery, OpenTicketPayload, ServiceTicket},
};

pub async fn open_ticket(
    State(app_state): State<AppState>,
    AuthenticatedUser(_auth): AuthenticatedUser,
    Json(payload): Json<OpenTicketPayload>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate().map_err(AppError::ValidationError)?;

    let ticket = app_state.ticket_service.open(payload).await?;
    Ok((StatusCode::CREATED, Json(ticket)))
}

pub async fn list_tickets(
    State(app_state): State<AppState>,
    AuthenticatedUser(_auth): AuthenticatedUser,
    Query(query): Query<ListTicketsQuery>,
) -> Result<Json<Page<ServiceTicket>>, AppError> {
    query.validate().map_err(AppError::ValidationError)?;

    let page = app_state.ticket_service.list(query).await?;
    Ok(Json(page))
}

pub async fn get_ticket(
    State(app_state): State<AppState>,
    AuthenticatedUser(_auth): AuthenticatedUser,
    Path(id): Path<Uuid>,
) -> Result<Json<ServiceTicket>, AppError> {
    let ticket = app_state.ticket_service.get(id).await?;
    Ok(Json(ticket))
}

pub async fn close_ticket(
    State(app_state): State<AppState>,
    AuthenticatedUser(_auth): AuthenticatedUser,
    Path(id): Path<Uuid>,
    Json(payload): Json<CloseTicketPayload>,
) -> Result<Json<ServiceTicket>, AppError> {
    let ticket = app_state.ticket_service.close(id, payload).await?;
    Ok(Json(ticket))
}
