// src/services/ticket_service.rs

use std::sync::Arc;
use uuid::Uuid;

use crate::{
    common::error::AppError,
    common::pagination::Page,
    db::{AssetRepository, TicketRepository},
    models::ticket::{
        CloseTicketPayload, ListTicketsQuery, NewServiceTicket, OpenTicketPayload, ServiceTicket,
        TicketFilter,
    },
};

#[derive(Clone)]
pub struct TicketService {
    tickets: Arc<dyn TicketRepository>,
    assets: Arc<dyn AssetRepository>,
}

impl TicketService {
    pub fn new(tickets: Arc<dyn TicketRepository>, assets: Arc<dyn AssetRepository>) -> Self {
        Self { tickets, assets }
    }

    pub async fn open(&self, payload: OpenTicketPayload) -> Result<ServiceTicket, AppError> {
        if self.assets.find_by_id(payload.asset_id).await?.is_none() {
            return Err(AppError::AssetNotFound);
        }

        let new = NewServiceTicket {
            asset_id: payload.asset_id,
            issue: payload.issue,
            vendor: payload.vendor,
        };
        self.tickets.insert(&new).await
    }

    pub async fn get(&self, id: Uuid) -> Result<ServiceTicket, AppError> {
        self.tickets
            .find_by_id(id)
            .await?
            .ok_or(AppError::TicketNotFound)
    }

    pub async fn list(&self, query: ListTicketsQuery) -> Result<Page<ServiceTicket>, AppError> {
        let filter = TicketFilter {
            asset_id: query.asset_id,
            open: query.open,
        };
        let (items, total) = self.tickets.list(&filter, query.page, query.limit).await?;
        Ok(Page::new(items, query.page, query.limit, total))
    }

    // Encerrar um chamado já encerrado é conflito, não sobrescrita.
    pub async fn close(
        &self,
        id: Uuid,
        payload: CloseTicketPayload,
    ) -> Result<ServiceTicket, AppError> {
        let ticket = self
            .tickets
            .find_by_id(id)
            .await?
            .ok_or(AppError::TicketNotFound)?;

        if ticket.closed_at.is_some() {
            return Err(AppError::TicketAlreadyClosed);
        }

        self.tickets
            .close(id, payload.resolution.as_deref(), payload.cost)
            .await?
            .ok_or(AppError::TicketNotFound)
    }
}
