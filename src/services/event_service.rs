// src/services/event_service.rs

use std::sync::Arc;
use uuid::Uuid;

use crate::{
    common::error::AppError,
    common::pagination::Page,
    db::AssetEventRepository,
    models::asset::{AssetEvent, AssetEventsQuery, EventFilter, ListEventsQuery},
};

// Consulta da trilha de auditoria. Somente leitura: eventos nascem no
// gravador e nunca mudam depois.
#[derive(Clone)]
pub struct EventService {
    events: Arc<dyn AssetEventRepository>,
}

impl EventService {
    pub fn new(events: Arc<dyn AssetEventRepository>) -> Self {
        Self { events }
    }

    pub async fn list(&self, query: ListEventsQuery) -> Result<Page<AssetEvent>, AppError> {
        let filter = EventFilter {
            asset_id: query.asset_id,
            created_by: query.created_by,
            action: query.action,
            q: query.q,
            from: query.from,
            to: query.to,
        };
        let (items, total) = self.events.list(&filter, query.page, query.limit).await?;
        Ok(Page::new(items, query.page, query.limit, total))
    }

    pub async fn get(&self, id: Uuid) -> Result<AssetEvent, AppError> {
        self.events
            .find_by_id(id)
            .await?
            .ok_or(AppError::EventNotFound)
    }

    // Atalho para a tela de detalhe: eventos de um único ativo.
    pub async fn for_asset(
        &self,
        asset_id: Uuid,
        query: AssetEventsQuery,
    ) -> Result<Page<AssetEvent>, AppError> {
        let filter = EventFilter {
            asset_id: Some(asset_id),
            ..Default::default()
        };
        let (items, total) = self.events.list(&filter, query.page, query.limit).await?;
        Ok(Page::new(items, query.page, query.limit, total))
    }
}
