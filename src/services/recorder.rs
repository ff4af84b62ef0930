// src/services/recorder.rs

use std::sync::Arc;
use uuid::Uuid;

use crate::{
    common::error::AppError,
    db::AssetEventRepository,
    models::asset::{Asset, AssetAction, AssetEvent, EventMeta, NewAssetEvent},
};

// Ponto único de gravação da trilha de auditoria. Toda mutação de ativo
// passa por aqui exatamente uma vez, com o snapshot do estado resultante
// (na exclusão, o estado imediatamente anterior à remoção).
//
// Os dados chegam prontos do serviço de ciclo de vida; não há validação
// aqui, só falhas de infraestrutura propagam.
#[derive(Clone)]
pub struct EventRecorder {
    events: Arc<dyn AssetEventRepository>,
}

impl EventRecorder {
    pub fn new(events: Arc<dyn AssetEventRepository>) -> Self {
        Self { events }
    }

    pub async fn record(
        &self,
        asset: &Asset,
        action: AssetAction,
        actor_id: Uuid,
        meta: Option<EventMeta>,
    ) -> Result<AssetEvent, AppError> {
        let new = NewAssetEvent {
            asset_id: asset.id,
            asset_tag: asset.tag.clone(),
            asset_name: asset.name.clone(),
            asset_type: asset.asset_type.clone(),
            asset_status: asset.status,
            action,
            created_by: actor_id,
            meta,
        };
        self.events.append(&new).await
    }
}
