// src/services/asset_service.rs

use std::sync::Arc;
use uuid::Uuid;

use crate::{
    common::error::AppError,
    common::pagination::Page,
    db::{AssetEventRepository, AssetRepository, UserRepository},
    models::asset::{
        Asset, AssetAction, AssetDetail, AssetFilter, AssetStatus, CreateAssetPayload, EventMeta,
        ListAssetsQuery, NewAsset, UpdateAssetPayload,
    },
    services::recorder::EventRecorder,
};

// Dono das transições de estado dos ativos. Cada operação de escrita
// grava o ativo e em seguida chama o gravador de eventos; os dois passos
// não são atômicos (ver DESIGN.md), então uma falha na gravação do
// evento propaga como 500 mesmo com o ativo já alterado.
#[derive(Clone)]
pub struct AssetService {
    assets: Arc<dyn AssetRepository>,
    users: Arc<dyn UserRepository>,
    events: Arc<dyn AssetEventRepository>,
    recorder: EventRecorder,
}

impl AssetService {
    pub fn new(
        assets: Arc<dyn AssetRepository>,
        users: Arc<dyn UserRepository>,
        events: Arc<dyn AssetEventRepository>,
        recorder: EventRecorder,
    ) -> Self {
        Self {
            assets,
            users,
            events,
            recorder,
        }
    }

    async fn ensure_owner_exists(&self, owner_id: Uuid) -> Result<(), AppError> {
        self.users
            .find_by_id(owner_id)
            .await?
            .map(|_| ())
            .ok_or(AppError::InvalidOwner)
    }

    // Status ausente vira ACTIVE. O responsável, se informado, precisa
    // existir antes de qualquer escrita.
    pub async fn create(
        &self,
        actor_id: Uuid,
        payload: CreateAssetPayload,
    ) -> Result<Asset, AppError> {
        let owner_id = payload.owner_id;
        if let Some(owner_id) = owner_id {
            self.ensure_owner_exists(owner_id).await?;
        }

        let new = NewAsset {
            tag: payload.tag,
            name: payload.name,
            asset_type: payload.asset_type,
            status: payload.status.unwrap_or(AssetStatus::Active),
            owner_id,
            purchase_cost: payload.purchase_cost,
        };
        let asset = self.assets.insert(&new).await?;

        let meta = owner_id.map(|id| EventMeta::owner(Some(id)));
        self.recorder
            .record(&asset, AssetAction::AssetCreated, actor_id, meta)
            .await?;

        Ok(asset)
    }

    // Atualização parcial: campos ausentes ficam intocados; `ownerId`
    // nulo explícito remove a atribuição. O payload completo vai como
    // meta do evento.
    pub async fn update(
        &self,
        actor_id: Uuid,
        id: Uuid,
        payload: UpdateAssetPayload,
    ) -> Result<Asset, AppError> {
        if self.assets.find_by_id(id).await?.is_none() {
            return Err(AppError::AssetNotFound);
        }
        if let Some(Some(owner_id)) = payload.owner_id {
            self.ensure_owner_exists(owner_id).await?;
        }

        let updated = self
            .assets
            .update(id, &payload)
            .await?
            .ok_or(AppError::AssetNotFound)?;

        self.recorder
            .record(
                &updated,
                AssetAction::AssetUpdated,
                actor_id,
                Some(EventMeta::Update(payload)),
            )
            .await?;

        Ok(updated)
    }

    // Atribui ou remove o responsável. Mesmo quando nada muda (remover
    // de um ativo já sem dono), o evento é emitido: a operação continua
    // auditável por si só.
    pub async fn assign_owner(
        &self,
        actor_id: Uuid,
        id: Uuid,
        owner_id: Option<Uuid>,
    ) -> Result<Asset, AppError> {
        if self.assets.find_by_id(id).await?.is_none() {
            return Err(AppError::AssetNotFound);
        }
        if let Some(owner_id) = owner_id {
            self.ensure_owner_exists(owner_id).await?;
        }

        let updated = self
            .assets
            .set_owner(id, owner_id)
            .await?
            .ok_or(AppError::AssetNotFound)?;

        let action = if owner_id.is_some() {
            AssetAction::AssetAssigned
        } else {
            AssetAction::AssetUnassigned
        };
        self.recorder
            .record(&updated, action, actor_id, Some(EventMeta::owner(owner_id)))
            .await?;

        Ok(updated)
    }

    // Sem curto-circuito: repetir o status atual também gera evento,
    // com meta {from, to} iguais.
    pub async fn set_status(
        &self,
        actor_id: Uuid,
        id: Uuid,
        status: AssetStatus,
    ) -> Result<Asset, AppError> {
        let existing = self
            .assets
            .find_by_id(id)
            .await?
            .ok_or(AppError::AssetNotFound)?;

        let updated = self
            .assets
            .set_status(id, status)
            .await?
            .ok_or(AppError::AssetNotFound)?;

        self.recorder
            .record(
                &updated,
                AssetAction::AssetStatusChanged,
                actor_id,
                Some(EventMeta::status_change(existing.status, updated.status)),
            )
            .await?;

        Ok(updated)
    }

    // O evento terminal é gravado ANTES de remover a linha: um leitor
    // concorrente do histórico sempre vê o ASSET_DELETED de um ativo
    // que sumiu.
    pub async fn delete(&self, actor_id: Uuid, id: Uuid) -> Result<(), AppError> {
        let existing = self
            .assets
            .find_by_id(id)
            .await?
            .ok_or(AppError::AssetNotFound)?;

        self.recorder
            .record(&existing, AssetAction::AssetDeleted, actor_id, None)
            .await?;

        self.assets.delete(id).await?;
        Ok(())
    }

    pub async fn get(&self, id: Uuid) -> Result<AssetDetail, AppError> {
        let asset = self
            .assets
            .find_by_id(id)
            .await?
            .ok_or(AppError::AssetNotFound)?;
        let events = self.events.for_asset(id).await?;
        Ok(AssetDetail { asset, events })
    }

    pub async fn list(&self, query: ListAssetsQuery) -> Result<Page<Asset>, AppError> {
        let filter = AssetFilter {
            q: query.q,
            status: query.status,
            owner_id: query.owner_id,
        };
        let (items, total) = self.assets.list(&filter, query.page, query.limit).await?;
        Ok(Page::new(items, query.page, query.limit, total))
    }
}
