// src/models/asset.rs

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::types::Json;
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

use crate::common::pagination::{default_limit, default_page};
use crate::common::patch::double_option;

// --- 1. Status do ciclo de vida ---

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, sqlx::Type, ToSchema)]
#[sqlx(type_name = "asset_status", rename_all = "SCREAMING_SNAKE_CASE")]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum AssetStatus {
    Active,
    InRepair,
    Retired,
    Lost,
    Scrapped,
}

impl AssetStatus {
    pub const ALL: [AssetStatus; 5] = [
        AssetStatus::Active,
        AssetStatus::InRepair,
        AssetStatus::Retired,
        AssetStatus::Lost,
        AssetStatus::Scrapped,
    ];

    // Peso de valorização por condição: valor cheio em uso, metade em
    // reparo, zero quando o ativo saiu de circulação.
    pub fn value_multiplier(&self) -> Decimal {
        match self {
            AssetStatus::Active => Decimal::ONE,
            AssetStatus::InRepair => Decimal::new(5, 1),
            AssetStatus::Retired | AssetStatus::Lost | AssetStatus::Scrapped => Decimal::ZERO,
        }
    }
}

// --- 2. Ativo físico ---

#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Asset {
    pub id: Uuid,
    pub tag: String,
    pub name: String,
    #[serde(rename = "type")]
    #[sqlx(rename = "type")]
    pub asset_type: String,
    pub status: AssetStatus,
    pub owner_id: Option<Uuid>,
    pub purchase_cost: Decimal,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

// Dados de um ativo ainda não persistido.
#[derive(Debug, Clone)]
pub struct NewAsset {
    pub tag: String,
    pub name: String,
    pub asset_type: String,
    pub status: AssetStatus,
    pub owner_id: Option<Uuid>,
    pub purchase_cost: Decimal,
}

// --- 3. Ações auditadas ---

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type, ToSchema)]
#[sqlx(type_name = "asset_action", rename_all = "SCREAMING_SNAKE_CASE")]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum AssetAction {
    AssetCreated,
    AssetUpdated,
    AssetAssigned,
    AssetUnassigned,
    AssetStatusChanged,
    AssetDeleted,
}

// --- 4. Meta tipada por ação ---
// O JSON gravado é o objeto "cru" (sem tag de variante): a coluna `action`
// já identifica o formato. O `deny_unknown_fields` nas structs mantém a
// desserialização `untagged` determinística.

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields, rename_all = "camelCase")]
pub struct StatusChangeMeta {
    pub from: AssetStatus,
    pub to: AssetStatus,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields, rename_all = "camelCase")]
pub struct OwnerMeta {
    pub owner_id: Option<Uuid>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum EventMeta {
    StatusChange(StatusChangeMeta),
    Owner(OwnerMeta),
    Update(UpdateAssetPayload),
}

impl EventMeta {
    pub fn owner(owner_id: Option<Uuid>) -> Self {
        EventMeta::Owner(OwnerMeta { owner_id })
    }

    pub fn status_change(from: AssetStatus, to: AssetStatus) -> Self {
        EventMeta::StatusChange(StatusChangeMeta { from, to })
    }
}

// --- 5. Evento de auditoria (snapshot imutável) ---
// Os campos `asset_*` são cópias desnormalizadas: o histórico continua
// legível depois que o ativo é renomeado ou excluído.

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct AssetEvent {
    pub id: Uuid,
    pub asset_id: Uuid,
    pub asset_tag: String,
    pub asset_name: String,
    pub asset_type: String,
    pub asset_status: AssetStatus,
    pub action: AssetAction,
    pub created_by: Uuid,
    pub meta: Option<Json<EventMeta>>,
    pub created_at: DateTime<Utc>,
}

// Dados de um evento ainda não persistido (montado pelo gravador).
#[derive(Debug, Clone)]
pub struct NewAssetEvent {
    pub asset_id: Uuid,
    pub asset_tag: String,
    pub asset_name: String,
    pub asset_type: String,
    pub asset_status: AssetStatus,
    pub action: AssetAction,
    pub created_by: Uuid,
    pub meta: Option<EventMeta>,
}

// --- 6. Payloads ---

#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateAssetPayload {
    #[validate(length(min = 1, message = "A etiqueta é obrigatória."))]
    pub tag: String,
    #[validate(length(min = 1, message = "O nome é obrigatório."))]
    pub name: String,
    #[validate(length(min = 1, message = "O tipo é obrigatório."))]
    #[serde(rename = "type")]
    pub asset_type: String,
    pub status: Option<AssetStatus>,
    pub owner_id: Option<Uuid>,
    #[serde(default)]
    pub purchase_cost: Decimal,
}

// Atualização parcial. `ownerId` ausente mantém o responsável atual;
// `ownerId: null` explícito remove a atribuição.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UpdateAssetPayload {
    #[validate(length(min = 1, message = "A etiqueta não pode ser vazia."))]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tag: Option<String>,
    #[validate(length(min = 1, message = "O nome não pode ser vazio."))]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[validate(length(min = 1, message = "O tipo não pode ser vazio."))]
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub asset_type: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<AssetStatus>,
    #[serde(
        default,
        deserialize_with = "double_option",
        skip_serializing_if = "Option::is_none"
    )]
    pub owner_id: Option<Option<Uuid>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub purchase_cost: Option<Decimal>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AssignAssetPayload {
    // null = desatribuir
    pub owner_id: Option<Uuid>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SetAssetStatusPayload {
    pub status: AssetStatus,
}

// --- 7. Filtros e consultas ---

#[derive(Debug, Default, Clone)]
pub struct AssetFilter {
    pub q: Option<String>,
    pub status: Option<AssetStatus>,
    pub owner_id: Option<Uuid>,
}

#[derive(Debug, Default, Clone)]
pub struct EventFilter {
    pub asset_id: Option<Uuid>,
    pub created_by: Option<Uuid>,
    pub action: Option<AssetAction>,
    pub q: Option<String>,
    pub from: Option<DateTime<Utc>>,
    pub to: Option<DateTime<Utc>>,
}

// `q` busca (substring, sem diferenciar maiúsculas) em tag, nome e tipo.
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct ListAssetsQuery {
    pub q: Option<String>,
    pub status: Option<AssetStatus>,
    pub owner_id: Option<Uuid>,
    #[serde(default = "default_page")]
    #[validate(range(min = 1, message = "A página começa em 1."))]
    pub page: i64,
    #[serde(default = "default_limit")]
    #[validate(range(min = 1, max = 100, message = "O limite deve estar entre 1 e 100."))]
    pub limit: i64,
}

impl Default for ListAssetsQuery {
    fn default() -> Self {
        Self {
            q: None,
            status: None,
            owner_id: None,
            page: default_page(),
            limit: default_limit(),
        }
    }
}

// `q` aqui busca nos campos de snapshot do evento, não no ativo vivo.
// `from`/`to` limitam `createdAt` de forma inclusiva.
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct ListEventsQuery {
    pub asset_id: Option<Uuid>,
    pub created_by: Option<Uuid>,
    pub action: Option<AssetAction>,
    pub q: Option<String>,
    pub from: Option<DateTime<Utc>>,
    pub to: Option<DateTime<Utc>>,
    #[serde(default = "default_page")]
    #[validate(range(min = 1, message = "A página começa em 1."))]
    pub page: i64,
    #[serde(default = "default_events_limit")]
    #[validate(range(min = 1, max = 100, message = "O limite deve estar entre 1 e 100."))]
    pub limit: i64,
}

impl Default for ListEventsQuery {
    fn default() -> Self {
        Self {
            asset_id: None,
            created_by: None,
            action: None,
            q: None,
            from: None,
            to: None,
            page: default_page(),
            limit: default_events_limit(),
        }
    }
}

fn default_events_limit() -> i64 {
    25
}

// Paginação da listagem de eventos de um ativo específico.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct AssetEventsQuery {
    #[serde(default = "default_page")]
    #[validate(range(min = 1, message = "A página começa em 1."))]
    pub page: i64,
    #[serde(default = "default_asset_events_limit")]
    #[validate(range(min = 1, max = 100, message = "O limite deve estar entre 1 e 100."))]
    pub limit: i64,
}

impl Default for AssetEventsQuery {
    fn default() -> Self {
        Self {
            page: default_page(),
            limit: default_asset_events_limit(),
        }
    }
}

fn default_asset_events_limit() -> i64 {
    50
}

// Ativo com o histórico completo de eventos (mais recente primeiro).
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AssetDetail {
    pub asset: Asset,
    pub events: Vec<AssetEvent>,
}
