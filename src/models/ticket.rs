// src/models/ticket.rs

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;
use validator::Validate;

use crate::common::pagination::{default_limit, default_page};

// Chamado de manutenção de um ativo. Aberto enquanto `closed_at` é nulo.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct ServiceTicket {
    pub id: Uuid,
    pub asset_id: Uuid,
    pub issue: String,
    pub vendor: Option<String>,
    pub opened_at: DateTime<Utc>,
    pub closed_at: Option<DateTime<Utc>>,
    pub resolution: Option<String>,
    pub cost: Option<Decimal>,
}

#[derive(Debug, Clone)]
pub struct NewServiceTicket {
    pub asset_id: Uuid,
    pub issue: String,
    pub vendor: Option<String>,
}

#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct OpenTicketPayload {
    pub asset_id: Uuid,
    #[validate(length(min = 1, message = "A descrição do problema é obrigatória."))]
    pub issue: String,
    pub vendor: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CloseTicketPayload {
    pub resolution: Option<String>,
    pub cost: Option<Decimal>,
}

#[derive(Debug, Default, Clone)]
pub struct TicketFilter {
    pub asset_id: Option<Uuid>,
    pub open: Option<bool>,
}

// `open=true` filtra apenas chamados ainda sem encerramento.
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct ListTicketsQuery {
    pub asset_id: Option<Uuid>,
    pub open: Option<bool>,
    #[serde(default = "default_page")]
    #[validate(range(min = 1, message = "A página começa em 1."))]
    pub page: i64,
    #[serde(default = "default_limit")]
    #[validate(range(min = 1, max = 100, message = "O limite deve estar entre 1 e 100."))]
    pub limit: i64,
}

impl Default for ListTicketsQuery {
    fn default() -> Self {
        Self {
            asset_id: None,
            open: None,
            page: default_page(),
            limit: default_limit(),
        }
    }
}
