// src/models/report.rs

use rust_decimal::Decimal;
use serde::Serialize;
use sqlx::FromRow;
use utoipa::ToSchema;

use crate::models::asset::AssetStatus;

// Linha agregada por status vinda do repositório de ativos.
#[derive(Debug, Clone, FromRow)]
pub struct StatusBreakdownRow {
    pub status: AssetStatus,
    pub count: i64,
    pub total_cost: Decimal,
}

// Contagem por status. Struct de campos fixos: todas as cinco chaves
// aparecem sempre na resposta, zeradas quando não há ativos.
#[derive(Debug, Default, Clone, PartialEq, Eq, Serialize, ToSchema)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub struct StatusCounts {
    pub active: i64,
    pub in_repair: i64,
    pub retired: i64,
    pub lost: i64,
    pub scrapped: i64,
}

impl StatusCounts {
    pub fn add(&mut self, status: AssetStatus, count: i64) {
        match status {
            AssetStatus::Active => self.active += count,
            AssetStatus::InRepair => self.in_repair += count,
            AssetStatus::Retired => self.retired += count,
            AssetStatus::Lost => self.lost += count,
            AssetStatus::Scrapped => self.scrapped += count,
        }
    }

    pub fn total(&self) -> i64 {
        self.active + self.in_repair + self.retired + self.lost + self.scrapped
    }
}

#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AssetValueReport {
    pub total_asset_value: Decimal,
}

// Os cards do dashboard em uma única resposta.
#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct InventorySummary {
    pub total_asset_value: Decimal,
    pub total_consumable_value: Decimal,
    pub combined_value: Decimal,
    pub asset_count: i64,
    pub low_stock_count: i64,
}
