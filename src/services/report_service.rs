// src/services/report_service.rs

use std::sync::Arc;

use rust_decimal::Decimal;

use crate::{
    common::error::AppError,
    db::{AssetRepository, StockRepository},
    models::catalog::ConsumableStockRow,
    models::report::{AssetValueReport, InventorySummary, StatusBreakdownRow, StatusCounts},
};

// Agregações de leitura sobre o snapshot atual dos registros. Nunca
// escreve nada.
#[derive(Clone)]
pub struct ReportService {
    assets: Arc<dyn AssetRepository>,
    stocks: Arc<dyn StockRepository>,
}

// Depreciação por condição, não por tempo: o custo de compra de cada
// status pesa pelo multiplicador do status.
fn weighted_value(rows: &[StatusBreakdownRow]) -> Decimal {
    rows.iter().fold(Decimal::ZERO, |acc, row| {
        acc + row.total_cost * row.status.value_multiplier()
    })
}

impl ReportService {
    pub fn new(assets: Arc<dyn AssetRepository>, stocks: Arc<dyn StockRepository>) -> Self {
        Self { assets, stocks }
    }

    // Todas as cinco chaves sempre presentes, zeradas quando não há ativos.
    pub async fn status_counts(&self) -> Result<StatusCounts, AppError> {
        let rows = self.assets.status_breakdown().await?;
        let mut counts = StatusCounts::default();
        for row in &rows {
            counts.add(row.status, row.count);
        }
        Ok(counts)
    }

    pub async fn total_asset_value(&self) -> Result<AssetValueReport, AppError> {
        let rows = self.assets.status_breakdown().await?;
        Ok(AssetValueReport {
            total_asset_value: weighted_value(&rows),
        })
    }

    pub async fn low_stock(&self) -> Result<Vec<ConsumableStockRow>, AppError> {
        self.stocks.low_stock().await
    }

    pub async fn summary(&self) -> Result<InventorySummary, AppError> {
        let rows = self.assets.status_breakdown().await?;
        let total_asset_value = weighted_value(&rows);
        let asset_count: i64 = rows.iter().map(|row| row.count).sum();

        let total_consumable_value = self.stocks.consumable_value().await?;
        let low_stock_count = self.stocks.low_stock().await?.len() as i64;

        Ok(InventorySummary {
            combined_value: total_asset_value + total_consumable_value,
            total_asset_value,
            total_consumable_value,
            asset_count,
            low_stock_count,
        })
    }
}
