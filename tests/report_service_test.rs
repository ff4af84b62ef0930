//! Testes das agregações de leitura: contagem por status, valorização
//! ponderada e detecção de estoque baixo.

mod common;

use std::sync::Arc;

use rust_decimal::Decimal;

use patrimonio_backend::db::AssetRepository;
use patrimonio_backend::models::asset::{AssetStatus, NewAsset};
use patrimonio_backend::services::report_service::ReportService;

use common::{InMemoryAssetRepository, InMemoryStockRepository};

struct Fixture {
    service: ReportService,
    assets: Arc<InMemoryAssetRepository>,
    stocks: Arc<InMemoryStockRepository>,
}

fn fixture() -> Fixture {
    let assets = Arc::new(InMemoryAssetRepository::default());
    let stocks = Arc::new(InMemoryStockRepository::default());
    let service = ReportService::new(assets.clone(), stocks.clone());
    Fixture {
        service,
        assets,
        stocks,
    }
}

async fn seed_asset(fx: &Fixture, tag: &str, status: AssetStatus, cost: i64) {
    fx.assets
        .insert(&NewAsset {
            tag: tag.to_string(),
            name: format!("Ativo {tag}"),
            asset_type: "Equipment".to_string(),
            status,
            owner_id: None,
            purchase_cost: Decimal::from(cost),
        })
        .await
        .unwrap();
}

#[tokio::test]
async fn status_counts_cover_every_status_and_sum_to_the_asset_count() {
    let fx = fixture();

    seed_asset(&fx, "AST-1", AssetStatus::Active, 100).await;
    seed_asset(&fx, "AST-2", AssetStatus::Active, 100).await;
    seed_asset(&fx, "AST-3", AssetStatus::Lost, 100).await;

    let counts = fx.service.status_counts().await.unwrap();
    assert_eq!(counts.active, 2);
    assert_eq!(counts.in_repair, 0);
    assert_eq!(counts.retired, 0);
    assert_eq!(counts.lost, 1);
    assert_eq!(counts.scrapped, 0);
    assert_eq!(counts.total(), 3);
}

#[tokio::test]
async fn status_counts_are_all_zero_without_assets() {
    let fx = fixture();

    let counts = fx.service.status_counts().await.unwrap();
    assert_eq!(counts.total(), 0);
}

#[tokio::test]
async fn scrapped_assets_are_worth_nothing_in_the_valuation() {
    let fx = fixture();

    seed_asset(&fx, "AST-1", AssetStatus::Active, 1000).await;
    seed_asset(&fx, "AST-2", AssetStatus::Scrapped, 1000).await;

    let report = fx.service.total_asset_value().await.unwrap();
    assert_eq!(report.total_asset_value, Decimal::from(1000));
}

#[tokio::test]
async fn in_repair_assets_count_at_half_value() {
    let fx = fixture();

    seed_asset(&fx, "AST-1", AssetStatus::InRepair, 1000).await;
    seed_asset(&fx, "AST-2", AssetStatus::Retired, 500).await;
    seed_asset(&fx, "AST-3", AssetStatus::Lost, 500).await;

    let report = fx.service.total_asset_value().await.unwrap();
    assert_eq!(report.total_asset_value, Decimal::from(500));
}

#[tokio::test]
async fn low_stock_includes_the_reorder_level_boundary() {
    let fx = fixture();

    let at_level = fx.stocks.seed_product("Cabo USB-C", 10);
    let above = fx.stocks.seed_product("Toner", 10);
    fx.stocks.seed_stock(at_level.id, 10, Decimal::from(15));
    fx.stocks.seed_stock(above.id, 11, Decimal::from(89));

    let rows = fx.service.low_stock().await.unwrap();
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].product_id, at_level.id);
    assert_eq!(rows[0].quantity, 10);
}

#[tokio::test]
async fn summary_combines_asset_and_consumable_values() {
    let fx = fixture();

    seed_asset(&fx, "AST-1", AssetStatus::Active, 1000).await;
    seed_asset(&fx, "AST-2", AssetStatus::InRepair, 200).await;

    let product = fx.stocks.seed_product("Pilha AA", 100);
    // 5 unidades × 4.50
    fx.stocks.seed_stock(product.id, 5, Decimal::new(450, 2));

    let summary = fx.service.summary().await.unwrap();
    assert_eq!(summary.total_asset_value, Decimal::from(1100));
    assert_eq!(summary.total_consumable_value, Decimal::new(2250, 2));
    assert_eq!(summary.combined_value, Decimal::new(112250, 2));
    assert_eq!(summary.asset_count, 2);
    // 5 <= 100: o próprio saldo semeado está abaixo do nível de reposição.
    assert_eq!(summary.low_stock_count, 1);
}
