// src/config.rs

use std::{env, sync::Arc, time::Duration};

use sqlx::{postgres::PgPoolOptions, PgPool};

use crate::{
    db::{
        AssetEventRepository, AssetRepository, PgAssetEventRepository, PgAssetRepository,
        PgProductRepository, PgStockRepository, PgTicketRepository, PgUserRepository,
        ProductRepository, StockRepository, TicketRepository, UserRepository,
    },
    services::{
        asset_service::AssetService, auth::AuthService, catalog_service::CatalogService,
        event_service::EventService, recorder::EventRecorder, report_service::ReportService,
        ticket_service::TicketService, user_service::UserService,
    },
};

// O estado compartilhado que será acessível em toda a aplicação
#[derive(Clone)]
pub struct AppState {
    pub db_pool: PgPool,
    pub auth_service: AuthService,
    pub user_service: UserService,
    pub asset_service: AssetService,
    pub event_service: EventService,
    pub catalog_service: CatalogService,
    pub ticket_service: TicketService,
    pub report_service: ReportService,
}

impl AppState {
    pub async fn new() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();

        let database_url = env::var("DATABASE_URL").expect("DATABASE_URL deve ser definida");
        let jwt_secret = env::var("JWT_SECRET").expect("JWT_SECRET deve ser definido");

        // Conecta ao banco de dados, usando '?' para propagar erros
        let db_pool = PgPoolOptions::new()
            .max_connections(5)
            .acquire_timeout(Duration::from_secs(3))
            .connect(&database_url)
            .await?;

        tracing::info!("✅ Conexão com o banco de dados estabelecida com sucesso!");

        Ok(Self::with_pool(db_pool, jwt_secret))
    }

    // Monta o grafo de dependências sobre um pool já aberto. Os
    // repositórios entram como `Arc<dyn ...>`: é o único ponto que
    // conhece as implementações Postgres.
    pub fn with_pool(db_pool: PgPool, jwt_secret: String) -> Self {
        let users: Arc<dyn UserRepository> = Arc::new(PgUserRepository::new(db_pool.clone()));
        let assets: Arc<dyn AssetRepository> = Arc::new(PgAssetRepository::new(db_pool.clone()));
        let events: Arc<dyn AssetEventRepository> =
            Arc::new(PgAssetEventRepository::new(db_pool.clone()));
        let products: Arc<dyn ProductRepository> =
            Arc::new(PgProductRepository::new(db_pool.clone()));
        let stocks: Arc<dyn StockRepository> = Arc::new(PgStockRepository::new(db_pool.clone()));
        let tickets: Arc<dyn TicketRepository> =
            Arc::new(PgTicketRepository::new(db_pool.clone()));

        let recorder = EventRecorder::new(events.clone());

        let auth_service = AuthService::new(users.clone(), jwt_secret);
        let user_service = UserService::new(users.clone());
        let asset_service =
            AssetService::new(assets.clone(), users, events.clone(), recorder);
        let event_service = EventService::new(events);
        let catalog_service = CatalogService::new(products, stocks.clone());
        let ticket_service = TicketService::new(tickets, assets.clone());
        let report_service = ReportService::new(assets, stocks);

        Self {
            db_pool,
            auth_service,
            user_service,
            asset_service,
            event_service,
            catalog_service,
            ticket_service,
            report_service,
        }
    }
}
