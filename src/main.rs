// src/main.rs

use axum::{
    middleware as axum_middleware,
    routing::{get, patch, post},
    Router,
};
use tokio::net::TcpListener;
use tracing_subscriber::EnvFilter;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use patrimonio_backend::{
    config::AppState, docs::ApiDoc, handlers, middleware::auth::auth_guard,
};

#[tokio::main]
async fn main() {
    // Inicializa o logger (RUST_LOG controla o filtro; default "info").
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_target(false)
        .compact()
        .init();

    // .expect() é bom aqui: se a configuração falhar, a aplicação não deve iniciar.
    let app_state = AppState::new()
        .await
        .expect("Falha ao inicializar o estado da aplicação.");

    // Roda as migrações do SQLx na inicialização
    sqlx::migrate!()
        .run(&app_state.db_pool)
        .await
        .expect("Falha ao rodar as migrações do banco de dados.");

    tracing::info!("✅ Migrações do banco de dados executadas com sucesso!");

    // Rotas de autenticação: registro e login são públicos, /me não.
    let auth_routes = Router::new()
        .route("/register", post(handlers::auth::register))
        .route("/login", post(handlers::auth::login))
        .merge(
            Router::new()
                .route("/me", get(handlers::auth::get_me))
                .layer(axum_middleware::from_fn_with_state(
                    app_state.clone(),
                    auth_guard,
                )),
        );

    // Administração de usuários (o RequireAdmin dentro dos handlers faz o 403)
    let user_routes = Router::new()
        .route("/", get(handlers::users::list_users))
        .route(
            "/{id}",
            get(handlers::users::get_user).patch(handlers::users::update_user),
        )
        .route("/{id}/role", patch(handlers::users::set_user_role))
        .layer(axum_middleware::from_fn_with_state(
            app_state.clone(),
            auth_guard,
        ));

    let asset_routes = Router::new()
        .route(
            "/",
            post(handlers::assets::create_asset).get(handlers::assets::list_assets),
        )
        .route(
            "/{id}",
            get(handlers::assets::get_asset)
                .patch(handlers::assets::update_asset)
                .delete(handlers::assets::delete_asset),
        )
        .route("/{id}/assign", post(handlers::assets::assign_asset))
        .route("/{id}/status", post(handlers::assets::set_asset_status))
        .layer(axum_middleware::from_fn_with_state(
            app_state.clone(),
            auth_guard,
        ));

    let event_routes = Router::new()
        .route("/", get(handlers::events::list_events))
        .route("/{id}", get(handlers::events::get_event))
        .route("/asset/{asset_id}", get(handlers::events::list_asset_events))
        .layer(axum_middleware::from_fn_with_state(
            app_state.clone(),
            auth_guard,
        ));

    let product_routes = Router::new()
        .route(
            "/",
            post(handlers::products::create_product).get(handlers::products::list_products),
        )
        .route("/{id}", get(handlers::products::get_product))
        .layer(axum_middleware::from_fn_with_state(
            app_state.clone(),
            auth_guard,
        ));

    let consumable_routes = Router::new()
        .route(
            "/",
            post(handlers::consumables::create_stock).get(handlers::consumables::list_stock),
        )
        .route("/{id}/adjust", post(handlers::consumables::adjust_stock))
        .layer(axum_middleware::from_fn_with_state(
            app_state.clone(),
            auth_guard,
        ));

    let ticket_routes = Router::new()
        .route(
            "/",
            post(handlers::tickets::open_ticket).get(handlers::tickets::list_tickets),
        )
        .route("/{id}", get(handlers::tickets::get_ticket))
        .route("/{id}/close", post(handlers::tickets::close_ticket))
        .layer(axum_middleware::from_fn_with_state(
            app_state.clone(),
            auth_guard,
        ));

    let report_routes = Router::new()
        .route("/status-counts", get(handlers::reports::get_status_counts))
        .route("/asset-value", get(handlers::reports::get_asset_value))
        .route("/low-stock", get(handlers::reports::get_low_stock))
        .route("/summary", get(handlers::reports::get_summary))
        .layer(axum_middleware::from_fn_with_state(
            app_state.clone(),
            auth_guard,
        ));

    // Combina tudo no router principal
    let app = Router::new()
        .route("/api/health", get(|| async { "OK" }))
        .nest("/api/auth", auth_routes)
        .nest("/api/users", user_routes)
        .nest("/api/assets", asset_routes)
        .nest("/api/events", event_routes)
        .nest("/api/products", product_routes)
        .nest("/api/consumables", consumable_routes)
        .nest("/api/tickets", ticket_routes)
        .nest("/api/reports", report_routes)
        .merge(SwaggerUi::new("/docs").url("/api-docs/openapi.json", ApiDoc::openapi()))
        .with_state(app_state);

    // Inicia o servidor
    let port = std::env::var("PORT").unwrap_or_else(|_| "3000".to_string());
    let addr = format!("0.0.0.0:{}", port);
    let listener = TcpListener::bind(&addr)
        .await
        .expect("Falha ao iniciar o listener TCP");
    tracing::info!("🚀 Servidor escutando em {}", listener.local_addr().unwrap());
    axum::serve(listener, app)
        .await
        .expect("Erro no servidor Axum");
}
