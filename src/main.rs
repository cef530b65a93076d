//src/main.rs

use axum::{
    middleware as axum_middleware,
    routing::{get, post},
    Router,
};
use tokio::net::TcpListener;
use tracing_subscriber::EnvFilter;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

mod common;
mod config;
mod db;
mod docs;
mod handlers;
mod middleware;
mod models;
mod services;

use crate::config::{AppState, Config};
use crate::db::spawn_snapshot_task;
use crate::docs::ApiDoc;
use crate::middleware::auth::auth_guard;

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_target(false)
        .compact()
        .init();

    // Se a configuração falhar, a aplicação não deve iniciar.
    let config = Config::from_env().expect("Falha ao carregar a configuração.");
    let app_state = AppState::new(&config)
        .await
        .expect("Falha ao inicializar o estado da aplicação.");

    let snapshot_task = if config.snapshot_interval.is_zero() {
        tracing::warn!("Snapshot periódico desligado (SNAPSHOT_INTERVAL_SECS=0)");
        None
    } else {
        Some(spawn_snapshot_task(
            app_state.store.clone(),
            config.data_file.clone(),
            config.snapshot_interval,
        ))
    };

    let app = app(app_state.clone());

    let listener = TcpListener::bind(&config.bind_addr)
        .await
        .expect("Falha ao iniciar o listener TCP");
    tracing::info!("🚀 Servidor escutando em {}", config.bind_addr);
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .expect("Erro no servidor Axum");

    // Último snapshot antes de sair
    if let Some(task) = snapshot_task {
        task.abort();
    }
    match app_state.store.save(&config.data_file).await {
        Ok(()) => tracing::info!("💾 Snapshot final gravado em {}", config.data_file.display()),
        Err(e) => tracing::error!("🔥 Falha ao gravar snapshot final: {:?}", e),
    }
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Falha ao escutar Ctrl+C: {}", e);
    }
    tracing::info!("Encerrando...");
}

fn app(app_state: AppState) -> Router {
    // Rotas de usuário (protegidas pelo middleware)
    let user_routes = Router::new()
        .route("/me", get(handlers::auth::get_me))
        .layer(axum_middleware::from_fn_with_state(
            app_state.clone(),
            auth_guard,
        ));

    let onboarding_routes = Router::new()
        .route("/", post(handlers::onboarding::start_onboarding))
        .route("/{id}", get(handlers::onboarding::get_onboarding))
        .route("/{id}/actions", post(handlers::onboarding::dispatch_action))
        .route(
            "/{id}/dashboard/{mode}/{view}",
            get(handlers::onboarding::preview_dashboard),
        )
        .route("/{id}/finalize", post(handlers::onboarding::finalize_onboarding));

    // Mesmos caminhos do backend mockado do front-end
    let cap_table_routes = Router::new()
        .route("/signin", post(handlers::auth::sign_in))
        .route("/user/new", post(handlers::auth::create_user))
        .route("/company", get(handlers::company::get_company))
        .route("/company/new", post(handlers::company::create_company))
        .route("/value", get(handlers::company::get_value))
        .route("/value/new", post(handlers::company::update_value))
        .route("/shareholders", get(handlers::shareholders::list_shareholders))
        .route("/shareholder/new", post(handlers::shareholders::create_shareholder))
        .route("/shareholder/{id}", get(handlers::shareholders::get_shareholder))
        .route("/shareholder/{id}/edit", post(handlers::shareholders::edit_shareholder))
        .route("/grants", get(handlers::grants::list_grants))
        .route("/grant/new", post(handlers::grants::create_grant))
        .route("/dashboard/{mode}/{view}", get(handlers::dashboard::get_dashboard));

    Router::new()
        .route("/api/health", get(|| async { "OK" }))
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
        .nest("/api", cap_table_routes)
        .nest("/api/users", user_routes)
        .nest("/api/onboarding", onboarding_routes)
        .with_state(app_state)
}
