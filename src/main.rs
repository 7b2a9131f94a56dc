//src/main.rs

use axum::{
    routing::{get, post, put},
    Router,
};
use tokio::net::TcpListener;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

// Declaração dos nossos módulos
mod common;
mod config;
mod db;
mod docs;
mod handlers;
mod models;
mod services;

use crate::config::AppState;
use crate::docs::ApiDoc;

#[tokio::main]
async fn main() {
    // Inicializa o logger
    tracing_subscriber::fmt().with_target(false).compact().init();

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

    // Cadastro de clientes e fornecedores
    let clientes_routes = Router::new()
        .route(
            "/",
            post(handlers::clientes::criar_cliente).get(handlers::clientes::listar_clientes),
        )
        .route("/{id}", get(handlers::clientes::buscar_cliente));

    // Ordens de serviço: cadastro, ciclo de vida e leituras derivadas
    let ordens_routes = Router::new()
        .route(
            "/",
            post(handlers::ordens::criar_ordem).get(handlers::ordens::listar_ordens),
        )
        .route(
            "/{id}",
            get(handlers::ordens::detalhar_ordem)
                .put(handlers::ordens::atualizar_ordem)
                .delete(handlers::ordens::excluir_ordem),
        )
        .route("/{id}/status", put(handlers::ordens::mudar_status))
        .route("/{id}/financeiro", put(handlers::ordens::mudar_financeiro))
        .route("/{id}/resumo", get(handlers::ordens::resumo_ordem))
        .route("/{id}/linha-do-tempo", get(handlers::ordens::linha_do_tempo))
        .route("/{id}/clonar", post(handlers::ordens::clonar_ordem));

    // Combina tudo no router principal
    let app = Router::new()
        .route("/api/health", get(|| async { "OK" }))
        .nest("/api/clientes", clientes_routes)
        .nest("/api/ordens", ordens_routes)
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
        .with_state(app_state);

    // Inicia o servidor
    let addr = "0.0.0.0:3000";
    let listener = TcpListener::bind(addr)
        .await
        .expect("Falha ao iniciar o listener TCP");
    tracing::info!("🚀 Servidor escutando em {}", listener.local_addr().unwrap());
    axum::serve(listener, app).await.expect("Erro no servidor Axum");
}
