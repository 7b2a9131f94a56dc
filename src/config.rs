// src/config.rs

use sqlx::{postgres::PgPoolOptions, PgPool};
use std::{env, time::Duration};

use crate::{
    db::{ClienteRepository, OrdemRepository},
    services::{ClienteService, OrdemService},
};

#[derive(Clone)]
pub struct AppState {
    pub db_pool: PgPool,
    pub ordem_service: OrdemService,
    pub cliente_service: ClienteService,
}

impl AppState {
    pub async fn new() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();

        let database_url = env::var("DATABASE_URL").expect("DATABASE_URL deve ser definida");

        // Conecta ao banco de dados, usando '?' para propagar erros
        let db_pool = PgPoolOptions::new()
            .max_connections(5)
            .acquire_timeout(Duration::from_secs(3))
            .connect(&database_url)
            .await?;

        tracing::info!("✅ Conexão com o banco de dados estabelecida com sucesso!");

        // --- Monta o gráfico de dependências ---
        let ordem_repo = OrdemRepository::new(db_pool.clone());
        let ordem_service = OrdemService::new(ordem_repo);

        let cliente_repo = ClienteRepository::new(db_pool.clone());
        let cliente_service = ClienteService::new(cliente_repo);

        Ok(Self {
            db_pool,
            ordem_service,
            cliente_service,
        })
    }
}
