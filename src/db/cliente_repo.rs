// src/db/cliente_repo.rs

use sqlx::PgPool;
use uuid::Uuid;

use crate::{
    common::error::AppError,
    models::cliente::{Cliente, NovoClientePayload, TipoCadastro},
};

const COLUNAS: &str = r#"
    id, nome, tipo, documento, telefone, email, endereco,
    criado_em, atualizado_em
"#;

#[derive(Clone)]
pub struct ClienteRepository {
    pool: PgPool,
}

impl ClienteRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn criar(&self, payload: &NovoClientePayload) -> Result<Cliente, AppError> {
        let sql = format!(
            r#"
            INSERT INTO clientes (nome, tipo, documento, telefone, email, endereco)
            VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING {COLUNAS}
            "#
        );

        let cliente = sqlx::query_as::<_, Cliente>(&sql)
            .bind(&payload.nome)
            .bind(payload.tipo.unwrap_or(TipoCadastro::Cliente))
            .bind(&payload.documento)
            .bind(&payload.telefone)
            .bind(&payload.email)
            .bind(&payload.endereco)
            .fetch_one(&self.pool)
            .await?;

        Ok(cliente)
    }

    pub async fn listar(&self) -> Result<Vec<Cliente>, AppError> {
        let sql = format!("SELECT {COLUNAS} FROM clientes ORDER BY nome ASC");

        let clientes = sqlx::query_as::<_, Cliente>(&sql)
            .fetch_all(&self.pool)
            .await?;

        Ok(clientes)
    }

    pub async fn buscar(&self, id: Uuid) -> Result<Cliente, AppError> {
        let sql = format!("SELECT {COLUNAS} FROM clientes WHERE id = $1");

        let cliente = sqlx::query_as::<_, Cliente>(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        cliente.ok_or_else(|| AppError::ResourceNotFound(format!("Cliente {}", id)))
    }
}
