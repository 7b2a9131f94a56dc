// src/models/cliente.rs

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

// --- Enums (Mapeando o Postgres) ---

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type, ToSchema)]
#[sqlx(type_name = "tipo_cadastro", rename_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum TipoCadastro {
    Cliente,
    Fornecedor,
}

// --- Structs ---

#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Cliente {
    #[schema(example = "550e8400-e29b-41d4-a716-446655440000")]
    pub id: Uuid,

    #[schema(example = "Maria da Silva")]
    pub nome: String,

    pub tipo: TipoCadastro,

    #[schema(example = "123.456.789-00")]
    pub documento: Option<String>,

    #[schema(example = "(11) 99999-0000")]
    pub telefone: Option<String>,

    #[schema(example = "maria@exemplo.com.br")]
    pub email: Option<String>,

    // Endereço flexível: o frontend manda um JSON, guardamos como JSONB
    #[schema(value_type = Object)]
    pub endereco: Option<Value>,

    pub criado_em: DateTime<Utc>,
    pub atualizado_em: DateTime<Utc>,
}

// --- Payloads ---

#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct NovoClientePayload {
    #[validate(length(min = 2, message = "O nome deve ter no mínimo 2 caracteres"))]
    #[schema(example = "Maria da Silva")]
    pub nome: String,

    pub tipo: Option<TipoCadastro>,

    pub documento: Option<String>,
    pub telefone: Option<String>,

    #[validate(email(message = "E-mail inválido"))]
    pub email: Option<String>,

    #[schema(value_type = Object)]
    pub endereco: Option<Value>,
}
