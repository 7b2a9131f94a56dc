// src/models/ordem.rs

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;
use sqlx::FromRow;
use sqlx::types::Json;
use utoipa::ToSchema;
use uuid::Uuid;
use validator::{Validate, ValidationError};

use crate::services::calculo;

// --- Enums (Mapeando o Postgres) ---

/// Situação técnica da ordem dentro da oficina.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type, ToSchema)]
#[sqlx(type_name = "status_ordem", rename_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum StatusOrdem {
    Confirmar, // Aguardando confirmação do orçamento
    Aprovado,
    Pronto,
    Entregue,
    Reprovado,
}

/// Situação de cobrança, independente da situação técnica.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type, ToSchema)]
#[sqlx(type_name = "status_financeiro", rename_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum StatusFinanceiro {
    EmAberto,
    Pago,
    ParcialmentePago,
    Deve,
    Faturado,
    Vencido,
    Cancelado,
}

// --- Structs ---

/// Uma linha cobrável da ordem (mão de obra ou peça).
///
/// Os campos numéricos de registros antigos chegam em formatos variados
/// (número, string com vírgula, objeto {"$numberDecimal": "..."}); a
/// desserialização passa tudo pelo normalizador.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ItemServico {
    #[serde(default)]
    #[schema(example = "Troca de tela")]
    pub descricao: String,

    #[serde(default, deserialize_with = "de_valor_flexivel")]
    #[schema(value_type = f64, example = 1.0)]
    pub quantidade: Decimal,

    #[serde(default, deserialize_with = "de_valor_flexivel")]
    #[schema(value_type = f64, example = 250.00)]
    pub valor_unitario: Decimal,

    #[serde(default, deserialize_with = "de_valor_flexivel")]
    #[schema(value_type = f64, example = 0.0)]
    pub desconto: Decimal,

    #[serde(default, deserialize_with = "de_valor_flexivel")]
    #[schema(value_type = f64, example = 0.0)]
    pub acrescimo: Decimal,
}

/// Aceita qualquer representação numérica vinda da persistência.
fn de_valor_flexivel<'de, D>(deserializer: D) -> Result<Decimal, D::Error>
where
    D: Deserializer<'de>,
{
    let bruto = Value::deserialize(deserializer)?;
    Ok(calculo::normalizar(&bruto))
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct OrdemServico {
    pub id: Uuid,

    // Número sequencial visível ao cliente, gerado pelo banco
    #[schema(example = 1024)]
    pub numero: i32,

    pub cliente_id: Option<Uuid>,

    // Dados do equipamento recebido
    #[schema(example = "Notebook")]
    pub equipamento: Option<String>,
    #[schema(example = "Acme")]
    pub marca: Option<String>,
    #[schema(example = "XPS-13")]
    pub modelo: Option<String>,
    pub numero_serie: Option<String>,
    #[schema(example = "Não liga")]
    pub defeito_relatado: Option<String>,
    pub observacoes: Option<String>,
    #[schema(example = "PIX")]
    pub forma_pagamento: Option<String>,

    // Itens na ordem de exibição; a posição é a única identidade
    #[schema(value_type = Vec<ItemServico>)]
    pub servicos: Json<Vec<ItemServico>>,

    #[schema(value_type = f64, example = 10.0)]
    pub desconto_percentual: Decimal,
    #[schema(value_type = f64, example = 0.0)]
    pub acrescimo_percentual: Decimal,

    pub status: StatusOrdem,
    pub financeiro: StatusFinanceiro,

    pub data_entrada: DateTime<Utc>,
    pub data_aprovacao: Option<DateTime<Utc>>,
    #[schema(value_type = String, format = Date, example = "2025-09-30")]
    pub previsao_entrega: Option<NaiveDate>,
    pub data_entrega: Option<DateTime<Utc>>,

    pub criado_em: DateTime<Utc>,
    pub atualizado_em: DateTime<Utc>,
}

/// Demonstrativo financeiro da ordem. Sempre recalculado na leitura,
/// nunca gravado.
#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ResumoFinanceiro {
    #[schema(value_type = f64, example = 200.0)]
    pub soma_servicos: Decimal,
    #[schema(value_type = f64, example = 0.0)]
    pub total_descontos: Decimal,
    #[schema(value_type = f64, example = 0.0)]
    pub total_acrescimos: Decimal,
    #[schema(value_type = f64, example = 20.0)]
    pub desconto_percentual_valor: Decimal,
    #[schema(value_type = f64, example = 0.0)]
    pub acrescimo_percentual_valor: Decimal,
    #[schema(value_type = f64, example = 180.0)]
    pub total_final: Decimal,
}

#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct OrdemDetalhe {
    #[serde(flatten)]
    pub ordem: OrdemServico,
    pub resumo: ResumoFinanceiro,
}

/// Um ponto da linha do tempo da ordem. `data` vazia significa um marco
/// ainda pendente ou um resumo sem instante próprio.
#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct EventoLinhaTempo {
    #[schema(example = "Entrada")]
    pub titulo: String,
    pub data: Option<DateTime<Utc>>,
    #[schema(example = "Ordem nº 1024 registrada na oficina.")]
    pub descricao: String,
}

// --- Payloads ---

fn validar_percentual(valor: &Decimal) -> Result<(), ValidationError> {
    if *valor < Decimal::ZERO || *valor > Decimal::ONE_HUNDRED {
        return Err(ValidationError::new("percentual_fora_da_faixa"));
    }
    Ok(())
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct NovaOrdemPayload {
    pub cliente_id: Option<Uuid>,

    #[schema(example = "Notebook")]
    pub equipamento: Option<String>,
    pub marca: Option<String>,
    pub modelo: Option<String>,
    pub numero_serie: Option<String>,
    #[schema(example = "Não liga")]
    pub defeito_relatado: Option<String>,
    pub observacoes: Option<String>,
    pub forma_pagamento: Option<String>,

    #[serde(default)]
    pub servicos: Vec<ItemServico>,

    #[serde(default)]
    #[validate(custom(function = validar_percentual, message = "O percentual deve estar entre 0 e 100"))]
    #[schema(value_type = f64, example = 0.0)]
    pub desconto_percentual: Decimal,

    #[serde(default)]
    #[validate(custom(function = validar_percentual, message = "O percentual deve estar entre 0 e 100"))]
    #[schema(value_type = f64, example = 0.0)]
    pub acrescimo_percentual: Decimal,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AtualizarOrdemPayload {
    pub cliente_id: Option<Uuid>,

    pub equipamento: Option<String>,
    pub marca: Option<String>,
    pub modelo: Option<String>,
    pub numero_serie: Option<String>,
    pub defeito_relatado: Option<String>,
    pub observacoes: Option<String>,
    pub forma_pagamento: Option<String>,

    #[serde(default)]
    pub servicos: Vec<ItemServico>,

    #[serde(default)]
    #[validate(custom(function = validar_percentual, message = "O percentual deve estar entre 0 e 100"))]
    #[schema(value_type = f64, example = 0.0)]
    pub desconto_percentual: Decimal,

    #[serde(default)]
    #[validate(custom(function = validar_percentual, message = "O percentual deve estar entre 0 e 100"))]
    #[schema(value_type = f64, example = 0.0)]
    pub acrescimo_percentual: Decimal,

    #[schema(value_type = String, format = Date, example = "2025-09-30")]
    pub previsao_entrega: Option<NaiveDate>,
}

#[derive(Debug, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct MudarStatusPayload {
    pub status: StatusOrdem,
}

#[derive(Debug, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct MudarFinanceiroPayload {
    pub financeiro: StatusFinanceiro,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    // Os valores de fio são os mesmos gravados no tipo enum do Postgres;
    // mudar um deles quebra registros existentes.
    #[test]
    fn status_serializam_nos_valores_gravados() {
        assert_eq!(
            serde_json::to_value(StatusOrdem::Confirmar).unwrap(),
            json!("confirmar")
        );
        assert_eq!(
            serde_json::to_value(StatusOrdem::Reprovado).unwrap(),
            json!("reprovado")
        );
        assert_eq!(
            serde_json::to_value(StatusFinanceiro::EmAberto).unwrap(),
            json!("em_aberto")
        );
        assert_eq!(
            serde_json::to_value(StatusFinanceiro::ParcialmentePago).unwrap(),
            json!("parcialmente_pago")
        );
    }

    // Valor desconhecido é barrado na desserialização: o motor de
    // transições só recebe enum bem tipado.
    #[test]
    fn status_desconhecido_e_rejeitado_na_borda() {
        let erro = serde_json::from_value::<MudarStatusPayload>(json!({"status": "perdido"}));
        assert!(erro.is_err());

        let erro = serde_json::from_value::<MudarFinanceiroPayload>(json!({"financeiro": "???"}));
        assert!(erro.is_err());
    }
}
