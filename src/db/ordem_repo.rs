// src/db/ordem_repo.rs

use sqlx::types::Json;
use sqlx::PgPool;
use uuid::Uuid;

use crate::{
    common::error::AppError,
    models::ordem::{
        AtualizarOrdemPayload, NovaOrdemPayload, OrdemServico, StatusFinanceiro, StatusOrdem,
    },
    services::status::DatasCiclo,
};

// Lista única de colunas devolvidas, para todo SELECT/RETURNING bater
// com a struct OrdemServico.
const COLUNAS: &str = r#"
    id, numero, cliente_id,
    equipamento, marca, modelo, numero_serie, defeito_relatado,
    observacoes, forma_pagamento,
    servicos, desconto_percentual, acrescimo_percentual,
    status, financeiro,
    data_entrada, data_aprovacao, previsao_entrega, data_entrega,
    criado_em, atualizado_em
"#;

#[derive(Clone)]
pub struct OrdemRepository {
    pool: PgPool,
}

impl OrdemRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Insere a ordem com os padrões do banco: número vem da sequence,
    /// status `confirmar`, financeiro `em_aberto`, entrada de agora.
    pub async fn criar(&self, payload: &NovaOrdemPayload) -> Result<OrdemServico, AppError> {
        let sql = format!(
            r#"
            INSERT INTO ordens_servico (
                cliente_id, equipamento, marca, modelo, numero_serie,
                defeito_relatado, observacoes, forma_pagamento,
                servicos, desconto_percentual, acrescimo_percentual
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11)
            RETURNING {COLUNAS}
            "#
        );

        let ordem = sqlx::query_as::<_, OrdemServico>(&sql)
            .bind(payload.cliente_id)
            .bind(&payload.equipamento)
            .bind(&payload.marca)
            .bind(&payload.modelo)
            .bind(&payload.numero_serie)
            .bind(&payload.defeito_relatado)
            .bind(&payload.observacoes)
            .bind(&payload.forma_pagamento)
            .bind(Json(&payload.servicos))
            .bind(payload.desconto_percentual)
            .bind(payload.acrescimo_percentual)
            .fetch_one(&self.pool)
            .await?;

        Ok(ordem)
    }

    pub async fn listar(&self) -> Result<Vec<OrdemServico>, AppError> {
        let sql = format!("SELECT {COLUNAS} FROM ordens_servico ORDER BY numero DESC");

        let ordens = sqlx::query_as::<_, OrdemServico>(&sql)
            .fetch_all(&self.pool)
            .await?;

        Ok(ordens)
    }

    pub async fn buscar(&self, id: Uuid) -> Result<OrdemServico, AppError> {
        let sql = format!("SELECT {COLUNAS} FROM ordens_servico WHERE id = $1");

        let ordem = sqlx::query_as::<_, OrdemServico>(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        ordem.ok_or_else(|| AppError::ResourceNotFound(format!("Ordem {}", id)))
    }

    /// Edição de cadastro: equipamento, cliente, itens, percentuais,
    /// observações e previsão de entrega. Status e datas derivadas não
    /// passam por aqui.
    pub async fn atualizar(
        &self,
        id: Uuid,
        payload: &AtualizarOrdemPayload,
    ) -> Result<OrdemServico, AppError> {
        let sql = format!(
            r#"
            UPDATE ordens_servico
            SET cliente_id = $1,
                equipamento = $2,
                marca = $3,
                modelo = $4,
                numero_serie = $5,
                defeito_relatado = $6,
                observacoes = $7,
                forma_pagamento = $8,
                servicos = $9,
                desconto_percentual = $10,
                acrescimo_percentual = $11,
                previsao_entrega = $12,
                atualizado_em = NOW()
            WHERE id = $13
            RETURNING {COLUNAS}
            "#
        );

        let ordem = sqlx::query_as::<_, OrdemServico>(&sql)
            .bind(payload.cliente_id)
            .bind(&payload.equipamento)
            .bind(&payload.marca)
            .bind(&payload.modelo)
            .bind(&payload.numero_serie)
            .bind(&payload.defeito_relatado)
            .bind(&payload.observacoes)
            .bind(&payload.forma_pagamento)
            .bind(Json(&payload.servicos))
            .bind(payload.desconto_percentual)
            .bind(payload.acrescimo_percentual)
            .bind(payload.previsao_entrega)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        ordem.ok_or_else(|| AppError::ResourceNotFound(format!("Ordem {}", id)))
    }

    /// Aplica status + datas derivadas como um único UPDATE atômico.
    /// Não há verificação de versão: dois editores simultâneos se
    /// sobrescrevem em silêncio.
    pub async fn atualizar_status(
        &self,
        id: Uuid,
        status: StatusOrdem,
        datas: &DatasCiclo,
    ) -> Result<OrdemServico, AppError> {
        let sql = format!(
            r#"
            UPDATE ordens_servico
            SET status = $1,
                data_aprovacao = $2,
                previsao_entrega = $3,
                data_entrega = $4,
                atualizado_em = NOW()
            WHERE id = $5
            RETURNING {COLUNAS}
            "#
        );

        let ordem = sqlx::query_as::<_, OrdemServico>(&sql)
            .bind(status)
            .bind(datas.data_aprovacao)
            .bind(datas.previsao_entrega)
            .bind(datas.data_entrega)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        ordem.ok_or_else(|| AppError::ResourceNotFound(format!("Ordem {}", id)))
    }

    pub async fn atualizar_financeiro(
        &self,
        id: Uuid,
        financeiro: StatusFinanceiro,
    ) -> Result<OrdemServico, AppError> {
        let sql = format!(
            r#"
            UPDATE ordens_servico
            SET financeiro = $1, atualizado_em = NOW()
            WHERE id = $2
            RETURNING {COLUNAS}
            "#
        );

        let ordem = sqlx::query_as::<_, OrdemServico>(&sql)
            .bind(financeiro)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        ordem.ok_or_else(|| AppError::ResourceNotFound(format!("Ordem {}", id)))
    }

    pub async fn excluir(&self, id: Uuid) -> Result<(), AppError> {
        let resultado = sqlx::query("DELETE FROM ordens_servico WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        if resultado.rows_affected() == 0 {
            return Err(AppError::ResourceNotFound(format!("Ordem {}", id)));
        }

        Ok(())
    }
}
