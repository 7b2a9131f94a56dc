// src/services/ordem_service.rs

use chrono::Utc;
use uuid::Uuid;

use crate::{
    common::error::AppError,
    db::OrdemRepository,
    models::ordem::{
        AtualizarOrdemPayload, EventoLinhaTempo, MudarFinanceiroPayload, MudarStatusPayload,
        NovaOrdemPayload, OrdemDetalhe, OrdemServico, ResumoFinanceiro,
    },
    services::{calculo, linha_tempo, status, status::DatasCiclo},
};

/// Monta o payload de clonagem de uma ordem existente: copia equipamento,
/// cliente, itens, percentuais e forma de pagamento. Status, financeiro e
/// datas NÃO são copiados — a nova ordem nasce com os padrões
/// (`confirmar`, `em_aberto`, entrada de hoje) na inserção.
pub fn payload_clonagem(origem: &OrdemServico) -> NovaOrdemPayload {
    NovaOrdemPayload {
        cliente_id: origem.cliente_id,
        equipamento: origem.equipamento.clone(),
        marca: origem.marca.clone(),
        modelo: origem.modelo.clone(),
        numero_serie: origem.numero_serie.clone(),
        defeito_relatado: origem.defeito_relatado.clone(),
        observacoes: origem.observacoes.clone(),
        forma_pagamento: origem.forma_pagamento.clone(),
        servicos: origem.servicos.0.clone(),
        desconto_percentual: origem.desconto_percentual,
        acrescimo_percentual: origem.acrescimo_percentual,
    }
}

#[derive(Clone)]
pub struct OrdemService {
    repo: OrdemRepository,
}

impl OrdemService {
    pub fn new(repo: OrdemRepository) -> Self {
        Self { repo }
    }

    pub async fn criar(&self, payload: &NovaOrdemPayload) -> Result<OrdemServico, AppError> {
        self.repo.criar(payload).await
    }

    pub async fn listar(&self) -> Result<Vec<OrdemServico>, AppError> {
        self.repo.listar().await
    }

    /// Ordem + demonstrativo financeiro calculado na hora da leitura.
    pub async fn detalhar(&self, id: Uuid) -> Result<OrdemDetalhe, AppError> {
        let ordem = self.repo.buscar(id).await?;
        let resumo = calculo::resumo_da_ordem(&ordem);
        Ok(OrdemDetalhe { ordem, resumo })
    }

    pub async fn resumo(&self, id: Uuid) -> Result<ResumoFinanceiro, AppError> {
        let ordem = self.repo.buscar(id).await?;
        Ok(calculo::resumo_da_ordem(&ordem))
    }

    pub async fn atualizar(
        &self,
        id: Uuid,
        payload: &AtualizarOrdemPayload,
    ) -> Result<OrdemServico, AppError> {
        self.repo.atualizar(id, payload).await
    }

    /// Troca o status técnico e aplica as datas derivadas em um único
    /// UPDATE. Se o banco falhar, nada foi gravado e o erro sobe para o
    /// chamador; não há retry automático.
    pub async fn mudar_status(
        &self,
        id: Uuid,
        payload: &MudarStatusPayload,
    ) -> Result<OrdemServico, AppError> {
        let ordem = self.repo.buscar(id).await?;
        let datas = status::aplicar_transicao(
            ordem.status,
            payload.status,
            DatasCiclo::da_ordem(&ordem),
            Utc::now(),
        );
        self.repo.atualizar_status(id, payload.status, &datas).await
    }

    /// O financeiro é uma troca simples de valor: qualquer status para
    /// qualquer outro, sem datas derivadas.
    pub async fn mudar_financeiro(
        &self,
        id: Uuid,
        payload: &MudarFinanceiroPayload,
    ) -> Result<OrdemServico, AppError> {
        self.repo.atualizar_financeiro(id, payload.financeiro).await
    }

    pub async fn linha_do_tempo(&self, id: Uuid) -> Result<Vec<EventoLinhaTempo>, AppError> {
        let ordem = self.repo.buscar(id).await?;
        Ok(linha_tempo::montar_linha_tempo(&ordem))
    }

    pub async fn clonar(&self, id: Uuid) -> Result<OrdemServico, AppError> {
        let origem = self.repo.buscar(id).await?;
        let payload = payload_clonagem(&origem);
        self.repo.criar(&payload).await
    }

    /// Exclusão definitiva; não existe lixeira.
    pub async fn excluir(&self, id: Uuid) -> Result<(), AppError> {
        self.repo.excluir(id).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::ordem::{ItemServico, StatusFinanceiro, StatusOrdem};
    use chrono::TimeZone;
    use rust_decimal::Decimal;
    use sqlx::types::Json;

    fn ordem_entregue_e_paga() -> OrdemServico {
        let agora = Utc.with_ymd_and_hms(2024, 5, 1, 10, 0, 0).unwrap();
        OrdemServico {
            id: Uuid::new_v4(),
            numero: 77,
            cliente_id: Some(Uuid::new_v4()),
            equipamento: Some("Impressora".to_string()),
            marca: Some("Acme".to_string()),
            modelo: Some("LX-300".to_string()),
            numero_serie: Some("SN-0099".to_string()),
            defeito_relatado: Some("Puxando duas folhas".to_string()),
            observacoes: Some("Cliente antigo".to_string()),
            forma_pagamento: Some("PIX".to_string()),
            servicos: Json(vec![ItemServico {
                descricao: "Troca do tracionador".to_string(),
                quantidade: Decimal::ONE,
                valor_unitario: Decimal::from(120),
                desconto: Decimal::from(10),
                acrescimo: Decimal::ZERO,
            }]),
            desconto_percentual: Decimal::from(5),
            acrescimo_percentual: Decimal::ZERO,
            status: StatusOrdem::Entregue,
            financeiro: StatusFinanceiro::Pago,
            data_entrada: agora,
            data_aprovacao: Some(agora),
            previsao_entrega: None,
            data_entrega: Some(agora),
            criado_em: agora,
            atualizado_em: agora,
        }
    }

    #[test]
    fn clonagem_copia_equipamento_itens_e_percentuais() {
        let origem = ordem_entregue_e_paga();
        let payload = payload_clonagem(&origem);

        assert_eq!(payload.cliente_id, origem.cliente_id);
        assert_eq!(payload.equipamento, origem.equipamento);
        assert_eq!(payload.numero_serie, origem.numero_serie);
        assert_eq!(payload.forma_pagamento, origem.forma_pagamento);
        assert_eq!(payload.servicos, origem.servicos.0);
        assert_eq!(payload.desconto_percentual, origem.desconto_percentual);
        assert_eq!(payload.acrescimo_percentual, origem.acrescimo_percentual);
        // O payload não carrega status, financeiro nem datas: a nova
        // ordem nasce com os padrões do banco.
    }
}
