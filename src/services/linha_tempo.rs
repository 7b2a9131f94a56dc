// src/services/linha_tempo.rs
//
// Reconstrói a linha do tempo da ordem a partir das datas gravadas.
// Leitura pura: nunca altera a ordem, e duas chamadas seguidas sobre o
// mesmo registro produzem a mesma sequência.

use chrono::{DateTime, Utc};

use crate::models::ordem::{EventoLinhaTempo, OrdemServico, StatusOrdem};
use crate::services::calculo;

/// Dias corridos entre dois instantes, arredondando para cima.
/// Qualquer fração de dia conta como um dia inteiro.
pub fn dias_corridos(inicio: DateTime<Utc>, fim: DateTime<Utc>) -> i64 {
    let segundos = (fim - inicio).num_seconds();
    if segundos <= 0 {
        return 0;
    }
    (segundos + 86_399) / 86_400
}

pub fn montar_linha_tempo(ordem: &OrdemServico) -> Vec<EventoLinhaTempo> {
    let resumo = calculo::resumo_da_ordem(ordem);
    let mut eventos = Vec::new();

    // 1. Entrada: sempre presente
    eventos.push(EventoLinhaTempo {
        titulo: "Entrada".to_string(),
        data: Some(ordem.data_entrada),
        descricao: format!("Ordem nº {} registrada na oficina.", ordem.numero),
    });

    // 2. Aprovação do orçamento
    if let Some(aprovacao) = ordem.data_aprovacao {
        let dias = dias_corridos(ordem.data_entrada, aprovacao);
        eventos.push(EventoLinhaTempo {
            titulo: "Aprovação".to_string(),
            data: Some(aprovacao),
            descricao: format!("Orçamento aprovado {} dia(s) após a entrada.", dias),
        });
    }

    // 3. Marco de "pronto": só enquanto a ordem estiver nesse status.
    // O total exibido é o atual, não o do momento da mudança.
    if ordem.status == StatusOrdem::Pronto {
        eventos.push(EventoLinhaTempo {
            titulo: "Pronto para entrega".to_string(),
            data: None,
            descricao: format!(
                "{} item(ns) de serviço, total atual de R$ {:.2}.",
                ordem.servicos.len(),
                resumo.total_final
            ),
        });
    }

    // 4. Entrega
    if let Some(entrega) = ordem.data_entrega {
        let dias = dias_corridos(ordem.data_entrada, entrega);
        eventos.push(EventoLinhaTempo {
            titulo: "Entrega".to_string(),
            data: Some(entrega),
            descricao: format!("Equipamento entregue {} dia(s) após a entrada.", dias),
        });
    }

    // 5. Retrato financeiro: sempre presente, calculado na hora
    eventos.push(EventoLinhaTempo {
        titulo: "Situação financeira".to_string(),
        data: None,
        descricao: format!(
            "Serviços R$ {:.2}, descontos R$ {:.2}, acréscimos R$ {:.2}, total R$ {:.2}.",
            resumo.soma_servicos,
            resumo.total_descontos + resumo.desconto_percentual_valor,
            resumo.total_acrescimos + resumo.acrescimo_percentual_valor,
            resumo.total_final
        ),
    });

    eventos
}
