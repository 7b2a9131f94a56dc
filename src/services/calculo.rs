// src/services/calculo.rs
//
// Motor de cálculo financeiro da ordem. Tudo aqui é puro e síncrono:
// recebe dados, devolve dados, nunca toca banco ou rede.

use rust_decimal::Decimal;
use serde_json::Value;
use std::str::FromStr;

use crate::models::ordem::{ItemServico, OrdemServico, ResumoFinanceiro};

// =============================================================================
//  NORMALIZADOR DECIMAL
// =============================================================================

/// Converte qualquer representação numérica vinda da persistência em um
/// `Decimal`. Registros antigos trazem número puro, string com vírgula
/// ou o objeto {"$numberDecimal": "..."} do banco anterior.
///
/// Entrada ausente ou ilegível vira zero. Nunca retorna erro, para que
/// toda a aritmética abaixo seja total.
pub fn normalizar(valor: &Value) -> Decimal {
    match valor {
        Value::Number(n) => parse_texto(&n.to_string()),
        Value::String(s) => parse_texto(s),
        Value::Object(campos) => campos
            .get("$numberDecimal")
            .map(normalizar)
            .unwrap_or(Decimal::ZERO),
        _ => Decimal::ZERO,
    }
}

fn parse_texto(texto: &str) -> Decimal {
    let limpo = texto.trim();
    // "1.234,56" -> "1234.56"
    let canonico = if limpo.contains(',') {
        limpo.replace('.', "").replace(',', ".")
    } else {
        limpo.to_string()
    };
    Decimal::from_str(&canonico)
        .or_else(|_| Decimal::from_scientific(&canonico))
        .unwrap_or(Decimal::ZERO)
}

// =============================================================================
//  CÁLCULO POR ITEM
// =============================================================================

/// Total de uma linha: quantidade × valor unitário − desconto + acréscimo.
///
/// Quantidade zero ou negativa é calculada normalmente (barrar isso é
/// papel da validação de entrada). Resultado negativo é permitido e
/// propaga sem arredondar para zero.
pub fn total_item(item: &ItemServico) -> Decimal {
    item.quantidade * item.valor_unitario - item.desconto + item.acrescimo
}

// =============================================================================
//  CÁLCULO DA ORDEM
// =============================================================================

/// Monta o demonstrativo financeiro completo da ordem.
///
/// A sequência das operações é fixa: mudar a ordem muda totais já
/// faturados em registros existentes.
pub fn calcular_resumo(
    servicos: &[ItemServico],
    desconto_percentual: Decimal,
    acrescimo_percentual: Decimal,
) -> ResumoFinanceiro {
    let soma_servicos: Decimal = servicos.iter().map(total_item).sum();

    // Linhas de detalhamento exibidas no demonstrativo
    let total_descontos: Decimal = servicos.iter().map(|s| s.desconto).sum();
    let total_acrescimos: Decimal = servicos.iter().map(|s| s.acrescimo).sum();

    let desconto_percentual_valor = soma_servicos * desconto_percentual / Decimal::ONE_HUNDRED;
    let acrescimo_percentual_valor = soma_servicos * acrescimo_percentual / Decimal::ONE_HUNDRED;

    // ATENÇÃO: o desconto e o acréscimo por item entram DUAS vezes no
    // total — uma dentro de cada `total_item`, outra aqui como somas
    // absolutas. Os registros históricos foram faturados assim; ver
    // DESIGN.md antes de qualquer "correção".
    let total_final = soma_servicos - total_descontos - desconto_percentual_valor
        + total_acrescimos
        + acrescimo_percentual_valor;

    ResumoFinanceiro {
        soma_servicos,
        total_descontos,
        total_acrescimos,
        desconto_percentual_valor,
        acrescimo_percentual_valor,
        total_final,
    }
}

/// Atalho para calcular o resumo direto de uma ordem carregada.
pub fn resumo_da_ordem(ordem: &OrdemServico) -> ResumoFinanceiro {
    calcular_resumo(
        &ordem.servicos,
        ordem.desconto_percentual,
        ordem.acrescimo_percentual,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn dec(texto: &str) -> Decimal {
        Decimal::from_str(texto).unwrap()
    }

    fn item(quantidade: &str, valor: &str, desconto: &str, acrescimo: &str) -> ItemServico {
        ItemServico {
            descricao: "serviço".to_string(),
            quantidade: dec(quantidade),
            valor_unitario: dec(valor),
            desconto: dec(desconto),
            acrescimo: dec(acrescimo),
        }
    }

    #[test]
    fn normalizar_aceita_formatos_variados() {
        assert_eq!(normalizar(&Value::Null), Decimal::ZERO);
        assert_eq!(normalizar(&json!(12.5)), dec("12.5"));
        assert_eq!(normalizar(&json!(-3)), dec("-3"));
        assert_eq!(normalizar(&json!("12.5")), dec("12.5"));
        assert_eq!(normalizar(&json!("12,5")), dec("12.5"));
        assert_eq!(normalizar(&json!("1.234,56")), dec("1234.56"));
        assert_eq!(normalizar(&json!({"$numberDecimal": "150.75"})), dec("150.75"));
    }

    #[test]
    fn normalizar_nunca_falha_com_entrada_ilegivel() {
        assert_eq!(normalizar(&json!("abc")), Decimal::ZERO);
        assert_eq!(normalizar(&json!(true)), Decimal::ZERO);
        assert_eq!(normalizar(&json!([1, 2])), Decimal::ZERO);
        assert_eq!(normalizar(&json!({"outraChave": 10})), Decimal::ZERO);
        assert_eq!(normalizar(&json!("")), Decimal::ZERO);
    }

    #[test]
    fn item_servico_desserializa_numeros_heterogeneos() {
        let bruto = json!({
            "descricao": "Troca de tela",
            "quantidade": "2",
            "valorUnitario": {"$numberDecimal": "100.00"},
            "desconto": "10,50"
        });
        let item: ItemServico = serde_json::from_value(bruto).unwrap();
        assert_eq!(item.quantidade, dec("2"));
        assert_eq!(item.valor_unitario, dec("100.00"));
        assert_eq!(item.desconto, dec("10.50"));
        // Campo ausente vale zero
        assert_eq!(item.acrescimo, Decimal::ZERO);
    }

    #[test]
    fn total_item_permite_resultado_negativo() {
        // Desconto maior que o valor: o sinal propaga sem ajuste
        let i = item("1", "30", "50", "0");
        assert_eq!(total_item(&i), dec("-20"));

        let resumo = calcular_resumo(&[i], Decimal::ZERO, Decimal::ZERO);
        assert_eq!(resumo.soma_servicos, dec("-20"));
    }

    #[test]
    fn soma_independe_da_ordem_dos_itens() {
        let a = item("2", "100", "5", "0");
        let b = item("1", "50", "0", "10");
        let c = item("3", "33.33", "0", "0");

        let direto = calcular_resumo(&[a.clone(), b.clone(), c.clone()], dec("10"), dec("5"));
        let invertido = calcular_resumo(&[c, b, a], dec("10"), dec("5"));
        assert_eq!(direto, invertido);
    }

    #[test]
    fn resumo_e_idempotente() {
        let servicos = vec![item("2", "100", "0", "0"), item("1", "45.90", "5", "2")];
        let primeiro = calcular_resumo(&servicos, dec("10"), dec("3"));
        let segundo = calcular_resumo(&servicos, dec("10"), dec("3"));
        assert_eq!(primeiro, segundo);
    }

    #[test]
    fn desconto_percentual_sobre_soma_dos_itens() {
        // 2 × 100 com 10% de desconto da ordem
        let resumo = calcular_resumo(&[item("2", "100", "0", "0")], dec("10"), Decimal::ZERO);
        assert_eq!(resumo.soma_servicos, dec("200"));
        assert_eq!(resumo.desconto_percentual_valor, dec("20"));
        assert_eq!(resumo.total_final, dec("180"));
    }

    // Regressão: o desconto do item entra no total duas vezes (dentro do
    // total do item e de novo como soma absoluta). Comportamento herdado
    // do faturamento existente; este teste impede "correções" silenciosas.
    #[test]
    fn servico_com_desconto_e_acrescimo_entra_duas_vezes() {
        let resumo = calcular_resumo(&[item("1", "50", "10", "5")], Decimal::ZERO, Decimal::ZERO);
        assert_eq!(resumo.soma_servicos, dec("45")); // 50 − 10 + 5
        assert_eq!(resumo.total_descontos, dec("10"));
        assert_eq!(resumo.total_acrescimos, dec("5"));
        // 45 − 10 − 0 + 5 + 0
        assert_eq!(resumo.total_final, dec("40"));
    }

    #[test]
    fn ordem_sem_servicos_zera_tudo() {
        let resumo = calcular_resumo(&[], dec("10"), dec("10"));
        assert_eq!(resumo.soma_servicos, Decimal::ZERO);
        assert_eq!(resumo.total_final, Decimal::ZERO);
    }
}
