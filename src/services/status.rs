// src/services/status.rs
//
// Efeitos colaterais de uma mudança de status técnico. A troca em si não
// tem trava de transição: qualquer status pode ser atribuído a partir de
// qualquer outro. O que o motor garante são as datas derivadas, aplicadas
// junto com o status em um único UPDATE.

use chrono::{DateTime, NaiveDate, Utc};

use crate::models::ordem::{OrdemServico, StatusOrdem};

/// As três datas controladas pelo ciclo de vida. `data_entrada` fica de
/// fora: nasce com a ordem e nunca é limpa.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DatasCiclo {
    pub data_aprovacao: Option<DateTime<Utc>>,
    pub previsao_entrega: Option<NaiveDate>,
    pub data_entrega: Option<DateTime<Utc>>,
}

impl DatasCiclo {
    pub fn da_ordem(ordem: &OrdemServico) -> Self {
        Self {
            data_aprovacao: ordem.data_aprovacao,
            previsao_entrega: ordem.previsao_entrega,
            data_entrega: ordem.data_entrega,
        }
    }
}

/// Calcula as datas resultantes de uma transição de status.
///
/// - entrar em `aprovado` vindo de outro status carimba a aprovação;
/// - entrar em `entregue` vindo de outro status carimba a entrega;
/// - voltar para `confirmar` limpa as três datas, sempre;
/// - qualquer outra troca (inclusive repetir o mesmo status) não mexe
///   em data nenhuma.
pub fn aplicar_transicao(
    anterior: StatusOrdem,
    novo: StatusOrdem,
    datas: DatasCiclo,
    agora: DateTime<Utc>,
) -> DatasCiclo {
    match novo {
        StatusOrdem::Confirmar => DatasCiclo::default(),
        StatusOrdem::Aprovado if anterior != StatusOrdem::Aprovado => DatasCiclo {
            data_aprovacao: Some(agora),
            ..datas
        },
        StatusOrdem::Entregue if anterior != StatusOrdem::Entregue => DatasCiclo {
            data_entrega: Some(agora),
            ..datas
        },
        _ => datas,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use rstest::rstest;

    fn instante(ano: i32, mes: u32, dia: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(ano, mes, dia, 12, 0, 0).unwrap()
    }

    fn datas_preenchidas() -> DatasCiclo {
        DatasCiclo {
            data_aprovacao: Some(instante(2024, 1, 5)),
            previsao_entrega: NaiveDate::from_ymd_opt(2024, 1, 20),
            data_entrega: Some(instante(2024, 1, 18)),
        }
    }

    #[rstest]
    #[case(StatusOrdem::Aprovado)]
    #[case(StatusOrdem::Pronto)]
    #[case(StatusOrdem::Entregue)]
    #[case(StatusOrdem::Reprovado)]
    fn voltar_para_confirmar_limpa_todas_as_datas(#[case] anterior: StatusOrdem) {
        let resultado = aplicar_transicao(
            anterior,
            StatusOrdem::Confirmar,
            datas_preenchidas(),
            instante(2024, 2, 1),
        );
        assert_eq!(resultado, DatasCiclo::default());
    }

    #[rstest]
    #[case(StatusOrdem::Confirmar)]
    #[case(StatusOrdem::Pronto)]
    #[case(StatusOrdem::Entregue)]
    #[case(StatusOrdem::Reprovado)]
    fn entrar_em_aprovado_carimba_a_aprovacao(#[case] anterior: StatusOrdem) {
        let agora = instante(2024, 3, 10);
        let resultado =
            aplicar_transicao(anterior, StatusOrdem::Aprovado, DatasCiclo::default(), agora);
        assert_eq!(resultado.data_aprovacao, Some(agora));
        assert_eq!(resultado.data_entrega, None);
    }

    #[test]
    fn reafirmar_aprovado_nao_recarimba() {
        let originais = datas_preenchidas();
        let resultado = aplicar_transicao(
            StatusOrdem::Aprovado,
            StatusOrdem::Aprovado,
            originais.clone(),
            instante(2024, 6, 1),
        );
        assert_eq!(resultado, originais);
    }

    #[rstest]
    #[case(StatusOrdem::Confirmar)]
    #[case(StatusOrdem::Aprovado)]
    #[case(StatusOrdem::Pronto)]
    fn entrar_em_entregue_carimba_a_entrega(#[case] anterior: StatusOrdem) {
        let agora = instante(2024, 4, 2);
        let resultado =
            aplicar_transicao(anterior, StatusOrdem::Entregue, DatasCiclo::default(), agora);
        assert_eq!(resultado.data_entrega, Some(agora));
    }

    #[test]
    fn reafirmar_entregue_preserva_a_data_original() {
        let originais = datas_preenchidas();
        let resultado = aplicar_transicao(
            StatusOrdem::Entregue,
            StatusOrdem::Entregue,
            originais.clone(),
            instante(2024, 6, 1),
        );
        assert_eq!(resultado.data_entrega, originais.data_entrega);
    }

    #[rstest]
    #[case(StatusOrdem::Pronto)]
    #[case(StatusOrdem::Reprovado)]
    fn transicoes_sem_efeito_nao_mexem_nas_datas(#[case] novo: StatusOrdem) {
        let originais = datas_preenchidas();
        let resultado = aplicar_transicao(
            StatusOrdem::Aprovado,
            novo,
            originais.clone(),
            instante(2024, 6, 1),
        );
        assert_eq!(resultado, originais);
    }

    #[test]
    fn entregue_preserva_aprovacao_existente() {
        let aprovacao = instante(2024, 1, 5);
        let datas = DatasCiclo {
            data_aprovacao: Some(aprovacao),
            previsao_entrega: NaiveDate::from_ymd_opt(2024, 1, 20),
            data_entrega: None,
        };
        let resultado = aplicar_transicao(
            StatusOrdem::Pronto,
            StatusOrdem::Entregue,
            datas,
            instante(2024, 1, 18),
        );
        assert_eq!(resultado.data_aprovacao, Some(aprovacao));
        assert_eq!(resultado.previsao_entrega, NaiveDate::from_ymd_opt(2024, 1, 20));
    }
}
