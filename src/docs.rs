// src/docs.rs

use utoipa::OpenApi;

use crate::handlers;
use crate::models;

#[derive(OpenApi)]
#[openapi(
    paths(
        // --- Clientes ---
        handlers::clientes::criar_cliente,
        handlers::clientes::listar_clientes,
        handlers::clientes::buscar_cliente,

        // --- Ordens de Serviço ---
        handlers::ordens::criar_ordem,
        handlers::ordens::listar_ordens,
        handlers::ordens::detalhar_ordem,
        handlers::ordens::atualizar_ordem,
        handlers::ordens::excluir_ordem,
        handlers::ordens::mudar_status,
        handlers::ordens::mudar_financeiro,
        handlers::ordens::resumo_ordem,
        handlers::ordens::linha_do_tempo,
        handlers::ordens::clonar_ordem,
    ),
    components(
        schemas(
            models::cliente::Cliente,
            models::cliente::TipoCadastro,
            models::cliente::NovoClientePayload,
            models::ordem::OrdemServico,
            models::ordem::OrdemDetalhe,
            models::ordem::ItemServico,
            models::ordem::StatusOrdem,
            models::ordem::StatusFinanceiro,
            models::ordem::ResumoFinanceiro,
            models::ordem::EventoLinhaTempo,
            models::ordem::NovaOrdemPayload,
            models::ordem::AtualizarOrdemPayload,
            models::ordem::MudarStatusPayload,
            models::ordem::MudarFinanceiroPayload,
        )
    ),
    tags(
        (name = "Clientes", description = "Cadastro de clientes e fornecedores"),
        (name = "Ordens de Serviço", description = "Ciclo de vida e financeiro das ordens")
    ),
    info(
        title = "Oficina Backend",
        description = "API de ordens de serviço para assistência técnica",
        version = "0.1.0"
    )
)]
pub struct ApiDoc;
