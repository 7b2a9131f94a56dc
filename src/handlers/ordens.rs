// src/handlers/ordens.rs

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use uuid::Uuid;
use validator::Validate;

use crate::{
    common::error::AppError,
    config::AppState,
    models::ordem::{
        AtualizarOrdemPayload, EventoLinhaTempo, MudarFinanceiroPayload, MudarStatusPayload,
        NovaOrdemPayload, OrdemDetalhe, OrdemServico, ResumoFinanceiro,
    },
};

// =============================================================================
//  1. CADASTRO (CRIAR / LISTAR / DETALHAR / EDITAR / EXCLUIR)
// =============================================================================

// POST /api/ordens
#[utoipa::path(
    post,
    path = "/api/ordens",
    tag = "Ordens de Serviço",
    request_body = NovaOrdemPayload,
    responses(
        (status = 201, description = "Ordem criada aguardando confirmação", body = OrdemServico),
        (status = 400, description = "Dados inválidos")
    )
)]
pub async fn criar_ordem(
    State(app_state): State<AppState>,
    Json(payload): Json<NovaOrdemPayload>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate()?;

    let ordem = app_state.ordem_service.criar(&payload).await?;

    Ok((StatusCode::CREATED, Json(ordem)))
}

// GET /api/ordens
#[utoipa::path(
    get,
    path = "/api/ordens",
    tag = "Ordens de Serviço",
    responses(
        (status = 200, description = "Ordens da mais recente para a mais antiga", body = [OrdemServico])
    )
)]
pub async fn listar_ordens(
    State(app_state): State<AppState>,
) -> Result<impl IntoResponse, AppError> {
    let ordens = app_state.ordem_service.listar().await?;

    Ok(Json(ordens))
}

// GET /api/ordens/{id}
#[utoipa::path(
    get,
    path = "/api/ordens/{id}",
    tag = "Ordens de Serviço",
    responses(
        (status = 200, description = "Ordem com demonstrativo financeiro atual", body = OrdemDetalhe),
        (status = 404, description = "Ordem não encontrada")
    ),
    params(
        ("id" = Uuid, Path, description = "ID da Ordem")
    )
)]
pub async fn detalhar_ordem(
    State(app_state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, AppError> {
    let detalhe = app_state.ordem_service.detalhar(id).await?;

    Ok(Json(detalhe))
}

// PUT /api/ordens/{id}
#[utoipa::path(
    put,
    path = "/api/ordens/{id}",
    tag = "Ordens de Serviço",
    request_body = AtualizarOrdemPayload,
    responses(
        (status = 200, description = "Cadastro da ordem atualizado", body = OrdemServico),
        (status = 404, description = "Ordem não encontrada")
    ),
    params(
        ("id" = Uuid, Path, description = "ID da Ordem")
    )
)]
pub async fn atualizar_ordem(
    State(app_state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(payload): Json<AtualizarOrdemPayload>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate()?;

    let ordem = app_state.ordem_service.atualizar(id, &payload).await?;

    Ok(Json(ordem))
}

// DELETE /api/ordens/{id}
#[utoipa::path(
    delete,
    path = "/api/ordens/{id}",
    tag = "Ordens de Serviço",
    responses(
        (status = 204, description = "Ordem excluída em definitivo"),
        (status = 404, description = "Ordem não encontrada")
    ),
    params(
        ("id" = Uuid, Path, description = "ID da Ordem")
    )
)]
pub async fn excluir_ordem(
    State(app_state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, AppError> {
    app_state.ordem_service.excluir(id).await?;

    Ok(StatusCode::NO_CONTENT)
}

// =============================================================================
//  2. CICLO DE VIDA (STATUS TÉCNICO E FINANCEIRO)
// =============================================================================

// PUT /api/ordens/{id}/status
#[utoipa::path(
    put,
    path = "/api/ordens/{id}/status",
    tag = "Ordens de Serviço",
    request_body = MudarStatusPayload,
    responses(
        (status = 200, description = "Status e datas derivadas aplicados de uma vez", body = OrdemServico),
        (status = 404, description = "Ordem não encontrada")
    ),
    params(
        ("id" = Uuid, Path, description = "ID da Ordem")
    )
)]
pub async fn mudar_status(
    State(app_state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(payload): Json<MudarStatusPayload>,
) -> Result<impl IntoResponse, AppError> {
    let ordem = app_state.ordem_service.mudar_status(id, &payload).await?;

    Ok(Json(ordem))
}

// PUT /api/ordens/{id}/financeiro
#[utoipa::path(
    put,
    path = "/api/ordens/{id}/financeiro",
    tag = "Ordens de Serviço",
    request_body = MudarFinanceiroPayload,
    responses(
        (status = 200, description = "Situação de cobrança atualizada", body = OrdemServico),
        (status = 404, description = "Ordem não encontrada")
    ),
    params(
        ("id" = Uuid, Path, description = "ID da Ordem")
    )
)]
pub async fn mudar_financeiro(
    State(app_state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(payload): Json<MudarFinanceiroPayload>,
) -> Result<impl IntoResponse, AppError> {
    let ordem = app_state
        .ordem_service
        .mudar_financeiro(id, &payload)
        .await?;

    Ok(Json(ordem))
}

// =============================================================================
//  3. LEITURAS DERIVADAS E CLONAGEM
// =============================================================================

// GET /api/ordens/{id}/resumo
#[utoipa::path(
    get,
    path = "/api/ordens/{id}/resumo",
    tag = "Ordens de Serviço",
    responses(
        (status = 200, description = "Demonstrativo financeiro recalculado", body = ResumoFinanceiro),
        (status = 404, description = "Ordem não encontrada")
    ),
    params(
        ("id" = Uuid, Path, description = "ID da Ordem")
    )
)]
pub async fn resumo_ordem(
    State(app_state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, AppError> {
    let resumo = app_state.ordem_service.resumo(id).await?;

    Ok(Json(resumo))
}

// GET /api/ordens/{id}/linha-do-tempo
#[utoipa::path(
    get,
    path = "/api/ordens/{id}/linha-do-tempo",
    tag = "Ordens de Serviço",
    responses(
        (status = 200, description = "Eventos do ciclo de vida em ordem cronológica", body = [EventoLinhaTempo]),
        (status = 404, description = "Ordem não encontrada")
    ),
    params(
        ("id" = Uuid, Path, description = "ID da Ordem")
    )
)]
pub async fn linha_do_tempo(
    State(app_state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, AppError> {
    let eventos = app_state.ordem_service.linha_do_tempo(id).await?;

    Ok(Json(eventos))
}

// POST /api/ordens/{id}/clonar
#[utoipa::path(
    post,
    path = "/api/ordens/{id}/clonar",
    tag = "Ordens de Serviço",
    responses(
        (status = 201, description = "Nova ordem criada a partir da existente", body = OrdemServico),
        (status = 404, description = "Ordem de origem não encontrada")
    ),
    params(
        ("id" = Uuid, Path, description = "ID da Ordem de origem")
    )
)]
pub async fn clonar_ordem(
    State(app_state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, AppError> {
    let ordem = app_state.ordem_service.clonar(id).await?;

    Ok((StatusCode::CREATED, Json(ordem)))
}
