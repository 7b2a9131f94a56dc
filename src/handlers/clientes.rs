// src/handlers/clientes.rs

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
    models::cliente::{Cliente, NovoClientePayload},
};

// POST /api/clientes
#[utoipa::path(
    post,
    path = "/api/clientes",
    tag = "Clientes",
    request_body = NovoClientePayload,
    responses(
        (status = 201, description = "Cliente cadastrado", body = Cliente),
        (status = 400, description = "Dados inválidos")
    )
)]
pub async fn criar_cliente(
    State(app_state): State<AppState>,
    Json(payload): Json<NovoClientePayload>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate()?;

    let cliente = app_state.cliente_service.criar(&payload).await?;

    Ok((StatusCode::CREATED, Json(cliente)))
}

// GET /api/clientes
#[utoipa::path(
    get,
    path = "/api/clientes",
    tag = "Clientes",
    responses(
        (status = 200, description = "Lista de clientes e fornecedores", body = [Cliente])
    )
)]
pub async fn listar_clientes(
    State(app_state): State<AppState>,
) -> Result<impl IntoResponse, AppError> {
    let clientes = app_state.cliente_service.listar().await?;

    Ok(Json(clientes))
}

// GET /api/clientes/{id}
#[utoipa::path(
    get,
    path = "/api/clientes/{id}",
    tag = "Clientes",
    responses(
        (status = 200, description = "Cliente encontrado", body = Cliente),
        (status = 404, description = "Cliente não encontrado")
    ),
    params(
        ("id" = Uuid, Path, description = "ID do Cliente")
    )
)]
pub async fn buscar_cliente(
    State(app_state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, AppError> {
    let cliente = app_state.cliente_service.buscar(id).await?;

    Ok(Json(cliente))
}
