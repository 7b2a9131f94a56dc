// src/services/cliente_service.rs

use uuid::Uuid;

use crate::{
    common::error::AppError,
    db::ClienteRepository,
    models::cliente::{Cliente, NovoClientePayload},
};

#[derive(Clone)]
pub struct ClienteService {
    repo: ClienteRepository,
}

impl ClienteService {
    pub fn new(repo: ClienteRepository) -> Self {
        Self { repo }
    }

    pub async fn criar(&self, payload: &NovoClientePayload) -> Result<Cliente, AppError> {
        self.repo.criar(payload).await
    }

    pub async fn listar(&self) -> Result<Vec<Cliente>, AppError> {
        self.repo.listar().await
    }

    pub async fn buscar(&self, id: Uuid) -> Result<Cliente, AppError> {
        self.repo.buscar(id).await
    }
}
