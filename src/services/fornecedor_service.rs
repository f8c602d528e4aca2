// src/services/fornecedor_service.rs

use std::sync::Arc;

use uuid::Uuid;
use validator::Validate;

use crate::{
    common::{error::AppError, notificador::Notificador},
    db::{FornecedorRepository, ProdutoRepository},
    models::fornecedor::{Endereco, Fornecedor},
    services::executar_validacao,
};

pub const DOCUMENTO_DUPLICADO: &str = "Já existe um fornecedor com este documento informado.";
pub const FORNECEDOR_COM_PRODUTOS: &str = "O fornecedor possui produtos cadastrados!";
pub const ENDERECO_OBRIGATORIO: &str = "O endereço do fornecedor é obrigatório.";

/// Regras de escrita de fornecedores.
///
/// Todos os métodos devolvem `Ok(true)` quando gravaram e `Ok(false)` quando
/// uma regra barrou a operação (o motivo fica no `Notificador`).
#[derive(Clone)]
pub struct FornecedorService {
    fornecedor_repo: Arc<dyn FornecedorRepository>,
    produto_repo: Arc<dyn ProdutoRepository>,
}

impl FornecedorService {
    pub fn new(fornecedor_repo: Arc<dyn FornecedorRepository>, produto_repo: Arc<dyn ProdutoRepository>) -> Self {
        Self {
            fornecedor_repo,
            produto_repo,
        }
    }

    pub async fn create_fornecedor(
        &self,
        fornecedor: &Fornecedor,
        notificador: &mut Notificador,
    ) -> Result<bool, AppError> {
        let fornecedor_valido = executar_validacao(fornecedor.validate_cadastro(), notificador);

        let endereco_valido = match &fornecedor.endereco {
            Some(endereco) => executar_validacao(endereco.validate(), notificador),
            None => {
                notificador.notify(ENDERECO_OBRIGATORIO);
                false
            }
        };

        if !fornecedor_valido || !endereco_valido {
            return Ok(false);
        }

        if self.fornecedor_repo.documento_exists(&fornecedor.documento, None).await? {
            notificador.notify(DOCUMENTO_DUPLICADO);
            return Ok(false);
        }

        self.fornecedor_repo.add(fornecedor).await?;
        tracing::info!(fornecedor_id = %fornecedor.id, "Fornecedor cadastrado");
        Ok(true)
    }

    pub async fn update_fornecedor(
        &self,
        fornecedor: &Fornecedor,
        notificador: &mut Notificador,
    ) -> Result<bool, AppError> {
        if !executar_validacao(fornecedor.validate_cadastro(), notificador) {
            return Ok(false);
        }

        if self
            .fornecedor_repo
            .documento_exists(&fornecedor.documento, Some(fornecedor.id))
            .await?
        {
            notificador.notify(DOCUMENTO_DUPLICADO);
            return Ok(false);
        }

        self.fornecedor_repo.update(fornecedor).await?;
        tracing::info!(fornecedor_id = %fornecedor.id, "Fornecedor atualizado");
        Ok(true)
    }

    pub async fn update_endereco(&self, endereco: &Endereco, notificador: &mut Notificador) -> Result<bool, AppError> {
        if !executar_validacao(endereco.validate(), notificador) {
            return Ok(false);
        }

        self.fornecedor_repo.update_endereco(endereco).await?;
        tracing::info!(endereco_id = %endereco.id, "Endereço atualizado");
        Ok(true)
    }

    pub async fn delete_fornecedor(&self, id: Uuid, notificador: &mut Notificador) -> Result<bool, AppError> {
        if !self.produto_repo.get_by_fornecedor(id).await?.is_empty() {
            notificador.notify(FORNECEDOR_COM_PRODUTOS);
            return Ok(false);
        }

        self.fornecedor_repo.remove(id).await?;
        tracing::info!(fornecedor_id = %id, "Fornecedor removido");
        Ok(true)
    }
}
