// src/middleware/rbac.rs

use crate::{common::error::AppError, middleware::auth::AuthenticatedUser};

pub const FORNECEDOR: &str = "Fornecedor";
pub const PRODUTO: &str = "Produto";

pub const ADICIONAR: &str = "Adicionar";
pub const ATUALIZAR: &str = "Atualizar";
pub const EXCLUIR: &str = "Excluir";

/// Resultado da checagem de uma claim de permissão.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Authorization {
    Granted,
    Denied { resource: String, action: String },
}

impl Authorization {
    pub fn into_result(self) -> Result<(), AppError> {
        match self {
            Authorization::Granted => Ok(()),
            Authorization::Denied { resource, action } => Err(AppError::Forbidden { resource, action }),
        }
    }
}

/// O usuário tem a ação `action` na claim `resource`?
///
/// Chamado no topo de cada handler que altera dados.
pub fn check_claim(user: &AuthenticatedUser, resource: &str, action: &str) -> Authorization {
    if user.0.has_permission(resource, action) {
        return Authorization::Granted;
    }

    tracing::warn!(user_id = %user.0.sub, resource, action, "Permissão negada");
    Authorization::Denied {
        resource: resource.to_string(),
        action: action.to_string(),
    }
}
