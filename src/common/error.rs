use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

// O tipo de erro único da aplicação (repositórios, serviços e handlers).
// Falhas de negócio NÃO passam por aqui: elas viram notificações no envelope.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Recurso não encontrado")]
    NotFound,

    #[error("E-mail já existe")]
    EmailAlreadyExists,

    #[error("Token inválido")]
    InvalidToken,

    #[error("Acesso negado: {resource}/{action}")]
    Forbidden { resource: String, action: String },

    #[error("Erro de banco de dados: {0}")]
    DatabaseError(#[from] sqlx::Error),

    // `anyhow::Error` captura o contexto de qualquer outro erro inesperado.
    #[error("Erro interno do servidor: {0}")]
    InternalServerError(#[from] anyhow::Error),

    #[error("Erro de Bcrypt: {0}")]
    BcryptError(#[from] bcrypt::BcryptError),

    #[error("Erro de JWT: {0}")]
    JwtError(#[from] jsonwebtoken::errors::Error),

    #[error("Erro de E/S: {0}")]
    IoError(#[from] std::io::Error),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        match self {
            AppError::NotFound => StatusCode::NOT_FOUND.into_response(),
            AppError::InvalidToken => (
                StatusCode::UNAUTHORIZED,
                Json(json!({ "error": "Token de autenticação inválido ou ausente." })),
            )
                .into_response(),
            AppError::Forbidden { resource, action } => (
                StatusCode::FORBIDDEN,
                Json(json!({
                    "error": format!("Você precisa da permissão '{resource}/{action}' para realizar esta ação.")
                })),
            )
                .into_response(),

            // Todo o resto vira 500 sem corpo: o detalhe fica só no log.
            ref e => {
                tracing::error!("Erro Interno do Servidor: {}", e);
                StatusCode::INTERNAL_SERVER_ERROR.into_response()
            }
        }
    }
}
