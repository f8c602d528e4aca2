// src/services.rs

use validator::ValidationErrors;

use crate::common::{notificador::Notificador, response::validation_messages};

pub mod auth;
pub mod fornecedor_service;
pub mod imagem_service;
pub mod produto_service;

// Falhas de validação de domínio viram notificações; retorna se passou
pub(crate) fn executar_validacao(result: Result<(), ValidationErrors>, notificador: &mut Notificador) -> bool {
    match result {
        Ok(()) => true,
        Err(errors) => {
            for message in validation_messages(&errors) {
                notificador.notify(message);
            }
            false
        }
    }
}
