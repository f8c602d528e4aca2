// src/common/response.rs

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};
use validator::{ValidationErrors, ValidationErrorsKind};

use crate::common::notificador::Notificador;

/// O envelope padrão de TODAS as respostas dos controllers.
///
/// Sucesso: `{ "success": true, "data": ... }`
/// Falha:   `{ "success": false, "errors": [...] }`
///
/// Falhas de validação e de negócio continuam sendo HTTP 200; quem olha é o
/// campo `success`.
#[derive(Debug, Serialize, Deserialize)]
pub struct CustomResponse<T> {
    pub success: bool,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub errors: Vec<String>,
}

impl<T: Serialize> CustomResponse<T> {
    pub fn ok(data: T) -> Self {
        Self {
            success: true,
            data: Some(data),
            errors: Vec::new(),
        }
    }

    /// Operação válida = nenhuma notificação registrada na requisição.
    pub fn from_notificador(notificador: &Notificador, data: T) -> Self {
        if notificador.has_notifications() {
            return Self::failure(notificador.notifications().to_vec());
        }
        Self::ok(data)
    }

    fn failure(errors: Vec<String>) -> Self {
        Self {
            success: false,
            data: None,
            errors,
        }
    }
}

impl CustomResponse<()> {
    /// Junta os erros do "model state" com as notificações já coletadas.
    pub fn invalid_model(errors: &ValidationErrors, notificador: &Notificador) -> Self {
        let mut messages = validation_messages(errors);
        messages.extend(notificador.notifications().iter().cloned());
        Self::failure(messages)
    }

    /// Corpo que nem chegou a ser convertido no view model.
    pub fn binding_error(message: impl Into<String>) -> Self {
        Self::failure(vec![message.into()])
    }

    /// Resposta sem dados: só notificações (ou sucesso vazio).
    pub fn notifications(notificador: &Notificador) -> Self {
        if notificador.has_notifications() {
            return Self::failure(notificador.notifications().to_vec());
        }
        Self {
            success: true,
            data: None,
            errors: Vec::new(),
        }
    }
}

impl<T: Serialize> IntoResponse for CustomResponse<T> {
    fn into_response(self) -> Response {
        (StatusCode::OK, Json(self)).into_response()
    }
}

/// Achata um `ValidationErrors` (inclusive structs e listas aninhadas) numa
/// lista de mensagens. Os campos saem em ordem alfabética para a resposta ser
/// estável.
pub fn validation_messages(errors: &ValidationErrors) -> Vec<String> {
    let mut messages = Vec::new();
    collect_messages(errors, &mut messages);
    messages
}

fn collect_messages(errors: &ValidationErrors, out: &mut Vec<String>) {
    let mut fields: Vec<_> = errors.errors().iter().collect();
    fields.sort_by(|(a, _), (b, _)| a.cmp(b));

    for (field, kind) in fields {
        match kind {
            ValidationErrorsKind::Field(field_errors) => {
                for error in field_errors {
                    let message = error
                        .message
                        .as_ref()
                        .map(|m| m.to_string())
                        .unwrap_or_else(|| format!("O campo {field} é inválido."));
                    out.push(message);
                }
            }
            ValidationErrorsKind::Struct(nested) => collect_messages(nested, out),
            ValidationErrorsKind::List(items) => {
                for nested in items.values() {
                    collect_messages(nested, out);
                }
            }
        }
    }
}
