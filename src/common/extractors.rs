// src/common/extractors.rs

use axum::{
    extract::{FromRequest, FromRequestParts, Path, Request},
    http::{request::Parts, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use serde::de::DeserializeOwned;
use uuid::Uuid;

use crate::common::response::CustomResponse;

/// Corpo JSON do view model.
///
/// Se o corpo não puder ser convertido (JSON malformado, tipo errado), a
/// falha vai para o envelope padrão como erro de "model state", em vez do
/// 4xx em texto puro do `Json` do axum.
pub struct JsonModel<T>(pub T);

impl<T, S> FromRequest<S> for JsonModel<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = Response;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        match Json::<T>::from_request(req, state).await {
            Ok(Json(value)) => Ok(JsonModel(value)),
            Err(rejection) => {
                tracing::debug!("Corpo da requisição rejeitado: {}", rejection.body_text());
                Err(CustomResponse::binding_error(rejection.body_text()).into_response())
            }
        }
    }
}

/// Parâmetro `{id}` que precisa ser um GUID.
///
/// Um id que não é GUID simplesmente não casa com a rota: 404.
pub struct GuidPath(pub Uuid);

impl<S> FromRequestParts<S> for GuidPath
where
    S: Send + Sync,
{
    type Rejection = Response;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Path(raw) = Path::<String>::from_request_parts(parts, state)
            .await
            .map_err(|e| e.into_response())?;

        Uuid::parse_str(&raw)
            .map(GuidPath)
            .map_err(|_| StatusCode::NOT_FOUND.into_response())
    }
}
