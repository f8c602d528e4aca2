// src/handlers/auth.rs

use axum::{
    extract::State,
    response::{IntoResponse, Response},
};
use validator::Validate;

use crate::{
    common::{
        error::AppError, extractors::JsonModel, i18n::IdentityError, notificador::Notificador,
        response::CustomResponse,
    },
    config::AppState,
    middleware::i18n::Locale,
    services::auth::{IdentityResult, SignInResult},
    view_models::auth::{LoginResponseViewModel, LoginUserViewModel, RegisterUserViewModel},
};

// Handler de registro: cria a conta e já devolve o token
#[utoipa::path(
    post,
    path = "/api/nova-conta",
    tag = "Auth",
    request_body = RegisterUserViewModel,
    responses(
        (status = 200, description = "Envelope: token do novo usuário ou erros de identidade", body = LoginResponseViewModel)
    )
)]
pub async fn registrar(
    State(app_state): State<AppState>,
    locale: Locale,
    JsonModel(payload): JsonModel<RegisterUserViewModel>,
) -> Result<Response, AppError> {
    let mut notificador = Notificador::new();

    if let Err(errors) = payload.validate_model() {
        return Ok(CustomResponse::invalid_model(&errors, &notificador).into_response());
    }

    match app_state
        .auth_service
        .register_user(&payload.email, &payload.password)
        .await?
    {
        IdentityResult::Succeeded(user) => {
            let token = app_state.auth_service.generate_jwt(&user.email).await?;
            Ok(CustomResponse::ok(token).into_response())
        }
        IdentityResult::Failed(errors) => {
            for error in errors {
                notificador.notify(error.describe(&locale));
            }
            Ok(CustomResponse::notifications(&notificador).into_response())
        }
    }
}

// Handler de login
#[utoipa::path(
    post,
    path = "/api/login",
    tag = "Auth",
    request_body = LoginUserViewModel,
    responses(
        (status = 200, description = "Envelope: token ou motivo da recusa", body = LoginResponseViewModel)
    )
)]
pub async fn login(
    State(app_state): State<AppState>,
    locale: Locale,
    JsonModel(payload): JsonModel<LoginUserViewModel>,
) -> Result<Response, AppError> {
    let mut notificador = Notificador::new();

    if let Err(errors) = payload.validate() {
        return Ok(CustomResponse::invalid_model(&errors, &notificador).into_response());
    }

    match app_state
        .auth_service
        .password_sign_in(&payload.email, &payload.password)
        .await?
    {
        SignInResult::Succeeded(user) => {
            let token = app_state.auth_service.generate_jwt(&user.email).await?;
            return Ok(CustomResponse::ok(token).into_response());
        }
        SignInResult::LockedOut => notificador.notify(IdentityError::LockedOut.describe(&locale)),
        SignInResult::Failed => notificador.notify(IdentityError::InvalidCredentials.describe(&locale)),
    }

    Ok(CustomResponse::notifications(&notificador).into_response())
}
