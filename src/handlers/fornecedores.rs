// src/handlers/fornecedores.rs

use axum::{
    extract::State,
    response::{IntoResponse, Response},
};
use validator::Validate;

use crate::{
    common::{
        error::AppError,
        extractors::{GuidPath, JsonModel},
        notificador::Notificador,
        response::CustomResponse,
    },
    config::AppState,
    handlers::IDS_DIFERENTES,
    middleware::{
        auth::AuthenticatedUser,
        rbac::{check_claim, ADICIONAR, ATUALIZAR, EXCLUIR, FORNECEDOR},
    },
    models::fornecedor::Fornecedor,
    view_models::fornecedor::{EnderecoViewModel, FornecedorViewModel},
};

#[utoipa::path(
    get,
    path = "/api/fornecedores",
    tag = "Fornecedores",
    responses(
        (status = 200, description = "Envelope com a lista de fornecedores", body = Vec<FornecedorViewModel>),
        (status = 401, description = "Token ausente ou inválido")
    ),
    security(("api_jwt" = []))
)]
pub async fn obter_todos(State(app_state): State<AppState>) -> Result<Response, AppError> {
    let fornecedores = app_state.fornecedor_repo.get_all().await?;

    let data: Vec<FornecedorViewModel> = fornecedores.into_iter().map(FornecedorViewModel::from).collect();
    Ok(CustomResponse::ok(data).into_response())
}

#[utoipa::path(
    get,
    path = "/api/fornecedores/{id}",
    tag = "Fornecedores",
    params(("id" = Uuid, Path, description = "ID do fornecedor")),
    responses(
        (status = 200, description = "Fornecedor com produtos e endereço", body = FornecedorViewModel),
        (status = 404, description = "Fornecedor não encontrado")
    ),
    security(("api_jwt" = []))
)]
pub async fn obter_por_id(State(app_state): State<AppState>, GuidPath(id): GuidPath) -> Result<Response, AppError> {
    let fornecedor = app_state
        .fornecedor_repo
        .get_with_produtos_endereco(id)
        .await?
        .ok_or(AppError::NotFound)?;

    Ok(CustomResponse::ok(FornecedorViewModel::from(fornecedor)).into_response())
}

#[utoipa::path(
    get,
    path = "/api/fornecedores/obter-endereco/{id}",
    tag = "Fornecedores",
    params(("id" = Uuid, Path, description = "ID do endereço")),
    responses(
        (status = 200, description = "Endereço", body = EnderecoViewModel),
        (status = 404, description = "Endereço não encontrado")
    ),
    security(("api_jwt" = []))
)]
pub async fn obter_endereco(State(app_state): State<AppState>, GuidPath(id): GuidPath) -> Result<Response, AppError> {
    let endereco = app_state
        .fornecedor_repo
        .get_endereco(id)
        .await?
        .ok_or(AppError::NotFound)?;

    Ok(CustomResponse::ok(EnderecoViewModel::from(endereco)).into_response())
}

#[utoipa::path(
    post,
    path = "/api/fornecedores",
    tag = "Fornecedores",
    request_body = FornecedorViewModel,
    responses(
        (status = 200, description = "Envelope: fornecedor criado ou lista de erros", body = FornecedorViewModel),
        (status = 403, description = "Sem a claim Fornecedor/Adicionar")
    ),
    security(("api_jwt" = []))
)]
pub async fn adicionar(
    State(app_state): State<AppState>,
    user: AuthenticatedUser,
    JsonModel(payload): JsonModel<FornecedorViewModel>,
) -> Result<Response, AppError> {
    check_claim(&user, FORNECEDOR, ADICIONAR).into_result()?;
    let mut notificador = Notificador::new();

    if let Err(errors) = payload.validate() {
        return Ok(CustomResponse::invalid_model(&errors, &notificador).into_response());
    }

    let fornecedor = Fornecedor::from(payload);
    app_state
        .fornecedor_service
        .create_fornecedor(&fornecedor, &mut notificador)
        .await?;

    Ok(CustomResponse::from_notificador(&notificador, FornecedorViewModel::from(fornecedor)).into_response())
}

#[utoipa::path(
    put,
    path = "/api/fornecedores/{id}",
    tag = "Fornecedores",
    params(("id" = Uuid, Path, description = "ID do fornecedor")),
    request_body = FornecedorViewModel,
    responses(
        (status = 200, description = "Envelope: fornecedor atualizado ou lista de erros", body = FornecedorViewModel),
        (status = 403, description = "Sem a claim Fornecedor/Atualizar"),
        (status = 404, description = "Fornecedor não encontrado")
    ),
    security(("api_jwt" = []))
)]
pub async fn atualizar(
    State(app_state): State<AppState>,
    user: AuthenticatedUser,
    GuidPath(id): GuidPath,
    JsonModel(payload): JsonModel<FornecedorViewModel>,
) -> Result<Response, AppError> {
    check_claim(&user, FORNECEDOR, ATUALIZAR).into_result()?;
    let mut notificador = Notificador::new();

    if id != payload.id {
        notificador.notify(IDS_DIFERENTES);
        return Ok(CustomResponse::notifications(&notificador).into_response());
    }

    if let Err(errors) = payload.validate() {
        return Ok(CustomResponse::invalid_model(&errors, &notificador).into_response());
    }

    // Campos novos sobre a cópia recém-lida: o id nunca muda
    let mut fornecedor = app_state
        .fornecedor_repo
        .get_with_endereco(id)
        .await?
        .ok_or(AppError::NotFound)?;
    fornecedor.nome = payload.nome;
    fornecedor.documento = payload.documento;
    fornecedor.tipo_fornecedor = payload.tipo_fornecedor;
    fornecedor.ativo = payload.ativo;

    app_state
        .fornecedor_service
        .update_fornecedor(&fornecedor, &mut notificador)
        .await?;

    Ok(CustomResponse::from_notificador(&notificador, FornecedorViewModel::from(fornecedor)).into_response())
}

#[utoipa::path(
    put,
    path = "/api/fornecedores/atualizar-endereco/{id}",
    tag = "Fornecedores",
    params(("id" = Uuid, Path, description = "ID do endereço")),
    request_body = EnderecoViewModel,
    responses(
        (status = 200, description = "Envelope: endereço atualizado ou lista de erros", body = EnderecoViewModel),
        (status = 403, description = "Sem a claim Fornecedor/Atualizar"),
        (status = 404, description = "Endereço não encontrado")
    ),
    security(("api_jwt" = []))
)]
pub async fn atualizar_endereco(
    State(app_state): State<AppState>,
    user: AuthenticatedUser,
    GuidPath(id): GuidPath,
    JsonModel(payload): JsonModel<EnderecoViewModel>,
) -> Result<Response, AppError> {
    check_claim(&user, FORNECEDOR, ATUALIZAR).into_result()?;
    let mut notificador = Notificador::new();

    if id != payload.id {
        notificador.notify(IDS_DIFERENTES);
        return Ok(CustomResponse::notifications(&notificador).into_response());
    }

    if let Err(errors) = payload.validate() {
        return Ok(CustomResponse::invalid_model(&errors, &notificador).into_response());
    }

    // O endereço continua com o mesmo dono
    let mut endereco = app_state
        .fornecedor_repo
        .get_endereco(id)
        .await?
        .ok_or(AppError::NotFound)?;
    endereco.logradouro = payload.logradouro;
    endereco.numero = payload.numero;
    endereco.complemento = payload.complemento;
    endereco.cep = payload.cep;
    endereco.bairro = payload.bairro;
    endereco.cidade = payload.cidade;
    endereco.estado = payload.estado;

    app_state
        .fornecedor_service
        .update_endereco(&endereco, &mut notificador)
        .await?;

    Ok(CustomResponse::from_notificador(&notificador, EnderecoViewModel::from(endereco)).into_response())
}

#[utoipa::path(
    delete,
    path = "/api/fornecedores/{id}",
    tag = "Fornecedores",
    params(("id" = Uuid, Path, description = "ID do fornecedor")),
    responses(
        (status = 200, description = "Envelope: fornecedor removido ou lista de erros", body = FornecedorViewModel),
        (status = 403, description = "Sem a claim Fornecedor/Excluir"),
        (status = 404, description = "Fornecedor não encontrado")
    ),
    security(("api_jwt" = []))
)]
pub async fn excluir(
    State(app_state): State<AppState>,
    user: AuthenticatedUser,
    GuidPath(id): GuidPath,
) -> Result<Response, AppError> {
    check_claim(&user, FORNECEDOR, EXCLUIR).into_result()?;
    let mut notificador = Notificador::new();

    let fornecedor = app_state
        .fornecedor_repo
        .get_with_endereco(id)
        .await?
        .ok_or(AppError::NotFound)?;

    app_state
        .fornecedor_service
        .delete_fornecedor(id, &mut notificador)
        .await?;

    Ok(CustomResponse::from_notificador(&notificador, FornecedorViewModel::from(fornecedor)).into_response())
}
