// src/handlers/produtos.rs

use std::str::FromStr;

use axum::{
    extract::{multipart::MultipartRejection, Multipart, State},
    response::{IntoResponse, Response},
};
use rust_decimal::Decimal;
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
        rbac::{check_claim, ADICIONAR, ATUALIZAR, EXCLUIR, PRODUTO},
    },
    models::produto::Produto,
    services::imagem_service::{nome_com_prefixo, IMAGEM_OBRIGATORIA},
    view_models::produto::{ArquivoUpload, ArquivoViewModel, ProdutoImagemViewModel, ProdutoViewModel},
};

/// Limite do corpo para `POST /produtos/adicionar`.
pub const LIMITE_UPLOAD_BYTES: usize = 40 * 1024 * 1024;

#[utoipa::path(
    get,
    path = "/api/produtos",
    tag = "Produtos",
    responses(
        (status = 200, description = "Envelope com a lista de produtos", body = Vec<ProdutoViewModel>),
        (status = 401, description = "Token ausente ou inválido")
    ),
    security(("api_jwt" = []))
)]
pub async fn obter_todos(State(app_state): State<AppState>) -> Result<Response, AppError> {
    let produtos = app_state.produto_repo.get_all_with_fornecedor().await?;

    let data: Vec<ProdutoViewModel> = produtos.into_iter().map(ProdutoViewModel::from).collect();
    Ok(CustomResponse::ok(data).into_response())
}

#[utoipa::path(
    get,
    path = "/api/produtos/{id}",
    tag = "Produtos",
    params(("id" = Uuid, Path, description = "ID do produto")),
    responses(
        (status = 200, description = "Produto com o nome do fornecedor", body = ProdutoViewModel),
        (status = 404, description = "Produto não encontrado")
    ),
    security(("api_jwt" = []))
)]
pub async fn obter_por_id(State(app_state): State<AppState>, GuidPath(id): GuidPath) -> Result<Response, AppError> {
    let produto = app_state
        .produto_repo
        .get_with_fornecedor(id)
        .await?
        .ok_or(AppError::NotFound)?;

    Ok(CustomResponse::ok(ProdutoViewModel::from(produto)).into_response())
}

#[utoipa::path(
    post,
    path = "/api/produtos",
    tag = "Produtos",
    request_body = ProdutoViewModel,
    responses(
        (status = 200, description = "Envelope: produto criado ou lista de erros", body = ProdutoViewModel),
        (status = 403, description = "Sem a claim Produto/Adicionar")
    ),
    security(("api_jwt" = []))
)]
pub async fn adicionar(
    State(app_state): State<AppState>,
    user: AuthenticatedUser,
    JsonModel(mut payload): JsonModel<ProdutoViewModel>,
) -> Result<Response, AppError> {
    check_claim(&user, PRODUTO, ADICIONAR).into_result()?;
    let mut notificador = Notificador::new();

    if let Err(errors) = payload.validate() {
        return Ok(CustomResponse::invalid_model(&errors, &notificador).into_response());
    }

    let imagem_nome = nome_com_prefixo(&payload.imagem);
    let conteudo = payload.imagem_upload.take().unwrap_or_default();
    if !app_state
        .imagens
        .upload_base64(&conteudo, &imagem_nome, &mut notificador)
        .await?
    {
        return Ok(CustomResponse::notifications(&notificador).into_response());
    }

    payload.imagem = imagem_nome;
    let produto = Produto::from(payload);
    if !app_state.produto_service.create_produto(&produto, &mut notificador).await? {
        app_state.imagens.remover(&produto.imagem).await?;
    }

    Ok(CustomResponse::from_notificador(&notificador, ProdutoViewModel::from(produto)).into_response())
}

#[utoipa::path(
    post,
    path = "/api/produtos/adicionar",
    tag = "Produtos",
    request_body(content_type = "multipart/form-data", description = "Campos do produto + arquivo em `imagemUpload`"),
    responses(
        (status = 200, description = "Envelope: produto criado ou lista de erros", body = ProdutoViewModel),
        (status = 403, description = "Sem a claim Produto/Adicionar")
    ),
    security(("api_jwt" = []))
)]
pub async fn adicionar_alternativo(
    State(app_state): State<AppState>,
    user: AuthenticatedUser,
    multipart: Result<Multipart, MultipartRejection>,
) -> Result<Response, AppError> {
    check_claim(&user, PRODUTO, ADICIONAR).into_result()?;
    let mut notificador = Notificador::new();

    let multipart = match multipart {
        Ok(multipart) => multipart,
        Err(rejection) => return Ok(CustomResponse::binding_error(rejection.body_text()).into_response()),
    };
    let mut payload = match ler_produto_multipart(multipart).await {
        Ok(payload) => payload,
        Err(message) => return Ok(CustomResponse::binding_error(message).into_response()),
    };

    if let Err(errors) = payload.validate() {
        return Ok(CustomResponse::invalid_model(&errors, &notificador).into_response());
    }

    let Some(arquivo) = payload.imagem_upload.take() else {
        notificador.notify(IMAGEM_OBRIGATORIA);
        return Ok(CustomResponse::notifications(&notificador).into_response());
    };

    let imagem_nome = nome_com_prefixo(&arquivo.nome_arquivo);
    if !app_state
        .imagens
        .upload_bytes(&arquivo.conteudo, &imagem_nome, &mut notificador)
        .await?
    {
        return Ok(CustomResponse::notifications(&notificador).into_response());
    }

    payload.imagem = imagem_nome;
    let produto = Produto::from(payload);
    if !app_state.produto_service.create_produto(&produto, &mut notificador).await? {
        app_state.imagens.remover(&produto.imagem).await?;
    }

    Ok(CustomResponse::from_notificador(&notificador, ProdutoViewModel::from(produto)).into_response())
}

#[utoipa::path(
    post,
    path = "/api/produtos/imagem",
    tag = "Produtos",
    request_body(content_type = "multipart/form-data", description = "Um arquivo"),
    responses(
        (status = 200, description = "Metadados do arquivo recebido", body = ArquivoViewModel),
        (status = 403, description = "Sem a claim Produto/Adicionar")
    ),
    security(("api_jwt" = []))
)]
pub async fn adicionar_imagem(
    user: AuthenticatedUser,
    multipart: Result<Multipart, MultipartRejection>,
) -> Result<Response, AppError> {
    check_claim(&user, PRODUTO, ADICIONAR).into_result()?;
    let mut notificador = Notificador::new();

    let mut multipart = match multipart {
        Ok(multipart) => multipart,
        Err(rejection) => return Ok(CustomResponse::binding_error(rejection.body_text()).into_response()),
    };

    // O primeiro campo que for arquivo
    loop {
        let field = match multipart.next_field().await {
            Ok(Some(field)) => field,
            Ok(None) => break,
            Err(e) => return Ok(CustomResponse::binding_error(e.body_text()).into_response()),
        };
        let Some(nome_arquivo) = field.file_name().map(str::to_string) else {
            continue;
        };
        let content_type = field.content_type().map(str::to_string);
        let conteudo = match field.bytes().await {
            Ok(bytes) => bytes,
            Err(e) => return Ok(CustomResponse::binding_error(e.body_text()).into_response()),
        };

        let arquivo = ArquivoViewModel {
            nome_arquivo,
            content_type,
            tamanho: conteudo.len(),
        };
        return Ok(CustomResponse::ok(arquivo).into_response());
    }

    notificador.notify(IMAGEM_OBRIGATORIA);
    Ok(CustomResponse::notifications(&notificador).into_response())
}

#[utoipa::path(
    put,
    path = "/api/produtos/{id}",
    tag = "Produtos",
    params(("id" = Uuid, Path, description = "ID do produto")),
    request_body = ProdutoViewModel,
    responses(
        (status = 200, description = "Envelope: produto atualizado ou lista de erros", body = ProdutoViewModel),
        (status = 403, description = "Sem a claim Produto/Atualizar"),
        (status = 404, description = "Produto não encontrado")
    ),
    security(("api_jwt" = []))
)]
pub async fn atualizar(
    State(app_state): State<AppState>,
    user: AuthenticatedUser,
    GuidPath(id): GuidPath,
    JsonModel(mut payload): JsonModel<ProdutoViewModel>,
) -> Result<Response, AppError> {
    check_claim(&user, PRODUTO, ATUALIZAR).into_result()?;
    let mut notificador = Notificador::new();

    if id != payload.id {
        notificador.notify(IDS_DIFERENTES);
        return Ok(CustomResponse::notifications(&notificador).into_response());
    }

    if let Err(errors) = payload.validate() {
        return Ok(CustomResponse::invalid_model(&errors, &notificador).into_response());
    }

    let mut produto = app_state
        .produto_repo
        .get_with_fornecedor(id)
        .await?
        .ok_or(AppError::NotFound)?;

    if payload.imagem.is_empty() {
        payload.imagem = produto.imagem.clone();
    }

    // Imagem nova só quando veio conteúdo
    let mut imagem_nova = None;
    if let Some(conteudo) = payload.imagem_upload.as_deref().filter(|c| !c.is_empty()) {
        let imagem_nome = nome_com_prefixo(&payload.imagem);
        if !app_state
            .imagens
            .upload_base64(conteudo, &imagem_nome, &mut notificador)
            .await?
        {
            return Ok(CustomResponse::notifications(&notificador).into_response());
        }
        produto.imagem = imagem_nome.clone();
        imagem_nova = Some(imagem_nome);
    }

    produto.fornecedor_id = payload.fornecedor_id.unwrap_or(produto.fornecedor_id);
    produto.nome = payload.nome;
    produto.descricao = payload.descricao;
    produto.valor = payload.valor.unwrap_or(produto.valor);
    produto.ativo = payload.ativo;
    if produto.fornecedor.as_ref().map(|f| f.id) != Some(produto.fornecedor_id) {
        produto.fornecedor = None;
    }

    if !app_state.produto_service.update_produto(&produto, &mut notificador).await? {
        if let Some(imagem_nome) = imagem_nova {
            app_state.imagens.remover(&imagem_nome).await?;
        }
    }

    Ok(CustomResponse::from_notificador(&notificador, ProdutoViewModel::from(produto)).into_response())
}

#[utoipa::path(
    delete,
    path = "/api/produtos/{id}",
    tag = "Produtos",
    params(("id" = Uuid, Path, description = "ID do produto")),
    responses(
        (status = 200, description = "Envelope com o produto removido", body = ProdutoViewModel),
        (status = 403, description = "Sem a claim Produto/Excluir"),
        (status = 404, description = "Produto não encontrado")
    ),
    security(("api_jwt" = []))
)]
pub async fn excluir(
    State(app_state): State<AppState>,
    user: AuthenticatedUser,
    GuidPath(id): GuidPath,
) -> Result<Response, AppError> {
    check_claim(&user, PRODUTO, EXCLUIR).into_result()?;

    let produto = app_state
        .produto_repo
        .get_with_fornecedor(id)
        .await?
        .ok_or(AppError::NotFound)?;

    app_state.produto_service.delete_produto(id).await?;

    Ok(CustomResponse::ok(ProdutoViewModel::from(produto)).into_response())
}

// Monta o view model a partir dos campos do form. Nomes de campo sem
// diferenciar maiúsculas ("fornecedorId" ou "FornecedorId").
async fn ler_produto_multipart(mut multipart: Multipart) -> Result<ProdutoImagemViewModel, String> {
    let mut payload = ProdutoImagemViewModel::default();

    while let Some(field) = multipart.next_field().await.map_err(|e| e.body_text())? {
        let nome_campo = field.name().unwrap_or_default().to_ascii_lowercase();

        if nome_campo == "imagemupload" {
            let nome_arquivo = field.file_name().unwrap_or_default().to_string();
            let content_type = field.content_type().map(str::to_string);
            let conteudo = field.bytes().await.map_err(|e| e.body_text())?;
            payload.imagem_upload = Some(ArquivoUpload {
                nome_arquivo,
                content_type,
                conteudo: conteudo.to_vec(),
            });
            continue;
        }

        let valor = field.text().await.map_err(|e| e.body_text())?;
        let valor = valor.trim();
        match nome_campo.as_str() {
            "id" if !valor.is_empty() => payload.id = parse_campo(valor, "Id")?,
            "fornecedorid" if !valor.is_empty() => payload.fornecedor_id = Some(parse_campo(valor, "FornecedorId")?),
            "nome" => payload.nome = valor.to_string(),
            "descricao" => payload.descricao = valor.to_string(),
            "imagem" => payload.imagem = valor.to_string(),
            "valor" if !valor.is_empty() => {
                payload.valor = Some(parse_campo::<Decimal>(&valor.replace(',', "."), "Valor")?)
            }
            "ativo" => payload.ativo = matches!(valor.to_ascii_lowercase().as_str(), "true" | "on" | "1"),
            _ => {}
        }
    }

    Ok(payload)
}

fn parse_campo<T: FromStr>(valor: &str, campo: &str) -> Result<T, String> {
    valor
        .parse::<T>()
        .map_err(|_| format!("O valor '{valor}' não é válido para {campo}."))
}
