// src/docs.rs

use utoipa::OpenApi;
use utoipa::openapi::security::{Http, HttpAuthScheme, SecurityScheme};
use crate::handlers;
use crate::models;
use crate::view_models;

#[derive(OpenApi)]
#[openapi(
    paths(
        // --- Auth ---
        handlers::auth::registrar,
        handlers::auth::login,

        // --- Fornecedores ---
        handlers::fornecedores::obter_todos,
        handlers::fornecedores::obter_por_id,
        handlers::fornecedores::obter_endereco,
        handlers::fornecedores::adicionar,
        handlers::fornecedores::atualizar,
        handlers::fornecedores::atualizar_endereco,
        handlers::fornecedores::excluir,

        // --- Produtos ---
        handlers::produtos::obter_todos,
        handlers::produtos::obter_por_id,
        handlers::produtos::adicionar,
        handlers::produtos::adicionar_alternativo,
        handlers::produtos::adicionar_imagem,
        handlers::produtos::atualizar,
        handlers::produtos::excluir,
    ),
    components(
        schemas(
            // --- Auth ---
            view_models::auth::RegisterUserViewModel,
            view_models::auth::LoginUserViewModel,
            view_models::auth::LoginResponseViewModel,
            view_models::auth::UserTokenViewModel,
            view_models::auth::ClaimViewModel,

            // --- Catálogo ---
            models::fornecedor::TipoFornecedor,
            view_models::fornecedor::FornecedorViewModel,
            view_models::fornecedor::EnderecoViewModel,
            view_models::produto::ProdutoViewModel,
            view_models::produto::ArquivoViewModel,
        )
    ),
    tags(
        (name = "Auth", description = "Registro e login"),
        (name = "Fornecedores", description = "Cadastro de fornecedores e endereços"),
        (name = "Produtos", description = "Cadastro de produtos e imagens")
    ),
    modifiers(&SecurityAddon)
)]
pub struct ApiDoc;

struct SecurityAddon;

impl utoipa::Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        let components = openapi.components.get_or_insert_with(Default::default);
        components.add_security_scheme(
            "api_jwt",
            SecurityScheme::Http(
                Http::new(HttpAuthScheme::Bearer)
            ),
        );
    }
}
