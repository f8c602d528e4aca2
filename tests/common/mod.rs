//! Helpers compartilhados pelos testes de API.
//!
//! O app roda inteiro (rotas, middlewares, serviços) sobre os repositórios
//! em memória, com as imagens num diretório temporário.

#![allow(dead_code)]

use std::sync::{
    atomic::{AtomicUsize, Ordering},
    Arc,
};

use async_trait::async_trait;
use axum::{
    body::Body,
    http::{header, Request, Response},
    Router,
};
use catalogo_api::{
    common::error::AppError,
    config::{AppSettings, AppState, Environment, JwtSettings, LockoutSettings},
    db::{FornecedorRepository, InMemoryCatalogRepository, InMemoryUserRepository, ProdutoRepository, UserRepository},
    models::{
        fornecedor::{Endereco, Fornecedor},
        produto::Produto,
    },
    routes::create_router,
    services::auth::IdentityResult,
};
use http_body_util::BodyExt;
use serde_json::{json, Value};
use tempfile::TempDir;
use uuid::Uuid;

pub const SENHA: &str = "Senha@123";

pub const DOCUMENTO_CPF: &str = "52998224725";
pub const DOCUMENTO_CNPJ: &str = "11222333000181";

pub fn settings(imagens: &TempDir) -> AppSettings {
    AppSettings {
        environment: Environment::Development,
        server_addr: "127.0.0.1:0".into(),
        database_url: String::new(),
        jwt: JwtSettings {
            segredo: "segredo-de-teste-com-tamanho-suficiente".into(),
            emissor: "MeuSistema".into(),
            valido_em: "https://localhost".into(),
            expiracao_horas: 2,
        },
        lockout: LockoutSettings::default(),
        bcrypt_cost: 4,
        imagens_dir: imagens.path().to_path_buf(),
        cors_origem: "http://desenvolvedor.io".into(),
    }
}

/// Conta as chamadas ao repositório de fornecedores.
#[derive(Clone)]
pub struct SpyFornecedorRepository {
    inner: InMemoryCatalogRepository,
    calls: Arc<AtomicUsize>,
}

impl SpyFornecedorRepository {
    pub fn new(inner: InMemoryCatalogRepository) -> Self {
        Self {
            inner,
            calls: Arc::new(AtomicUsize::new(0)),
        }
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    fn hit(&self) {
        self.calls.fetch_add(1, Ordering::SeqCst);
    }
}

#[async_trait]
impl FornecedorRepository for SpyFornecedorRepository {
    async fn get_all(&self) -> Result<Vec<Fornecedor>, AppError> {
        self.hit();
        self.inner.get_all().await
    }

    async fn get_by_id(&self, id: Uuid) -> Result<Option<Fornecedor>, AppError> {
        self.hit();
        self.inner.get_by_id(id).await
    }

    async fn get_with_endereco(&self, id: Uuid) -> Result<Option<Fornecedor>, AppError> {
        self.hit();
        self.inner.get_with_endereco(id).await
    }

    async fn get_with_produtos_endereco(&self, id: Uuid) -> Result<Option<Fornecedor>, AppError> {
        self.hit();
        self.inner.get_with_produtos_endereco(id).await
    }

    async fn documento_exists(&self, documento: &str, except_id: Option<Uuid>) -> Result<bool, AppError> {
        self.hit();
        self.inner.documento_exists(documento, except_id).await
    }

    async fn add(&self, fornecedor: &Fornecedor) -> Result<(), AppError> {
        self.hit();
        FornecedorRepository::add(&self.inner, fornecedor).await
    }

    async fn update(&self, fornecedor: &Fornecedor) -> Result<(), AppError> {
        self.hit();
        FornecedorRepository::update(&self.inner, fornecedor).await
    }

    async fn remove(&self, id: Uuid) -> Result<(), AppError> {
        self.hit();
        FornecedorRepository::remove(&self.inner, id).await
    }

    async fn get_endereco(&self, id: Uuid) -> Result<Option<Endereco>, AppError> {
        self.hit();
        self.inner.get_endereco(id).await
    }

    async fn get_endereco_by_fornecedor(&self, fornecedor_id: Uuid) -> Result<Option<Endereco>, AppError> {
        self.hit();
        self.inner.get_endereco_by_fornecedor(fornecedor_id).await
    }

    async fn update_endereco(&self, endereco: &Endereco) -> Result<(), AppError> {
        self.hit();
        self.inner.update_endereco(endereco).await
    }
}

/// Conta as chamadas ao repositório de produtos.
#[derive(Clone)]
pub struct SpyProdutoRepository {
    inner: InMemoryCatalogRepository,
    calls: Arc<AtomicUsize>,
}

impl SpyProdutoRepository {
    pub fn new(inner: InMemoryCatalogRepository) -> Self {
        Self {
            inner,
            calls: Arc::new(AtomicUsize::new(0)),
        }
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    fn hit(&self) {
        self.calls.fetch_add(1, Ordering::SeqCst);
    }
}

#[async_trait]
impl ProdutoRepository for SpyProdutoRepository {
    async fn get_all_with_fornecedor(&self) -> Result<Vec<Produto>, AppError> {
        self.hit();
        self.inner.get_all_with_fornecedor().await
    }

    async fn get_with_fornecedor(&self, id: Uuid) -> Result<Option<Produto>, AppError> {
        self.hit();
        self.inner.get_with_fornecedor(id).await
    }

    async fn get_by_fornecedor(&self, fornecedor_id: Uuid) -> Result<Vec<Produto>, AppError> {
        self.hit();
        self.inner.get_by_fornecedor(fornecedor_id).await
    }

    async fn add(&self, produto: &Produto) -> Result<(), AppError> {
        self.hit();
        ProdutoRepository::add(&self.inner, produto).await
    }

    async fn update(&self, produto: &Produto) -> Result<(), AppError> {
        self.hit();
        ProdutoRepository::update(&self.inner, produto).await
    }

    async fn remove(&self, id: Uuid) -> Result<(), AppError> {
        self.hit();
        ProdutoRepository::remove(&self.inner, id).await
    }
}

pub struct TestApp {
    pub state: AppState,
    pub catalog: InMemoryCatalogRepository,
    pub fornecedores_spy: SpyFornecedorRepository,
    pub produtos_spy: SpyProdutoRepository,
    pub users: InMemoryUserRepository,
    pub imagens: TempDir,
}

impl TestApp {
    pub fn new() -> Self {
        let imagens = tempfile::tempdir().expect("diretório temporário");
        let catalog = InMemoryCatalogRepository::new();
        let fornecedores_spy = SpyFornecedorRepository::new(catalog.clone());
        let produtos_spy = SpyProdutoRepository::new(catalog.clone());
        let users = InMemoryUserRepository::new();

        let state = AppState::from_repositories(
            settings(&imagens),
            Arc::new(fornecedores_spy.clone()),
            Arc::new(produtos_spy.clone()),
            Arc::new(users.clone()),
        );

        Self {
            state,
            catalog,
            fornecedores_spy,
            produtos_spy,
            users,
            imagens,
        }
    }

    // `oneshot` consome o router: um novo a cada requisição
    pub fn router(&self) -> Router {
        create_router(self.state.clone())
    }

    pub async fn send(&self, request: Request<Body>) -> Response<Body> {
        use tower::ServiceExt;
        self.router().oneshot(request).await.expect("resposta do router")
    }

    /// Registra um usuário com as claims dadas e devolve o token dele.
    pub async fn token_with(&self, permissions: &[(&str, &str)]) -> String {
        let email = format!("{}@teste.com", Uuid::new_v4().simple());

        let user = match self.state.auth_service.register_user(&email, SENHA).await.unwrap() {
            IdentityResult::Succeeded(user) => user,
            IdentityResult::Failed(errors) => panic!("registro falhou: {errors:?}"),
        };
        for (claim_type, claim_value) in permissions {
            self.users.add_claim(user.id, *claim_type, *claim_value).await;
        }

        self.state
            .auth_service
            .generate_jwt(&email)
            .await
            .unwrap()
            .access_token
    }

    /// Token com todas as permissões de catálogo.
    pub async fn admin_token(&self) -> String {
        self.token_with(&[
            ("Fornecedor", "Adicionar,Atualizar,Excluir"),
            ("Produto", "Adicionar,Atualizar,Excluir"),
        ])
        .await
    }

    /// Cadastra um fornecedor pela API e devolve o `data` do envelope.
    pub async fn create_fornecedor(&self, token: &str, documento: &str) -> Value {
        let response = self
            .send(json_request("POST", "/api/fornecedores", Some(token), fornecedor_json(documento)))
            .await;
        let body = body_json(response).await;
        assert_eq!(body["success"], true, "cadastro falhou: {body}");
        body["data"].clone()
    }

    pub fn fornecedor_count_calls(&self) -> usize {
        self.fornecedores_spy.calls()
    }

    pub fn produto_count_calls(&self) -> usize {
        self.produtos_spy.calls()
    }

    pub async fn user_exists(&self, email: &str) -> bool {
        self.users.find_by_email(email).await.unwrap().is_some()
    }
}

pub fn fornecedor_json(documento: &str) -> Value {
    let tipo = if documento.len() == 11 { "PESSOA_FISICA" } else { "PESSOA_JURIDICA" };
    json!({
        "nome": "Papelaria Central",
        "documento": documento,
        "tipoFornecedor": tipo,
        "ativo": true,
        "endereco": {
            "logradouro": "Rua das Flores",
            "numero": "123",
            "complemento": "Sala 2",
            "cep": "01310000",
            "bairro": "Centro",
            "cidade": "São Paulo",
            "estado": "SP"
        }
    })
}

pub fn json_request(method: &str, uri: &str, token: Option<&str>, body: Value) -> Request<Body> {
    let mut builder = Request::builder()
        .method(method)
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json");
    if let Some(token) = token {
        builder = builder.header(header::AUTHORIZATION, format!("Bearer {token}"));
    }
    builder.body(Body::from(body.to_string())).unwrap()
}

pub fn empty_request(method: &str, uri: &str, token: Option<&str>) -> Request<Body> {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(token) = token {
        builder = builder.header(header::AUTHORIZATION, format!("Bearer {token}"));
    }
    builder.body(Body::empty()).unwrap()
}

pub async fn body_bytes(response: Response<Body>) -> Vec<u8> {
    response.into_body().collect().await.unwrap().to_bytes().to_vec()
}

pub async fn body_json(response: Response<Body>) -> Value {
    let bytes = body_bytes(response).await;
    serde_json::from_slice(&bytes).unwrap_or_else(|_| panic!("corpo não é JSON: {}", String::from_utf8_lossy(&bytes)))
}

pub fn errors_of(body: &Value) -> Vec<String> {
    body["errors"]
        .as_array()
        .map(|errors| errors.iter().filter_map(|e| e.as_str().map(str::to_string)).collect())
        .unwrap_or_default()
}
