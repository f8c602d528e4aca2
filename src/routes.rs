// src/routes.rs

use axum::{
    extract::DefaultBodyLimit,
    http::{HeaderName, HeaderValue},
    middleware as axum_middleware,
    response::Response,
    routing::{get, post, put},
    Router,
};
use tower_http::{catch_panic::CatchPanicLayer, trace::TraceLayer};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::{
    config::{cors::cors_layer, AppState},
    docs::ApiDoc,
    handlers::{
        auth, fornecedores,
        produtos::{self, LIMITE_UPLOAD_BYTES},
    },
    middleware::{auth::auth_guard, exception::handle_panic},
};

pub const VERSOES_SUPORTADAS: &str = "1.0, 2.0";

// Todas as respostas anunciam as versões da API
async fn versoes_suportadas(mut response: Response) -> Response {
    response.headers_mut().insert(
        HeaderName::from_static("api-supported-versions"),
        HeaderValue::from_static(VERSOES_SUPORTADAS),
    );
    response
}

// Rotas de uma versão da API (sem o prefixo)
fn api_routes(app_state: &AppState) -> Router<AppState> {
    // Define as rotas de autenticação (públicas)
    let auth_routes = Router::new()
        .route("/nova-conta", post(auth::registrar))
        .route("/login", post(auth::login));

    // Catálogo: tudo exige token
    let catalogo_routes = Router::new()
        .route(
            "/fornecedores",
            get(fornecedores::obter_todos).post(fornecedores::adicionar),
        )
        .route(
            "/fornecedores/{id}",
            get(fornecedores::obter_por_id)
                .put(fornecedores::atualizar)
                .delete(fornecedores::excluir),
        )
        .route("/fornecedores/obter-endereco/{id}", get(fornecedores::obter_endereco))
        .route("/fornecedores/atualizar-endereco/{id}", put(fornecedores::atualizar_endereco))
        .route("/produtos", get(produtos::obter_todos).post(produtos::adicionar))
        .route(
            "/produtos/{id}",
            get(produtos::obter_por_id)
                .put(produtos::atualizar)
                .delete(produtos::excluir),
        )
        .route(
            "/produtos/adicionar",
            post(produtos::adicionar_alternativo).layer(DefaultBodyLimit::max(LIMITE_UPLOAD_BYTES)),
        )
        .route(
            "/produtos/imagem",
            post(produtos::adicionar_imagem).layer(DefaultBodyLimit::max(LIMITE_UPLOAD_BYTES)),
        )
        .route_layer(axum_middleware::from_fn_with_state(app_state.clone(), auth_guard));

    auth_routes.merge(catalogo_routes)
}

pub fn create_router(app_state: AppState) -> Router {
    let api = api_routes(&app_state);

    // Sem versão na URL = v1
    Router::new()
        .route("/api/health", get(|| async { "OK" }))
        .nest("/api", api.clone())
        .nest("/api/v1", api.clone())
        .nest("/api/v2", api)
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
        .layer(axum_middleware::map_response(versoes_suportadas))
        .layer(cors_layer(&app_state.settings))
        .layer(TraceLayer::new_for_http())
        .layer(CatchPanicLayer::custom(handle_panic))
        .with_state(app_state)
}
