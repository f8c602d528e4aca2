//src/main.rs

use anyhow::Context;
use tokio::net::TcpListener;
use tracing_subscriber::EnvFilter;

use catalogo_api::{
    config::{AppSettings, AppState},
    db,
    routes::create_router,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_target(false)
        .compact()
        .init();

    // Se a configuração falhar, a aplicação não deve iniciar
    let settings = AppSettings::from_env()?;
    tracing::info!(ambiente = ?settings.environment, "Configuração carregada");

    let pool = db::connect(&settings)
        .await
        .context("Falha ao conectar ao banco de dados")?;
    tracing::info!("✅ Conexão com o banco de dados estabelecida com sucesso!");

    // Faz o app rodar as migrações do SQLx na inicialização
    sqlx::migrate!()
        .run(&pool)
        .await
        .context("Falha ao rodar as migrações do banco de dados")?;
    tracing::info!("✅ Migrações do banco de dados executadas com sucesso!");

    let addr = settings.server_addr.clone();
    let app = create_router(AppState::with_postgres(settings, pool));

    let listener = TcpListener::bind(&addr)
        .await
        .with_context(|| format!("Falha ao iniciar o listener TCP em {addr}"))?;
    tracing::info!("🚀 Servidor escutando em {}", listener.local_addr()?);

    axum::serve(listener, app).await.context("Erro no servidor Axum")?;
    Ok(())
}
