// src/db.rs

use std::time::Duration;

use sqlx::{PgPool, postgres::PgPoolOptions};

use crate::config::AppSettings;

pub mod fornecedor_repo;
pub use fornecedor_repo::{FornecedorRepository, PgFornecedorRepository};
pub mod produto_repo;
pub use produto_repo::{PgProdutoRepository, ProdutoRepository};
pub mod user_repo;
pub use user_repo::{PgUserRepository, UserRepository};
pub mod memory;
pub use memory::{InMemoryCatalogRepository, InMemoryUserRepository};

// Pool de conexões com o Postgres
pub async fn connect(settings: &AppSettings) -> anyhow::Result<PgPool> {
    let pool = PgPoolOptions::new()
        .max_connections(5)
        .acquire_timeout(Duration::from_secs(3))
        .connect(&settings.database_url)
        .await?;
    Ok(pool)
}
