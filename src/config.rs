// src/config.rs

use std::{env, path::PathBuf, str::FromStr, sync::Arc};

use anyhow::Context;
use chrono::TimeDelta;
use sqlx::PgPool;

use crate::{
    db::{
        FornecedorRepository, PgFornecedorRepository, PgProdutoRepository, PgUserRepository,
        ProdutoRepository, UserRepository,
    },
    services::{
        auth::AuthService, fornecedor_service::FornecedorService, imagem_service::ImagemStorage,
        produto_service::ProdutoService,
    },
};

pub mod cors;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Environment {
    Development,
    Production,
}

impl FromStr for Environment {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "development" | "dev" => Ok(Self::Development),
            "production" | "prod" => Ok(Self::Production),
            other => anyhow::bail!("APP_ENV desconhecido: {other}"),
        }
    }
}

// Emissão e validação dos tokens
#[derive(Debug, Clone)]
pub struct JwtSettings {
    pub segredo: String,
    pub emissor: String,
    pub valido_em: String,
    pub expiracao_horas: i64,
}

// Bloqueio após tentativas de login inválidas
#[derive(Debug, Clone, Copy)]
pub struct LockoutSettings {
    pub max_tentativas: i32,
    pub duracao: TimeDelta,
}

impl Default for LockoutSettings {
    fn default() -> Self {
        Self {
            max_tentativas: 5,
            duracao: TimeDelta::minutes(5),
        }
    }
}

#[derive(Debug, Clone)]
pub struct AppSettings {
    pub environment: Environment,
    pub server_addr: String,
    pub database_url: String,
    pub jwt: JwtSettings,
    pub lockout: LockoutSettings,
    pub bcrypt_cost: u32,
    pub imagens_dir: PathBuf,
    pub cors_origem: String,
}

impl AppSettings {
    /// Lê a configuração das variáveis de ambiente.
    pub fn from_env() -> anyhow::Result<Self> {
        let database_url = env::var("DATABASE_URL").context("DATABASE_URL deve ser definida")?;
        let segredo = env::var("JWT_SEGREDO").context("JWT_SEGREDO deve ser definido")?;

        let lockout_minutos: i64 = var_or("LOCKOUT_MINUTOS", 5)?;

        Ok(Self {
            environment: var_or("APP_ENV", Environment::Development)?,
            server_addr: var_or("SERVER_ADDR", "0.0.0.0:3000".to_string())?,
            database_url,
            jwt: JwtSettings {
                segredo,
                emissor: var_or("JWT_EMISSOR", "MeuSistema".to_string())?,
                valido_em: var_or("JWT_VALIDO_EM", "https://localhost".to_string())?,
                expiracao_horas: var_or("JWT_EXPIRACAO_HORAS", 2)?,
            },
            lockout: LockoutSettings {
                max_tentativas: var_or("LOCKOUT_MAX_TENTATIVAS", 5)?,
                duracao: TimeDelta::minutes(lockout_minutos),
            },
            bcrypt_cost: var_or("BCRYPT_COST", bcrypt::DEFAULT_COST)?,
            imagens_dir: var_or("IMAGENS_DIR", PathBuf::from("wwwroot/imagens"))?,
            cors_origem: var_or("CORS_ORIGEM", "http://desenvolvedor.io".to_string())?,
        })
    }
}

fn var_or<T>(key: &str, default: T) -> anyhow::Result<T>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    match env::var(key) {
        Ok(raw) => raw
            .parse::<T>()
            .map_err(|e| anyhow::anyhow!("Valor inválido para {key}: {e}")),
        Err(_) => Ok(default),
    }
}

// O estado compartilhado que será acessível em toda a aplicação
#[derive(Clone)]
pub struct AppState {
    pub settings: Arc<AppSettings>,
    pub fornecedor_repo: Arc<dyn FornecedorRepository>,
    pub produto_repo: Arc<dyn ProdutoRepository>,
    pub fornecedor_service: FornecedorService,
    pub produto_service: ProdutoService,
    pub auth_service: AuthService,
    pub imagens: ImagemStorage,
}

impl AppState {
    // --- Monta o gráfico de dependências ---
    pub fn from_repositories(
        settings: AppSettings,
        fornecedor_repo: Arc<dyn FornecedorRepository>,
        produto_repo: Arc<dyn ProdutoRepository>,
        user_repo: Arc<dyn UserRepository>,
    ) -> Self {
        let fornecedor_service = FornecedorService::new(fornecedor_repo.clone(), produto_repo.clone());
        let produto_service = ProdutoService::new(produto_repo.clone(), fornecedor_repo.clone());
        let auth_service = AuthService::new(
            user_repo,
            settings.jwt.clone(),
            settings.lockout,
            settings.bcrypt_cost,
        );
        let imagens = ImagemStorage::new(settings.imagens_dir.clone());

        Self {
            settings: Arc::new(settings),
            fornecedor_repo,
            produto_repo,
            fornecedor_service,
            produto_service,
            auth_service,
            imagens,
        }
    }

    pub fn with_postgres(settings: AppSettings, pool: PgPool) -> Self {
        Self::from_repositories(
            settings,
            Arc::new(PgFornecedorRepository::new(pool.clone())),
            Arc::new(PgProdutoRepository::new(pool.clone())),
            Arc::new(PgUserRepository::new(pool)),
        )
    }
}
