// src/db/memory.rs
//
// Repositórios em memória. Usados pelos testes e para rodar a API sem Postgres.

use std::{collections::HashMap, sync::Arc};

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use tokio::sync::RwLock;
use uuid::Uuid;

use super::{FornecedorRepository, ProdutoRepository, UserRepository};
use crate::{
    common::error::AppError,
    models::{
        auth::{User, UserClaim},
        fornecedor::{Endereco, Fornecedor},
        produto::Produto,
    },
};

#[derive(Debug, Default)]
struct CatalogData {
    // Guardados "soltos": as relações são montadas na leitura
    fornecedores: HashMap<Uuid, Fornecedor>,
    enderecos: HashMap<Uuid, Endereco>,
    produtos: HashMap<Uuid, Produto>,
}

impl CatalogData {
    fn endereco_of(&self, fornecedor_id: Uuid) -> Option<Endereco> {
        self.enderecos
            .values()
            .find(|e| e.fornecedor_id == fornecedor_id)
            .cloned()
    }

    fn produtos_of(&self, fornecedor_id: Uuid) -> Vec<Produto> {
        let mut produtos: Vec<Produto> = self
            .produtos
            .values()
            .filter(|p| p.fornecedor_id == fornecedor_id)
            .cloned()
            .collect();
        produtos.sort_by(|a, b| a.nome.cmp(&b.nome));
        produtos
    }

    fn with_fornecedor(&self, mut produto: Produto) -> Produto {
        produto.fornecedor = self.fornecedores.get(&produto.fornecedor_id).cloned();
        produto
    }
}

/// Fornecedores, endereços e produtos num único store compartilhado.
#[derive(Debug, Clone, Default)]
pub struct InMemoryCatalogRepository {
    data: Arc<RwLock<CatalogData>>,
}

impl InMemoryCatalogRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl FornecedorRepository for InMemoryCatalogRepository {
    async fn get_all(&self) -> Result<Vec<Fornecedor>, AppError> {
        let data = self.data.read().await;
        let mut fornecedores: Vec<Fornecedor> = data.fornecedores.values().cloned().collect();
        fornecedores.sort_by(|a, b| a.nome.cmp(&b.nome));
        Ok(fornecedores)
    }

    async fn get_by_id(&self, id: Uuid) -> Result<Option<Fornecedor>, AppError> {
        Ok(self.data.read().await.fornecedores.get(&id).cloned())
    }

    async fn get_with_endereco(&self, id: Uuid) -> Result<Option<Fornecedor>, AppError> {
        let data = self.data.read().await;
        Ok(data.fornecedores.get(&id).cloned().map(|mut f| {
            f.endereco = data.endereco_of(id);
            f
        }))
    }

    async fn get_with_produtos_endereco(&self, id: Uuid) -> Result<Option<Fornecedor>, AppError> {
        let data = self.data.read().await;
        Ok(data.fornecedores.get(&id).cloned().map(|mut f| {
            f.endereco = data.endereco_of(id);
            f.produtos = data.produtos_of(id);
            f
        }))
    }

    async fn documento_exists(&self, documento: &str, except_id: Option<Uuid>) -> Result<bool, AppError> {
        let data = self.data.read().await;
        Ok(data
            .fornecedores
            .values()
            .any(|f| f.documento == documento && Some(f.id) != except_id))
    }

    async fn add(&self, fornecedor: &Fornecedor) -> Result<(), AppError> {
        let mut data = self.data.write().await;

        let mut stored = fornecedor.clone();
        if let Some(endereco) = stored.endereco.take() {
            data.enderecos.insert(endereco.id, endereco);
        }
        stored.produtos.clear();
        data.fornecedores.insert(stored.id, stored);
        Ok(())
    }

    async fn update(&self, fornecedor: &Fornecedor) -> Result<(), AppError> {
        let mut data = self.data.write().await;
        if let Some(stored) = data.fornecedores.get_mut(&fornecedor.id) {
            stored.nome = fornecedor.nome.clone();
            stored.documento = fornecedor.documento.clone();
            stored.tipo_fornecedor = fornecedor.tipo_fornecedor;
            stored.ativo = fornecedor.ativo;
        }
        Ok(())
    }

    async fn remove(&self, id: Uuid) -> Result<(), AppError> {
        let mut data = self.data.write().await;
        data.enderecos.retain(|_, e| e.fornecedor_id != id);
        data.fornecedores.remove(&id);
        Ok(())
    }

    async fn get_endereco(&self, id: Uuid) -> Result<Option<Endereco>, AppError> {
        Ok(self.data.read().await.enderecos.get(&id).cloned())
    }

    async fn get_endereco_by_fornecedor(&self, fornecedor_id: Uuid) -> Result<Option<Endereco>, AppError> {
        Ok(self.data.read().await.endereco_of(fornecedor_id))
    }

    async fn update_endereco(&self, endereco: &Endereco) -> Result<(), AppError> {
        let mut data = self.data.write().await;
        if let Some(stored) = data.enderecos.get_mut(&endereco.id) {
            // O dono do endereço não muda
            *stored = Endereco {
                fornecedor_id: stored.fornecedor_id,
                ..endereco.clone()
            };
        }
        Ok(())
    }
}

#[async_trait]
impl ProdutoRepository for InMemoryCatalogRepository {
    async fn get_all_with_fornecedor(&self) -> Result<Vec<Produto>, AppError> {
        let data = self.data.read().await;
        let mut produtos: Vec<Produto> = data
            .produtos
            .values()
            .cloned()
            .map(|p| data.with_fornecedor(p))
            .collect();
        produtos.sort_by(|a, b| a.nome.cmp(&b.nome));
        Ok(produtos)
    }

    async fn get_with_fornecedor(&self, id: Uuid) -> Result<Option<Produto>, AppError> {
        let data = self.data.read().await;
        Ok(data.produtos.get(&id).cloned().map(|p| data.with_fornecedor(p)))
    }

    async fn get_by_fornecedor(&self, fornecedor_id: Uuid) -> Result<Vec<Produto>, AppError> {
        let data = self.data.read().await;
        Ok(data
            .produtos_of(fornecedor_id)
            .into_iter()
            .map(|p| data.with_fornecedor(p))
            .collect())
    }

    async fn add(&self, produto: &Produto) -> Result<(), AppError> {
        let mut data = self.data.write().await;
        let stored = Produto {
            fornecedor: None,
            ..produto.clone()
        };
        data.produtos.insert(stored.id, stored);
        Ok(())
    }

    async fn update(&self, produto: &Produto) -> Result<(), AppError> {
        let mut data = self.data.write().await;
        if let Some(stored) = data.produtos.get_mut(&produto.id) {
            *stored = Produto {
                data_cadastro: stored.data_cadastro,
                fornecedor: None,
                ..produto.clone()
            };
        }
        Ok(())
    }

    async fn remove(&self, id: Uuid) -> Result<(), AppError> {
        self.data.write().await.produtos.remove(&id);
        Ok(())
    }
}

#[derive(Debug, Default)]
struct IdentityData {
    users: HashMap<Uuid, User>,
    roles: HashMap<Uuid, Vec<String>>,
    claims: HashMap<Uuid, Vec<UserClaim>>,
}

#[derive(Debug, Clone, Default)]
pub struct InMemoryUserRepository {
    data: Arc<RwLock<IdentityData>>,
}

impl InMemoryUserRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn add_role(&self, user_id: Uuid, role: impl Into<String>) {
        let mut data = self.data.write().await;
        data.roles.entry(user_id).or_default().push(role.into());
    }

    pub async fn add_claim(&self, user_id: Uuid, claim_type: impl Into<String>, claim_value: impl Into<String>) {
        let mut data = self.data.write().await;
        data.claims.entry(user_id).or_default().push(UserClaim {
            claim_type: claim_type.into(),
            claim_value: claim_value.into(),
        });
    }
}

#[async_trait]
impl UserRepository for InMemoryUserRepository {
    async fn find_by_email(&self, email: &str) -> Result<Option<User>, AppError> {
        let data = self.data.read().await;
        Ok(data
            .users
            .values()
            .find(|u| u.email.eq_ignore_ascii_case(email))
            .cloned())
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<User>, AppError> {
        Ok(self.data.read().await.users.get(&id).cloned())
    }

    async fn create_user(&self, email: &str, password_hash: &str) -> Result<User, AppError> {
        let mut data = self.data.write().await;
        if data.users.values().any(|u| u.email.eq_ignore_ascii_case(email)) {
            return Err(AppError::EmailAlreadyExists);
        }

        let now = Utc::now();
        let user = User {
            id: Uuid::new_v4(),
            email: email.to_string(),
            password_hash: password_hash.to_string(),
            email_confirmed: true,
            access_failed_count: 0,
            lockout_end: None,
            created_at: now,
            updated_at: now,
        };
        data.users.insert(user.id, user.clone());
        Ok(user)
    }

    async fn get_roles(&self, user_id: Uuid) -> Result<Vec<String>, AppError> {
        let data = self.data.read().await;
        let mut roles = data.roles.get(&user_id).cloned().unwrap_or_default();
        roles.sort();
        Ok(roles)
    }

    async fn get_claims(&self, user_id: Uuid) -> Result<Vec<UserClaim>, AppError> {
        Ok(self.data.read().await.claims.get(&user_id).cloned().unwrap_or_default())
    }

    async fn update_lockout(
        &self,
        user_id: Uuid,
        access_failed_count: i32,
        lockout_end: Option<DateTime<Utc>>,
    ) -> Result<(), AppError> {
        let mut data = self.data.write().await;
        if let Some(user) = data.users.get_mut(&user_id) {
            user.access_failed_count = access_failed_count;
            user.lockout_end = lockout_end;
            user.updated_at = Utc::now();
        }
        Ok(())
    }
}
