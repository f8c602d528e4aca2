// src/db/fornecedor_repo.rs

use async_trait::async_trait;
use sqlx::PgPool;
use uuid::Uuid;

use crate::{
    common::error::AppError,
    models::{
        fornecedor::{Endereco, Fornecedor},
        produto::Produto,
    },
};

/// Acesso a dados de fornecedores e seus endereços.
#[async_trait]
pub trait FornecedorRepository: Send + Sync {
    async fn get_all(&self) -> Result<Vec<Fornecedor>, AppError>;

    async fn get_by_id(&self, id: Uuid) -> Result<Option<Fornecedor>, AppError>;

    /// Fornecedor + endereço
    async fn get_with_endereco(&self, id: Uuid) -> Result<Option<Fornecedor>, AppError>;

    /// Fornecedor + produtos + endereço
    async fn get_with_produtos_endereco(&self, id: Uuid) -> Result<Option<Fornecedor>, AppError>;

    /// Existe outro fornecedor com este documento? (`except_id` ignora o próprio)
    async fn documento_exists(&self, documento: &str, except_id: Option<Uuid>) -> Result<bool, AppError>;

    /// Grava o fornecedor e, se houver, o endereço dele.
    async fn add(&self, fornecedor: &Fornecedor) -> Result<(), AppError>;

    /// Atualiza só os campos do fornecedor (o endereço tem rota própria).
    async fn update(&self, fornecedor: &Fornecedor) -> Result<(), AppError>;

    /// Remove o endereço e o fornecedor.
    async fn remove(&self, id: Uuid) -> Result<(), AppError>;

    async fn get_endereco(&self, id: Uuid) -> Result<Option<Endereco>, AppError>;

    async fn get_endereco_by_fornecedor(&self, fornecedor_id: Uuid) -> Result<Option<Endereco>, AppError>;

    async fn update_endereco(&self, endereco: &Endereco) -> Result<(), AppError>;
}

#[derive(Clone)]
pub struct PgFornecedorRepository {
    pool: PgPool,
}

impl PgFornecedorRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl FornecedorRepository for PgFornecedorRepository {
    async fn get_all(&self) -> Result<Vec<Fornecedor>, AppError> {
        let fornecedores = sqlx::query_as::<_, Fornecedor>(
            "SELECT id, nome, documento, tipo_fornecedor, ativo FROM fornecedores ORDER BY nome ASC",
        )
        .fetch_all(&self.pool)
        .await?;
        Ok(fornecedores)
    }

    async fn get_by_id(&self, id: Uuid) -> Result<Option<Fornecedor>, AppError> {
        let fornecedor = sqlx::query_as::<_, Fornecedor>(
            "SELECT id, nome, documento, tipo_fornecedor, ativo FROM fornecedores WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(fornecedor)
    }

    async fn get_with_endereco(&self, id: Uuid) -> Result<Option<Fornecedor>, AppError> {
        let Some(mut fornecedor) = self.get_by_id(id).await? else {
            return Ok(None);
        };

        fornecedor.endereco = self.get_endereco_by_fornecedor(id).await?;
        Ok(Some(fornecedor))
    }

    async fn get_with_produtos_endereco(&self, id: Uuid) -> Result<Option<Fornecedor>, AppError> {
        let Some(mut fornecedor) = self.get_with_endereco(id).await? else {
            return Ok(None);
        };

        fornecedor.produtos = sqlx::query_as::<_, Produto>(
            r#"
            SELECT id, fornecedor_id, nome, descricao, imagem, valor, data_cadastro, ativo
            FROM produtos
            WHERE fornecedor_id = $1
            ORDER BY nome ASC
            "#,
        )
        .bind(id)
        .fetch_all(&self.pool)
        .await?;

        Ok(Some(fornecedor))
    }

    async fn documento_exists(&self, documento: &str, except_id: Option<Uuid>) -> Result<bool, AppError> {
        let exists = sqlx::query_scalar::<_, bool>(
            r#"
            SELECT EXISTS (
                SELECT 1 FROM fornecedores
                WHERE documento = $1
                  AND ($2::uuid IS NULL OR id <> $2)
            )
            "#,
        )
        .bind(documento)
        .bind(except_id)
        .fetch_one(&self.pool)
        .await?;
        Ok(exists)
    }

    async fn add(&self, fornecedor: &Fornecedor) -> Result<(), AppError> {
        // Fornecedor e endereço entram juntos ou não entram
        let mut tx = self.pool.begin().await?;

        sqlx::query(
            r#"
            INSERT INTO fornecedores (id, nome, documento, tipo_fornecedor, ativo)
            VALUES ($1, $2, $3, $4, $5)
            "#,
        )
        .bind(fornecedor.id)
        .bind(&fornecedor.nome)
        .bind(&fornecedor.documento)
        .bind(fornecedor.tipo_fornecedor)
        .bind(fornecedor.ativo)
        .execute(&mut *tx)
        .await?;

        if let Some(endereco) = &fornecedor.endereco {
            sqlx::query(
                r#"
                INSERT INTO enderecos (
                    id, fornecedor_id, logradouro, numero, complemento,
                    cep, bairro, cidade, estado
                )
                VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
                "#,
            )
            .bind(endereco.id)
            .bind(fornecedor.id)
            .bind(&endereco.logradouro)
            .bind(&endereco.numero)
            .bind(&endereco.complemento)
            .bind(&endereco.cep)
            .bind(&endereco.bairro)
            .bind(&endereco.cidade)
            .bind(&endereco.estado)
            .execute(&mut *tx)
            .await?;
        }

        tx.commit().await?;
        Ok(())
    }

    async fn update(&self, fornecedor: &Fornecedor) -> Result<(), AppError> {
        sqlx::query(
            r#"
            UPDATE fornecedores
            SET nome = $2, documento = $3, tipo_fornecedor = $4, ativo = $5
            WHERE id = $1
            "#,
        )
        .bind(fornecedor.id)
        .bind(&fornecedor.nome)
        .bind(&fornecedor.documento)
        .bind(fornecedor.tipo_fornecedor)
        .bind(fornecedor.ativo)
        .execute(&self.pool)
        .await?;
        Ok(())
    }

    async fn remove(&self, id: Uuid) -> Result<(), AppError> {
        let mut tx = self.pool.begin().await?;

        sqlx::query("DELETE FROM enderecos WHERE fornecedor_id = $1")
            .bind(id)
            .execute(&mut *tx)
            .await?;

        sqlx::query("DELETE FROM fornecedores WHERE id = $1")
            .bind(id)
            .execute(&mut *tx)
            .await?;

        tx.commit().await?;
        Ok(())
    }

    async fn get_endereco(&self, id: Uuid) -> Result<Option<Endereco>, AppError> {
        let endereco = sqlx::query_as::<_, Endereco>(
            r#"
            SELECT id, fornecedor_id, logradouro, numero, complemento, cep, bairro, cidade, estado
            FROM enderecos
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(endereco)
    }

    async fn get_endereco_by_fornecedor(&self, fornecedor_id: Uuid) -> Result<Option<Endereco>, AppError> {
        let endereco = sqlx::query_as::<_, Endereco>(
            r#"
            SELECT id, fornecedor_id, logradouro, numero, complemento, cep, bairro, cidade, estado
            FROM enderecos
            WHERE fornecedor_id = $1
            "#,
        )
        .bind(fornecedor_id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(endereco)
    }

    async fn update_endereco(&self, endereco: &Endereco) -> Result<(), AppError> {
        sqlx::query(
            r#"
            UPDATE enderecos
            SET logradouro = $2, numero = $3, complemento = $4,
                cep = $5, bairro = $6, cidade = $7, estado = $8
            WHERE id = $1
            "#,
        )
        .bind(endereco.id)
        .bind(&endereco.logradouro)
        .bind(&endereco.numero)
        .bind(&endereco.complemento)
        .bind(&endereco.cep)
        .bind(&endereco.bairro)
        .bind(&endereco.cidade)
        .bind(&endereco.estado)
        .execute(&self.pool)
        .await?;
        Ok(())
    }
}
