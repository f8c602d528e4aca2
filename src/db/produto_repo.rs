// src/db/produto_repo.rs

use std::collections::HashMap;

use async_trait::async_trait;
use sqlx::PgPool;
use uuid::Uuid;

use crate::{
    common::error::AppError,
    models::{fornecedor::Fornecedor, produto::Produto},
};

/// Acesso a dados de produtos. As leituras "com fornecedor" trazem o
/// fornecedor dono preenchido em `Produto::fornecedor`.
#[async_trait]
pub trait ProdutoRepository: Send + Sync {
    async fn get_all_with_fornecedor(&self) -> Result<Vec<Produto>, AppError>;

    async fn get_with_fornecedor(&self, id: Uuid) -> Result<Option<Produto>, AppError>;

    async fn get_by_fornecedor(&self, fornecedor_id: Uuid) -> Result<Vec<Produto>, AppError>;

    async fn add(&self, produto: &Produto) -> Result<(), AppError>;

    async fn update(&self, produto: &Produto) -> Result<(), AppError>;

    async fn remove(&self, id: Uuid) -> Result<(), AppError>;
}

#[derive(Clone)]
pub struct PgProdutoRepository {
    pool: PgPool,
}

impl PgProdutoRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    // "JOIN" em duas consultas: produtos e, depois, os fornecedores deles
    async fn attach_fornecedores(&self, mut produtos: Vec<Produto>) -> Result<Vec<Produto>, AppError> {
        if produtos.is_empty() {
            return Ok(produtos);
        }

        let ids: Vec<Uuid> = produtos.iter().map(|p| p.fornecedor_id).collect();
        let fornecedores = sqlx::query_as::<_, Fornecedor>(
            "SELECT id, nome, documento, tipo_fornecedor, ativo FROM fornecedores WHERE id = ANY($1)",
        )
        .bind(&ids)
        .fetch_all(&self.pool)
        .await?;

        let por_id: HashMap<Uuid, Fornecedor> = fornecedores.into_iter().map(|f| (f.id, f)).collect();
        for produto in &mut produtos {
            produto.fornecedor = por_id.get(&produto.fornecedor_id).cloned();
        }

        Ok(produtos)
    }
}

#[async_trait]
impl ProdutoRepository for PgProdutoRepository {
    async fn get_all_with_fornecedor(&self) -> Result<Vec<Produto>, AppError> {
        let produtos = sqlx::query_as::<_, Produto>(
            r#"
            SELECT id, fornecedor_id, nome, descricao, imagem, valor, data_cadastro, ativo
            FROM produtos
            ORDER BY nome ASC
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        self.attach_fornecedores(produtos).await
    }

    async fn get_with_fornecedor(&self, id: Uuid) -> Result<Option<Produto>, AppError> {
        let produto = sqlx::query_as::<_, Produto>(
            r#"
            SELECT id, fornecedor_id, nome, descricao, imagem, valor, data_cadastro, ativo
            FROM produtos
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        match produto {
            Some(produto) => Ok(self.attach_fornecedores(vec![produto]).await?.pop()),
            None => Ok(None),
        }
    }

    async fn get_by_fornecedor(&self, fornecedor_id: Uuid) -> Result<Vec<Produto>, AppError> {
        let produtos = sqlx::query_as::<_, Produto>(
            r#"
            SELECT id, fornecedor_id, nome, descricao, imagem, valor, data_cadastro, ativo
            FROM produtos
            WHERE fornecedor_id = $1
            ORDER BY nome ASC
            "#,
        )
        .bind(fornecedor_id)
        .fetch_all(&self.pool)
        .await?;

        self.attach_fornecedores(produtos).await
    }

    async fn add(&self, produto: &Produto) -> Result<(), AppError> {
        sqlx::query(
            r#"
            INSERT INTO produtos (id, fornecedor_id, nome, descricao, imagem, valor, data_cadastro, ativo)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            "#,
        )
        .bind(produto.id)
        .bind(produto.fornecedor_id)
        .bind(&produto.nome)
        .bind(&produto.descricao)
        .bind(&produto.imagem)
        .bind(produto.valor)
        .bind(produto.data_cadastro)
        .bind(produto.ativo)
        .execute(&self.pool)
        .await?;
        Ok(())
    }

    async fn update(&self, produto: &Produto) -> Result<(), AppError> {
        // data_cadastro não muda depois do cadastro
        sqlx::query(
            r#"
            UPDATE produtos
            SET fornecedor_id = $2, nome = $3, descricao = $4, imagem = $5, valor = $6, ativo = $7
            WHERE id = $1
            "#,
        )
        .bind(produto.id)
        .bind(produto.fornecedor_id)
        .bind(&produto.nome)
        .bind(&produto.descricao)
        .bind(&produto.imagem)
        .bind(produto.valor)
        .bind(produto.ativo)
        .execute(&self.pool)
        .await?;
        Ok(())
    }

    async fn remove(&self, id: Uuid) -> Result<(), AppError> {
        sqlx::query("DELETE FROM produtos WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(())
    }
}
