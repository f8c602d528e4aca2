// src/services/produto_service.rs

use std::sync::Arc;

use uuid::Uuid;
use validator::Validate;

use crate::{
    common::{error::AppError, notificador::Notificador},
    db::{FornecedorRepository, ProdutoRepository},
    models::produto::Produto,
    services::executar_validacao,
};

pub const FORNECEDOR_INEXISTENTE: &str = "Fornecedor não encontrado para o produto informado.";

#[derive(Clone)]
pub struct ProdutoService {
    produto_repo: Arc<dyn ProdutoRepository>,
    fornecedor_repo: Arc<dyn FornecedorRepository>,
}

impl ProdutoService {
    pub fn new(produto_repo: Arc<dyn ProdutoRepository>, fornecedor_repo: Arc<dyn FornecedorRepository>) -> Self {
        Self {
            produto_repo,
            fornecedor_repo,
        }
    }

    // Validação do produto + fornecedor dono existente
    async fn validar(&self, produto: &Produto, notificador: &mut Notificador) -> Result<bool, AppError> {
        if !executar_validacao(produto.validate(), notificador) {
            return Ok(false);
        }

        if self.fornecedor_repo.get_by_id(produto.fornecedor_id).await?.is_none() {
            notificador.notify(FORNECEDOR_INEXISTENTE);
            return Ok(false);
        }

        Ok(true)
    }

    pub async fn create_produto(&self, produto: &Produto, notificador: &mut Notificador) -> Result<bool, AppError> {
        if !self.validar(produto, notificador).await? {
            return Ok(false);
        }

        self.produto_repo.add(produto).await?;
        tracing::info!(produto_id = %produto.id, fornecedor_id = %produto.fornecedor_id, "Produto cadastrado");
        Ok(true)
    }

    pub async fn update_produto(&self, produto: &Produto, notificador: &mut Notificador) -> Result<bool, AppError> {
        if !self.validar(produto, notificador).await? {
            return Ok(false);
        }

        self.produto_repo.update(produto).await?;
        tracing::info!(produto_id = %produto.id, "Produto atualizado");
        Ok(true)
    }

    pub async fn delete_produto(&self, id: Uuid) -> Result<bool, AppError> {
        self.produto_repo.remove(id).await?;
        tracing::info!(produto_id = %id, "Produto removido");
        Ok(true)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        db::InMemoryCatalogRepository,
        models::fornecedor::{Fornecedor, TipoFornecedor},
    };
    use chrono::Utc;
    use rust_decimal::Decimal;

    fn produto(fornecedor_id: Uuid, valor: Decimal) -> Produto {
        Produto {
            id: Uuid::new_v4(),
            fornecedor_id,
            nome: "Caneta".into(),
            descricao: "Caneta azul".into(),
            imagem: "caneta.png".into(),
            valor,
            data_cadastro: Utc::now(),
            ativo: true,
            fornecedor: None,
        }
    }

    async fn setup() -> (ProdutoService, InMemoryCatalogRepository, Uuid) {
        let repo = InMemoryCatalogRepository::new();
        let fornecedor = Fornecedor {
            id: Uuid::new_v4(),
            nome: "Papelaria".into(),
            documento: "52998224725".into(),
            tipo_fornecedor: TipoFornecedor::PessoaFisica,
            ativo: true,
            endereco: None,
            produtos: Vec::new(),
        };
        FornecedorRepository::add(&repo, &fornecedor).await.unwrap();

        let service = ProdutoService::new(Arc::new(repo.clone()), Arc::new(repo.clone()));
        (service, repo, fornecedor.id)
    }

    #[tokio::test]
    async fn valid_produto_is_persisted() {
        let (service, repo, fornecedor_id) = setup().await;
        let mut notificador = Notificador::new();
        let p = produto(fornecedor_id, Decimal::new(350, 2));

        assert!(service.create_produto(&p, &mut notificador).await.unwrap());
        assert!(repo.get_with_fornecedor(p.id).await.unwrap().is_some());
    }

    #[tokio::test]
    async fn zero_valor_is_notified() {
        let (service, repo, fornecedor_id) = setup().await;
        let mut notificador = Notificador::new();
        let p = produto(fornecedor_id, Decimal::ZERO);

        assert!(!service.create_produto(&p, &mut notificador).await.unwrap());
        assert_eq!(notificador.notifications(), ["O campo Valor precisa ser maior que 0"]);
        assert!(repo.get_with_fornecedor(p.id).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn unknown_fornecedor_is_notified() {
        let (service, _repo, _) = setup().await;
        let mut notificador = Notificador::new();

        let created = service
            .create_produto(&produto(Uuid::new_v4(), Decimal::ONE), &mut notificador)
            .await
            .unwrap();

        assert!(!created);
        assert_eq!(notificador.notifications(), [FORNECEDOR_INEXISTENTE]);
    }
}
