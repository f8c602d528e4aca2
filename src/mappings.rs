// src/mappings.rs
//
// Mapeamento explícito, campo a campo, entre modelos de domínio e view models.
// Cada conversão monta a struct destino por inteiro: um campo novo sem
// mapeamento não compila.

use chrono::Utc;
use uuid::Uuid;

use crate::models::{
    fornecedor::{Endereco, Fornecedor},
    produto::Produto,
};
use crate::view_models::{
    fornecedor::{EnderecoViewModel, FornecedorViewModel},
    produto::{ProdutoImagemViewModel, ProdutoViewModel},
};

// --- Domínio -> View model ---

impl From<Endereco> for EnderecoViewModel {
    fn from(e: Endereco) -> Self {
        Self {
            id: e.id,
            logradouro: e.logradouro,
            numero: e.numero,
            complemento: e.complemento,
            cep: e.cep,
            bairro: e.bairro,
            cidade: e.cidade,
            estado: e.estado,
            fornecedor_id: e.fornecedor_id,
        }
    }
}

impl From<Produto> for ProdutoViewModel {
    fn from(p: Produto) -> Self {
        Self {
            id: p.id,
            fornecedor_id: Some(p.fornecedor_id),
            nome: p.nome,
            descricao: p.descricao,
            imagem_upload: None,
            imagem: p.imagem,
            valor: Some(p.valor),
            data_cadastro: Some(p.data_cadastro),
            ativo: p.ativo,
            nome_fornecedor: p.fornecedor.map(|f| f.nome),
        }
    }
}

impl From<Fornecedor> for FornecedorViewModel {
    fn from(f: Fornecedor) -> Self {
        Self {
            id: f.id,
            nome: f.nome,
            documento: f.documento,
            tipo_fornecedor: f.tipo_fornecedor,
            endereco: f.endereco.map(EnderecoViewModel::from),
            ativo: f.ativo,
            produtos: f.produtos.into_iter().map(ProdutoViewModel::from).collect(),
        }
    }
}

// --- View model -> Domínio ---
// Os view models chegam aqui já validados (campos obrigatórios presentes).
// Só os cadastros passam por estas conversões: a identidade é sempre gerada
// aqui e o `id` enviado pelo cliente é ignorado.

impl From<EnderecoViewModel> for Endereco {
    fn from(vm: EnderecoViewModel) -> Self {
        Self {
            id: Uuid::new_v4(),
            fornecedor_id: vm.fornecedor_id,
            logradouro: vm.logradouro,
            numero: vm.numero,
            complemento: vm.complemento,
            cep: vm.cep,
            bairro: vm.bairro,
            cidade: vm.cidade,
            estado: vm.estado,
        }
    }
}

impl From<FornecedorViewModel> for Fornecedor {
    fn from(vm: FornecedorViewModel) -> Self {
        let id = Uuid::new_v4();

        // O endereço sempre pertence a ESTE fornecedor
        let endereco = vm.endereco.map(|e| Endereco {
            fornecedor_id: id,
            ..Endereco::from(e)
        });

        // Produtos não são gravados pelo cadastro do fornecedor
        Self {
            id,
            nome: vm.nome,
            documento: vm.documento,
            tipo_fornecedor: vm.tipo_fornecedor,
            ativo: vm.ativo,
            endereco,
            produtos: Vec::new(),
        }
    }
}

impl From<ProdutoViewModel> for Produto {
    fn from(vm: ProdutoViewModel) -> Self {
        Self {
            id: Uuid::new_v4(),
            fornecedor_id: vm.fornecedor_id.unwrap_or_default(),
            nome: vm.nome,
            descricao: vm.descricao,
            imagem: vm.imagem,
            valor: vm.valor.unwrap_or_default(),
            data_cadastro: vm.data_cadastro.unwrap_or_else(Utc::now),
            ativo: vm.ativo,
            fornecedor: None,
        }
    }
}

impl From<ProdutoImagemViewModel> for Produto {
    fn from(vm: ProdutoImagemViewModel) -> Self {
        Self {
            id: Uuid::new_v4(),
            fornecedor_id: vm.fornecedor_id.unwrap_or_default(),
            nome: vm.nome,
            descricao: vm.descricao,
            imagem: vm.imagem,
            valor: vm.valor.unwrap_or_default(),
            data_cadastro: Utc::now(),
            ativo: vm.ativo,
            fornecedor: None,
        }
    }
}
