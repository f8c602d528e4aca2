// src/view_models/fornecedor.rs

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

use crate::models::fornecedor::TipoFornecedor;
use crate::view_models::produto::ProdutoViewModel;

#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct FornecedorViewModel {
    #[serde(default)]
    #[schema(example = "550e8400-e29b-41d4-a716-446655440000")]
    pub id: Uuid,

    #[serde(default)]
    #[validate(length(min = 2, max = 100, message = "O campo Nome precisa ter entre 2 e 100 caracteres"))]
    #[schema(example = "Papelaria Central")]
    pub nome: String,

    #[serde(default)]
    #[validate(length(min = 11, max = 14, message = "O campo Documento precisa ter entre 11 e 14 caracteres"))]
    #[schema(example = "11222333000181")]
    pub documento: String,

    #[schema(example = "PESSOA_JURIDICA")]
    pub tipo_fornecedor: TipoFornecedor,

    #[validate(nested)]
    pub endereco: Option<EnderecoViewModel>,

    #[serde(default)]
    #[schema(example = true)]
    pub ativo: bool,

    // Somente leitura: preenchido no GET por id
    #[serde(default)]
    pub produtos: Vec<ProdutoViewModel>,
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct EnderecoViewModel {
    #[serde(default)]
    pub id: Uuid,

    #[serde(default)]
    #[validate(length(min = 2, max = 200, message = "O campo Logradouro precisa ter entre 2 e 200 caracteres"))]
    #[schema(example = "Rua das Flores")]
    pub logradouro: String,

    #[serde(default)]
    #[validate(length(min = 1, max = 50, message = "O campo Numero precisa ter entre 1 e 50 caracteres"))]
    #[schema(example = "123")]
    pub numero: String,

    #[schema(example = "Sala 2")]
    #[validate(length(max = 250, message = "O campo Complemento precisa ter no máximo 250 caracteres"))]
    pub complemento: Option<String>,

    #[serde(default)]
    #[validate(length(equal = 8, message = "O campo Cep precisa ter 8 caracteres"))]
    #[schema(example = "01310000")]
    pub cep: String,

    #[serde(default)]
    #[validate(length(min = 2, max = 100, message = "O campo Bairro precisa ter entre 2 e 100 caracteres"))]
    #[schema(example = "Centro")]
    pub bairro: String,

    #[serde(default)]
    #[validate(length(min = 2, max = 100, message = "O campo Cidade precisa ter entre 2 e 100 caracteres"))]
    #[schema(example = "São Paulo")]
    pub cidade: String,

    #[serde(default)]
    #[validate(length(min = 2, max = 50, message = "O campo Estado precisa ter entre 2 e 50 caracteres"))]
    #[schema(example = "SP")]
    pub estado: String,

    #[serde(default)]
    pub fornecedor_id: Uuid,
}
