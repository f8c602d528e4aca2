// src/view_models/produto.rs

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ProdutoViewModel {
    #[serde(default)]
    pub id: Uuid,

    #[validate(required(message = "O campo FornecedorId é obrigatório"))]
    pub fornecedor_id: Option<Uuid>,

    #[serde(default)]
    #[validate(length(min = 2, max = 200, message = "O campo Nome precisa ter entre 2 e 200 caracteres"))]
    #[schema(example = "Caneta Azul")]
    pub nome: String,

    #[serde(default)]
    #[validate(length(min = 2, max = 1000, message = "O campo Descricao precisa ter entre 2 e 1000 caracteres"))]
    #[schema(example = "Caneta esferográfica azul")]
    pub descricao: String,

    // Conteúdo da imagem em base64 (só na entrada)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub imagem_upload: Option<String>,

    #[serde(default)]
    #[schema(example = "caneta.png")]
    pub imagem: String,

    #[validate(required(message = "O campo Valor é obrigatório"))]
    #[schema(example = 10.5)]
    pub valor: Option<Decimal>,

    // Somente leitura
    #[serde(default)]
    pub data_cadastro: Option<DateTime<Utc>>,

    #[serde(default)]
    pub ativo: bool,

    // Somente leitura: vem do JOIN com o fornecedor
    #[serde(default)]
    pub nome_fornecedor: Option<String>,
}

/// Arquivo recebido via multipart.
#[derive(Debug, Clone)]
pub struct ArquivoUpload {
    pub nome_arquivo: String,
    pub content_type: Option<String>,
    pub conteudo: Vec<u8>,
}

/// Variante do produto para o upload via `multipart/form-data`.
#[derive(Debug, Clone, Default, Validate)]
pub struct ProdutoImagemViewModel {
    pub id: Uuid,

    #[validate(required(message = "O campo FornecedorId é obrigatório"))]
    pub fornecedor_id: Option<Uuid>,

    #[validate(length(min = 2, max = 200, message = "O campo Nome precisa ter entre 2 e 200 caracteres"))]
    pub nome: String,

    #[validate(length(min = 2, max = 1000, message = "O campo Descricao precisa ter entre 2 e 1000 caracteres"))]
    pub descricao: String,

    pub imagem_upload: Option<ArquivoUpload>,
    pub imagem: String,

    #[validate(required(message = "O campo Valor é obrigatório"))]
    pub valor: Option<Decimal>,

    pub ativo: bool,
}

/// Metadados devolvidos por `POST /produtos/imagem`.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ArquivoViewModel {
    pub nome_arquivo: String,
    pub content_type: Option<String>,
    pub tamanho: usize,
}
