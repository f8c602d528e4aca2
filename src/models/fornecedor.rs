// src/models/fornecedor.rs

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;
use validator::{Validate, ValidationError, ValidationErrors};

use crate::models::documento::{cnpj_valido, cpf_valido, TAMANHO_CNPJ, TAMANHO_CPF};
use crate::models::produto::Produto;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, sqlx::Type, PartialEq, Eq, ToSchema)]
#[sqlx(type_name = "tipo_fornecedor", rename_all = "SCREAMING_SNAKE_CASE")] // Banco
#[serde(rename_all = "SCREAMING_SNAKE_CASE")] // JSON
pub enum TipoFornecedor {
    PessoaFisica,   // Vira "PESSOA_FISICA" (CPF)
    PessoaJuridica, // Vira "PESSOA_JURIDICA" (CNPJ)
}

// --- Fornecedor ---
// `endereco` e `produtos` só vêm preenchidos nas leituras com JOIN.
#[derive(Debug, Clone, FromRow, Validate)]
pub struct Fornecedor {
    pub id: Uuid,

    #[validate(length(min = 2, max = 100, message = "O campo Nome precisa ter entre 2 e 100 caracteres"))]
    pub nome: String,

    pub documento: String,
    pub tipo_fornecedor: TipoFornecedor,
    pub ativo: bool,

    #[sqlx(skip)]
    pub endereco: Option<Endereco>,

    #[sqlx(skip)]
    pub produtos: Vec<Produto>,
}

impl Fornecedor {
    /// Regra do documento: tamanho fixo por tipo + dígitos verificadores.
    pub fn validate_documento(&self) -> Result<(), ValidationError> {
        let (tamanho, valido) = match self.tipo_fornecedor {
            TipoFornecedor::PessoaFisica => (TAMANHO_CPF, cpf_valido(&self.documento)),
            TipoFornecedor::PessoaJuridica => (TAMANHO_CNPJ, cnpj_valido(&self.documento)),
        };

        let fornecido = self.documento.chars().count();
        if fornecido != tamanho {
            let mut err = ValidationError::new("length");
            err.message = Some(
                format!("O campo Documento precisa ter {tamanho} caracteres e foi fornecido {fornecido}.").into(),
            );
            return Err(err);
        }

        if !valido {
            let mut err = ValidationError::new("documento");
            err.message = Some("O documento fornecido é inválido.".into());
            return Err(err);
        }

        Ok(())
    }

    /// Validação completa do cadastro: campos + documento.
    pub fn validate_cadastro(&self) -> Result<(), ValidationErrors> {
        let mut errors = match self.validate() {
            Ok(()) => ValidationErrors::new(),
            Err(errors) => errors,
        };

        if let Err(e) = self.validate_documento() {
            errors.add("documento", e);
        }

        if errors.is_empty() { Ok(()) } else { Err(errors) }
    }
}

// --- Endereço (1:1 com o fornecedor) ---
#[derive(Debug, Clone, PartialEq, Eq, FromRow, Validate)]
pub struct Endereco {
    pub id: Uuid,
    pub fornecedor_id: Uuid,

    #[validate(length(min = 2, max = 200, message = "O campo Logradouro precisa ter entre 2 e 200 caracteres"))]
    pub logradouro: String,

    #[validate(length(min = 1, max = 50, message = "O campo Numero precisa ter entre 1 e 50 caracteres"))]
    pub numero: String,

    #[validate(length(max = 250, message = "O campo Complemento precisa ter no máximo 250 caracteres"))]
    pub complemento: Option<String>,

    #[validate(length(equal = 8, message = "O campo Cep precisa ter 8 caracteres"))]
    pub cep: String,

    #[validate(length(min = 2, max = 100, message = "O campo Bairro precisa ter entre 2 e 100 caracteres"))]
    pub bairro: String,

    #[validate(length(min = 2, max = 100, message = "O campo Cidade precisa ter entre 2 e 100 caracteres"))]
    pub cidade: String,

    #[validate(length(min = 2, max = 50, message = "O campo Estado precisa ter entre 2 e 50 caracteres"))]
    pub estado: String,
}
