// src/models/produto.rs

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use sqlx::FromRow;
use uuid::Uuid;
use validator::{Validate, ValidationError};

use crate::models::fornecedor::Fornecedor;

fn validate_positive(val: &Decimal) -> Result<(), ValidationError> {
    if *val <= Decimal::ZERO {
        let mut err = ValidationError::new("range");
        err.add_param("min".into(), &0.0);
        err.message = Some("O campo Valor precisa ser maior que 0".into());
        return Err(err);
    }
    Ok(())
}

// --- Produto ---
// `fornecedor` só vem preenchido nas leituras com JOIN.
#[derive(Debug, Clone, FromRow, Validate)]
pub struct Produto {
    pub id: Uuid,
    pub fornecedor_id: Uuid,

    #[validate(length(min = 2, max = 200, message = "O campo Nome precisa ter entre 2 e 200 caracteres"))]
    pub nome: String,

    #[validate(length(min = 2, max = 1000, message = "O campo Descricao precisa ter entre 2 e 1000 caracteres"))]
    pub descricao: String,

    // Nome do arquivo gravado em disco
    pub imagem: String,

    #[validate(custom(function = "validate_positive"))]
    pub valor: Decimal,

    pub data_cadastro: DateTime<Utc>,
    pub ativo: bool,

    #[sqlx(skip)]
    pub fornecedor: Option<Fornecedor>,
}
