// src/view_models/auth.rs

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::{Validate, ValidationError, ValidationErrors};

// Dados para registro de um novo usuário
#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct RegisterUserViewModel {
    #[serde(default)]
    #[validate(email(message = "O campo Email está em formato inválido"))]
    #[schema(example = "usuario@empresa.com")]
    pub email: String,

    #[serde(default)]
    #[validate(length(min = 6, max = 100, message = "O campo Password precisa ter entre 6 e 100 caracteres"))]
    #[schema(example = "Senha@123")]
    pub password: String,

    #[serde(default)]
    #[schema(example = "Senha@123")]
    pub confirm_password: String,
}

impl RegisterUserViewModel {
    // Validação padrão + conferência das senhas
    pub fn validate_model(&self) -> Result<(), ValidationErrors> {
        let mut errors = match self.validate() {
            Ok(()) => ValidationErrors::new(),
            Err(errors) => errors,
        };

        if self.password != self.confirm_password {
            let mut err = ValidationError::new("must_match");
            err.message = Some("As senhas não conferem.".into());
            errors.add("confirm_password", err);
        }

        if errors.is_empty() { Ok(()) } else { Err(errors) }
    }
}

// Dados para login
#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct LoginUserViewModel {
    #[serde(default)]
    #[validate(email(message = "O campo Email está em formato inválido"))]
    #[schema(example = "usuario@empresa.com")]
    pub email: String,

    #[serde(default)]
    #[validate(length(min = 6, max = 100, message = "O campo Password precisa ter entre 6 e 100 caracteres"))]
    #[schema(example = "Senha@123")]
    pub password: String,
}

// Resposta de autenticação com o token
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct LoginResponseViewModel {
    pub access_token: String,
    // Em segundos
    pub expires_in: f64,
    pub user_token: UserTokenViewModel,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UserTokenViewModel {
    pub id: String,
    pub email: String,
    pub claims: Vec<ClaimViewModel>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct ClaimViewModel {
    pub value: String,
    #[serde(rename = "type")]
    pub claim_type: String,
}
