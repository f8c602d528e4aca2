// src/models/auth.rs

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

// Representa um usuário vindo do banco de dados (store de identidade)
#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: Uuid,
    pub email: String,

    #[serde(skip_serializing)] // IMPORTANTE para segurança
    pub password_hash: String,

    // Não há fluxo de confirmação: o cadastro já nasce confirmado.
    pub email_confirmed: bool,

    // Controle de bloqueio por tentativas inválidas
    pub access_failed_count: i32,
    pub lockout_end: Option<DateTime<Utc>>,

    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl User {
    pub fn is_locked_out(&self, now: DateTime<Utc>) -> bool {
        self.lockout_end.is_some_and(|end| end > now)
    }
}

// Claim de permissão: recurso ("Fornecedor") -> ações ("Adicionar,Atualizar")
#[derive(Debug, Clone, PartialEq, Eq, sqlx::FromRow)]
pub struct UserClaim {
    pub claim_type: String,
    pub claim_value: String,
}

// Estrutura de dados ("claims") dentro do JWT
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    pub sub: Uuid,   // Subject (ID do usuário)
    pub email: String,
    pub jti: Uuid,   // ID único do token
    pub nbf: i64,    // Not before (Unix epoch)
    pub iat: i64,    // Issued At (Unix epoch)
    pub exp: i64,    // Expiration time (Unix epoch)
    pub iss: String, // Emissor
    pub aud: String, // Válido em

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub role: Vec<String>,

    // Claims de permissão, cada recurso vira uma chave no payload:
    // { "Fornecedor": "Adicionar,Atualizar", "Produto": "Adicionar" }
    #[serde(flatten)]
    pub permissions: BTreeMap<String, String>,
}

impl Claims {
    pub fn has_permission(&self, resource: &str, action: &str) -> bool {
        self.permissions
            .get(resource)
            .is_some_and(|actions| actions.split(',').any(|a| a.trim() == action))
    }
}
