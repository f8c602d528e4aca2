// src/services/auth.rs

use std::{collections::BTreeMap, sync::Arc};

use bcrypt::{hash, verify};
use chrono::{TimeDelta, Utc};
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use uuid::Uuid;
use validator::ValidateEmail;

use crate::{
    common::{error::AppError, i18n::IdentityError},
    config::{JwtSettings, LockoutSettings},
    db::UserRepository,
    models::auth::{Claims, User},
    view_models::auth::{ClaimViewModel, LoginResponseViewModel, UserTokenViewModel},
};

pub const TAMANHO_MINIMO_SENHA: usize = 6;

// Nomes já usados no payload do token; uma claim de permissão com um deles
// duplicaria a chave no JSON
pub const CLAIMS_RESERVADAS: &[&str] = &["sub", "email", "jti", "nbf", "iat", "exp", "iss", "aud", "role"];

#[derive(Debug)]
pub enum IdentityResult {
    Succeeded(User),
    Failed(Vec<IdentityError>),
}

#[derive(Debug)]
pub enum SignInResult {
    Succeeded(User),
    LockedOut,
    Failed,
}

#[derive(Clone)]
pub struct AuthService {
    user_repo: Arc<dyn UserRepository>,
    jwt: JwtSettings,
    lockout: LockoutSettings,
    bcrypt_cost: u32,
}

impl AuthService {
    pub fn new(
        user_repo: Arc<dyn UserRepository>,
        jwt: JwtSettings,
        lockout: LockoutSettings,
        bcrypt_cost: u32,
    ) -> Self {
        Self {
            user_repo,
            jwt,
            lockout,
            bcrypt_cost,
        }
    }

    // Cria o usuário já com o e-mail confirmado (não há fluxo de confirmação)
    pub async fn register_user(&self, email: &str, password: &str) -> Result<IdentityResult, AppError> {
        let mut errors = Vec::new();

        if !email.validate_email() {
            errors.push(IdentityError::InvalidEmail(email.to_string()));
        }
        errors.extend(password_policy(password));

        if self.user_repo.find_by_email(email).await?.is_some() {
            errors.push(IdentityError::DuplicateEmail(email.to_string()));
        }

        if !errors.is_empty() {
            return Ok(IdentityResult::Failed(errors));
        }

        // Hashing é CPU-bound: fora do executor async
        let password_clone = password.to_owned();
        let cost = self.bcrypt_cost;
        let hashed_password = tokio::task::spawn_blocking(move || hash(&password_clone, cost))
            .await
            .map_err(|e| anyhow::anyhow!("Falha na task de hashing: {}", e))??;

        match self.user_repo.create_user(email, &hashed_password).await {
            Ok(user) => {
                tracing::info!(user_id = %user.id, "Usuário registrado");
                Ok(IdentityResult::Succeeded(user))
            }
            // Corrida entre a checagem acima e o INSERT
            Err(AppError::EmailAlreadyExists) => Ok(IdentityResult::Failed(vec![IdentityError::DuplicateEmail(
                email.to_string(),
            )])),
            Err(e) => Err(e),
        }
    }

    /// Login com bloqueio: a conta bloqueada responde `LockedOut` antes mesmo
    /// de a senha ser conferida.
    pub async fn password_sign_in(&self, email: &str, password: &str) -> Result<SignInResult, AppError> {
        let Some(user) = self.user_repo.find_by_email(email).await? else {
            return Ok(SignInResult::Failed);
        };

        let now = Utc::now();
        if user.is_locked_out(now) {
            tracing::warn!(user_id = %user.id, "Tentativa de login em conta bloqueada");
            return Ok(SignInResult::LockedOut);
        }

        let password_clone = password.to_owned();
        let password_hash_clone = user.password_hash.clone();
        let is_password_valid = tokio::task::spawn_blocking(move || verify(&password_clone, &password_hash_clone))
            .await
            .map_err(|e| anyhow::anyhow!("Falha na task de verificação de senha: {}", e))??;

        if is_password_valid {
            if user.access_failed_count != 0 || user.lockout_end.is_some() {
                self.user_repo.update_lockout(user.id, 0, None).await?;
            }
            tracing::info!(user_id = %user.id, "Usuário logado com sucesso");
            return Ok(SignInResult::Succeeded(user));
        }

        let falhas = user.access_failed_count + 1;
        if falhas >= self.lockout.max_tentativas {
            let lockout_end = now + self.lockout.duracao;
            self.user_repo.update_lockout(user.id, 0, Some(lockout_end)).await?;
            tracing::warn!(user_id = %user.id, %lockout_end, "Usuário bloqueado por tentativas inválidas");
            return Ok(SignInResult::LockedOut);
        }

        self.user_repo.update_lockout(user.id, falhas, None).await?;
        Ok(SignInResult::Failed)
    }

    pub async fn generate_jwt(&self, email: &str) -> Result<LoginResponseViewModel, AppError> {
        let user = self.user_repo.find_by_email(email).await?.ok_or(AppError::NotFound)?;
        let (user_claims, reservadas): (Vec<_>, Vec<_>) = self
            .user_repo
            .get_claims(user.id)
            .await?
            .into_iter()
            .partition(|c| !CLAIMS_RESERVADAS.contains(&c.claim_type.as_str()));
        for claim in &reservadas {
            tracing::warn!(user_id = %user.id, claim_type = %claim.claim_type, "Claim com nome reservado ignorada");
        }
        let roles = self.user_repo.get_roles(user.id).await?;

        let now = Utc::now();
        let expires_at = now + TimeDelta::hours(self.jwt.expiracao_horas);

        // Mesma claim repetida: as ações são somadas
        let mut permissions: BTreeMap<String, String> = BTreeMap::new();
        for claim in &user_claims {
            permissions
                .entry(claim.claim_type.clone())
                .and_modify(|actions| {
                    actions.push(',');
                    actions.push_str(&claim.claim_value);
                })
                .or_insert_with(|| claim.claim_value.clone());
        }

        let claims = Claims {
            sub: user.id,
            email: user.email.clone(),
            jti: Uuid::new_v4(),
            nbf: now.timestamp(),
            iat: now.timestamp(),
            exp: expires_at.timestamp(),
            iss: self.jwt.emissor.clone(),
            aud: self.jwt.valido_em.clone(),
            role: roles.clone(),
            permissions,
        };

        let access_token = encode(
            &Header::new(Algorithm::HS256),
            &claims,
            &EncodingKey::from_secret(self.jwt.segredo.as_bytes()),
        )?;

        let mut claim_list: Vec<ClaimViewModel> = user_claims
            .into_iter()
            .map(|c| ClaimViewModel {
                value: c.claim_value,
                claim_type: c.claim_type,
            })
            .collect();
        claim_list.extend([
            claim("sub", user.id.to_string()),
            claim("email", user.email.clone()),
            claim("jti", claims.jti.to_string()),
            claim("nbf", claims.nbf.to_string()),
            claim("iat", claims.iat.to_string()),
        ]);
        claim_list.extend(roles.into_iter().map(|role| claim("role", role)));

        Ok(LoginResponseViewModel {
            access_token,
            expires_in: TimeDelta::hours(self.jwt.expiracao_horas).num_seconds() as f64,
            user_token: UserTokenViewModel {
                id: user.id.to_string(),
                email: user.email,
                claims: claim_list,
            },
        })
    }

    // Assinatura, validade, emissor e audiência
    pub fn validate_token(&self, token: &str) -> Result<Claims, AppError> {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.set_issuer(&[&self.jwt.emissor]);
        validation.set_audience(&[&self.jwt.valido_em]);
        validation.validate_nbf = true;

        decode::<Claims>(
            token,
            &DecodingKey::from_secret(self.jwt.segredo.as_bytes()),
            &validation,
        )
        .map(|data| data.claims)
        .map_err(|e| {
            tracing::debug!("Token rejeitado: {}", e);
            AppError::InvalidToken
        })
    }
}

fn claim(claim_type: &str, value: String) -> ClaimViewModel {
    ClaimViewModel {
        value,
        claim_type: claim_type.to_string(),
    }
}

/// Política de senha: tamanho mínimo, dígito, minúscula, maiúscula e um
/// caractere não alfanumérico.
pub fn password_policy(password: &str) -> Vec<IdentityError> {
    let mut errors = Vec::new();

    if password.chars().count() < TAMANHO_MINIMO_SENHA {
        errors.push(IdentityError::PasswordTooShort(TAMANHO_MINIMO_SENHA));
    }
    if password.chars().all(char::is_alphanumeric) {
        errors.push(IdentityError::PasswordRequiresNonAlphanumeric);
    }
    if !password.chars().any(|c| c.is_ascii_digit()) {
        errors.push(IdentityError::PasswordRequiresDigit);
    }
    if !password.chars().any(|c| c.is_lowercase()) {
        errors.push(IdentityError::PasswordRequiresLower);
    }
    if !password.chars().any(|c| c.is_uppercase()) {
        errors.push(IdentityError::PasswordRequiresUpper);
    }

    errors
}
