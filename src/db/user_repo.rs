// src/db/user_repo.rs

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;
use uuid::Uuid;

use crate::{
    common::error::AppError,
    models::auth::{User, UserClaim},
};

// Store de identidade: usuários, papéis e claims de permissão
#[async_trait]
pub trait UserRepository: Send + Sync {
    async fn find_by_email(&self, email: &str) -> Result<Option<User>, AppError>;

    async fn find_by_id(&self, id: Uuid) -> Result<Option<User>, AppError>;

    async fn create_user(&self, email: &str, password_hash: &str) -> Result<User, AppError>;

    async fn get_roles(&self, user_id: Uuid) -> Result<Vec<String>, AppError>;

    async fn get_claims(&self, user_id: Uuid) -> Result<Vec<UserClaim>, AppError>;

    // Grava o contador de falhas e o fim do bloqueio numa única escrita
    async fn update_lockout(
        &self,
        user_id: Uuid,
        access_failed_count: i32,
        lockout_end: Option<DateTime<Utc>>,
    ) -> Result<(), AppError>;
}

#[derive(Clone)]
pub struct PgUserRepository {
    pool: PgPool,
}

impl PgUserRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl UserRepository for PgUserRepository {
    // E-mail comparado sem diferenciar maiúsculas
    async fn find_by_email(&self, email: &str) -> Result<Option<User>, AppError> {
        let user = sqlx::query_as::<_, User>(
            r#"
            SELECT id, email, password_hash, email_confirmed, access_failed_count,
                   lockout_end, created_at, updated_at
            FROM users
            WHERE lower(email) = lower($1)
            "#,
        )
        .bind(email)
        .fetch_optional(&self.pool)
        .await?;
        Ok(user)
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<User>, AppError> {
        let user = sqlx::query_as::<_, User>(
            r#"
            SELECT id, email, password_hash, email_confirmed, access_failed_count,
                   lockout_end, created_at, updated_at
            FROM users
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(user)
    }

    async fn create_user(&self, email: &str, password_hash: &str) -> Result<User, AppError> {
        sqlx::query_as::<_, User>(
            r#"
            INSERT INTO users (id, email, password_hash, email_confirmed)
            VALUES ($1, $2, $3, TRUE)
            RETURNING id, email, password_hash, email_confirmed, access_failed_count,
                      lockout_end, created_at, updated_at
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(email)
        .bind(password_hash)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| {
            if let sqlx::Error::Database(db_err) = &e {
                if db_err.is_unique_violation() {
                    return AppError::EmailAlreadyExists;
                }
            }
            AppError::DatabaseError(e)
        })
    }

    async fn get_roles(&self, user_id: Uuid) -> Result<Vec<String>, AppError> {
        let roles = sqlx::query_scalar::<_, String>(
            r#"
            SELECT r.name
            FROM roles r
            INNER JOIN user_roles ur ON ur.role_id = r.id
            WHERE ur.user_id = $1
            ORDER BY r.name
            "#,
        )
        .bind(user_id)
        .fetch_all(&self.pool)
        .await?;
        Ok(roles)
    }

    async fn get_claims(&self, user_id: Uuid) -> Result<Vec<UserClaim>, AppError> {
        let claims = sqlx::query_as::<_, UserClaim>(
            "SELECT claim_type, claim_value FROM user_claims WHERE user_id = $1 ORDER BY id",
        )
        .bind(user_id)
        .fetch_all(&self.pool)
        .await?;
        Ok(claims)
    }

    async fn update_lockout(
        &self,
        user_id: Uuid,
        access_failed_count: i32,
        lockout_end: Option<DateTime<Utc>>,
    ) -> Result<(), AppError> {
        sqlx::query(
            r#"
            UPDATE users
            SET access_failed_count = $2, lockout_end = $3, updated_at = NOW()
            WHERE id = $1
            "#,
        )
        .bind(user_id)
        .bind(access_failed_count)
        .bind(lockout_end)
        .execute(&self.pool)
        .await?;
        Ok(())
    }
}
