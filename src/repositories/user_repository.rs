use crate::database::schema::USER_EMAIL_CONSTRAINT;
use crate::models::user::User;
use crate::utils::errors::{is_unique_violation, AppError};
use async_trait::async_trait;
use sqlx::PgPool;
use uuid::Uuid;

/// Administradores y empleados
#[async_trait]
pub trait UserRepository: Send + Sync {
    async fn create(&self, user: &User) -> Result<User, AppError>;

    /// Búsqueda global por email (normalizado), usada en el login
    async fn find_by_email(&self, email: &str) -> Result<Option<User>, AppError>;

    async fn find_by_id(&self, id: Uuid, account_id: Uuid) -> Result<Option<User>, AppError>;

    async fn email_exists(&self, email: &str) -> Result<bool, AppError>;

    async fn list_by_account(&self, account_id: Uuid) -> Result<Vec<User>, AppError>;

    /// Los campos `None` conservan su valor actual
    async fn update_staff(
        &self,
        id: Uuid,
        account_id: Uuid,
        full_name: Option<String>,
        permissions: Option<Vec<String>>,
        is_active: Option<bool>,
    ) -> Result<User, AppError>;
}

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
    async fn create(&self, user: &User) -> Result<User, AppError> {
        sqlx::query_as::<_, User>(
            r#"
            INSERT INTO users (id, account_id, full_name, email, password_hash, role, permissions, is_active, created_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
            RETURNING *
            "#,
        )
        .bind(user.id)
        .bind(user.account_id)
        .bind(&user.full_name)
        .bind(&user.email)
        .bind(&user.password_hash)
        .bind(&user.role)
        .bind(&user.permissions)
        .bind(user.is_active)
        .bind(user.created_at)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| {
            if is_unique_violation(&e, USER_EMAIL_CONSTRAINT) {
                AppError::Conflict("Email already registered".to_string())
            } else {
                AppError::Database(e)
            }
        })
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<User>, AppError> {
        let result = sqlx::query_as::<_, User>("SELECT * FROM users WHERE email = $1")
            .bind(email.trim().to_lowercase())
            .fetch_optional(&self.pool)
            .await?;

        Ok(result)
    }

    async fn find_by_id(&self, id: Uuid, account_id: Uuid) -> Result<Option<User>, AppError> {
        let result = sqlx::query_as::<_, User>("SELECT * FROM users WHERE id = $1 AND account_id = $2")
            .bind(id)
            .bind(account_id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(result)
    }

    async fn email_exists(&self, email: &str) -> Result<bool, AppError> {
        let result: (bool,) = sqlx::query_as("SELECT EXISTS(SELECT 1 FROM users WHERE email = $1)")
            .bind(email.trim().to_lowercase())
            .fetch_one(&self.pool)
            .await?;

        Ok(result.0)
    }

    async fn list_by_account(&self, account_id: Uuid) -> Result<Vec<User>, AppError> {
        let result = sqlx::query_as::<_, User>(
            "SELECT * FROM users WHERE account_id = $1 ORDER BY created_at DESC",
        )
        .bind(account_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(result)
    }

    async fn update_staff(
        &self,
        id: Uuid,
        account_id: Uuid,
        full_name: Option<String>,
        permissions: Option<Vec<String>>,
        is_active: Option<bool>,
    ) -> Result<User, AppError> {
        // Obtener usuario actual
        let current = self
            .find_by_id(id, account_id)
            .await?
            .ok_or_else(|| AppError::NotFound("User not found".to_string()))?;

        let user = sqlx::query_as::<_, User>(
            r#"
            UPDATE users
            SET full_name = $3, permissions = $4, is_active = $5
            WHERE id = $1 AND account_id = $2
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(account_id)
        .bind(full_name.unwrap_or(current.full_name))
        .bind(permissions.unwrap_or(current.permissions))
        .bind(is_active.unwrap_or(current.is_active))
        .fetch_one(&self.pool)
        .await?;

        Ok(user)
    }
}
