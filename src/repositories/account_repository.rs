use crate::database::schema::USER_EMAIL_CONSTRAINT;
use crate::models::account::Account;
use crate::models::pricing::PricingTable;
use crate::models::user::User;
use crate::utils::errors::{is_unique_violation, AppError};
use async_trait::async_trait;
use sqlx::PgPool;
use uuid::Uuid;

#[async_trait]
pub trait AccountRepository: Send + Sync {
    /// Alta de cuenta, administrador y tabla de precios vacía, todo o nada
    async fn create_with_admin(
        &self,
        account: &Account,
        admin: &User,
        pricing: &PricingTable,
    ) -> Result<Account, AppError>;

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Account>, AppError>;
}

pub struct PgAccountRepository {
    pool: PgPool,
}

impl PgAccountRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl AccountRepository for PgAccountRepository {
    async fn create_with_admin(
        &self,
        account: &Account,
        admin: &User,
        pricing: &PricingTable,
    ) -> Result<Account, AppError> {
        let mut tx = self.pool.begin().await?;

        let saved = sqlx::query_as::<_, Account>(
            r#"
            INSERT INTO accounts (id, parking_name, address, phone, created_at)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING *
            "#,
        )
        .bind(account.id)
        .bind(&account.parking_name)
        .bind(&account.address)
        .bind(&account.phone)
        .bind(account.created_at)
        .fetch_one(&mut *tx)
        .await?;

        sqlx::query(
            r#"
            INSERT INTO users (id, account_id, full_name, email, password_hash, role, permissions, is_active, created_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
            "#,
        )
        .bind(admin.id)
        .bind(admin.account_id)
        .bind(&admin.full_name)
        .bind(&admin.email)
        .bind(&admin.password_hash)
        .bind(&admin.role)
        .bind(&admin.permissions)
        .bind(admin.is_active)
        .bind(admin.created_at)
        .execute(&mut *tx)
        .await
        .map_err(|e| {
            if is_unique_violation(&e, USER_EMAIL_CONSTRAINT) {
                AppError::Conflict("Email already registered".to_string())
            } else {
                AppError::Database(e)
            }
        })?;

        sqlx::query(
            r#"
            INSERT INTO pricing_tables (account_id, daily_rates, monthly_rates, pricing_mode, updated_at)
            VALUES ($1, $2, $3, $4, $5)
            "#,
        )
        .bind(pricing.account_id)
        .bind(&pricing.daily_rates)
        .bind(&pricing.monthly_rates)
        .bind(&pricing.pricing_mode)
        .bind(pricing.updated_at)
        .execute(&mut *tx)
        .await?;

        tx.commit().await?;
        Ok(saved)
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Account>, AppError> {
        let result = sqlx::query_as::<_, Account>("SELECT * FROM accounts WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(result)
    }
}
