use async_trait::async_trait;
use sqlx::PgPool;
use uuid::Uuid;

use crate::models::pricing::PricingTable;
use crate::utils::errors::AppResult;

/// Acceso a las tablas de precios por cuenta
#[async_trait]
pub trait PricingRepository: Send + Sync {
    async fn find_by_account(&self, account_id: Uuid) -> AppResult<Option<PricingTable>>;

    async fn upsert(&self, table: &PricingTable) -> AppResult<PricingTable>;
}

pub struct PgPricingRepository {
    pool: PgPool,
}

impl PgPricingRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl PricingRepository for PgPricingRepository {
    async fn find_by_account(&self, account_id: Uuid) -> AppResult<Option<PricingTable>> {
        let table = sqlx::query_as::<_, PricingTable>("SELECT * FROM pricing_tables WHERE account_id = $1")
            .bind(account_id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(table)
    }

    async fn upsert(&self, table: &PricingTable) -> AppResult<PricingTable> {
        let saved = sqlx::query_as::<_, PricingTable>(
            r#"
            INSERT INTO pricing_tables (account_id, daily_rates, monthly_rates, pricing_mode, updated_at)
            VALUES ($1, $2, $3, $4, $5)
            ON CONFLICT (account_id) DO UPDATE
            SET daily_rates = EXCLUDED.daily_rates,
                monthly_rates = EXCLUDED.monthly_rates,
                pricing_mode = EXCLUDED.pricing_mode,
                updated_at = EXCLUDED.updated_at
            RETURNING *
            "#,
        )
        .bind(table.account_id)
        .bind(&table.daily_rates)
        .bind(&table.monthly_rates)
        .bind(&table.pricing_mode)
        .bind(table.updated_at)
        .fetch_one(&self.pool)
        .await?;

        Ok(saved)
    }
}
