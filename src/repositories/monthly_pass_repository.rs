use crate::models::monthly_pass::MonthlyPass;
use crate::utils::errors::AppError;
use async_trait::async_trait;
use chrono::NaiveDate;
use sqlx::PgPool;
use uuid::Uuid;

/// Abonos mensuales; las fechas de fin son exclusivas
#[async_trait]
pub trait MonthlyPassRepository: Send + Sync {
    async fn create(&self, pass: &MonthlyPass) -> Result<MonthlyPass, AppError>;

    /// ¿Hay un abono activo de la matrícula que se solape con [start, end)?
    async fn overlapping_exists(
        &self,
        account_id: Uuid,
        vehicle_number: &str,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<bool, AppError>;

    async fn find_active_for_vehicle(
        &self,
        account_id: Uuid,
        vehicle_number: &str,
        day: NaiveDate,
    ) -> Result<Option<MonthlyPass>, AppError>;

    /// Con `active_on` solo los abonos vigentes ese día
    async fn list(&self, account_id: Uuid, active_on: Option<NaiveDate>) -> Result<Vec<MonthlyPass>, AppError>;

    /// Desactiva el abono; `None` si no existe en la cuenta
    async fn cancel(&self, id: Uuid, account_id: Uuid) -> Result<Option<MonthlyPass>, AppError>;
}

pub struct PgMonthlyPassRepository {
    pool: PgPool,
}

impl PgMonthlyPassRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl MonthlyPassRepository for PgMonthlyPassRepository {
    async fn create(&self, pass: &MonthlyPass) -> Result<MonthlyPass, AppError> {
        let saved = sqlx::query_as::<_, MonthlyPass>(
            r#"
            INSERT INTO monthly_passes (
                id, account_id, vehicle_number, vehicle_type, owner_name, owner_phone,
                months, amount, start_date, end_date, is_active, created_by, created_at
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13)
            RETURNING *
            "#,
        )
        .bind(pass.id)
        .bind(pass.account_id)
        .bind(&pass.vehicle_number)
        .bind(&pass.vehicle_type)
        .bind(&pass.owner_name)
        .bind(&pass.owner_phone)
        .bind(pass.months)
        .bind(pass.amount)
        .bind(pass.start_date)
        .bind(pass.end_date)
        .bind(pass.is_active)
        .bind(pass.created_by)
        .bind(pass.created_at)
        .fetch_one(&self.pool)
        .await?;

        Ok(saved)
    }

    async fn overlapping_exists(
        &self,
        account_id: Uuid,
        vehicle_number: &str,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<bool, AppError> {
        let result: (bool,) = sqlx::query_as(
            r#"
            SELECT EXISTS(
                SELECT 1 FROM monthly_passes
                WHERE account_id = $1 AND vehicle_number = $2 AND is_active = TRUE
                  AND start_date < $4 AND end_date > $3
            )
            "#,
        )
        .bind(account_id)
        .bind(vehicle_number)
        .bind(start)
        .bind(end)
        .fetch_one(&self.pool)
        .await?;

        Ok(result.0)
    }

    async fn find_active_for_vehicle(
        &self,
        account_id: Uuid,
        vehicle_number: &str,
        day: NaiveDate,
    ) -> Result<Option<MonthlyPass>, AppError> {
        let result = sqlx::query_as::<_, MonthlyPass>(
            r#"
            SELECT * FROM monthly_passes
            WHERE account_id = $1 AND vehicle_number = $2 AND is_active = TRUE
              AND start_date <= $3 AND end_date > $3
            ORDER BY end_date DESC
            LIMIT 1
            "#,
        )
        .bind(account_id)
        .bind(vehicle_number)
        .bind(day)
        .fetch_optional(&self.pool)
        .await?;

        Ok(result)
    }

    async fn list(
        &self,
        account_id: Uuid,
        active_on: Option<NaiveDate>,
    ) -> Result<Vec<MonthlyPass>, AppError> {
        let result = match active_on {
            Some(day) => {
                sqlx::query_as::<_, MonthlyPass>(
                    r#"
                    SELECT * FROM monthly_passes
                    WHERE account_id = $1 AND is_active = TRUE AND start_date <= $2 AND end_date > $2
                    ORDER BY end_date ASC
                    "#,
                )
                .bind(account_id)
                .bind(day)
                .fetch_all(&self.pool)
                .await?
            }
            None => {
                sqlx::query_as::<_, MonthlyPass>(
                    "SELECT * FROM monthly_passes WHERE account_id = $1 ORDER BY created_at DESC",
                )
                .bind(account_id)
                .fetch_all(&self.pool)
                .await?
            }
        };

        Ok(result)
    }

    async fn cancel(&self, id: Uuid, account_id: Uuid) -> Result<Option<MonthlyPass>, AppError> {
        let result = sqlx::query_as::<_, MonthlyPass>(
            "UPDATE monthly_passes SET is_active = FALSE WHERE id = $1 AND account_id = $2 RETURNING *",
        )
        .bind(id)
        .bind(account_id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(result)
    }
}
