use async_trait::async_trait;
use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use sqlx::{FromRow, PgPool};
use uuid::Uuid;

use crate::utils::errors::AppError;

/// Ventana [start, end) en UTC que corresponde a un día local
#[derive(Debug, Clone, Copy)]
pub struct DayWindow {
    pub day: NaiveDate,
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
}

#[derive(Debug, Clone, FromRow)]
pub struct CategoryRevenueRow {
    pub vehicle_type: String,
    pub checkouts: i64,
    pub revenue: Decimal,
}

#[derive(Debug, Clone)]
pub struct DashboardSnapshot {
    pub vehicles_parked: i64,
    pub checkins: i64,
    pub checkouts: i64,
    pub revenue: Decimal,
    pub by_category: Vec<CategoryRevenueRow>,
    pub active_passes: i64,
    pub pass_revenue: Decimal,
}

impl DashboardSnapshot {
    /// Totales del día a partir del desglose por categoría
    pub fn from_parts(
        vehicles_parked: i64,
        checkins: i64,
        by_category: Vec<CategoryRevenueRow>,
        active_passes: i64,
        pass_revenue: Decimal,
    ) -> Self {
        let checkouts: i64 = by_category.iter().map(|row| row.checkouts).sum();
        let revenue: Decimal = by_category.iter().map(|row| row.revenue).sum();

        Self {
            vehicles_parked,
            checkins,
            checkouts,
            revenue,
            by_category,
            active_passes,
            pass_revenue,
        }
    }
}

/// Agregados del panel diario
#[async_trait]
pub trait DashboardRepository: Send + Sync {
    async fn snapshot(&self, account_id: Uuid, window: DayWindow) -> Result<DashboardSnapshot, AppError>;
}

pub struct PgDashboardRepository {
    pool: PgPool,
}

impl PgDashboardRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl DashboardRepository for PgDashboardRepository {
    async fn snapshot(&self, account_id: Uuid, window: DayWindow) -> Result<DashboardSnapshot, AppError> {
        let (vehicles_parked,): (i64,) = sqlx::query_as(
            "SELECT COUNT(*) FROM vehicle_checkins WHERE account_id = $1 AND checked_out = FALSE",
        )
        .bind(account_id)
        .fetch_one(&self.pool)
        .await?;

        let (checkins,): (i64,) = sqlx::query_as(
            "SELECT COUNT(*) FROM vehicle_checkins WHERE account_id = $1 AND entry_time >= $2 AND entry_time < $3",
        )
        .bind(account_id)
        .bind(window.start)
        .bind(window.end)
        .fetch_one(&self.pool)
        .await?;

        let by_category = sqlx::query_as::<_, CategoryRevenueRow>(
            r#"
            SELECT vehicle_type,
                   COUNT(*) AS checkouts,
                   COALESCE(SUM(total_amount), 0) AS revenue
            FROM vehicle_checkins
            WHERE account_id = $1 AND checked_out = TRUE AND exit_time >= $2 AND exit_time < $3
            GROUP BY vehicle_type
            ORDER BY vehicle_type
            "#,
        )
        .bind(account_id)
        .bind(window.start)
        .bind(window.end)
        .fetch_all(&self.pool)
        .await?;

        let (active_passes,): (i64,) = sqlx::query_as(
            r#"
            SELECT COUNT(*) FROM monthly_passes
            WHERE account_id = $1 AND is_active = TRUE AND start_date <= $2 AND end_date > $2
            "#,
        )
        .bind(account_id)
        .bind(window.day)
        .fetch_one(&self.pool)
        .await?;

        let (pass_revenue,): (Decimal,) = sqlx::query_as(
            r#"
            SELECT COALESCE(SUM(amount), 0) FROM monthly_passes
            WHERE account_id = $1 AND created_at >= $2 AND created_at < $3
            "#,
        )
        .bind(account_id)
        .bind(window.start)
        .bind(window.end)
        .fetch_one(&self.pool)
        .await?;

        Ok(DashboardSnapshot::from_parts(
            vehicles_parked,
            checkins,
            by_category,
            active_passes,
            pass_revenue,
        ))
    }
}
