use async_trait::async_trait;
use sqlx::{PgPool, Postgres, QueryBuilder};
use uuid::Uuid;

use crate::database::schema::{OPEN_SESSION_CONSTRAINT, SESSION_TOKEN_CONSTRAINT};
use crate::models::checkin::{CheckoutUpdate, NewCheckin, SessionQuery, SessionStatus, VehicleCheckin};
use crate::utils::errors::{is_unique_violation, AppError, AppResult};

/// Acceso a las sesiones de aparcamiento
#[async_trait]
pub trait CheckinRepository: Send + Sync {
    async fn insert(&self, new: NewCheckin) -> AppResult<VehicleCheckin>;

    async fn find_open_by_plate(
        &self,
        account_id: Uuid,
        vehicle_number: &str,
    ) -> AppResult<Option<VehicleCheckin>>;

    async fn find_by_token(&self, account_id: Uuid, token: &str) -> AppResult<Option<VehicleCheckin>>;

    /// Cierra la sesión solo si sigue abierta; `None` si otro cierre ganó
    async fn close(
        &self,
        account_id: Uuid,
        token: &str,
        update: &CheckoutUpdate,
    ) -> AppResult<Option<VehicleCheckin>>;

    async fn list(&self, account_id: Uuid, query: &SessionQuery) -> AppResult<Vec<VehicleCheckin>>;
}

pub struct PgCheckinRepository {
    pool: PgPool,
}

impl PgCheckinRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl CheckinRepository for PgCheckinRepository {
    async fn insert(&self, new: NewCheckin) -> AppResult<VehicleCheckin> {
        let record = VehicleCheckin::from_new(new);

        sqlx::query_as::<_, VehicleCheckin>(
            r#"
            INSERT INTO vehicle_checkins (
                id, token, account_id, vehicle_number, vehicle_type, entry_time,
                rate, prepaid_units, prepaid_amount, checked_out, entry_by, created_at
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, FALSE, $10, $11)
            RETURNING *
            "#,
        )
        .bind(record.id)
        .bind(&record.token)
        .bind(record.account_id)
        .bind(&record.vehicle_number)
        .bind(&record.vehicle_type)
        .bind(record.entry_time)
        .bind(record.rate)
        .bind(record.prepaid_units)
        .bind(record.prepaid_amount)
        .bind(record.entry_by)
        .bind(record.created_at)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| {
            if is_unique_violation(&e, OPEN_SESSION_CONSTRAINT) {
                AppError::Conflict(format!("Vehicle {} is already checked in", record.vehicle_number))
            } else if is_unique_violation(&e, SESSION_TOKEN_CONSTRAINT) {
                AppError::Conflict("Session token collision, please retry".to_string())
            } else {
                AppError::Database(e)
            }
        })
    }

    async fn find_open_by_plate(
        &self,
        account_id: Uuid,
        vehicle_number: &str,
    ) -> AppResult<Option<VehicleCheckin>> {
        let record = sqlx::query_as::<_, VehicleCheckin>(
            "SELECT * FROM vehicle_checkins WHERE account_id = $1 AND vehicle_number = $2 AND checked_out = FALSE",
        )
        .bind(account_id)
        .bind(vehicle_number)
        .fetch_optional(&self.pool)
        .await?;

        Ok(record)
    }

    async fn find_by_token(&self, account_id: Uuid, token: &str) -> AppResult<Option<VehicleCheckin>> {
        let record = sqlx::query_as::<_, VehicleCheckin>(
            "SELECT * FROM vehicle_checkins WHERE account_id = $1 AND token = $2",
        )
        .bind(account_id)
        .bind(token)
        .fetch_optional(&self.pool)
        .await?;

        Ok(record)
    }

    async fn close(
        &self,
        account_id: Uuid,
        token: &str,
        update: &CheckoutUpdate,
    ) -> AppResult<Option<VehicleCheckin>> {
        let record = sqlx::query_as::<_, VehicleCheckin>(
            r#"
            UPDATE vehicle_checkins
            SET exit_time = $3, total_amount = $4, duration_label = $5, exit_by = $6, checked_out = TRUE
            WHERE account_id = $1 AND token = $2 AND checked_out = FALSE
            RETURNING *
            "#,
        )
        .bind(account_id)
        .bind(token)
        .bind(update.exit_time)
        .bind(update.total_amount)
        .bind(&update.duration_label)
        .bind(update.exit_by)
        .fetch_optional(&self.pool)
        .await?;

        Ok(record)
    }

    async fn list(&self, account_id: Uuid, query: &SessionQuery) -> AppResult<Vec<VehicleCheckin>> {
        let mut builder: QueryBuilder<Postgres> =
            QueryBuilder::new("SELECT * FROM vehicle_checkins WHERE account_id = ");
        builder.push_bind(account_id);

        match query.status {
            SessionStatus::Open => {
                builder.push(" AND checked_out = FALSE");
            }
            SessionStatus::Closed => {
                builder.push(" AND checked_out = TRUE");
            }
            SessionStatus::All => {}
        }

        if let Some(vehicle_number) = &query.vehicle_number {
            builder.push(" AND vehicle_number = ").push_bind(vehicle_number);
        }
        if let Some(vehicle_type) = &query.vehicle_type {
            builder.push(" AND vehicle_type = ").push_bind(vehicle_type);
        }

        builder
            .push(" ORDER BY entry_time DESC LIMIT ")
            .push_bind(query.limit)
            .push(" OFFSET ")
            .push_bind(query.offset);

        let records = builder
            .build_query_as::<VehicleCheckin>()
            .fetch_all(&self.pool)
            .await?;

        Ok(records)
    }
}
