use chrono::{DateTime, FixedOffset, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use crate::models::checkin::VehicleCheckin;
use crate::models::pricing::PricingMode;
use crate::services::parking_service::CheckoutOutcome;

// Request de entrada de vehículo
#[derive(Debug, Deserialize, Validate)]
pub struct CheckinRequest {
    #[validate(length(min = 1, max = 30))]
    pub vehicle_number: String,
    #[validate(length(min = 1, max = 30))]
    pub vehicle_type: String,
    #[validate(range(min = 0, max = 366))]
    pub prepaid_units: Option<i32>,
}

// Filtros del listado de sesiones
#[derive(Debug, Deserialize)]
pub struct SessionFilters {
    pub status: Option<String>,
    pub vehicle_number: Option<String>,
    pub vehicle_type: Option<String>,
    pub limit: Option<i64>,
    pub offset: Option<i64>,
}

// Response de sesión
#[derive(Debug, Serialize)]
pub struct CheckinResponse {
    pub id: Uuid,
    pub token: String,
    pub vehicle_number: String,
    pub vehicle_type: String,
    pub entry_time: DateTime<Utc>,
    pub exit_time: Option<DateTime<Utc>>,
    pub entry_clock: String,
    pub rate: Option<Decimal>,
    pub prepaid_units: i32,
    pub prepaid_amount: Decimal,
    pub total_amount: Option<Decimal>,
    pub duration: Option<String>,
    pub checked_out: bool,
    pub entry_by: Uuid,
    pub exit_by: Option<Uuid>,
}

impl CheckinResponse {
    pub fn from_record(record: VehicleCheckin, offset: &FixedOffset) -> Self {
        Self {
            entry_clock: clock_time(record.entry_time, offset),
            id: record.id,
            token: record.token,
            vehicle_number: record.vehicle_number,
            vehicle_type: record.vehicle_type,
            entry_time: record.entry_time,
            exit_time: record.exit_time,
            rate: record.rate,
            prepaid_units: record.prepaid_units,
            prepaid_amount: record.prepaid_amount,
            total_amount: record.total_amount,
            duration: record.duration_label,
            checked_out: record.checked_out,
            entry_by: record.entry_by,
            exit_by: record.exit_by,
        }
    }
}

// Response de salida (o de estimación)
#[derive(Debug, Serialize)]
pub struct CheckoutResponse {
    pub token: String,
    pub vehicle_number: String,
    pub vehicle_type: String,
    pub charge: Decimal,
    pub duration: String,
    pub entry_time: String,
    pub exit_time: String,
    pub entry_timestamp: DateTime<Utc>,
    pub exit_timestamp: DateTime<Utc>,
    pub rate: Decimal,
    pub pricing_mode: PricingMode,
    pub prepaid_amount: Decimal,
    pub balance_due: Decimal,
}

impl CheckoutResponse {
    /// `exit_at` es la hora de salida real o, en una estimación, la hora de consulta
    pub fn from_outcome(outcome: CheckoutOutcome, exit_at: DateTime<Utc>, offset: &FixedOffset) -> Self {
        let CheckoutOutcome { record, quote } = outcome;
        let exit_at = record.exit_time.unwrap_or(exit_at);
        let balance_due = (quote.charge - record.prepaid_amount).max(Decimal::ZERO);

        Self {
            entry_time: clock_time(record.entry_time, offset),
            exit_time: clock_time(exit_at, offset),
            token: record.token,
            vehicle_number: record.vehicle_number,
            vehicle_type: record.vehicle_type,
            charge: quote.charge,
            duration: quote.duration_label,
            entry_timestamp: record.entry_time,
            exit_timestamp: exit_at,
            rate: quote.rate,
            pricing_mode: quote.mode,
            prepaid_amount: record.prepaid_amount,
            balance_due,
        }
    }
}

/// Hora de reloj HH:MM en el desfase de la cuenta
pub fn clock_time(instant: DateTime<Utc>, offset: &FixedOffset) -> String {
    instant.with_timezone(offset).format("%H:%M").to_string()
}
