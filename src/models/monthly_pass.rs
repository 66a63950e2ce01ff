//! Modelo de MonthlyPass
//!
//! Abono mensual prepagado para una matrícula.

use chrono::{DateTime, Months, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::Serialize;
use sqlx::FromRow;
use uuid::Uuid;

/// MonthlyPass principal - mapea exactamente a la tabla monthly_passes
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct MonthlyPass {
    pub id: Uuid,
    pub account_id: Uuid,
    pub vehicle_number: String,
    pub vehicle_type: String,
    pub owner_name: String,
    pub owner_phone: Option<String>,
    pub months: i32,
    pub amount: Decimal,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub is_active: bool,
    pub created_by: Uuid,
    pub created_at: DateTime<Utc>,
}

/// Fecha de fin: inicio + meses (el día de fin no está cubierto)
pub fn pass_end_date(start: NaiveDate, months: u32) -> Option<NaiveDate> {
    start.checked_add_months(Months::new(months))
}

impl MonthlyPass {
    pub fn covers(&self, day: NaiveDate) -> bool {
        self.is_active && self.start_date <= day && day < self.end_date
    }
}
