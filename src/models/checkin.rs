//! Modelo de VehicleCheckin
//!
//! Una sesión de aparcamiento: se crea en la entrada con la tarifa congelada
//! y se cierra una sola vez en la salida.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::Serialize;
use sqlx::FromRow;
use uuid::Uuid;

/// VehicleCheckin principal - mapea exactamente a la tabla vehicle_checkins
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct VehicleCheckin {
    pub id: Uuid,
    pub token: String,
    pub account_id: Uuid,
    pub vehicle_number: String,
    pub vehicle_type: String,
    pub entry_time: DateTime<Utc>,
    pub exit_time: Option<DateTime<Utc>>,
    /// Tarifa vigente en la entrada; los registros antiguos pueden no tenerla
    pub rate: Option<Decimal>,
    pub prepaid_units: i32,
    pub prepaid_amount: Decimal,
    pub total_amount: Option<Decimal>,
    pub duration_label: Option<String>,
    pub checked_out: bool,
    pub entry_by: Uuid,
    pub exit_by: Option<Uuid>,
    pub created_at: DateTime<Utc>,
}

/// Datos de una nueva entrada, ya normalizados
#[derive(Debug, Clone)]
pub struct NewCheckin {
    pub token: String,
    pub account_id: Uuid,
    pub vehicle_number: String,
    pub vehicle_type: String,
    pub entry_time: DateTime<Utc>,
    pub rate: Decimal,
    pub prepaid_units: i32,
    pub prepaid_amount: Decimal,
    pub entry_by: Uuid,
}

/// Campos que se escriben al cerrar la sesión
#[derive(Debug, Clone)]
pub struct CheckoutUpdate {
    pub exit_time: DateTime<Utc>,
    pub total_amount: Decimal,
    pub duration_label: String,
    pub exit_by: Uuid,
}

/// Filtro de estado para los listados de sesiones
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionStatus {
    Open,
    Closed,
    All,
}

impl SessionStatus {
    pub fn parse(s: Option<&str>) -> Self {
        match s {
            Some("open") => SessionStatus::Open,
            Some("closed") => SessionStatus::Closed,
            _ => SessionStatus::All,
        }
    }
}

/// Criterios de búsqueda de sesiones
#[derive(Debug, Clone)]
pub struct SessionQuery {
    pub status: SessionStatus,
    pub vehicle_number: Option<String>,
    pub vehicle_type: Option<String>,
    pub limit: i64,
    pub offset: i64,
}

impl VehicleCheckin {
    pub fn from_new(new: NewCheckin) -> Self {
        Self {
            id: Uuid::new_v4(),
            token: new.token,
            account_id: new.account_id,
            vehicle_number: new.vehicle_number,
            vehicle_type: new.vehicle_type,
            entry_time: new.entry_time,
            exit_time: None,
            rate: Some(new.rate),
            prepaid_units: new.prepaid_units,
            prepaid_amount: new.prepaid_amount,
            total_amount: None,
            duration_label: None,
            checked_out: false,
            entry_by: new.entry_by,
            exit_by: None,
            created_at: Utc::now(),
        }
    }
}
