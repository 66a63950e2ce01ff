//! Modelo de Account
//!
//! Un operador de aparcamiento. Todo lo demás (usuarios, sesiones, precios,
//! abonos) cuelga de una cuenta.

use chrono::{DateTime, Utc};
use serde::Serialize;
use sqlx::FromRow;
use uuid::Uuid;

/// Account principal - mapea exactamente a la tabla accounts
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct Account {
    pub id: Uuid,
    pub parking_name: String,
    pub address: String,
    pub phone: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl Account {
    pub fn new(parking_name: String, address: String, phone: Option<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            parking_name,
            address,
            phone,
            created_at: Utc::now(),
        }
    }
}
