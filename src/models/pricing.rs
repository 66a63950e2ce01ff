//! Modelo de PricingTable
//!
//! Una tabla de precios por cuenta: categoría de vehículo → tarifa diaria
//! (o por hora según el modo) y → tarifa mensual, guardadas como texto.

use std::collections::HashMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::types::Json;
use sqlx::FromRow;
use uuid::Uuid;

/// Modo de tarificación de la cuenta
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub enum PricingMode {
    PerHour,
    #[default]
    PerDay,
}

impl PricingMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            PricingMode::PerHour => "perHour",
            PricingMode::PerDay => "perDay",
        }
    }

    /// Valores desconocidos caen en el modo por defecto
    pub fn parse(s: &str) -> Self {
        match s {
            "perHour" => PricingMode::PerHour,
            _ => PricingMode::PerDay,
        }
    }
}

/// PricingTable - mapea a la tabla pricing_tables
#[derive(Debug, Clone, FromRow)]
pub struct PricingTable {
    pub account_id: Uuid,
    pub daily_rates: Json<HashMap<String, String>>,
    pub monthly_rates: Json<HashMap<String, String>>,
    pub pricing_mode: String,
    pub updated_at: DateTime<Utc>,
}

impl PricingTable {
    /// Tabla vacía creada junto con la cuenta
    pub fn empty(account_id: Uuid) -> Self {
        Self {
            account_id,
            daily_rates: Json(HashMap::new()),
            monthly_rates: Json(HashMap::new()),
            pricing_mode: PricingMode::default().as_str().to_string(),
            updated_at: Utc::now(),
        }
    }

    pub fn mode(&self) -> PricingMode {
        PricingMode::parse(&self.pricing_mode)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pricing_mode_wire_format() {
        assert_eq!(serde_json::to_string(&PricingMode::PerHour).unwrap(), "\"perHour\"");
        assert_eq!(serde_json::to_string(&PricingMode::PerDay).unwrap(), "\"perDay\"");
        let mode: PricingMode = serde_json::from_str("\"perHour\"").unwrap();
        assert_eq!(mode, PricingMode::PerHour);
    }

    #[test]
    fn test_unknown_mode_defaults_to_per_day() {
        assert_eq!(PricingMode::parse("weekly"), PricingMode::PerDay);
        assert_eq!(PricingTable::empty(Uuid::new_v4()).mode(), PricingMode::PerDay);
    }
}
