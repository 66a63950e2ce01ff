use std::collections::HashMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::models::pricing::{PricingMode, PricingTable};

// Request para sustituir la tabla de precios
#[derive(Debug, Deserialize)]
pub struct UpdatePricingRequest {
    #[serde(default)]
    pub daily_rates: HashMap<String, String>,
    #[serde(default)]
    pub monthly_rates: HashMap<String, String>,
    #[serde(default)]
    pub pricing_mode: PricingMode,
}

// Response de tabla de precios
#[derive(Debug, Serialize)]
pub struct PricingResponse {
    pub daily_rates: HashMap<String, String>,
    pub monthly_rates: HashMap<String, String>,
    pub pricing_mode: PricingMode,
    pub updated_at: Option<DateTime<Utc>>,
}

impl From<PricingTable> for PricingResponse {
    fn from(table: PricingTable) -> Self {
        let pricing_mode = table.mode();
        Self {
            daily_rates: table.daily_rates.0,
            monthly_rates: table.monthly_rates.0,
            pricing_mode,
            updated_at: Some(table.updated_at),
        }
    }
}

impl PricingResponse {
    /// Cuenta sin tabla guardada
    pub fn unconfigured() -> Self {
        Self {
            daily_rates: HashMap::new(),
            monthly_rates: HashMap::new(),
            pricing_mode: PricingMode::default(),
            updated_at: None,
        }
    }
}
