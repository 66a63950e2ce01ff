use std::collections::HashMap;

use chrono::Utc;
use sqlx::types::Json;

use crate::dto::api_response::ApiResponse;
use crate::dto::pricing_dto::{PricingResponse, UpdatePricingRequest};
use crate::middleware::auth::AuthenticatedUser;
use crate::models::pricing::PricingTable;
use crate::models::user::PERM_MANAGE_PRICING;
use crate::services::fare_calculator::parse_rate;
use crate::services::ParkingService;
use crate::utils::errors::AppError;
use crate::utils::validation::{field_error, normalize_category, validate_category};

pub struct PricingController {
    parking: ParkingService,
}

impl PricingController {
    pub fn new(parking: ParkingService) -> Self {
        Self { parking }
    }

    pub async fn get(&self, auth: &AuthenticatedUser) -> Result<PricingResponse, AppError> {
        let table = self.parking.pricing_table(auth.account_id).await?;
        Ok(table.map(PricingResponse::from).unwrap_or_else(PricingResponse::unconfigured))
    }

    pub async fn replace(
        &self,
        auth: &AuthenticatedUser,
        request: UpdatePricingRequest,
    ) -> Result<ApiResponse<PricingResponse>, AppError> {
        auth.require_permission(PERM_MANAGE_PRICING)?;

        let table = PricingTable {
            account_id: auth.account_id,
            daily_rates: Json(normalize_rates(request.daily_rates)?),
            monthly_rates: Json(normalize_rates(request.monthly_rates)?),
            pricing_mode: request.pricing_mode.as_str().to_string(),
            updated_at: Utc::now(),
        };

        let saved = self.parking.replace_pricing(&table).await?;
        Ok(ApiResponse::success_with_message(
            PricingResponse::from(saved),
            "Tarifas actualizadas exitosamente",
        ))
    }
}

/// Claves en minúsculas y tarifas positivas, guardadas tal como se validaron
pub fn normalize_rates(rates: HashMap<String, String>) -> Result<HashMap<String, String>, AppError> {
    let mut normalized = HashMap::with_capacity(rates.len());

    for (category, raw) in rates {
        let category = normalize_category(&category);
        validate_category(&category).map_err(|e| field_error("vehicle_type", e))?;
        let rate = parse_rate(&raw)?;
        normalized.insert(category, rate.normalize().to_string());
    }

    Ok(normalized)
}
