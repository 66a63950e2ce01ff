use chrono::{FixedOffset, NaiveDate, Utc};
use std::sync::Arc;
use tracing::info;
use uuid::Uuid;
use validator::Validate;

use crate::dto::api_response::ApiResponse;
use crate::dto::monthly_pass_dto::{CreatePassRequest, PassFilters, PassLookupQuery};
use crate::middleware::auth::AuthenticatedUser;
use crate::models::monthly_pass::{pass_end_date, MonthlyPass};
use crate::models::user::PERM_MANAGE_PASSES;
use crate::repositories::monthly_pass_repository::MonthlyPassRepository;
use crate::services::fare_calculator::{multiply_rate, resolve_rate, FareError};
use crate::services::ParkingService;
use crate::utils::errors::{not_found_error, AppError};
use crate::utils::validation::{
    field_error, normalize_category, normalize_plate, validate_category, validate_date,
    validate_license_plate,
};

pub struct MonthlyPassController {
    repository: Arc<dyn MonthlyPassRepository>,
    parking: ParkingService,
    offset: FixedOffset,
}

impl MonthlyPassController {
    pub fn new(repository: Arc<dyn MonthlyPassRepository>, parking: ParkingService, offset: FixedOffset) -> Self {
        Self {
            repository,
            parking,
            offset,
        }
    }

    fn today(&self) -> NaiveDate {
        Utc::now().with_timezone(&self.offset).date_naive()
    }

    pub async fn create(
        &self,
        auth: &AuthenticatedUser,
        request: CreatePassRequest,
    ) -> Result<ApiResponse<MonthlyPass>, AppError> {
        auth.require_permission(PERM_MANAGE_PASSES)?;
        request.validate()?;

        let vehicle_number = normalize_plate(&request.vehicle_number);
        validate_license_plate(&vehicle_number).map_err(|e| field_error("vehicle_number", e))?;
        let vehicle_type = normalize_category(&request.vehicle_type);
        validate_category(&vehicle_type).map_err(|e| field_error("vehicle_type", e))?;

        let start_date = match request.start_date.as_deref() {
            Some(raw) => validate_date(raw).map_err(|e| field_error("start_date", e))?,
            None => self.today(),
        };
        let months = request.months;
        let end_date = pass_end_date(start_date, months as u32)
            .ok_or_else(|| AppError::BadRequest("Fecha de fin fuera de rango".to_string()))?;

        let pricing = self
            .parking
            .pricing_table(auth.account_id)
            .await?
            .ok_or_else(|| FareError::MissingPricing(vehicle_type.clone()))?;
        let monthly_rate = resolve_rate(&pricing.monthly_rates, &vehicle_type)?;
        let amount = multiply_rate(i64::from(months), monthly_rate)?;

        if self
            .repository
            .overlapping_exists(auth.account_id, &vehicle_number, start_date, end_date)
            .await?
        {
            return Err(AppError::Conflict(format!(
                "La matrícula {} ya tiene un abono activo en esas fechas",
                vehicle_number
            )));
        }

        let pass = MonthlyPass {
            id: Uuid::new_v4(),
            account_id: auth.account_id,
            vehicle_number,
            vehicle_type,
            owner_name: request.owner_name.trim().to_string(),
            owner_phone: request.owner_phone.filter(|p| !p.trim().is_empty()),
            months,
            amount,
            start_date,
            end_date,
            is_active: true,
            created_by: auth.user_id,
            created_at: Utc::now(),
        };

        let saved = self.repository.create(&pass).await?;
        info!(
            "🎫 Abono de {} meses para {} hasta {}",
            saved.months, saved.vehicle_number, saved.end_date
        );

        Ok(ApiResponse::success_with_message(saved, "Abono creado exitosamente"))
    }

    pub async fn list(&self, auth: &AuthenticatedUser, filters: PassFilters) -> Result<Vec<MonthlyPass>, AppError> {
        auth.require_permission(PERM_MANAGE_PASSES)?;

        let active_on = filters.active.then(|| self.today());
        self.repository.list(auth.account_id, active_on).await
    }

    /// Abono vigente para una matrícula en un día (hoy si no se indica)
    pub async fn active_for_vehicle(
        &self,
        auth: &AuthenticatedUser,
        plate: &str,
        query: PassLookupQuery,
    ) -> Result<MonthlyPass, AppError> {
        auth.require_permission(PERM_MANAGE_PASSES)?;

        let day = match query.date.as_deref().map(str::trim).filter(|d| !d.is_empty()) {
            Some(raw) => validate_date(raw).map_err(|e| field_error("date", e))?,
            None => self.today(),
        };
        let vehicle_number = normalize_plate(plate);
        self.repository
            .find_active_for_vehicle(auth.account_id, &vehicle_number, day)
            .await?
            .ok_or_else(|| not_found_error("MonthlyPass", &vehicle_number))
    }

    pub async fn cancel(&self, auth: &AuthenticatedUser, id: Uuid) -> Result<ApiResponse<MonthlyPass>, AppError> {
        auth.require_permission(PERM_MANAGE_PASSES)?;

        let cancelled = self
            .repository
            .cancel(id, auth.account_id)
            .await?
            .ok_or_else(|| not_found_error("MonthlyPass", &id.to_string()))?;
        info!("🎫 Abono {} cancelado", cancelled.id);

        Ok(ApiResponse::success_with_message(cancelled, "Abono cancelado"))
    }
}
