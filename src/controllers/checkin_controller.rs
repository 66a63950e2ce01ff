use chrono::{FixedOffset, Utc};

use crate::dto::api_response::ApiResponse;
use crate::dto::checkin_dto::{CheckinRequest, CheckinResponse, CheckoutResponse, SessionFilters};
use crate::middleware::auth::AuthenticatedUser;
use crate::models::checkin::{SessionQuery, SessionStatus};
use crate::models::user::{PERM_CHECKIN, PERM_CHECKOUT, PERM_VIEW_SESSIONS};
use crate::services::parking_service::CheckinCommand;
use crate::services::ParkingService;
use crate::utils::errors::AppError;
use crate::utils::validation::{normalize_category, normalize_plate};
use validator::Validate;

const DEFAULT_PAGE_SIZE: i64 = 50;
const MAX_PAGE_SIZE: i64 = 200;

pub struct CheckinController {
    parking: ParkingService,
    offset: FixedOffset,
}

impl CheckinController {
    pub fn new(parking: ParkingService, offset: FixedOffset) -> Self {
        Self { parking, offset }
    }

    pub async fn check_in(
        &self,
        auth: &AuthenticatedUser,
        request: CheckinRequest,
    ) -> Result<ApiResponse<CheckinResponse>, AppError> {
        auth.require_permission(PERM_CHECKIN)?;
        request.validate()?;

        let record = self
            .parking
            .check_in(
                auth.account_id,
                auth.user_id,
                CheckinCommand {
                    vehicle_number: request.vehicle_number,
                    vehicle_type: request.vehicle_type,
                    prepaid_units: request.prepaid_units.unwrap_or(0),
                },
            )
            .await?;

        Ok(ApiResponse::success_with_message(
            CheckinResponse::from_record(record, &self.offset),
            "Entrada registrada",
        ))
    }

    pub async fn check_out(
        &self,
        auth: &AuthenticatedUser,
        token: &str,
    ) -> Result<ApiResponse<CheckoutResponse>, AppError> {
        auth.require_permission(PERM_CHECKOUT)?;

        let now = Utc::now();
        let outcome = self
            .parking
            .check_out_at(auth.account_id, auth.user_id, &token.trim().to_uppercase(), now)
            .await?;

        Ok(ApiResponse::success_with_message(
            CheckoutResponse::from_outcome(outcome, now, &self.offset),
            "Salida registrada",
        ))
    }

    pub async fn estimate(&self, auth: &AuthenticatedUser, token: &str) -> Result<CheckoutResponse, AppError> {
        auth.require_permission(PERM_CHECKOUT)?;

        let now = Utc::now();
        let outcome = self
            .parking
            .estimate_at(auth.account_id, &token.trim().to_uppercase(), now)
            .await?;

        Ok(CheckoutResponse::from_outcome(outcome, now, &self.offset))
    }

    pub async fn get(&self, auth: &AuthenticatedUser, token: &str) -> Result<CheckinResponse, AppError> {
        auth.require_permission(PERM_VIEW_SESSIONS)?;

        let record = self
            .parking
            .find_session(auth.account_id, &token.trim().to_uppercase())
            .await?;
        Ok(CheckinResponse::from_record(record, &self.offset))
    }

    pub async fn list(
        &self,
        auth: &AuthenticatedUser,
        filters: SessionFilters,
    ) -> Result<Vec<CheckinResponse>, AppError> {
        auth.require_permission(PERM_VIEW_SESSIONS)?;

        let query = session_query(filters);
        let records = self.parking.list_sessions(auth.account_id, &query).await?;

        Ok(records
            .into_iter()
            .map(|record| CheckinResponse::from_record(record, &self.offset))
            .collect())
    }
}

fn session_query(filters: SessionFilters) -> SessionQuery {
    SessionQuery {
        status: SessionStatus::parse(filters.status.as_deref()),
        vehicle_number: filters
            .vehicle_number
            .map(|v| normalize_plate(&v))
            .filter(|v| !v.is_empty()),
        vehicle_type: filters
            .vehicle_type
            .map(|v| normalize_category(&v))
            .filter(|v| !v.is_empty()),
        limit: filters.limit.unwrap_or(DEFAULT_PAGE_SIZE).clamp(1, MAX_PAGE_SIZE),
        offset: filters.offset.unwrap_or(0).max(0),
    }
}
