use std::sync::Arc;

use chrono::{Duration, FixedOffset, NaiveDate, TimeZone, Utc};

use crate::dto::dashboard_dto::{DashboardQuery, DashboardResponse};
use crate::middleware::auth::AuthenticatedUser;
use crate::models::user::PERM_VIEW_DASHBOARD;
use crate::repositories::dashboard_repository::{DashboardRepository, DayWindow};
use crate::utils::errors::AppError;
use crate::utils::validation::{field_error, validate_date};

pub struct DashboardController {
    repository: Arc<dyn DashboardRepository>,
    offset: FixedOffset,
}

impl DashboardController {
    pub fn new(repository: Arc<dyn DashboardRepository>, offset: FixedOffset) -> Self {
        Self { repository, offset }
    }

    pub async fn daily(&self, auth: &AuthenticatedUser, query: DashboardQuery) -> Result<DashboardResponse, AppError> {
        auth.require_permission(PERM_VIEW_DASHBOARD)?;

        let day = match query.date.as_deref().map(str::trim).filter(|d| !d.is_empty()) {
            Some(raw) => validate_date(raw).map_err(|e| field_error("date", e))?,
            None => Utc::now().with_timezone(&self.offset).date_naive(),
        };

        let window = day_window(day, &self.offset)?;
        let snapshot = self.repository.snapshot(auth.account_id, window).await?;
        Ok(DashboardResponse::new(day, snapshot))
    }
}

/// Día local [00:00, 24:00) convertido a UTC
pub fn day_window(day: NaiveDate, offset: &FixedOffset) -> Result<DayWindow, AppError> {
    let midnight = day
        .and_hms_opt(0, 0, 0)
        .ok_or_else(|| AppError::BadRequest("Fecha inválida".to_string()))?;
    let start = offset
        .from_local_datetime(&midnight)
        .single()
        .ok_or_else(|| AppError::BadRequest("Fecha inválida".to_string()))?
        .with_timezone(&Utc);

    Ok(DayWindow {
        day,
        start,
        end: start + Duration::days(1),
    })
}
