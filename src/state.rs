//! Shared application state
//!
//! Este módulo define el estado compartido de la aplicación que se pasa
//! a través del router de Axum.

use std::sync::Arc;

use anyhow::Result;
use chrono::FixedOffset;
use sqlx::PgPool;

use crate::config::environment::EnvironmentConfig;
use crate::middleware::rate_limit::RateLimitState;
use crate::repositories::account_repository::{AccountRepository, PgAccountRepository};
use crate::repositories::checkin_repository::PgCheckinRepository;
use crate::repositories::dashboard_repository::{DashboardRepository, PgDashboardRepository};
use crate::repositories::monthly_pass_repository::{MonthlyPassRepository, PgMonthlyPassRepository};
use crate::repositories::pricing_repository::PgPricingRepository;
use crate::repositories::user_repository::{PgUserRepository, UserRepository};
use crate::services::ParkingService;
use crate::utils::jwt::JwtConfig;

#[derive(Clone)]
pub struct AppState {
    pub pool: PgPool,
    pub config: Arc<EnvironmentConfig>,
    pub jwt: JwtConfig,
    pub display_offset: FixedOffset,
    pub parking: ParkingService,
    pub accounts: Arc<dyn AccountRepository>,
    pub users: Arc<dyn UserRepository>,
    pub passes: Arc<dyn MonthlyPassRepository>,
    pub dashboard: Arc<dyn DashboardRepository>,
    pub rate_limit: RateLimitState,
}

impl AppState {
    pub fn new(pool: PgPool, config: EnvironmentConfig) -> Result<Self> {
        let parking = ParkingService::new(
            Arc::new(PgCheckinRepository::new(pool.clone())),
            Arc::new(PgPricingRepository::new(pool.clone())),
        );

        Ok(Self {
            jwt: JwtConfig::from(&config),
            display_offset: config.display_offset()?,
            rate_limit: RateLimitState::from_config(&config),
            config: Arc::new(config),
            parking,
            accounts: Arc::new(PgAccountRepository::new(pool.clone())),
            users: Arc::new(PgUserRepository::new(pool.clone())),
            passes: Arc::new(PgMonthlyPassRepository::new(pool.clone())),
            dashboard: Arc::new(PgDashboardRepository::new(pool.clone())),
            pool,
        })
    }
}
