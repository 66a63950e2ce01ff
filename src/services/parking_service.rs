//! Servicio de entradas y salidas
//!
//! Orquesta el ciclo de vida de una sesión: la entrada congela la tarifa de
//! la categoría y la salida calcula el importe y cierra la sesión una sola vez.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use tracing::{info, warn};
use uuid::Uuid;

use crate::models::checkin::{CheckoutUpdate, NewCheckin, SessionQuery, VehicleCheckin};
use crate::models::pricing::{PricingMode, PricingTable};
use crate::repositories::checkin_repository::CheckinRepository;
use crate::repositories::pricing_repository::PricingRepository;
use crate::services::fare_calculator::{calculate_fare, multiply_rate, resolve_rate, FareError, FareQuote};
use crate::utils::errors::{AppError, AppResult};
use crate::utils::session_token::generate_session_token;
use crate::utils::validation::{
    field_error, normalize_category, normalize_plate, validate_category, validate_license_plate,
};

/// Datos de entrada de un vehículo tal como llegan del operador
#[derive(Debug, Clone)]
pub struct CheckinCommand {
    pub vehicle_number: String,
    pub vehicle_type: String,
    pub prepaid_units: i32,
}

/// Resultado de una salida: la sesión cerrada y el cálculo aplicado
#[derive(Debug, Clone)]
pub struct CheckoutOutcome {
    pub record: VehicleCheckin,
    pub quote: FareQuote,
}

#[derive(Clone)]
pub struct ParkingService {
    checkins: Arc<dyn CheckinRepository>,
    pricing: Arc<dyn PricingRepository>,
}

impl ParkingService {
    pub fn new(checkins: Arc<dyn CheckinRepository>, pricing: Arc<dyn PricingRepository>) -> Self {
        Self { checkins, pricing }
    }

    pub async fn check_in(&self, account_id: Uuid, operator_id: Uuid, command: CheckinCommand) -> AppResult<VehicleCheckin> {
        self.check_in_at(account_id, operator_id, command, Utc::now()).await
    }

    pub async fn check_in_at(
        &self,
        account_id: Uuid,
        operator_id: Uuid,
        command: CheckinCommand,
        now: DateTime<Utc>,
    ) -> AppResult<VehicleCheckin> {
        let vehicle_number = normalize_plate(&command.vehicle_number);
        validate_license_plate(&vehicle_number).map_err(|e| field_error("vehicle_number", e))?;

        let vehicle_type = normalize_category(&command.vehicle_type);
        validate_category(&vehicle_type).map_err(|e| field_error("vehicle_type", e))?;

        if command.prepaid_units < 0 {
            return Err(AppError::BadRequest("prepaid_units cannot be negative".to_string()));
        }

        if self
            .checkins
            .find_open_by_plate(account_id, &vehicle_number)
            .await?
            .is_some()
        {
            return Err(AppError::Conflict(format!("Vehicle {} is already checked in", vehicle_number)));
        }

        let table = self
            .pricing
            .find_by_account(account_id)
            .await?
            .ok_or_else(|| FareError::MissingPricing(vehicle_type.clone()))?;
        let rate = resolve_rate(&table.daily_rates, &vehicle_type)?;
        let prepaid_amount = multiply_rate(i64::from(command.prepaid_units), rate)?;

        let record = self
            .checkins
            .insert(NewCheckin {
                token: generate_session_token(),
                account_id,
                vehicle_number,
                vehicle_type,
                entry_time: now,
                rate,
                prepaid_units: command.prepaid_units,
                prepaid_amount,
                entry_by: operator_id,
            })
            .await?;

        info!(
            "🚗 Entrada {} ({}) token={} tarifa={}",
            record.vehicle_number, record.vehicle_type, record.token, rate
        );
        Ok(record)
    }

    pub async fn check_out(&self, account_id: Uuid, operator_id: Uuid, token: &str) -> AppResult<CheckoutOutcome> {
        self.check_out_at(account_id, operator_id, token, Utc::now()).await
    }

    pub async fn check_out_at(
        &self,
        account_id: Uuid,
        operator_id: Uuid,
        token: &str,
        now: DateTime<Utc>,
    ) -> AppResult<CheckoutOutcome> {
        let record = self.open_session(account_id, token).await?;
        let quote = self.quote_for(&record, now).await?;

        let update = CheckoutUpdate {
            exit_time: now,
            total_amount: quote.charge,
            duration_label: quote.duration_label.clone(),
            exit_by: operator_id,
        };

        let closed = match self.checkins.close(account_id, &record.token, &update).await? {
            Some(closed) => closed,
            None => {
                // otra salida concurrente cerró la sesión entre la lectura y la escritura
                warn!("Salida concurrente perdida para token={}", record.token);
                return Err(already_checked_out(&record.token));
            }
        };

        info!(
            "🅿️ Salida {} token={} importe={} ({})",
            closed.vehicle_number, closed.token, quote.charge, quote.duration_label
        );
        Ok(CheckoutOutcome { record: closed, quote })
    }

    /// Importe que se cobraría ahora, sin cerrar la sesión
    pub async fn estimate_at(&self, account_id: Uuid, token: &str, now: DateTime<Utc>) -> AppResult<CheckoutOutcome> {
        let record = self.open_session(account_id, token).await?;
        let quote = self.quote_for(&record, now).await?;
        Ok(CheckoutOutcome { record, quote })
    }

    pub async fn find_session(&self, account_id: Uuid, token: &str) -> AppResult<VehicleCheckin> {
        self.checkins
            .find_by_token(account_id, token)
            .await?
            .ok_or_else(|| session_not_found(token))
    }

    pub async fn list_sessions(&self, account_id: Uuid, query: &SessionQuery) -> AppResult<Vec<VehicleCheckin>> {
        self.checkins.list(account_id, query).await
    }

    pub async fn pricing_table(&self, account_id: Uuid) -> AppResult<Option<PricingTable>> {
        self.pricing.find_by_account(account_id).await
    }

    /// Sustituye la tabla de precios; las sesiones abiertas conservan su tarifa congelada
    pub async fn replace_pricing(&self, table: &PricingTable) -> AppResult<PricingTable> {
        let saved = self.pricing.upsert(table).await?;
        info!(
            "💶 Tabla de precios actualizada para cuenta {} ({} categorías, modo {})",
            saved.account_id,
            saved.daily_rates.len(),
            saved.pricing_mode
        );
        Ok(saved)
    }

    async fn open_session(&self, account_id: Uuid, token: &str) -> AppResult<VehicleCheckin> {
        let record = self.find_session(account_id, token).await?;
        if record.checked_out {
            return Err(already_checked_out(token));
        }
        Ok(record)
    }

    async fn quote_for(&self, record: &VehicleCheckin, now: DateTime<Utc>) -> AppResult<FareQuote> {
        let table = self.pricing.find_by_account(record.account_id).await?;
        let mode = table.as_ref().map(PricingTable::mode).unwrap_or(PricingMode::PerDay);

        let rate = match record.rate {
            Some(rate) => rate,
            None => {
                let table = table.ok_or_else(|| FareError::MissingPricing(record.vehicle_type.clone()))?;
                resolve_rate(&table.daily_rates, &record.vehicle_type)?
            }
        };

        Ok(calculate_fare(record.entry_time, now, rate, mode)?)
    }
}

fn session_not_found(token: &str) -> AppError {
    AppError::NotFound(format!("Session {} not found", token))
}

fn already_checked_out(token: &str) -> AppError {
    AppError::Conflict(format!("Session {} is already checked out", token))
}
