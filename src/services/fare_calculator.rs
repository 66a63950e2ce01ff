//! Cálculo de tarifas de salida
//!
//! Función pura: a partir de la hora de entrada, la hora actual, la tarifa
//! resuelta y el modo de tarificación devuelve el importe a cobrar y una
//! etiqueta legible de la duración. Toda unidad parcial (minuto o día) se
//! cobra completa y siempre se cobra al menos una unidad.

use std::collections::HashMap;

use chrono::{DateTime, Utc};
use rust_decimal::{Decimal, RoundingStrategy};
use thiserror::Error;

use crate::models::pricing::PricingMode;

const MILLIS_PER_MINUTE: i64 = 60_000;
const MILLIS_PER_DAY: i64 = 1_440 * MILLIS_PER_MINUTE;

/// Tarifa máxima aceptada por categoría
pub const MAX_RATE: Decimal = Decimal::from_parts(1_000_000, 0, 0, false, 0);
/// Decimales máximos de una tarifa
pub const MAX_RATE_SCALE: u32 = 2;

#[derive(Debug, Error, Clone, PartialEq)]
pub enum FareError {
    #[error("Invalid rate '{0}': must be a positive number")]
    InvalidRate(String),

    #[error("No pricing configured for vehicle type '{0}'")]
    MissingPricing(String),

    #[error("Amount out of range for rate {0}")]
    AmountOverflow(Decimal),
}

/// Resultado del cálculo de una salida
#[derive(Debug, Clone, PartialEq)]
pub struct FareQuote {
    pub charge: Decimal,
    pub duration_label: String,
    pub chargeable_units: i64,
    pub rate: Decimal,
    pub mode: PricingMode,
}

/// Interpreta una tarifa guardada como texto en la tabla de precios
pub fn parse_rate(raw: &str) -> Result<Decimal, FareError> {
    let rate: Decimal = raw
        .trim()
        .parse()
        .map_err(|_| FareError::InvalidRate(raw.to_string()))?;
    let rate = ensure_positive(rate)?;

    if rate > MAX_RATE || rate.normalize().scale() > MAX_RATE_SCALE {
        return Err(FareError::InvalidRate(raw.trim().to_string()));
    }
    Ok(rate)
}

/// Busca y valida la tarifa de una categoría de vehículo
pub fn resolve_rate(rates: &HashMap<String, String>, category: &str) -> Result<Decimal, FareError> {
    let raw = rates
        .get(category)
        .ok_or_else(|| FareError::MissingPricing(category.to_string()))?;
    parse_rate(raw)
}

pub fn ensure_positive(rate: Decimal) -> Result<Decimal, FareError> {
    if rate <= Decimal::ZERO {
        return Err(FareError::InvalidRate(rate.to_string()));
    }
    Ok(rate)
}

/// `units × rate` sin desbordar
pub fn multiply_rate(units: i64, rate: Decimal) -> Result<Decimal, FareError> {
    Decimal::from(units)
        .checked_mul(rate)
        .ok_or(FareError::AmountOverflow(rate))
}

/// Calcula el importe de una sesión cerrada en `now`
pub fn calculate_fare(
    entry_time: DateTime<Utc>,
    now: DateTime<Utc>,
    rate: Decimal,
    mode: PricingMode,
) -> Result<FareQuote, FareError> {
    let rate = ensure_positive(rate)?;
    let elapsed_ms = (now - entry_time).num_milliseconds();

    let quote = match mode {
        PricingMode::PerHour => {
            let minutes = chargeable_units(elapsed_ms, MILLIS_PER_MINUTE);
            // minutos × tarifa / 60 antes de redondear, sin perder precisión en la tarifa por minuto
            let charge = multiply_rate(minutes, rate)?
                .checked_div(Decimal::from(60))
                .ok_or(FareError::AmountOverflow(rate))?
                .round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero);
            FareQuote {
                charge,
                duration_label: unit_label(minutes, "minute"),
                chargeable_units: minutes,
                rate,
                mode,
            }
        }
        PricingMode::PerDay => {
            let days = chargeable_units(elapsed_ms, MILLIS_PER_DAY);
            FareQuote {
                charge: multiply_rate(days, rate)?,
                duration_label: unit_label(days, "day"),
                chargeable_units: days,
                rate,
                mode,
            }
        }
    };

    Ok(quote)
}

/// ceil(elapsed / unit) con un mínimo de 1
fn chargeable_units(elapsed_ms: i64, unit_ms: i64) -> i64 {
    if elapsed_ms <= 0 {
        return 1;
    }
    let units = elapsed_ms / unit_ms + i64::from(elapsed_ms % unit_ms != 0);
    units.max(1)
}

fn unit_label(units: i64, unit: &str) -> String {
    if units == 1 {
        format!("1 {}", unit)
    } else {
        format!("{} {}s", units, unit)
    }
}
