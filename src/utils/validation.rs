//! Utilidades de validación
//!
//! Este módulo contiene funciones helper para normalizar y validar
//! matrículas, categorías, fechas y permisos.

use chrono::NaiveDate;
use lazy_static::lazy_static;
use regex::Regex;
use validator::ValidationError;

use crate::models::user::is_known_permission;

lazy_static! {
    static ref PLATE_RE: Regex = Regex::new(r"^[A-Z0-9-]{3,15}$").expect("valid plate regex");
    static ref CATEGORY_RE: Regex = Regex::new(r"^[a-z0-9_-]{1,30}$").expect("valid category regex");
}

/// Matrícula en mayúsculas y sin espacios
pub fn normalize_plate(value: &str) -> String {
    value
        .chars()
        .filter(|c| !c.is_whitespace())
        .collect::<String>()
        .to_uppercase()
}

/// Categoría de vehículo en minúsculas
pub fn normalize_category(value: &str) -> String {
    value.trim().to_lowercase()
}

/// Validar una matrícula ya normalizada
pub fn validate_license_plate(value: &str) -> Result<(), ValidationError> {
    if !PLATE_RE.is_match(value) {
        let mut error = ValidationError::new("license_plate");
        error.add_param("value".into(), &value.to_string());
        error.add_param("format".into(), &"3-15 letters, digits or '-'".to_string());
        return Err(error);
    }
    Ok(())
}

/// Validar una categoría ya normalizada
pub fn validate_category(value: &str) -> Result<(), ValidationError> {
    if !CATEGORY_RE.is_match(value) {
        let mut error = ValidationError::new("vehicle_type");
        error.add_param("value".into(), &value.to_string());
        return Err(error);
    }
    Ok(())
}

/// Validar y convertir string a fecha
pub fn validate_date(value: &str) -> Result<NaiveDate, ValidationError> {
    NaiveDate::parse_from_str(value, "%Y-%m-%d").map_err(|_| {
        let mut error = ValidationError::new("date");
        error.add_param("value".into(), &value.to_string());
        error.add_param("format".into(), &"YYYY-MM-DD".to_string());
        error
    })
}

/// Validar que todos los permisos existan
pub fn validate_permissions(values: &[String]) -> Result<(), ValidationError> {
    if let Some(unknown) = values.iter().find(|p| !is_known_permission(p)) {
        let mut error = ValidationError::new("permission");
        error.add_param("value".into(), unknown);
        return Err(error);
    }
    Ok(())
}

/// Convierte un ValidationError suelto en ValidationErrors asociado a un campo
pub fn field_error(field: &'static str, error: ValidationError) -> validator::ValidationErrors {
    let mut errors = validator::ValidationErrors::new();
    errors.add(field, error);
    errors
}
