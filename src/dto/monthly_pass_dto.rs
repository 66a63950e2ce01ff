use serde::Deserialize;
use validator::Validate;

// Request para vender un abono mensual
#[derive(Debug, Deserialize, Validate)]
pub struct CreatePassRequest {
    #[validate(length(min = 1, max = 30))]
    pub vehicle_number: String,
    #[validate(length(min = 1, max = 30))]
    pub vehicle_type: String,
    #[validate(length(min = 2, max = 120))]
    pub owner_name: String,
    #[validate(length(min = 6, max = 20))]
    pub owner_phone: Option<String>,
    #[validate(range(min = 1, max = 12))]
    pub months: i32,
    /// YYYY-MM-DD; por defecto hoy
    pub start_date: Option<String>,
}

// Filtros del listado de abonos
#[derive(Debug, Deserialize)]
pub struct PassFilters {
    #[serde(default)]
    pub active: bool,
}

// Día de consulta del abono vigente; por defecto hoy
#[derive(Debug, Deserialize)]
pub struct PassLookupQuery {
    pub date: Option<String>,
}
