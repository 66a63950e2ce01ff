use serde::Deserialize;
use validator::Validate;

// Request para crear un empleado
#[derive(Debug, Deserialize, Validate)]
pub struct CreateStaffRequest {
    #[validate(length(min = 2, max = 120))]
    pub full_name: String,
    #[validate(email)]
    pub email: String,
    #[validate(length(min = 8, max = 128))]
    pub password: String,
    #[serde(default)]
    pub permissions: Vec<String>,
}

// Request para actualizar un empleado
#[derive(Debug, Deserialize, Validate)]
pub struct UpdateStaffRequest {
    #[validate(length(min = 2, max = 120))]
    pub full_name: Option<String>,
    pub permissions: Option<Vec<String>>,
    pub is_active: Option<bool>,
}
