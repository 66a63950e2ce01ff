use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use crate::models::account::Account;
use crate::models::user::User;

// Request para registrar un aparcamiento con su administrador
#[derive(Debug, Deserialize, Validate)]
pub struct RegisterAccountRequest {
    #[validate(length(min = 2, max = 120))]
    pub parking_name: String,
    #[validate(length(min = 3, max = 300))]
    pub address: String,
    #[validate(length(min = 6, max = 20))]
    pub phone: Option<String>,
    #[validate(length(min = 2, max = 120))]
    pub admin_name: String,
    #[validate(email)]
    pub email: String,
    #[validate(length(min = 8, max = 128))]
    pub password: String,
}

// Login request
#[derive(Debug, Deserialize, Validate)]
pub struct LoginRequest {
    #[validate(email)]
    pub email: String,
    #[validate(length(min = 1))]
    pub password: String,
}

// Login response
#[derive(Debug, Serialize)]
pub struct LoginResponse {
    pub token: String,
    pub expires_in: u64,
    pub user: UserResponse,
}

// Response de usuario (sin password)
#[derive(Debug, Serialize)]
pub struct UserResponse {
    pub id: Uuid,
    pub account_id: Uuid,
    pub full_name: String,
    pub email: String,
    pub role: String,
    pub permissions: Vec<String>,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
}

impl From<User> for UserResponse {
    fn from(user: User) -> Self {
        let permissions = user.effective_permissions();
        Self {
            id: user.id,
            account_id: user.account_id,
            full_name: user.full_name,
            email: user.email,
            role: user.role,
            permissions,
            is_active: user.is_active,
            created_at: user.created_at,
        }
    }
}

// Response de cuenta
#[derive(Debug, Serialize)]
pub struct AccountResponse {
    pub id: Uuid,
    pub parking_name: String,
    pub address: String,
    pub phone: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl From<Account> for AccountResponse {
    fn from(account: Account) -> Self {
        Self {
            id: account.id,
            parking_name: account.parking_name,
            address: account.address,
            phone: account.phone,
            created_at: account.created_at,
        }
    }
}

// Response de registro
#[derive(Debug, Serialize)]
pub struct RegisterResponse {
    pub account: AccountResponse,
    pub admin: UserResponse,
}

// Response de /me
#[derive(Debug, Serialize)]
pub struct MeResponse {
    pub user: UserResponse,
    pub account: AccountResponse,
}
