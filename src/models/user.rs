//! Modelo de User
//!
//! Administradores y empleados de una cuenta. Los permisos son cadenas
//! simples que se comprueban por ruta; el administrador los tiene todos.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

pub const PERM_CHECKIN: &str = "checkin";
pub const PERM_CHECKOUT: &str = "checkout";
pub const PERM_VIEW_SESSIONS: &str = "view_sessions";
pub const PERM_MANAGE_PASSES: &str = "manage_passes";
pub const PERM_VIEW_DASHBOARD: &str = "view_dashboard";
pub const PERM_MANAGE_PRICING: &str = "manage_pricing";
pub const PERM_MANAGE_STAFF: &str = "manage_staff";

pub const ALL_PERMISSIONS: [&str; 7] = [
    PERM_CHECKIN,
    PERM_CHECKOUT,
    PERM_VIEW_SESSIONS,
    PERM_MANAGE_PASSES,
    PERM_VIEW_DASHBOARD,
    PERM_MANAGE_PRICING,
    PERM_MANAGE_STAFF,
];

/// Roles del sistema
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UserRole {
    Admin,
    Staff,
}

impl UserRole {
    pub fn as_str(&self) -> &'static str {
        match self {
            UserRole::Admin => "admin",
            UserRole::Staff => "staff",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "admin" => Some(UserRole::Admin),
            "staff" => Some(UserRole::Staff),
            _ => None,
        }
    }
}

pub fn is_known_permission(permission: &str) -> bool {
    ALL_PERMISSIONS.contains(&permission)
}

/// User principal - mapea exactamente a la tabla users
#[derive(Debug, Clone, FromRow)]
pub struct User {
    pub id: Uuid,
    pub account_id: Uuid,
    pub full_name: String,
    pub email: String,
    pub password_hash: String,
    pub role: String,
    pub permissions: Vec<String>,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
}

impl User {
    pub fn new(
        account_id: Uuid,
        full_name: String,
        email: String,
        password_hash: String,
        role: UserRole,
        permissions: Vec<String>,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            account_id,
            full_name,
            email: email.trim().to_lowercase(),
            password_hash,
            role: role.as_str().to_string(),
            permissions,
            is_active: true,
            created_at: Utc::now(),
        }
    }

    /// Roles desconocidos se degradan a staff
    pub fn role(&self) -> UserRole {
        UserRole::from_str(&self.role).unwrap_or(UserRole::Staff)
    }

    /// Permisos efectivos que viajan en el JWT
    pub fn effective_permissions(&self) -> Vec<String> {
        match self.role() {
            UserRole::Admin => ALL_PERMISSIONS.iter().map(|p| p.to_string()).collect(),
            UserRole::Staff => self.permissions.clone(),
        }
    }
}
