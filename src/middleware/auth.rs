//! Middleware de autenticación JWT
//!
//! Este módulo maneja la autenticación JWT, extracción de tokens
//! y comprobación de permisos de administradores y empleados.

use axum::{
    extract::{Request, State},
    http::header,
    middleware::Next,
    response::Response,
};
use uuid::Uuid;

use crate::{
    models::user::UserRole,
    state::AppState,
    utils::{
        errors::{forbidden_error, AppError},
        jwt::{extract_token_from_header, verify_token, JwtClaims},
    },
};

/// Usuario autenticado que se inyecta en las requests
#[derive(Debug, Clone)]
pub struct AuthenticatedUser {
    pub user_id: Uuid,
    pub account_id: Uuid,
    pub role: UserRole,
    pub permissions: Vec<String>,
}

impl AuthenticatedUser {
    pub fn from_claims(claims: JwtClaims) -> Result<Self, AppError> {
        let user_id = Uuid::parse_str(&claims.sub)
            .map_err(|_| AppError::Unauthorized("ID de usuario inválido".to_string()))?;
        let account_id = Uuid::parse_str(&claims.account_id)
            .map_err(|_| AppError::Unauthorized("ID de cuenta inválido".to_string()))?;
        let role = UserRole::from_str(&claims.role)
            .ok_or_else(|| AppError::Unauthorized("Rol desconocido".to_string()))?;

        Ok(Self {
            user_id,
            account_id,
            role,
            permissions: claims.permissions,
        })
    }

    pub fn is_admin(&self) -> bool {
        self.role == UserRole::Admin
    }

    /// El administrador tiene todos los permisos
    pub fn has_permission(&self, permission: &str) -> bool {
        self.is_admin() || self.permissions.iter().any(|p| p == permission)
    }

    pub fn require_permission(&self, permission: &str) -> Result<(), AppError> {
        if self.has_permission(permission) {
            Ok(())
        } else {
            Err(forbidden_error(permission, "missing permission"))
        }
    }
}

/// Middleware de autenticación JWT
pub async fn auth_middleware(
    State(state): State<AppState>,
    mut request: Request,
    next: Next,
) -> Result<Response, AppError> {
    // Extraer token del header Authorization
    let auth_header = request
        .headers()
        .get(header::AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        .ok_or_else(|| AppError::Unauthorized("Token de autorización requerido".to_string()))?;

    let token = extract_token_from_header(auth_header)?;
    let claims = verify_token(token, &state.jwt)?;
    let user = AuthenticatedUser::from_claims(claims)?;

    // Inyectar usuario autenticado en las extensions
    request.extensions_mut().insert(user);

    Ok(next.run(request).await)
}
