use crate::controllers::auth_controller::hash_password;
use crate::dto::api_response::ApiResponse;
use crate::dto::auth_dto::UserResponse;
use crate::dto::staff_dto::{CreateStaffRequest, UpdateStaffRequest};
use crate::middleware::auth::AuthenticatedUser;
use crate::models::user::{User, UserRole, PERM_MANAGE_STAFF};
use crate::repositories::user_repository::UserRepository;
use crate::utils::errors::{conflict_error, AppError};
use crate::utils::validation::{field_error, validate_permissions};
use std::sync::Arc;
use tracing::info;
use uuid::Uuid;
use validator::Validate;

pub struct StaffController {
    repository: Arc<dyn UserRepository>,
}

impl StaffController {
    pub fn new(repository: Arc<dyn UserRepository>) -> Self {
        Self { repository }
    }

    pub async fn create(
        &self,
        auth: &AuthenticatedUser,
        request: CreateStaffRequest,
    ) -> Result<ApiResponse<UserResponse>, AppError> {
        auth.require_permission(PERM_MANAGE_STAFF)?;
        request.validate()?;
        validate_permissions(&request.permissions).map_err(|e| field_error("permissions", e))?;
        ensure_grantable(auth, &request.permissions)?;

        if self.repository.email_exists(&request.email).await? {
            return Err(conflict_error("User", "email", &request.email));
        }

        let password_hash = hash_password(request.password).await?;
        let staff = User::new(
            auth.account_id,
            request.full_name.trim().to_string(),
            request.email,
            password_hash,
            UserRole::Staff,
            request.permissions,
        );

        let saved = self.repository.create(&staff).await?;
        info!("👤 Empleado creado {} en cuenta {}", saved.email, saved.account_id);

        Ok(ApiResponse::success_with_message(
            UserResponse::from(saved),
            "Empleado creado exitosamente",
        ))
    }

    pub async fn list(&self, auth: &AuthenticatedUser) -> Result<Vec<UserResponse>, AppError> {
        auth.require_permission(PERM_MANAGE_STAFF)?;

        let users = self.repository.list_by_account(auth.account_id).await?;
        Ok(users.into_iter().map(UserResponse::from).collect())
    }

    pub async fn update(
        &self,
        auth: &AuthenticatedUser,
        id: Uuid,
        request: UpdateStaffRequest,
    ) -> Result<ApiResponse<UserResponse>, AppError> {
        auth.require_permission(PERM_MANAGE_STAFF)?;
        request.validate()?;
        if let Some(permissions) = &request.permissions {
            validate_permissions(permissions).map_err(|e| field_error("permissions", e))?;
            ensure_grantable(auth, permissions)?;
        }

        self.ensure_staff(auth, id).await?;

        let updated = self
            .repository
            .update_staff(
                id,
                auth.account_id,
                request.full_name.map(|n| n.trim().to_string()),
                request.permissions,
                request.is_active,
            )
            .await?;

        Ok(ApiResponse::success_with_message(
            UserResponse::from(updated),
            "Empleado actualizado exitosamente",
        ))
    }

    /// Baja lógica: el usuario queda inactivo
    pub async fn deactivate(&self, auth: &AuthenticatedUser, id: Uuid) -> Result<(), AppError> {
        auth.require_permission(PERM_MANAGE_STAFF)?;
        self.ensure_staff(auth, id).await?;

        self.repository
            .update_staff(id, auth.account_id, None, None, Some(false))
            .await?;
        info!("👤 Empleado {} desactivado", id);
        Ok(())
    }

    /// Solo se gestionan empleados de la propia cuenta, nunca administradores
    async fn ensure_staff(&self, auth: &AuthenticatedUser, id: Uuid) -> Result<User, AppError> {
        ensure_not_self(auth, id)?;

        let user = self
            .repository
            .find_by_id(id, auth.account_id)
            .await?
            .ok_or_else(|| AppError::NotFound("Empleado no encontrado".to_string()))?;

        if user.role() != UserRole::Staff {
            return Err(AppError::Forbidden(
                "No se puede modificar a un administrador".to_string(),
            ));
        }
        Ok(user)
    }
}

/// Un empleado solo puede conceder permisos que él mismo tiene
pub fn ensure_grantable(auth: &AuthenticatedUser, permissions: &[String]) -> Result<(), AppError> {
    match permissions.iter().find(|p| !auth.has_permission(p)) {
        Some(missing) => Err(AppError::Forbidden(format!(
            "No puede conceder el permiso '{}'",
            missing
        ))),
        None => Ok(()),
    }
}

pub fn ensure_not_self(auth: &AuthenticatedUser, id: Uuid) -> Result<(), AppError> {
    if id == auth.user_id {
        return Err(AppError::Forbidden(
            "No puede modificar su propia cuenta".to_string(),
        ));
    }
    Ok(())
}
