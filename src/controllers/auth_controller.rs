use crate::dto::api_response::ApiResponse;
use crate::dto::auth_dto::{
    AccountResponse, LoginRequest, LoginResponse, MeResponse, RegisterAccountRequest, RegisterResponse,
    UserResponse,
};
use crate::middleware::auth::AuthenticatedUser;
use crate::models::account::Account;
use crate::models::pricing::PricingTable;
use crate::models::user::{User, UserRole};
use crate::repositories::account_repository::AccountRepository;
use crate::repositories::user_repository::UserRepository;
use crate::utils::errors::AppError;
use crate::utils::jwt::{generate_token, JwtConfig};
use bcrypt::{hash, verify, DEFAULT_COST};
use std::sync::Arc;
use tracing::info;
use validator::Validate;

pub struct AuthController {
    accounts: Arc<dyn AccountRepository>,
    users: Arc<dyn UserRepository>,
    jwt: JwtConfig,
}

impl AuthController {
    pub fn new(accounts: Arc<dyn AccountRepository>, users: Arc<dyn UserRepository>, jwt: JwtConfig) -> Self {
        Self { accounts, users, jwt }
    }

    pub async fn register(&self, request: RegisterAccountRequest) -> Result<ApiResponse<RegisterResponse>, AppError> {
        request.validate()?;

        // Verificar que el email no exista
        if self.users.email_exists(&request.email).await? {
            return Err(AppError::Conflict("El email ya está registrado".to_string()));
        }

        let password_hash = hash_password(request.password).await?;

        let account = Account::new(
            request.parking_name.trim().to_string(),
            request.address.trim().to_string(),
            request.phone.filter(|p| !p.trim().is_empty()),
        );
        let admin = User::new(
            account.id,
            request.admin_name.trim().to_string(),
            request.email,
            password_hash,
            UserRole::Admin,
            Vec::new(),
        );
        let pricing = PricingTable::empty(account.id);

        let saved = self.accounts.create_with_admin(&account, &admin, &pricing).await?;
        info!("🏢 Nuevo aparcamiento registrado: {} ({})", saved.parking_name, saved.id);

        Ok(ApiResponse::success_with_message(
            RegisterResponse {
                account: AccountResponse::from(saved),
                admin: UserResponse::from(admin),
            },
            "Aparcamiento registrado exitosamente",
        ))
    }

    pub async fn login(&self, request: LoginRequest) -> Result<ApiResponse<LoginResponse>, AppError> {
        request.validate()?;

        let user = self
            .users
            .find_by_email(&request.email)
            .await?
            .ok_or_else(|| AppError::Unauthorized("Credenciales inválidas".to_string()))?;

        if !verify_password(request.password, user.password_hash.clone()).await? {
            return Err(AppError::Unauthorized("Credenciales inválidas".to_string()));
        }

        if !user.is_active {
            return Err(AppError::Forbidden("Usuario desactivado".to_string()));
        }

        let token = generate_token(
            user.id,
            user.account_id,
            user.role().as_str(),
            user.effective_permissions(),
            &self.jwt,
        )?;

        info!("🔑 Login de {} ({})", user.email, user.role);

        Ok(ApiResponse::success(LoginResponse {
            token,
            expires_in: self.jwt.expiration,
            user: UserResponse::from(user),
        }))
    }

    pub async fn me(&self, auth: &AuthenticatedUser) -> Result<MeResponse, AppError> {
        let user = self
            .users
            .find_by_id(auth.user_id, auth.account_id)
            .await?
            .ok_or_else(|| AppError::NotFound("Usuario no encontrado".to_string()))?;

        let account = self
            .accounts
            .find_by_id(auth.account_id)
            .await?
            .ok_or_else(|| AppError::NotFound("Cuenta no encontrada".to_string()))?;

        Ok(MeResponse {
            user: UserResponse::from(user),
            account: AccountResponse::from(account),
        })
    }
}

/// bcrypt es costoso en CPU; se ejecuta fuera del runtime async
pub async fn hash_password(password: String) -> Result<String, AppError> {
    tokio::task::spawn_blocking(move || hash(password, DEFAULT_COST))
        .await
        .map_err(|e| AppError::Internal(format!("Hash task failed: {}", e)))?
        .map_err(|e| AppError::Hash(e.to_string()))
}

pub async fn verify_password(password: String, password_hash: String) -> Result<bool, AppError> {
    tokio::task::spawn_blocking(move || verify(password, &password_hash))
        .await
        .map_err(|e| AppError::Internal(format!("Verify task failed: {}", e)))?
        .map_err(|e| AppError::Hash(e.to_string()))
}
