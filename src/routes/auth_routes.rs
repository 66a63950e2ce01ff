use axum::{
    extract::State,
    middleware,
    routing::{get, post},
    Extension, Json, Router,
};

use crate::controllers::auth_controller::AuthController;
use crate::dto::api_response::ApiResponse;
use crate::dto::auth_dto::{LoginRequest, LoginResponse, MeResponse, RegisterAccountRequest, RegisterResponse};
use crate::middleware::{auth_middleware, rate_limit_middleware, AuthenticatedUser};
use crate::state::AppState;
use crate::utils::errors::AppError;

/// Configura las rutas de autenticación
pub fn create_auth_router(state: AppState) -> Router<AppState> {
    let public = Router::new()
        .route("/register", post(register))
        .route("/login", post(login))
        .route_layer(middleware::from_fn_with_state(state.clone(), rate_limit_middleware));

    let protected = Router::new()
        .route("/me", get(me))
        .route_layer(middleware::from_fn_with_state(state, auth_middleware));

    public.merge(protected)
}

async fn register(
    State(state): State<AppState>,
    Json(request): Json<RegisterAccountRequest>,
) -> Result<Json<ApiResponse<RegisterResponse>>, AppError> {
    let controller = AuthController::new(state.accounts.clone(), state.users.clone(), state.jwt.clone());
    let response = controller.register(request).await?;
    Ok(Json(response))
}

async fn login(
    State(state): State<AppState>,
    Json(request): Json<LoginRequest>,
) -> Result<Json<ApiResponse<LoginResponse>>, AppError> {
    let controller = AuthController::new(state.accounts.clone(), state.users.clone(), state.jwt.clone());
    let response = controller.login(request).await?;
    Ok(Json(response))
}

async fn me(
    State(state): State<AppState>,
    Extension(user): Extension<AuthenticatedUser>,
) -> Result<Json<MeResponse>, AppError> {
    let controller = AuthController::new(state.accounts.clone(), state.users.clone(), state.jwt.clone());
    let response = controller.me(&user).await?;
    Ok(Json(response))
}
