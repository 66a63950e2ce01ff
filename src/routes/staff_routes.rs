use axum::{
    extract::{Path, State},
    middleware,
    routing::{get, put},
    Extension, Json, Router,
};
use uuid::Uuid;

use crate::controllers::staff_controller::StaffController;
use crate::dto::api_response::ApiResponse;
use crate::dto::auth_dto::UserResponse;
use crate::dto::staff_dto::{CreateStaffRequest, UpdateStaffRequest};
use crate::middleware::{auth_middleware, AuthenticatedUser};
use crate::state::AppState;
use crate::utils::errors::AppError;

pub fn create_staff_router(state: AppState) -> Router<AppState> {
    Router::new()
        .route("/", get(list_staff).post(create_staff))
        .route("/:id", put(update_staff).delete(deactivate_staff))
        .route_layer(middleware::from_fn_with_state(state, auth_middleware))
}

async fn create_staff(
    State(state): State<AppState>,
    Extension(user): Extension<AuthenticatedUser>,
    Json(request): Json<CreateStaffRequest>,
) -> Result<Json<ApiResponse<UserResponse>>, AppError> {
    let controller = StaffController::new(state.users.clone());
    let response = controller.create(&user, request).await?;
    Ok(Json(response))
}

async fn list_staff(
    State(state): State<AppState>,
    Extension(user): Extension<AuthenticatedUser>,
) -> Result<Json<Vec<UserResponse>>, AppError> {
    let controller = StaffController::new(state.users.clone());
    let response = controller.list(&user).await?;
    Ok(Json(response))
}

async fn update_staff(
    State(state): State<AppState>,
    Extension(user): Extension<AuthenticatedUser>,
    Path(id): Path<Uuid>,
    Json(request): Json<UpdateStaffRequest>,
) -> Result<Json<ApiResponse<UserResponse>>, AppError> {
    let controller = StaffController::new(state.users.clone());
    let response = controller.update(&user, id, request).await?;
    Ok(Json(response))
}

async fn deactivate_staff(
    State(state): State<AppState>,
    Extension(user): Extension<AuthenticatedUser>,
    Path(id): Path<Uuid>,
) -> Result<Json<ApiResponse<()>>, AppError> {
    let controller = StaffController::new(state.users.clone());
    controller.deactivate(&user, id).await?;
    Ok(Json(ApiResponse::message("Empleado desactivado exitosamente")))
}
