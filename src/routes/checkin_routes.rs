use axum::{
    extract::{Path, Query, State},
    middleware,
    routing::{get, post},
    Extension, Json, Router,
};

use crate::controllers::checkin_controller::CheckinController;
use crate::dto::api_response::ApiResponse;
use crate::dto::checkin_dto::{CheckinRequest, CheckinResponse, CheckoutResponse, SessionFilters};
use crate::middleware::{auth_middleware, AuthenticatedUser};
use crate::state::AppState;
use crate::utils::errors::AppError;

pub fn create_checkin_router(state: AppState) -> Router<AppState> {
    Router::new()
        .route("/", get(list_sessions).post(check_in))
        .route("/:token", get(get_session))
        .route("/:token/estimate", get(estimate))
        .route("/:token/checkout", post(check_out))
        .route_layer(middleware::from_fn_with_state(state, auth_middleware))
}

fn controller(state: &AppState) -> CheckinController {
    CheckinController::new(state.parking.clone(), state.display_offset)
}

async fn check_in(
    State(state): State<AppState>,
    Extension(user): Extension<AuthenticatedUser>,
    Json(request): Json<CheckinRequest>,
) -> Result<Json<ApiResponse<CheckinResponse>>, AppError> {
    let response = controller(&state).check_in(&user, request).await?;
    Ok(Json(response))
}

async fn list_sessions(
    State(state): State<AppState>,
    Extension(user): Extension<AuthenticatedUser>,
    Query(filters): Query<SessionFilters>,
) -> Result<Json<Vec<CheckinResponse>>, AppError> {
    let response = controller(&state).list(&user, filters).await?;
    Ok(Json(response))
}

async fn get_session(
    State(state): State<AppState>,
    Extension(user): Extension<AuthenticatedUser>,
    Path(token): Path<String>,
) -> Result<Json<CheckinResponse>, AppError> {
    let response = controller(&state).get(&user, &token).await?;
    Ok(Json(response))
}

async fn estimate(
    State(state): State<AppState>,
    Extension(user): Extension<AuthenticatedUser>,
    Path(token): Path<String>,
) -> Result<Json<CheckoutResponse>, AppError> {
    let response = controller(&state).estimate(&user, &token).await?;
    Ok(Json(response))
}

async fn check_out(
    State(state): State<AppState>,
    Extension(user): Extension<AuthenticatedUser>,
    Path(token): Path<String>,
) -> Result<Json<ApiResponse<CheckoutResponse>>, AppError> {
    let response = controller(&state).check_out(&user, &token).await?;
    Ok(Json(response))
}
