use axum::{
    extract::{Path, Query, State},
    middleware,
    routing::{delete, get},
    Extension, Json, Router,
};
use uuid::Uuid;

use crate::controllers::monthly_pass_controller::MonthlyPassController;
use crate::dto::api_response::ApiResponse;
use crate::dto::monthly_pass_dto::{CreatePassRequest, PassFilters, PassLookupQuery};
use crate::middleware::{auth_middleware, AuthenticatedUser};
use crate::models::monthly_pass::MonthlyPass;
use crate::state::AppState;
use crate::utils::errors::AppError;

pub fn create_monthly_pass_router(state: AppState) -> Router<AppState> {
    Router::new()
        .route("/", get(list_passes).post(create_pass))
        .route("/vehicle/:plate", get(active_for_vehicle))
        .route("/:id", delete(cancel_pass))
        .route_layer(middleware::from_fn_with_state(state, auth_middleware))
}

fn controller(state: &AppState) -> MonthlyPassController {
    MonthlyPassController::new(state.passes.clone(), state.parking.clone(), state.display_offset)
}

async fn create_pass(
    State(state): State<AppState>,
    Extension(user): Extension<AuthenticatedUser>,
    Json(request): Json<CreatePassRequest>,
) -> Result<Json<ApiResponse<MonthlyPass>>, AppError> {
    let response = controller(&state).create(&user, request).await?;
    Ok(Json(response))
}

async fn list_passes(
    State(state): State<AppState>,
    Extension(user): Extension<AuthenticatedUser>,
    Query(filters): Query<PassFilters>,
) -> Result<Json<Vec<MonthlyPass>>, AppError> {
    let response = controller(&state).list(&user, filters).await?;
    Ok(Json(response))
}

async fn active_for_vehicle(
    State(state): State<AppState>,
    Extension(user): Extension<AuthenticatedUser>,
    Path(plate): Path<String>,
    Query(query): Query<PassLookupQuery>,
) -> Result<Json<MonthlyPass>, AppError> {
    let response = controller(&state).active_for_vehicle(&user, &plate, query).await?;
    Ok(Json(response))
}

async fn cancel_pass(
    State(state): State<AppState>,
    Extension(user): Extension<AuthenticatedUser>,
    Path(id): Path<Uuid>,
) -> Result<Json<ApiResponse<MonthlyPass>>, AppError> {
    let response = controller(&state).cancel(&user, id).await?;
    Ok(Json(response))
}
