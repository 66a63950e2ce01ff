use axum::{
    extract::{Query, State},
    middleware,
    routing::get,
    Extension, Json, Router,
};

use crate::controllers::dashboard_controller::DashboardController;
use crate::dto::dashboard_dto::{DashboardQuery, DashboardResponse};
use crate::middleware::{auth_middleware, AuthenticatedUser};
use crate::state::AppState;
use crate::utils::errors::AppError;

pub fn create_dashboard_router(state: AppState) -> Router<AppState> {
    Router::new()
        .route("/", get(daily_dashboard))
        .route_layer(middleware::from_fn_with_state(state, auth_middleware))
}

async fn daily_dashboard(
    State(state): State<AppState>,
    Extension(user): Extension<AuthenticatedUser>,
    Query(query): Query<DashboardQuery>,
) -> Result<Json<DashboardResponse>, AppError> {
    let controller = DashboardController::new(state.dashboard.clone(), state.display_offset);
    let response = controller.daily(&user, query).await?;
    Ok(Json(response))
}
