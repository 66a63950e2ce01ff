use axum::{extract::State, middleware, routing::get, Extension, Json, Router};

use crate::controllers::pricing_controller::PricingController;
use crate::dto::api_response::ApiResponse;
use crate::dto::pricing_dto::{PricingResponse, UpdatePricingRequest};
use crate::middleware::{auth_middleware, AuthenticatedUser};
use crate::state::AppState;
use crate::utils::errors::AppError;

pub fn create_pricing_router(state: AppState) -> Router<AppState> {
    Router::new()
        .route("/", get(get_pricing).put(replace_pricing))
        .route_layer(middleware::from_fn_with_state(state, auth_middleware))
}

async fn get_pricing(
    State(state): State<AppState>,
    Extension(user): Extension<AuthenticatedUser>,
) -> Result<Json<PricingResponse>, AppError> {
    let controller = PricingController::new(state.parking.clone());
    let response = controller.get(&user).await?;
    Ok(Json(response))
}

async fn replace_pricing(
    State(state): State<AppState>,
    Extension(user): Extension<AuthenticatedUser>,
    Json(request): Json<UpdatePricingRequest>,
) -> Result<Json<ApiResponse<PricingResponse>>, AppError> {
    let controller = PricingController::new(state.parking.clone());
    let response = controller.replace(&user, request).await?;
    Ok(Json(response))
}
