//! Backend de gestión de aparcamientos
//!
//! API para registrar entradas y salidas de vehículos, calcular tarifas,
//! vender abonos mensuales y consultar la actividad diaria.

pub mod config;
pub mod controllers;
pub mod database;
pub mod dto;
pub mod middleware;
pub mod models;
pub mod repositories;
pub mod routes;
pub mod services;
pub mod state;
pub mod utils;

use axum::{response::Json, routing::get, Router};
use serde_json::{json, Value};
use tower::ServiceBuilder;
use tower_http::{compression::CompressionLayer, trace::TraceLayer};

use crate::middleware::cors_layer;
use crate::state::AppState;

/// Router completo de la aplicación
pub fn create_app(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health_check))
        .nest("/api/auth", routes::auth_routes::create_auth_router(state.clone()))
        .nest("/api/staff", routes::staff_routes::create_staff_router(state.clone()))
        .nest("/api/pricing", routes::pricing_routes::create_pricing_router(state.clone()))
        .nest("/api/checkins", routes::checkin_routes::create_checkin_router(state.clone()))
        .nest("/api/passes", routes::monthly_pass_routes::create_monthly_pass_router(state.clone()))
        .nest("/api/dashboard", routes::dashboard_routes::create_dashboard_router(state.clone()))
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(cors_layer(&state.config.cors_origins))
                .layer(CompressionLayer::new()),
        )
        .with_state(state)
}

async fn health_check() -> Json<Value> {
    Json(json!({
        "status": "ok",
        "service": "parking_manager",
        "timestamp": chrono::Utc::now().to_rfc3339(),
    }))
}
