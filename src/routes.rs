use axum::{routing::get, Json, Router};
use serde::Serialize;

use crate::climate::handlers as climate_handlers;
use crate::environment;
use crate::forecast::handlers as forecast_handlers;
use crate::hubs::handlers as hubs_handlers;
use crate::lifestyle::handlers as lifestyle_handlers;
use crate::openapi::swagger_ui;
use crate::AppState;

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub version: &'static str,
}

/// Health check endpoint
pub async fn health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok",
        version: env!("CARGO_PKG_VERSION"),
    })
}

/// Build the forecast API routes
fn forecast_routes() -> Router<AppState> {
    Router::new()
        .route("/forecast", get(forecast_handlers::get_forecast))
        .route("/forecast/latest", get(forecast_handlers::get_latest))
        .route("/forecast/{city}", get(forecast_handlers::get_forecast_by_city))
        .route(
            "/forecast/{city}/tomorrow",
            get(forecast_handlers::get_tomorrow),
        )
        .route(
            "/forecast/{city}/weekend",
            get(forecast_handlers::get_weekend),
        )
}

/// Build the climate API routes
fn climate_routes() -> Router<AppState> {
    Router::new().route("/climate/{city}", get(climate_handlers::get_climate))
}

/// Build the lifestyle API routes
fn lifestyle_routes() -> Router<AppState> {
    Router::new().route("/lifestyle/{city}", get(lifestyle_handlers::get_lifestyle))
}

/// Build the hub resolver routes
fn hubs_routes() -> Router<AppState> {
    Router::new().route("/hubs/resolve", get(hubs_handlers::resolve_hub))
}

/// Build the marine/soil passthrough routes
fn environment_routes() -> Router<AppState> {
    Router::new()
        .route("/marine/{city}", get(environment::get_marine))
        .route("/soil/{city}", get(environment::get_soil))
}

/// Build all API v1 routes
pub fn api_v1_routes() -> Router<AppState> {
    Router::new()
        .merge(forecast_routes())
        .merge(climate_routes())
        .merge(lifestyle_routes())
        .merge(hubs_routes())
        .merge(environment_routes())
}

/// Build the complete application router
pub fn build_router() -> Router<AppState> {
    Router::new()
        // Health check at root level
        .route("/", get(health))
        .route("/health", get(health))
        // API v1 routes
        .nest("/api/v1", api_v1_routes())
        // Swagger UI for API documentation
        .merge(swagger_ui())
}
