use axum::{
    extract::{Path, Query, State},
    Json,
};
use serde::Deserialize;

use super::models::WeatherModel;
use super::service::ForecastError;
use crate::projection;
use crate::AppState;

#[derive(Debug, Deserialize)]
pub struct ForecastQuery {
    /// City name
    pub city: Option<String>,
}

/// Get the canonical forecast model (current + 168h hourly + 15 day daily)
///
/// GET /forecast?city=İstanbul
pub async fn get_forecast(
    State(state): State<AppState>,
    Query(query): Query<ForecastQuery>,
) -> Result<Json<WeatherModel>, ForecastError> {
    let city = query
        .city
        .unwrap_or_else(|| state.config.default_city.clone());

    let model = state.forecast_service.get_model(&city).await?;
    Ok(Json(model))
}

/// Get the canonical forecast model by city path parameter
///
/// GET /forecast/{city}
pub async fn get_forecast_by_city(
    State(state): State<AppState>,
    Path(city): Path<String>,
) -> Result<Json<WeatherModel>, ForecastError> {
    let model = state.forecast_service.get_model(&city).await?;
    Ok(Json(model))
}

/// Get the most recently published forecast model without refetching
///
/// GET /forecast/latest
pub async fn get_latest(State(state): State<AppState>) -> Json<Option<WeatherModel>> {
    Json(state.forecast_service.latest().map(|l| l.model))
}

/// Get the tomorrow view of the forecast
///
/// GET /forecast/{city}/tomorrow
pub async fn get_tomorrow(
    State(state): State<AppState>,
    Path(city): Path<String>,
) -> Result<Json<WeatherModel>, ForecastError> {
    let model = state.forecast_service.get_model(&city).await?;
    Ok(Json(projection::tomorrow_view(&model)))
}

/// Get the weekend view of the forecast
///
/// GET /forecast/{city}/weekend
pub async fn get_weekend(
    State(state): State<AppState>,
    Path(city): Path<String>,
) -> Result<Json<WeatherModel>, ForecastError> {
    let model = state.forecast_service.get_model(&city).await?;
    Ok(Json(projection::weekend_view(&model)))
}
