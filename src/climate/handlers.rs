use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use thiserror::Error;

use super::models::ClimateReport;
use crate::error::HttpError;
use crate::impl_into_response;
use crate::AppState;

#[derive(Error, Debug)]
pub enum ClimateError {
    #[error("City not found: {0}")]
    CityNotFound(String),
}

impl HttpError for ClimateError {
    fn status_code(&self) -> StatusCode {
        match self {
            Self::CityNotFound(_) => StatusCode::NOT_FOUND,
        }
    }

    fn error_code(&self) -> Option<&'static str> {
        match self {
            Self::CityNotFound(_) => Some("CITY_NOT_FOUND"),
        }
    }
}

impl_into_response!(ClimateError);

/// Get the historical baseline for a city
///
/// GET /climate/{city}
pub async fn get_climate(
    State(state): State<AppState>,
    Path(city): Path<String>,
) -> Result<Json<ClimateReport>, ClimateError> {
    let geo = state
        .geocoder
        .resolve(&city)
        .await
        .ok_or_else(|| ClimateError::CityNotFound(city.clone()))?;

    let report = state
        .climate_service
        .report(&geo.name, geo.latitude, geo.longitude)
        .await;

    Ok(Json(report))
}
