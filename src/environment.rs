//! Marine and soil readings: thin normalized passthroughs over the
//! provider, fail-soft to null-bodied responses.

use std::sync::Arc;

use axum::{
    extract::{Path, State},
    Json,
};
use serde::Serialize;
use utoipa::ToSchema;

use crate::forecast::ForecastError;
use crate::provider::{ForecastProvider, Geocoder};
use crate::AppState;

/// Current sea-state readings for a coastal coordinate.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct MarineReport {
    pub city: String,
    /// Provider-local timestamp of the reading
    pub observed_at: Option<String>,
    pub wave_height_m: Option<f64>,
    pub wave_period_s: Option<f64>,
    pub wave_direction_deg: Option<f64>,
    pub sea_surface_temperature: Option<f64>,
}

/// Topsoil readings for the current hour.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct SoilReport {
    pub city: String,
    /// Provider-local timestamp of the reading
    pub observed_at: Option<String>,
    pub soil_temperature: Option<f64>,
    pub soil_moisture: Option<f64>,
}

pub struct EnvironmentService {
    provider: Arc<dyn ForecastProvider>,
    geocoder: Arc<Geocoder>,
}

impl EnvironmentService {
    pub fn new(provider: Arc<dyn ForecastProvider>, geocoder: Arc<Geocoder>) -> Self {
        Self { provider, geocoder }
    }

    pub async fn marine(&self, city: &str) -> Result<MarineReport, ForecastError> {
        let geo = self
            .geocoder
            .resolve(city)
            .await
            .ok_or_else(|| ForecastError::CityNotFound(city.to_string()))?;

        match self.provider.fetch_marine(geo.latitude, geo.longitude).await {
            Ok(payload) => Ok(MarineReport {
                city: geo.name,
                observed_at: Some(payload.current.time),
                wave_height_m: payload.current.wave_height,
                wave_period_s: payload.current.wave_period,
                wave_direction_deg: payload.current.wave_direction,
                sea_surface_temperature: payload.current.sea_surface_temperature,
            }),
            Err(e) => {
                tracing::warn!(city = %geo.name, error = %e, "Marine lookup failed");
                Ok(MarineReport {
                    city: geo.name,
                    observed_at: None,
                    wave_height_m: None,
                    wave_period_s: None,
                    wave_direction_deg: None,
                    sea_surface_temperature: None,
                })
            }
        }
    }

    pub async fn soil(&self, city: &str) -> Result<SoilReport, ForecastError> {
        let geo = self
            .geocoder
            .resolve(city)
            .await
            .ok_or_else(|| ForecastError::CityNotFound(city.to_string()))?;

        match self.provider.fetch_soil(geo.latitude, geo.longitude).await {
            Ok(payload) => Ok(SoilReport {
                city: geo.name,
                observed_at: payload.hourly.time.first().cloned(),
                soil_temperature: payload.hourly.soil_temperature_0cm.first().copied().flatten(),
                soil_moisture: payload.hourly.soil_moisture_0_to_1cm.first().copied().flatten(),
            }),
            Err(e) => {
                tracing::warn!(city = %geo.name, error = %e, "Soil lookup failed");
                Ok(SoilReport {
                    city: geo.name,
                    observed_at: None,
                    soil_temperature: None,
                    soil_moisture: None,
                })
            }
        }
    }
}

/// GET /marine/{city}
pub async fn get_marine(
    State(state): State<AppState>,
    Path(city): Path<String>,
) -> Result<Json<MarineReport>, ForecastError> {
    let report = state.environment_service.marine(&city).await?;
    Ok(Json(report))
}

/// GET /soil/{city}
pub async fn get_soil(
    State(state): State<AppState>,
    Path(city): Path<String>,
) -> Result<Json<SoilReport>, ForecastError> {
    let report = state.environment_service.soil(&city).await?;
    Ok(Json(report))
}
