use async_trait::async_trait;
use chrono::NaiveDate;
use reqwest::Client;
use thiserror::Error;

use super::models::*;
use crate::cache::{normalize_cache_key, CachedGeoMatch, GeoCache};

pub const FORECAST_API_URL: &str = "https://api.open-meteo.com/v1/forecast";
pub const GEOCODING_API_URL: &str = "https://geocoding-api.open-meteo.com/v1/search";
pub const ARCHIVE_API_URL: &str = "https://archive-api.open-meteo.com/v1/archive";
pub const AIR_QUALITY_API_URL: &str = "https://air-quality-api.open-meteo.com/v1/air-quality";
pub const MARINE_API_URL: &str = "https://marine-api.open-meteo.com/v1/marine";

const CURRENT_FIELDS: &str = "temperature_2m,apparent_temperature,relative_humidity_2m,\
surface_pressure,wind_speed_10m,wind_direction_10m,cloud_cover,precipitation,weather_code,\
is_day,uv_index";
const HOURLY_FIELDS: &str = "temperature_2m,apparent_temperature,wind_speed_10m,\
precipitation_probability,weather_code,is_day";
const DAILY_FIELDS: &str = "weather_code,temperature_2m_max,temperature_2m_min,\
apparent_temperature_max,uv_index_max,precipitation_probability_max,wind_speed_10m_max,\
sunrise,sunset";
const ARCHIVE_DAILY_FIELDS: &str = "temperature_2m_max,temperature_2m_min,precipitation_sum";
const MARINE_CURRENT_FIELDS: &str =
    "wave_height,wave_period,wave_direction,sea_surface_temperature";
const SOIL_HOURLY_FIELDS: &str = "soil_temperature_0cm,soil_moisture_0_to_1cm";

/// Neutral European AQI substituted whenever the air-quality reading is
/// unavailable (mid "fair" band).
pub const DEFAULT_AQI: f64 = 50.0;

#[derive(Error, Debug)]
pub enum ProviderError {
    #[error("Failed to fetch data: {0}")]
    Request(#[from] reqwest::Error),

    #[error("Provider returned status {0}")]
    Status(u16),
}

/// Upstream data contract. The live Open-Meteo client and the synthetic
/// generator both implement it, so fail-soft fallback is a plain swap of
/// the injected implementation.
#[async_trait]
pub trait ForecastProvider: Send + Sync {
    async fn fetch_forecast(&self, lat: f64, lon: f64) -> Result<ForecastPayload, ProviderError>;

    async fn fetch_archive(
        &self,
        lat: f64,
        lon: f64,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<ArchivePayload, ProviderError>;

    async fn fetch_air_quality(&self, lat: f64, lon: f64) -> Result<f64, ProviderError>;

    async fn fetch_marine(&self, lat: f64, lon: f64) -> Result<MarinePayload, ProviderError>;

    async fn fetch_soil(&self, lat: f64, lon: f64) -> Result<SoilPayload, ProviderError>;
}

/// Base URLs for the live provider endpoints. Overridable through
/// configuration so tests and mirrors can point elsewhere.
#[derive(Debug, Clone)]
pub struct ProviderEndpoints {
    pub forecast_url: String,
    pub archive_url: String,
    pub air_quality_url: String,
    pub marine_url: String,
}

impl Default for ProviderEndpoints {
    fn default() -> Self {
        Self {
            forecast_url: FORECAST_API_URL.to_string(),
            archive_url: ARCHIVE_API_URL.to_string(),
            air_quality_url: AIR_QUALITY_API_URL.to_string(),
            marine_url: MARINE_API_URL.to_string(),
        }
    }
}

pub struct OpenMeteoProvider {
    client: Client,
    endpoints: ProviderEndpoints,
    forecast_days: u8,
    forecast_hours: u16,
}

impl OpenMeteoProvider {
    pub fn new(
        client: Client,
        endpoints: ProviderEndpoints,
        forecast_days: u8,
        forecast_hours: u16,
    ) -> Self {
        Self {
            client,
            endpoints,
            forecast_days,
            forecast_hours,
        }
    }

    fn check_status(status: reqwest::StatusCode) -> Result<(), ProviderError> {
        if status.is_success() {
            Ok(())
        } else {
            Err(ProviderError::Status(status.as_u16()))
        }
    }
}

#[async_trait]
impl ForecastProvider for OpenMeteoProvider {
    async fn fetch_forecast(&self, lat: f64, lon: f64) -> Result<ForecastPayload, ProviderError> {
        tracing::debug!(lat = %lat, lon = %lon, "Fetching forecast");

        let response = self
            .client
            .get(&self.endpoints.forecast_url)
            .query(&[
                ("latitude", lat.to_string()),
                ("longitude", lon.to_string()),
                ("current", CURRENT_FIELDS.to_string()),
                ("hourly", HOURLY_FIELDS.to_string()),
                ("daily", DAILY_FIELDS.to_string()),
                ("timezone", "auto".to_string()),
                ("forecast_days", self.forecast_days.to_string()),
                ("forecast_hours", self.forecast_hours.to_string()),
            ])
            .send()
            .await?;

        Self::check_status(response.status())?;
        Ok(response.json().await?)
    }

    async fn fetch_archive(
        &self,
        lat: f64,
        lon: f64,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<ArchivePayload, ProviderError> {
        tracing::debug!(lat = %lat, lon = %lon, start = %start, end = %end, "Fetching archive");

        let response = self
            .client
            .get(&self.endpoints.archive_url)
            .query(&[
                ("latitude", lat.to_string()),
                ("longitude", lon.to_string()),
                ("start_date", start.format("%Y-%m-%d").to_string()),
                ("end_date", end.format("%Y-%m-%d").to_string()),
                ("daily", ARCHIVE_DAILY_FIELDS.to_string()),
                ("timezone", "auto".to_string()),
            ])
            .send()
            .await?;

        Self::check_status(response.status())?;
        Ok(response.json().await?)
    }

    async fn fetch_air_quality(&self, lat: f64, lon: f64) -> Result<f64, ProviderError> {
        let response = self
            .client
            .get(&self.endpoints.air_quality_url)
            .query(&[
                ("latitude", lat.to_string()),
                ("longitude", lon.to_string()),
                ("current", "european_aqi".to_string()),
            ])
            .send()
            .await?;

        Self::check_status(response.status())?;
        let payload: AirQualityPayload = response.json().await?;
        Ok(payload.current.european_aqi.unwrap_or(DEFAULT_AQI))
    }

    async fn fetch_marine(&self, lat: f64, lon: f64) -> Result<MarinePayload, ProviderError> {
        let response = self
            .client
            .get(&self.endpoints.marine_url)
            .query(&[
                ("latitude", lat.to_string()),
                ("longitude", lon.to_string()),
                ("current", MARINE_CURRENT_FIELDS.to_string()),
                ("timezone", "auto".to_string()),
            ])
            .send()
            .await?;

        Self::check_status(response.status())?;
        Ok(response.json().await?)
    }

    async fn fetch_soil(&self, lat: f64, lon: f64) -> Result<SoilPayload, ProviderError> {
        let response = self
            .client
            .get(&self.endpoints.forecast_url)
            .query(&[
                ("latitude", lat.to_string()),
                ("longitude", lon.to_string()),
                ("hourly", SOIL_HOURLY_FIELDS.to_string()),
                ("timezone", "auto".to_string()),
                ("forecast_days", "1".to_string()),
            ])
            .send()
            .await?;

        Self::check_status(response.status())?;
        Ok(response.json().await?)
    }
}

/// Geocoding lookup with a 24-hour cache in front. Used only when the
/// caller supplies a city name instead of an explicit coordinate.
pub struct Geocoder {
    client: Client,
    geocoding_url: String,
    cache: GeoCache,
}

impl Geocoder {
    pub fn new(client: Client, geocoding_url: String, cache: GeoCache) -> Self {
        Self {
            client,
            geocoding_url,
            cache,
        }
    }

    /// Resolve a free-text place name to its best match, or `None` when
    /// the provider has no candidate or the lookup fails.
    pub async fn resolve(&self, name: &str) -> Option<GeoMatch> {
        let cache_key = normalize_cache_key(name);

        if let Some(cached) = self.cache.get(&cache_key) {
            tracing::debug!(name = %name, "Geocoding cache hit");
            return Some(GeoMatch {
                name: cached.name,
                latitude: cached.latitude,
                longitude: cached.longitude,
                country: cached.country,
            });
        }

        tracing::debug!(name = %name, "Geocoding cache miss");

        let result = match self.lookup(name).await {
            Ok(found) => found,
            Err(e) => {
                tracing::warn!(name = %name, error = %e, "Geocoding lookup failed");
                return None;
            }
        };

        if let Some(ref found) = result {
            self.cache.insert(
                cache_key,
                CachedGeoMatch {
                    name: found.name.clone(),
                    latitude: found.latitude,
                    longitude: found.longitude,
                    country: found.country.clone(),
                },
            );
        }

        result
    }

    async fn lookup(&self, name: &str) -> Result<Option<GeoMatch>, ProviderError> {
        let response = self
            .client
            .get(&self.geocoding_url)
            .query(&[("name", name), ("count", "1"), ("language", "en")])
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(ProviderError::Status(status.as_u16()));
        }

        let payload: GeoSearchResponse = response.json().await?;
        Ok(payload.results.into_iter().next())
    }
}
