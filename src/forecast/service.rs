use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, RwLock};

use axum::http::StatusCode;
use chrono::{NaiveDate, NaiveDateTime};
use thiserror::Error;

use super::models::*;
use crate::conditions::{classify, condition_text, Icon};
use crate::error::HttpError;
use crate::impl_into_response;
use crate::provider::models::ForecastPayload;
use crate::provider::{ForecastProvider, Geocoder, DEFAULT_AQI};

/// Hourly window carried by the canonical model (7 days).
const HOURLY_WINDOW: usize = 168;
/// Substituted spread when the overnight minimum is missing upstream.
const MISSING_LOW_SPREAD: f64 = 5.0;

#[derive(Error, Debug)]
pub enum ForecastError {
    #[error("City not found: {0}")]
    CityNotFound(String),

    #[error("Invalid provider response: {0}")]
    InvalidResponse(String),
}

impl HttpError for ForecastError {
    fn status_code(&self) -> StatusCode {
        match self {
            Self::CityNotFound(_) => StatusCode::NOT_FOUND,
            Self::InvalidResponse(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_code(&self) -> Option<&'static str> {
        match self {
            Self::CityNotFound(_) => Some("CITY_NOT_FOUND"),
            Self::InvalidResponse(_) => Some("INVALID_RESPONSE"),
        }
    }
}

impl_into_response!(ForecastError);

/// The one piece of shared mutable state: the most recently published
/// model. Fetches capture a generation token up front and publish only
/// if no newer fetch began meanwhile, so a slow response for a city the
/// user already navigated away from can never overwrite fresher state.
pub struct LatestSlot {
    generation: AtomicU64,
    slot: RwLock<Option<LatestForecast>>,
}

#[derive(Debug, Clone)]
pub struct LatestForecast {
    pub city: String,
    pub model: WeatherModel,
}

impl LatestSlot {
    pub fn new() -> Self {
        Self {
            generation: AtomicU64::new(0),
            slot: RwLock::new(None),
        }
    }

    /// Register a new fetch and return its relevance token.
    pub fn begin(&self) -> u64 {
        self.generation.fetch_add(1, Ordering::SeqCst) + 1
    }

    /// Publish a completed fetch. Returns false (and drops the value
    /// silently) when the token has been superseded.
    pub fn publish(&self, token: u64, city: &str, model: &WeatherModel) -> bool {
        if self.generation.load(Ordering::SeqCst) != token {
            tracing::debug!(city = %city, "Discarding stale forecast result");
            return false;
        }
        let mut slot = self.slot.write().expect("latest slot lock poisoned");
        *slot = Some(LatestForecast {
            city: city.to_string(),
            model: model.clone(),
        });
        true
    }

    pub fn latest(&self) -> Option<LatestForecast> {
        self.slot.read().expect("latest slot lock poisoned").clone()
    }
}

impl Default for LatestSlot {
    fn default() -> Self {
        Self::new()
    }
}

pub struct ForecastService {
    provider: Arc<dyn ForecastProvider>,
    fallback: Arc<dyn ForecastProvider>,
    geocoder: Arc<Geocoder>,
    latest: LatestSlot,
}

impl ForecastService {
    pub fn new(
        provider: Arc<dyn ForecastProvider>,
        fallback: Arc<dyn ForecastProvider>,
        geocoder: Arc<Geocoder>,
    ) -> Self {
        Self {
            provider,
            fallback,
            geocoder,
            latest: LatestSlot::new(),
        }
    }

    /// Most recently published model, if any fetch has completed.
    pub fn latest(&self) -> Option<LatestForecast> {
        self.latest.latest()
    }

    /// Build the canonical model for a city. The live provider failing
    /// swaps in the synthetic fallback; only an unresolvable city name
    /// surfaces as an error.
    pub async fn get_model(&self, city: &str) -> Result<WeatherModel, ForecastError> {
        let geo = self
            .geocoder
            .resolve(city)
            .await
            .ok_or_else(|| ForecastError::CityNotFound(city.to_string()))?;

        let token = self.latest.begin();

        let payload = match self.provider.fetch_forecast(geo.latitude, geo.longitude).await {
            Ok(payload) => payload,
            Err(e) => {
                tracing::warn!(city = %geo.name, error = %e, "Live forecast failed, using synthetic data");
                self.fallback
                    .fetch_forecast(geo.latitude, geo.longitude)
                    .await
                    .map_err(|e| ForecastError::InvalidResponse(e.to_string()))?
            }
        };

        let aqi = match self.provider.fetch_air_quality(geo.latitude, geo.longitude).await {
            Ok(aqi) => aqi,
            Err(e) => {
                tracing::warn!(city = %geo.name, error = %e, "Air quality lookup failed, using neutral default");
                DEFAULT_AQI
            }
        };

        let model = normalize(&geo.name, payload, aqi)?;
        self.latest.publish(token, city, &model);

        tracing::info!(
            city = %model.city,
            temp = %model.current.temperature,
            hours = model.hourly.len(),
            days = model.daily.len(),
            "Forecast model built"
        );

        Ok(model)
    }
}

/// Transform one provider payload into the canonical model.
pub fn normalize(
    city: &str,
    payload: ForecastPayload,
    aqi: f64,
) -> Result<WeatherModel, ForecastError> {
    let current_time = parse_local_dt(&payload.current.time).ok_or_else(|| {
        ForecastError::InvalidResponse(format!("unparseable current time {:?}", payload.current.time))
    })?;

    if payload.daily.time.is_empty() {
        return Err(ForecastError::InvalidResponse("daily block is empty".into()));
    }

    // "Now" is always representable: first hour at or after the current
    // reading, index 0 when the scan finds nothing.
    let hourly = &payload.hourly;
    let start = hourly
        .time
        .iter()
        .position(|raw| parse_local_dt(raw).is_some_and(|t| t >= current_time))
        .unwrap_or(0);

    let mut hours = Vec::with_capacity(HOURLY_WINDOW.min(hourly.time.len()));
    for i in start..hourly.time.len().min(start + HOURLY_WINDOW) {
        let Some(time) = parse_local_dt(&hourly.time[i]) else {
            continue;
        };
        let prob = prob_at(&hourly.precipitation_probability, i);
        let code = hourly.weather_code.get(i).copied().unwrap_or(0);
        let is_day = hourly.is_day.get(i).copied().unwrap_or(1) == 1;
        hours.push(HourEntry {
            time,
            clock: time.format("%H:%M").to_string(),
            temperature: value_at(&hourly.temperature_2m, i, payload.current.temperature_2m),
            feels_like: value_at(
                &hourly.apparent_temperature,
                i,
                payload.current.apparent_temperature,
            ),
            wind_speed: value_at(&hourly.wind_speed_10m, i, payload.current.wind_speed_10m),
            precipitation_probability: prob,
            icon: classify(code, is_day, prob),
            is_day,
        });
    }

    let current_prob = prob_at(&hourly.precipitation_probability, start);

    let daily = &payload.daily;
    let mut days = Vec::with_capacity(daily.time.len());
    for i in 0..daily.time.len() {
        let Some(date) = NaiveDate::parse_from_str(&daily.time[i], "%Y-%m-%d").ok() else {
            continue;
        };
        let high = opt_at(&daily.temperature_2m_max, i)
            .unwrap_or(payload.current.temperature_2m);
        let low = opt_at(&daily.temperature_2m_min, i)
            .unwrap_or(payload.current.temperature_2m - MISSING_LOW_SPREAD);
        let prob = opt_at(&daily.precipitation_probability_max, i)
            .map(to_prob)
            .unwrap_or(0);
        let code = daily.weather_code.get(i).copied().unwrap_or(0);
        let icon = classify(code, true, prob);
        days.push(DayEntry {
            label: day_label(i, date),
            date,
            date_label: date.format("%-d %b").to_string(),
            high,
            low,
            feels_like_max: opt_at(&daily.apparent_temperature_max, i).unwrap_or(high),
            uv_index_max: opt_at(&daily.uv_index_max, i).unwrap_or(0.0),
            precipitation_probability_max: prob,
            wind_speed_max: opt_at(&daily.wind_speed_10m_max, i)
                .unwrap_or(payload.current.wind_speed_10m),
            icon,
            condition: condition_text(icon).to_string(),
        });
    }

    let is_day = payload.current.is_day == 1;
    let icon = classify(payload.current.weather_code, is_day, current_prob);
    let uv_index = payload.current.uv_index.unwrap_or(0.0);
    let phrase = smart_phrase(
        icon,
        payload.current.temperature_2m,
        payload.current.wind_speed_10m,
        uv_index,
        current_prob,
    );

    Ok(WeatherModel {
        city: city.to_string(),
        latitude: payload.latitude,
        longitude: payload.longitude,
        current: CurrentConditions {
            time: current_time,
            temperature: payload.current.temperature_2m,
            feels_like: payload.current.apparent_temperature,
            humidity: payload.current.relative_humidity_2m,
            pressure: payload.current.surface_pressure,
            wind_speed: payload.current.wind_speed_10m,
            wind_direction: payload.current.wind_direction_10m.rem_euclid(360.0) as u16,
            uv_index,
            aqi,
            cloud_cover: payload.current.cloud_cover,
            precipitation: payload.current.precipitation,
            precipitation_probability: current_prob,
            is_day,
            icon,
            condition: condition_text(icon).to_string(),
        },
        sunrise: clock_of(daily.sunrise.first()),
        sunset: clock_of(daily.sunset.first()),
        phrase,
        hourly: hours,
        daily: days,
    })
}

/// One-line advisory from the headline readings; first matching rule wins.
pub fn smart_phrase(icon: Icon, temperature: f64, wind_speed: f64, uv_index: f64, precip_prob: u8) -> String {
    let phrase = match icon {
        Icon::Storm | Icon::Hail => "Thunderstorms around, best to stay indoors.",
        Icon::Snow | Icon::Sleet => "Snow on the way, watch for slippery roads.",
        Icon::FreezingRain => "Freezing rain expected, roads may ice over.",
        Icon::Rain | Icon::Drizzle => "Take an umbrella, rain is likely.",
        _ if precip_prob >= 40 => "Take an umbrella, rain is likely.",
        _ if uv_index >= 8.0 => "UV is very high today, use sunscreen.",
        _ if wind_speed >= 30.0 => "Strong wind today, secure loose items.",
        _ if temperature >= 32.0 => "Very hot today, stay hydrated.",
        _ if temperature <= 0.0 => "Freezing out there, wrap up well.",
        _ => "No surprises expected in today's weather.",
    };
    phrase.to_string()
}

fn day_label(index: usize, date: NaiveDate) -> String {
    match index {
        0 => "Today".to_string(),
        1 => "Tomorrow".to_string(),
        _ => date.format("%A").to_string(),
    }
}

/// Provider timestamps are local ISO, minute precision; accept seconds too.
pub fn parse_local_dt(raw: &str) -> Option<NaiveDateTime> {
    NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M")
        .or_else(|_| NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S"))
        .ok()
}

fn clock_of(raw: Option<&String>) -> String {
    raw.and_then(|r| parse_local_dt(r))
        .map(|t| t.format("%H:%M").to_string())
        .unwrap_or_default()
}

fn value_at(values: &[f64], index: usize, default: f64) -> f64 {
    values.get(index).copied().unwrap_or(default)
}

fn opt_at(values: &[Option<f64>], index: usize) -> Option<f64> {
    values.get(index).copied().flatten().filter(|v| !v.is_nan())
}

fn prob_at(values: &[Option<f64>], index: usize) -> u8 {
    opt_at(values, index).map(to_prob).unwrap_or(0)
}

fn to_prob(value: f64) -> u8 {
    value.round().clamp(0.0, 100.0) as u8
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::provider::SyntheticProvider;
    use chrono::{Datelike, Duration};

    fn anchor() -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2026, 8, 6)
            .unwrap()
            .and_hms_opt(14, 0, 0)
            .unwrap()
    }

    async fn synthetic_payload() -> ForecastPayload {
        SyntheticProvider::anchored(anchor())
            .fetch_forecast(41.0082, 28.9784)
            .await
            .unwrap()
    }

    #[tokio::test]
    async fn test_normalize_hourly_starts_at_now() {
        let model = normalize("İstanbul", synthetic_payload().await, 42.0).unwrap();

        assert!(!model.hourly.is_empty());
        assert!(model.hourly.len() <= 168);
        assert_eq!(model.hourly[0].time, anchor());
        // contiguous, non-decreasing run
        for pair in model.hourly.windows(2) {
            assert_eq!(pair[1].time - pair[0].time, Duration::hours(1));
        }
    }

    #[tokio::test]
    async fn test_normalize_daily_labels() {
        let model = normalize("İstanbul", synthetic_payload().await, 42.0).unwrap();

        assert_eq!(model.daily[0].label, "Today");
        assert_eq!(model.daily[0].date, anchor().date());
        assert_eq!(model.daily[1].label, "Tomorrow");
        // later entries use weekday names
        assert_eq!(model.daily[2].label, model.daily[2].date.format("%A").to_string());
        assert_eq!(model.daily.len(), 15);
    }

    #[tokio::test]
    async fn test_normalize_carries_aqi_and_city() {
        let model = normalize("İstanbul", synthetic_payload().await, 42.0).unwrap();
        assert_eq!(model.city, "İstanbul");
        assert_eq!(model.current.aqi, 42.0);
        assert_eq!(model.sunrise, "06:12");
        assert_eq!(model.sunset, "20:05");
    }

    #[tokio::test]
    async fn test_normalize_start_index_scans_past_stale_hours() {
        let mut payload = synthetic_payload().await;
        // Prepend six stale hours; the scan must skip them.
        let stale: Vec<String> = (1..=6)
            .rev()
            .map(|i| (anchor() - Duration::hours(i)).format("%Y-%m-%dT%H:%M").to_string())
            .collect();
        let mut time = stale;
        time.extend(payload.hourly.time.clone());
        payload.hourly.time = time;
        for _ in 0..6 {
            payload.hourly.temperature_2m.insert(0, -40.0);
            payload.hourly.apparent_temperature.insert(0, -40.0);
            payload.hourly.wind_speed_10m.insert(0, 0.0);
            payload.hourly.precipitation_probability.insert(0, Some(0.0));
            payload.hourly.weather_code.insert(0, 0);
            payload.hourly.is_day.insert(0, 1);
        }

        let model = normalize("İstanbul", payload, 42.0).unwrap();
        assert_eq!(model.hourly[0].time, anchor());
        assert!(model.hourly[0].temperature > -40.0);
    }

    #[tokio::test]
    async fn test_normalize_missing_low_defaults_to_current_minus_five() {
        let mut payload = synthetic_payload().await;
        payload.daily.temperature_2m_min[0] = None;
        let current = payload.current.temperature_2m;

        let model = normalize("İstanbul", payload, 42.0).unwrap();
        assert_eq!(model.daily[0].low, current - 5.0);
    }

    #[tokio::test]
    async fn test_normalize_rejects_empty_daily() {
        let mut payload = synthetic_payload().await;
        payload.daily = Default::default();
        assert!(matches!(
            normalize("İstanbul", payload, 42.0),
            Err(ForecastError::InvalidResponse(_))
        ));
    }

    #[tokio::test]
    async fn test_daily_first_entry_is_current_weekday() {
        let model = normalize("İstanbul", synthetic_payload().await, 42.0).unwrap();
        assert_eq!(model.daily[0].date.weekday(), anchor().date().weekday());
    }

    #[test]
    fn test_smart_phrase_precedence() {
        assert!(smart_phrase(Icon::Storm, 20.0, 5.0, 2.0, 10).contains("indoors"));
        assert!(smart_phrase(Icon::Snow, -2.0, 5.0, 2.0, 10).contains("slippery"));
        assert!(smart_phrase(Icon::Rain, 20.0, 5.0, 2.0, 80).contains("umbrella"));
        // probability forces the umbrella line even for a calm icon
        assert!(smart_phrase(Icon::Cloudy, 20.0, 5.0, 2.0, 45).contains("umbrella"));
        assert!(smart_phrase(Icon::Sunny, 25.0, 5.0, 9.0, 10).contains("sunscreen"));
        assert!(smart_phrase(Icon::Sunny, 25.0, 35.0, 3.0, 10).contains("wind"));
        assert!(smart_phrase(Icon::Sunny, 34.0, 5.0, 3.0, 10).contains("hydrated"));
        assert!(smart_phrase(Icon::Overcast, -4.0, 5.0, 1.0, 10).contains("wrap up"));
        assert_eq!(
            smart_phrase(Icon::Sunny, 22.0, 8.0, 3.0, 5),
            "No surprises expected in today's weather."
        );
    }

    #[test]
    fn test_parse_local_dt_accepts_minute_and_second_precision() {
        assert!(parse_local_dt("2026-08-06T14:00").is_some());
        assert!(parse_local_dt("2026-08-06T14:00:30").is_some());
        assert!(parse_local_dt("yesterday").is_none());
    }

    #[tokio::test]
    async fn test_latest_slot_discards_stale_publish() {
        let slot = LatestSlot::new();
        let model = normalize("İstanbul", synthetic_payload().await, 42.0).unwrap();

        let first = slot.begin();
        let second = slot.begin();

        // The older request resolves late; its result must be dropped.
        assert!(!slot.publish(first, "İstanbul", &model));
        assert!(slot.latest().is_none());

        assert!(slot.publish(second, "Ankara", &model));
        assert_eq!(slot.latest().unwrap().city, "Ankara");
    }
}
