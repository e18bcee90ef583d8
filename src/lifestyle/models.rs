use serde::Serialize;
use utoipa::ToSchema;

use crate::forecast::CurrentConditions;

/// Advisory tier for one activity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum Status {
    Good,
    Moderate,
    Bad,
}

/// One categorical activity advisory. Recomputed in full on every
/// evaluation; carries no state.
#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
pub struct LifestyleIndex {
    pub id: String,
    pub name: String,
    pub status: Status,
    pub label: String,
    pub icon: String,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct LifestyleReport {
    pub city: String,
    pub indices: Vec<LifestyleIndex>,
}

/// Numeric readings the rule tables evaluate. Malformed values are
/// replaced with neutral defaults up front so every rule sees a finite
/// number.
#[derive(Debug, Clone, Copy)]
pub struct LifestyleInputs {
    pub temperature: f64,
    pub wind_speed: f64,
    pub humidity: f64,
    pub uv_index: f64,
    pub aqi: f64,
    pub precipitation_probability: f64,
}

const NEUTRAL_TEMPERATURE: f64 = 20.0;
const NEUTRAL_WIND: f64 = 10.0;
const NEUTRAL_HUMIDITY: f64 = 50.0;
const NEUTRAL_UV: f64 = 3.0;
const NEUTRAL_AQI: f64 = 50.0;
const NEUTRAL_PRECIP_PROB: f64 = 10.0;

impl LifestyleInputs {
    pub fn sanitized(self) -> Self {
        Self {
            temperature: finite_or(self.temperature, NEUTRAL_TEMPERATURE),
            wind_speed: finite_or(self.wind_speed, NEUTRAL_WIND),
            humidity: finite_or(self.humidity, NEUTRAL_HUMIDITY),
            uv_index: finite_or(self.uv_index, NEUTRAL_UV),
            aqi: finite_or(self.aqi, NEUTRAL_AQI),
            precipitation_probability: finite_or(self.precipitation_probability, NEUTRAL_PRECIP_PROB),
        }
    }
}

impl From<&CurrentConditions> for LifestyleInputs {
    fn from(current: &CurrentConditions) -> Self {
        Self {
            temperature: current.temperature,
            wind_speed: current.wind_speed,
            humidity: current.humidity,
            uv_index: current.uv_index,
            aqi: current.aqi,
            precipitation_probability: f64::from(current.precipitation_probability),
        }
    }
}

fn finite_or(value: f64, default: f64) -> f64 {
    if value.is_finite() {
        value
    } else {
        default
    }
}
