use serde::Deserialize;

// ============================================================================
// Geocoding search response
// ============================================================================

#[derive(Debug, Deserialize)]
pub struct GeoSearchResponse {
    #[serde(default)]
    pub results: Vec<GeoMatch>,
}

/// Best geocoding match for a free-text place name.
#[derive(Debug, Clone, Deserialize)]
pub struct GeoMatch {
    pub name: String,
    pub latitude: f64,
    pub longitude: f64,
    #[serde(default)]
    pub country: Option<String>,
}

// ============================================================================
// Forecast response (parallel arrays keyed by `time`)
// These structs deserialize the raw provider payload; not every field is
// consumed by every caller
// ============================================================================

#[allow(dead_code)]
#[derive(Debug, Clone, Deserialize)]
pub struct ForecastPayload {
    pub latitude: f64,
    pub longitude: f64,
    pub current: CurrentBlock,
    pub hourly: HourlyBlock,
    pub daily: DailyBlock,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CurrentBlock {
    /// Local ISO timestamp, e.g. "2026-08-06T14:00"
    pub time: String,
    pub temperature_2m: f64,
    pub apparent_temperature: f64,
    pub relative_humidity_2m: f64,
    pub surface_pressure: f64,
    pub wind_speed_10m: f64,
    pub wind_direction_10m: f64,
    pub cloud_cover: f64,
    pub precipitation: f64,
    pub weather_code: u8,
    /// 1 for daytime, 0 for night
    pub is_day: u8,
    #[serde(default)]
    pub uv_index: Option<f64>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct HourlyBlock {
    pub time: Vec<String>,
    pub temperature_2m: Vec<f64>,
    pub apparent_temperature: Vec<f64>,
    pub wind_speed_10m: Vec<f64>,
    #[serde(default)]
    pub precipitation_probability: Vec<Option<f64>>,
    pub weather_code: Vec<u8>,
    pub is_day: Vec<u8>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct DailyBlock {
    /// Local ISO dates, e.g. "2026-08-06"
    pub time: Vec<String>,
    pub weather_code: Vec<u8>,
    pub temperature_2m_max: Vec<Option<f64>>,
    pub temperature_2m_min: Vec<Option<f64>>,
    pub apparent_temperature_max: Vec<Option<f64>>,
    pub uv_index_max: Vec<Option<f64>>,
    pub precipitation_probability_max: Vec<Option<f64>>,
    pub wind_speed_10m_max: Vec<Option<f64>>,
    /// Local ISO timestamps
    pub sunrise: Vec<String>,
    pub sunset: Vec<String>,
}

// ============================================================================
// Historical archive response (daily arrays over a date range)
// ============================================================================

#[allow(dead_code)]
#[derive(Debug, Clone, Deserialize)]
pub struct ArchivePayload {
    pub latitude: f64,
    pub longitude: f64,
    pub daily: ArchiveDailyBlock,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ArchiveDailyBlock {
    pub time: Vec<String>,
    pub temperature_2m_max: Vec<Option<f64>>,
    pub temperature_2m_min: Vec<Option<f64>>,
    pub precipitation_sum: Vec<Option<f64>>,
}

// ============================================================================
// Air quality response
// ============================================================================

#[derive(Debug, Deserialize)]
pub struct AirQualityPayload {
    pub current: AirQualityCurrent,
}

#[derive(Debug, Deserialize)]
pub struct AirQualityCurrent {
    #[serde(default)]
    pub european_aqi: Option<f64>,
}

// ============================================================================
// Marine response
// ============================================================================

#[allow(dead_code)]
#[derive(Debug, Clone, Deserialize)]
pub struct MarinePayload {
    pub latitude: f64,
    pub longitude: f64,
    pub current: MarineCurrent,
}

#[derive(Debug, Clone, Deserialize)]
pub struct MarineCurrent {
    pub time: String,
    #[serde(default)]
    pub wave_height: Option<f64>,
    #[serde(default)]
    pub wave_period: Option<f64>,
    #[serde(default)]
    pub wave_direction: Option<f64>,
    #[serde(default)]
    pub sea_surface_temperature: Option<f64>,
}

// ============================================================================
// Soil readings (hourly soil fields of the forecast endpoint)
// ============================================================================

#[derive(Debug, Clone, Deserialize)]
pub struct SoilPayload {
    pub hourly: SoilHourlyBlock,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct SoilHourlyBlock {
    pub time: Vec<String>,
    #[serde(default)]
    pub soil_temperature_0cm: Vec<Option<f64>>,
    #[serde(default)]
    pub soil_moisture_0_to_1cm: Vec<Option<f64>>,
}
