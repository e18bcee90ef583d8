use config::{Case, Config, ConfigError, Environment, File};
use serde::Deserialize;

use crate::provider::client::{
    AIR_QUALITY_API_URL, ARCHIVE_API_URL, FORECAST_API_URL, GEOCODING_API_URL, MARINE_API_URL,
};
use crate::provider::ProviderEndpoints;

#[derive(Debug, Deserialize, Clone)]
pub struct AppConfig {
    /// Server host address
    #[serde(default = "default_host")]
    pub host: String,

    /// Server port
    #[serde(default = "default_port")]
    pub port: u16,

    /// Default city for forecast queries
    #[serde(default = "default_city")]
    pub default_city: String,

    /// Forecast days requested from the provider
    #[serde(default = "default_forecast_days")]
    pub forecast_days: u8,

    /// Forecast hours requested from the provider
    #[serde(default = "default_forecast_hours")]
    pub forecast_hours: u16,

    /// Upstream request timeout in seconds
    #[serde(default = "default_http_timeout_secs")]
    pub http_timeout_secs: u64,

    /// Forecast endpoint base URL
    #[serde(default = "default_forecast_url")]
    pub forecast_url: String,

    /// Geocoding endpoint base URL
    #[serde(default = "default_geocoding_url")]
    pub geocoding_url: String,

    /// Historical archive endpoint base URL
    #[serde(default = "default_archive_url")]
    pub archive_url: String,

    /// Air quality endpoint base URL
    #[serde(default = "default_air_quality_url")]
    pub air_quality_url: String,

    /// Marine endpoint base URL
    #[serde(default = "default_marine_url")]
    pub marine_url: String,

    /// Path of the persistent climate cache slot
    #[serde(default = "default_climate_cache_path")]
    pub climate_cache_path: String,

    /// Climate cache time-to-live in hours
    #[serde(default = "default_climate_cache_ttl_hours")]
    pub climate_cache_ttl_hours: i64,
}

impl AppConfig {
    pub fn load() -> Result<Self, ConfigError> {
        // Load .env file if present
        let _ = dotenvy::dotenv();

        let config = Config::builder()
            // Load from config file if present
            .add_source(File::with_name("config").required(false))
            .add_source(File::with_name("config.local").required(false))
            // Override with environment variables (prefixed with WXPORTAL_)
            .add_source(
                Environment::with_prefix("WXPORTAL")
                    .prefix_separator("_")
                    .separator("__")
                    .convert_case(Case::Snake)
                    .try_parsing(true),
            )
            .build()?;

        config.try_deserialize()
    }

    pub fn endpoints(&self) -> ProviderEndpoints {
        ProviderEndpoints {
            forecast_url: self.forecast_url.clone(),
            archive_url: self.archive_url.clone(),
            air_quality_url: self.air_quality_url.clone(),
            marine_url: self.marine_url.clone(),
        }
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            default_city: default_city(),
            forecast_days: default_forecast_days(),
            forecast_hours: default_forecast_hours(),
            http_timeout_secs: default_http_timeout_secs(),
            forecast_url: default_forecast_url(),
            geocoding_url: default_geocoding_url(),
            archive_url: default_archive_url(),
            air_quality_url: default_air_quality_url(),
            marine_url: default_marine_url(),
            climate_cache_path: default_climate_cache_path(),
            climate_cache_ttl_hours: default_climate_cache_ttl_hours(),
        }
    }
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    3000
}

fn default_city() -> String {
    "İstanbul".to_string()
}

fn default_forecast_days() -> u8 {
    15
}

fn default_forecast_hours() -> u16 {
    168
}

fn default_http_timeout_secs() -> u64 {
    10
}

fn default_forecast_url() -> String {
    FORECAST_API_URL.to_string()
}

fn default_geocoding_url() -> String {
    GEOCODING_API_URL.to_string()
}

fn default_archive_url() -> String {
    ARCHIVE_API_URL.to_string()
}

fn default_air_quality_url() -> String {
    AIR_QUALITY_API_URL.to_string()
}

fn default_marine_url() -> String {
    MARINE_API_URL.to_string()
}

fn default_climate_cache_path() -> String {
    "data/climate_cache.json".to_string()
}

fn default_climate_cache_ttl_hours() -> i64 {
    24
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_cover_every_field() {
        let config = AppConfig::default();
        assert_eq!(config.port, 3000);
        assert_eq!(config.default_city, "İstanbul");
        assert_eq!(config.forecast_days, 15);
        assert_eq!(config.forecast_hours, 168);
        assert_eq!(config.climate_cache_ttl_hours, 24);
        assert!(config.forecast_url.starts_with("https://"));
    }
}
