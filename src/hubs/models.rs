use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Feature a regional hub can serve.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "kebab-case")]
pub enum Capability {
    Forecast,
    Marine,
    Traffic,
    AirQuality,
}

/// A regional data hub. Static configuration, never mutated at runtime.
#[derive(Debug, Clone)]
pub struct Hub {
    pub id: &'static str,
    pub name: &'static str,
    pub latitude: f64,
    pub longitude: f64,
    pub capabilities: &'static [Capability],
    /// Service radius in kilometers
    pub radius_km: f64,
}

/// A resolved hub with the great-circle distance to the query point.
#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
pub struct HubMatch {
    pub id: String,
    pub name: String,
    pub distance_km: f64,
}
