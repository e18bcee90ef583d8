use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// One observed day in the trailing twelve-month window.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct HistoricalDayPoint {
    pub date: NaiveDate,
    pub high: f64,
    pub low: f64,
    /// Daily precipitation sum, mm
    pub precipitation: f64,
}

/// Multi-year average for one calendar day, indexed by day-of-year.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct ClimatologyPoint {
    /// 1–366
    pub day_of_year: u16,
    pub avg_high: f64,
    pub avg_low: f64,
    pub avg_precipitation: f64,
}

/// Historical baseline for the comparison charts: the raw trailing
/// window plus the sampled-year climatology. Both lists are empty when
/// the archive provider is unreachable.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct ClimateReport {
    pub city: String,
    pub last_twelve_months: Vec<HistoricalDayPoint>,
    pub climatology: Vec<ClimatologyPoint>,
}

impl ClimateReport {
    pub fn empty(city: impl Into<String>) -> Self {
        Self {
            city: city.into(),
            last_twelve_months: Vec::new(),
            climatology: Vec::new(),
        }
    }
}
