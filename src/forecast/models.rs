use chrono::{NaiveDate, NaiveDateTime};
use serde::Serialize;
use utoipa::ToSchema;

use crate::conditions::Icon;

/// Canonical weather model consumed by the portal. Built fresh on every
/// fetch; derived views (tomorrow, weekend) are new values, never
/// in-place edits.
///
/// Invariants: `hourly` is a contiguous, non-decreasing run of hours
/// starting at "now"; `daily[0]` is the current calendar day.
#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
pub struct WeatherModel {
    pub city: String,
    pub latitude: f64,
    pub longitude: f64,
    pub current: CurrentConditions,
    /// Local clock string, e.g. "06:12"
    pub sunrise: String,
    /// Local clock string, e.g. "20:05"
    pub sunset: String,
    /// One-line advisory derived from the current readings
    pub phrase: String,
    pub hourly: Vec<HourEntry>,
    pub daily: Vec<DayEntry>,
}

#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
pub struct CurrentConditions {
    /// Provider-local timestamp of the reading
    pub time: NaiveDateTime,
    pub temperature: f64,
    pub feels_like: f64,
    pub humidity: f64,
    pub pressure: f64,
    pub wind_speed: f64,
    pub wind_direction: u16,
    pub uv_index: f64,
    /// European AQI; neutral default when the side lookup fails
    pub aqi: f64,
    pub cloud_cover: f64,
    /// Precipitation volume over the last hour, mm
    pub precipitation: f64,
    pub precipitation_probability: u8,
    pub is_day: bool,
    pub icon: Icon,
    pub condition: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
pub struct HourEntry {
    pub time: NaiveDateTime,
    /// Local clock label, e.g. "14:00"
    pub clock: String,
    pub temperature: f64,
    pub feels_like: f64,
    pub wind_speed: f64,
    pub precipitation_probability: u8,
    pub icon: Icon,
    pub is_day: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
pub struct DayEntry {
    /// "Today", "Tomorrow", a weekday name, or "Weekend" for the
    /// aggregated weekend summary
    pub label: String,
    pub date: NaiveDate,
    /// Short display date, e.g. "6 Aug"
    pub date_label: String,
    pub high: f64,
    pub low: f64,
    pub feels_like_max: f64,
    pub uv_index_max: f64,
    pub precipitation_probability_max: u8,
    pub wind_speed_max: f64,
    pub icon: Icon,
    pub condition: String,
}
