pub mod handlers;
pub mod models;
pub mod service;

pub use models::{CurrentConditions, DayEntry, HourEntry, WeatherModel};
pub use service::{ForecastError, ForecastService};
