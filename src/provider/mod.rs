pub mod client;
pub mod models;
pub mod synthetic;

pub use client::{
    ForecastProvider, Geocoder, OpenMeteoProvider, ProviderEndpoints, ProviderError, DEFAULT_AQI,
};
pub use synthetic::SyntheticProvider;
