pub mod handlers;
pub mod models;
pub mod service;

pub use models::{Capability, Hub, HubMatch};
pub use service::{haversine_km, resolve, HUBS};
