pub mod handlers;
pub mod models;
pub mod service;

pub use models::{ClimateReport, ClimatologyPoint, HistoricalDayPoint};
pub use service::ClimateService;
