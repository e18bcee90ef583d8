pub mod handlers;
pub mod models;
pub mod service;

pub use models::{LifestyleIndex, LifestyleInputs, LifestyleReport, Status};
pub use service::evaluate;
