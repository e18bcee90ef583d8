use axum::{
    extract::{Path, State},
    Json,
};

use super::models::{LifestyleInputs, LifestyleReport};
use super::service::evaluate;
use crate::forecast::ForecastError;
use crate::AppState;

/// Get the nine activity advisories for a city's current conditions
///
/// GET /lifestyle/{city}
pub async fn get_lifestyle(
    State(state): State<AppState>,
    Path(city): Path<String>,
) -> Result<Json<LifestyleReport>, ForecastError> {
    let model = state.forecast_service.get_model(&city).await?;
    let indices = evaluate(LifestyleInputs::from(&model.current));

    Ok(Json(LifestyleReport {
        city: model.city,
        indices,
    }))
}
