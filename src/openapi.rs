use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::climate::models::{ClimateReport, ClimatologyPoint, HistoricalDayPoint};
use crate::conditions::Icon;
use crate::environment::{MarineReport, SoilReport};
use crate::error::ErrorResponse;
use crate::forecast::models::{CurrentConditions, DayEntry, HourEntry, WeatherModel};
use crate::hubs::models::{Capability, HubMatch};
use crate::lifestyle::models::{LifestyleIndex, LifestyleReport, Status};

/// OpenAPI documentation for the wxportal API
///
/// This provides basic schema documentation. Full path annotations
/// can be added incrementally to handlers as needed.
#[derive(OpenApi)]
#[openapi(
    info(
        title = "wxportal API",
        version = "1.0.0",
        description = "Weather portal data layer: canonical forecast models, tomorrow/weekend \
                       views, multi-year climatology, lifestyle indices and regional hub routing."
    ),
    tags(
        (name = "forecast", description = "Canonical forecast model and derived views"),
        (name = "climate", description = "Historical baseline and climatology"),
        (name = "lifestyle", description = "Activity advisories"),
        (name = "hubs", description = "Regional data hub resolution"),
        (name = "environment", description = "Marine and soil readings")
    ),
    components(
        schemas(
            ErrorResponse,
            WeatherModel,
            CurrentConditions,
            HourEntry,
            DayEntry,
            Icon,
            ClimateReport,
            ClimatologyPoint,
            HistoricalDayPoint,
            LifestyleReport,
            LifestyleIndex,
            Status,
            HubMatch,
            Capability,
            MarineReport,
            SoilReport,
        )
    )
)]
pub struct ApiDoc;

/// Create the Swagger UI router
pub fn swagger_ui() -> SwaggerUi {
    SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi())
}
