use axum::{extract::Query, Json};
use serde::Deserialize;

use super::models::{Capability, HubMatch};
use super::service::resolve;

#[derive(Debug, Deserialize)]
pub struct ResolveQuery {
    pub lat: f64,
    pub lon: f64,
    pub capability: Capability,
}

/// Resolve the nearest capable regional hub for a coordinate
///
/// GET /hubs/resolve?lat=36.86&lon=31.05&capability=marine
///
/// Responds with `null` when no hub within service radius supports the
/// requested capability.
pub async fn resolve_hub(Query(query): Query<ResolveQuery>) -> Json<Option<HubMatch>> {
    Json(resolve(query.lat, query.lon, query.capability))
}
