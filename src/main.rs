mod cache;
mod climate;
mod conditions;
mod config;
mod environment;
mod error;
mod forecast;
mod hubs;
mod lifestyle;
mod openapi;
mod projection;
mod provider;
mod routes;

use axum::{error_handling::HandleErrorLayer, http::StatusCode, BoxError};
use reqwest::Client;
use std::{sync::Arc, time::Duration};
use tower::ServiceBuilder;
use tower_http::trace::TraceLayer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use crate::cache::SingleEntryCache;
use crate::climate::ClimateService;
use crate::config::AppConfig;
use crate::environment::EnvironmentService;
use crate::forecast::ForecastService;
use crate::provider::{Geocoder, OpenMeteoProvider, SyntheticProvider};

const HTTP_CONNECT_TIMEOUT_SECS: u64 = 5;
const HTTP_POOL_IDLE_TIMEOUT_SECS: u64 = 90;

#[derive(Clone)]
pub struct AppState {
    pub config: Arc<AppConfig>,
    pub geocoder: Arc<Geocoder>,
    pub forecast_service: Arc<ForecastService>,
    pub climate_service: Arc<ClimateService>,
    pub environment_service: Arc<EnvironmentService>,
}

/// Create shared HTTP client with connection pooling. The overall
/// timeout keeps a dead upstream from stalling a request past the
/// fail-soft fallback.
fn create_http_client(timeout_secs: u64) -> Client {
    Client::builder()
        .timeout(Duration::from_secs(timeout_secs))
        .connect_timeout(Duration::from_secs(HTTP_CONNECT_TIMEOUT_SECS))
        .pool_idle_timeout(Duration::from_secs(HTTP_POOL_IDLE_TIMEOUT_SECS))
        .pool_max_idle_per_host(10)
        .build()
        .expect("Failed to create HTTP client")
}

/// Handle request timeout errors
async fn handle_timeout_error(err: BoxError) -> (StatusCode, String) {
    if err.is::<tower::timeout::error::Elapsed>() {
        (StatusCode::REQUEST_TIMEOUT, "Request timed out".to_string())
    } else {
        (
            StatusCode::INTERNAL_SERVER_ERROR,
            format!("Internal error: {}", err),
        )
    }
}

/// Graceful shutdown signal handler
async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("Failed to listen for ctrl+c");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("Failed to listen for SIGTERM")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    tracing::info!("Shutdown signal received, starting graceful shutdown");
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "wxportal=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Load configuration
    let config = AppConfig::load()?;
    tracing::info!("Configuration loaded successfully");

    // Create shared HTTP client with connection pooling
    let http_client = create_http_client(config.http_timeout_secs);
    tracing::debug!("Shared HTTP client created");

    // Geocoding sits behind a 24-hour in-memory cache
    let geo_cache = cache::create_geo_cache();
    cache::start_cache_cleanup_task(Arc::clone(&geo_cache));
    let geocoder = Arc::new(Geocoder::new(
        http_client.clone(),
        config.geocoding_url.clone(),
        geo_cache,
    ));

    // Live provider plus the synthetic fallback behind the same contract
    let live_provider = Arc::new(OpenMeteoProvider::new(
        http_client.clone(),
        config.endpoints(),
        config.forecast_days,
        config.forecast_hours,
    ));
    let synthetic = Arc::new(SyntheticProvider::new());

    let forecast_service = Arc::new(ForecastService::new(
        live_provider.clone(),
        synthetic,
        Arc::clone(&geocoder),
    ));

    let climate_cache = SingleEntryCache::new(
        config.climate_cache_path.clone(),
        config.climate_cache_ttl_hours * 3600,
    );
    let climate_service = Arc::new(ClimateService::new(live_provider.clone(), climate_cache));

    let environment_service = Arc::new(EnvironmentService::new(
        live_provider,
        Arc::clone(&geocoder),
    ));

    // Create shared application state
    let state = AppState {
        config: Arc::new(config.clone()),
        geocoder,
        forecast_service,
        climate_service,
        environment_service,
    };

    // Build router
    let app = routes::build_router()
        .layer(
            ServiceBuilder::new()
                // Handle timeout errors
                .layer(HandleErrorLayer::new(handle_timeout_error))
                // Request timeout (60 seconds for slow upstream calls)
                .timeout(Duration::from_secs(60)),
        )
        .layer(TraceLayer::new_for_http())
        .with_state(state);

    // Start server with graceful shutdown
    let addr = format!("{}:{}", config.host, config.port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!("Server listening on {}", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("Server shutdown complete");

    Ok(())
}
