//! PathX REST API Server
//!
//! Usage:
//!   cargo run --bin pathx_api
//!
//! Environment:
//!   ORS_API_KEY      - OpenRouteService key (required for routing calls)
//!   ORS_BASE_URL     - Provider base URL (default: https://api.openrouteservice.org)
//!   ORS_TIMEOUT_SECS - Upstream timeout in seconds (default: 10)
//!   PORT / PATHX_PORT - Server port (default: 8080)
//!   PATHX_HOST       - Server host (default: 0.0.0.0)
//!   PATHX_RATE_LIMIT - Requests per minute per client, 0 = off (default: 60)
//!   PATHX_TRUST_PROXY - Rate-limit on X-Forwarded-For (default: false)
//!   RUST_LOG         - Log level (default: info)

use pathx::api::{create_router, start_cleanup_task, AppState, RateLimitConfig, RateLimiter};
use pathx::utils::constants::{APP_NAME, APP_VERSION};
use pathx::{RouteClient, RouteConfig, ServerConfig};
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::net::TcpListener;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> eyre::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_target(false)
        .compact()
        .init();

    let route_config = RouteConfig::from_env()?;
    if !route_config.has_api_key() {
        warn!("⚠️  ORS_API_KEY not set! Routing endpoints will answer with CFG_MISSING_API_KEY");
    }
    let server_config = ServerConfig::from_env()?;

    let client = RouteClient::new(route_config)?;
    let rate_limiter = Arc::new(RateLimiter::new(
        RateLimitConfig::per_minute(server_config.rate_limit_per_minute)
            .behind_proxy(server_config.trust_proxy),
    ));

    start_cleanup_task(rate_limiter.clone());
    info!("🧹 Background cleanup task started");

    let state = Arc::new(AppState::new(client, rate_limiter));
    let app = create_router(state);

    let listener = TcpListener::bind(server_config.bind_addr()).await?;
    let addr = listener.local_addr()?;

    info!("🚀 {} API v{} starting on http://{}", APP_NAME, APP_VERSION, addr);
    info!("Endpoints:");
    info!("  POST /v1/directions  - Route for [[lon, lat], ...] waypoints");
    info!("  POST /v1/plan        - Route, CO₂ estimate and map view for two \"lat, lon\" inputs");
    info!("  GET  /v1/vehicles    - Emission factors per vehicle type");
    info!("  GET  /v1/health      - Health check");

    let shutdown_signal = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            warn!("Failed to install Ctrl+C handler: {}", e);
            std::future::pending::<()>().await;
        }
    };

    axum::serve(
        listener,
        app.into_make_service_with_connect_info::<SocketAddr>(),
    )
    .with_graceful_shutdown(shutdown_signal)
    .await?;

    info!("👋 {} API shutdown complete", APP_NAME);

    Ok(())
}
