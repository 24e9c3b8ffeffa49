//! API Request Handlers

use axum::{
    extract::{rejection::JsonRejection, Json, State},
    http::StatusCode,
};
use serde::Serialize;
use std::sync::Arc;
use std::time::Instant;
use tracing::{info, warn};

use super::middleware::RateLimiter;
use super::types::*;
use crate::core::emissions::VehicleType;
use crate::core::summary::{MapView, RouteSummary};
use crate::core::validation::{parse_lat_lon, parse_waypoints};
use crate::models::errors::{AppError, AppResult};
use crate::models::types::{Profile, RouteResult};
use crate::providers::openrouteservice::RouteClient;
use crate::utils::constants::APP_VERSION;

/// Shared application state
pub struct AppState {
    pub client: RouteClient,
    pub rate_limiter: Arc<RateLimiter>,
    pub start_time: Instant,
}

impl AppState {
    pub fn new(client: RouteClient, rate_limiter: Arc<RateLimiter>) -> Self {
        Self {
            client,
            rate_limiter,
            start_time: Instant::now(),
        }
    }

    pub fn uptime_seconds(&self) -> u64 {
        self.start_time.elapsed().as_secs()
    }
}

type HandlerError<T> = (StatusCode, Json<ApiResponse<T>>);

fn latency_ms(start: Instant) -> f64 {
    start.elapsed().as_secs_f64() * 1000.0
}

fn status_of(err: &AppError) -> StatusCode {
    StatusCode::from_u16(err.code.http_status()).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR)
}

fn error_reply(err: AppError, start: Instant) -> HandlerError<()> {
    warn!(code = err.code_str(), "{}", err.message);
    (
        status_of(&err),
        Json(ApiResponse::error(ApiError::from(&err), latency_ms(start))),
    )
}

fn failure_reply<T: Serialize>(err: AppError, data: T, start: Instant) -> HandlerError<T> {
    warn!(code = err.code_str(), "{}", err.message);
    (
        status_of(&err),
        Json(ApiResponse::failure(data, ApiError::from(&err), latency_ms(start))),
    )
}

fn parse_profile(raw: Option<&str>) -> AppResult<Profile> {
    raw.map(str::parse::<Profile>).transpose().map(Option::unwrap_or_default)
}

// ============================================
// Health Check
// ============================================

pub async fn health_check(State(state): State<Arc<AppState>>) -> Json<ApiResponse<HealthData>> {
    let start = Instant::now();

    let data = HealthData {
        status: "healthy".to_string(),
        version: APP_VERSION.to_string(),
        uptime_seconds: state.uptime_seconds(),
        provider_configured: state.client.config().has_api_key(),
    };

    Json(ApiResponse::success(data, latency_ms(start)))
}

// ============================================
// Directions
// ============================================

/// Raw directions: `[[lon, lat], ...]` in, first route candidate out
pub async fn directions(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<DirectionsRequestBody>, JsonRejection>,
) -> Result<Json<ApiResponse<RouteResult>>, HandlerError<()>> {
    let start = Instant::now();

    let Json(req) =
        payload.map_err(|e| error_reply(AppError::invalid_body(e.body_text()), start))?;

    let waypoints = parse_waypoints(&req.coordinates).map_err(|e| error_reply(e, start))?;
    let profile = parse_profile(req.profile.as_deref()).map_err(|e| error_reply(e, start))?;

    let route = state
        .client
        .compute_route(&waypoints, profile)
        .await
        .map_err(|e| error_reply(e, start))?;

    Ok(Json(ApiResponse::success(route, latency_ms(start))))
}

// ============================================
// Route Planning
// ============================================

/// Dashboard flow: two "lat, lon" inputs and a vehicle in; route,
/// statistics and map view out. Failures carry the default map view.
pub async fn plan_route(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<PlanRequest>, JsonRejection>,
) -> Result<Json<ApiResponse<PlanData>>, HandlerError<MapView>> {
    let start = Instant::now();

    let Json(req) = payload.map_err(|e| {
        failure_reply(AppError::invalid_body(e.body_text()), MapView::default(), start)
    })?;

    let plan = build_plan(&state.client, &req)
        .await
        .map_err(|e| failure_reply(e, MapView::default(), start))?;

    info!(
        vehicle = %plan.summary.vehicle_type,
        distance_km = plan.summary.distance_km,
        emissions_kg = plan.summary.emissions_kg,
        "✅ Route planned"
    );

    Ok(Json(ApiResponse::success(plan, latency_ms(start))))
}

async fn build_plan(client: &RouteClient, req: &PlanRequest) -> AppResult<PlanData> {
    let origin = parse_lat_lon(&req.start, "start")?;
    let destination = parse_lat_lon(&req.end, "end")?;
    let vehicle = match req.vehicle_type.as_deref() {
        Some(raw) => raw.parse::<VehicleType>()?,
        None => VehicleType::default(),
    };
    let profile = parse_profile(req.profile.as_deref())?;

    let route = client.compute_route(&[origin, destination], profile).await?;

    Ok(PlanData {
        summary: RouteSummary::from_route(&route, vehicle),
        vehicle: vehicle.info(),
        map: MapView::for_route(origin, destination, &route),
        route,
    })
}

// ============================================
// Reference Data
// ============================================

pub async fn list_vehicles() -> Json<ApiResponse<VehiclesData>> {
    let start = Instant::now();

    let data = VehiclesData {
        vehicles: VehicleType::all().iter().map(VehicleType::info).collect(),
    };

    Json(ApiResponse::success(data, latency_ms(start)))
}
