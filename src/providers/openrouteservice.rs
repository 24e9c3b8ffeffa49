//! OpenRouteService Directions Client
//!
//! One call, one request: validate waypoints, resolve the credential, POST to
//! `/v2/directions/{profile}/geojson` and return the first route candidate.
//!
//! ✅ DOES:
//! - Reject bad coordinates before touching the network
//! - Map every failure to a coded [`AppError`] (config, validation, request,
//!   no route, response format)
//!
//! ❌ DOES NOT:
//! - Retry, cache or reorder waypoints
//!
//! API: https://openrouteservice.org/dev/#/api-docs/v2/directions/{profile}/geojson/post

use reqwest::header::{HeaderValue, AUTHORIZATION, CONTENT_TYPE, USER_AGENT};
use serde::Serialize;
use serde_json::Value;
use std::time::Instant;
use tracing::{debug, info, warn};

use crate::models::config::{Credential, RouteConfig};
use crate::models::errors::{AppError, AppResult};
use crate::models::types::{Profile, RouteQuery, RouteResult, Waypoint};
use crate::utils::constants::{
    directions_url, ENV_ORS_API_KEY, ORS_PREFERENCE, ORS_UNITS, USER_AGENT as USER_AGENT_CONST,
};

// ============================================
// Wire types
// ============================================

/// Request body for the directions endpoint
#[derive(Debug, Clone, Serialize)]
pub struct DirectionsRequest {
    pub coordinates: Vec<Waypoint>,
    pub elevation: bool,
    pub instructions: bool,
    pub preference: &'static str,
    pub units: &'static str,
}

impl DirectionsRequest {
    pub fn new(waypoints: &[Waypoint]) -> Self {
        Self {
            coordinates: waypoints.to_vec(),
            elevation: false,
            instructions: false,
            preference: ORS_PREFERENCE,
            units: ORS_UNITS,
        }
    }
}

// ============================================
// Client
// ============================================

/// Directions client. Cheap to clone; holds no per-call state.
#[derive(Debug, Clone)]
pub struct RouteClient {
    client: reqwest::Client,
    config: RouteConfig,
}

impl RouteClient {
    pub fn new(config: RouteConfig) -> AppResult<Self> {
        let client = reqwest::Client::builder()
            .timeout(config.timeout)
            .gzip(true)
            .build()
            .map_err(|e| AppError::invalid_config(format!("failed to build HTTP client: {}", e)))?;

        Ok(Self { client, config })
    }

    /// Build from environment variables (ORS_API_KEY, ORS_BASE_URL, ORS_TIMEOUT_SECS)
    pub fn from_env() -> AppResult<Self> {
        Self::new(RouteConfig::from_env()?)
    }

    pub fn config(&self) -> &RouteConfig {
        &self.config
    }

    /// Credential for the provider; configuration error when absent or blank
    pub fn resolve_credential(&self) -> AppResult<Credential> {
        self.config.resolve_credential()
    }

    /// Fetch the first route through `waypoints` for `profile`
    pub async fn compute_route(
        &self,
        waypoints: &[Waypoint],
        profile: Profile,
    ) -> AppResult<RouteResult> {
        let query = RouteQuery::new(waypoints.to_vec(), profile)?;
        self.compute(&query).await
    }

    /// Fetch the first route for an already validated query
    pub async fn compute(&self, query: &RouteQuery) -> AppResult<RouteResult> {
        let credential = self.resolve_credential()?;
        let mut auth = HeaderValue::from_str(credential.expose()).map_err(|_| {
            AppError::invalid_config(format!(
                "{} contains characters not allowed in an HTTP header",
                ENV_ORS_API_KEY
            ))
        })?;
        auth.set_sensitive(true);

        let url = directions_url(&self.config.base_url, query.profile().as_str());
        let body = DirectionsRequest::new(query.waypoints());

        debug!(
            profile = %query.profile(),
            waypoints = query.waypoints().len(),
            "🔍 ORS: requesting directions"
        );
        let started = Instant::now();

        let response = self
            .client
            .post(&url)
            .header(AUTHORIZATION, auth)
            .header(CONTENT_TYPE, "application/json")
            .header(USER_AGENT, USER_AGENT_CONST)
            .json(&body)
            .send()
            .await
            .map_err(|e| {
                warn!("⚠️ ORS request failed: {}", e);
                AppError::from(e)
            })?;

        let status = response.status();
        if !status.is_success() {
            let text = response.text().await.ok();
            warn!(status = status.as_u16(), "⚠️ ORS returned an error status");
            return Err(AppError::http_status(
                status.as_u16(),
                status.canonical_reason().unwrap_or(""),
                text.as_deref(),
            ));
        }

        let text = response.text().await?;
        let route = parse_directions_response(&text)?;

        info!(
            profile = %query.profile(),
            latency_ms = started.elapsed().as_millis() as u64,
            "🗺️ ORS: route {:.2} km, {:.1} min, {} points",
            route.distance / 1000.0,
            route.duration / 60.0,
            route.geometry.len()
        );

        Ok(route)
    }
}

/// Turn a 2xx response body into the first route candidate.
///
/// The body is walked as untyped JSON so every format error names the
/// offending field. Geometry points keep lon and lat; a third value
/// (elevation) is dropped.
pub fn parse_directions_response(body: &str) -> AppResult<RouteResult> {
    let root: Value = serde_json::from_str(body)?;

    let features = match root.get("features") {
        None | Some(Value::Null) => return Err(AppError::no_route()),
        Some(Value::Array(features)) => features,
        Some(other) => {
            return Err(AppError::invalid_response(
                "features",
                format!("expected an array, got {}", json_type(other)),
            ))
        }
    };
    let feature = features.first().ok_or_else(AppError::no_route)?;

    let properties = required(feature, "properties", "features[0].properties")?;
    let summary = required(properties, "summary", "features[0].properties.summary")?;
    if !summary.is_object() {
        return Err(AppError::invalid_response(
            "features[0].properties.summary",
            format!("expected an object, got {}", json_type(summary)),
        ));
    }
    let distance = non_negative(summary.get("distance"), "features[0].properties.summary.distance")?;
    let duration = non_negative(summary.get("duration"), "features[0].properties.summary.duration")?;

    let geometry = required(feature, "geometry", "features[0].geometry")?;
    let coordinates = required(geometry, "coordinates", "features[0].geometry.coordinates")?
        .as_array()
        .ok_or_else(|| {
            AppError::invalid_response(
                "features[0].geometry.coordinates",
                "expected an array of [lon, lat] points",
            )
        })?;

    let geometry = coordinates
        .iter()
        .enumerate()
        .map(|(i, point)| geometry_point(point, i))
        .collect::<AppResult<Vec<_>>>()?;

    Ok(RouteResult {
        distance,
        duration,
        geometry,
    })
}

fn required<'a>(parent: &'a Value, key: &str, path: &str) -> AppResult<&'a Value> {
    match parent.get(key) {
        None | Some(Value::Null) => Err(AppError::invalid_response(path, "missing")),
        Some(value) => Ok(value),
    }
}

fn non_negative(value: Option<&Value>, field: &str) -> AppResult<f64> {
    let value = match value {
        None | Some(Value::Null) => return Ok(0.0),
        Some(value) => value,
    };
    match value.as_f64() {
        Some(v) if v >= 0.0 => Ok(v),
        Some(v) => Err(AppError::invalid_response(
            field,
            format!("expected a non-negative number, got {}", v),
        )),
        None => Err(AppError::invalid_response(
            field,
            format!("expected a number, got {}", json_type(value)),
        )),
    }
}

fn geometry_point(point: &Value, index: usize) -> AppResult<Waypoint> {
    let pair = point
        .as_array()
        .filter(|values| values.len() >= 2)
        .and_then(|values| Some([values[0].as_f64()?, values[1].as_f64()?]));

    pair.map(Waypoint::from).ok_or_else(|| {
        AppError::invalid_response(
            &format!("features[0].geometry.coordinates[{}]", index),
            format!("expected [lon, lat] numbers, got {}", point),
        )
    })
}

fn json_type(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
